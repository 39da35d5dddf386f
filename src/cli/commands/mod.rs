use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

// canned ACLs
// <https://docs.aws.amazon.com/AmazonS3/latest/userguide/acl-overview.html#canned-acl>
pub const ACLS: [&str; 7] = [
    "private",
    "public-read",
    "public-read-write",
    "authenticated-read",
    "aws-exec-read",
    "bucket-owner-read",
    "bucket-owner-full-control",
];

// keeps the backoff between attempts under 10 minutes
pub const MAX_RETRIES: u8 = 10;

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    // bucket, dir and compression are checked after parsing so that every
    // mistake ends with the same usage line
    Command::new("s3up")
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("bucket")
            .help("Name of the bucket to upload to")
            .short('b')
            .long("bucket")
            .value_name("BUCKET_NAME")
            .num_args(1)
        )
        .arg(
            Arg::new("region")
            .help("AWS region, defaults to the config file, AWS_REGION or us-east-1")
            .short('r')
            .long("region")
            .default_value("")
            .hide_default_value(true)
            .num_args(1)
        )
        .arg(
            Arg::new("dir")
            .help("Path of the directory which contains the files to upload")
            .short('d')
            .long("dir")
            .value_name("DIRECTORY_TO_SYNC")
            .value_parser(clap::value_parser!(PathBuf))
            .num_args(1)
        )
        .arg(
            Arg::new("sync")
            .help("Synchronize the directory, objects only present in the bucket are removed")
            .short('s')
            .long("sync")
            .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("compression")
            .help("Compress the files, possible values: gzip or br, default: no compression")
            .short('c')
            .long("compression")
            .value_name("gzip|br")
            .default_value("")
            .hide_default_value(true)
            .num_args(1)
        )
        .arg(
            Arg::new("acl")
            .help("The canned ACL to apply to every object")
            .short('a')
            .long("acl")
            .default_value("public-read")
            .value_parser(ACLS)
            .num_args(1)
        )
        .arg(
            Arg::new("number")
            .help("Number of max concurrent requests")
            .short('n')
            .long("number")
            .default_value("4")
            .value_parser(clap::value_parser!(u8).range(1..=255))
            .num_args(1)
        )
        .arg(
            Arg::new("retries")
            .help("Number of attempts per request")
            .long("retries")
            .default_value("3")
            .value_parser(clap::value_parser!(u8).range(0..=i64::from(MAX_RETRIES)))
            .num_args(1)
        )
        .arg(
            Arg::new("config")
            .help("YAML file with the credentials, region and endpoint, default: ~/.config/s3up/config.yml")
            .long("config")
            .value_name("config.yml")
            .value_parser(clap::value_parser!(PathBuf))
            .num_args(1)
        )
        .arg(
            Arg::new("quiet")
            .help("Don't report every uploaded or removed object")
            .short('q')
            .long("quiet")
            .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("verbose")
            .help("Verbosity level")
            .short('v')
            .long("verbose")
            .action(ArgAction::Count)
        )
}
