use crate::{
    cli::{Config, actions::Action, commands, globals::GlobalArgs},
    error::Error,
    s3::S3,
    stream::compression::Compression,
};
use anyhow::anyhow;
use clap::{ArgMatches, error::ErrorKind};
use colored::Colorize;
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

fn me() -> Option<String> {
    std::env::current_exe()
        .ok()?
        .file_name()?
        .to_str()?
        .to_owned()
        .into()
}

fn usage() -> Error {
    Error::Usage(format!(
        "Usage: {} -b BUCKET_NAME -d DIRECTORY_TO_SYNC [-c gzip|br]\nFor more information try {}",
        me().unwrap_or_else(|| "s3up".to_string()),
        "--help".green()
    ))
}

/// `~/.config/s3up/config.yml`
#[must_use]
pub fn get_config_path() -> PathBuf {
    let home_dir = dirs::home_dir().map_or_else(|| PathBuf::from("/tmp"), |h| h);

    Path::new(&home_dir)
        .join(".config")
        .join("s3up")
        .join("config.yml")
}

fn load_config(matches: &ArgMatches) -> Result<Config, Error> {
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        return Config::new(path).map_err(Error::Session);
    }

    let default = get_config_path();
    if default.is_file() {
        log::info!("config file: {}", default.display());
        Config::new(&default).map_err(Error::Session)
    } else {
        Ok(Config::default())
    }
}

/// # Errors
///
/// Will return an error if the arguments are invalid or the session can not be created
pub fn start() -> Result<(S3, Action, GlobalArgs), Error> {
    start_from(std::env::args_os())
}

/// Same as [`start`] with explicit arguments, the first one is the program name
///
/// # Errors
///
/// Will return an error if the arguments are invalid or the session can not be created
pub fn start_from<I, T>(args: I) -> Result<(S3, Action, GlobalArgs), Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match commands::new().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(e) => match e.kind() {
            // prints and exits with 0
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => return Err(usage()),
        },
    };

    let verbosity_level = match matches.get_one::<u8>("verbose").copied().unwrap_or(0) {
        0 => log::LevelFilter::Off,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };

    // the logger can only be installed once per process
    if let Err(e) = env_logger::Builder::new()
        .filter_level(verbosity_level)
        .try_init()
    {
        log::debug!("logger already initialized: {e}");
    }

    // BUCKET
    let bucket = matches
        .get_one::<String>("bucket")
        .filter(|b| !b.is_empty())
        .ok_or_else(usage)?;

    // DIRECTORY
    let dir = matches
        .get_one::<PathBuf>("dir")
        .filter(|d| !d.as_os_str().is_empty())
        .ok_or_else(usage)?;

    // COMPRESSION
    let compression = matches
        .get_one::<String>("compression")
        .map_or(Ok(Compression::None), |c| c.parse::<Compression>())
        .map_err(|e| {
            log::info!("{e}");
            usage()
        })?;

    // define global args
    let mut global_args = GlobalArgs::new();

    global_args.set_retries(matches.get_one::<u8>("retries").copied().unwrap_or(3));
    global_args.set_number(matches.get_one::<u8>("number").copied().unwrap_or(4));
    global_args.quiet = matches.get_flag("quiet");

    // load the config file
    let config = load_config(&matches)?;

    log::debug!("config: {config:#?}");

    // REGION
    let region = config
        .get_region(
            matches
                .get_one::<String>("region")
                .map_or("", String::as_str),
        )
        .map_err(Error::Session)?;

    // AUTH
    let credentials = config.credentials();
    if credentials.is_empty() {
        return Err(Error::Session(anyhow!(
            "no credentials found, set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY or use --config \
             (~/.aws/credentials and AWS_PROFILE are not read)"
        )));
    }

    // create the S3 object
    let s3 = S3::new(&credentials, &region, bucket).map_err(Error::Session)?;

    log::debug!("S3:\n{s3}");

    let action = Action::PutDirectory {
        dir: dir.clone(),
        acl: matches
            .get_one::<String>("acl")
            .map_or_else(|| "public-read".to_string(), ToString::to_string),
        compression,
        sync: matches.get_flag("sync"),
    };

    log::debug!("globals: {global_args:#?}, action: {action:#?}");

    Ok((s3, action, global_args))
}
