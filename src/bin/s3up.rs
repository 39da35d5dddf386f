use s3up::{
    Error,
    cli::{
        actions::{Action, put_directory},
        globals::GlobalArgs,
        start,
    },
    s3::S3,
};
use std::process::ExitCode;

// resolves only when Ctrl-C is received
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("unable to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

async fn run(s3: &S3, action: Action, globals: &GlobalArgs) -> Result<(), Error> {
    tokio::select! {
        summary = put_directory::handle(s3, action, globals) => {
            log::info!("{:?}", summary?);
            Ok(())
        }

        // in-flight requests are dropped
        () = interrupted() => Err(Error::Interrupted),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let result = match start() {
        Ok((s3, action, globals)) => run(&s3, action, &globals).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}
