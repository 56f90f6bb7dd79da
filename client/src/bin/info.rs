use std::io;
use std::process::ExitCode;

use clap::Parser;
use common::Client;
use lib::{run, ClientArgs, ExitStatus};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr and stay off unless RUST_LOG asks for them, stdout
    // only carries the formatted reply.
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::OFF.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    let args = ClientArgs::parse();
    if args.help {
        if let Err(e) = ClientArgs::print_help() {
            eprintln!("error: {}", e);
        }
        return ExitStatus::Help.into();
    }

    let config = args.config();
    let request = args.request();
    info!("Sending {:?} to {}:{}", request, args.host, args.port);

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr();
    run::<Client, _, _>(&config, &request, &mut stdout, &mut stderr)
        .await
        .into()
}
