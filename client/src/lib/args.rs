use std::io;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use common::config::{DEFAULT_ADDRESS, DEFAULT_PORT};
use common::{ClientConfig, Host};

pub const DEFAULT_REQUEST: &str = "statistics";

/// Sends an info command to a cluster and prints what every node answers.
///
/// `-h` is taken by `--host`, so help is only reachable through `--help`.
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Print the info reply of every cluster node",
    long_about = None,
    disable_help_flag = true
)]
pub struct ClientArgs {
    /// Displays this message.
    #[clap(long)]
    pub help: bool,

    /// Address of the server.
    #[clap(short = 'h', long, default_value = DEFAULT_ADDRESS, value_name = "ADDRESS")]
    pub host: String,

    /// Port of the server.
    #[clap(short, long, default_value_t = DEFAULT_PORT, value_name = "PORT")]
    pub port: u16,

    /// Milliseconds to wait for each connect and reply.
    #[clap(long, default_value = "1000", value_name = "MS")]
    pub timeout: u64,

    /// Info command to send. Words are joined with spaces.
    #[clap(value_name = "REQUEST")]
    pub request: Vec<String>,
}

impl ClientArgs {
    pub fn request(&self) -> String {
        if self.request.is_empty() {
            DEFAULT_REQUEST.to_string()
        } else {
            self.request.join(" ")
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(vec![Host::new(self.host.clone(), self.port)])
            .with_timeout(Duration::from_millis(self.timeout))
    }

    /// Prints usage followed by an empty line.
    pub fn print_help() -> io::Result<()> {
        Self::command().print_help()?;
        println!();
        Ok(())
    }
}
