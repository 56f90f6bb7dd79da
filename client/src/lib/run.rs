use std::io::Write;
use std::process::ExitCode;

use common::{ClientConfig, ClientError, Cluster};
use thiserror::Error;
use tracing::{debug, error};

use crate::format::{self, FormatError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Help,
    /// The info request or the formatting of its reply failed.
    RequestFailed,
    /// Connecting to or disconnecting from the cluster failed.
    ConnectionFailed,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Help => 1,
            ExitStatus::RequestFailed => 2,
            ExitStatus::ConnectionFailed => 3,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

#[derive(Debug, Error)]
enum RequestError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Connects, sends `request`, prints the reply to `out` and disconnects.
///
/// Errors go to `err` as `error: <message>`. A failed request still closes
/// the connection; a failed connect prints nothing else.
pub async fn run<C, O, E>(config: &ClientConfig, request: &str, out: &mut O, err: &mut E) -> ExitStatus
where
    C: Cluster,
    O: Write,
    E: Write,
{
    let mut cluster = match C::connect(config).await {
        Ok(cluster) => cluster,
        Err(e) => {
            report(err, &e);
            return ExitStatus::ConnectionFailed;
        }
    };

    let mut status = ExitStatus::Success;
    if let Err(e) = query(&mut cluster, request, out).await {
        report(err, &e);
        status = ExitStatus::RequestFailed;
    }

    if let Err(e) = cluster.close().await {
        report(err, &e);
        status = ExitStatus::ConnectionFailed;
    }
    status
}

async fn query<C: Cluster, O: Write>(
    cluster: &mut C,
    request: &str,
    out: &mut O,
) -> Result<(), RequestError> {
    debug!("sending info request {:?}", request);
    let response = cluster.info(request).await?;
    format::write_response(out, &response)?;
    out.flush().map_err(FormatError::from)?;
    Ok(())
}

fn report<E: Write>(err: &mut E, e: &dyn std::error::Error) {
    error!("{}", e);
    let _ = writeln!(err, "error: {}", e);
}
