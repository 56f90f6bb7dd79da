use std::io;
use std::string::FromUtf8Error;
use std::time::Duration;

use thiserror::Error;

use crate::config::Host;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("unsupported protocol version {0}")]
    UnsupportedVersion(u8),

    #[error("unexpected message type {0}")]
    UnexpectedType(u8),

    #[error("message body of {0} bytes exceeds the frame limit")]
    BodyTooLarge(u64),

    #[error("reply is not valid utf-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error("io error {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no hosts configured")]
    NoHosts,

    #[error("failed to connect to {host}: {source}")]
    Connect {
        host: Host,
        #[source]
        source: Box<ClientError>,
    },

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("connection closed by {0}")]
    Disconnected(String),
}
