//! Minimal client for the cluster info interface.
//!
//! Opens one connection per configured seed node, sends newline-separated
//! info commands and reads back the `name\tvalue` replies.

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod message;

pub use client::{Client, Cluster, InfoResponse, NodeReply};
pub use codec::InfoCodec;
pub use config::{ClientConfig, Host};
pub use error::{ClientError, ProtocolError};
pub use message::{InfoReply, InfoRequest};
