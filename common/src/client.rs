use std::collections::BTreeMap;
use std::future::Future;
use std::io;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_util::codec::Framed;
use tracing::{debug, info, warn};

use crate::codec::InfoCodec;
use crate::config::{ClientConfig, Host};
use crate::error::ClientError;
use crate::message::{InfoReply, InfoRequest};

/// Info command every node answers with its own identifier.
pub const NODE_COMMAND: &str = "node";

/// What one node answered. `Ok(None)` means it had no value for the command.
pub type NodeReply = Result<Option<String>, ClientError>;

/// Replies keyed by node identifier.
pub type InfoResponse = BTreeMap<String, NodeReply>;

/// A connection to a cluster able to answer info commands.
#[allow(async_fn_in_trait)]
pub trait Cluster: Sized {
    async fn connect(config: &ClientConfig) -> Result<Self, ClientError>;

    async fn info(&mut self, request: &str) -> Result<InfoResponse, ClientError>;

    async fn close(self) -> Result<(), ClientError>;
}

struct Node {
    name: String,
    host: Host,
    framed: Framed<TcpStream, InfoCodec>,
}

impl Node {
    async fn connect(host: &Host, timeout: Duration) -> Result<Self, ClientError> {
        let stream = within(
            timeout,
            TcpStream::connect((host.address.as_str(), host.port)),
        )
        .await?;
        stream.set_nodelay(true)?;

        let mut node = Self {
            name: host.to_string(),
            host: host.clone(),
            framed: Framed::new(stream, InfoCodec::new()),
        };

        let reply = node
            .request(InfoRequest::single(NODE_COMMAND), timeout)
            .await?;
        match reply.get(NODE_COMMAND).map(str::trim) {
            Some(name) if !name.is_empty() => node.name = name.to_string(),
            _ => debug!("{} did not report a node name, using its address", host),
        }
        Ok(node)
    }

    async fn request(
        &mut self,
        request: InfoRequest,
        timeout: Duration,
    ) -> Result<InfoReply, ClientError> {
        within(timeout, self.framed.send(request)).await?;
        let frame = tokio::time::timeout(timeout, self.framed.next())
            .await
            .map_err(|_| ClientError::Timeout(timeout))?;
        match frame {
            Some(reply) => Ok(reply?),
            None => Err(ClientError::Disconnected(self.host.to_string())),
        }
    }

    async fn close(self) -> Result<(), ClientError> {
        let mut stream = self.framed.into_inner();
        match stream.shutdown().await {
            Ok(()) => {}
            // the node already hung up
            Err(e) if e.kind() == io::ErrorKind::NotConnected => {}
            Err(e) => return Err(e.into()),
        }
        debug!("closed connection to {} ({})", self.name, self.host);
        Ok(())
    }
}

async fn within<T, E>(
    timeout: Duration,
    fut: impl Future<Output = Result<T, E>>,
) -> Result<T, ClientError>
where
    ClientError: From<E>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result.map_err(ClientError::from),
        Err(_) => Err(ClientError::Timeout(timeout)),
    }
}

/// Connections to the seed nodes of a cluster.
///
/// Peers are never discovered: only the configured seeds are queried.
pub struct Client {
    nodes: Vec<Node>,
    timeout: Duration,
}

impl Client {
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.name.as_str())
    }
}

impl Cluster for Client {
    async fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        if config.hosts.is_empty() {
            return Err(ClientError::NoHosts);
        }

        let mut nodes: Vec<Node> = Vec::with_capacity(config.hosts.len());
        let mut last_error = None;
        for host in &config.hosts {
            match Node::connect(host, config.timeout).await {
                Ok(node) if nodes.iter().any(|n| n.name == node.name) => {
                    debug!("{} is already connected as {}, dropping", host, node.name);
                }
                Ok(node) => {
                    info!("Successfully connected to {} at {}", node.name, host);
                    nodes.push(node);
                }
                Err(e) => {
                    warn!("Failed to connect to {}: {}", host, e);
                    last_error = Some(ClientError::Connect {
                        host: host.clone(),
                        source: Box::new(e),
                    });
                }
            }
        }

        if nodes.is_empty() {
            return Err(last_error.unwrap_or(ClientError::NoHosts));
        }
        Ok(Self {
            nodes,
            timeout: config.timeout,
        })
    }

    async fn info(&mut self, request: &str) -> Result<InfoResponse, ClientError> {
        let mut response = InfoResponse::new();
        for node in &mut self.nodes {
            let reply = node
                .request(InfoRequest::single(request), self.timeout)
                .await
                .map(|reply| value_for(&reply, request));
            if let Err(e) = &reply {
                warn!("info request to {} failed: {}", node.name, e);
            }
            response.insert(node.name.clone(), reply);
        }

        if response.values().all(Result::is_err) {
            if let Some(Err(e)) = response.into_values().next() {
                return Err(e);
            }
            return Ok(InfoResponse::new());
        }
        Ok(response)
    }

    async fn close(self) -> Result<(), ClientError> {
        let mut first_error = None;
        for node in self.nodes {
            let name = node.name.clone();
            if let Err(e) = node.close().await {
                warn!("Failed to close connection to {}: {}", name, e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Picks the value a node returned for `request`. Nodes echo the command as
/// the entry name; a reply with a single entry under another name is taken
/// as the answer too.
fn value_for(reply: &InfoReply, request: &str) -> Option<String> {
    match reply.get(request) {
        Some(value) => Some(value.to_string()),
        None if reply.len() == 1 => reply.entries().first().map(|(_, v)| v.clone()),
        None => None,
    }
}
