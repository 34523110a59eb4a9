//! IPC (Inter-Process Communication) module for indicator control
//!
//! Provides platform-specific implementations:
//! - Unix (Linux/macOS): Unix Domain Sockets
//! - Windows: Named Pipes
//!
//! Line protocol, one request per connection:
//! - a line starting with `{` is a channel envelope, published on the bus
//! - `status` returns the per-position overlay states

#[cfg(windows)]
mod named_pipe;
#[cfg(unix)]
mod unix_socket;

#[cfg(windows)]
pub use named_pipe::{NamedPipeClient, NamedPipeServer};
#[cfg(unix)]
pub use unix_socket::{UnixSocketClient, UnixSocketServer};

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::application::ports::EventChannel;
use crate::application::IndicatorSnapshot;
use crate::domain::event::ChannelEnvelope;

/// Status function type for IPC servers
pub type StatusFn = Arc<dyn Fn() -> IndicatorSnapshot + Send + Sync>;

/// Status request keyword
pub const STATUS_COMMAND: &str = "status";

/// Per-user runtime directory, or the temp dir when unset
pub fn runtime_dir() -> PathBuf {
    std::env::var("XDG_RUNTIME_DIR")
        .ok()
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
}

/// Answer one request line.
///
/// The returned response carries no trailing newline.
pub fn handle_request(line: &str, channel: &dyn EventChannel, status_fn: &StatusFn) -> String {
    let line = line.trim();

    if line.starts_with('{') {
        return match ChannelEnvelope::from_json(line) {
            Ok(envelope) => {
                let reached = channel.publish(envelope);
                tracing::debug!(listeners = reached, "Envelope published from IPC");
                "ok".to_string()
            }
            Err(e) => format!("error: {}", e),
        };
    }

    match line {
        STATUS_COMMAND => status_fn().to_string(),
        _ => "error: unknown command".to_string(),
    }
}

/// Read one request line from `stream` and write back its response
pub(crate) async fn serve_connection<S>(
    stream: S,
    channel: Arc<dyn EventChannel>,
    status_fn: StatusFn,
) -> io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (reader, mut writer) = tokio::io::split(stream);
    let mut line = String::new();
    BufReader::new(reader).read_line(&mut line).await?;

    let response = handle_request(&line, channel.as_ref(), &status_fn);
    writer.write_all(format!("{}\n", response).as_bytes()).await?;
    writer.shutdown().await
}

/// Send `cmd` as one line over `stream` and read the response line
pub(crate) async fn exchange<S>(stream: S, cmd: &str) -> io::Result<String>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (reader, mut writer) = tokio::io::split(stream);
    writer.write_all(format!("{}\n", cmd).as_bytes()).await?;
    writer.flush().await?;

    let mut response = String::new();
    BufReader::new(reader).read_line(&mut response).await?;
    Ok(response)
}

/// Trait for IPC servers that feed the event channel
#[async_trait::async_trait]
pub trait IpcServer: Send + Sync {
    /// Bind to the IPC endpoint
    fn bind(&mut self) -> io::Result<()>;

    /// Get the path/name of the IPC endpoint
    fn path(&self) -> String;

    /// Accept and handle connections
    ///
    /// This runs in a loop, accepting connections and answering each request
    /// with [`handle_request`].
    async fn run(&self, channel: Arc<dyn EventChannel>, status_fn: StatusFn) -> io::Result<()>;

    /// Cleanup IPC resources
    fn cleanup(&self);
}

/// Trait for IPC clients that talk to the running indicator
#[async_trait::async_trait]
pub trait IpcClient: Send + Sync {
    /// Check if the indicator appears to be running (endpoint exists)
    fn is_indicator_running(&self) -> bool;

    /// Send a request line and receive the response line
    async fn send_command(&self, cmd: &str) -> io::Result<String>;
}

/// Create the appropriate IPC server for the current platform
#[cfg(unix)]
pub fn create_ipc_server() -> Box<dyn IpcServer> {
    Box::new(UnixSocketServer::new(unix_socket::socket_path()))
}

#[cfg(windows)]
pub fn create_ipc_server() -> Box<dyn IpcServer> {
    Box::new(NamedPipeServer::new())
}

/// Create the appropriate IPC client for the current platform
#[cfg(unix)]
pub fn create_ipc_client() -> Box<dyn IpcClient> {
    Box::new(UnixSocketClient::new(unix_socket::socket_path()))
}

#[cfg(windows)]
pub fn create_ipc_client() -> Box<dyn IpcClient> {
    Box::new(NamedPipeClient::new())
}
