//! Unix domain socket endpoint (Linux and macOS)

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::{UnixListener, UnixStream};

use super::{exchange, runtime_dir, serve_connection, IpcClient, IpcServer, StatusFn};
use crate::application::ports::EventChannel;

const SOCKET_NAME: &str = "share-indicator.sock";

/// Socket the running indicator listens on
pub fn socket_path() -> PathBuf {
    runtime_dir().join(SOCKET_NAME)
}

/// Accepts one request per connection on a socket file
pub struct UnixSocketServer {
    path: PathBuf,
    listener: Option<UnixListener>,
}

impl UnixSocketServer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            listener: None,
        }
    }
}

impl Drop for UnixSocketServer {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[async_trait]
impl IpcServer for UnixSocketServer {
    fn bind(&mut self) -> io::Result<()> {
        // A previous instance may have left its socket behind
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        self.listener = Some(UnixListener::bind(&self.path)?);
        Ok(())
    }

    fn path(&self) -> String {
        self.path.to_string_lossy().to_string()
    }

    async fn run(&self, channel: Arc<dyn EventChannel>, status_fn: StatusFn) -> io::Result<()> {
        let listener = self
            .listener
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "Socket not bound"))?;

        loop {
            let (stream, _) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    tracing::warn!(error = %e, "Socket accept error");
                    continue;
                }
            };
            let connection = serve_connection(stream, Arc::clone(&channel), Arc::clone(&status_fn));
            tokio::spawn(async move {
                if let Err(e) = connection.await {
                    tracing::warn!(error = %e, "Socket connection error");
                }
            });
        }
    }

    fn cleanup(&self) {
        if self.listener.is_some() {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// Talks to the indicator through its socket file
pub struct UnixSocketClient {
    path: PathBuf,
}

impl UnixSocketClient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl IpcClient for UnixSocketClient {
    fn is_indicator_running(&self) -> bool {
        self.path.exists()
    }

    async fn send_command(&self, cmd: &str) -> io::Result<String> {
        exchange(UnixStream::connect(&self.path).await?, cmd).await
    }
}
