//! Named pipe endpoint (Windows)

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::windows::named_pipe::{ClientOptions, ServerOptions};

use super::{exchange, serve_connection, IpcClient, IpcServer, StatusFn};
use crate::application::ports::EventChannel;

const PIPE_NAME: &str = r"\\.\pipe\share-indicator";

/// Creates one pipe instance per connection
#[derive(Default)]
pub struct NamedPipeServer {
    bound: bool,
}

impl NamedPipeServer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IpcServer for NamedPipeServer {
    fn bind(&mut self) -> io::Result<()> {
        // Pipe instances are created when listening
        self.bound = true;
        Ok(())
    }

    fn path(&self) -> String {
        PIPE_NAME.to_string()
    }

    async fn run(&self, channel: Arc<dyn EventChannel>, status_fn: StatusFn) -> io::Result<()> {
        if !self.bound {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "Pipe not bound"));
        }

        loop {
            let pipe = ServerOptions::new()
                .first_pipe_instance(false)
                .create(PIPE_NAME)?;
            pipe.connect().await?;

            let connection = serve_connection(pipe, Arc::clone(&channel), Arc::clone(&status_fn));
            tokio::spawn(async move {
                if let Err(e) = connection.await {
                    tracing::warn!(error = %e, "Pipe connection error");
                }
            });
        }
    }

    fn cleanup(&self) {}
}

/// Talks to the indicator through its named pipe
#[derive(Default)]
pub struct NamedPipeClient;

impl NamedPipeClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IpcClient for NamedPipeClient {
    fn is_indicator_running(&self) -> bool {
        std::fs::metadata(PIPE_NAME).is_ok()
    }

    async fn send_command(&self, cmd: &str) -> io::Result<String> {
        exchange(ClientOptions::new().open(PIPE_NAME)?, cmd).await
    }
}
