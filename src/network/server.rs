//! TCP Server
//!
//! Accepts connections and runs one handler thread per connection.

use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::error::{Result, SkkError};

use super::limiter::{ConnectionLimiter, Permit};
use super::Connection;

/// TCP server for skkserv
pub struct Server {
    /// Server configuration
    config: Config,

    /// Shared request dispatcher
    dispatcher: Arc<Dispatcher>,

    /// Bound listener, owned by the accept loop
    listener: Option<TcpListener>,

    /// Optional cap on live connections
    limiter: ConnectionLimiter,
}

impl Server {
    /// Create a new server with the given config and dispatcher
    pub fn new(config: Config, dispatcher: Arc<Dispatcher>) -> Self {
        let limiter = ConnectionLimiter::new(config.max_connections);
        Self {
            config,
            dispatcher,
            listener: None,
            limiter,
        }
    }

    /// Resolve and bind the listen address
    ///
    /// Returns the bound socket address. Calling it again is a no-op.
    pub fn bind(&mut self) -> Result<SocketAddr> {
        if let Some(listener) = &self.listener {
            return Ok(listener.local_addr()?);
        }

        let listener = TcpListener::bind(&self.config.listen_addr).map_err(|e| {
            SkkError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to listen on {}: {}", self.config.listen_addr, e),
            ))
        })?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Listening on {}", local_addr);
        self.listener = Some(listener);
        Ok(local_addr)
    }

    /// Address actually bound, once `bind` has succeeded
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    /// Start the server (blocking)
    ///
    /// Binds if needed, then accepts forever. Accept failures are logged and
    /// skipped; only a bind failure is returned.
    pub fn run(&mut self) -> Result<()> {
        self.bind()?;
        let listener = match &self.listener {
            Some(listener) => listener,
            None => return Err(SkkError::Config("listener not bound".to_string())),
        };

        for stream in listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    tracing::error!("Failed to accept a connection: {}", e);
                    continue;
                }
            };

            let permit = self.limiter.acquire();
            self.spawn_handler(stream, permit);
        }

        Ok(())
    }

    /// Hand a connection to its own thread
    fn spawn_handler(&self, stream: TcpStream, permit: Permit) {
        let dispatcher = Arc::clone(&self.dispatcher);
        let read_timeout = self.config.read_timeout_ms;
        let write_timeout = self.config.write_timeout_ms;

        let spawned = thread::Builder::new()
            .name("skkserv-conn".to_string())
            .spawn(move || {
                let _permit = permit;
                let result = Connection::new(stream, dispatcher).and_then(|mut conn| {
                    conn.set_timeouts(read_timeout, write_timeout)?;
                    conn.handle()
                });
                if let Err(e) = result {
                    tracing::debug!("Connection ended with error: {}", e);
                }
            });

        if let Err(e) = spawned {
            tracing::error!("Failed to spawn connection handler: {}", e);
        }
    }
}
