use crate::config::{log_config, Config};
use crate::core_network::network::handle_connection;
use crate::core_reply::Reply;
use anyhow::{Context, Result};
use log::{error, info, warn};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;

/// A bound FTP listener. Each accepted connection gets its own task and its
/// own session.
pub struct FtpServer {
    listener: TcpListener,
    config: Arc<Config>,
    sessions: Option<Arc<Semaphore>>,
}

impl FtpServer {
    /// Binds the control listener on `bind_host:listen_port`.
    ///
    /// A root directory that is missing, relative or not canonical goes
    /// through [`Config::prepare`] first.
    pub async fn bind(config: Arc<Config>) -> Result<Self> {
        let config = with_canonical_root(config)?;
        let address = format!("{}:{}", config.server.bind_host, config.server.listen_port);
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind control listener on {}", address))?;
        let sessions = config
            .server
            .max_sessions
            .map(|max| Arc::new(Semaphore::new(max)));
        Ok(Self {
            listener,
            config,
            sessions,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// The canonical directory sessions are confined to.
    pub fn root(&self) -> &Path {
        &self.config.server.root_dir
    }

    /// Accepts connections forever. A failed accept is logged and skipped.
    pub async fn serve(self) -> Result<()> {
        info!("Server listening on {}", self.local_addr()?);

        loop {
            let (socket, addr) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!("Failed to accept connection: {}", e);
                    continue;
                }
            };
            info!("New connection from {}", addr);

            let permit = match &self.sessions {
                Some(sessions) => match Arc::clone(sessions).try_acquire_owned() {
                    Ok(permit) => Some(permit),
                    Err(_) => {
                        warn!("Rejecting {}: session limit reached", addr);
                        tokio::spawn(reject_connection(socket));
                        continue;
                    }
                },
                None => None,
            };

            let config = Arc::clone(&self.config);
            tokio::spawn(async move {
                if let Err(e) = handle_connection(socket, config).await {
                    error!("Connection error from {}: {:#}", addr, e);
                }
                info!("Connection closed for {}", addr);
                drop(permit);
            });
        }
    }
}

// Path containment compares against the canonical root.
fn with_canonical_root(config: Arc<Config>) -> Result<Arc<Config>> {
    let root = &config.server.root_dir;
    let is_canonical = root.is_absolute()
        && root.canonicalize().map_or(false, |canonical| &canonical == root);
    if is_canonical {
        return Ok(config);
    }

    let mut config = Config::clone(&config);
    config.prepare()?;
    Ok(Arc::new(config))
}

async fn reject_connection(mut socket: TcpStream) {
    let reply = Reply::new(421, "Too many connections.");
    if let Err(e) = socket.write_all(reply.encode().as_bytes()).await {
        warn!("Failed to send rejection: {}", e);
    }
    socket.shutdown().await.ok();
}

/// Runs the FTP server with the provided configuration.
///
/// Prepares the root directory, logs the effective configuration and then
/// serves until the process is stopped.
pub async fn run(mut config: Config) -> Result<()> {
    config.prepare()?;
    info!("Starting server with config:");
    log_config(&config);

    let server = FtpServer::bind(Arc::new(config)).await?;
    server.serve().await
}
