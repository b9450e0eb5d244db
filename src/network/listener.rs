//! Per-port accept loop.

use super::handler::{self, HandlerContext};
use crate::configuration::types::ListenerConfig;
use crate::error_handling::types::NetworkError;
use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::sync::{watch, Semaphore};

/// OS listen backlog. Deliberately modest; the decoy is not built to
/// absorb floods.
const LISTEN_BACKLOG: u32 = 5;

/// One bound decoy port.
///
/// Owns the accept loop for its port. Every accepted connection is handed
/// to a detached handler task; the loop never waits on a handler. A bind
/// failure disables only this port and leaves siblings untouched.
pub struct PortListener {
    config: ListenerConfig,
    ctx: Arc<HandlerContext>,
    handler_permits: Arc<Semaphore>,
    shutdown: watch::Receiver<bool>,
}

impl PortListener {
    pub fn new(
        config: ListenerConfig,
        ctx: Arc<HandlerContext>,
        handler_permits: Arc<Semaphore>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            ctx,
            handler_permits,
            shutdown,
        }
    }

    /// Binds the port and runs the accept loop until the shutdown signal
    /// flips. After a successful bind this only returns on shutdown.
    pub async fn run(self) -> Result<(), NetworkError> {
        let listener = Self::bind(self.config.port)?;
        info!(
            "Decoy listening on port {} ({})",
            self.config.port, self.config.protocol
        );
        self.accept_loop(listener).await;
        Ok(())
    }

    async fn accept_loop(mut self, listener: TcpListener) {
        loop {
            tokio::select! {
                _ = self.shutdown.changed() => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => self.dispatch(stream, peer),
                    Err(e) => {
                        error!("Accept error on port {}: {}", self.config.port, e);
                    }
                }
            }
        }

        info!("Listener on port {} stopped", self.config.port);
    }

    /// All-interfaces bind with address reuse, in line with restarting the
    /// decoy without waiting out TIME_WAIT.
    fn bind(port: u16) -> Result<TcpListener, NetworkError> {
        let socket = TcpSocket::new_v4().map_err(NetworkError::SockError)?;
        socket.set_reuseaddr(true).map_err(NetworkError::SockError)?;
        socket
            .bind(SocketAddr::from(([0, 0, 0, 0], port)))
            .map_err(|e| NetworkError::BindError(port, e))?;
        socket
            .listen(LISTEN_BACKLOG)
            .map_err(|e| NetworkError::BindError(port, e))
    }

    /// Spawns an independent handler for one accepted connection. The
    /// handler holds a permit from the process-wide ceiling for its whole
    /// lifetime; past the ceiling, connections are dropped on the floor.
    fn dispatch(&self, stream: TcpStream, peer: SocketAddr) {
        let permit = match Arc::clone(&self.handler_permits).try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!(
                    "Handler ceiling reached, dropping connection from {} on port {}",
                    peer, self.config.port
                );
                return;
            }
        };

        let ctx = Arc::clone(&self.ctx);
        let config = self.config.clone();
        tokio::spawn(async move {
            let _permit = permit;
            let source_addr = peer.ip().to_string();
            if let Err(e) = handler::handle_connection(stream, source_addr, &config, &ctx).await {
                error!("Error handling connection on port {}: {}", config.port, e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::aggregator::Aggregator;
    use crate::reporting::log_sink::AttackLog;
    use std::time::Duration;
    use tokio::io::AsyncWriteExt;

    fn context(dir: &std::path::Path) -> Arc<HandlerContext> {
        Arc::new(HandlerContext {
            aggregator: Arc::new(Aggregator::new()),
            attack_log: Arc::new(AttackLog::create_in(dir).unwrap()),
        })
    }

    #[test]
    fn test_bind_failure_reports_the_port() {
        // Occupy an ephemeral port, then try to bind it again.
        let taken = std::net::TcpListener::bind("0.0.0.0:0").unwrap();
        let port = taken.local_addr().unwrap().port();

        match PortListener::bind(port) {
            Err(NetworkError::BindError(p, _)) => assert_eq!(p, port),
            other => panic!("expected BindError, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_shutdown_signal_stops_the_accept_loop() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, rx) = watch::channel(false);
        let listener = PortListener::new(
            ListenerConfig::tcp(0),
            context(dir.path()),
            Arc::new(Semaphore::new(8)),
            rx,
        );

        let task = tokio::spawn(listener.run());
        tokio::time::sleep(Duration::from_millis(50)).await;

        tx.send(true).unwrap();
        let joined = tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("listener should stop promptly after shutdown");
        joined.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_loopback_connection_is_accepted_but_never_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let (tx, rx) = watch::channel(false);

        // Bind first so the test knows the ephemeral port, then drive the
        // accept loop directly.
        let bound = PortListener::bind(0).unwrap();
        let port = bound.local_addr().unwrap().port();
        let listener = PortListener::new(
            ListenerConfig::tcp(port),
            Arc::clone(&ctx),
            Arc::new(Semaphore::new(8)),
            rx,
        );
        let task = tokio::spawn(listener.accept_loop(bound));
        tokio::time::sleep(Duration::from_millis(50)).await;

        let mut client = tokio::net::TcpStream::connect(("127.0.0.1", port))
            .await
            .unwrap();
        client.write_all(b"admin:password123").await.unwrap();
        drop(client);

        // Give the handler time to classify and (correctly) discard.
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(ctx.aggregator.snapshot().total_attempts, 0);

        tx.send(true).unwrap();
        task.await.unwrap();
    }
}
