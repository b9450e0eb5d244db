//! Composition root for the decoy core.

use super::handler::HandlerContext;
use super::listener::PortListener;
use crate::aggregation::aggregator::Aggregator;
use crate::configuration::config::Config;
use crate::error_handling::types::DispatchError;
use crate::reporting::log_sink::AttackLog;
use log::{error, info};
use std::sync::Arc;
use tokio::sync::{watch, Semaphore};
use tokio::task::JoinSet;

/// Creates and owns the shared context, starts one listener per
/// configured port, and carries the process-wide shutdown signal.
///
/// Listeners are started once and never restarted. Shutdown is
/// best-effort: the signal stops every accept loop immediately, but
/// in-flight handlers run to natural completion (bounded by their own
/// timeouts) and may still record into the aggregator afterwards.
pub struct Dispatcher {
    config: Config,
    ctx: Arc<HandlerContext>,
    handler_permits: Arc<Semaphore>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    listeners: JoinSet<()>,
}

impl Dispatcher {
    pub fn new(config: Config) -> Result<Self, DispatchError> {
        let attack_log = AttackLog::create_in(&config.log_dir)?;
        let ctx = Arc::new(HandlerContext {
            aggregator: Arc::new(Aggregator::new()),
            attack_log: Arc::new(attack_log),
        });
        let handler_permits = Arc::new(Semaphore::new(config.max_connections));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            config,
            ctx,
            handler_permits,
            shutdown_tx,
            shutdown_rx,
            listeners: JoinSet::new(),
        })
    }

    /// The shared aggregator, for the reporting surfaces.
    pub fn aggregator(&self) -> Arc<Aggregator> {
        Arc::clone(&self.ctx.aggregator)
    }

    pub fn monitored_ports(&self) -> usize {
        self.config.ports.len()
    }

    /// Spawns one listener task per configured port. A port that fails to
    /// bind is reported and left non-functional; its siblings start
    /// regardless.
    pub fn start(&mut self) {
        for listener_config in self.config.listeners() {
            let port = listener_config.port;
            let listener = PortListener::new(
                listener_config,
                Arc::clone(&self.ctx),
                Arc::clone(&self.handler_permits),
                self.shutdown_rx.clone(),
            );
            self.listeners.spawn(async move {
                if let Err(e) = listener.run().await {
                    error!("Could not start listener on port {}: {}", port, e);
                }
            });
        }
        info!("Started {} decoy listeners", self.config.ports.len());
    }

    /// Signals every listener to stop and waits for the accept loops to
    /// drain.
    pub async fn shutdown(&mut self) {
        info!("Shutting down decoy listeners");
        let _ = self.shutdown_tx.send(true);
        while let Some(joined) = self.listeners.join_next().await {
            if let Err(e) = joined {
                error!("Listener task failed to join: {}", e);
            }
        }
        info!(
            "Shutdown complete, {} attempts recorded",
            self.ctx.aggregator.snapshot().total_attempts
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_config(dir: &std::path::Path, ports: Vec<u16>) -> Config {
        Config {
            ports,
            dashboard_enabled: false,
            log_dir: dir.to_path_buf(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_start_and_shutdown_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        // Port 0 binds an ephemeral port; good enough for lifecycle tests.
        let mut dispatcher = Dispatcher::new(test_config(dir.path(), vec![0])).unwrap();

        dispatcher.start();
        tokio::time::sleep(Duration::from_millis(50)).await;

        tokio::time::timeout(Duration::from_secs(2), dispatcher.shutdown())
            .await
            .expect("shutdown should drain promptly");
    }

    #[tokio::test]
    async fn test_bind_failure_does_not_stop_siblings() {
        let dir = tempfile::tempdir().unwrap();
        // Occupy a port so one listener fails to bind.
        let taken = std::net::TcpListener::bind("0.0.0.0:0").unwrap();
        let taken_port = taken.local_addr().unwrap().port();

        let mut dispatcher =
            Dispatcher::new(test_config(dir.path(), vec![taken_port, 0])).unwrap();
        dispatcher.start();
        tokio::time::sleep(Duration::from_millis(100)).await;

        // The failed listener must not poison shutdown of the healthy one.
        tokio::time::timeout(Duration::from_secs(2), dispatcher.shutdown())
            .await
            .expect("shutdown should drain promptly");
    }

    #[tokio::test]
    async fn test_aggregator_is_shared_and_empty_at_startup() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher = Dispatcher::new(test_config(dir.path(), vec![0])).unwrap();

        let aggregator = dispatcher.aggregator();
        assert_eq!(aggregator.snapshot().total_attempts, 0);
        assert_eq!(dispatcher.monitored_ports(), 1);
    }
}
