//! Per-connection pipeline.
//!
//! One handler owns one accepted socket for its whole lifetime:
//! read -> classify -> origin filter -> record -> banner -> optional
//! follow-up read. Errors are terminal to the handler only; nothing
//! propagates to the owning listener.

use crate::aggregation::aggregator::Aggregator;
use crate::aggregation::types::AttackEvent;
use crate::analysis::classifier::classify;
use crate::analysis::origin::is_local;
use crate::analysis::responder::banner_for;
use crate::configuration::types::ListenerConfig;
use crate::error_handling::types::NetworkError;
use crate::reporting::log_sink::AttackLog;
use log::{debug, error, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{sleep, timeout};

/// Largest chunk captured per read.
pub const READ_BUFFER_SIZE: usize = 4096;

/// Idle window for the initial and the follow-up read.
pub const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Unconditional pause between sending the banner and attempting the
/// follow-up read, giving the peer time to answer.
pub const FOLLOW_UP_DELAY: Duration = Duration::from_millis(500);

/// Shared collaborators injected into every handler.
pub struct HandlerContext {
    pub aggregator: Arc<Aggregator>,
    pub attack_log: Arc<AttackLog>,
}

/// Handles one accepted connection to completion.
///
/// Generic over the stream so tests can drive it with mock I/O. A timeout
/// or EOF with zero bytes captured is reconnaissance noise: the connection
/// is dropped silently and no event is emitted. Local sources are
/// discarded after classification with no observable response of any
/// kind.
pub async fn handle_connection<S>(
    mut stream: S,
    source_addr: String,
    listener: &ListenerConfig,
    ctx: &HandlerContext,
) -> Result<(), NetworkError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buf = vec![0u8; READ_BUFFER_SIZE];

    let n = match timeout(READ_TIMEOUT, stream.read(&mut buf)).await {
        Err(_) => {
            debug!("port {}: no data from {} within timeout", listener.port, source_addr);
            return Ok(());
        }
        Ok(Ok(0)) => return Ok(()),
        Ok(Ok(n)) => n,
        Ok(Err(e)) => return Err(NetworkError::IoError(e)),
    };
    let payload = &buf[..n];

    let (attack_type, severity) = classify(payload, listener.port);

    if is_local(&source_addr) {
        debug!(
            "[IGNORED] local traffic from {}:{}",
            source_addr, listener.port
        );
        return Ok(());
    }

    let event = AttackEvent::new(
        source_addr.clone(),
        listener.port,
        listener.protocol,
        payload,
        attack_type,
        severity,
    );
    warn!(
        "{} ({}) from {}:{}",
        attack_type, severity, source_addr, listener.port
    );
    if let Err(e) = ctx.attack_log.write_event(&event, payload) {
        error!("port {}: {}", listener.port, e);
    }
    let event_id = ctx.aggregator.record(event);

    let banner = banner_for(listener.port);
    if !banner.is_empty() {
        stream.write_all(banner).await?;
        sleep(FOLLOW_UP_DELAY).await;

        // One bounded attempt at a second chunk; timeout, EOF or error
        // here just means the recorded event keeps its initial payload.
        if let Ok(Ok(n)) = timeout(READ_TIMEOUT, stream.read(&mut buf)).await {
            if n > 0 {
                ctx.aggregator.append_payload(event_id, &hex::encode(&buf[..n]));
            }
        }
    }

    Ok(())
}
