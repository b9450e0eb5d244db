use std::net::SocketAddr;
use std::sync::Arc;

use crate::aggregation::aggregator::Aggregator;
use crate::aggregation::types::AttackEvent;
use serde::Serialize;
use warp::{reply, Filter, Rejection};

/// `GET /api/stats` payload.
#[derive(Serialize)]
struct StatsResponse {
    total_attempts: u64,
    unique_sources: usize,
    top_ports: Vec<(u16, u64)>,
    protocols: std::collections::HashMap<String, u64>,
    recent_attacks: Vec<AttackEvent>,
}

/// `GET /api/live` payload.
#[derive(Serialize)]
struct LiveResponse {
    latest_attack: Option<AttackEvent>,
    total_attempts: u64,
    active_monitoring: usize,
}

/// Read-only HTTP projection of the aggregator's state.
///
/// The web server never writes to the aggregator; every route takes a
/// snapshot or a cloned slice of events.
pub struct WebServer {
    aggregator: Arc<Aggregator>,
    monitored_ports: usize,
}

impl WebServer {
    pub fn new(aggregator: Arc<Aggregator>, monitored_ports: usize) -> Self {
        Self {
            aggregator,
            monitored_ports,
        }
    }

    /// Serves the dashboard and API on the given port until the process
    /// exits.
    pub async fn start(&self, port: u16) {
        let aggregator_stats = Arc::clone(&self.aggregator);
        let aggregator_attacks = Arc::clone(&self.aggregator);
        let aggregator_live = Arc::clone(&self.aggregator);
        let monitored_ports = self.monitored_ports;

        // GET / -> dashboard shell
        let dashboard = warp::path::end().and(warp::get()).and_then(|| async move {
            let html = r#"<html><head><title>Nectar Dashboard</title></head>
                <body><h1>Nectar is watching</h1>
                <p>JSON: <a href="/api/stats">/api/stats</a>,
                <a href="/api/attacks">/api/attacks</a>,
                <a href="/api/live">/api/live</a></p></body></html>"#;
            Ok::<_, Rejection>(reply::html(html.to_string()))
        });

        // GET /api/stats -> counters + top ports + recent 20
        let stats = warp::path!("api" / "stats")
            .and(warp::get())
            .and_then(move || {
                let aggregator = Arc::clone(&aggregator_stats);
                async move {
                    let snap = aggregator.snapshot();
                    let body = StatsResponse {
                        total_attempts: snap.total_attempts,
                        unique_sources: snap.unique_sources,
                        top_ports: aggregator.top_ports(5),
                        protocols: snap.protocol_hits,
                        recent_attacks: aggregator.recent_attacks(20),
                    };
                    Ok::<_, Rejection>(reply::json(&body))
                }
            });

        // GET /api/attacks -> recent 50
        let attacks = warp::path!("api" / "attacks")
            .and(warp::get())
            .and_then(move || {
                let aggregator = Arc::clone(&aggregator_attacks);
                async move { Ok::<_, Rejection>(reply::json(&aggregator.recent_attacks(50))) }
            });

        // GET /api/live -> latest event for polling
        let live = warp::path!("api" / "live")
            .and(warp::get())
            .and_then(move || {
                let aggregator = Arc::clone(&aggregator_live);
                async move {
                    let body = LiveResponse {
                        latest_attack: aggregator.latest(),
                        total_attempts: aggregator.snapshot().total_attempts,
                        active_monitoring: monitored_ports,
                    };
                    Ok::<_, Rejection>(reply::json(&body))
                }
            });

        let routes = dashboard.or(stats).or(attacks).or(live);

        let addr: SocketAddr = ([0, 0, 0, 0], port).into();
        warp::serve(routes).run(addr).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{AttackType, Severity};
    use crate::configuration::types::Protocol;

    fn seeded_aggregator() -> Arc<Aggregator> {
        let aggregator = Arc::new(Aggregator::new());
        aggregator.record(AttackEvent::new(
            "203.0.113.9".to_string(),
            22,
            Protocol::TCP,
            b"admin:password",
            AttackType::CredentialStuffing,
            Severity::Medium,
        ));
        aggregator
    }

    #[test]
    fn test_stats_response_serializes() {
        let aggregator = seeded_aggregator();
        let snap = aggregator.snapshot();
        let body = StatsResponse {
            total_attempts: snap.total_attempts,
            unique_sources: snap.unique_sources,
            top_ports: aggregator.top_ports(5),
            protocols: snap.protocol_hits,
            recent_attacks: aggregator.recent_attacks(20),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["total_attempts"], 1);
        assert_eq!(json["unique_sources"], 1);
        assert_eq!(json["recent_attacks"][0]["attack_type"], "CREDENTIAL_STUFFING");
        assert_eq!(json["recent_attacks"][0]["severity"], "MEDIUM");
    }

    #[test]
    fn test_live_response_with_empty_aggregator() {
        let body = LiveResponse {
            latest_attack: Aggregator::new().latest(),
            total_attempts: 0,
            active_monitoring: 12,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json["latest_attack"].is_null());
        assert_eq!(json["active_monitoring"], 12);
    }
}
