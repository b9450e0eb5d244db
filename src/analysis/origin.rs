//! Source-address filtering.
//!
//! The decoy records traffic from everywhere except its own loopback
//! addresses. Private/LAN ranges are deliberately NOT filtered: probing
//! from inside the local network is exactly the kind of traffic worth
//! observing.

/// Loopback/self addresses whose traffic is discarded. Matching is an
/// exact string comparison; alternate loopback spellings (IPv6-mapped
/// `::ffff:127.0.0.1` and friends) are not canonicalized.
const LOCAL_ADDRS: [&str; 4] = ["127.0.0.1", "localhost", "::1", "0.0.0.0"];

/// True when the address belongs to the loopback/self set.
pub fn is_local(addr: &str) -> bool {
    LOCAL_ADDRS.contains(&addr)
}
