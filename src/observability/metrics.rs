//! Detector metrics.
//!
//! # Metrics
//! - `detector_heartbeats_total` (counter): heartbeats registered, by peer
//! - `detector_failure_probability` (gauge): last swept probability, by peer
//! - `detector_peer_suspected` (gauge): 1=suspected, 0=trusted, by peer
//! - `detector_suspicion_transitions_total` (counter): verdict changes, by peer and direction

/// Handle to the heartbeat counter of `peer`.
///
/// Callers keep the handle so the label is built once per peer.
pub fn heartbeat_counter(peer: &str) -> ::metrics::Counter {
    ::metrics::counter!("detector_heartbeats_total", "peer" => peer.to_string())
}

/// Publish the latest failure probability of `peer`.
pub fn record_failure_probability(peer: &str, probability: f64) {
    ::metrics::gauge!("detector_failure_probability", "peer" => peer.to_string()).set(probability);
}

/// Publish the current verdict of `peer`.
pub fn record_suspected(peer: &str, suspected: bool) {
    let value = if suspected { 1.0 } else { 0.0 };
    ::metrics::gauge!("detector_peer_suspected", "peer" => peer.to_string()).set(value);
}

/// Count a verdict change of `peer` towards `to` ("suspected" or "recovered").
pub fn record_transition(peer: &str, to: &'static str) {
    ::metrics::counter!(
        "detector_suspicion_transitions_total",
        "peer" => peer.to_string(),
        "to" => to
    )
    .increment(1);
}
