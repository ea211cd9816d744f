//! Per-peer detector registry.
//!
//! # Responsibilities
//! - Map peer identifiers to their detectors
//! - Create a detector lazily on a peer's first heartbeat
//! - Answer probability and verdict queries per peer
//!
//! # Design Decisions
//! - Unknown peers are not suspected (probability 0)
//! - Detectors are handed out as `Arc` so no map shard lock is held while
//!   a detector's own lock is taken
//! - The heartbeat counter of a peer is registered once, when the peer is
//!   first tracked, and reused for every later heartbeat

use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::config::{DetectorConfig, ResolvedConfig};
use crate::detector::{clock, Detector};
use crate::error::ConfigError;
use crate::observability::metrics;

/// A tracked peer: its detector and, when metrics are on, its heartbeat counter.
struct TrackedPeer {
    detector: Arc<Detector>,
    heartbeats: Option<::metrics::Counter>,
}

/// Tracks one failure detector per monitored peer.
pub struct PeerMonitor<K>
where
    K: Eq + Hash,
{
    detectors: DashMap<K, TrackedPeer>,
    template: ResolvedConfig,
    metrics_enabled: bool,
}

impl<K> PeerMonitor<K>
where
    K: Eq + Hash + Clone + Display,
{
    /// Create an empty monitor whose detectors all use `config`.
    pub fn new(config: DetectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            detectors: DashMap::new(),
            template: config.resolve()?,
            metrics_enabled: true,
        })
    }

    /// Turn metric recording on or off.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.metrics_enabled = enabled;
        self
    }

    pub fn metrics_enabled(&self) -> bool {
        self.metrics_enabled
    }

    /// Register a heartbeat from `peer`, tracking it if it is new.
    ///
    /// Fails only when a new peer's sample buffer cannot be allocated.
    pub fn heartbeat(&self, peer: &K, now: Option<i64>) -> Result<(), ConfigError> {
        let (detector, heartbeats) = self.tracked_or_insert(peer)?;
        detector.register_heartbeat(now);

        if let Some(counter) = heartbeats {
            counter.increment(1);
        }
        Ok(())
    }

    fn tracked_or_insert(
        &self,
        peer: &K,
    ) -> Result<(Arc<Detector>, Option<::metrics::Counter>), ConfigError> {
        if let Some(existing) = self.detectors.get(peer) {
            return Ok((existing.detector.clone(), existing.heartbeats.clone()));
        }

        let tracked = match self.detectors.entry(peer.clone()) {
            Entry::Occupied(entry) => entry.into_ref(),
            Entry::Vacant(entry) => {
                let detector = Detector::from_resolved(self.template)?;
                tracing::info!(peer = %peer, "Tracking new peer");
                let heartbeats = self
                    .metrics_enabled
                    .then(|| metrics::heartbeat_counter(&peer.to_string()));
                entry.insert(TrackedPeer {
                    detector: Arc::new(detector),
                    heartbeats,
                })
            }
        };
        Ok((tracked.detector.clone(), tracked.heartbeats.clone()))
    }

    /// The detector of `peer`, if tracked.
    pub fn detector(&self, peer: &K) -> Option<Arc<Detector>> {
        self.detectors.get(peer).map(|entry| entry.detector.clone())
    }

    /// Suspicion level of `peer` at `now`; 0 for an unknown peer.
    pub fn failure_probability(&self, peer: &K, now: Option<i64>) -> f64 {
        self.detector(peer)
            .map_or(0.0, |detector| detector.failure_probability(now))
    }

    /// Verdict for `peer` at `now`; false for an unknown peer.
    pub fn check_failure(&self, peer: &K, now: Option<i64>) -> bool {
        self.detector(peer)
            .is_some_and(|detector| detector.check_failure(now))
    }

    /// Every tracked peer whose verdict at `now` is failed.
    ///
    /// All peers are judged against the same instant.
    pub fn suspected(&self, now: Option<i64>) -> Vec<K> {
        let now = now.unwrap_or_else(clock::now_millis);
        self.entries()
            .into_iter()
            .filter(|(_, detector)| detector.check_failure(Some(now)))
            .map(|(peer, _)| peer)
            .collect()
    }

    /// Stop tracking `peer`. Returns whether it was tracked.
    pub fn remove(&self, peer: &K) -> bool {
        match self.detectors.remove(peer) {
            Some((_, tracked)) => {
                tracing::info!(peer = %peer, snapshot = %tracked.detector.snapshot(), "Stopped tracking peer");
                true
            }
            None => false,
        }
    }

    /// All tracked peers, in no particular order.
    pub fn peers(&self) -> Vec<K> {
        self.detectors.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Owned copy of every (peer, detector) pair.
    pub fn entries(&self) -> Vec<(K, Arc<Detector>)> {
        self.detectors
            .iter()
            .map(|entry| (entry.key().clone(), entry.detector.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}
