//! Periodic suspicion sweeps.
//!
//! # Responsibilities
//! - Evaluate every tracked peer at a single instant
//! - Publish the probability of each peer as a gauge
//! - Report verdict changes (Suspected / Recovered)
//!
//! # Design Decisions
//! - A peer seen for the first time only reports if it is already suspected
//! - Verdicts of peers no longer tracked are forgotten on the next sweep
//! - Sweeps never remove peers

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{broadcast, mpsc};
use tokio::time;

use crate::config::MonitorConfig;
use crate::detector::clock;
use crate::monitor::registry::PeerMonitor;
use crate::observability::metrics;

/// A change in a peer's verdict.
#[derive(Debug, Clone, PartialEq)]
pub enum SuspicionEvent<K> {
    /// The peer's probability reached its detector's threshold.
    Suspected { peer: K, probability: f64 },
    /// A suspected peer dropped back below the threshold.
    Recovered { peer: K },
}

/// Evaluates a `PeerMonitor` on demand or on a timer.
pub struct SuspicionSweeper<K>
where
    K: Eq + Hash,
{
    monitor: Arc<PeerMonitor<K>>,
    config: MonitorConfig,
    verdicts: Mutex<HashMap<K, bool>>,
}

impl<K> SuspicionSweeper<K>
where
    K: Eq + Hash + Clone + Display,
{
    pub fn new(monitor: Arc<PeerMonitor<K>>, config: MonitorConfig) -> Self {
        Self {
            monitor,
            config,
            verdicts: Mutex::new(HashMap::new()),
        }
    }

    /// Evaluate every tracked peer at `now` and return the verdict changes.
    pub fn sweep(&self, now: Option<i64>) -> Vec<SuspicionEvent<K>> {
        let now = now.unwrap_or_else(clock::now_millis);
        let entries = self.monitor.entries();
        let mut verdicts = self.verdicts.lock();
        let mut events = Vec::new();

        {
            let tracked: HashSet<&K> = entries.iter().map(|(peer, _)| peer).collect();
            verdicts.retain(|peer, _| tracked.contains(peer));
        }

        for (peer, detector) in entries {
            let probability = detector.failure_probability(Some(now));
            let suspected = probability >= detector.threshold();

            if self.monitor.metrics_enabled() {
                let label = peer.to_string();
                metrics::record_failure_probability(&label, probability);
                metrics::record_suspected(&label, suspected);
            }

            let previous = verdicts.insert(peer.clone(), suspected).unwrap_or(false);
            match (previous, suspected) {
                (false, true) => {
                    tracing::warn!(peer = %peer, probability, "Peer suspected");
                    if self.monitor.metrics_enabled() {
                        metrics::record_transition(&peer.to_string(), "suspected");
                    }
                    events.push(SuspicionEvent::Suspected { peer, probability });
                }
                (true, false) => {
                    tracing::info!(peer = %peer, probability, "Peer recovered");
                    if self.monitor.metrics_enabled() {
                        metrics::record_transition(&peer.to_string(), "recovered");
                    }
                    events.push(SuspicionEvent::Recovered { peer });
                }
                _ => {}
            }
        }

        events
    }

    /// Sweep every `sweep_interval_ms` until `shutdown` fires, forwarding events.
    pub async fn run(
        self,
        events: mpsc::UnboundedSender<SuspicionEvent<K>>,
        mut shutdown: broadcast::Receiver<()>,
    ) where
        K: Send + Sync + 'static,
    {
        let interval = Duration::from_millis(self.config.sweep_interval_ms.max(1));
        tracing::info!(
            interval_ms = interval.as_millis() as u64,
            peers = self.monitor.len(),
            "Suspicion sweeper starting"
        );

        let mut ticker = time::interval(interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    for event in self.sweep(None) {
                        if events.send(event).is_err() {
                            tracing::debug!("Suspicion event receiver dropped");
                        }
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Suspicion sweeper received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DetectorConfig;

    fn sweeper() -> (Arc<PeerMonitor<&'static str>>, SuspicionSweeper<&'static str>) {
        let monitor = Arc::new(
            PeerMonitor::new(DetectorConfig::default())
                .unwrap()
                .with_metrics(false),
        );
        let sweeper = SuspicionSweeper::new(monitor.clone(), MonitorConfig::default());
        (monitor, sweeper)
    }

    #[test]
    fn test_transitions_are_reported_once() {
        let (monitor, sweeper) = sweeper();
        for t in [0, 100, 200, 300] {
            monitor.heartbeat(&"a", Some(t)).unwrap();
        }

        assert!(sweeper.sweep(Some(300)).is_empty());

        let events = sweeper.sweep(Some(1000));
        assert_eq!(
            events,
            vec![SuspicionEvent::Suspected {
                peer: "a",
                probability: 1.0
            }]
        );
        // Still suspected, nothing new to report.
        assert!(sweeper.sweep(Some(1100)).is_empty());

        monitor.heartbeat(&"a", Some(1200)).unwrap();
        assert_eq!(
            sweeper.sweep(Some(1200)),
            vec![SuspicionEvent::Recovered { peer: "a" }]
        );
    }

    #[test]
    fn test_new_peer_silent_unless_suspected() {
        let (monitor, sweeper) = sweeper();
        monitor.heartbeat(&"fresh", Some(0)).unwrap();
        // One heartbeat, no samples: never suspected.
        assert!(sweeper.sweep(Some(1_000_000)).is_empty());
    }

    #[test]
    fn test_removed_peer_is_forgotten() {
        let (monitor, sweeper) = sweeper();
        for t in [0, 10, 20] {
            monitor.heartbeat(&"gone", Some(t)).unwrap();
        }
        assert_eq!(sweeper.sweep(Some(500)).len(), 1);

        monitor.remove(&"gone");
        assert!(sweeper.sweep(Some(600)).is_empty());

        // Re-tracked from scratch: the old verdict does not carry over.
        for t in [700, 710, 720] {
            monitor.heartbeat(&"gone", Some(t)).unwrap();
        }
        assert_eq!(sweeper.sweep(Some(1500)).len(), 1);
    }

    #[test]
    fn test_only_removed_peers_lose_their_verdict() {
        let monitor = Arc::new(
            PeerMonitor::new(DetectorConfig::default())
                .unwrap()
                .with_metrics(false),
        );
        let sweeper = SuspicionSweeper::new(monitor.clone(), MonitorConfig::default());
        for peer in 0..500_u32 {
            for t in [0, 10, 20] {
                monitor.heartbeat(&peer, Some(t)).unwrap();
            }
        }
        assert_eq!(sweeper.sweep(Some(500)).len(), 500);

        for peer in (0..500_u32).filter(|peer| peer % 2 == 0) {
            monitor.remove(&peer);
        }
        assert!(sweeper.sweep(Some(600)).is_empty());
        assert_eq!(sweeper.verdicts.lock().len(), 250);
        assert!(sweeper.verdicts.lock().keys().all(|peer| peer % 2 == 1));
    }
}
