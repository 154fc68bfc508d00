// ── Sync progress reporting ──
//
// Push-based progress for UI consumers via a `watch` channel. The
// channel carries whole snapshots, so a subscriber that samples rarely
// still sees a coherent state rather than a partial event stream.

use favcast_api::PlatformKind;
use serde::Serialize;
use tokio::sync::watch;

/// Outcome of a single favorite's fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchOutcome {
    Success,
    Failure,
}

impl FetchOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Short label for log lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "ok",
            Self::Failure => "failed",
        }
    }
}

/// The most recently completed fetch within a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchEvent {
    pub display_name: String,
    pub platform: PlatformKind,
    pub outcome: FetchOutcome,
}

/// Snapshot of a sync cycle's progress.
///
/// `completed` counts consumed results, so it is monotone within a
/// cycle even though fetches finish in arbitrary order. `last` is
/// last-writer-wins: it names whichever fetch the engine consumed most
/// recently, and is `None` before the first completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncProgress {
    pub completed: usize,
    pub total: usize,
    pub last: Option<FetchEvent>,
}

/// Owner side of the progress channel. Held by the engine; consumers
/// only ever see [`SyncProgress`] values.
pub(crate) struct ProgressTracker {
    sender: watch::Sender<SyncProgress>,
}

impl ProgressTracker {
    pub(crate) fn new() -> Self {
        let (sender, _) = watch::channel(SyncProgress::default());
        Self { sender }
    }

    /// Reset the snapshot for a new cycle of `total` entries.
    pub(crate) fn begin(&self, total: usize) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.sender.send_modify(|progress| {
            *progress = SyncProgress {
                completed: 0,
                total,
                last: None,
            };
        });
    }

    /// Record one consumed completion.
    pub(crate) fn record(&self, event: FetchEvent) {
        self.sender.send_modify(|progress| {
            progress.completed += 1;
            progress.last = Some(event);
        });
    }

    /// Current snapshot (cheap clone).
    pub(crate) fn current(&self) -> SyncProgress {
        self.sender.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<SyncProgress> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn event(name: &str, outcome: FetchOutcome) -> FetchEvent {
        FetchEvent {
            display_name: name.to_owned(),
            platform: PlatformKind::Bilibili,
            outcome,
        }
    }

    #[test]
    fn idle_snapshot_is_empty() {
        let tracker = ProgressTracker::new();
        assert_eq!(tracker.current(), SyncProgress::default());
        assert!(tracker.current().last.is_none());
    }

    #[test]
    fn record_bumps_completed_and_overwrites_last() {
        let tracker = ProgressTracker::new();
        tracker.begin(3);
        tracker.record(event("a", FetchOutcome::Success));
        tracker.record(event("b", FetchOutcome::Failure));

        let progress = tracker.current();
        assert_eq!(progress.completed, 2);
        assert_eq!(progress.total, 3);
        let last = progress.last.unwrap();
        assert_eq!(last.display_name, "b");
        assert!(!last.outcome.is_success());
    }

    #[test]
    fn begin_resets_previous_cycle() {
        let tracker = ProgressTracker::new();
        tracker.begin(2);
        tracker.record(event("a", FetchOutcome::Success));
        tracker.begin(5);

        let progress = tracker.current();
        assert_eq!(progress.completed, 0);
        assert_eq!(progress.total, 5);
        assert!(progress.last.is_none());
    }

    #[tokio::test]
    async fn subscribers_observe_updates() {
        let tracker = ProgressTracker::new();
        let mut rx = tracker.subscribe();

        tracker.begin(1);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().total, 1);

        tracker.record(event("a", FetchOutcome::Success));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().completed, 1);
    }
}
