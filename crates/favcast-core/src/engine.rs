// ── Sync engine ──
//
// One sync cycle: fetch the favorites list, fan out one fetch task per
// entry, fold completions into results, statistics, and progress, then
// sort and group. Per-entry failures degrade into results; only a
// favorites-backend failure aborts the cycle.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinSet;
// Runtime clock: elapsed measurements stay exact under paused time.
use tokio::time::Instant;
use tracing::{debug, info, warn};

use favcast_api::{
    FavoriteEntry, FavoritesProvider, LiveStatus, MergeStrategy, PlatformDirectory, PlatformKind,
    ProviderHealth, StreamInfo, with_retry,
};

use crate::dedup::dedupe;
use crate::error::CoreError;
use crate::progress::{FetchEvent, FetchOutcome, ProgressTracker, SyncProgress};
use crate::sections::{FavoriteSection, GroupStyle, group_rooms, sort_rooms};
use crate::stats::{SyncStats, format_secs};

// ── Cycle outputs ────────────────────────────────────────────────

/// Sorted results plus their grouped sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    /// Every favorite's status, live-first, deterministic order.
    pub rooms: Vec<LiveStatus>,
    /// The same rooms sliced into non-empty sections.
    pub sections: Vec<FavoriteSection>,
}

/// Observability record of the most recent completed cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub started_at: DateTime<Utc>,
    /// Working-set size after the first dedup pass.
    pub favorites_fetched: usize,
    /// Result count after the second dedup pass.
    pub synced: usize,
    /// Wall time of the fan-out phase.
    pub fetch_elapsed: Duration,
    /// Wall time of the whole cycle.
    pub total_elapsed: Duration,
    pub stats: SyncStats,
    /// Pre-fetch favorite counts per platform.
    pub favorites_by_platform: BTreeMap<PlatformKind, usize>,
}

// ── SyncEngine ───────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<EngineInner>`. Holds the favorites
/// backend and the platform client directory, and exposes exactly one
/// mutating operation: [`sync_all`](Self::sync_all). Overlapping calls
/// are rejected, never queued.
#[derive(Clone)]
pub struct SyncEngine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    provider: Arc<dyn FavoritesProvider>,
    directory: PlatformDirectory,
    /// Single-flight guard. Owned by a `SyncPermit` while a cycle runs.
    syncing: AtomicBool,
    progress: ProgressTracker,
    report: watch::Sender<Option<SyncReport>>,
}

/// RAII side of the single-flight guard: releases the flag on every
/// exit path, including panics in the cycle body.
struct SyncPermit<'a> {
    flag: &'a AtomicBool,
}

impl Drop for SyncPermit<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl EngineInner {
    fn try_acquire(&self) -> Result<SyncPermit<'_>, CoreError> {
        if self
            .syncing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Ok(SyncPermit { flag: &self.syncing })
        } else {
            Err(CoreError::SyncInProgress)
        }
    }
}

impl SyncEngine {
    /// Create an engine over a favorites backend and a client directory.
    /// Does no I/O until [`sync_all`](Self::sync_all) is called.
    pub fn new(provider: Arc<dyn FavoritesProvider>, directory: PlatformDirectory) -> Self {
        let (report, _) = watch::channel(None);
        Self {
            inner: Arc::new(EngineInner {
                provider,
                directory,
                syncing: AtomicBool::new(false),
                progress: ProgressTracker::new(),
                report,
            }),
        }
    }

    /// Run one full sync cycle and return the sorted, grouped results.
    ///
    /// Exactly one cycle runs at a time; a second caller gets
    /// [`CoreError::SyncInProgress`] immediately with no state touched.
    /// Completion order of the fetch tasks never affects the output:
    /// results land in submission-order slots and are then sorted under
    /// a total order.
    pub async fn sync_all(&self, style: GroupStyle) -> Result<SyncOutcome, CoreError> {
        let _permit = self.inner.try_acquire()?;
        let overall_start = Instant::now();
        let started_at = Utc::now();

        // The favorites backend is authoritative: no favorites, no cycle.
        let provider_start = Instant::now();
        let favorites = self
            .inner
            .provider
            .fetch_favorites()
            .await
            .map_err(|source| CoreError::FavoritesSource { source })?;
        let working_set = dedupe(favorites);
        info!(
            count = working_set.len(),
            elapsed_secs = %format_secs(provider_start.elapsed()),
            "favorites fetched"
        );

        let mut favorites_by_platform: BTreeMap<PlatformKind, usize> = BTreeMap::new();
        for entry in &working_set {
            *favorites_by_platform.entry(entry.platform).or_insert(0) += 1;
        }

        self.inner.progress.begin(working_set.len());
        let mut stats = SyncStats::new();
        let fetch_start = Instant::now();

        let mut tasks: JoinSet<(usize, LiveStatus, FetchOutcome, Duration)> = JoinSet::new();
        for (index, entry) in working_set.iter().cloned().enumerate() {
            let directory = self.inner.directory.clone();
            tasks.spawn(async move {
                let task_start = Instant::now();
                let (status, outcome) = fetch_one(&directory, &entry).await;
                (index, status, outcome, task_start.elapsed())
            });
        }

        // Consume completions in arrival order; this loop is the only
        // writer of stats, progress, and the slot array.
        let mut slots: Vec<Option<LiveStatus>> = vec![None; working_set.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, status, outcome, elapsed)) => {
                    debug!(
                        platform = %status.entry.platform.display_name(),
                        name = %status.entry.display_name,
                        outcome = outcome.label(),
                        elapsed_secs = %format_secs(elapsed),
                        "favorite fetch finished"
                    );
                    self.inner.progress.record(FetchEvent {
                        display_name: status.entry.display_name.clone(),
                        platform: status.entry.platform,
                        outcome,
                    });
                    stats.record(status.entry.platform, elapsed, outcome);
                    if let Some(slot) = slots.get_mut(index) {
                        *slot = Some(status);
                    }
                }
                Err(join_error) => {
                    warn!(error = %join_error, "fetch task vanished before reporting");
                }
            }
        }

        // A slot can only still be empty if its task died before
        // reporting. Synthesize the degraded result so no favorite is
        // silently dropped from the cycle.
        let mut results = Vec::with_capacity(slots.len());
        for (slot, entry) in slots.into_iter().zip(&working_set) {
            match slot {
                Some(status) => results.push(status),
                None => {
                    warn!(
                        platform = %entry.platform.display_name(),
                        name = %entry.display_name,
                        "no result reported, recording degraded status"
                    );
                    let failure_state = entry.platform.sync_policy().failure_state;
                    self.inner.progress.record(FetchEvent {
                        display_name: entry.display_name.clone(),
                        platform: entry.platform,
                        outcome: FetchOutcome::Failure,
                    });
                    stats.record(entry.platform, Duration::ZERO, FetchOutcome::Failure);
                    results.push(LiveStatus::degraded(entry.clone(), failure_state));
                }
            }
        }

        // Second pass: clients may rewrite identifier fields, so two
        // distinct working-set entries can resolve to one identity.
        let results = dedupe(results);
        let fetch_elapsed = fetch_start.elapsed();
        info!(
            synced = results.len(),
            elapsed_secs = %format_secs(fetch_elapsed),
            "live status sync finished"
        );
        stats.log_summary(&favorites_by_platform);

        let total_elapsed = overall_start.elapsed();
        info!(total_secs = %format_secs(total_elapsed), "favorite sync cycle complete");

        let report = SyncReport {
            started_at,
            favorites_fetched: working_set.len(),
            synced: results.len(),
            fetch_elapsed,
            total_elapsed,
            stats,
            favorites_by_platform,
        };
        self.inner.report.send_modify(|current| *current = Some(report));

        let rooms = sort_rooms(results);
        let sections = group_rooms(&rooms, style);
        Ok(SyncOutcome { rooms, sections })
    }

    // ── Read-only accessors ──────────────────────────────────────

    /// Progress snapshot of the running (or last) cycle.
    pub fn progress(&self) -> SyncProgress {
        self.inner.progress.current()
    }

    /// Subscribe to progress snapshots via a `watch::Receiver`.
    pub fn subscribe_progress(&self) -> watch::Receiver<SyncProgress> {
        self.inner.progress.subscribe()
    }

    /// Whether a cycle currently holds the engine.
    pub fn is_syncing(&self) -> bool {
        self.inner.syncing.load(Ordering::Acquire)
    }

    /// Report of the most recent completed cycle, if any.
    pub fn last_report(&self) -> Option<SyncReport> {
        self.inner.report.borrow().clone()
    }

    pub fn subscribe_reports(&self) -> watch::Receiver<Option<SyncReport>> {
        self.inner.report.subscribe()
    }

    /// Reachability of the favorites backend.
    pub async fn provider_health(&self) -> ProviderHealth {
        self.inner.provider.health().await
    }

    /// The client directory this engine fans out over.
    pub fn directory(&self) -> &PlatformDirectory {
        &self.inner.directory
    }
}

// ── Per-entry fetch ──────────────────────────────────────────────

/// Resolve one favorite's status, absorbing every failure into the
/// platform's configured degraded state. Never returns an error: the
/// caller always gets one status per entry.
async fn fetch_one(
    directory: &PlatformDirectory,
    entry: &FavoriteEntry,
) -> (LiveStatus, FetchOutcome) {
    let policy = entry.platform.sync_policy();

    let Some(client) = directory.get(entry.platform) else {
        debug!(
            platform = %entry.platform.display_name(),
            "no client registered for platform"
        );
        return (
            LiveStatus::degraded(entry.clone(), policy.failure_state),
            FetchOutcome::Failure,
        );
    };

    match with_retry(policy.retry, |_| client.fetch_status(entry)).await {
        Ok(fetched) => {
            let status = match policy.merge {
                MergeStrategy::Full => fetched,
                // Keep the stored entry; take only the state.
                MergeStrategy::StateOnly => {
                    LiveStatus::new(entry.clone(), fetched.state, StreamInfo::default())
                }
            };
            (status, FetchOutcome::Success)
        }
        Err(error) => {
            debug!(
                platform = %entry.platform.display_name(),
                name = %entry.display_name,
                error = %error,
                "favorite fetch failed"
            );
            (
                LiveStatus::degraded(entry.clone(), policy.failure_state),
                FetchOutcome::Failure,
            )
        }
    }
}
