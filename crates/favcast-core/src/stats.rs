// ── Per-platform sync statistics ──

use std::collections::{BTreeMap, btree_map};
use std::time::Duration;

use favcast_api::PlatformKind;
use serde::Serialize;
use tracing::info;

use crate::progress::FetchOutcome;

/// Accumulated fetch statistics for one platform within a cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlatformStat {
    /// Fetches recorded (success + failure).
    pub count: u32,
    /// Wall time summed across this platform's fetches. Tasks run
    /// concurrently, so this exceeds elapsed cycle time by design of
    /// the measurement, not by accident.
    pub total_time: Duration,
    pub success: u32,
    pub failure: u32,
}

impl PlatformStat {
    /// Mean fetch time. Zero when nothing was recorded.
    pub fn average_time(&self) -> Duration {
        if self.count == 0 {
            Duration::ZERO
        } else {
            self.total_time / self.count
        }
    }
}

/// Per-platform statistics for one sync cycle.
///
/// Backed by a `BTreeMap` so iteration always follows the canonical
/// platform order, regardless of completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    platforms: BTreeMap<PlatformKind, PlatformStat>,
}

impl SyncStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one fetch completion into the platform's bucket.
    pub(crate) fn record(&mut self, platform: PlatformKind, elapsed: Duration, outcome: FetchOutcome) {
        let stat = self.platforms.entry(platform).or_default();
        stat.count += 1;
        stat.total_time += elapsed;
        match outcome {
            FetchOutcome::Success => stat.success += 1,
            FetchOutcome::Failure => stat.failure += 1,
        }
    }

    pub fn get(&self, platform: PlatformKind) -> Option<PlatformStat> {
        self.platforms.get(&platform).copied()
    }

    /// Platforms with recorded fetches, in canonical order.
    pub fn iter(&self) -> btree_map::Iter<'_, PlatformKind, PlatformStat> {
        self.platforms.iter()
    }

    /// Total fetches recorded across all platforms.
    pub fn total_count(&self) -> u32 {
        self.platforms.values().map(|stat| stat.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Emit one summary line per platform.
    ///
    /// `favorites_by_platform` holds pre-fetch counts from the working
    /// set; a platform missing from it falls back to its synced count.
    pub(crate) fn log_summary(&self, favorites_by_platform: &BTreeMap<PlatformKind, usize>) {
        for (kind, stat) in self.iter() {
            let favorites = favorites_by_platform
                .get(kind)
                .copied()
                .unwrap_or(stat.count as usize);
            info!(
                platform = %kind.display_name(),
                favorites,
                synced = stat.count,
                total_secs = %format_secs(stat.total_time),
                avg_secs = %format_secs(stat.average_time()),
                success = stat.success,
                fail = stat.failure,
                "platform sync summary"
            );
        }
    }
}

impl<'a> IntoIterator for &'a SyncStats {
    type Item = (&'a PlatformKind, &'a PlatformStat);
    type IntoIter = btree_map::Iter<'a, PlatformKind, PlatformStat>;

    fn into_iter(self) -> Self::IntoIter {
        self.platforms.iter()
    }
}

/// Two-decimal seconds, the formatting used by every timing log line.
pub(crate) fn format_secs(duration: Duration) -> String {
    format!("{:.2}", duration.as_secs_f64())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn record_accumulates_per_platform() {
        let mut stats = SyncStats::new();
        stats.record(
            PlatformKind::Bilibili,
            Duration::from_secs(1),
            FetchOutcome::Success,
        );
        stats.record(
            PlatformKind::Bilibili,
            Duration::from_secs(2),
            FetchOutcome::Success,
        );
        stats.record(
            PlatformKind::Bilibili,
            Duration::from_millis(500),
            FetchOutcome::Failure,
        );
        stats.record(
            PlatformKind::Bilibili,
            Duration::from_millis(500),
            FetchOutcome::Failure,
        );
        stats.record(
            PlatformKind::Bilibili,
            Duration::from_millis(500),
            FetchOutcome::Failure,
        );

        let stat = stats.get(PlatformKind::Bilibili).unwrap();
        assert_eq!(stat.count, 5);
        assert_eq!(stat.success, 2);
        assert_eq!(stat.failure, 3);
        assert_eq!(stat.total_time, Duration::from_millis(4500));
        assert_eq!(stat.average_time(), Duration::from_millis(900));
    }

    #[test]
    fn empty_platform_average_is_zero() {
        let stat = PlatformStat::default();
        assert_eq!(stat.average_time(), Duration::ZERO);
    }

    #[test]
    fn iteration_follows_canonical_order() {
        let mut stats = SyncStats::new();
        stats.record(PlatformKind::Soop, Duration::ZERO, FetchOutcome::Success);
        stats.record(PlatformKind::Bilibili, Duration::ZERO, FetchOutcome::Success);
        stats.record(PlatformKind::Ks, Duration::ZERO, FetchOutcome::Failure);

        let order: Vec<PlatformKind> = stats.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(
            order,
            vec![PlatformKind::Bilibili, PlatformKind::Ks, PlatformKind::Soop]
        );
        assert_eq!(stats.total_count(), 3);
    }

    #[test]
    fn seconds_format_to_two_decimals() {
        assert_eq!(format_secs(Duration::from_millis(1234)), "1.23");
        assert_eq!(format_secs(Duration::ZERO), "0.00");
    }
}
