// ── Per-platform sync policy table ──
//
// Platform quirks live here as data, not as branches scattered through
// the engine. Adding a platform means a `PlatformKind` variant plus one
// row in this table.

use std::time::Duration;

use crate::model::LiveState;
use crate::platform::PlatformKind;
use crate::retry::RetryPolicy;

/// How a successful fetch result is merged into the favorite entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Trust the returned status wholesale.
    Full,
    /// Keep the stored entry and take only the live state. Kuaishou
    /// lookups echo back rewritten identity fields that would corrupt
    /// the favorite on a full merge.
    StateOnly,
}

/// Fetch behavior for one platform during a sync cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncPolicy {
    /// State recorded when every fetch attempt fails.
    pub failure_state: LiveState,
    pub retry: RetryPolicy,
    pub merge: MergeStrategy,
}

impl SyncPolicy {
    const fn standard() -> Self {
        Self {
            failure_state: LiveState::Unknown,
            retry: RetryPolicy::none(),
            merge: MergeStrategy::Full,
        }
    }
}

impl PlatformKind {
    /// Sync policy for this platform.
    ///
    /// YY reports failures as `Offline` because its endpoint errors
    /// almost always mean the room is closed, not that the platform is
    /// unreachable. Bilibili's room endpoints fail transiently often
    /// enough to warrant a short fixed-delay retry.
    pub fn sync_policy(self) -> SyncPolicy {
        match self {
            Self::Bilibili => SyncPolicy {
                retry: RetryPolicy::fixed(3, Duration::from_millis(500)),
                ..SyncPolicy::standard()
            },
            Self::Ks => SyncPolicy {
                merge: MergeStrategy::StateOnly,
                ..SyncPolicy::standard()
            },
            Self::Yy => SyncPolicy {
                failure_state: LiveState::Offline,
                ..SyncPolicy::standard()
            },
            Self::Douyu | Self::Huya | Self::Douyin | Self::Cc | Self::Soop => {
                SyncPolicy::standard()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn yy_failures_read_as_offline() {
        assert_eq!(
            PlatformKind::Yy.sync_policy().failure_state,
            LiveState::Offline
        );
        for kind in PlatformKind::iter().filter(|k| *k != PlatformKind::Yy) {
            assert_eq!(kind.sync_policy().failure_state, LiveState::Unknown, "{kind}");
        }
    }

    #[test]
    fn only_bilibili_retries() {
        let policy = PlatformKind::Bilibili.sync_policy();
        assert_eq!(
            policy.retry,
            RetryPolicy::fixed(3, Duration::from_millis(500))
        );
        for kind in PlatformKind::iter().filter(|k| *k != PlatformKind::Bilibili) {
            assert_eq!(kind.sync_policy().retry, RetryPolicy::none(), "{kind}");
        }
    }

    #[test]
    fn only_kuaishou_merges_state_only() {
        assert_eq!(
            PlatformKind::Ks.sync_policy().merge,
            MergeStrategy::StateOnly
        );
        for kind in PlatformKind::iter().filter(|k| *k != PlatformKind::Ks) {
            assert_eq!(kind.sync_policy().merge, MergeStrategy::Full, "{kind}");
        }
    }
}
