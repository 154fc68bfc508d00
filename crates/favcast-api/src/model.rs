// ── Favorite and live-status domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::platform::PlatformKind;

/// Broadcast state of a room, normalized from every platform's vocabulary.
///
/// `Replay` covers the looped-VOD carousel some platforms run while the
/// streamer is away. `Offline` is the explicit stream-ended state and is
/// never conflated with `Unknown`, which means the state could not be
/// determined at all.
///
/// Variant order matches [`rank`](Self::rank) order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LiveState {
    Live,
    Replay,
    Offline,
    Unknown,
}

impl LiveState {
    /// Sort priority: live rooms first, unknown last.
    pub fn rank(self) -> u8 {
        match self {
            Self::Live => 0,
            Self::Replay => 1,
            Self::Offline => 2,
            Self::Unknown => 3,
        }
    }

    pub fn is_live(self) -> bool {
        matches!(self, Self::Live)
    }

    /// Capitalized label for section titles.
    pub fn label(self) -> &'static str {
        match self {
            Self::Live => "Live",
            Self::Replay => "Replay",
            Self::Offline => "Offline",
            Self::Unknown => "Unknown",
        }
    }
}

/// A favorited broadcaster account as stored by the favorites backend.
///
/// Identifier fields come from whatever the backend captured at
/// favorite time; any of them may be blank. Identity-key derivation in
/// the sync engine tolerates every combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub platform: PlatformKind,
    pub room_id: String,
    pub user_id: String,
    pub display_name: String,
}

impl FavoriteEntry {
    pub fn new(
        platform: PlatformKind,
        room_id: impl Into<String>,
        user_id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            room_id: room_id.into(),
            user_id: user_id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Optional per-fetch metadata a platform client may return alongside
/// the live state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamInfo {
    pub title: Option<String>,
    pub cover_url: Option<String>,
    pub viewer_count: Option<u64>,
}

/// One favorite's resolved status after a fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveStatus {
    pub entry: FavoriteEntry,
    pub state: LiveState,
    pub info: StreamInfo,
}

impl LiveStatus {
    pub fn new(entry: FavoriteEntry, state: LiveState, info: StreamInfo) -> Self {
        Self { entry, state, info }
    }

    /// Status for an entry whose fetch failed: the platform's configured
    /// failure state and no metadata.
    pub fn degraded(entry: FavoriteEntry, state: LiveState) -> Self {
        Self {
            entry,
            state,
            info: StreamInfo::default(),
        }
    }

    pub fn is_live(&self) -> bool {
        self.state.is_live()
    }
}

/// Reachability report from the favorites backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderHealth {
    pub available: bool,
    pub detail: String,
}

impl ProviderHealth {
    pub fn available(detail: impl Into<String>) -> Self {
        Self {
            available: true,
            detail: detail.into(),
        }
    }

    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self {
            available: false,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn live_state_rank_orders_live_first() {
        assert!(LiveState::Live.rank() < LiveState::Replay.rank());
        assert!(LiveState::Replay.rank() < LiveState::Offline.rank());
        assert!(LiveState::Offline.rank() < LiveState::Unknown.rank());
    }

    #[test]
    fn live_state_tokens() {
        assert_eq!(LiveState::Live.to_string(), "live");
        assert_eq!(LiveState::Unknown.label(), "Unknown");
        let json = serde_json::to_string(&LiveState::Offline).unwrap();
        assert_eq!(json, "\"offline\"");
    }

    #[test]
    fn degraded_status_has_no_metadata() {
        let entry = FavoriteEntry::new(PlatformKind::Yy, "22490906", "", "someone");
        let status = LiveStatus::degraded(entry.clone(), LiveState::Offline);
        assert_eq!(status.entry, entry);
        assert_eq!(status.state, LiveState::Offline);
        assert_eq!(status.info, StreamInfo::default());
        assert!(!status.is_live());
    }
}
