// ── Result ordering and section grouping ──

use favcast_api::{LiveState, LiveStatus, PlatformKind};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::dedup::Identity;

/// How the grouped section list is organized. Persisted as a user
/// setting and passed into each sync call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStyle {
    /// One section per live state: Live, Replay, Offline, Unknown.
    #[default]
    LiveState,
    /// One section per platform, in canonical platform order.
    Platform,
}

/// A titled slice of the sorted result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteSection {
    pub title: String,
    /// Set when grouping by platform.
    pub platform: Option<PlatformKind>,
    pub rooms: Vec<LiveStatus>,
}

/// Sort results live-first under a deterministic total order.
///
/// Key: state rank, then case-insensitive display name, then identity
/// key. The identity tier makes the order total, so identical inputs
/// produce byte-identical output no matter how fetches interleaved.
pub fn sort_rooms(mut rooms: Vec<LiveStatus>) -> Vec<LiveStatus> {
    rooms.sort_by_cached_key(|room| {
        (
            room.state.rank(),
            room.entry.display_name.to_lowercase(),
            room.identity_key(),
        )
    });
    rooms
}

/// Slice a sorted result list into non-empty sections.
///
/// Every room lands in exactly one section; sections with no rooms are
/// omitted. Relative room order inside a section follows the input.
pub fn group_rooms(rooms: &[LiveStatus], style: GroupStyle) -> Vec<FavoriteSection> {
    match style {
        GroupStyle::LiveState => LiveState::iter()
            .map(|state| FavoriteSection {
                title: state.label().to_owned(),
                platform: None,
                rooms: rooms
                    .iter()
                    .filter(|room| room.state == state)
                    .cloned()
                    .collect(),
            })
            .filter(|section| !section.rooms.is_empty())
            .collect(),
        GroupStyle::Platform => PlatformKind::iter()
            .map(|kind| FavoriteSection {
                title: kind.display_name().to_owned(),
                platform: Some(kind),
                rooms: rooms
                    .iter()
                    .filter(|room| room.entry.platform == kind)
                    .cloned()
                    .collect(),
            })
            .filter(|section| !section.rooms.is_empty())
            .collect(),
    }
}
