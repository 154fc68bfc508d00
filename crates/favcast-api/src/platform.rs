// ── Platform identity and capability matrix ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Closed set of supported streaming platforms.
///
/// Variant order is the canonical reporting order -- summaries, section
/// lists, and any per-platform iteration present platforms in this order
/// regardless of how results arrived.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlatformKind {
    Bilibili,
    Douyu,
    Huya,
    Douyin,
    Cc,
    Ks,
    Yy,
    Soop,
}

impl PlatformKind {
    /// Human-readable platform name for section titles and summaries.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Bilibili => "Bilibili",
            Self::Douyu => "Douyu",
            Self::Huya => "Huya",
            Self::Douyin => "Douyin",
            Self::Cc => "NetEase CC",
            Self::Ks => "Kuaishou",
            Self::Yy => "YY",
            Self::Soop => "Soop",
        }
    }

    /// Stable token embedded in favorite identity keys.
    ///
    /// Identity keys are compared across sync cycles, so this token must
    /// never change even if `Display` formatting does.
    pub fn key_token(self) -> &'static str {
        match self {
            Self::Bilibili => "bilibili",
            Self::Douyu => "douyu",
            Self::Huya => "huya",
            Self::Douyin => "douyin",
            Self::Cc => "cc",
            Self::Ks => "ks",
            Self::Yy => "yy",
            Self::Soop => "soop",
        }
    }

    /// Classify a share link or share message by its platform.
    ///
    /// Share text is messy -- often a whole message with the URL embedded in
    /// the middle -- so this is substring matching over the lowercased input,
    /// not URL parsing. Returns `None` when no known marker is present.
    pub fn from_share_url(text: &str) -> Option<Self> {
        let text = text.to_lowercase();
        if text.contains("b23.tv") || text.contains("bilibili") {
            return Some(Self::Bilibili);
        }
        if text.contains("douyin") {
            return Some(Self::Douyin);
        }
        if text.contains("huya") || text.contains("hy.fan") {
            return Some(Self::Huya);
        }
        if text.contains("douyu") {
            return Some(Self::Douyu);
        }
        if text.contains("cc.163.com") {
            return Some(Self::Cc);
        }
        if text.contains("kuaishou.com") {
            return Some(Self::Ks);
        }
        if text.contains("yy.com") {
            return Some(Self::Yy);
        }
        if text.contains("sooplive") || text.contains("afreecatv") {
            return Some(Self::Soop);
        }
        None
    }

    /// Feature availability for this platform.
    pub fn features(self) -> &'static [(PlatformFeature, FeatureStatus)] {
        match self {
            Self::Bilibili | Self::Douyu | Self::Huya => FULL_SUPPORT,
            Self::Douyin => COOKIE_GATED,
            Self::Cc | Self::Ks | Self::Yy => NO_DANMAKU,
            Self::Soop => SOOP_SUPPORT,
        }
    }

    /// Whether a feature is usable at all (fully or partially).
    pub fn supports(self, feature: PlatformFeature) -> bool {
        self.features()
            .iter()
            .any(|(f, status)| *f == feature && !matches!(status, FeatureStatus::Unavailable))
    }
}

/// Functional areas a platform client may implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlatformFeature {
    Categories,
    Rooms,
    Playback,
    Search,
    RoomDetail,
    LiveState,
    ShareResolve,
    Danmaku,
}

/// Availability of a single feature on a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureStatus {
    Available,
    /// Works with caveats, described by the attached note.
    Partial(&'static str),
    Unavailable,
}

const FULL_SUPPORT: &[(PlatformFeature, FeatureStatus)] = &[
    (PlatformFeature::Categories, FeatureStatus::Available),
    (PlatformFeature::Rooms, FeatureStatus::Available),
    (PlatformFeature::Playback, FeatureStatus::Available),
    (PlatformFeature::Search, FeatureStatus::Available),
    (PlatformFeature::RoomDetail, FeatureStatus::Available),
    (PlatformFeature::LiveState, FeatureStatus::Available),
    (PlatformFeature::ShareResolve, FeatureStatus::Available),
    (PlatformFeature::Danmaku, FeatureStatus::Available),
];

// Douyin endpoints reject anonymous requests, so everything past the
// category listing degrades without a cookie.
const COOKIE_GATED: &[(PlatformFeature, FeatureStatus)] = &[
    (PlatformFeature::Categories, FeatureStatus::Available),
    (PlatformFeature::Rooms, FeatureStatus::Partial("requires cookie")),
    (PlatformFeature::Playback, FeatureStatus::Partial("requires cookie")),
    (PlatformFeature::Search, FeatureStatus::Partial("requires cookie")),
    (PlatformFeature::RoomDetail, FeatureStatus::Partial("requires cookie")),
    (PlatformFeature::LiveState, FeatureStatus::Partial("requires cookie")),
    (
        PlatformFeature::ShareResolve,
        FeatureStatus::Partial("requires cookie"),
    ),
    (PlatformFeature::Danmaku, FeatureStatus::Partial("requires cookie")),
];

const NO_DANMAKU: &[(PlatformFeature, FeatureStatus)] = &[
    (PlatformFeature::Categories, FeatureStatus::Available),
    (PlatformFeature::Rooms, FeatureStatus::Available),
    (PlatformFeature::Playback, FeatureStatus::Available),
    (PlatformFeature::Search, FeatureStatus::Available),
    (PlatformFeature::RoomDetail, FeatureStatus::Available),
    (PlatformFeature::LiveState, FeatureStatus::Available),
    (PlatformFeature::ShareResolve, FeatureStatus::Available),
    (PlatformFeature::Danmaku, FeatureStatus::Unavailable),
];

const SOOP_SUPPORT: &[(PlatformFeature, FeatureStatus)] = &[
    (PlatformFeature::Categories, FeatureStatus::Available),
    (PlatformFeature::Rooms, FeatureStatus::Available),
    (
        PlatformFeature::Playback,
        FeatureStatus::Partial("19+ streams require sign-in"),
    ),
    (PlatformFeature::Search, FeatureStatus::Available),
    (PlatformFeature::RoomDetail, FeatureStatus::Available),
    (PlatformFeature::LiveState, FeatureStatus::Available),
    (PlatformFeature::ShareResolve, FeatureStatus::Available),
    (PlatformFeature::Danmaku, FeatureStatus::Available),
];
