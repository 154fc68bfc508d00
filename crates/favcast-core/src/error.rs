// ── Core error types ──
//
// Operation-level errors from favcast-core. Per-entry fetch failures
// never surface here -- the engine degrades those into results and
// statistics. What remains is the handful of failures that abort an
// operation outright.

use favcast_api::{ApiError, PlatformKind};
use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Sync lifecycle ───────────────────────────────────────────────
    /// A sync cycle is already running; the call was rejected, not queued.
    #[error("Sync already in progress")]
    SyncInProgress,

    /// The favorites backend failed. The backend is authoritative, so
    /// the whole cycle aborts rather than syncing against stale data.
    #[error("Favorites backend error: {source}")]
    FavoritesSource {
        #[source]
        source: ApiError,
    },

    // ── Share codes ──────────────────────────────────────────────────
    /// No known platform marker found in the share text.
    #[error("Could not recognize a platform in the share text")]
    UnrecognizedShareCode,

    /// The share text named a platform with no registered client.
    #[error("No client registered for platform: {platform}")]
    UnsupportedPlatform { platform: PlatformKind },

    /// The platform client failed while resolving a share code.
    #[error("Share code lookup failed: {source}")]
    ShareLookup {
        #[source]
        source: ApiError,
    },
}

impl CoreError {
    /// Returns `true` if the operation was rejected because another
    /// sync cycle holds the engine.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::SyncInProgress)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn busy_classification() {
        assert!(CoreError::SyncInProgress.is_busy());
        assert!(!CoreError::UnrecognizedShareCode.is_busy());
    }

    #[test]
    fn favorites_source_preserves_cause() {
        let err = CoreError::FavoritesSource {
            source: ApiError::Timeout { timeout_secs: 15 },
        };
        let rendered = err.to_string();
        assert!(rendered.contains("Favorites backend error"), "{rendered}");
        assert!(std::error::Error::source(&err).is_some());
    }
}
