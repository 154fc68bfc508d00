use thiserror::Error;

/// Top-level error type for the `favcast-api` crate.
///
/// Covers every failure mode a capability implementation can surface:
/// transport, upstream platform rejections, response decoding, and
/// unsupported operations. `favcast-core` degrades these into per-entry
/// results and statistics rather than letting one failure abort a sync.
#[derive(Debug, Error)]
pub enum ApiError {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Upstream platform ───────────────────────────────────────────
    /// Rate limited by the platform. Includes retry-after in seconds.
    #[error("Rate limited -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Platform answered with a non-success status.
    #[error("Upstream error (HTTP {status}): {message}")]
    Upstream { status: u16, message: String },

    /// The requested room does not exist on the platform.
    #[error("Room not found: {room_id}")]
    RoomNotFound { room_id: String },

    // ── Data ────────────────────────────────────────────────────────
    /// Response decoding failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Capability ──────────────────────────────────────────────────
    /// Operation not supported by this platform client.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}

impl ApiError {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } | Self::RateLimited { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Upstream { status: 404, .. } | Self::RoomNotFound { .. } => true,
            _ => false,
        }
    }
}
