//! Platform model, capability traits, and sync policies for favcast.
//!
//! This crate is the boundary between the sync engine (`favcast-core`)
//! and everything that talks to the outside world:
//!
//! - **[`PlatformKind`]** -- the closed set of supported platforms, with
//!   share-link classification and a per-platform feature matrix.
//! - **[`PlatformClient`] / [`FavoritesProvider`]** -- capability traits
//!   implemented by wire-protocol clients and the favorites backend.
//! - **[`SyncPolicy`]** -- the per-platform table of failure states,
//!   retry schedules, and merge strategies the engine consults.
//! - **[`TransportConfig`]** -- shared `reqwest` client construction for
//!   client implementations.

pub mod capability;
pub mod error;
pub mod model;
pub mod platform;
pub mod policy;
pub mod retry;
pub mod transport;

// ── Primary re-exports ──────────────────────────────────────────────
pub use capability::{FavoritesProvider, PlatformClient, PlatformDirectory};
pub use error::ApiError;
pub use model::{FavoriteEntry, LiveState, LiveStatus, ProviderHealth, StreamInfo};
pub use platform::{FeatureStatus, PlatformFeature, PlatformKind};
pub use policy::{MergeStrategy, SyncPolicy};
pub use retry::{RetryPolicy, with_retry};
pub use transport::TransportConfig;
