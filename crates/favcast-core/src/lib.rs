//! Sync engine and business logic for live-stream favorites.
//!
//! This crate owns everything between the capability traits of
//! `favcast-api` and a UI consumer:
//!
//! - **[`SyncEngine`]** -- the single mutating operation,
//!   [`sync_all()`](SyncEngine::sync_all): fetches the favorites list,
//!   fans out one fetch task per entry, degrades per-entry failures by
//!   platform policy, and returns sorted, grouped results. Overlapping
//!   calls are rejected, never queued.
//!
//! - **[`SyncProgress`]** -- last-writer-wins progress snapshots
//!   published on a `tokio::sync::watch` channel while a cycle runs.
//!
//! - **[`SyncStats`]** -- per-platform count / time / success / failure
//!   accounting for each cycle, iterated in canonical platform order.
//!
//! - **Deduplication** ([`dedup`]) -- stable first-seen-wins filtering
//!   over three-tier identity keys, applied before and after fetching.
//!
//! - **Sections** ([`sections`]) -- deterministic live-first ordering
//!   and grouping by live state or platform.
//!
//! - **Search** ([`search`]) -- parallel cross-platform keyword search
//!   and share-link resolution with per-platform failure isolation.

pub mod dedup;
pub mod engine;
pub mod error;
pub mod progress;
pub mod search;
pub mod sections;
pub mod stats;

// ── Primary re-exports ──────────────────────────────────────────────
pub use dedup::{Identity, dedupe};
pub use engine::{SyncEngine, SyncOutcome, SyncReport};
pub use error::CoreError;
pub use progress::{FetchEvent, FetchOutcome, SyncProgress};
pub use search::{resolve_share_code, search_all};
pub use sections::{FavoriteSection, GroupStyle, group_rooms, sort_rooms};
pub use stats::{PlatformStat, SyncStats};
