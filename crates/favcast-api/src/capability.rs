// ── Capability traits and the platform client directory ──
//
// The sync engine never talks wire protocols itself. It consumes the
// favorites backend and the per-platform clients through these traits,
// so tests and alternate backends drop in without touching the engine.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::model::{FavoriteEntry, LiveStatus, ProviderHealth};
use crate::platform::PlatformKind;

/// Source of the user's favorite list.
///
/// The backend is authoritative: a fetch failure aborts the sync cycle
/// rather than producing results from stale data.
#[async_trait]
pub trait FavoritesProvider: Send + Sync {
    /// Fetch the full favorites list, in storage order.
    async fn fetch_favorites(&self) -> Result<Vec<FavoriteEntry>, ApiError>;

    /// Report whether the backend is currently reachable.
    async fn health(&self) -> ProviderHealth;
}

/// Wire-protocol client for a single streaming platform.
///
/// Only status resolution is mandatory. Search and share resolution
/// default to [`ApiError::UnsupportedOperation`], mirroring the feature
/// matrix: not every platform exposes every capability.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Resolve the current live status of one favorited room.
    async fn fetch_status(&self, entry: &FavoriteEntry) -> Result<LiveStatus, ApiError>;

    /// Search rooms by keyword. `page` is 1-based.
    async fn search(&self, keyword: &str, page: u32) -> Result<Vec<LiveStatus>, ApiError> {
        let _ = (keyword, page);
        Err(ApiError::UnsupportedOperation("search"))
    }

    /// Resolve a share link or share code to a room, if it denotes one.
    async fn resolve_share_code(&self, code: &str) -> Result<Option<LiveStatus>, ApiError> {
        let _ = code;
        Err(ApiError::UnsupportedOperation("share code resolution"))
    }
}

/// Registry of platform clients keyed by platform.
///
/// An entry whose platform has no registered client is handled as a
/// per-entry failure by the engine, never a panic.
#[derive(Clone, Default)]
pub struct PlatformDirectory {
    clients: HashMap<PlatformKind, Arc<dyn PlatformClient>>,
}

impl PlatformDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration.
    #[must_use]
    pub fn with_client(mut self, kind: PlatformKind, client: Arc<dyn PlatformClient>) -> Self {
        self.clients.insert(kind, client);
        self
    }

    pub fn register(&mut self, kind: PlatformKind, client: Arc<dyn PlatformClient>) {
        self.clients.insert(kind, client);
    }

    pub fn get(&self, kind: PlatformKind) -> Option<Arc<dyn PlatformClient>> {
        self.clients.get(&kind).map(Arc::clone)
    }

    pub fn contains(&self, kind: PlatformKind) -> bool {
        self.clients.contains_key(&kind)
    }

    /// Registered platforms in canonical order.
    pub fn platforms(&self) -> Vec<PlatformKind> {
        let mut kinds: Vec<PlatformKind> = self.clients.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl fmt::Debug for PlatformDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformDirectory")
            .field("platforms", &self.platforms())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{LiveState, StreamInfo};
    use tokio_test::assert_ok;

    struct StubClient;

    #[async_trait]
    impl PlatformClient for StubClient {
        async fn fetch_status(&self, entry: &FavoriteEntry) -> Result<LiveStatus, ApiError> {
            Ok(LiveStatus::new(
                entry.clone(),
                LiveState::Live,
                StreamInfo::default(),
            ))
        }
    }

    #[test]
    fn directory_lookup_and_canonical_order() {
        let directory = PlatformDirectory::new()
            .with_client(PlatformKind::Yy, Arc::new(StubClient))
            .with_client(PlatformKind::Bilibili, Arc::new(StubClient));

        assert_eq!(directory.len(), 2);
        assert!(directory.contains(PlatformKind::Yy));
        assert!(directory.get(PlatformKind::Douyu).is_none());
        assert_eq!(
            directory.platforms(),
            vec![PlatformKind::Bilibili, PlatformKind::Yy]
        );
    }

    #[tokio::test]
    async fn trait_objects_are_callable_through_the_directory() {
        let directory =
            PlatformDirectory::new().with_client(PlatformKind::Douyu, Arc::new(StubClient));
        let client = directory.get(PlatformKind::Douyu).unwrap();
        let entry = FavoriteEntry::new(PlatformKind::Douyu, "9999", "", "someone");
        let status = tokio_test::assert_ok!(client.fetch_status(&entry).await);
        assert!(status.is_live());
    }

    #[tokio::test]
    async fn optional_capabilities_default_to_unsupported() {
        let client = StubClient;
        let err = client.search("keyword", 1).await.unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedOperation(_)));
        let err = client.resolve_share_code("code").await.unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedOperation(_)));
    }
}
