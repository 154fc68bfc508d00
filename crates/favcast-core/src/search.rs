// ── Cross-platform search and share-code resolution ──

use std::collections::BTreeMap;

use tokio::task::JoinSet;
use tracing::{debug, warn};

use favcast_api::{LiveStatus, PlatformDirectory, PlatformKind};

use crate::error::CoreError;

/// Search every registered platform in parallel.
///
/// One failing platform never suppresses the others: its failure is
/// logged and it contributes no results. Assembly is per-platform in
/// canonical order, so the output is independent of completion order.
pub async fn search_all(
    directory: &PlatformDirectory,
    keyword: &str,
    page: u32,
) -> Vec<LiveStatus> {
    let mut tasks: JoinSet<(PlatformKind, Vec<LiveStatus>)> = JoinSet::new();
    for kind in directory.platforms() {
        let Some(client) = directory.get(kind) else {
            continue;
        };
        let keyword = keyword.to_owned();
        tasks.spawn(async move {
            match client.search(&keyword, page).await {
                Ok(rooms) => {
                    debug!(platform = %kind.display_name(), hits = rooms.len(), "search finished");
                    (kind, rooms)
                }
                Err(error) => {
                    warn!(
                        platform = %kind.display_name(),
                        error = %error,
                        "search failed, contributing no results"
                    );
                    (kind, Vec::new())
                }
            }
        });
    }

    let mut by_platform: BTreeMap<PlatformKind, Vec<LiveStatus>> = BTreeMap::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((kind, rooms)) => {
                by_platform.insert(kind, rooms);
            }
            Err(join_error) => warn!(error = %join_error, "search task vanished"),
        }
    }

    by_platform.into_values().flatten().collect()
}

/// Resolve a share link or share message to a room.
///
/// Classification is pure string matching; only the final lookup goes
/// to the platform client. Text that names no known platform is an
/// error, a recognized platform with no registered client is another,
/// and a clean lookup that simply finds no room is `Ok(None)`.
pub async fn resolve_share_code(
    directory: &PlatformDirectory,
    code: &str,
) -> Result<Option<LiveStatus>, CoreError> {
    let Some(platform) = PlatformKind::from_share_url(code) else {
        return Err(CoreError::UnrecognizedShareCode);
    };
    let Some(client) = directory.get(platform) else {
        return Err(CoreError::UnsupportedPlatform { platform });
    };
    debug!(platform = %platform.display_name(), "resolving share code");
    client
        .resolve_share_code(code)
        .await
        .map_err(|source| CoreError::ShareLookup { source })
}
