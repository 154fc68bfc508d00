// ── Favorite identity and deduplication ──

use std::collections::HashSet;

use favcast_api::{FavoriteEntry, LiveStatus};

/// Anything that can derive a stable favorite identity key.
///
/// Keys follow a strict tier order over the trimmed identifier fields:
/// user id, then room id, then display name. The platform token is
/// always embedded, so identical ids on different platforms never
/// collide. The same account favorited twice with different capture
/// quality (one with a user id, one with only a room id) produces
/// different keys on purpose -- identity is only as good as the
/// strongest identifier actually present.
pub trait Identity {
    fn identity_key(&self) -> String;
}

impl Identity for FavoriteEntry {
    fn identity_key(&self) -> String {
        let platform = self.platform.key_token();

        let user_id = self.user_id.trim();
        if !user_id.is_empty() {
            return format!("{platform}_u_{user_id}");
        }

        let room_id = self.room_id.trim();
        if !room_id.is_empty() {
            return format!("{platform}_r_{room_id}");
        }

        format!("{platform}_n_{}", self.display_name.trim())
    }
}

impl Identity for LiveStatus {
    fn identity_key(&self) -> String {
        self.entry.identity_key()
    }
}

/// Drop duplicates, keeping the first occurrence of each identity key.
///
/// Stable: survivors keep their relative input order. Idempotent: a
/// second pass over the output is a no-op.
pub fn dedupe<T: Identity>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(item.identity_key()) {
            result.push(item);
        }
    }
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use favcast_api::PlatformKind;
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(platform: PlatformKind, room: &str, user: &str, name: &str) -> FavoriteEntry {
        FavoriteEntry::new(platform, room, user, name)
    }

    #[test]
    fn user_id_wins_over_room_id_and_name() {
        let full = entry(PlatformKind::Bilibili, "r1", "u1", "streamer");
        assert_eq!(full.identity_key(), "bilibili_u_u1");

        let no_user = entry(PlatformKind::Bilibili, "r1", "", "streamer");
        assert_eq!(no_user.identity_key(), "bilibili_r_r1");

        let name_only = entry(PlatformKind::Bilibili, "", "", "streamer");
        assert_eq!(name_only.identity_key(), "bilibili_n_streamer");
    }

    #[test]
    fn whitespace_identifiers_fall_through() {
        let padded = entry(PlatformKind::Douyu, "  r9  ", "   ", "name");
        assert_eq!(padded.identity_key(), "douyu_r_r9");

        let blank = entry(PlatformKind::Douyu, " ", "\n", "  ");
        assert_eq!(blank.identity_key(), "douyu_n_");
    }

    #[test]
    fn platforms_never_collide() {
        let a = entry(PlatformKind::Huya, "", "42", "x");
        let b = entry(PlatformKind::Douyin, "", "42", "x");
        assert_ne!(a.identity_key(), b.identity_key());
    }

    #[test]
    fn dedupe_keeps_first_and_preserves_order() {
        let rooms = vec![
            entry(PlatformKind::Bilibili, "", "u1", "first"),
            entry(PlatformKind::Douyu, "", "u2", "second"),
            entry(PlatformKind::Bilibili, "other-room", "u1", "duplicate"),
            entry(PlatformKind::Huya, "", "u3", "third"),
        ];
        let deduped = dedupe(rooms);
        let names: Vec<&str> = deduped.iter().map(|e| e.display_name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn dedupe_is_idempotent() {
        let rooms = vec![
            entry(PlatformKind::Yy, "r1", "", "a"),
            entry(PlatformKind::Yy, "r1", "", "b"),
            entry(PlatformKind::Yy, "r2", "", "c"),
        ];
        let once = dedupe(rooms);
        let twice = dedupe(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn fully_blank_entries_collapse_per_platform() {
        let rooms = vec![
            entry(PlatformKind::Cc, "", "", ""),
            entry(PlatformKind::Cc, "", "", ""),
            entry(PlatformKind::Soop, "", "", ""),
        ];
        let deduped = dedupe(rooms);
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn status_delegates_to_its_entry() {
        let entry = entry(PlatformKind::Ks, "room", "", "name");
        let status = LiveStatus::degraded(entry.clone(), favcast_api::LiveState::Unknown);
        assert_eq!(status.identity_key(), entry.identity_key());
    }
}
