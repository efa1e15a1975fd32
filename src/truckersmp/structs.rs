//! Internal data structures for representing TruckersMP state.
//!
//! These structures only live for the duration of one command: nothing here is cached.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::truckersmp::response_structs::{PlayerResponse, ServerResponse};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Live state of one game server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerStatus {
    pub name: String,
    pub players: u32,
    pub max_players: u32,
    pub queue: u32,
    pub speed_limiter: bool,
    pub collisions: bool,
}

impl From<ServerResponse> for ServerStatus {
    fn from(server: ServerResponse) -> Self {
        ServerStatus {
            name: server.name,
            players: server.players,
            max_players: server.maxplayers,
            queue: server.queue,
            speed_limiter: server.speedlimiter,
            collisions: server.collisions,
        }
    }
}

/// Virtual trucking company a player belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vtc {
    pub id: u64,
    pub name: String,
    pub tag: String,
}

/// Raw avatar image downloaded from the avatar URL of a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    pub bytes: Vec<u8>,
    /// Content type announced by the image host, `image/jpeg` when missing.
    pub content_type: mime::Mime,
}

/// Complete profile of a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    pub id: u64,
    pub name: String,
    pub is_game_admin: bool,
    /// Join date as sent by the API, displayed verbatim.
    pub join_date: String,
    pub banned: bool,
    pub ban_expire: Option<String>,
    pub bans_count: Option<u32>,
    pub online: bool,
    pub steam_id64: String,
    pub steam_id: String,
    /// `None` when the player is not in a VTC.
    pub vtc: Option<Vtc>,
    /// Avatar image, `None` when it could not be downloaded.
    pub avatar: Option<Avatar>,
}

impl PlayerProfile {
    /// Builds a profile from the API response, without avatar.
    pub fn from_response(player: PlayerResponse) -> Self {
        let vtc = player
            .vtc
            .filter(|vtc| vtc.id != 0)
            .map(|vtc| Vtc {
                id: vtc.id,
                name: vtc.name,
                tag: vtc.tag,
            });

        PlayerProfile {
            id: player.id,
            name: player.name,
            is_game_admin: player.is_game_admin,
            join_date: player.join_date,
            banned: player.banned,
            ban_expire: player.ban_expire,
            bans_count: player.bans_count,
            online: player.online,
            steam_id64: player.steam_id64,
            steam_id: player.steam_id,
            vtc,
            avatar: None,
        }
    }

    /// Number of started days between the join date and `now`.
    ///
    /// Returns `None` if the join date can't be parsed.
    pub fn join_days(&self, now: DateTime<Utc>) -> Option<i64> {
        let joined = parse_join_date(&self.join_date)?;
        let elapsed = (now - joined).num_seconds();
        // Ceiling division, a partial day counts as a full one
        Some((elapsed + SECONDS_PER_DAY - 1).div_euclid(SECONDS_PER_DAY))
    }
}

impl fmt::Display for PlayerProfile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "id={}, name={}, banned={}, online={}, vtc={:?}, avatar={}",
            self.id,
            self.name,
            self.banned,
            self.online,
            self.vtc.as_ref().map(|vtc| vtc.id),
            self.avatar.is_some()
        )
    }
}

/// The API sends `YYYY-MM-DD HH:MM:SS` (UTC), RFC 3339 is accepted as well.
fn parse_join_date(join_date: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(join_date, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }

    DateTime::parse_from_rfc3339(join_date)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::truckersmp::response_structs::VtcResponse;

    fn create_player_response(vtc: Option<VtcResponse>) -> PlayerResponse {
        PlayerResponse {
            id: 1,
            name: "Alice".to_string(),
            avatar: "http://example.com/avatar.png".to_string(),
            is_game_admin: false,
            join_date: "2020-01-01 00:00:00".to_string(),
            banned: false,
            ban_expire: None,
            bans_count: None,
            online: true,
            steam_id64: "76561198000000000".to_string(),
            steam_id: "76561198000000000".to_string(),
            vtc,
        }
    }

    #[test]
    fn test_from_response_drops_vtc_zero() {
        let profile = PlayerProfile::from_response(create_player_response(Some(VtcResponse {
            id: 0,
            name: String::new(),
            tag: String::new(),
        })));

        assert!(profile.vtc.is_none());
        assert!(profile.avatar.is_none());
    }

    #[test]
    fn test_from_response_keeps_vtc() {
        let profile = PlayerProfile::from_response(create_player_response(Some(VtcResponse {
            id: 7,
            name: "Foo".to_string(),
            tag: "FOO".to_string(),
        })));

        assert_eq!(
            profile.vtc,
            Some(Vtc {
                id: 7,
                name: "Foo".to_string(),
                tag: "FOO".to_string(),
            })
        );
    }

    #[test]
    fn test_join_days_rounds_up_partial_days() {
        let profile = PlayerProfile::from_response(create_player_response(None));

        let exact = Utc.with_ymd_and_hms(2020, 1, 11, 0, 0, 0).unwrap();
        assert_eq!(profile.join_days(exact), Some(10));

        let one_second_later = Utc.with_ymd_and_hms(2020, 1, 11, 0, 0, 1).unwrap();
        assert_eq!(profile.join_days(one_second_later), Some(11));
    }

    #[test]
    fn test_join_days_rfc3339() {
        let mut profile = PlayerProfile::from_response(create_player_response(None));
        profile.join_date = "2020-01-01T12:00:00+00:00".to_string();

        let now = Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(profile.join_days(now), Some(1));
    }

    #[test]
    fn test_join_days_unparsable_date() {
        let mut profile = PlayerProfile::from_response(create_player_response(None));
        profile.join_date = "yesterday".to_string();

        assert_eq!(profile.join_days(Utc::now()), None);
    }

    #[test]
    fn test_server_status_from_response() {
        let status = ServerStatus::from(ServerResponse {
            name: "Simulation 1".to_string(),
            players: 10,
            maxplayers: 20,
            queue: 3,
            speedlimiter: true,
            collisions: false,
        });

        assert_eq!(status.max_players, 20);
        assert_eq!(status.queue, 3);
        assert!(status.speed_limiter);
        assert!(!status.collisions);
    }
}
