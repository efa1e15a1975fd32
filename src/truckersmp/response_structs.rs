//! Response structures for TruckersMP API endpoints.
//!
//! This module contains structures for deserializing JSON responses from
//! the TruckersMP v2 API. Every endpoint wraps its payload in a `response` key.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Envelope returned by `/servers`.
#[derive(Deserialize, Debug)]
pub struct ServersEnvelope {
    /// Servers in the order chosen by the API.
    #[serde(default)]
    pub response: Vec<ServerResponse>,
}

/// Representation of a game server from `/servers`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServerResponse {
    /// Display name of the server.
    pub name: String,
    /// Players currently connected.
    pub players: u32,
    /// Player slots of the server.
    pub maxplayers: u32,
    /// Players waiting to join.
    #[serde(default)]
    pub queue: u32,
    /// Whether the speed limiter is enforced.
    #[serde(default, deserialize_with = "flag")]
    pub speedlimiter: bool,
    /// Whether collisions are enabled.
    #[serde(default, deserialize_with = "flag")]
    pub collisions: bool,
}

impl fmt::Display for ServerResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "name={}, players={}/{}, queue={}",
            self.name, self.players, self.maxplayers, self.queue
        )
    }
}

/// Envelope returned by `/player/{name}`.
///
/// An unknown player can come back as an error envelope without `response`.
#[derive(Deserialize, Debug)]
pub struct PlayerEnvelope {
    #[serde(default)]
    pub response: Option<PlayerResponse>,
}

/// Representation of a player from `/player/{name}`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub id: u64,
    pub name: String,
    /// Avatar URL.
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub is_game_admin: bool,
    /// Join date, formatted as `YYYY-MM-DD HH:MM:SS` by the API.
    pub join_date: String,
    #[serde(default)]
    pub banned: bool,
    /// `None` for permanent bans.
    #[serde(default)]
    pub ban_expire: Option<String>,
    #[serde(default)]
    pub bans_count: Option<u32>,
    #[serde(default)]
    pub online: bool,
    #[serde(rename = "steamID64", default, deserialize_with = "steam_id64")]
    pub steam_id64: String,
    #[serde(rename = "steamID", default)]
    pub steam_id: String,
    #[serde(default)]
    pub vtc: Option<VtcResponse>,
}

impl fmt::Display for PlayerResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "id={}, name={}, banned={}, online={}",
            self.id, self.name, self.banned, self.online
        )
    }
}

/// VTC membership of a player. An `id` of `0` means no VTC.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VtcResponse {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tag: String,
}

/// Accepts a flag sent either as a JSON boolean or as an integer.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Int(value) => value != 0,
    })
}

/// Steam ID64 does not fit every JSON number parser, the API may send it as a string.
fn steam_id64<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SteamId {
        Number(u64),
        Text(String),
    }

    Ok(match SteamId::deserialize(deserializer)? {
        SteamId::Number(value) => value.to_string(),
        SteamId::Text(value) => value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_servers_envelope_keeps_order_and_flags() {
        let json = r#"{
            "error": false,
            "response": [
                {"id": 1, "name": "Simulation 1", "players": 3400, "maxplayers": 4200, "queue": 12, "speedlimiter": 1, "collisions": true},
                {"id": 2, "name": "Arcade", "players": 150, "maxplayers": 1000, "queue": 0, "speedlimiter": 0, "collisions": false}
            ]
        }"#;

        let envelope: ServersEnvelope = serde_json::from_str(json).unwrap();

        assert_eq!(envelope.response.len(), 2);
        assert_eq!(envelope.response[0].name, "Simulation 1");
        assert!(envelope.response[0].speedlimiter);
        assert!(envelope.response[0].collisions);
        assert_eq!(envelope.response[1].name, "Arcade");
        assert!(!envelope.response[1].speedlimiter);
        assert!(!envelope.response[1].collisions);
    }

    #[test]
    fn test_player_envelope_full_profile() {
        let json = r#"{
            "error": false,
            "response": {
                "id": 28159,
                "name": "Alice",
                "avatar": "https://static.truckersmp.com/avatars/28159.png",
                "joinDate": "2016-06-13 16:43:19",
                "steamID64": 76561198000000000,
                "steamID": "76561198000000000",
                "isGameAdmin": true,
                "banned": true,
                "banExpire": "2030-01-01 00:00:00",
                "bansCount": 2,
                "online": false,
                "vtc": {"id": 7, "name": "Foo", "tag": "FOO", "inVTC": true, "memberID": 3}
            }
        }"#;

        let envelope: PlayerEnvelope = serde_json::from_str(json).unwrap();
        let player = envelope.response.unwrap();

        assert_eq!(player.id, 28159);
        assert_eq!(player.name, "Alice");
        assert!(player.is_game_admin);
        assert_eq!(player.ban_expire.as_deref(), Some("2030-01-01 00:00:00"));
        assert_eq!(player.bans_count, Some(2));
        assert_eq!(player.steam_id64, "76561198000000000");
        assert_eq!(player.vtc.unwrap().tag, "FOO");
    }

    #[test]
    fn test_player_envelope_without_response() {
        let json = r#"{"error": true, "descriptor": "Unable to find player with that ID."}"#;

        let envelope: PlayerEnvelope = serde_json::from_str(json).unwrap();

        assert!(envelope.response.is_none());
    }

    #[test]
    fn test_server_response_display() {
        let server = ServerResponse {
            name: "Simulation 1".to_string(),
            players: 10,
            maxplayers: 20,
            queue: 1,
            speedlimiter: true,
            collisions: false,
        };

        assert_eq!(
            format!("{}", server),
            "name=Simulation 1, players=10/20, queue=1"
        );
    }

    #[test]
    fn test_player_response_display() {
        let json = r#"{"id": 1, "name": "Alice", "joinDate": "2020-01-01 00:00:00", "banned": true, "online": true}"#;

        let player: PlayerResponse = serde_json::from_str(json).unwrap();

        assert_eq!(
            player.to_string(),
            "id=1, name=Alice, banned=true, online=true"
        );
    }
}
