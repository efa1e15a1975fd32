//! Binding between a chat user and a TruckersMP player.

use serde::{Deserialize, Serialize};

/// Player name bound to a chat user.
///
/// The chat user id is the key of the bindings map, so it is not repeated here.
/// Serialized as `{"playerName": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    /// TruckersMP display name used when the user queries without a name.
    pub player_name: String,
}
