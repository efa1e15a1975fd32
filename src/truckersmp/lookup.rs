//! Player lookup against the TruckersMP API.
//!
//! A lookup is two requests: the profile, then the avatar it references. The avatar
//! is optional: if it can't be downloaded the profile is still returned, without image.

use log::{debug, info, warn};

use crate::truckersmp::{LookupError, requester::Requester, structs::PlayerProfile};

/// Resolves a player display name into a [`PlayerProfile`].
pub struct PlayerLookupService<R: Requester> {
    /// TruckersMP requester to interact with the API
    requester: R,
}

impl<R: Requester> PlayerLookupService<R> {
    /// Create a new [PlayerLookupService].
    pub fn new(requester: R) -> Self {
        PlayerLookupService { requester }
    }

    /// Looks up a player and downloads its avatar.
    ///
    /// # Errors
    ///
    /// * [`LookupError::NotFound`] - The API doesn't know this player
    /// * [`LookupError::Request`] - The profile request failed
    ///
    /// A failing avatar download is logged and leaves [`PlayerProfile::avatar`] empty.
    pub async fn lookup(&self, name: &str) -> Result<PlayerProfile, LookupError> {
        let Some(player) = self.requester.get_player(name).await? else {
            info!("player {} not found", name);
            return Err(LookupError::NotFound);
        };

        let avatar_url = player.avatar.clone();
        let mut profile = PlayerProfile::from_response(player);

        if avatar_url.is_empty() {
            debug!("player {} has no avatar", profile.name);
            return Ok(profile);
        }

        match self.requester.get_avatar(&avatar_url).await {
            Ok(avatar) => profile.avatar = Some(avatar),
            Err(e) => warn!(
                "failed to download avatar {} of player {}: {}",
                avatar_url, profile.name, e
            ),
        }

        debug!("looked up player {}", profile);

        Ok(profile)
    }
}
