//! Player query command handler.
//!
//! Looks up a player profile, by the name given in the message or, when the message
//! has none, by the name the caller bound. The avatar is returned as the result image.
//!
//! # Errors
//!
//! Returns user-friendly messages when the player doesn't exist or the API fails.
//! API failures are logged with their cause.

use chrono::Utc;
use log::{debug, error};

use crate::{
    bindings::BindingStore,
    commands::{
        Command, CommandContext, CommandResult,
        text_response::{
            format_lookup_error, format_missing_query_name, format_player_not_found,
            format_player_profile,
        },
    },
    truckersmp::{LookupError, PlayerLookupService, Requester},
};

/// Resolves the player name to look up: the explicit one, else the caller's binding.
async fn resolve_player_name(
    context: &CommandContext,
    player_name: &Option<String>,
    binding_store: &BindingStore,
) -> Option<String> {
    if let Some(player_name) = player_name {
        return Some(player_name.clone());
    }

    let bound_name = binding_store.get(&context.user_id).await;
    debug!("bound player of {}: {:?}", context.user_id, bound_name);

    bound_name
}

/// Looks up the player of a [`Command::Query`].
///
/// When neither the message nor the binding gives a name, the caller is prompted for
/// one and the API is not called. Returns `None` for other commands.
pub async fn handle_query<R: Requester>(
    context: &CommandContext,
    command: &Command,
    lookup_service: &PlayerLookupService<R>,
    binding_store: &BindingStore,
) -> Option<CommandResult> {
    debug!("handling query command: {:?}", command);

    let player_name = match command {
        Command::Query(player_name) => player_name,
        _ => return None,
    };

    let Some(player_name) = resolve_player_name(context, player_name, binding_store).await else {
        return Some(CommandResult::text(format_missing_query_name()));
    };

    let result = match lookup_service.lookup(&player_name).await {
        Ok(profile) => CommandResult {
            response: format_player_profile(&profile, Utc::now()),
            image: profile.avatar,
        },
        Err(LookupError::NotFound) => CommandResult::text(format_player_not_found(&player_name)),
        Err(e) => {
            error!("failed to look up player {}: {}", player_name, e);
            CommandResult::text(format_lookup_error())
        }
    };

    Some(result)
}
