//! Bind command handler.
//!
//! Binds a player name to the caller so that later queries can omit it. The name is
//! not checked against the API: binding a player that doesn't exist only fails at
//! query time.

use log::debug;

use crate::{
    bindings::BindingStore,
    commands::{
        Command, CommandContext, CommandResult,
        text_response::{format_missing_bind_name, format_successful_bind},
    },
};

/// Binds the player name of a [`Command::Bind`] to the caller.
///
/// Any previous binding of the caller is replaced. Returns `None` for other commands.
pub async fn handle_bind(
    context: &CommandContext,
    command: &Command,
    binding_store: &BindingStore,
) -> Option<CommandResult> {
    debug!("handling bind command: {:?}", command);

    let player_name = match command {
        Command::Bind(player_name) => player_name,
        _ => return None,
    };

    let Some(player_name) = player_name else {
        return Some(CommandResult::text(format_missing_bind_name()));
    };

    binding_store.bind(&context.user_id, player_name).await;

    Some(CommandResult::text(format_successful_bind(player_name)))
}
