//! Help command handler.
//!
//! This is a stateless command that always returns the same help message.

use log::debug;

use crate::commands::{CommandResult, text_response::format_help};

/// Returns the list of keywords the bot answers to.
pub fn handle_help() -> CommandResult {
    debug!("handling help command");

    CommandResult::text(format_help())
}
