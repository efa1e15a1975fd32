//! Unbind command handler.

use log::debug;

use crate::{
    bindings::BindingStore,
    commands::{
        CommandContext, CommandResult,
        text_response::{format_nothing_bound, format_successful_unbind},
    },
};

/// Removes the binding of the caller, telling them when there was none.
pub async fn handle_unbind(context: &CommandContext, binding_store: &BindingStore) -> CommandResult {
    debug!("handling unbind command for {}", context.user_id);

    let response = if binding_store.unbind(&context.user_id).await {
        format_successful_unbind()
    } else {
        format_nothing_bound()
    };

    CommandResult::text(response)
}
