//! Personal data deletion command handler.
//!
//! The binding is the only data kept per user, erasing it has the effect of an unbind
//! but always confirms the deletion, even when nothing was kept.

use log::{debug, info};

use crate::{
    bindings::BindingStore,
    commands::{CommandContext, CommandResult, text_response::format_successful_erase},
};

pub async fn handle_erase(context: &CommandContext, binding_store: &BindingStore) -> CommandResult {
    debug!("handling erase command for {}", context.user_id);

    if !binding_store.erase_all(&context.user_id).await {
        info!("no data kept for {}", context.user_id);
    }

    CommandResult::text(format_successful_erase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_handle_erase() {
        let temp_file = NamedTempFile::new().unwrap();
        let binding_store = BindingStore::load(temp_file.path()).await;
        binding_store.bind("@user:example.com", "Alice").await;
        binding_store.bind("@other:example.com", "Bob").await;
        let context = CommandContext {
            user_id: "@user:example.com".to_string(),
        };

        let result = handle_erase(&context, &binding_store).await;

        assert_eq!(result.response, format_successful_erase());
        assert!(binding_store.get("@user:example.com").await.is_none());
        assert_eq!(
            binding_store.get("@other:example.com").await,
            Some("Bob".to_string())
        );
    }

    #[tokio::test]
    async fn test_handle_erase_without_data() {
        let temp_file = NamedTempFile::new().unwrap();
        let binding_store = BindingStore::load(temp_file.path()).await;
        let context = CommandContext {
            user_id: "@user:example.com".to_string(),
        };

        let result = handle_erase(&context, &binding_store).await;

        assert_eq!(result.response, format_successful_erase());
    }
}
