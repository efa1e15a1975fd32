//! In-memory binding store backed by a JSON document.
//!
//! This module provides the [`BindingStore`] which owns every binding of the bot.

use std::{collections::HashMap, path::PathBuf};

use log::{error, info};
use tokio::sync::Mutex;

use crate::bindings::{Binding, BindingLoader};

/// Maps chat users to the TruckersMP player name they bound.
///
/// # Persistence
///
/// The store is fully loaded at startup. Each mutation rewrites the whole document
/// while still holding the lock, so concurrent mutations reach the disk one at a time
/// and in the same order as in memory. A failing write is logged and the in-memory
/// change is kept; the next successful write reconciles the file.
///
/// # Examples
///
/// ```no_run
/// use convoy::bindings::BindingStore;
///
/// # async fn example() {
/// let store = BindingStore::load("bindings").await;
/// store.bind("@alice:example.com", "Alice").await;
/// assert_eq!(store.get("@alice:example.com").await.as_deref(), Some("Alice"));
/// # }
/// ```
pub struct BindingStore {
    /// Bindings indexed by chat user id
    bindings: Mutex<HashMap<String, Binding>>,
    /// Loader for persisting and loading bindings from disk
    binding_loader: BindingLoader,
}

impl BindingStore {
    /// Creates the store and loads existing bindings from disk.
    ///
    /// A missing file is created empty. An unreadable file leaves the store empty.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let binding_loader = BindingLoader::new(path);
        let bindings = Mutex::new(binding_loader.load_all().await);

        BindingStore {
            bindings,
            binding_loader,
        }
    }

    /// Returns the player name bound to `user_id`.
    pub async fn get(&self, user_id: &str) -> Option<String> {
        self.bindings
            .lock()
            .await
            .get(user_id)
            .map(|binding| binding.player_name.clone())
    }

    /// Binds `player_name` to `user_id`, replacing any previous binding.
    pub async fn bind(&self, user_id: &str, player_name: &str) {
        let mut bindings = self.bindings.lock().await;

        bindings.insert(
            user_id.to_owned(),
            Binding {
                player_name: player_name.to_owned(),
            },
        );

        info!("bound player {} to user {}", player_name, user_id);

        self.persist(&bindings).await;
    }

    /// Removes the binding of `user_id`.
    ///
    /// Returns `false` if there was nothing to remove.
    pub async fn unbind(&self, user_id: &str) -> bool {
        let mut bindings = self.bindings.lock().await;

        let removed = bindings.remove(user_id).is_some();
        if removed {
            info!("unbound user {}", user_id);
        }

        self.persist(&bindings).await;

        removed
    }

    /// Deletes every piece of data kept for `user_id`.
    ///
    /// A binding is the only data kept per user so far.
    pub async fn erase_all(&self, user_id: &str) -> bool {
        let mut bindings = self.bindings.lock().await;

        let removed = bindings.remove(user_id).is_some();
        info!("erased data of user {}", user_id);

        self.persist(&bindings).await;

        removed
    }

    async fn persist(&self, bindings: &HashMap<String, Binding>) {
        if let Err(e) = self.binding_loader.persist_all(bindings).await {
            error!("failed to persist bindings: {}", e);
        }
    }
}
