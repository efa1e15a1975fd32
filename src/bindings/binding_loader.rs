//! Binding persistence layer for loading and saving bindings to disk.
//!
//! This module provides the [`BindingLoader`] for persisting binding data between
//! bot restarts. Bindings are serialized to a single JSON document.

use std::{collections::HashMap, io::ErrorKind, path::PathBuf};

use log::{error, info, warn};
use thiserror::Error;
use tokio::fs;

use crate::bindings::binding::Binding;

/// Failure to write the bindings document.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to serialize bindings: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write bindings file: {0}")]
    Write(#[from] std::io::Error),
}

/// Handles loading and persisting bindings to disk.
///
/// If loading fails (unreadable or corrupted file), it returns an empty map rather
/// than failing: the bot then behaves as if nobody had bound a name.
///
/// # Examples
///
/// ```no_run
/// use convoy::bindings::BindingLoader;
///
/// # async fn example() {
/// let loader = BindingLoader::new("bindings");
/// let bindings = loader.load_all().await;
/// loader.persist_all(&bindings).await.unwrap();
/// # }
/// ```
#[derive(Clone)]
pub struct BindingLoader {
    /// Path to the JSON file where bindings are stored.
    path: PathBuf,
}

impl BindingLoader {
    /// Creates a new `BindingLoader` for the specified file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        BindingLoader { path: path.into() }
    }

    /// Loads every binding from disk.
    ///
    /// # Error Handling
    ///
    /// - If the file doesn't exist: creates it with an empty document
    /// - If reading or deserialization fails: logs an error and returns an empty map
    pub async fn load_all(&self) -> HashMap<String, Binding> {
        let serialized_bindings = match fs::read_to_string(&self.path).await {
            Ok(serialized) => serialized,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    "no bindings file at {}, creating an empty one",
                    self.path.display()
                );
                if let Err(e) = fs::write(&self.path, "{}").await {
                    error!("failed to create bindings file: {}", e);
                }
                return HashMap::new();
            }
            Err(e) => {
                error!("failed to read bindings file, starting without bindings: {}", e);
                return HashMap::new();
            }
        };

        // An empty file is an empty document
        if serialized_bindings.trim().is_empty() {
            return HashMap::new();
        }

        let Ok(bindings) = serde_json::from_str::<HashMap<String, Binding>>(&serialized_bindings)
        else {
            error!("failed to deserialize persisted bindings, starting without bindings");
            return HashMap::new();
        };

        info!("loaded {} persisted bindings", bindings.len());

        bindings
    }

    /// Rewrites the whole bindings document.
    ///
    /// The document is written next to the file first, then renamed over it, so an
    /// interrupted write never leaves a truncated document behind.
    pub async fn persist_all(
        &self,
        bindings: &HashMap<String, Binding>,
    ) -> Result<(), PersistenceError> {
        let serialized_bindings = serde_json::to_string(bindings)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, serialized_bindings).await?;
        fs::rename(&tmp, &self.path).await?;

        info!("persisted {} bindings", bindings.len());

        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}
