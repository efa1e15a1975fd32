//! Matrix session persistence.
//!
//! The session directory holds the encrypted sqlite store of the SDK and a JSON file
//! with the login tokens and the last sync token, so a restart neither logs in again
//! nor replays old messages.

use std::path::{Path, PathBuf};

use log::{debug, trace, warn};
use matrix_sdk::authentication::matrix;
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Content of the session file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    user_session: matrix::MatrixSession,

    #[serde(skip_serializing_if = "Option::is_none")]
    sync_token: Option<String>,
}

/// Session of the bot account, restored from the session directory.
#[derive(Clone)]
pub struct MatrixSession {
    /// Session found on disk at startup
    stored: Option<StoredSession>,
    /// Directory of the sdk sqlite store
    sqlite_path: PathBuf,
    /// JSON session file
    session_path: PathBuf,
}

impl MatrixSession {
    /// Opens the session directory, creating it if needed.
    ///
    /// A missing or unreadable session file means the bot has to log in.
    pub async fn open(dir_path: impl AsRef<Path>) -> Result<MatrixSession, anyhow::Error> {
        let dir_path = dir_path.as_ref();
        debug!("open session directory {}", dir_path.display());

        fs::create_dir_all(dir_path).await?;

        let sqlite_path = dir_path.join("sqlite");
        let session_path = dir_path.join("session");

        let stored = match read_session(&session_path).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!("ignoring unreadable session file: {}", e);
                None
            }
        };
        debug!("found user session: {}", stored.is_some());

        Ok(MatrixSession {
            stored,
            sqlite_path,
            session_path,
        })
    }

    pub fn has_session(&self) -> bool {
        self.stored.is_some()
    }

    pub fn sqlite_path(&self) -> &Path {
        &self.sqlite_path
    }

    pub fn user_session(&self) -> Option<&matrix::MatrixSession> {
        self.stored.as_ref().map(|stored| &stored.user_session)
    }

    pub fn sync_token(&self) -> Option<String> {
        self.stored
            .as_ref()
            .and_then(|stored| stored.sync_token.clone())
    }

    /// Writes a fresh session file, without sync token.
    pub async fn persist_user_session(
        &self,
        user_session: &matrix::MatrixSession,
    ) -> anyhow::Result<()> {
        trace!("persist user session");

        let stored = StoredSession {
            user_session: user_session.clone(),
            sync_token: None,
        };
        fs::write(&self.session_path, serde_json::to_string(&stored)?).await?;

        Ok(())
    }

    /// Updates the sync token of the session file.
    ///
    /// Fails if no user session was persisted before.
    pub async fn persist_sync_token(&self, sync_token: String) -> anyhow::Result<()> {
        trace!("persist sync token {}", sync_token);

        let Some(mut stored) = read_session(&self.session_path).await? else {
            anyhow::bail!("no user session to attach the sync token to");
        };
        stored.sync_token = Some(sync_token);
        fs::write(&self.session_path, serde_json::to_string(&stored)?).await?;

        Ok(())
    }
}

/// Reads the session file, `None` if there is none yet.
async fn read_session(session_path: &Path) -> anyhow::Result<Option<StoredSession>> {
    if !fs::try_exists(session_path).await? {
        return Ok(None);
    }

    let serialized = fs::read_to_string(session_path).await?;
    Ok(Some(serde_json::from_str(&serialized)?))
}
