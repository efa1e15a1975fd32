//! Matrix integration.
//!
//! - `client` - [`MatrixClient`], sends replies and runs the sync loop
//! - `login` - Login, session restoration and secret recovery
//! - `session` - Session persistence in the data directory
//! - `sync` - Sync loop, auto-join and message dispatch

mod client;
mod login;
mod session;
mod sync;

pub use crate::matrix::client::MatrixClient;

/// Name shown for the bot in the rooms, users address the bot with it.
const DISPLAY_NAME: &str = "Convoy";

/// User credentials for a Matrix account
#[derive(Debug, Clone)]
pub struct UserCredentials {
    /// User ID of the matrix account
    pub user_id: String,
    /// Password of the matrix account
    pub password: String,
    /// Passphrase of the sqlite store and of the secret storage
    pub passphrase: String,
}

/// Text message addressed to the bot in a joined room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Text without the mention of the bot
    pub body: String,
    pub room_id: String,
    /// User id of the author, never the bot itself
    pub sender_id: String,
    pub event_id: String,
}
