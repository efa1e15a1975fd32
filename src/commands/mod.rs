//! Bot command parsing and response formatting.
//!
//! This module provides the complete command processing pipeline of the bot.
//!
//! # Overview
//!
//! 1. **Parsing** - Converting chat messages into structured [`command::Command`] enums
//! 2. **Execution** - Routing commands to specialized handlers
//! 3. **Response** - Formatting results as plain Chinese text, with an optional image
//!
//! # Architecture
//!
//! ```text
//! Chat Message
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Commander  │  ← Entry point: parse() + execute()
//! └─────────────┘
//!      │
//!      ├── parse() ───────────────────┐
//!      │                              ▼
//!                          ┌──────────────────┐
//!                          │  command::Command│
//!                          └──────────────────┘
//!      │
//!      └── execute() ─────────────────┐
//!                                     ▼
//!                          ┌─────────────────────┐
//!                          │ Action Handlers     │
//!                          │  - handle_status    │
//!                          │  - handle_query     │
//!                          │  - handle_bind      │
//!                          │  - handle_unbind    │
//!                          │  - handle_erase     │
//!                          │  - handle_help      │
//!                          └─────────────────────┘
//!                                     │
//!                                     ▼
//!                          ┌────────────────────┐
//!                          │  CommandResult     │
//!                          │  - response (text) │
//!                          │  - image           │
//!                          └────────────────────┘
//! ```
//!
//! # Available Commands
//!
//! | Keyword | Match | Description |
//! |---------|-------|-------------|
//! | `服务器状态` | anywhere | Status of every TruckersMP server |
//! | `查询 [name]` | anywhere | Player profile, the bound name is used when `name` is missing |
//! | `绑定 <name>` | prefix | Bind a player name to the caller |
//! | `解除绑定` | whole message | Remove the caller's binding |
//! | `删除个人数据` | whole message | Delete the caller's data |
//! | `帮助` | whole message | List the commands |
//!
//! # Module Organization
//!
//! - [`commander`] - Main orchestrator for parsing and executing commands
//! - [`command`] - Command enum definitions and parsing logic
//! - [`actions`] - Individual command handler implementations
//! - [`text_response`] - Response formatting utilities

mod actions;
mod command;
mod commander;
mod text_response;

pub use crate::commands::command::Command;
pub use crate::commands::commander::Commander;
use crate::truckersmp::Avatar;

/// Runtime context for command execution.
///
/// # Examples
///
/// ```
/// # use convoy::commands::CommandContext;
/// let context = CommandContext {
///     user_id: "@user:example.com".to_string(),
/// };
/// ```
#[derive(Debug)]
pub struct CommandContext {
    /// Chat user id of the command issuer, key of its binding
    pub user_id: String,
}

/// Result of command execution.
///
/// # Fields
///
/// * `response` - Plain text message to send to the room
/// * `image` - Optional image sent after the text, the player avatar
#[derive(Debug)]
pub struct CommandResult {
    /// Plain text response message
    pub response: String,
    /// Optional image attached to the response
    pub image: Option<Avatar>,
}

impl CommandResult {
    /// Text-only result.
    pub fn text(response: String) -> Self {
        CommandResult {
            response,
            image: None,
        }
    }
}
