//! Command parsing.
//!
//! This module converts chat message text into structured [`Command`] enums.
//!
//! The grammar is keyword based, the way group chat users address the bot:
//! keywords are matched by substring, prefix or equality, case-sensitive, and the
//! first matching rule wins. Messages matching no rule are not for the bot.

use log::debug;

/// Server status keyword, matched anywhere in the message.
pub const STATUS_KEYWORD: &str = "服务器状态";
/// Player query keyword, matched anywhere in the message and followed by the player name.
pub const QUERY_KEYWORD: &str = "查询";
/// Bind keyword, the message must start with it and continue with the player name.
pub const BIND_KEYWORD: &str = "绑定";
/// Unbind keyword, the whole message.
pub const UNBIND_KEYWORD: &str = "解除绑定";
/// Personal data deletion keyword, the whole message.
pub const ERASE_KEYWORD: &str = "删除个人数据";
/// Help keyword, the whole message.
pub const HELP_KEYWORD: &str = "帮助";

/// Represents a parsed bot command.
#[derive(Debug, Hash, PartialEq, Eq)]
pub enum Command {
    /// Report the status of every server
    ServerStatus,
    /// Look up a player
    ///
    /// # Fields
    ///
    /// * `Option<String>` - Player name, `None` to use the caller's bound name
    Query(Option<String>),
    /// Bind a player name to the caller
    ///
    /// # Fields
    ///
    /// * `Option<String>` - Player name, `None` when the caller forgot it
    Bind(Option<String>),
    /// Remove the caller's binding
    Unbind,
    /// Delete every piece of data kept for the caller
    EraseData,
    /// List the commands
    Help,
}

impl Command {
    /// Parses a message into a [`Command`].
    ///
    /// The message is trimmed first. Returns `None` if the message is not for the bot.
    ///
    /// # Examples
    ///
    /// ```
    /// # use convoy::commands::Command;
    /// assert_eq!(
    ///     Command::parse("查询 Alice"),
    ///     Some(Command::Query(Some("Alice".to_string())))
    /// );
    /// assert_eq!(Command::parse("hello"), None);
    /// ```
    pub fn parse(body: &str) -> Option<Self> {
        let message = body.trim();

        let command = if message.contains(STATUS_KEYWORD) {
            Command::ServerStatus
        } else if let Some(index) = message.find(QUERY_KEYWORD) {
            let name = &message[index + QUERY_KEYWORD.len()..];
            Command::Query(Self::parse_name(name))
        } else if let Some(name) = message.strip_prefix(BIND_KEYWORD) {
            Command::Bind(Self::parse_name(name))
        } else if message == UNBIND_KEYWORD {
            Command::Unbind
        } else if message == ERASE_KEYWORD {
            Command::EraseData
        } else if message == HELP_KEYWORD {
            Command::Help
        } else {
            return None;
        };

        debug!("parsed command {:?}", command);

        Some(command)
    }

    /// Player names may contain spaces, only the surrounding ones are dropped.
    fn parse_name(name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            None
        } else {
            Some(name.to_owned())
        }
    }
}
