//! Command orchestration and execution.
//!
//! This module provides the [`Commander`] struct, which serves as the main entry point
//! for processing bot commands. It owns the services the handlers need and routes
//! commands to them.
//!
//! # Flow
//!
//! ```text
//! Chat Message → parse() → Command → execute() → CommandResult
//! ```
//!
//! # Examples
//!
//! ```no_run
//! # use convoy::bindings::BindingStore;
//! # use convoy::commands::{Commander, CommandContext};
//! # use convoy::truckersmp::{PlayerLookupService, ServerStatusReporter, TruckersMpRequester};
//! # async fn example() {
//! let requester = TruckersMpRequester::new("https://api.truckersmp.com/v2");
//! let commander = Commander::new(
//!     PlayerLookupService::new(requester.clone()),
//!     ServerStatusReporter::new(requester),
//!     BindingStore::load("bindings").await,
//! );
//!
//! let command = commander.parse("服务器状态").unwrap();
//! let context = CommandContext {
//!     user_id: "@user:example.com".to_string(),
//! };
//! let result = commander.execute(&command, &context).await;
//! # }
//! ```

use crate::{
    bindings::BindingStore,
    commands::{
        Command, CommandContext, CommandResult,
        actions::{
            handle_bind, handle_erase, handle_help, handle_query, handle_status, handle_unbind,
        },
    },
    truckersmp::{PlayerLookupService, Requester, ServerStatusReporter},
};

/// Parses chat messages and executes the resulting commands.
pub struct Commander<R: Requester> {
    /// Player profile lookups
    lookup_service: PlayerLookupService<R>,
    /// Server status reports
    status_reporter: ServerStatusReporter<R>,
    /// Player names bound by users
    binding_store: BindingStore,
}

impl<R: Requester> Commander<R> {
    pub fn new(
        lookup_service: PlayerLookupService<R>,
        status_reporter: ServerStatusReporter<R>,
        binding_store: BindingStore,
    ) -> Self {
        Commander {
            lookup_service,
            status_reporter,
            binding_store,
        }
    }

    /// Parses a message, `None` if it is not for the bot.
    pub fn parse(&self, body: &str) -> Option<Command> {
        Command::parse(body)
    }

    /// Executes a command on behalf of the user of `context`.
    ///
    /// Failures are turned into user-facing messages. Returns `None` only if a handler
    /// is given a command it doesn't handle.
    pub async fn execute(
        &self,
        command: &Command,
        context: &CommandContext,
    ) -> Option<CommandResult> {
        let result = match command {
            Command::ServerStatus => handle_status(&self.status_reporter).await,
            Command::Query(_) => {
                handle_query(context, command, &self.lookup_service, &self.binding_store).await?
            }
            Command::Bind(_) => handle_bind(context, command, &self.binding_store).await?,
            Command::Unbind => handle_unbind(context, &self.binding_store).await,
            Command::EraseData => handle_erase(context, &self.binding_store).await,
            Command::Help => handle_help(),
        };

        Some(result)
    }
}
