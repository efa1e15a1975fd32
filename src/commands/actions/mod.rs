//! Command action handlers.
//!
//! Individual handler functions for each bot command. Each handler receives what it
//! needs among the [`CommandContext`](crate::commands::CommandContext), the TruckersMP
//! services and the binding store, and returns a
//! [`CommandResult`](crate::commands::CommandResult).
//!
//! # Available Handlers
//!
//! - [`handle_status`] - Report the status of every server
//! - [`handle_query`] - Look up a player profile
//! - [`handle_bind`] - Bind a player name to the caller
//! - [`handle_unbind`] - Remove the caller's binding
//! - [`handle_erase`] - Delete the caller's data
//! - [`handle_help`] - Display help information
//!
//! # State Changes
//!
//! Unlike read-only handlers, bind, unbind and erase mutate the
//! [`BindingStore`](crate::bindings::BindingStore) directly, which persists them.

mod bind;
mod erase;
mod help;
mod query;
mod status;
mod unbind;

pub use crate::commands::actions::{
    bind::handle_bind, erase::handle_erase, help::handle_help, query::handle_query,
    status::handle_status, unbind::handle_unbind,
};
