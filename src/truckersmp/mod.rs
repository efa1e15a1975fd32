//! TruckersMP integration and API client.
//!
//! This module provides integration with the public TruckersMP API: server status
//! and player profiles.
//!
//! # Modules
//!
//! - `requester` - HTTP client for making API requests to the TruckersMP API
//! - `response_structs` - Internal data structures for API responses
//! - `structs` - Public data structures representing servers and player profiles
//! - `lookup` - Player lookup, profile plus avatar
//! - `status` - Server status reporting
//!
//! # Examples
//!
//! ```no_run
//! use convoy::truckersmp::{PlayerLookupService, TruckersMpRequester};
//!
//! let requester = TruckersMpRequester::new("https://api.truckersmp.com/v2");
//! let lookup_service = PlayerLookupService::new(requester);
//! // let profile = lookup_service.lookup("Alice").await?;
//! ```

mod lookup;
mod requester;
mod response_structs;
mod status;
mod structs;

use thiserror::Error;

pub use crate::truckersmp::lookup::PlayerLookupService;
#[cfg(test)]
pub use crate::truckersmp::requester::MockRequester;
pub use crate::truckersmp::requester::{Requester, TruckersMpRequester};
#[cfg(test)]
pub use crate::truckersmp::response_structs::{PlayerResponse, ServerResponse, VtcResponse};
pub use crate::truckersmp::status::ServerStatusReporter;
pub use crate::truckersmp::structs::{Avatar, PlayerProfile, ServerStatus};
#[cfg(test)]
pub use crate::truckersmp::structs::Vtc;

/// Errors raised by a single request to the TruckersMP API or the avatar host.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The remote answered with an unexpected HTTP status.
    #[error("unexpected status {0}")]
    Status(u16),
    /// Transport failure or undecodable body.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors raised by a player lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The API doesn't know this player. Expected, not logged as an error.
    #[error("player not found")]
    NotFound,
    #[error("player request failed: {0}")]
    Request(#[from] RequestError),
}
