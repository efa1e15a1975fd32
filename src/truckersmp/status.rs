//! Server status reporting.

use log::{debug, info};

use crate::truckersmp::{RequestError, requester::Requester, structs::ServerStatus};

/// Fetches the live state of every TruckersMP server.
///
/// Nothing is cached, each report issues a fresh request.
pub struct ServerStatusReporter<R: Requester> {
    /// TruckersMP requester to interact with the API
    requester: R,
}

impl<R: Requester> ServerStatusReporter<R> {
    /// Create a new [ServerStatusReporter].
    pub fn new(requester: R) -> Self {
        ServerStatusReporter { requester }
    }

    /// Returns the servers in the order sent by the API.
    pub async fn report(&self) -> Result<Vec<ServerStatus>, RequestError> {
        let servers: Vec<ServerStatus> = self
            .requester
            .get_servers()
            .await?
            .into_iter()
            .map(ServerStatus::from)
            .collect();

        info!("fetched status of {} servers", servers.len());
        debug!("servers {:?}", servers);

        Ok(servers)
    }
}
