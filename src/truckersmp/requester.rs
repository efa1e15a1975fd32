//! HTTP client for the TruckersMP API.
//!
//! This module provides the [`TruckersMpRequester`] struct for making HTTP requests
//! to the TruckersMP API and to the image host serving player avatars.

use log::{debug, info, warn};
use mockall::automock;
use reqwest::{Client, StatusCode, header::CONTENT_TYPE};

use crate::truckersmp::{
    RequestError,
    response_structs::{PlayerEnvelope, PlayerResponse, ServerResponse, ServersEnvelope},
    structs::Avatar,
};

/// HTTP client for requesting data from the TruckersMP API.
///
/// # Examples
///
/// ```no_run
/// let requester = TruckersMpRequester::new("https://api.truckersmp.com/v2");
/// let servers = requester.get_servers().await.unwrap();
/// println!("Servers: {:?}", servers);
/// ```
#[derive(Clone)]
pub struct TruckersMpRequester {
    /// Base URL of the API, without trailing slash
    url: String,
    /// HTTP client
    client: Client,
}

/// Trait for making requests to the TruckersMP API.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
#[automock]
pub trait Requester {
    /// Fetches the list of game servers.
    async fn get_servers(&self) -> Result<Vec<ServerResponse>, RequestError>;
    /// Fetches a player profile, `None` if the API doesn't know the player.
    async fn get_player(&self, name: &str) -> Result<Option<PlayerResponse>, RequestError>;
    /// Downloads an avatar image.
    async fn get_avatar(&self, avatar_url: &str) -> Result<Avatar, RequestError>;
}

impl TruckersMpRequester {
    /// Create a new [TruckersMpRequester].
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL of the TruckersMP API.
    pub fn new(url: &str) -> Self {
        TruckersMpRequester {
            url: url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }
}

impl Requester for TruckersMpRequester {
    /// Request `/servers` to get the list of servers.
    ///
    /// This api call returns the servers wrapped in a `response` key:
    /// ```json
    /// {
    ///   "error": false,
    ///   "response": [
    ///     { "name": "Simulation 1", "players": 3400, "maxplayers": 4200, "queue": 0, "speedlimiter": 1, "collisions": true }
    ///   ]
    /// }
    /// ```
    async fn get_servers(&self) -> Result<Vec<ServerResponse>, RequestError> {
        let url = format!("{}/servers", &self.url);
        info!("request servers");
        debug!("request {}", &url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Status(status.as_u16()));
        }

        let envelope: ServersEnvelope = response.json().await?;

        debug!("response from {} -> {} servers", &url, envelope.response.len());
        for server in &envelope.response {
            debug!("server {}", server);
        }

        Ok(envelope.response)
    }

    /// Request `/player/{name}` to get a player profile.
    ///
    /// A 404, an envelope without `response` or a body that is not the expected json
    /// all mean that the player is unknown. Any other failing status is an error.
    async fn get_player(&self, name: &str) -> Result<Option<PlayerResponse>, RequestError> {
        let url = format!("{}/player/{}", &self.url, urlencoding::encode(name));
        info!("request player {}", name);
        debug!("request {}", &url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("player {} not found", name);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(RequestError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let envelope: PlayerEnvelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("unexpected player response for {}: {}", name, e);
                return Ok(None);
            }
        };

        match &envelope.response {
            Some(player) => debug!("response from {} -> {}", &url, player),
            None => debug!("player {} not found, no response in envelope", name),
        }

        Ok(envelope.response)
    }

    async fn get_avatar(&self, avatar_url: &str) -> Result<Avatar, RequestError> {
        debug!("request avatar {}", avatar_url);

        let response = self.client.get(avatar_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<mime::Mime>().ok())
            .unwrap_or(mime::IMAGE_JPEG);
        let bytes = response.bytes().await?.to_vec();

        debug!("downloaded avatar {} ({} bytes)", avatar_url, bytes.len());

        Ok(Avatar {
            bytes,
            content_type,
        })
    }
}
