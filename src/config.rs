//! Configuration file structures for the Convoy bot.
//!
//! The configuration is split into two sections: TruckersMP API settings and Matrix
//! account settings.
//!
//! # Configuration File Format
//!
//! ```yaml
//! # TruckersMP API, optional
//! truckersmp:
//!   # Base URL of the API
//!   url: "https://api.truckersmp.com/v2"
//!
//! # Matrix account of the bot
//! matrix:
//!   # Fully qualified Matrix user ID
//!   user_id: "@convoy:matrix.org"
//!   # Matrix account password
//!   password: "secret-password"
//!   # Passphrase of the local store and of the E2EE secret storage
//!   passphrase: "recovery-passphrase"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Every value can be overridden with a `CONVOY_` prefixed variable, sections are
//! separated by `__`:
//!
//! ```bash
//! export CONVOY_MATRIX__PASSWORD="secret-from-env"
//! ```

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Public TruckersMP API.
pub const DEFAULT_TRUCKERSMP_URL: &str = "https://api.truckersmp.com/v2";

#[derive(Deserialize, Debug)]
pub struct Config {
    #[serde(default)]
    pub truckersmp: TruckersMp,
    pub matrix: Matrix,
}

#[derive(Deserialize, Debug)]
pub struct TruckersMp {
    /// Base URL of the API
    #[serde(default = "default_truckersmp_url")]
    pub url: String,
}

impl Default for TruckersMp {
    fn default() -> Self {
        TruckersMp {
            url: default_truckersmp_url(),
        }
    }
}

fn default_truckersmp_url() -> String {
    DEFAULT_TRUCKERSMP_URL.to_owned()
}

#[derive(Deserialize, Debug)]
pub struct Matrix {
    pub user_id: String,

    pub password: String,

    pub passphrase: String,
}

impl Config {
    /// Loads the YAML file at `path`, then applies the `CONVOY_` environment overrides.
    pub fn load(path: &str) -> Result<Config, figment::Error> {
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("CONVOY_").split("__"))
            .extract()
    }
}
