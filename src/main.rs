//! Convoy - A Matrix bot for TruckersMP players.
//!
//! Convoy answers chat commands in Matrix rooms with data from the public TruckersMP
//! API: the live status of the servers and player profiles. Users can bind their
//! player name once and query it without typing it again.
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings:
//!
//! ```yaml
//! truckersmp:
//!   url: "https://api.truckersmp.com/v2"
//!
//! matrix:
//!   user_id: "@convoy:matrix.org"
//!   password: "your-password"
//!   passphrase: "your-recovery-passphrase"
//! ```
//!
//! The `truckersmp` section is optional. Any value can be overridden with a `CONVOY_`
//! prefixed environment variable:
//!
//! ```bash
//! export CONVOY_MATRIX__USER_ID="@convoy:matrix.org"
//! export CONVOY_MATRIX__PASSWORD="your-password"
//! export CONVOY_MATRIX__PASSPHRASE="your-passphrase"
//! ```
//!
//! # Usage
//!
//! ```bash
//! convoy --config config.yaml --data ./convoy-data
//! ```
//!
//! # Bot Commands
//!
//! Commands are only read in messages mentioning the bot, e.g. `Convoy: 服务器状态`.
//!
//! - `服务器状态` - Status of every TruckersMP server
//! - `查询 <player_name>` - Player profile, the name can be omitted once bound
//! - `绑定 <player_name>` - Bind a player name to your account
//! - `解除绑定` - Remove your binding
//! - `删除个人数据` - Delete the data kept for you
//! - `帮助` - Display help information
//!
//! # Architecture
//!
//! - [`bindings`] - Player names bound by users and their persistence
//! - [`bot`] - Main bot logic connecting Matrix with the command pipeline
//! - [`commands`] - Command parsing, execution and response formatting
//! - [`config`] - YAML configuration loading with environment variable support
//! - [`matrix`] - Matrix client integration and session management
//! - [`truckersmp`] - TruckersMP API client, player lookup and server status
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod bindings;
mod bot;
mod commands;
mod config;
mod matrix;
mod truckersmp;

/// Command-line arguments for the Convoy bot.
///
/// Most configuration is done through the YAML file (see [`config::Config`]).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    #[arg(short, long)]
    config: String,

    /// Path to the directory for storing persistent data.
    ///
    /// This directory will contain:
    /// - `session/` - Matrix session data (authentication tokens, encryption keys)
    /// - `bindings` - JSON file with the player names bound by users
    ///
    /// It holds the tokens of the bot account, keep it private.
    #[arg(short, long)]
    data: PathBuf,
}

#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting convoy {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    let bot = match Bot::new(config, args).await {
        Ok(bot) => bot,
        Err(e) => {
            error!("Failed to initialize bot: {:?}", e);
            return;
        }
    };
    bot.start().await;
}
