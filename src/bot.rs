//! Bot module connecting Matrix with the command pipeline.
//!
//! This module provides the main [`Bot`] implementation that connects a Matrix client
//! with the TruckersMP services and the binding store.
//!
//! # Message Flow
//!
//! ```text
//! Matrix Message → Parse Command → Execute → Responder (reply text, then image)
//! ```
//!
//! Every message is handled in its own task, so a slow TruckersMP request never holds
//! back the other rooms. Messages that are not for the bot get no answer.
//!
//! The host platform is only reached through the [`Responder`] trait, which keeps the
//! message handling testable without a homeserver.
//!
//! # Example
//!
//! ```no_run
//! # use convoy::bot::Bot;
//! # use convoy::config::Config;
//! # use convoy::Args;
//! # async fn run() -> Result<(), anyhow::Error> {
//! let config = Config::load("config.yaml")?;
//! let args = Args::parse();
//!
//! let bot = Bot::new(config, args).await?;
//! bot.start().await; // Runs indefinitely
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use log::{debug, error};
use mockall::automock;

use crate::{
    Args,
    bindings::BindingStore,
    commands::{CommandContext, Commander},
    config::Config,
    matrix::{IncomingMessage, MatrixClient, UserCredentials},
    truckersmp::{
        Avatar, PlayerLookupService, Requester, ServerStatusReporter, TruckersMpRequester,
    },
};

/// Sends the answer of a command back to where the command came from.
#[automock]
pub trait Responder {
    /// Sends `text`, then `image` when there is one.
    async fn reply(&self, text: &str, image: Option<Avatar>);
}

/// Replies in the room of a Matrix message, as a reply to that message.
pub struct MatrixResponder {
    matrix_client: Arc<MatrixClient>,
    message: IncomingMessage,
}

impl Responder for MatrixResponder {
    async fn reply(&self, text: &str, image: Option<Avatar>) {
        let IncomingMessage {
            room_id,
            sender_id,
            event_id,
            ..
        } = &self.message;

        if let Err(e) = self
            .matrix_client
            .send_reply(room_id, sender_id, event_id, text)
            .await
        {
            error!("failed to send reply in {}: {:?}", room_id, e);
            return;
        }

        if let Some(image) = image
            && let Err(e) = self.matrix_client.send_image(room_id, image).await
        {
            error!("failed to send image in {}: {:?}", room_id, e);
        }
    }
}

/// Parses one message, executes the command and hands the result to `responder`.
pub async fn handle_message<R: Requester, S: Responder>(
    commander: &Commander<R>,
    responder: &S,
    sender_id: &str,
    body: &str,
) {
    let Some(command) = commander.parse(body) else {
        return;
    };

    let context = CommandContext {
        user_id: sender_id.to_owned(),
    };
    let Some(result) = commander.execute(&command, &context).await else {
        debug!("no result for command {:?}", command);
        return;
    };

    responder.reply(&result.response, result.image).await;
}

/// Main bot structure that integrates Matrix messaging with the TruckersMP API.
///
/// Shared state is wrapped in `Arc` so every message task can borrow it. The binding
/// store inside the commander serializes its own mutations.
pub struct Bot {
    /// Matrix client for sending messages and receiving commands
    matrix_client: Arc<MatrixClient>,
    /// Command parser and executor, owns the services and the binding store
    commander: Arc<Commander<TruckersMpRequester>>,
}

impl Bot {
    /// Creates the bot: logs into Matrix and loads the bindings of the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the Matrix client cannot be set up.
    pub async fn new(config: Config, args: Args) -> Result<Self, anyhow::Error> {
        let requester = TruckersMpRequester::new(&config.truckersmp.url);

        let matrix_client = Arc::new(
            MatrixClient::new(
                &UserCredentials {
                    user_id: config.matrix.user_id,
                    password: config.matrix.password,
                    passphrase: config.matrix.passphrase,
                },
                &args.data.join("session"),
            )
            .await?,
        );

        let binding_store = BindingStore::load(args.data.join("bindings")).await;

        let commander = Arc::new(Commander::new(
            PlayerLookupService::new(requester.clone()),
            ServerStatusReporter::new(requester),
            binding_store,
        ));

        Ok(Bot {
            matrix_client,
            commander,
        })
    }

    /// Starts the Matrix sync loop, runs until the sync fails.
    pub async fn start(self) {
        let matrix_client = Arc::clone(&self.matrix_client);
        let commander = Arc::clone(&self.commander);

        let on_message = move |message: IncomingMessage| {
            Self::spawn_message_handler(Arc::clone(&matrix_client), Arc::clone(&commander), message)
        };

        self.matrix_client.sync(on_message).await;
    }

    fn spawn_message_handler(
        matrix_client: Arc<MatrixClient>,
        commander: Arc<Commander<TruckersMpRequester>>,
        message: IncomingMessage,
    ) {
        tokio::spawn(async move {
            let body = message.body.clone();
            let sender_id = message.sender_id.clone();
            let responder = MatrixResponder {
                matrix_client,
                message,
            };

            handle_message(&commander, &responder, &sender_id, &body).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::truckersmp::{MockRequester, PlayerResponse, RequestError, ServerResponse};

    async fn create_commander(
        requester: MockRequester,
        temp_file: &NamedTempFile,
    ) -> Commander<MockRequester> {
        // Player requests go to `requester`, the status reporter answers one server
        let mut status_requester = MockRequester::new();
        status_requester.expect_get_servers().returning(|| {
            Ok(vec![ServerResponse {
                name: "Simulation 1".to_string(),
                players: 1,
                maxplayers: 2,
                queue: 3,
                speedlimiter: false,
                collisions: false,
            }])
        });

        Commander::new(
            PlayerLookupService::new(requester),
            ServerStatusReporter::new(status_requester),
            BindingStore::load(temp_file.path()).await,
        )
    }

    fn create_player_response(name: &str) -> PlayerResponse {
        PlayerResponse {
            id: 1,
            name: name.to_string(),
            avatar: "https://static.truckersmp.com/avatars/1.png".to_string(),
            is_game_admin: false,
            join_date: "2020-01-01 00:00:00".to_string(),
            banned: true,
            ban_expire: Some("2030-01-01 00:00:00".to_string()),
            bans_count: Some(2),
            online: true,
            steam_id64: "76561198000000001".to_string(),
            steam_id: "76561198000000001".to_string(),
            vtc: None,
        }
    }

    #[tokio::test]
    async fn test_message_not_for_bot_gets_no_reply() {
        let temp_file = NamedTempFile::new().unwrap();
        let commander = create_commander(MockRequester::new(), &temp_file).await;
        let mut responder = MockResponder::new();
        responder.expect_reply().times(0);

        handle_message(&commander, &responder, "@user:example.com", "晚上一起跑车").await;
    }

    #[tokio::test]
    async fn test_status_message() {
        let temp_file = NamedTempFile::new().unwrap();
        let commander = create_commander(MockRequester::new(), &temp_file).await;
        let mut responder = MockResponder::new();
        responder
            .expect_reply()
            .withf(|text, image| {
                text.starts_with("TruckersMP 服务器状态：") && text.contains("1/2，等待人数: 3")
                    && image.is_none()
            })
            .times(1)
            .return_const(());

        handle_message(&commander, &responder, "@user:example.com", "  服务器状态  ").await;
    }

    #[tokio::test]
    async fn test_query_without_binding_prompts_without_request() {
        let temp_file = NamedTempFile::new().unwrap();
        // No expectation: a request would fail the test
        let commander = create_commander(MockRequester::new(), &temp_file).await;
        let mut responder = MockResponder::new();
        responder
            .expect_reply()
            .with(eq("请输入要查询的玩家名称"), eq(None::<Avatar>))
            .times(1)
            .return_const(());

        handle_message(&commander, &responder, "@user:example.com", "查询").await;
    }

    #[tokio::test]
    async fn test_query_replies_with_avatar() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut requester = MockRequester::new();
        requester
            .expect_get_player()
            .with(eq("Alice"))
            .returning(|name| Ok(Some(create_player_response(name))));
        requester.expect_get_avatar().returning(|_| {
            Ok(Avatar {
                bytes: vec![0x89, 0x50, 0x4e, 0x47],
                content_type: mime::IMAGE_PNG,
            })
        });
        let commander = create_commander(requester, &temp_file).await;
        let mut responder = MockResponder::new();
        responder
            .expect_reply()
            .withf(|text, image| {
                text.contains("封禁时间: 2030-01-01 00:00:00\n封禁次数: 2")
                    && image.as_ref().map(|image| image.bytes.len()) == Some(4)
            })
            .times(1)
            .return_const(());

        handle_message(&commander, &responder, "@user:example.com", "查询 Alice").await;
    }

    #[tokio::test]
    async fn test_query_api_error_replies_retry_message() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut requester = MockRequester::new();
        requester
            .expect_get_player()
            .returning(|_| Err(RequestError::Status(502)));
        let commander = create_commander(requester, &temp_file).await;
        let mut responder = MockResponder::new();
        responder
            .expect_reply()
            .with(eq("处理查询时出错，请稍后重试"), eq(None::<Avatar>))
            .times(1)
            .return_const(());

        handle_message(&commander, &responder, "@user:example.com", "查询 Alice").await;
    }

    #[tokio::test]
    async fn test_bind_then_query_by_same_user() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut requester = MockRequester::new();
        requester
            .expect_get_player()
            .with(eq("Alice"))
            .times(1)
            .returning(|_| Ok(None));
        let commander = create_commander(requester, &temp_file).await;
        let mut responder = MockResponder::new();
        responder
            .expect_reply()
            .with(eq("已将玩家Alice绑定到您的账号"), eq(None::<Avatar>))
            .times(1)
            .return_const(());
        responder
            .expect_reply()
            .with(eq("未找到玩家Alice，请检查玩家名称"), eq(None::<Avatar>))
            .times(1)
            .return_const(());

        handle_message(&commander, &responder, "@user:example.com", "绑定 Alice").await;
        handle_message(&commander, &responder, "@user:example.com", "查询").await;
    }
}
