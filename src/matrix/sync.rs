//! Matrix client synchronization and event handling.
//!
//! This module provides the [`MatrixSync`] struct for managing the Matrix client's
//! synchronization loop and handling real-time events from the homeserver.
//!
//! # Overview
//!
//! The [`MatrixSync::sync`] method:
//! 1. Performs an initial sync to catch up on offline events (especially invites)
//! 2. Sets up event handlers for auto-joining rooms and message processing
//! 3. Enters a continuous sync loop with automatic token persistence
//!
//! Messages received before the initial sync are never handled, so a restart doesn't
//! answer old commands again. Only text messages that mention the bot, by user id or by
//! display name, are handed over, with the mention removed.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info, warn};
use matrix_sdk::{
    Client, LoopCtrl, Room, RoomState,
    config::SyncSettings,
    ruma::{
        RoomId, UserId,
        api::client::filter::FilterDefinition,
        events::room::{
            member::StrippedRoomMemberEvent,
            message::{MessageType, OriginalSyncRoomMessageEvent},
        },
    },
};
use tokio::time::{Duration, sleep};

use crate::matrix::{DISPLAY_NAME, IncomingMessage, session::MatrixSession};

/// Longest wait between two attempts to join a room, in seconds.
const MAX_JOIN_DELAY: u64 = 3600;

pub struct MatrixSync {
    client: Client,
    session: MatrixSession,
}

impl MatrixSync {
    pub fn new(client: &Client, session: &MatrixSession) -> Self {
        MatrixSync {
            client: client.to_owned(),
            session: session.to_owned(),
        }
    }

    /// Syncs forever, calling `on_message` for every new text message addressed to the bot.
    pub async fn sync<F>(&self, on_message: F) -> Result<()>
    where
        F: Fn(IncomingMessage) + Send + Sync + 'static,
    {
        info!("start syncing");

        self.client.add_event_handler(auto_join_rooms);

        // Enable room members lazy-loading
        // See <https://spec.matrix.org/v1.6/client-server-api/#lazy-loading-room-members>.
        let filter = FilterDefinition::with_lazy_loading();
        let mut sync_settings = SyncSettings::default().filter(filter.into());

        if let Some(sync_token) = self.session.sync_token() {
            sync_settings = sync_settings.token(sync_token);
        }

        // Catch up with what happened while offline, invites included
        loop {
            match self.client.sync_once(sync_settings.clone()).await {
                Ok(response) => {
                    self.persist_sync_token(&response.next_batch).await;
                    sync_settings = sync_settings.token(response.next_batch);
                    break;
                }
                Err(e) => {
                    error!("initial sync failed, trying again: {}", e);
                    sleep(Duration::from_secs(1)).await;
                }
            }
        }

        // Only new messages from here, the initial sync is already behind us
        let on_message = Arc::new(on_message);
        self.client.add_event_handler(
            move |event: OriginalSyncRoomMessageEvent, room: Room, client: Client| {
                let on_message = Arc::clone(&on_message);
                async move { on_room_message(event, room, client, &*on_message) }
            },
        );

        self.client
            .sync_with_result_callback(sync_settings, |sync_result| async move {
                let response = sync_result?;
                self.persist_sync_token(&response.next_batch).await;

                Ok(LoopCtrl::Continue)
            })
            .await?;

        Ok(())
    }

    async fn persist_sync_token(&self, sync_token: &str) {
        if let Err(e) = self.session.persist_sync_token(sync_token.to_owned()).await {
            error!("failed to persist sync token: {:?}", e);
        }
    }
}

async fn auto_join_rooms(room_member: StrippedRoomMemberEvent, client: Client, room: Room) {
    let Some(user_id) = client.user_id() else {
        warn!("could not get user id from client");
        return;
    };

    if room_member.state_key != user_id {
        return;
    }

    tokio::spawn(async move {
        info!("auto joining room {}", room.room_id());
        let mut delay = 2;

        // Synapse can send the invite before the room is joinable
        // See <https://github.com/matrix-org/synapse/issues/4345>
        while let Err(e) = room.join().await {
            if delay > MAX_JOIN_DELAY {
                error!("giving up joining room {}: {:?}", room.room_id(), e);
                return;
            }

            warn!(
                "failed to join room {} ({:?}), retrying in {}s",
                room.room_id(),
                e,
                delay
            );
            sleep(Duration::from_secs(delay)).await;
            delay *= 2;
        }

        info!("joined room {}", room.room_id());
    });
}

fn on_room_message<F>(
    event: OriginalSyncRoomMessageEvent,
    room: Room,
    client: Client,
    on_message: &F,
) where
    F: Fn(IncomingMessage),
{
    let Some(own_user_id) = client.user_id() else {
        warn!("could not get user id from client");
        return;
    };

    if let Some(message) = to_incoming(own_user_id, room.room_id(), room.state(), event) {
        on_message(message);
    }
}

/// Keeps the text messages of other users that address the bot in a joined room.
fn to_incoming(
    own_user_id: &UserId,
    room_id: &RoomId,
    room_state: RoomState,
    event: OriginalSyncRoomMessageEvent,
) -> Option<IncomingMessage> {
    if room_state != RoomState::Joined {
        return None;
    }

    // Never answer ourselves
    if &*event.sender == own_user_id {
        debug!("ignoring own message {}", event.event_id);
        return None;
    }

    let mentioned = event
        .content
        .mentions
        .as_ref()
        .is_some_and(|mentions| mentions.user_ids.contains(own_user_id));

    let MessageType::Text(text_content) = event.content.msgtype else {
        return None;
    };

    let Some(body) = addressed_body(&text_content.body, own_user_id.as_str(), mentioned) else {
        debug!("message {} is not addressed to the bot", event.event_id);
        return None;
    };

    Some(IncomingMessage {
        body,
        room_id: room_id.to_string(),
        sender_id: event.sender.to_string(),
        event_id: event.event_id.to_string(),
    })
}

/// Returns `body` without the mention of the bot, `None` if the bot isn't addressed.
///
/// Clients write the user id or the display name in the body, often followed by a colon.
/// A mention only carried by the event metadata keeps the body as is.
fn addressed_body(body: &str, own_user_id: &str, mentioned: bool) -> Option<String> {
    let lowercase_body = body.to_ascii_lowercase();
    let mention = [own_user_id, DISPLAY_NAME].into_iter().find_map(|name| {
        lowercase_body
            .find(&name.to_ascii_lowercase())
            .map(|index| (index, name.len()))
    });

    match mention {
        Some((index, len)) => {
            let before = body[..index].trim_end_matches('@');
            let after = body[index + len..].trim_start_matches([':', ',', '：', '，']);
            Some(format!("{}{}", before, after).trim().to_owned())
        }
        None if mentioned => Some(body.trim().to_owned()),
        None => None,
    }
}
