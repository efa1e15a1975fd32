//! Matrix client wrapper for bot messaging and synchronization.
//!
//! This module provides a high-level [`MatrixClient`] interface that wraps the
//! Matrix SDK client and handles message sending, synchronization, and session management.

use std::path::Path;

use anyhow::Context;
use log::{debug, error, info};
use matrix_sdk::{
    Client, Room,
    attachment::AttachmentConfig,
    ruma::{
        EventId, RoomId, UserId,
        events::room::message::{
            AddMentions, ForwardThread, ReplyMetadata, RoomMessageEventContent,
        },
    },
};

use crate::{
    matrix::{
        DISPLAY_NAME, IncomingMessage, UserCredentials, login::setup_client, session::MatrixSession,
        sync::MatrixSync,
    },
    truckersmp::Avatar,
};

pub struct MatrixClient {
    matrix_sync: MatrixSync,
    client: Client,
}

impl MatrixClient {
    /// Logs in, or restores the session kept in `session_path`.
    pub async fn new(
        user_credentials: &UserCredentials,
        session_path: &Path,
    ) -> Result<Self, anyhow::Error> {
        let matrix_session = MatrixSession::open(session_path)
            .await
            .context("failed to open matrix session")?;

        let client = setup_client(user_credentials, &matrix_session)
            .await
            .context("failed to setup matrix client")?;

        client.account().set_display_name(Some(DISPLAY_NAME)).await?;

        let matrix_sync = MatrixSync::new(&client, &matrix_session);

        Ok(MatrixClient {
            matrix_sync,
            client,
        })
    }

    /// Runs the sync loop, only returns when it fails.
    pub async fn sync<F>(&self, on_message: F)
    where
        F: Fn(IncomingMessage) + Send + Sync + 'static,
    {
        match self.matrix_sync.sync(on_message).await {
            Ok(_) => info!("matrix sync ended successfully"),
            Err(e) => error!("matrix sync ended with error: {:?}", e),
        }
    }

    /// Sends `body` as a plain text reply to the event `event_id` of `sender_id`.
    pub async fn send_reply(
        &self,
        room_id: &str,
        sender_id: &str,
        event_id: &str,
        body: &str,
    ) -> Result<(), anyhow::Error> {
        let sender = UserId::parse(sender_id)?;
        let event = EventId::parse(event_id)?;

        let content = RoomMessageEventContent::text_plain(body).make_reply_to(
            ReplyMetadata::new(&event, &sender, None),
            ForwardThread::No,
            AddMentions::No,
        );

        self.get_room(room_id)?.send(content).await?;

        Ok(())
    }

    /// Uploads `image` and sends it to the room.
    pub async fn send_image(&self, room_id: &str, image: Avatar) -> Result<(), anyhow::Error> {
        let filename = format!("avatar.{}", image.content_type.subtype());
        debug!("sending {} ({} bytes)", filename, image.bytes.len());

        self.get_room(room_id)?
            .send_attachment(
                filename,
                &image.content_type,
                image.bytes,
                AttachmentConfig::new(),
            )
            .await?;

        Ok(())
    }

    fn get_room(&self, room_id: &str) -> Result<Room, anyhow::Error> {
        let room_id = RoomId::parse(room_id)?;

        self.client
            .get_room(&room_id)
            .with_context(|| format!("unknown room {}", room_id))
    }
}
