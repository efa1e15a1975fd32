//! Matrix client login, session restoration and secret recovery.
//!
//! The first start logs in with the password and persists the session. Later starts
//! restore it from the session directory. In both cases the encryption secrets are
//! recovered from the server-side secret storage with the passphrase, so the bot can
//! read and answer in encrypted rooms.

use anyhow::{Context, bail};
use log::{debug, info, warn};
use matrix_sdk::{
    Client,
    encryption::{
        BackupDownloadStrategy, EncryptionSettings,
        recovery::{RecoveryError, RecoveryState},
    },
    ruma::OwnedUserId,
};

use crate::matrix::{UserCredentials, session::MatrixSession};

/// Device name shown in the session list of the bot account.
const DEVICE_DISPLAY_NAME: &str = "convoy bot";

async fn build_client(
    user_credentials: &UserCredentials,
    matrix_session: &MatrixSession,
) -> Result<Client, anyhow::Error> {
    let user_id: OwnedUserId = user_credentials.user_id.as_str().try_into()?;

    let client = Client::builder()
        .server_name(user_id.server_name())
        .sqlite_store(
            matrix_session.sqlite_path(),
            Some(&user_credentials.passphrase),
        )
        .with_encryption_settings(EncryptionSettings {
            auto_enable_cross_signing: true,
            backup_download_strategy: BackupDownloadStrategy::AfterDecryptionFailure,
            auto_enable_backups: true,
        })
        .build()
        .await?;

    debug!("matrix client created");

    Ok(client)
}

async fn login(
    client: &Client,
    user_credentials: &UserCredentials,
    matrix_session: &MatrixSession,
) -> Result<(), anyhow::Error> {
    info!("logging in as {}", user_credentials.user_id);

    client
        .matrix_auth()
        .login_username(&user_credentials.user_id, &user_credentials.password)
        .initial_device_display_name(DEVICE_DISPLAY_NAME)
        .send()
        .await?;

    let user_session = client
        .matrix_auth()
        .session()
        .context("no session after login")?;
    matrix_session
        .persist_user_session(&user_session)
        .await
        .context("failed to persist user session")?;

    Ok(())
}

async fn restore(client: &Client, matrix_session: &MatrixSession) -> Result<(), anyhow::Error> {
    info!("restoring matrix session from disk");

    let Some(user_session) = matrix_session.user_session() else {
        bail!("no session to restore");
    };
    client.restore_session(user_session.clone()).await?;

    Ok(())
}

/// Sets up the secret storage if the account has none yet.
async fn enable_recovery(client: &Client, passphrase: &str) -> Result<(), anyhow::Error> {
    let recovery = client.encryption().recovery();
    if recovery.state() != RecoveryState::Disabled {
        return Ok(());
    }

    debug!("enabling recovery");
    match recovery.enable().with_passphrase(passphrase).await {
        Ok(_) => info!("recovery enabled"),
        Err(RecoveryError::BackupExistsOnServer) => debug!("recovery already enabled"),
        Err(e) => bail!("error enabling recovery: {:?}", e),
    }

    Ok(())
}

/// Recovers the encryption secrets.
///
/// A failure only prevents the bot from reading encrypted rooms, it is logged and
/// the bot keeps running.
async fn recover_secrets(client: &Client, passphrase: &str) {
    if let Err(e) = enable_recovery(client, passphrase).await {
        warn!("{}", e);
    }

    match client.encryption().recovery().recover(passphrase).await {
        Ok(_) => info!("encryption secrets recovered"),
        Err(e) => warn!("failed to recover encryption secrets: {:?}", e),
    }
}

/// Creates a logged in client, restoring the persisted session when there is one.
pub async fn setup_client(
    user_credentials: &UserCredentials,
    matrix_session: &MatrixSession,
) -> Result<Client, anyhow::Error> {
    info!(
        "setting up matrix client for user {}",
        user_credentials.user_id
    );

    let client = build_client(user_credentials, matrix_session).await?;

    if matrix_session.has_session() {
        restore(&client, matrix_session).await?;
    } else {
        login(&client, user_credentials, matrix_session).await?;
    }

    recover_secrets(&client, &user_credentials.passphrase).await;

    info!("matrix client setup complete");

    Ok(client)
}
