use std::path::Path;

use anyhow::{Context, Result};
use chatdeck_chats::{
    AddParticipantToChatInput, ChatType, CreateChatInput, CreateMessageInput,
    CreateParticipantInput, MessageRole,
};
use chatdeck_config::AppConfig;
use chatdeck_runtime::BackendServices;
use tempfile::TempDir;

fn sqlite_url(path: &Path) -> String {
    format!("sqlite://{}", path.to_string_lossy())
}

fn build_config(database_url: String, max_connections: u32) -> AppConfig {
    let mut config = AppConfig::default();
    config.database.url = database_url;
    config.database.max_connections = max_connections;
    config
}

async fn initialise(config: &AppConfig) -> Result<BackendServices> {
    BackendServices::initialise(config)
        .await
        .context("failed to initialise backend services")
}

#[tokio::test(flavor = "multi_thread")]
async fn initialise_runs_migrations_in_nested_directory() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("runtime/init.db");
    let config = build_config(sqlite_url(&db_path), 4);

    let services = initialise(&config).await?;
    assert!(db_path.exists());
    assert!(services.chat_service.get_chats().await?.is_empty());
    assert!(services.participant_service.get_participants().await?.is_empty());

    services.db.close().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn initialise_reports_unusable_database_path() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, b"file, not directory")?;

    let config = build_config(sqlite_url(&blocker.join("chatdeck.db")), 1);
    let error = match BackendServices::initialise(&config).await {
        Ok(_) => panic!("expected initialisation to fail under a regular file"),
        Err(error) => error,
    };

    let message = format!("{error:?}");
    assert!(
        message.contains("failed to open database"),
        "expected database context, got {message}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn services_share_one_store() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = build_config(sqlite_url(&temp_dir.path().join("shared.db")), 2);
    let services = initialise(&config).await?;

    let chat = services
        .chat_service
        .create_chat(CreateChatInput {
            title: "Shared".into(),
            chat_type: ChatType::GroupChat,
        })
        .await?;
    let participant = services
        .participant_service
        .create_participant(CreateParticipantInput::named("Runner"))
        .await?;
    services
        .membership_service
        .add_participant_to_chat(AddParticipantToChatInput {
            chat_id: chat.id,
            participant_id: participant.id,
        })
        .await?;
    services
        .message_service
        .create_message(CreateMessageInput {
            chat_id: chat.id,
            content: "ready".into(),
            role: MessageRole::System,
            participant_id: Some(participant.id),
        })
        .await?;

    let summary = services.chat_service.delete_chat(chat.id).await?;
    assert_eq!(summary.messages_removed, 1);
    assert_eq!(summary.memberships_removed, 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn reopening_keeps_existing_data() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = build_config(sqlite_url(&temp_dir.path().join("reopen.db")), 2);

    let first = initialise(&config).await?;
    first
        .participant_service
        .create_participant(CreateParticipantInput::named("Persisted"))
        .await?;
    first.db.close().await;

    let second = initialise(&config).await?;
    let participants = second.participant_service.get_participants().await?;
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0].name, "Persisted");
    Ok(())
}
