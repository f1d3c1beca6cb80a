use std::sync::Arc;

use anyhow::{Context, Result};
use chatdeck_chats::{ChatService, MembershipService, MessageService, ParticipantService};
use chatdeck_config::AppConfig;
use chatdeck_database::{initialize_database, DatabaseConnection};
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    /// Install the global fmt subscriber. `RUST_LOG` overrides the `info`
    /// default.
    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// The opened store and every service built over it
#[derive(Clone)]
pub struct BackendServices {
    pub db: DatabaseConnection,
    pub chat_service: Arc<ChatService>,
    pub message_service: Arc<MessageService>,
    pub participant_service: Arc<ParticipantService>,
    pub membership_service: Arc<MembershipService>,
}

impl BackendServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let db = initialize_database(&config.database)
            .await
            .with_context(|| format!("failed to open database {}", config.database.url))?;

        info!(url = %config.database.url, "database ready");

        Ok(Self {
            chat_service: Arc::new(ChatService::new(db.clone())),
            message_service: Arc::new(MessageService::new(db.clone())),
            participant_service: Arc::new(ParticipantService::new(db.clone())),
            membership_service: Arc::new(MembershipService::new(db.clone())),
            db,
        })
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
