use anyhow::Context;
use chatdeck_chats::{
    AddParticipantToChatInput, ChatType, CreateChatInput, CreateMessageInput,
    CreateParticipantInput, MessageRole,
};
use chatdeck_config::load as load_config;
use chatdeck_gateway::{create_router, GatewayState};
use chatdeck_runtime::{telemetry, BackendServices};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "chatdeck-backend")]
#[command(about = "Chatdeck backend (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Print chats with message and participant counts, then the participant registry
    DumpData,
    /// Delete every chat along with its messages and memberships
    ClearData,
    /// Create one chat of each type with a few participants and messages
    SeedData,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;
    let config = load_config().context("failed to load configuration")?;
    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(&config, &services).await,
        Commands::DumpData => dump_data(&services).await,
        Commands::ClearData => {
            let report = clear_data(&services).await?;
            println!("Database cleared:");
            println!("- {} chats deleted", report.chats);
            println!("- {} messages deleted", report.messages);
            println!("- {} memberships deleted", report.memberships);
            Ok(())
        }
        Commands::SeedData => {
            let report = seed_data(&services).await?;
            println!("Database seeded with test data:");
            println!("- {} chats created", report.chats);
            println!("- {} participants created", report.participants);
            println!("- {} messages created", report.messages);
            println!("Run 'dump-data' to see the inserted data");
            Ok(())
        }
    }
}

async fn run_server(
    config: &chatdeck_config::AppConfig,
    services: &BackendServices,
) -> anyhow::Result<()> {
    info!("starting Chatdeck backend");

    let state = GatewayState::with_services(
        services.chat_service.clone(),
        services.message_service.clone(),
        services.participant_service.clone(),
        services.membership_service.clone(),
    );
    let app = create_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(chatdeck_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

async fn dump_data(services: &BackendServices) -> anyhow::Result<()> {
    let chats = services
        .chat_service
        .get_chats()
        .await
        .context("failed to fetch chats")?;

    println!("=== CHATS ===");
    if chats.is_empty() {
        println!("No chats found in database");
    } else {
        println!("Found {} chats:", chats.len());
        println!(
            "{:<5} {:<30} {:<14} {:<10} {:<13} {:<28}",
            "ID", "Title", "Type", "Messages", "Participants", "Updated At"
        );
        println!("{}", "-".repeat(105));

        for chat in chats {
            let messages = services
                .message_service
                .count_messages(chat.id)
                .await
                .context("failed to count messages")?;
            let participants = services
                .membership_service
                .get_chat_participants(chat.id)
                .await
                .context("failed to fetch chat participants")?;

            println!(
                "{:<5} {:<30} {:<14} {:<10} {:<13} {:<28}",
                chat.id,
                truncate(&chat.title, 30),
                chat.chat_type.as_str(),
                messages,
                participants.len(),
                chat.updated_at.to_rfc3339()
            );
        }
    }

    println!("\n=== PARTICIPANTS ===");
    let participants = services
        .participant_service
        .get_participants()
        .await
        .context("failed to fetch participants")?;

    if participants.is_empty() {
        println!("No participants found in database");
    } else {
        println!("Found {} participants:", participants.len());
        println!("{:<5} {:<25} {:<40}", "ID", "Name", "Description");
        println!("{}", "-".repeat(70));

        for participant in participants {
            println!(
                "{:<5} {:<25} {:<40}",
                participant.id,
                truncate(&participant.name, 25),
                participant.description.as_deref().unwrap_or("NULL")
            );
        }
    }

    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct ClearReport {
    chats: u64,
    messages: u64,
    memberships: u64,
}

async fn clear_data(services: &BackendServices) -> anyhow::Result<ClearReport> {
    info!("clearing all chats from database");

    let mut report = ClearReport::default();
    for chat in services.chat_service.get_chats().await? {
        let deleted = services
            .chat_service
            .delete_chat(chat.id)
            .await
            .with_context(|| format!("failed to delete chat {}", chat.id))?;

        report.chats += u64::from(deleted.chat_existed);
        report.messages += deleted.messages_removed;
        report.memberships += deleted.memberships_removed;
    }

    Ok(report)
}

#[derive(Debug, Default, PartialEq, Eq)]
struct SeedReport {
    chats: usize,
    participants: usize,
    messages: usize,
}

async fn seed_data(services: &BackendServices) -> anyhow::Result<SeedReport> {
    info!("seeding database with test data");

    let mut report = SeedReport::default();
    let answer_chat = seed_chat(services, "Quick Question", ChatType::SmartAnswer).await?;
    let group_chat = seed_chat(services, "Design Review", ChatType::GroupChat).await?;
    seed_chat(services, "Nightly Autopilot", ChatType::Autopilot).await?;
    report.chats = 3;

    let mut participant_ids = Vec::new();
    for (name, description) in [("Ada", "Architect"), ("Linus", "Reviewer")] {
        let participant = services
            .participant_service
            .create_participant(CreateParticipantInput {
                name: name.to_string(),
                avatar_url: None,
                description: Some(description.to_string()),
            })
            .await
            .with_context(|| format!("failed to create participant {name}"))?;

        services
            .membership_service
            .add_participant_to_chat(AddParticipantToChatInput {
                chat_id: group_chat,
                participant_id: participant.id,
            })
            .await
            .with_context(|| format!("failed to add {name} to the group chat"))?;

        participant_ids.push(participant.id);
        report.participants += 1;
    }

    let exchange = [
        (answer_chat, "What's the best way to learn Rust?", MessageRole::User, None),
        (
            answer_chat,
            "Start with the book, then build something small.",
            MessageRole::Assistant,
            None,
        ),
        (group_chat, "Can we review the schema today?", MessageRole::User, participant_ids.first().copied()),
        (group_chat, "Sure, after lunch.", MessageRole::User, participant_ids.get(1).copied()),
    ];

    for (chat_id, content, role, participant_id) in exchange {
        services
            .message_service
            .create_message(CreateMessageInput {
                chat_id,
                content: content.to_string(),
                role,
                participant_id,
            })
            .await
            .with_context(|| format!("failed to create message in chat {chat_id}"))?;
        report.messages += 1;
    }

    Ok(report)
}

async fn seed_chat(
    services: &BackendServices,
    title: &str,
    chat_type: ChatType,
) -> anyhow::Result<i64> {
    let chat = services
        .chat_service
        .create_chat(CreateChatInput {
            title: title.to_string(),
            chat_type,
        })
        .await
        .with_context(|| format!("failed to create chat {title}"))?;
    Ok(chat.id)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}
