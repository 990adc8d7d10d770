//! Swarm Board CLI: the main entry point.
//!
//! Commands:
//! - `onboard`   Write a default config file
//! - `chat`      Interactive chat or single-question mode
//! - `knowledge` List, add or delete knowledge records (admin)
//! - `key`       Set the shared API key (admin) or show whether one is set
//! - `history`   Clear the stored chat history
//! - `status`    Show connection and data status

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "swarmboard",
    about = "Swarm Board: ask questions about the project's knowledge base",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration file
    Onboard,

    /// Chat with the Swarm Board assistant
    Chat {
        /// Ask a single question instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Manage knowledge records
    Knowledge {
        #[command(subcommand)]
        action: KnowledgeAction,
    },

    /// Manage the shared API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Manage the local chat history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Show system status
    Status,
}

#[derive(Subcommand)]
enum KnowledgeAction {
    /// List records, newest first
    List,

    /// Add a record
    Add {
        /// General, Roadmap, Team or Technical
        #[arg(short, long, default_value = "General")]
        category: String,

        #[arg(short, long)]
        title: String,

        #[arg(short = 'b', long)]
        content: String,

        /// Admin password
        #[arg(short, long)]
        password: String,
    },

    /// Delete a record by id
    Delete {
        id: String,

        /// Admin password
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum KeyAction {
    /// Save the shared API key
    Set {
        key: String,

        /// Admin password
        #[arg(short, long)]
        password: String,
    },

    /// Show whether a key is configured
    Status,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// Delete the stored conversation
    Clear,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Chat { message } => commands::chat::run(message).await?,
        Commands::Knowledge { action } => match action {
            KnowledgeAction::List => commands::knowledge::list().await?,
            KnowledgeAction::Add {
                category,
                title,
                content,
                password,
            } => commands::knowledge::add(&category, &title, &content, &password).await?,
            KnowledgeAction::Delete { id, password } => {
                commands::knowledge::delete(&id, &password).await?
            }
        },
        Commands::Key { action } => match action {
            KeyAction::Set { key, password } => commands::key::set(&key, &password).await?,
            KeyAction::Status => commands::key::status().await?,
        },
        Commands::History { action } => match action {
            HistoryAction::Clear => commands::history::clear().await?,
        },
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}
