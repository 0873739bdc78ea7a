// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memoria - memory retrieval engine for a conversational memorial service.
//!
//! This is the binary entry point for service administration: searching,
//! ingesting, purging, and batch summarization.

use clap::{Args, Parser, Subcommand};
use memoria::MemoryService;
use memoria_core::OwnerKey;
use memoria_memory::{SourceArtifact, SourceType};
use tracing_subscriber::EnvFilter;

/// Memoria - memory retrieval engine for a conversational memorial service.
#[derive(Parser, Debug)]
#[command(name = "memoria", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Search an owner's memories.
    Search {
        /// Owner key scoping the search.
        #[arg(long)]
        owner: String,
        /// The query text.
        query: String,
        /// Maximum results to return.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Ingest a source artifact into an owner's memories.
    Ingest {
        #[command(subcommand)]
        artifact: IngestCommands,
    },
    /// Remove every memory produced by one source item.
    Purge {
        #[arg(long)]
        owner: String,
        /// Source type: letter, keepsake, or photo.
        #[arg(long)]
        source_type: String,
        /// The item identifier shared by the memories to remove.
        #[arg(long)]
        item_id: String,
    },
    /// Summarize every owner's dialogue for one calendar date.
    Summarize {
        /// Date to summarize (YYYY-MM-DD).
        date: String,
    },
    /// Print the effective configuration.
    Config,
}

/// Artifact kinds accepted by `memoria ingest`.
#[derive(Subcommand, Debug)]
enum IngestCommands {
    Keepsake {
        #[command(flatten)]
        scope: OwnerArg,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        story: String,
        /// Date acquired (YYYY-MM-DD); defaults to today.
        #[arg(long, default_value = "")]
        acquired: String,
    },
    Photo {
        #[command(flatten)]
        scope: OwnerArg,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        date: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Letter {
        #[command(flatten)]
        scope: OwnerArg,
        #[arg(long)]
        text: String,
        #[arg(long, default_value = "")]
        reply: String,
        #[arg(long, default_value = "")]
        date: String,
    },
    /// Ingest an artifact already registered in storage, by id.
    Stored {
        #[command(flatten)]
        scope: OwnerArg,
        /// The stored artifact's id.
        #[arg(long)]
        id: String,
    },
}

#[derive(Args, Debug)]
struct OwnerArg {
    /// Owner key the artifact belongs to.
    #[arg(long)]
    owner: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match memoria_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            memoria_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    if let Some(Commands::Config) = cli.command {
        match toml::to_string_pretty(&config) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => fail(&format!("could not render config: {e}")),
        }
        return;
    }

    let Some(command) = cli.command else {
        println!("memoria: use --help for available commands");
        return;
    };

    let service = match MemoryService::connect(&config).await {
        Ok(service) => service,
        Err(e) => {
            fail(&format!("startup failed: {e}"));
            return;
        }
    };

    match command {
        Commands::Search {
            owner,
            query,
            limit,
        } => {
            let owner = OwnerKey(owner);
            let results = service.search(&owner, &query, limit).await;
            if results.is_empty() {
                println!("no memories recalled");
            }
            for scored in results {
                println!(
                    "[{:.3} / {:.3}] ({}) {}",
                    scored.boosted, scored.similarity, scored.occurred_date_display,
                    scored.record.content
                );
            }
        }
        Commands::Ingest {
            artifact: IngestCommands::Stored { scope, id },
        } => match service.ingest_stored(&OwnerKey(scope.owner), &id).await {
            Ok(record) => println!("ingested {} ({})", record.item_id, record.id),
            Err(e) => fail(&format!("ingestion failed: {e}")),
        },
        Commands::Ingest { artifact } => {
            let (owner, artifact) = match artifact {
                IngestCommands::Keepsake {
                    scope,
                    name,
                    description,
                    story,
                    acquired,
                } => (
                    scope.owner,
                    SourceArtifact::Keepsake {
                        name,
                        description,
                        story,
                        acquired,
                    },
                ),
                IngestCommands::Photo {
                    scope,
                    title,
                    date,
                    description,
                } => (
                    scope.owner,
                    SourceArtifact::Photo {
                        title,
                        date,
                        description,
                    },
                ),
                IngestCommands::Letter {
                    scope,
                    text,
                    reply,
                    date,
                } => (
                    scope.owner,
                    SourceArtifact::Letter { text, reply, date },
                ),
                IngestCommands::Stored { .. } => unreachable!("handled above"),
            };
            match service.ingest(&OwnerKey(owner), &artifact).await {
                Ok(record) => println!("ingested {} ({})", record.item_id, record.id),
                Err(e) => fail(&format!("ingestion failed: {e}")),
            }
        }
        Commands::Purge {
            owner,
            source_type,
            item_id,
        } => {
            let Some(source_type) = SourceType::from_str_value(&source_type) else {
                fail(&format!("unknown source type: {source_type}"));
                return;
            };
            match service.purge(&OwnerKey(owner), source_type, &item_id).await {
                Ok(removed) => println!("purged {removed} memories"),
                Err(e) => fail(&format!("purge failed: {e}")),
            }
        }
        Commands::Summarize { date } => match service.summarize_date(&date).await {
            Ok(ingested) => println!("summarized {ingested} owners for {date}"),
            Err(e) => fail(&format!("summarization failed: {e}")),
        },
        Commands::Config => unreachable!("handled above"),
    }
}

fn fail(message: &str) {
    eprintln!("memoria: {message}");
    std::process::exit(1);
}
