//! Eventdash CLI
//!
//! Command-line interface for Eventdash administration:
//! - Manage team members (who may sign in to the dashboard)
//! - List events
//! - Check server status
//! - Generate a config file

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eventdash::config::{generate_default_config, Config};
use eventdash::store::{Store, StoreError};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "eventdash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Administer an Eventdash team dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations, then environment)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API server URL (for `status`)
    #[arg(long, default_value = "http://localhost:8082", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage team members
    Members {
        #[command(subcommand)]
        action: MemberAction,
    },

    /// List events
    Events,

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum MemberAction {
    /// Register a member
    Add {
        /// Display name
        name: String,
        /// Email used to sign in
        email: String,
        /// Role shown on the dashboard
        #[arg(short, long, default_value = "member")]
        role: String,
    },

    /// List members
    List,

    /// Remove a member and revoke their sessions
    Remove {
        /// Email of the member
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Members { action } => {
            let store = open_store(cli.config.as_ref())?;

            match action {
                MemberAction::Add { name, email, role } => {
                    match store.add_member(&name, &email, &role).await {
                        Ok(member) => println!("Added {} <{}> as {}", member.name, member.email, member.role),
                        Err(StoreError::DuplicateMember(email)) => {
                            eprintln!("A member with email {} already exists", email);
                            std::process::exit(1);
                        }
                        Err(e) => return Err(e).context("Failed to add member"),
                    }
                }

                MemberAction::List => {
                    let members = store.list_members().await.context("Failed to list members")?;

                    if cli.format == "json" {
                        println!("{}", serde_json::to_string_pretty(&members)?);
                    } else if members.is_empty() {
                        println!("No members registered yet.");
                        println!();
                        println!("Add the first member with:");
                        println!("  eventdash-cli members add \"Ada Lovelace\" ada@example.com --role owner");
                    } else {
                        println!("{:<24} {:<32} {:<10} {}", "Name", "Email", "Role", "Joined");
                        println!("{}", "-".repeat(80));

                        for member in members {
                            println!(
                                "{:<24} {:<32} {:<10} {}",
                                member.name,
                                member.email,
                                member.role,
                                member.joined_at.format("%Y-%m-%d")
                            );
                        }
                    }
                }

                MemberAction::Remove { email } => {
                    match store.remove_member(&email).await {
                        Ok(()) => println!("Removed {}", email),
                        Err(StoreError::MemberNotFound(email)) => {
                            eprintln!("No member with email {}", email);
                            std::process::exit(1);
                        }
                        Err(e) => return Err(e).context("Failed to remove member"),
                    }
                }
            }
        }

        Commands::Events => {
            let store = open_store(cli.config.as_ref())?;
            let events = store.list_events().await.context("Failed to list events")?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&events)?);
            } else if events.is_empty() {
                println!("No events yet.");
            } else {
                println!("{:<12} {:<32} {}", "Date", "Title", "Created by");
                println!("{}", "-".repeat(70));

                for event in events {
                    println!(
                        "{:<12} {:<32} {}",
                        event.date.format("%Y-%m-%d"),
                        truncate(&event.title, 32),
                        event.created_by.as_deref().unwrap_or("-")
                    );
                }
            }
        }

        Commands::Status => {
            let client = reqwest::Client::new();
            let response = client
                .get(format!("{}/health", cli.api_url.trim_end_matches('/')))
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("Eventdash v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    println!("Store: {}", health["store"].as_str().unwrap_or("unknown"));

                    if let Some(events) = health["events"].as_u64() {
                        println!("Events: {}", events);
                    }

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to Eventdash API at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the Eventdash API server is running:");
                    eprintln!("  cargo run --bin eventdash-api");
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            if let Some(path) = output {
                std::fs::write(&path, &config)
                    .with_context(|| format!("Failed to write {:?}", path))?;
                println!("Config written to {:?}", path);
            } else {
                print!("{}", config);
            }
        }
    }

    Ok(())
}

/// Open the store named by the config file or the default config
fn open_store(config_path: Option<&PathBuf>) -> Result<Store> {
    let config = match config_path {
        Some(path) => Config::load_with_env(path)?,
        None => {
            let loaded = Config::load_default();
            for failure in &loaded.failures {
                eprintln!("Warning: {}", failure);
            }
            loaded.config
        }
    };

    let data_dir = config.data_dir();
    Store::open(&data_dir).with_context(|| format!("Failed to open store in {:?}", data_dir))
}

/// Shorten text to `max` characters, marking the cut
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Format seconds as a human-readable duration
fn format_duration(seconds: u64) -> String {
    let days = seconds / 86400;
    let hours = (seconds % 86400) / 3600;
    let minutes = (seconds % 3600) / 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m {}s", minutes, seconds % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(59), "0m 59s");
        assert_eq!(format_duration(3_660), "1h 1m");
        assert_eq!(format_duration(90_000), "1d 1h 0m");
    }
}
