//! Blog CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run post store migrations
//! blog-cli migrate
//!
//! # Insert ten random posts
//! blog-cli seed
//!
//! # Insert a custom number of random posts
//! blog-cli seed --count 50
//!
//! # Remove every post
//! blog-cli purge
//! ```
//!
//! A `memory://` store lives only for the duration of the command, so seeding
//! is only useful against `PostgreSQL`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "blog-cli")]
#[command(author, version, about = "Blog posts API CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert random fixture posts
    Seed {
        /// Number of posts to insert
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
    /// Delete every post
    Purge,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { count } => commands::seed::posts(count).await?,
        Commands::Purge => commands::seed::purge().await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_seed_count_defaults_to_ten() {
        let cli = Cli::try_parse_from(["blog-cli", "seed"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Seed { count: 10 })
        ));
    }

    #[test]
    fn test_seed_count_flag() {
        let cli = Cli::try_parse_from(["blog-cli", "seed", "--count", "3"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Seed { count: 3 })
        ));
    }
}
