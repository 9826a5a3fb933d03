//! Command-line front end for house management.
//!
//! Every command prints one JSON document: `{"success": ...}` on success or
//! `{"error": {"kind": ..., "message": ...}}` on a house error (exit code 1).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use house_core::common::{HouseId, UserId};
use house_core::domains::houses::actions::{self, CreateHouse, UpdateHouse};
use house_core::domains::houses::{HouseError, ImageUpload};
use house_core::domains::users::User;
use house_core::kernel::{
    create_notification_service, LocalImageStorage, PostgresIdentityProvider, ServerDeps,
};
use house_core::Config;

#[derive(Parser)]
#[command(name = "house_cli")]
#[command(about = "Manage student houses, their members and ledger pairs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,

    /// Register a user identity
    CreateUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },

    /// Create a house owned by the acting user
    CreateHouse {
        #[arg(long)]
        actor: UserId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        /// JPEG or PNG file, at most 1024 KB
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Add a user to a house by email
    AssignUser {
        #[arg(long)]
        actor: UserId,
        #[arg(long)]
        house: HouseId,
        #[arg(long)]
        email: String,
        #[arg(long)]
        role: i64,
    },

    /// Remove a user from a house
    RemoveUser {
        #[arg(long)]
        actor: UserId,
        #[arg(long)]
        house: HouseId,
        #[arg(long)]
        user: UserId,
    },

    /// Change the name, description or image of a house
    UpdateHouse {
        #[arg(long)]
        actor: UserId,
        #[arg(long)]
        house: HouseId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Show one house
    ShowHouse { house: HouseId },

    /// List all houses
    ListHouses,

    /// List the members of a house (acting user must be a member)
    Members {
        #[arg(long)]
        actor: UserId,
        #[arg(long)]
        house: HouseId,
    },

    /// List the houses the acting user belongs to
    MyHouses {
        #[arg(long)]
        actor: UserId,
    },

    /// Show every ledger entry of a user in a house
    Ledger {
        #[arg(long)]
        house: HouseId,
        #[arg(long)]
        user: UserId,
    },

    /// Show the membership history of a user in a house
    History {
        #[arg(long)]
        house: HouseId,
        #[arg(long)]
        user: UserId,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Response<T: Serialize> {
    Success(T),
    Error(house_core::domains::houses::ErrorBody),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,house_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    if let Commands::Migrate = cli.command {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;
        tracing::info!("Migrations complete");
        return Ok(());
    }

    let deps = ServerDeps::new(
        pool.clone(),
        Arc::new(PostgresIdentityProvider::new(pool.clone())),
        create_notification_service(
            config.notification_webhook_url.clone(),
            config.notification_webhook_token.clone(),
        ),
        Arc::new(LocalImageStorage::new(&config.avatar_dir)),
        config.removal_policy,
    );

    let ok = run(cli.command, &deps).await?;

    // Let invite notices finish before the runtime shuts down.
    deps.background.wait_idle().await;

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Execute one command. Returns false if a house error was reported.
async fn run(command: Commands, deps: &ServerDeps) -> Result<bool> {
    match command {
        Commands::Migrate => Ok(true),
        Commands::CreateUser { name, email } => {
            let user = User::create(&name, &email, &deps.db_pool).await?;
            output(Ok(user))
        }
        Commands::CreateHouse {
            actor,
            name,
            description,
            image,
        } => {
            let image = match image {
                Some(path) => Some(read_image(&path).await?),
                None => None,
            };
            let input = CreateHouse::builder()
                .name(name)
                .description(description)
                .image(image)
                .build();
            output(actions::create_house(input, actor, deps).await)
        }
        Commands::AssignUser {
            actor,
            house,
            email,
            role,
        } => output(actions::assign_user(house, actor, &email, role, deps).await),
        Commands::RemoveUser { actor, house, user } => {
            output(actions::remove_user(house, actor, user, deps).await)
        }
        Commands::UpdateHouse {
            actor,
            house,
            name,
            description,
            image,
        } => {
            let image = match image {
                Some(path) => Some(read_image(&path).await?),
                None => None,
            };
            let input = UpdateHouse {
                name,
                description,
                image,
            };
            output(actions::update_house(house, actor, input, deps).await)
        }
        Commands::ShowHouse { house } => output(actions::get_house(house, deps).await),
        Commands::ListHouses => output(actions::list_houses(deps).await),
        Commands::Members { actor, house } => {
            output(actions::list_house_members(house, actor, deps).await)
        }
        Commands::MyHouses { actor } => output(actions::houses_for_user(actor, deps).await),
        Commands::Ledger { house, user } => {
            output(actions::ledger_entries_for(house, user, deps).await)
        }
        Commands::History { house, user } => {
            output(actions::membership_history(house, user, deps).await)
        }
    }
}

fn output<T: Serialize>(result: Result<T, HouseError>) -> Result<bool> {
    let (response, ok) = match result {
        Ok(value) => (Response::Success(value), true),
        Err(e) => (Response::Error(e.body()), false),
    };
    println!("{}", serde_json::to_string(&response)?);
    Ok(ok)
}

async fn read_image(path: &Path) -> Result<ImageUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let content_type = mime_guess::from_path(path).first_or_octet_stream();
    Ok(ImageUpload::new(bytes, content_type.essence_str()))
}
