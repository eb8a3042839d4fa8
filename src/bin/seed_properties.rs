use anyhow::{Context, Result};
use gardablick::config;
use gardablick::db::Database;
use gardablick::properties::seed::{seed_properties, SeedOutcome};
use gardablick::properties::PropertyRepository;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gardablick=info".parse()?)
                .add_directive("seed=info".parse()?),
        )
        .init();

    info!("Seeding sample properties");

    let config = config::Config::from_env()?;
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to open database")?;

    let repo = PropertyRepository::new(&db);
    match seed_properties(&repo).await? {
        SeedOutcome::Skipped { existing } => {
            info!("Nothing to do: {} properties already present", existing);
        }
        SeedOutcome::Seeded { properties, images } => {
            info!("✓ Created {} properties and {} gallery images", properties, images);
        }
    }

    db.close().await;
    Ok(())
}
