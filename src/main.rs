use color_eyre::eyre::Result;
use dotenv::dotenv;
use roombook_api::{config::ApiConfig, init_tracing};
use roombook_db::{create_pool, schema::initialize_database};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    init_tracing(config.log_level)?;
    info!(
        "Booking hours {}-{} in {}",
        config.slot_policy.open_time, config.slot_policy.close_time, config.site_timezone
    );

    // Create database connection pool
    let db_pool = create_pool(&config.database_url).await?;

    // Initialize database schema and seed rooms
    initialize_database(&db_pool).await?;

    // Start API server
    roombook_api::start_server(config, db_pool).await?;

    Ok(())
}
