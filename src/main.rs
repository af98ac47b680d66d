use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use medsched_api::config::ApiConfig;
use medsched_db::{create_pool, schema::initialize_database};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // .env is optional; real environment wins
    dotenv().ok();

    let config = ApiConfig::from_env().wrap_err("Failed to load API configuration")?;

    let db_pool = create_pool(&config.database_url)
        .await
        .wrap_err("Failed to connect to the scheduling database")?;

    // Templates and bookings tables must exist before the first request
    initialize_database(&db_pool)
        .await
        .wrap_err("Failed to initialize the database schema")?;

    medsched_api::start_server(config, db_pool).await
}
