//! # MedSched DB
//!
//! PostgreSQL persistence for weekly templates and the read side of bookings,
//! plus an in-process [`MemoryStore`] and `mockall` mocks of the core store
//! traits for tests.

pub mod memory;
pub mod mock;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod store;

use std::time::Duration;

use eyre::{Result, WrapErr};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub use memory::MemoryStore;
pub use store::{PgBookingStore, PgTemplateStore};

pub type DbPool = Pool<Postgres>;

/// Every request needs at most two short queries, so a small pool suffices.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .wrap_err("Could not open PostgreSQL connection pool")?;

    tracing::info!("Connected to PostgreSQL");
    Ok(pool)
}
