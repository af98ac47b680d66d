use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // One document per subject: days and slots live in the JSONB column
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS weekly_templates (
            subject_id UUID PRIMARY KEY,
            appointment_duration INTEGER NOT NULL DEFAULT 30,
            days JSONB NOT NULL DEFAULT '[]'::jsonb,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_appointment_duration CHECK (appointment_duration IN (15, 30, 45, 60))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Bookings are written by the booking flow; the scheduler only reads them
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            subject_id UUID NOT NULL,
            date DATE NOT NULL,
            start_time TIME NOT NULL,
            status VARCHAR(32) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Prepared statements take one command each
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_bookings_subject_date ON bookings(subject_id, date)",
        "CREATE INDEX IF NOT EXISTS idx_bookings_status ON bookings(status)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
