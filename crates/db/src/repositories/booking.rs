use crate::models::DbBooking;
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_bookings_for_subject(
    pool: &Pool<Postgres>,
    subject_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
    statuses: &[String],
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, subject_id, date, start_time, status, created_at
        FROM bookings
        WHERE subject_id = $1
          AND date BETWEEN $2 AND $3
          AND status = ANY($4)
        ORDER BY date ASC, start_time ASC
        "#,
    )
    .bind(subject_id)
    .bind(from)
    .bind(to)
    .bind(statuses)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}
