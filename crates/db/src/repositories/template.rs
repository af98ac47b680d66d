use crate::models::DbWeeklyTemplate;
use chrono::Utc;
use eyre::Result;
use medsched_core::models::schedule::DaySchedule;
use sqlx::types::Json;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_template_by_subject(
    pool: &Pool<Postgres>,
    subject_id: Uuid,
) -> Result<Option<DbWeeklyTemplate>> {
    tracing::debug!("Getting weekly template for subject: {}", subject_id);

    let template = sqlx::query_as::<_, DbWeeklyTemplate>(
        r#"
        SELECT subject_id, appointment_duration, days, created_at, updated_at
        FROM weekly_templates
        WHERE subject_id = $1
        "#,
    )
    .bind(subject_id)
    .fetch_optional(pool)
    .await?;

    Ok(template)
}

/// Writes the whole template document in one statement. The first write for
/// a subject creates the row; later writes replace it.
pub async fn upsert_template(
    pool: &Pool<Postgres>,
    subject_id: Uuid,
    appointment_duration: i32,
    days: &[&DaySchedule],
) -> Result<DbWeeklyTemplate> {
    let now = Utc::now();

    tracing::debug!(
        "Saving weekly template: subject_id={}, appointment_duration={}, days={}",
        subject_id,
        appointment_duration,
        days.len()
    );

    let template = sqlx::query_as::<_, DbWeeklyTemplate>(
        r#"
        INSERT INTO weekly_templates (subject_id, appointment_duration, days, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $4)
        ON CONFLICT (subject_id)
        DO UPDATE SET
            appointment_duration = EXCLUDED.appointment_duration,
            days = EXCLUDED.days,
            updated_at = EXCLUDED.updated_at
        RETURNING subject_id, appointment_duration, days, created_at, updated_at
        "#,
    )
    .bind(subject_id)
    .bind(appointment_duration)
    .bind(Json(days))
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(template)
}

pub async fn delete_template(pool: &Pool<Postgres>, subject_id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM weekly_templates
        WHERE subject_id = $1
        "#,
    )
    .bind(subject_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
