//! # Caller Identity and Role Checks
//!
//! Token verification happens at the gateway in front of this service. The
//! gateway forwards the verified identity in two headers:
//!
//! - `x-subject-id`: UUID of the authenticated user
//! - `x-subject-role`: one of `patient`, `doctor`, `admin`
//!
//! Handlers that mutate a schedule take a [`Caller`] and pass it to
//! [`ensure_schedule_owner`] before touching anything.

use std::str::FromStr;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use medsched_core::errors::{ScheduleError, ScheduleResult};
use uuid::Uuid;

use crate::middleware::error_handling::AppError;

pub const SUBJECT_ID_HEADER: &str = "x-subject-id";
pub const ROLE_HEADER: &str = "x-subject-role";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

impl FromStr for Role {
    type Err = ScheduleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "patient" => Ok(Role::Patient),
            "doctor" => Ok(Role::Doctor),
            "admin" => Ok(Role::Admin),
            other => Err(ScheduleError::Authentication(format!(
                "Unknown role '{}'",
                other
            ))),
        }
    }
}

/// The authenticated user behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub subject_id: Uuid,
    pub role: Role,
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| {
                    ScheduleError::Authentication(format!("Missing {} header", name))
                })
        };

        let subject_id = Uuid::parse_str(header(SUBJECT_ID_HEADER)?).map_err(|_| {
            ScheduleError::Authentication(format!("Malformed {} header", SUBJECT_ID_HEADER))
        })?;
        let role = header(ROLE_HEADER)?.parse::<Role>()?;

        Ok(Caller { subject_id, role })
    }
}

/// Only the doctor who owns a schedule may change it.
///
/// # Errors
///
/// * `ScheduleError::Authorization` - the caller is not a doctor, or is a
///   different doctor
pub fn ensure_schedule_owner(caller: &Caller, subject_id: Uuid) -> ScheduleResult<()> {
    if caller.role != Role::Doctor {
        return Err(ScheduleError::Authorization(
            "Only doctors can manage a weekly schedule".to_string(),
        ));
    }

    if caller.subject_id != subject_id {
        tracing::warn!(
            caller = %caller.subject_id,
            %subject_id,
            "Rejected schedule change by non-owner"
        );
        return Err(ScheduleError::Authorization(
            "Schedules can only be changed by their owner".to_string(),
        ));
    }

    Ok(())
}
