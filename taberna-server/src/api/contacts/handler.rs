//! Project contact API Handlers

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    MAX_MESSAGE_LENGTH, ProjectContactCreate, ProjectContactReceipt, ProjectContactStats,
    ProjectContactView,
};
use shared::request::{LimitOffsetQuery, MAX_LIMIT};
use shared::util::{LEAD_PREFIX, parse_public_id};
use validator::ValidateEmail;

use crate::api::{json_body, non_blank};
use crate::db::repository::contact::{self, NewProjectContact};
use crate::error::ServiceResult;
use crate::state::AppState;

fn required(field: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(
            AppError::with_message(ErrorCode::RequiredField, format!("{field} is required"))
                .with_detail("field", field),
        );
    }
    Ok(value.to_string())
}

/// Check a submission and normalize it for storage
pub fn validate_submission(payload: ProjectContactCreate) -> Result<NewProjectContact, AppError> {
    if payload.honeypot.as_deref().is_some_and(|h| !h.trim().is_empty()) {
        return Err(AppError::new(ErrorCode::ContactRejected));
    }

    let message = required("message", &payload.message)?;
    let length = message.chars().count();
    if length > MAX_MESSAGE_LENGTH {
        return Err(AppError::new(ErrorCode::MessageTooLong)
            .with_detail("max", MAX_MESSAGE_LENGTH)
            .with_detail("length", length));
    }

    let email = required("email", &payload.email)?;
    if !email.validate_email() {
        return Err(AppError::with_message(ErrorCode::InvalidFormat, "invalid email")
            .with_detail("field", "email"));
    }

    Ok(NewProjectContact {
        name: required("name", &payload.name)?,
        email,
        phone: non_blank(payload.phone),
        company: non_blank(payload.company),
        subject: required("subject", &payload.subject)?,
        message,
        consent: payload.consent,
        source: non_blank(payload.source),
    })
}

/// POST /api/v1/contacts/projects
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<ProjectContactCreate>, JsonRejection>,
) -> ServiceResult<(StatusCode, Json<ProjectContactReceipt>)> {
    let contact = validate_submission(json_body(payload)?)?;
    let id = contact::insert(state.pool(), &contact, shared::util::now_millis()).await?;
    tracing::info!(lead_id = id, "Project contact received");
    Ok((StatusCode::ACCEPTED, Json(ProjectContactReceipt::received(id))))
}

#[derive(Debug, Serialize)]
pub struct ContactListResponse {
    pub items: Vec<ProjectContactView>,
}

/// GET /admin/contacts/projects
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<LimitOffsetQuery>,
) -> ServiceResult<Json<ContactListResponse>> {
    if !query.is_valid() {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("limit must be 1..={MAX_LIMIT} and offset non-negative"),
        )
        .into());
    }
    let rows = contact::list(state.pool(), query.limit, query.offset).await?;
    Ok(Json(ContactListResponse {
        items: rows.into_iter().map(Into::into).collect(),
    }))
}

/// GET /admin/contacts/projects/stats
pub async fn stats(State(state): State<AppState>) -> ServiceResult<Json<ProjectContactStats>> {
    Ok(Json(contact::stats(state.pool()).await?))
}

/// POST /admin/contacts/projects/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<StatusCode> {
    let not_found = || AppError::new(ErrorCode::ContactNotFound).with_detail("id", id.clone());
    let row_id = parse_public_id(LEAD_PREFIX, &id).ok_or_else(not_found)?;

    if !contact::mark_read(state.pool(), row_id, shared::util::now_millis()).await? {
        return Err(not_found().into());
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ProjectContactCreate {
        ProjectContactCreate {
            name: "Marta".into(),
            email: "marta@example.com".into(),
            phone: Some("  ".into()),
            company: None,
            subject: "Exposición".into(),
            message: "Hola".into(),
            consent: true,
            source: None,
            honeypot: None,
        }
    }

    #[test]
    fn test_valid_submission_normalized() {
        let contact = validate_submission(submission()).unwrap();
        assert_eq!(contact.phone, None);
        assert_eq!(contact.subject, "Exposición");
    }

    #[test]
    fn test_honeypot_rejected() {
        let mut s = submission();
        s.honeypot = Some("http://spam".into());
        assert_eq!(validate_submission(s).unwrap_err().code, ErrorCode::ContactRejected);
    }

    #[test]
    fn test_message_length_counts_chars() {
        let mut s = submission();
        s.message = "ñ".repeat(MAX_MESSAGE_LENGTH);
        assert!(validate_submission(s.clone()).is_ok());

        s.message.push('ñ');
        assert_eq!(validate_submission(s).unwrap_err().code, ErrorCode::MessageTooLong);
    }

    #[test]
    fn test_invalid_email() {
        let mut s = submission();
        s.email = "marta.example.com".into();
        assert_eq!(validate_submission(s).unwrap_err().code, ErrorCode::InvalidFormat);
    }
}
