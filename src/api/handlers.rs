//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, info};

use super::AppState;
use super::types::{CatalogResponse, ErrorResponse, EvaluateRequest};
use crate::config::SelectionConfig;
use crate::engine::{Evaluation, evaluate};
use crate::notify::{ContactNotification, NotifyError, build_email};

/// `GET /catalog` → 200 + `CatalogResponse` JSON
pub async fn get_catalog(State(state): State<Arc<AppState>>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        categories: state.catalog.categories(),
        appliances: state.catalog.appliances().to_vec(),
    })
}

/// Builds the requested selection through the gate and evaluates it.
///
/// `POST /evaluate` → 200 + `Evaluation` JSON
/// Malformed bodies, unknown ids, invalid custom entries or gate violations
/// → 400 + `ErrorResponse`
pub async fn post_evaluate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Evaluation>, (StatusCode, Json<ErrorResponse>)> {
    let req: EvaluateRequest = serde_json::from_slice(&body).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(format!("invalid request body: {e}"))),
        )
    })?;
    let selection = SelectionConfig::from(req)
        .build(&state.catalog, &state.rules)
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(format!("{}: {}", e.field, e.message))),
            )
        })?;
    Ok(Json(evaluate(
        &selection,
        &state.catalog,
        &state.rules,
        &state.policy,
    )))
}

/// Formats a contact request as an email and hands it to the mailer.
///
/// `POST /send-contact-notification` → 200 + provider response JSON
/// Any failure → 500 + `ErrorResponse`
pub async fn send_contact_notification(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Response {
    match deliver(&state, &body).await {
        Ok(provider_response) => (StatusCode::OK, Json(provider_response)).into_response(),
        Err(e) => {
            error!(error = %e, "Contact notification failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

async fn deliver(state: &AppState, body: &[u8]) -> Result<serde_json::Value, NotifyError> {
    state.mailer.ensure_configured()?;
    let request: ContactNotification =
        serde_json::from_slice(body).map_err(|e| NotifyError::InvalidPayload(e.to_string()))?;
    info!(
        name = %request.name,
        contact_method = %request.contact_method,
        has_sizing = request.inverter_sizing.is_some(),
        "Received contact notification request"
    );
    let email = build_email(&request, &state.notify)?;
    state.mailer.send(&email).await
}
