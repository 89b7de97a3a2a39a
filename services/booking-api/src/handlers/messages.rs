//! Booking chat handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use aviator_db::MessageRow;
use aviator_types::BookingId;

use crate::error::{ApiError, ApiResult};
use crate::extractors::Caller;
use crate::state::AppState;

/// Maximum length for a chat message body
pub const MAX_MESSAGE_LEN: usize = 4000;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub booking_id: String,
    pub sender_id: String,
    pub body: String,
    pub is_flagged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flagged_reason: Option<String>,
    pub created_at: String,
}

impl From<MessageRow> for MessageResponse {
    fn from(row: MessageRow) -> Self {
        Self {
            id: row.id.to_string(),
            booking_id: row.booking_id.to_string(),
            sender_id: row.sender_id.to_string(),
            body: row.body,
            is_flagged: row.is_flagged,
            flagged_reason: row.flagged_reason,
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageListResponse {
    pub messages: Vec<MessageResponse>,
}

/// Validate a chat message body
pub fn validate_message_body(body: &str) -> Result<(), &'static str> {
    if body.trim().is_empty() {
        return Err("Message cannot be empty");
    }
    if body.len() > MAX_MESSAGE_LEN {
        return Err("Message too long");
    }
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/bookings/{id}/messages
pub async fn send_message(
    State(state): State<AppState>,
    Caller(actor): Caller,
    Path(id): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let booking_id = BookingId::parse(&id)
        .map_err(|_| ApiError::BadRequest("Invalid booking id".to_string()))?;

    validate_message_body(&req.body).map_err(|msg| ApiError::BadRequest(msg.to_string()))?;

    // A flagged body is persisted inside the service before the error
    // surfaces here; only the metrics diverge.
    let message = state
        .messaging
        .send_message(&actor, booking_id, &req.body)
        .await
        .inspect_err(|e| {
            if matches!(
                e,
                aviator_messaging_core::MessagingError::ContactInfoDetected { .. }
            ) {
                metrics::counter!("messages_flagged_total").increment(1);
            }
        })?;

    metrics::counter!("messages_sent_total").increment(1);

    Ok((StatusCode::CREATED, Json(message.into())))
}

/// GET /api/v1/bookings/{id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    Caller(actor): Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageListResponse>> {
    let booking_id = BookingId::parse(&id)
        .map_err(|_| ApiError::BadRequest("Invalid booking id".to_string()))?;

    let messages = state.messaging.list_messages(&actor, booking_id).await?;

    Ok(Json(MessageListResponse {
        messages: messages.into_iter().map(Into::into).collect(),
    }))
}
