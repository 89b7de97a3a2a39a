//! Booking handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use aviator_booking_core::{CreateBookingInput, ListFilter};
use aviator_db::{BookingRequestRepository, BookingRow};
use aviator_types::{BookingId, BookingType, TutorId, UserId};

use crate::error::{ApiError, ApiResult};
use crate::extractors::Caller;
use crate::state::AppState;

/// Maximum length for a cancellation reason
pub const MAX_REASON_LEN: usize = 500;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub tutor_id: String,
    /// Local ISO-8601 datetime, interpreted in the student's timezone
    pub scheduled_at: String,
    pub duration_minutes: i32,
    pub booking_type: Option<String>,
    pub lesson_type: Option<String>,
    pub message: Option<String>,
}

/// Admin-only listing filters; ignored for other callers
#[derive(Debug, Default, Deserialize)]
pub struct ListBookingsQuery {
    pub student_id: Option<String>,
    pub tutor_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RescheduleRequest {
    /// Local ISO-8601 datetime, interpreted in the booking's stored timezone
    pub scheduled_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CancelRequest {
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub student_id: String,
    pub tutor_id: String,
    pub booking_type: String,
    pub status: String,
    pub scheduled_at: String,
    pub duration_minutes: i32,
    pub timezone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_type: Option<String>,
    pub price_per_hour: Decimal,
    pub total_price: Decimal,
    pub platform_fee: Decimal,
    pub tutor_payout: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    pub created_at: String,
}

impl From<BookingRow> for BookingResponse {
    fn from(row: BookingRow) -> Self {
        Self {
            id: row.id.to_string(),
            student_id: row.student_id.to_string(),
            tutor_id: row.tutor_id.to_string(),
            booking_type: row.booking_type,
            status: row.status,
            scheduled_at: row.scheduled_at.to_rfc3339(),
            duration_minutes: row.duration_minutes,
            timezone: row.timezone,
            lesson_type: row.lesson_type,
            price_per_hour: row.price_per_hour,
            total_price: row.total_price,
            platform_fee: row.platform_fee,
            tutor_payout: row.tutor_payout,
            completed_at: row.completed_at.map(|t| t.to_rfc3339()),
            cancelled_at: row.cancelled_at.map(|t| t.to_rfc3339()),
            cancelled_by: row.cancelled_by.map(|id| id.to_string()),
            cancellation_reason: row.cancellation_reason,
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    pub bookings: Vec<BookingResponse>,
}

#[derive(Debug, Serialize)]
pub struct BookingRequestResponse {
    pub id: String,
    pub booking_id: String,
    pub student_id: String,
    pub message: String,
    pub status: String,
    pub created_at: String,
}

// ============================================================================
// Validation
// ============================================================================

/// Validate a caller-supplied cancellation reason
pub fn validate_cancel_reason(reason: &str) -> Result<(), &'static str> {
    if reason.trim().is_empty() {
        return Err("Cancellation reason cannot be empty");
    }
    if reason.len() > MAX_REASON_LEN {
        return Err("Cancellation reason too long");
    }
    Ok(())
}

fn parse_booking_id(id: &str) -> Result<BookingId, ApiError> {
    BookingId::parse(id).map_err(|_| ApiError::BadRequest("Invalid booking id".to_string()))
}

fn parse_local_datetime(s: &str) -> Result<NaiveDateTime, ApiError> {
    s.parse::<NaiveDateTime>().map_err(|_| {
        ApiError::BadRequest(
            "scheduled_at must be a local ISO-8601 datetime, e.g. 2025-07-10T14:00:00".to_string(),
        )
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    Caller(actor): Caller,
    Json(req): Json<CreateBookingRequest>,
) -> ApiResult<(StatusCode, Json<BookingResponse>)> {
    let start = Instant::now();

    let tutor_id = TutorId::parse(&req.tutor_id)
        .map_err(|_| ApiError::BadRequest("Invalid tutor_id".to_string()))?;
    let scheduled_at_local = parse_local_datetime(&req.scheduled_at)?;
    let booking_type = match req.booking_type.as_deref() {
        None => BookingType::OneOnOne,
        Some(s) => s
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("Invalid booking_type: {s}")))?,
    };

    let booking = state
        .booking
        .create_booking(
            &actor,
            CreateBookingInput {
                tutor_id,
                scheduled_at_local,
                duration_minutes: req.duration_minutes,
                booking_type,
                lesson_type: req.lesson_type,
                message: req.message,
            },
        )
        .await?;

    metrics::counter!("bookings_created_total").increment(1);
    metrics::histogram!("booking_operation_duration_seconds", "operation" => "create")
        .record(start.elapsed().as_secs_f64());

    Ok((StatusCode::CREATED, Json(booking.into())))
}

/// GET /api/v1/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    Caller(actor): Caller,
    Query(query): Query<ListBookingsQuery>,
) -> ApiResult<Json<BookingListResponse>> {
    let filter = ListFilter {
        student_id: query
            .student_id
            .as_deref()
            .map(UserId::parse)
            .transpose()
            .map_err(|_| ApiError::BadRequest("Invalid student_id".to_string()))?,
        tutor_id: query
            .tutor_id
            .as_deref()
            .map(TutorId::parse)
            .transpose()
            .map_err(|_| ApiError::BadRequest("Invalid tutor_id".to_string()))?,
    };

    let bookings = state.booking.list_bookings(&actor, filter).await?;

    Ok(Json(BookingListResponse {
        bookings: bookings.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/v1/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    Caller(actor): Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<BookingResponse>> {
    let booking = state.booking.get_booking(&actor, parse_booking_id(&id)?).await?;
    Ok(Json(booking.into()))
}

/// GET /api/v1/bookings/{id}/request
///
/// The companion request created when the student attached an initial
/// message; 404 when the booking was created without one.
pub async fn get_booking_request(
    State(state): State<AppState>,
    Caller(actor): Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<BookingRequestResponse>> {
    let booking_id = parse_booking_id(&id)?;

    // Visibility rules are the booking's own
    state.booking.get_booking(&actor, booking_id).await?;

    let request = state
        .repos
        .booking_requests
        .find_by_booking(booking_id.0)
        .await?
        .ok_or_else(|| ApiError::NotFound("No request attached to this booking".to_string()))?;

    Ok(Json(BookingRequestResponse {
        id: request.id.to_string(),
        booking_id: request.booking_id.to_string(),
        student_id: request.student_id.to_string(),
        message: request.message,
        status: request.status,
        created_at: request.created_at.to_rfc3339(),
    }))
}

/// POST /api/v1/bookings/{id}/accept
pub async fn accept_booking(
    State(state): State<AppState>,
    Caller(actor): Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<BookingResponse>> {
    let start = Instant::now();

    let booking = state.booking.accept(&actor, parse_booking_id(&id)?).await?;

    metrics::histogram!("booking_operation_duration_seconds", "operation" => "accept")
        .record(start.elapsed().as_secs_f64());

    Ok(Json(booking.into()))
}

/// POST /api/v1/bookings/{id}/decline
pub async fn decline_booking(
    State(state): State<AppState>,
    Caller(actor): Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<BookingResponse>> {
    let start = Instant::now();

    let booking = state.booking.decline(&actor, parse_booking_id(&id)?).await?;

    metrics::counter!("bookings_cancelled_total", "kind" => "declined").increment(1);
    metrics::histogram!("booking_operation_duration_seconds", "operation" => "decline")
        .record(start.elapsed().as_secs_f64());

    Ok(Json(booking.into()))
}

/// POST /api/v1/bookings/{id}/reschedule
pub async fn reschedule_booking(
    State(state): State<AppState>,
    Caller(actor): Caller,
    Path(id): Path<String>,
    Json(req): Json<RescheduleRequest>,
) -> ApiResult<Json<BookingResponse>> {
    let start = Instant::now();

    let new_local = parse_local_datetime(&req.scheduled_at)?;
    let booking = state
        .booking
        .reschedule(&actor, parse_booking_id(&id)?, new_local)
        .await?;

    metrics::histogram!("booking_operation_duration_seconds", "operation" => "reschedule")
        .record(start.elapsed().as_secs_f64());

    Ok(Json(booking.into()))
}

/// POST /api/v1/bookings/{id}/cancel
pub async fn cancel_booking(
    State(state): State<AppState>,
    Caller(actor): Caller,
    Path(id): Path<String>,
    Json(req): Json<CancelRequest>,
) -> ApiResult<Json<BookingResponse>> {
    let start = Instant::now();

    validate_cancel_reason(&req.reason)
        .map_err(|msg| ApiError::BadRequest(msg.to_string()))?;

    let booking = state
        .booking
        .cancel(&actor, parse_booking_id(&id)?, &req.reason)
        .await?;

    metrics::counter!("bookings_cancelled_total", "kind" => "cancelled").increment(1);
    metrics::histogram!("booking_operation_duration_seconds", "operation" => "cancel")
        .record(start.elapsed().as_secs_f64());

    Ok(Json(booking.into()))
}

/// POST /api/v1/bookings/{id}/complete
pub async fn complete_booking(
    State(state): State<AppState>,
    Caller(actor): Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<BookingResponse>> {
    let start = Instant::now();

    let booking = state.booking.complete(&actor, parse_booking_id(&id)?).await?;

    metrics::counter!("bookings_completed_total").increment(1);
    metrics::histogram!("booking_operation_duration_seconds", "operation" => "complete")
        .record(start.elapsed().as_secs_f64());

    tracing::info!(booking_id = %booking.id, "Lesson completed");

    Ok(Json(booking.into()))
}
