//! Axum extractors for the caller identity
//!
//! Authentication lives at the gateway; this service trusts the identity
//! headers the gateway injects (`x-user-id`, `x-user-role`) and turns them
//! into a typed [`Actor`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use aviator_types::{Actor, Role, UserId};

/// Header carrying the authenticated user's id
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the authenticated user's role
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Authenticated caller extracted from request headers
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub Actor);

/// Error response for identity failures
#[derive(Debug, Serialize)]
struct IdentityErrorResponse {
    error: IdentityErrorDetail,
}

#[derive(Debug, Serialize)]
struct IdentityErrorDetail {
    code: &'static str,
    message: &'static str,
}

/// Identity rejection type
pub struct IdentityRejection {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
}

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        let body = IdentityErrorResponse {
            error: IdentityErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header_value(parts, USER_ID_HEADER)?;
        let role = header_value(parts, USER_ROLE_HEADER)?;

        let user_id = UserId::parse(user_id).map_err(|_| IdentityRejection {
            status: StatusCode::UNAUTHORIZED,
            code: "INVALID_IDENTITY",
            message: "Malformed user id header",
        })?;

        let role: Role = role.parse().map_err(|_| IdentityRejection {
            status: StatusCode::UNAUTHORIZED,
            code: "INVALID_IDENTITY",
            message: "Unknown role header",
        })?;

        Ok(Caller(Actor::new(user_id, role)))
    }
}

fn header_value<'a>(parts: &'a Parts, name: &'static str) -> Result<&'a str, IdentityRejection> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or(IdentityRejection {
            status: StatusCode::UNAUTHORIZED,
            code: "MISSING_IDENTITY",
            message: "Missing identity headers",
        })
}
