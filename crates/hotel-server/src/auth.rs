//! Caller identity
//!
//! Callers identify themselves with an `x-user-id` header carrying a UUID.
//! The id only keys the per-caller dataset selection; it is not a credential.

use crate::error::AppError;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use std::fmt;
use uuid::Uuid;

/// Header carrying the caller id
pub const USER_ID_HEADER: &str = "x-user-id";

/// The caller making the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrentUser(pub Uuid);

impl CurrentUser {
    pub fn id(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for CurrentUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Why a request carries no usable caller id
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing x-user-id header")]
    MissingHeader,
    #[error("x-user-id header must be a UUID")]
    InvalidHeader,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        AppError::Unauthorized(self.to_string()).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or(AuthError::MissingHeader)?;

        value
            .to_str()
            .ok()
            .and_then(|s| Uuid::parse_str(s.trim()).ok())
            .map(CurrentUser)
            .ok_or(AuthError::InvalidHeader)
    }
}
