//! JWT extractor
//!
//! Handlers take [`CurrentUser`] as an argument; extraction validates
//! the bearer token and rejects the request before the handler body
//! runs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use shared::error::AppError;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // reuse what an earlier extraction already validated
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(AppError::not_authenticated)?;
        let token = JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("authorization header is not a bearer token"))?;

        match state.jwt_service().validate_token(token) {
            Ok(claims) => {
                let user = CurrentUser::from(claims);
                parts.extensions.insert(user.clone());
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(uri = %parts.uri, error = %e, "🔒 token rejected");
                Err(e.into())
            }
        }
    }
}
