use axum::{
    Json,
    body::Bytes,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::validation::parse_json_body;
use super::{ApiError, AppState, CredentialsRequest, MessageResponse, TokenResponse};
use crate::api::error::NO_TOKEN;
use crate::services::Identity;

// ============================================================================
// Middleware
// ============================================================================

/// Identity of the caller, attached to the request by [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    #[must_use]
    pub fn username(&self) -> &str {
        &self.0.username
    }
}

/// Requires `Authorization: Bearer <token>`.
///
/// A missing token is 401, a token that fails verification is 403. On
/// success the decoded identity is stored in the request extensions.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())
        .ok_or_else(|| ApiError::Unauthorized(NO_TOKEN.to_string()))?;

    let identity = state.auth_service().verify_token(token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected bearer token");
        ApiError::from(e)
    })?;

    tracing::Span::current().record("user_id", identity.username.as_str());
    request.extensions_mut().insert(AuthUser(identity));

    Ok(next.run(request).await)
}

/// The token is whatever follows the first space of the `Authorization`
/// header.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .split(' ')
        .nth(1)
        .filter(|token| !token.is_empty())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /register
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let payload: CredentialsRequest = parse_json_body(&body)?;

    state
        .auth_service()
        .register(
            payload.username.as_deref().unwrap_or_default(),
            payload.password.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TokenResponse>, ApiError> {
    let payload: CredentialsRequest = parse_json_body(&body)?;

    let result = state
        .auth_service()
        .login(
            payload.username.as_deref().unwrap_or_default(),
            payload.password.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(TokenResponse {
        token: result.token,
    }))
}
