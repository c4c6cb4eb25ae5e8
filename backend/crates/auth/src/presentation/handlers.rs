//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use axum::http::header;
use axum::response::IntoResponse;
use platform::cookie::CookieConfig;

use crate::application::sign_up::SignUpService;
use crate::application::tokens::{AccessClaims, TokenIssuer};
use crate::domain::validation::sign_up_options;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{MeResponse, SignUpRequest, SignUpResponse};

/// Shared state for auth handlers
pub struct AuthAppState<U> {
    pub sign_up: Arc<U>,
    pub tokens: Arc<TokenIssuer>,
    pub refresh_cookie: Arc<CookieConfig>,
}

impl<U> Clone for AuthAppState<U> {
    fn clone(&self) -> Self {
        Self {
            sign_up: Arc::clone(&self.sign_up),
            tokens: Arc::clone(&self.tokens),
            refresh_cookie: Arc::clone(&self.refresh_cookie),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /v1/auth/sign-up
pub async fn sign_up<U>(
    State(state): State<AuthAppState<U>>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    U: SignUpService + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected sign up body");
        AuthError::InvalidInput
    })?;

    let options = sign_up_options(&req.username, &req.email, &req.password)?;

    let identity = state.sign_up.post_sign_up(options).await?;

    let pair = state.tokens.generate_tokens(&identity)?;

    let cookie = state
        .refresh_cookie
        .header_value(&pair.refresh_token)
        .map_err(|e| AuthError::Internal(e.to_string()))?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(SignUpResponse {
            access_token: pair.access_token,
        }),
    ))
}

// ============================================================================
// Current Account (requires authentication)
// ============================================================================

/// GET /v1/auth/me
pub async fn me(Extension(claims): Extension<AccessClaims>) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: claims.user_id,
        email: claims.email,
        role: claims.role,
    })
}
