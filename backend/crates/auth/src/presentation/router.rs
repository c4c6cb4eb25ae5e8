//! Auth Router

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use platform::password::ConfiguredHasher;
use sqlx::PgPool;

use crate::application::config::AuthConfig;
use crate::application::sign_up::{SignUpService, SignUpUseCase};
use crate::infra::{PgAccountStorage, StorageAccountStore};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_access_token;

/// Create the Auth router backed by PostgreSQL
pub fn auth_router(pool: PgPool, hasher: ConfiguredHasher, config: AuthConfig) -> Router {
    let storage = Arc::new(PgAccountStorage::new(pool));
    let store = Arc::new(StorageAccountStore::new(storage));
    let sign_up = SignUpUseCase::new(store, Arc::new(hasher));

    auth_router_generic(sign_up, config)
}

/// Create a generic Auth router for any sign-up service
pub fn auth_router_generic<U>(sign_up: U, config: AuthConfig) -> Router
where
    U: SignUpService + Send + Sync + 'static,
{
    let tokens = Arc::new(config.token_issuer());

    let state = AuthAppState {
        sign_up: Arc::new(sign_up),
        tokens: Arc::clone(&tokens),
        refresh_cookie: Arc::new(config.refresh_cookie()),
    };

    let public: Router<AuthAppState<U>> =
        Router::new().route("/v1/auth/sign-up", post(handlers::sign_up::<U>));

    let private: Router<AuthAppState<U>> = Router::new()
        .route("/v1/auth/me", get(handlers::me))
        .route_layer(middleware::from_fn_with_state(tokens, require_access_token));

    public.merge(private).with_state(state)
}
