//! Error conversions
//!
//! Storage-engine error classification and HTTP rendering for
//! [`AppError`](super::app_error::AppError).

// ============================================================================
// SQLx classification (feature-gated)
// ============================================================================

/// PostgreSQL SQLSTATE for `unique_violation` (Class 23, Integrity Constraint Violation)
pub const PG_UNIQUE_VIOLATION: &str = "23505";

/// True when the error is a uniqueness-constraint violation
#[cfg(feature = "sqlx")]
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code == PG_UNIQUE_VIOLATION),
        _ => false,
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for super::app_error::AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.to_body())).into_response()
    }
}
