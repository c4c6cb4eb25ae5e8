//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Error classification ([`error::kind::ErrorKind`]) mapped to HTTP statuses
//! - The rendered application error ([`error::app_error::AppError`])
//! - Storage-engine error classification shared by persistence adapters
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
