//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Credential hashing (bcrypt, Argon2id) behind one capability trait
//! - Cookie building

pub mod cookie;
pub mod password;
