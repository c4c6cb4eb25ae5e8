//! Credential Hashing
//!
//! One-way, salted hashing of plaintext secrets behind the
//! [`CredentialHasher`] capability:
//! - [`BcryptHasher`]: bcrypt with a fixed cost of 12 (default)
//! - [`Argon2Hasher`]: Argon2id with OWASP-recommended parameters
//!
//! Both produce self-describing strings (algorithm, cost and salt are
//! embedded), so a stored hash can be verified later without extra metadata.
//!
//! Hashing is CPU-bound and deliberately slow. Async callers should run it on
//! a blocking thread (`tokio::task::spawn_blocking`).

use std::fmt;
use std::str::FromStr;

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier as _};
use rand::rngs::OsRng;
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// bcrypt work factor used in production
pub const BCRYPT_COST: u32 = 12;

/// bcrypt only reads the first 72 bytes of its input
pub const BCRYPT_MAX_INPUT_BYTES: usize = 72;

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Underlying hashing library failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored hash could not be parsed
    #[error("Invalid password hash format")]
    InvalidHashFormat,

    /// Work factor outside the range the algorithm accepts
    #[error("Invalid bcrypt cost {0} (expected 4..=31)")]
    InvalidCost(u32),

    /// Unknown algorithm name in configuration
    #[error("Unsupported password hash algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

// ============================================================================
// Capability
// ============================================================================

/// One-way credential hasher
///
/// Implementations must salt every call, so hashing the same plaintext twice
/// yields different strings that both verify.
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext secret into a self-describing string
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError>;

    /// Constant-time check of a plaintext against a stored hash
    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordHashError>;

    /// Algorithm identifier, for logs
    fn algorithm(&self) -> &'static str;
}

// ============================================================================
// bcrypt
// ============================================================================

/// bcrypt hasher (`$2b$` output)
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Production hasher with [`BCRYPT_COST`]
    pub const fn new() -> Self {
        Self { cost: BCRYPT_COST }
    }

    /// Hasher with a different work factor
    ///
    /// The cost is fixed for the lifetime of the hasher. Low costs are only
    /// meant for tests.
    pub fn with_cost(cost: u32) -> Result<Self, PasswordHashError> {
        if !(4..=31).contains(&cost) {
            return Err(PasswordHashError::InvalidCost(cost));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| PasswordHashError::HashingFailed(e.to_string()))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordHashError> {
        bcrypt::verify(plaintext, hash).map_err(|_| PasswordHashError::InvalidHashFormat)
    }

    fn algorithm(&self) -> &'static str {
        "bcrypt"
    }
}

// ============================================================================
// Argon2id
// ============================================================================

/// Argon2id hasher (PHC string output)
///
/// Uses `Argon2::default()`: m=19456 (19 MiB), t=2, p=1.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError> {
        // 128-bit random salt
        let salt = SaltString::generate(OsRng);

        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok())
    }

    fn algorithm(&self) -> &'static str {
        "argon2id"
    }
}

// ============================================================================
// Configuration-selected hasher
// ============================================================================

/// Hash algorithm selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    #[default]
    Bcrypt,
    Argon2id,
}

impl FromStr for HashAlgorithm {
    type Err = PasswordHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bcrypt" => Ok(Self::Bcrypt),
            "argon2" | "argon2id" => Ok(Self::Argon2id),
            other => Err(PasswordHashError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bcrypt => write!(f, "bcrypt"),
            Self::Argon2id => write!(f, "argon2id"),
        }
    }
}

/// Hasher picked at startup
#[derive(Debug, Clone, Copy)]
pub enum ConfiguredHasher {
    Bcrypt(BcryptHasher),
    Argon2(Argon2Hasher),
}

impl From<HashAlgorithm> for ConfiguredHasher {
    fn from(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Bcrypt => Self::Bcrypt(BcryptHasher::new()),
            HashAlgorithm::Argon2id => Self::Argon2(Argon2Hasher),
        }
    }
}

impl CredentialHasher for ConfiguredHasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError> {
        match self {
            Self::Bcrypt(h) => h.hash(plaintext),
            Self::Argon2(h) => h.hash(plaintext),
        }
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordHashError> {
        match self {
            Self::Bcrypt(h) => h.verify(plaintext, hash),
            Self::Argon2(h) => h.verify(plaintext, hash),
        }
    }

    fn algorithm(&self) -> &'static str {
        match self {
            Self::Bcrypt(h) => h.algorithm(),
            Self::Argon2(h) => h.algorithm(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_bcrypt() -> BcryptHasher {
        BcryptHasher::with_cost(4).unwrap()
    }

    #[test]
    fn test_default_bcrypt_cost() {
        assert_eq!(BcryptHasher::new().cost(), 12);
        assert_eq!(BcryptHasher::default().cost(), BCRYPT_COST);
    }

    #[test]
    fn test_bcrypt_rejects_out_of_range_cost() {
        assert!(matches!(
            BcryptHasher::with_cost(3),
            Err(PasswordHashError::InvalidCost(3))
        ));
        assert!(matches!(
            BcryptHasher::with_cost(32),
            Err(PasswordHashError::InvalidCost(32))
        ));
    }

    #[test]
    fn test_bcrypt_hash_is_self_describing() {
        let hash = fast_bcrypt().hash("correcthorsebattery").unwrap();
        assert!(hash.starts_with("$2b$04$"));
        assert_ne!(hash, "correcthorsebattery");
    }

    #[test]
    fn test_bcrypt_hash_and_verify() {
        let hasher = fast_bcrypt();
        let hash = hasher.hash("TestPassword123!").unwrap();

        assert!(hasher.verify("TestPassword123!", &hash).unwrap());
        assert!(!hasher.verify("WrongPassword123!", &hash).unwrap());
    }

    #[test]
    fn test_bcrypt_salts_every_hash() {
        let hasher = fast_bcrypt();
        let a = hasher.hash("same-password").unwrap();
        let b = hasher.hash("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_bcrypt_verify_garbage_hash() {
        let result = fast_bcrypt().verify("whatever1", "not-a-hash");
        assert!(result.is_err());
    }

    #[test]
    fn test_argon2_hash_and_verify() {
        let hasher = Argon2Hasher;
        let hash = hasher.hash("TestPassword123!").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("TestPassword123!", &hash).unwrap());
        assert!(!hasher.verify("WrongPassword123!", &hash).unwrap());
    }

    #[test]
    fn test_argon2_invalid_hash_format() {
        assert!(matches!(
            Argon2Hasher.verify("whatever1", "not-a-phc-string"),
            Err(PasswordHashError::InvalidHashFormat)
        ));
    }

    #[test]
    fn test_hash_algorithm_from_str() {
        assert_eq!("bcrypt".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Bcrypt);
        assert_eq!("Argon2".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Argon2id);
        assert_eq!(" argon2id ".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Argon2id);
        assert!(matches!(
            "md5".parse::<HashAlgorithm>(),
            Err(PasswordHashError::UnsupportedAlgorithm(name)) if name == "md5"
        ));
    }

    #[test]
    fn test_configured_hasher_dispatch() {
        let hasher = ConfiguredHasher::from(HashAlgorithm::Argon2id);
        assert_eq!(hasher.algorithm(), "argon2id");

        let hash = hasher.hash("MySecure#Pass2024!").unwrap();
        assert!(hasher.verify("MySecure#Pass2024!", &hash).unwrap());

        assert_eq!(ConfiguredHasher::from(HashAlgorithm::Bcrypt).algorithm(), "bcrypt");
    }
}
