//! Password hashing using Argon2.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher as _, SaltString},
    Argon2, Params,
};
use orderly_core::{OrderlyError, OrderlyResult};
use std::sync::Arc;
use tracing::debug;

/// Interface for password hashing operations.
///
/// Hashing is CPU-bound and performs no I/O.
pub trait PasswordHasherInterface: Send + Sync {
    /// Derives a salted one-way hash of `password`.
    fn hash(&self, password: &str) -> OrderlyResult<String>;
}

/// Password hasher service using Argon2id.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Arc<Argon2<'static>>,
}

impl PasswordHasher {
    /// Creates a new password hasher with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(Params::DEFAULT)
    }

    /// Creates a new password hasher with custom parameters.
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
        Self {
            argon2: Arc::new(argon2),
        }
    }

    /// Creates a password hasher whose work factor is `cost` iterations.
    ///
    /// Memory and parallelism stay at the Argon2 defaults. A cost the
    /// parameters reject falls back to the defaults.
    #[must_use]
    pub fn with_cost(cost: u32) -> Self {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            cost.max(1),
            Params::DEFAULT_P_COST,
            None,
        )
        .unwrap_or(Params::DEFAULT);

        Self::with_params(params)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasherInterface for PasswordHasher {
    fn hash(&self, password: &str) -> OrderlyResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| OrderlyError::Internal(format!("Failed to hash password: {e}")))?;

        debug!("Password hashed");
        Ok(hash.to_string())
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}
