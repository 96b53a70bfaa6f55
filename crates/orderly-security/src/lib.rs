//! # Orderly Security
//!
//! Credential handling for Orderly. Passwords are stored only as Argon2id
//! hashes with a fresh salt per call.

pub mod password;

pub use password::*;
