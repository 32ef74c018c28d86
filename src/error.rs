//! Error taxonomy for the BFV core.

use thiserror::Error;

/// The full error taxonomy surfaced by this crate.
///
/// Every failure belongs to exactly one variant. There is no `CorruptedResult`
/// variant: a decryption whose noise has exceeded the noise budget still
/// returns a value, silently wrong, because the core has no side information
/// that would let it detect that case. See the crate's top-level docs.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    /// `Params` violate a structural constraint (§3 of the design doc).
    #[error("invalid parameters: {0}")]
    Parameter(String),

    /// A plaintext, key, or ciphertext is out of the domain a primitive expects.
    #[error("value out of domain: {0}")]
    Domain(String),

    /// A byte sequence could not be parsed into the expected shape.
    #[error("malformed serialized data: {0}")]
    Serialization(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
