//! Password hashing port.

use crate::domain::foundation::AuthError;

/// One-way password hashing.
///
/// Hashes are self-describing strings (PHC format), so `verify` needs no
/// extra parameters.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Returns true if `password` matches `hash`.
    ///
    /// A malformed hash is an error, not a mismatch.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}
