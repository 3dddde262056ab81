//! Authentication adapters.
//!
//! Implementations of the `SessionValidator`, `TokenIssuer` and
//! `PasswordHasher` ports:
//!
//! - `jwt` - HS256 access tokens
//! - `argon2_hasher` - Argon2id password hashing
//! - `mock` - Test implementations that skip crypto

mod argon2_hasher;
mod jwt;
mod mock;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt::{JwtConfig, JwtTokenService};
pub use mock::{MockSessionValidator, MockTokenIssuer, PlaintextPasswordHasher};
