//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - JWT tokens and Argon2 password hashing
//! - `http` - axum REST API
//! - `memory` - In-memory repositories
//! - `paystack` - Payment provider
//! - `postgres` - PostgreSQL repositories
//! - `storage` - S3-compatible image storage

pub mod auth;
pub mod http;
pub mod memory;
pub mod paystack;
pub mod postgres;
pub mod storage;
