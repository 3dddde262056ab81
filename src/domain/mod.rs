//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, auth, errors)
//! - `customer` - Accounts, profiles, registration rules, measurements
//! - `catalog` - Categories, products, fabrics, fabric prices
//! - `cart` - Cart rows and their payment state
//! - `payment` - Paystack events and webhook verification
//! - `media` - Base64 image decoding

pub mod cart;
pub mod catalog;
pub mod customer;
pub mod foundation;
pub mod media;
pub mod payment;
