//! Tailor Shop - backend for a bespoke tailoring business.
//!
//! Customers register, record body measurements, browse the catalog and
//! pay for their cart through Paystack. Admins manage categories, products
//! and per-category fabric prices.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
