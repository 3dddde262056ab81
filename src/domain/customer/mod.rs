//! Customer domain module.
//!
//! # Module Structure
//!
//! - `profile` - User accounts and customer profiles
//! - `registration` - Validation of sign-up input
//! - `password_policy` - Password complexity rules
//! - `measurement` - Body measurements
//! - `errors` - CustomerError

mod errors;
mod measurement;
mod password_policy;
mod profile;
mod registration;

pub use errors::CustomerError;
pub use measurement::{BodyMeasurements, Measurement};
pub use password_policy::{meets_policy, PASSWORD_POLICY_MESSAGE};
pub use profile::{Customer, Gender, ProfileUpdate, User};
pub use registration::{normalize_email, Registration};
