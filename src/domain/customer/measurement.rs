//! Body measurements recorded for a customer.
//!
//! One row per customer, created on the first upsert and merged in place
//! afterwards. Values are in centimetres and every field is optional.

use serde::{Deserialize, Serialize};

use super::errors::CustomerError;
use crate::domain::foundation::{Timestamp, UserId};

macro_rules! body_measurements {
    ($($field:ident),* $(,)?) => {
        /// The set of optional body measurements.
        ///
        /// Doubles as a partial update: `None` means "leave unchanged".
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct BodyMeasurements {
            $(
                #[serde(default)]
                pub $field: Option<f64>,
            )*
        }

        impl BodyMeasurements {
            /// Column names, in declaration order.
            pub const FIELDS: &'static [&'static str] = &[$(stringify!($field)),*];

            /// `(name, value)` pairs in declaration order.
            pub fn values(&self) -> Vec<(&'static str, Option<f64>)> {
                vec![$((stringify!($field), self.$field)),*]
            }

            /// Sets a field by column name. Returns false for unknown names.
            pub fn set(&mut self, name: &str, value: Option<f64>) -> bool {
                match name {
                    $(stringify!($field) => {
                        self.$field = value;
                        true
                    })*
                    _ => false,
                }
            }

            /// Overwrites the fields that are present in `update`.
            pub fn merge(&mut self, update: &BodyMeasurements) {
                $(
                    if update.$field.is_some() {
                        self.$field = update.$field;
                    }
                )*
            }
        }
    };
}

body_measurements!(
    round_head,
    neck,
    shoulder,
    arm_hole,
    sleeve,
    flexed_biceps,
    wrist,
    back,
    front_chest,
    round_chest,
    stomach,
    hip,
    waist,
    crotch,
    thigh,
    knee,
    ankle,
    pant_length,
    inseam,
);

impl BodyMeasurements {
    /// Every supplied value must be a finite, non-negative number.
    pub fn validate(&self) -> Result<(), CustomerError> {
        for (field, value) in self.values() {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(CustomerError::validation(
                        field,
                        "must be a non-negative number",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.values().iter().all(|(_, v)| v.is_none())
    }
}

/// A customer's measurement row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub customer_id: UserId,
    #[serde(flatten)]
    pub values: BodyMeasurements,
    /// URLs of reference photos.
    pub images: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Measurement {
    /// Creates an empty row for `customer_id`.
    pub fn new(customer_id: UserId) -> Self {
        let now = Timestamp::now();
        Self {
            customer_id,
            values: BodyMeasurements::default(),
            images: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Validates and merges a partial update.
    pub fn apply(&mut self, update: &BodyMeasurements) -> Result<(), CustomerError> {
        update.validate()?;
        self.values.merge(update);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Appends uploaded photo URLs.
    pub fn add_images(&mut self, urls: impl IntoIterator<Item = String>) {
        self.images.extend(urls);
        self.updated_at = Timestamp::now();
    }
}
