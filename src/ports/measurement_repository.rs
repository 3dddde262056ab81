//! Measurement repository port.

use crate::domain::customer::Measurement;
use crate::domain::foundation::{DomainError, UserId};
use async_trait::async_trait;

/// One measurement row per customer.
#[async_trait]
pub trait MeasurementRepository: Send + Sync {
    async fn find_by_customer(
        &self,
        customer_id: &UserId,
    ) -> Result<Option<Measurement>, DomainError>;

    /// Inserts the row, or overwrites the existing row for the customer.
    async fn upsert(&self, measurement: &Measurement) -> Result<(), DomainError>;
}
