//! Measurement query, upsert and photo upload handlers.

use std::sync::Arc;

use super::super::media::upload_images;
use crate::domain::customer::{BodyMeasurements, CustomerError, Measurement};
use crate::domain::foundation::UserId;
use crate::ports::{MeasurementRepository, ObjectStorage};

/// Storage area for measurement photos.
pub const MEASUREMENT_IMAGE_AREA: &str = "measurements";

#[derive(Debug, Clone)]
pub struct GetMeasurementQuery {
    pub customer_id: UserId,
}

pub struct GetMeasurementHandler {
    repository: Arc<dyn MeasurementRepository>,
}

impl GetMeasurementHandler {
    pub fn new(repository: Arc<dyn MeasurementRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetMeasurementQuery) -> Result<Measurement, CustomerError> {
        self.repository
            .find_by_customer(&query.customer_id)
            .await?
            .ok_or(CustomerError::MeasurementNotFound(query.customer_id))
    }
}

/// Partial measurement update. Absent fields keep their stored value.
#[derive(Debug, Clone)]
pub struct UpsertMeasurementCommand {
    pub customer_id: UserId,
    pub values: BodyMeasurements,
}

pub struct UpsertMeasurementHandler {
    repository: Arc<dyn MeasurementRepository>,
}

impl UpsertMeasurementHandler {
    pub fn new(repository: Arc<dyn MeasurementRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpsertMeasurementCommand) -> Result<Measurement, CustomerError> {
        let mut measurement = self
            .repository
            .find_by_customer(&cmd.customer_id)
            .await?
            .unwrap_or_else(|| Measurement::new(cmd.customer_id));

        measurement.apply(&cmd.values)?;
        self.repository.upsert(&measurement).await?;

        Ok(measurement)
    }
}

#[derive(Debug, Clone)]
pub struct UploadMeasurementImagesCommand {
    pub customer_id: UserId,
    /// Base64 encoded images.
    pub images: Vec<String>,
}

pub struct UploadMeasurementImagesHandler {
    repository: Arc<dyn MeasurementRepository>,
    storage: Arc<dyn ObjectStorage>,
}

impl UploadMeasurementImagesHandler {
    pub fn new(repository: Arc<dyn MeasurementRepository>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self {
            repository,
            storage,
        }
    }

    /// Uploads photos and appends their URLs, creating the row if needed.
    pub async fn handle(
        &self,
        cmd: UploadMeasurementImagesCommand,
    ) -> Result<Measurement, CustomerError> {
        let mut measurement = self
            .repository
            .find_by_customer(&cmd.customer_id)
            .await?
            .unwrap_or_else(|| Measurement::new(cmd.customer_id));

        let urls = upload_images::<CustomerError>(
            self.storage.as_ref(),
            MEASUREMENT_IMAGE_AREA,
            cmd.customer_id,
            &cmd.images,
        )
        .await?;

        measurement.add_images(urls);
        self.repository.upsert(&measurement).await?;

        Ok(measurement)
    }
}
