//! Shared image upload step used by profile, measurement and product handlers.

use std::fmt::Display;

use crate::domain::foundation::DomainError;
use crate::domain::media::{decode_images, DecodedImage, ImageError};
use crate::ports::ObjectStorage;

/// Decodes a batch of base64 images and uploads them.
///
/// Every entry is decoded before anything is uploaded, so a bad entry
/// leaves storage untouched. Returns the public URLs in input order.
pub async fn upload_images<E>(
    storage: &dyn ObjectStorage,
    area: &str,
    owner: impl Display,
    encoded: &[String],
) -> Result<Vec<String>, E>
where
    E: From<ImageError> + From<DomainError>,
{
    let images = decode_images(encoded)?;
    let owner = owner.to_string();

    let mut urls = Vec::with_capacity(images.len());
    for image in images {
        urls.push(upload_one(storage, area, &owner, image).await?);
    }

    tracing::info!(area, owner = %owner, count = urls.len(), "Uploaded images");
    Ok(urls)
}

/// Uploads one already decoded image.
pub async fn upload_one(
    storage: &dyn ObjectStorage,
    area: &str,
    owner: &str,
    image: DecodedImage,
) -> Result<String, DomainError> {
    let key = image.object_key(area, owner);
    storage
        .put_object(&key, image.bytes, image.format.content_type())
        .await
}
