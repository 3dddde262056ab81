//! Profile query and update handlers.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use super::super::media::upload_one;
use crate::domain::customer::{Customer, CustomerError, ProfileUpdate};
use crate::domain::foundation::UserId;
use crate::domain::media::decode_image;
use crate::ports::{CustomerRepository, ObjectStorage};

/// Storage area for profile pictures.
pub const PROFILE_IMAGE_AREA: &str = "customers";

// ════════════════════════════════════════════════════════════════════════════════
// Get profile
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub customer_id: UserId,
}

pub struct GetProfileHandler {
    repository: Arc<dyn CustomerRepository>,
}

impl GetProfileHandler {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetProfileQuery) -> Result<Customer, CustomerError> {
        self.repository
            .find_by_id(&query.customer_id)
            .await?
            .ok_or(CustomerError::CustomerNotFound(query.customer_id))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Update profile
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub customer_id: UserId,
    pub update: ProfileUpdate,
    /// Optional base64 profile picture.
    pub image: Option<String>,
}

pub struct UpdateProfileHandler {
    repository: Arc<dyn CustomerRepository>,
    storage: Arc<dyn ObjectStorage>,
}

impl UpdateProfileHandler {
    pub fn new(repository: Arc<dyn CustomerRepository>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self {
            repository,
            storage,
        }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<Customer, CustomerError> {
        self.handle_on(cmd, Utc::now().date_naive()).await
    }

    /// Same as `handle`, with "today" supplied for birth date checks.
    pub async fn handle_on(
        &self,
        cmd: UpdateProfileCommand,
        today: NaiveDate,
    ) -> Result<Customer, CustomerError> {
        let mut customer = self
            .repository
            .find_by_id(&cmd.customer_id)
            .await?
            .ok_or(CustomerError::CustomerNotFound(cmd.customer_id))?;

        customer.apply(cmd.update, today)?;

        // Decode before uploading so a bad image fails without side effects.
        if let Some(encoded) = cmd.image.as_deref() {
            let image = decode_image(0, encoded)?;
            let url = upload_one(
                self.storage.as_ref(),
                PROFILE_IMAGE_AREA,
                &customer.id.to_string(),
                image,
            )
            .await?;
            customer.set_image(url);
        }

        self.repository.update(&customer).await?;
        Ok(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCustomerRepository;
    use crate::adapters::storage::InMemoryObjectStorage;
    use crate::domain::customer::{Gender, Registration};
    use crate::domain::media::ImageError;

    async fn seeded() -> (InMemoryCustomerRepository, UserId) {
        let repo = InMemoryCustomerRepository::new();
        let (user, customer) = Registration::validate(
            "Ada",
            "Obi",
            "ada@example.com",
            "08012345678",
            "Passw0rd!",
            "Passw0rd!",
        )
        .unwrap()
        .into_records("hash".to_string());
        repo.create(&user, &customer).await.unwrap();
        (repo, user.id)
    }

    #[tokio::test]
    async fn get_profile_returns_customer() {
        let (repo, id) = seeded().await;
        let customer = GetProfileHandler::new(Arc::new(repo))
            .handle(GetProfileQuery { customer_id: id })
            .await
            .unwrap();
        assert_eq!(customer.first_name, "Ada");
    }

    #[tokio::test]
    async fn get_profile_unknown_is_not_found() {
        let repo = InMemoryCustomerRepository::new();
        let id = UserId::new();
        let err = GetProfileHandler::new(Arc::new(repo))
            .handle(GetProfileQuery { customer_id: id })
            .await
            .unwrap_err();
        assert_eq!(err, CustomerError::CustomerNotFound(id));
    }

    #[tokio::test]
    async fn update_applies_fields_and_uploads_image() {
        let (repo, id) = seeded().await;
        let storage = InMemoryObjectStorage::new("https://cdn.test");
        let handler = UpdateProfileHandler::new(Arc::new(repo.clone()), Arc::new(storage.clone()));

        let customer = handler
            .handle(UpdateProfileCommand {
                customer_id: id,
                update: ProfileUpdate {
                    gender: Some(Gender::Female),
                    address: Some("1 Marina, Lagos".to_string()),
                    ..Default::default()
                },
                image: Some("iVBORw0KGgoAAAAN".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(customer.gender, Some(Gender::Female));
        let url = customer.image_url.unwrap();
        assert!(url.starts_with(&format!("https://cdn.test/customers/{}/", id)));
        assert_eq!(storage.object_count().await, 1);
    }

    #[tokio::test]
    async fn bad_image_leaves_profile_untouched() {
        let (repo, id) = seeded().await;
        let storage = InMemoryObjectStorage::default();
        let handler = UpdateProfileHandler::new(Arc::new(repo.clone()), Arc::new(storage.clone()));

        let err = handler
            .handle(UpdateProfileCommand {
                customer_id: id,
                update: ProfileUpdate {
                    first_name: Some("Adaeze".to_string()),
                    ..Default::default()
                },
                image: Some("***".to_string()),
            })
            .await
            .unwrap_err();

        assert_eq!(err, CustomerError::InvalidImage(ImageError::NotBase64 { index: 0 }));
        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.first_name, "Ada");
        assert_eq!(storage.object_count().await, 0);
    }
}
