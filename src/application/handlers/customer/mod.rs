//! Customer handlers.
//!
//! ## Commands
//! - Registering and logging in
//! - Updating the profile (with optional picture)
//! - Upserting measurements and uploading measurement photos
//! - Adding and removing cart rows
//!
//! ## Queries
//! - Profile, measurement and cart lookups

mod cart;
mod login;
mod measurement;
mod profile;
mod register_customer;

pub use cart::{
    AddToCartCommand, AddToCartHandler, ListCartHandler, ListCartQuery, RemoveCartItemCommand,
    RemoveCartItemHandler,
};
pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use measurement::{
    GetMeasurementHandler, GetMeasurementQuery, UploadMeasurementImagesCommand,
    UploadMeasurementImagesHandler, UpsertMeasurementCommand, UpsertMeasurementHandler,
    MEASUREMENT_IMAGE_AREA,
};
pub use profile::{
    GetProfileHandler, GetProfileQuery, UpdateProfileCommand, UpdateProfileHandler,
    PROFILE_IMAGE_AREA,
};
pub use register_customer::{RegisterCustomerCommand, RegisterCustomerHandler};
