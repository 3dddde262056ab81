//! User accounts and customer profiles.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::CustomerError;
use crate::domain::foundation::{Role, Timestamp, UserId, ValidationError};

/// Longest first or last name accepted.
pub const MAX_NAME_LEN: usize = 64;

/// Longest postal address accepted.
pub const MAX_ADDRESS_LEN: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(ValidationError::invalid_format(
                "gender",
                "must be 'male' or 'female'",
            )),
        }
    }
}

/// A login account. Customers and admins both have one.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub is_verified: bool,
    pub role: Role,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Customer profile, one-to-one with a `User` of role `customer`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Partial profile edit. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
}

impl Customer {
    /// Applies a partial update, validating every supplied field first.
    pub fn apply(&mut self, update: ProfileUpdate, today: NaiveDate) -> Result<(), CustomerError> {
        let first_name = update
            .first_name
            .map(|n| validate_name("first_name", &n))
            .transpose()?;
        let last_name = update
            .last_name
            .map(|n| validate_name("last_name", &n))
            .transpose()?;
        if let Some(dob) = update.date_of_birth {
            if dob > today {
                return Err(CustomerError::validation(
                    "date_of_birth",
                    "cannot be in the future",
                ));
            }
        }
        let address = update
            .address
            .map(|a| {
                let a = a.trim().to_string();
                if a.len() > MAX_ADDRESS_LEN {
                    Err(CustomerError::validation(
                        "address",
                        format!("must be at most {} characters", MAX_ADDRESS_LEN),
                    ))
                } else {
                    Ok(a)
                }
            })
            .transpose()?;

        if let Some(first_name) = first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            self.last_name = last_name;
        }
        if update.date_of_birth.is_some() {
            self.date_of_birth = update.date_of_birth;
        }
        if update.gender.is_some() {
            self.gender = update.gender;
        }
        if let Some(address) = address {
            self.address = if address.is_empty() { None } else { Some(address) };
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Records the URL of a newly uploaded profile image.
    pub fn set_image(&mut self, url: String) {
        self.image_url = Some(url);
        self.updated_at = Timestamp::now();
    }
}

/// Trims a name and checks it is non-empty and not too long.
pub fn validate_name(field: &str, value: &str) -> Result<String, CustomerError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field).into());
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CustomerError::validation(
            field,
            format!("must be at most {} characters", MAX_NAME_LEN),
        ));
    }
    Ok(trimmed.to_string())
}
