use core::fmt;

use crate::errors::AppError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Backend-assigned identifier of a personal contact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh identifier for backends that assign ids themselves.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContactId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Opaque identity of the signed-in user.
///
/// Only used as a scoping key for backend calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone_number: String,
}

impl Contact {
    pub fn new(name: String, phone_number: String) -> Self {
        Contact {
            id: ContactId::generate(),
            name,
            phone_number,
        }
    }
}

/// Body sent to a backend when creating or updating a contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFields {
    pub name: String,
    pub phone_number: String,
}

pub enum ValidationReq {
    __,
}

impl ValidationReq {
    pub fn name_req() -> String {
        "Name must begin with alphabet, may contain spaces, dot, hyphen, and apostrophe between alphabets \
        and may end with number or alphabet. Name must not exceed 50 characters"
            .to_string()
    }

    pub fn phone_req() -> String {
        "Number must contain 3 to 15 digits and may begin with +".to_string()
    }
}

// Input checks for whoever collects contact details. The provider itself
// never calls these.

pub fn validate_name(name: &str) -> Result<bool, AppError> {
    let re = Regex::new(r"^[A-Za-z][A-Za-z\s'\-\.]*\w*$")?;
    Ok(name.chars().count() <= 50 && re.is_match(name))
}

pub fn validate_number(phone: &str) -> Result<bool, AppError> {
    // Short emergency numbers (112, 911) are valid too
    let re = Regex::new(r"^\+?\d{3,15}$")?;
    Ok(re.is_match(phone))
}
