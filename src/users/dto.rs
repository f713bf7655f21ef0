use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::users::repo_types::User;

/// Request body for user registration.
///
/// Absent and `null` fields deserialize to an empty string, so they fail the
/// `required` rule next to the other field errors instead of aborting the parse.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "present"),
        length(max = 255, message = "firstName must be at most 255 characters")
    )]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "present"),
        length(max = 255, message = "lastName must be at most 255 characters")
    )]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "present"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "present"),
        length(min = 8, max = 255, message = "password must be 8 to 255 characters")
    )]
    pub password: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn present(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The fields of a [`RegisterRequest`] that passed validation. The email is
/// kept as submitted; lookups and the unique index compare it case-insensitively.
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
        }
    }
}

/// Public view of a created user. The password hash is never part of it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    #[serde(rename = "ID")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<User> for RegisteredUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        }
    }
}
