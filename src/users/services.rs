use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::users::{
    dto::Registration,
    password::{hash_password, HashError},
    repo::{StoreError, UserStore},
    repo_types::{NewUser, User},
};

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("email already registered")]
    EmailTaken,
    /// Existence could not be determined; registration is aborted.
    #[error("email lookup failed: {0}")]
    Lookup(#[source] StoreError),
    #[error("password hashing failed: {0}")]
    Hash(#[source] HashError),
    #[error("create user failed: {0}")]
    Insert(#[source] StoreError),
}

/// Check for a duplicate email, hash the password and insert the user.
#[instrument(skip(store, registration), fields(email = %registration.email))]
pub async fn register_user(
    store: &dyn UserStore,
    registration: Registration,
) -> Result<User, RegisterError> {
    if store
        .email_exists(&registration.email)
        .await
        .map_err(RegisterError::Lookup)?
    {
        warn!("email already registered");
        return Err(RegisterError::EmailTaken);
    }

    let Registration {
        first_name,
        last_name,
        email,
        password,
    } = registration;

    let password_hash = hash_password(password).await.map_err(RegisterError::Hash)?;

    let new_user = NewUser {
        first_name,
        last_name,
        email,
        password_hash,
        social_login: false,
    };

    match store.insert(new_user).await {
        Ok(user) => {
            info!(user_id = %user.id, "user registered");
            Ok(user)
        }
        Err(StoreError::DuplicateEmail) => {
            warn!("email registered concurrently");
            Err(RegisterError::EmailTaken)
        }
        Err(e) => Err(RegisterError::Insert(e)),
    }
}
