use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use thiserror::Error;
use tokio::task::{spawn_blocking, JoinError};

#[derive(Debug, Error)]
pub enum HashError {
    #[error("argon2: {0}")]
    Argon2(argon2::password_hash::Error),
    #[error("hashing task did not complete: {0}")]
    Task(#[from] JoinError),
}

/// Argon2id PHC string for `plain`, salted from the OS RNG.
///
/// Runs on the blocking pool so a slow hash never holds an async worker.
pub async fn hash_password(plain: String) -> Result<String, HashError> {
    spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(HashError::Argon2)
    })
    .await?
}

#[cfg(test)]
pub fn verify_password(plain: &str, hash: &str) -> bool {
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(plain.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
