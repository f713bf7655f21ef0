use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,                   // assigned by the database, never changes
    pub first_name: String,
    pub last_name: String,
    pub email: String,              // as submitted; unique on lower(email)
    pub password_hash: String,      // Argon2 PHC string, never leaves the server
    pub social_login: bool,
    pub created_at: OffsetDateTime,
}

/// Row to insert; the id and timestamp come from the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub social_login: bool,
}
