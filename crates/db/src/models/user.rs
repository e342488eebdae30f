use journey_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An account row. Holds the Argon2 hash, so it is never serialized;
/// responses go through [`PublicUser`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: Timestamp,
}

impl From<User> for PublicUser {
    fn from(
        User {
            id,
            username,
            email,
            first_name,
            last_name,
            created_at,
            ..
        }: User,
    ) -> Self {
        Self {
            id,
            username,
            email,
            first_name,
            last_name,
            created_at,
        }
    }
}

/// Insert payload; `password_hash` is already an Argon2 PHC string.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Fields a user may change on their own account. `None` leaves a column alone.
#[derive(Debug, Default)]
pub struct UpdateProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}
