//! Accounts in `users`. Usernames and emails are unique (`uq_users_*`).

use journey_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateProfile, User};

const RETURNING: &str =
    "RETURNING id, username, email, password_hash, first_name, last_name, created_at, updated_at";

const SELECT: &str =
    "SELECT id, username, email, password_hash, first_name, last_name, created_at, updated_at \
     FROM users";

pub struct UserRepo;

impl UserRepo {
    pub async fn create(pool: &PgPool, new: &CreateUser) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, password_hash, first_name, last_name) \
             VALUES ($1, $2, $3, $4, $5) {RETURNING}"
        ))
        .bind(&new.username)
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!("{SELECT} WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Sign-in lookup: `login` may be either the username or the email.
    pub async fn find_by_login(pool: &PgPool, login: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!("{SELECT} WHERE username = $1 OR email = $1"))
            .bind(login)
            .fetch_optional(pool)
            .await
    }

    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        changes: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users \
             SET first_name = COALESCE($2, first_name), \
                 last_name = COALESCE($3, last_name), \
                 email = COALESCE($4, email) \
             WHERE id = $1 {RETURNING}"
        ))
        .bind(id)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .fetch_optional(pool)
        .await
    }

    /// Replace the stored hash. `false` when the user no longer exists.
    pub async fn set_password_hash(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let done = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(done.rows_affected() == 1)
    }
}
