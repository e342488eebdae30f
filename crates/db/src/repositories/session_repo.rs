//! Refresh-token sessions in `user_sessions`.
//!
//! Rows are never deleted by the application; revocation stamps
//! `revoked_at`. Lookups happen by token digest only.

use journey_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::models::session::{NewSession, Session};

const SELECT: &str = "SELECT id, user_id, expires_at, revoked_at, created_at FROM user_sessions";

pub struct SessionRepo;

impl SessionRepo {
    pub async fn open(pool: &PgPool, session: &NewSession<'_>) -> Result<Session, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        insert(&mut conn, session).await
    }

    /// Spend the refresh token with digest `old_hash` and open a session
    /// for `new_hash` belonging to the same user, atomically.
    ///
    /// `Ok(None)` when `old_hash` is unknown, revoked or expired. Two
    /// concurrent rotations of one token cannot both succeed: the losing
    /// `UPDATE` matches no row once the winner commits.
    pub async fn rotate(
        pool: &PgPool,
        old_hash: &str,
        new_hash: &str,
        expires_at: Timestamp,
    ) -> Result<Option<Session>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_id: Option<DbId> = sqlx::query_scalar(
            "UPDATE user_sessions SET revoked_at = NOW()
             WHERE token_hash = $1 AND revoked_at IS NULL AND expires_at > NOW()
             RETURNING user_id",
        )
        .bind(old_hash)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(user_id) = user_id else {
            return Ok(None);
        };

        let replacement = NewSession {
            user_id,
            token_hash: new_hash,
            expires_at,
        };
        let session = insert(&mut tx, &replacement).await?;
        tx.commit().await?;
        Ok(Some(session))
    }

    /// Stamp every live session of `user_id` as revoked; returns how many.
    pub async fn revoke_all(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        sqlx::query(
            "UPDATE user_sessions SET revoked_at = NOW()
             WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(user_id)
        .execute(pool)
        .await
        .map(|done| done.rows_affected())
    }

    pub async fn find_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        sqlx::query_as::<_, Session>(&format!("{SELECT} WHERE token_hash = $1"))
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }
}

async fn insert(conn: &mut PgConnection, session: &NewSession<'_>) -> Result<Session, sqlx::Error> {
    sqlx::query_as::<_, Session>(
        "INSERT INTO user_sessions (user_id, token_hash, expires_at)
         VALUES ($1, $2, $3)
         RETURNING id, user_id, expires_at, revoked_at, created_at",
    )
    .bind(session.user_id)
    .bind(session.token_hash)
    .bind(session.expires_at)
    .fetch_one(conn)
    .await
}
