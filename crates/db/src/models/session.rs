use journey_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A refresh-token session.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Session {
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
}

/// A session about to be opened for `user_id`.
#[derive(Debug)]
pub struct NewSession<'a> {
    pub user_id: DbId,
    pub token_hash: &'a str,
    pub expires_at: Timestamp,
}
