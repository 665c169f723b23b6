//! Session persistence
//!
//! Sessions are opaque UUID tokens with an absolute expiry. Expired rows are
//! treated as absent and removed when they are looked up or purged.

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, OptionalExtension};

use super::types::{from_millis, now_millis};
use super::{Session, Store, StoreResult};

impl Store {
    /// Issue a new session for `email` valid for `ttl`
    pub async fn create_session(&self, email: &str, ttl: Duration) -> StoreResult<Session> {
        let session = Session {
            token: uuid::Uuid::new_v4().to_string(),
            email: super::members::normalize_email(email),
            expires_at: from_millis((now_millis() + ttl).timestamp_millis()),
        };

        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO sessions (token, email, expires_at_ms) VALUES (?, ?, ?)",
            params![
                session.token,
                session.email,
                session.expires_at.timestamp_millis()
            ],
        )?;

        Ok(session)
    }

    /// Resolve a token to a live session
    pub async fn find_session(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Session>> {
        let conn = self.conn.lock().await;

        let session = conn
            .query_row(
                "SELECT token, email, expires_at_ms FROM sessions WHERE token = ?",
                params![token],
                |row| {
                    Ok(Session {
                        token: row.get(0)?,
                        email: row.get(1)?,
                        expires_at: from_millis(row.get(2)?),
                    })
                },
            )
            .optional()?;

        match session {
            Some(s) if s.is_expired(now) => {
                conn.execute("DELETE FROM sessions WHERE token = ?", params![token])?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    /// Revoke a session. Unknown tokens are ignored.
    pub async fn delete_session(&self, token: &str) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM sessions WHERE token = ?", params![token])?;
        Ok(())
    }

    /// Remove every session that expired before `now`
    pub async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> StoreResult<usize> {
        let conn = self.conn.lock().await;
        let removed = conn.execute(
            "DELETE FROM sessions WHERE expires_at_ms <= ?",
            params![now.timestamp_millis()],
        )?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find_session() {
        let store = Store::open_in_memory().unwrap();
        let session = store
            .create_session("Ada@example.com", Duration::hours(1))
            .await
            .unwrap();

        let found = store.find_session(&session.token, Utc::now()).await.unwrap();
        assert_eq!(session.email, "ada@example.com");
        assert_eq!(found, Some(session));
    }

    #[tokio::test]
    async fn test_expired_session_is_absent() {
        let store = Store::open_in_memory().unwrap();
        let session = store
            .create_session("ada@example.com", Duration::hours(1))
            .await
            .unwrap();

        let later = Utc::now() + Duration::hours(2);
        assert!(store.find_session(&session.token, later).await.unwrap().is_none());

        // The expired row was removed on lookup
        assert!(store
            .find_session(&session.token, Utc::now())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_session() {
        let store = Store::open_in_memory().unwrap();
        let session = store
            .create_session("ada@example.com", Duration::hours(1))
            .await
            .unwrap();

        store.delete_session(&session.token).await.unwrap();
        store.delete_session(&session.token).await.unwrap();

        assert!(store
            .find_session(&session.token, Utc::now())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_purge_expired_sessions() {
        let store = Store::open_in_memory().unwrap();
        store.create_session("a@example.com", Duration::minutes(1)).await.unwrap();
        store.create_session("b@example.com", Duration::days(1)).await.unwrap();

        let removed = store
            .purge_expired_sessions(Utc::now() + Duration::hours(1))
            .await
            .unwrap();
        assert_eq!(removed, 1);
    }
}
