//! Member persistence

use rusqlite::{params, OptionalExtension, Row};

use super::types::{from_millis, now_millis};
use super::{Member, Store, StoreError, StoreResult};

fn member_from_row(row: &Row<'_>) -> rusqlite::Result<Member> {
    Ok(Member {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        role: row.get(3)?,
        joined_at: from_millis(row.get(4)?),
    })
}

/// Normalize an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl Store {
    /// List members in the order they joined
    pub async fn list_members(&self) -> StoreResult<Vec<Member>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare_cached(
            "SELECT id, name, email, role, joined_at_ms FROM members
             ORDER BY joined_at_ms ASC, rowid ASC",
        )?;

        let members = stmt
            .query_map([], member_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(members)
    }

    /// Look up a member by email (case-insensitive)
    pub async fn find_member(&self, email: &str) -> StoreResult<Option<Member>> {
        let conn = self.conn.lock().await;

        let member = conn
            .query_row(
                "SELECT id, name, email, role, joined_at_ms FROM members WHERE email = ?",
                params![normalize_email(email)],
                member_from_row,
            )
            .optional()?;

        Ok(member)
    }

    /// Register a new member
    pub async fn add_member(&self, name: &str, email: &str, role: &str) -> StoreResult<Member> {
        let member = Member {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            email: normalize_email(email),
            role: role.trim().to_string(),
            joined_at: now_millis(),
        };

        let conn = self.conn.lock().await;
        let result = conn.execute(
            "INSERT INTO members (id, name, email, role, joined_at_ms) VALUES (?, ?, ?, ?, ?)",
            params![
                member.id,
                member.name,
                member.email,
                member.role,
                member.joined_at.timestamp_millis()
            ],
        );

        match result.map_err(StoreError::from) {
            Ok(_) => Ok(member),
            Err(e) if e.is_constraint_violation() => Err(StoreError::DuplicateMember(member.email)),
            Err(e) => Err(e),
        }
    }

    /// Remove a member and any sessions they hold
    pub async fn remove_member(&self, email: &str) -> StoreResult<()> {
        let email = normalize_email(email);
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        let changed = tx.execute("DELETE FROM members WHERE email = ?", params![email])?;
        if changed == 0 {
            return Err(StoreError::MemberNotFound(email));
        }
        tx.execute("DELETE FROM sessions WHERE email = ?", params![email])?;

        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_and_list_members() {
        let store = Store::open_in_memory().unwrap();

        store.add_member("Ada", "Ada@Example.com", "owner").await.unwrap();
        store.add_member("Grace", "grace@example.com", "member").await.unwrap();

        let members = store.list_members().await.unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].email, "ada@example.com");
        assert_eq!(members[1].name, "Grace");
    }

    #[tokio::test]
    async fn test_duplicate_member() {
        let store = Store::open_in_memory().unwrap();

        store.add_member("Ada", "ada@example.com", "owner").await.unwrap();
        let dup = store.add_member("Ada 2", " ADA@example.com ", "member").await;

        assert!(matches!(dup, Err(StoreError::DuplicateMember(e)) if e == "ada@example.com"));
    }

    #[tokio::test]
    async fn test_added_member_matches_stored_row() {
        let store = Store::open_in_memory().unwrap();
        let added = store.add_member("Ada", "ada@example.com", "owner").await.unwrap();

        let found = store.find_member("ada@example.com").await.unwrap();
        assert_eq!(found, Some(added));
    }

    #[tokio::test]
    async fn test_find_member_case_insensitive() {
        let store = Store::open_in_memory().unwrap();
        store.add_member("Ada", "ada@example.com", "owner").await.unwrap();

        assert!(store.find_member("ADA@example.com").await.unwrap().is_some());
        assert!(store.find_member("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_member() {
        let store = Store::open_in_memory().unwrap();
        store.add_member("Ada", "ada@example.com", "owner").await.unwrap();

        store.remove_member("ada@example.com").await.unwrap();
        assert!(store.list_members().await.unwrap().is_empty());

        let missing = store.remove_member("ada@example.com").await;
        assert!(matches!(missing, Err(StoreError::MemberNotFound(_))));
    }
}
