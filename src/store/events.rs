//! Event persistence
//!
//! CRUD over the `events` table. Listing is ordered by event date, then by
//! creation time so that events on the same day keep their insertion order.

use rusqlite::{params, OptionalExtension, Row};

use super::types::{from_millis, now_millis};
use super::{Event, NewEvent, Store, StoreError, StoreResult};

const EVENT_COLUMNS: &str =
    "id, title, description, date_ms, image_url, created_by, created_at_ms, updated_at_ms";

fn event_from_row(row: &Row<'_>) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        date: from_millis(row.get(3)?),
        image_url: row.get(4)?,
        created_by: row.get(5)?,
        created_at: from_millis(row.get(6)?),
        updated_at: from_millis(row.get(7)?),
    })
}

impl Store {
    /// List all events
    pub async fn list_events(&self) -> StoreResult<Vec<Event>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {} FROM events ORDER BY date_ms ASC, created_at_ms ASC, rowid ASC",
            EVENT_COLUMNS
        ))?;

        let events = stmt
            .query_map([], event_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(events)
    }

    /// Get a single event by id
    pub async fn get_event(&self, id: &str) -> StoreResult<Event> {
        let conn = self.conn.lock().await;

        conn.query_row(
            &format!("SELECT {} FROM events WHERE id = ?", EVENT_COLUMNS),
            params![id],
            event_from_row,
        )
        .optional()?
        .ok_or_else(|| StoreError::EventNotFound(id.to_string()))
    }

    /// Create a new event and return the stored record
    pub async fn create_event(
        &self,
        new: NewEvent,
        created_by: Option<&str>,
    ) -> StoreResult<Event> {
        let now = now_millis();
        let event = Event {
            id: uuid::Uuid::new_v4().to_string(),
            title: new.title,
            description: new.description,
            date: new.date,
            image_url: new.image_url,
            created_by: created_by.map(str::to_string),
            created_at: now,
            updated_at: now,
        };

        let conn = self.conn.lock().await;
        conn.execute(
            &format!(
                "INSERT INTO events ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                EVENT_COLUMNS
            ),
            params![
                event.id,
                event.title,
                event.description,
                event.date.timestamp_millis(),
                event.image_url,
                event.created_by,
                event.created_at.timestamp_millis(),
                event.updated_at.timestamp_millis(),
            ],
        )?;

        Ok(event)
    }

    /// Replace the editable fields of an event
    pub async fn update_event(&self, id: &str, new: NewEvent) -> StoreResult<Event> {
        let now = now_millis().timestamp_millis();
        let conn = self.conn.lock().await;

        let changed = conn.execute(
            "UPDATE events
             SET title = ?, description = ?, date_ms = ?, image_url = ?, updated_at_ms = ?
             WHERE id = ?",
            params![
                new.title,
                new.description,
                new.date.timestamp_millis(),
                new.image_url,
                now,
                id
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::EventNotFound(id.to_string()));
        }

        conn.query_row(
            &format!("SELECT {} FROM events WHERE id = ?", EVENT_COLUMNS),
            params![id],
            event_from_row,
        )
        .map_err(StoreError::from)
    }

    /// Delete an event
    pub async fn delete_event(&self, id: &str) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM events WHERE id = ?", params![id])?;

        if changed == 0 {
            return Err(StoreError::EventNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Number of stored events
    pub async fn event_count(&self) -> StoreResult<usize> {
        let conn = self.conn.lock().await;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::parse_event_date;

    fn draft(title: &str, date: &str) -> NewEvent {
        NewEvent::new(title, format!("{} description", title), parse_event_date(date).unwrap())
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = Store::open_in_memory().unwrap();

        let created = store
            .create_event(
                draft("Offsite", "2024-06-10").image_url("/uploads/x.png"),
                Some("ada@example.com"),
            )
            .await
            .unwrap();

        let fetched = store.get_event(&created.id).await.unwrap();
        assert_eq!(fetched.title, "Offsite");
        assert_eq!(fetched.image_url, "/uploads/x.png");
        assert_eq!(fetched.created_by.as_deref(), Some("ada@example.com"));
        assert_eq!(fetched.date, parse_event_date("2024-06-10").unwrap());
    }

    #[tokio::test]
    async fn test_created_record_matches_stored_row() {
        let store = Store::open_in_memory().unwrap();
        let created = store.create_event(draft("Launch", "2024-06-01"), None).await.unwrap();

        let fetched = store.get_event(&created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(store.list_events().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_list_orders_by_date() {
        let store = Store::open_in_memory().unwrap();

        store.create_event(draft("Later", "2024-09-01"), None).await.unwrap();
        store.create_event(draft("Sooner", "2024-01-15"), None).await.unwrap();
        store.create_event(draft("Same day", "2024-09-01"), None).await.unwrap();

        let titles: Vec<_> = store
            .list_events()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();

        assert_eq!(titles, vec!["Sooner", "Later", "Same day"]);
    }

    #[tokio::test]
    async fn test_update_event() {
        let store = Store::open_in_memory().unwrap();
        let created = store.create_event(draft("Draft", "2024-03-01"), None).await.unwrap();

        let updated = store
            .update_event(&created.id, draft("Final", "2024-03-02"))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_event() {
        let store = Store::open_in_memory().unwrap();
        let result = store.update_event("nope", draft("X", "2024-03-01")).await;
        assert!(matches!(result, Err(StoreError::EventNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_event() {
        let store = Store::open_in_memory().unwrap();
        let created = store.create_event(draft("Gone", "2024-03-01"), None).await.unwrap();

        store.delete_event(&created.id).await.unwrap();
        assert_eq!(store.event_count().await.unwrap(), 0);

        let again = store.delete_event(&created.id).await;
        assert!(matches!(again, Err(StoreError::EventNotFound(_))));
    }
}
