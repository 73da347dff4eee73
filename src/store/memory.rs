use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::models::{Event, EventRow, NewEvent};
use crate::store::{EventStore, StoreError};

/// Test double with the same ordering and id rules as the MySQL table.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    rows: Mutex<Vec<EventRow>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.lock().await.is_empty()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn create(&self, event: NewEvent) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().await;
        let id = rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;

        rows.push(EventRow {
            id,
            title: event.title,
            description: event.description,
            image_url: event.image_url,
            date: Some(event.date),
            location: event.location,
        });
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Event>, StoreError> {
        let mut rows = self.rows.lock().await.clone();
        rows.sort_by_key(|row| (row.date, row.id));
        Ok(rows.into_iter().map(Event::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_event(title: &str, date: (i32, u32, u32)) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            description: None,
            image_url: None,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            location: None,
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_date_then_id() {
        let store = InMemoryEventStore::new();
        store.create(new_event("June", (2024, 6, 1))).await.unwrap();
        store.create(new_event("May", (2024, 5, 1))).await.unwrap();
        store.create(new_event("June again", (2024, 6, 1))).await.unwrap();

        let events = store.list().await.unwrap();
        let ids: Vec<i32> = events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(events[0].date.as_deref(), Some("Wed, 01 May 2024 00:00:00 GMT"));
    }

    #[tokio::test]
    async fn test_list_is_stable_without_writes() {
        let store = InMemoryEventStore::new();
        store.create(new_event("A", (2024, 1, 2))).await.unwrap();
        store.create(new_event("B", (2024, 1, 1))).await.unwrap();

        let first = store.list().await.unwrap();
        let second = store.list().await.unwrap();
        assert_eq!(first, second);
    }
}
