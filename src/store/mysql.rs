use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;
use sqlx::mysql::MySqlConnection;
use sqlx::Connection;
use tracing::{error, info};

use crate::config::DatabaseConfig;
use crate::models::{Event, EventRow, NewEvent};
use crate::store::{EventStore, StoreError};

const CREATE_EVENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS events (
        id INT AUTO_INCREMENT PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        description TEXT,
        image_url VARCHAR(255),
        date DATE NOT NULL,
        location VARCHAR(255)
    )
"#;

const INSERT_EVENT: &str = r#"
    INSERT INTO events (title, description, image_url, `date`, location)
    VALUES (?, ?, ?, ?, ?)
"#;

const SELECT_EVENTS: &str = r#"
    SELECT id, title, description, image_url, `date`, location
    FROM events
    ORDER BY `date` ASC, id ASC
"#;

type ConnFuture<'c, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'c>>;

/// MySQL-backed store. Holds only settings; every call provisions its own
/// connection and closes it before returning.
#[derive(Debug, Clone)]
pub struct MySqlEventStore {
    config: DatabaseConfig,
}

impl MySqlEventStore {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    /// Single connection attempt; no retry.
    pub async fn connect(&self) -> Result<MySqlConnection, StoreError> {
        let options = self.config.connect_options()?;
        MySqlConnection::connect_with(&options)
            .await
            .map_err(StoreError::Connectivity)
    }

    /// Runs `op` on a fresh connection and closes it whatever `op` returned.
    async fn with_connection<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut MySqlConnection) -> ConnFuture<'c, T> + Send,
    {
        let mut conn = self.connect().await?;
        let result = op(&mut conn).await;

        if let Err(e) = conn.close().await {
            error!(error = ?e, "Failed to close database connection");
        }

        result
    }

    /// Creates the `events` table if it does not exist yet. Safe to call on every request.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.with_connection(|conn| {
            Box::pin(async move {
                sqlx::query(CREATE_EVENTS_TABLE)
                    .execute(&mut *conn)
                    .await
                    .map_err(|e| {
                        error!(error = ?e, "Failed to create or verify the events table");
                        StoreError::Schema(e)
                    })?;
                Ok(())
            })
        })
        .await?;

        info!("Events table created or already exists");
        Ok(())
    }
}

#[async_trait]
impl EventStore for MySqlEventStore {
    async fn create(&self, event: NewEvent) -> Result<(), StoreError> {
        self.ensure_schema().await?;

        self.with_connection(move |conn| {
            Box::pin(async move {
                sqlx::query(INSERT_EVENT)
                    .bind(&event.title)
                    .bind(&event.description)
                    .bind(&event.image_url)
                    .bind(event.date)
                    .bind(&event.location)
                    .execute(&mut *conn)
                    .await?;
                Ok(())
            })
        })
        .await
    }

    async fn list(&self) -> Result<Vec<Event>, StoreError> {
        self.ensure_schema().await?;

        let rows = self
            .with_connection(|conn| {
                Box::pin(async move {
                    let rows = sqlx::query_as::<_, EventRow>(SELECT_EVENTS)
                        .fetch_all(&mut *conn)
                        .await?;
                    Ok(rows)
                })
            })
            .await?;

        Ok(rows.into_iter().map(Event::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_configuration_fails_before_connecting() {
        let store = MySqlEventStore::new(DatabaseConfig::default());

        let err = store.list().await.unwrap_err();
        assert!(matches!(err, StoreError::Configuration { ref missing } if missing.len() == 4));
        assert_eq!(
            err.to_string(),
            "Missing environment variables: DB_HOST, DB_USER, DB_PASSWORD, DB_NAME"
        );
    }

    #[test]
    fn test_select_lists_every_column_in_order() {
        let columns = SELECT_EVENTS
            .split("FROM")
            .next()
            .unwrap()
            .replace("SELECT", "")
            .replace('`', "");
        let columns: Vec<&str> = columns.split(',').map(str::trim).collect();
        assert_eq!(
            columns,
            vec!["id", "title", "description", "image_url", "date", "location"]
        );
    }
}
