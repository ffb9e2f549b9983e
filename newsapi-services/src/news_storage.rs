//! News Storage
//!
//! SQLite-based persistence for validated news records.

use std::path::Path;
use std::sync::Mutex;

use chrono::DateTime;
use newsapi_core::{News, NewsDraft};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

const SELECT_COLUMNS: &str =
    "id, title, source, author, url, url_image, description, content, published_at";

/// News storage service using SQLite
pub struct NewsStorage {
    conn: Mutex<Connection>,
}

impl NewsStorage {
    /// Create a new NewsStorage instance
    ///
    /// Creates the database file and tables if they don't exist.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, StorageError> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Io(format!("Failed to create database directory: {}", e))
            })?;
        }

        let conn = Connection::open(db_path.as_ref())?;

        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;

        info!("Initialized news storage at: {}", db_path.as_ref().display());
        Ok(storage)
    }

    /// Create an in-memory NewsStorage (useful for testing)
    pub fn new_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;

        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;

        Ok(storage)
    }

    /// Initialize the database schema
    ///
    /// `key` keeps insertion order; `id` is the article identity and is
    /// unique, so inserting a known article is a no-op.
    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockError)?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS news (
                key INTEGER PRIMARY KEY AUTOINCREMENT,
                id INTEGER NOT NULL UNIQUE,
                title TEXT NOT NULL,
                source TEXT NOT NULL,
                author TEXT NOT NULL,
                url TEXT,
                url_image TEXT,
                description TEXT NOT NULL,
                content TEXT NOT NULL,
                published_at TEXT NOT NULL,
                created_at INTEGER DEFAULT (strftime('%s', 'now'))
            );
            "#,
        )?;

        Ok(())
    }

    /// All stored news, oldest insertion first
    pub fn find_all(&self) -> Result<Vec<News>, StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockError)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM news ORDER BY key ASC",
            SELECT_COLUMNS
        ))?;

        let rows = stmt
            .query_map([], StoredRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(StoredRow::into_news).collect()
    }

    /// The news whose identity is `id`, if stored
    pub fn find_by_id(&self, id: i64) -> Result<Option<News>, StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockError)?;

        let row = conn
            .query_row(
                &format!("SELECT {} FROM news WHERE id = ?1", SELECT_COLUMNS),
                params![id],
                StoredRow::from_row,
            )
            .optional()?;

        row.map(StoredRow::into_news).transpose()
    }

    /// Every stored news whose identity equals `id` (zero or one row)
    pub fn find_by_id_equals(&self, id: i64) -> Result<Vec<News>, StorageError> {
        Ok(self.find_by_id(id)?.into_iter().collect())
    }

    /// Number of stored news
    pub fn count(&self) -> Result<usize, StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockError)?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM news", [], |row| row.get(0))?;

        Ok(count as usize)
    }

    /// Insert every news whose identity is not stored yet, in one transaction
    ///
    /// Returns the number of rows actually inserted. On error nothing from
    /// the batch is kept.
    pub fn save_all(&self, news: &[News]) -> Result<usize, StorageError> {
        let mut conn = self.conn.lock().map_err(|_| StorageError::LockError)?;
        let tx = conn.transaction()?;

        let mut stored = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT OR IGNORE INTO news
                (id, title, source, author, url, url_image, description, content, published_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
            )?;

            for item in news {
                stored += stmt.execute(params![
                    item.id(),
                    item.title(),
                    item.source(),
                    item.author(),
                    item.url(),
                    item.url_image(),
                    item.description(),
                    item.content(),
                    item.published_at().to_rfc3339(),
                ])?;
            }
        }
        tx.commit()?;

        debug!("Stored {} of {} news", stored, news.len());
        Ok(stored)
    }
}

#[cfg(test)]
impl NewsStorage {
    /// Run raw SQL against the underlying connection
    pub(crate) fn execute_batch(&self, sql: &str) -> Result<(), StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockError)?;
        conn.execute_batch(sql)?;
        Ok(())
    }
}

/// Columns of one `news` row
struct StoredRow {
    id: i64,
    title: String,
    source: String,
    author: String,
    url: Option<String>,
    url_image: Option<String>,
    description: String,
    content: String,
    published_at: String,
}

impl StoredRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            source: row.get(2)?,
            author: row.get(3)?,
            url: row.get(4)?,
            url_image: row.get(5)?,
            description: row.get(6)?,
            content: row.get(7)?,
            published_at: row.get(8)?,
        })
    }

    /// Rebuild the record through validation so a stored row can never
    /// produce an invalid `News`
    fn into_news(self) -> Result<News, StorageError> {
        let published_at = DateTime::parse_from_rfc3339(&self.published_at).map_err(|e| {
            StorageError::Corrupt {
                id: self.id,
                reason: format!("published_at '{}': {}", self.published_at, e),
            }
        })?;

        let news = News::new(NewsDraft {
            title: self.title,
            source: self.source,
            author: self.author,
            url: self.url,
            url_image: self.url_image,
            description: self.description,
            content: self.content,
            published_at: Some(published_at),
        })
        .map_err(|e| StorageError::Corrupt {
            id: self.id,
            reason: e.to_string(),
        })?;

        if news.id() != self.id {
            return Err(StorageError::Corrupt {
                id: self.id,
                reason: format!("identity mismatch, recomputed {}", news.id()),
            });
        }

        Ok(news)
    }
}

/// Errors that can occur during news storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Corrupt row for news {id}: {reason}")]
    Corrupt { id: i64, reason: String },

    #[error("Failed to acquire lock")]
    LockError,
}
