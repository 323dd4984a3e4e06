//! SQLite-backed customer store implementation.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use super::{CustomerError, CustomerRecord, CustomerStore};

/// SQLite-backed customer store.
///
/// The connection mutex serializes all access; the UNIQUE constraint on
/// `name` makes concurrent same-name inserts fail atomically.
pub struct SqliteCustomerStore {
    conn: Mutex<Connection>,
}

impl SqliteCustomerStore {
    /// Create a new SQLite customer store, creating the database file and
    /// tables if needed.
    pub fn new(path: &Path) -> Result<Self, CustomerError> {
        let conn = Connection::open(path).map_err(|e| CustomerError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite customer store (useful for testing).
    pub fn in_memory() -> Result<Self, CustomerError> {
        let conn =
            Connection::open_in_memory().map_err(|e| CustomerError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), CustomerError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS customers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                motto TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| CustomerError::Database(e.to_string()))?;

        Ok(())
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<CustomerRecord> {
        let id: i64 = row.get(0)?;
        let name: String = row.get(1)?;
        let motto: String = row.get(2)?;
        let status: String = row.get(3)?;
        let created_at_str: String = row.get(4)?;
        let updated_at_str: String = row.get(5)?;

        let created_at = Self::parse_timestamp(4, &created_at_str)?;
        let updated_at = Self::parse_timestamp(5, &updated_at_str)?;

        Ok(CustomerRecord {
            id,
            name,
            motto,
            status,
            created_at,
            updated_at,
        })
    }

    /// A timestamp that fails to parse means the row was written by
    /// something other than this store; surface it instead of guessing.
    fn parse_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    idx,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })
    }

    fn is_unique_violation(err: &rusqlite::Error) -> bool {
        matches!(
            err,
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

impl CustomerStore for SqliteCustomerStore {
    fn insert(
        &self,
        name: &str,
        motto: &str,
        status: &str,
    ) -> Result<CustomerRecord, CustomerError> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now();

        let result = conn.execute(
            "INSERT INTO customers (name, motto, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
            params![name, motto, status, now.to_rfc3339(), now.to_rfc3339()],
        );

        match result {
            Ok(_) => Ok(CustomerRecord {
                id: conn.last_insert_rowid(),
                name: name.to_string(),
                motto: motto.to_string(),
                status: status.to_string(),
                created_at: now,
                updated_at: now,
            }),
            Err(e) if Self::is_unique_violation(&e) => {
                Err(CustomerError::DuplicateName(name.to_string()))
            }
            Err(e) => Err(CustomerError::Database(e.to_string())),
        }
    }

    fn find_by_name(&self, name: &str) -> Result<Option<CustomerRecord>, CustomerError> {
        let conn = self.conn.lock().unwrap();

        let result = conn.query_row(
            "SELECT id, name, motto, status, created_at, updated_at FROM customers WHERE name = ?",
            params![name],
            Self::row_to_record,
        );

        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(CustomerError::Database(e.to_string())),
        }
    }

    fn update_status(
        &self,
        name: &str,
        new_status: &str,
    ) -> Result<CustomerRecord, CustomerError> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now();

        let changed = conn
            .execute(
                "UPDATE customers SET status = ?, updated_at = ? WHERE name = ?",
                params![new_status, now.to_rfc3339(), name],
            )
            .map_err(|e| CustomerError::Database(e.to_string()))?;

        if changed == 0 {
            return Err(CustomerError::NotFound(name.to_string()));
        }

        let updated = conn
            .query_row(
                "SELECT id, name, motto, status, created_at, updated_at FROM customers WHERE name = ?",
                params![name],
                Self::row_to_record,
            )
            .map_err(|e| CustomerError::Database(e.to_string()))?;

        Ok(updated)
    }

    fn list(&self) -> Result<Vec<CustomerRecord>, CustomerError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(
                "SELECT id, name, motto, status, created_at, updated_at FROM customers ORDER BY id",
            )
            .map_err(|e| CustomerError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_record)
            .map_err(|e| CustomerError::Database(e.to_string()))?;

        let mut records = Vec::new();
        for row_result in rows {
            let record = row_result.map_err(|e| CustomerError::Database(e.to_string()))?;
            records.push(record);
        }

        Ok(records)
    }
}
