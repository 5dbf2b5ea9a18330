//! Read-only SQLite event store.
//!
//! The dashboard never writes: one read per run issues
//! `SELECT * FROM <table> ORDER BY id DESC` and materializes every column as
//! display text, with `id` and `alert` additionally captured typed for the
//! alerts view. The connection lives only inside [`EventStore::read`]; it is
//! released on every exit path, including query failure.

use std::path::{Path, PathBuf};

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

use lumen_types::{EventRow, EventTable};

/// Column required for the canonical ordering.
const ID_COLUMN: &str = "id";
/// Column the alerts view filters on.
const ALERT_COLUMN: &str = "alert";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("event database not found at {path}")]
    Missing { path: PathBuf },

    #[error("failed to open event database at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("'{name}' is not a valid event table name")]
    InvalidTable { name: String },

    #[error("event query failed: {source}")]
    Query {
        #[source]
        source: rusqlite::Error,
    },

    #[error("event table is missing required column '{column}'")]
    Schema { column: &'static str },
}

/// Reader for the event table.
pub struct EventStore;

impl EventStore {
    /// Read the whole event table, newest id first.
    ///
    /// An empty table is a legitimate `Ok`; every failure mode is a distinct
    /// [`StoreError`] so callers never confuse "no events" with "the store
    /// is broken".
    pub fn read(path: &Path, table: &str) -> Result<EventTable, StoreError> {
        if !path.exists() {
            return Err(StoreError::Missing {
                path: path.to_path_buf(),
            });
        }

        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
            |source| StoreError::Open {
                path: path.to_path_buf(),
                source,
            },
        )?;
        Self::read_with(&conn, table)
    }

    /// Read from an already-open connection. Used by tests with in-memory
    /// databases; production goes through [`EventStore::read`].
    pub fn read_with(conn: &Connection, table: &str) -> Result<EventTable, StoreError> {
        validate_table_name(table)?;

        let mut stmt = conn
            .prepare(&format!("SELECT * FROM {table} ORDER BY {ID_COLUMN} DESC"))
            .map_err(|source| StoreError::Query { source })?;

        let columns: Vec<String> = stmt.column_names().iter().map(ToString::to_string).collect();
        let id_index = column_index(&columns, ID_COLUMN)?;
        let alert_index = column_index(&columns, ALERT_COLUMN)?;

        let mut rows = stmt.query([]).map_err(|source| StoreError::Query { source })?;
        let mut table_rows = Vec::new();
        while let Some(row) = rows.next().map_err(|source| StoreError::Query { source })? {
            let id = row
                .get::<_, i64>(id_index)
                .map_err(|source| StoreError::Query { source })?;

            let mut cells = Vec::with_capacity(columns.len());
            let mut alert = None;
            for index in 0..columns.len() {
                let value = row
                    .get_ref(index)
                    .map_err(|source| StoreError::Query { source })?;
                if index == alert_index && !matches!(value, ValueRef::Null) {
                    alert = Some(value_to_display(value));
                }
                cells.push(value_to_display(value));
            }

            table_rows.push(EventRow { id, alert, cells });
        }

        tracing::debug!(rows = table_rows.len(), table, "Read event table");
        Ok(EventTable {
            columns,
            rows: table_rows,
        })
    }
}

/// The table name is interpolated into the statement, so it must be a plain
/// identifier.
fn validate_table_name(table: &str) -> Result<(), StoreError> {
    let mut chars = table.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidTable {
            name: table.to_string(),
        })
    }
}

fn column_index(columns: &[String], wanted: &'static str) -> Result<usize, StoreError> {
    columns
        .iter()
        .position(|c| c.eq_ignore_ascii_case(wanted))
        .ok_or(StoreError::Schema { column: wanted })
}

fn value_to_display(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => format!("<{} bytes>", b.len()),
    }
}
