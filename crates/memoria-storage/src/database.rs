// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management.
//!
//! Wraps a `tokio-rusqlite` connection in WAL mode. All statements funnel
//! through a single background thread, which gives us a single-writer
//! concurrency model without explicit locking.

use memoria_core::MemoriaError;
use tokio_rusqlite::Connection;
use tracing::debug;

use crate::migrations::run_migrations;

/// Handle to the SQLite database.
///
/// Cheap to clone; all clones share the same underlying connection.
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at `path`, configure pragmas, and run
    /// all pending migrations.
    pub async fn open(path: &str) -> Result<Self, MemoriaError> {
        let conn = Connection::open(path).await.map_err(map_tr_err)?;

        conn.call(|conn| {
            conn.pragma_update(None, "journal_mode", "WAL")?;
            conn.pragma_update(None, "synchronous", "NORMAL")?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            run_migrations(conn).map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path, "database opened");
        Ok(Self { conn })
    }

    /// Access the underlying connection for query execution.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Close the database, flushing WAL to the main file.
    pub async fn close(self) -> Result<(), MemoriaError> {
        self.conn
            .call(|conn| {
                conn.pragma_update(None, "wal_checkpoint", "TRUNCATE")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        self.conn.close().await.map_err(map_tr_err)
    }
}

/// Convert a `tokio-rusqlite` error into the crate error type.
pub fn map_tr_err(e: tokio_rusqlite::Error) -> MemoriaError {
    MemoriaError::Storage {
        source: Box::new(e),
    }
}
