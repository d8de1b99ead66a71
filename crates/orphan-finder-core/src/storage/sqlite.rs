use rusqlite::{Connection, Result};
use std::path::Path;
use tracing::debug;

/// Local results database holding one classification row per file.
///
/// The connection, and with it every cached prepared statement, is released
/// when the store is dropped.
pub struct ResultStore {
    conn: Connection,
}

impl ResultStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = ResultStore { conn };
        store.configure_pragmas()?;
        store.create_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = ResultStore { conn };
        store.configure_pragmas()?;
        store.create_schema()?;
        Ok(store)
    }

    fn configure_pragmas(&self) -> Result<()> {
        self.conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        debug!("SQLite pragmas configured (WAL mode)");
        Ok(())
    }

    fn create_schema(&self) -> Result<()> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        debug!("Results schema initialized");
        Ok(())
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
