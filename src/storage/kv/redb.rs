//! Redb-backed slot backend.
//!
//! One table, `slots`, maps slot names to raw bytes. Every call is a single
//! transaction run on tokio's blocking pool.

use super::backend::KvBackend;
use anyhow::{Context, Result};
use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;

const SLOTS_TABLE: TableDefinition<'static, &'static str, &'static [u8]> =
    TableDefinition::new("slots");

/// Slots persisted in a redb file. Cheap to clone.
#[derive(Clone)]
pub struct RedbBackend {
    db: Arc<Database>,
}

impl RedbBackend {
    /// Opens or creates the database at `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created, the file
    /// is locked by another process, or the table cannot be initialized.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create storage directory: {}", parent.display())
            })?;
        }

        let db = Database::create(path)
            .with_context(|| format!("Failed to open content database: {}", path.display()))?;

        // Fresh files have no table yet; reads would fail without this
        let txn = db.begin_write().context("Failed to begin write transaction")?;
        txn.open_table(SLOTS_TABLE)
            .context("Failed to initialize slots table")?;
        txn.commit().context("Failed to commit slots table")?;

        Ok(Self { db: Arc::new(db) })
    }

    fn read_slot(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;
        let table = txn
            .open_table(SLOTS_TABLE)
            .context("Failed to open slots table")?;
        let slot = table
            .get(key)
            .with_context(|| format!("Failed to read slot '{key}'"))?;
        Ok(slot.map(|guard| guard.value().to_vec()))
    }

    fn write_slot(&self, key: &str, value: &[u8]) -> Result<()> {
        let txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        {
            let mut table = txn
                .open_table(SLOTS_TABLE)
                .context("Failed to open slots table")?;
            table
                .insert(key, value)
                .with_context(|| format!("Failed to write slot '{key}'"))?;
        }
        txn.commit()
            .with_context(|| format!("Failed to commit slot '{key}'"))
    }
}

#[async_trait]
impl KvBackend for RedbBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let backend = self.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || backend.read_slot(&key))
            .await
            .context("Slot read task panicked")?
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let backend = self.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || backend.write_slot(&key, &value))
            .await
            .context("Slot write task panicked")?
    }
}
