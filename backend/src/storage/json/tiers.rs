//! File-backed implementations of the [`CollectionTier`] trait.
//!
//! Two layouts exist side by side. The primary tier keeps one JSON file per
//! collection under `store/`. The legacy tier is the flat `school_*.json`
//! layout written by earlier releases; it is read for migration and kept in
//! sync on writes so a downgrade still sees current data.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;

use super::connection::JsonConnection;
use crate::storage::{Collection, CollectionTier};

/// Write a payload atomically via a temp file plus rename.
fn write_atomically(path: &Path, payload: &str) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, payload)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

fn read_if_exists(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let payload = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Some(payload))
}

fn remove_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Primary persistence tier: `store/<collection>.json`
#[derive(Clone)]
pub struct PrimaryFileTier {
    connection: JsonConnection,
}

impl PrimaryFileTier {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl CollectionTier for PrimaryFileTier {
    async fn load(&self, collection: Collection) -> Result<Option<String>> {
        read_if_exists(&self.connection.primary_path(collection))
    }

    async fn store(&self, collection: Collection, payload: &str) -> Result<()> {
        self.connection.ensure_store_dir_exists()?;
        let path = self.connection.primary_path(collection);
        write_atomically(&path, payload)
            .with_context(|| format!("Failed to store collection {}", collection))?;
        debug!("Stored {} bytes for collection {}", payload.len(), collection);
        Ok(())
    }

    async fn clear(&self, collection: Collection) -> Result<()> {
        remove_if_exists(&self.connection.primary_path(collection))
    }
}

/// Legacy persistence tier: flat `school_<collection>.json` files at the
/// data-directory root.
#[derive(Clone)]
pub struct LegacyFileTier {
    connection: JsonConnection,
}

impl LegacyFileTier {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl CollectionTier for LegacyFileTier {
    async fn load(&self, collection: Collection) -> Result<Option<String>> {
        read_if_exists(&self.connection.legacy_path(collection))
    }

    async fn store(&self, collection: Collection, payload: &str) -> Result<()> {
        let path = self.connection.legacy_path(collection);
        write_atomically(&path, payload)
            .with_context(|| format!("Failed to store legacy collection {}", collection))?;
        Ok(())
    }

    async fn clear(&self, collection: Collection) -> Result<()> {
        remove_if_exists(&self.connection.legacy_path(collection))
    }
}
