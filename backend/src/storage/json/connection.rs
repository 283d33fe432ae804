use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::storage::Collection;

/// Subdirectory holding the primary-tier collection files
const STORE_DIR: &str = "store";

/// JsonConnection manages the data directory and resolves file paths for
/// each collection and persistence tier.
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a new connection with a base data directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a new connection in the default data directory,
    /// ~/Documents/School Admin
    pub fn new_default() -> Result<Self> {
        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

        let documents_dir = PathBuf::from(home_dir).join("Documents");
        Self::new(documents_dir.join("School Admin"))
    }

    /// Get the base data directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of a collection in the primary store
    pub fn primary_path(&self, collection: Collection) -> PathBuf {
        self.base_directory
            .join(STORE_DIR)
            .join(format!("{}.json", collection.store_name()))
    }

    /// Path of a collection in the legacy flat-file layout
    pub fn legacy_path(&self, collection: Collection) -> PathBuf {
        self.base_directory
            .join(format!("{}.json", collection.legacy_key()))
    }

    /// Path of the security settings file
    pub fn security_settings_path(&self) -> PathBuf {
        self.base_directory.join("security.yaml")
    }

    /// Ensure the primary store directory exists
    pub fn ensure_store_dir_exists(&self) -> Result<()> {
        let store_dir = self.base_directory.join(STORE_DIR);
        if !store_dir.exists() {
            fs::create_dir_all(&store_dir)?;
        }
        Ok(())
    }

    /// Clean up the data directory (useful for tests)
    #[cfg(test)]
    pub fn cleanup(&self) -> Result<()> {
        if self.base_directory.exists() {
            fs::remove_dir_all(&self.base_directory)?;
        }
        Ok(())
    }
}
