//! # Record Store
//!
//! Durable storage of each named collection as a whole, with a two-tier
//! read/write strategy.
//!
//! Reads try the primary tier first and fall back to the legacy tier; a
//! legacy hit is backfilled into the primary tier, after which the primary
//! tier is authoritative. Writes replace the collection in both tiers.
//!
//! Callers follow a read-modify-write cycle against the full record list.
//! Because two concurrently issued cycles on the same collection would
//! otherwise compute against the same starting state and silently clobber
//! each other (last write wins on the whole collection), mutating callers
//! take the per-collection mutation guard for the duration of the cycle.

use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::json::{JsonConnection, LegacyFileTier, PrimaryFileTier};
use super::{Collection, CollectionTier};

/// Whole-collection store over a primary tier and a legacy fallback tier.
pub struct RecordStore {
    primary: Box<dyn CollectionTier>,
    legacy: Box<dyn CollectionTier>,
    locks: Vec<Arc<Mutex<()>>>,
}

impl RecordStore {
    /// Create a record store over the JSON file tiers of a data directory
    pub fn new(connection: JsonConnection) -> Self {
        Self::with_tiers(
            Box::new(PrimaryFileTier::new(connection.clone())),
            Box::new(LegacyFileTier::new(connection)),
        )
    }

    /// Create a record store over explicit tiers (used by tests to
    /// substitute fakes)
    pub fn with_tiers(primary: Box<dyn CollectionTier>, legacy: Box<dyn CollectionTier>) -> Self {
        let locks = Collection::ALL
            .iter()
            .map(|_| Arc::new(Mutex::new(())))
            .collect();
        Self {
            primary,
            legacy,
            locks,
        }
    }

    /// Read the full record list of a collection.
    ///
    /// Returns an empty list when neither tier has data for the collection.
    pub async fn read<T>(&self, collection: Collection) -> Result<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        if let Some(payload) = self.primary.load(collection).await? {
            let records = serde_json::from_str(&payload)
                .with_context(|| format!("Corrupt primary data for collection {}", collection))?;
            return Ok(records);
        }

        if let Some(raw) = self.legacy.load(collection).await? {
            let records: Vec<T> = serde_json::from_str(&raw)
                .with_context(|| format!("Corrupt legacy data for collection {}", collection))?;

            // Backfill so subsequent reads hit the primary tier directly.
            let payload = serde_json::to_string(&records)?;
            self.primary.store(collection, &payload).await?;
            info!(
                "Migrated {} legacy records into collection {}",
                records.len(),
                collection
            );
            return Ok(records);
        }

        Ok(Vec::new())
    }

    /// Replace the full record list of a collection in both tiers.
    pub async fn write<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<()> {
        let payload = serde_json::to_string(records)
            .with_context(|| format!("Failed to serialize collection {}", collection))?;
        self.primary.store(collection, &payload).await?;
        self.legacy.store(collection, &payload).await?;
        Ok(())
    }

    /// Acquire the mutation lock of a collection.
    ///
    /// Hold the returned guard across a full read-modify-write cycle.
    /// Plain reads do not need it.
    pub async fn mutation_guard(&self, collection: Collection) -> OwnedMutexGuard<()> {
        self.locks[collection.index()].clone().lock_owned().await
    }

    /// Remove every collection from both tiers (debug/reset helper)
    pub async fn clear_all(&self) -> Result<()> {
        for collection in Collection::ALL {
            let _guard = self.mutation_guard(collection).await;
            self.primary.clear(collection).await?;
            self.legacy.clear(collection).await?;
        }
        info!("Cleared all collections");
        Ok(())
    }
}
