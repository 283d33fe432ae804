//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! persistence tiers to be used interchangeably by the record store.

use anyhow::Result;
use async_trait::async_trait;

use crate::storage::Collection;

/// One persistence tier holding whole collections as JSON payloads.
///
/// The record store composes two tiers: a primary tier that is authoritative
/// once populated, and a legacy tier kept for migrating data written under
/// the older storage layout. Implementations persist the payload verbatim;
/// they do not interpret the records inside it.
#[async_trait]
pub trait CollectionTier: Send + Sync {
    /// Load the stored payload for a collection, or `None` when the tier
    /// has never stored this collection.
    async fn load(&self, collection: Collection) -> Result<Option<String>>;

    /// Replace the stored payload for a collection.
    async fn store(&self, collection: Collection, payload: &str) -> Result<()>;

    /// Remove any stored payload for a collection.
    async fn clear(&self, collection: Collection) -> Result<()>;
}
