//! # Storage Module
//!
//! Handles all data persistence operations for the school admin application.
//!
//! This module abstracts away the specific storage implementation details and
//! provides a consistent interface for persisting and retrieving data. Every
//! collection (students, parents, attendance, teachers, teacher attendance,
//! payments, grades) is persisted as a whole: callers read the full record
//! list, modify it in memory, and write the full list back.
//!
//! ## Key Responsibilities
//!
//! - **Data Persistence**: Saving whole collections to disk atomically
//! - **Data Retrieval**: Loading stored collections back into memory
//! - **Legacy Migration**: Falling back to the older flat-file storage
//!   layout and backfilling the primary store on first read
//! - **Mutation Serialization**: Per-collection locks so concurrent
//!   read-modify-write cycles cannot clobber each other
//!
//! ## Current Implementation
//!
//! - **Primary tier**: one JSON file per collection under `store/`
//! - **Legacy tier**: flat `school_*.json` files at the data-directory root,
//!   the layout written by earlier releases
//!
//! Collections are small (a single school, hundreds of records), so
//! whole-collection replacement keeps the layer simple and avoids
//! per-record storage addressing.

pub mod collection;
pub mod json;
pub mod record_store;
pub mod traits;

pub use collection::Collection;
pub use record_store::RecordStore;
pub use traits::CollectionTier;
