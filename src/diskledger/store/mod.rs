//! # Storage Layer
//!
//! This module defines the storage abstraction for diskledger. The
//! [`DiskRepository`] trait is the one contract every backend satisfies, so the
//! API and command layers never know where disks actually live.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: keyed map plus insertion order. No persistence,
//!   never fails. Used by tests and the `memory` backend.
//! - [`fs::FileStore`]: the whole collection as one JSON array in `disks.json`.
//! - [`remote::RemoteStore`]: a hosted database table reached over its REST
//!   interface. Generic over [`table::TableClient`] so the row transport can be
//!   swapped ([`postgrest::PostgrestClient`] in production,
//!   [`mem_table::MemTable`] in tests).
//!
//! ## Contract
//!
//! - `add` assigns the id and returns the stored disk.
//! - `get_by_id` / `update` report an unknown id as `None`, `delete` as `false`.
//!   Missing ids are never errors.
//! - `update` replaces name, capacity and contents together and never creates.
//! - `filter` is a read-side projection over `get_all`; the default
//!   implementation filters in process, which is what every backend uses.
//!
//! Repositories trust their input. Validation happens before a call reaches
//! them (see [`crate::form`]).
//!
//! ## Storage Layout
//!
//! For `FileStore`:
//! ```text
//! <data dir>/
//! ├── disks.json          # Ordered array of disk records
//! └── config.json         # App configuration
//! ```

use crate::error::Result;
use crate::filter::DiskFilter;
use crate::model::{ContentItem, Disk};

pub mod fs;
pub mod mem_table;
pub mod memory;
pub mod postgrest;
pub mod remote;
pub mod table;

/// CRUD + filter access to the disk collection.
pub trait DiskRepository {
    /// Store a new disk under a fresh id
    fn add(&mut self, name: &str, total_capacity_gb: i64, contents: Vec<ContentItem>)
        -> Result<Disk>;

    /// All disks, in the store's stable order
    fn get_all(&self) -> Result<Vec<Disk>>;

    /// A single disk, `None` if the id is unknown
    fn get_by_id(&self, id: &str) -> Result<Option<Disk>>;

    /// Replace every field of an existing disk
    fn update(
        &mut self,
        id: &str,
        name: &str,
        total_capacity_gb: i64,
        contents: Vec<ContentItem>,
    ) -> Result<Option<Disk>>;

    /// Remove a disk, `false` if the id is unknown
    fn delete(&mut self, id: &str) -> Result<bool>;

    /// Disks passing every active condition of `filter`
    fn filter(&self, filter: &DiskFilter) -> Result<Vec<Disk>> {
        Ok(filter.apply(self.get_all()?))
    }
}

impl<R: DiskRepository + ?Sized> DiskRepository for Box<R> {
    fn add(
        &mut self,
        name: &str,
        total_capacity_gb: i64,
        contents: Vec<ContentItem>,
    ) -> Result<Disk> {
        (**self).add(name, total_capacity_gb, contents)
    }

    fn get_all(&self) -> Result<Vec<Disk>> {
        (**self).get_all()
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Disk>> {
        (**self).get_by_id(id)
    }

    fn update(
        &mut self,
        id: &str,
        name: &str,
        total_capacity_gb: i64,
        contents: Vec<ContentItem>,
    ) -> Result<Option<Disk>> {
        (**self).update(id, name, total_capacity_gb, contents)
    }

    fn delete(&mut self, id: &str) -> Result<bool> {
        (**self).delete(id)
    }

    fn filter(&self, filter: &DiskFilter) -> Result<Vec<Disk>> {
        (**self).filter(filter)
    }
}
