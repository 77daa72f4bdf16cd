use super::DiskRepository;
use crate::error::Result;
use crate::model::{ContentItem, Disk};
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory disk store.
///
/// Disks are keyed by id; a separate id list keeps insertion order so
/// `get_all` is stable.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    disks: HashMap<String, Disk>,
    order: Vec<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl DiskRepository for InMemoryStore {
    fn add(
        &mut self,
        name: &str,
        total_capacity_gb: i64,
        contents: Vec<ContentItem>,
    ) -> Result<Disk> {
        let id = Uuid::new_v4().to_string();
        let disk = Disk::new(id.clone(), name, total_capacity_gb, contents);
        self.disks.insert(id.clone(), disk.clone());
        self.order.push(id);
        tracing::debug!(id = %disk.id, name = %disk.name, "disk added to memory store");
        Ok(disk)
    }

    fn get_all(&self) -> Result<Vec<Disk>> {
        Ok(self
            .order
            .iter()
            .filter_map(|id| self.disks.get(id).cloned())
            .collect())
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Disk>> {
        Ok(self.disks.get(id).cloned())
    }

    fn update(
        &mut self,
        id: &str,
        name: &str,
        total_capacity_gb: i64,
        contents: Vec<ContentItem>,
    ) -> Result<Option<Disk>> {
        let Some(disk) = self.disks.get_mut(id) else {
            return Ok(None);
        };
        disk.name = name.to_string();
        disk.total_capacity_gb = total_capacity_gb;
        disk.contents = contents;
        Ok(Some(disk.clone()))
    }

    fn delete(&mut self, id: &str) -> Result<bool> {
        if self.disks.remove(id).is_none() {
            return Ok(false);
        }
        self.order.retain(|existing| existing != id);
        Ok(true)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_disks(mut self, count: usize) -> Self {
            for i in 0..count {
                let name = format!("Test Disk {}", i + 1);
                let contents = vec![ContentItem::new(format!("Data {}", i + 1), 10)];
                self.store.add(&name, 100, contents).unwrap();
            }
            self
        }

        pub fn with_disk(mut self, name: &str, capacity: i64, items: &[(&str, i64)]) -> Self {
            let contents = items
                .iter()
                .map(|(desc, size)| ContentItem::new(*desc, *size))
                .collect();
            self.store.add(name, capacity, contents).unwrap();
            self
        }

        pub fn with_full_disk(self, name: &str, capacity: i64) -> Self {
            self.with_disk(name, capacity, &[("Everything", capacity)])
        }

        /// Id of the first disk with the given name.
        pub fn id_of(&self, name: &str) -> String {
            self.store
                .get_all()
                .unwrap()
                .into_iter()
                .find(|d| d.name == name)
                .map(|d| d.id)
                .unwrap_or_else(|| panic!("no disk named {}", name))
        }
    }
}
