use super::postgrest::PostgrestClient;
use super::table::TableClient;
use super::DiskRepository;
use crate::error::{DiskError, Result};
use crate::model::{ContentItem, Disk};
use serde_json::{json, Value};

/// Disk repository backed by a hosted database table.
///
/// Ids are assigned by the server and every returned disk is the
/// server-confirmed row. Filtering uses the trait's default: all rows are
/// fetched and filtered in process, which is fine for small tables.
pub struct RemoteStore<C: TableClient = PostgrestClient> {
    client: C,
}

impl<C: TableClient> RemoteStore<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn payload(name: &str, total_capacity_gb: i64, contents: &[ContentItem]) -> Value {
        json!({
            "name": name,
            "total_capacity_gb": total_capacity_gb,
            "contents": contents.iter().map(ContentItem::to_record).collect::<Vec<_>>(),
        })
    }
}

impl<C: TableClient> DiskRepository for RemoteStore<C> {
    fn add(
        &mut self,
        name: &str,
        total_capacity_gb: i64,
        contents: Vec<ContentItem>,
    ) -> Result<Disk> {
        let rows = self
            .client
            .insert(&Self::payload(name, total_capacity_gb, &contents))?;
        let row = rows
            .first()
            .ok_or_else(|| DiskError::Store("Insert was not confirmed by the store".to_string()))?;
        let disk = Disk::from_record(row);
        tracing::info!(id = %disk.id, name = %disk.name, "disk inserted remotely");
        Ok(disk)
    }

    fn get_all(&self) -> Result<Vec<Disk>> {
        let rows = self.client.select_all()?;
        tracing::debug!(rows = rows.len(), "fetched remote disks");
        Ok(rows.iter().map(Disk::from_record).collect())
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Disk>> {
        let rows = self.client.select_by_id(id)?;
        Ok(rows.first().map(Disk::from_record))
    }

    fn update(
        &mut self,
        id: &str,
        name: &str,
        total_capacity_gb: i64,
        contents: Vec<ContentItem>,
    ) -> Result<Option<Disk>> {
        let rows = self
            .client
            .update_by_id(id, &Self::payload(name, total_capacity_gb, &contents))?;
        Ok(rows.first().map(Disk::from_record))
    }

    fn delete(&mut self, id: &str) -> Result<bool> {
        let rows = self.client.delete_by_id(id)?;
        Ok(!rows.is_empty())
    }
}
