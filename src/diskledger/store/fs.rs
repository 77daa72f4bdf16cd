use super::DiskRepository;
use crate::error::{DiskError, Result};
use crate::model::{ContentItem, Disk};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const DATA_FILENAME: &str = "disks.json";

/// File-backed store: the whole collection lives in `<root>/disks.json`.
///
/// Every operation reads the file and every mutation rewrites it, so several
/// short-lived processes can share the same data directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_file(&self) -> PathBuf {
        self.root.join(DATA_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(DiskError::Io)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<Vec<Disk>> {
        let path = self.data_file();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path).map_err(DiskError::Io)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let disks: Vec<Disk> = serde_json::from_str(&content).map_err(DiskError::Serialization)?;
        Ok(disks)
    }

    /// Writes to a temp file first and renames it over the data file.
    fn save(&self, disks: &[Disk]) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(disks).map_err(DiskError::Serialization)?;
        let tmp = self.root.join(format!("{}.tmp", DATA_FILENAME));
        fs::write(&tmp, content).map_err(DiskError::Io)?;
        fs::rename(&tmp, self.data_file()).map_err(DiskError::Io)?;
        Ok(())
    }
}

impl DiskRepository for FileStore {
    fn add(
        &mut self,
        name: &str,
        total_capacity_gb: i64,
        contents: Vec<ContentItem>,
    ) -> Result<Disk> {
        let mut disks = self.load()?;
        let disk = Disk::new(Uuid::new_v4().to_string(), name, total_capacity_gb, contents);
        disks.push(disk.clone());
        self.save(&disks)?;
        tracing::debug!(id = %disk.id, path = %self.data_file().display(), "disk written");
        Ok(disk)
    }

    fn get_all(&self) -> Result<Vec<Disk>> {
        self.load()
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Disk>> {
        Ok(self.load()?.into_iter().find(|d| d.id == id))
    }

    fn update(
        &mut self,
        id: &str,
        name: &str,
        total_capacity_gb: i64,
        contents: Vec<ContentItem>,
    ) -> Result<Option<Disk>> {
        let mut disks = self.load()?;
        let Some(disk) = disks.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };
        disk.name = name.to_string();
        disk.total_capacity_gb = total_capacity_gb;
        disk.contents = contents;
        let updated = disk.clone();
        self.save(&disks)?;
        Ok(Some(updated))
    }

    fn delete(&mut self, id: &str) -> Result<bool> {
        let mut disks = self.load()?;
        let before = disks.len();
        disks.retain(|d| d.id != id);
        if disks.len() == before {
            return Ok(false);
        }
        self.save(&disks)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("data"));
        (dir, store)
    }

    #[test]
    fn missing_file_is_empty_store() {
        let (_dir, store) = setup();
        assert!(store.get_all().unwrap().is_empty());
        assert!(!store.data_file().exists());
    }

    #[test]
    fn add_creates_directory_and_file() {
        let (_dir, mut store) = setup();
        let disk = store.add("HDD", 2000, vec![ContentItem::new("Docs", 20)]).unwrap();

        assert!(store.data_file().exists());
        let reopened = FileStore::new(store.root().to_path_buf());
        assert_eq!(reopened.get_by_id(&disk.id).unwrap(), Some(disk));
    }

    #[test]
    fn no_temp_file_left_behind() {
        let (_dir, mut store) = setup();
        store.add("HDD", 2000, vec![]).unwrap();
        for entry in fs::read_dir(store.root()).unwrap() {
            let name = entry.unwrap().file_name().into_string().unwrap();
            assert!(!name.ends_with(".tmp"), "leftover tmp file: {}", name);
        }
    }

    #[test]
    fn stored_records_have_no_used_space() {
        let (_dir, mut store) = setup();
        store.add("HDD", 2000, vec![ContentItem::new("Docs", 20)]).unwrap();
        let raw = fs::read_to_string(store.data_file()).unwrap();
        assert!(!raw.contains("used_space_gb"));
        assert!(raw.contains("\"size_gb\": 20"));
    }

    #[test]
    fn reads_partial_records() {
        let (_dir, store) = setup();
        fs::create_dir_all(store.root()).unwrap();
        fs::write(
            store.data_file(),
            r#"[{"id": "a", "name": "Legacy", "total_capacity_gb": 10, "used_space_gb": 9, "contents": ["Old"]},
                {"id": "b", "name": "Bare"}]"#,
        )
        .unwrap();

        let disks = store.get_all().unwrap();
        assert_eq!(disks.len(), 2);
        assert_eq!(disks[0].contents, vec![ContentItem::new("Old", 0)]);
        assert!(disks[1].contents.is_empty());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let (_dir, store) = setup();
        fs::create_dir_all(store.root()).unwrap();
        fs::write(store.data_file(), "{ not json").unwrap();
        assert!(matches!(store.get_all(), Err(DiskError::Serialization(_))));
    }

    #[test]
    fn delete_and_update_persist() {
        let (_dir, mut store) = setup();
        let a = store.add("A", 10, vec![]).unwrap();
        let b = store.add("B", 10, vec![]).unwrap();

        assert!(store.delete(&a.id).unwrap());
        assert!(!store.delete(&a.id).unwrap());
        store.update(&b.id, "B2", 20, vec![]).unwrap().unwrap();

        let reopened = FileStore::new(store.root().to_path_buf());
        let all = reopened.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "B2");
        assert_eq!(all[0].total_capacity_gb, 20);
    }
}
