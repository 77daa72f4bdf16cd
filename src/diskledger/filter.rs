//! Disk filtering.
//!
//! A [`DiskFilter`] combines up to three independent conditions. Every active
//! condition must hold for a disk to be kept; inactive ones are skipped:
//!
//! | Field | Active when | Keeps disks where |
//! |-------|-------------|-------------------|
//! | `name_query` | non-empty | name contains the query (case-insensitive) |
//! | `content_query` | non-empty | any content description contains the query (case-insensitive) |
//! | `min_free_gb` | `Some(n)` | `free_space_gb >= n` |
//!
//! `min_free_gb: Some(0)` is a real filter (it drops over-committed disks),
//! which is why the field is an `Option` rather than defaulting to zero.

use crate::model::Disk;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskFilter {
    pub name_query: String,
    pub content_query: String,
    pub min_free_gb: Option<i64>,
}

impl DiskFilter {
    pub fn new(
        name_query: impl Into<String>,
        content_query: impl Into<String>,
        min_free_gb: Option<i64>,
    ) -> Self {
        Self {
            name_query: name_query.into(),
            content_query: content_query.into(),
            min_free_gb,
        }
    }

    pub fn by_name(query: impl Into<String>) -> Self {
        Self {
            name_query: query.into(),
            ..Default::default()
        }
    }

    pub fn by_content(query: impl Into<String>) -> Self {
        Self {
            content_query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_min_free(min_free_gb: i64) -> Self {
        Self {
            min_free_gb: Some(min_free_gb),
            ..Default::default()
        }
    }

    /// True when no condition is active.
    pub fn is_noop(&self) -> bool {
        self.name_query.is_empty() && self.content_query.is_empty() && self.min_free_gb.is_none()
    }

    pub fn matches(&self, disk: &Disk) -> bool {
        if !self.name_query.is_empty() {
            let query = self.name_query.to_lowercase();
            if !disk.name.to_lowercase().contains(&query) {
                return false;
            }
        }

        if !self.content_query.is_empty() {
            let query = self.content_query.to_lowercase();
            let hit = disk
                .contents
                .iter()
                .any(|item| item.description.to_lowercase().contains(&query));
            if !hit {
                return false;
            }
        }

        if let Some(min_free) = self.min_free_gb {
            if disk.free_space_gb() < min_free {
                return false;
            }
        }

        true
    }

    /// Keeps matching disks, preserving their order.
    pub fn apply(&self, disks: Vec<Disk>) -> Vec<Disk> {
        if self.is_noop() {
            return disks;
        }
        disks.into_iter().filter(|d| self.matches(d)).collect()
    }
}
