//! # Disk Form
//!
//! Turning user input into something a repository may store is the UI's job:
//! repositories trust what they receive. This module is the shared half of
//! that job, usable by any client. It parses raw text fields into a
//! [`DiskDraft`] and checks the draft before `add`/`update` is called.
//!
//! ## Content item syntax
//!
//! Items are written `description:size`, either one per argument or as a
//! comma separated list (`"OS:100, Apps:50"`). The size follows the *last*
//! colon, so descriptions may contain colons themselves (`"C: drive:20"`).
//! An item without a size (`"Photos"`) has size 0.
//!
//! ## Validation rules
//!
//! - name must not be blank
//! - capacity must be a positive whole number
//! - every item needs a description and a size that is not negative
//! - no single item may be larger than the whole disk
//!
//! The sum of the items may exceed the capacity: an over-committed disk is
//! legal and simply shows negative free space.

use crate::error::{DiskError, Result};
use crate::model::ContentItem;

/// Validated-on-demand input for `add` / `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskDraft {
    pub name: String,
    pub total_capacity_gb: i64,
    pub contents: Vec<ContentItem>,
}

impl DiskDraft {
    pub fn new(name: impl Into<String>, total_capacity_gb: i64, contents: Vec<ContentItem>) -> Self {
        Self {
            name: name.into(),
            total_capacity_gb,
            contents,
        }
    }

    /// Build a draft from raw form fields.
    pub fn parse<S: AsRef<str>>(name: &str, capacity: &str, contents: &[S]) -> Result<Self> {
        let draft = Self {
            name: name.trim().to_string(),
            total_capacity_gb: parse_gb(capacity, "capacity")?,
            contents: parse_contents(contents)?,
        };
        draft.validate()?;
        Ok(draft)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DiskError::Validation("Disk name cannot be empty".into()));
        }
        if self.total_capacity_gb <= 0 {
            return Err(DiskError::Validation(format!(
                "Capacity must be greater than zero (got {} GB)",
                self.total_capacity_gb
            )));
        }
        let mut total: i64 = 0;
        for item in &self.contents {
            if item.description.trim().is_empty() {
                return Err(DiskError::Validation(
                    "Content items need a description".into(),
                ));
            }
            if item.size_gb < 0 {
                return Err(DiskError::Validation(format!(
                    "'{}' has a negative size ({} GB)",
                    item.description, item.size_gb
                )));
            }
            if item.size_gb > self.total_capacity_gb {
                return Err(DiskError::Validation(format!(
                    "'{}' ({} GB) is larger than the disk ({} GB)",
                    item.description, item.size_gb, self.total_capacity_gb
                )));
            }
            total = total.checked_add(item.size_gb).ok_or_else(|| {
                DiskError::Validation("Combined content size is too large to track".into())
            })?;
        }
        Ok(())
    }
}

/// Parse a whole number of gigabytes.
pub fn parse_gb(input: &str, field: &str) -> Result<i64> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_suffix("GB")
        .or_else(|| trimmed.strip_suffix("gb"))
        .unwrap_or(trimmed)
        .trim();
    trimmed.parse::<i64>().map_err(|_| {
        DiskError::Validation(format!("{} must be a whole number of GB, got '{}'", field, input))
    })
}

/// Parse one `description:size` item.
pub fn parse_content_item(input: &str) -> Result<ContentItem> {
    let input = input.trim();
    match input.rsplit_once(':') {
        Some((description, size)) if !size.trim().is_empty() => {
            let size_gb = parse_gb(size, "size")?;
            Ok(ContentItem::new(description.trim(), size_gb))
        }
        Some((description, _)) => Ok(ContentItem::new(description.trim(), 0)),
        None => Ok(ContentItem::new(input, 0)),
    }
}

/// Parse item arguments, each of which may itself be a comma separated list.
/// Blank entries are skipped.
pub fn parse_contents<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<ContentItem>> {
    inputs
        .iter()
        .flat_map(|input| input.as_ref().split(','))
        .filter(|part| !part.trim().is_empty())
        .map(parse_content_item)
        .collect()
}
