use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};

/// One named, sized unit of content living on a disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentItem {
    pub description: String,
    pub size_gb: i64,
}

impl ContentItem {
    pub fn new(description: impl Into<String>, size_gb: i64) -> Self {
        Self {
            description: description.into(),
            size_gb,
        }
    }

    /// Decodes a stored item. Missing fields fall back to `""` / `0`; a bare
    /// string (the old string-list contents format) becomes a zero-sized item.
    pub fn from_record(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::new(s.clone(), 0),
            Value::Object(map) => Self {
                description: map
                    .get("description")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                size_gb: map.get("size_gb").map(int_or_zero).unwrap_or(0),
            },
            _ => Self::new("", 0),
        }
    }

    pub fn to_record(&self) -> Value {
        json!({
            "description": self.description,
            "size_gb": self.size_gb,
        })
    }
}

/// Usage bands used when presenting a disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageLevel {
    Healthy,
    Elevated,
    Critical,
}

impl UsageLevel {
    pub fn from_percentage(usage: f64) -> Self {
        if usage > 80.0 {
            UsageLevel::Critical
        } else if usage > 50.0 {
            UsageLevel::Elevated
        } else {
            UsageLevel::Healthy
        }
    }
}

/// A tracked storage volume.
///
/// Used space is always derived from `contents`; it is never stored, so the
/// two can not drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Disk {
    pub id: String,
    pub name: String,
    pub total_capacity_gb: i64,
    pub contents: Vec<ContentItem>,
}

impl Disk {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        total_capacity_gb: i64,
        contents: Vec<ContentItem>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            total_capacity_gb,
            contents,
        }
    }

    /// Saturates at the `i64` bounds; decoded rows are not validated.
    pub fn used_space_gb(&self) -> i64 {
        self.contents
            .iter()
            .fold(0i64, |total, item| total.saturating_add(item.size_gb))
    }

    /// Can go negative when the disk is over-committed.
    pub fn free_space_gb(&self) -> i64 {
        self.total_capacity_gb.saturating_sub(self.used_space_gb())
    }

    pub fn usage_percentage(&self) -> f64 {
        if self.total_capacity_gb == 0 {
            return 0.0;
        }
        self.used_space_gb() as f64 / self.total_capacity_gb as f64 * 100.0
    }

    pub fn usage_level(&self) -> UsageLevel {
        UsageLevel::from_percentage(self.usage_percentage())
    }

    pub fn content_summary(&self) -> String {
        self.contents
            .iter()
            .map(|item| item.description.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn to_record(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "total_capacity_gb": self.total_capacity_gb,
            "contents": self.contents.iter().map(ContentItem::to_record).collect::<Vec<_>>(),
        })
    }

    /// Decodes a stored record without ever failing.
    ///
    /// Rows coming from the remote table or an old data file can be partial:
    /// absent or `null` contents decode as empty, absent scalars as their zero
    /// value, and a leftover `used_space_gb` column is ignored.
    pub fn from_record(value: &Value) -> Self {
        let empty = Map::new();
        let map = value.as_object().unwrap_or(&empty);

        let id = match map.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };

        let contents = map
            .get("contents")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(ContentItem::from_record).collect())
            .unwrap_or_default();

        Self {
            id,
            name: map
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            total_capacity_gb: map.get("total_capacity_gb").map(int_or_zero).unwrap_or(0),
            contents,
        }
    }
}

impl<'de> Deserialize<'de> for Disk {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Disk::from_record(&value))
    }
}

impl<'de> Deserialize<'de> for ContentItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(ContentItem::from_record(&value))
    }
}

// The remote column is untyped JSON, so sizes may arrive as floats.
fn int_or_zero(value: &Value) -> i64 {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ssd() -> Disk {
        Disk::new(
            "d-1",
            "SSD",
            500,
            vec![ContentItem::new("OS", 100), ContentItem::new("Apps", 50)],
        )
    }

    #[test]
    fn derives_space_from_contents() {
        let disk = ssd();
        assert_eq!(disk.used_space_gb(), 150);
        assert_eq!(disk.free_space_gb(), 350);
        assert_eq!(disk.usage_percentage(), 30.0);
    }

    #[test]
    fn used_space_follows_content_changes() {
        let mut disk = ssd();
        disk.contents.push(ContentItem::new("Games", 200));
        assert_eq!(disk.used_space_gb(), 350);
        disk.contents.clear();
        assert_eq!(disk.used_space_gb(), 0);
        assert_eq!(disk.free_space_gb(), 500);
    }

    #[test]
    fn free_space_is_not_clamped() {
        let disk = Disk::new("x", "Tiny", 10, vec![ContentItem::new("Big", 25)]);
        assert_eq!(disk.free_space_gb(), -15);
        assert_eq!(disk.usage_percentage(), 250.0);
    }

    #[test]
    fn huge_decoded_sizes_saturate() {
        let disk = Disk::from_record(&json!({
            "id": "r-1",
            "name": "Remote",
            "total_capacity_gb": 9e18,
            "contents": [
                {"description": "a", "size_gb": 9e18},
                {"description": "b", "size_gb": 9e18},
            ]
        }));
        assert_eq!(disk.used_space_gb(), i64::MAX);
        assert_eq!(disk.free_space_gb(), 9_000_000_000_000_000_000 - i64::MAX);
        assert!(disk.usage_percentage() > 100.0);

        let negative = Disk::new("x", "Neg", i64::MIN, vec![ContentItem::new("a", 1)]);
        assert_eq!(negative.free_space_gb(), i64::MIN);
    }

    #[test]
    fn zero_capacity_has_zero_usage() {
        let disk = Disk::new("x", "Empty", 0, vec![ContentItem::new("Stuff", 5)]);
        assert_eq!(disk.usage_percentage(), 0.0);
    }

    #[test]
    fn usage_levels() {
        assert_eq!(UsageLevel::from_percentage(10.0), UsageLevel::Healthy);
        assert_eq!(UsageLevel::from_percentage(50.0), UsageLevel::Healthy);
        assert_eq!(UsageLevel::from_percentage(50.5), UsageLevel::Elevated);
        assert_eq!(UsageLevel::from_percentage(80.0), UsageLevel::Elevated);
        assert_eq!(UsageLevel::from_percentage(90.0), UsageLevel::Critical);
        assert_eq!(ssd().usage_level(), UsageLevel::Healthy);
    }

    #[test]
    fn record_round_trip() {
        let disk = ssd();
        assert_eq!(Disk::from_record(&disk.to_record()), disk);

        let bare = Disk::new("d-2", "Blank", 64, vec![]);
        assert_eq!(Disk::from_record(&bare.to_record()), bare);
    }

    #[test]
    fn record_never_stores_used_space() {
        let record = ssd().to_record();
        assert!(record.get("used_space_gb").is_none());
        assert_eq!(record["contents"][1]["description"], "Apps");
    }

    #[test]
    fn decodes_partial_records() {
        let disk = Disk::from_record(&json!({"id": "a", "name": "HDD", "total_capacity_gb": 100}));
        assert!(disk.contents.is_empty());

        let disk = Disk::from_record(&json!({"id": "a", "contents": null}));
        assert!(disk.contents.is_empty());
        assert_eq!(disk.name, "");
        assert_eq!(disk.total_capacity_gb, 0);

        let disk = Disk::from_record(&json!({"contents": [{"description": "Docs"}, {"size_gb": 7}]}));
        assert_eq!(disk.contents[0], ContentItem::new("Docs", 0));
        assert_eq!(disk.contents[1], ContentItem::new("", 7));
    }

    #[test]
    fn decodes_legacy_and_loose_values() {
        let disk = Disk::from_record(&json!({
            "id": 42,
            "name": "Old",
            "total_capacity_gb": 2000,
            "used_space_gb": 1200,
            "contents": ["Fotos", {"description": "ISO", "size_gb": 4.7}]
        }));
        assert_eq!(disk.id, "42");
        assert_eq!(disk.contents[0], ContentItem::new("Fotos", 0));
        assert_eq!(disk.contents[1], ContentItem::new("ISO", 4));
        // stored used space is ignored, derived value wins
        assert_eq!(disk.used_space_gb(), 4);
    }

    #[test]
    fn serde_uses_defensive_decoding() {
        let disk: Disk = serde_json::from_str(r#"{"id":"z","name":"USB"}"#).unwrap();
        assert_eq!(disk.name, "USB");
        assert!(disk.contents.is_empty());

        let json = serde_json::to_string(&ssd()).unwrap();
        let back: Disk = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ssd());
    }

    #[test]
    fn content_summary_joins_descriptions() {
        assert_eq!(ssd().content_summary(), "OS, Apps");
        assert_eq!(Disk::new("e", "E", 1, vec![]).content_summary(), "");
    }
}
