use super::table::TableClient;
use crate::error::{DiskError, Result};
use serde_json::{Map, Value};
use std::cell::{Cell, RefCell};

/// In-process stand-in for a remote table.
///
/// Behaves like a PostgREST table with a serial primary key: inserts get the
/// next integer id, mutations echo the affected rows, and unknown ids yield an
/// empty row set. Uses `RefCell` since the repository is single-threaded and
/// `TableClient` takes `&self` throughout.
#[derive(Default)]
pub struct MemTable {
    rows: RefCell<Vec<Value>>,
    next_id: Cell<u64>,
    simulate_failure: Cell<bool>,
}

impl MemTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail, like an unreachable server.
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.set(simulate);
    }

    /// Put a raw row straight into the table, bypassing the insert path.
    /// A numeric id (`7` or `"7"`) moves the serial past it.
    pub fn push_raw(&self, row: Value) {
        if let Some(id) = Self::row_id(&row).and_then(|id| id.parse::<u64>().ok()) {
            self.next_id.set(self.next_id.get().max(id));
        }
        self.rows.borrow_mut().push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.borrow().len()
    }

    fn check(&self) -> Result<()> {
        if self.simulate_failure.get() {
            return Err(DiskError::Store("Simulated network failure".to_string()));
        }
        Ok(())
    }

    fn row_id(row: &Value) -> Option<String> {
        match row.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl TableClient for MemTable {
    fn select_all(&self) -> Result<Vec<Value>> {
        self.check()?;
        Ok(self.rows.borrow().clone())
    }

    fn select_by_id(&self, id: &str) -> Result<Vec<Value>> {
        self.check()?;
        Ok(self
            .rows
            .borrow()
            .iter()
            .filter(|row| Self::row_id(row).as_deref() == Some(id))
            .cloned()
            .collect())
    }

    fn insert(&self, row: &Value) -> Result<Vec<Value>> {
        self.check()?;
        let mut stored = row.as_object().cloned().unwrap_or_else(Map::new);
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        stored.insert("id".to_string(), Value::from(id));
        let stored = Value::Object(stored);
        self.rows.borrow_mut().push(stored.clone());
        Ok(vec![stored])
    }

    fn update_by_id(&self, id: &str, row: &Value) -> Result<Vec<Value>> {
        self.check()?;
        let mut rows = self.rows.borrow_mut();
        let mut affected = Vec::new();
        for existing in rows.iter_mut() {
            if Self::row_id(existing).as_deref() != Some(id) {
                continue;
            }
            if let (Some(target), Some(patch)) = (existing.as_object_mut(), row.as_object()) {
                for (key, value) in patch {
                    target.insert(key.clone(), value.clone());
                }
            }
            affected.push(existing.clone());
        }
        Ok(affected)
    }

    fn delete_by_id(&self, id: &str) -> Result<Vec<Value>> {
        self.check()?;
        let mut rows = self.rows.borrow_mut();
        let (removed, kept): (Vec<Value>, Vec<Value>) = rows
            .drain(..)
            .partition(|row| Self::row_id(row).as_deref() == Some(id));
        *rows = kept;
        Ok(removed)
    }
}
