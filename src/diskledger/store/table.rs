use crate::error::Result;
use serde_json::Value;

/// Row-level access to one remote table.
///
/// This trait handles the "how" of talking to the hosted database (HTTP,
/// or an in-process fake), while [`super::remote::RemoteStore`] handles the
/// "what" (mapping rows to disks and the repository contract).
///
/// Every call returns the rows the store reports back. Mutations are expected
/// to echo the affected rows, so an empty result means nothing matched.
pub trait TableClient {
    fn select_all(&self) -> Result<Vec<Value>>;

    fn select_by_id(&self, id: &str) -> Result<Vec<Value>>;

    /// Insert one row. The store assigns the primary key.
    fn insert(&self, row: &Value) -> Result<Vec<Value>>;

    fn update_by_id(&self, id: &str, row: &Value) -> Result<Vec<Value>>;

    fn delete_by_id(&self, id: &str) -> Result<Vec<Value>>;
}
