use crate::error::Result;
use crate::store::DiskRepository;

/// Outcome of looking up a disk by a user-typed id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Id(String),
    /// Prefix shared by several ids
    Ambiguous(Vec<String>),
    NotFound,
}

/// Resolve an exact id, or failing that a unique id prefix.
///
/// Ids are long (UUIDs locally), so users may type just the first few
/// characters. An exact match always wins, which keeps short serial ids from
/// the remote store addressable (`1` next to `12`).
///
/// Matching runs over one `get_all()` listing. Typed remote keys reject
/// partial values in a lookup by id, so the raw input never goes to
/// `get_by_id`.
pub fn resolve_id<S: DiskRepository>(store: &S, input: &str) -> Result<Resolved> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Resolved::NotFound);
    }

    let mut matches: Vec<String> = store
        .get_all()?
        .into_iter()
        .map(|d| d.id)
        .filter(|id| id.starts_with(input))
        .collect();

    if matches.iter().any(|id| id == input) {
        return Ok(Resolved::Id(input.to_string()));
    }

    Ok(match matches.len() {
        0 => Resolved::NotFound,
        1 => Resolved::Id(matches.remove(0)),
        _ => Resolved::Ambiguous(matches),
    })
}
