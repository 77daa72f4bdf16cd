use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::form::DiskDraft;
use crate::store::DiskRepository;

pub fn run<S: DiskRepository>(store: &mut S, draft: DiskDraft) -> Result<CmdResult> {
    draft.validate()?;
    let disk = store.add(&draft.name, draft.total_capacity_gb, draft.contents)?;
    tracing::info!(id = %disk.id, name = %disk.name, "disk added");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Disk added: {} ({} GB free)",
        disk.name,
        disk.free_space_gb()
    )));
    result.affected_disks.push(disk);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiskError;
    use crate::model::ContentItem;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn adds_and_reports_free_space() {
        let mut store = InMemoryStore::new();
        let draft = DiskDraft::new(
            "SSD",
            500,
            vec![ContentItem::new("OS", 100), ContentItem::new("Apps", 50)],
        );
        let result = run(&mut store, draft).unwrap();

        assert_eq!(result.affected_disks.len(), 1);
        let disk = &result.affected_disks[0];
        assert_eq!(disk.used_space_gb(), 150);
        assert_eq!(disk.free_space_gb(), 350);
        assert_eq!(disk.usage_percentage(), 30.0);
        assert!(result.messages[0].content.contains("350 GB free"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn invalid_draft_never_reaches_store() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, DiskDraft::new("", 500, vec![]));
        assert!(matches!(result, Err(DiskError::Validation(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn overflowing_contents_are_rejected() {
        let mut store = InMemoryStore::new();
        let draft = DiskDraft::new(
            "Big",
            i64::MAX,
            vec![ContentItem::new("a", i64::MAX), ContentItem::new("b", i64::MAX)],
        );
        assert!(matches!(run(&mut store, draft), Err(DiskError::Validation(_))));
        assert!(store.is_empty());
    }
}
