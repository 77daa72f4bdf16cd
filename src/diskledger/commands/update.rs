use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::form::DiskDraft;
use crate::store::DiskRepository;

/// Replace name, capacity and contents of an existing disk.
pub fn run<S: DiskRepository>(store: &mut S, id: &str, draft: DiskDraft) -> Result<CmdResult> {
    draft.validate()?;
    let mut result = CmdResult::default();

    match store.update(id, &draft.name, draft.total_capacity_gb, draft.contents)? {
        Some(disk) => {
            tracing::info!(id = %disk.id, name = %disk.name, "disk updated");
            result.add_message(CmdMessage::success(format!(
                "Disk updated: {} ({} GB free)",
                disk.name,
                disk.free_space_gb()
            )));
            result.affected_disks.push(disk);
        }
        None => {
            tracing::warn!(id, "update skipped, disk not found");
            result.add_message(CmdMessage::warning(format!("Disk not found: {}", id)));
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiskError;
    use crate::model::ContentItem;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn full_replace() {
        let mut fixture = StoreFixture::new().with_disk("Old", 100, &[("A", 10), ("B", 20)]);
        let id = fixture.id_of("Old");

        let draft = DiskDraft::new("New", 200, vec![ContentItem::new("C", 50)]);
        let result = run(&mut fixture.store, &id, draft).unwrap();

        let disk = &result.affected_disks[0];
        assert_eq!(disk.id, id);
        assert_eq!(disk.name, "New");
        assert_eq!(disk.used_space_gb(), 50);
        assert_eq!(disk.free_space_gb(), 150);
    }

    #[test]
    fn unknown_id_leaves_store_alone() {
        let mut fixture = StoreFixture::new().with_disks(2);
        let draft = DiskDraft::new("Ghost", 10, vec![]);
        let result = run(&mut fixture.store, "missing", draft).unwrap();

        assert!(result.affected_disks.is_empty());
        assert!(result.has_problems());
        assert_eq!(fixture.store.len(), 2);
    }

    #[test]
    fn invalid_draft_is_rejected() {
        let mut fixture = StoreFixture::new().with_disk("Disk", 100, &[]);
        let id = fixture.id_of("Disk");
        let draft = DiskDraft::new("Disk", 100, vec![ContentItem::new("Huge", 101)]);
        assert!(matches!(
            run(&mut fixture.store, &id, draft),
            Err(DiskError::Validation(_))
        ));
        assert!(fixture.store.get_all().unwrap()[0].contents.is_empty());
    }
}
