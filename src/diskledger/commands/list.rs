use crate::commands::CmdResult;
use crate::error::Result;
use crate::filter::DiskFilter;
use crate::store::DiskRepository;

pub fn run<S: DiskRepository>(store: &S, filter: &DiskFilter) -> Result<CmdResult> {
    let disks = if filter.is_noop() {
        store.get_all()?
    } else {
        store.filter(filter)?
    };
    tracing::debug!(count = disks.len(), ?filter, "listing disks");
    Ok(CmdResult::default().with_listed_disks(disks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    fn fixture() -> StoreFixture {
        StoreFixture::new()
            .with_disk("SSD Principal", 500, &[("Sistema Operativo", 150), ("Apps", 300)])
            .with_disk("HDD Backups", 2000, &[("Nightly Backups", 1200)])
            .with_full_disk("USB Lleno", 64)
    }

    #[test]
    fn noop_filter_lists_everything_in_order() {
        let fixture = fixture();
        let result = run(&fixture.store, &DiskFilter::default()).unwrap();
        let names: Vec<_> = result.listed_disks.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["SSD Principal", "HDD Backups", "USB Lleno"]);
    }

    #[test]
    fn content_query_is_case_insensitive() {
        let fixture = fixture();
        let result = run(&fixture.store, &DiskFilter::by_content("backup")).unwrap();
        assert_eq!(result.listed_disks.len(), 1);
        assert_eq!(result.listed_disks[0].name, "HDD Backups");
    }

    #[test]
    fn min_free_zero_keeps_full_disks() {
        let fixture = fixture();
        let result = run(&fixture.store, &DiskFilter::with_min_free(0)).unwrap();
        assert_eq!(result.listed_disks.len(), 3);

        let result = run(&fixture.store, &DiskFilter::with_min_free(1)).unwrap();
        assert_eq!(result.listed_disks.len(), 2);
    }

    #[test]
    fn combined_filters() {
        let fixture = fixture();
        let filter = DiskFilter::new("s", "", Some(100));
        let names: Vec<_> = run(&fixture.store, &filter)
            .unwrap()
            .listed_disks
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["HDD Backups".to_string()]);
    }
}
