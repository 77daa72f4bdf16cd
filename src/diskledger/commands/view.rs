use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DiskRepository;

pub fn run<S: DiskRepository>(store: &S, id: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.get_by_id(id)? {
        Some(disk) => result.listed_disks.push(disk),
        None => result.add_message(CmdMessage::warning(format!("Disk not found: {}", id))),
    }
    Ok(result)
}
