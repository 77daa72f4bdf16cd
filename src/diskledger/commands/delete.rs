use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DiskRepository;

pub fn run<S: DiskRepository>(store: &mut S, id: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let Some(disk) = store.get_by_id(id)? else {
        result.add_message(CmdMessage::warning(format!("Disk not found: {}", id)));
        return Ok(result);
    };

    if store.delete(id)? {
        tracing::info!(id, name = %disk.name, "disk deleted");
        result.add_message(CmdMessage::success(format!("Disk deleted: {}", disk.name)));
        result.affected_disks.push(disk);
    } else {
        result.add_message(CmdMessage::warning(format!("Disk not found: {}", id)));
    }
    Ok(result)
}
