use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ContentItem;
use crate::store::DiskRepository;

type SampleDisk = (&'static str, i64, &'static [(&'static str, i64)]);

const SAMPLE_DISKS: [SampleDisk; 5] = [
    (
        "SSD Principal",
        500,
        &[("Sistema Operativo", 150), ("Apps", 300)],
    ),
    (
        "HDD Backups",
        2000,
        &[("Fotos Familiares", 700), ("Documentos", 500)],
    ),
    ("NVMe Juegos", 1000, &[("Juegos Actuales", 100)]),
    ("USB Trabajo", 128, &[("Proyectos Activos", 10)]),
    (
        "Servidor Media",
        4000,
        &[("Peliculas", 2300), ("Series", 1500)],
    ),
];

/// Load the sample disks into an empty store.
pub fn run<S: DiskRepository>(store: &mut S) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if !store.get_all()?.is_empty() {
        result.add_message(CmdMessage::info(
            "Store already contains data. Skipping seeding.",
        ));
        return Ok(result);
    }

    for (name, capacity, items) in SAMPLE_DISKS {
        let contents = items
            .iter()
            .map(|(desc, size)| ContentItem::new(*desc, *size))
            .collect();
        let disk = store.add(name, capacity, contents)?;
        result.affected_disks.push(disk);
    }

    tracing::info!(count = result.affected_disks.len(), "store seeded");
    result.add_message(CmdMessage::success(format!(
        "Seeded {} sample disks.",
        result.affected_disks.len()
    )));
    Ok(result)
}
