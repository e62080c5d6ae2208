// Pre-BPB floppies: identified by the first FAT byte plus image geometry
// against a fixed table of known formats
//
// Last resort of the chain. A table miss still classifies as Hardcoded,
// with an all-zero BPB: the mount layer treats zero fields as "ultimately
// unidentified", matching legacy behavior.

use fatprobe_core::{FatprobeError, PartitionGeometry, SectorSource};
use log::debug;

use super::Candidate;
use crate::fat::bpb::{BpbKind, CanonicalBpb};
use crate::fat::constants::{HardcodedGeometry, HARDCODED_GEOMETRIES, JUMP_FLOOR_DOS20};

fn lookup(fat_id: u8, geometry: &PartitionGeometry) -> Option<&'static HardcodedGeometry> {
    HARDCODED_GEOMETRIES.iter().find(|g| {
        g.fat_id == fat_id
            && g.image_sectors == geometry.image_sectors
            && g.sector_size == geometry.sector_size
    })
}

/// Consult the known-geometry table. `Ok(None)` means no table match; the
/// arbiter then tries DEC Rainbow before settling on the zero-BPB fallback.
pub fn evaluate(
    boot_sector: &[u8],
    geometry: &PartitionGeometry,
    media: &mut dyn SectorSource,
) -> Result<Option<Candidate>, FatprobeError> {
    // The FAT ID lives in the first byte of the sector after the boot sector.
    if 1 + geometry.start_sector >= media.total_sectors() {
        return Ok(None);
    }
    let fat_sector = media.read_sector(1 + geometry.start_sector)?;
    let fat_id = match fat_sector.first() {
        Some(&b) => b,
        None => return Ok(None),
    };

    let known = match lookup(fat_id, geometry) {
        Some(known) => known,
        None => return Ok(None),
    };
    debug!(
        "hardcoded geometry match: FAT id {:#04X}, {} sectors of {} bytes",
        fat_id, geometry.image_sectors, geometry.sector_size
    );

    let bpb = CanonicalBpb {
        bytes_per_sector: known.sector_size as u16,
        sectors_per_cluster: known.spc,
        reserved_sectors: known.reserved_sectors,
        fats: known.fats,
        root_entries: known.root_entries,
        sectors: known.image_sectors,
        media: fat_id,
        sectors_per_fat: known.sectors_per_fat,
        sectors_per_track: known.sectors_per_track,
        heads: known.heads,
        boot_code: boot_sector.to_vec(),
        ..Default::default()
    };

    Ok(Some(Candidate::new(
        BpbKind::Hardcoded,
        bpb,
        JUMP_FLOOR_DOS20,
    )))
}

/// Table miss: classification still succeeds, fields stay empty.
pub fn unidentified(boot_sector: &[u8]) -> Candidate {
    let bpb = CanonicalBpb {
        boot_code: boot_sector.to_vec(),
        ..Default::default()
    };
    Candidate::new(BpbKind::Hardcoded, bpb, 0)
}
