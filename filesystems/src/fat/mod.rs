// FAT-family BPB classification engine
//
// Given a raw boot sector plus partition geometry, decide which of the
// historical BPB dialects produced it (DOS 2.0 through FAT32, MSX-DOS,
// Atari GEMDOS, Apricot, Human68k, DEC Rainbow, plus a table of hardcoded
// pre-BPB floppy formats), then project the result into one canonical
// structure for the rest of the filesystem driver.

pub mod arbiter;
pub mod bpb;
pub mod constants;
pub mod evaluators;
pub mod geometry;
pub mod layout;
pub mod width;

use fatprobe_core::{FatprobeError, PartitionGeometry, SectorSource};
use serde::{Deserialize, Serialize};

use bpb::{cluster_count, BpbKind, Classification, FatWidth};

/// Fully resolved identity of a FAT volume: classification plus FAT width
/// plus derived cluster count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeIdentity {
    pub classification: Classification,
    pub width: FatWidth,
    pub clusters: u64,
}

/// Identify a FAT volume on `media` at `geometry`.
///
/// Reads the boot sector (a 512-byte-equivalent view even on smaller
/// physical sectors), classifies it, and resolves the FAT width. Returns
/// `Ok(None)` when the volume is not recognizable as FAT; the zero-field
/// Hardcoded fallback also lands here, since it carries no usable geometry.
pub fn identify(
    media: &mut dyn SectorSource,
    geometry: &PartitionGeometry,
) -> Result<Option<VolumeIdentity>, FatprobeError> {
    let sector_size = media.sector_size().max(1);
    let count = 512u32.div_ceil(sector_size).max(1);
    let boot = media.read_sectors(geometry.start_sector, count)?;

    let classification = arbiter::classify(&boot, geometry, media)?;
    if classification.kind == BpbKind::None {
        return Ok(None);
    }
    if classification.kind == BpbKind::Hardcoded && classification.bpb.sectors == 0 {
        return Ok(None);
    }

    let width = width::resolve_fat_width(media, geometry, &classification)?;
    let clusters = cluster_count(&classification.bpb);
    Ok(Some(VolumeIdentity {
        classification,
        width,
        clusters,
    }))
}
