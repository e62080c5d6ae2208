// DEC Rainbow 100: no BPB, identified by corroborating on-disk structures
//
// Only candidate when the image is exactly 800 sectors of 512 bytes. The
// boot sector starts with the Z80 DI opcode; both FAT copies must agree and
// carry the FAT12 reserved-cluster marker; and the 96-entry root directory,
// assembled from six 2:1-interleaved sectors, must contain nothing but
// plausible directory name bytes.

use fatprobe_core::{FatprobeError, PartitionGeometry, SectorSource};
use log::trace;

use super::Candidate;
use crate::fat::bpb::{BpbKind, CanonicalBpb};
use crate::fat::constants::*;

fn plausible_name_byte(b: u8) -> bool {
    (0x20..=0x7E).contains(&b) || b == 0x00 || b == 0x05 || b == 0xFF || b == 0x2E
}

pub fn evaluate(
    sector: &[u8],
    geometry: &PartitionGeometry,
    media: &mut dyn SectorSource,
) -> Result<Option<Candidate>, FatprobeError> {
    if geometry.image_sectors != RAINBOW_SECTORS || geometry.sector_size != RAINBOW_SECTOR_SIZE {
        return Ok(None);
    }
    if sector.first().copied() != Some(RAINBOW_Z80_DI) {
        return Ok(None);
    }

    let fat1 = media.read_sector(RAINBOW_FAT1_LBA)?;
    let fat2 = media.read_sector(RAINBOW_FAT2_LBA)?;
    if fat1.len() < 2 || fat2.len() < 2 {
        return Ok(None);
    }
    if fat1[0] != fat2[0] || fat1[1] != fat2[1] {
        trace!("DEC Rainbow: FAT copies disagree");
        return Ok(None);
    }
    if fat1[0] & 0xF0 != 0xF0 || fat1[1] != 0xFF {
        return Ok(None);
    }

    let mut root_dir = Vec::with_capacity(RAINBOW_ROOT_LBAS.len() * 512);
    for lba in RAINBOW_ROOT_LBAS {
        root_dir.extend_from_slice(&media.read_sector(lba)?);
    }
    for entry in root_dir.chunks_exact(32).take(RAINBOW_ROOT_ENTRIES as usize) {
        if !entry[..11].iter().copied().all(plausible_name_byte) {
            trace!("DEC Rainbow: implausible root directory name bytes");
            return Ok(None);
        }
    }

    // Everything about this format is fixed; nothing comes from the sector.
    let bpb = CanonicalBpb {
        bytes_per_sector: 512,
        sectors_per_cluster: 1,
        reserved_sectors: RAINBOW_FAT1_LBA as u16,
        fats: 2,
        root_entries: RAINBOW_ROOT_ENTRIES,
        sectors: RAINBOW_SECTORS,
        media: RAINBOW_MEDIA,
        sectors_per_fat: RAINBOW_SECTORS_PER_FAT,
        sectors_per_track: 10,
        heads: 1,
        boot_code: sector.to_vec(),
        ..Default::default()
    };

    Ok(Some(Candidate::new(BpbKind::DecRainbow, bpb, 0)))
}
