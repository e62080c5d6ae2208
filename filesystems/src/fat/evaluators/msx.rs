// MSX-DOS 2: a DOS 3.3-shaped BPB plus the "VOL_ID" marker

use fatprobe_core::PartitionGeometry;

use super::{ascii_field, Candidate};
use crate::fat::bpb::{BpbKind, CanonicalBpb};
use crate::fat::constants::*;
use crate::fat::geometry::{fits_in_partition, is_power_of_two, is_valid_cluster_size};
use crate::fat::layout::{bytes_at, le_u32_at, DosBpb};

pub fn evaluate(sector: &[u8], geometry: &PartitionGeometry) -> Option<Candidate> {
    let dos = DosBpb::decode(sector, geometry.optical_hybrid);

    if !is_power_of_two(dos.bps as u32) || !is_valid_cluster_size(dos.spc) {
        return None;
    }
    if dos.fats > 2 || dos.root_entries == 0 || dos.spfat == 0 {
        return None;
    }
    let sectors = if dos.sectors != 0 {
        dos.sectors as u64
    } else {
        dos.big_sectors as u64
    };
    if sectors == 0 || !fits_in_partition(sectors, geometry) {
        return None;
    }
    let vol_id: [u8; 6] = bytes_at(sector, MSX_VOL_ID);
    if &vol_id != MSX_VOL_ID_MAGIC {
        return None;
    }

    let bpb = CanonicalBpb {
        bytes_per_sector: dos.bps,
        sectors_per_cluster: dos.spc,
        reserved_sectors: dos.rsectors,
        fats: dos.fats,
        root_entries: dos.root_entries,
        sectors,
        media: dos.media,
        sectors_per_fat: dos.spfat as u32,
        sectors_per_track: dos.sptrk,
        heads: dos.heads,
        hidden_sectors: dos.hsectors16 as u32,
        serial: Some(le_u32_at(sector, MSX_VOL_ID + 8)),
        oem_name: Some(ascii_field(&dos.oem_name)),
        boot_code: sector.to_vec(),
        ..Default::default()
    };

    Some(Candidate::new(BpbKind::Msx, bpb, JUMP_FLOOR_DOS32))
}
