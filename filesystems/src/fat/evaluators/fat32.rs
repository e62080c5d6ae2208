// FAT32 EBPB, long (signature 0x29) and short (signature 0x28) forms
//
// Only evaluated on media with at least 256-byte sectors. The long form
// must be tried before the short form: a sector carrying the 0x29
// signature plus type string is a superset of the short-form predicate.

use fatprobe_core::PartitionGeometry;
use log::trace;

use super::{ascii_field, Candidate};
use crate::fat::bpb::{BpbKind, CanonicalBpb};
use crate::fat::constants::*;
use crate::fat::geometry::{fits_in_partition, is_power_of_two, is_valid_cluster_size};
use crate::fat::layout::{DosBpb, Fat32Tail};

fn common_fields(dos: &DosBpb, tail: &Fat32Tail, sector: &[u8], sectors: u64) -> CanonicalBpb {
    CanonicalBpb {
        bytes_per_sector: dos.bps,
        sectors_per_cluster: dos.spc,
        reserved_sectors: dos.rsectors,
        fats: dos.fats,
        root_entries: 0,
        sectors,
        media: dos.media,
        sectors_per_fat: tail.spfat32,
        sectors_per_track: dos.sptrk,
        heads: dos.heads,
        hidden_sectors: dos.hsectors32,
        serial: Some(tail.serial),
        oem_name: Some(ascii_field(&dos.oem_name)),
        root_cluster: tail.root_cluster,
        fs_info_sector: tail.fs_info_sector,
        boot_code: sector.to_vec(),
        ..Default::default()
    }
}

/// Long-form FAT32: signature 0x29 plus the "FAT32   " type string.
pub fn evaluate_long(sector: &[u8], geometry: &PartitionGeometry) -> Option<Candidate> {
    if geometry.sector_size < 256 {
        return None;
    }
    let dos = DosBpb::decode(sector, geometry.optical_hybrid);
    let tail = Fat32Tail::decode(sector, geometry.optical_hybrid);

    if !is_power_of_two(dos.bps as u32) || !is_valid_cluster_size(dos.spc) {
        return None;
    }
    if dos.fats > 2 || dos.spfat != 0 {
        return None;
    }
    if tail.signature != EBPB_SIG_FULL || &tail.fs_type != FAT32_TYPE_STRING {
        return None;
    }
    let sectors = if dos.sectors != 0 {
        dos.sectors as u64
    } else {
        dos.big_sectors as u64
    };
    if !fits_in_partition(sectors, geometry) {
        trace!("FAT32 long: {} sectors exceed partition", sectors);
        return None;
    }

    let mut bpb = common_fields(&dos, &tail, sector, sectors);
    bpb.volume_label = Some(ascii_field(&tail.volume_label));
    bpb.fs_type = Some(ascii_field(&tail.fs_type));
    Some(Candidate::new(
        BpbKind::LongFat32,
        bpb,
        JUMP_FLOOR_LONG_FAT32,
    ))
}

/// Short-form FAT32: signature 0x28, both legacy sector fields zero, the
/// real count in the 64-bit huge-sectors field.
pub fn evaluate_short(sector: &[u8], geometry: &PartitionGeometry) -> Option<Candidate> {
    if geometry.sector_size < 256 {
        return None;
    }
    let dos = DosBpb::decode(sector, geometry.optical_hybrid);
    let tail = Fat32Tail::decode(sector, geometry.optical_hybrid);

    if !is_power_of_two(dos.bps as u32) || !is_valid_cluster_size(dos.spc) {
        return None;
    }
    if dos.fats > 2 || dos.sectors != 0 || dos.big_sectors != 0 {
        return None;
    }
    if tail.signature != EBPB_SIG_SHORT {
        return None;
    }
    if !fits_in_partition(tail.huge_sectors, geometry) {
        trace!(
            "FAT32 short: {} sectors exceed partition",
            tail.huge_sectors
        );
        return None;
    }

    let bpb = common_fields(&dos, &tail, sector, tail.huge_sectors);
    Some(Candidate::new(
        BpbKind::ShortFat32,
        bpb,
        JUMP_FLOOR_SHORT_FAT32,
    ))
}
