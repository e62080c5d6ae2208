// DOS 4.0 EBPB (signature 0x29) and DOS 3.4 short EBPB (signature 0x28)
//
// Also admits sectors whose OEM name matches the ANDOS quirk: ANDOS writes
// a control byte first and printable text after, which hides an otherwise
// well-formed short EBPB.

use fatprobe_core::PartitionGeometry;
use log::trace;

use super::{ascii_field, Candidate};
use crate::fat::bpb::{BpbKind, CanonicalBpb};
use crate::fat::constants::*;
use crate::fat::geometry::{fits_in_partition, is_power_of_two, is_valid_cluster_size};
use crate::fat::layout::DosBpb;

/// First OEM byte below 0x20, remaining seven printable.
pub fn andos_oem_correct(oem: &[u8; 8]) -> bool {
    oem[0] < 0x20 && oem[1..].iter().all(|&b| (0x20..=0x7E).contains(&b))
}

pub fn evaluate(sector: &[u8], geometry: &PartitionGeometry) -> Option<Candidate> {
    let dos = DosBpb::decode(sector, geometry.optical_hybrid);

    if !is_power_of_two(dos.bps as u32) || !is_valid_cluster_size(dos.spc) {
        return None;
    }
    if dos.fats > 2 || dos.root_entries == 0 || dos.spfat == 0 {
        return None;
    }
    let andos = andos_oem_correct(&dos.oem_name);
    if dos.signature != EBPB_SIG_SHORT && dos.signature != EBPB_SIG_FULL && !andos {
        return None;
    }

    // 16-bit sectors field wins when nonzero; either branch re-checks the
    // resolved count against the partition.
    let sectors = if dos.sectors != 0 {
        dos.sectors as u64
    } else {
        dos.big_sectors as u64
    };
    if sectors == 0 || !fits_in_partition(sectors, geometry) {
        trace!("EBPB: {} sectors do not fit the partition", sectors);
        return None;
    }

    let full = dos.signature == EBPB_SIG_FULL;
    let mut bpb = CanonicalBpb {
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
        hidden_sectors: dos.hsectors32,
        serial: Some(dos.serial),
        oem_name: Some(ascii_field(&dos.oem_name)),
        boot_code: sector.to_vec(),
        ..Default::default()
    };

    let (kind, floor) = if full {
        bpb.volume_label = Some(ascii_field(&dos.volume_label));
        bpb.fs_type = Some(ascii_field(&dos.fs_type));
        (BpbKind::Extended, JUMP_FLOOR_EBPB)
    } else {
        (BpbKind::ShortExtended, JUMP_FLOOR_SHORT_EBPB)
    };

    let mut candidate = Candidate::new(kind, bpb, floor);
    candidate.andos_oem_correct = andos;
    Some(candidate)
}
