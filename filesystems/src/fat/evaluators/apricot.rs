// ACT Apricot: BPB at 0x50 inside the disk label, whole-disk images only

use fatprobe_core::PartitionGeometry;

use super::Candidate;
use crate::fat::bpb::{BpbKind, CanonicalBpb};
use crate::fat::constants::JUMP_FLOOR_DOS30;
use crate::fat::geometry::{fits_in_partition, is_power_of_two, is_valid_cluster_size};
use crate::fat::layout::ApricotBpb;

pub fn evaluate(sector: &[u8], geometry: &PartitionGeometry) -> Option<Candidate> {
    let apricot = ApricotBpb::decode(sector, geometry.optical_hybrid);

    if !is_power_of_two(apricot.bps as u32) || !is_valid_cluster_size(apricot.spc) {
        return None;
    }
    if apricot.fats > 2 || apricot.root_entries == 0 || apricot.spfat == 0 {
        return None;
    }
    if !fits_in_partition(apricot.sectors as u64, geometry) {
        return None;
    }
    // A nonzero partition count means a partitioned Winchester, where the
    // label does not describe one FAT volume.
    if apricot.partitions != 0 {
        return None;
    }

    let bpb = CanonicalBpb {
        bytes_per_sector: apricot.bps,
        sectors_per_cluster: apricot.spc,
        reserved_sectors: apricot.rsectors,
        fats: apricot.fats,
        root_entries: apricot.root_entries,
        sectors: apricot.sectors as u64,
        media: apricot.media,
        sectors_per_fat: apricot.spfat as u32,
        boot_code: sector.to_vec(),
        ..Default::default()
    };

    Some(Candidate::new(BpbKind::Apricot, bpb, JUMP_FLOOR_DOS30))
}
