// Human68k (Sharp X68000) boot block
//
// Big-endian layout with no x86 BPB at all. Admission cross-checks the
// declared cluster count against the partition size, so this runs first:
// its predicate is the most specific of the whole chain.

use fatprobe_core::PartitionGeometry;
use log::trace;

use super::{ascii_field, Candidate};
use crate::fat::bpb::{BpbKind, CanonicalBpb};
use crate::fat::constants::*;
use crate::fat::layout::HumanBpb;

pub fn evaluate(sector: &[u8], geometry: &PartitionGeometry) -> Option<Candidate> {
    let human = HumanBpb::decode(sector);

    if sector.first().copied() != Some(HUMAN_BRA_OPCODE) {
        return None;
    }
    if human.jump_offset < HUMAN_JUMP_MIN || human.jump_offset >= HUMAN_JUMP_MAX {
        return None;
    }
    // All sixteen OEM bytes must be printable or space.
    if !human.oem_name.iter().all(|&b| b >= 0x20) {
        return None;
    }
    if human.bytes_per_cluster == 0 {
        return None;
    }

    let expected_clusters = geometry.partition_bytes() / human.bytes_per_cluster as u64;
    if expected_clusters == 0 {
        return None;
    }
    let declared_clusters = if human.clusters16 != 0 {
        human.clusters16 as u64
    } else {
        human.clusters32 as u64
    };
    if declared_clusters != expected_clusters {
        trace!(
            "Human68k: declared {} clusters, geometry implies {}",
            declared_clusters,
            expected_clusters
        );
        return None;
    }

    // Synthesize a generic EBPB-shaped record: two FATs, one reserved
    // sector, cluster size derived from the byte count.
    let spc = (human.bytes_per_cluster as u32 / geometry.sector_size).max(1);
    let bpb = CanonicalBpb {
        bytes_per_sector: geometry.sector_size as u16,
        sectors_per_cluster: spc.min(u8::MAX as u32) as u8,
        reserved_sectors: 1,
        fats: 2,
        root_entries: if human.root_entries != 0 {
            human.root_entries
        } else {
            128
        },
        sectors: declared_clusters * spc as u64,
        media: human.media,
        sectors_per_fat: human.spfat as u32,
        oem_name: Some(ascii_field(&human.oem_name)),
        boot_code: sector.to_vec(),
        ..Default::default()
    };

    Some(Candidate::new(BpbKind::Human, bpb, HUMAN_JUMP_MIN))
}
