// Geometry plausibility predicates used by every dialect evaluator

use fatprobe_core::PartitionGeometry;

/// True iff `value` has exactly one bit set. Bytes-per-sector must satisfy
/// this in every dialect that defines it.
pub fn is_power_of_two(value: u32) -> bool {
    value != 0 && value & (value - 1) == 0
}

/// True iff `spc` is a legal sectors-per-cluster value.
pub fn is_valid_cluster_size(spc: u8) -> bool {
    matches!(spc, 1 | 2 | 4 | 8 | 16 | 32 | 64)
}

/// True iff a decoded sector count fits inside the partition span.
pub fn fits_in_partition(sector_count: u64, geometry: &PartitionGeometry) -> bool {
    sector_count <= geometry.partition_sectors()
}
