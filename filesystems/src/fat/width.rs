// FAT12 vs FAT16 resolution
//
// The BPB's self-declared type string cannot be trusted (known-buggy OSes
// lie), so when the admitted dialect leaves the width open the FAT table
// itself is scanned under both interpretations. Both the identify-only and
// the mount paths go through this one function.

use fatprobe_core::{FatprobeError, PartitionGeometry, SectorSource};
use log::{debug, trace};

use super::bpb::{cluster_count, BpbKind, Classification, FatWidth};
use super::constants::{FAT12_16_CROSSOVER, FAT12_RESERVED, FAT16_RESERVED, FAT16_RESERVED_ENTRY1};

/// Unpack raw FAT bytes as 12-bit packed triples (3 bytes -> 2 entries).
pub fn unpack_fat12(fat: &[u8]) -> Vec<u16> {
    let mut entries = Vec::with_capacity(fat.len() / 3 * 2);
    for triple in fat.chunks_exact(3) {
        entries.push(u16::from(triple[0]) | (u16::from(triple[1] & 0x0F) << 8));
        entries.push(u16::from(triple[1] >> 4) | (u16::from(triple[2]) << 4));
    }
    entries
}

/// Unpack raw FAT bytes as 16-bit little-endian words.
pub fn unpack_fat16(fat: &[u8]) -> Vec<u16> {
    fat.chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

// Only entries that address real clusters matter; anything past
// cluster_count + 1 is slack space in the last FAT sector.
fn scan_limit(entries: usize, cluster_count: u64) -> usize {
    entries.min((cluster_count + 2) as usize)
}

fn valid_as_fat12(entries: &[u16], cluster_count: u64) -> bool {
    if entries.len() < 2 || entries[0] < FAT12_RESERVED || entries[1] < FAT12_RESERVED {
        return false;
    }
    entries[..scan_limit(entries.len(), cluster_count)]
        .iter()
        .all(|&e| e >= FAT12_RESERVED || u64::from(e) <= cluster_count + 2)
}

fn valid_as_fat16(entries: &[u16], cluster_count: u64) -> bool {
    if entries.len() < 2 || entries[0] < FAT16_RESERVED || entries[1] < FAT16_RESERVED_ENTRY1 {
        return false;
    }
    entries[..scan_limit(entries.len(), cluster_count)]
        .iter()
        .all(|&e| e >= FAT16_RESERVED || u64::from(e) <= cluster_count + 2)
}

/// Decide FAT12 vs FAT16 from raw FAT bytes.
///
/// When exactly one interpretation is internally consistent it wins; when
/// both or neither are, the self-declared type string breaks the tie, and
/// failing that the result is FAT12. The FAT12 bias is deliberate legacy
/// behavior that real-world images rely on.
pub fn fat_width_from_table(
    fat: &[u8],
    cluster_count: u64,
    declared: Option<&str>,
) -> FatWidth {
    let fat12_valid = valid_as_fat12(&unpack_fat12(fat), cluster_count);
    let fat16_valid = valid_as_fat16(&unpack_fat16(fat), cluster_count);
    trace!(
        "FAT width scan: fat12_valid={}, fat16_valid={}, declared={:?}",
        fat12_valid,
        fat16_valid,
        declared
    );

    match (fat12_valid, fat16_valid) {
        (true, false) => FatWidth::Fat12,
        (false, true) => FatWidth::Fat16,
        _ => match declared {
            Some("FAT16   ") => FatWidth::Fat16,
            Some("FAT12   ") => FatWidth::Fat12,
            _ => FatWidth::Fat12,
        },
    }
}

/// Resolve the FAT width of an admitted classification, reading the first
/// FAT copy when the dialect leaves the width open.
pub fn resolve_fat_width(
    media: &mut dyn SectorSource,
    geometry: &PartitionGeometry,
    classification: &Classification,
) -> Result<FatWidth, FatprobeError> {
    match classification.kind {
        BpbKind::None => {
            return Err(FatprobeError::InvalidInput(
                "cannot resolve FAT width of an unclassified volume".to_string(),
            ))
        }
        BpbKind::LongFat32 | BpbKind::ShortFat32 => return Ok(FatWidth::Fat32),
        // Fixed by definition, no scan needed.
        BpbKind::Human => return Ok(FatWidth::Fat16),
        BpbKind::Hardcoded | BpbKind::DecRainbow => return Ok(FatWidth::Fat12),
        _ => {}
    }

    let bpb = &classification.bpb;
    let clusters = cluster_count(bpb);
    if clusters >= FAT12_16_CROSSOVER {
        return Ok(FatWidth::Fat16);
    }
    if bpb.sectors_per_fat == 0 || bpb.bytes_per_sector == 0 {
        return Ok(fat_width_from_table(&[], clusters, bpb.fs_type.as_deref()));
    }

    // BPB units may differ from the image's physical sector size, so the
    // FAT location is computed in bytes and mapped back to image LBAs.
    let bps = bpb.bytes_per_sector as u64;
    let fat_bytes = bpb.sectors_per_fat as u64 * bps;
    let fat_offset = bpb.reserved_sectors as u64 * bps;
    let sector_size = media.sector_size().max(1) as u64;
    let first_lba = geometry.start_sector + fat_offset / sector_size;
    // When BPB units are smaller than the physical sector the FAT starts
    // mid-sector; the skipped head also pushes the tail into one more
    // sector.
    let skip = (fat_offset % sector_size) as usize;
    let count = (skip as u64 + fat_bytes).div_ceil(sector_size) as u32;

    debug!(
        "scanning FAT at LBA {} ({} sectors, {} bytes in) to resolve width",
        first_lba, count, skip
    );
    let fat = media.read_sectors(first_lba, count)?;
    let start = skip.min(fat.len());
    let end = (skip + fat_bytes as usize).min(fat.len());
    Ok(fat_width_from_table(
        &fat[start..end],
        clusters,
        bpb.fs_type.as_deref(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fat_bytes(head: &[u8], len: usize) -> Vec<u8> {
        let mut fat = vec![0u8; len];
        fat[..head.len()].copy_from_slice(head);
        fat
    }

    #[test]
    fn unpack12_splits_triples() {
        // F9 FF FF packs entries 0xFF9 and 0xFFF
        assert_eq!(unpack_fat12(&[0xF9, 0xFF, 0xFF]), vec![0xFF9, 0xFFF]);
        assert_eq!(unpack_fat12(&[0x34, 0x12, 0x00]), vec![0x234, 0x001]);
    }

    #[test]
    fn fat12_markers_resolve_to_fat12() {
        // Entries 0/1 at the 12-bit reserved marker, all chain targets in
        // range.
        let fat = fat_bytes(&[0xF9, 0xFF, 0xFF, 0x03, 0x40, 0x00], 512 * 2);
        assert_eq!(fat_width_from_table(&fat, 2000, None), FatWidth::Fat12);
    }

    #[test]
    fn fat16_markers_resolve_to_fat16() {
        // Entries 0/1 = 0xFFFF/0xFFF8: implausible as packed 12-bit values,
        // clean as 16-bit words.
        let fat = fat_bytes(&[0xFF, 0xFF, 0xF8, 0xFF], 512 * 2);
        assert_eq!(fat_width_from_table(&fat, 2000, None), FatWidth::Fat16);
    }

    #[test]
    fn out_of_range_12_bit_target_overrides_declared_type() {
        // 16-bit entries: reserved, reserved, cluster 3. Under the 12-bit
        // reading the second entry becomes 0xF8F, an out-of-range chain
        // target for a 16-cluster volume.
        let fat = fat_bytes(&[0xFF, 0xFF, 0xF8, 0xFF, 0x03, 0x00], 512);
        assert_eq!(
            fat_width_from_table(&fat, 16, Some("FAT12   ")),
            FatWidth::Fat16
        );
    }

    #[test]
    fn tie_breaks_on_declared_type_then_fat12() {
        // Nothing valid either way: entry 0 is zero under both readings.
        let fat = vec![0u8; 512];
        assert_eq!(
            fat_width_from_table(&fat, 100, Some("FAT16   ")),
            FatWidth::Fat16
        );
        assert_eq!(
            fat_width_from_table(&fat, 100, Some("FAT12   ")),
            FatWidth::Fat12
        );
        assert_eq!(fat_width_from_table(&fat, 100, None), FatWidth::Fat12);
        assert_eq!(
            fat_width_from_table(&fat, 100, Some("garbage")),
            FatWidth::Fat12
        );
    }

    #[test]
    fn resolves_width_when_bpb_units_are_smaller_than_physical_sectors() {
        use crate::fat::bpb::{CanonicalBpb, Classification};
        use fatprobe_core::{MemoryImage, PartitionGeometry};

        // 512-byte BPB units on 2048-byte physical sectors: one reserved
        // BPB sector puts the FAT 512 bytes into physical sector 0.
        let mut sector = vec![0u8; 2048];
        sector[512..518].copy_from_slice(&[0xFF, 0xFF, 0xF8, 0xFF, 0x03, 0x00]);
        let mut image = MemoryImage::blank(360, 2048);
        image.put_sector(0, &sector);

        let classification = Classification {
            kind: BpbKind::Dos33,
            bpb: CanonicalBpb {
                bytes_per_sector: 512,
                sectors_per_cluster: 2,
                reserved_sectors: 1,
                fats: 2,
                root_entries: 112,
                sectors: 1440,
                sectors_per_fat: 3,
                ..Default::default()
            },
            min_boot_near_jump: 0,
            andos_oem_correct: false,
            bootable: false,
        };

        // Under the 12-bit reading entry 1 decodes to the out-of-range
        // chain target 0xF8F, so only the 16-bit interpretation holds.
        let geo = PartitionGeometry::whole_image(360, 2048);
        let width = resolve_fat_width(&mut image, &geo, &classification).unwrap();
        assert_eq!(width, FatWidth::Fat16);
    }

    #[test]
    fn slack_space_past_the_last_cluster_is_ignored() {
        // Valid FAT12 head, garbage in the slack area beyond
        // cluster_count + 2 entries.
        let mut fat = fat_bytes(&[0xF9, 0xFF, 0xFF], 512);
        fat[400] = 0x34;
        fat[401] = 0x02; // would decode as an out-of-range target
        assert_eq!(fat_width_from_table(&fat, 16, None), FatWidth::Fat12);
    }
}
