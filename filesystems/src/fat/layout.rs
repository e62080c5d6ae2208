// Raw dialect field views decoded from boot sector bytes
//
// Every read is bounds-checked against the buffer; a short buffer decodes as
// zeroed fields and gets rejected by the admission predicates downstream,
// never panics. Hybrid optical/USB images store sector-count and
// sectors-per-X fields at a 4x scale, so scaling happens here, before any
// admission check sees the values.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use super::constants::*;

pub fn u8_at(buffer: &[u8], offset: usize) -> u8 {
    buffer.get(offset).copied().unwrap_or(0)
}

pub fn le_u16_at(buffer: &[u8], offset: usize) -> u16 {
    match buffer.get(offset..offset + 2) {
        Some(bytes) => LittleEndian::read_u16(bytes),
        None => 0,
    }
}

pub fn le_u32_at(buffer: &[u8], offset: usize) -> u32 {
    match buffer.get(offset..offset + 4) {
        Some(bytes) => LittleEndian::read_u32(bytes),
        None => 0,
    }
}

pub fn le_u64_at(buffer: &[u8], offset: usize) -> u64 {
    match buffer.get(offset..offset + 8) {
        Some(bytes) => LittleEndian::read_u64(bytes),
        None => 0,
    }
}

pub fn be_u16_at(buffer: &[u8], offset: usize) -> u16 {
    match buffer.get(offset..offset + 2) {
        Some(bytes) => BigEndian::read_u16(bytes),
        None => 0,
    }
}

pub fn be_u32_at(buffer: &[u8], offset: usize) -> u32 {
    match buffer.get(offset..offset + 4) {
        Some(bytes) => BigEndian::read_u32(bytes),
        None => 0,
    }
}

pub fn bytes_at<const N: usize>(buffer: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    if let Some(bytes) = buffer.get(offset..offset + N) {
        out.copy_from_slice(bytes);
    }
    out
}

/// Sum of all big-endian 16-bit words of the sector, wrapping. Atari TOS
/// marks a boot sector executable when this equals 0x1234.
pub fn atari_checksum(sector: &[u8]) -> u16 {
    let mut sum = 0u16;
    for chunk in sector.chunks_exact(2) {
        sum = sum.wrapping_add(BigEndian::read_u16(chunk));
    }
    sum
}

fn scale_u8(value: u8, hybrid: bool) -> u8 {
    if hybrid {
        value / 4
    } else {
        value
    }
}

fn scale_u16(value: u16, hybrid: bool) -> u16 {
    if hybrid {
        value / 4
    } else {
        value
    }
}

fn scale_u32(value: u32, hybrid: bool) -> u32 {
    if hybrid {
        value / 4
    } else {
        value
    }
}

fn scale_u64(value: u64, hybrid: bool) -> u64 {
    if hybrid {
        value / 4
    } else {
        value
    }
}

/// The little-endian DOS BPB lineage: DOS 2.0 core, the 3.0/3.2/3.3
/// extensions and the EBPB tail, decoded in one pass. Evaluators pick the
/// fields their dialect defines.
#[derive(Debug, Clone)]
pub struct DosBpb {
    pub oem_name: [u8; 8],
    pub bps: u16,
    pub spc: u8,
    pub rsectors: u16,
    pub fats: u8,
    pub root_entries: u16,
    pub sectors: u16,
    pub media: u8,
    pub spfat: u16,
    pub sptrk: u16,
    pub heads: u16,
    pub hsectors16: u16,
    pub dos32_total: u16,
    pub hsectors32: u32,
    pub big_sectors: u32,
    pub signature: u8,
    pub serial: u32,
    pub volume_label: [u8; 11],
    pub fs_type: [u8; 8],
}

impl DosBpb {
    pub fn decode(sector: &[u8], hybrid: bool) -> Self {
        DosBpb {
            oem_name: bytes_at(sector, BS_OEM_NAME),
            bps: le_u16_at(sector, BPB_BYTES_PER_SEC),
            spc: scale_u8(u8_at(sector, BPB_SEC_PER_CLUS), hybrid).max(if hybrid { 1 } else { 0 }),
            rsectors: scale_u16(le_u16_at(sector, BPB_RSVD_SEC_CNT), hybrid),
            fats: u8_at(sector, BPB_NUM_FATS),
            root_entries: le_u16_at(sector, BPB_ROOT_ENT_CNT),
            sectors: scale_u16(le_u16_at(sector, BPB_TOT_SEC16), hybrid),
            media: u8_at(sector, BPB_MEDIA),
            spfat: scale_u16(le_u16_at(sector, BPB_FAT_SZ16), hybrid),
            sptrk: le_u16_at(sector, BPB_SEC_PER_TRK),
            heads: le_u16_at(sector, BPB_NUM_HEADS),
            hsectors16: scale_u16(le_u16_at(sector, BPB_HIDD_SEC16), hybrid),
            dos32_total: scale_u16(le_u16_at(sector, BPB_TOT_SEC_DOS32), hybrid),
            hsectors32: scale_u32(le_u32_at(sector, BPB_HIDD_SEC32), hybrid),
            big_sectors: scale_u32(le_u32_at(sector, BPB_TOT_SEC32), hybrid),
            signature: u8_at(sector, EBPB_SIGNATURE),
            serial: le_u32_at(sector, EBPB_SERIAL),
            volume_label: bytes_at(sector, EBPB_VOL_LAB),
            fs_type: bytes_at(sector, EBPB_FS_TYPE),
        }
    }
}

/// FAT32 EBPB tail (long 0x29 and short 0x28 forms).
#[derive(Debug, Clone)]
pub struct Fat32Tail {
    pub spfat32: u32,
    pub root_cluster: u32,
    pub fs_info_sector: u16,
    pub backup_boot_sector: u16,
    pub signature: u8,
    pub serial: u32,
    pub volume_label: [u8; 11],
    pub fs_type: [u8; 8],
    /// Short form only: 64-bit sector count stored over the label area.
    pub huge_sectors: u64,
}

impl Fat32Tail {
    pub fn decode(sector: &[u8], hybrid: bool) -> Self {
        Fat32Tail {
            spfat32: scale_u32(le_u32_at(sector, F32_FAT_SZ32), hybrid),
            root_cluster: le_u32_at(sector, F32_ROOT_CLUSTER),
            fs_info_sector: le_u16_at(sector, F32_FS_INFO),
            backup_boot_sector: le_u16_at(sector, F32_BACKUP_BOOT),
            signature: u8_at(sector, F32_SIGNATURE),
            serial: le_u32_at(sector, F32_SERIAL),
            volume_label: bytes_at(sector, F32_VOL_LAB),
            fs_type: bytes_at(sector, F32_FS_TYPE),
            huge_sectors: scale_u64(le_u64_at(sector, F32_HUGE_SECTORS), hybrid),
        }
    }
}

/// Atari GEMDOS extras; the geometry fields are shared with `DosBpb`.
#[derive(Debug, Clone)]
pub struct AtariBpb {
    pub oem_name: [u8; 6],
    pub serial: [u8; 3],
}

impl AtariBpb {
    pub fn decode(sector: &[u8]) -> Self {
        AtariBpb {
            oem_name: bytes_at(sector, ATARI_OEM_NAME),
            serial: bytes_at(sector, ATARI_SERIAL),
        }
    }

    pub fn serial_u32(&self) -> u32 {
        u32::from_le_bytes([self.serial[0], self.serial[1], self.serial[2], 0])
    }
}

/// Apricot label: partition-count byte in the label head, BPB at 0x50.
#[derive(Debug, Clone)]
pub struct ApricotBpb {
    pub partitions: u8,
    pub bps: u16,
    pub spc: u8,
    pub rsectors: u16,
    pub fats: u8,
    pub root_entries: u16,
    pub sectors: u16,
    pub media: u8,
    pub spfat: u16,
}

impl ApricotBpb {
    pub fn decode(sector: &[u8], hybrid: bool) -> Self {
        ApricotBpb {
            partitions: u8_at(sector, APRICOT_PARTITIONS),
            bps: le_u16_at(sector, APRICOT_BPS),
            spc: scale_u8(u8_at(sector, APRICOT_SPC), hybrid).max(if hybrid { 1 } else { 0 }),
            rsectors: scale_u16(le_u16_at(sector, APRICOT_RSVD_SEC_CNT), hybrid),
            fats: u8_at(sector, APRICOT_NUM_FATS),
            root_entries: le_u16_at(sector, APRICOT_ROOT_ENT_CNT),
            sectors: scale_u16(le_u16_at(sector, APRICOT_TOT_SEC), hybrid),
            media: u8_at(sector, APRICOT_MEDIA),
            spfat: scale_u16(le_u16_at(sector, APRICOT_FAT_SZ), hybrid),
        }
    }
}

/// Human68k (X68000) boot block; all multi-byte fields are big-endian.
/// Hybrid scaling never applies here: no hybrid optical/USB image carries a
/// Human68k volume.
#[derive(Debug, Clone)]
pub struct HumanBpb {
    pub jump_offset: u8,
    pub oem_name: [u8; 16],
    pub bytes_per_cluster: u16,
    pub clusters16: u16,
    pub clusters32: u32,
    pub media: u8,
    pub spfat: u8,
    pub root_entries: u16,
}

impl HumanBpb {
    pub fn decode(sector: &[u8]) -> Self {
        HumanBpb {
            jump_offset: u8_at(sector, 1),
            oem_name: bytes_at(sector, HUMAN_OEM_NAME),
            bytes_per_cluster: be_u16_at(sector, HUMAN_BYTES_PER_CLUSTER),
            clusters16: be_u16_at(sector, HUMAN_CLUSTERS16),
            clusters32: be_u32_at(sector, HUMAN_CLUSTERS32),
            media: u8_at(sector, HUMAN_MEDIA),
            spfat: u8_at(sector, HUMAN_FAT_SZ),
            root_entries: be_u16_at(sector, HUMAN_ROOT_ENT_CNT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_past_the_buffer_decode_as_zero() {
        let short = [0xEBu8, 0x3C];
        assert_eq!(u8_at(&short, 5), 0);
        assert_eq!(le_u16_at(&short, 1), 0);
        assert_eq!(le_u32_at(&short, 0), 0);
        assert_eq!(bytes_at::<8>(&short, 0), [0u8; 8]);
    }

    #[test]
    fn hybrid_scaling_divides_counts_and_clamps_spc() {
        let mut sector = vec![0u8; 512];
        sector[BPB_SEC_PER_CLUS] = 4;
        // 11520 = 2880 * 4
        sector[BPB_TOT_SEC16..BPB_TOT_SEC16 + 2].copy_from_slice(&11520u16.to_le_bytes());
        sector[BPB_FAT_SZ16] = 36;

        let bpb = DosBpb::decode(&sector, true);
        assert_eq!(bpb.spc, 1);
        assert_eq!(bpb.sectors, 2880);
        assert_eq!(bpb.spfat, 9);

        // spc that scales to zero clamps to one
        sector[BPB_SEC_PER_CLUS] = 2;
        assert_eq!(DosBpb::decode(&sector, true).spc, 1);
    }

    #[test]
    fn atari_checksum_sums_big_endian_words() {
        let mut sector = vec![0u8; 512];
        sector[0] = 0x12;
        sector[1] = 0x34;
        assert_eq!(atari_checksum(&sector), 0x1234);
    }
}
