// Synthetic boot sector and image builders for the test suites

use crate::fat::constants::*;
use fatprobe_core::MemoryImage;

/// A 512-byte sector carrying a DOS-lineage BPB. Jump bytes, OEM name and
/// the 0x55AA signature are filled with conventional values; geometry
/// fields beyond the DOS 2.0 core stay zero so tests can set exactly what
/// their dialect defines.
#[allow(clippy::too_many_arguments)]
pub fn dos_sector(
    bps: u16,
    spc: u8,
    reserved: u16,
    fats: u8,
    root_entries: u16,
    sectors: u16,
    media: u8,
    spfat: u16,
) -> Vec<u8> {
    let mut sector = vec![0u8; 512];
    sector[0] = 0xEB;
    sector[1] = 0x3C;
    sector[2] = 0x90;
    sector[BS_OEM_NAME..BS_OEM_NAME + 8].copy_from_slice(b"FATPROBE");
    sector[BPB_BYTES_PER_SEC..BPB_BYTES_PER_SEC + 2].copy_from_slice(&bps.to_le_bytes());
    sector[BPB_SEC_PER_CLUS] = spc;
    sector[BPB_RSVD_SEC_CNT..BPB_RSVD_SEC_CNT + 2].copy_from_slice(&reserved.to_le_bytes());
    sector[BPB_NUM_FATS] = fats;
    sector[BPB_ROOT_ENT_CNT..BPB_ROOT_ENT_CNT + 2].copy_from_slice(&root_entries.to_le_bytes());
    sector[BPB_TOT_SEC16..BPB_TOT_SEC16 + 2].copy_from_slice(&sectors.to_le_bytes());
    sector[BPB_MEDIA] = media;
    sector[BPB_FAT_SZ16..BPB_FAT_SZ16 + 2].copy_from_slice(&spfat.to_le_bytes());
    sector[510] = 0x55;
    sector[511] = 0xAA;
    sector
}

/// Attach an EBPB tail (DOS 3.4/4.0) to a DOS sector.
pub fn with_ebpb(
    mut sector: Vec<u8>,
    signature: u8,
    serial: u32,
    label: &[u8; 11],
    fs_type: &[u8; 8],
) -> Vec<u8> {
    sector[EBPB_SIGNATURE] = signature;
    sector[EBPB_SERIAL..EBPB_SERIAL + 4].copy_from_slice(&serial.to_le_bytes());
    sector[EBPB_VOL_LAB..EBPB_VOL_LAB + 11].copy_from_slice(label);
    sector[EBPB_FS_TYPE..EBPB_FS_TYPE + 8].copy_from_slice(fs_type);
    sector
}

/// Long-form FAT32 boot sector: signature 0x29 plus "FAT32   ". The total
/// lives in the 32-bit big-sectors field.
pub fn fat32_long_sector(bps: u16, spc: u8, fats: u8, big_sectors: u32) -> Vec<u8> {
    let mut sector = dos_sector(bps, spc, 32, fats, 0, 0, 0xF8, 0);
    sector[1] = 0x58;
    sector[BPB_TOT_SEC32..BPB_TOT_SEC32 + 4].copy_from_slice(&big_sectors.to_le_bytes());
    sector[F32_FAT_SZ32..F32_FAT_SZ32 + 4].copy_from_slice(&1024u32.to_le_bytes());
    sector[F32_ROOT_CLUSTER..F32_ROOT_CLUSTER + 4].copy_from_slice(&2u32.to_le_bytes());
    sector[F32_FS_INFO..F32_FS_INFO + 2].copy_from_slice(&1u16.to_le_bytes());
    sector[F32_BACKUP_BOOT..F32_BACKUP_BOOT + 2].copy_from_slice(&6u16.to_le_bytes());
    sector[F32_SIGNATURE] = EBPB_SIG_FULL;
    sector[F32_SERIAL..F32_SERIAL + 4].copy_from_slice(&0x1234_5678u32.to_le_bytes());
    sector[F32_VOL_LAB..F32_VOL_LAB + 11].copy_from_slice(b"NO NAME    ");
    sector[F32_FS_TYPE..F32_FS_TYPE + 8].copy_from_slice(FAT32_TYPE_STRING);
    sector
}

/// Short-form FAT32 boot sector: signature 0x28, both legacy count fields
/// zero, the real total in the 64-bit huge-sectors field.
pub fn fat32_short_sector(bps: u16, spc: u8, fats: u8, huge_sectors: u64) -> Vec<u8> {
    let mut sector = dos_sector(bps, spc, 32, fats, 0, 0, 0xF8, 0);
    sector[1] = 0x57;
    sector[F32_FAT_SZ32..F32_FAT_SZ32 + 4].copy_from_slice(&1024u32.to_le_bytes());
    sector[F32_ROOT_CLUSTER..F32_ROOT_CLUSTER + 4].copy_from_slice(&2u32.to_le_bytes());
    sector[F32_FS_INFO..F32_FS_INFO + 2].copy_from_slice(&1u16.to_le_bytes());
    sector[F32_SIGNATURE] = EBPB_SIG_SHORT;
    sector[F32_SERIAL..F32_SERIAL + 4].copy_from_slice(&0x1234_5678u32.to_le_bytes());
    sector[F32_HUGE_SECTORS..F32_HUGE_SECTORS + 8].copy_from_slice(&huge_sectors.to_le_bytes());
    sector
}

/// Human68k boot block: BRA.S, printable OEM, big-endian cluster fields.
pub fn human_sector(jump_offset: u8, oem_byte: u8, bytes_per_cluster: u16, clusters16: u16) -> Vec<u8> {
    let mut sector = vec![0u8; 512];
    sector[0] = HUMAN_BRA_OPCODE;
    sector[1] = jump_offset;
    for b in &mut sector[HUMAN_OEM_NAME..HUMAN_OEM_NAME + 16] {
        *b = oem_byte;
    }
    sector[HUMAN_BYTES_PER_CLUSTER..HUMAN_BYTES_PER_CLUSTER + 2]
        .copy_from_slice(&bytes_per_cluster.to_be_bytes());
    sector[HUMAN_CLUSTERS16..HUMAN_CLUSTERS16 + 2].copy_from_slice(&clusters16.to_be_bytes());
    sector[HUMAN_MEDIA] = 0xFE;
    sector[HUMAN_FAT_SZ] = 2;
    sector
}

/// Apricot label sector: BPB at 0x50, partition count in the label head.
pub fn apricot_sector(
    bps: u16,
    spc: u8,
    root_entries: u16,
    sectors: u16,
    spfat: u16,
    partitions: u8,
) -> Vec<u8> {
    let mut sector = vec![0u8; 512];
    sector[APRICOT_PARTITIONS] = partitions;
    sector[APRICOT_BPS..APRICOT_BPS + 2].copy_from_slice(&bps.to_le_bytes());
    sector[APRICOT_SPC] = spc;
    sector[APRICOT_RSVD_SEC_CNT..APRICOT_RSVD_SEC_CNT + 2].copy_from_slice(&1u16.to_le_bytes());
    sector[APRICOT_NUM_FATS] = 2;
    sector[APRICOT_ROOT_ENT_CNT..APRICOT_ROOT_ENT_CNT + 2]
        .copy_from_slice(&root_entries.to_le_bytes());
    sector[APRICOT_TOT_SEC..APRICOT_TOT_SEC + 2].copy_from_slice(&sectors.to_le_bytes());
    sector[APRICOT_MEDIA] = 0xFC;
    sector[APRICOT_FAT_SZ..APRICOT_FAT_SZ + 2].copy_from_slice(&spfat.to_le_bytes());
    sector
}

/// A consistent DEC Rainbow image: Z80 DI boot byte, matching FAT copies
/// with the FAT12 reserved marker, all-zero interleaved root directory.
pub fn rainbow_image() -> MemoryImage {
    let mut image = MemoryImage::blank(RAINBOW_SECTORS, RAINBOW_SECTOR_SIZE);
    let mut boot = vec![0u8; 512];
    boot[0] = RAINBOW_Z80_DI;
    image.put_sector(0, &boot);

    let mut fat = vec![0u8; 512];
    fat[0] = 0xF0;
    fat[1] = 0xFF;
    image.put_sector(RAINBOW_FAT1_LBA, &fat);
    image.put_sector(RAINBOW_FAT2_LBA, &fat);
    image
}
