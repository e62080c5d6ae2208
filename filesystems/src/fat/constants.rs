// FAT BPB constants shared by the dialect evaluators

// Boot sector offsets common to the DOS lineage (DOS 2.0 core, little-endian)
pub const BS_JMP_BOOT: usize = 0x00;
pub const BS_OEM_NAME: usize = 0x03;
pub const BPB_BYTES_PER_SEC: usize = 0x0B;
pub const BPB_SEC_PER_CLUS: usize = 0x0D;
pub const BPB_RSVD_SEC_CNT: usize = 0x0E;
pub const BPB_NUM_FATS: usize = 0x10;
pub const BPB_ROOT_ENT_CNT: usize = 0x11;
pub const BPB_TOT_SEC16: usize = 0x13;
pub const BPB_MEDIA: usize = 0x15;
pub const BPB_FAT_SZ16: usize = 0x16;

// DOS 3.0 extensions
pub const BPB_SEC_PER_TRK: usize = 0x18;
pub const BPB_NUM_HEADS: usize = 0x1A;
pub const BPB_HIDD_SEC16: usize = 0x1C;

// DOS 3.2: total sector count including hidden sectors
pub const BPB_TOT_SEC_DOS32: usize = 0x1E;

// DOS 3.3 extensions (hidden sectors widen to 32 bits)
pub const BPB_HIDD_SEC32: usize = 0x1C;
pub const BPB_TOT_SEC32: usize = 0x20;

// EBPB tail (DOS 3.4 short form, DOS 4.0 full form)
pub const EBPB_DRV_NUM: usize = 0x24;
pub const EBPB_SIGNATURE: usize = 0x26;
pub const EBPB_SERIAL: usize = 0x27;
pub const EBPB_VOL_LAB: usize = 0x2B;
pub const EBPB_FS_TYPE: usize = 0x36;

// FAT32 EBPB
pub const F32_FAT_SZ32: usize = 0x24;
pub const F32_ROOT_CLUSTER: usize = 0x2C;
pub const F32_FS_INFO: usize = 0x30;
pub const F32_BACKUP_BOOT: usize = 0x32;
pub const F32_SIGNATURE: usize = 0x42;
pub const F32_SERIAL: usize = 0x43;
pub const F32_VOL_LAB: usize = 0x47;
pub const F32_FS_TYPE: usize = 0x52;
// Short-form FAT32 (signature 0x28) stores a 64-bit sector count where the
// long form keeps its volume label.
pub const F32_HUGE_SECTORS: usize = 0x47;

// EBPB signature bytes
pub const EBPB_SIG_SHORT: u8 = 0x28;
pub const EBPB_SIG_FULL: u8 = 0x29;

// Atari GEMDOS boot sector (shares 0x0B..0x1E with DOS 3.0)
pub const ATARI_OEM_NAME: usize = 0x02; // 6 bytes
pub const ATARI_SERIAL: usize = 0x08; // 3 bytes
pub const ATARI_JUMP_OPCODE: u8 = 0x60; // m68k BRA.S
pub const ATARI_CHECKSUM_BOOTABLE: u16 = 0x1234;

// MSX-DOS 2: "VOL_ID" marker (6 meaningful bytes of an 8-byte field)
pub const MSX_VOL_ID: usize = 0x2C;
pub const MSX_VOL_ID_MAGIC: &[u8; 6] = b"VOL_ID";

// Apricot label head plus its BPB at 0x50
pub const APRICOT_PARTITIONS: usize = 0x0E;
pub const APRICOT_BPS: usize = 0x50;
pub const APRICOT_SPC: usize = 0x52;
pub const APRICOT_RSVD_SEC_CNT: usize = 0x53;
pub const APRICOT_NUM_FATS: usize = 0x55;
pub const APRICOT_ROOT_ENT_CNT: usize = 0x56;
pub const APRICOT_TOT_SEC: usize = 0x58;
pub const APRICOT_MEDIA: usize = 0x5A;
pub const APRICOT_FAT_SZ: usize = 0x5B;

// Human68k (Sharp X68000) boot block, big-endian
pub const HUMAN_BRA_OPCODE: u8 = 0x60;
pub const HUMAN_OEM_NAME: usize = 0x02; // 16 bytes
pub const HUMAN_BYTES_PER_CLUSTER: usize = 0x12;
pub const HUMAN_CLUSTERS16: usize = 0x14;
pub const HUMAN_CLUSTERS32: usize = 0x16;
pub const HUMAN_MEDIA: usize = 0x1A;
pub const HUMAN_FAT_SZ: usize = 0x1B;
pub const HUMAN_ROOT_ENT_CNT: usize = 0x1C;
pub const HUMAN_JUMP_MIN: u8 = 0x1C;
pub const HUMAN_JUMP_MAX: u8 = 0xFE; // exclusive

// DEC Rainbow 100: fixed geometry, no BPB at all
pub const RAINBOW_SECTORS: u64 = 800;
pub const RAINBOW_SECTOR_SIZE: u32 = 512;
pub const RAINBOW_Z80_DI: u8 = 0xF3;
pub const RAINBOW_FAT1_LBA: u64 = 0x14;
pub const RAINBOW_FAT2_LBA: u64 = 0x1A;
pub const RAINBOW_SECTORS_PER_FAT: u32 = 3;
pub const RAINBOW_ROOT_ENTRIES: u16 = 96;
pub const RAINBOW_MEDIA: u8 = 0xFA;
// Root directory: six sectors, 2:1 interleaved
pub const RAINBOW_ROOT_LBAS: [u64; 6] = [0x20, 0x22, 0x24, 0x26, 0x28, 0x2A];

// Minimum valid near-jump offsets per dialect, used by the bootability
// heuristic (how far into the sector real boot code can start)
pub const JUMP_FLOOR_LONG_FAT32: u8 = 0x58;
pub const JUMP_FLOOR_SHORT_FAT32: u8 = 0x57;
pub const JUMP_FLOOR_EBPB: u8 = 0x3C;
pub const JUMP_FLOOR_SHORT_EBPB: u8 = 0x29;
pub const JUMP_FLOOR_DOS33: u8 = 0x22;
pub const JUMP_FLOOR_DOS32: u8 = 0x1E;
pub const JUMP_FLOOR_DOS30: u8 = 0x1C;
pub const JUMP_FLOOR_DOS20: u8 = 0x16;

// FAT width thresholds
pub const FAT12_16_CROSSOVER: u64 = 4089;
pub const FAT12_RESERVED: u16 = 0xFF0;
pub const FAT16_RESERVED: u16 = 0xFFF0;
pub const FAT16_RESERVED_ENTRY1: u16 = 0x3FF0;

// Known vendor quirks
pub const PCEXCHANGE_OEM: &[u8; 8] = b"PCX 2.0 ";
pub const NEXT_OEM: &[u8; 8] = b"NEXT    ";
pub const FAT32_TYPE_STRING: &[u8; 8] = b"FAT32   ";

/// One known signature-less floppy geometry: pre-BPB DOS disks identified by
/// the first FAT byte plus total image sectors and sector size alone.
pub struct HardcodedGeometry {
    pub fat_id: u8,
    pub image_sectors: u64,
    pub sector_size: u32,
    pub spc: u8,
    pub reserved_sectors: u16,
    pub fats: u8,
    pub root_entries: u16,
    pub sectors_per_fat: u32,
    pub sectors_per_track: u16,
    pub heads: u16,
}

/// Fixed table of known pre-BPB floppy geometries, keyed by
/// (first FAT byte, image sector count, image sector size).
pub const HARDCODED_GEOMETRIES: &[HardcodedGeometry] = &[
    // 5.25" SSDD, 8 sectors/track (160 KiB)
    HardcodedGeometry { fat_id: 0xFE, image_sectors: 320, sector_size: 512, spc: 1, reserved_sectors: 1, fats: 2, root_entries: 64, sectors_per_fat: 1, sectors_per_track: 8, heads: 1 },
    // 5.25" SSDD, 9 sectors/track (180 KiB)
    HardcodedGeometry { fat_id: 0xFC, image_sectors: 360, sector_size: 512, spc: 1, reserved_sectors: 1, fats: 2, root_entries: 64, sectors_per_fat: 2, sectors_per_track: 9, heads: 1 },
    // 5.25" DSDD, 8 sectors/track (320 KiB)
    HardcodedGeometry { fat_id: 0xFF, image_sectors: 640, sector_size: 512, spc: 2, reserved_sectors: 1, fats: 2, root_entries: 112, sectors_per_fat: 1, sectors_per_track: 8, heads: 2 },
    // 5.25" DSDD, 9 sectors/track (360 KiB)
    HardcodedGeometry { fat_id: 0xFD, image_sectors: 720, sector_size: 512, spc: 2, reserved_sectors: 1, fats: 2, root_entries: 112, sectors_per_fat: 2, sectors_per_track: 9, heads: 2 },
    // 8" SSSD, 26 sectors/track of 128 bytes (250 KiB)
    HardcodedGeometry { fat_id: 0xFE, image_sectors: 2002, sector_size: 128, spc: 4, reserved_sectors: 1, fats: 2, root_entries: 68, sectors_per_fat: 6, sectors_per_track: 26, heads: 1 },
    // 8" DSSD (500 KiB)
    HardcodedGeometry { fat_id: 0xFD, image_sectors: 4004, sector_size: 128, spc: 4, reserved_sectors: 4, fats: 2, root_entries: 68, sectors_per_fat: 6, sectors_per_track: 26, heads: 2 },
    // 3.5"/5.25" 1.2 MB NEC, 1024-byte sectors
    HardcodedGeometry { fat_id: 0xFE, image_sectors: 1232, sector_size: 1024, spc: 1, reserved_sectors: 1, fats: 2, root_entries: 192, sectors_per_fat: 2, sectors_per_track: 8, heads: 2 },
    // 5.25" DSQD, 9 sectors/track (720 KiB)
    HardcodedGeometry { fat_id: 0xF9, image_sectors: 1440, sector_size: 512, spc: 2, reserved_sectors: 1, fats: 2, root_entries: 112, sectors_per_fat: 3, sectors_per_track: 9, heads: 2 },
];
