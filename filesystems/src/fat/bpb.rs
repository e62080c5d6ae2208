// Canonical BPB data model: the one structure every dialect projects into

use serde::{Deserialize, Serialize};

/// Which historical BPB dialect produced a boot sector. Exactly one kind is
/// chosen per classification; `None` means the sector is not recognizable as
/// any known FAT dialect (a valid outcome, not an error).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BpbKind {
    None,
    Hardcoded,
    Atari,
    Msx,
    Dos2,
    Dos3,
    Dos32,
    Dos33,
    ShortExtended,
    Extended,
    ShortFat32,
    LongFat32,
    Apricot,
    DecRainbow,
    Human,
}

/// Resolved FAT entry width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FatWidth {
    Fat12,
    Fat16,
    Fat32,
}

/// The normalized BPB every dialect projects into. Fields a dialect does not
/// define are zero; the hardcoded-table dialect may leave everything zero,
/// which callers must treat as "ultimately unidentified".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalBpb {
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: u16,
    pub fats: u8,
    /// Root directory entry count; 0 for FAT32.
    pub root_entries: u16,
    /// Total sector count, resolved from whichever 16/32/64-bit field the
    /// dialect defines.
    pub sectors: u64,
    pub media: u8,
    /// Sectors per FAT, resolved from the 16- or 32-bit source field.
    pub sectors_per_fat: u32,
    pub sectors_per_track: u16,
    pub heads: u16,
    pub hidden_sectors: u32,
    pub serial: Option<u32>,
    pub volume_label: Option<String>,
    /// Self-declared filesystem type string ("FAT12   ", "FAT16   ", ...),
    /// untrimmed. Known-buggy OSes lie here; it is only a tie-breaker.
    pub fs_type: Option<String>,
    pub oem_name: Option<String>,
    /// The raw boot sector, preserved byte-for-byte for boot-code
    /// fingerprinting downstream.
    pub boot_code: Vec<u8>,
    /// FAT32 only: first cluster of the root directory.
    pub root_cluster: u32,
    /// FAT32 only: FSInfo sector.
    pub fs_info_sector: u16,
}

/// Classification result: one immutable record per identify/mount call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub kind: BpbKind,
    pub bpb: CanonicalBpb,
    /// Lowest near-jump target that can still be real boot code for this
    /// dialect; 0 when the dialect has no x86 jump at all.
    pub min_boot_near_jump: u8,
    /// The ANDOS OEM heuristic matched (first OEM byte is a control byte,
    /// the remaining seven are printable).
    pub andos_oem_correct: bool,
    pub bootable: bool,
}

impl Classification {
    pub fn none() -> Self {
        Classification {
            kind: BpbKind::None,
            bpb: CanonicalBpb::default(),
            min_boot_near_jump: 0,
            andos_oem_correct: false,
            bootable: false,
        }
    }
}

/// Data-area cluster count implied by a canonical BPB. Returns 0 when the
/// BPB does not describe a usable data area.
pub fn cluster_count(bpb: &CanonicalBpb) -> u64 {
    let bps = bpb.bytes_per_sector as u64;
    let spc = bpb.sectors_per_cluster as u64;
    if bps == 0 || spc == 0 {
        return 0;
    }
    let root_dir_sectors = (bpb.root_entries as u64 * 32).div_ceil(bps);
    let data_start = bpb.reserved_sectors as u64
        + bpb.fats as u64 * bpb.sectors_per_fat as u64
        + root_dir_sectors;
    if bpb.sectors <= data_start {
        return 0;
    }
    (bpb.sectors - data_start) / spc
}
