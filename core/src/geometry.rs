// Partition geometry as reported by the image/partition layer

use serde::{Deserialize, Serialize};

/// Where a volume sits inside a disk image, and what the image looks like.
///
/// `start_sector`/`end_sector` are inclusive LBAs relative to the image.
/// `optical_hybrid` marks hybrid optical/USB images whose BPB fields are
/// stored at a 4x scale (CD-sized sectors over a 512-byte filesystem).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionGeometry {
    pub start_sector: u64,
    pub end_sector: u64,
    /// Total sectors of the whole image, not just this partition.
    pub image_sectors: u64,
    /// Physical sector size of the image in bytes.
    pub sector_size: u32,
    pub optical_hybrid: bool,
    /// Partition type tag when the partition scheme provides one
    /// (e.g. "GEM"/"BGM" on Atari-partitioned disks).
    pub partition_type: Option<String>,
}

impl PartitionGeometry {
    /// Geometry for an unpartitioned image: one volume spanning everything.
    pub fn whole_image(image_sectors: u64, sector_size: u32) -> Self {
        PartitionGeometry {
            start_sector: 0,
            end_sector: image_sectors.saturating_sub(1),
            image_sectors,
            sector_size,
            optical_hybrid: false,
            partition_type: None,
        }
    }

    /// Number of sectors the partition spans (inclusive bounds).
    pub fn partition_sectors(&self) -> u64 {
        self.end_sector - self.start_sector + 1
    }

    /// Partition span in bytes.
    pub fn partition_bytes(&self) -> u64 {
        self.partition_sectors() * self.sector_size as u64
    }
}
