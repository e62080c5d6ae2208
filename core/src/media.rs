// Sector-level read access to disk images

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use log::trace;

use crate::error::FatprobeError;

/// Whole-sector read access to a disk image.
///
/// All reads are whole sectors; there are no partial reads. Read errors
/// propagate as-is and abort whatever operation triggered them.
pub trait SectorSource {
    fn sector_size(&self) -> u32;
    fn total_sectors(&self) -> u64;

    fn read_sector(&mut self, lba: u64) -> Result<Vec<u8>, FatprobeError>;

    fn read_sectors(&mut self, lba: u64, count: u32) -> Result<Vec<u8>, FatprobeError> {
        let mut data = Vec::with_capacity(self.sector_size() as usize * count as usize);
        for i in 0..count as u64 {
            data.extend_from_slice(&self.read_sector(lba + i)?);
        }
        Ok(data)
    }
}

/// Flat file backed disk image.
pub struct RawImage {
    file: File,
    sector_size: u32,
    total_sectors: u64,
}

impl RawImage {
    pub fn open<P: AsRef<Path>>(path: P, sector_size: u32) -> Result<Self, FatprobeError> {
        if sector_size == 0 {
            return Err(FatprobeError::InvalidInput(
                "sector size must be nonzero".to_string(),
            ));
        }
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        Ok(RawImage {
            file,
            sector_size,
            total_sectors: len / sector_size as u64,
        })
    }
}

impl SectorSource for RawImage {
    fn sector_size(&self) -> u32 {
        self.sector_size
    }

    fn total_sectors(&self) -> u64 {
        self.total_sectors
    }

    fn read_sector(&mut self, lba: u64) -> Result<Vec<u8>, FatprobeError> {
        if lba >= self.total_sectors {
            return Err(FatprobeError::ReadOutOfBounds {
                lba,
                count: 1,
                total: self.total_sectors,
            });
        }
        trace!("RawImage: reading sector {}", lba);
        let mut buffer = vec![0u8; self.sector_size as usize];
        self.file
            .seek(SeekFrom::Start(lba * self.sector_size as u64))?;
        self.file.read_exact(&mut buffer)?;
        Ok(buffer)
    }
}

/// In-memory disk image, used by callers that already hold the image bytes
/// and throughout the test suites.
pub struct MemoryImage {
    data: Vec<u8>,
    sector_size: u32,
}

impl MemoryImage {
    pub fn new(data: Vec<u8>, sector_size: u32) -> Self {
        MemoryImage { data, sector_size }
    }

    /// An all-zero image of `sectors` sectors.
    pub fn blank(sectors: u64, sector_size: u32) -> Self {
        MemoryImage {
            data: vec![0u8; (sectors * sector_size as u64) as usize],
            sector_size,
        }
    }

    /// Overwrite one sector of the image, growing it if needed.
    pub fn put_sector(&mut self, lba: u64, contents: &[u8]) {
        let start = (lba * self.sector_size as u64) as usize;
        let end = start + self.sector_size as usize;
        if self.data.len() < end {
            self.data.resize(end, 0);
        }
        let n = contents.len().min(self.sector_size as usize);
        self.data[start..start + n].copy_from_slice(&contents[..n]);
    }
}

impl SectorSource for MemoryImage {
    fn sector_size(&self) -> u32 {
        self.sector_size
    }

    fn total_sectors(&self) -> u64 {
        self.data.len() as u64 / self.sector_size as u64
    }

    fn read_sector(&mut self, lba: u64) -> Result<Vec<u8>, FatprobeError> {
        let total = self.total_sectors();
        if lba >= total {
            return Err(FatprobeError::ReadOutOfBounds {
                lba,
                count: 1,
                total,
            });
        }
        let start = (lba * self.sector_size as u64) as usize;
        Ok(self.data[start..start + self.sector_size as usize].to_vec())
    }
}
