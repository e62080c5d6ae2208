pub mod error;
pub mod geometry;
pub mod media;

pub use error::FatprobeError;
pub use geometry::PartitionGeometry;
pub use media::{MemoryImage, RawImage, SectorSource};
