// FAT-family filesystem identification for disk image preservation

pub mod fat;

#[cfg(test)]
pub mod test_helpers;

pub use fat::arbiter::classify;
pub use fat::bpb::{BpbKind, CanonicalBpb, Classification, FatWidth};
pub use fat::width::{fat_width_from_table, resolve_fat_width};
pub use fat::{identify, VolumeIdentity};
