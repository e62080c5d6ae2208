// Classification arbiter: fixed-priority evaluator chain plus the
// cross-cutting corrections
//
// The evaluator order is a correctness requirement: several dialects are
// bit-compatible supersets or subsets of others, and the first acceptance
// is final.

use fatprobe_core::{FatprobeError, PartitionGeometry, SectorSource};
use log::debug;

use super::bpb::{BpbKind, Classification};
use super::constants::{ATARI_CHECKSUM_BOOTABLE, PCEXCHANGE_OEM};
use super::evaluators::{apricot, dos, extended, fat32, hardcoded, human, msx, rainbow, Candidate};
use super::layout::{atari_checksum, bytes_at, le_u16_at};

/// Classify a raw boot sector against every known BPB dialect.
///
/// `sector` must be the 512-byte-equivalent view of the volume's first
/// sector (callers on sub-512-byte media concatenate sectors first).
/// `media` is only touched for the dialects that need corroborating reads:
/// DEC Rainbow and the hardcoded floppy table.
pub fn classify(
    sector: &[u8],
    geometry: &PartitionGeometry,
    media: &mut dyn SectorSource,
) -> Result<Classification, FatprobeError> {
    if sector.len() < 512 {
        return Ok(Classification::none());
    }

    let candidate = human::evaluate(sector, geometry)
        .or_else(|| fat32::evaluate_long(sector, geometry))
        .or_else(|| fat32::evaluate_short(sector, geometry))
        .or_else(|| msx::evaluate(sector, geometry))
        .or_else(|| apricot::evaluate(sector, geometry))
        .or_else(|| extended::evaluate(sector, geometry))
        .or_else(|| dos::evaluate(sector, geometry));

    // Everything signature-bearing rejected: consult the known floppy
    // table, then DEC Rainbow, then give up into the zero-BPB Hardcoded
    // result the legacy mount layer expects.
    let candidate = match candidate {
        Some(candidate) => candidate,
        None => match hardcoded::evaluate(sector, geometry, media)? {
            Some(candidate) => candidate,
            None => match rainbow::evaluate(sector, geometry, media)? {
                Some(candidate) => candidate,
                None => hardcoded::unidentified(sector),
            },
        },
    };

    debug!("boot sector classified as {:?}", candidate.kind);
    Ok(finalize(sector, candidate))
}

fn finalize(sector: &[u8], candidate: Candidate) -> Classification {
    let bootable = is_bootable(sector, &candidate);
    Classification {
        kind: candidate.kind,
        bpb: candidate.bpb,
        min_boot_near_jump: candidate.min_boot_near_jump,
        andos_oem_correct: candidate.andos_oem_correct,
        bootable,
    }
}

/// Near-jump bootability heuristic, with the PCExchange and Atari
/// corrections applied.
fn is_bootable(sector: &[u8], candidate: &Candidate) -> bool {
    let mut bootable = false;

    if candidate.min_boot_near_jump > 0 {
        // PCExchange writes boot sectors whose jump lands inside the
        // literal "FAT16   " string, 8 bytes short of the real code.
        let oem: [u8; 8] = bytes_at(sector, super::constants::BS_OEM_NAME);
        let fixup: u8 = if &oem == PCEXCHANGE_OEM { 8 } else { 0 };

        match sector.first().copied() {
            Some(0xEB) => {
                let target = sector.get(1).copied().unwrap_or(0).wrapping_add(fixup);
                bootable = target >= candidate.min_boot_near_jump;
            }
            Some(0xE9) => {
                let target = le_u16_at(sector, 1).wrapping_add(fixup as u16);
                bootable =
                    target >= candidate.min_boot_near_jump as u16 && target < 0x1FE;
            }
            _ => {}
        }
    }

    // Atari TOS executes the boot sector when its word checksum is 0x1234,
    // regardless of what the jump bytes look like.
    if candidate.kind == BpbKind::Atari && atari_checksum(&sector[..512]) == ATARI_CHECKSUM_BOOTABLE
    {
        bootable = true;
    }

    bootable
}
