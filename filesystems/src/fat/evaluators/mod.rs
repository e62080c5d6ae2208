// Dialect candidate evaluators
//
// One module per BPB dialect family. Each evaluator independently inspects
// the raw boot sector (and, for DEC Rainbow and the hardcoded table, extra
// sectors through the image) and either rejects or admits with a normalized
// field set. The arbiter runs them in a fixed priority order; that order is
// a correctness requirement because several dialects are bit-compatible
// supersets of others.

pub mod apricot;
pub mod dos;
pub mod extended;
pub mod fat32;
pub mod hardcoded;
pub mod human;
pub mod msx;
pub mod rainbow;

use super::bpb::{BpbKind, CanonicalBpb};

/// What an evaluator hands back on admission.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub kind: BpbKind,
    pub bpb: CanonicalBpb,
    pub min_boot_near_jump: u8,
    pub andos_oem_correct: bool,
}

impl Candidate {
    pub fn new(kind: BpbKind, bpb: CanonicalBpb, min_boot_near_jump: u8) -> Self {
        Candidate {
            kind,
            bpb,
            min_boot_near_jump,
            andos_oem_correct: false,
        }
    }
}

/// Lossless-enough label for canonical string fields: the raw bytes as
/// ASCII, untrimmed, with non-ASCII bytes replaced.
pub(crate) fn ascii_field(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
