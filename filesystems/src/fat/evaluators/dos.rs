// Signature-less DOS BPB cascade: DOS 3.3 / 3.2 / 3.0 / 2.0, with the
// Atari GEMDOS override at every branch where the two layouts collide
//
// The disambiguation order is load-bearing: each branch's byte pattern is a
// subset of the ones after it. On pre-3.3 disks the bytes past the dialect's
// own BPB are boot code, which is why the 3.2/3.0/2.0 checks only run when
// neither sector-count branch matched cleanly.

use fatprobe_core::PartitionGeometry;
use log::trace;

use super::{ascii_field, Candidate};
use crate::fat::bpb::{BpbKind, CanonicalBpb};
use crate::fat::constants::*;
use crate::fat::geometry::{fits_in_partition, is_power_of_two, is_valid_cluster_size};
use crate::fat::layout::{AtariBpb, DosBpb};

/// Atari GEMDOS signature: m68k BRA.S, or a 0xE9 jump with a zero offset on
/// a non-NeXT volume, or an Atari partition type tag.
fn atari_signature(sector: &[u8], geometry: &PartitionGeometry, dos: &DosBpb) -> bool {
    if sector.first().copied() == Some(ATARI_JUMP_OPCODE) {
        return true;
    }
    if sector.first().copied() == Some(0xE9)
        && sector.get(1).copied() == Some(0x00)
        && &dos.oem_name != NEXT_OEM
    {
        return true;
    }
    matches!(
        geometry.partition_type.as_deref(),
        Some("GEM") | Some("BGM")
    )
}

fn project(kind: BpbKind, dos: &DosBpb, sector: &[u8], sectors: u64, floor: u8) -> Candidate {
    // DOS 2.0 predates the geometry fields; everything past the FAT size is
    // boot code there.
    let has_chs = kind != BpbKind::Dos2;
    let mut bpb = CanonicalBpb {
        bytes_per_sector: dos.bps,
        sectors_per_cluster: dos.spc,
        reserved_sectors: dos.rsectors,
        fats: dos.fats,
        root_entries: dos.root_entries,
        sectors,
        media: dos.media,
        sectors_per_fat: dos.spfat as u32,
        sectors_per_track: if has_chs { dos.sptrk } else { 0 },
        heads: if has_chs { dos.heads } else { 0 },
        hidden_sectors: match kind {
            BpbKind::Dos2 => 0,
            BpbKind::Dos33 => dos.hsectors32,
            _ => dos.hsectors16 as u32,
        },
        oem_name: Some(ascii_field(&dos.oem_name)),
        boot_code: sector.to_vec(),
        ..Default::default()
    };
    if kind == BpbKind::Atari {
        let atari = AtariBpb::decode(sector);
        bpb.oem_name = Some(ascii_field(&atari.oem_name));
        bpb.serial = Some(atari.serial_u32());
        bpb.hidden_sectors = dos.hsectors16 as u32;
    }
    Candidate::new(kind, bpb, floor)
}

pub fn evaluate(sector: &[u8], geometry: &PartitionGeometry) -> Option<Candidate> {
    let dos = DosBpb::decode(sector, geometry.optical_hybrid);

    if !is_power_of_two(dos.bps as u32) || !is_valid_cluster_size(dos.spc) {
        return None;
    }
    if dos.rsectors as u64 >= geometry.partition_sectors() {
        return None;
    }
    if dos.fats > 2 || dos.root_entries == 0 || dos.spfat == 0 {
        return None;
    }

    let atari = atari_signature(sector, geometry, &dos);

    // (a) 16-bit count zero, 32-bit count in range: DOS 3.3
    if dos.sectors == 0 && dos.big_sectors != 0 && fits_in_partition(dos.big_sectors as u64, geometry)
    {
        return Some(project(
            BpbKind::Dos33,
            &dos,
            sector,
            dos.big_sectors as u64,
            JUMP_FLOOR_DOS33,
        ));
    }

    // (b) 32-bit count zero, 16-bit count in range: Atari or DOS 3.3
    if dos.big_sectors == 0 && dos.sectors != 0 && fits_in_partition(dos.sectors as u64, geometry)
    {
        let kind = if atari { BpbKind::Atari } else { BpbKind::Dos33 };
        return Some(project(
            kind,
            &dos,
            sector,
            dos.sectors as u64,
            JUMP_FLOOR_DOS33,
        ));
    }

    // The remaining dialects only define the 16-bit count. An oversized or
    // absent count disqualifies all of them.
    if dos.sectors == 0 || !fits_in_partition(dos.sectors as u64, geometry) {
        trace!("DOS cascade: 16-bit sector count {} unusable", dos.sectors);
        return None;
    }

    // (c) DOS 3.2 stores hidden + visible sectors in its own total field
    if dos.dos32_total != 0 && dos.hsectors16.wrapping_add(dos.sectors) == dos.dos32_total {
        return Some(project(
            BpbKind::Dos32,
            &dos,
            sector,
            dos.sectors as u64,
            JUMP_FLOOR_DOS32,
        ));
    }

    // (d) plausible CHS geometry fields: DOS 3.0 (or Atari)
    if dos.sptrk > 0 && dos.sptrk < 64 && dos.heads > 0 && dos.heads < 256 {
        let kind = if atari { BpbKind::Atari } else { BpbKind::Dos3 };
        return Some(project(
            kind,
            &dos,
            sector,
            dos.sectors as u64,
            JUMP_FLOOR_DOS30,
        ));
    }

    // (e) bare DOS 2.0 BPB (or Atari)
    let kind = if atari { BpbKind::Atari } else { BpbKind::Dos2 };
    Some(project(
        kind,
        &dos,
        sector,
        dos.sectors as u64,
        JUMP_FLOOR_DOS20,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::dos_sector;

    fn geometry(sectors: u64) -> PartitionGeometry {
        PartitionGeometry::whole_image(sectors, 512)
    }

    #[test]
    fn dos33_uses_big_sectors_when_16_bit_is_zero() {
        let mut sector = dos_sector(512, 4, 1, 2, 512, 0, 0xF8, 64);
        sector[BPB_TOT_SEC32..BPB_TOT_SEC32 + 4].copy_from_slice(&100_000u32.to_le_bytes());

        let cand = evaluate(&sector, &geometry(100_000)).expect("should admit");
        assert_eq!(cand.kind, BpbKind::Dos33);
        assert_eq!(cand.bpb.sectors, 100_000);
        assert_eq!(cand.min_boot_near_jump, JUMP_FLOOR_DOS33);
    }

    #[test]
    fn oversized_counts_reject_every_branch() {
        // big_sectors past the partition, 16-bit count zero
        let mut sector = dos_sector(512, 4, 1, 2, 512, 0, 0xF8, 64);
        sector[BPB_TOT_SEC32..BPB_TOT_SEC32 + 4].copy_from_slice(&100_001u32.to_le_bytes());
        assert!(evaluate(&sector, &geometry(100_000)).is_none());

        // 16-bit count past the partition, 32-bit count zero
        let sector = dos_sector(512, 2, 1, 2, 112, 721, 0xFD, 2);
        assert!(evaluate(&sector, &geometry(720)).is_none());
    }

    #[test]
    fn small_16_bit_volume_is_dos33() {
        let sector = dos_sector(512, 2, 1, 2, 112, 1440, 0xF9, 3);
        let cand = evaluate(&sector, &geometry(1440)).expect("should admit");
        assert_eq!(cand.kind, BpbKind::Dos33);
    }

    #[test]
    fn atari_branch_opcode_wins_over_dos33() {
        let mut sector = dos_sector(512, 2, 1, 2, 112, 1440, 0xF9, 3);
        sector[0] = ATARI_JUMP_OPCODE;
        let cand = evaluate(&sector, &geometry(1440)).expect("should admit");
        assert_eq!(cand.kind, BpbKind::Atari);
    }

    #[test]
    fn gem_partition_tag_forces_atari() {
        let sector = dos_sector(512, 2, 1, 2, 112, 1440, 0xF9, 3);
        let mut geo = geometry(1440);
        geo.partition_type = Some("GEM".to_string());
        let cand = evaluate(&sector, &geo).expect("should admit");
        assert_eq!(cand.kind, BpbKind::Atari);
    }

    #[test]
    fn e9_jump_on_next_volume_is_not_atari() {
        let mut sector = dos_sector(512, 2, 1, 2, 112, 1440, 0xF9, 3);
        sector[0] = 0xE9;
        sector[1] = 0x00;
        sector[BS_OEM_NAME..BS_OEM_NAME + 8].copy_from_slice(NEXT_OEM);
        let cand = evaluate(&sector, &geometry(1440)).expect("should admit");
        assert_eq!(cand.kind, BpbKind::Dos33);
    }

    #[test]
    fn dos32_total_field_disambiguates() {
        // On a real 3.2 disk the bytes at 0x20 are boot code, so the decoded
        // big_sectors is garbage and branches (a)/(b) both miss.
        let mut sector = dos_sector(512, 2, 1, 2, 112, 720, 0xFD, 2);
        sector[BPB_TOT_SEC32..BPB_TOT_SEC32 + 4].copy_from_slice(&0xDEAD_BEEFu32.to_le_bytes());
        sector[BPB_HIDD_SEC16..BPB_HIDD_SEC16 + 2].copy_from_slice(&64u16.to_le_bytes());
        sector[BPB_TOT_SEC_DOS32..BPB_TOT_SEC_DOS32 + 2].copy_from_slice(&784u16.to_le_bytes());

        let cand = evaluate(&sector, &geometry(720)).expect("should admit");
        assert_eq!(cand.kind, BpbKind::Dos32);
        assert_eq!(cand.bpb.sectors, 720);
        assert_eq!(cand.min_boot_near_jump, JUMP_FLOOR_DOS32);
    }

    #[test]
    fn chs_fields_mean_dos30() {
        let mut sector = dos_sector(512, 2, 1, 2, 112, 720, 0xFD, 2);
        sector[BPB_TOT_SEC32..BPB_TOT_SEC32 + 4].copy_from_slice(&0xDEAD_BEEFu32.to_le_bytes());
        sector[BPB_SEC_PER_TRK..BPB_SEC_PER_TRK + 2].copy_from_slice(&9u16.to_le_bytes());
        sector[BPB_NUM_HEADS..BPB_NUM_HEADS + 2].copy_from_slice(&2u16.to_le_bytes());

        let cand = evaluate(&sector, &geometry(720)).expect("should admit");
        assert_eq!(cand.kind, BpbKind::Dos3);
        assert_eq!(cand.min_boot_near_jump, JUMP_FLOOR_DOS30);
    }

    #[test]
    fn bare_bpb_defaults_to_dos2() {
        let mut sector = dos_sector(512, 1, 1, 2, 64, 320, 0xFE, 1);
        sector[BPB_TOT_SEC32..BPB_TOT_SEC32 + 4].copy_from_slice(&0x60EB_5533u32.to_le_bytes());

        let cand = evaluate(&sector, &geometry(320)).expect("should admit");
        assert_eq!(cand.kind, BpbKind::Dos2);
        assert_eq!(cand.min_boot_near_jump, JUMP_FLOOR_DOS20);
        assert_eq!(cand.bpb.sectors_per_track, 0);
        assert_eq!(cand.bpb.hidden_sectors, 0);
    }

    #[test]
    fn zero_root_entries_rejects() {
        let sector = dos_sector(512, 2, 1, 2, 0, 1440, 0xF9, 3);
        assert!(evaluate(&sector, &geometry(1440)).is_none());
    }
}
