//! Spawn records and the sector spawn generator.
//!
//! A sector is the unit of reproducible generation: count, species mix, and
//! placements for one (sector, hour) all derive from the cell hash, so every
//! client computes the same world. The three draw families (count, species,
//! placement) are separated by time-shift salts from [`crate::config`].
//!
//! Uniqueness is enforced by retry-with-reseed under bounded budgets:
//! duplicate species draws are discarded and a species that finds no free
//! sub-cell is dropped. Callers must treat the output count as "at most",
//! never "exactly".

use serde::{Deserialize, Serialize};

use crate::biome::{resolve_biome, Biome};
use crate::config::WorldConfig;
use crate::grid;
use crate::hash::cell_hash;
use crate::species::select_species;

/// Stride between placement draw families of consecutive species ids.
/// Exceeds the placement attempt budget so families never overlap.
const PLACEMENT_SPECIES_STRIDE: i32 = 64;

/// One ephemeral creature placement. Regenerated on every query, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRecord {
    /// Stable within the hour: `"sx:sy:hour:cell"` for rolled spawns,
    /// `"zone:index:hour"` for zone legendaries.
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub species_id: u16,
    /// Terrain of the owning sector, or `Legendary` for zone spawns.
    pub biome: Biome,
    /// Unix seconds at which this record's hour bucket ends.
    pub despawn_at: i64,
}

impl SpawnRecord {
    /// Whether this record came from a legendary zone.
    pub fn is_legendary(&self) -> bool {
        self.biome.is_legendary()
    }
}

/// Generate the complete spawn set for one sector at one hour.
///
/// Output ordering is unspecified; callers must depend only on content.
pub fn generate_sector(
    cfg: &WorldConfig,
    sector_x: i32,
    sector_y: i32,
    hour: i32,
) -> Vec<SpawnRecord> {
    let t = &cfg.tuning;
    let despawn_at = (hour as i64 + 1) * 3600;

    // 1. Spawn count for this (sector, hour).
    let count_draw = cell_hash(sector_x, sector_y, hour.wrapping_add(t.count_salt));
    let span = (t.max_spawns.saturating_sub(t.min_spawns) + 1) as f64;
    let target = (t.min_spawns + (count_draw * span) as u32) as usize;

    // 2. One biome for the whole sector, sampled at its geometric center.
    let center_lat = grid::sector_center_deg(sector_x, t.cell_size_deg, t.sector_cells);
    let center_lng = grid::sector_center_deg(sector_y, t.cell_size_deg, t.sector_cells);
    let sector_biome = resolve_biome(&cfg.zones, t, center_lat, center_lng);

    // 3. Collect distinct species; duplicate draws are discarded outright.
    let mut species = Vec::with_capacity(target);
    for attempt in 0..t.species_attempts {
        if species.len() >= target {
            break;
        }
        let shift = hour
            .wrapping_add(t.species_salt)
            .wrapping_add(attempt as i32);
        let candidate = select_species(
            &cfg.species,
            sector_biome,
            cell_hash(sector_x, sector_y, shift),
        );
        if !species.contains(&candidate) {
            species.push(candidate);
        }
    }

    // 4. Place each species in a free sub-cell, or drop it.
    let subcells = t.subcells();
    let mut occupied = vec![false; subcells as usize];
    let mut records = Vec::with_capacity(species.len() + 1);
    for species_id in species {
        let family = t
            .placement_salt
            .wrapping_add(species_id as i32 * PLACEMENT_SPECIES_STRIDE);
        for attempt in 0..t.placement_attempts {
            let shift = hour.wrapping_add(family).wrapping_add(attempt as i32);
            let draw = cell_hash(sector_x, sector_y, shift);
            let subcell = ((draw * subcells as f64) as i32).min(subcells - 1);
            if occupied[subcell as usize] {
                continue;
            }
            occupied[subcell as usize] = true;
            let (lat, lng) =
                grid::subcell_center(sector_x, sector_y, subcell, t.cell_size_deg, t.sector_cells);
            records.push(SpawnRecord {
                id: format!("{sector_x}:{sector_y}:{hour}:{subcell}"),
                lat,
                lng,
                species_id,
                biome: sector_biome,
                despawn_at,
            });
            break;
        }
    }

    // 5. Zone-owned legendaries: certain, once per (zone, hour), at the
    // zone's exact center. Independent of the regular roll above.
    for (index, zone) in cfg.zones.legendary_zones.iter().enumerate() {
        if let Some(species_id) = zone.legendary_species {
            if zone.owning_sector(t.cell_size_deg, t.sector_cells) == (sector_x, sector_y) {
                records.push(SpawnRecord {
                    id: format!("zone:{index}:{hour}"),
                    lat: zone.lat,
                    lng: zone.lng,
                    species_id,
                    biome: Biome::Legendary,
                    despawn_at,
                });
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::{Zone, ZoneConfig};
    use std::collections::HashSet;

    fn world() -> WorldConfig {
        WorldConfig {
            zones: ZoneConfig::empty(),
            ..WorldConfig::default()
        }
    }

    fn legendary_zone(lat: f64, lng: f64, species: u16) -> Zone {
        Zone {
            name: "test shrine".into(),
            lat,
            lng,
            radius_m: 300.0,
            forced_biome: None,
            legendary_species: Some(species),
            spawn_rate_bonus: None,
        }
    }

    /// Content view that ignores record ids, for cross-hour comparisons.
    fn content(records: &[SpawnRecord]) -> HashSet<(u16, u64, u64)> {
        records
            .iter()
            .map(|r| (r.species_id, r.lat.to_bits(), r.lng.to_bits()))
            .collect()
    }

    // --- Determinism ---

    #[test]
    fn identical_inputs_identical_output() {
        let cfg = world();
        let a = generate_sector(&cfg, 5, 7, 100);
        let b = generate_sector(&cfg, 5, 7, 100);
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn hour_rotation_changes_the_sector() {
        let cfg = world();
        let h100 = content(&generate_sector(&cfg, 5, 7, 100));
        let h101 = content(&generate_sector(&cfg, 5, 7, 101));
        assert_ne!(h100, h101);
    }

    #[test]
    fn neighboring_sectors_differ() {
        let cfg = world();
        let a = content(&generate_sector(&cfg, 5, 7, 100));
        let b = content(&generate_sector(&cfg, 6, 7, 100));
        assert_ne!(a, b);
    }

    // --- Invariants ---

    #[test]
    fn species_are_unique_within_a_sector() {
        let cfg = world();
        for s in 0..40 {
            let records = generate_sector(&cfg, s, s * 3 - 7, 491_000 + s);
            let mut seen = HashSet::new();
            for r in records.iter().filter(|r| !r.is_legendary()) {
                assert!(
                    seen.insert(r.species_id),
                    "species {} twice in sector {s}",
                    r.species_id
                );
            }
        }
    }

    #[test]
    fn positions_are_unique_within_a_sector() {
        let cfg = world();
        for s in 0..40 {
            let records = generate_sector(&cfg, -s, s * 5 + 1, 491_000 - s);
            let mut seen = HashSet::new();
            for r in &records {
                assert!(
                    seen.insert((r.lat.to_bits(), r.lng.to_bits())),
                    "shared position in sector {s}"
                );
            }
        }
    }

    #[test]
    fn spawn_count_stays_within_bounds() {
        let cfg = world();
        for s in 0..60 {
            let records = generate_sector(&cfg, s * 11, s * 13 + 2, 490_000 + s);
            let rolled = records.iter().filter(|r| !r.is_legendary()).count();
            // Duplicate draws may undercount; the rolled target caps at max.
            assert!(
                (4..=cfg.tuning.max_spawns as usize).contains(&rolled),
                "sector {s} rolled {rolled}"
            );
        }
    }

    #[test]
    fn records_stay_inside_their_sector() {
        let cfg = world();
        for (sx, sy) in [(5, 7), (-3, -11), (0, 0), (12_000, -6_000)] {
            for r in generate_sector(&cfg, sx, sy, 123_456) {
                let t = &cfg.tuning;
                assert_eq!(
                    grid::sector_at(r.lat, r.lng, t.cell_size_deg, t.sector_cells),
                    (sx, sy),
                    "record {} escaped sector ({sx},{sy})",
                    r.id
                );
            }
        }
    }

    #[test]
    fn all_records_share_the_sector_biome() {
        let cfg = world();
        let records = generate_sector(&cfg, 5, 7, 100);
        let t = &cfg.tuning;
        let expected = resolve_biome(
            &cfg.zones,
            t,
            grid::sector_center_deg(5, t.cell_size_deg, t.sector_cells),
            grid::sector_center_deg(7, t.cell_size_deg, t.sector_cells),
        );
        for r in &records {
            assert_eq!(r.biome, expected);
        }
    }

    #[test]
    fn despawn_is_the_next_bucket_boundary() {
        let cfg = world();
        for r in generate_sector(&cfg, 5, 7, 123) {
            assert_eq!(r.despawn_at, 124 * 3600);
        }
    }

    #[test]
    fn record_ids_are_unique() {
        let cfg = world();
        let records = generate_sector(&cfg, 9, -4, 77_777);
        let ids: HashSet<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), records.len());
    }

    // --- Zone legendaries ---

    #[test]
    fn owning_sector_appends_the_legendary() {
        let mut cfg = world();
        let zone = legendary_zone(0.010_53, 0.030_57, 144);
        let (sx, sy) = zone.owning_sector(cfg.tuning.cell_size_deg, cfg.tuning.sector_cells);
        cfg.zones.legendary_zones.push(zone.clone());

        let records = generate_sector(&cfg, sx, sy, 123);
        let legendaries: Vec<_> = records.iter().filter(|r| r.is_legendary()).collect();
        assert_eq!(legendaries.len(), 1);
        let l = legendaries[0];
        assert_eq!(l.species_id, 144);
        assert_eq!(l.lat, zone.lat);
        assert_eq!(l.lng, zone.lng);
        assert_eq!(l.id, "zone:0:123");
    }

    #[test]
    fn non_owning_sectors_get_no_legendary() {
        let mut cfg = world();
        let zone = legendary_zone(0.010_53, 0.030_57, 144);
        let (sx, sy) = zone.owning_sector(cfg.tuning.cell_size_deg, cfg.tuning.sector_cells);
        cfg.zones.legendary_zones.push(zone);

        let records = generate_sector(&cfg, sx + 1, sy, 123);
        assert!(records.iter().all(|r| !r.is_legendary()));
    }

    #[test]
    fn legendary_returns_every_hour_at_the_same_spot() {
        let mut cfg = world();
        let zone = legendary_zone(0.010_53, 0.030_57, 150);
        let (sx, sy) = zone.owning_sector(cfg.tuning.cell_size_deg, cfg.tuning.sector_cells);
        cfg.zones.legendary_zones.push(zone.clone());

        let at = |hour| {
            let records = generate_sector(&cfg, sx, sy, hour);
            records.into_iter().find(|r| r.is_legendary())
        };
        let (a, b) = (at(123), at(124));
        let a = a.expect("legendary at hour 123");
        let b = b.expect("legendary at hour 124");
        assert_eq!((a.lat, a.lng), (b.lat, b.lng));
        assert_eq!(a.species_id, b.species_id);
        assert_ne!(a.id, b.id, "ids must rotate with the hour");
    }

    #[test]
    fn legendary_does_not_disturb_the_regular_roll() {
        // A zone with no forced biome changes nothing about the rolled set.
        let plain = world();
        let mut with_zone = world();
        let zone = legendary_zone(0.010_53, 0.030_57, 151);
        let (sx, sy) = zone.owning_sector(plain.tuning.cell_size_deg, plain.tuning.sector_cells);
        with_zone.zones.legendary_zones.push(zone);

        let a: Vec<_> = generate_sector(&plain, sx, sy, 99)
            .into_iter()
            .filter(|r| !r.is_legendary())
            .collect();
        let b: Vec<_> = generate_sector(&with_zone, sx, sy, 99)
            .into_iter()
            .filter(|r| !r.is_legendary())
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn two_zones_in_one_sector_both_append() {
        let mut cfg = world();
        let za = legendary_zone(0.010_53, 0.030_57, 144);
        let zb = legendary_zone(0.010_81, 0.030_11, 145);
        let (sx, sy) = za.owning_sector(cfg.tuning.cell_size_deg, cfg.tuning.sector_cells);
        assert_eq!(
            zb.owning_sector(cfg.tuning.cell_size_deg, cfg.tuning.sector_cells),
            (sx, sy),
            "test zones must share a sector"
        );
        cfg.zones.legendary_zones.push(za);
        cfg.zones.legendary_zones.push(zb);

        let legendaries: Vec<_> = generate_sector(&cfg, sx, sy, 55)
            .into_iter()
            .filter(|r| r.is_legendary())
            .collect();
        assert_eq!(legendaries.len(), 2);
    }
}
