//! Visible-spawn queries over a sector neighborhood.
//!
//! The neighborhood is derived from the calculation radius and the sector
//! edge so coverage never depends on where the player stands inside their
//! sector; generation is keyed purely by sector indices. Aggregated records
//! are then filtered by true planar distance. Every call is independent and
//! side-effect-free; the only impure entry point is the convenience wrapper
//! that reads the system clock for the current hour bucket.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::WorldConfig;
use crate::geo::{haversine_m, planar_distance_m};
use crate::grid;
use crate::spawn::{generate_sector, SpawnRecord};

/// Sectors to enumerate on each side of the player's sector so that
/// `calc_radius_m` is fully covered from any in-sector position.
pub fn sector_range(calc_radius_m: f64, sector_edge_m: f64) -> i32 {
    (calc_radius_m.max(0.0) / sector_edge_m).ceil() as i32 + 1
}

/// Query all spawns visible from a position at an explicit hour bucket.
///
/// Non-legendary records pass within `visible_radius_m`; legendary records
/// pass within the larger of that and the configured legendary reveal
/// radius, letting callers show "something is near" before exact reveal.
pub fn visible_spawns_at(
    cfg: &WorldConfig,
    lat: f64,
    lng: f64,
    calc_radius_m: f64,
    visible_radius_m: f64,
    hour: i32,
) -> Vec<SpawnRecord> {
    let t = &cfg.tuning;
    let (sector_x, sector_y) = grid::sector_at(lat, lng, t.cell_size_deg, t.sector_cells);
    let range = sector_range(calc_radius_m, t.sector_edge_m());

    let mut records = Vec::new();
    for dx in -range..=range {
        for dy in -range..=range {
            records.extend(generate_sector(cfg, sector_x + dx, sector_y + dy, hour));
        }
    }

    let legendary_limit = visible_radius_m.max(t.legendary_visible_radius_m);
    records.retain(|r| {
        let d = planar_distance_m(lat, lng, r.lat, r.lng);
        if r.is_legendary() {
            d <= legendary_limit
        } else {
            d <= visible_radius_m
        }
    });
    records
}

/// [`visible_spawns_at`] for the current wall-clock hour.
pub fn visible_spawns(
    cfg: &WorldConfig,
    lat: f64,
    lng: f64,
    calc_radius_m: f64,
    visible_radius_m: f64,
) -> Vec<SpawnRecord> {
    visible_spawns_at(
        cfg,
        lat,
        lng,
        calc_radius_m,
        visible_radius_m,
        current_hour_bucket(),
    )
}

/// The current hour bucket from the system clock. A pre-epoch clock maps to
/// bucket 0 rather than panicking.
pub fn current_hour_bucket() -> i32 {
    let unix_seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);
    grid::hour_bucket(unix_seconds)
}

/// Records sorted by ascending planar distance from a point: radar order.
pub fn sorted_by_distance(mut records: Vec<SpawnRecord>, lat: f64, lng: f64) -> Vec<SpawnRecord> {
    records.sort_by(|a, b| {
        planar_distance_m(lat, lng, a.lat, a.lng)
            .total_cmp(&planar_distance_m(lat, lng, b.lat, b.lng))
    });
    records
}

/// Caller-owned movement throttle: requery only after moving far enough.
///
/// The engine itself is stateless; this is the explicit "last query
/// position" a caller keeps to avoid recomputing the world every GPS tick.
#[derive(Debug, Clone)]
pub struct QueryThrottle {
    min_move_m: f64,
    last: Option<(f64, f64)>,
}

impl QueryThrottle {
    pub fn new(min_move_m: f64) -> Self {
        Self {
            min_move_m,
            last: None,
        }
    }

    /// True on the first call, and again once the position has moved at
    /// least the threshold from the last accepted position.
    pub fn should_requery(&mut self, lat: f64, lng: f64) -> bool {
        let moved = match self.last {
            None => true,
            Some((last_lat, last_lng)) => {
                haversine_m(last_lat, last_lng, lat, lng) >= self.min_move_m
            }
        };
        if moved {
            self.last = Some((lat, lng));
        }
        moved
    }

    /// Forget the last position; the next call requeries unconditionally.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for QueryThrottle {
    fn default() -> Self {
        Self::new(5.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::Biome;
    use crate::zones::{Zone, ZoneConfig};

    fn world() -> WorldConfig {
        WorldConfig {
            zones: ZoneConfig::empty(),
            ..WorldConfig::default()
        }
    }

    fn record_at(lat: f64, lng: f64, species: u16) -> SpawnRecord {
        SpawnRecord {
            id: format!("t:{species}"),
            lat,
            lng,
            species_id: species,
            biome: Biome::Grass,
            despawn_at: 0,
        }
    }

    // --- Neighborhood ---

    #[test]
    fn canonical_radius_gives_two_sector_range() {
        // 100 m calc radius over ~222 m sectors.
        assert_eq!(sector_range(100.0, 222.4), 2);
    }

    #[test]
    fn range_grows_with_radius() {
        assert_eq!(sector_range(0.0, 222.4), 1);
        assert_eq!(sector_range(500.0, 222.4), 4);
        assert_eq!(sector_range(-5.0, 222.4), 1);
    }

    // --- Query ---

    #[test]
    fn query_is_deterministic_at_fixed_hour() {
        let cfg = world();
        let a = visible_spawns_at(&cfg, 10.305, 123.897, 100.0, 100.0, 491_000);
        let b = visible_spawns_at(&cfg, 10.305, 123.897, 100.0, 100.0, 491_000);
        assert_eq!(a, b);
    }

    #[test]
    fn all_results_are_within_their_radius() {
        let cfg = WorldConfig::default();
        let (lat, lng) = (10.305, 123.897);
        let visible = 150.0;
        let records = visible_spawns_at(&cfg, lat, lng, 150.0, visible, 491_123);
        assert!(!records.is_empty());
        for r in &records {
            let d = planar_distance_m(lat, lng, r.lat, r.lng);
            let limit = if r.is_legendary() {
                visible.max(cfg.tuning.legendary_visible_radius_m)
            } else {
                visible
            };
            assert!(d <= limit, "{} at {d} m exceeds {limit} m", r.id);
        }
    }

    #[test]
    fn results_do_not_depend_on_position_within_sector() {
        let cfg = world();
        // Both positions sit in the same sector; a huge visible radius keeps
        // the whole neighborhood, so the outputs must match exactly.
        let a = visible_spawns_at(&cfg, 10.3041, 123.8961, 100.0, 10_000.0, 491_000);
        let b = visible_spawns_at(&cfg, 10.3049, 123.8969, 100.0, 10_000.0, 491_000);
        assert_eq!(a, b);
    }

    #[test]
    fn legendary_passes_at_the_wider_radius() {
        let mut cfg = world();
        cfg.zones.legendary_zones.push(Zone {
            name: "far shrine".into(),
            lat: 0.010_53,
            lng: 0.030_57,
            radius_m: 300.0,
            forced_biome: None,
            legendary_species: Some(150),
            spawn_rate_bonus: None,
        });
        // ~300 m north of the zone: outside the 100 m visible radius but
        // inside the 500 m legendary reveal.
        let (lat, lng) = (0.013_23, 0.030_57);
        let records = visible_spawns_at(&cfg, lat, lng, 100.0, 100.0, 777);

        let legendary: Vec<_> = records.iter().filter(|r| r.is_legendary()).collect();
        assert_eq!(legendary.len(), 1);
        let d = planar_distance_m(lat, lng, legendary[0].lat, legendary[0].lng);
        assert!(d > 100.0 && d <= 500.0, "legendary at {d} m");

        for r in records.iter().filter(|r| !r.is_legendary()) {
            assert!(planar_distance_m(lat, lng, r.lat, r.lng) <= 100.0);
        }
    }

    #[test]
    fn tight_legendary_radius_hides_the_zone() {
        let mut cfg = world();
        cfg.tuning.legendary_visible_radius_m = 120.0;
        cfg.zones.legendary_zones.push(Zone {
            name: "far shrine".into(),
            lat: 0.010_53,
            lng: 0.030_57,
            radius_m: 300.0,
            forced_biome: None,
            legendary_species: Some(150),
            spawn_rate_bonus: None,
        });
        let records = visible_spawns_at(&cfg, 0.013_23, 0.030_57, 100.0, 100.0, 777);
        assert!(records.iter().all(|r| !r.is_legendary()));
    }

    // --- Helpers ---

    #[test]
    fn sorted_by_distance_orders_nearest_first() {
        let (lat, lng) = (10.0, 10.0);
        let records = vec![
            record_at(10.003, 10.0, 3),
            record_at(10.001, 10.0, 1),
            record_at(10.002, 10.0, 2),
        ];
        let sorted = sorted_by_distance(records, lat, lng);
        let ids: Vec<u16> = sorted.iter().map(|r| r.species_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn throttle_passes_first_call_then_gates_by_distance() {
        let mut throttle = QueryThrottle::new(5.0);
        assert!(throttle.should_requery(10.0, 10.0));
        // ~3 m north: below the threshold.
        assert!(!throttle.should_requery(10.000_027, 10.0));
        // ~6 m from the last accepted position.
        assert!(throttle.should_requery(10.000_054, 10.0));
    }

    #[test]
    fn throttle_reset_forces_requery() {
        let mut throttle = QueryThrottle::default();
        assert!(throttle.should_requery(10.0, 10.0));
        assert!(!throttle.should_requery(10.0, 10.0));
        throttle.reset();
        assert!(throttle.should_requery(10.0, 10.0));
    }

    #[test]
    fn clock_bucket_is_past_2015() {
        // 400k hours past the epoch lands in 2015; any sane clock is later.
        assert!(current_hour_bucket() > 400_000);
    }
}
