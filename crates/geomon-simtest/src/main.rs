//! Geomon Headless World Harness
//!
//! Validates the world tables and spawn invariants without a client.
//! Runs entirely in-process: no GPS, no network, no rendering.
//!
//! Usage:
//!   cargo run -p geomon-simtest
//!   cargo run -p geomon-simtest -- --verbose

use std::collections::HashSet;

use geomon_logic::biome::{noise_biome, resolve_biome, Biome};
use geomon_logic::config::WorldConfig;
use geomon_logic::geo::planar_distance_m;
use geomon_logic::hash::cell_hash;
use geomon_logic::query::{sorted_by_distance, visible_spawns_at, QueryThrottle};
use geomon_logic::spawn::{generate_sector, SpawnRecord};
use geomon_logic::validate::{check_world, Severity};
use geomon_logic::zones::ZoneConfig;
use serde::Deserialize;

// ── Zone tables (same JSON the client ships) ────────────────────────────
const WORLD_ZONES_JSON: &str = include_str!("../../../data/world_zones.json");

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct ZoneSpec {
    name: String,
    lat: f64,
    lng: f64,
    radius_m: f64,
    forced_biome: Option<String>,
    legendary_species: Option<u16>,
    spawn_rate_bonus: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ZoneTables {
    legendary_zones: Vec<ZoneSpec>,
    biome_regions: Vec<ZoneSpec>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Geomon World Harness ===\n");

    let mut results = Vec::new();

    // 1. Zone table data
    results.extend(validate_zone_tables(verbose));

    // 2. Configuration checks
    results.extend(validate_config_checks(verbose));

    // 3. Hash layer
    results.extend(validate_hash_layer(verbose));

    // 4. Biome layer
    results.extend(validate_biome_layer(verbose));

    // 5. Sector generation sweep
    results.extend(validate_sector_generation(verbose));

    // 6. Hourly rotation
    results.extend(validate_hourly_rotation(verbose));

    // 7. Legendary zone layer
    results.extend(validate_legendary_zones(verbose));

    // 8. Visibility queries
    results.extend(validate_query_behavior(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

/// Default tuning and species with the zone layer off, for noise-only sweeps.
fn noise_world() -> WorldConfig {
    WorldConfig {
        zones: ZoneConfig::empty(),
        ..WorldConfig::default()
    }
}

/// Hour-independent content of a record set (ids embed the hour).
fn content(records: &[SpawnRecord]) -> HashSet<(u16, u64, u64)> {
    records
        .iter()
        .map(|r| (r.species_id, r.lat.to_bits(), r.lng.to_bits()))
        .collect()
}

// ── 1. Zone Tables ──────────────────────────────────────────────────────

fn validate_zone_tables(verbose: bool) -> Vec<TestResult> {
    println!("--- Zone Tables ---");
    let mut results = Vec::new();

    let tables: ZoneTables = match serde_json::from_str(WORLD_ZONES_JSON) {
        Ok(t) => t,
        Err(e) => {
            results.push(TestResult {
                name: "zones_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "zones_counts".into(),
        passed: tables.legendary_zones.len() == 4 && tables.biome_regions.len() == 3,
        detail: format!(
            "{} legendary zones, {} biome regions",
            tables.legendary_zones.len(),
            tables.biome_regions.len()
        ),
    });

    let missing_species: Vec<_> = tables
        .legendary_zones
        .iter()
        .filter(|z| z.legendary_species.is_none())
        .collect();
    results.push(TestResult {
        name: "zones_all_spawn_something".into(),
        passed: missing_species.is_empty(),
        detail: if missing_species.is_empty() {
            "every legendary zone carries a species id".into()
        } else {
            format!(
                "{} zones spawn nothing: {}",
                missing_species.len(),
                missing_species
                    .iter()
                    .map(|z| z.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        },
    });

    let bad_radius = tables
        .legendary_zones
        .iter()
        .chain(&tables.biome_regions)
        .filter(|z| z.radius_m <= 0.0)
        .count();
    results.push(TestResult {
        name: "zones_positive_radii".into(),
        passed: bad_radius == 0,
        detail: format!("{} zones with non-positive radius", bad_radius),
    });

    // The shipped JSON and the built-in defaults must stay in lockstep.
    let parsed: Result<ZoneConfig, _> = serde_json::from_str(WORLD_ZONES_JSON);
    results.push(TestResult {
        name: "zones_match_builtin".into(),
        passed: parsed.as_ref().map(|p| *p == ZoneConfig::default()).unwrap_or(false),
        detail: "data/world_zones.json equals ZoneConfig::default()".into(),
    });

    if verbose {
        println!("  Legendary zones:");
        for z in &tables.legendary_zones {
            println!(
                "    {:20} ({:.4}, {:.4}) r={}m species={:?}",
                z.name, z.lat, z.lng, z.radius_m, z.legendary_species
            );
        }
    }

    results
}

// ── 2. Configuration Checks ─────────────────────────────────────────────

fn validate_config_checks(_verbose: bool) -> Vec<TestResult> {
    println!("--- Configuration Checks ---");
    let mut results = Vec::new();

    let report = check_world(&WorldConfig::default());
    let errors = report.iter().filter(|e| e.severity == Severity::Error).count();
    let warnings = report.iter().filter(|e| e.severity == Severity::Warning).count();

    results.push(TestResult {
        name: "config_no_errors".into(),
        passed: errors == 0,
        detail: format!("{} errors on the stock configuration", errors),
    });

    // Two quirks are expected: the Dragonite shrine (149 is not in the
    // legendary set) and the overlapping city/island regions.
    results.push(TestResult {
        name: "config_known_warnings".into(),
        passed: warnings == 2
            && report.iter().any(|e| e.message.contains("legendary set"))
            && report.iter().any(|e| e.message.contains("overlap")),
        detail: format!("{} warnings (expected the 2 known data quirks)", warnings),
    });

    let mut broken = WorldConfig::default();
    broken.species.catalog_size = 0;
    broken.tuning.min_spawns = 20;
    broken.tuning.max_spawns = 5;
    let flagged = check_world(&broken)
        .iter()
        .filter(|e| e.severity == Severity::Error)
        .count();
    results.push(TestResult {
        name: "config_detects_sabotage".into(),
        passed: flagged >= 2,
        detail: format!("{} errors flagged on a sabotaged config", flagged),
    });

    results
}

// ── 3. Hash Layer ───────────────────────────────────────────────────────

fn validate_hash_layer(_verbose: bool) -> Vec<TestResult> {
    println!("--- Hash Layer ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "hash_repeatable".into(),
        passed: cell_hash(5, 7, 100) == cell_hash(5, 7, 100),
        detail: "same cell and shift give the same draw".into(),
    });

    let base = cell_hash(5, 7, 100);
    results.push(TestResult {
        name: "hash_input_sensitivity".into(),
        passed: base != cell_hash(6, 7, 100)
            && base != cell_hash(5, 8, 100)
            && base != cell_hash(5, 7, 101),
        detail: "neighbor cells and shifts give different draws".into(),
    });

    let mut out_of_range = 0u32;
    let mut sum = 0.0f64;
    let mut n = 0u32;
    for x in -25..25 {
        for y in -25..25 {
            let h = cell_hash(x, y, 491_000);
            if !(0.0..1.0).contains(&h) {
                out_of_range += 1;
            }
            sum += h;
            n += 1;
        }
    }
    results.push(TestResult {
        name: "hash_unit_range".into(),
        passed: out_of_range == 0,
        detail: format!("{} of {} draws outside [0, 1)", out_of_range, n),
    });

    let mean = sum / n as f64;
    results.push(TestResult {
        name: "hash_mean_centered".into(),
        passed: (0.45..=0.55).contains(&mean),
        detail: format!("mean {:.4} over {} cells", mean, n),
    });

    // 120k draws bucketed into deciles; a centered mean alone would let a
    // skewed distribution through.
    let mut buckets = [0u32; 10];
    for x in -100..100i32 {
        for y in -100..100i32 {
            for shift in 0..3 {
                let h = cell_hash(x, y, 491_000 + shift * 1_000);
                buckets[(h * 10.0) as usize] += 1;
            }
        }
    }
    let total: u32 = buckets.iter().sum();
    let expected = total as f64 / 10.0;
    let worst = buckets
        .iter()
        .map(|&c| (c as f64 - expected).abs() / expected)
        .fold(0.0f64, f64::max);
    results.push(TestResult {
        name: "hash_histogram_uniform".into(),
        passed: worst < 0.05,
        detail: format!(
            "worst decile deviation {:.4} over {} draws",
            worst, total
        ),
    });

    results
}

// ── 4. Biome Layer ──────────────────────────────────────────────────────

fn validate_biome_layer(verbose: bool) -> Vec<TestResult> {
    println!("--- Biome Layer ---");
    let mut results = Vec::new();
    let cfg = WorldConfig::default();

    let mut seen: HashSet<Biome> = HashSet::new();
    let mut legendary_from_noise = false;
    for i in 0..2_500 {
        let b = noise_biome(&cfg.tuning, i as f64 * 0.0137, i as f64 * 0.0251);
        if b.is_legendary() {
            legendary_from_noise = true;
        }
        seen.insert(b);
    }
    results.push(TestResult {
        name: "biome_noise_diversity".into(),
        passed: seen.len() == 5,
        detail: format!("{} of 5 terrain biomes over a 2500-point transect", seen.len()),
    });
    results.push(TestResult {
        name: "biome_noise_never_legendary".into(),
        passed: !legendary_from_noise,
        detail: "the legendary marker never comes from noise".into(),
    });

    let landmarks = [
        ("Tops Lookout", 10.3705, 123.8708, Biome::Forest),
        ("Olango Island", 10.2544, 124.0543, Biome::Water),
        ("Cebu City center", 10.3157, 123.8854, Biome::Urban),
    ];
    let mut wrong = Vec::new();
    for (name, lat, lng, want) in landmarks {
        let got = resolve_biome(&cfg.zones, &cfg.tuning, lat, lng);
        if got != want {
            wrong.push(format!("{} resolved {:?}", name, got));
        }
        if verbose {
            println!("  {:18} → {:?}", name, got);
        }
    }
    results.push(TestResult {
        name: "biome_landmarks_pinned".into(),
        passed: wrong.is_empty(),
        detail: if wrong.is_empty() {
            "all 3 landmark biomes match their zone tables".into()
        } else {
            wrong.join("; ")
        },
    });

    results
}

// ── 5. Sector Generation ────────────────────────────────────────────────

fn validate_sector_generation(_verbose: bool) -> Vec<TestResult> {
    println!("--- Sector Generation ---");
    let mut results = Vec::new();
    let cfg = noise_world();
    let edge = cfg.tuning.sector_edge_deg();

    let mut bad_counts = 0u32;
    let mut dup_species = 0u32;
    let mut dup_positions = 0u32;
    let mut strays = 0u32;
    let mut bad_ids = 0u32;
    let sectors = 50;

    for i in 0..sectors {
        let (sx, sy) = (i * 17, 4 - i * 23);
        let hour = 491_000 + i;
        let records = generate_sector(&cfg, sx, sy, hour);

        if !(4..=12).contains(&records.len()) {
            bad_counts += 1;
        }
        let species: HashSet<u16> = records.iter().map(|r| r.species_id).collect();
        if species.len() != records.len() {
            dup_species += 1;
        }
        let positions: HashSet<(u64, u64)> = records
            .iter()
            .map(|r| (r.lat.to_bits(), r.lng.to_bits()))
            .collect();
        if positions.len() != records.len() {
            dup_positions += 1;
        }

        let (lat_lo, lng_lo) = (sx as f64 * edge, sy as f64 * edge);
        let id_prefix = format!("{}:{}:{}:", sx, sy, hour);
        for r in &records {
            if r.lat < lat_lo || r.lat >= lat_lo + edge || r.lng < lng_lo || r.lng >= lng_lo + edge
            {
                strays += 1;
            }
            if !r.id.starts_with(&id_prefix) {
                bad_ids += 1;
            }
        }
    }

    results.push(TestResult {
        name: "sector_counts_in_range".into(),
        passed: bad_counts == 0,
        detail: format!("{} of {} sectors outside 4..=12 spawns", bad_counts, sectors),
    });
    results.push(TestResult {
        name: "sector_species_unique".into(),
        passed: dup_species == 0,
        detail: format!("{} sectors with duplicate species", dup_species),
    });
    results.push(TestResult {
        name: "sector_positions_unique".into(),
        passed: dup_positions == 0,
        detail: format!("{} sectors with stacked spawns", dup_positions),
    });
    results.push(TestResult {
        name: "sector_containment".into(),
        passed: strays == 0,
        detail: format!("{} spawns strayed outside their sector", strays),
    });
    results.push(TestResult {
        name: "sector_id_format".into(),
        passed: bad_ids == 0,
        detail: format!("{} ids without the sx:sy:hour:cell prefix", bad_ids),
    });

    results
}

// ── 6. Hourly Rotation ──────────────────────────────────────────────────

fn validate_hourly_rotation(_verbose: bool) -> Vec<TestResult> {
    println!("--- Hourly Rotation ---");
    let mut results = Vec::new();
    let cfg = noise_world();

    let mut changed = 0;
    for s in 0..20i32 {
        let (sx, sy) = (s * 11, 5 - s * 13);
        if content(&generate_sector(&cfg, sx, sy, 491_000))
            != content(&generate_sector(&cfg, sx, sy, 491_001))
        {
            changed += 1;
        }
    }
    results.push(TestResult {
        name: "rotation_changes_content".into(),
        passed: changed >= 18,
        detail: format!("{}/20 sectors changed content across the hour boundary", changed),
    });

    let hour = 491_555;
    let records = generate_sector(&cfg, 7, -3, hour);
    let off_boundary = records
        .iter()
        .filter(|r| r.despawn_at != (hour as i64 + 1) * 3600)
        .count();
    results.push(TestResult {
        name: "rotation_despawn_boundary".into(),
        passed: !records.is_empty() && off_boundary == 0,
        detail: format!(
            "{} of {} records despawn off the next hour boundary",
            off_boundary,
            records.len()
        ),
    });

    results
}

// ── 7. Legendary Zones ──────────────────────────────────────────────────

fn validate_legendary_zones(_verbose: bool) -> Vec<TestResult> {
    println!("--- Legendary Zones ---");
    let mut results = Vec::new();
    let cfg = WorldConfig::default();
    let t = &cfg.tuning;

    let mut misses = Vec::new();
    for (index, zone) in cfg.zones.legendary_zones.iter().enumerate() {
        let (sx, sy) = zone.owning_sector(t.cell_size_deg, t.sector_cells);
        for hour in [491_000, 491_001] {
            let records = generate_sector(&cfg, sx, sy, hour);
            let legendary: Vec<&SpawnRecord> =
                records.iter().filter(|r| r.is_legendary()).collect();
            let ok = legendary.len() == 1
                && legendary[0].id == format!("zone:{}:{}", index, hour)
                && legendary[0].lat.to_bits() == zone.lat.to_bits()
                && legendary[0].lng.to_bits() == zone.lng.to_bits()
                && Some(legendary[0].species_id) == zone.legendary_species;
            if !ok {
                misses.push(format!("{} at hour {}", zone.name, hour));
            }
        }
    }
    results.push(TestResult {
        name: "legendary_on_schedule".into(),
        passed: misses.is_empty(),
        detail: if misses.is_empty() {
            "4 landmarks spawned their species both test hours".into()
        } else {
            misses.join("; ")
        },
    });

    // ~300 m north of Magellan's Cross: outside the normal visible radius,
    // inside the legendary reveal.
    let (lat, lng) = (10.2963, 123.9018);
    let records = visible_spawns_at(&cfg, lat, lng, 100.0, 100.0, 491_000);
    let legendary: Vec<&SpawnRecord> = records.iter().filter(|r| r.is_legendary()).collect();
    let seen_far = legendary.len() == 1
        && planar_distance_m(lat, lng, legendary[0].lat, legendary[0].lng) > 100.0;
    results.push(TestResult {
        name: "legendary_wide_reveal".into(),
        passed: seen_far,
        detail: format!(
            "{} legendary records visible from 300 m out",
            legendary.len()
        ),
    });

    results
}

// ── 8. Visibility Queries ───────────────────────────────────────────────

fn validate_query_behavior(_verbose: bool) -> Vec<TestResult> {
    println!("--- Visibility Queries ---");
    let mut results = Vec::new();
    let cfg = WorldConfig::default();
    let (lat, lng) = (10.3157, 123.8854);

    let visible = 200.0;
    let records = visible_spawns_at(&cfg, lat, lng, 200.0, visible, 491_123);
    let too_far = records
        .iter()
        .filter(|r| {
            let limit = if r.is_legendary() {
                visible.max(cfg.tuning.legendary_visible_radius_m)
            } else {
                visible
            };
            planar_distance_m(lat, lng, r.lat, r.lng) > limit
        })
        .count();
    results.push(TestResult {
        name: "query_containment".into(),
        passed: !records.is_empty() && too_far == 0,
        detail: format!("{} records, {} beyond their radius", records.len(), too_far),
    });

    let a = visible_spawns_at(&cfg, 10.3041, 123.8961, 100.0, 10_000.0, 491_000);
    let b = visible_spawns_at(&cfg, 10.3049, 123.8969, 100.0, 10_000.0, 491_000);
    results.push(TestResult {
        name: "query_position_independent".into(),
        passed: a == b,
        detail: format!("{} records agree between two in-sector probes", a.len()),
    });

    let sorted = sorted_by_distance(records, lat, lng);
    let ordered = sorted.windows(2).all(|pair| {
        planar_distance_m(lat, lng, pair[0].lat, pair[0].lng)
            <= planar_distance_m(lat, lng, pair[1].lat, pair[1].lng)
    });
    results.push(TestResult {
        name: "query_radar_order".into(),
        passed: ordered,
        detail: "distance sort is non-decreasing".into(),
    });

    let mut throttle = QueryThrottle::new(5.0);
    let gate = throttle.should_requery(10.0, 10.0)
        && !throttle.should_requery(10.000_027, 10.0)
        && throttle.should_requery(10.000_054, 10.0);
    results.push(TestResult {
        name: "query_throttle_gate".into(),
        passed: gate,
        detail: "first fix passes, 3 m holds, 6 m requeries".into(),
    });

    results
}
