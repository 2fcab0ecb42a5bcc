//! Authoring-time validation for world configuration.
//!
//! Spawn generation itself never fails: bad tables silently skew or starve
//! the world instead. These checks catch that at authoring time. Each
//! `check_*` covers one concern and returns every problem it finds;
//! [`check_world`] runs the lot over a [`WorldConfig`].

use crate::biome::Biome;
use crate::config::{SpawnTuning, WorldConfig};
use crate::constants::is_legendary_species;
use crate::geo::haversine_m;
use crate::species::SpeciesConfig;
use crate::zones::{Zone, ZoneConfig};

/// A configuration validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Error severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

// ── A. Tuning ───────────────────────────────────────────────────────────

/// Check grid dimensions, attempt budgets and noise thresholds.
pub fn check_tuning(t: &SpawnTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !t.cell_size_deg.is_finite() || t.cell_size_deg <= 0.0 {
        errors.push(ValidationError {
            category: "tuning",
            severity: Severity::Error,
            message: format!("Cell size must be positive degrees, got {}", t.cell_size_deg),
        });
    }
    if t.sector_cells <= 0 {
        errors.push(ValidationError {
            category: "tuning",
            severity: Severity::Error,
            message: format!("Sector must span at least 1 cell, got {}", t.sector_cells),
        });
    }
    if t.min_spawns > t.max_spawns {
        errors.push(ValidationError {
            category: "tuning",
            severity: Severity::Error,
            message: format!(
                "Spawn count range is inverted: min {} > max {}",
                t.min_spawns, t.max_spawns
            ),
        });
    }
    if t.species_attempts == 0 {
        errors.push(ValidationError {
            category: "tuning",
            severity: Severity::Error,
            message: "Species attempt budget is zero; no sector can roll anything".into(),
        });
    }
    if t.placement_attempts == 0 {
        errors.push(ValidationError {
            category: "tuning",
            severity: Severity::Error,
            message: "Placement attempt budget is zero; nothing can be placed".into(),
        });
    }
    if t.sector_cells > 0 && t.max_spawns as i64 > t.subcells() as i64 {
        errors.push(ValidationError {
            category: "tuning",
            severity: Severity::Error,
            message: format!(
                "Max spawns {} exceeds the {} sub-cells of a sector",
                t.max_spawns,
                t.subcells()
            ),
        });
    }
    if t.species_attempts < t.max_spawns {
        errors.push(ValidationError {
            category: "tuning",
            severity: Severity::Warning,
            message: format!(
                "Species attempt budget {} is below max spawns {}; full sectors will undercount",
                t.species_attempts, t.max_spawns
            ),
        });
    }

    let cuts = [
        ("macro nature", t.macro_nature_cut),
        ("nature water", t.nature_water_cut),
        ("nature forest", t.nature_forest_cut),
        ("developed water", t.developed_water_cut),
        ("developed grass", t.developed_grass_cut),
    ];
    for (name, cut) in cuts {
        if !cut.is_finite() || !(0.0..=1.0).contains(&cut) {
            errors.push(ValidationError {
                category: "tuning",
                severity: Severity::Error,
                message: format!("The {name} threshold {cut} is outside [0, 1]"),
            });
        } else if cut == 0.0 || cut == 1.0 {
            errors.push(ValidationError {
                category: "tuning",
                severity: Severity::Warning,
                message: format!("The {name} threshold {cut} leaves an empty biome band"),
            });
        }
    }
    if t.nature_water_cut > t.nature_forest_cut {
        errors.push(ValidationError {
            category: "tuning",
            severity: Severity::Error,
            message: format!(
                "Nature thresholds are inverted: water {} > forest {}; forest is unreachable",
                t.nature_water_cut, t.nature_forest_cut
            ),
        });
    }
    if t.developed_water_cut > t.developed_grass_cut {
        errors.push(ValidationError {
            category: "tuning",
            severity: Severity::Error,
            message: format!(
                "Developed thresholds are inverted: water {} > grass {}; grass is unreachable",
                t.developed_water_cut, t.developed_grass_cut
            ),
        });
    }
    if !t.legendary_visible_radius_m.is_finite() || t.legendary_visible_radius_m < 0.0 {
        errors.push(ValidationError {
            category: "tuning",
            severity: Severity::Error,
            message: format!(
                "Legendary visible radius must be non-negative, got {} m",
                t.legendary_visible_radius_m
            ),
        });
    }

    errors
}

// ── B. Species table ────────────────────────────────────────────────────

/// Check the catalog bounds, wildcard rate and curated biome lists.
pub fn check_species(s: &SpeciesConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if s.catalog_size == 0 {
        errors.push(ValidationError {
            category: "species",
            severity: Severity::Error,
            message: "Catalog size is zero; wildcard rolls have no range".into(),
        });
    }
    if !s.wildcard_rate.is_finite() || !(0.0..1.0).contains(&s.wildcard_rate) {
        errors.push(ValidationError {
            category: "species",
            severity: Severity::Error,
            message: format!("Wildcard rate {} is outside [0, 1)", s.wildcard_rate),
        });
    }
    if s.default_species == 0 || s.default_species > s.catalog_size {
        errors.push(ValidationError {
            category: "species",
            severity: Severity::Error,
            message: format!(
                "Default species {} is outside the catalog (1..={})",
                s.default_species, s.catalog_size
            ),
        });
    }

    let lists = [
        ("water", &s.water),
        ("forest", &s.forest),
        ("grass", &s.grass),
        ("urban", &s.urban),
        ("rural", &s.rural),
    ];
    for (name, list) in lists {
        if list.is_empty() {
            errors.push(ValidationError {
                category: "species",
                severity: Severity::Warning,
                message: format!(
                    "The {name} list is empty; its biome falls back to species {}",
                    s.default_species
                ),
            });
        }
        for &id in list {
            if id == 0 || id > s.catalog_size {
                errors.push(ValidationError {
                    category: "species",
                    severity: Severity::Error,
                    message: format!(
                        "The {name} list contains species {id}, outside the catalog (1..={})",
                        s.catalog_size
                    ),
                });
            }
        }
    }

    errors
}

// ── C. Zone tables ──────────────────────────────────────────────────────

fn check_zone_shape(kind: &'static str, z: &Zone, errors: &mut Vec<ValidationError>) {
    if !z.lat.is_finite() || z.lat.abs() > 90.0 {
        errors.push(ValidationError {
            category: "zones",
            severity: Severity::Error,
            message: format!("{kind} '{}' has latitude {} outside [-90, 90]", z.name, z.lat),
        });
    }
    if !z.lng.is_finite() || z.lng.abs() > 180.0 {
        errors.push(ValidationError {
            category: "zones",
            severity: Severity::Error,
            message: format!(
                "{kind} '{}' has longitude {} outside [-180, 180]",
                z.name, z.lng
            ),
        });
    }
    if !z.radius_m.is_finite() || z.radius_m <= 0.0 {
        errors.push(ValidationError {
            category: "zones",
            severity: Severity::Error,
            message: format!("{kind} '{}' has non-positive radius {} m", z.name, z.radius_m),
        });
    }
    if let Some(bonus) = z.spawn_rate_bonus {
        if !bonus.is_finite() || !(0.0..=1.0).contains(&bonus) {
            errors.push(ValidationError {
                category: "zones",
                severity: Severity::Error,
                message: format!(
                    "{kind} '{}' has spawn rate bonus {bonus} outside [0, 1]",
                    z.name
                ),
            });
        }
    }
    if matches!(z.forced_biome, Some(Biome::Legendary)) {
        errors.push(ValidationError {
            category: "zones",
            severity: Severity::Error,
            message: format!(
                "{kind} '{}' forces the legendary marker; use a terrain biome",
                z.name
            ),
        });
    }
}

/// Check both zone tables: coordinates, radii, species ids, and the
/// interactions (region overlap, legendary zones sharing a sector).
pub fn check_zones(zones: &ZoneConfig, tuning: &SpawnTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for z in &zones.legendary_zones {
        check_zone_shape("Legendary zone", z, &mut errors);
        match z.legendary_species {
            None => errors.push(ValidationError {
                category: "zones",
                severity: Severity::Error,
                message: format!("Legendary zone '{}' spawns nothing: no species id", z.name),
            }),
            Some(id) if !is_legendary_species(id) => errors.push(ValidationError {
                category: "zones",
                severity: Severity::Warning,
                message: format!(
                    "Legendary zone '{}' spawns species {id}, which is not in the legendary set",
                    z.name
                ),
            }),
            Some(_) => {}
        }
    }

    for z in &zones.biome_regions {
        check_zone_shape("Biome region", z, &mut errors);
        if z.forced_biome.is_none() {
            errors.push(ValidationError {
                category: "zones",
                severity: Severity::Warning,
                message: format!("Biome region '{}' names no biome and never applies", z.name),
            });
        }
    }

    // Regions are resolved in declaration order, so overlap is legal but
    // usually unintended.
    for (i, a) in zones.biome_regions.iter().enumerate() {
        for b in &zones.biome_regions[i + 1..] {
            if haversine_m(a.lat, a.lng, b.lat, b.lng) < a.radius_m + b.radius_m {
                errors.push(ValidationError {
                    category: "zones",
                    severity: Severity::Warning,
                    message: format!(
                        "Biome regions '{}' and '{}' overlap; '{}' wins where they do",
                        a.name, b.name, a.name
                    ),
                });
            }
        }
    }

    if tuning.cell_size_deg.is_finite() && tuning.cell_size_deg > 0.0 && tuning.sector_cells > 0 {
        for (i, a) in zones.legendary_zones.iter().enumerate() {
            for b in &zones.legendary_zones[i + 1..] {
                let sector = a.owning_sector(tuning.cell_size_deg, tuning.sector_cells);
                if sector == b.owning_sector(tuning.cell_size_deg, tuning.sector_cells) {
                    errors.push(ValidationError {
                        category: "zones",
                        severity: Severity::Warning,
                        message: format!(
                            "Legendary zones '{}' and '{}' share sector ({}, {}); both spawn there",
                            a.name, b.name, sector.0, sector.1
                        ),
                    });
                }
            }
        }
    }

    errors
}

// ── D. Cross-table checks ───────────────────────────────────────────────

/// Check that zone species ids fit the configured catalog.
pub fn check_zone_species_in_catalog(
    zones: &ZoneConfig,
    species: &SpeciesConfig,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for z in &zones.legendary_zones {
        if let Some(id) = z.legendary_species {
            if id == 0 || id > species.catalog_size {
                errors.push(ValidationError {
                    category: "zones",
                    severity: Severity::Error,
                    message: format!(
                        "Legendary zone '{}' spawns species {id}, outside the catalog (1..={})",
                        z.name, species.catalog_size
                    ),
                });
            }
        }
    }
    errors
}

// ── Master validation ───────────────────────────────────────────────────

/// Run all configuration checks and return combined results.
pub fn check_world(cfg: &WorldConfig) -> Vec<ValidationError> {
    let mut all = Vec::new();
    all.extend(check_tuning(&cfg.tuning));
    all.extend(check_species(&cfg.species));
    all.extend(check_zones(&cfg.zones, &cfg.tuning));
    all.extend(check_zone_species_in_catalog(&cfg.zones, &cfg.species));
    all
}
