//! Biome labels and zone-then-noise biome resolution.
//!
//! Resolution priority, strictly in order:
//! 1. Legendary zones with a forced biome (designers guarantee "this shrine
//!    is always water").
//! 2. Biome regions, first match wins ("this whole city is urban").
//! 3. Two-layer coordinate noise: a macro layer (~1.1 km blocks) splits the
//!    world into nature-dominated vs developed, a micro layer (~110 m
//!    blocks) picks the specific label inside the branch.
//!
//! The noise fallback guarantees full-world coverage without exhaustive zone
//! authoring.

use serde::{Deserialize, Serialize};

use crate::config::SpawnTuning;
use crate::hash::coord_hash;
use crate::zones::ZoneConfig;

/// Coarsening factor for the macro noise layer (~1.1 km at the default grid).
const MACRO_SCALE: f64 = 0.01;
/// Coarsening factor for the micro noise layer (~110 m at the default grid).
const MICRO_SCALE: f64 = 0.1;

/// Terrain label attached to spawns.
///
/// [`resolve_biome`] returns only the five terrain variants; `Legendary` is
/// the tag reserved for zone-owned spawn records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Biome {
    Urban,
    Rural,
    Forest,
    Water,
    Grass,
    Legendary,
}

impl Biome {
    /// The five terrain variants, in declaration order.
    pub fn all_terrain() -> &'static [Biome] {
        &[
            Biome::Urban,
            Biome::Rural,
            Biome::Forest,
            Biome::Water,
            Biome::Grass,
        ]
    }

    /// Whether this is the zone-legendary tag rather than terrain.
    pub fn is_legendary(self) -> bool {
        matches!(self, Biome::Legendary)
    }
}

/// Resolve the biome at a point: legendary zones, then biome regions, then
/// coordinate noise. Returns a terrain variant, never `Legendary`.
pub fn resolve_biome(zones: &ZoneConfig, tuning: &SpawnTuning, lat: f64, lng: f64) -> Biome {
    for zone in &zones.legendary_zones {
        if zone.contains(lat, lng) {
            if let Some(biome) = zone.forced_biome {
                return biome;
            }
        }
    }

    for region in &zones.biome_regions {
        if region.contains(lat, lng) {
            // Regions without a forced biome are inert.
            if let Some(biome) = region.forced_biome {
                return biome;
            }
        }
    }

    noise_biome(tuning, lat, lng)
}

/// The noise fallback on its own, with no zone tables consulted.
pub fn noise_biome(tuning: &SpawnTuning, lat: f64, lng: f64) -> Biome {
    let macro_noise = coord_hash(
        lat * MACRO_SCALE,
        lng * MACRO_SCALE,
        tuning.macro_salt,
        tuning.cell_size_deg,
    );
    let micro_noise = coord_hash(
        lat * MICRO_SCALE,
        lng * MICRO_SCALE,
        tuning.micro_salt,
        tuning.cell_size_deg,
    );

    if macro_noise < tuning.macro_nature_cut {
        // Nature-dominated macro block.
        if micro_noise < tuning.nature_water_cut {
            Biome::Water // lakes, rivers
        } else if micro_noise < tuning.nature_forest_cut {
            Biome::Forest
        } else {
            Biome::Rural // plains, fields
        }
    } else {
        // Developed macro block.
        if micro_noise < tuning.developed_water_cut {
            Biome::Water // canals, fountains
        } else if micro_noise < tuning.developed_grass_cut {
            Biome::Grass // city parks
        } else {
            Biome::Urban
        }
    }
}
