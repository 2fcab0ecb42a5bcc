//! Spawn tuning constants and the aggregate world configuration.
//!
//! Every numeric knob of the engine lives in [`SpawnTuning`] so deployments
//! can tune density, budgets, and noise thresholds without touching the
//! algorithms. [`WorldConfig`] bundles tuning with the game-balance tables
//! and is passed explicitly into every entry point; there are no global
//! tables and no lazy initialization.

use serde::{Deserialize, Serialize};

use crate::grid;
use crate::species::SpeciesConfig;
use crate::zones::ZoneConfig;

/// Numeric tuning for the deterministic spawn engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTuning {
    /// Grid cell edge in degrees (~11 m at the default).
    pub cell_size_deg: f64,
    /// Cells per sector edge; a sector holds this many squared cells.
    pub sector_cells: i32,
    /// Minimum spawns rolled per sector.
    pub min_spawns: u32,
    /// Maximum spawns rolled per sector.
    pub max_spawns: u32,
    /// Draw budget when collecting distinct species.
    pub species_attempts: u32,
    /// Placement draw budget per species before it is dropped.
    pub placement_attempts: u32,
    /// Time-shift salt for the spawn-count draw family.
    pub count_salt: i32,
    /// Time-shift salt for the species draw family.
    pub species_salt: i32,
    /// Time-shift salt for the placement draw family; strided 64 per
    /// species so draw families never collide within one (sector, hour).
    pub placement_salt: i32,
    /// Salt for the macro biome-noise layer.
    pub macro_salt: i32,
    /// Salt for the micro biome-noise layer.
    pub micro_salt: i32,
    /// Macro noise below this is nature-dominated, otherwise developed.
    pub macro_nature_cut: f64,
    /// Micro threshold for water within the nature branch.
    pub nature_water_cut: f64,
    /// Micro threshold for forest within the nature branch.
    pub nature_forest_cut: f64,
    /// Micro threshold for water within the developed branch.
    pub developed_water_cut: f64,
    /// Micro threshold for grass within the developed branch.
    pub developed_grass_cut: f64,
    /// Legendary records pass the visibility filter out to this radius even
    /// when the caller's visible radius is smaller.
    pub legendary_visible_radius_m: f64,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            cell_size_deg: 0.0001,
            sector_cells: 20,
            min_spawns: 8,
            max_spawns: 12,
            species_attempts: 20,
            placement_attempts: 15,
            count_salt: 7_777,
            species_salt: 10_000,
            placement_salt: 20_000,
            macro_salt: 8_888,
            micro_salt: 9_999,
            macro_nature_cut: 0.4,
            nature_water_cut: 0.2,
            nature_forest_cut: 0.6,
            developed_water_cut: 0.15,
            developed_grass_cut: 0.35,
            legendary_visible_radius_m: 500.0,
        }
    }
}

impl SpawnTuning {
    /// Sector edge length in degrees.
    pub fn sector_edge_deg(&self) -> f64 {
        grid::sector_edge_deg(self.cell_size_deg, self.sector_cells)
    }

    /// Sector edge length in meters (nominal).
    pub fn sector_edge_m(&self) -> f64 {
        grid::sector_edge_m(self.cell_size_deg, self.sector_cells)
    }

    /// Sub-cells per sector.
    pub fn subcells(&self) -> i32 {
        self.sector_cells * self.sector_cells
    }
}

/// Aggregate configuration injected into every engine entry point.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldConfig {
    pub tuning: SpawnTuning,
    pub species: SpeciesConfig,
    pub zones: ZoneConfig,
}
