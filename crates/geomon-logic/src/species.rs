//! Species selection: a wildcard band over the full catalog blended with
//! per-biome curated lists.
//!
//! The bottom `wildcard_rate` slice of the draw maps linearly onto the whole
//! catalog, so any species can appear anywhere occasionally; the rest of the
//! range indexes the biome's curated list for terrain flavor. Both the split
//! and the lists are game-balance configuration, not algorithm.

use serde::{Deserialize, Serialize};

use crate::biome::Biome;
use crate::constants;

/// Species-selection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesConfig {
    /// Full catalog size; wildcard ids span `1..=catalog_size`.
    pub catalog_size: u16,
    /// Fraction of draws routed to the full-catalog wildcard band.
    pub wildcard_rate: f64,
    /// Substitute when a biome's curated list is empty.
    pub default_species: u16,
    pub water: Vec<u16>,
    pub forest: Vec<u16>,
    pub grass: Vec<u16>,
    pub urban: Vec<u16>,
    pub rural: Vec<u16>,
}

impl SpeciesConfig {
    /// The curated list for a biome. `Legendary` has none.
    pub fn list_for(&self, biome: Biome) -> &[u16] {
        match biome {
            Biome::Water => &self.water,
            Biome::Forest => &self.forest,
            Biome::Grass => &self.grass,
            Biome::Urban => &self.urban,
            Biome::Rural => &self.rural,
            Biome::Legendary => &[],
        }
    }
}

impl Default for SpeciesConfig {
    fn default() -> Self {
        Self {
            catalog_size: constants::CATALOG_SIZE,
            wildcard_rate: 0.3,
            default_species: constants::FALLBACK_SPECIES,
            water: constants::biome_lists::WATER.to_vec(),
            forest: constants::biome_lists::FOREST.to_vec(),
            grass: constants::biome_lists::GRASS.to_vec(),
            urban: constants::biome_lists::URBAN.to_vec(),
            rural: constants::biome_lists::RURAL.to_vec(),
        }
    }
}

/// Map a biome plus a random draw in [0,1) to a species id.
///
/// Draws below `wildcard_rate` rescale onto the full catalog; the remainder
/// rescales onto the biome's curated list. Indices clamp at the top of their
/// range so float rounding at a band edge cannot step outside the catalog.
pub fn select_species(cfg: &SpeciesConfig, biome: Biome, draw: f64) -> u16 {
    if draw < cfg.wildcard_rate {
        let scaled = draw / cfg.wildcard_rate;
        let id = (scaled * cfg.catalog_size as f64).floor() as u32 + 1;
        return id.min(cfg.catalog_size as u32) as u16;
    }

    let list = cfg.list_for(biome);
    if list.is_empty() {
        return cfg.default_species;
    }

    let scaled = (draw - cfg.wildcard_rate) / (1.0 - cfg.wildcard_rate);
    let index = ((scaled * list.len() as f64).floor() as usize).min(list.len() - 1);
    list[index]
}
