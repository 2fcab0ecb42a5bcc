//! Curated zone tables: legendary hotspots and large biome regions.
//!
//! Zones are read-only designer configuration layered over procedural noise:
//! legendary zones pin a single species to a landmark, biome regions fix the
//! terrain label over a whole area ("this city is urban"). The engine never
//! generates or mutates them; they travel inside the world config.

use serde::{Deserialize, Serialize};

use crate::biome::Biome;
use crate::geo::haversine_m;
use crate::grid;

/// A named circular override region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Radius in meters.
    pub radius_m: f64,
    /// Terrain forced inside the radius, overriding noise.
    pub forced_biome: Option<Biome>,
    /// Species spawned hourly at the zone center (legendary zones only).
    pub legendary_species: Option<u16>,
    /// Designer tuning carried from the zone tables; range-validated but not
    /// consumed by the deterministic generator.
    pub spawn_rate_bonus: Option<f64>,
}

impl Zone {
    /// Whether a point lies within the zone radius (great-circle distance).
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        haversine_m(lat, lng, self.lat, self.lng) <= self.radius_m
    }

    /// The sector that owns this zone's center; that sector appends the
    /// zone's legendary spawn.
    pub fn owning_sector(&self, cell_size_deg: f64, sector_cells: i32) -> (i32, i32) {
        grid::sector_at(self.lat, self.lng, cell_size_deg, sector_cells)
    }
}

/// The two static zone tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// Small single-species overrides, highest priority.
    pub legendary_zones: Vec<Zone>,
    /// Large area overrides, checked after legendary zones; first match wins.
    pub biome_regions: Vec<Zone>,
}

impl ZoneConfig {
    /// No zones at all, a pure noise world.
    pub fn empty() -> Self {
        Self {
            legendary_zones: Vec::new(),
            biome_regions: Vec::new(),
        }
    }
}

impl Default for ZoneConfig {
    /// The shipped demo world: metro Cebu landmarks.
    fn default() -> Self {
        Self {
            legendary_zones: vec![
                Zone {
                    name: "Lapu-Lapu Shrine".into(),
                    lat: 10.3105,
                    lng: 124.0153,
                    radius_m: 600.0,
                    forced_biome: Some(Biome::Water),
                    legendary_species: Some(149), // Dragonite
                    spawn_rate_bonus: Some(0.10),
                },
                Zone {
                    name: "Magellan's Cross".into(),
                    lat: 10.2936,
                    lng: 123.9018,
                    radius_m: 400.0,
                    forced_biome: Some(Biome::Urban),
                    legendary_species: Some(146), // Moltres
                    spawn_rate_bonus: Some(0.05),
                },
                Zone {
                    name: "Tops Lookout".into(),
                    lat: 10.3705,
                    lng: 123.8708,
                    radius_m: 800.0,
                    forced_biome: Some(Biome::Forest),
                    legendary_species: Some(144), // Articuno, high altitude
                    spawn_rate_bonus: Some(0.05),
                },
                Zone {
                    name: "SM Seaside".into(),
                    lat: 10.2820,
                    lng: 123.8814,
                    radius_m: 600.0,
                    forced_biome: Some(Biome::Urban),
                    legendary_species: Some(145), // Zapdos
                    spawn_rate_bonus: None,
                },
            ],
            biome_regions: vec![
                Zone {
                    name: "Cebu City Core".into(),
                    lat: 10.3157,
                    lng: 123.8854,
                    radius_m: 5_000.0,
                    forced_biome: Some(Biome::Urban),
                    legendary_species: None,
                    spawn_rate_bonus: None,
                },
                Zone {
                    name: "Mactan Island Center".into(),
                    lat: 10.2933,
                    lng: 123.9632,
                    radius_m: 4_000.0,
                    forced_biome: Some(Biome::Urban),
                    legendary_species: None,
                    spawn_rate_bonus: None,
                },
                Zone {
                    name: "Olango Island".into(),
                    lat: 10.2544,
                    lng: 124.0543,
                    radius_m: 3_000.0,
                    forced_biome: Some(Biome::Water), // marine sanctuary
                    legendary_species: None,
                    spawn_rate_bonus: None,
                },
            ],
        }
    }
}
