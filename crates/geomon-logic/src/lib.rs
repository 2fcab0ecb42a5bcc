//! Pure world-spawning logic for Geomon.
//!
//! This crate contains all world-generation logic that is independent of any
//! client, network, or stored state. Functions take plain data and return
//! results, making them unit-testable and portable across mobile clients,
//! native CLI tools, and any future backend.
//!
//! Determinism is the contract: the world is a pure function of position,
//! the wall-clock hour and the configuration, so two devices standing at the
//! same place in the same hour see the same creatures with no server and no
//! saved spawn state. Everything rolls over on the hour.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`biome`] | Terrain classification from layered hash noise and zones |
//! | [`config`] | Tuning knobs: grid geometry, budgets, noise thresholds |
//! | [`constants`] | Catalog bounds, curated species lists, rarity predicates |
//! | [`geo`] | Haversine and planar distances in meters |
//! | [`grid`] | Cell/sector indexing, sub-cell centers, hour buckets |
//! | [`hash`] | Deterministic coordinate hash (the only randomness source) |
//! | [`query`] | Visible-spawn queries, distance sort, movement throttle |
//! | [`spawn`] | Per-sector spawn generation and legendary zone spawns |
//! | [`species`] | Wildcard and curated-list species selection per biome |
//! | [`validate`] | Authoring-time configuration checks |
//! | [`zones`] | Legendary zone and biome region tables |

pub mod biome;
pub mod config;
pub mod constants;
pub mod geo;
pub mod grid;
pub mod hash;
pub mod query;
pub mod spawn;
pub mod species;
pub mod validate;
pub mod zones;
