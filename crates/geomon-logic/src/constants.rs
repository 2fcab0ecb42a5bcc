//! Species catalog constants: id sets and default per-biome spawn lists.
//!
//! These are game-balance data, not algorithm: [`crate::species`] copies the
//! lists into its config defaults so deployments can tune them without
//! touching the selector.

/// Total species in the full catalog; wildcard draws span `1..=CATALOG_SIZE`.
pub const CATALOG_SIZE: u16 = 1025;

/// Species substituted when a biome's curated list is empty.
pub const FALLBACK_SPECIES: u16 = 19;

/// Default curated spawn lists per terrain biome (Gen-1 flavor).
pub mod biome_lists {
    /// Squirtle, Psyduck, Poliwag, Tentacool, Slowpoke, Seel line...
    pub const WATER: &[u16] = &[7, 54, 60, 72, 79, 86, 90, 98, 116, 118, 120, 129, 131];
    /// Bulbasaur, the bug lines, Oddish, Bellsprout, Scyther, Pinsir.
    pub const FOREST: &[u16] = &[1, 10, 11, 13, 14, 43, 46, 48, 69, 123, 127];
    /// Pidgey, Rattata, the Nidoran pair, Pikachu, Jigglypuff.
    pub const GRASS: &[u16] = &[16, 19, 21, 29, 32, 25, 39, 43, 69];
    /// Rattata, Meowth, Growlithe, Magnemite, Grimer, Eevee, Snorlax...
    pub const URBAN: &[u16] = &[19, 52, 58, 74, 81, 88, 100, 109, 133, 137, 143];
    /// Spearow, Ekans, Vulpix, Growlithe, Ponyta, Tauros, Tangela.
    pub const RURAL: &[u16] = &[21, 23, 37, 58, 77, 128, 114];
}

/// Species callers highlight as rare: starters, Pikachu, Eevee, Snorlax,
/// the Dratini line, Mewtwo, Mew.
pub const RARE_SPECIES: &[u16] = &[1, 4, 7, 25, 133, 143, 147, 148, 149, 150, 151];

/// Legendary species: the bird trio, Mewtwo, Mew.
pub const LEGENDARY_SPECIES: &[u16] = &[144, 145, 146, 150, 151];

/// Whether callers should treat a species as rare.
pub fn is_rare_species(id: u16) -> bool {
    RARE_SPECIES.contains(&id)
}

/// Whether a species id belongs to the legendary set.
pub fn is_legendary_species(id: u16) -> bool {
    LEGENDARY_SPECIES.contains(&id)
}
