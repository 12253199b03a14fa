//! Creature catalog: remote client, data types and type-membership cache.

mod client;
mod membership;
mod models;

pub use client::{CatalogEndpoints, CreatureCatalogClient};
#[cfg(test)]
pub use membership::MockMembershipSource;
pub use membership::{IdSet, MembershipSource, TypeMembershipCache};
pub use models::{
    extract_id, normalize_lookup_key, sprite_url, BaseStat, CreatureDetail, CreatureProfile,
    CreatureSummary, SpeciesInfo, SpriteIndex, Sprites, TypeSlot, TypeTag,
};
