//! Creature catalog data types.
//!
//! Raw wire records (`Raw*`) are deserialized leniently and turned into
//! domain values through explicit constructors that reject records missing
//! required fields.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::{CatalogError, Result};

// ============================================================================
// Lookup keys
// ============================================================================

/// Normalizes a creature name to the catalog's lookup key.
///
/// Trims, lowercases and joins inner whitespace runs with `-`
/// (`" Mr  Mime "` becomes `"mr-mime"`).
pub fn normalize_lookup_key(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Extracts the numeric id from the last non-empty `/` segment of `url`.
pub fn extract_id(url: &str) -> Result<u32> {
    url.split('/')
        .filter(|s| !s.is_empty())
        .last()
        .and_then(|segment| segment.parse::<u32>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| CatalogError::MalformedReference(url.to_string()))
}

// ============================================================================
// Type tags
// ============================================================================

/// Opaque type key as reported by the remote catalog (e.g. `fire`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTag(String);

impl TypeTag {
    /// Creates a tag, trimming and lowercasing. Blank input yields `None`.
    pub fn new(raw: &str) -> Option<Self> {
        let tag = raw.trim().to_lowercase();
        (!tag.is_empty()).then_some(Self(tag))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Summary
// ============================================================================

/// One entry of the browsable catalog list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureSummary {
    pub id: u32,
    pub name: String,
    pub image_url: String,
}

impl CreatureSummary {
    /// Builds a summary whose thumbnail is derived from `id`.
    pub fn new(id: u32, name: impl Into<String>, sprite_host: &str) -> Self {
        Self {
            id,
            name: name.into(),
            image_url: sprite_url(sprite_host, id),
        }
    }
}

/// Thumbnail URL for a creature id. No network round-trip involved.
pub fn sprite_url(sprite_host: &str, id: u32) -> String {
    format!("{}/{id}.png", sprite_host.trim_end_matches('/'))
}

// ============================================================================
// Detail & species
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    /// 1 for the primary type, 2 for the secondary.
    pub slot: u8,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStat {
    pub name: String,
    pub base_stat: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
    /// Higher quality "home" artwork, when the catalog has it.
    pub home_front_default: Option<String>,
    pub home_front_shiny: Option<String>,
}

impl Sprites {
    /// Best available front image, preferring the home artwork.
    pub fn best_front(&self) -> Option<&str> {
        self.home_front_default
            .as_deref()
            .or(self.front_default.as_deref())
    }
}

/// Full record for one creature, shown when the user picks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureDetail {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub types: Vec<TypeSlot>,
    pub stats: Vec<BaseStat>,
    pub sprites: Sprites,
}

impl CreatureDetail {
    /// Validates a raw detail record.
    pub fn from_raw(raw: RawDetail) -> Result<Self> {
        let id = raw
            .id
            .filter(|id| *id > 0)
            .ok_or_else(|| CatalogError::InvalidRecord("creature detail without id".into()))?;
        let name = raw
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| CatalogError::InvalidRecord(format!("creature {id} without name")))?;

        let mut types: Vec<TypeSlot> = raw
            .types
            .into_iter()
            .map(|t| TypeSlot {
                slot: t.slot,
                name: t.kind.name,
            })
            .collect();
        types.sort_by_key(|t| t.slot);

        let stats = raw
            .stats
            .into_iter()
            .map(|s| BaseStat {
                name: s.stat.name,
                base_stat: s.base_stat,
            })
            .collect();

        let sprites = raw.sprites.map(Sprites::from).unwrap_or_default();

        Ok(Self {
            id,
            name,
            height: raw.height.unwrap_or(0),
            weight: raw.weight.unwrap_or(0),
            types,
            stats,
            sprites,
        })
    }

    /// Primary (slot 1) type name.
    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(|t| t.name.as_str())
    }

    /// Style class for the info panel background.
    pub fn type_class(&self) -> String {
        match self.primary_type() {
            Some(t) => format!("tipo-{t}"),
            None => "tipo-default".to_string(),
        }
    }
}

/// Species information; only the generation is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesInfo {
    /// Catalog generation name, e.g. `generation-i`.
    pub generation: String,
}

impl SpeciesInfo {
    pub fn from_raw(raw: RawSpecies) -> Result<Self> {
        raw.generation
            .map(|g| Self {
                generation: g.name,
            })
            .ok_or_else(|| CatalogError::InvalidRecord("species without generation".into()))
    }
}

/// Detail and species loaded together for the detail panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureProfile {
    pub detail: CreatureDetail,
    pub species: SpeciesInfo,
}

// ============================================================================
// Sprite index
// ============================================================================

/// Name → thumbnail lookup built from the full list.
///
/// Used by the trainer roster to preview a trainer's favourite creature.
#[derive(Debug, Clone, Default)]
pub struct SpriteIndex {
    by_name: HashMap<String, String>,
}

impl SpriteIndex {
    pub fn from_summaries(list: &[CreatureSummary]) -> Self {
        let by_name = list
            .iter()
            .map(|c| (normalize_lookup_key(&c.name), c.image_url.clone()))
            .collect();
        Self { by_name }
    }

    /// Sprite for a free-form name, if the catalog knows it.
    pub fn sprite_for(&self, name: &str) -> Option<&str> {
        let key = normalize_lookup_key(name);
        if key.is_empty() {
            return None;
        }
        self.by_name.get(&key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

// ============================================================================
// Wire records
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct RawListPage {
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
pub struct RawTypeMember {
    pub pokemon: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct RawTypeDetail {
    #[serde(default)]
    pub pokemon: Vec<RawTypeMember>,
}

#[derive(Debug, Deserialize)]
pub struct RawTypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct RawStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawHomeSprites {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawOtherSprites {
    pub home: Option<RawHomeSprites>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSprites {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
    pub other: Option<RawOtherSprites>,
}

impl From<RawSprites> for Sprites {
    fn from(raw: RawSprites) -> Self {
        let home = raw.other.and_then(|o| o.home).unwrap_or_default();
        Self {
            front_default: raw.front_default,
            front_shiny: raw.front_shiny,
            home_front_default: home.front_default,
            home_front_shiny: home.front_shiny,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RawDetail {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub height: Option<u32>,
    pub weight: Option<u32>,
    #[serde(default)]
    pub types: Vec<RawTypeSlot>,
    #[serde(default)]
    pub stats: Vec<RawStat>,
    pub sprites: Option<RawSprites>,
}

#[derive(Debug, Deserialize)]
pub struct RawSpecies {
    pub generation: Option<NamedResource>,
}
