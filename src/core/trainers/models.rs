//! Trainer records as stored by the mock persistence API.
//!
//! The JSON field names are the API's (`nombre`, `apellidos`, ...); the Rust
//! side uses English names.

use serde::{Deserialize, Serialize};

use crate::core::catalog::normalize_lookup_key;
use crate::core::error::{CatalogError, Result};

pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 120;

/// Age a new draft starts with.
pub const DEFAULT_AGE: u32 = 10;

/// A stored trainer. `id` is assigned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trainer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellidos")]
    pub last_name: String,
    #[serde(rename = "edad")]
    pub age: u32,
    pub region: String,
    #[serde(rename = "pokemonFavorito")]
    pub favorite_pokemon: String,
    #[serde(default)]
    pub avatar: String,
}

impl Trainer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Form contents for creating or editing a trainer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerDraft {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub region: String,
    pub favorite_pokemon: String,
    pub avatar: String,
}

impl Default for TrainerDraft {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            age: DEFAULT_AGE,
            region: String::new(),
            favorite_pokemon: String::new(),
            avatar: String::new(),
        }
    }
}

impl From<&Trainer> for TrainerDraft {
    fn from(trainer: &Trainer) -> Self {
        Self {
            first_name: trainer.first_name.clone(),
            last_name: trainer.last_name.clone(),
            age: trainer.age,
            region: trainer.region.clone(),
            favorite_pokemon: normalize_lookup_key(&trainer.favorite_pokemon),
            avatar: trainer.avatar.clone(),
        }
    }
}

impl TrainerDraft {
    /// Checks required fields and produces the record to send.
    ///
    /// The favourite is normalized so it matches catalog names.
    pub fn validate(&self) -> Result<Trainer> {
        let required = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("region", &self.region),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(CatalogError::InvalidRecord(format!("{field} is required")));
        }
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(CatalogError::InvalidRecord(format!(
                "age must be between {MIN_AGE} and {MAX_AGE}, got {}",
                self.age
            )));
        }

        Ok(Trainer {
            id: None,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            age: self.age,
            region: self.region.trim().to_string(),
            favorite_pokemon: normalize_lookup_key(&self.favorite_pokemon),
            avatar: self.avatar.trim().to_string(),
        })
    }
}
