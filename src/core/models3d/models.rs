//! 3D model catalog types.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Variant preferred as the initial display choice.
pub const PREFERRED_VARIANT: &str = "regular";

/// A named alternate 3D representation (shiny, mega, regional...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelVariant {
    /// Unique within its owning set, e.g. `regular` or `shiny`.
    pub variant_name: String,
    /// Location of the model asset (usually a `.glb` URL).
    pub model_asset_ref: String,
    pub display_name: Option<String>,
}

/// Every variant known for one creature. Never empty; only
/// [`ModelVariantSet::new`] builds one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelVariantSet {
    creature_id: u32,
    variants: Vec<ModelVariant>,
}

impl ModelVariantSet {
    /// Builds a set, dropping repeated variant names. `None` if empty.
    pub fn new(creature_id: u32, variants: Vec<ModelVariant>) -> Option<Self> {
        let mut seen = HashSet::new();
        let variants: Vec<ModelVariant> = variants
            .into_iter()
            .filter(|v| seen.insert(v.variant_name.clone()))
            .collect();
        (!variants.is_empty()).then_some(Self {
            creature_id,
            variants,
        })
    }

    pub fn creature_id(&self) -> u32 {
        self.creature_id
    }

    pub fn variants(&self) -> &[ModelVariant] {
        &self.variants
    }

    /// `regular` if present, otherwise the first variant.
    pub fn preferred(&self) -> &ModelVariant {
        self.variant(PREFERRED_VARIANT)
            .unwrap_or(&self.variants[0])
    }

    pub fn variant(&self, name: &str) -> Option<&ModelVariant> {
        self.variants.iter().find(|v| v.variant_name == name)
    }

    pub fn variant_names(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|v| v.variant_name.as_str())
    }
}

/// Which variant of a resolved set is on display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSelection {
    set: ModelVariantSet,
    selected: usize,
}

impl VariantSelection {
    /// Starts on the preferred variant.
    pub fn new(set: ModelVariantSet) -> Self {
        let selected = set
            .variants
            .iter()
            .position(|v| v.variant_name == PREFERRED_VARIANT)
            .unwrap_or(0);
        Self { set, selected }
    }

    pub fn current(&self) -> &ModelVariant {
        &self.set.variants[self.selected]
    }

    pub fn set(&self) -> &ModelVariantSet {
        &self.set
    }

    /// Switches to `name`. Unknown names leave the selection unchanged and
    /// return `false`.
    pub fn switch_to(&mut self, name: &str) -> bool {
        match self.set.variants.iter().position(|v| v.variant_name == name) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }
}

/// Resident copy of the whole model catalog, indexed by creature id.
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    by_id: HashMap<u32, ModelVariantSet>,
}

impl ModelCatalog {
    pub fn from_raw(raw: RawModelCatalog) -> Self {
        let mut by_id = HashMap::new();
        for value in raw.into_entries() {
            let entry = match serde_json::from_value::<RawModelEntry>(value) {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(error = %e, "Skipping malformed model entry");
                    continue;
                }
            };
            let Some(id) = entry.id.as_ref().and_then(parse_id) else {
                debug!("Skipping model entry without usable id");
                continue;
            };
            if by_id.contains_key(&id) {
                continue;
            }
            let variants = entry
                .forms
                .into_iter()
                .filter_map(|form| match serde_json::from_value::<RawForm>(form) {
                    Ok(form) => form.into_variant(),
                    Err(e) => {
                        debug!(id, error = %e, "Skipping malformed model form");
                        None
                    }
                })
                .collect();
            if let Some(set) = ModelVariantSet::new(id, variants) {
                by_id.insert(id, set);
            }
        }
        Self { by_id }
    }

    pub fn get(&self, creature_id: u32) -> Option<&ModelVariantSet> {
        self.by_id.get(&creature_id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn parse_id(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ============================================================================
// Wire records
// ============================================================================

/// The bulk endpoint answers with either a bare array or `{pokemon: [...]}`.
///
/// Entries stay untyped here so one malformed record cannot reject the
/// whole payload; [`ModelCatalog::from_raw`] parses them one by one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawModelCatalog {
    Bare(Vec<Value>),
    Wrapped {
        #[serde(default)]
        pokemon: Vec<Value>,
    },
}

impl RawModelCatalog {
    fn into_entries(self) -> Vec<Value> {
        match self {
            Self::Bare(entries) | Self::Wrapped { pokemon: entries } => entries,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RawModelEntry {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub forms: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawForm {
    pub name: Option<String>,
    pub model: Option<String>,
    pub form_name: Option<String>,
}

impl RawForm {
    fn into_variant(self) -> Option<ModelVariant> {
        let model_asset_ref = self.model.filter(|m| !m.is_empty())?;
        let variant_name = self
            .form_name
            .or_else(|| self.name.clone())
            .filter(|n| !n.is_empty())?;
        Some(ModelVariant {
            variant_name,
            model_asset_ref,
            display_name: self.name,
        })
    }
}
