//! Filter selection as chosen in the browser.

use serde::{Deserialize, Serialize};

use super::generation::Generation;
use crate::core::catalog::TypeTag;

/// Generation, up to two type tags and optional free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub generation: Generation,
    pub type_a: Option<TypeTag>,
    pub type_b: Option<TypeTag>,
    pub free_text: Option<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_generation(mut self, generation: Generation) -> Self {
        self.generation = generation;
        self
    }

    /// Fills the first free type slot. Extra tags beyond two are ignored.
    #[must_use]
    pub fn with_type(mut self, tag: TypeTag) -> Self {
        if self.type_a.is_none() {
            self.type_a = Some(tag);
        } else if self.type_b.is_none() {
            self.type_b = Some(tag);
        }
        self
    }

    #[must_use]
    pub fn with_free_text(mut self, text: impl Into<String>) -> Self {
        self.free_text = Some(text.into());
        self
    }

    /// Clears the second slot when it repeats the first, and moves a lone
    /// second tag into the first slot.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.type_a.is_some() && self.type_a == self.type_b {
            self.type_b = None;
        }
        if self.type_a.is_none() {
            self.type_a = self.type_b.take();
        }
        self
    }

    /// Distinct active type tags, in slot order.
    pub fn type_tags(&self) -> Vec<&TypeTag> {
        let mut tags: Vec<&TypeTag> = self.type_a.iter().chain(self.type_b.iter()).collect();
        tags.dedup();
        tags
    }

    /// Trimmed, lowercased search text; `None` when blank.
    pub fn search_text(&self) -> Option<String> {
        self.free_text
            .as_deref()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
    }

    pub fn has_type_filter(&self) -> bool {
        self.type_a.is_some() || self.type_b.is_some()
    }

    pub fn has_generation_filter(&self) -> bool {
        !self.generation.is_all()
    }

    /// True when nothing narrows the list.
    pub fn is_empty(&self) -> bool {
        !self.has_type_filter() && !self.has_generation_filter() && self.search_text().is_none()
    }
}
