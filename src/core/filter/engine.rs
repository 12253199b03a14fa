//! Catalog filter engine.
//!
//! Filters are evaluated from cheapest to most expensive:
//!
//! 1. nothing selected: the full list is returned as-is
//! 2. generation only: local id-range filter
//! 3. one or two type tags: concurrent membership lookups, intersected,
//!    then narrowed by generation
//!
//! Free text narrows the outcome by name last. The output always preserves
//! the input's ascending-id order.

use std::collections::BTreeSet;
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, instrument};

use super::selection::FilterSelection;
use crate::core::catalog::{CreatureSummary, IdSet, TypeMembershipCache};
use crate::core::error::{CatalogError, Result};

/// Shared, immutable creature list.
pub type CreatureList = Arc<Vec<CreatureSummary>>;

pub struct CatalogFilterEngine {
    membership: Arc<TypeMembershipCache>,
}

impl CatalogFilterEngine {
    pub fn new(membership: Arc<TypeMembershipCache>) -> Self {
        Self { membership }
    }

    pub fn membership(&self) -> &Arc<TypeMembershipCache> {
        &self.membership
    }

    /// Visible subset of `full_list` for `selection`.
    ///
    /// A repeated type tag is collapsed before evaluation. If any membership
    /// lookup fails the whole operation fails with
    /// [`CatalogError::FilterQuery`].
    #[instrument(skip(self, full_list), fields(total = full_list.len()))]
    pub async fn apply_filters(
        &self,
        full_list: &CreatureList,
        selection: &FilterSelection,
    ) -> Result<CreatureList> {
        let selection = selection.clone().normalized();

        if selection.is_empty() {
            return Ok(Arc::clone(full_list));
        }

        let generation = selection.generation;
        let mut visible: Vec<CreatureSummary> = if selection.has_type_filter() {
            let mut ids = self.type_ids(&selection).await?;
            if selection.has_generation_filter() {
                ids.retain(|id| generation.contains(*id));
            }
            full_list
                .iter()
                .filter(|c| ids.contains(&c.id))
                .cloned()
                .collect()
        } else if selection.has_generation_filter() {
            full_list
                .iter()
                .filter(|c| generation.contains(c.id))
                .cloned()
                .collect()
        } else {
            full_list.as_ref().clone()
        };

        if let Some(text) = selection.search_text() {
            visible.retain(|c| c.name.to_lowercase().contains(&text));
        }

        debug!(visible = visible.len(), "Filters applied");
        Ok(Arc::new(visible))
    }

    /// Ids matching every selected type. Lookups run concurrently and the
    /// intersection waits for all of them.
    async fn type_ids(&self, selection: &FilterSelection) -> Result<BTreeSet<u32>> {
        let lookups = selection.type_tags().into_iter().map(|tag| async move {
            self.membership
                .ids_for_type(tag)
                .await
                .map_err(|e| CatalogError::filter_query(tag.as_str(), e))
        });
        let sets: Vec<IdSet> = try_join_all(lookups).await?;

        let mut sets = sets.into_iter();
        let first = sets.next().map(|s| s.as_ref().clone()).unwrap_or_default();
        Ok(sets.fold(first, |acc, next| {
            acc.intersection(next.as_ref()).copied().collect()
        }))
    }
}
