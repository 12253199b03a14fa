//! Pokédex browsing state.
//!
//! [`PokedexView`] owns what the browser shows: the full list, the visible
//! (filtered) list, the picked creature's profile and 3D variant, loading
//! flags and inline error messages. A failed operation sets its message and
//! leaves previously displayed data in place.
//!
//! Filter results are published atomically. Every filter run takes a
//! ticket from a monotonically increasing epoch; a run whose ticket is no
//! longer the latest when it finishes is discarded, so a slow, superseded
//! filter can never overwrite a newer one. Profile and 3D model loads use
//! their own tickets the same way.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::core::catalog::{
    CreatureCatalogClient, CreatureProfile, CreatureSummary, SpriteIndex, TypeTag,
};
use crate::core::error::Result;
use crate::core::filter::{CatalogFilterEngine, CreatureList, FilterSelection};
use crate::core::models3d::{ModelCatalogClient, VariantSelection};

pub const MSG_LIST_FAILED: &str = "Could not load the creature list.";
pub const MSG_FILTER_FAILED: &str = "Failed to apply type filters.";
pub const MSG_DETAIL_FAILED: &str = "Could not load creature data.";
pub const MSG_NO_MODEL: &str = "No 3D model available for this creature.";
pub const MSG_MODEL_FAILED: &str = "Failed to load the 3D model.";
pub const MSG_SELECT_FIRST: &str = "Select a creature first.";

/// How a filter run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// The result is now the visible list.
    Applied,
    /// A newer filter started meanwhile; the result was dropped.
    Superseded,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingFlags {
    pub list: bool,
    pub types: bool,
    pub filtering: bool,
    pub detail: bool,
    pub model: bool,
}

/// Snapshot of everything the browser renders.
#[derive(Debug, Clone, Default)]
pub struct PokedexState {
    pub full_list: CreatureList,
    pub visible: CreatureList,
    pub types: Vec<TypeTag>,
    pub selection: FilterSelection,
    pub selected_id: Option<u32>,
    pub profile: Option<CreatureProfile>,
    pub variant: Option<VariantSelection>,
    pub error: Option<String>,
    pub model_error: Option<String>,
    pub loading: LoadingFlags,
}

/// List page size used by [`PokedexView::load_catalog`].
#[derive(Debug, Clone, Copy)]
pub struct ListWindow {
    pub limit: u32,
    pub offset: u32,
}

impl Default for ListWindow {
    fn default() -> Self {
        Self {
            limit: 1025,
            offset: 0,
        }
    }
}

pub struct PokedexView {
    catalog: Arc<CreatureCatalogClient>,
    engine: Arc<CatalogFilterEngine>,
    models: Arc<ModelCatalogClient>,
    window: ListWindow,
    state: RwLock<PokedexState>,
    filter_epoch: AtomicU64,
    profile_epoch: AtomicU64,
    model_epoch: AtomicU64,
}

impl PokedexView {
    pub fn new(
        catalog: Arc<CreatureCatalogClient>,
        engine: Arc<CatalogFilterEngine>,
        models: Arc<ModelCatalogClient>,
        window: ListWindow,
    ) -> Self {
        Self {
            catalog,
            engine,
            models,
            window,
            state: RwLock::new(PokedexState::default()),
            filter_epoch: AtomicU64::new(0),
            profile_epoch: AtomicU64::new(0),
            model_epoch: AtomicU64::new(0),
        }
    }

    pub async fn snapshot(&self) -> PokedexState {
        self.state.read().await.clone()
    }

    pub async fn visible(&self) -> CreatureList {
        Arc::clone(&self.state.read().await.visible)
    }

    // ------------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------------

    /// Fetches the full list and shows it unfiltered.
    pub async fn load_catalog(&self) -> Result<CreatureList> {
        {
            let mut state = self.state.write().await;
            state.loading.list = true;
            state.error = None;
        }

        let result = self
            .catalog
            .fetch_all(self.window.limit, self.window.offset)
            .await;

        match result {
            Ok(list) => Ok(self.install_list(list).await),
            Err(e) => {
                warn!(error = %e, "Creature list load failed");
                let mut state = self.state.write().await;
                state.loading.list = false;
                state.error = Some(MSG_LIST_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Replaces the full list and resets the visible list to it.
    pub async fn install_list(&self, list: Vec<CreatureSummary>) -> CreatureList {
        let list = Arc::new(list);
        let mut state = self.state.write().await;
        state.full_list = Arc::clone(&list);
        state.visible = Arc::clone(&list);
        state.loading.list = false;
        list
    }

    /// Loads the type tags offered by the filter selectors. On failure the
    /// selectors are left empty.
    pub async fn load_types(&self) -> Vec<TypeTag> {
        self.state.write().await.loading.types = true;
        let types = match self.catalog.fetch_type_tags().await {
            Ok(types) => types,
            Err(e) => {
                warn!(error = %e, "Type list load failed");
                Vec::new()
            }
        };
        let mut state = self.state.write().await;
        state.types = types.clone();
        state.loading.types = false;
        types
    }

    pub async fn sprite_index(&self) -> SpriteIndex {
        SpriteIndex::from_summaries(&self.state.read().await.full_list)
    }

    // ------------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------------

    /// Runs the filter engine and publishes the result unless a newer run
    /// started in the meantime.
    ///
    /// Picking new filters clears the current pick and its 3D state but
    /// keeps the displayed profile.
    pub async fn apply_filters(&self, selection: FilterSelection) -> Result<FilterOutcome> {
        let selection = selection.normalized();
        let ticket = next_ticket(&self.filter_epoch);
        // A model load still in flight belongs to the pick being cleared.
        next_ticket(&self.model_epoch);

        let full_list = {
            let mut state = self.state.write().await;
            state.selection = selection.clone();
            state.error = None;
            state.selected_id = None;
            state.variant = None;
            state.model_error = None;
            state.loading.model = false;
            state.loading.filtering = true;
            Arc::clone(&state.full_list)
        };

        let result = self.engine.apply_filters(&full_list, &selection).await;

        let mut state = self.state.write().await;
        if self.filter_epoch.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "Discarding superseded filter result");
            return Ok(FilterOutcome::Superseded);
        }

        state.loading.filtering = false;
        match result {
            Ok(visible) => {
                state.visible = visible;
                Ok(FilterOutcome::Applied)
            }
            Err(e) => {
                warn!(error = %e, "Filter failed; keeping previous list");
                state.error = Some(MSG_FILTER_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Resets every filter and shows the full list again.
    pub async fn clear_filters(&self) -> Result<FilterOutcome> {
        self.apply_filters(FilterSelection::default()).await
    }

    // ------------------------------------------------------------------------
    // Selection, profile and 3D model
    // ------------------------------------------------------------------------

    /// Picks a creature from the visible list without loading anything.
    /// Returns `false` for ids that are not in the list.
    pub async fn select(&self, id: u32) -> bool {
        let mut state = self.state.write().await;
        if id == 0 || !state.visible.iter().any(|c| c.id == id) {
            return false;
        }
        state.selected_id = Some(id);
        state.error = None;
        true
    }

    /// Loads the picked creature's profile and 3D model side by side. Each
    /// half reports its own failure.
    pub async fn show_selected(&self) {
        let selected = self.state.read().await.selected_id;
        let Some(id) = selected else {
            let mut state = self.state.write().await;
            state.error = Some(MSG_SELECT_FIRST.to_string());
            state.model_error = Some(MSG_SELECT_FIRST.to_string());
            return;
        };

        tokio::join!(self.load_profile(id), self.load_model(id));
    }

    /// Loads detail and species for `id`, clearing the stale profile first.
    /// A load overtaken by a newer one leaves the state alone.
    pub async fn load_profile(&self, id: u32) {
        let ticket = next_ticket(&self.profile_epoch);
        {
            let mut state = self.state.write().await;
            state.loading.detail = true;
            state.error = None;
            state.profile = None;
        }

        let result = self.catalog.fetch_profile(id).await;

        let mut state = self.state.write().await;
        if self.profile_epoch.load(Ordering::SeqCst) != ticket {
            debug!(id, ticket, "Discarding superseded profile");
            return;
        }
        state.loading.detail = false;
        match result {
            Ok(profile) => state.profile = Some(profile),
            Err(e) => {
                warn!(id, error = %e, "Profile load failed");
                state.error = Some(MSG_DETAIL_FAILED.to_string());
            }
        }
    }

    /// Resolves the 3D variants for `id` and shows the preferred one.
    /// A load overtaken by a newer one or by a filter change is dropped.
    pub async fn load_model(&self, id: u32) {
        let ticket = next_ticket(&self.model_epoch);
        {
            let mut state = self.state.write().await;
            state.loading.model = true;
            state.model_error = None;
            state.variant = None;
        }

        let result = self.models.resolve(id).await;

        let mut state = self.state.write().await;
        if self.model_epoch.load(Ordering::SeqCst) != ticket {
            debug!(id, ticket, "Discarding superseded 3D model");
            return;
        }
        state.loading.model = false;
        match result {
            Ok(Some(set)) => state.variant = Some(VariantSelection::new(set)),
            Ok(None) => state.model_error = Some(MSG_NO_MODEL.to_string()),
            Err(e) => {
                warn!(id, error = %e, "3D model load failed");
                state.model_error = Some(MSG_MODEL_FAILED.to_string());
            }
        }
    }

    /// Switches the displayed 3D variant. Unknown names are ignored.
    pub async fn switch_variant(&self, name: &str) -> bool {
        match self.state.write().await.variant.as_mut() {
            Some(variant) => variant.switch_to(name),
            None => false,
        }
    }
}

fn next_ticket(epoch: &AtomicU64) -> u64 {
    epoch.fetch_add(1, Ordering::SeqCst) + 1
}
