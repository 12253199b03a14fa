//! 3D model catalog client.
//!
//! The remote API only offers one bulk endpoint, so the whole catalog is
//! downloaded once and kept resident; every lookup after that is local.

use std::sync::Arc;

use reqwest::Client;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use super::models::{ModelCatalog, ModelVariantSet, RawModelCatalog};
use crate::core::error::Result;
use crate::core::http::{get_json, join_url};

pub struct ModelCatalogClient {
    base_url: String,
    http_client: Client,
    resident: OnceCell<Arc<ModelCatalog>>,
}

impl ModelCatalogClient {
    /// `base_url` is the API root, e.g. `https://pokemon-3d-api.onrender.com/v1`.
    pub fn new(base_url: impl Into<String>, http_client: Client) -> Self {
        Self {
            base_url: base_url.into(),
            http_client,
            resident: OnceCell::new(),
        }
    }

    /// Variant set for `creature_id`, or `None` when the catalog has no
    /// model for it.
    ///
    /// The first caller triggers the bulk download; concurrent callers wait
    /// on that same download. A failed download is not remembered, so the
    /// next call tries again.
    #[instrument(skip(self))]
    pub async fn resolve(&self, creature_id: u32) -> Result<Option<ModelVariantSet>> {
        let catalog = self.catalog().await?;
        let found = catalog.get(creature_id).cloned();
        if found.is_none() {
            debug!(creature_id, "No 3D model for creature");
        }
        Ok(found)
    }

    /// The resident catalog, downloading it on first use.
    pub async fn catalog(&self) -> Result<Arc<ModelCatalog>> {
        let catalog = self
            .resident
            .get_or_try_init(|| async {
                let url = join_url(&self.base_url, "pokemon");
                let raw: RawModelCatalog =
                    get_json(&self.http_client, &url, "fetch_model_catalog").await?;
                let catalog = ModelCatalog::from_raw(raw);
                info!(entries = catalog.len(), "Model catalog loaded");
                Ok::<_, crate::core::error::CatalogError>(Arc::new(catalog))
            })
            .await?;
        Ok(Arc::clone(catalog))
    }

    pub fn is_loaded(&self) -> bool {
        self.resident.initialized()
    }
}
