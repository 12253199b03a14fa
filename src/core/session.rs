//! One application session: every client and cache, built from config.
//!
//! The type-membership cache and the resident model catalog live as long
//! as the session and are never invalidated; start a new session to get
//! fresh data.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::core::catalog::{CatalogEndpoints, CreatureCatalogClient, TypeMembershipCache};
use crate::core::error::Result;
use crate::core::filter::CatalogFilterEngine;
use crate::core::http::build_client;
use crate::core::models3d::ModelCatalogClient;
use crate::core::pokedex::{ListWindow, PokedexView};
use crate::core::trainers::TrainerRepository;

pub struct Session {
    catalog: Arc<CreatureCatalogClient>,
    membership: Arc<TypeMembershipCache>,
    engine: Arc<CatalogFilterEngine>,
    models: Arc<ModelCatalogClient>,
    trainers: TrainerRepository,
    pokedex: PokedexView,
}

impl Session {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let http_client = build_client(config.api.timeout())?;

        let catalog = Arc::new(CreatureCatalogClient::new(
            CatalogEndpoints {
                base_url: config.api.catalog_url.clone(),
                sprite_host: config.api.sprite_host.clone(),
            },
            http_client.clone(),
        ));
        let membership = Arc::new(TypeMembershipCache::new(catalog.clone()));
        let engine = Arc::new(CatalogFilterEngine::new(Arc::clone(&membership)));
        let models = Arc::new(ModelCatalogClient::new(
            config.api.models_url.clone(),
            http_client.clone(),
        ));
        let trainers = TrainerRepository::new(&config.api.trainers_url, http_client);

        let pokedex = PokedexView::new(
            Arc::clone(&catalog),
            Arc::clone(&engine),
            Arc::clone(&models),
            ListWindow {
                limit: config.catalog.list_limit,
                offset: config.catalog.list_offset,
            },
        );

        Ok(Self {
            catalog,
            membership,
            engine,
            models,
            trainers,
            pokedex,
        })
    }

    pub fn catalog(&self) -> &CreatureCatalogClient {
        &self.catalog
    }

    pub fn membership(&self) -> &TypeMembershipCache {
        &self.membership
    }

    pub fn engine(&self) -> &CatalogFilterEngine {
        &self.engine
    }

    pub fn models(&self) -> &ModelCatalogClient {
        &self.models
    }

    pub fn trainers(&self) -> &TrainerRepository {
        &self.trainers
    }

    pub fn pokedex(&self) -> &PokedexView {
        &self.pokedex
    }
}
