//! Creature catalog HTTP client.
//!
//! Wraps the public creature-data API. Every method issues one request
//! (the profile issues two, concurrently) and maps the response into the
//! types in [`super::models`].

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use super::membership::MembershipSource;
use super::models::{
    extract_id, normalize_lookup_key, CreatureDetail, CreatureProfile, CreatureSummary,
    RawDetail, RawListPage, RawSpecies, RawTypeDetail, SpeciesInfo, TypeTag,
};
use crate::core::error::Result;
use crate::core::http::{get_json, join_url};

/// Catalog API locations.
#[derive(Debug, Clone)]
pub struct CatalogEndpoints {
    /// API root, e.g. `https://pokeapi.co/api/v2`.
    pub base_url: String,
    /// Directory holding `{id}.png` thumbnails.
    pub sprite_host: String,
}

/// Client for the remote creature catalog.
#[derive(Clone)]
pub struct CreatureCatalogClient {
    endpoints: CatalogEndpoints,
    http_client: Client,
}

impl CreatureCatalogClient {
    pub fn new(endpoints: CatalogEndpoints, http_client: Client) -> Self {
        Self {
            endpoints,
            http_client,
        }
    }

    pub fn endpoints(&self) -> &CatalogEndpoints {
        &self.endpoints
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.endpoints.base_url, path)
    }

    /// Fetches one page of the creature list, sorted ascending by id.
    ///
    /// Entries whose URL carries no numeric id are dropped.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self, limit: u32, offset: u32) -> Result<Vec<CreatureSummary>> {
        let url = self.url(&format!("pokemon?limit={limit}&offset={offset}"));
        let page: RawListPage = get_json(&self.http_client, &url, "fetch_all").await?;

        let mut list: Vec<CreatureSummary> = page
            .results
            .into_iter()
            .filter_map(|entry| match extract_id(&entry.url) {
                Ok(id) => Some(CreatureSummary::new(
                    id,
                    entry.name,
                    &self.endpoints.sprite_host,
                )),
                Err(e) => {
                    warn!(name = %entry.name, error = %e, "Dropping catalog entry");
                    None
                }
            })
            .collect();
        list.sort_by_key(|c| c.id);

        info!(count = list.len(), "Loaded creature list");
        Ok(list)
    }

    /// Fetches the detail record by id or name.
    #[instrument(skip(self))]
    pub async fn fetch_detail(&self, id_or_name: &str) -> Result<CreatureDetail> {
        let url = self.url(&format!("pokemon/{}", normalize_lookup_key(id_or_name)));
        let raw: RawDetail = get_json(&self.http_client, &url, "fetch_detail").await?;
        CreatureDetail::from_raw(raw)
    }

    /// Fetches species information by id or name.
    #[instrument(skip(self))]
    pub async fn fetch_species(&self, id_or_name: &str) -> Result<SpeciesInfo> {
        let url = self.url(&format!(
            "pokemon-species/{}",
            normalize_lookup_key(id_or_name)
        ));
        let raw: RawSpecies = get_json(&self.http_client, &url, "fetch_species").await?;
        SpeciesInfo::from_raw(raw)
    }

    /// Detail and species together; fails if either request fails.
    pub async fn fetch_profile(&self, id: u32) -> Result<CreatureProfile> {
        let key = id.to_string();
        let (detail, species) = tokio::try_join!(self.fetch_detail(&key), self.fetch_species(&key))?;
        Ok(CreatureProfile { detail, species })
    }

    /// Every type tag the catalog currently reports, sorted.
    #[instrument(skip(self))]
    pub async fn fetch_type_tags(&self) -> Result<Vec<TypeTag>> {
        let page: RawListPage =
            get_json(&self.http_client, &self.url("type"), "fetch_type_tags").await?;
        let mut tags: Vec<TypeTag> = page
            .results
            .iter()
            .filter_map(|t| TypeTag::new(&t.name))
            .collect();
        tags.sort();
        tags.dedup();
        Ok(tags)
    }
}

#[async_trait]
impl MembershipSource for CreatureCatalogClient {
    #[instrument(skip(self), fields(tag = %tag))]
    async fn fetch_type_members(&self, tag: &TypeTag) -> Result<Vec<u32>> {
        let url = self.url(&format!("type/{tag}"));
        let detail: RawTypeDetail =
            get_json(&self.http_client, &url, "fetch_type_members").await?;

        let ids: Vec<u32> = detail
            .pokemon
            .iter()
            .filter_map(|member| extract_id(&member.pokemon.url).ok())
            .collect();

        debug!(count = ids.len(), "Resolved type members");
        Ok(ids)
    }
}
