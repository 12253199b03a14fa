//! Per-type membership memoization.
//!
//! A type's member list is assumed static for the lifetime of a session:
//! once a tag is resolved its id set is never refreshed or evicted.
//! Concurrent first requests for the same tag share a single in-flight
//! lookup. Failed lookups leave no entry behind.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

use super::models::TypeTag;
use crate::core::error::Result;

/// Ordered, shareable set of creature ids.
pub type IdSet = Arc<BTreeSet<u32>>;

/// Source of type membership lists.
///
/// Implemented by [`super::CreatureCatalogClient`]; mockable for tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipSource: Send + Sync {
    /// Ids of every creature tagged with `tag`.
    async fn fetch_type_members(&self, tag: &TypeTag) -> Result<Vec<u32>>;
}

/// Session-scoped `TypeTag → IdSet` cache.
pub struct TypeMembershipCache {
    source: Arc<dyn MembershipSource>,
    entries: Mutex<HashMap<TypeTag, Arc<OnceCell<IdSet>>>>,
}

impl TypeMembershipCache {
    pub fn new(source: Arc<dyn MembershipSource>) -> Self {
        Self {
            source,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Member ids for `tag`, hitting the source at most once per tag.
    pub async fn ids_for_type(&self, tag: &TypeTag) -> Result<IdSet> {
        let cell = {
            let mut entries = self.entries.lock().await;
            entries.entry(tag.clone()).or_default().clone()
        };

        let ids = cell
            .get_or_try_init(|| async {
                debug!(tag = %tag, "Type membership cache miss");
                let members = self.source.fetch_type_members(tag).await?;
                Ok::<_, crate::core::error::CatalogError>(Arc::new(
                    members.into_iter().collect::<BTreeSet<u32>>(),
                ))
            })
            .await?;

        Ok(Arc::clone(ids))
    }

    /// Tags whose membership has been resolved so far.
    pub async fn cached_tags(&self) -> Vec<TypeTag> {
        let entries = self.entries.lock().await;
        let mut tags: Vec<TypeTag> = entries
            .iter()
            .filter(|(_, cell)| cell.initialized())
            .map(|(tag, _)| tag.clone())
            .collect();
        tags.sort();
        tags
    }

    /// Number of resolved tags.
    pub async fn len(&self) -> usize {
        self.cached_tags().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
