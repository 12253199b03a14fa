//! CRUD gateway to the trainer persistence API.

use reqwest::Client;
use tracing::{info, instrument};

use super::models::{Trainer, TrainerDraft};
use crate::core::error::Result;
use crate::core::http::{join_url, send_discard, send_json};

pub struct TrainerRepository {
    collection_url: String,
    http_client: Client,
}

impl TrainerRepository {
    /// `base_url` is the API root; trainers live under `/entrenadores`.
    pub fn new(base_url: &str, http_client: Client) -> Self {
        Self {
            collection_url: join_url(base_url, "entrenadores"),
            http_client,
        }
    }

    fn item_url(&self, id: &str) -> String {
        join_url(&self.collection_url, id)
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Trainer>> {
        send_json(self.http_client.get(&self.collection_url), "list_trainers").await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Trainer> {
        send_json(self.http_client.get(self.item_url(id)), "get_trainer").await
    }

    /// Validates `draft` and stores it as a new trainer.
    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: &TrainerDraft) -> Result<Trainer> {
        let body = draft.validate()?;
        let created: Trainer = send_json(
            self.http_client.post(&self.collection_url).json(&body),
            "create_trainer",
        )
        .await?;
        info!(id = ?created.id, "Trainer created");
        Ok(created)
    }

    /// Validates `draft` and replaces trainer `id` with it.
    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: &str, draft: &TrainerDraft) -> Result<Trainer> {
        let mut body = draft.validate()?;
        body.id = Some(id.to_string());
        send_json(
            self.http_client.put(self.item_url(id)).json(&body),
            "update_trainer",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        send_discard(self.http_client.delete(self.item_url(id)), "delete_trainer").await?;
        info!(id, "Trainer deleted");
        Ok(())
    }
}
