//! Trainer roster backed by the mock REST API.

mod models;
mod repository;

pub use models::{Trainer, TrainerDraft, DEFAULT_AGE, MAX_AGE, MIN_AGE};
pub use repository::TrainerRepository;
