//! 3D model catalog: resident bulk catalog and variant selection.

mod client;
mod models;

pub use client::ModelCatalogClient;
pub use models::{
    ModelCatalog, ModelVariant, ModelVariantSet, VariantSelection, PREFERRED_VARIANT,
};
