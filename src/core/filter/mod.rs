//! Catalog filtering: generation ranges, filter selection and the engine.

mod engine;
mod generation;
mod selection;

pub use engine::{CatalogFilterEngine, CreatureList};
pub use generation::{Generation, MAX_CATALOG_ID};
pub use selection::FilterSelection;
