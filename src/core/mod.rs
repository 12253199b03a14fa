//! Catalog core: remote clients, filtering, browsing state and the ambient
//! error, HTTP and logging plumbing they share.

pub mod error;
pub mod http;
pub mod logging;

// Remote data sources
pub mod catalog;
pub mod models3d;
pub mod trainers;

// Filtering and browsing state
pub mod filter;
pub mod pokedex;

pub mod session;

pub use error::{CatalogError, Result};
