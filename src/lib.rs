/// PokéMundo - Pokédex catalog client
///
/// Core library providing catalog browsing with generation/type filtering,
/// 3D model lookup and a trainer roster backed by a REST API.

pub mod config;
pub mod core;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
