//! Crate test suite.
//!
//! - `mocks`: hand-written membership source with call counting and gates
//! - `common`: fixtures shared by the other modules
//! - `unit`: filter engine and Pokédex view behaviour against mocks
//! - `integration`: HTTP clients against a local `wiremock` server
//! - `property`: proptest invariants of the filter engine
