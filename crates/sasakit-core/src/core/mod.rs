//! # Core Module
//!
//! The stateless building blocks of the library: the structure model, the
//! atomic classifiers that assign radii and polarity, and reading of
//! structure files.
//!
//! - **Molecular Representation** ([`models`]) - atoms and structures
//! - **Classification** ([`classifier`]) - ProtOr and TOML-defined radii sets
//! - **File I/O** ([`io`]) - PDB reading with configurable atom filtering
//! - **Utilities** ([`utils`]) - sphere sampling and atom name helpers

pub mod classifier;
pub mod io;
pub mod models;
pub mod utils;
