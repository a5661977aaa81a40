//! # sasakit
//!
//! Solvent accessible surface area (SASA) of molecular structures.
//!
//! ## Architecture
//!
//! The library is split into three layers:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`,
//!   `Atom`), atomic classifiers that assign radii and polarity, and PDB
//!   reading.
//!
//! - **[`engine`]: The Calculation.** Neighbor search and the Lee-Richards
//!   and Shrake-Rupley algorithms. A `SasaResult` borrows the `Structure` it
//!   was computed from, so results never outlive their structure.
//!
//! - **[`workflows`]: The Public API.** One call per input file, from path
//!   to a classified area report.

pub mod core;
pub mod engine;
pub mod workflows;
