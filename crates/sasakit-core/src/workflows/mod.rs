//! # Workflows Module
//!
//! High-level entry points that tie [`core`](crate::core) and
//! [`engine`](crate::engine) together.
//!
//! - **Area Workflow** ([`area`]) - open a structure file, read it with a
//!   classifier, compute its surface area and summarize it by class, chain
//!   or residue.

pub mod area;
