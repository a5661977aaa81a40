//! Data structures describing a parsed molecule.
//!
//! - [`atom`] - a single atom with coordinates, radius and polarity class
//! - [`structure`] - an ordered collection of atoms plus the options used to build it

pub mod atom;
pub mod structure;
