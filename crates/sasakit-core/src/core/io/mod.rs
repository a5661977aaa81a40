//! Reading of molecular structure files.
//!
//! [`traits::StructureFile`] is the format-independent interface;
//! [`pdb::PdbFile`] implements it for the fixed-column PDB format.

pub mod pdb;
pub mod traits;
