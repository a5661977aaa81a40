use super::atom::{Atom, AtomClass};
use crate::core::classifier::{Classifier, elements};
use crate::core::io::pdb::{PdbError, PdbFile};
use crate::core::io::traits::StructureFile;
use crate::core::utils::identifiers::is_main_chain_atom;
use crate::engine::error::SasaError;
use crate::engine::params::Parameters;
use crate::engine::result::SasaResult;
use std::fmt;
use std::io::BufRead;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Options controlling which atoms are accepted when a structure is built.
///
/// All options default to `false`, which reads protein ATOM records of the
/// first model, without hydrogens, guessing radii for atoms the classifier
/// does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructureOptions {
    /// Read HETATM records as well as ATOM records.
    pub include_hetatm: bool,
    /// Keep hydrogen and deuterium atoms.
    pub include_hydrogen: bool,
    /// Read every MODEL into one structure instead of stopping after the first.
    pub join_models: bool,
    /// Drop atoms the classifier does not know instead of guessing their radius.
    pub skip_unknown: bool,
    /// Fail on the first atom the classifier does not know. Takes precedence
    /// over `skip_unknown`.
    pub halt_at_unknown: bool,
    /// Take each atom's radius from the occupancy column instead of the
    /// classifier. Classes still come from the classifier.
    pub radius_from_occupancy: bool,
    /// Read each MODEL as its own structure. Only affects multi-structure reads.
    pub separate_models: bool,
    /// Read each chain as its own structure. Only affects multi-structure reads.
    pub separate_chains: bool,
}

#[derive(Debug, Error, PartialEq)]
pub enum StructureError {
    #[error("Unknown atom '{atom}' in residue {residue} {number} of chain '{chain}'")]
    UnknownAtom {
        residue: String,
        number: String,
        chain: char,
        atom: String,
    },
    #[error("Cannot determine a radius for atom '{atom}' in residue {residue} {number} of chain '{chain}'")]
    NoRadius {
        residue: String,
        number: String,
        chain: char,
        atom: String,
    },
    #[error("Invalid radius {radius} for atom '{atom}' in residue {residue} {number} of chain '{chain}'")]
    InvalidRadius {
        residue: String,
        number: String,
        chain: char,
        atom: String,
        radius: f64,
    },
}

/// A parsed molecular structure with per-atom radii and classes.
///
/// Surface areas are computed with [`Structure::calculate_sasa`]; the
/// returned [`SasaResult`] borrows the structure, so a structure always
/// outlives the results computed from it.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    name: String,
    classifier_name: String,
    model: Option<usize>,
    atoms: Vec<Atom>,
}

impl Structure {
    /// Creates an empty structure. Atoms are added with [`Structure::add_atom`].
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            classifier_name: String::new(),
            model: None,
            atoms: Vec::new(),
        }
    }

    /// Reads a structure from a PDB file. The structure is named after the
    /// file stem.
    ///
    /// # Errors
    ///
    /// Returns [`PdbError`] if the file cannot be read, a record is
    /// malformed, an unknown atom is met while `halt_at_unknown` is set, or
    /// no atom is accepted.
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        classifier: &dyn Classifier,
        options: &StructureOptions,
    ) -> Result<Self, PdbError> {
        PdbFile::read_from_path(path, classifier, options)
    }

    /// Reads every structure of a PDB file, split by model and chain as
    /// `separate_models` and `separate_chains` request.
    ///
    /// # Errors
    ///
    /// As [`Structure::from_path`]; `NoAtoms` only when no structure has atoms.
    pub fn all_from_path<P: AsRef<Path>>(
        path: P,
        classifier: &dyn Classifier,
        options: &StructureOptions,
    ) -> Result<Vec<Self>, PdbError> {
        PdbFile::read_all_from_path(path, classifier, options)
    }

    /// Reads a structure in PDB format from any buffered reader.
    pub fn from_reader(
        reader: &mut impl BufRead,
        name: &str,
        classifier: &dyn Classifier,
        options: &StructureOptions,
    ) -> Result<Self, PdbError> {
        PdbFile::read_from(reader, name, classifier, options)
    }

    /// Classifies an atom and appends it to the structure.
    ///
    /// Returns `Ok(false)` when the atom was dropped because the classifier
    /// does not know it and `skip_unknown` is set.
    ///
    /// # Errors
    ///
    /// * [`StructureError::UnknownAtom`] - the classifier does not know the
    ///   atom and `halt_at_unknown` is set.
    /// * [`StructureError::NoRadius`] - the atom is unknown and no radius can
    ///   be guessed from its element.
    pub fn add_atom(
        &mut self,
        mut atom: Atom,
        classifier: &dyn Classifier,
        options: &StructureOptions,
    ) -> Result<bool, StructureError> {
        if self.classifier_name.is_empty() {
            self.classifier_name = classifier.name().to_string();
        }

        match classifier.properties(&atom.residue_name, &atom.name) {
            Some(properties) => {
                atom.radius = properties.radius;
                atom.class = properties.class;
            }
            None if options.halt_at_unknown => {
                return Err(StructureError::UnknownAtom {
                    residue: atom.residue_name,
                    number: atom.residue_number,
                    chain: atom.chain_id,
                    atom: atom.name,
                });
            }
            None if options.skip_unknown => {
                warn!(
                    "Skipping unknown atom '{}' in {} {} of chain '{}'.",
                    atom.name, atom.residue_name, atom.residue_number, atom.chain_id
                );
                return Ok(false);
            }
            None if options.radius_from_occupancy => {
                atom.class = AtomClass::Unknown;
            }
            None => {
                let element = atom
                    .element
                    .clone()
                    .or_else(|| elements::element_from_atom_name(&atom.name));
                let Some(radius) = element.as_deref().and_then(elements::guess_radius) else {
                    return Err(StructureError::NoRadius {
                        residue: atom.residue_name,
                        number: atom.residue_number,
                        chain: atom.chain_id,
                        atom: atom.name,
                    });
                };
                warn!(
                    "Atom '{}' in {} {} of chain '{}' is unknown to classifier '{}', guessing radius {:.2} from element {}.",
                    atom.name,
                    atom.residue_name,
                    atom.residue_number,
                    atom.chain_id,
                    classifier.name(),
                    radius,
                    element.as_deref().unwrap_or("?")
                );
                atom.radius = radius;
                atom.class = AtomClass::Unknown;
            }
        }

        if options.radius_from_occupancy {
            match atom.occupancy {
                Some(radius) if radius.is_finite() && radius >= 0.0 => atom.radius = radius,
                Some(radius) => {
                    return Err(StructureError::InvalidRadius {
                        residue: atom.residue_name,
                        number: atom.residue_number,
                        chain: atom.chain_id,
                        atom: atom.name,
                        radius,
                    });
                }
                None => {
                    return Err(StructureError::NoRadius {
                        residue: atom.residue_name,
                        number: atom.residue_number,
                        chain: atom.chain_id,
                        atom: atom.name,
                    });
                }
            }
        }

        atom.is_main_chain = !atom.is_hetero && is_main_chain_atom(&atom.name);
        self.atoms.push(atom);
        Ok(true)
    }

    /// Computes the solvent accessible surface area of every atom.
    ///
    /// # Errors
    ///
    /// Returns [`SasaError`] if the parameters are invalid or an atom has a
    /// non-finite coordinate.
    pub fn calculate_sasa(&self, parameters: &Parameters) -> Result<SasaResult<'_>, SasaError> {
        crate::engine::calculate(self, parameters)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Model number, set only for structures split with `separate_models`.
    pub fn model(&self) -> Option<usize> {
        self.model
    }

    pub(crate) fn set_model(&mut self, model: Option<usize>) {
        self.model = model;
    }

    /// Name of the classifier that assigned radii, empty for a structure with no atoms.
    pub fn classifier_name(&self) -> &str {
        &self.classifier_name
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Distinct chain labels in order of first appearance.
    pub fn chain_labels(&self) -> String {
        let mut labels = String::new();
        for atom in &self.atoms {
            if !labels.contains(atom.chain_id) {
                labels.push(atom.chain_id);
            }
        }
        labels
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} atoms, chains {})",
            self.name,
            self.atoms.len(),
            self.chain_labels()
        )
    }
}
