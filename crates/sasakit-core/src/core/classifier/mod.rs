//! Atomic classifiers: the tables that give every atom a radius and a
//! polarity class.
//!
//! A classifier is consulted once per atom while a structure is being read.
//! The [`ProtOrClassifier`] is the default. A [`ConfigClassifier`] can be
//! loaded from a TOML file to supply a different radii set.

mod config;
pub mod elements;
mod protor;

use crate::core::models::atom::AtomClass;

pub use config::{ClassifierError, ConfigClassifier};
pub use protor::ProtOrClassifier;

/// Residue name used by classifier tables for entries that apply to every residue.
pub const ANY_RESIDUE: &str = "ANY";

/// Radius and polarity class resolved for one atom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomProperties {
    /// Van der Waals radius in Angstroms.
    pub radius: f64,
    pub class: AtomClass,
}

/// Maps `(residue name, atom name)` pairs to radii and polarity classes.
///
/// Implementors only need [`Classifier::properties`]. Lookups are expected
/// to fall back from a residue-specific entry to the [`ANY_RESIDUE`] entry
/// for the same atom name.
pub trait Classifier: Send + Sync {
    /// Short human-readable name, used in logs.
    fn name(&self) -> &str;

    /// Returns the radius and class of an atom, or `None` if the classifier
    /// has no entry for it.
    fn properties(&self, residue_name: &str, atom_name: &str) -> Option<AtomProperties>;

    fn radius(&self, residue_name: &str, atom_name: &str) -> Option<f64> {
        self.properties(residue_name, atom_name).map(|p| p.radius)
    }

    fn class(&self, residue_name: &str, atom_name: &str) -> Option<AtomClass> {
        self.properties(residue_name, atom_name).map(|p| p.class)
    }
}

/// Which classifier a calculation should use.
#[derive(Debug, Clone, Default)]
pub enum ClassifierChoice {
    /// The built-in ProtOr radii.
    #[default]
    ProtOr,
    /// A classifier loaded from a TOML definition.
    Custom(ConfigClassifier),
}

impl ClassifierChoice {
    pub fn as_classifier(&self) -> &dyn Classifier {
        match self {
            ClassifierChoice::ProtOr => &ProtOrClassifier,
            ClassifierChoice::Custom(classifier) => classifier,
        }
    }
}
