use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;

/// Polarity class assigned to an atom by a classifier.
///
/// The class decides which bucket an atom's surface area is summed into when
/// a result is classified. Atoms the classifier does not know are kept as
/// [`AtomClass::Unknown`] unless the structure options say otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum AtomClass {
    /// Nitrogen and oxygen atoms in the standard classifiers.
    Polar,
    /// Carbon, sulfur and selenium atoms in the standard classifiers.
    Apolar,
    /// Atom not covered by the classifier.
    #[default]
    Unknown,
}

impl AtomClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AtomClass::Polar => "polar",
            AtomClass::Apolar => "apolar",
            AtomClass::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AtomClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AtomClass {
    type Err = ();

    /// Parses a class name, case-insensitively.
    ///
    /// Accepts `"non-polar"` and `"nonpolar"` as aliases for [`AtomClass::Apolar`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "polar" => Ok(AtomClass::Polar),
            "apolar" | "non-polar" | "nonpolar" | "non_polar" => Ok(AtomClass::Apolar),
            "unknown" => Ok(AtomClass::Unknown),
            _ => Err(()),
        }
    }
}

/// A single atom of a parsed structure, with the radius and class resolved
/// at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The atom name as it appears in the file, trimmed (e.g. "CA", "OD1").
    pub name: String,
    /// The three-letter residue name (e.g. "ALA").
    pub residue_name: String,
    /// Residue sequence number including any insertion code (e.g. "52A").
    pub residue_number: String,
    /// Single-character chain label.
    pub chain_id: char,
    /// Element symbol, if the file provides one or it could be derived from the name.
    pub element: Option<String>,
    /// Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
    /// Occupancy column, read only when it is used as the radius.
    pub occupancy: Option<f64>,
    /// Van der Waals radius in Angstroms, before the probe radius is added.
    pub radius: f64,
    /// Polarity class from the classifier.
    pub class: AtomClass,
    /// Whether the atom belongs to the protein main chain.
    pub is_main_chain: bool,
    /// Whether the atom came from a HETATM record.
    pub is_hetero: bool,
}

impl Atom {
    /// Creates an atom with an unknown class, zero radius and no element.
    ///
    /// Radius and class are normally filled in by a
    /// [`Classifier`](crate::core::classifier::Classifier) when the atom is
    /// added to a [`Structure`](super::structure::Structure).
    pub fn new(
        name: &str,
        residue_name: &str,
        residue_number: &str,
        chain_id: char,
        position: Point3<f64>,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            residue_name: residue_name.trim().to_string(),
            residue_number: residue_number.trim().to_string(),
            chain_id,
            element: None,
            position,
            occupancy: None,
            radius: 0.0,
            class: AtomClass::default(),
            is_main_chain: false,
            is_hetero: false,
        }
    }

    pub fn with_element(mut self, element: &str) -> Self {
        let element = element.trim();
        self.element = (!element.is_empty()).then(|| element.to_ascii_uppercase());
        self
    }

    pub fn with_hetero(mut self, is_hetero: bool) -> Self {
        self.is_hetero = is_hetero;
        self
    }
}
