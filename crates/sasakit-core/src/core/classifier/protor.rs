use super::{ANY_RESIDUE, AtomProperties, Classifier};
use crate::core::models::atom::AtomClass;
use phf::{Map, phf_map};

const fn apolar(radius: f64) -> AtomProperties {
    AtomProperties {
        radius,
        class: AtomClass::Apolar,
    }
}

const fn polar(radius: f64) -> AtomProperties {
    AtomProperties {
        radius,
        class: AtomClass::Polar,
    }
}

// ProtOr united-atom types (Tsai et al. 1999), keyed by hybridization and
// number of bonded hydrogens.
static ATOM_TYPES: Map<&'static str, AtomProperties> = phf_map! {
    "C3H0" => apolar(1.61),
    "C3H1" => apolar(1.76),
    "C4H1" => apolar(1.88),
    "C4H2" => apolar(1.88),
    "C4H3" => apolar(1.88),
    "N3H0" => polar(1.64),
    "N3H1" => polar(1.64),
    "N3H2" => polar(1.64),
    "N4H3" => polar(1.64),
    "O1H0" => polar(1.42),
    "O2H1" => polar(1.46),
    "S2H0" => apolar(1.77),
    "S2H1" => apolar(1.77),
    "SE2H0" => apolar(1.90),
};

// Keys are "<residue> <atom>". Residue-specific entries win over "ANY".
static RESIDUE_ATOMS: Map<&'static str, &'static str> = phf_map! {
    "ANY C" => "C3H0",
    "ANY O" => "O1H0",
    "ANY CA" => "C4H1",
    "ANY N" => "N3H1",
    "ANY CB" => "C4H2",
    "ANY OXT" => "O2H1",

    "ALA CB" => "C4H3",

    "ARG CG" => "C4H2",
    "ARG CD" => "C4H2",
    "ARG NE" => "N3H1",
    "ARG CZ" => "C3H0",
    "ARG NH1" => "N3H2",
    "ARG NH2" => "N3H2",

    "ASN CG" => "C3H0",
    "ASN OD1" => "O1H0",
    "ASN ND2" => "N3H2",

    "ASP CG" => "C3H0",
    "ASP OD1" => "O1H0",
    "ASP OD2" => "O2H1",

    "CYS SG" => "S2H1",

    "GLN CG" => "C4H2",
    "GLN CD" => "C3H0",
    "GLN OE1" => "O1H0",
    "GLN NE2" => "N3H2",

    "GLU CG" => "C4H2",
    "GLU CD" => "C3H0",
    "GLU OE1" => "O1H0",
    "GLU OE2" => "O2H1",

    "GLY CA" => "C4H2",

    "HIS CG" => "C3H0",
    "HIS ND1" => "N3H1",
    "HIS CD2" => "C3H1",
    "HIS CE1" => "C3H1",
    "HIS NE2" => "N3H1",

    "ILE CB" => "C4H1",
    "ILE CG1" => "C4H2",
    "ILE CG2" => "C4H3",
    "ILE CD1" => "C4H3",

    "LEU CG" => "C4H1",
    "LEU CD1" => "C4H3",
    "LEU CD2" => "C4H3",

    "LYS CG" => "C4H2",
    "LYS CD" => "C4H2",
    "LYS CE" => "C4H2",
    "LYS NZ" => "N4H3",

    "MET CG" => "C4H2",
    "MET SD" => "S2H0",
    "MET CE" => "C4H3",

    "MSE CG" => "C4H2",
    "MSE SE" => "SE2H0",
    "MSE CE" => "C4H3",

    "PHE CG" => "C3H0",
    "PHE CD1" => "C3H1",
    "PHE CD2" => "C3H1",
    "PHE CE1" => "C3H1",
    "PHE CE2" => "C3H1",
    "PHE CZ" => "C3H1",

    "PRO N" => "N3H0",
    "PRO CG" => "C4H2",
    "PRO CD" => "C4H2",

    "SER OG" => "O2H1",

    "THR CB" => "C4H1",
    "THR OG1" => "O2H1",
    "THR CG2" => "C4H3",

    "TRP CG" => "C3H0",
    "TRP CD1" => "C3H1",
    "TRP CD2" => "C3H0",
    "TRP NE1" => "N3H1",
    "TRP CE2" => "C3H0",
    "TRP CE3" => "C3H1",
    "TRP CZ2" => "C3H1",
    "TRP CZ3" => "C3H1",
    "TRP CH2" => "C3H1",

    "TYR CG" => "C3H0",
    "TYR CD1" => "C3H1",
    "TYR CD2" => "C3H1",
    "TYR CE1" => "C3H1",
    "TYR CE2" => "C3H1",
    "TYR CZ" => "C3H0",
    "TYR OH" => "O2H1",

    "VAL CB" => "C4H1",
    "VAL CG1" => "C4H3",
    "VAL CG2" => "C4H3",
};

/// The ProtOr radii set for the standard amino acids and selenomethionine.
///
/// Hydrogens, nucleic acids and ligands are not covered; such atoms are
/// reported as unknown by [`Classifier::properties`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtOrClassifier;

impl ProtOrClassifier {
    /// Looks up the ProtOr type name (e.g. `"C4H3"`) for an atom.
    pub fn atom_type(residue_name: &str, atom_name: &str) -> Option<&'static str> {
        let residue_name = residue_name.trim();
        let atom_name = atom_name.trim();
        RESIDUE_ATOMS
            .get(format!("{residue_name} {atom_name}").as_str())
            .or_else(|| RESIDUE_ATOMS.get(format!("{ANY_RESIDUE} {atom_name}").as_str()))
            .copied()
    }
}

impl Classifier for ProtOrClassifier {
    fn name(&self) -> &str {
        "ProtOr"
    }

    fn properties(&self, residue_name: &str, atom_name: &str) -> Option<AtomProperties> {
        Self::atom_type(residue_name, atom_name).and_then(|t| ATOM_TYPES.get(t).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_residue_entry_refers_to_a_defined_type() {
        for (key, atom_type) in RESIDUE_ATOMS.entries() {
            assert!(
                ATOM_TYPES.contains_key(*atom_type),
                "entry '{key}' refers to undefined type '{atom_type}'"
            );
        }
    }

    #[test]
    fn backbone_atoms_resolve_through_any_entries() {
        let c = ProtOrClassifier;
        assert_eq!(
            c.properties("LEU", "C"),
            Some(AtomProperties { radius: 1.61, class: AtomClass::Apolar })
        );
        assert_eq!(
            c.properties("LEU", "O"),
            Some(AtomProperties { radius: 1.42, class: AtomClass::Polar })
        );
        assert_eq!(c.radius("LEU", "N"), Some(1.64));
        assert_eq!(c.radius("LEU", "CA"), Some(1.88));
    }

    #[test]
    fn residue_specific_entries_override_any_entries() {
        assert_eq!(ProtOrClassifier::atom_type("SER", "CB"), Some("C4H2"));
        assert_eq!(ProtOrClassifier::atom_type("ALA", "CB"), Some("C4H3"));
        assert_eq!(ProtOrClassifier::atom_type("ILE", "CB"), Some("C4H1"));
        assert_eq!(ProtOrClassifier::atom_type("ASN", "N"), Some("N3H1"));
        assert_eq!(ProtOrClassifier::atom_type("PRO", "N"), Some("N3H0"));
        assert_eq!(ProtOrClassifier::atom_type("GLY", "CA"), Some("C4H2"));
    }

    #[test]
    fn lookups_trim_whitespace() {
        assert_eq!(ProtOrClassifier::atom_type(" TYR", " OH "), Some("O2H1"));
    }

    #[test]
    fn sulfur_and_selenium_are_apolar() {
        let c = ProtOrClassifier;
        assert_eq!(c.class("CYS", "SG"), Some(AtomClass::Apolar));
        assert_eq!(c.class("MET", "SD"), Some(AtomClass::Apolar));
        assert_eq!(c.class("MSE", "SE"), Some(AtomClass::Apolar));
        assert_eq!(c.radius("MSE", "SE"), Some(1.90));
    }

    #[test]
    fn nitrogen_and_oxygen_side_chain_atoms_are_polar() {
        let c = ProtOrClassifier;
        for (res, atom) in [
            ("ARG", "NH1"),
            ("ASN", "ND2"),
            ("ASP", "OD2"),
            ("HIS", "NE2"),
            ("LYS", "NZ"),
            ("SER", "OG"),
            ("TRP", "NE1"),
        ] {
            assert_eq!(c.class(res, atom), Some(AtomClass::Polar), "{res} {atom}");
        }
    }

    #[test]
    fn unknown_atoms_and_residues_return_none() {
        let c = ProtOrClassifier;
        assert_eq!(c.properties("ALA", "CG"), None);
        assert_eq!(c.properties("HOH", "O1"), None);
        assert_eq!(c.properties("ALA", "H"), None);
        assert_eq!(c.properties("LIG", "C12"), None);
    }
}
