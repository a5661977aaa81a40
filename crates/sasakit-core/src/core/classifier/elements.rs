use phf::{Map, phf_map};

// Van der Waals radii (Angstroms) used when the classifier has no entry for
// an atom and its radius has to be guessed from the element.
static ELEMENT_RADII: Map<&'static str, f64> = phf_map! {
    "H" => 1.10, "D" => 1.10,
    "C" => 1.70, "N" => 1.55, "O" => 1.52, "F" => 1.47,
    "P" => 1.80, "S" => 1.80, "CL" => 1.75, "SE" => 1.90,
    "BR" => 1.83, "I" => 1.98,
    "LI" => 1.81, "NA" => 2.27, "MG" => 1.73, "K" => 2.75, "CA" => 2.31,
    "MN" => 1.97, "FE" => 1.94, "CO" => 1.92, "NI" => 1.63, "CU" => 1.40,
    "ZN" => 1.39, "CD" => 1.58, "HG" => 1.55,
};

/// Guesses a van der Waals radius from an element symbol (case-insensitive).
pub fn guess_radius(element: &str) -> Option<f64> {
    ELEMENT_RADII
        .get(element.trim().to_ascii_uppercase().as_str())
        .copied()
}

/// Derives an element symbol from a PDB atom name when the element columns
/// are blank.
///
/// Leading digits are skipped (`"1HB"` → `"H"`), and the first letter is
/// taken as the element.
pub fn element_from_atom_name(atom_name: &str) -> Option<String> {
    atom_name
        .trim()
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase().to_string())
}

pub fn is_hydrogen(element: &str) -> bool {
    matches!(element.trim().to_ascii_uppercase().as_str(), "H" | "D")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_radius_covers_common_elements() {
        assert_eq!(guess_radius("C"), Some(1.70));
        assert_eq!(guess_radius("N"), Some(1.55));
        assert_eq!(guess_radius("O"), Some(1.52));
        assert_eq!(guess_radius("S"), Some(1.80));
    }

    #[test]
    fn guess_radius_is_case_insensitive_and_trims() {
        assert_eq!(guess_radius(" zn"), Some(1.39));
        assert_eq!(guess_radius("Fe "), Some(1.94));
    }

    #[test]
    fn guess_radius_returns_none_for_unknown_symbols() {
        assert_eq!(guess_radius("XX"), None);
        assert_eq!(guess_radius(""), None);
    }

    #[test]
    fn element_from_atom_name_skips_leading_digits() {
        assert_eq!(element_from_atom_name("CA").as_deref(), Some("C"));
        assert_eq!(element_from_atom_name("1HB").as_deref(), Some("H"));
        assert_eq!(element_from_atom_name(" OD1").as_deref(), Some("O"));
        assert_eq!(element_from_atom_name("123"), None);
    }

    #[test]
    fn is_hydrogen_accepts_hydrogen_and_deuterium() {
        assert!(is_hydrogen("H"));
        assert!(is_hydrogen("d"));
        assert!(!is_hydrogen("HG"));
        assert!(!is_hydrogen("C"));
    }
}
