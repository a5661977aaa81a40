use super::error::SasaError;
use super::params::Parameters;
use crate::core::models::atom::{Atom, AtomClass};
use crate::core::models::structure::Structure;
use std::collections::HashMap;
use std::fmt;
use std::ops::{AddAssign, Sub};
use tracing::warn;

/// Surface area split by atom class and by backbone membership.
///
/// `total` always equals `polar + apolar + unknown`, and also
/// `main_chain + side_chain`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClassifiedArea {
    pub total: f64,
    pub apolar: f64,
    pub polar: f64,
    pub unknown: f64,
    pub main_chain: f64,
    pub side_chain: f64,
}

impl ClassifiedArea {
    pub fn add_atom(&mut self, atom: &Atom, area: f64) {
        self.total += area;
        match atom.class {
            AtomClass::Apolar => self.apolar += area,
            AtomClass::Polar => self.polar += area,
            AtomClass::Unknown => self.unknown += area,
        }
        if atom.is_main_chain {
            self.main_chain += area;
        } else {
            self.side_chain += area;
        }
    }
}

impl AddAssign for ClassifiedArea {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        self.apolar += other.apolar;
        self.polar += other.polar;
        self.unknown += other.unknown;
        self.main_chain += other.main_chain;
        self.side_chain += other.side_chain;
    }
}

impl Sub for ClassifiedArea {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            total: self.total - other.total,
            apolar: self.apolar - other.apolar,
            polar: self.polar - other.polar,
            unknown: self.unknown - other.unknown,
            main_chain: self.main_chain - other.main_chain,
            side_chain: self.side_chain - other.side_chain,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResidueArea {
    pub chain_id: char,
    pub residue_name: String,
    pub residue_number: String,
    pub n_atoms: usize,
    pub area: ClassifiedArea,
}

impl ResidueArea {
    /// Chain label and residue number (with insertion code), which identify
    /// a residue across structures.
    pub fn key(&self) -> (char, &str) {
        (self.chain_id, &self.residue_number)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChainArea {
    pub chain_id: char,
    pub n_residues: usize,
    pub area: ClassifiedArea,
}

/// Per-atom surface areas of one structure.
///
/// The result borrows the structure it was computed from, so it can never
/// outlive it.
#[derive(Debug, Clone)]
pub struct SasaResult<'s> {
    structure: &'s Structure,
    atom_areas: Vec<f64>,
    total: f64,
    parameters: Parameters,
}

impl<'s> SasaResult<'s> {
    pub(crate) fn new(structure: &'s Structure, atom_areas: Vec<f64>, parameters: Parameters) -> Self {
        let total = atom_areas.iter().sum();
        Self {
            structure,
            atom_areas,
            total,
            parameters,
        }
    }

    /// Total surface area in square Angstroms.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Areas in the same order as [`Structure::atoms`].
    pub fn atom_areas(&self) -> &[f64] {
        &self.atom_areas
    }

    pub fn atom_area(&self, index: usize) -> Option<f64> {
        self.atom_areas.get(index).copied()
    }

    pub fn structure(&self) -> &'s Structure {
        self.structure
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    fn atoms_with_areas(&self) -> impl Iterator<Item = (&'s Atom, f64)> + '_ {
        self.structure
            .atoms()
            .iter()
            .zip(self.atom_areas.iter().copied())
    }

    /// Areas of the whole structure by class.
    pub fn classes(&self) -> ClassifiedArea {
        let mut area = ClassifiedArea::default();
        for (atom, a) in self.atoms_with_areas() {
            area.add_atom(atom, a);
        }
        area
    }

    /// Areas per residue, in file order. A residue is a run of consecutive
    /// atoms sharing chain, residue number and residue name.
    pub fn residue_areas(&self) -> Vec<ResidueArea> {
        let mut residues: Vec<ResidueArea> = Vec::new();
        for (atom, a) in self.atoms_with_areas() {
            let same_residue = residues.last().is_some_and(|r| {
                r.chain_id == atom.chain_id
                    && r.residue_number == atom.residue_number
                    && r.residue_name == atom.residue_name
            });
            if !same_residue {
                residues.push(ResidueArea {
                    chain_id: atom.chain_id,
                    residue_name: atom.residue_name.clone(),
                    residue_number: atom.residue_number.clone(),
                    n_atoms: 0,
                    area: ClassifiedArea::default(),
                });
            }
            if let Some(residue) = residues.last_mut() {
                residue.n_atoms += 1;
                residue.area.add_atom(atom, a);
            }
        }
        residues
    }

    /// Areas per chain, in order of first appearance.
    pub fn chain_areas(&self) -> Vec<ChainArea> {
        let mut chains: Vec<ChainArea> = Vec::new();
        for residue in self.residue_areas() {
            let position = match chains.iter().position(|c| c.chain_id == residue.chain_id) {
                Some(position) => position,
                None => {
                    chains.push(ChainArea {
                        chain_id: residue.chain_id,
                        n_residues: 0,
                        area: ClassifiedArea::default(),
                    });
                    chains.len() - 1
                }
            };
            chains[position].n_residues += 1;
            chains[position].area += residue.area;
        }
        chains
    }

    /// Combines the residue areas of `self` with those of `part`, a result
    /// for a subset of the same atoms (one partner of a complex, say).
    ///
    /// For every residue of `part` found in `self` by chain and residue
    /// number, `op(whole, part)` gives the combined area; the residue is kept
    /// when `predicate` accepts it. Residues of `part` missing from `self`
    /// are logged and skipped. Order follows `part`.
    pub fn compare_residues<O, P>(&self, part: &SasaResult<'_>, op: O, predicate: P) -> Vec<ResidueArea>
    where
        O: Fn(&ClassifiedArea, &ClassifiedArea) -> ClassifiedArea,
        P: Fn(&ClassifiedArea) -> bool,
    {
        let whole = self.residue_areas();
        let by_key: HashMap<(char, &str), &ResidueArea> =
            whole.iter().map(|r| (r.key(), r)).collect();

        part.residue_areas()
            .into_iter()
            .filter_map(|residue| {
                let Some(&matching) = by_key.get(&residue.key()) else {
                    warn!(
                        "Residue {} {} of chain '{}' not found in '{}'.",
                        residue.residue_name,
                        residue.residue_number,
                        residue.chain_id,
                        self.structure.name()
                    );
                    return None;
                };
                let area = op(&matching.area, &residue.area);
                predicate(&area).then(|| ResidueArea {
                    area,
                    ..matching.clone()
                })
            })
            .collect()
    }

    /// Residues whose total area differs from `part` by more than
    /// `tolerance`, with the area change `self - part`. Residues buried at
    /// an interface come out negative.
    pub fn residue_differences(&self, part: &SasaResult<'_>, tolerance: f64) -> Vec<ResidueArea> {
        self.compare_residues(part, |whole, part| *whole - *part, |d| d.total.abs() > tolerance)
    }
}

impl fmt::Display for SasaResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.2} A^2 ({}, probe {})",
            self.structure.name(),
            self.total,
            self.parameters.algorithm,
            self.parameters.probe_radius
        )
    }
}

/// Splits a result into class areas, checking it was computed from `structure`.
///
/// # Errors
///
/// Returns [`SasaError::Mismatch`] if `result` belongs to another structure.
pub fn classify(structure: &Structure, result: &SasaResult<'_>) -> Result<ClassifiedArea, SasaError> {
    if !std::ptr::eq(structure, result.structure()) {
        return Err(SasaError::Mismatch {
            structure: structure.name().to_string(),
            result_structure: result.structure().name().to_string(),
        });
    }
    Ok(result.classes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::ProtOrClassifier;
    use crate::core::models::structure::StructureOptions;
    use nalgebra::Point3;

    fn structure(atoms: &[(&str, &str, &str, char)]) -> Structure {
        let mut s = Structure::new("test");
        let opts = StructureOptions::default();
        for (i, &(name, res, num, chain)) in atoms.iter().enumerate() {
            let atom = Atom::new(name, res, num, chain, Point3::new(i as f64 * 20.0, 0.0, 0.0))
                .with_element(name);
            s.add_atom(atom, &ProtOrClassifier, &opts).unwrap();
        }
        s
    }

    #[test]
    fn classes_split_area_by_polarity_and_backbone() {
        let s = structure(&[
            ("N", "ALA", "1", 'A'),
            ("CA", "ALA", "1", 'A'),
            ("CB", "ALA", "1", 'A'),
            ("ZN", "ZN", "2", 'A'),
        ]);
        let result = SasaResult::new(&s, vec![10.0, 20.0, 30.0, 40.0], Parameters::default());

        let area = result.classes();
        assert_eq!(area.total, 100.0);
        assert_eq!(area.polar, 10.0);
        assert_eq!(area.apolar, 50.0);
        assert_eq!(area.unknown, 40.0);
        assert_eq!(area.main_chain, 30.0);
        assert_eq!(area.side_chain, 70.0);
        assert_eq!(result.total(), 100.0);
        assert_eq!(result.atom_area(2), Some(30.0));
        assert_eq!(result.atom_area(9), None);
    }

    #[test]
    fn residue_areas_group_consecutive_atoms() {
        let s = structure(&[
            ("N", "GLY", "1", 'A'),
            ("CA", "GLY", "1", 'A'),
            ("N", "GLY", "2", 'A'),
            ("N", "GLY", "1", 'B'),
        ]);
        let result = SasaResult::new(&s, vec![1.0, 2.0, 3.0, 4.0], Parameters::default());
        let residues = result.residue_areas();

        assert_eq!(residues.len(), 3);
        assert_eq!(residues[0].residue_number, "1");
        assert_eq!(residues[0].chain_id, 'A');
        assert_eq!(residues[0].area.total, 3.0);
        assert_eq!(residues[1].residue_number, "2");
        assert_eq!(residues[2].chain_id, 'B');
        assert_eq!(residues[2].area.total, 4.0);
    }

    #[test]
    fn chain_areas_follow_first_appearance() {
        let s = structure(&[
            ("N", "GLY", "1", 'B'),
            ("N", "GLY", "1", 'A'),
            ("CA", "GLY", "2", 'B'),
        ]);
        let result = SasaResult::new(&s, vec![1.0, 2.0, 4.0], Parameters::default());
        let chains = result.chain_areas();

        assert_eq!(chains.len(), 2);
        assert_eq!(chains[0].chain_id, 'B');
        assert_eq!(chains[0].area.total, 5.0);
        assert_eq!(chains[0].area.polar, 1.0);
        assert_eq!(chains[1].chain_id, 'A');
        assert_eq!(chains[1].area.total, 2.0);
    }

    #[test]
    fn residue_and_chain_areas_count_members() {
        let s = structure(&[
            ("N", "GLY", "1", 'A'),
            ("CA", "GLY", "1", 'A'),
            ("N", "GLY", "2", 'A'),
            ("N", "GLY", "1", 'B'),
        ]);
        let result = SasaResult::new(&s, vec![1.0, 2.0, 3.0, 4.0], Parameters::default());

        let atoms: Vec<usize> = result.residue_areas().iter().map(|r| r.n_atoms).collect();
        assert_eq!(atoms, [2, 1, 1]);
        let chains = result.chain_areas();
        assert_eq!(chains[0].n_residues, 2);
        assert_eq!(chains[0].area.total, 6.0);
        assert_eq!(chains[1].n_residues, 1);
    }

    #[test]
    fn compare_residues_applies_op_and_predicate_in_part_order() {
        let complex = structure(&[
            ("N", "GLY", "1", 'A'),
            ("CA", "GLY", "1", 'A'),
            ("N", "ALA", "5", 'A'),
            ("N", "SER", "9", 'B'),
        ]);
        let chain_a = structure(&[
            ("N", "ALA", "5", 'A'),
            ("N", "GLY", "1", 'A'),
            ("CA", "GLY", "1", 'A'),
            ("N", "LYS", "77", 'A'),
        ]);
        let whole = SasaResult::new(&complex, vec![1.0, 2.0, 6.0, 9.0], Parameters::default());
        let part = SasaResult::new(&chain_a, vec![10.0, 1.0, 2.0, 3.0], Parameters::default());

        let all = whole.compare_residues(&part, |w, p| *w - *p, |_| true);
        let summary: Vec<(&str, f64)> = all
            .iter()
            .map(|r| (r.residue_number.as_str(), r.area.total))
            .collect();
        assert_eq!(summary, [("5", -4.0), ("1", 0.0)]);
        assert_eq!(all[1].n_atoms, 2);
        assert_eq!(all[0].residue_name, "ALA");

        let changed = whole.residue_differences(&part, 1e-9);
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].key(), ('A', "5"));
        assert_eq!(changed[0].area.polar, -4.0);
    }

    #[test]
    fn classify_accepts_own_structure() {
        let s = structure(&[("CA", "ALA", "1", 'A')]);
        let result = SasaResult::new(&s, vec![12.5], Parameters::default());
        let area = classify(&s, &result).unwrap();
        assert_eq!(area.total, 12.5);
        assert_eq!(area.apolar, 12.5);
    }

    #[test]
    fn classify_rejects_result_of_another_structure() {
        let a = structure(&[("CA", "ALA", "1", 'A')]);
        let b = a.clone();
        let result = SasaResult::new(&a, vec![12.5], Parameters::default());
        assert!(matches!(
            classify(&b, &result),
            Err(SasaError::Mismatch { .. })
        ));
    }

    #[test]
    fn empty_result_has_zero_areas() {
        let s = Structure::new("empty");
        let result = SasaResult::new(&s, Vec::new(), Parameters::default());
        assert_eq!(result.classes(), ClassifiedArea::default());
        assert!(result.residue_areas().is_empty());
        assert!(result.chain_areas().is_empty());
    }
}
