use crate::core::classifier::{Classifier, elements};
use crate::core::io::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::structure::{Structure, StructureError, StructureOptions};
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, trace};

// Coordinates end at column 54; anything shorter cannot be an atom record.
const MIN_ATOM_LINE_LEN: usize = 54;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("Rejected atom on line {line}: {source}")]
    Atom {
        line: usize,
        #[source]
        source: StructureError,
    },
    #[error("No atoms were accepted from the input")]
    NoAtoms,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PdbParseErrorKind {
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
}

// Columns 55-60 hold the occupancy, read as a radius on request.
const OCCUPANCY_COLUMNS: (usize, usize) = (54, 60);

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end)
        .or_else(|| line.get(start..))
        .unwrap_or("")
        .trim()
}

fn parse_float(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

/// An accepted ATOM/HETATM record, not yet classified.
struct AtomRecord {
    line: usize,
    model: usize,
    atom: Atom,
}

/// Reader for the fixed-column PDB format.
///
/// Only ATOM and HETATM records carry data; MODEL boundaries and END are
/// honored, everything else is ignored. Lines are read as raw bytes, so
/// non-UTF-8 text in headers and remarks does not reject the file.
pub struct PdbFile;

impl PdbFile {
    fn read_records(
        reader: &mut impl BufRead,
        options: &StructureOptions,
        skipped: &mut usize,
    ) -> Result<Vec<AtomRecord>, PdbError> {
        let mut records = Vec::new();
        let mut buf = Vec::new();
        let mut line_num = 0usize;
        let mut models_seen = 0usize;
        let mut model = 1usize;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_num += 1;
            let text = String::from_utf8_lossy(&buf);
            let line = text.trim_end_matches(['\n', '\r']);

            let record_type = slice_and_trim(line, 0, 6);
            match record_type {
                "ATOM" | "HETATM" => {
                    let is_hetero = record_type == "HETATM";
                    if is_hetero && !options.include_hetatm {
                        *skipped += 1;
                        continue;
                    }
                    if line.len() < MIN_ATOM_LINE_LEN {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::LineTooShort,
                        });
                    }

                    let alt_loc = slice_and_trim(line, 16, 17);
                    if !alt_loc.is_empty() && alt_loc != "A" {
                        trace!("Skipping alternate location '{}' on line {}.", alt_loc, line_num);
                        *skipped += 1;
                        continue;
                    }

                    let name_str = slice_and_trim(line, 12, 16);
                    if name_str.is_empty() {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::MissingRequiredField {
                                columns: "13-16".into(),
                            },
                        });
                    }
                    let res_name_str = slice_and_trim(line, 17, 20);
                    let chain_id = line.get(21..22).and_then(|c| c.chars().next()).unwrap_or(' ');
                    let res_number = format!(
                        "{}{}",
                        slice_and_trim(line, 22, 26),
                        slice_and_trim(line, 26, 27)
                    );
                    let x = parse_float(line, line_num, 30, 38)?;
                    let y = parse_float(line, line_num, 38, 46)?;
                    let z = parse_float(line, line_num, 46, 54)?;

                    let element = match slice_and_trim(line, 76, 78) {
                        "" => elements::element_from_atom_name(name_str),
                        symbol => Some(symbol.to_ascii_uppercase()),
                    };
                    if !options.include_hydrogen
                        && element.as_deref().is_some_and(elements::is_hydrogen)
                    {
                        *skipped += 1;
                        continue;
                    }

                    let mut atom = Atom::new(
                        name_str,
                        res_name_str,
                        &res_number,
                        chain_id,
                        Point3::new(x, y, z),
                    )
                    .with_hetero(is_hetero);
                    atom.element = element;
                    if options.radius_from_occupancy {
                        let (start, end) = OCCUPANCY_COLUMNS;
                        atom.occupancy = Some(parse_float(line, line_num, start, end)?);
                    }

                    records.push(AtomRecord {
                        line: line_num,
                        model,
                        atom,
                    });
                }
                "MODEL" => {
                    models_seen += 1;
                    model = slice_and_trim(line, 10, 14)
                        .parse()
                        .unwrap_or(models_seen);
                }
                "ENDMDL" if !options.join_models && !options.separate_models => break,
                "END" => break,
                _ => {}
            }
        }

        Ok(records)
    }

    fn add_record(
        structure: &mut Structure,
        record: AtomRecord,
        classifier: &dyn Classifier,
        options: &StructureOptions,
        skipped: &mut usize,
    ) -> Result<(), PdbError> {
        let line = record.line;
        let accepted = structure
            .add_atom(record.atom, classifier, options)
            .map_err(|source| PdbError::Atom { line, source })?;
        if !accepted {
            *skipped += 1;
        }
        Ok(())
    }
}

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(
        reader: &mut impl BufRead,
        name: &str,
        classifier: &dyn Classifier,
        options: &StructureOptions,
    ) -> Result<Structure, Self::Error> {
        let mut skipped = 0usize;
        let records = Self::read_records(reader, options, &mut skipped)?;

        let mut structure = Structure::new(name);
        for record in records {
            Self::add_record(&mut structure, record, classifier, options, &mut skipped)?;
        }

        debug!(
            "Read {} atom(s) from '{}' ({} skipped) using classifier '{}'.",
            structure.len(),
            name,
            skipped,
            classifier.name()
        );

        if structure.is_empty() {
            return Err(PdbError::NoAtoms);
        }
        Ok(structure)
    }

    /// Splits the input by model and/or chain as `separate_models` and
    /// `separate_chains` request, in order of first appearance.
    fn read_all_from(
        reader: &mut impl BufRead,
        name: &str,
        classifier: &dyn Classifier,
        options: &StructureOptions,
    ) -> Result<Vec<Structure>, Self::Error> {
        let mut skipped = 0usize;
        let records = Self::read_records(reader, options, &mut skipped)?;

        let mut groups: Vec<((Option<usize>, Option<char>), Structure)> = Vec::new();
        for record in records {
            let key = (
                options.separate_models.then_some(record.model),
                options.separate_chains.then_some(record.atom.chain_id),
            );
            let position = match groups.iter().position(|(k, _)| *k == key) {
                Some(position) => position,
                None => {
                    let mut structure = Structure::new(name);
                    structure.set_model(key.0);
                    groups.push((key, structure));
                    groups.len() - 1
                }
            };
            Self::add_record(&mut groups[position].1, record, classifier, options, &mut skipped)?;
        }

        let structures: Vec<Structure> = groups
            .into_iter()
            .map(|(_, structure)| structure)
            .filter(|structure| !structure.is_empty())
            .collect();

        debug!(
            "Read {} structure(s) from '{}' ({} atom(s) skipped).",
            structures.len(),
            name,
            skipped
        );

        if structures.is_empty() {
            return Err(PdbError::NoAtoms);
        }
        Ok(structures)
    }
}
