use super::{ANY_RESIDUE, AtomProperties, Classifier};
use crate::core::models::atom::AtomClass;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TypeEntry {
    radius: f64,
    class: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClassifierFile {
    name: Option<String>,
    types: HashMap<String, TypeEntry>,
    atoms: HashMap<String, HashMap<String, String>>,
}

/// A classifier defined by a TOML file.
///
/// The file declares named atom types under `[types]` and maps atom names
/// to types per residue under `[atoms.<RESIDUE>]`. The `ANY` residue holds
/// entries that apply to every residue:
///
/// ```toml
/// name = "minimal"
///
/// [types]
/// C4H1 = { radius = 1.88, class = "apolar" }
/// O1H0 = { radius = 1.42, class = "polar" }
///
/// [atoms.ANY]
/// CA = "C4H1"
/// O = "O1H0"
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigClassifier {
    name: String,
    entries: HashMap<(String, String), AtomProperties>,
}

impl ConfigClassifier {
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let content = std::fs::read_to_string(path).map_err(|e| ClassifierError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let default_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "custom".to_string());
        Self::from_toml_str(&content, &default_name).map_err(|e| match e {
            ClassifierError::Toml { source, .. } => ClassifierError::Toml {
                path: path.to_string_lossy().to_string(),
                source,
            },
            other => other,
        })
    }

    /// Parses a classifier definition. `default_name` is used when the
    /// document does not set `name`.
    pub fn from_toml_str(content: &str, default_name: &str) -> Result<Self, ClassifierError> {
        let file: ClassifierFile =
            toml::from_str(content).map_err(|e| ClassifierError::Toml {
                path: "<string>".to_string(),
                source: e,
            })?;

        let mut types = HashMap::with_capacity(file.types.len());
        for (type_name, entry) in file.types {
            if !entry.radius.is_finite() || entry.radius <= 0.0 {
                return Err(ClassifierError::InvalidRadius {
                    type_name,
                    radius: entry.radius,
                });
            }
            let class = AtomClass::from_str(&entry.class).map_err(|_| {
                ClassifierError::InvalidClass {
                    type_name: type_name.clone(),
                    class: entry.class.clone(),
                }
            })?;
            types.insert(
                type_name,
                AtomProperties {
                    radius: entry.radius,
                    class,
                },
            );
        }

        let mut entries = HashMap::new();
        for (residue_name, atoms) in file.atoms {
            for (atom_name, type_name) in atoms {
                let properties =
                    types
                        .get(&type_name)
                        .copied()
                        .ok_or_else(|| ClassifierError::UnknownType {
                            residue: residue_name.clone(),
                            atom: atom_name.clone(),
                            type_name: type_name.clone(),
                        })?;
                entries.insert(
                    (
                        residue_name.trim().to_string(),
                        atom_name.trim().to_string(),
                    ),
                    properties,
                );
            }
        }

        Ok(Self {
            name: file.name.unwrap_or_else(|| default_name.to_string()),
            entries,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, residue_name: &str, atom_name: &str) -> Option<AtomProperties> {
        self.entries
            .get(&(residue_name.to_string(), atom_name.to_string()))
            .copied()
    }
}

impl Classifier for ConfigClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn properties(&self, residue_name: &str, atom_name: &str) -> Option<AtomProperties> {
        let residue_name = residue_name.trim();
        let atom_name = atom_name.trim();
        self.lookup(residue_name, atom_name)
            .or_else(|| self.lookup(ANY_RESIDUE, atom_name))
    }
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Atom type '{type_name}' has invalid radius {radius}")]
    InvalidRadius { type_name: String, radius: f64 },
    #[error("Atom type '{type_name}' has unknown class '{class}'")]
    InvalidClass { type_name: String, class: String },
    #[error("Atom '{atom}' of residue '{residue}' refers to undefined type '{type_name}'")]
    UnknownType {
        residue: String,
        atom: String,
        type_name: String,
    },
}
