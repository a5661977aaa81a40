use crate::core::classifier::ClassifierChoice;
use crate::core::io::pdb::{PdbError, PdbFile};
use crate::core::io::traits::{StructureFile, structure_name};
use crate::core::models::structure::StructureOptions;
use crate::engine::error::SasaError;
use crate::engine::params::Parameters;
use crate::engine::result::{ChainArea, ClassifiedArea, ResidueArea, classify};
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// How finely a report breaks down the surface area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Depth {
    /// Whole-structure totals only.
    #[default]
    Structure,
    /// Totals plus one entry per chain.
    Chain,
    /// Totals plus one entry per residue.
    Residue,
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Depth::Structure => "structure",
            Depth::Chain => "chain",
            Depth::Residue => "residue",
        })
    }
}

impl FromStr for Depth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "structure" => Ok(Depth::Structure),
            "chain" => Ok(Depth::Chain),
            "residue" => Ok(Depth::Residue),
            other => Err(format!(
                "unknown depth '{other}', expected 'structure', 'chain' or 'residue'"
            )),
        }
    }
}

/// Everything needed to turn one structure file into an [`AreaReport`].
///
/// The default reads the first model's protein atoms with ProtOr radii and
/// runs Lee-Richards with a 1.4 Å probe.
#[derive(Debug, Clone, Default)]
pub struct CalculationConfig {
    pub classifier: ClassifierChoice,
    pub structure_options: StructureOptions,
    pub parameters: Parameters,
    pub depth: Depth,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AreaReport {
    pub structure_name: String,
    pub atom_count: usize,
    pub area: ClassifiedArea,
    /// Filled only at [`Depth::Chain`].
    pub chains: Vec<ChainArea>,
    /// Filled only at [`Depth::Residue`].
    pub residues: Vec<ResidueArea>,
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Could not open file '{path}': {source}", path = path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error reading structure from '{path}': {source}", path = path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error("Error calculating SASA for '{path}': {source}", path = path.display())]
    Compute {
        path: PathBuf,
        #[source]
        source: SasaError,
    },
}

impl WorkflowError {
    pub fn path(&self) -> &Path {
        match self {
            WorkflowError::Open { path, .. }
            | WorkflowError::Parse { path, .. }
            | WorkflowError::Compute { path, .. } => path,
        }
    }
}

/// Reads one PDB file and computes its surface area report.
///
/// The structure and its result only live for the duration of this call;
/// the result is dropped before the structure on every return path.
///
/// # Errors
///
/// * [`WorkflowError::Open`] - the file cannot be opened or is not a regular file.
/// * [`WorkflowError::Parse`] - the file yields no usable structure.
/// * [`WorkflowError::Compute`] - the calculation fails.
#[instrument(skip_all, name = "area_workflow", fields(path = %path.display()))]
pub fn compute_area(path: &Path, config: &CalculationConfig) -> Result<AreaReport, WorkflowError> {
    let open_error = |source| WorkflowError::Open {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(open_error)?;
    if !file.metadata().map_err(open_error)?.is_file() {
        return Err(open_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }
    let mut reader = BufReader::new(file);
    let name = structure_name(path);

    let structure = PdbFile::read_from(
        &mut reader,
        &name,
        config.classifier.as_classifier(),
        &config.structure_options,
    )
    .map_err(|source| WorkflowError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Read structure {structure}.");
    debug!(
        algorithm = %config.parameters.algorithm,
        probe_radius = config.parameters.probe_radius,
        resolution = config.parameters.resolution(),
        classifier = structure.classifier_name(),
        "Calculation parameters."
    );

    let compute_error = |source| WorkflowError::Compute {
        path: path.to_path_buf(),
        source,
    };
    let result = structure
        .calculate_sasa(&config.parameters)
        .map_err(compute_error)?;
    let area = classify(&structure, &result).map_err(compute_error)?;

    let report = AreaReport {
        structure_name: structure.name().to_string(),
        atom_count: structure.len(),
        area,
        chains: match config.depth {
            Depth::Chain => result.chain_areas(),
            _ => Vec::new(),
        },
        residues: match config.depth {
            Depth::Residue => result.residue_areas(),
            _ => Vec::new(),
        },
    };

    info!("Total SASA of {}: {:.2} A^2.", structure.name(), area.total);
    Ok(report)
}
