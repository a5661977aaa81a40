use clap::{Parser, ValueEnum};
use sasakit::engine::params::Algorithm;
use sasakit::workflows::area::Depth;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "sasakit - Solvent accessible surface area of PDB structures.\n\nPrints total, non-polar and polar SASA for every file, in the order given.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// PDB files to process, in order. No paths is a successful no-op.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep processing the remaining files after one fails.
    /// The exit status is still 1 if any file failed.
    #[arg(long)]
    pub keep_going: bool,

    /// How finely to break down the reported areas.
    #[arg(long, value_enum, value_name = "DEPTH")]
    pub depth: Option<DepthArg>,

    // --- Classifier Override ---
    /// Classifier definition in TOML format, or 'protor' for the built-in radii.
    #[arg(long, value_name = "NAME_OR_PATH", help_heading = "Classification")]
    pub classifier: Option<String>,

    // --- Calculation Overrides ---
    /// Surface area algorithm.
    #[arg(long, value_enum, value_name = "ALGORITHM", help_heading = "Calculation")]
    pub algorithm: Option<AlgorithmArg>,

    /// Probe radius in Angstroms.
    #[arg(long, value_name = "FLOAT", help_heading = "Calculation")]
    pub probe_radius: Option<f64>,

    /// Test points (Shrake-Rupley) or slices (Lee-Richards) per atom.
    #[arg(long, value_name = "INT", help_heading = "Calculation")]
    pub resolution: Option<usize>,

    // --- Structure Options ---
    /// Include HETATM records.
    #[arg(long, help_heading = "Structure")]
    pub hetatm: bool,

    /// Include hydrogen atoms.
    #[arg(long, help_heading = "Structure")]
    pub hydrogen: bool,

    /// Read all models into one structure instead of only the first.
    #[arg(long, help_heading = "Structure")]
    pub join_models: bool,

    /// Skip atoms the classifier does not know instead of guessing their radius.
    #[arg(long, help_heading = "Structure")]
    pub skip_unknown: bool,

    /// Fail on atoms the classifier does not know.
    #[arg(long, help_heading = "Structure")]
    pub halt_at_unknown: bool,

    /// Read atomic radii from the occupancy column (55-60).
    #[arg(long, help_heading = "Structure")]
    pub radius_from_occupancy: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S calculation.probe-radius=1.2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmArg {
    LeeRichards,
    ShrakeRupley,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::LeeRichards => Algorithm::LeeRichards,
            AlgorithmArg::ShrakeRupley => Algorithm::ShrakeRupley,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthArg {
    Structure,
    Chain,
    Residue,
}

impl From<DepthArg> for Depth {
    fn from(arg: DepthArg) -> Self {
        match arg {
            DepthArg::Structure => Depth::Structure,
            DepthArg::Chain => Depth::Chain,
            DepthArg::Residue => Depth::Residue,
        }
    }
}
