use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SasaError {
    #[error("Invalid calculation parameters: {0}")]
    InvalidParameters(String),

    #[error(
        "Atom {index} ('{atom}' in residue {residue} of chain '{chain}') has a non-finite coordinate"
    )]
    NonFiniteCoordinate {
        index: usize,
        atom: String,
        residue: String,
        chain: char,
    },

    #[error("Result was computed from structure '{result_structure}', not from '{structure}'")]
    Mismatch {
        structure: String,
        result_structure: String,
    },
}
