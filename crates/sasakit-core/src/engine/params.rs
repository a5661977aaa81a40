use super::error::SasaError;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PROBE_RADIUS: f64 = 1.4;
pub const DEFAULT_SHRAKE_RUPLEY_POINTS: usize = 100;
pub const DEFAULT_LEE_RICHARDS_SLICES: usize = 20;

/// Surface area algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// Slices every sphere into slabs and measures the exposed arc in each.
    #[default]
    LeeRichards,
    /// Counts exposed test points spread over every sphere.
    ShrakeRupley,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::LeeRichards => "lee-richards",
            Algorithm::ShrakeRupley => "shrake-rupley",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lee-richards" | "lee_richards" | "lr" => Ok(Algorithm::LeeRichards),
            "shrake-rupley" | "shrake_rupley" | "sr" => Ok(Algorithm::ShrakeRupley),
            other => Err(format!(
                "unknown algorithm '{other}', expected 'lee-richards' or 'shrake-rupley'"
            )),
        }
    }
}

/// Parameters of a surface area calculation.
///
/// The defaults are a 1.4 Å probe with Lee-Richards at 20 slices per atom;
/// Shrake-Rupley uses 100 test points per atom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub algorithm: Algorithm,
    /// Probe radius in Angstroms, added to every atomic radius.
    pub probe_radius: f64,
    /// Test points per atom for Shrake-Rupley.
    pub n_points: usize,
    /// Slices per atom for Lee-Richards.
    pub n_slices: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            probe_radius: DEFAULT_PROBE_RADIUS,
            n_points: DEFAULT_SHRAKE_RUPLEY_POINTS,
            n_slices: DEFAULT_LEE_RICHARDS_SLICES,
        }
    }
}

impl Parameters {
    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::default()
    }

    /// Points or slices, whichever the selected algorithm uses.
    pub fn resolution(&self) -> usize {
        match self.algorithm {
            Algorithm::LeeRichards => self.n_slices,
            Algorithm::ShrakeRupley => self.n_points,
        }
    }

    pub fn validate(&self) -> Result<(), SasaError> {
        if !self.probe_radius.is_finite() || self.probe_radius < 0.0 {
            return Err(SasaError::InvalidParameters(format!(
                "probe radius must be a finite, non-negative number (got {})",
                self.probe_radius
            )));
        }
        if self.n_points == 0 {
            return Err(SasaError::InvalidParameters(
                "Shrake-Rupley needs at least one test point".to_string(),
            ));
        }
        if self.n_slices == 0 {
            return Err(SasaError::InvalidParameters(
                "Lee-Richards needs at least one slice".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct ParametersBuilder {
    algorithm: Option<Algorithm>,
    probe_radius: Option<f64>,
    n_points: Option<usize>,
    n_slices: Option<usize>,
    resolution: Option<usize>,
}

impl ParametersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }
    pub fn probe_radius(mut self, radius: f64) -> Self {
        self.probe_radius = Some(radius);
        self
    }
    pub fn n_points(mut self, n: usize) -> Self {
        self.n_points = Some(n);
        self
    }
    pub fn n_slices(mut self, n: usize) -> Self {
        self.n_slices = Some(n);
        self
    }

    /// Sets points or slices depending on the algorithm chosen at build time.
    ///
    /// Takes precedence over [`n_points`](Self::n_points) or
    /// [`n_slices`](Self::n_slices) for that algorithm, in any call order.
    pub fn resolution(mut self, n: usize) -> Self {
        self.resolution = Some(n);
        self
    }

    pub fn build(self) -> Result<Parameters, SasaError> {
        let defaults = Parameters::default();
        let mut parameters = Parameters {
            algorithm: self.algorithm.unwrap_or(defaults.algorithm),
            probe_radius: self.probe_radius.unwrap_or(defaults.probe_radius),
            n_points: self.n_points.unwrap_or(defaults.n_points),
            n_slices: self.n_slices.unwrap_or(defaults.n_slices),
        };
        if let Some(n) = self.resolution {
            match parameters.algorithm {
                Algorithm::LeeRichards => parameters.n_slices = n,
                Algorithm::ShrakeRupley => parameters.n_points = n,
            }
        }
        parameters.validate()?;
        Ok(parameters)
    }
}
