use crate::cli::Cli;
use crate::error::{CliError, Result};
use sasakit::core::classifier::{Classifier, ClassifierChoice, ConfigClassifier};
use sasakit::core::models::structure::StructureOptions;
use sasakit::engine::params::{Algorithm, Parameters};
use sasakit::workflows::area::{CalculationConfig, Depth};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

const BUILTIN_CLASSIFIER: &str = "protor";

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialStructureConfig {
    include_hetatm: Option<bool>,
    include_hydrogen: Option<bool>,
    join_models: Option<bool>,
    skip_unknown: Option<bool>,
    halt_at_unknown: Option<bool>,
    radius_from_occupancy: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialCalculationConfig {
    algorithm: Option<String>,
    probe_radius: Option<f64>,
    shrake_rupley_points: Option<usize>,
    lee_richards_slices: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    classifier: Option<String>,
    depth: Option<String>,
    structure: Option<PartialStructureConfig>,
    calculation: Option<PartialCalculationConfig>,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads the file named by `--config`, if any, and layers the command
    /// line on top of it.
    pub fn resolve(cli: &Cli) -> Result<CalculationConfig> {
        let partial = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        partial.merge_with_cli(cli)
    }

    pub fn merge_with_cli(mut self, cli: &Cli) -> Result<CalculationConfig> {
        self.apply_set_values(&cli.set_values)?;

        let structure_config = self.structure.take().unwrap_or_default();
        let calc_config = self.calculation.take().unwrap_or_default();

        let classifier = Self::resolve_classifier(
            cli.classifier.as_deref().or(self.classifier.as_deref()),
        )?;

        let depth = match (cli.depth, self.depth.as_deref()) {
            (Some(arg), _) => arg.into(),
            (None, Some(value)) => parse_value::<Depth>("depth", value)?,
            (None, None) => Depth::default(),
        };

        let structure_options = StructureOptions {
            include_hetatm: cli.hetatm || structure_config.include_hetatm.unwrap_or(false),
            include_hydrogen: cli.hydrogen || structure_config.include_hydrogen.unwrap_or(false),
            join_models: cli.join_models || structure_config.join_models.unwrap_or(false),
            skip_unknown: cli.skip_unknown || structure_config.skip_unknown.unwrap_or(false),
            halt_at_unknown: cli.halt_at_unknown
                || structure_config.halt_at_unknown.unwrap_or(false),
            radius_from_occupancy: cli.radius_from_occupancy
                || structure_config.radius_from_occupancy.unwrap_or(false),
            ..Default::default()
        };

        let algorithm = match (cli.algorithm, calc_config.algorithm.as_deref()) {
            (Some(arg), _) => arg.into(),
            (None, Some(value)) => parse_value::<Algorithm>("calculation.algorithm", value)?,
            (None, None) => Algorithm::default(),
        };

        let mut builder = Parameters::builder().algorithm(algorithm);
        if let Some(radius) = cli.probe_radius.or(calc_config.probe_radius) {
            builder = builder.probe_radius(radius);
        }
        if let Some(n) = calc_config.shrake_rupley_points {
            builder = builder.n_points(n);
        }
        if let Some(n) = calc_config.lee_richards_slices {
            builder = builder.n_slices(n);
        }
        if let Some(n) = cli.resolution {
            builder = builder.resolution(n);
        }
        let parameters = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let config = CalculationConfig {
            classifier,
            structure_options,
            parameters,
            depth,
        };
        debug!("Resolved configuration: {:?}", &config);
        Ok(config)
    }

    fn resolve_classifier(name_or_path: Option<&str>) -> Result<ClassifierChoice> {
        match name_or_path {
            None => Ok(ClassifierChoice::ProtOr),
            Some(name) if name.eq_ignore_ascii_case(BUILTIN_CLASSIFIER) => {
                Ok(ClassifierChoice::ProtOr)
            }
            Some(path) => {
                let classifier = ConfigClassifier::load(Path::new(path))?;
                info!(
                    "Loaded classifier '{}' with {} atom entries from '{}'.",
                    classifier.name(),
                    classifier.len(),
                    path
                );
                Ok(ClassifierChoice::Custom(classifier))
            }
        }
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let key = key.trim();
            let value_str = value_str.trim();

            match key {
                "classifier" => self.classifier = Some(value_str.to_string()),
                "depth" => self.depth = Some(value_str.to_string()),
                "calculation.algorithm" => {
                    self.calculation().algorithm = Some(value_str.to_string());
                }
                "calculation.probe-radius" => {
                    self.calculation().probe_radius = Some(parse_value(key, value_str)?);
                }
                "calculation.shrake-rupley-points" => {
                    self.calculation().shrake_rupley_points = Some(parse_value(key, value_str)?);
                }
                "calculation.lee-richards-slices" => {
                    self.calculation().lee_richards_slices = Some(parse_value(key, value_str)?);
                }
                "structure.include-hetatm" => {
                    self.structure().include_hetatm = Some(parse_value(key, value_str)?);
                }
                "structure.include-hydrogen" => {
                    self.structure().include_hydrogen = Some(parse_value(key, value_str)?);
                }
                "structure.join-models" => {
                    self.structure().join_models = Some(parse_value(key, value_str)?);
                }
                "structure.skip-unknown" => {
                    self.structure().skip_unknown = Some(parse_value(key, value_str)?);
                }
                "structure.halt-at-unknown" => {
                    self.structure().halt_at_unknown = Some(parse_value(key, value_str)?);
                }
                "structure.radius-from-occupancy" => {
                    self.structure().radius_from_occupancy = Some(parse_value(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }

    fn calculation(&mut self) -> &mut PartialCalculationConfig {
        self.calculation.get_or_insert_with(Default::default)
    }

    fn structure(&mut self) -> &mut PartialStructureConfig {
        self.structure.get_or_insert_with(Default::default)
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| CliError::Config(format!("Invalid value for {}: '{}' ({})", key, value, e)))
}
