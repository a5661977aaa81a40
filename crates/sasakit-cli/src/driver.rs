use crate::error::{CliError, Result};
use crate::report;
use sasakit::workflows::area::{CalculationConfig, compute_area};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, instrument};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Processes `paths` in order, writing one block per structure to `out`.
///
/// The first failure aborts the run unless `keep_going` is set, in which
/// case failures are written to `err` and the run ends with
/// [`CliError::PartialFailure`] once every path has been tried.
#[instrument(skip_all, name = "driver", fields(paths = paths.len()))]
pub fn run<W: Write, E: Write>(
    paths: &[PathBuf],
    config: &CalculationConfig,
    keep_going: bool,
    out: &mut W,
    err: &mut E,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for path in paths {
        info!("Processing '{}'.", path.display());
        match compute_area(path, config) {
            Ok(area_report) => {
                report::write_block(out, path, &area_report)?;
                out.flush()?;
                summary.succeeded += 1;
            }
            Err(e) if keep_going => {
                writeln!(err, "Error: {}", e)?;
                summary.failed += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    if summary.failed > 0 {
        return Err(CliError::PartialFailure {
            failed: summary.failed,
            total: paths.len(),
        });
    }
    Ok(summary)
}
