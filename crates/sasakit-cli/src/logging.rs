use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_subscriber::{Layer, filter::LevelFilter, fmt, prelude::*, registry::LookupSpan};

fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

fn stderr_layer<S>() -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .boxed()
}

// Spans carry the file being processed, so the file log keeps them in full.
fn file_layer<S>(file: File) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .boxed()
}

/// Installs the global subscriber. Logs go to stderr, and to `log_file` as
/// well when given, so stdout carries only the area report.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let file = log_file.map(File::create).transpose()?;

    tracing_subscriber::registry()
        .with(level_filter(verbosity, quiet))
        .with(stderr_layer())
        .with(file.map(file_layer))
        .try_init()
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install logger: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tracing::{debug, info, info_span, warn};

    fn log_to_file(verbosity: u8, quiet: bool, emit: impl FnOnce()) -> String {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("sasakit.log");
        let file = File::create(&log_path).unwrap();

        let subscriber = tracing_subscriber::registry()
            .with(level_filter(verbosity, quiet))
            .with(file_layer(file));
        tracing::subscriber::with_default(subscriber, emit);

        std::fs::read_to_string(log_path).unwrap()
    }

    #[test]
    fn verbosity_maps_to_level_filter() {
        assert_eq!(level_filter(0, false), LevelFilter::WARN);
        assert_eq!(level_filter(1, false), LevelFilter::INFO);
        assert_eq!(level_filter(2, false), LevelFilter::DEBUG);
        assert_eq!(level_filter(7, false), LevelFilter::TRACE);
        assert_eq!(level_filter(3, true), LevelFilter::OFF);
    }

    #[test]
    fn default_level_keeps_radius_warnings_and_drops_progress() {
        let content = log_to_file(0, false, || {
            info!("Processing '1ubq.pdb'.");
            warn!("Atom 'ZN' in ZN 101 of chain 'A' is unknown to classifier 'ProtOr'.");
        });
        assert!(content.contains("WARN"));
        assert!(content.contains("unknown to classifier"));
        assert!(!content.contains("Processing"));
    }

    #[test]
    fn file_records_are_plain_and_carry_the_workflow_span() {
        let content = log_to_file(2, false, || {
            let span = info_span!("area_workflow", path = "1ubq.pdb");
            let _guard = span.enter();
            debug!("Calculation parameters.");
        });
        assert!(content.contains("DEBUG"));
        assert!(content.contains("area_workflow"));
        assert!(content.contains("path=\"1ubq.pdb\""));
        assert!(!content.contains('\u{1b}'));
    }

    #[test]
    fn quiet_silences_warnings() {
        let content = log_to_file(3, true, || warn!("Skipping unknown atom."));
        assert!(content.is_empty());
    }

    #[test]
    #[serial]
    fn unwritable_log_file_is_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = setup_logging(0, false, Some(temp_dir.path().to_path_buf()));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    #[serial]
    fn second_installation_reports_error_instead_of_panicking() {
        let _ = setup_logging(0, true, None);
        assert!(matches!(
            setup_logging(0, true, None),
            Err(CliError::Other(_))
        ));
    }
}
