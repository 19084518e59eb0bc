//! Run a pyramid job from resolved settings.

use std::fs;
use std::sync::Arc;

use tiler::manifest::Manifest;
use tiler::pyramid::{PyramidGenerator, PyramidReport};
use tiler::sink::FileTileSink;
use tiler::source::load_source;
use tiler::telemetry::PyramidMetrics;
use tiler::tile::expected_tile_count;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::CliError;
use crate::progress::ProgressReporter;
use crate::settings::Settings;

/// Exit code when at least one tile failed.
pub const EXIT_TILE_FAILURES: u8 = 3;
/// Exit code after Ctrl-C.
pub const EXIT_CANCELLED: u8 = 130;

/// Create the output directory, load the source and generate every level.
pub fn run(settings: &Settings, cancellation: CancellationToken) -> Result<PyramidReport, CliError> {
    let config = settings.pyramid_config(cancellation);
    config.validate()?;

    fs::create_dir_all(&settings.output).map_err(|source| CliError::OutputDir {
        path: settings.output.clone(),
        source,
    })?;

    let source = load_source(&settings.source)?;
    info!(
        source = %settings.source.display(),
        output = %settings.output.display(),
        format = %settings.format.encoding(),
        pattern = %settings.pattern,
        "Starting run"
    );

    let sink = FileTileSink::new(&settings.output, settings.pattern.clone(), settings.format);
    let metrics = Arc::new(PyramidMetrics::new());
    let progress = settings.progress.then(|| {
        ProgressReporter::start(Arc::clone(&metrics), expected_tile_count(settings.max_level))
    });

    let generator = PyramidGenerator::new(config, sink).with_metrics(metrics);
    let result = generator.generate(&source);
    if let Some(progress) = progress {
        progress.finish();
    }
    let report = result?;

    if settings.manifest {
        let path = Manifest::from_run(
            source.dimensions(),
            generator.config(),
            settings.format,
            settings.pattern.as_str(),
            &report,
        )
        .write_to_dir(&settings.output)?;
        info!(path = %path.display(), "Manifest written");
    }

    Ok(report)
}

/// Map a finished run to the process exit code.
pub fn exit_code(report: &PyramidReport) -> u8 {
    if report.cancelled {
        EXIT_CANCELLED
    } else if report.tiles_failed() > 0 {
        EXIT_TILE_FAILURES
    } else {
        0
    }
}

/// Print the end-of-run summary to stdout.
pub fn print_summary(settings: &Settings, report: &PyramidReport) {
    println!(
        "Generated {} tiles in {} levels under {} ({:.2}s)",
        report.tiles_written(),
        report.levels.len(),
        settings.output.display(),
        report.elapsed.as_secs_f64()
    );

    if report.tiles_failed() > 0 {
        println!("{} tiles failed:", report.tiles_failed());
        for failure in report.failures() {
            println!("  {}: {}", failure.coord, failure.message);
        }
    }
    if report.cancelled {
        println!(
            "Cancelled: {} tiles were not generated",
            report.tiles_skipped()
        );
    }
}
