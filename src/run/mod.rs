//! Pipeline orchestration.
//!
//! A run moves through
//! `Validating -> CreatingOutputs -> Locating -> Listing -> Decoding -> Reporting -> CleaningUp -> Done`.
//! A fatal error in any stage ends it in `Aborted`. Finding no segments ends it
//! in `Done` without producing a report.
//!
//! Stages run strictly one after the other on the calling thread; decoding
//! blocks until the external decoder exits.

mod finalize;
mod outputs;

use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Local};
use log::{debug, info};

use crate::config::{Config, WorkingConfig};
use crate::decode::LogDecoder;
use crate::error_handling::ReportError;
use crate::report::{build_report, OperationReport};
use crate::segments::{locate_segments, write_segment_list};
use crate::window::TimeWindow;

pub use finalize::remove_raw_log;
pub use outputs::OutputFiles;

/// Steps of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Validating,
    CreatingOutputs,
    Locating,
    Listing,
    Decoding,
    Reporting,
    CleaningUp,
    Done,
    Aborted,
}

impl RunStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStage::Validating => "validating",
            RunStage::CreatingOutputs => "creating outputs",
            RunStage::Locating => "locating segments",
            RunStage::Listing => "listing segments",
            RunStage::Decoding => "decoding",
            RunStage::Reporting => "reporting",
            RunStage::CleaningUp => "cleaning up",
            RunStage::Done => "done",
            RunStage::Aborted => "aborted",
        }
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Results of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Window the segments were selected from
    pub window: TimeWindow,
    /// Number of segments decoded
    pub segment_count: usize,
    /// Segment list
    pub manifest_path: PathBuf,
    /// Operation report
    pub report_path: PathBuf,
    /// Combined decoder output (removed unless `raw_log_removed` is false)
    pub raw_log_path: PathBuf,
    /// Report content
    pub operations: OperationReport,
    /// Decoder exited non-zero without a message
    pub decoder_warned: bool,
    /// Whether the combined log was deleted
    pub raw_log_removed: bool,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// How a run that did not abort ended.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// Report written.
    Completed(RunReport),
    /// Nothing matched the prefix and window; the output files stay empty.
    NoMatchingSegments { message: String },
}

/// Validates `config` and runs the pipeline.
///
/// # Errors
///
/// Any fatal [`ReportError`]; the caller should exit non-zero.
///
/// # Example
///
/// ```no_run
/// use binlog_report::{run_pipeline, Config, RunOutcome};
///
/// let config = Config {
///     dt_from: "2024-05-01".to_string(),
///     output_path: "/tmp".to_string(),
///     ..Default::default()
/// };
/// match run_pipeline(&config)? {
///     RunOutcome::Completed(report) => println!("{}", report.report_path.display()),
///     RunOutcome::NoMatchingSegments { message } => println!("{message}"),
/// }
/// # Ok::<(), binlog_report::ReportError>(())
/// ```
pub fn run_pipeline(config: &Config) -> Result<RunOutcome, ReportError> {
    let started = Instant::now();
    let started_at = Local::now();

    debug!("Run stage: {}", RunStage::Validating);
    let working = config.validate_at(started_at).map_err(|e| {
        debug!("{} failed ({}): {e}", RunStage::Validating, e.kind());
        debug!("Run stage: {}", RunStage::Aborted);
        e
    })?;
    info!(
        "Window {}, segments {}{}.<digits>, operations {}",
        working.window,
        working.source_dir.display(),
        working.segment_prefix,
        working.operations
    );

    run_with(&working, started_at, started)
}

/// Runs every stage after validation against an already validated configuration.
///
/// `started_at` names the output files; `started` times the run.
pub fn run_with(
    working: &WorkingConfig,
    started_at: DateTime<Local>,
    started: Instant,
) -> Result<RunOutcome, ReportError> {
    let mut stage = RunStage::Validating;

    match execute(working, started_at, started, &mut stage) {
        Ok(outcome) => {
            enter(&mut stage, RunStage::Done);
            Ok(outcome)
        }
        Err(e) if !e.is_fatal() => {
            debug!("{stage} ended early: {e}");
            enter(&mut stage, RunStage::Done);
            Ok(RunOutcome::NoMatchingSegments {
                message: e.to_string(),
            })
        }
        Err(e) => {
            debug!("{stage} failed ({}): {e}", e.kind());
            enter(&mut stage, RunStage::Aborted);
            Err(e)
        }
    }
}

fn enter(stage: &mut RunStage, next: RunStage) {
    debug!("Run stage: {stage} -> {next}");
    *stage = next;
}

fn execute(
    working: &WorkingConfig,
    started_at: DateTime<Local>,
    started: Instant,
    stage: &mut RunStage,
) -> Result<RunOutcome, ReportError> {
    enter(stage, RunStage::CreatingOutputs);
    let outputs = OutputFiles::for_run(&working.output_dir, started_at);
    outputs.create_all()?;

    enter(stage, RunStage::Locating);
    let segments = locate_segments(
        &working.window,
        &working.source_dir,
        &working.segment_prefix,
    )?;

    enter(stage, RunStage::Listing);
    write_segment_list(&segments, &outputs.manifest)?;

    enter(stage, RunStage::Decoding);
    let decoder = LogDecoder::new(working.decoder.as_str());
    let decode_outcome = decoder.decode(&segments, &outputs.raw_log)?;

    enter(stage, RunStage::Reporting);
    let operations = build_report(&outputs.raw_log, &working.operations, &outputs.report)?;

    enter(stage, RunStage::CleaningUp);
    let raw_log_removed = remove_raw_log(&outputs.raw_log);

    Ok(RunOutcome::Completed(RunReport {
        window: working.window,
        segment_count: segments.len(),
        manifest_path: outputs.manifest,
        report_path: outputs.report,
        raw_log_path: outputs.raw_log,
        operations,
        decoder_warned: decode_outcome.is_warning(),
        raw_log_removed,
        elapsed_seconds: started.elapsed().as_secs_f64(),
    }))
}
