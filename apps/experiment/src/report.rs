//! Reporter — console summary and the two result files.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::comparison::flatten::Record;
use crate::comparison::{ComparisonDetails, ComparisonMetrics, ComparisonOutcome};
use crate::errors::ExperimentError;

pub const GENERATED_RECORD_FILE: &str = "generated_policy_6.json";
pub const COMPARISON_RESULTS_FILE: &str = "comparison_results.json";
pub const SAMPLE_MISMATCH_LIMIT: usize = 5;

/// Identity of a single experiment run, stored with the comparison results.
#[derive(Debug, Clone, Serialize)]
pub struct RunMetadata {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub model: String,
    pub prompt_chars: usize,
}

impl RunMetadata {
    /// `started_at` is taken by the caller before any fixture is read.
    pub fn new(started_at: DateTime<Utc>, model: &str, prompt: &str) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at,
            model: model.to_string(),
            prompt_chars: prompt.chars().count(),
        }
    }
}

#[derive(Serialize)]
struct ComparisonReport<'a> {
    run: &'a RunMetadata,
    metrics: &'a ComparisonMetrics,
    details: &'a ComparisonDetails,
}

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub generated_record: PathBuf,
    pub comparison_results: PathBuf,
}

/// Writes the generated policy and the comparison report into `dir`.
///
/// Both documents are serialized before either file is touched.
pub fn write_outputs(
    dir: &Path,
    generated: &Record,
    outcome: &ComparisonOutcome,
    run: &RunMetadata,
) -> Result<OutputPaths, ExperimentError> {
    let generated_json = serde_json::to_string_pretty(generated)?;
    let report_json = serde_json::to_string_pretty(&ComparisonReport {
        run,
        metrics: &outcome.metrics,
        details: &outcome.details,
    })?;

    fs::create_dir_all(dir).map_err(|source| ExperimentError::Output {
        path: dir.to_path_buf(),
        source,
    })?;

    let paths = OutputPaths {
        generated_record: dir.join(GENERATED_RECORD_FILE),
        comparison_results: dir.join(COMPARISON_RESULTS_FILE),
    };
    write_file(&paths.generated_record, &generated_json)?;
    write_file(&paths.comparison_results, &report_json)?;

    info!(
        "Wrote {} and {}",
        paths.generated_record.display(),
        paths.comparison_results.display()
    );
    Ok(paths)
}

fn write_file(path: &Path, contents: &str) -> Result<(), ExperimentError> {
    fs::write(path, contents).map_err(|source| ExperimentError::Output {
        path: path.to_path_buf(),
        source,
    })
}

/// Formats a 0.0 – 1.0 ratio as a percentage with two decimals.
pub fn percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

pub fn render_summary(metrics: &ComparisonMetrics) -> String {
    format!(
        "Overall Accuracy: {}\n\
         Exact Match Rate: {}\n\
         \n\
         Total Fields (Ground Truth): {}\n\
         Total Fields (Generated): {}\n\
         \n\
         Exact Matches: {}\n\
         Close Matches: {}\n\
         Mismatches: {}\n\
         Missing Fields: {}\n\
         Extra Fields: {}\n",
        percent(metrics.accuracy),
        percent(metrics.exact_match_rate),
        metrics.total_fields_in_ground_truth,
        metrics.total_fields_in_generated,
        metrics.exact_matches,
        metrics.close_matches,
        metrics.mismatches,
        metrics.missing_fields,
        metrics.extra_fields,
    )
}

/// Lists up to `limit` mismatches. Empty when there are none.
pub fn render_sample_mismatches(details: &ComparisonDetails, limit: usize) -> String {
    if details.mismatches.is_empty() {
        return String::new();
    }

    let mut out = format!("Sample Mismatches (first {limit}):\n");
    for mismatch in details.mismatches.iter().take(limit) {
        out.push_str(&format!(
            "  • {}\n    Generated: {}\n    Expected:  {}\n",
            mismatch.field, mismatch.generated, mismatch.ground_truth
        ));
    }
    out
}
