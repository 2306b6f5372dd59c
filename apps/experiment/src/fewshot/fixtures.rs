//! Fixture Loader — reads the five training pairs and the held-out pair from the data directory.
//!
//! Layout: `acord_form_{i}.txt` holds the raw application form and
//! `policy_{i}.json` the matching policy record, for i = 1..=6.
//! Indices 1–5 are training examples; index 6 is the held-out test case.

use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::comparison::flatten::Record;
use crate::errors::ExperimentError;

pub const TRAINING_INDICES: RangeInclusive<usize> = 1..=5;
pub const HELD_OUT_INDEX: usize = 6;

/// One (form, policy) pair shown to the model.
#[derive(Debug, Clone)]
pub struct TrainingExample {
    pub index: usize,
    pub form: String,
    /// Exact file contents, rendered verbatim into the prompt.
    pub record_text: String,
    pub record: Record,
}

/// The unseen form and the policy the model is scored against.
#[derive(Debug, Clone)]
pub struct HeldOutCase {
    pub form: String,
    pub reference: Record,
}

pub fn form_path(base: &Path, index: usize) -> PathBuf {
    base.join(format!("acord_form_{index}.txt"))
}

pub fn record_path(base: &Path, index: usize) -> PathBuf {
    base.join(format!("policy_{index}.json"))
}

/// Loads training examples 1–5 in index order.
pub fn load_training_examples(base: &Path) -> Result<Vec<TrainingExample>, ExperimentError> {
    TRAINING_INDICES
        .map(|index| -> Result<TrainingExample, ExperimentError> {
            let form = read_text(&form_path(base, index))?;
            let path = record_path(base, index);
            let record_text = read_text(&path)?;
            let record = parse_record(&path, &record_text)?;
            debug!(
                "Loaded training example {index} ({} top-level fields)",
                record.len()
            );
            Ok(TrainingExample {
                index,
                form,
                record_text,
                record,
            })
        })
        .collect()
}

/// Loads the held-out form and its reference policy.
pub fn load_held_out(base: &Path) -> Result<HeldOutCase, ExperimentError> {
    let form = read_text(&form_path(base, HELD_OUT_INDEX))?;
    let path = record_path(base, HELD_OUT_INDEX);
    let reference = parse_record(&path, &read_text(&path)?)?;
    Ok(HeldOutCase { form, reference })
}

fn read_text(path: &Path) -> Result<String, ExperimentError> {
    debug!("Reading fixture {}", path.display());
    fs::read_to_string(path).map_err(|source| ExperimentError::FixtureRead {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_record(path: &Path, text: &str) -> Result<Record, ExperimentError> {
    serde_json::from_str(text).map_err(|source| ExperimentError::FixtureParse {
        path: path.to_path_buf(),
        source,
    })
}
