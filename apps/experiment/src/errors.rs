use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::fewshot::extractor::ExtractError;
use crate::llm_client::LlmError;

/// Everything that can abort an experiment run after configuration succeeded.
#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("Failed to read fixture {}: {}", .path.display(), .source)]
    FixtureRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Fixture {} is not a valid JSON object: {}", .path.display(), .source)]
    FixtureParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Model call failed: {0}")]
    Model(#[from] LlmError),

    #[error("Could not extract policy JSON from model response: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Failed to write {}: {}", .path.display(), .source)]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ExperimentError {
    /// True for failures of the generation step (model call or response parsing).
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, ExperimentError::Model(_) | ExperimentError::Extraction(_))
    }
}
