// Few-shot policy generation experiment.
// Implements: fixture loading, prompt composition, response extraction, run orchestration.
// The model call goes through llm_client; scoring lives in comparison.

pub mod composer;
pub mod extractor;
pub mod fixtures;
pub mod prompts;
pub mod runner;
