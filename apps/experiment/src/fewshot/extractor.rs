//! Response Extractor — pulls the policy JSON object out of free-form model text.
//!
//! Takes everything from the first `{` to the last `}` inclusive. This tolerates
//! prose or code fences around a single object; it is not a JSON tokenizer.

use thiserror::Error;

use crate::comparison::flatten::Record;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no JSON object found in model response")]
    NoDocument,

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Returns the span from the first `{` to the last `}`, if there is one.
pub fn locate_document(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

pub fn extract_record(text: &str) -> Result<Record, ExtractError> {
    let document = locate_document(text).ok_or(ExtractError::NoDocument)?;
    Ok(serde_json::from_str(document)?)
}
