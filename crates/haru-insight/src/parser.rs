// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured-response extraction from free-form model text.
//!
//! Extraction strategy: slice from the first `{` or `[` to the LAST matching
//! closing brace/bracket and parse the slice. This tolerates prose and code
//! fences around a single JSON block, which is how models usually misbehave.
//! Output containing several independent JSON blocks does NOT parse (the
//! slice spans them all) and costs a retry; that trade-off is intentional
//! and must not be changed silently.

use serde::de::DeserializeOwned;

use crate::error::PipelineError;

/// A payload that can check its own required-field contract after
/// deserialization. Shape mismatches and contract violations both surface
/// as [`PipelineError::Validation`], distinct from parse failures.
pub trait Validate {
    fn validate(&self) -> Result<(), PipelineError>;
}

/// Locate and parse the first balanced-looking JSON region in `text`.
///
/// Fails with [`PipelineError::Parse`] when no opening brace/bracket exists
/// or the extracted slice is not valid JSON.
pub fn extract_structured(text: &str) -> Result<serde_json::Value, PipelineError> {
    let open_obj = text.find('{');
    let open_arr = text.find('[');

    let (start, close) = match (open_obj, open_arr) {
        (Some(o), Some(a)) if a < o => (a, ']'),
        (Some(o), _) => (o, '}'),
        (None, Some(a)) => (a, ']'),
        (None, None) => {
            return Err(PipelineError::Parse(
                "no JSON object or array in model output".to_string(),
            ));
        }
    };

    let end = match text.rfind(close) {
        Some(e) if e > start => e,
        _ => {
            return Err(PipelineError::Parse(format!(
                "opening `{}` without a closing `{close}`",
                &text[start..=start]
            )));
        }
    };

    let slice = &text[start..=end];
    serde_json::from_str(slice)
        .map_err(|e| PipelineError::Parse(format!("extracted region is not valid JSON: {e}")))
}

/// Extract, deserialize, and validate a typed payload from model output.
pub fn parse_payload<T>(text: &str) -> Result<T, PipelineError>
where
    T: DeserializeOwned + Validate,
{
    let value = extract_structured(text)?;
    let payload: T = serde_json::from_value(value)
        .map_err(|e| PipelineError::Validation(format!("response shape mismatch: {e}")))?;
    payload.validate()?;
    Ok(payload)
}
