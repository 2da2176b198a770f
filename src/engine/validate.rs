//! Payload shape validation
//!
//! Confirms a decoded provider payload has the required plan shape before it
//! is wrapped into a `RoadmapPlan`. Validation happens in two stages: a
//! structural check on the raw JSON value (arrays present, exact lengths),
//! then a typed decode that also enforces sequential 1-based step numbering.

use serde_json::Value;

use crate::error::ParseError;
use crate::plan::{PlanPayload, RECOMMENDATION_COUNT, STEP_COUNT};

/// Structural check on a decoded JSON value
///
/// `steps` must be an array of exactly 5 entries and `recommendations` an
/// array of exactly 4. Field content is checked by the typed stage.
pub fn validate_shape(value: &Value) -> Result<(), ParseError> {
    let steps = value
        .get("steps")
        .ok_or_else(|| schema("missing 'steps' field"))?;
    let steps = steps
        .as_array()
        .ok_or_else(|| schema("'steps' is not a sequence"))?;
    if steps.len() != STEP_COUNT {
        return Err(schema(&format!(
            "'steps' must contain exactly {STEP_COUNT} entries, got {}",
            steps.len()
        )));
    }

    let recommendations = value
        .get("recommendations")
        .ok_or_else(|| schema("missing 'recommendations' field"))?;
    let recommendations = recommendations
        .as_array()
        .ok_or_else(|| schema("'recommendations' is not a sequence"))?;
    if recommendations.len() != RECOMMENDATION_COUNT {
        return Err(schema(&format!(
            "'recommendations' must contain exactly {RECOMMENDATION_COUNT} entries, got {}",
            recommendations.len()
        )));
    }

    Ok(())
}

/// Full validation: structural check plus typed decode
///
/// Success passes the payload through unchanged, ready to be wrapped into a
/// `RoadmapPlan`.
pub fn validate_payload(value: Value) -> Result<PlanPayload, ParseError> {
    validate_shape(&value)?;

    let payload: PlanPayload =
        serde_json::from_value(value).map_err(|e| schema(&format!("typed decode failed: {e}")))?;

    for (index, step) in payload.steps.iter().enumerate() {
        let expected = index as u32 + 1;
        if step.step != expected {
            return Err(schema(&format!(
                "step numbering must be sequential starting at 1: position {} has step {}",
                index + 1,
                step.step
            )));
        }
    }

    Ok(payload)
}

fn schema(reason: &str) -> ParseError {
    ParseError::Schema {
        reason: reason.to_string(),
    }
}
