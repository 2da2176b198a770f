//! Deterministic prompt construction for roadmap generation
//!
//! Both adapters send the same prompt so that provider failover does not
//! change what is being asked. The prompt instructs the model to answer with
//! a bare JSON object only; the extractor still tolerates prose and code
//! fences because providers routinely ignore that instruction.

use crate::goal::GoalDescriptor;
use crate::plan::{RECOMMENDATION_COUNT, STEP_COUNT};

/// Substituted when the goal has no free-text description
const EMPTY_DESCRIPTION_PLACEHOLDER: &str = "(no additional details provided)";

/// Cap on goal fields interpolated into the prompt, in characters
///
/// Keeps a hostile or runaway goal description from blowing up the request
/// body or drowning the formatting instructions.
const MAX_FIELD_CHARS: usize = 500;

fn clamp(field: &str) -> String {
    if field.chars().count() > MAX_FIELD_CHARS {
        let truncated: String = field.chars().take(MAX_FIELD_CHARS).collect();
        format!("{truncated}... [truncated]")
    } else {
        field.to_string()
    }
}

/// Build the generation prompt for a goal
///
/// Deterministic: identical goals always produce identical prompts.
pub fn build_prompt(goal: &GoalDescriptor) -> String {
    let description = if goal.description.trim().is_empty() {
        EMPTY_DESCRIPTION_PLACEHOLDER.to_string()
    } else {
        clamp(&goal.description)
    };

    format!(
        "You are a planning assistant that turns personal goals into actionable roadmaps.\n\n\
         Goal title: {title}\n\
         Goal category: {category}\n\
         Goal description: {description}\n\n\
         Produce a production plan for this goal as a single JSON object with exactly this shape:\n\
         {{\n\
           \"steps\": [{{\"step\": 1, \"title\": \"...\", \"description\": \"...\"}}, ...],\n\
           \"estimated_cost\": \"...\",\n\
           \"timeline\": \"...\",\n\
           \"recommendations\": [{{\"type\": \"PLACE|APP|TIP|FOOD\", \"title\": \"...\", \"description\": \"...\"}}, ...]\n\
         }}\n\n\
         Requirements:\n\
         - exactly {steps} steps, numbered 1 through {steps} in order\n\
         - exactly {recs} recommendations, each with type PLACE, APP, TIP, or FOOD\n\
         - write all titles and descriptions in English\n\
         - respond with ONLY the JSON object. No prose, no markdown fences, no explanations.",
        title = clamp(&goal.title),
        category = clamp(&goal.category),
        description = description,
        steps = STEP_COUNT,
        recs = RECOMMENDATION_COUNT,
    )
}
