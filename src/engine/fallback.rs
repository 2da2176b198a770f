//! Deterministic fallback roadmap templates
//!
//! The unconditional safety net: a pure, category-keyed generator of a
//! complete plan, used whenever no provider path succeeds. No randomness,
//! no I/O, no external calls - identical input always yields identical
//! output, so this path cannot fail.

use crate::goal::{GoalCategory, GoalDescriptor};
use crate::plan::{Recommendation, RecommendationKind, RoadmapPlan, Step};

/// Placeholder cost attached to every template plan (not computed from the goal)
pub const FALLBACK_ESTIMATED_COST: &str = "Flexible - depends on your approach";

/// Placeholder timeline attached to every template plan
pub const FALLBACK_TIMELINE: &str = "About 3 months";

/// Message attached when no provider is configured at all
pub const NO_PROVIDER_MESSAGE: &str =
    "No roadmap provider is configured. A curated template roadmap was generated instead.";

/// Message attached when the last provider failure was rate limiting
pub const RATE_LIMITED_MESSAGE: &str =
    "The roadmap provider is currently rate limited. A curated template roadmap was generated instead.";

/// Message attached for any other provider failure
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Roadmap generation failed. A curated template roadmap was generated instead.";

/// Build a complete template plan for a goal
///
/// Known categories get a hand-authored plan; everything else gets the
/// default template, whose first step interpolates the goal title. The
/// orchestrator overwrites `message` with the variant matching why fallback
/// was reached.
pub fn build_fallback(goal: &GoalDescriptor) -> RoadmapPlan {
    let (steps, recommendations) = match goal.category() {
        GoalCategory::Travel => travel_template(),
        GoalCategory::Skill => skill_template(),
        GoalCategory::Health => health_template(),
        GoalCategory::Culture => culture_template(),
        GoalCategory::Other => default_template(goal),
    };

    RoadmapPlan {
        steps,
        estimated_cost: FALLBACK_ESTIMATED_COST.to_string(),
        timeline: FALLBACK_TIMELINE.to_string(),
        recommendations,
        provider: None,
        generated_at: None,
        message: GENERIC_FAILURE_MESSAGE.to_string(),
        fallback: true,
    }
}

fn step(step: u32, title: &str, description: &str) -> Step {
    Step {
        step,
        title: title.to_string(),
        description: description.to_string(),
    }
}

fn rec(kind: RecommendationKind, title: &str, description: &str) -> Recommendation {
    Recommendation {
        kind,
        title: title.to_string(),
        description: description.to_string(),
    }
}

fn travel_template() -> (Vec<Step>, Vec<Recommendation>) {
    (
        vec![
            step(
                1,
                "Pick your destination and dates",
                "Settle on where you are going and a realistic travel window, checking seasons, events and visa requirements.",
            ),
            step(
                2,
                "Set a budget and start saving",
                "Estimate flights, lodging, food and activities, then put aside a fixed amount every week until departure.",
            ),
            step(
                3,
                "Book transport and accommodation",
                "Reserve flights and places to stay early for better prices, keeping cancellation policies in mind.",
            ),
            step(
                4,
                "Draft a day-by-day itinerary",
                "List the sights and experiences you care about most and arrange them loosely by neighborhood and day.",
            ),
            step(
                5,
                "Travel and capture the trip",
                "Go, stay flexible about the plan, and keep notes and photos so the trip turns into a story worth retelling.",
            ),
        ],
        vec![
            rec(
                RecommendationKind::Place,
                "Tourist information center",
                "Local offices hand out free maps and tips that rarely make it into guidebooks.",
            ),
            rec(
                RecommendationKind::App,
                "Offline maps app",
                "Download your destination's map before leaving so navigation works without a data plan.",
            ),
            rec(
                RecommendationKind::Tip,
                "Pack half of what you planned",
                "A lighter bag makes trains, stairs and spontaneous detours far more pleasant.",
            ),
            rec(
                RecommendationKind::Food,
                "Eat where the locals queue",
                "A line of residents outside a small restaurant is a better signal than any review score.",
            ),
        ],
    )
}

fn skill_template() -> (Vec<Step>, Vec<Recommendation>) {
    (
        vec![
            step(
                1,
                "Define what mastery looks like",
                "Write down the concrete level you want to reach and how you will know you are there.",
            ),
            step(
                2,
                "Gather learning materials",
                "Pick one primary course or book and a couple of supporting resources, then stop collecting and start using them.",
            ),
            step(
                3,
                "Build a practice routine",
                "Block short, regular practice sessions in your calendar - consistency beats occasional marathons.",
            ),
            step(
                4,
                "Finish a small real project",
                "Apply the skill to something concrete you can show another person, however modest.",
            ),
            step(
                5,
                "Share your work and get feedback",
                "Publish or present what you made and use the responses to decide what to practice next.",
            ),
        ],
        vec![
            rec(
                RecommendationKind::App,
                "Spaced repetition app",
                "Short daily reviews keep fundamentals from fading while you push into new territory.",
            ),
            rec(
                RecommendationKind::Tip,
                "Practice at the edge of ability",
                "Work on things slightly too hard for you; comfortable repetition stops producing growth.",
            ),
            rec(
                RecommendationKind::Place,
                "Local meetup or community group",
                "Practicing alongside others supplies accountability and shortcuts you will not find alone.",
            ),
            rec(
                RecommendationKind::Tip,
                "Keep a progress log",
                "A dated record of what you practiced makes slow improvement visible and motivating.",
            ),
        ],
    )
}

fn health_template() -> (Vec<Step>, Vec<Recommendation>) {
    (
        vec![
            step(
                1,
                "Establish your baseline",
                "Record your current condition honestly - measurements, habits, sleep - so progress has a starting point.",
            ),
            step(
                2,
                "Set a sustainable routine",
                "Choose an activity schedule you can keep on your worst week, not your best one.",
            ),
            step(
                3,
                "Adjust your nutrition",
                "Make one or two food changes at a time rather than overhauling everything overnight.",
            ),
            step(
                4,
                "Track progress weekly",
                "Check in on the same metrics at the same time each week and write the numbers down.",
            ),
            step(
                5,
                "Review and adapt",
                "After a month, keep what worked, drop what you dreaded, and raise the target slightly.",
            ),
        ],
        vec![
            rec(
                RecommendationKind::App,
                "Habit tracking app",
                "A simple streak counter turns daily choices into a game you want to keep winning.",
            ),
            rec(
                RecommendationKind::Place,
                "Neighborhood park or trail",
                "An outdoor route close to home removes the biggest excuse for skipping a session.",
            ),
            rec(
                RecommendationKind::Food,
                "Prep meals on Sunday",
                "Ready-made healthy options beat willpower when you are tired on a weeknight.",
            ),
            rec(
                RecommendationKind::Tip,
                "Sleep is part of training",
                "Recovery drives results; a consistent bedtime does more than an extra workout.",
            ),
        ],
    )
}

fn culture_template() -> (Vec<Step>, Vec<Recommendation>) {
    (
        vec![
            step(
                1,
                "Survey what is on offer",
                "Browse exhibitions, performances, readings and screenings happening near you this season.",
            ),
            step(
                2,
                "Commit to a monthly outing",
                "Put one cultural event per month in your calendar and treat it like any other appointment.",
            ),
            step(
                3,
                "Go deeper on one theme",
                "Pick an artist, era or genre that caught your attention and follow it across several works.",
            ),
            step(
                4,
                "Keep a response journal",
                "After each outing, write a few lines about what struck you - impressions fade fast.",
            ),
            step(
                5,
                "Bring someone along",
                "Invite a friend to the next event; discussing a work doubles what you take from it.",
            ),
        ],
        vec![
            rec(
                RecommendationKind::Place,
                "Your city's smaller galleries",
                "Independent spaces change shows often and are free or cheap to wander into.",
            ),
            rec(
                RecommendationKind::App,
                "Local events listing app",
                "Weekly digests surface performances and openings before tickets disappear.",
            ),
            rec(
                RecommendationKind::Tip,
                "Read the program notes first",
                "Five minutes of context turns an opaque work into a conversation you can follow.",
            ),
            rec(
                RecommendationKind::Food,
                "Cafe near the venue",
                "Plan a stop afterwards - the conversation over coffee is part of the experience.",
            ),
        ],
    )
}

fn default_template(goal: &GoalDescriptor) -> (Vec<Step>, Vec<Recommendation>) {
    (
        vec![
            Step {
                step: 1,
                title: "Clarify your goal".to_string(),
                description: format!(
                    "Write down why \"{}\" matters to you and what finishing it would look like.",
                    goal.title
                ),
            },
            step(
                2,
                "Break it into milestones",
                "Split the goal into three or four checkpoints you can reach a few weeks apart.",
            ),
            step(
                3,
                "Schedule the first action",
                "Put the very first concrete task in your calendar for this week, however small.",
            ),
            step(
                4,
                "Review progress regularly",
                "Set a recurring weekly check-in to see what moved and what is stuck.",
            ),
            step(
                5,
                "Finish and reflect",
                "Close the goal out deliberately, note what you learned, and decide what comes next.",
            ),
        ],
        vec![
            rec(
                RecommendationKind::Tip,
                "Tell someone about it",
                "Sharing a goal out loud creates gentle accountability that private plans lack.",
            ),
            rec(
                RecommendationKind::App,
                "Simple task manager",
                "Keeping the next action written down beats keeping it in your head.",
            ),
            rec(
                RecommendationKind::Tip,
                "Protect a fixed time slot",
                "Progress comes from a recurring block in the calendar, not from leftover time.",
            ),
            rec(
                RecommendationKind::Place,
                "A dedicated work spot",
                "Returning to the same desk, cafe or corner cues your brain that it is time to work.",
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{RECOMMENDATION_COUNT, STEP_COUNT};

    fn assert_complete(plan: &RoadmapPlan) {
        assert!(plan.fallback);
        assert!(plan.provider.is_none());
        assert!(plan.generated_at.is_none());
        assert_eq!(plan.steps.len(), STEP_COUNT);
        assert_eq!(plan.recommendations.len(), RECOMMENDATION_COUNT);
        assert_eq!(plan.estimated_cost, FALLBACK_ESTIMATED_COST);
        assert_eq!(plan.timeline, FALLBACK_TIMELINE);
        for (i, step) in plan.steps.iter().enumerate() {
            assert_eq!(step.step, i as u32 + 1, "steps must be sequential");
            assert!(!step.title.is_empty());
            assert!(!step.description.is_empty());
        }
    }

    #[test]
    fn every_known_category_yields_a_complete_plan() {
        for category in ["TRAVEL", "SKILL", "HEALTH", "CULTURE"] {
            let goal = GoalDescriptor::new("Some goal", category, "");
            assert_complete(&build_fallback(&goal));
        }
    }

    #[test]
    fn unknown_category_yields_complete_default_plan() {
        let goal = GoalDescriptor::new("Some goal", "ZZZ", "");
        assert_complete(&build_fallback(&goal));
    }

    #[test]
    fn default_template_interpolates_goal_title() {
        let goal = GoalDescriptor::new("Learn the violin", "ZZZ", "");
        let plan = build_fallback(&goal);
        assert!(
            plan.steps[0].description.contains("Learn the violin"),
            "step 1 description should contain the goal title: {}",
            plan.steps[0].description
        );
    }

    #[test]
    fn known_categories_do_not_interpolate_the_title() {
        let goal = GoalDescriptor::new("Learn the violin", "TRAVEL", "");
        let plan = build_fallback(&goal);
        assert!(!plan.steps[0].description.contains("Learn the violin"));
    }

    #[test]
    fn output_is_byte_identical_across_calls() {
        let goal = GoalDescriptor::new("Visit Kyoto", "TRAVEL", "autumn trip");
        let first = serde_json::to_string(&build_fallback(&goal)).unwrap();
        let second = serde_json::to_string(&build_fallback(&goal)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn fallback_messages_are_distinct() {
        assert_ne!(NO_PROVIDER_MESSAGE, RATE_LIMITED_MESSAGE);
        assert_ne!(RATE_LIMITED_MESSAGE, GENERIC_FAILURE_MESSAGE);
        assert_ne!(NO_PROVIDER_MESSAGE, GENERIC_FAILURE_MESSAGE);
    }
}
