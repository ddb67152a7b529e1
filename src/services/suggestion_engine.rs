use crate::models::feasibility::{FeasibilityReport, Suggestion, SuggestionKind, SuggestionOutcome};
use crate::models::request::UrgencyLevel;

/// Fraction of the required time a deficit may reach and still proceed
/// automatically (with an informational message). Zero at the default
/// urgency: any deficit blocks until the caller confirms.
fn auto_proceed_fraction(urgency: UrgencyLevel) -> f64 {
    match urgency {
        UrgencyLevel::Low => 0.0,
        UrgencyLevel::Moderate => 0.20,
        UrgencyLevel::High => 0.30,
        UrgencyLevel::Critical => 0.40,
    }
}

/// Convert a feasibility report into a proceed/block decision with ranked
/// remediation options. Pure: same report, urgency, and due-date flag always
/// produce the same outcome.
pub fn evaluate(
    report: &FeasibilityReport,
    urgency: UrgencyLevel,
    has_due_date: bool,
) -> SuggestionOutcome {
    let deficit = report.deficit_minutes;
    if deficit == 0 {
        return SuggestionOutcome {
            should_proceed_automatically: true,
            message: format!(
                "The window offers {} free minutes for {} required; the schedule fits.",
                report.total_available_minutes_in_window, report.total_required_minutes
            ),
            suggestions: Vec::new(),
        };
    }

    let tolerated = (report.total_required_minutes as f64 * auto_proceed_fraction(urgency)) as i64;
    if deficit <= tolerated {
        return SuggestionOutcome {
            should_proceed_automatically: true,
            message: format!(
                "{deficit} minutes cannot be placed in the window, within the tolerated \
                 shortfall of {tolerated} minutes; proceeding with a partial schedule.",
            ),
            suggestions: Vec::new(),
        };
    }

    let available = report.total_available_minutes_in_window;
    let required = report.total_required_minutes;
    let mut suggestions = Vec::new();

    if has_due_date {
        suggestions.push(Suggestion {
            kind: SuggestionKind::ExtendDeadline,
            should_proceed_automatically: false,
            user_message: format!(
                "Extend the deadline: the {}-day window offers {available} free minutes but \
                 {required} are required ({deficit} minutes short).",
                report.days_in_window
            ),
        });
    }
    suggestions.push(Suggestion {
        kind: SuggestionKind::ReduceScope,
        should_proceed_automatically: false,
        user_message: format!(
            "Reduce scope by about {deficit} minutes of work to fit the {available} free \
             minutes available."
        ),
    });
    suggestions.push(Suggestion {
        kind: SuggestionKind::AddAvailability,
        should_proceed_automatically: false,
        user_message: format!(
            "Add at least {deficit} more free minutes to the window (currently {available})."
        ),
    });
    suggestions.push(Suggestion {
        kind: SuggestionKind::ShortenItems,
        should_proceed_automatically: false,
        user_message: format!(
            "Shorten item estimates by {deficit} minutes in total ({required} estimated now)."
        ),
    });

    SuggestionOutcome {
        should_proceed_automatically: false,
        message: format!(
            "The schedule is short {deficit} minutes ({required} required, {available} \
             available); confirmation is needed to proceed partially."
        ),
        suggestions,
    }
}
