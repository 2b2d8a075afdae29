use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::eligibility::{resolve, CorridorType, EligibilityVerdict};

/// Corridor-type selection after a date edit, plus what the form may offer next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorridorSelection {
    pub selection: Option<CorridorType>,
    pub locked: bool,
    pub options: Vec<CorridorType>,
    pub verdict: EligibilityVerdict,
}

/// Reconciles the caller's current corridor type with a (possibly cleared) block date.
///
/// A forced verdict overwrites any prior choice with Urgent Block. Clearing the date
/// clears the choice. Urgent Block never survives a verdict that does not allow it.
pub fn reconcile_selection(
    current: Option<CorridorType>,
    target: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> CorridorSelection {
    let Some(target) = target else {
        let verdict = EligibilityVerdict::unrestricted();
        return CorridorSelection {
            selection: None,
            locked: false,
            options: verdict.permitted_types(),
            verdict,
        };
    };

    let verdict = resolve(target, now);
    let options = verdict.permitted_types();

    let selection = if verdict.forced_urgent {
        Some(CorridorType::UrgentBlock)
    } else {
        current.filter(|kind| options.contains(kind))
    };

    CorridorSelection {
        selection,
        locked: verdict.forced_urgent,
        options,
        verdict,
    }
}
