use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::cutoff::has_passed_thursday_cutoff;
use super::window::{
    is_in_next_calendar_week, is_in_next_calendar_week_raw, is_within_urgent_window,
    is_within_urgent_window_raw,
};

/// Classification of a block request's time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorridorType {
    Corridor,
    OutsideCorridor,
    UrgentBlock,
}

impl CorridorType {
    pub const fn ordered() -> [Self; 3] {
        [Self::Corridor, Self::OutsideCorridor, Self::UrgentBlock]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Corridor => "Corridor",
            Self::OutsideCorridor => "Outside Corridor",
            Self::UrgentBlock => "Urgent Block",
        }
    }
}

/// Rule that forced a request into Urgent Block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForcingRule {
    UrgentWindow,
    WeeklyCutoffPassed,
}

impl ForcingRule {
    pub const fn reason(self) -> &'static str {
        match self {
            Self::UrgentWindow => {
                "Block date is within 2 days of today; only Urgent Block requests are permitted"
            }
            Self::WeeklyCutoffPassed => {
                "Thursday 22:00 cutoff has passed for next week's blocks; only Urgent Block requests are permitted"
            }
        }
    }
}

/// Outcome of the corridor eligibility rules for one requested date.
///
/// `forced_urgent` implies `urgent_allowed`; constructors below are the only way the
/// engine builds a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub forced_urgent: bool,
    pub urgent_allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forced_by: Option<ForcingRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disallowed_reason: Option<String>,
}

impl EligibilityVerdict {
    fn forced(rule: ForcingRule) -> Self {
        Self {
            forced_urgent: true,
            urgent_allowed: true,
            forced_by: Some(rule),
            disallowed_reason: Some(rule.reason().to_string()),
        }
    }

    /// Verdict used when no date (or an unreadable one) has been supplied.
    pub fn unrestricted() -> Self {
        Self {
            forced_urgent: false,
            urgent_allowed: false,
            forced_by: None,
            disallowed_reason: None,
        }
    }

    /// Corridor types the caller should offer for selection.
    pub fn permitted_types(&self) -> Vec<CorridorType> {
        if self.forced_urgent {
            return vec![CorridorType::UrgentBlock];
        }

        CorridorType::ordered()
            .into_iter()
            .filter(|kind| *kind != CorridorType::UrgentBlock || self.urgent_allowed)
            .collect()
    }
}

/// Applies the eligibility rules in priority order; first match wins.
pub fn resolve(target: NaiveDate, now: DateTime<Utc>) -> EligibilityVerdict {
    if is_within_urgent_window(target, now) {
        return EligibilityVerdict::forced(ForcingRule::UrgentWindow);
    }

    if is_in_next_calendar_week(target, now) && has_passed_thursday_cutoff(now) {
        return EligibilityVerdict::forced(ForcingRule::WeeklyCutoffPassed);
    }

    EligibilityVerdict {
        urgent_allowed: is_within_urgent_window(target, now),
        ..EligibilityVerdict::unrestricted()
    }
}

/// Same rules over caller text. Unreadable dates match no window and impose no restriction.
pub fn resolve_raw(raw: &str, now: DateTime<Utc>) -> EligibilityVerdict {
    if is_within_urgent_window_raw(raw, now) {
        return EligibilityVerdict::forced(ForcingRule::UrgentWindow);
    }

    if is_in_next_calendar_week_raw(raw, now) && has_passed_thursday_cutoff(now) {
        return EligibilityVerdict::forced(ForcingRule::WeeklyCutoffPassed);
    }

    EligibilityVerdict::unrestricted()
}
