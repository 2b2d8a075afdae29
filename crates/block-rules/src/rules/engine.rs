use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::corridor::{
    self, reconcile_selection, CorridorSelection, CorridorType, DateWindow, EligibilityVerdict,
};
use super::reference::ReferenceTables;
use super::site_location::{
    self, available_depots, compute_range, validate_pattern, validate_range, LocationContext,
    LocationInput, RangeLookup,
};
use crate::clock::ClockProvider;

/// Site-location verdict together with the range it was checked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCheck {
    #[serde(flatten)]
    pub input: LocationInput,
    pub range: RangeLookup,
}

/// Verdict for a "from"/"to" pair of site locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairCheck {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Date window and reconciled selection, both evaluated at `evaluated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateAssessment {
    pub evaluated_at: DateTime<Utc>,
    pub window: Option<DateWindow>,
    #[serde(flatten)]
    pub selection: CorridorSelection,
}

/// Entry point for the form layer: one clock, one set of reference tables.
pub struct BlockRulesEngine {
    clock: Arc<dyn ClockProvider>,
    tables: Arc<ReferenceTables>,
}

impl BlockRulesEngine {
    pub fn new(clock: Arc<dyn ClockProvider>, tables: Arc<ReferenceTables>) -> Self {
        Self { clock, tables }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn window(&self, target: NaiveDate) -> DateWindow {
        corridor::classify(target, self.now())
    }

    pub fn eligibility(&self, target: NaiveDate) -> EligibilityVerdict {
        let now = self.now();
        let verdict = corridor::resolve(target, now);
        debug!(
            %target,
            %now,
            forced_urgent = verdict.forced_urgent,
            forced_by = ?verdict.forced_by,
            "corridor eligibility resolved"
        );
        verdict
    }

    /// Unreadable dates impose no restriction; presence and format are checked upstream.
    pub fn eligibility_for_raw(&self, raw: &str) -> EligibilityVerdict {
        let now = self.now();
        let verdict = corridor::resolve_raw(raw, now);
        debug!(
            raw,
            %now,
            forced_urgent = verdict.forced_urgent,
            "corridor eligibility resolved from raw date"
        );
        verdict
    }

    pub fn reconcile(
        &self,
        current: Option<CorridorType>,
        target: Option<NaiveDate>,
    ) -> CorridorSelection {
        reconcile_selection(current, target, self.now())
    }

    /// Reads the clock once so the window and the selection agree across midnight.
    pub fn assess(
        &self,
        current: Option<CorridorType>,
        target: Option<NaiveDate>,
    ) -> DateAssessment {
        let evaluated_at = self.now();
        DateAssessment {
            evaluated_at,
            window: target.map(|target| corridor::classify(target, evaluated_at)),
            selection: reconcile_selection(current, target, evaluated_at),
        }
    }

    pub fn range(&self, context: &LocationContext) -> RangeLookup {
        compute_range(&self.tables.ranges, context)
    }

    /// Formats one edit of a site-location field and validates pattern, then range.
    pub fn location(&self, raw: &str, previous: &str, context: &LocationContext) -> LocationCheck {
        let formatted_value = site_location::format_input(raw, previous);
        let range = self.range(context);

        let input = match validate_pattern(&formatted_value)
            .map_err(|violation| violation.to_string())
            .and_then(|()| validate_range(&formatted_value, &range).map_err(|err| err.to_string()))
        {
            Ok(()) => LocationInput::accepted(formatted_value),
            Err(message) => LocationInput::rejected(formatted_value, message),
        };

        LocationCheck { input, range }
    }

    pub fn pair(&self, from_code: &str, to_code: &str) -> PairCheck {
        match site_location::validate_pair(from_code, to_code) {
            Ok(()) => PairCheck {
                is_valid: true,
                error: None,
            },
            Err(violation) => PairCheck {
                is_valid: false,
                error: Some(violation.to_string()),
            },
        }
    }

    pub fn depots(&self, context: &LocationContext) -> Vec<String> {
        available_depots(&self.tables.depots, context)
    }
}
