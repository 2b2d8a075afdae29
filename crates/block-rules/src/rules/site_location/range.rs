use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use super::codec::{has_separator, numeric_prefix};
use crate::rules::reference::{normalize_key, DepotTable, SectionKey, SectionRangeTable};

pub const UNCONSTRAINED_MIN: u16 = 0;
pub const UNCONSTRAINED_MAX: u16 = 999;

/// How a [`RangeLookup`] was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeConstraint {
    /// Section, block sections or department not selected yet.
    Incomplete,
    /// No usable reference entry for the selection.
    NoData,
    Bounded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeLookup {
    pub min: u16,
    pub max: u16,
    pub display_text: String,
    pub constraint: RangeConstraint,
}

impl RangeLookup {
    fn unconstrained(constraint: RangeConstraint, display_text: &str) -> Self {
        Self {
            min: UNCONSTRAINED_MIN,
            max: UNCONSTRAINED_MAX,
            display_text: display_text.to_string(),
            constraint,
        }
    }

    fn bounded(min: u16, max: u16) -> Self {
        Self {
            min,
            max,
            display_text: format!("Permitted range: {min} to {max}"),
            constraint: RangeConstraint::Bounded,
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.constraint != RangeConstraint::Bounded
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RangeViolation {
    #[error("Not in range")]
    NotInRange { min: u16, max: u16 },
    #[error("Invalid value")]
    InvalidOrder,
}

/// Section, block sections and department selected on the request form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationContext {
    #[serde(default)]
    pub major_section: String,
    #[serde(default)]
    pub block_sections: Vec<String>,
    #[serde(default)]
    pub department: String,
}

impl LocationContext {
    pub fn new<S: AsRef<str>>(major_section: &str, block_sections: &[S], department: &str) -> Self {
        Self {
            major_section: major_section.to_string(),
            block_sections: block_sections
                .iter()
                .map(|block| block.as_ref().to_string())
                .collect(),
            department: department.to_string(),
        }
    }

    /// Keys for every non-blank block section, or `None` while the selection is incomplete.
    fn keys(&self) -> Option<Vec<SectionKey>> {
        if normalize_key(&self.major_section).is_empty() || normalize_key(&self.department).is_empty()
        {
            return None;
        }

        let keys: Vec<SectionKey> = self
            .block_sections
            .iter()
            .map(|block| SectionKey::new(&self.major_section, block, &self.department))
            .filter(|key| !key.is_incomplete())
            .collect();

        if keys.is_empty() {
            None
        } else {
            Some(keys)
        }
    }
}

/// Widest range covering every selected block section with data.
pub fn compute_range(table: &SectionRangeTable, context: &LocationContext) -> RangeLookup {
    let Some(keys) = context.keys() else {
        return RangeLookup::unconstrained(
            RangeConstraint::Incomplete,
            "Select major section, block section and department to see the permitted range",
        );
    };

    let bounds = keys
        .iter()
        .filter_map(|key| table.get(key))
        .filter(|range| !range.is_no_data())
        .fold(None, |acc: Option<(u16, u16)>, range| match acc {
            Some((min, max)) => Some((min.min(range.min), max.max(range.max))),
            None => Some((range.min, range.max)),
        });

    match bounds {
        Some((min, max)) => {
            debug!(
                major_section = %context.major_section,
                department = %context.department,
                min,
                max,
                "site location range resolved"
            );
            RangeLookup::bounded(min, max)
        }
        None => {
            debug!(
                major_section = %context.major_section,
                department = %context.department,
                "no site location range data"
            );
            RangeLookup::unconstrained(
                RangeConstraint::NoData,
                "No range data available for the selected section",
            )
        }
    }
}

/// Checks the numeric prefix of a code against a computed range.
///
/// Codes without a separator, or whose prefix is not numeric, are left to pattern
/// validation and pass here.
pub fn validate_range(code: &str, range: &RangeLookup) -> Result<(), RangeViolation> {
    if range.is_unconstrained() || !has_separator(code) {
        return Ok(());
    }

    match numeric_prefix(code) {
        Some(value) if value < range.min || value > range.max => Err(RangeViolation::NotInRange {
            min: range.min,
            max: range.max,
        }),
        _ => Ok(()),
    }
}

/// A "from" location must sit strictly before its "to" location.
pub fn validate_pair(from_code: &str, to_code: &str) -> Result<(), RangeViolation> {
    if !has_separator(from_code) || !has_separator(to_code) {
        return Ok(());
    }

    match (numeric_prefix(from_code), numeric_prefix(to_code)) {
        (Some(from), Some(to)) if from >= to => Err(RangeViolation::InvalidOrder),
        _ => Ok(()),
    }
}

/// Sorted, de-duplicated depots across the selected block sections.
pub fn available_depots(table: &DepotTable, context: &LocationContext) -> Vec<String> {
    let Some(keys) = context.keys() else {
        return Vec::new();
    };

    keys.iter()
        .flat_map(|key| table.get(key).iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
