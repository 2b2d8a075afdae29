//! Site-location code formatting, pattern checks and section range validation.

pub mod codec;
pub mod range;

pub use codec::{
    format_input, is_complete, process_input, validate_pattern, LocationInput, PatternViolation,
    SiteLocationCode,
};
pub use range::{
    available_depots, compute_range, validate_pair, validate_range, LocationContext,
    RangeConstraint, RangeLookup, RangeViolation,
};
