//! Corridor-type eligibility: date windows, the weekly submission cutoff and the
//! resolver that combines them.

pub mod cutoff;
mod eligibility;
mod selection;
pub mod window;

pub use cutoff::has_passed_thursday_cutoff;
pub use eligibility::{resolve, resolve_raw, CorridorType, EligibilityVerdict, ForcingRule};
pub use selection::{reconcile_selection, CorridorSelection};
pub use window::{classify, days_from_today, parse_target_date, DateWindow};
