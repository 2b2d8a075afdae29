pub mod corridor;
mod engine;
pub mod reference;
pub mod router;
pub mod site_location;

#[cfg(test)]
mod tests;

pub use corridor::{
    CorridorSelection, CorridorType, DateWindow, EligibilityVerdict, ForcingRule,
};
pub use engine::{BlockRulesEngine, DateAssessment, LocationCheck, PairCheck};
pub use reference::{
    DepotTable, ReferenceLoadError, ReferenceTables, SectionKey, SectionRange, SectionRangeTable,
};
pub use router::block_router;
pub use site_location::{LocationContext, LocationInput, RangeConstraint, RangeLookup};
