//! Read-only reference tables keyed by (major section, block section, department).

mod normalizer;
mod parser;

use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

pub(crate) use normalizer::normalize_key;

#[derive(Debug)]
pub enum ReferenceLoadError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: usize, reason: String },
}

impl std::fmt::Display for ReferenceLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceLoadError::Io(err) => write!(f, "failed to read reference table: {}", err),
            ReferenceLoadError::Csv(err) => write!(f, "invalid reference CSV data: {}", err),
            ReferenceLoadError::InvalidRow { line, reason } => {
                write!(f, "invalid reference row at line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for ReferenceLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReferenceLoadError::Io(err) => Some(err),
            ReferenceLoadError::Csv(err) => Some(err),
            ReferenceLoadError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for ReferenceLoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ReferenceLoadError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Three-part lookup key; all parts are stored normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionKey {
    pub major_section: String,
    pub block_section: String,
    pub department: String,
}

impl SectionKey {
    pub fn new(major_section: &str, block_section: &str, department: &str) -> Self {
        Self {
            major_section: normalize_key(major_section),
            block_section: normalize_key(block_section),
            department: normalize_key(department),
        }
    }

    pub fn is_incomplete(&self) -> bool {
        self.major_section.is_empty() || self.block_section.is_empty() || self.department.is_empty()
    }
}

/// Permitted numeric prefix range for site-location codes. `(0, 0)` means "no data".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRange {
    pub min: u16,
    pub max: u16,
}

impl SectionRange {
    pub const fn is_no_data(self) -> bool {
        self.min == 0 && self.max == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct SectionRangeTable {
    entries: BTreeMap<SectionKey, SectionRange>,
}

impl SectionRangeTable {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReferenceLoadError> {
        let mut table = Self::default();
        for record in parser::parse_ranges(reader)? {
            table.insert(record.key, record.range);
        }
        Ok(table)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ReferenceLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn insert(&mut self, key: SectionKey, range: SectionRange) {
        match self.entries.entry(key) {
            Entry::Occupied(mut slot) => {
                warn!(key = ?slot.key(), "duplicate section range; keeping the later row");
                slot.insert(range);
            }
            Entry::Vacant(slot) => {
                slot.insert(range);
            }
        }
    }

    pub fn get(&self, key: &SectionKey) -> Option<SectionRange> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DepotTable {
    entries: BTreeMap<SectionKey, Vec<String>>,
}

impl DepotTable {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReferenceLoadError> {
        let mut table = Self::default();
        for record in parser::parse_depots(reader)? {
            table.insert(record.key, record.depot);
        }
        Ok(table)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ReferenceLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn insert(&mut self, key: SectionKey, depot: impl Into<String>) {
        self.entries.entry(key).or_default().push(depot.into());
    }

    pub fn get(&self, key: &SectionKey) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Both reference tables, supplied by the surrounding layer and never mutated by the rules.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    pub ranges: SectionRangeTable,
    pub depots: DepotTable,
}

impl ReferenceTables {
    pub fn new(ranges: SectionRangeTable, depots: DepotTable) -> Self {
        Self { ranges, depots }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads whichever tables have a configured path; missing paths yield empty tables.
    pub fn load(
        range_path: Option<&Path>,
        depot_path: Option<&Path>,
    ) -> Result<Self, ReferenceLoadError> {
        let ranges = match range_path {
            Some(path) => SectionRangeTable::from_path(path)?,
            None => SectionRangeTable::default(),
        };
        let depots = match depot_path {
            Some(path) => DepotTable::from_path(path)?,
            None => DepotTable::default(),
        };

        info!(
            ranges = ranges.len(),
            depots = depots.len(),
            "reference tables loaded"
        );
        Ok(Self { ranges, depots })
    }
}
