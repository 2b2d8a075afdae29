use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::normalizer::normalize_key;
use super::{ReferenceLoadError, SectionKey, SectionRange};

#[derive(Debug)]
pub(crate) struct RangeRecord {
    pub(crate) key: SectionKey,
    pub(crate) range: SectionRange,
}

#[derive(Debug)]
pub(crate) struct DepotRecord {
    pub(crate) key: SectionKey,
    pub(crate) depot: String,
}

pub(crate) fn parse_ranges<R: Read>(reader: R) -> Result<Vec<RangeRecord>, ReferenceLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, record) in csv_reader.deserialize::<RangeRow>().enumerate() {
        let row = record?;
        let line = index + 2;
        let key = row_key(&row.major_section, &row.block_section, &row.department, line)?;
        if row.min > row.max {
            return Err(ReferenceLoadError::InvalidRow {
                line,
                reason: format!("min {} exceeds max {}", row.min, row.max),
            });
        }

        records.push(RangeRecord {
            key,
            range: SectionRange {
                min: row.min,
                max: row.max,
            },
        });
    }

    Ok(records)
}

pub(crate) fn parse_depots<R: Read>(reader: R) -> Result<Vec<DepotRecord>, ReferenceLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, record) in csv_reader.deserialize::<DepotRow>().enumerate() {
        let row = record?;
        let line = index + 2;
        let key = row_key(&row.major_section, &row.block_section, &row.department, line)?;
        let Some(depot) = row.depot.map(|depot| normalize_key(&depot)) else {
            continue;
        };
        if depot.is_empty() {
            continue;
        }

        records.push(DepotRecord { key, depot });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct RangeRow {
    major_section: String,
    block_section: String,
    department: String,
    min: u16,
    max: u16,
}

#[derive(Debug, Deserialize)]
struct DepotRow {
    major_section: String,
    block_section: String,
    department: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    depot: Option<String>,
}

fn row_key(
    major_section: &str,
    block_section: &str,
    department: &str,
    line: usize,
) -> Result<SectionKey, ReferenceLoadError> {
    let key = SectionKey::new(major_section, block_section, department);
    if key.is_incomplete() {
        return Err(ReferenceLoadError::InvalidRow {
            line,
            reason: "major_section, block_section and department are required".to_string(),
        });
    }
    Ok(key)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_rows_report_their_line_number() {
        let csv = "major_section,block_section,department,min,max\n\
MAS,MAS-BBQ,ENGG,10,40\n\
MAS,,ENGG,1,2\n";
        match parse_ranges(csv.as_bytes()) {
            Err(ReferenceLoadError::InvalidRow { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn inverted_range_is_rejected() {
        let csv = "major_section,block_section,department,min,max\nMAS,MAS-BBQ,ENGG,40,10\n";
        assert!(matches!(
            parse_ranges(csv.as_bytes()),
            Err(ReferenceLoadError::InvalidRow { line: 2, .. })
        ));
    }

    #[test]
    fn blank_depots_are_skipped() {
        let csv = "major_section,block_section,department,depot\n\
MAS,MAS-BBQ,ENGG,SSE/P-WAY/BBQ\n\
MAS,MAS-BBQ,ENGG,\n";
        let records = parse_depots(csv.as_bytes()).expect("depots parse");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].depot, "SSE/P-WAY/BBQ");
    }
}
