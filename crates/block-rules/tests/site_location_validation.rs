use std::sync::Arc;

use block_rules::clock::SystemClock;
use block_rules::rules::site_location::{self, LocationContext, RangeConstraint};
use block_rules::rules::{
    BlockRulesEngine, DepotTable, ReferenceLoadError, ReferenceTables, SectionRangeTable,
};

fn engine_with_sample_data() -> BlockRulesEngine {
    let ranges = SectionRangeTable::from_reader(&include_bytes!("../data/section_ranges.csv")[..])
        .expect("sample ranges load");
    let depots = DepotTable::from_reader(&include_bytes!("../data/depots.csv")[..])
        .expect("sample depots load");
    BlockRulesEngine::new(
        Arc::new(SystemClock),
        Arc::new(ReferenceTables::new(ranges, depots)),
    )
}

#[test]
fn unknown_section_accepts_any_well_formed_code() {
    let engine = engine_with_sample_data();
    let context = LocationContext::new("MAS", &["MAS-GDR"], "ENGG");

    let range = engine.range(&context);
    assert_eq!((range.min, range.max), (0, 999));
    assert_eq!(range.constraint, RangeConstraint::NoData);
    assert!(range.display_text.starts_with("No range data"));

    assert!(engine.location("731/B", "731/", &context).input.is_valid);
}

#[test]
fn typing_a_code_character_by_character() {
    let engine = engine_with_sample_data();
    let context = LocationContext::new("MAS", &["VLK-TRL"], "ENGG");

    let mut field = String::new();
    let mut verdicts = Vec::new();
    for typed in "0359B".chars() {
        let raw = format!("{field}{typed}");
        let check = engine.location(&raw, &field, &context);
        field = check.input.formatted_value.clone();
        verdicts.push((field.clone(), check.input.is_valid));
    }

    assert_eq!(
        verdicts,
        vec![
            ("0".to_string(), true),
            ("03".to_string(), true),
            ("035".to_string(), true),
            ("035/".to_string(), true),
            ("035/B".to_string(), true),
        ]
    );
    assert!(site_location::is_complete(&field));
}

#[test]
fn out_of_range_code_is_flagged() {
    let engine = engine_with_sample_data();
    let context = LocationContext::new("MAS", &["MAS-BBQ", "BBQ-VLK"], "ENGG");

    let check = engine.location("022/A", "022/", &context);
    assert!(!check.input.is_valid);
    assert_eq!(check.input.error.as_deref(), Some("Not in range"));
    assert_eq!((check.range.min, check.range.max), (0, 21));
}

#[test]
fn no_data_rows_do_not_narrow_other_sections() {
    let engine = engine_with_sample_data();
    let context = LocationContext::new("MAS", &["VLK-TRL", "BBQ-VLK"], "TRD");
    let range = engine.range(&context);
    assert_eq!((range.min, range.max), (14, 23));
}

#[test]
fn depots_follow_department_and_sections() {
    let engine = engine_with_sample_data();
    let context = LocationContext::new("MAS", &["TRL-AJJ", "VLK-TRL", "BBQ-VLK"], "ENGG");
    assert_eq!(
        engine.depots(&context),
        vec!["SSE/P-WAY/BBQ", "SSE/P-WAY/MAS", "SSE/P-WAY/TRL"]
    );
}

#[test]
fn from_and_to_must_ascend() {
    let engine = engine_with_sample_data();
    assert!(!engine.pair("012/A", "012/B").is_valid);
    assert!(engine.pair("012/A", "013/B").is_valid);
}

#[test]
fn malformed_reference_rows_fail_to_load() {
    let csv = "major_section,block_section,department,min,max\nMAS,MAS-BBQ,ENGG,ten,40\n";
    assert!(matches!(
        SectionRangeTable::from_reader(csv.as_bytes()),
        Err(ReferenceLoadError::Csv(_))
    ));
}
