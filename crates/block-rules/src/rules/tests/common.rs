use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::clock::FixedClock;
use crate::rules::reference::{DepotTable, ReferenceTables, SectionRangeTable};
use crate::rules::{BlockRulesEngine, LocationContext};

pub(super) const RANGES_CSV: &str = "major_section,block_section,department,min,max
MAS,MAS-BBQ,ENGG,10,40
MAS,BBQ-VLK,ENGG,35,72
MAS,VLK-TRL,ENGG,0,0
MAS,MAS-BBQ,SIG,100,180
";

pub(super) const DEPOTS_CSV: &str = "major_section,block_section,department,depot
MAS,MAS-BBQ,ENGG,SSE/P-WAY/MAS
MAS,BBQ-VLK,ENGG,SSE/P-WAY/BBQ
MAS,BBQ-VLK,ENGG,SSE/P-WAY/MAS
MAS,MAS-BBQ,SIG,SSE/SIG/MAS
";

/// Monday 2025-01-13 09:00 UTC.
pub(super) fn monday_morning() -> DateTime<Utc> {
    instant(13, 9, 0)
}

pub(super) fn instant(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, hour, minute, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn january(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, day).expect("valid date")
}

pub(super) fn reference_tables() -> ReferenceTables {
    let ranges = SectionRangeTable::from_reader(RANGES_CSV.as_bytes()).expect("ranges load");
    let depots = DepotTable::from_reader(DEPOTS_CSV.as_bytes()).expect("depots load");
    ReferenceTables::new(ranges, depots)
}

pub(super) fn engine_at(now: DateTime<Utc>) -> BlockRulesEngine {
    BlockRulesEngine::new(Arc::new(FixedClock::at(now)), Arc::new(reference_tables()))
}

pub(super) fn engg_context(blocks: &[&str]) -> LocationContext {
    LocationContext::new("MAS", blocks, "ENGG")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
