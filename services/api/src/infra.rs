use block_rules::config::AppConfig;
use block_rules::error::AppError;
use block_rules::rules::{BlockRulesEngine, CorridorType, ReferenceTables};
use chrono::{DateTime, NaiveDate, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wires the configured clock and reference tables into one engine.
pub(crate) fn build_engine(config: &AppConfig) -> Result<BlockRulesEngine, AppError> {
    let tables = ReferenceTables::load(
        config.reference.range_table.as_deref(),
        config.reference.depot_table.as_deref(),
    )?;
    Ok(BlockRulesEngine::new(
        config.clock.provider(),
        Arc::new(tables),
    ))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}

pub(crate) fn parse_corridor_type(raw: &str) -> Result<CorridorType, String> {
    let wanted = raw.trim().to_ascii_lowercase().replace(['-', '_'], " ");
    CorridorType::ordered()
        .into_iter()
        .find(|kind| kind.label().to_ascii_lowercase() == wanted)
        .ok_or_else(|| {
            format!("unknown corridor type '{raw}' (expected corridor, outside-corridor or urgent-block)")
        })
}
