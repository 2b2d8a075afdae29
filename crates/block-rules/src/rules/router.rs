use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::corridor::{parse_target_date, CorridorSelection, CorridorType, DateWindow};
use super::engine::{BlockRulesEngine, LocationCheck, PairCheck};
use super::site_location::LocationContext;

#[derive(Debug, Deserialize)]
pub struct EligibilityRequest {
    #[serde(default)]
    pub target_date: Option<String>,
    #[serde(default)]
    pub current_selection: Option<CorridorType>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EligibilityResponse {
    pub target_date: Option<NaiveDate>,
    pub window: Option<DateWindow>,
    #[serde(flatten)]
    pub selection: CorridorSelection,
}

#[derive(Debug, Deserialize)]
pub struct SiteLocationRequest {
    pub raw: String,
    #[serde(default)]
    pub previous: String,
    #[serde(flatten)]
    pub context: LocationContext,
}

#[derive(Debug, Deserialize)]
pub struct PairRequest {
    pub from: String,
    pub to: String,
}

/// Router exposing the rule engine to the request form.
pub fn block_router(engine: Arc<BlockRulesEngine>) -> Router {
    Router::new()
        .route("/api/v1/blocks/eligibility", post(eligibility_handler))
        .route("/api/v1/blocks/site-location", post(site_location_handler))
        .route("/api/v1/blocks/site-location/pair", post(pair_handler))
        .route("/api/v1/blocks/depots", post(depots_handler))
        .with_state(engine)
}

pub(crate) async fn eligibility_handler(
    State(engine): State<Arc<BlockRulesEngine>>,
    Json(request): Json<EligibilityRequest>,
) -> Json<EligibilityResponse> {
    let target_date = request.target_date.as_deref().and_then(parse_target_date);
    let assessment = engine.assess(request.current_selection, target_date);

    Json(EligibilityResponse {
        target_date,
        window: assessment.window,
        selection: assessment.selection,
    })
}

pub(crate) async fn site_location_handler(
    State(engine): State<Arc<BlockRulesEngine>>,
    Json(request): Json<SiteLocationRequest>,
) -> Json<LocationCheck> {
    Json(engine.location(&request.raw, &request.previous, &request.context))
}

pub(crate) async fn pair_handler(
    State(engine): State<Arc<BlockRulesEngine>>,
    Json(request): Json<PairRequest>,
) -> Json<PairCheck> {
    Json(engine.pair(&request.from, &request.to))
}

pub(crate) async fn depots_handler(
    State(engine): State<Arc<BlockRulesEngine>>,
    Json(context): Json<LocationContext>,
) -> Json<Value> {
    Json(json!({ "depots": engine.depots(&context) }))
}
