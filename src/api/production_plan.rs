use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    api::error::ApiError,
    domain::{PlanRequest, ProductionPlan},
    state::AppState,
};

/// POST /productionplan - Split the requested load across the submitted plants
pub async fn create_production_plan(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<ProductionPlan>, ApiError> {
    request.validate()?;

    tracing::debug!(
        load_mw = request.load,
        plants = request.powerplants.len(),
        "production plan requested"
    );

    let plan = state.planner.plan(&request)?;
    Ok(Json(plan))
}
