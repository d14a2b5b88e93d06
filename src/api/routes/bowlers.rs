use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{bowlers, opponents, phases};
use crate::source::SnapshotInfo;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub source: String,
    pub snapshot: Option<SnapshotInfo>,
}

#[derive(Debug, Serialize)]
pub struct BowlersResponse {
    pub bowlers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct OpponentsResponse {
    pub bowler: String,
    pub opponents: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PhasesResponse {
    pub phases: Vec<String>,
}

/// Liveness plus the current snapshot, without forcing a load.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        source: state.cache.source_description(),
        snapshot: state.cache.info().await,
    })
}

pub async fn list_bowlers(
    State(state): State<AppState>,
) -> Result<Json<BowlersResponse>, ApiError> {
    let snapshot = state.cache.get().await?;
    Ok(Json(BowlersResponse {
        bowlers: bowlers(&snapshot.table),
    }))
}

pub async fn list_opponents(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<OpponentsResponse>, ApiError> {
    let snapshot = state.cache.get().await?;
    if !snapshot.table.has_bowler(&name) {
        return Err(ApiError::NotFound(format!("Bowler '{}'", name)));
    }

    Ok(Json(OpponentsResponse {
        opponents: opponents(&snapshot.table, &name),
        bowler: name,
    }))
}

pub async fn list_phases(State(state): State<AppState>) -> Result<Json<PhasesResponse>, ApiError> {
    let snapshot = state.cache.get().await?;
    Ok(Json(PhasesResponse {
        phases: phases(&snapshot.table),
    }))
}
