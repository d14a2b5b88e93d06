use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{build_dashboard, phases};
use crate::models::{split_phases, Dashboard, DeliveryTable, Handedness, Opponent, Selection};

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    pub bowler: Option<String>,
    pub opponent: Option<String>,
    /// Comma-separated; omitted means every phase in the table
    pub phases: Option<String>,
    pub handedness: Option<String>,
}

impl DashboardParams {
    fn into_selection(self, table: &DeliveryTable) -> Result<Selection, ApiError> {
        let bowler = self
            .bowler
            .filter(|b| !b.trim().is_empty())
            .ok_or_else(|| ApiError::BadRequest("Missing 'bowler' parameter".to_string()))?;

        if !table.has_bowler(&bowler) {
            return Err(ApiError::NotFound(format!("Bowler '{}'", bowler)));
        }

        let handedness = match self.handedness.as_deref() {
            Some(raw) => raw.parse::<Handedness>().map_err(ApiError::BadRequest)?,
            None => Handedness::All,
        };

        let phases = match self.phases.as_deref() {
            Some(raw) => split_phases(raw),
            None => phases(table),
        };

        let opponent = self
            .opponent
            .as_deref()
            .map(Opponent::parse)
            .unwrap_or_default();

        Ok(Selection::new(bowler, phases)
            .against(opponent)
            .with_handedness(handedness))
    }
}

/// Full dashboard bundle for one selection.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Result<Json<Dashboard>, ApiError> {
    let snapshot = state.cache.get().await?;
    let selection = params.into_selection(&snapshot.table)?;

    Ok(Json(build_dashboard(&snapshot.table, &selection)))
}
