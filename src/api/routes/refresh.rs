use axum::extract::State;
use axum::Json;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::source::SnapshotInfo;

/// Reload the delivery table now, ignoring the TTL.
///
/// On failure the previous snapshot stays in place and the error is returned.
pub async fn trigger_refresh(
    State(state): State<AppState>,
) -> Result<Json<SnapshotInfo>, ApiError> {
    let snapshot = state.cache.force_refresh().await?;
    tracing::info!("Manual refresh loaded {} deliveries", snapshot.table.len());
    Ok(Json(snapshot.info(state.cache.ttl())))
}
