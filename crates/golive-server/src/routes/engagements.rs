use axum::extract::{Path, State};
use axum::Json;
use golive_core::config::Config;
use golive_core::store::{EngagementSource, YamlEngagementStore};
use golive_core::{pipeline, portfolio};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/engagements: engagement headers, plus any files that failed to decode.
pub async fn list_engagements(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let snapshot = YamlEngagementStore::open(&root)?.snapshot()?;
        let list: Vec<serde_json::Value> = snapshot
            .engagements
            .iter()
            .map(|e| {
                serde_json::json!({
                    "id": e.id,
                    "name": e.name,
                    "companyName": e.company_name,
                    "currentPhase": e.current_phase,
                    "targetGoLive": e.target_go_live_date,
                    "completedPhases": e.completed_phase_count(),
                    "totalPhases": pipeline::len(),
                })
            })
            .collect();
        Ok::<_, golive_core::GoliveError>(serde_json::json!({
            "success": true,
            "data": {
                "engagements": list,
                "rejected": snapshot.rejected,
            },
        }))
    })
    .await
    .map_err(AppError::join)??;

    Ok(Json(result))
}

/// GET /api/engagements/:id: the stored engagement record.
pub async fn get_engagement(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let engagement = YamlEngagementStore::open(&root)?.load(&id)?;
        Ok::<_, golive_core::GoliveError>(serde_json::json!({
            "success": true,
            "data": engagement,
        }))
    })
    .await
    .map_err(AppError::join)??;

    Ok(Json(result))
}

/// GET /api/engagements/:id/prediction: forecast for one engagement.
pub async fn engagement_prediction(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let now = app.clock.now();
    let result = tokio::task::spawn_blocking(move || {
        let config = Config::load(&root)?;
        config.ensure_valid()?;
        let engagement = YamlEngagementStore::open(&root)?.load(&id)?;
        let prediction = portfolio::predict(&engagement, &config.forecast, now)?;
        Ok::<_, golive_core::GoliveError>(serde_json::json!({
            "success": true,
            "data": prediction,
        }))
    })
    .await
    .map_err(AppError::join)??;

    Ok(Json(result))
}
