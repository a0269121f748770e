use axum::extract::State;
use axum::Json;
use golive_core::config::Config;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/config: read-only view of `.golive/config.yaml` with validation warnings.
///
/// No PUT endpoint: the config is a committed YAML file and changes go
/// through the normal edit-commit workflow.
pub async fn get_config(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = Config::load(&root)?;
        let warnings = config.validate();
        Ok::<_, golive_core::GoliveError>(serde_json::json!({
            "success": true,
            "data": {
                "config": config,
                "warnings": warnings,
            },
        }))
    })
    .await
    .map_err(AppError::join)??;

    Ok(Json(result))
}
