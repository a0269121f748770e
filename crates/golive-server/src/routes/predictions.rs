use axum::extract::State;
use axum::Json;
use golive_core::config::Config;
use golive_core::portfolio;
use golive_core::store::YamlEngagementStore;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/predictions/deadlines: risk-ranked portfolio of go-live predictions.
///
/// Any failure to read the engagement snapshot or config answers with the
/// generic 500 envelope; no partial prediction list is ever returned.
/// Individually malformed engagements are reported under `data.skipped`.
pub async fn deadline_predictions(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let clock = app.clock.clone();
    let report = tokio::task::spawn_blocking(move || {
        let config = Config::load(&root)?;
        config.ensure_valid()?;
        let store = YamlEngagementStore::open(&root)?;
        portfolio::forecast(&store, &config.forecast, clock.as_ref())
    })
    .await
    .map_err(AppError::prediction_failed)?
    .map_err(AppError::prediction_failed)?;

    tracing::info!(
        total = report.summary.total,
        skipped = report.summary.skipped,
        "computed deadline predictions"
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "data": report,
    })))
}
