use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use golive_core::error::GoliveError;

/// Message returned by the deadline endpoint whenever the portfolio cannot be computed.
pub const PREDICTION_FAILED: &str = "Failed to calculate deadline predictions";

// ---------------------------------------------------------------------------
// Internal sentinel for the deadline endpoint's failure envelope
// ---------------------------------------------------------------------------

/// Carries the generic `{ success: false, error }` envelope through the
/// `anyhow::Error` chain. The underlying cause is logged, never returned.
#[derive(Debug)]
struct EnvelopeError(&'static str);

impl std::fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for EnvelopeError {}

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct the 500 envelope for a failed portfolio computation.
    pub fn prediction_failed(cause: impl std::fmt::Display) -> Self {
        tracing::error!(error = %cause, "deadline prediction failed");
        Self(EnvelopeError(PREDICTION_FAILED).into())
    }

    pub fn join(err: tokio::task::JoinError) -> Self {
        Self(anyhow::anyhow!("task join error: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(e) = self.0.downcast_ref::<EnvelopeError>() {
            let body = serde_json::json!({ "success": false, "error": e.0 });
            return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response();
        }

        let status = match self.0.downcast_ref::<GoliveError>() {
            Some(e) => match e {
                GoliveError::NotInitialized
                | GoliveError::InvalidId(_)
                | GoliveError::UnknownPhase(_)
                | GoliveError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
                GoliveError::EngagementNotFound(_) => StatusCode::NOT_FOUND,
                GoliveError::EngagementExists(_) => StatusCode::CONFLICT,
                GoliveError::MalformedEngagement { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                GoliveError::InvalidConfig(_)
                | GoliveError::Io(_)
                | GoliveError::Yaml(_)
                | GoliveError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            None => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({ "success": false, "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
