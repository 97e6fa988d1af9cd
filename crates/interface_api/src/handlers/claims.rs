//! Claims handlers

use axum::{extract::State, Json};
use tracing::instrument;

use crate::{AppState, error::ApiError};
use crate::dto::claims::*;

/// Adjudicates a refund claim
///
/// Always answers with the finalized record once the submission is valid,
/// whatever the refund outcome.
#[instrument(skip_all)]
pub async fn adjudicate_claim(
    State(state): State<AppState>,
    Json(request): Json<AdjudicateClaimRequest>,
) -> Result<Json<ClaimRecordResponse>, ApiError> {
    let claim = state.pipeline.adjudicate(request).await?;
    Ok(Json(ClaimRecordResponse::from(&claim)))
}
