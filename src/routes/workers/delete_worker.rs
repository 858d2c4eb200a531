use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    domain::{CampAPIError, Worker, WorkerId},
    routes::AppQuery,
    AppState,
};

#[derive(Deserialize)]
pub struct DeleteWorkerQueryParams {
    #[serde(rename = "workerId")]
    worker_id: uuid::Uuid,
}

/// Returns the deleted record.
#[tracing::instrument(name = "Delete worker route handler", skip_all)]
pub async fn delete_worker(
    State(state): State<AppState>,
    AppQuery(query_params): AppQuery<DeleteWorkerQueryParams>,
) -> Result<(StatusCode, Json<Worker>), CampAPIError> {
    let worker_id = WorkerId::new(query_params.worker_id);

    let worker = state.occupancy.delete_worker(&worker_id).await?;

    Ok((StatusCode::OK, Json(worker)))
}
