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
pub struct GetWorkerQueryParams {
    #[serde(rename = "workerId")]
    worker_id: uuid::Uuid,
}

#[tracing::instrument(name = "Get worker route handler", skip_all)]
pub async fn get_worker(
    State(state): State<AppState>,
    AppQuery(query_params): AppQuery<GetWorkerQueryParams>,
) -> Result<(StatusCode, Json<Worker>), CampAPIError> {
    let worker_id = WorkerId::new(query_params.worker_id);
    tracing::debug!("worker_id: {}", worker_id);

    let worker = state.occupancy.get_worker(&worker_id).await?;

    Ok((StatusCode::OK, Json(worker)))
}
