use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{CampAPIError, CampId, Worker},
    routes::AppQuery,
    utils::camp::get_camp,
    AppState,
};

#[derive(Deserialize)]
pub struct WorkerListQueryParams {
    #[serde(rename = "campId")]
    camp_id: uuid::Uuid,
    search: Option<String>,
}

#[tracing::instrument(name = "Get worker list route handler", skip_all)]
pub async fn get_worker_list(
    State(state): State<AppState>,
    AppQuery(query_params): AppQuery<WorkerListQueryParams>,
) -> Result<(StatusCode, Json<WorkerListResponse>), CampAPIError> {
    let camp_id = CampId::new(query_params.camp_id);
    get_camp(&state.camp_store, &camp_id).await?;

    let search = query_params.search.as_deref().unwrap_or_default();
    let workers = state
        .occupancy
        .list_workers(&camp_id)
        .await?
        .into_iter()
        .filter(|worker| worker.matches(search))
        .collect();

    Ok((
        StatusCode::OK,
        Json(WorkerListResponse {
            camp_id: *camp_id.as_ref(),
            workers,
        }),
    ))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkerListResponse {
    #[serde(rename = "campId")]
    pub camp_id: uuid::Uuid,
    pub workers: Vec<Worker>,
}
