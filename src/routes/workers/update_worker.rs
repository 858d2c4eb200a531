use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    domain::{
        parse_entry_date, CampAPIError, ProjectTag, RegistrationNumber, Worker,
        WorkerId, WorkerName,
    },
    routes::{AppJson, AppQuery},
    AppState,
};

#[derive(Deserialize)]
pub struct UpdateWorkerQueryParams {
    #[serde(rename = "workerId")]
    worker_id: uuid::Uuid,
}

#[tracing::instrument(name = "Update worker route handler", skip_all)]
pub async fn update_worker(
    State(state): State<AppState>,
    AppQuery(query_params): AppQuery<UpdateWorkerQueryParams>,
    AppJson(request): AppJson<UpdateWorkerRequest>,
) -> Result<(StatusCode, Json<Worker>), CampAPIError> {
    let worker_id = WorkerId::new(query_params.worker_id);
    let name = WorkerName::parse(&request.name)?;
    let registration_number =
        RegistrationNumber::parse(&request.registration_number)?;
    let project = ProjectTag::parse(&request.project)?;
    let entry_date = parse_entry_date(&request.entry_date)?;

    let worker = state
        .occupancy
        .update_worker(
            &worker_id,
            name,
            registration_number,
            project,
            entry_date,
        )
        .await?;

    Ok((StatusCode::OK, Json(worker)))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct UpdateWorkerRequest {
    pub name: String,
    #[serde(rename = "registrationNumber")]
    pub registration_number: String,
    pub project: String,
    #[serde(rename = "entryDate")]
    pub entry_date: String,
}
