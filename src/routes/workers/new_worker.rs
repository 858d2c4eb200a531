use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::{
    domain::{
        parse_entry_date, CampAPIError, CampId, ProjectTag, RegistrationNumber,
        RoomId, Worker, WorkerName,
    },
    routes::AppJson,
    AppState,
};

#[tracing::instrument(name = "Add worker route handler", skip_all)]
pub async fn new_worker(
    State(state): State<AppState>,
    AppJson(request): AppJson<NewWorkerRequest>,
) -> Result<(StatusCode, Json<Worker>), CampAPIError> {
    let camp_id = CampId::parse(&request.camp_id)?;
    let name = WorkerName::parse(&request.name)?;
    let registration_number =
        RegistrationNumber::parse(&request.registration_number)?;
    let project = ProjectTag::parse(&request.project)?;
    let entry_date = parse_entry_date(&request.entry_date)?;
    let room_id = request
        .room_id
        .as_deref()
        .map(RoomId::parse)
        .transpose()?;

    let worker = Worker::new(
        camp_id,
        name,
        registration_number,
        project,
        entry_date,
    );
    let worker = state.occupancy.add_worker(worker, room_id).await?;

    Ok((StatusCode::CREATED, Json(worker)))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct NewWorkerRequest {
    #[serde(rename = "campId")]
    pub camp_id: String,
    pub name: String,
    #[serde(rename = "registrationNumber")]
    pub registration_number: String,
    pub project: String,
    #[serde(rename = "entryDate")]
    pub entry_date: String,
    #[serde(rename = "roomId", default)]
    pub room_id: Option<String>,
}
