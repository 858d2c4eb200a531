use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{CampAPIError, RoomId, Worker, WorkerId},
    routes::rooms::RoomResponse,
    routes::AppJson,
    AppState,
};

#[tracing::instrument(name = "Assign worker route handler", skip_all)]
pub async fn assign_worker(
    State(state): State<AppState>,
    AppJson(request): AppJson<AssignmentRequest>,
) -> Result<(StatusCode, Json<AssignmentResponse>), CampAPIError> {
    let room_id = RoomId::parse(&request.room_id)?;
    let worker_id = WorkerId::parse(&request.worker_id)?;

    let (room, worker) =
        state.occupancy.assign_worker(&room_id, &worker_id).await?;

    let response = Json(AssignmentResponse {
        room: room.into(),
        worker,
    });

    Ok((StatusCode::OK, response))
}

/// Body shared by the assign and unassign routes.
#[derive(Debug, PartialEq, Deserialize)]
pub struct AssignmentRequest {
    #[serde(rename = "roomId")]
    pub room_id: String,
    #[serde(rename = "workerId")]
    pub worker_id: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct AssignmentResponse {
    pub room: RoomResponse,
    pub worker: Worker,
}
