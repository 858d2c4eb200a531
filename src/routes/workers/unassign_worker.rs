use axum::{extract::State, http::StatusCode, Json};

use super::{AssignmentRequest, AssignmentResponse};
use crate::{
    domain::{CampAPIError, RoomId, WorkerId},
    routes::AppJson,
    AppState,
};

#[tracing::instrument(name = "Unassign worker route handler", skip_all)]
pub async fn unassign_worker(
    State(state): State<AppState>,
    AppJson(request): AppJson<AssignmentRequest>,
) -> Result<(StatusCode, Json<AssignmentResponse>), CampAPIError> {
    let room_id = RoomId::parse(&request.room_id)?;
    let worker_id = WorkerId::parse(&request.worker_id)?;

    let (room, worker) =
        state.occupancy.remove_worker(&room_id, &worker_id).await?;

    let response = Json(AssignmentResponse {
        room: room.into(),
        worker,
    });

    Ok((StatusCode::OK, response))
}
