use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{CampAPIError, RoomId, Worker, WorkerId},
    routes::rooms::RoomResponse,
    routes::AppJson,
    AppState,
};

#[tracing::instrument(name = "Move worker route handler", skip_all)]
pub async fn move_worker(
    State(state): State<AppState>,
    AppJson(request): AppJson<MoveWorkerRequest>,
) -> Result<(StatusCode, Json<MoveWorkerResponse>), CampAPIError> {
    let worker_id = WorkerId::parse(&request.worker_id)?;
    let from = RoomId::parse(&request.from_room_id)?;
    let to = RoomId::parse(&request.to_room_id)?;

    let (from_room, to_room, worker) =
        state.occupancy.move_worker(&worker_id, &from, &to).await?;

    let response = Json(MoveWorkerResponse {
        from_room: from_room.into(),
        to_room: to_room.into(),
        worker,
    });

    Ok((StatusCode::OK, response))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct MoveWorkerRequest {
    #[serde(rename = "workerId")]
    pub worker_id: String,
    #[serde(rename = "fromRoomId")]
    pub from_room_id: String,
    #[serde(rename = "toRoomId")]
    pub to_room_id: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveWorkerResponse {
    #[serde(rename = "fromRoom")]
    pub from_room: RoomResponse,
    #[serde(rename = "toRoom")]
    pub to_room: RoomResponse,
    pub worker: Worker,
}
