use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{CampAPIError, RoomId},
    routes::AppQuery,
    AppState,
};

#[derive(Deserialize)]
pub struct DeleteRoomQueryParams {
    #[serde(rename = "roomId")]
    room_id: uuid::Uuid,
}

#[tracing::instrument(name = "Delete room route handler", skip_all)]
pub async fn delete_room(
    State(state): State<AppState>,
    AppQuery(query_params): AppQuery<DeleteRoomQueryParams>,
) -> Result<(StatusCode, Json<DeleteRoomResponse>), CampAPIError> {
    let room_id = RoomId::new(query_params.room_id);

    let room = state.occupancy.delete_room(&room_id).await?;

    let response = Json(DeleteRoomResponse {
        room_id: *room.id.as_ref(),
        unassigned_workers: room.workers.iter().map(|id| *id.as_ref()).collect(),
    });

    Ok((StatusCode::OK, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteRoomResponse {
    #[serde(rename = "roomId")]
    pub room_id: uuid::Uuid,
    #[serde(rename = "unassignedWorkers")]
    pub unassigned_workers: Vec<uuid::Uuid>,
}
