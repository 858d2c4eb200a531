use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::RoomResponse;
use crate::{
    domain::{CampAPIError, Capacity, ProjectTag, RoomId, RoomNumber},
    routes::{AppJson, AppQuery},
    AppState,
};

#[derive(Deserialize)]
pub struct UpdateRoomQueryParams {
    #[serde(rename = "roomId")]
    room_id: uuid::Uuid,
}

#[tracing::instrument(name = "Update room route handler", skip_all)]
pub async fn update_room(
    State(state): State<AppState>,
    AppQuery(query_params): AppQuery<UpdateRoomQueryParams>,
    AppJson(request): AppJson<UpdateRoomRequest>,
) -> Result<(StatusCode, Json<RoomResponse>), CampAPIError> {
    let room_id = RoomId::new(query_params.room_id);
    let number = RoomNumber::parse(&request.number)?;
    let capacity = Capacity::parse(request.capacity)?;
    let project = ProjectTag::parse(&request.project)?;

    let room = state
        .occupancy
        .update_room(&room_id, number, capacity, project)
        .await?;

    Ok((StatusCode::OK, Json(room.into())))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct UpdateRoomRequest {
    pub number: String,
    pub capacity: i64,
    pub project: String,
}
