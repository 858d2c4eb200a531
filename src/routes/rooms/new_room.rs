use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use super::RoomResponse;
use crate::{
    domain::{CampAPIError, CampId, Capacity, ProjectTag, Room, RoomNumber},
    routes::AppJson,
    AppState,
};

#[tracing::instrument(name = "Add room route handler", skip_all)]
pub async fn new_room(
    State(state): State<AppState>,
    AppJson(request): AppJson<NewRoomRequest>,
) -> Result<(StatusCode, Json<RoomResponse>), CampAPIError> {
    let camp_id = CampId::parse(&request.camp_id)?;
    let number = RoomNumber::parse(&request.number)?;
    let capacity = Capacity::parse(request.capacity)?;
    let project = ProjectTag::parse(&request.project)?;

    let room = state
        .occupancy
        .add_room(Room::new(camp_id, number, capacity, project))
        .await?;

    Ok((StatusCode::CREATED, Json(room.into())))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct NewRoomRequest {
    #[serde(rename = "campId")]
    pub camp_id: String,
    pub number: String,
    pub capacity: i64,
    pub project: String,
}
