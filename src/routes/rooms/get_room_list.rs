use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::RoomResponse;
use crate::{
    domain::{CampAPIError, CampId},
    routes::AppQuery,
    utils::camp::get_camp,
    AppState,
};

#[derive(Deserialize)]
pub struct RoomListQueryParams {
    #[serde(rename = "campId")]
    camp_id: uuid::Uuid,
    search: Option<String>,
}

#[tracing::instrument(name = "Get room list route handler", skip_all)]
pub async fn get_room_list(
    State(state): State<AppState>,
    AppQuery(query_params): AppQuery<RoomListQueryParams>,
) -> Result<(StatusCode, Json<RoomListResponse>), CampAPIError> {
    let camp_id = CampId::new(query_params.camp_id);
    get_camp(&state.camp_store, &camp_id).await?;

    let search = query_params.search.as_deref().unwrap_or_default();
    let occupancy = state.occupancy.load(&camp_id).await?;

    let rooms = occupancy
        .rooms()
        .iter()
        .filter(|room| room.number.matches(search))
        .cloned()
        .map(RoomResponse::from)
        .collect();

    Ok((
        StatusCode::OK,
        Json(RoomListResponse {
            camp_id: *camp_id.as_ref(),
            rooms,
        }),
    ))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomListResponse {
    #[serde(rename = "campId")]
    pub camp_id: uuid::Uuid,
    pub rooms: Vec<RoomResponse>,
}
