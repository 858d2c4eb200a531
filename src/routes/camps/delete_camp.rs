use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{CampAPIError, CampId, Email},
    routes::AppQuery,
    utils::camp::get_owned_camp,
    AppState,
};

#[derive(Deserialize)]
pub struct DeleteCampQueryParams {
    #[serde(rename = "campId")]
    camp_id: uuid::Uuid,
    email: String,
}

#[tracing::instrument(name = "Delete camp route handler", skip_all)]
pub async fn delete_camp(
    State(state): State<AppState>,
    AppQuery(query_params): AppQuery<DeleteCampQueryParams>,
) -> Result<(StatusCode, Json<DeleteCampResponse>), CampAPIError> {
    let camp_id = CampId::new(query_params.camp_id);
    let email = Email::parse(&query_params.email)?;

    let camp = get_owned_camp(&state.camp_store, &camp_id, &email).await?;

    state.occupancy.delete_camp(&camp_id).await?;

    let message = format!("Camp deleted: {}", camp.name.as_ref());
    Ok((StatusCode::OK, Json(DeleteCampResponse { message })))
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct DeleteCampResponse {
    pub message: String,
}
