use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{Camp, CampAPIError, CampId, CampName, Email},
    routes::{AppJson, AppQuery},
    utils::camp::get_owned_camp,
    AppState,
};

#[derive(Deserialize)]
pub struct UpdateCampQueryParams {
    #[serde(rename = "campId")]
    camp_id: uuid::Uuid,
}

#[tracing::instrument(name = "Update camp route handler", skip_all)]
pub async fn update_camp(
    State(state): State<AppState>,
    AppQuery(query_params): AppQuery<UpdateCampQueryParams>,
    AppJson(request): AppJson<UpdateCampRequest>,
) -> Result<(StatusCode, Json<Camp>), CampAPIError> {
    let camp_id = CampId::new(query_params.camp_id);
    let email = Email::parse(&request.email)?;
    let name = CampName::parse(&request.name)?;

    let mut camp =
        get_owned_camp(&state.camp_store, &camp_id, &email).await?;
    camp.rename(name, request.description);

    state
        .camp_store
        .write()
        .await
        .put_camp(camp.clone())
        .await
        .map_err(|e| CampAPIError::UnexpectedError(eyre!(e)))?;

    Ok((StatusCode::OK, Json(camp)))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct UpdateCampRequest {
    pub email: String,
    pub name: String,
    pub description: Option<String>,
}
