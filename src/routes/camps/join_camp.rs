use axum::{extract::State, http::StatusCode, Json};
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{Camp, CampAPIError, CampCode, CampFilter, Email},
    routes::AppJson,
    AppState,
};

#[tracing::instrument(name = "Join camp route handler", skip_all)]
pub async fn join_camp(
    State(state): State<AppState>,
    AppJson(request): AppJson<JoinCampRequest>,
) -> Result<(StatusCode, Json<Camp>), CampAPIError> {
    let email = Email::parse(&request.email)?;
    let code =
        CampCode::parse(&request.code).map_err(|_| CampAPIError::InvalidCampCode)?;

    let mut camp_store = state.camp_store.write().await;

    let mut camp = camp_store
        .list_camps(&CampFilter::Code(code))
        .await
        .map_err(|e| CampAPIError::UnexpectedError(eyre!(e)))?
        .into_iter()
        .next()
        .ok_or(CampAPIError::InvalidCampCode)?;

    if !camp.share_with(email) {
        return Err(CampAPIError::AlreadyMember);
    }

    camp_store
        .put_camp(camp.clone())
        .await
        .map_err(|e| CampAPIError::UnexpectedError(eyre!(e)))?;

    Ok((StatusCode::OK, Json(camp)))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct JoinCampRequest {
    pub code: String,
    pub email: String,
}
