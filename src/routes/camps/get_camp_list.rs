use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{Camp, CampAPIError, CampFilter, Email},
    routes::AppQuery,
    AppState,
};

#[derive(Deserialize)]
pub struct CampListQueryParams {
    email: String,
}

#[tracing::instrument(name = "Get camp list route handler", skip_all)]
pub async fn get_camp_list(
    State(state): State<AppState>,
    AppQuery(query_params): AppQuery<CampListQueryParams>,
) -> Result<(StatusCode, Json<CampListResponse>), CampAPIError> {
    let email = Email::parse(&query_params.email)?;

    let camps = state
        .camp_store
        .read()
        .await
        .list_camps(&CampFilter::AccessibleBy(email))
        .await
        .map_err(|e| CampAPIError::UnexpectedError(eyre!(e)))?;

    Ok((StatusCode::OK, Json(CampListResponse { camps })))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct CampListResponse {
    pub camps: Vec<Camp>,
}
