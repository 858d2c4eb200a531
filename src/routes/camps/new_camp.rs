use axum::{extract::State, http::StatusCode, Json};
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{Camp, CampAPIError, CampCode, CampFilter, CampName, Email},
    routes::AppJson,
    AppState,
};

const MAX_CODE_ATTEMPTS: usize = 10;

#[tracing::instrument(name = "Create new camp route handler", skip_all)]
pub async fn new_camp(
    State(state): State<AppState>,
    AppJson(request): AppJson<NewCampRequest>,
) -> Result<(StatusCode, Json<Camp>), CampAPIError> {
    let name = CampName::parse(&request.name)?;
    let owner_email = Email::parse(&request.owner_email)?;

    let mut camp_store = state.camp_store.write().await;

    let mut code = None;
    for _ in 0..MAX_CODE_ATTEMPTS {
        let candidate = CampCode::generate();
        let in_use = camp_store
            .list_camps(&CampFilter::Code(candidate.clone()))
            .await
            .map_err(|e| CampAPIError::UnexpectedError(eyre!(e)))?;
        if in_use.is_empty() {
            code = Some(candidate);
            break;
        }
    }
    let code = code.ok_or(CampAPIError::UnexpectedError(eyre!(
        "No free camp code after {MAX_CODE_ATTEMPTS} attempts"
    )))?;

    let camp = Camp::new(name, request.description, owner_email, code);

    camp_store
        .put_camp(camp.clone())
        .await
        .map_err(|e| CampAPIError::UnexpectedError(eyre!(e)))?;

    Ok((StatusCode::CREATED, Json(camp)))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct NewCampRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "ownerEmail")]
    pub owner_email: String,
}
