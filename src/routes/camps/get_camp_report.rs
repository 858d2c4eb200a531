use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{CampAPIError, CampId, CampStats},
    routes::AppQuery,
    utils::camp::get_camp,
    AppState,
};

#[derive(Deserialize)]
pub struct CampReportQueryParams {
    #[serde(rename = "campId")]
    camp_id: uuid::Uuid,
}

#[tracing::instrument(name = "Get camp report route handler", skip_all)]
pub async fn get_camp_report(
    State(state): State<AppState>,
    AppQuery(query_params): AppQuery<CampReportQueryParams>,
) -> Result<(StatusCode, Json<CampReportResponse>), CampAPIError> {
    let camp_id = CampId::new(query_params.camp_id);
    let camp = get_camp(&state.camp_store, &camp_id).await?;

    let today = Local::now().date_naive();
    let stats = state.occupancy.report(&camp_id, today).await?;

    let response = Json(CampReportResponse {
        camp_id,
        camp_name: camp.name.as_ref().to_owned(),
        stats,
    });

    Ok((StatusCode::OK, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct CampReportResponse {
    #[serde(rename = "campId")]
    pub camp_id: CampId,
    #[serde(rename = "campName")]
    pub camp_name: String,
    #[serde(flatten)]
    pub stats: CampStats,
}
