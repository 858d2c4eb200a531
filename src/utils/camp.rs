use color_eyre::eyre::eyre;

use crate::{
    app_state::CampStoreType,
    domain::{Camp, CampAPIError, CampId, Email, StoreError},
};

#[tracing::instrument(name = "Get camp", skip_all)]
pub async fn get_camp(
    camp_store: &CampStoreType,
    camp_id: &CampId,
) -> Result<Camp, CampAPIError> {
    camp_store
        .read()
        .await
        .get_camp(camp_id)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => {
                CampAPIError::IDNotFoundError(*camp_id.as_ref())
            }
            e => CampAPIError::UnexpectedError(eyre!(e)),
        })
}

/// Fetches a camp that `email` owns. Members it is shared with are refused.
#[tracing::instrument(name = "Check camp ownership", skip_all)]
pub async fn get_owned_camp(
    camp_store: &CampStoreType,
    camp_id: &CampId,
    email: &Email,
) -> Result<Camp, CampAPIError> {
    let camp = get_camp(camp_store, camp_id).await?;
    if !camp.is_owned_by(email) {
        tracing::debug!("{} is not the owner of camp {}", email.as_ref(), camp_id);
        return Err(CampAPIError::access_denied(camp_id));
    }
    Ok(camp)
}
