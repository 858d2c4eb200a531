use axum::extract::rejection::{JsonRejection, QueryRejection};
use color_eyre::eyre::{eyre, Report};
use thiserror::Error;

use super::{CampId, OccupancyError};

#[derive(Debug, Error)]
pub enum CampAPIError {
    #[error("Access denied for camp: {0}")]
    AccessDenied(uuid::Uuid),
    #[error("Already a member of camp")]
    AlreadyMember,
    #[error("Resource with ID not found: {0}")]
    IDNotFoundError(uuid::Uuid),
    #[error("Invalid camp code")]
    InvalidCampCode,
    #[error("Invalid request body")]
    JsonRejection(#[from] JsonRejection),
    #[error("Occupancy conflict")]
    OccupancyConflict(#[source] OccupancyError),
    #[error("Invalid query string")]
    QueryRejection(#[from] QueryRejection),
    #[error("Room number already in use: {0}")]
    RoomNumberTaken(String),
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
    #[error("Validation error")]
    ValidationError(#[from] ValidationError),
}

impl CampAPIError {
    pub fn access_denied(camp_id: &CampId) -> Self {
        Self::AccessDenied(*camp_id.as_ref())
    }
}

impl From<OccupancyError> for CampAPIError {
    fn from(e: OccupancyError) -> Self {
        match e {
            OccupancyError::CampNotFound(id) => {
                Self::IDNotFoundError(*id.as_ref())
            }
            OccupancyError::RoomNotFound(id) => {
                Self::IDNotFoundError(*id.as_ref())
            }
            OccupancyError::WorkerNotFound(id) => {
                Self::IDNotFoundError(*id.as_ref())
            }
            OccupancyError::RoomNumberTaken(number) => {
                Self::RoomNumberTaken(number.as_ref().to_owned())
            }
            e @ (OccupancyError::StorageError(_)
            | OccupancyError::RollbackFailed { .. }) => {
                Self::UnexpectedError(eyre!(e))
            }
            e => Self::OccupancyConflict(e),
        }
    }
}

#[derive(Debug, Error)]
#[error("Validation error: {0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: String) -> Self {
        Self(message)
    }

    pub fn as_ref(&self) -> &String {
        &self.0
    }
}

impl PartialEq for ValidationError {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
