use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CampId, ProjectTag, RoomId, ValidationError, WorkerId};

/// A person housed by a camp. `room_id` mirrors the room that lists this
/// worker and is only ever written by the occupancy model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    #[serde(rename = "campId")]
    pub camp_id: CampId,
    pub name: WorkerName,
    #[serde(rename = "registrationNumber")]
    pub registration_number: RegistrationNumber,
    pub project: ProjectTag,
    #[serde(rename = "entryDate")]
    pub entry_date: NaiveDate,
    #[serde(rename = "roomId", default)]
    pub room_id: Option<RoomId>,
}

impl Worker {
    pub fn new(
        camp_id: CampId,
        name: WorkerName,
        registration_number: RegistrationNumber,
        project: ProjectTag,
        entry_date: NaiveDate,
    ) -> Self {
        Self {
            id: WorkerId::default(),
            camp_id,
            name,
            registration_number,
            project,
            entry_date,
            room_id: None,
        }
    }

    /// Case-insensitive match on name or registration number.
    pub fn matches(&self, search: &str) -> bool {
        let search = search.trim().to_lowercase();
        self.name.as_ref().to_lowercase().contains(&search)
            || self
                .registration_number
                .as_ref()
                .to_lowercase()
                .contains(&search)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerName(String);

impl WorkerName {
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        match name.chars().count() {
            x if x < 1 => Err(ValidationError::new(
                "Worker name cannot be empty".to_string(),
            )),
            x if x > 255 => Err(ValidationError::new(
                "Max name length is 255 characters".to_string(),
            )),
            _ => Ok(Self(name.to_owned())),
        }
    }
}

impl AsRef<String> for WorkerName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationNumber(String);

impl RegistrationNumber {
    pub fn parse(number: &str) -> Result<Self, ValidationError> {
        let number = number.trim();
        match number.chars().count() {
            x if x < 1 => Err(ValidationError::new(
                "Registration number cannot be empty".to_string(),
            )),
            x if x > 64 => Err(ValidationError::new(
                "Max registration number length is 64 characters".to_string(),
            )),
            _ => Ok(Self(number.to_owned())),
        }
    }
}

impl AsRef<String> for RegistrationNumber {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

pub fn parse_entry_date(date: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| {
        ValidationError::new(format!("Invalid entry date: {e}"))
    })
}
