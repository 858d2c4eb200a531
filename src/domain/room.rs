use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CampId, ProjectTag, RoomId, ValidationError, WorkerId};

pub const MAX_ROOM_CAPACITY: u32 = 100;

/// A bed-capacity container inside a camp. The room's `workers` list is the
/// authoritative record of who sleeps where.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    #[serde(rename = "campId")]
    pub camp_id: CampId,
    pub number: RoomNumber,
    pub capacity: Capacity,
    pub project: ProjectTag,
    #[serde(default)]
    pub workers: Vec<WorkerId>,
}

impl Room {
    pub fn new(
        camp_id: CampId,
        number: RoomNumber,
        capacity: Capacity,
        project: ProjectTag,
    ) -> Self {
        Self {
            id: RoomId::default(),
            camp_id,
            number,
            capacity,
            project,
            workers: Vec::new(),
        }
    }

    pub fn occupied_beds(&self) -> u32 {
        self.workers.len() as u32
    }

    pub fn available_beds(&self) -> u32 {
        self.capacity.value_of().saturating_sub(self.occupied_beds())
    }

    pub fn is_full(&self) -> bool {
        self.available_beds() == 0
    }

    /// Occupied beds divided by capacity, in `[0, 1]` while the capacity
    /// invariant holds.
    pub fn occupancy(&self) -> f64 {
        f64::from(self.occupied_beds()) / f64::from(self.capacity.value_of())
    }

    pub fn contains(&self, worker_id: &WorkerId) -> bool {
        self.workers.contains(worker_id)
    }
}

/// Room label, unique within a camp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomNumber(String);

impl RoomNumber {
    pub fn parse(number: &str) -> Result<Self, ValidationError> {
        let number = number.trim();
        match number.chars().count() {
            x if x < 1 => Err(ValidationError::new(
                "Room number cannot be empty".to_string(),
            )),
            x if x > 32 => Err(ValidationError::new(
                "Max room number length is 32 characters".to_string(),
            )),
            _ => Ok(Self(number.to_owned())),
        }
    }

    pub fn matches(&self, search: &str) -> bool {
        self.0.to_lowercase().contains(&search.trim().to_lowercase())
    }
}

impl AsRef<String> for RoomNumber {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

impl fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Capacity(u32);

impl Capacity {
    pub fn parse(beds: i64) -> Result<Self, ValidationError> {
        match beds {
            x if x < 1 => Err(ValidationError::new(
                "Room capacity must be at least 1".to_string(),
            )),
            x if x > i64::from(MAX_ROOM_CAPACITY) => {
                Err(ValidationError::new(format!(
                    "Max room capacity is {MAX_ROOM_CAPACITY}"
                )))
            }
            x => Ok(Self(x as u32)),
        }
    }

    pub fn value_of(&self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Capacity {
    type Error = ValidationError;

    fn try_from(beds: i64) -> Result<Self, Self::Error> {
        Self::parse(beds)
    }
}

impl From<Capacity> for u32 {
    fn from(capacity: Capacity) -> Self {
        capacity.0
    }
}
