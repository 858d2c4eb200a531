mod delete_room;
mod get_room_list;
mod new_room;
mod update_room;

pub use delete_room::*;
pub use get_room_list::*;
pub use new_room::*;
pub use update_room::*;

use serde::{Deserialize, Serialize};

use crate::domain::Room;

/// A room as returned to clients, with its derived bed counts.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomResponse {
    pub id: uuid::Uuid,
    #[serde(rename = "campId")]
    pub camp_id: uuid::Uuid,
    pub number: String,
    pub capacity: u32,
    pub project: String,
    pub workers: Vec<uuid::Uuid>,
    #[serde(rename = "occupiedBeds")]
    pub occupied_beds: u32,
    #[serde(rename = "availableBeds")]
    pub available_beds: u32,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: *room.id.as_ref(),
            camp_id: *room.camp_id.as_ref(),
            occupied_beds: room.occupied_beds(),
            available_beds: room.available_beds(),
            number: room.number.as_ref().to_owned(),
            capacity: room.capacity.value_of(),
            project: room.project.as_ref().to_owned(),
            workers: room.workers.iter().map(|id| *id.as_ref()).collect(),
        }
    }
}
