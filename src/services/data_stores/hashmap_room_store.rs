use std::collections::HashMap;

use crate::domain::{CampId, Position, Room, RoomId, RoomStore, StoreError};

#[derive(Default)]
pub struct HashmapRoomStore {
    rooms: HashMap<RoomId, (u64, Room)>,
    next_sequence: u64,
}

#[async_trait::async_trait]
impl RoomStore for HashmapRoomStore {
    async fn get_room(&self, id: &RoomId) -> Result<Room, StoreError> {
        match self.rooms.get(id) {
            Some((_, room)) => Ok(room.clone()),
            None => Err(StoreError::NotFound),
        }
    }

    async fn list_rooms(
        &self,
        camp_id: &CampId,
    ) -> Result<Vec<Room>, StoreError> {
        let mut rooms: Vec<&(u64, Room)> = self
            .rooms
            .values()
            .filter(|(_, room)| &room.camp_id == camp_id)
            .collect();
        rooms.sort_by_key(|(sequence, _)| *sequence);
        Ok(rooms.into_iter().map(|(_, room)| room.clone()).collect())
    }

    async fn put_room(&mut self, room: Room) -> Result<(), StoreError> {
        let sequence = match self.rooms.get(&room.id) {
            Some((sequence, _)) => *sequence,
            None => {
                self.next_sequence += 1;
                self.next_sequence
            }
        };
        self.rooms.insert(room.id, (sequence, room));
        Ok(())
    }

    async fn delete_room(
        &mut self,
        id: &RoomId,
    ) -> Result<Position, StoreError> {
        match self.rooms.remove(id) {
            Some((sequence, _)) => Ok(Position::new(sequence as i64)),
            None => Err(StoreError::NotFound),
        }
    }

    async fn restore_room(
        &mut self,
        room: Room,
        position: Position,
    ) -> Result<(), StoreError> {
        self.rooms
            .insert(room.id, (position.value_of() as u64, room));
        Ok(())
    }
}
