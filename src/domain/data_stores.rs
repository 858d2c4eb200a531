use super::{Camp, CampCode, CampId, Email, Room, RoomId, Worker, WorkerId};
use color_eyre::eyre::Report;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum CampFilter {
    All,
    AccessibleBy(Email),
    Code(CampCode),
}

impl CampFilter {
    pub fn matches(&self, camp: &Camp) -> bool {
        match self {
            Self::All => true,
            Self::AccessibleBy(email) => camp.is_accessible_by(email),
            Self::Code(code) => &camp.code == code,
        }
    }
}

#[async_trait::async_trait]
pub trait CampStore {
    async fn get_camp(&self, id: &CampId) -> Result<Camp, StoreError>;
    async fn list_camps(
        &self,
        filter: &CampFilter,
    ) -> Result<Vec<Camp>, StoreError>;
    async fn put_camp(&mut self, camp: Camp) -> Result<(), StoreError>;
    async fn delete_camp(&mut self, id: &CampId) -> Result<(), StoreError>;
}

/// Where a deleted record sat in its store's listing order. Passing it back to
/// the matching `restore_*` call puts the record back in the same place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position(i64);

impl Position {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value_of(&self) -> i64 {
        self.0
    }
}

/// Rooms are listed per camp, in the order they were first stored.
#[async_trait::async_trait]
pub trait RoomStore {
    async fn get_room(&self, id: &RoomId) -> Result<Room, StoreError>;
    async fn list_rooms(
        &self,
        camp_id: &CampId,
    ) -> Result<Vec<Room>, StoreError>;
    async fn put_room(&mut self, room: Room) -> Result<(), StoreError>;
    async fn delete_room(
        &mut self,
        id: &RoomId,
    ) -> Result<Position, StoreError>;
    async fn restore_room(
        &mut self,
        room: Room,
        position: Position,
    ) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
pub trait WorkerStore {
    async fn get_worker(&self, id: &WorkerId) -> Result<Worker, StoreError>;
    async fn list_workers(
        &self,
        camp_id: &CampId,
    ) -> Result<Vec<Worker>, StoreError>;
    async fn put_worker(&mut self, worker: Worker) -> Result<(), StoreError>;
    async fn delete_worker(
        &mut self,
        id: &WorkerId,
    ) -> Result<Position, StoreError>;
    async fn restore_worker(
        &mut self,
        worker: Worker,
        position: Position,
    ) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for StoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::NotFound, Self::NotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
