use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use thiserror::Error;

use super::{
    CampId, Capacity, ProjectTag, RegistrationNumber, Room, RoomId,
    RoomNumber, StoreError, Worker, WorkerId, WorkerName,
};

#[derive(Debug, Error)]
pub enum OccupancyError {
    #[error("Room {room} cannot hold more than {capacity} workers")]
    CapacityExceeded { room: RoomNumber, capacity: u32 },
    #[error("Worker {0} is already assigned to a room")]
    AlreadyAssigned(WorkerId),
    #[error("Worker {0} is not assigned to room {1}")]
    NotAssigned(WorkerId, RoomNumber),
    #[error("Camp not found: {0}")]
    CampNotFound(CampId),
    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),
    #[error("Worker not found: {0}")]
    WorkerNotFound(WorkerId),
    #[error("Room number already in use: {0}")]
    RoomNumberTaken(RoomNumber),
    #[error("Storage error")]
    StorageError(#[from] StoreError),
    #[error("Rollback failed, stored data may be inconsistent: {rollback}")]
    RollbackFailed {
        #[source]
        original: StoreError,
        rollback: StoreError,
    },
}

impl PartialEq for OccupancyError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::CapacityExceeded {
                    room: a,
                    capacity: x,
                },
                Self::CapacityExceeded {
                    room: b,
                    capacity: y,
                },
            ) => a == b && x == y,
            (Self::AlreadyAssigned(a), Self::AlreadyAssigned(b)) => a == b,
            (Self::NotAssigned(a, x), Self::NotAssigned(b, y)) => {
                a == b && x == y
            }
            (Self::CampNotFound(a), Self::CampNotFound(b)) => a == b,
            (Self::RoomNotFound(a), Self::RoomNotFound(b)) => a == b,
            (Self::WorkerNotFound(a), Self::WorkerNotFound(b)) => a == b,
            (Self::RoomNumberTaken(a), Self::RoomNumberTaken(b)) => a == b,
            (Self::StorageError(a), Self::StorageError(b)) => a == b,
            (
                Self::RollbackFailed {
                    original: a,
                    rollback: x,
                },
                Self::RollbackFailed {
                    original: b,
                    rollback: y,
                },
            ) => a == b && x == y,
            _ => false,
        }
    }
}

/// One record-level effect of an occupancy operation. `None` on the `before`
/// side means the record was created, `None` on the `after` side means it
/// was deleted.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Room {
        before: Option<Room>,
        after: Option<Room>,
    },
    Worker {
        before: Option<Worker>,
        after: Option<Worker>,
    },
}

/// The rooms of one camp together with the camp's worker records.
///
/// Every mutation goes through the methods below, which keep two invariants:
/// no room holds more workers than its capacity, and a worker id is listed by
/// at most one room, mirrored by that worker's `room_id`. Each mutation
/// returns the ordered list of record changes it made so that callers can
/// persist (and if needed undo) exactly those.
#[derive(Debug, Clone, PartialEq)]
pub struct Occupancy {
    camp_id: CampId,
    rooms: Vec<Room>,
    workers: HashMap<WorkerId, Worker>,
}

impl Occupancy {
    pub fn new(camp_id: CampId) -> Self {
        Self {
            camp_id,
            rooms: Vec::new(),
            workers: HashMap::new(),
        }
    }

    /// Builds the model from stored records. Room lists win over worker
    /// back-references: dangling and duplicate entries are dropped and every
    /// `room_id` is rewritten to match the room that lists the worker.
    pub fn load(
        camp_id: CampId,
        mut rooms: Vec<Room>,
        workers: Vec<Worker>,
    ) -> Self {
        let mut workers: HashMap<WorkerId, Worker> = workers
            .into_iter()
            .filter(|w| w.camp_id == camp_id)
            .map(|w| (w.id, w))
            .collect();
        rooms.retain(|room| room.camp_id == camp_id);

        let mut seen = HashSet::new();
        for room in rooms.iter_mut() {
            let room_number = room.number.clone();
            room.workers.retain(|worker_id| {
                if !workers.contains_key(worker_id) {
                    tracing::warn!(
                        "Dropping unknown worker {} from room {}",
                        worker_id,
                        room_number
                    );
                    return false;
                }
                if !seen.insert(*worker_id) {
                    tracing::warn!(
                        "Dropping duplicate assignment of worker {} in room {}",
                        worker_id,
                        room_number
                    );
                    return false;
                }
                true
            });
            if room.occupied_beds() > room.capacity.value_of() {
                tracing::warn!(
                    "Room {} holds {} workers but has {} beds",
                    room.number,
                    room.occupied_beds(),
                    room.capacity.value_of()
                );
            }
        }

        let assignments: HashMap<WorkerId, RoomId> = rooms
            .iter()
            .flat_map(|room| room.workers.iter().map(move |w| (*w, room.id)))
            .collect();
        for worker in workers.values_mut() {
            let room_id = assignments.get(&worker.id).copied();
            if worker.room_id != room_id {
                tracing::debug!(
                    "Reconciling room of worker {}: {:?} -> {:?}",
                    worker.id,
                    worker.room_id,
                    room_id
                );
                worker.room_id = room_id;
            }
        }

        Self {
            camp_id,
            rooms,
            workers,
        }
    }

    pub fn camp_id(&self) -> &CampId {
        &self.camp_id
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, room_id: &RoomId) -> Result<&Room, OccupancyError> {
        self.rooms
            .iter()
            .find(|room| &room.id == room_id)
            .ok_or(OccupancyError::RoomNotFound(*room_id))
    }

    pub fn worker(
        &self,
        worker_id: &WorkerId,
    ) -> Result<&Worker, OccupancyError> {
        self.workers
            .get(worker_id)
            .ok_or(OccupancyError::WorkerNotFound(*worker_id))
    }

    pub fn workers(&self) -> impl Iterator<Item = &Worker> {
        self.workers.values()
    }

    /// Workers of a room in bed order.
    pub fn workers_of(
        &self,
        room_id: &RoomId,
    ) -> Result<Vec<&Worker>, OccupancyError> {
        let room = self.room(room_id)?;
        Ok(room
            .workers
            .iter()
            .filter_map(|id| self.workers.get(id))
            .collect())
    }

    pub fn occupancy(&self, room_id: &RoomId) -> Result<f64, OccupancyError> {
        Ok(self.room(room_id)?.occupancy())
    }

    pub fn unassigned_workers(&self) -> impl Iterator<Item = &Worker> {
        self.workers.values().filter(|w| w.room_id.is_none())
    }

    pub fn add_room(
        &mut self,
        mut room: Room,
    ) -> Result<Vec<Change>, OccupancyError> {
        if room.camp_id != self.camp_id {
            return Err(OccupancyError::CampNotFound(room.camp_id));
        }
        self.check_room_number(&room.number, None)?;
        room.workers.clear();

        self.rooms.push(room.clone());
        Ok(vec![Change::Room {
            before: None,
            after: Some(room),
        }])
    }

    pub fn update_room(
        &mut self,
        room_id: &RoomId,
        number: RoomNumber,
        capacity: Capacity,
        project: ProjectTag,
    ) -> Result<Vec<Change>, OccupancyError> {
        let idx = self.room_index(room_id)?;
        self.check_room_number(&number, Some(room_id))?;

        let before = self.rooms[idx].clone();
        if before.occupied_beds() > capacity.value_of() {
            return Err(OccupancyError::CapacityExceeded {
                room: number,
                capacity: capacity.value_of(),
            });
        }

        let room = &mut self.rooms[idx];
        room.number = number;
        room.capacity = capacity;
        room.project = project;

        Ok(vec![Change::Room {
            before: Some(before),
            after: Some(room.clone()),
        }])
    }

    /// Unassigns every worker of the room, then removes the room.
    pub fn delete_room(
        &mut self,
        room_id: &RoomId,
    ) -> Result<Vec<Change>, OccupancyError> {
        let idx = self.room_index(room_id)?;
        let mut changes = Vec::new();

        for worker_id in self.rooms[idx].workers.clone() {
            if let Some(worker) = self.workers.get_mut(&worker_id) {
                let before = worker.clone();
                worker.room_id = None;
                changes.push(Change::Worker {
                    before: Some(before),
                    after: Some(worker.clone()),
                });
            }
        }

        let room = self.rooms.remove(idx);
        changes.push(Change::Room {
            before: Some(room),
            after: None,
        });
        Ok(changes)
    }

    pub fn add_worker(
        &mut self,
        mut worker: Worker,
    ) -> Result<Vec<Change>, OccupancyError> {
        if worker.camp_id != self.camp_id {
            return Err(OccupancyError::CampNotFound(worker.camp_id));
        }
        worker.room_id = None;

        self.workers.insert(worker.id, worker.clone());
        Ok(vec![Change::Worker {
            before: None,
            after: Some(worker),
        }])
    }

    /// Edits a worker's details. The room assignment is left untouched.
    pub fn update_worker(
        &mut self,
        worker_id: &WorkerId,
        name: WorkerName,
        registration_number: RegistrationNumber,
        project: ProjectTag,
        entry_date: NaiveDate,
    ) -> Result<Vec<Change>, OccupancyError> {
        let worker = self
            .workers
            .get_mut(worker_id)
            .ok_or(OccupancyError::WorkerNotFound(*worker_id))?;
        let before = worker.clone();

        worker.name = name;
        worker.registration_number = registration_number;
        worker.project = project;
        worker.entry_date = entry_date;

        Ok(vec![Change::Worker {
            before: Some(before),
            after: Some(worker.clone()),
        }])
    }

    /// Removes a worker record, taking it out of its room first.
    pub fn delete_worker(
        &mut self,
        worker_id: &WorkerId,
    ) -> Result<Vec<Change>, OccupancyError> {
        let room_id = self.worker(worker_id)?.room_id;

        let mut changes = match room_id {
            Some(room_id) => self.remove_worker(&room_id, worker_id)?,
            None => Vec::new(),
        };

        if let Some(worker) = self.workers.remove(worker_id) {
            changes.push(Change::Worker {
                before: Some(worker),
                after: None,
            });
        }
        Ok(changes)
    }

    pub fn assign_worker(
        &mut self,
        room_id: &RoomId,
        worker_id: &WorkerId,
    ) -> Result<Vec<Change>, OccupancyError> {
        let idx = self.room_index(room_id)?;
        let worker_before = self.worker(worker_id)?.clone();

        if self.rooms.iter().any(|room| room.contains(worker_id)) {
            return Err(OccupancyError::AlreadyAssigned(*worker_id));
        }

        let room_before = self.rooms[idx].clone();
        if room_before.is_full() {
            return Err(OccupancyError::CapacityExceeded {
                room: room_before.number,
                capacity: room_before.capacity.value_of(),
            });
        }

        self.rooms[idx].workers.push(*worker_id);
        let mut worker_after = worker_before.clone();
        worker_after.room_id = Some(*room_id);
        self.workers.insert(*worker_id, worker_after.clone());

        Ok(vec![
            Change::Room {
                before: Some(room_before),
                after: Some(self.rooms[idx].clone()),
            },
            Change::Worker {
                before: Some(worker_before),
                after: Some(worker_after),
            },
        ])
    }

    /// Takes a worker out of a room. The worker record is kept, unassigned.
    pub fn remove_worker(
        &mut self,
        room_id: &RoomId,
        worker_id: &WorkerId,
    ) -> Result<Vec<Change>, OccupancyError> {
        let idx = self.room_index(room_id)?;
        let worker_before = self.worker(worker_id)?.clone();

        let room_before = self.rooms[idx].clone();
        let position = room_before
            .workers
            .iter()
            .position(|id| id == worker_id)
            .ok_or_else(|| {
                OccupancyError::NotAssigned(
                    *worker_id,
                    room_before.number.clone(),
                )
            })?;

        self.rooms[idx].workers.remove(position);
        let mut worker_after = worker_before.clone();
        worker_after.room_id = None;
        self.workers.insert(*worker_id, worker_after.clone());

        Ok(vec![
            Change::Room {
                before: Some(room_before),
                after: Some(self.rooms[idx].clone()),
            },
            Change::Worker {
                before: Some(worker_before),
                after: Some(worker_after),
            },
        ])
    }

    /// Removal from `from` followed by assignment to `to`, all or nothing: if
    /// the assignment fails the worker is put back where it was.
    pub fn move_worker(
        &mut self,
        worker_id: &WorkerId,
        from: &RoomId,
        to: &RoomId,
    ) -> Result<Vec<Change>, OccupancyError> {
        let mut changes = self.remove_worker(from, worker_id)?;
        match self.assign_worker(to, worker_id) {
            Ok(assigned) => {
                changes.extend(assigned);
                Ok(changes)
            }
            Err(e) => {
                self.revert(changes);
                Err(e)
            }
        }
    }

    /// Restores the `before` side of the given changes, newest first.
    pub fn revert(&mut self, changes: Vec<Change>) {
        for change in changes.into_iter().rev() {
            match change {
                Change::Room { before, after } => {
                    let id = match (&before, &after) {
                        (Some(room), _) | (None, Some(room)) => room.id,
                        (None, None) => continue,
                    };
                    let idx = self.rooms.iter().position(|r| r.id == id);
                    match (before, idx) {
                        (Some(room), Some(idx)) => self.rooms[idx] = room,
                        (Some(room), None) => self.rooms.push(room),
                        (None, Some(idx)) => {
                            self.rooms.remove(idx);
                        }
                        (None, None) => {}
                    }
                }
                Change::Worker { before, after } => match (before, after) {
                    (Some(worker), _) => {
                        self.workers.insert(worker.id, worker);
                    }
                    (None, Some(worker)) => {
                        self.workers.remove(&worker.id);
                    }
                    (None, None) => {}
                },
            }
        }
    }

    fn room_index(&self, room_id: &RoomId) -> Result<usize, OccupancyError> {
        self.rooms
            .iter()
            .position(|room| &room.id == room_id)
            .ok_or(OccupancyError::RoomNotFound(*room_id))
    }

    fn check_room_number(
        &self,
        number: &RoomNumber,
        except: Option<&RoomId>,
    ) -> Result<(), OccupancyError> {
        let taken = self
            .rooms
            .iter()
            .any(|room| &room.number == number && Some(&room.id) != except);
        if taken {
            return Err(OccupancyError::RoomNumberTaken(number.clone()));
        }
        Ok(())
    }
}
