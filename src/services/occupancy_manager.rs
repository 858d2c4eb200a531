use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{
    app_state::{CampStoreType, RoomStoreType, WorkerStoreType},
    domain::{
        CampId, CampStats, Capacity, Change, Occupancy, OccupancyError,
        Position, ProjectTag, RegistrationNumber, Room, RoomId, RoomNumber,
        StoreError, Worker, WorkerId, WorkerName,
    },
};

/// Runs occupancy operations against the stores.
///
/// Each mutation takes the camp's lock, checks that the camp still exists,
/// loads its snapshot, applies the in-memory operation and writes every
/// changed record in order. A failed write undoes the earlier writes of the
/// same operation, newest first, and deleted records go back to their
/// original place in the listing order.
#[derive(Clone)]
pub struct OccupancyManager {
    camp_store: CampStoreType,
    room_store: RoomStoreType,
    worker_store: WorkerStoreType,
    camp_locks: Arc<Mutex<HashMap<CampId, Arc<Mutex<()>>>>>,
}

impl OccupancyManager {
    pub fn new(
        camp_store: CampStoreType,
        room_store: RoomStoreType,
        worker_store: WorkerStoreType,
    ) -> Self {
        Self {
            camp_store,
            room_store,
            worker_store,
            camp_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    #[tracing::instrument(name = "Load camp occupancy", skip(self))]
    pub async fn load(
        &self,
        camp_id: &CampId,
    ) -> Result<Occupancy, OccupancyError> {
        let rooms = self.room_store.read().await.list_rooms(camp_id).await?;
        let workers =
            self.worker_store.read().await.list_workers(camp_id).await?;
        Ok(Occupancy::load(*camp_id, rooms, workers))
    }

    /// Worker records of a camp in creation order, with `room_id` as the
    /// rooms list them.
    #[tracing::instrument(name = "List camp workers", skip(self))]
    pub async fn list_workers(
        &self,
        camp_id: &CampId,
    ) -> Result<Vec<Worker>, OccupancyError> {
        let rooms = self.room_store.read().await.list_rooms(camp_id).await?;
        let workers =
            self.worker_store.read().await.list_workers(camp_id).await?;
        let order: Vec<WorkerId> = workers.iter().map(|w| w.id).collect();

        let occupancy = Occupancy::load(*camp_id, rooms, workers);
        Ok(order
            .iter()
            .filter_map(|id| occupancy.worker(id).ok().cloned())
            .collect())
    }

    pub async fn get_worker(
        &self,
        worker_id: &WorkerId,
    ) -> Result<Worker, OccupancyError> {
        let camp_id = self.camp_of_worker(worker_id).await?;
        let occupancy = self.load(&camp_id).await?;
        Ok(occupancy.worker(worker_id)?.clone())
    }

    pub async fn camp_of_room(
        &self,
        room_id: &RoomId,
    ) -> Result<CampId, OccupancyError> {
        match self.room_store.read().await.get_room(room_id).await {
            Ok(room) => Ok(room.camp_id),
            Err(StoreError::NotFound) => {
                Err(OccupancyError::RoomNotFound(*room_id))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn camp_of_worker(
        &self,
        worker_id: &WorkerId,
    ) -> Result<CampId, OccupancyError> {
        match self.worker_store.read().await.get_worker(worker_id).await {
            Ok(worker) => Ok(worker.camp_id),
            Err(StoreError::NotFound) => {
                Err(OccupancyError::WorkerNotFound(*worker_id))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[tracing::instrument(name = "Add room", skip_all)]
    pub async fn add_room(&self, room: Room) -> Result<Room, OccupancyError> {
        let (room_id, camp_id) = (room.id, room.camp_id);
        let (occupancy, _) = self
            .mutate(&camp_id, |occupancy| occupancy.add_room(room))
            .await?;
        Ok(occupancy.room(&room_id)?.clone())
    }

    #[tracing::instrument(name = "Update room", skip_all)]
    pub async fn update_room(
        &self,
        room_id: &RoomId,
        number: RoomNumber,
        capacity: Capacity,
        project: ProjectTag,
    ) -> Result<Room, OccupancyError> {
        let camp_id = self.camp_of_room(room_id).await?;
        let (occupancy, _) = self
            .mutate(&camp_id, |occupancy| {
                occupancy.update_room(room_id, number, capacity, project)
            })
            .await?;
        Ok(occupancy.room(room_id)?.clone())
    }

    /// Deletes a room and unassigns its workers. Returns the deleted room.
    #[tracing::instrument(name = "Delete room", skip_all)]
    pub async fn delete_room(
        &self,
        room_id: &RoomId,
    ) -> Result<Room, OccupancyError> {
        let camp_id = self.camp_of_room(room_id).await?;
        let (_, changes) = self
            .mutate(&camp_id, |occupancy| occupancy.delete_room(room_id))
            .await?;

        changes
            .into_iter()
            .find_map(|change| match change {
                Change::Room {
                    before: Some(room),
                    after: None,
                } => Some(room),
                _ => None,
            })
            .ok_or(OccupancyError::RoomNotFound(*room_id))
    }

    /// Creates a worker record, assigning it to `room_id` in the same
    /// operation when given. Nothing is stored if the assignment fails.
    #[tracing::instrument(name = "Add worker", skip_all)]
    pub async fn add_worker(
        &self,
        worker: Worker,
        room_id: Option<RoomId>,
    ) -> Result<Worker, OccupancyError> {
        let worker_id = worker.id;
        let camp_id = worker.camp_id;
        let (occupancy, _) = self
            .mutate(&camp_id, |occupancy| {
                let mut changes = occupancy.add_worker(worker)?;
                if let Some(room_id) = room_id {
                    changes.extend(occupancy.assign_worker(&room_id, &worker_id)?);
                }
                Ok(changes)
            })
            .await?;
        Ok(occupancy.worker(&worker_id)?.clone())
    }

    #[tracing::instrument(name = "Update worker", skip_all)]
    pub async fn update_worker(
        &self,
        worker_id: &WorkerId,
        name: WorkerName,
        registration_number: RegistrationNumber,
        project: ProjectTag,
        entry_date: NaiveDate,
    ) -> Result<Worker, OccupancyError> {
        let camp_id = self.camp_of_worker(worker_id).await?;
        let (occupancy, _) = self
            .mutate(&camp_id, |occupancy| {
                occupancy.update_worker(
                    worker_id,
                    name,
                    registration_number,
                    project,
                    entry_date,
                )
            })
            .await?;
        Ok(occupancy.worker(worker_id)?.clone())
    }

    /// Takes the worker out of its room and deletes the record. Returns the
    /// deleted worker.
    #[tracing::instrument(name = "Delete worker", skip_all)]
    pub async fn delete_worker(
        &self,
        worker_id: &WorkerId,
    ) -> Result<Worker, OccupancyError> {
        let camp_id = self.camp_of_worker(worker_id).await?;
        let (_, changes) = self
            .mutate(&camp_id, |occupancy| occupancy.delete_worker(worker_id))
            .await?;

        changes
            .into_iter()
            .find_map(|change| match change {
                Change::Worker {
                    before: Some(worker),
                    after: None,
                } => Some(worker),
                _ => None,
            })
            .ok_or(OccupancyError::WorkerNotFound(*worker_id))
    }

    #[tracing::instrument(name = "Assign worker", skip_all)]
    pub async fn assign_worker(
        &self,
        room_id: &RoomId,
        worker_id: &WorkerId,
    ) -> Result<(Room, Worker), OccupancyError> {
        let camp_id = self.camp_of_room(room_id).await?;
        let (occupancy, _) = self
            .mutate(&camp_id, |occupancy| {
                occupancy.assign_worker(room_id, worker_id)
            })
            .await?;
        Ok((
            occupancy.room(room_id)?.clone(),
            occupancy.worker(worker_id)?.clone(),
        ))
    }

    #[tracing::instrument(name = "Remove worker", skip_all)]
    pub async fn remove_worker(
        &self,
        room_id: &RoomId,
        worker_id: &WorkerId,
    ) -> Result<(Room, Worker), OccupancyError> {
        let camp_id = self.camp_of_room(room_id).await?;
        let (occupancy, _) = self
            .mutate(&camp_id, |occupancy| {
                occupancy.remove_worker(room_id, worker_id)
            })
            .await?;
        Ok((
            occupancy.room(room_id)?.clone(),
            occupancy.worker(worker_id)?.clone(),
        ))
    }

    /// Moves a worker between two rooms of the same camp. Returns the source
    /// room, the target room and the worker as stored afterwards.
    #[tracing::instrument(name = "Move worker", skip_all)]
    pub async fn move_worker(
        &self,
        worker_id: &WorkerId,
        from: &RoomId,
        to: &RoomId,
    ) -> Result<(Room, Room, Worker), OccupancyError> {
        let camp_id = self.camp_of_room(from).await?;
        let (occupancy, _) = self
            .mutate(&camp_id, |occupancy| {
                occupancy.move_worker(worker_id, from, to)
            })
            .await?;
        Ok((
            occupancy.room(from)?.clone(),
            occupancy.room(to)?.clone(),
            occupancy.worker(worker_id)?.clone(),
        ))
    }

    #[tracing::instrument(name = "Compute camp report", skip(self))]
    pub async fn report(
        &self,
        camp_id: &CampId,
        today: NaiveDate,
    ) -> Result<CampStats, OccupancyError> {
        let _guard = self.lock_camp(camp_id).await;
        let occupancy = self.load(camp_id).await?;
        Ok(CampStats::compute(&occupancy, today))
    }

    /// Deletes a camp together with all of its rooms and workers. If the
    /// camp record itself cannot be deleted, the rooms and workers are
    /// restored.
    #[tracing::instrument(name = "Delete camp", skip(self))]
    pub async fn delete_camp(
        &self,
        camp_id: &CampId,
    ) -> Result<(), OccupancyError> {
        let guard = self.lock_camp(camp_id).await;
        self.check_camp(camp_id).await?;
        let occupancy = self.load(camp_id).await?;

        let workers = occupancy.workers().map(|w| Change::Worker {
            before: Some(w.clone()),
            after: None,
        });
        let rooms = occupancy.rooms().iter().map(|r| Change::Room {
            before: Some(r.clone()),
            after: None,
        });
        let changes: Vec<Change> = workers.chain(rooms).collect();
        let positions = self.commit(&changes).await?;

        let deleted = self.camp_store.write().await.delete_camp(camp_id).await;
        if let Err(original) = deleted {
            tracing::warn!("Camp record delete failed, restoring its records");
            return Err(self.undo(&changes, &positions, original).await);
        }

        drop(guard);
        self.release_lock(camp_id).await;
        Ok(())
    }

    async fn lock_camp(&self, camp_id: &CampId) -> OwnedMutexGuard<()> {
        let lock = self
            .camp_locks
            .lock()
            .await
            .entry(*camp_id)
            .or_default()
            .clone();
        lock.lock_owned().await
    }

    /// Drops the camp's lock entry unless another task still holds or waits
    /// on it.
    async fn release_lock(&self, camp_id: &CampId) {
        let mut locks = self.camp_locks.lock().await;
        if locks
            .get(camp_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(camp_id);
        }
    }

    async fn check_camp(&self, camp_id: &CampId) -> Result<(), OccupancyError> {
        match self.camp_store.read().await.get_camp(camp_id).await {
            Ok(_) => Ok(()),
            Err(StoreError::NotFound) => {
                Err(OccupancyError::CampNotFound(*camp_id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn mutate(
        &self,
        camp_id: &CampId,
        operation: impl FnOnce(
            &mut Occupancy,
        ) -> Result<Vec<Change>, OccupancyError>,
    ) -> Result<(Occupancy, Vec<Change>), OccupancyError> {
        let _guard = self.lock_camp(camp_id).await;
        self.check_camp(camp_id).await?;
        let mut occupancy = self.load(camp_id).await?;
        let changes = operation(&mut occupancy)?;
        self.commit(&changes).await?;
        Ok((occupancy, changes))
    }

    /// Writes the changes in order. Returns, for each change, the position a
    /// deleted record held.
    async fn commit(
        &self,
        changes: &[Change],
    ) -> Result<Vec<Option<Position>>, OccupancyError> {
        let mut positions = Vec::with_capacity(changes.len());
        for (idx, change) in changes.iter().enumerate() {
            match self.apply(change).await {
                Ok(position) => positions.push(position),
                Err(original) => {
                    tracing::warn!(
                        "Write {} of {} failed, undoing earlier writes",
                        idx + 1,
                        changes.len()
                    );
                    return Err(self
                        .undo(&changes[..idx], &positions, original)
                        .await);
                }
            }
        }
        Ok(positions)
    }

    /// Reverts written changes newest first.
    async fn undo(
        &self,
        done: &[Change],
        positions: &[Option<Position>],
        original: StoreError,
    ) -> OccupancyError {
        for (change, position) in done.iter().zip(positions).rev() {
            if let Err(rollback) = self.revert(change, *position).await {
                tracing::error!("Rollback failed: {:?}", rollback);
                return OccupancyError::RollbackFailed { original, rollback };
            }
        }
        OccupancyError::StorageError(original)
    }

    async fn apply(
        &self,
        change: &Change,
    ) -> Result<Option<Position>, StoreError> {
        match change {
            Change::Room {
                after: Some(room), ..
            } => {
                self.room_store.write().await.put_room(room.clone()).await?;
                Ok(None)
            }
            Change::Room {
                before: Some(room),
                after: None,
            } => self
                .room_store
                .write()
                .await
                .delete_room(&room.id)
                .await
                .map(Some),
            Change::Worker {
                after: Some(worker),
                ..
            } => {
                self.worker_store
                    .write()
                    .await
                    .put_worker(worker.clone())
                    .await?;
                Ok(None)
            }
            Change::Worker {
                before: Some(worker),
                after: None,
            } => self
                .worker_store
                .write()
                .await
                .delete_worker(&worker.id)
                .await
                .map(Some),
            _ => Ok(None),
        }
    }

    async fn revert(
        &self,
        change: &Change,
        position: Option<Position>,
    ) -> Result<(), StoreError> {
        match (change, position) {
            (
                Change::Room {
                    before: Some(room),
                    after: None,
                },
                Some(position),
            ) => {
                self.room_store
                    .write()
                    .await
                    .restore_room(room.clone(), position)
                    .await
            }
            (
                Change::Room {
                    before: Some(room), ..
                },
                _,
            ) => self.room_store.write().await.put_room(room.clone()).await,
            (
                Change::Room {
                    before: None,
                    after: Some(room),
                },
                _,
            ) => self
                .room_store
                .write()
                .await
                .delete_room(&room.id)
                .await
                .map(|_| ()),
            (
                Change::Worker {
                    before: Some(worker),
                    after: None,
                },
                Some(position),
            ) => {
                self.worker_store
                    .write()
                    .await
                    .restore_worker(worker.clone(), position)
                    .await
            }
            (
                Change::Worker {
                    before: Some(worker),
                    ..
                },
                _,
            ) => {
                self.worker_store
                    .write()
                    .await
                    .put_worker(worker.clone())
                    .await
            }
            (
                Change::Worker {
                    before: None,
                    after: Some(worker),
                },
                _,
            ) => self
                .worker_store
                .write()
                .await
                .delete_worker(&worker.id)
                .await
                .map(|_| ()),
            _ => Ok(()),
        }
    }
}
