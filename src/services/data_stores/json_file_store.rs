use std::path::{Path, PathBuf};
use std::sync::Arc;

use color_eyre::eyre::WrapErr;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::domain::{
    Camp, CampFilter, CampId, CampStore, Position, Room, RoomId, RoomStore,
    StoreError, Worker, WorkerId, WorkerStore,
};

/// Layout of the data file. Each collection keeps insertion order.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    camps: Vec<Camp>,
    #[serde(default)]
    rooms: Vec<Room>,
    #[serde(default)]
    workers: Vec<Worker>,
}

/// All camps, rooms and workers in a single JSON file that is rewritten as a
/// whole on every change. Clones share the file and its lock, so the same
/// store can back all three store traits.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    #[tracing::instrument(name = "Opening JSON data file", skip_all)]
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        };

        if let Some(parent) = store.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .wrap_err_with(|| {
                        format!("failed to create {}", parent.display())
                    })
                    .map_err(StoreError::UnexpectedError)?;
            }
        }

        if !tokio::fs::try_exists(&store.path)
            .await
            .wrap_err("failed to check data file")
            .map_err(StoreError::UnexpectedError)?
        {
            tracing::info!("Creating empty data file at {:?}", store.path);
            store.write(&Document::default()).await?;
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Document, StoreError> {
        let contents = tokio::fs::read(&self.path)
            .await
            .wrap_err_with(|| format!("failed to read {}", self.path.display()))
            .map_err(StoreError::UnexpectedError)?;

        serde_json::from_slice(&contents)
            .wrap_err_with(|| format!("failed to parse {}", self.path.display()))
            .map_err(StoreError::UnexpectedError)
    }

    /// Writes to a sibling temp file first so readers never see a partially
    /// written document.
    async fn write(&self, document: &Document) -> Result<(), StoreError> {
        let contents = serde_json::to_vec_pretty(document)
            .wrap_err("failed to serialise data file")
            .map_err(StoreError::UnexpectedError)?;

        let mut tmp_path = self.path.clone().into_os_string();
        tmp_path.push(".tmp");

        tokio::fs::write(&tmp_path, contents)
            .await
            .wrap_err("failed to write temporary data file")
            .map_err(StoreError::UnexpectedError)?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .wrap_err("failed to replace data file")
            .map_err(StoreError::UnexpectedError)
    }

    async fn view<T>(
        &self,
        f: impl FnOnce(&Document) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _guard = self.lock.lock().await;
        let document = self.read().await?;
        f(&document)
    }

    async fn update<T>(
        &self,
        f: impl FnOnce(&mut Document) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;
        let result = f(&mut document)?;
        self.write(&document).await?;
        Ok(result)
    }
}

fn upsert<T>(items: &mut Vec<T>, item: T, same: impl Fn(&T) -> bool) {
    match items.iter().position(same) {
        Some(idx) => items[idx] = item,
        None => items.push(item),
    }
}

fn remove<T>(
    items: &mut Vec<T>,
    same: impl Fn(&T) -> bool,
) -> Result<(), StoreError> {
    let idx = items.iter().position(same).ok_or(StoreError::NotFound)?;
    items.remove(idx);
    Ok(())
}

/// Removes the matching item and returns how many items of its group came
/// before it. Positions are only compared within one camp, and the camp's
/// records do not change while its lock is held.
fn remove_ranked<T>(
    items: &mut Vec<T>,
    same: impl Fn(&T) -> bool,
    group: impl Fn(&T) -> bool,
) -> Result<Position, StoreError> {
    let idx = items.iter().position(same).ok_or(StoreError::NotFound)?;
    let rank = items[..idx].iter().filter(|item| group(item)).count();
    items.remove(idx);
    Ok(Position::new(rank as i64))
}

/// Puts the item back before the group member currently holding its rank,
/// or after the group's last member.
fn insert_ranked<T>(
    items: &mut Vec<T>,
    item: T,
    position: Position,
    same: impl Fn(&T) -> bool,
    group: impl Fn(&T) -> bool,
) {
    items.retain(|existing| !same(existing));
    let members: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, existing)| group(existing))
        .map(|(idx, _)| idx)
        .collect();
    let idx = usize::try_from(position.value_of())
        .ok()
        .and_then(|rank| members.get(rank).copied())
        .or_else(|| members.last().map(|last| last + 1))
        .unwrap_or(items.len());
    items.insert(idx, item);
}

#[async_trait::async_trait]
impl CampStore for JsonFileStore {
    async fn get_camp(&self, id: &CampId) -> Result<Camp, StoreError> {
        self.view(|document| {
            document
                .camps
                .iter()
                .find(|camp| &camp.id == id)
                .cloned()
                .ok_or(StoreError::NotFound)
        })
        .await
    }

    async fn list_camps(
        &self,
        filter: &CampFilter,
    ) -> Result<Vec<Camp>, StoreError> {
        self.view(|document| {
            Ok(document
                .camps
                .iter()
                .filter(|camp| filter.matches(camp))
                .cloned()
                .collect())
        })
        .await
    }

    #[tracing::instrument(name = "Writing camp to JSON file", skip_all)]
    async fn put_camp(&mut self, camp: Camp) -> Result<(), StoreError> {
        self.update(|document| {
            let id = camp.id;
            upsert(&mut document.camps, camp, |c| c.id == id);
            Ok(())
        })
        .await
    }

    #[tracing::instrument(name = "Deleting camp from JSON file", skip_all)]
    async fn delete_camp(&mut self, id: &CampId) -> Result<(), StoreError> {
        self.update(|document| remove(&mut document.camps, |c| &c.id == id))
            .await
    }
}

#[async_trait::async_trait]
impl RoomStore for JsonFileStore {
    async fn get_room(&self, id: &RoomId) -> Result<Room, StoreError> {
        self.view(|document| {
            document
                .rooms
                .iter()
                .find(|room| &room.id == id)
                .cloned()
                .ok_or(StoreError::NotFound)
        })
        .await
    }

    async fn list_rooms(
        &self,
        camp_id: &CampId,
    ) -> Result<Vec<Room>, StoreError> {
        self.view(|document| {
            Ok(document
                .rooms
                .iter()
                .filter(|room| &room.camp_id == camp_id)
                .cloned()
                .collect())
        })
        .await
    }

    #[tracing::instrument(name = "Writing room to JSON file", skip_all)]
    async fn put_room(&mut self, room: Room) -> Result<(), StoreError> {
        self.update(|document| {
            let id = room.id;
            upsert(&mut document.rooms, room, |r| r.id == id);
            Ok(())
        })
        .await
    }

    #[tracing::instrument(name = "Deleting room from JSON file", skip_all)]
    async fn delete_room(
        &mut self,
        id: &RoomId,
    ) -> Result<Position, StoreError> {
        self.update(|document| {
            let camp_id = document
                .rooms
                .iter()
                .find(|r| &r.id == id)
                .map(|r| r.camp_id)
                .ok_or(StoreError::NotFound)?;
            remove_ranked(
                &mut document.rooms,
                |r| &r.id == id,
                |r| r.camp_id == camp_id,
            )
        })
        .await
    }

    #[tracing::instrument(name = "Restoring room in JSON file", skip_all)]
    async fn restore_room(
        &mut self,
        room: Room,
        position: Position,
    ) -> Result<(), StoreError> {
        self.update(|document| {
            let (id, camp_id) = (room.id, room.camp_id);
            insert_ranked(
                &mut document.rooms,
                room,
                position,
                |r| r.id == id,
                |r| r.camp_id == camp_id,
            );
            Ok(())
        })
        .await
    }
}

#[async_trait::async_trait]
impl WorkerStore for JsonFileStore {
    async fn get_worker(&self, id: &WorkerId) -> Result<Worker, StoreError> {
        self.view(|document| {
            document
                .workers
                .iter()
                .find(|worker| &worker.id == id)
                .cloned()
                .ok_or(StoreError::NotFound)
        })
        .await
    }

    async fn list_workers(
        &self,
        camp_id: &CampId,
    ) -> Result<Vec<Worker>, StoreError> {
        self.view(|document| {
            Ok(document
                .workers
                .iter()
                .filter(|worker| &worker.camp_id == camp_id)
                .cloned()
                .collect())
        })
        .await
    }

    #[tracing::instrument(name = "Writing worker to JSON file", skip_all)]
    async fn put_worker(&mut self, worker: Worker) -> Result<(), StoreError> {
        self.update(|document| {
            let id = worker.id;
            upsert(&mut document.workers, worker, |w| w.id == id);
            Ok(())
        })
        .await
    }

    #[tracing::instrument(name = "Deleting worker from JSON file", skip_all)]
    async fn delete_worker(
        &mut self,
        id: &WorkerId,
    ) -> Result<Position, StoreError> {
        self.update(|document| {
            let camp_id = document
                .workers
                .iter()
                .find(|w| &w.id == id)
                .map(|w| w.camp_id)
                .ok_or(StoreError::NotFound)?;
            remove_ranked(
                &mut document.workers,
                |w| &w.id == id,
                |w| w.camp_id == camp_id,
            )
        })
        .await
    }

    #[tracing::instrument(name = "Restoring worker in JSON file", skip_all)]
    async fn restore_worker(
        &mut self,
        worker: Worker,
        position: Position,
    ) -> Result<(), StoreError> {
        self.update(|document| {
            let (id, camp_id) = (worker.id, worker.camp_id);
            insert_ranked(
                &mut document.workers,
                worker,
                position,
                |w| w.id == id,
                |w| w.camp_id == camp_id,
            );
            Ok(())
        })
        .await
    }
}
