use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{CampStore, RoomStore, WorkerStore},
    services::occupancy_manager::OccupancyManager,
};
pub type CampStoreType = Arc<RwLock<dyn CampStore + Send + Sync>>;
pub type RoomStoreType = Arc<RwLock<dyn RoomStore + Send + Sync>>;
pub type WorkerStoreType = Arc<RwLock<dyn WorkerStore + Send + Sync>>;

#[derive(Clone)]
pub struct AppState {
    pub camp_store: CampStoreType,
    pub room_store: RoomStoreType,
    pub worker_store: WorkerStoreType,
    pub occupancy: OccupancyManager,
}

impl AppState {
    pub fn new(
        camp_store: CampStoreType,
        room_store: RoomStoreType,
        worker_store: WorkerStoreType,
    ) -> Self {
        let occupancy = OccupancyManager::new(
            camp_store.clone(),
            room_store.clone(),
            worker_store.clone(),
        );
        Self {
            camp_store,
            room_store,
            worker_store,
            occupancy,
        }
    }
}
