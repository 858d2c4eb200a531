pub mod data_stores;
pub mod occupancy_manager;
