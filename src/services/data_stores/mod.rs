pub mod hashmap_camp_store;
pub mod hashmap_room_store;
pub mod hashmap_worker_store;
pub mod json_file_store;
pub mod postgres_camp_store;
pub mod postgres_room_store;
pub mod postgres_worker_store;

pub use hashmap_camp_store::*;
pub use hashmap_room_store::*;
pub use hashmap_worker_store::*;
pub use json_file_store::*;
pub use postgres_camp_store::*;
pub use postgres_room_store::*;
pub use postgres_worker_store::*;
