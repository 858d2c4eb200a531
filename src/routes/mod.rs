pub mod camps;
mod extract;
pub mod rooms;
pub mod workers;

pub use extract::{AppJson, AppQuery};
