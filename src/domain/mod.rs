mod camp;
mod camp_id;
mod camp_name;
mod data_stores;
mod email;
mod error;
mod occupancy;
mod project_tag;
mod report;
mod room;
mod room_id;
mod worker;
mod worker_id;

pub use camp::*;
pub use camp_id::*;
pub use camp_name::*;
pub use data_stores::*;
pub use email::*;
pub use error::*;
pub use occupancy::*;
pub use project_tag::*;
pub use report::*;
pub use room::*;
pub use room_id::*;
pub use worker::*;
pub use worker_id::*;
