mod assign_worker;
mod delete_worker;
mod get_worker;
mod get_worker_list;
mod move_worker;
mod new_worker;
mod unassign_worker;
mod update_worker;

pub use assign_worker::*;
pub use delete_worker::*;
pub use get_worker::*;
pub use get_worker_list::*;
pub use move_worker::*;
pub use new_worker::*;
pub use unassign_worker::*;
pub use update_worker::*;
