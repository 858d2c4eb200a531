mod delete_camp;
mod get_camp_list;
mod get_camp_report;
mod join_camp;
mod new_camp;
mod update_camp;

pub use delete_camp::*;
pub use get_camp_list::*;
pub use get_camp_report::*;
pub use join_camp::*;
pub use new_camp::*;
pub use update_camp::*;
