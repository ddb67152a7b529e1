pub mod feasibility;
pub mod request;
pub mod time_slot;
pub mod work_item;
