pub mod availability_resolver;
pub mod conflict_detector;
pub mod feasibility_analyzer;
pub mod fragment_finder;
pub mod multi_day_scheduler;
pub mod relocation_engine;
pub mod schedule_utils;
pub mod single_item_scheduler;
pub mod suggestion_engine;
