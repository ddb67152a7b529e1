//! chronoplan — a deadline-aware, conflict-free time-slot scheduling engine.
//!
//! The engine allocates discrete units of work into a person's recurring
//! weekly availability, producing a concrete calendar, and supports safely
//! relocating a single already-placed unit without disturbing the rest.
//! It is a pure, synchronous computation over immutable inputs: persistence,
//! content generation, and calendar import belong to the caller.

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{EngineError, EngineResult};
pub use models::feasibility::{
    FeasibilityReport, SlotCandidate, Suggestion, SuggestionKind, SuggestionOutcome,
};
pub use models::request::{
    SchedulingMode, SchedulingOptions, SchedulingRequest, SchedulingResult, UrgencyLevel,
};
pub use models::time_slot::{BusyInterval, TimeSlot, WeeklyAvailability};
pub use models::work_item::{Allocation, WorkItem};
pub use services::multi_day_scheduler::Scheduler;
pub use services::relocation_engine::{calculate_available_time_slots, relocate};
