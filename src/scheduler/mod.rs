//! Requirement expansion, greedy placement, and KPI evaluation.
//!
//! # Algorithm
//!
//! `GreedyScheduler` derives what each curriculum entry still lacks in the
//! two-week cycle, orders the requirements hardest first, and places each
//! missing lesson at the earliest slot where its groups, its teachers, and
//! one large-enough room are free. It is not optimal, but it is fast,
//! deterministic, and never double-books a resource.
//!
//! # KPI
//!
//! `TimetableKpi` summarizes a stored timetable: collisions, idle periods,
//! and room utilization.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

mod greedy;
mod kpi;
mod occupancy;
mod requirements;

pub use greedy::{
    find_slot, GreedyScheduler, RoomOrder, ScheduleOutcome, SchedulerConfig, UnplacedLesson,
};
pub use kpi::TimetableKpi;
pub use occupancy::Occupancy;
pub use requirements::{
    expand_requirements, sort_by_difficulty, Expansion, Requirement, RequirementExpander,
};
