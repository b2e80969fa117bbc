//! University timetabling on a two-week grid.
//!
//! Places the lectures and labs a curriculum requires onto a grid of
//! 2 weeks × 6 days × 8 periods without double-booking any student group,
//! teacher, or room, and analyzes stored timetables for collisions and idle
//! periods.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Slot`, `Group`, `Flow`, `Room`, `Teacher`,
//!   `Subject`, `CurriculumEntry`, `Lesson`, `TimetableSnapshot`
//! - **`scheduler`**: Requirement expansion, greedy first-fit placement, KPIs
//! - **`analysis`**: Collision and gap detection over stored lessons
//! - **`validation`**: Input integrity checks (duplicate IDs, dangling references)
//! - **`store`**: Persistence seam and an in-memory store
//! - **`service`**: Store-backed scheduling and analysis
//! - **`view`**: Printable week/day/period/group projection
//!
//! # Logging
//!
//! Events are emitted through `tracing`. Installing a subscriber is up to
//! the host.
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{CurriculumEntry, Group, Room, Teacher, TimetableSnapshot};
//!
//! let snapshot = TimetableSnapshot::new()
//!     .with_group(Group::new(1, 25))
//!     .with_room(Room::new(1, 30))
//!     .with_teacher(Teacher::new(1))
//!     .with_entry(CurriculumEntry::for_group(1, 1, 144, 1, 1));
//!
//! let outcome = u_timetable::schedule_requirements(&snapshot);
//! assert_eq!(outcome.placed.len(), 3);
//! assert!(outcome.is_complete());
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

pub mod analysis;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod service;
pub mod store;
pub mod validation;
pub mod view;

pub use analysis::CollisionReport;
pub use error::{Result, TimetableError};
pub use scheduler::{GreedyScheduler, ScheduleOutcome, SchedulerConfig};
pub use service::{ScheduleRun, Timetabler};
pub use store::{MemoryStore, TimetableStore};

use models::TimetableSnapshot;

/// Places every outstanding lesson of `snapshot` with default settings.
///
/// The snapshot is not modified; persist `placed` to apply the result.
pub fn schedule_requirements(snapshot: &TimetableSnapshot) -> ScheduleOutcome {
    GreedyScheduler::new().schedule(snapshot)
}

/// Reports collisions and gaps of the lessons stored in `snapshot`.
pub fn find_collisions(snapshot: &TimetableSnapshot) -> CollisionReport {
    analysis::find_collisions(snapshot)
}
