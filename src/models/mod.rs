//! Timetabling domain models.
//!
//! Provides the data types shared by the scheduler, the analyzer, and the
//! storage seam.
//!
//! # Domain Mappings
//!
//! | u-timetable | University | Generic scheduling |
//! |-------------|-----------|--------------------|
//! | CurriculumEntry | Course assignment | Task |
//! | LessonOccurrence | Class meeting | Assignment |
//! | Group / Teacher / Room | Cohort / Lecturer / Classroom | Resource |
//! | Slot | Week, weekday, period | Time bucket |

mod curriculum;
mod diagnostic;
mod grid;
mod ids;
mod lesson;
mod resource;
mod snapshot;

pub use curriculum::{Audience, CurriculumEntry, LessonKind, RequirementTemplate};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use grid::{Slot, SlotMask, CYCLE_SLOTS, DAYS_PER_WEEK, PERIODS_PER_DAY, WEEKS};
pub use ids::{CurriculumId, FlowId, GroupId, LessonId, RoomId, SubjectId, TeacherId};
pub use lesson::{Lesson, LessonOccurrence};
pub use resource::{Flow, Group, Room, Subject, Teacher};
pub use snapshot::{SnapshotIndex, TimetableSnapshot};
