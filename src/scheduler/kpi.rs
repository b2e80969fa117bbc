//! Timetable quality metrics (KPIs).
//!
//! Computes summary indicators of a stored timetable.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Lessons | Stored lessons in weeks 1 and 2 |
//! | Collisions | Double bookings on any axis |
//! | Group Gap Periods | Sum of idle periods between group lessons |
//! | Teacher Gap Periods | Sum of idle periods between teacher lessons |
//! | Room Utilization | Busy slots / 96 per room |
//! | Avg Utilization | Mean over rooms with at least one lesson |

use std::collections::HashMap;

use crate::analysis::{self, CollisionReport};
use crate::models::{RoomId, SlotMask, TimetableSnapshot, CYCLE_SLOTS};

/// Timetable performance indicators.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Stored lessons inside the two-week cycle.
    pub lesson_count: usize,
    /// Number of collision records.
    pub collision_count: usize,
    /// Total idle periods across all groups.
    pub group_gap_periods: u32,
    /// Total idle periods across all teachers.
    pub teacher_gap_periods: u32,
    /// Average utilization of used rooms (0.0..1.0).
    pub avg_utilization: f64,
    /// Per-room utilization.
    pub utilization_by_room: HashMap<RoomId, f64>,
}

impl TimetableKpi {
    /// Computes KPIs for the lessons stored in `snapshot`.
    pub fn calculate(snapshot: &TimetableSnapshot) -> Self {
        let report = analysis::find_collisions(snapshot);
        Self::from_report(snapshot, &report)
    }

    /// Computes KPIs reusing an existing analysis report.
    pub fn from_report(snapshot: &TimetableSnapshot, report: &CollisionReport) -> Self {
        let mut busy: HashMap<RoomId, SlotMask> = HashMap::new();
        let mut lesson_count = 0;
        for lesson in snapshot.lessons_in_cycle() {
            lesson_count += 1;
            busy.entry(lesson.room()).or_default().insert(lesson.slot());
        }

        let utilization_by_room: HashMap<RoomId, f64> = busy
            .into_iter()
            .filter(|(_, mask)| !mask.is_empty())
            .map(|(room, mask)| (room, mask.count() as f64 / CYCLE_SLOTS as f64))
            .collect();

        let avg_utilization = if utilization_by_room.is_empty() {
            0.0
        } else {
            let sum: f64 = utilization_by_room.values().sum();
            sum / utilization_by_room.len() as f64
        };

        Self {
            lesson_count,
            collision_count: report.collisions.len(),
            group_gap_periods: report.group_gap_periods(),
            teacher_gap_periods: report.teacher_gap_periods(),
            avg_utilization,
            utilization_by_room,
        }
    }

    /// Whether no resource is double-booked.
    pub fn is_conflict_free(&self) -> bool {
        self.collision_count == 0
    }

    /// Whether the timetable is conflict-free and within the gap limits.
    pub fn meets_thresholds(&self, max_group_gap_periods: u32, max_teacher_gap_periods: u32) -> bool {
        self.is_conflict_free()
            && self.group_gap_periods <= max_group_gap_periods
            && self.teacher_gap_periods <= max_teacher_gap_periods
    }
}
