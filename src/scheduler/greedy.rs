//! Greedy first-fit lesson placer.
//!
//! # Algorithm
//!
//! 1. Seed occupancy from stored lessons in weeks 1 and 2.
//! 2. Expand and sort requirements (see [`requirements`](super::requirements)).
//! 3. For each requirement, for each needed lesson kind, scan slots in grid
//!    order (week, day, period). At the first slot where every group and
//!    every teacher is free, take the first free eligible room.
//! 4. Commit the placement to occupancy immediately. A lesson with no
//!    feasible (slot, room) is recorded as unplaced and the run continues.
//!
//! Placements are never revisited. A later, harder requirement can be left
//! unplaced even though moving an earlier lesson would have made room.
//!
//! # Complexity
//! O(n · k · S · r) where n=requirements, k=lessons per requirement,
//! S=96 slots, r=eligible rooms.

use serde::{Deserialize, Serialize};

use super::occupancy::Occupancy;
use super::requirements::{Requirement, RequirementExpander};
use crate::models::{
    CurriculumId, Diagnostic, DiagnosticKind, LessonKind, LessonOccurrence, RoomId, Slot,
    TimetableSnapshot,
};

/// Order in which a requirement's capacity-eligible rooms are tried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomOrder {
    /// Snapshot order.
    #[default]
    AsListed,
    /// Smallest sufficient room first; ties keep snapshot order.
    TightestFit,
}

/// Scheduling options, deserializable from host configuration.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Room iteration order.
    pub room_order: RoomOrder,
    /// Compute placements without committing them.
    pub dry_run: bool,
}

impl SchedulerConfig {
    /// Sets the room order.
    pub fn with_room_order(mut self, room_order: RoomOrder) -> Self {
        self.room_order = room_order;
        self
    }

    /// Enables or disables dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// A required lesson that found no slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnplacedLesson {
    /// Curriculum entry.
    pub curriculum: CurriculumId,
    /// Lesson kind.
    pub kind: LessonKind,
}

/// Result of a scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    /// New occurrences, in placement order. Not yet persisted.
    pub placed: Vec<LessonOccurrence>,
    /// Required lessons that could not be placed.
    pub unplaced: Vec<UnplacedLesson>,
    /// Non-fatal problems met during the run.
    pub diagnostics: Vec<Diagnostic>,
}

impl ScheduleOutcome {
    /// Whether every required lesson was placed.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// New occurrences of one curriculum entry.
    pub fn placed_for(&self, curriculum: CurriculumId) -> Vec<&LessonOccurrence> {
        self.placed
            .iter()
            .filter(|o| o.curriculum == curriculum)
            .collect()
    }
}

/// Greedy first-fit timetable scheduler.
///
/// # Example
///
/// ```
/// use u_timetable::models::{
///     CurriculumEntry, Group, LessonKind, Room, Slot, Teacher, TimetableSnapshot,
/// };
/// use u_timetable::scheduler::GreedyScheduler;
///
/// let snapshot = TimetableSnapshot::new()
///     .with_group(Group::new(1, 25))
///     .with_room(Room::new(1, 30))
///     .with_teacher(Teacher::new(1))
///     .with_entry(CurriculumEntry::for_group(1, 1, 108, 1, 1));
///
/// let outcome = GreedyScheduler::new().schedule(&snapshot);
/// assert_eq!(outcome.placed.len(), 2);
/// assert_eq!(outcome.placed[0].slot, Slot::new(1, 1, 1));
/// assert_eq!(outcome.placed[0].kind, LessonKind::Lecture);
/// assert_eq!(outcome.placed[1].slot, Slot::new(1, 1, 2));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyScheduler {
    room_order: RoomOrder,
}

impl GreedyScheduler {
    /// Creates a scheduler trying rooms in snapshot order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the room order.
    pub fn with_room_order(mut self, room_order: RoomOrder) -> Self {
        self.room_order = room_order;
        self
    }

    /// Creates a scheduler from host configuration.
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new().with_room_order(config.room_order)
    }

    /// Configured room order.
    pub fn room_order(&self) -> RoomOrder {
        self.room_order
    }

    /// Schedules every outstanding lesson of the snapshot.
    ///
    /// The snapshot is not modified; the caller persists `placed`.
    pub fn schedule(&self, snapshot: &TimetableSnapshot) -> ScheduleOutcome {
        let index = snapshot.index();
        let (occupancy, mut diagnostics) = Occupancy::seed(&index);
        let expansion = RequirementExpander::new()
            .with_room_order(self.room_order)
            .expand(&index);
        diagnostics.extend(expansion.diagnostics);

        let (mut outcome, _) = self.place(&expansion.requirements, occupancy);
        diagnostics.append(&mut outcome.diagnostics);
        outcome.diagnostics = diagnostics;

        tracing::info!(
            placed = outcome.placed.len(),
            unplaced = outcome.unplaced.len(),
            diagnostics = outcome.diagnostics.len(),
            "scheduling run finished"
        );
        outcome
    }

    /// Places requirements in the given order on top of `occupancy`.
    ///
    /// Returns the outcome and the occupancy after all placements.
    pub fn place(
        &self,
        requirements: &[Requirement],
        mut occupancy: Occupancy,
    ) -> (ScheduleOutcome, Occupancy) {
        let mut outcome = ScheduleOutcome::default();

        for req in requirements {
            for &kind in &req.needed {
                match find_slot(&occupancy, req) {
                    Some((slot, room)) => {
                        occupancy.occupy(slot, &req.groups, &req.teachers, room);
                        tracing::debug!(
                            curriculum = req.curriculum.get(),
                            %kind,
                            %slot,
                            room = room.get(),
                            "placed lesson"
                        );
                        outcome
                            .placed
                            .push(LessonOccurrence::new(slot, room, req.curriculum, kind));
                    }
                    None => {
                        outcome.unplaced.push(UnplacedLesson {
                            curriculum: req.curriculum,
                            kind,
                        });
                        outcome.diagnostics.push(
                            Diagnostic::for_entry(
                                DiagnosticKind::Unplaced,
                                req.curriculum,
                                format!(
                                    "could not place {kind} of curriculum entry {} \
                                     ({} eligible rooms)",
                                    req.curriculum,
                                    req.eligible_rooms.len()
                                ),
                            )
                            .emit(),
                        );
                    }
                }
            }
        }

        (outcome, occupancy)
    }
}

/// First (slot, room) where all of the requirement's groups, teachers, and
/// one eligible room are free.
pub fn find_slot(occupancy: &Occupancy, req: &Requirement) -> Option<(Slot, RoomId)> {
    Slot::cycle()
        .filter(|&slot| {
            occupancy.groups_free(slot, &req.groups) && occupancy.teachers_free(slot, &req.teachers)
        })
        .find_map(|slot| {
            req.eligible_rooms
                .iter()
                .find(|&&room| occupancy.room_free(slot, room))
                .map(|&room| (slot, room))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CurriculumEntry, Flow, Group, GroupId, Lesson, Room, Teacher, TeacherId,
    };
    use std::collections::HashSet;
    use tracing_test::traced_test;

    fn base() -> TimetableSnapshot {
        TimetableSnapshot::new()
            .with_group(Group::new(1, 25))
            .with_group(Group::new(2, 30))
            .with_room(Room::new(1, 40))
            .with_room(Room::new(2, 80))
            .with_teacher(Teacher::new(1))
            .with_teacher(Teacher::new(2))
    }

    fn req(groups: &[u32], teachers: &[u32], rooms: &[u32], needed: Vec<LessonKind>) -> Requirement {
        Requirement {
            curriculum: CurriculumId(1),
            needed,
            groups: groups.iter().map(|&g| GroupId(g)).collect(),
            teachers: teachers.iter().map(|&t| TeacherId(t)).collect(),
            required_capacity: 0,
            eligible_rooms: rooms.iter().map(|&r| RoomId(r)).collect(),
        }
    }

    #[test]
    fn test_first_fit_single_entry() {
        let s = base().with_entry(CurriculumEntry::for_group(1, 1, 144, 1, 1));
        let out = GreedyScheduler::new().schedule(&s);

        assert!(out.is_complete());
        let slots: Vec<_> = out.placed.iter().map(|o| (o.slot, o.room, o.kind)).collect();
        assert_eq!(
            slots,
            vec![
                (Slot::new(1, 1, 1), RoomId(1), LessonKind::Lecture),
                (Slot::new(1, 1, 2), RoomId(1), LessonKind::Lab),
                (Slot::new(1, 1, 3), RoomId(1), LessonKind::Lab),
            ]
        );
    }

    #[test]
    fn test_respects_existing_lessons() {
        let s = base()
            .with_entry(CurriculumEntry::for_group(1, 1, 72, 1, 1))
            .with_entry(CurriculumEntry::for_group(2, 1, 72, 2, 2))
            .with_lesson(Lesson::at(1, Slot::new(1, 1, 1), 1, 2, LessonKind::Lecture));
        let out = GreedyScheduler::new().schedule(&s);

        // Entry 2 is satisfied; entry 1 can share (1,1,1) only in another room.
        assert_eq!(out.placed.len(), 1);
        assert_eq!(out.placed[0].curriculum, CurriculumId(1));
        assert_eq!(out.placed[0].slot, Slot::new(1, 1, 1));
        assert_eq!(out.placed[0].room, RoomId(2));
    }

    #[test]
    fn test_secondary_teacher_blocks_slot() {
        let s = base()
            .with_entry(CurriculumEntry::for_group(1, 1, 72, 1, 1).with_secondary_teacher(2))
            .with_entry(CurriculumEntry::for_group(2, 1, 72, 2, 2))
            .with_lesson(Lesson::at(1, Slot::new(1, 1, 1), 2, 2, LessonKind::Lecture))
            .with_lesson(Lesson::at(2, Slot::new(1, 1, 2), 2, 2, LessonKind::Lecture));
        let out = GreedyScheduler::new().schedule(&s);
        assert_eq!(out.placed.len(), 1);
        assert_eq!(out.placed[0].slot, Slot::new(1, 1, 3));
    }

    #[test]
    fn test_capacity_never_violated() {
        // 55 students, only a 40-seat room.
        let s = TimetableSnapshot::new()
            .with_group(Group::new(1, 25))
            .with_group(Group::new(2, 30))
            .with_flow(Flow::new(1).with_groups([1, 2]))
            .with_room(Room::new(1, 40))
            .with_teacher(Teacher::new(1))
            .with_entry(CurriculumEntry::for_flow(1, 1, 108, 1, 1));
        let out = GreedyScheduler::new().schedule(&s);

        assert!(out.placed.is_empty());
        assert_eq!(
            out.unplaced,
            vec![
                UnplacedLesson { curriculum: CurriculumId(1), kind: LessonKind::Lecture },
                UnplacedLesson { curriculum: CurriculumId(1), kind: LessonKind::Lab },
            ]
        );
        assert!(out.diagnostics.iter().all(|d| d.kind == DiagnosticKind::Unplaced));
    }

    #[test]
    fn test_invalid_hours_not_unplaced() {
        let s = base().with_entry(CurriculumEntry::for_group(1, 1, 200, 1, 1));
        let out = GreedyScheduler::new().schedule(&s);
        assert!(out.placed.is_empty());
        assert!(out.unplaced.is_empty());
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::InvalidHours);
    }

    #[test]
    #[traced_test]
    fn test_diagnostics_are_logged() {
        let s = base()
            .with_entry(CurriculumEntry::for_group(1, 1, 200, 1, 1))
            .with_entry(CurriculumEntry::for_group(2, 1, 72, 9, 2));
        let out = GreedyScheduler::new().schedule(&s);

        assert_eq!(out.diagnostics.len(), 2);
        assert!(logs_contain("curriculum entry 1 has 200 hours"));
        assert!(logs_contain("references unknown teacher(s) [9]"));
        assert!(logs_contain("scheduling run finished"));
    }

    #[test]
    fn test_grid_exhaustion() {
        // One teacher, 97 single lectures: the 97th cannot fit anywhere.
        let mut s = base();
        for i in 0..97u32 {
            s = s
                .with_group(Group::new(100 + i, 10))
                .with_entry(CurriculumEntry::for_group(i + 1, 1, 72, 1, 100 + i));
        }
        let out = GreedyScheduler::new().schedule(&s);
        assert_eq!(out.placed.len(), 96);
        assert_eq!(out.unplaced.len(), 1);

        let slots: HashSet<Slot> = out.placed.iter().map(|o| o.slot).collect();
        assert_eq!(slots.len(), 96);
    }

    #[test]
    fn test_flow_blocks_member_groups() {
        let s = base()
            .with_flow(Flow::new(1).with_groups([1, 2]))
            .with_entry(CurriculumEntry::for_flow(1, 1, 72, 1, 1))
            .with_entry(CurriculumEntry::for_group(2, 2, 72, 2, 2));
        let out = GreedyScheduler::new().schedule(&s);

        // The flow (55 seats) goes first, then group 2 must avoid its slot.
        assert_eq!(out.placed[0].curriculum, CurriculumId(1));
        assert_eq!(out.placed[0].room, RoomId(2));
        assert_eq!(out.placed[1].curriculum, CurriculumId(2));
        assert_eq!(out.placed[1].slot, Slot::new(1, 1, 2));
    }

    #[test]
    fn test_tightest_fit() {
        let s = TimetableSnapshot::new()
            .with_group(Group::new(1, 20))
            .with_room(Room::new(1, 200))
            .with_room(Room::new(2, 25))
            .with_teacher(Teacher::new(1))
            .with_entry(CurriculumEntry::for_group(1, 1, 72, 1, 1));

        let listed = GreedyScheduler::new().schedule(&s);
        assert_eq!(listed.placed[0].room, RoomId(1));

        let tight = GreedyScheduler::new()
            .with_room_order(RoomOrder::TightestFit)
            .schedule(&s);
        assert_eq!(tight.placed[0].room, RoomId(2));
    }

    #[test]
    fn test_config_defaults_and_json() {
        let config: SchedulerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SchedulerConfig::default());
        assert!(!config.dry_run);

        let config: SchedulerConfig =
            serde_json::from_str(r#"{"room_order":"tightest_fit","dry_run":true}"#).unwrap();
        assert!(config.dry_run);
        assert_eq!(
            GreedyScheduler::from_config(&config).room_order(),
            RoomOrder::TightestFit
        );
    }

    #[test]
    fn test_place_threads_occupancy() {
        let reqs = vec![req(&[1], &[1], &[1], vec![LessonKind::Lecture])];
        let (first, occ) = GreedyScheduler::new().place(&reqs, Occupancy::new());
        let (second, _) = GreedyScheduler::new().place(&reqs, occ);
        assert_eq!(first.placed[0].slot, Slot::new(1, 1, 1));
        assert_eq!(second.placed[0].slot, Slot::new(1, 1, 2));
    }

    #[test]
    fn test_find_slot_skips_full_rooms() {
        let mut occ = Occupancy::new();
        occ.occupy(Slot::new(1, 1, 1), &[], &[], RoomId(1));
        let r = req(&[1], &[1], &[1], vec![LessonKind::Lab]);
        assert_eq!(find_slot(&occ, &r), Some((Slot::new(1, 1, 2), RoomId(1))));

        let no_rooms = req(&[1], &[1], &[], vec![LessonKind::Lab]);
        assert_eq!(find_slot(&occ, &no_rooms), None);
    }

    #[test]
    fn test_deterministic() {
        let s = base()
            .with_flow(Flow::new(1).with_groups([1, 2]))
            .with_entry(CurriculumEntry::for_flow(1, 1, 144, 1, 1))
            .with_entry(CurriculumEntry::for_group(2, 2, 108, 2, 1))
            .with_entry(CurriculumEntry::for_group(3, 3, 72, 1, 2));
        let a = GreedyScheduler::new().schedule(&s);
        let b = GreedyScheduler::new().schedule(&s);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_input() {
        let out = GreedyScheduler::new().schedule(&TimetableSnapshot::new());
        assert_eq!(out, ScheduleOutcome::default());
    }
}
