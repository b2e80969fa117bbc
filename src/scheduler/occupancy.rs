//! Per-run occupancy of groups, teachers, and rooms.
//!
//! Occupancy is rebuilt from the stored lessons at the start of every run
//! and threaded through the placement loop by value. Nothing here outlives
//! a single call.

use std::collections::HashMap;

use crate::models::{
    Diagnostic, DiagnosticKind, GroupId, RoomId, Slot, SlotMask, SnapshotIndex, TeacherId,
};

/// Busy slots per resource on the three axes.
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    groups: HashMap<GroupId, SlotMask>,
    teachers: HashMap<TeacherId, SlotMask>,
    rooms: HashMap<RoomId, SlotMask>,
}

impl Occupancy {
    /// Creates an empty occupancy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds occupancy from the snapshot's lessons in weeks 1 and 2.
    ///
    /// A lesson whose curriculum entry is unknown still blocks its room.
    /// Lessons with an in-cycle week but an out-of-range day or period
    /// cannot block anything and are reported.
    pub fn seed(index: &SnapshotIndex<'_>) -> (Self, Vec<Diagnostic>) {
        let mut occupancy = Self::new();
        let mut diagnostics = Vec::new();

        for lesson in index.snapshot().lessons_in_cycle() {
            let slot = lesson.slot();
            if !slot.is_valid() {
                diagnostics.push(
                    Diagnostic::for_lesson(
                        DiagnosticKind::SlotOutOfRange,
                        lesson.id,
                        format!("lesson {} is placed outside the grid at {slot}", lesson.id),
                    )
                    .emit(),
                );
                continue;
            }

            occupancy.rooms.entry(lesson.room()).or_default().insert(slot);

            let Some(entry) = index.entry(lesson.curriculum()) else {
                diagnostics.push(
                    Diagnostic::for_lesson(
                        DiagnosticKind::UnknownCurriculum,
                        lesson.id,
                        format!(
                            "lesson {} references unknown curriculum entry {}",
                            lesson.id,
                            lesson.curriculum()
                        ),
                    )
                    .emit(),
                );
                continue;
            };

            for group in index.resolve_groups(entry.audience) {
                occupancy.groups.entry(group).or_default().insert(slot);
            }
            for teacher in entry.teachers() {
                occupancy.teachers.entry(teacher).or_default().insert(slot);
            }
        }

        (occupancy, diagnostics)
    }

    /// Whether every group is free at `slot`.
    pub fn groups_free(&self, slot: Slot, groups: &[GroupId]) -> bool {
        groups.iter().all(|g| !busy(&self.groups, g, slot))
    }

    /// Whether every teacher is free at `slot`.
    pub fn teachers_free(&self, slot: Slot, teachers: &[TeacherId]) -> bool {
        teachers.iter().all(|t| !busy(&self.teachers, t, slot))
    }

    /// Whether the room is free at `slot`.
    pub fn room_free(&self, slot: Slot, room: RoomId) -> bool {
        !busy(&self.rooms, &room, slot)
    }

    /// Marks all listed resources busy at `slot`.
    pub fn occupy(&mut self, slot: Slot, groups: &[GroupId], teachers: &[TeacherId], room: RoomId) {
        for &g in groups {
            self.groups.entry(g).or_default().insert(slot);
        }
        for &t in teachers {
            self.teachers.entry(t).or_default().insert(slot);
        }
        self.rooms.entry(room).or_default().insert(slot);
    }

    /// Busy slots of a room.
    pub fn room_mask(&self, room: RoomId) -> SlotMask {
        self.rooms.get(&room).copied().unwrap_or_default()
    }

    /// Busy slots of a group.
    pub fn group_mask(&self, group: GroupId) -> SlotMask {
        self.groups.get(&group).copied().unwrap_or_default()
    }

    /// Busy slots of a teacher.
    pub fn teacher_mask(&self, teacher: TeacherId) -> SlotMask {
        self.teachers.get(&teacher).copied().unwrap_or_default()
    }
}

fn busy<K: std::hash::Hash + Eq>(axis: &HashMap<K, SlotMask>, key: &K, slot: Slot) -> bool {
    axis.get(key).is_some_and(|mask| mask.contains(slot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurriculumEntry, Flow, Group, Lesson, LessonKind, TimetableSnapshot};

    fn snapshot() -> TimetableSnapshot {
        TimetableSnapshot::new()
            .with_group(Group::new(1, 20))
            .with_group(Group::new(2, 20))
            .with_flow(Flow::new(1).with_groups([1, 2]))
            .with_entry(CurriculumEntry::for_flow(1, 1, 72, 10, 1).with_secondary_teacher(11))
            .with_lesson(Lesson::at(1, Slot::new(1, 1, 2), 5, 1, LessonKind::Lecture))
            .with_lesson(Lesson::at(2, Slot::new(2, 3, 4), 6, 99, LessonKind::Lab))
            .with_lesson(Lesson::at(3, Slot::new(1, 9, 1), 5, 1, LessonKind::Lecture))
            .with_lesson(Lesson::at(4, Slot::new(3, 1, 1), 7, 1, LessonKind::Lecture))
    }

    #[test]
    fn test_seed_marks_all_axes() {
        let s = snapshot();
        let (occ, _) = Occupancy::seed(&s.index());
        let slot = Slot::new(1, 1, 2);

        assert!(!occ.groups_free(slot, &[GroupId(1)]));
        assert!(!occ.groups_free(slot, &[GroupId(3), GroupId(2)]));
        assert!(!occ.teachers_free(slot, &[TeacherId(11)]));
        assert!(!occ.room_free(slot, RoomId(5)));

        assert!(occ.groups_free(Slot::new(1, 1, 3), &[GroupId(1), GroupId(2)]));
        assert!(occ.room_free(slot, RoomId(6)));
    }

    #[test]
    fn test_seed_diagnostics() {
        let s = snapshot();
        let (occ, diagnostics) = Occupancy::seed(&s.index());

        // Unknown curriculum still blocks the room.
        assert!(!occ.room_free(Slot::new(2, 3, 4), RoomId(6)));
        // Week 3 is outside the cycle and silently ignored.
        assert!(occ.room_mask(RoomId(7)).is_empty());

        let kinds: Vec<_> = diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(kinds.len(), 2);
        assert!(kinds.contains(&DiagnosticKind::UnknownCurriculum));
        assert!(kinds.contains(&DiagnosticKind::SlotOutOfRange));
    }

    #[test]
    fn test_occupy() {
        let mut occ = Occupancy::new();
        let slot = Slot::new(2, 6, 8);
        occ.occupy(slot, &[GroupId(1)], &[TeacherId(1), TeacherId(2)], RoomId(3));

        assert!(!occ.groups_free(slot, &[GroupId(1)]));
        assert!(!occ.teachers_free(slot, &[TeacherId(2)]));
        assert!(!occ.room_free(slot, RoomId(3)));
        assert_eq!(occ.group_mask(GroupId(1)).count(), 1);
        assert_eq!(occ.teacher_mask(TeacherId(1)).count(), 1);
        assert!(occ.groups_free(slot, &[]));
    }
}
