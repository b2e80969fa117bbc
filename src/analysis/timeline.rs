//! Per-resource day timelines.
//!
//! Stored lessons are bucketed by (resource, week, day) on each axis. Each
//! bucket holds the (period, lesson) pairs of that day sorted by period,
//! then lesson id.

use std::collections::BTreeMap;

use crate::models::{
    Diagnostic, DiagnosticKind, GroupId, LessonId, RoomId, Slot, SnapshotIndex, TeacherId,
};

/// One resource's lessons on one day, sorted by period.
pub type DayTimeline = Vec<(u8, LessonId)>;

/// Day timelines of every resource on one axis.
#[derive(Debug, Clone)]
pub struct Timelines<K: Ord> {
    days: BTreeMap<(K, u8, u8), DayTimeline>,
}

impl<K: Ord + Copy> Default for Timelines<K> {
    fn default() -> Self {
        Self {
            days: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> Timelines<K> {
    /// Creates an empty axis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `resource` attends `lesson` at `slot`.
    pub fn push(&mut self, resource: K, slot: Slot, lesson: LessonId) {
        self.days
            .entry((resource, slot.week, slot.day))
            .or_default()
            .push((slot.period, lesson));
    }

    /// Sorts every day by period, then lesson id.
    pub fn sort(&mut self) {
        for day in self.days.values_mut() {
            day.sort_unstable();
        }
    }

    /// Iterates (resource, week, day, timeline) in key order.
    pub fn days(&self) -> impl Iterator<Item = (K, u8, u8, &[(u8, LessonId)])> {
        self.days
            .iter()
            .map(|(&(resource, week, day), lessons)| (resource, week, day, lessons.as_slice()))
    }

    /// Timeline of one resource on one day.
    pub fn day(&self, resource: K, week: u8, day: u8) -> Option<&[(u8, LessonId)]> {
        self.days.get(&(resource, week, day)).map(Vec::as_slice)
    }

    /// Number of non-empty (resource, week, day) buckets.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether no lesson was recorded.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Timelines on all three axes.
#[derive(Debug, Clone, Default)]
pub struct ResourceTimelines {
    /// Group axis.
    pub groups: Timelines<GroupId>,
    /// Teacher axis.
    pub teachers: Timelines<TeacherId>,
    /// Room axis.
    pub rooms: Timelines<RoomId>,
}

impl ResourceTimelines {
    /// Builds timelines from every stored lesson of the snapshot.
    ///
    /// Lessons whose curriculum entry is unknown only appear on the room
    /// axis. Lessons outside the grid are still analyzed but reported.
    pub fn build(index: &SnapshotIndex<'_>) -> (Self, Vec<Diagnostic>) {
        let mut timelines = Self::default();
        let mut diagnostics = Vec::new();

        for lesson in &index.snapshot().lessons {
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
            }

            timelines.rooms.push(lesson.room(), slot, lesson.id);

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
                timelines.groups.push(group, slot, lesson.id);
            }
            for teacher in entry.teachers() {
                timelines.teachers.push(teacher, slot, lesson.id);
            }
        }

        timelines.groups.sort();
        timelines.teachers.sort();
        timelines.rooms.sort();
        (timelines, diagnostics)
    }
}
