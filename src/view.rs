//! Printable timetable projection.
//!
//! Turns stored lessons into the week → day → period → group table that
//! timetable printouts and UIs show. Flow lessons appear under every
//! member group.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{
    CurriculumEntry, Lesson, LessonId, LessonKind, Slot, SnapshotIndex, TimetableSnapshot,
};

/// One lesson as shown in a group's column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewCell {
    /// Stored lesson id.
    pub lesson: LessonId,
    /// Lecture or lab.
    pub kind: LessonKind,
    /// Subject name.
    pub subject: String,
    /// Teacher names, primary first, joined by ", ".
    pub teachers: String,
    /// Room name.
    pub room: String,
}

/// A flattened view entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewRow<'a> {
    /// Grid coordinate.
    #[serde(flatten)]
    pub slot: Slot,
    /// Group name.
    pub group: &'a str,
    /// Lesson shown.
    #[serde(flatten)]
    pub cell: &'a ViewCell,
}

/// Timetable keyed by slot, then group name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimetableView {
    slots: BTreeMap<Slot, BTreeMap<String, ViewCell>>,
}

impl TimetableView {
    /// Builds the view of every displayable lesson.
    ///
    /// Lessons outside the grid, or whose curriculum entry, subject, room,
    /// or primary teacher is unknown, are left out. A group with no name is
    /// shown by its id.
    pub fn build(snapshot: &TimetableSnapshot) -> Self {
        let index = snapshot.index();
        let mut view = Self::default();

        for lesson in &snapshot.lessons {
            let slot = lesson.slot();
            if !slot.is_valid() {
                continue;
            }
            let Some((entry, cell)) = cell_for(&index, lesson) else {
                tracing::debug!(lesson = lesson.id.get(), "lesson left out of timetable view");
                continue;
            };
            for group_id in index.resolve_groups(entry.audience) {
                let Some(group) = index.group(group_id) else {
                    continue;
                };
                let name = if group.name.is_empty() {
                    group.id.to_string()
                } else {
                    group.name.clone()
                };
                view.slots
                    .entry(slot)
                    .or_default()
                    .insert(name, cell.clone());
            }
        }
        view
    }

    /// Cell of `group` at `slot`.
    pub fn cell(&self, slot: Slot, group: &str) -> Option<&ViewCell> {
        self.slots.get(&slot).and_then(|groups| groups.get(group))
    }

    /// All cells at `slot`, by group name.
    pub fn at(&self, slot: Slot) -> Option<&BTreeMap<String, ViewCell>> {
        self.slots.get(&slot)
    }

    /// Slots with at least one lesson, in grid order.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.slots.keys().copied()
    }

    /// Every (slot, group, cell) in grid order, then group name.
    pub fn rows(&self) -> Vec<ViewRow<'_>> {
        self.slots
            .iter()
            .flat_map(|(&slot, groups)| {
                groups.iter().map(move |(group, cell)| ViewRow {
                    slot,
                    group: group.as_str(),
                    cell,
                })
            })
            .collect()
    }

    /// Whether no lesson is shown.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

fn cell_for<'a>(
    index: &SnapshotIndex<'a>,
    lesson: &Lesson,
) -> Option<(&'a CurriculumEntry, ViewCell)> {
    let entry = index.entry(lesson.curriculum())?;
    let subject = index.subject(entry.subject)?;
    let room = index.room(lesson.room())?;
    let primary = index.teacher(entry.primary_teacher)?;

    let mut teachers = primary.full_name.clone();
    if let Some(secondary) = entry.secondary_teacher.and_then(|id| index.teacher(id)) {
        teachers.push_str(", ");
        teachers.push_str(&secondary.full_name);
    }

    let cell = ViewCell {
        lesson: lesson.id,
        kind: lesson.kind(),
        subject: subject.name.clone(),
        teachers,
        room: room.name.clone(),
    };
    Some((entry, cell))
}
