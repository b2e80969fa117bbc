//! Requirement expansion.
//!
//! Turns curriculum entries into the lessons each one still needs in the
//! current cycle, together with everything the placer has to check: the
//! resolved groups, the teachers, and the rooms big enough to seat them.
//!
//! # Algorithm
//!
//! 1. Count stored lessons per (entry, kind) in weeks 1 and 2.
//! 2. For each entry, look up its template; skip unknown hour values.
//! 3. For each distinct kind in template order, append the shortfall
//!    (required − placed, never negative) that many times.
//! 4. Resolve groups and teachers; skip entries with dangling references.
//! 5. Sort by required capacity, then group count, both descending.
//!
//! # Complexity
//! O(L + E·(k + R)) where L=lessons, E=entries, k=template size, R=rooms.

use serde::Serialize;
use std::collections::HashMap;

use super::RoomOrder;
use crate::models::{
    CurriculumEntry, CurriculumId, Diagnostic, DiagnosticKind, GroupId, LessonKind,
    RequirementTemplate, Room, RoomId, SnapshotIndex, TeacherId,
};

/// Lessons one curriculum entry still needs, with its constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    /// Curriculum entry.
    pub curriculum: CurriculumId,
    /// Lesson kinds still to place this cycle, in template order.
    pub needed: Vec<LessonKind>,
    /// Groups that must all be free.
    pub groups: Vec<GroupId>,
    /// Teachers that must all be free.
    pub teachers: Vec<TeacherId>,
    /// Seats needed.
    pub required_capacity: u32,
    /// Rooms seating `required_capacity`, in the order they are tried.
    pub eligible_rooms: Vec<RoomId>,
}

impl Requirement {
    /// Whether the entry's template is already satisfied.
    pub fn is_satisfied(&self) -> bool {
        self.needed.is_empty()
    }
}

/// Result of expanding a snapshot.
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    /// Requirements in placement order.
    pub requirements: Vec<Requirement>,
    /// Entries skipped for data problems.
    pub diagnostics: Vec<Diagnostic>,
}

impl Expansion {
    /// Finds the requirement of an entry.
    pub fn requirement_for(&self, curriculum: CurriculumId) -> Option<&Requirement> {
        self.requirements.iter().find(|r| r.curriculum == curriculum)
    }

    /// Total lessons still needed across all entries.
    pub fn needed_count(&self) -> usize {
        self.requirements.iter().map(|r| r.needed.len()).sum()
    }
}

/// Builds [`Requirement`]s from a snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequirementExpander {
    room_order: RoomOrder,
}

impl RequirementExpander {
    /// Creates an expander listing rooms in snapshot order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the order eligible rooms are listed in.
    pub fn with_room_order(mut self, room_order: RoomOrder) -> Self {
        self.room_order = room_order;
        self
    }

    /// Expands every curriculum entry of the indexed snapshot.
    pub fn expand(&self, index: &SnapshotIndex<'_>) -> Expansion {
        let placed = placed_counts(index);
        let mut expansion = Expansion::default();

        for entry in &index.snapshot().curriculum {
            match self.expand_entry(index, entry, &placed) {
                Ok(requirement) => expansion.requirements.push(requirement),
                Err(diagnostic) => expansion.diagnostics.push(diagnostic.emit()),
            }
        }

        sort_by_difficulty(&mut expansion.requirements);
        expansion
    }

    fn expand_entry(
        &self,
        index: &SnapshotIndex<'_>,
        entry: &CurriculumEntry,
        placed: &HashMap<(CurriculumId, LessonKind), usize>,
    ) -> Result<Requirement, Diagnostic> {
        let template = entry.template().ok_or_else(|| {
            Diagnostic::for_entry(
                DiagnosticKind::InvalidHours,
                entry.id,
                format!(
                    "curriculum entry {} has {} hours; expected one of {:?}",
                    entry.id,
                    entry.hours,
                    RequirementTemplate::RECOGNIZED_HOURS
                ),
            )
        })?;

        let groups = index.resolve_groups(entry.audience);
        if groups.is_empty() {
            return Err(Diagnostic::for_entry(
                DiagnosticKind::EmptyAudience,
                entry.id,
                format!(
                    "curriculum entry {} has no existing groups for {}",
                    entry.id, entry.audience
                ),
            ));
        }

        let unknown = index.unknown_teachers(entry);
        if !unknown.is_empty() {
            return Err(Diagnostic::for_entry(
                DiagnosticKind::UnknownTeacher,
                entry.id,
                format!(
                    "curriculum entry {} references unknown teacher(s) {:?}",
                    entry.id,
                    unknown.iter().map(|t| t.get()).collect::<Vec<_>>()
                ),
            ));
        }

        let mut needed = Vec::with_capacity(template.len());
        for (kind, required) in template.counts() {
            let have = placed.get(&(entry.id, kind)).copied().unwrap_or(0);
            needed.extend(std::iter::repeat(kind).take(required.saturating_sub(have)));
        }

        let required_capacity = index.required_capacity(&groups);
        let eligible_rooms = self.order_rooms(index.rooms_fitting(required_capacity));

        Ok(Requirement {
            curriculum: entry.id,
            needed,
            groups,
            teachers: entry.teachers(),
            required_capacity,
            eligible_rooms,
        })
    }

    fn order_rooms(&self, mut rooms: Vec<&Room>) -> Vec<RoomId> {
        if self.room_order == RoomOrder::TightestFit {
            rooms.sort_by_key(|r| r.capacity);
        }
        rooms.into_iter().map(|r| r.id).collect()
    }
}

/// Expands requirements with default settings.
pub fn expand_requirements(index: &SnapshotIndex<'_>) -> Expansion {
    RequirementExpander::new().expand(index)
}

/// Stable sort: capacity descending, then group count descending.
pub fn sort_by_difficulty(requirements: &mut [Requirement]) {
    requirements.sort_by(|a, b| {
        b.required_capacity
            .cmp(&a.required_capacity)
            .then_with(|| b.groups.len().cmp(&a.groups.len()))
    });
}

fn placed_counts(index: &SnapshotIndex<'_>) -> HashMap<(CurriculumId, LessonKind), usize> {
    let mut counts = HashMap::new();
    for lesson in index.snapshot().lessons_in_cycle() {
        *counts.entry((lesson.curriculum(), lesson.kind())).or_insert(0) += 1;
    }
    counts
}
