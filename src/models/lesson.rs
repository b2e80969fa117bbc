//! Placed lesson model.
//!
//! A [`LessonOccurrence`] is one lesson of a curriculum entry fixed to a slot
//! and a room. The scheduler produces bare occurrences; once a store commits
//! them they become [`Lesson`]s with an id.

use serde::{Deserialize, Serialize};

use super::{CurriculumId, LessonId, LessonKind, RoomId, Slot};

/// A lesson placed at a slot and room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LessonOccurrence {
    /// Grid coordinate.
    #[serde(flatten)]
    pub slot: Slot,
    /// Room the lesson is held in.
    pub room: RoomId,
    /// Curriculum entry the lesson belongs to.
    pub curriculum: CurriculumId,
    /// Lecture or lab.
    pub kind: LessonKind,
}

/// A stored lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Store-assigned identifier.
    pub id: LessonId,
    /// Placement.
    #[serde(flatten)]
    pub occurrence: LessonOccurrence,
}

impl LessonOccurrence {
    /// Creates an occurrence.
    pub fn new(
        slot: Slot,
        room: impl Into<RoomId>,
        curriculum: impl Into<CurriculumId>,
        kind: LessonKind,
    ) -> Self {
        Self {
            slot,
            room: room.into(),
            curriculum: curriculum.into(),
            kind,
        }
    }
}

impl Lesson {
    /// Creates a stored lesson.
    pub fn new(id: impl Into<LessonId>, occurrence: LessonOccurrence) -> Self {
        Self {
            id: id.into(),
            occurrence,
        }
    }

    /// Shorthand for building fixtures: lesson `id` of `curriculum` at a slot.
    pub fn at(
        id: impl Into<LessonId>,
        slot: Slot,
        room: impl Into<RoomId>,
        curriculum: impl Into<CurriculumId>,
        kind: LessonKind,
    ) -> Self {
        Self::new(id, LessonOccurrence::new(slot, room, curriculum, kind))
    }

    /// Grid coordinate.
    #[inline]
    pub fn slot(&self) -> Slot {
        self.occurrence.slot
    }

    /// Room.
    #[inline]
    pub fn room(&self) -> RoomId {
        self.occurrence.room
    }

    /// Curriculum entry.
    #[inline]
    pub fn curriculum(&self) -> CurriculumId {
        self.occurrence.curriculum
    }

    /// Lesson kind.
    #[inline]
    pub fn kind(&self) -> LessonKind {
        self.occurrence.kind
    }
}
