//! Non-fatal run diagnostics.
//!
//! Data problems met while scheduling or analyzing never abort a run. Each
//! is recorded as a [`Diagnostic`] and the offending entry is skipped.

use serde::{Deserialize, Serialize};

use super::{CurriculumId, LessonId};

/// A non-fatal problem found during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Problem category.
    pub kind: DiagnosticKind,
    /// Curriculum entry concerned, if any.
    pub curriculum: Option<CurriculumId>,
    /// Stored lesson concerned, if any.
    pub lesson: Option<LessonId>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Hours value has no lesson template.
    InvalidHours,
    /// The group or flow resolves to no existing group.
    EmptyAudience,
    /// A teacher reference points at no known teacher.
    UnknownTeacher,
    /// A stored lesson references an unknown curriculum entry.
    UnknownCurriculum,
    /// A stored lesson lies outside the grid.
    SlotOutOfRange,
    /// No slot and room could be found for a required lesson.
    Unplaced,
}

impl Diagnostic {
    /// Creates a diagnostic about a curriculum entry.
    pub fn for_entry(
        kind: DiagnosticKind,
        curriculum: CurriculumId,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            curriculum: Some(curriculum),
            lesson: None,
            message: message.into(),
        }
    }

    /// Creates a diagnostic about a stored lesson.
    pub fn for_lesson(kind: DiagnosticKind, lesson: LessonId, message: impl Into<String>) -> Self {
        Self {
            kind,
            curriculum: None,
            lesson: Some(lesson),
            message: message.into(),
        }
    }

    /// Logs the diagnostic at warn level.
    pub(crate) fn emit(self) -> Self {
        tracing::warn!(
            kind = ?self.kind,
            curriculum = ?self.curriculum.map(CurriculumId::get),
            lesson = ?self.lesson.map(LessonId::get),
            "{}",
            self.message
        );
        self
    }
}
