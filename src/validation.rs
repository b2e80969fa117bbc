//! Input validation for timetabling data.
//!
//! Checks structural integrity of a snapshot before scheduling or
//! analysis. Detects:
//! - Duplicate IDs
//! - Dangling references (subject, teacher, group, flow, room, curriculum)
//! - Curriculum entries with unrecognized hours
//! - Duplicate (subject, audience) curriculum entries
//! - Empty flows, empty groups, zero-capacity rooms
//! - Lessons placed outside the grid
//!
//! Validation is advisory. The scheduler and analyzer accept invalid data
//! and report what they had to skip as diagnostics.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use crate::models::{
    Audience, CurriculumEntry, LessonOccurrence, RequirementTemplate, SnapshotIndex,
    TimetableSnapshot,
};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of one kind share the same ID.
    DuplicateId,
    /// A reference points at an entity that doesn't exist.
    InvalidReference,
    /// Curriculum hours have no lesson template.
    InvalidHours,
    /// Two curriculum entries teach the same subject to the same audience.
    DuplicateRequirement,
    /// A flow lists no groups.
    EmptyFlow,
    /// A group has no students or a room has no seats.
    ZeroCapacity,
    /// A lesson lies outside the two-week grid.
    SlotOutOfRange,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_duplicates<T, K>(
    items: &[T],
    key: impl Fn(&T) -> K,
    label: &str,
    errors: &mut Vec<ValidationError>,
) where
    K: Hash + Eq + Copy + Display,
{
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        let id = key(item);
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {label} ID: {id}"),
            ));
        }
    }
}

/// Validates a whole snapshot.
///
/// Checks:
/// 1. No duplicate IDs within any entity kind
/// 2. Groups have students, rooms have seats
/// 3. Flows list at least one group, and only existing ones
/// 4. Curriculum hours are 72, 108 or 144
/// 5. Curriculum subject, teacher, group and flow references exist
/// 6. No two entries share (subject, audience)
/// 7. Lessons lie within the grid and reference existing rooms and entries
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(snapshot: &TimetableSnapshot) -> ValidationResult {
    let mut errors = Vec::new();
    let index = snapshot.index();

    check_duplicates(&snapshot.groups, |g| g.id, "group", &mut errors);
    check_duplicates(&snapshot.flows, |f| f.id, "flow", &mut errors);
    check_duplicates(&snapshot.rooms, |r| r.id, "room", &mut errors);
    check_duplicates(&snapshot.teachers, |t| t.id, "teacher", &mut errors);
    check_duplicates(&snapshot.subjects, |s| s.id, "subject", &mut errors);
    check_duplicates(&snapshot.curriculum, |c| c.id, "curriculum entry", &mut errors);
    check_duplicates(&snapshot.lessons, |l| l.id, "lesson", &mut errors);

    for group in &snapshot.groups {
        if group.student_count == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroCapacity,
                format!("Group {} has no students", group.id),
            ));
        }
    }
    for room in &snapshot.rooms {
        if room.capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroCapacity,
                format!("Room {} has no seats", room.id),
            ));
        }
    }

    for flow in &snapshot.flows {
        if flow.groups.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyFlow,
                format!("Flow {} has no groups", flow.id),
            ));
        }
        for &group in &flow.groups {
            if index.group(group).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidReference,
                    format!("Flow {} references unknown group {group}", flow.id),
                ));
            }
        }
    }

    let mut pairs = HashSet::new();
    for entry in &snapshot.curriculum {
        validate_entry(&index, entry, &mut errors);
        if !pairs.insert((entry.subject, entry.audience)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateRequirement,
                format!(
                    "Curriculum entry {} repeats subject {} for {}",
                    entry.id, entry.subject, entry.audience
                ),
            ));
        }
    }

    for lesson in &snapshot.lessons {
        if let Err(mut lesson_errors) = check_occurrence(&index, &lesson.occurrence) {
            for e in &mut lesson_errors {
                e.message = format!("Lesson {}: {}", lesson.id, e.message);
            }
            errors.append(&mut lesson_errors);
        }
    }

    finish(errors)
}

fn validate_entry(
    index: &SnapshotIndex<'_>,
    entry: &CurriculumEntry,
    errors: &mut Vec<ValidationError>,
) {
    if RequirementTemplate::for_hours(entry.hours).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidHours,
            format!(
                "Curriculum entry {} has {} hours; expected one of {:?}",
                entry.id,
                entry.hours,
                RequirementTemplate::RECOGNIZED_HOURS
            ),
        ));
    }

    if index.subject(entry.subject).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidReference,
            format!(
                "Curriculum entry {} references unknown subject {}",
                entry.id, entry.subject
            ),
        ));
    }

    for teacher in index.unknown_teachers(entry) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidReference,
            format!(
                "Curriculum entry {} references unknown teacher {teacher}",
                entry.id
            ),
        ));
    }

    let audience_known = match entry.audience {
        Audience::Group(id) => index.group(id).is_some(),
        Audience::Flow(id) => index.flow(id).is_some(),
    };
    if !audience_known {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidReference,
            format!(
                "Curriculum entry {} references unknown {}",
                entry.id, entry.audience
            ),
        ));
    }
}

fn check_occurrence(index: &SnapshotIndex<'_>, occurrence: &LessonOccurrence) -> ValidationResult {
    let mut errors = Vec::new();

    if !occurrence.slot.is_valid() {
        errors.push(ValidationError::new(
            ValidationErrorKind::SlotOutOfRange,
            format!("slot {} is outside the grid", occurrence.slot),
        ));
    }
    if index.room(occurrence.room).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidReference,
            format!("unknown room {}", occurrence.room),
        ));
    }
    if index.entry(occurrence.curriculum).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidReference,
            format!("unknown curriculum entry {}", occurrence.curriculum),
        ));
    }

    finish(errors)
}

/// Validates a single placement against a snapshot.
///
/// Checks that the slot is on the grid and that the room and curriculum
/// entry exist. Resource availability is not checked; a manual placement
/// may collide, and the analyzer reports it.
pub fn validate_placement(
    snapshot: &TimetableSnapshot,
    occurrence: &LessonOccurrence,
) -> ValidationResult {
    check_occurrence(&snapshot.index(), occurrence)
}
