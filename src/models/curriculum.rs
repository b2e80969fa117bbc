//! Curriculum model.
//!
//! A curriculum entry is a teaching requirement before it is placed on the
//! grid: which subject, how many hours per semester, who teaches it, and who
//! attends. The hour count selects a [`RequirementTemplate`] that says how
//! many lectures and labs the entry needs in every two-week cycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CurriculumId, FlowId, GroupId, SubjectId, TeacherId};

/// Kind of a lesson occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonKind {
    /// Lecture.
    Lecture,
    /// Laboratory session.
    Lab,
}

impl fmt::Display for LessonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lecture => f.write_str("lecture"),
            Self::Lab => f.write_str("lab"),
        }
    }
}

/// Who attends the lessons of a curriculum entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    /// A single group.
    Group(GroupId),
    /// All groups of a flow.
    Flow(FlowId),
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group(id) => write!(f, "group {id}"),
            Self::Flow(id) => write!(f, "flow {id}"),
        }
    }
}

/// A teaching requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumEntry {
    /// Unique entry identifier.
    pub id: CurriculumId,
    /// Subject taught.
    pub subject: SubjectId,
    /// Semester hours. Only 72, 108 and 144 are recognized.
    pub hours: u32,
    /// Teacher who always attends.
    pub primary_teacher: TeacherId,
    /// Optional second teacher, busy for the same slots.
    #[serde(default)]
    pub secondary_teacher: Option<TeacherId>,
    /// Attending group or flow.
    pub audience: Audience,
}

impl CurriculumEntry {
    /// Creates an entry for a single group.
    pub fn for_group(
        id: impl Into<CurriculumId>,
        subject: impl Into<SubjectId>,
        hours: u32,
        primary_teacher: impl Into<TeacherId>,
        group: impl Into<GroupId>,
    ) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            hours,
            primary_teacher: primary_teacher.into(),
            secondary_teacher: None,
            audience: Audience::Group(group.into()),
        }
    }

    /// Creates an entry for a flow.
    pub fn for_flow(
        id: impl Into<CurriculumId>,
        subject: impl Into<SubjectId>,
        hours: u32,
        primary_teacher: impl Into<TeacherId>,
        flow: impl Into<FlowId>,
    ) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            hours,
            primary_teacher: primary_teacher.into(),
            secondary_teacher: None,
            audience: Audience::Flow(flow.into()),
        }
    }

    /// Sets the secondary teacher.
    pub fn with_secondary_teacher(mut self, teacher: impl Into<TeacherId>) -> Self {
        self.secondary_teacher = Some(teacher.into());
        self
    }

    /// Primary teacher followed by the secondary one, if any.
    ///
    /// A secondary teacher equal to the primary one is listed once.
    pub fn teachers(&self) -> Vec<TeacherId> {
        let primary = self.primary_teacher;
        std::iter::once(primary)
            .chain(self.secondary_teacher.filter(|&t| t != primary))
            .collect()
    }

    /// The lesson template for this entry's hours, if recognized.
    pub fn template(&self) -> Option<RequirementTemplate> {
        RequirementTemplate::for_hours(self.hours)
    }
}

/// Lessons an entry needs in every two-week cycle.
///
/// | Hours | Lessons per cycle |
/// |-------|-------------------|
/// | 72    | lecture |
/// | 108   | lecture, lab |
/// | 144   | lecture, lab, lab |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequirementTemplate {
    kinds: &'static [LessonKind],
}

const TEMPLATE_72: &[LessonKind] = &[LessonKind::Lecture];
const TEMPLATE_108: &[LessonKind] = &[LessonKind::Lecture, LessonKind::Lab];
const TEMPLATE_144: &[LessonKind] = &[LessonKind::Lecture, LessonKind::Lab, LessonKind::Lab];

impl RequirementTemplate {
    /// Hour values that map to a template.
    pub const RECOGNIZED_HOURS: [u32; 3] = [72, 108, 144];

    /// Looks up the template for an hour count.
    pub fn for_hours(hours: u32) -> Option<Self> {
        let kinds = match hours {
            72 => TEMPLATE_72,
            108 => TEMPLATE_108,
            144 => TEMPLATE_144,
            _ => return None,
        };
        Some(Self { kinds })
    }

    /// The ordered multiset of lesson kinds.
    pub fn kinds(&self) -> &'static [LessonKind] {
        self.kinds
    }

    /// Distinct kinds in template order with their required counts.
    pub fn counts(&self) -> Vec<(LessonKind, usize)> {
        let mut counts: Vec<(LessonKind, usize)> = Vec::new();
        for &kind in self.kinds {
            match counts.iter_mut().find(|(k, _)| *k == kind) {
                Some((_, n)) => *n += 1,
                None => counts.push((kind, 1)),
            }
        }
        counts
    }

    /// Total lessons per cycle.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Always false for recognized templates.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates() {
        let t72 = RequirementTemplate::for_hours(72).unwrap();
        assert_eq!(t72.kinds(), &[LessonKind::Lecture]);

        let t108 = RequirementTemplate::for_hours(108).unwrap();
        assert_eq!(t108.kinds(), &[LessonKind::Lecture, LessonKind::Lab]);

        let t144 = RequirementTemplate::for_hours(144).unwrap();
        assert_eq!(t144.len(), 3);
        assert_eq!(
            t144.counts(),
            vec![(LessonKind::Lecture, 1), (LessonKind::Lab, 2)]
        );

        assert!(RequirementTemplate::for_hours(200).is_none());
        assert!(RequirementTemplate::for_hours(0).is_none());
    }

    #[test]
    fn test_entry_teachers() {
        let e = CurriculumEntry::for_group(1, 1, 72, 10, 5);
        assert_eq!(e.teachers(), vec![TeacherId(10)]);

        let e = e.with_secondary_teacher(11);
        assert_eq!(e.teachers(), vec![TeacherId(10), TeacherId(11)]);

        let e = e.with_secondary_teacher(10);
        assert_eq!(e.teachers(), vec![TeacherId(10)]);
    }

    #[test]
    fn test_audience_serde_is_tagged() {
        let e = CurriculumEntry::for_flow(1, 2, 108, 3, 4);
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["audience"], serde_json::json!({"flow": 4}));

        let back: CurriculumEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back.audience, Audience::Flow(FlowId(4)));
        assert_eq!(back.secondary_teacher, None);
    }

    #[test]
    fn test_audience_rejects_both() {
        let json = r#"{"id":1,"subject":1,"hours":72,"primary_teacher":1,
                       "audience":{"group":1,"flow":2}}"#;
        assert!(serde_json::from_str::<CurriculumEntry>(json).is_err());
    }
}
