//! Collision and gap analysis of stored timetables.
//!
//! Re-derives every group's, teacher's, and room's day timeline from the
//! stored lessons and reports:
//!
//! - **Collisions**: two lessons sharing a slot on any axis. These catch
//!   double bookings entered by hand as well as anything the greedy
//!   scheduler could not prevent.
//! - **Gaps**: idle periods between lessons, for groups and teachers only.
//!
//! The analysis never modifies the timetable.
//!
//! # Output Order
//! Records are produced axis by axis (group, teacher, room), each axis in
//! ascending (resource, week, day, period) order. Callers should still
//! treat the lists as sets.

mod collisions;
mod gaps;
mod timeline;

pub use collisions::CollisionRecord;
pub use gaps::GapRecord;
pub use timeline::{DayTimeline, ResourceTimelines, Timelines};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Diagnostic, GroupId, RoomId, TeacherId, TimetableSnapshot};

/// Resource axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Student group.
    Group,
    /// Teacher.
    Teacher,
    /// Room.
    Room,
}

/// A resource on one of the three axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum ResourceRef {
    /// Student group.
    Group(GroupId),
    /// Teacher.
    Teacher(TeacherId),
    /// Room.
    Room(RoomId),
}

impl ResourceRef {
    /// Axis of the resource.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Group(_) => ResourceKind::Group,
            Self::Teacher(_) => ResourceKind::Teacher,
            Self::Room(_) => ResourceKind::Room,
        }
    }

    /// Raw id on its axis.
    pub fn raw_id(&self) -> u32 {
        match self {
            Self::Group(id) => id.get(),
            Self::Teacher(id) => id.get(),
            Self::Room(id) => id.get(),
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group(id) => write!(f, "group {id}"),
            Self::Teacher(id) => write!(f, "teacher {id}"),
            Self::Room(id) => write!(f, "room {id}"),
        }
    }
}

/// Result of analyzing a timetable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionReport {
    /// Double bookings on any axis.
    pub collisions: Vec<CollisionRecord>,
    /// Idle periods of groups.
    pub group_gaps: Vec<GapRecord>,
    /// Idle periods of teachers.
    pub teacher_gaps: Vec<GapRecord>,
    /// Lessons that could only be partly analyzed.
    pub diagnostics: Vec<Diagnostic>,
}

impl CollisionReport {
    /// Whether no resource is double-booked.
    pub fn is_conflict_free(&self) -> bool {
        self.collisions.is_empty()
    }

    /// Collisions on one axis.
    pub fn collisions_of(&self, kind: ResourceKind) -> Vec<&CollisionRecord> {
        self.collisions
            .iter()
            .filter(|c| c.resource.kind() == kind)
            .collect()
    }

    /// Total idle periods of all groups.
    pub fn group_gap_periods(&self) -> u32 {
        self.group_gaps.iter().map(|g| g.length as u32).sum()
    }

    /// Total idle periods of all teachers.
    pub fn teacher_gap_periods(&self) -> u32 {
        self.teacher_gaps.iter().map(|g| g.length as u32).sum()
    }
}

/// Analyzes the timetable stored in `snapshot`.
pub fn find_collisions(snapshot: &TimetableSnapshot) -> CollisionReport {
    let (timelines, diagnostics) = ResourceTimelines::build(&snapshot.index());
    let report = analyze(&timelines, diagnostics);
    tracing::info!(
        lessons = snapshot.lessons.len(),
        collisions = report.collisions.len(),
        group_gaps = report.group_gaps.len(),
        teacher_gaps = report.teacher_gaps.len(),
        "timetable analysis finished"
    );
    report
}

/// Builds the report from prepared timelines.
pub fn analyze(timelines: &ResourceTimelines, diagnostics: Vec<Diagnostic>) -> CollisionReport {
    let mut report = CollisionReport {
        diagnostics,
        ..Default::default()
    };

    collisions::detect(&timelines.groups, ResourceRef::Group, &mut report.collisions);
    collisions::detect(&timelines.teachers, ResourceRef::Teacher, &mut report.collisions);
    collisions::detect(&timelines.rooms, ResourceRef::Room, &mut report.collisions);

    gaps::detect(&timelines.groups, ResourceRef::Group, &mut report.group_gaps);
    gaps::detect(&timelines.teachers, ResourceRef::Teacher, &mut report.teacher_gaps);

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CurriculumEntry, Flow, Group, Lesson, LessonId, LessonKind, Room, Slot, Teacher,
    };
    use std::collections::HashSet;

    fn base() -> TimetableSnapshot {
        TimetableSnapshot::new()
            .with_group(Group::new(1, 20))
            .with_group(Group::new(2, 20))
            .with_flow(Flow::new(1).with_groups([1, 2]))
            .with_room(Room::new(1, 50))
            .with_room(Room::new(2, 50))
            .with_teacher(Teacher::new(1))
            .with_teacher(Teacher::new(2))
    }

    #[test]
    fn test_group_collision_only() {
        let s = base()
            .with_entry(CurriculumEntry::for_group(1, 1, 72, 1, 1))
            .with_entry(CurriculumEntry::for_group(2, 2, 72, 2, 1))
            .with_lesson(Lesson::at(10, Slot::new(1, 1, 3), 1, 1, LessonKind::Lecture))
            .with_lesson(Lesson::at(11, Slot::new(1, 1, 3), 2, 2, LessonKind::Lecture));

        let r = find_collisions(&s);
        assert_eq!(r.collisions.len(), 1);
        let c = r.collisions[0];
        assert_eq!(c.resource, ResourceRef::Group(GroupId(1)));
        assert_eq!((c.week, c.day, c.period), (1, 1, 3));
        assert_eq!(c.lessons, [LessonId(10), LessonId(11)]);
        assert!(r.collisions_of(ResourceKind::Teacher).is_empty());
        assert!(r.collisions_of(ResourceKind::Room).is_empty());
        assert!(!r.is_conflict_free());
    }

    #[test]
    fn test_all_axes_collide() {
        let s = base()
            .with_entry(CurriculumEntry::for_flow(1, 1, 72, 1, 1))
            .with_entry(CurriculumEntry::for_group(2, 2, 72, 1, 2))
            .with_lesson(Lesson::at(1, Slot::new(2, 4, 5), 1, 1, LessonKind::Lecture))
            .with_lesson(Lesson::at(2, Slot::new(2, 4, 5), 1, 2, LessonKind::Lecture));

        let r = find_collisions(&s);
        let kinds: HashSet<_> = r
            .collisions
            .iter()
            .map(|c| (c.resource, c.period))
            .collect();
        assert_eq!(
            kinds,
            HashSet::from([
                (ResourceRef::Group(GroupId(2)), 5),
                (ResourceRef::Teacher(TeacherId(1)), 5),
                (ResourceRef::Room(RoomId(1)), 5),
            ])
        );
    }

    #[test]
    fn test_gaps_for_groups_and_teachers() {
        let s = base()
            .with_entry(CurriculumEntry::for_group(1, 1, 144, 1, 1).with_secondary_teacher(2))
            .with_lesson(Lesson::at(1, Slot::new(1, 2, 1), 1, 1, LessonKind::Lecture))
            .with_lesson(Lesson::at(2, Slot::new(1, 2, 3), 1, 1, LessonKind::Lab))
            .with_lesson(Lesson::at(3, Slot::new(1, 3, 1), 1, 1, LessonKind::Lab))
            .with_lesson(Lesson::at(4, Slot::new(1, 3, 2), 1, 1, LessonKind::Lab));

        let r = find_collisions(&s);
        assert!(r.is_conflict_free());
        assert_eq!(r.group_gaps.len(), 1);
        let g = r.group_gaps[0];
        assert_eq!(g.resource, ResourceRef::Group(GroupId(1)));
        assert_eq!((g.week, g.day, g.window_start, g.window_end, g.length), (1, 2, 1, 3, 1));

        let teachers: HashSet<_> = r.teacher_gaps.iter().map(|g| g.resource).collect();
        assert_eq!(
            teachers,
            HashSet::from([
                ResourceRef::Teacher(TeacherId(1)),
                ResourceRef::Teacher(TeacherId(2))
            ])
        );
        assert_eq!(r.group_gap_periods(), 1);
        assert_eq!(r.teacher_gap_periods(), 2);
    }

    #[test]
    fn test_room_gaps_not_reported() {
        let s = base()
            .with_entry(CurriculumEntry::for_group(1, 1, 72, 1, 1))
            .with_entry(CurriculumEntry::for_group(2, 2, 72, 2, 2))
            .with_lesson(Lesson::at(1, Slot::new(1, 1, 1), 1, 1, LessonKind::Lecture))
            .with_lesson(Lesson::at(2, Slot::new(1, 1, 5), 1, 2, LessonKind::Lecture));

        let r = find_collisions(&s);
        assert!(r.group_gaps.is_empty());
        assert!(r.teacher_gaps.is_empty());
    }

    #[test]
    fn test_unknown_curriculum_counts_on_room_axis() {
        let s = base()
            .with_entry(CurriculumEntry::for_group(1, 1, 72, 1, 1))
            .with_lesson(Lesson::at(1, Slot::new(1, 1, 1), 1, 1, LessonKind::Lecture))
            .with_lesson(Lesson::at(2, Slot::new(1, 1, 1), 1, 42, LessonKind::Lecture));

        let r = find_collisions(&s);
        assert_eq!(r.collisions.len(), 1);
        assert_eq!(r.collisions[0].resource.kind(), ResourceKind::Room);
        assert_eq!(r.diagnostics.len(), 1);
    }

    #[test]
    fn test_empty_timetable() {
        let r = find_collisions(&TimetableSnapshot::new());
        assert_eq!(r, CollisionReport::default());
    }

    #[test]
    fn test_resource_ref_json() {
        let json = serde_json::to_value(ResourceRef::Teacher(TeacherId(3))).unwrap();
        assert_eq!(json, serde_json::json!({"type": "teacher", "id": 3}));
        assert_eq!(ResourceRef::Room(RoomId(9)).raw_id(), 9);
        assert_eq!(ResourceRef::Group(GroupId(2)).to_string(), "group 2");
    }
}
