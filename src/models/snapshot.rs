//! In-memory timetable dataset.
//!
//! A [`TimetableSnapshot`] is everything one scheduling or analysis run
//! reads, fetched once from the store. [`SnapshotIndex`] borrows a snapshot
//! and adds id lookups plus the derived views the algorithms need
//! (resolved group sets, teacher sets, required capacity).
//!
//! # Duplicate Ids
//! The index keeps the first entity for each id. Duplicates are reported
//! by [`validate_snapshot`](crate::validation::validate_snapshot).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{
    Audience, CurriculumEntry, CurriculumId, Flow, FlowId, Group, GroupId, Lesson, Room, RoomId,
    Subject, SubjectId, Teacher, TeacherId,
};
use crate::error::Result;

/// All entities of one timetable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimetableSnapshot {
    /// Student groups.
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Flows (joint group sets).
    #[serde(default)]
    pub flows: Vec<Flow>,
    /// Rooms, in the order the scheduler tries them.
    #[serde(default)]
    pub rooms: Vec<Room>,
    /// Teachers.
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    /// Subjects.
    #[serde(default)]
    pub subjects: Vec<Subject>,
    /// Curriculum entries.
    #[serde(default)]
    pub curriculum: Vec<CurriculumEntry>,
    /// Lessons already placed.
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

impl TimetableSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the snapshot to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Adds a group.
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// Adds a flow.
    pub fn with_flow(mut self, flow: Flow) -> Self {
        self.flows.push(flow);
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.teachers.push(teacher);
        self
    }

    /// Adds a subject.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    /// Adds a curriculum entry.
    pub fn with_entry(mut self, entry: CurriculumEntry) -> Self {
        self.curriculum.push(entry);
        self
    }

    /// Adds a placed lesson.
    pub fn with_lesson(mut self, lesson: Lesson) -> Self {
        self.lessons.push(lesson);
        self
    }

    /// Builds the lookup index.
    pub fn index(&self) -> SnapshotIndex<'_> {
        SnapshotIndex::new(self)
    }

    /// Lessons whose week belongs to the two-week cycle.
    pub fn lessons_in_cycle(&self) -> impl Iterator<Item = &Lesson> {
        self.lessons.iter().filter(|l| l.slot().in_cycle())
    }

    /// Whether there is nothing to schedule or analyze.
    pub fn is_empty(&self) -> bool {
        self.curriculum.is_empty() && self.lessons.is_empty()
    }
}

/// Id lookups over a borrowed snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotIndex<'a> {
    snapshot: &'a TimetableSnapshot,
    groups: HashMap<GroupId, &'a Group>,
    flows: HashMap<FlowId, &'a Flow>,
    rooms: HashMap<RoomId, &'a Room>,
    teachers: HashMap<TeacherId, &'a Teacher>,
    subjects: HashMap<SubjectId, &'a Subject>,
    curriculum: HashMap<CurriculumId, &'a CurriculumEntry>,
}

fn first_by_id<'a, K, T>(items: &'a [T], key: impl Fn(&T) -> K) -> HashMap<K, &'a T>
where
    K: std::hash::Hash + Eq,
{
    let mut map = HashMap::with_capacity(items.len());
    for item in items {
        map.entry(key(item)).or_insert(item);
    }
    map
}

impl<'a> SnapshotIndex<'a> {
    /// Indexes a snapshot.
    pub fn new(snapshot: &'a TimetableSnapshot) -> Self {
        Self {
            snapshot,
            groups: first_by_id(&snapshot.groups, |g| g.id),
            flows: first_by_id(&snapshot.flows, |f| f.id),
            rooms: first_by_id(&snapshot.rooms, |r| r.id),
            teachers: first_by_id(&snapshot.teachers, |t| t.id),
            subjects: first_by_id(&snapshot.subjects, |s| s.id),
            curriculum: first_by_id(&snapshot.curriculum, |c| c.id),
        }
    }

    /// The indexed snapshot.
    pub fn snapshot(&self) -> &'a TimetableSnapshot {
        self.snapshot
    }

    /// Looks up a group.
    pub fn group(&self, id: GroupId) -> Option<&'a Group> {
        self.groups.get(&id).copied()
    }

    /// Looks up a flow.
    pub fn flow(&self, id: FlowId) -> Option<&'a Flow> {
        self.flows.get(&id).copied()
    }

    /// Looks up a room.
    pub fn room(&self, id: RoomId) -> Option<&'a Room> {
        self.rooms.get(&id).copied()
    }

    /// Looks up a teacher.
    pub fn teacher(&self, id: TeacherId) -> Option<&'a Teacher> {
        self.teachers.get(&id).copied()
    }

    /// Looks up a subject.
    pub fn subject(&self, id: SubjectId) -> Option<&'a Subject> {
        self.subjects.get(&id).copied()
    }

    /// Looks up a curriculum entry.
    pub fn entry(&self, id: CurriculumId) -> Option<&'a CurriculumEntry> {
        self.curriculum.get(&id).copied()
    }

    /// Existing groups attending lessons of `audience`, without duplicates.
    ///
    /// Empty when the group or flow is unknown, or when no flow member
    /// exists as a group.
    pub fn resolve_groups(&self, audience: Audience) -> Vec<GroupId> {
        match audience {
            Audience::Group(id) => self.group(id).map(|g| vec![g.id]).unwrap_or_default(),
            Audience::Flow(id) => {
                let Some(flow) = self.flow(id) else {
                    return Vec::new();
                };
                let mut resolved: Vec<GroupId> = Vec::with_capacity(flow.groups.len());
                for &gid in &flow.groups {
                    if self.groups.contains_key(&gid) && !resolved.contains(&gid) {
                        resolved.push(gid);
                    }
                }
                resolved
            }
        }
    }

    /// Total students across `groups`.
    pub fn required_capacity(&self, groups: &[GroupId]) -> u32 {
        groups
            .iter()
            .filter_map(|&id| self.group(id))
            .fold(0u32, |acc, g| acc.saturating_add(g.student_count))
    }

    /// Teachers of `entry` that are not in the snapshot.
    pub fn unknown_teachers(&self, entry: &CurriculumEntry) -> Vec<TeacherId> {
        entry
            .teachers()
            .into_iter()
            .filter(|id| !self.teachers.contains_key(id))
            .collect()
    }

    /// Rooms seating at least `capacity`, in snapshot order.
    pub fn rooms_fitting(&self, capacity: u32) -> Vec<&'a Room> {
        self.snapshot
            .rooms
            .iter()
            .filter(|r| r.fits(capacity))
            .filter(|r| self.room(r.id).is_some_and(|first| std::ptr::eq(first, *r)))
            .collect()
    }
}
