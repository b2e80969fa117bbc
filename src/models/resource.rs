//! Resource models.
//!
//! The three resource axes of a timetable are student groups, teachers, and
//! rooms. Each must be used by at most one lesson per slot. Flows bundle
//! groups that attend a lesson jointly; subjects only carry display names.

use serde::{Deserialize, Serialize};

use super::{FlowId, GroupId, RoomId, SubjectId, TeacherId};

/// A student group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique group identifier.
    pub id: GroupId,
    /// Human-readable name (e.g., "CS-101").
    #[serde(default)]
    pub name: String,
    /// Number of students, used for room capacity checks.
    pub student_count: u32,
}

/// A named set of groups attending lessons together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    /// Unique flow identifier.
    pub id: FlowId,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Member groups.
    #[serde(default)]
    pub groups: Vec<GroupId>,
}

/// A room lessons are held in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: RoomId,
    /// Room number or name.
    #[serde(default)]
    pub name: String,
    /// Seats available.
    pub capacity: u32,
}

/// A teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: TeacherId,
    /// Full name.
    #[serde(default)]
    pub full_name: String,
}

/// A subject taught under one or more curriculum entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject identifier.
    pub id: SubjectId,
    /// Full name.
    #[serde(default)]
    pub name: String,
    /// Abbreviation used in compact views.
    #[serde(default)]
    pub short_name: String,
}

impl Group {
    /// Creates a group with the given head count.
    pub fn new(id: impl Into<GroupId>, student_count: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            student_count,
        }
    }

    /// Sets the group name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Flow {
    /// Creates an empty flow.
    pub fn new(id: impl Into<FlowId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            groups: Vec::new(),
        }
    }

    /// Sets the flow name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a member group.
    pub fn with_group(mut self, group: impl Into<GroupId>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Adds several member groups.
    pub fn with_groups<I, G>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<GroupId>,
    {
        self.groups.extend(groups.into_iter().map(Into::into));
        self
    }

    /// Whether a group belongs to this flow.
    pub fn contains(&self, group: GroupId) -> bool {
        self.groups.contains(&group)
    }
}

impl Room {
    /// Creates a room with the given seat count.
    pub fn new(id: impl Into<RoomId>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            capacity,
        }
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether the room seats `students`.
    #[inline]
    pub fn fits(&self, students: u32) -> bool {
        self.capacity >= students
    }
}

impl Teacher {
    /// Creates a teacher.
    pub fn new(id: impl Into<TeacherId>) -> Self {
        Self {
            id: id.into(),
            full_name: String::new(),
        }
    }

    /// Sets the full name.
    pub fn with_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }
}

impl Subject {
    /// Creates a subject.
    pub fn new(id: impl Into<SubjectId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            short_name: String::new(),
        }
    }

    /// Sets the full name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the abbreviation.
    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = short_name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_builder() {
        let g = Group::new(1, 25).with_name("CS-101");
        assert_eq!(g.id, GroupId(1));
        assert_eq!(g.name, "CS-101");
        assert_eq!(g.student_count, 25);
    }

    #[test]
    fn test_flow_membership() {
        let f = Flow::new(3).with_name("CS year 1").with_groups([1, 2]).with_group(5);
        assert_eq!(f.groups, vec![GroupId(1), GroupId(2), GroupId(5)]);
        assert!(f.contains(GroupId(2)));
        assert!(!f.contains(GroupId(4)));
    }

    #[test]
    fn test_room_fits() {
        let r = Room::new(10, 40).with_name("A-201");
        assert!(r.fits(40));
        assert!(r.fits(12));
        assert!(!r.fits(55));
    }

    #[test]
    fn test_teacher_and_subject_builders() {
        let t = Teacher::new(4).with_name("Ivanova A. P.");
        assert_eq!(t.full_name, "Ivanova A. P.");

        let s = Subject::new(2).with_name("Linear Algebra").with_short_name("LinAlg");
        assert_eq!(s.id, SubjectId(2));
        assert_eq!(s.short_name, "LinAlg");
    }

    #[test]
    fn test_resource_deserialize_with_defaults() {
        let r: Room = serde_json::from_str(r#"{"id": 3, "capacity": 30}"#).unwrap();
        assert_eq!(r.id, RoomId(3));
        assert!(r.name.is_empty());
    }
}
