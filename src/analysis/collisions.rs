//! Exact-slot collision detection.

use serde::{Deserialize, Serialize};

use super::timeline::Timelines;
use super::ResourceRef;
use crate::models::LessonId;

/// Two lessons using the same resource in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionRecord {
    /// Double-booked resource.
    pub resource: ResourceRef,
    /// Week.
    pub week: u8,
    /// Day.
    pub day: u8,
    /// Shared period.
    pub period: u8,
    /// The two conflicting lessons, lower id first.
    pub lessons: [LessonId; 2],
}

/// Appends a record for every adjacent pair sharing a period.
///
/// Three lessons in one slot yield two records (first-second,
/// second-third).
pub fn detect<K, F>(timelines: &Timelines<K>, to_ref: F, out: &mut Vec<CollisionRecord>)
where
    K: Ord + Copy,
    F: Fn(K) -> ResourceRef,
{
    for (resource, week, day, lessons) in timelines.days() {
        for pair in lessons.windows(2) {
            let (p0, l0) = pair[0];
            let (p1, l1) = pair[1];
            if p0 == p1 {
                out.push(CollisionRecord {
                    resource: to_ref(resource),
                    week,
                    day,
                    period: p1,
                    lessons: [l0, l1],
                });
            }
        }
    }
}
