//! Idle-period (gap) detection.
//!
//! A gap is a run of free periods between two lessons of one resource on
//! one day. Free periods before the first or after the last lesson are
//! not gaps.

use serde::{Deserialize, Serialize};

use super::timeline::Timelines;
use super::ResourceRef;

/// Idle periods between two consecutive lessons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GapRecord {
    /// Idle resource.
    pub resource: ResourceRef,
    /// Week.
    pub week: u8,
    /// Day.
    pub day: u8,
    /// Period of the lesson before the gap.
    pub window_start: u8,
    /// Period of the lesson after the gap.
    pub window_end: u8,
    /// Number of free periods in between.
    pub length: u8,
}

/// Appends a record for every positive gap between consecutive lessons.
pub fn detect<K, F>(timelines: &Timelines<K>, to_ref: F, out: &mut Vec<GapRecord>)
where
    K: Ord + Copy,
    F: Fn(K) -> ResourceRef,
{
    for (resource, week, day, lessons) in timelines.days() {
        for pair in lessons.windows(2) {
            let (start, _) = pair[0];
            let (end, _) = pair[1];
            let length = end.saturating_sub(start).saturating_sub(1);
            if length > 0 {
                out.push(GapRecord {
                    resource: to_ref(resource),
                    week,
                    day,
                    window_start: start,
                    window_end: end,
                    length,
                });
            }
        }
    }
}
