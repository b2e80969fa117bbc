//! The fixed two-week timetable grid.
//!
//! A cycle is two weeks of six teaching days with eight periods each,
//! 96 slots in total. Slots are addressed 1-based on every axis, matching
//! how timetables are printed and stored.
//!
//! # Slot Index
//! Each in-grid slot has a dense index in `0..CYCLE_SLOTS`, in search
//! order (week, then day, then period). [`SlotMask`] uses that index as a
//! bit position, so one `u128` holds the occupancy of a resource for the
//! whole cycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weeks per cycle.
pub const WEEKS: u8 = 2;
/// Teaching days per week.
pub const DAYS_PER_WEEK: u8 = 6;
/// Periods per teaching day.
pub const PERIODS_PER_DAY: u8 = 8;
/// Slots per cycle.
pub const CYCLE_SLOTS: usize = WEEKS as usize * DAYS_PER_WEEK as usize * PERIODS_PER_DAY as usize;

/// A (week, day, period) coordinate.
///
/// Values outside the grid are representable so that stored data with
/// manual mistakes can still be loaded and analyzed; [`Slot::is_valid`]
/// tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Week of the cycle (1 or 2).
    pub week: u8,
    /// Day of the week (1 = Monday .. 6 = Saturday).
    pub day: u8,
    /// Period of the day (1..=8).
    pub period: u8,
}

impl Slot {
    /// Creates a slot without range checks.
    pub const fn new(week: u8, day: u8, period: u8) -> Self {
        Self { week, day, period }
    }

    /// Creates a slot, returning `None` if it lies outside the grid.
    pub fn checked(week: u8, day: u8, period: u8) -> Option<Self> {
        let slot = Self::new(week, day, period);
        slot.is_valid().then_some(slot)
    }

    /// Whether every coordinate is within the grid.
    pub fn is_valid(&self) -> bool {
        (1..=WEEKS).contains(&self.week)
            && (1..=DAYS_PER_WEEK).contains(&self.day)
            && (1..=PERIODS_PER_DAY).contains(&self.period)
    }

    /// Whether the slot's week belongs to the two-week cycle.
    #[inline]
    pub fn in_cycle(&self) -> bool {
        (1..=WEEKS).contains(&self.week)
    }

    /// Dense index in search order, or `None` outside the grid.
    pub fn index(&self) -> Option<usize> {
        if !self.is_valid() {
            return None;
        }
        let week = (self.week - 1) as usize;
        let day = (self.day - 1) as usize;
        let period = (self.period - 1) as usize;
        Some((week * DAYS_PER_WEEK as usize + day) * PERIODS_PER_DAY as usize + period)
    }

    /// Inverse of [`Slot::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= CYCLE_SLOTS {
            return None;
        }
        let periods = PERIODS_PER_DAY as usize;
        let days = DAYS_PER_WEEK as usize;
        let period = index % periods;
        let day = (index / periods) % days;
        let week = index / (periods * days);
        Some(Self::new(week as u8 + 1, day as u8 + 1, period as u8 + 1))
    }

    /// All slots of the cycle in search order: week, then day, then period.
    pub fn cycle() -> impl Iterator<Item = Slot> {
        (1..=WEEKS).flat_map(|week| {
            (1..=DAYS_PER_WEEK).flat_map(move |day| {
                (1..=PERIODS_PER_DAY).map(move |period| Slot::new(week, day, period))
            })
        })
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}d{}p{}", self.week, self.day, self.period)
    }
}

/// Occupancy of one resource over the cycle, one bit per slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotMask(u128);

impl SlotMask {
    /// An empty mask.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Marks a slot busy. Slots outside the grid are ignored.
    pub fn insert(&mut self, slot: Slot) {
        if let Some(i) = slot.index() {
            self.0 |= 1u128 << i;
        }
    }

    /// Whether a slot is busy. Slots outside the grid are never busy.
    pub fn contains(&self, slot: Slot) -> bool {
        slot.index().is_some_and(|i| self.0 & (1u128 << i) != 0)
    }

    /// Number of busy slots.
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Whether no slot is busy.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_validity() {
        assert!(Slot::new(1, 1, 1).is_valid());
        assert!(Slot::new(2, 6, 8).is_valid());
        assert!(!Slot::new(0, 1, 1).is_valid());
        assert!(!Slot::new(3, 1, 1).is_valid());
        assert!(!Slot::new(1, 7, 1).is_valid());
        assert!(!Slot::new(1, 1, 9).is_valid());
        assert!(Slot::checked(1, 0, 1).is_none());
    }

    #[test]
    fn test_cycle_order_and_size() {
        let slots: Vec<Slot> = Slot::cycle().collect();
        assert_eq!(slots.len(), CYCLE_SLOTS);
        assert_eq!(slots[0], Slot::new(1, 1, 1));
        assert_eq!(slots[1], Slot::new(1, 1, 2));
        assert_eq!(slots[8], Slot::new(1, 2, 1));
        assert_eq!(slots[48], Slot::new(2, 1, 1));
        assert_eq!(slots[95], Slot::new(2, 6, 8));
    }

    #[test]
    fn test_index_matches_cycle_position() {
        for (i, slot) in Slot::cycle().enumerate() {
            assert_eq!(slot.index(), Some(i));
            assert_eq!(Slot::from_index(i), Some(slot));
        }
        assert_eq!(Slot::from_index(CYCLE_SLOTS), None);
        assert_eq!(Slot::new(1, 1, 9).index(), None);
    }

    #[test]
    fn test_slot_mask() {
        let mut mask = SlotMask::empty();
        assert!(mask.is_empty());

        mask.insert(Slot::new(2, 6, 8));
        mask.insert(Slot::new(1, 1, 1));
        mask.insert(Slot::new(1, 1, 1));
        mask.insert(Slot::new(3, 1, 1)); // outside the grid

        assert_eq!(mask.count(), 2);
        assert!(mask.contains(Slot::new(2, 6, 8)));
        assert!(!mask.contains(Slot::new(1, 1, 2)));
        assert!(!mask.contains(Slot::new(3, 1, 1)));
    }
}
