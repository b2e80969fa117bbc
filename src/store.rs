//! Timetable persistence seam.
//!
//! The scheduler and analyzer work on an in-memory [`TimetableSnapshot`].
//! A [`TimetableStore`] supplies that snapshot and persists the lessons a
//! scheduling run produces. [`MemoryStore`] keeps everything in memory and
//! backs tests and embedding hosts without a database.

use crate::error::{Result, TimetableError};
use crate::models::{Lesson, LessonId, LessonOccurrence, TimetableSnapshot};
use crate::validation::validate_placement;

/// Source and sink of timetable state.
pub trait TimetableStore {
    /// Fetches the full dataset for one run.
    fn load_snapshot(&self) -> Result<TimetableSnapshot>;

    /// Persists new lessons as one batch.
    ///
    /// Either every occurrence is stored or none is. Returns the ids
    /// assigned to the occurrences, in input order.
    fn commit_lessons(&mut self, occurrences: Vec<LessonOccurrence>) -> Result<Vec<LessonId>>;
}

/// In-memory store.
///
/// Lesson ids are assigned sequentially, starting after the largest id
/// already present.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    snapshot: TimetableSnapshot,
    next_lesson_id: u32,
    available: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(TimetableSnapshot::default())
    }
}

impl MemoryStore {
    /// Creates a store holding `snapshot`.
    pub fn new(snapshot: TimetableSnapshot) -> Self {
        let next_lesson_id = snapshot
            .lessons
            .iter()
            .map(|l| l.id.get())
            .max()
            .map_or(1, |max| max.saturating_add(1));
        Self {
            snapshot,
            next_lesson_id,
            available: true,
        }
    }

    /// Creates a store from snapshot JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(TimetableSnapshot::from_json(json)?))
    }

    /// Current state.
    pub fn snapshot(&self) -> &TimetableSnapshot {
        &self.snapshot
    }

    /// Consumes the store, returning its state.
    pub fn into_snapshot(self) -> TimetableSnapshot {
        self.snapshot
    }

    /// Simulates losing the backing storage. Every later call fails.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    fn check_available(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(TimetableError::Store("memory store is unavailable".into()))
        }
    }
}

impl TimetableStore for MemoryStore {
    fn load_snapshot(&self) -> Result<TimetableSnapshot> {
        self.check_available()?;
        Ok(self.snapshot.clone())
    }

    fn commit_lessons(&mut self, occurrences: Vec<LessonOccurrence>) -> Result<Vec<LessonId>> {
        self.check_available()?;

        let mut errors = Vec::new();
        for occurrence in &occurrences {
            if let Err(mut e) = validate_placement(&self.snapshot, occurrence) {
                errors.append(&mut e);
            }
        }
        if !errors.is_empty() {
            tracing::warn!(
                batch = occurrences.len(),
                errors = errors.len(),
                "rejected lesson batch"
            );
            return Err(TimetableError::InvalidPlacement(errors));
        }

        let count = occurrences.len() as u32;
        if self.next_lesson_id.checked_add(count).is_none() {
            return Err(TimetableError::Store("lesson id space exhausted".into()));
        }

        let mut ids = Vec::with_capacity(occurrences.len());
        for occurrence in occurrences {
            let id = LessonId(self.next_lesson_id);
            self.next_lesson_id += 1;
            self.snapshot.lessons.push(Lesson::new(id, occurrence));
            ids.push(id);
        }
        tracing::debug!(committed = ids.len(), "committed lesson batch");
        Ok(ids)
    }
}
