//! Store-backed timetabling operations.
//!
//! [`Timetabler`] ties the algorithms to a [`TimetableStore`]: it loads one
//! snapshot per call, runs the scheduler or analyzer on it, and commits
//! placements as a single batch. Only store failures surface as errors.

use crate::analysis::{self, CollisionReport};
use crate::error::Result;
use crate::models::LessonId;
use crate::scheduler::{GreedyScheduler, ScheduleOutcome, SchedulerConfig, TimetableKpi};
use crate::store::TimetableStore;

/// Outcome of a store-backed scheduling run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRun {
    /// What the scheduler produced.
    pub outcome: ScheduleOutcome,
    /// Ids assigned to `outcome.placed`, in the same order. Empty on a dry run.
    pub committed: Vec<LessonId>,
}

/// Scheduling and analysis service over a store.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timetabler {
    config: SchedulerConfig,
}

impl Timetabler {
    /// Creates a service with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service with the given configuration.
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Places every outstanding lesson and commits the placements.
    ///
    /// Runs against separate handles to one backing store need external
    /// locking.
    pub fn schedule<S: TimetableStore>(&self, store: &mut S) -> Result<ScheduleRun> {
        let snapshot = store.load_snapshot()?;
        let outcome = GreedyScheduler::from_config(&self.config).schedule(&snapshot);

        if self.config.dry_run || outcome.placed.is_empty() {
            if self.config.dry_run {
                tracing::info!(placed = outcome.placed.len(), "dry run, nothing committed");
            }
            return Ok(ScheduleRun {
                outcome,
                committed: Vec::new(),
            });
        }

        let committed = store.commit_lessons(outcome.placed.clone())?;
        Ok(ScheduleRun { outcome, committed })
    }

    /// Analyzes the stored timetable for collisions and gaps.
    pub fn find_collisions<S: TimetableStore>(&self, store: &S) -> Result<CollisionReport> {
        let snapshot = store.load_snapshot()?;
        Ok(analysis::find_collisions(&snapshot))
    }

    /// Computes quality metrics of the stored timetable.
    pub fn kpi<S: TimetableStore>(&self, store: &S) -> Result<TimetableKpi> {
        let snapshot = store.load_snapshot()?;
        Ok(TimetableKpi::calculate(&snapshot))
    }
}
