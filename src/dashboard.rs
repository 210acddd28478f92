//! A summary of the whole maintenance situation, computed in a single pass

use chrono::NaiveDate;

use crate::asset::Asset;
use crate::tasks::{self, Completion, OverdueTask, Timeframe, UpcomingTask};

/// Everything the dashboard displays.
///
/// Every part is computed against the same `today`, so that they cannot disagree on what is overdue.
#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard<'a> {
    today: NaiveDate,
    timeframe: Timeframe,
    total_assets: usize,
    overdue: Vec<OverdueTask<'a>>,
    upcoming: Vec<UpcomingTask<'a>>,
    recent_completions: Vec<Completion<'a>>,
}

impl<'a> Dashboard<'a> {
    pub fn build(assets: &'a [Asset], today: NaiveDate, timeframe: Timeframe) -> Self {
        Self::build_with_limit(assets, today, timeframe, tasks::DEFAULT_RECENT_COMPLETIONS)
    }

    /// Same as [`Dashboard::build`], showing at most `completions_limit` past completions
    pub fn build_with_limit(assets: &'a [Asset], today: NaiveDate, timeframe: Timeframe, completions_limit: usize) -> Self {
        let partition = tasks::partition(assets, today, timeframe.days());
        let recent_completions = tasks::recent_completions(assets, completions_limit);
        log::debug!("Dashboard for {}: {} overdue, {} upcoming within {} days, {} recent completions",
            today, partition.overdue.len(), partition.upcoming.len(), timeframe.days(), recent_completions.len());

        Self {
            today,
            timeframe,
            total_assets: assets.len(),
            overdue: partition.overdue,
            upcoming: partition.upcoming,
            recent_completions,
        }
    }

    pub fn today(&self) -> NaiveDate                     { self.today }
    pub fn timeframe(&self) -> Timeframe                 { self.timeframe }
    pub fn total_assets(&self) -> usize                  { self.total_assets }
    pub fn overdue(&self) -> &[OverdueTask<'a>]          { &self.overdue }
    pub fn upcoming(&self) -> &[UpcomingTask<'a>]        { &self.upcoming }
    pub fn recent_completions(&self) -> &[Completion<'a>] { &self.recent_completions }

    /// Whether some maintenance is due today or late
    pub fn needs_attention(&self) -> bool {
        self.overdue.is_empty() == false
    }
}
