//! Maintenance tasks: what is overdue, what is coming, what has been done

use chrono::NaiveDate;

use crate::asset::{Asset, Category};
use crate::utils::dates;

/// How many completions the dashboard history shows
pub const DEFAULT_RECENT_COMPLETIONS: usize = 10;

/// How far ahead upcoming tasks are listed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timeframe {
    /// The next 7 days
    Week,
    /// The next 30 days
    Month,
}

impl Timeframe {
    pub fn days(&self) -> u32 {
        match self {
            Timeframe::Week => 7,
            Timeframe::Month => 30,
        }
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Timeframe::Week
    }
}

/// How pressing an upcoming task is
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn from_days_until(days_until: u32) -> Self {
        match days_until {
            0..=3 => Priority::High,
            4..=7 => Priority::Medium,
            _ => Priority::Low,
        }
    }
}

/// An asset whose maintenance is due today or earlier
#[derive(Clone, Debug, PartialEq)]
pub struct OverdueTask<'a> {
    pub asset: &'a Asset,
    pub due_date: NaiveDate,
    /// 0 means "due today"
    pub days_overdue: u32,
}

/// An asset whose maintenance is due within the horizon, but not today
#[derive(Clone, Debug, PartialEq)]
pub struct UpcomingTask<'a> {
    pub asset: &'a Asset,
    pub due_date: NaiveDate,
    /// Always at least 1
    pub days_until: u32,
    pub priority: Priority,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskPartition<'a> {
    /// Most overdue first
    pub overdue: Vec<OverdueTask<'a>>,
    /// Soonest first
    pub upcoming: Vec<UpcomingTask<'a>>,
}

/// Split assets into the ones that need attention now, and the ones due in the next `horizon_days` days.
///
/// * overdue: due today or before, sorted by decreasing delay
/// * upcoming: due after today and strictly before `today + horizon_days`, sorted by due date
///
/// Both sorts are stable: assets that tie keep their relative order in `assets`.
/// Assets without a usable due date are left out of both lists.
pub fn partition(assets: &[Asset], today: NaiveDate, horizon_days: u32) -> TaskPartition<'_> {
    let mut result = TaskPartition::default();

    for asset in assets {
        let due_date = match asset.due_date() {
            Ok(date) => date,
            Err(err) => {
                log::warn!("{}. Leaving it out of the task lists", err);
                continue;
            },
        };

        let delta = dates::days_between(today, due_date);
        if delta <= 0 {
            result.overdue.push(OverdueTask { asset, due_date, days_overdue: (-delta) as u32 });
        } else if delta < horizon_days as i64 {
            let days_until = delta as u32;
            result.upcoming.push(UpcomingTask { asset, due_date, days_until, priority: Priority::from_days_until(days_until) });
        }
    }

    result.overdue.sort_by(|a, b| b.days_overdue.cmp(&a.days_overdue));
    result.upcoming.sort_by_key(|task| task.due_date);
    result
}


/// A completed maintenance, taken from the history of an asset
#[derive(Clone, Debug, PartialEq)]
pub struct Completion<'a> {
    pub asset_name: &'a str,
    pub asset_category: Category,
    pub date: NaiveDate,
}

/// The `limit` latest completed maintenances across all assets, most recent first.
///
/// History entries that are not completed, or that have no usable date, are ignored
pub fn recent_completions(assets: &[Asset], limit: usize) -> Vec<Completion<'_>> {
    let mut completions: Vec<Completion> = assets.iter()
        .flat_map(|asset| {
            asset.maintenance_history().iter()
                .filter(|entry| entry.completed)
                .filter_map(move |entry| entry.date.map(|date| Completion {
                    asset_name: asset.name(),
                    asset_category: asset.category(),
                    date,
                }))
        })
        .collect();

    completions.sort_by(|a, b| b.date.cmp(&a.date));
    completions.truncate(limit);
    completions
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::asset::{AssetId, HistoryEntry};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn asset(id: i64, next: Option<NaiveDate>) -> Asset {
        Asset::new(AssetId::from(id), format!("asset {}", id), Category::Appliances, 3, None, next)
    }

    fn ids_overdue(p: &TaskPartition) -> Vec<i64> {
        p.overdue.iter().map(|t| t.asset.id().as_i64()).collect()
    }
    fn ids_upcoming(p: &TaskPartition) -> Vec<i64> {
        p.upcoming.iter().map(|t| t.asset.id().as_i64()).collect()
    }

    #[test]
    fn test_due_today_is_overdue() {
        let today = ymd(2024, 5, 20);
        let assets = vec![asset(1, Some(today))];
        let p = partition(&assets, today, 30);

        assert_eq!(ids_overdue(&p), vec![1]);
        assert_eq!(p.overdue[0].days_overdue, 0);
        assert!(p.upcoming.is_empty());
    }

    #[test]
    fn test_partition() {
        let today = ymd(2024, 5, 20);
        let assets = vec![
            asset(1, Some(ymd(2024, 5, 25))),
            asset(2, Some(ymd(2024, 5, 10))),
            asset(3, Some(ymd(2024, 5, 21))),
            asset(4, Some(ymd(2024, 5, 27))),
            asset(5, Some(ymd(2024, 4, 1))),
            asset(6, Some(ymd(2024, 6, 30))),
        ];

        let week = partition(&assets, today, Timeframe::Week.days());
        assert_eq!(ids_overdue(&week), vec![5, 2]);
        assert_eq!(week.overdue[0].days_overdue, 49);
        assert_eq!(week.overdue[1].days_overdue, 10);
        // Due in exactly 7 days is outside a 7-day horizon
        assert_eq!(ids_upcoming(&week), vec![3, 1]);
        assert_eq!(week.upcoming[0].days_until, 1);
        assert_eq!(week.upcoming[1].days_until, 5);

        let month = partition(&assets, today, Timeframe::Month.days());
        assert_eq!(ids_upcoming(&month), vec![3, 1, 4]);
        assert_eq!(month.upcoming[2].priority, Priority::Medium);
    }

    #[test]
    fn test_partition_is_stable() {
        let today = ymd(2024, 5, 20);
        let assets = vec![
            asset(8, Some(ymd(2024, 5, 22))),
            asset(3, Some(ymd(2024, 5, 1))),
            asset(7, Some(ymd(2024, 5, 22))),
            asset(1, Some(ymd(2024, 5, 1))),
            asset(4, Some(ymd(2024, 5, 21))),
        ];
        let p = partition(&assets, today, 7);
        assert_eq!(ids_overdue(&p), vec![3, 1]);
        assert_eq!(ids_upcoming(&p), vec![4, 8, 7]);
    }

    #[test]
    fn test_missing_dates_are_excluded() {
        let today = ymd(2024, 5, 20);
        let assets = vec![asset(1, None), asset(2, Some(ymd(2024, 5, 19))), asset(3, Some(ymd(2024, 5, 23)))];
        let p = partition(&assets, today, 7);
        assert_eq!(ids_overdue(&p), vec![2]);
        assert_eq!(ids_upcoming(&p), vec![3]);
    }

    #[test]
    fn test_custom_horizon() {
        let today = ymd(2024, 5, 20);
        let assets = vec![asset(1, Some(ymd(2024, 5, 21))), asset(2, Some(ymd(2024, 8, 1)))];
        assert_eq!(ids_upcoming(&partition(&assets, today, 1)), Vec::<i64>::new());
        assert_eq!(ids_upcoming(&partition(&assets, today, 2)), vec![1]);
        assert_eq!(ids_upcoming(&partition(&assets, today, 365)), vec![1, 2]);
    }

    #[test]
    fn test_priority() {
        assert_eq!(Priority::from_days_until(1), Priority::High);
        assert_eq!(Priority::from_days_until(3), Priority::High);
        assert_eq!(Priority::from_days_until(4), Priority::Medium);
        assert_eq!(Priority::from_days_until(7), Priority::Medium);
        assert_eq!(Priority::from_days_until(8), Priority::Low);
    }

    #[test]
    fn test_recent_completions() {
        let mut furnace = asset(1, None);
        furnace.add_history_entry(HistoryEntry { date: Some(ymd(2024, 1, 3)), completed: true });
        furnace.add_history_entry(HistoryEntry { date: Some(ymd(2024, 4, 3)), completed: false });
        furnace.add_history_entry(HistoryEntry { date: None, completed: true });
        let mut car = asset(2, None);
        car.add_history_entry(HistoryEntry { date: Some(ymd(2024, 2, 10)), completed: true });
        car.add_history_entry(HistoryEntry { date: Some(ymd(2023, 12, 24)), completed: true });
        let assets = vec![furnace, car, asset(3, None)];

        let completions = recent_completions(&assets, DEFAULT_RECENT_COMPLETIONS);
        let dates: Vec<NaiveDate> = completions.iter().map(|c| c.date).collect();
        assert_eq!(dates, vec![ymd(2024, 2, 10), ymd(2024, 1, 3), ymd(2023, 12, 24)]);
        assert_eq!(completions[0].asset_name, "asset 2");

        assert_eq!(recent_completions(&assets, 1).len(), 1);
        assert!(recent_completions(&[], 10).is_empty());
    }
}
