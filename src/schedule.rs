//! Projection of recurring maintenances into a calendar

use std::convert::TryFrom;

use serde::{Deserialize, Serialize};
use chrono::{Datelike, NaiveDate};

use crate::asset::{Asset, AssetId, Category};
use crate::error::Error;
use crate::status::{self, Status, CALENDAR_DUE_SOON_DAYS};
use crate::utils::dates;

/// How far ahead the calendar is populated by default, in months
pub const DEFAULT_HORIZON_MONTHS: u32 = 12;

/// One projected occurrence of a maintenance
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceEvent {
    /// Unique among the events of a projection, in the form `<asset id>-<due date>`
    id: String,
    asset_id: AssetId,
    asset_name: String,
    asset_category: Category,
    date: NaiveDate,
    status: Status,
}

impl MaintenanceEvent {
    fn new(asset: &Asset, date: NaiveDate, status: Status) -> Self {
        Self {
            id: format!("{}-{}", asset.id(), date),
            asset_id: asset.id(),
            asset_name: asset.name().to_string(),
            asset_category: asset.category(),
            date,
            status,
        }
    }

    pub fn id(&self) -> &str                  { &self.id }
    pub fn asset_id(&self) -> AssetId         { self.asset_id }
    pub fn asset_name(&self) -> &str          { &self.asset_name }
    pub fn asset_category(&self) -> Category  { self.asset_category }
    pub fn date(&self) -> NaiveDate           { self.date }
    pub fn status(&self) -> Status            { self.status }
}


/// Tunables of [`project_events_with`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionOptions {
    /// Occurrences are generated up to `today + horizon_months`, inclusive
    pub horizon_months: u32,
    /// How many days ahead an occurrence is considered [`Status::Current`]
    pub due_soon_days: i64,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            horizon_months: DEFAULT_HORIZON_MONTHS,
            due_soon_days: CALENDAR_DUE_SOON_DAYS,
        }
    }
}

/// Expand the recurring schedule of every asset into calendar events, up to `today + horizon_months` (inclusive).
///
/// Each asset contributes its next maintenance date and every following occurrence, `interval` months apart.
/// Events are grouped by asset (in the order of `assets`), and sorted by date within an asset.
///
/// Assets without a next maintenance date are skipped. A single asset with a non-positive interval fails the whole projection.
pub fn project_events(assets: &[Asset], today: NaiveDate, horizon_months: u32) -> Result<Vec<MaintenanceEvent>, Error> {
    let options = ProjectionOptions { horizon_months, ..ProjectionOptions::default() };
    project_events_with(assets, today, &options)
}

/// Same as [`project_events`], with custom options
pub fn project_events_with(assets: &[Asset], today: NaiveDate, options: &ProjectionOptions) -> Result<Vec<MaintenanceEvent>, Error> {
    let horizon = i32::try_from(options.horizon_months)
        .map_err(|_| Error::DateOutOfRange { date: today, months: i32::MAX })?;
    let end = dates::add_months(today, horizon)?;
    let mut events = Vec::new();

    for asset in assets {
        let interval = asset.valid_interval()?;
        let anchor = match asset.next_maintenance() {
            Some(date) => date,
            None => {
                log::warn!("Asset {} ({}) has no next maintenance date. Skipping it", asset.id(), asset.name());
                continue;
            },
        };

        let before = events.len();
        for date in occurrences(anchor, interval, end) {
            let status = status::classify_due_date(date, today, options.due_soon_days);
            events.push(MaintenanceEvent::new(asset, date, status));
        }
        log::debug!("Asset {}: {} occurrence(s) until {}", asset.id(), events.len() - before, end);
    }

    Ok(events)
}

/// Dates from `anchor` on, each one `interval` months after the previous one, that are not after `end`.
///
/// Clamping to a month end carries over (Jan 31 -> Feb 29 -> Mar 29).
/// `interval` must be positive.
fn occurrences(anchor: NaiveDate, interval: i32, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(anchor), move |previous| dates::add_months(*previous, interval).ok())
        .take_while(move |date| *date <= end)
}

/// Events that fall on a given day
pub fn events_on(events: &[MaintenanceEvent], day: NaiveDate) -> Vec<&MaintenanceEvent> {
    events.iter()
        .filter(|event| event.date == day)
        .collect()
}

/// Events that fall in a given month (`month` is 1-based), sorted by date
pub fn events_in_month(events: &[MaintenanceEvent], year: i32, month: u32) -> Vec<&MaintenanceEvent> {
    let mut in_month: Vec<&MaintenanceEvent> = events.iter()
        .filter(|event| event.date.year() == year && event.date.month() == month)
        .collect();
    in_month.sort_by_key(|event| event.date);
    in_month
}

/// Every day of a month (`month` is 1-based). Empty for an invalid month
pub fn month_days(year: i32, month: u32) -> Vec<NaiveDate> {
    let first = match NaiveDate::from_ymd_opt(year, month, 1) {
        None => return Vec::new(),
        Some(first) => first,
    };
    first.iter_days()
        .take_while(|day| day.month() == month)
        .collect()
}
