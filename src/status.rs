//! Urgency of a maintenance
//!
//! A [`Status`] is always derived from a due date and a reference day, it is never stored.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, TimeZone};

use crate::asset::Asset;
use crate::utils::dates;

/// How many days ahead an asset counts as "due soon" on asset cards
pub const ASSET_DUE_SOON_DAYS: i64 = 30;
/// How many days ahead a calendar event counts as "due soon".
/// The calendar is finer-grained than asset cards, hence a tighter window
pub const CALENDAR_DUE_SOON_DAYS: i64 = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The due date has passed
    Overdue,
    /// Due soon (or today)
    Current,
    /// Due later, or no usable due date
    Upcoming,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Overdue => "overdue",
            Status::Current => "current",
            Status::Upcoming => "upcoming",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a due date against `today`, `window_days` being how far ahead "due soon" goes (inclusive)
pub fn classify_due_date(due: NaiveDate, today: NaiveDate, window_days: i64) -> Status {
    if due < today {
        Status::Overdue
    } else if dates::days_between(today, due) <= window_days {
        Status::Current
    } else {
        Status::Upcoming
    }
}

/// The status of an asset, as shown on asset cards.
///
/// Assets without a usable next maintenance date are [`Status::Upcoming`].
pub fn classify(asset: &Asset, today: NaiveDate) -> Status {
    classify_with_window(asset, today, ASSET_DUE_SOON_DAYS)
}

/// Same as [`classify`], with a custom "due soon" window
pub fn classify_with_window(asset: &Asset, today: NaiveDate, window_days: i64) -> Status {
    match asset.next_maintenance() {
        None => {
            log::debug!("Asset {} has no next maintenance date, considering it upcoming", asset.id());
            Status::Upcoming
        },
        Some(due) => classify_due_date(due, today, window_days),
    }
}

/// Same as [`classify`], for a timepoint rather than a date. Only its calendar date is taken into account
pub fn classify_at<Tz: TimeZone>(asset: &Asset, now: &DateTime<Tz>) -> Status {
    classify(asset, dates::date_of(now))
}
