//! Recording that a maintenance has been done

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

use crate::asset::Asset;
use crate::error::Error;
use crate::utils::dates;

/// The partial update that is sent to the server when a maintenance is marked as done
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionUpdate {
    pub last_maintenance: NaiveDate,
    pub next_maintenance: NaiveDate,
}

impl CompletionUpdate {
    /// The update that marks `asset` as maintained on `today`
    pub fn for_asset(asset: &Asset, today: NaiveDate) -> Result<Self, Error> {
        let interval = asset.valid_interval()?;
        Ok(Self {
            last_maintenance: today,
            next_maintenance: dates::add_months(today, interval)?,
        })
    }

    /// Apply this update to a local copy of an asset
    pub fn apply_to(&self, asset: &mut Asset) {
        asset.set_maintenance_dates(self.last_maintenance, self.next_maintenance);
    }
}

/// Mark an asset as maintained on `today`: the next maintenance is due `interval` months from today.
///
/// This does not touch the maintenance history, which the server is in charge of.
/// Marking the same asset twice on the same day yields the same dates.
pub fn mark_complete(asset: &Asset, today: NaiveDate) -> Result<Asset, Error> {
    let update = CompletionUpdate::for_asset(asset, today)?;
    let mut completed = asset.clone();
    update.apply_to(&mut completed);
    Ok(completed)
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::asset::{AssetId, Category, HistoryEntry};
    use crate::status::{self, Status};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn filter(interval: i32) -> Asset {
        Asset::new(AssetId::from(4), "Furnace filter".to_string(), Category::Hvac, interval,
                   Some(ymd(2024, 1, 2)), Some(ymd(2024, 4, 2)))
    }

    #[test]
    fn test_mark_complete() {
        let today = ymd(2024, 6, 1);
        let asset = filter(3);
        assert_eq!(status::classify(&asset, today), Status::Overdue);

        let done = mark_complete(&asset, today).unwrap();
        assert_eq!(done.last_maintenance(), Some(ymd(2024, 6, 1)));
        assert_eq!(done.next_maintenance(), Some(ymd(2024, 9, 1)));
        assert_eq!(done.id(), asset.id());
        assert_eq!(done.name(), asset.name());
        assert_eq!(status::classify(&done, today), Status::Upcoming);

        // The original value is left untouched
        assert_eq!(asset.next_maintenance(), Some(ymd(2024, 4, 2)));

        let twice = mark_complete(&done, today).unwrap();
        assert_eq!(twice, done);
    }

    #[test]
    fn test_history_is_untouched() {
        let mut asset = filter(3);
        asset.add_history_entry(HistoryEntry { date: Some(ymd(2024, 1, 2)), completed: true });
        let done = mark_complete(&asset, ymd(2024, 6, 1)).unwrap();
        assert_eq!(done.maintenance_history(), asset.maintenance_history());
    }

    #[test]
    fn test_mark_complete_invalid_interval() {
        assert_eq!(mark_complete(&filter(0), ymd(2024, 6, 1)),
                   Err(Error::InvalidInterval { asset_id: AssetId::from(4), interval: 0 }));
    }

    #[test]
    fn test_completion_update_body() {
        let update = CompletionUpdate::for_asset(&filter(12), ymd(2024, 2, 29)).unwrap();
        let body = serde_json::to_string(&update).unwrap();
        assert_eq!(body, r#"{"lastMaintenance":"2024-02-29","nextMaintenance":"2025-02-28"}"#);
    }
}
