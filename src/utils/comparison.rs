//! Utilities to compare custom types
//!
//! These can be used to sort results, e.g. with `slice::sort_by`

use std::cmp::Ordering;

use crate::asset::Asset;

/// Compare assets alphabetically, ignoring case
pub fn compare_assets_alpha(left: &Asset, right: &Asset) -> Ordering {
    Ord::cmp(&left.name().to_lowercase(), &right.name().to_lowercase())
}

/// Compare assets by next due date. Assets without a due date come last
pub fn compare_assets_by_due_date(left: &Asset, right: &Asset) -> Ordering {
    match (left.next_maintenance(), right.next_maintenance()) {
        (Some(l), Some(r)) => l.cmp(&r),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use crate::asset::{AssetId, Category};

    fn asset(id: i64, name: &str, next: Option<NaiveDate>) -> Asset {
        Asset::new(AssetId::from(id), name.to_string(), Category::Other, 1, None, next)
    }

    #[test]
    fn test_sorting() {
        let mut assets = vec![
            asset(1, "water heater", None),
            asset(2, "Car", NaiveDate::from_ymd_opt(2024, 5, 1)),
            asset(3, "bike", NaiveDate::from_ymd_opt(2024, 3, 1)),
        ];

        assets.sort_by(compare_assets_alpha);
        let names: Vec<&str> = assets.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["bike", "Car", "water heater"]);

        assets.sort_by(compare_assets_by_due_date);
        let ids: Vec<i64> = assets.iter().map(|a| a.id().as_i64()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
