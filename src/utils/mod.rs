//! Some utility functions

pub mod comparison;
pub mod dates;

use chrono::NaiveDate;

use crate::asset::Asset;
use crate::dashboard::Dashboard;
use crate::schedule::MaintenanceEvent;
use crate::status::{self, Status};

fn status_mark(status: Status) -> &'static str {
    match status {
        Status::Overdue => "!",
        Status::Current => "~",
        Status::Upcoming => " ",
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%b %d, %Y").to_string(),
        None => "<no date>".to_string(),
    }
}

/// A debug utility that pretty-prints assets, with their status as of `today`
pub fn print_asset_list(assets: &[Asset], today: NaiveDate, due_soon_days: i64) {
    for asset in assets {
        let status = status::classify_with_window(asset, today, due_soon_days);
        println!("    {} {}\t[{}] every {} month(s), next {}\t#{}",
            status_mark(status), asset.name(), asset.category(), asset.interval_months(),
            format_date(asset.next_maintenance()), asset.id());
    }
}

/// A debug utility that pretty-prints calendar events
pub fn print_events(events: &[MaintenanceEvent]) {
    for event in events {
        println!("    {} {}\t{} ({})",
            status_mark(event.status()), format_date(Some(event.date())), event.asset_name(), event.asset_category());
    }
}

/// A debug utility that pretty-prints a dashboard
pub fn print_dashboard(dashboard: &Dashboard) {
    println!("{} asset(s) as of {}", dashboard.total_assets(), format_date(Some(dashboard.today())));

    println!("Overdue & due today ({}):", dashboard.overdue().len());
    for task in dashboard.overdue() {
        let delay = match task.days_overdue {
            0 => "Due today".to_string(),
            n => format!("{} days overdue", n),
        };
        println!("    ! {}\t{}\t(due {})", task.asset.name(), delay, format_date(Some(task.due_date)));
    }

    println!("Upcoming in the next {} days ({}):", dashboard.timeframe().days(), dashboard.upcoming().len());
    for task in dashboard.upcoming() {
        let when = match task.days_until {
            1 => "Due tomorrow".to_string(),
            n => format!("Due in {} days", n),
        };
        println!("    {:?}\t{}\t{}", task.priority, task.asset.name(), when);
    }

    println!("Recent completions ({}):", dashboard.recent_completions().len());
    for completion in dashboard.recent_completions() {
        println!("    ✓ {}\t{}", format_date(Some(completion.date)), completion.asset_name);
    }
}
