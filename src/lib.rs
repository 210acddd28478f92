//! This crate keeps track of recurring maintenance (furnace filters, smoke detectors, car services...).
//!
//! Its core is a set of pure functions over [`Asset`]s and a reference day:
//! * [`status`] tells whether the maintenance of an asset is overdue, due soon or upcoming,
//! * [`schedule`] projects recurring maintenances into calendar events,
//! * [`tasks`] splits assets into overdue and upcoming tasks, and lists past completions
//!   ([`Dashboard`] does all of that in one pass),
//! * [`completion`] records that a maintenance has been done.
//!
//! Assets are stored on a remote REST API. The [`client`] module talks to it, and the [`cache`] module keeps a local copy.
//! Both implement [`traits::AssetSource`].

pub mod traits;

mod error;
pub use error::Error;
pub mod asset;
pub use asset::{Asset, AssetId, Category};
pub mod status;
pub use status::Status;
pub mod schedule;
pub use schedule::MaintenanceEvent;
pub mod tasks;
pub mod completion;
pub use completion::mark_complete;
pub mod dashboard;
pub use dashboard::Dashboard;

pub mod client;
pub mod cache;

pub mod settings;
pub mod utils;
