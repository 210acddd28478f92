//! Errors of the scheduling core
//!
//! I/O code (the [`client`](crate::client), the [`cache`](crate::cache)...) keeps returning `Box<dyn Error>`,
//! these are only the errors that date computations can raise.

use crate::asset::AssetId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Recurrence intervals must be at least one month
    #[error("invalid maintenance interval for asset {asset_id}: {interval} months")]
    InvalidInterval { asset_id: AssetId, interval: i32 },

    #[error("unable to parse date {0:?}")]
    UnparseableDate(String),

    #[error("asset {asset_id} has no {field}")]
    MissingRequiredField { asset_id: AssetId, field: &'static str },

    /// Month arithmetic went past what chrono can represent
    #[error("date out of range: {date} + {months} months")]
    DateOutOfRange { date: chrono::NaiveDate, months: i32 },

    #[error("invalid asset: {0}")]
    InvalidDraft(String),
}
