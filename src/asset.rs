//! Maintained assets

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use chrono::NaiveDate;

use crate::error::Error;
use crate::utils::dates;

/// Shortest interval an asset can be created with, in months
pub const MIN_INTERVAL_MONTHS: i32 = 1;
/// Longest interval an asset can be created with, in months
pub const MAX_INTERVAL_MONTHS: i32 = 120;


/// The identifier of an asset. It is assigned by the server and stays stable across updates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(i64);

impl From<i64> for AssetId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
impl AssetId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}
impl Display for AssetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}


/// The kind of an asset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Hvac,
    Safety,
    Vehicle,
    Appliances,
    Plumbing,
    Electrical,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Hvac, Category::Safety, Category::Vehicle, Category::Appliances,
        Category::Plumbing, Category::Electrical, Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hvac => "HVAC",
            Category::Safety => "Safety",
            Category::Vehicle => "Vehicle",
            Category::Appliances => "Appliances",
            Category::Plumbing => "Plumbing",
            Category::Electrical => "Electrical",
            Category::Other => "Other",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter()
            .find(|cat| cat.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("Unknown category {:?}", s))
    }
}

/// Used to support serde
impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
/// Used to support serde.
/// Categories this crate does not know (including empty ones) are read as [`Category::Other`]
impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Category, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        match raw.parse() {
            Ok(cat) => Ok(cat),
            Err(err) => {
                if raw.is_empty() == false {
                    log::debug!("{}. Using {}", err, Category::Other);
                }
                Ok(Category::Other)
            },
        }
    }
}


/// One entry of the maintenance history of an asset
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the maintenance happened (or was planned)
    #[serde(default, deserialize_with = "dates::deserialize_lenient")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub completed: bool,
}


/// A maintained item, with its maintenance cadence.
///
/// This is the shape the REST API serves. Dates that are missing or malformed on the server are `None` here,
/// and each computation decides how to degrade (see [`crate::status`] and [`crate::tasks`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    id: AssetId,
    name: String,
    #[serde(default)]
    category: Category,
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    description: String,

    /// Months between two maintenances. The server may send invalid (non-positive) values,
    /// which is why this is not a `u32`
    #[serde(rename = "interval")]
    interval_months: i32,

    #[serde(default, deserialize_with = "dates::deserialize_lenient")]
    last_maintenance: Option<NaiveDate>,
    #[serde(default, deserialize_with = "dates::deserialize_lenient")]
    next_maintenance: Option<NaiveDate>,

    /// Not every server fills this in, in which case it is empty
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "deserialize_null_as_default")]
    maintenance_history: Vec<HistoryEntry>,
}

/// Servers send `null` for optional fields they do not fill in. Read these as the default value
fn deserialize_null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Asset {
    /// Create an asset instance, typically to mirror one that exists on the server already
    pub fn new(id: AssetId, name: String, category: Category, interval_months: i32,
               last_maintenance: Option<NaiveDate>, next_maintenance: Option<NaiveDate>) -> Self
    {
        Self {
            id,
            name,
            category,
            description: String::new(),
            interval_months,
            last_maintenance,
            next_maintenance,
            maintenance_history: Vec::new(),
        }
    }

    /// Build the asset the server creates out of a draft
    pub fn from_draft(id: AssetId, draft: AssetDraft) -> Result<Self, Error> {
        draft.validate()?;
        let next_maintenance = draft.next_maintenance()?;
        Ok(Self {
            id,
            name: draft.name,
            category: draft.category,
            description: draft.description,
            interval_months: draft.interval,
            last_maintenance: Some(draft.last_maintenance),
            next_maintenance: Some(next_maintenance),
            maintenance_history: Vec::new(),
        })
    }

    pub fn id(&self) -> AssetId                       { self.id }
    pub fn name(&self) -> &str                        { &self.name }
    pub fn category(&self) -> Category                { self.category }
    pub fn description(&self) -> &str                 { &self.description }
    pub fn interval_months(&self) -> i32              { self.interval_months }
    pub fn last_maintenance(&self) -> Option<NaiveDate> { self.last_maintenance }
    pub fn next_maintenance(&self) -> Option<NaiveDate> { self.next_maintenance }
    pub fn maintenance_history(&self) -> &[HistoryEntry] { &self.maintenance_history }

    /// The recurrence interval, provided it can drive a schedule
    pub fn valid_interval(&self) -> Result<i32, Error> {
        if self.interval_months < MIN_INTERVAL_MONTHS {
            return Err(Error::InvalidInterval { asset_id: self.id, interval: self.interval_months });
        }
        Ok(self.interval_months)
    }

    /// The next due date, or an error if the server did not provide a usable one
    pub fn due_date(&self) -> Result<NaiveDate, Error> {
        self.next_maintenance
            .ok_or(Error::MissingRequiredField { asset_id: self.id, field: "nextMaintenance" })
    }

    /// The next due date as it should be, i.e. the last maintenance plus the interval.
    ///
    /// Servers may store a `nextMaintenance` that disagrees with this.
    pub fn expected_next_maintenance(&self) -> Result<NaiveDate, Error> {
        let last = self.last_maintenance
            .ok_or(Error::MissingRequiredField { asset_id: self.id, field: "lastMaintenance" })?;
        dates::add_months(last, self.valid_interval()?)
    }

    pub fn set_description(&mut self, description: String) {
        self.description = description;
    }

    pub fn set_maintenance_dates(&mut self, last: NaiveDate, next: NaiveDate) {
        self.last_maintenance = Some(last);
        self.next_maintenance = Some(next);
    }

    pub fn add_history_entry(&mut self, entry: HistoryEntry) {
        self.maintenance_history.push(entry);
    }

    /// Overwrite the user-editable fields with the ones of a draft
    pub fn apply_draft(&mut self, draft: AssetDraft) -> Result<(), Error> {
        let updated = Self::from_draft(self.id, draft)?;
        self.name = updated.name;
        self.category = updated.category;
        self.description = updated.description;
        self.interval_months = updated.interval_months;
        self.last_maintenance = updated.last_maintenance;
        self.next_maintenance = updated.next_maintenance;
        Ok(())
    }
}


/// What a user fills in to create or edit an asset
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDraft {
    pub name: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub description: String,
    pub interval: i32,
    pub last_maintenance: NaiveDate,
}

impl AssetDraft {
    pub fn new(name: String, category: Category, interval: i32, last_maintenance: NaiveDate) -> Self {
        Self { name, category, description: String::new(), interval, last_maintenance }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidDraft("name must not be empty".to_string()));
        }
        if self.interval < MIN_INTERVAL_MONTHS || self.interval > MAX_INTERVAL_MONTHS {
            return Err(Error::InvalidDraft(format!(
                "interval must be between {} and {} months, got {}",
                MIN_INTERVAL_MONTHS, MAX_INTERVAL_MONTHS, self.interval)));
        }
        Ok(())
    }

    pub fn next_maintenance(&self) -> Result<NaiveDate, Error> {
        dates::add_months(self.last_maintenance, self.interval)
    }

    /// The body of a create (`POST`) or edit (`PUT`) request
    pub fn into_payload(self) -> Result<AssetPayload, Error> {
        self.validate()?;
        let next_maintenance = self.next_maintenance()?;
        Ok(AssetPayload { draft: self, next_maintenance })
    }
}

/// A validated [`AssetDraft`], along with its computed next due date
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPayload {
    #[serde(flatten)]
    draft: AssetDraft,
    next_maintenance: NaiveDate,
}

impl AssetPayload {
    pub fn draft(&self) -> &AssetDraft { &self.draft }
    pub fn next_maintenance(&self) -> NaiveDate { self.next_maintenance }
}
