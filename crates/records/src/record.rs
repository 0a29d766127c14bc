use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One restaurant object from the dataset, with an open schema
///
/// Any key may be missing; values keep whatever JSON type the source used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// Wrap an already parsed JSON object
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Look up a known field. JSON `null` counts as absent.
    pub fn get(&self, field: Field) -> Option<&Value> {
        self.0.get(field.key()).filter(|v| !v.is_null())
    }

    /// Whether the source object has the key at all, even with a `null` value
    pub fn has_key(&self, field: Field) -> bool {
        self.0.contains_key(field.key())
    }
}

/// Fields of a restaurant record the normalizer knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Category,
    Address,
    Rating,
    ReviewsCount,
    OpenHours,
    OpenHoursUpdated,
    PhoneNumber,
    Website,
    PriceRange,
    Services,
    Latitude,
    Longitude,
}

/// What the display text shows when a field is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDefault {
    /// Literal `N/A`
    NotAvailable,
    /// Literal `0`
    Zero,
    /// Nothing at all (used by sections that disappear when empty)
    Omitted,
}

/// What metadata stores when a field is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataDefault {
    /// Empty string, the cleaning rule for a missing value
    Empty,
    /// Number zero when the key is absent; an explicit `null` still cleans to empty
    Zero,
}

impl Field {
    /// Key used in the source dataset
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Category => "category",
            Self::Address => "address",
            Self::Rating => "rating",
            Self::ReviewsCount => "reviews_count",
            Self::OpenHours => "open_hours",
            Self::OpenHoursUpdated => "open_hours_updated",
            Self::PhoneNumber => "phone_number",
            Self::Website => "open_website",
            Self::PriceRange => "price_range",
            Self::Services => "services_provided",
            Self::Latitude => "lat",
            Self::Longitude => "lon",
        }
    }

    /// Default rendered in the display text
    pub const fn text_default(self) -> TextDefault {
        match self {
            Self::ReviewsCount => TextDefault::Zero,
            Self::OpenHours => TextDefault::Omitted,
            _ => TextDefault::NotAvailable,
        }
    }

    /// Default stored in metadata
    pub const fn metadata_default(self) -> MetadataDefault {
        match self {
            Self::Rating | Self::ReviewsCount => MetadataDefault::Zero,
            _ => MetadataDefault::Empty,
        }
    }
}
