//! DineRoute record normalizer
//!
//! Turns raw restaurant records into display text plus scalar metadata

mod document;
mod loader;
mod metadata;
mod record;

pub use document::{to_document, NormalizedDocument, NOT_AVAILABLE};
pub use loader::{load_records, parse_records};
pub use metadata::{clean_metadata_value, Metadata, MetadataValue, METADATA_FIELDS};
pub use record::{Field, MetadataDefault, RawRecord, TextDefault};
