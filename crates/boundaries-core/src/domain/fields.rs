//! Stored field encodings for boundary sets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

use super::validation::ValidationError;

/// Level of government a boundary set belongs to.
///
/// Stored as a single-letter code; the API shows the display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hierarchy {
    #[serde(rename = "F")]
    Federal,
    #[serde(rename = "P")]
    Provincial,
    #[serde(rename = "M")]
    Municipal,
    #[serde(rename = "O")]
    Other,
}

impl Hierarchy {
    /// All variants in display order.
    pub const ALL: [Self; 4] = [Self::Federal, Self::Provincial, Self::Municipal, Self::Other];

    /// Storage code (`F`, `P`, `M`, `O`).
    pub const fn code(self) -> &'static str {
        match self {
            Self::Federal => "F",
            Self::Provincial => "P",
            Self::Municipal => "M",
            Self::Other => "O",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Federal => "Federal",
            Self::Provincial => "Provincial",
            Self::Municipal => "Municipal",
            Self::Other => "Other",
        }
    }

    /// Parse a storage code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.code() == code)
    }

    /// Label for an optional hierarchy; unset displays as the empty string.
    pub fn display(hierarchy: Option<Self>) -> &'static str {
        hierarchy.map_or("", Self::label)
    }
}

impl fmt::Display for Hierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered names of the attribute-table fields loaded from the source data.
///
/// Persisted as a single pipe-delimited string (`"ID|NAME|AREA"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataFields(Vec<String>);

impl MetadataFields {
    pub const SEPARATOR: char = '|';

    pub fn new(fields: Vec<String>) -> Self {
        Self(fields)
    }

    /// Decode the stored representation. An empty string is an empty list.
    pub fn decode(stored: &str) -> Self {
        if stored.is_empty() {
            return Self::default();
        }
        Self(stored.split(Self::SEPARATOR).map(str::to_string).collect())
    }

    /// Encode for storage.
    pub fn encode(&self) -> String {
        self.0.join("|")
    }

    /// A field containing the separator would not survive a round trip.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.0.iter().find(|f| f.contains(Self::SEPARATOR)) {
            Some(bad) => Err(ValidationError::InvalidMetadataField(bad.clone())),
            None => Ok(()),
        }
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for MetadataFields {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for MetadataFields {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_codes_and_labels() {
        assert_eq!(Hierarchy::from_code("M"), Some(Hierarchy::Municipal));
        assert_eq!(Hierarchy::Municipal.label(), "Municipal");
        assert_eq!(Hierarchy::from_code("X"), None);
        assert_eq!(Hierarchy::display(None), "");
        assert_eq!(Hierarchy::display(Some(Hierarchy::Federal)), "Federal");
    }

    #[test]
    fn test_hierarchy_serializes_as_code() {
        let json = serde_json::to_string(&Hierarchy::Provincial).unwrap();
        assert_eq!(json, "\"P\"");
    }

    #[test]
    fn test_metadata_fields_storage() {
        let fields: MetadataFields = ["WARD", "ALDERMAN", "AREA"].into_iter().collect();
        assert_eq!(fields.encode(), "WARD|ALDERMAN|AREA");
        assert_eq!(MetadataFields::decode("WARD|ALDERMAN|AREA"), fields);
    }

    #[test]
    fn test_metadata_fields_empty() {
        assert!(MetadataFields::decode("").is_empty());
        assert_eq!(MetadataFields::default().encode(), "");
    }

    #[test]
    fn test_metadata_fields_reject_separator() {
        let fields: MetadataFields = ["OK", "A|B"].into_iter().collect();
        assert_eq!(
            fields.validate(),
            Err(ValidationError::InvalidMetadataField("A|B".to_string()))
        );
    }

    #[test]
    fn test_metadata_fields_serialize_as_list() {
        let fields: MetadataFields = ["ID", "NAME"].into_iter().collect();
        assert_eq!(serde_json::to_value(&fields).unwrap(), serde_json::json!(["ID", "NAME"]));
    }
}
