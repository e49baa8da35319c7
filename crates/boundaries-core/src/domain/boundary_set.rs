//! Boundary set domain types.
//!
//! A boundary set is a named category of boundaries sharing provenance,
//! e.g. all wards of one city. Its slug is the primary key.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fields::{Hierarchy, MetadataFields};
use super::validation::{
    MAX_AUTHORITY_LEN, MAX_DOMAIN_LEN, MAX_SET_NAME_LEN, MAX_SINGULAR_LEN, MAX_SLUG_LEN,
    ValidationError, required_text, valid_slug,
};
use crate::contracts::api::{BoundarySetDetail, BoundarySetListEntry};
use crate::ports::{Route, UrlResolver};
use crate::utils::slug::slug_or_derive;

/// A persisted boundary set.
///
/// Use `NewBoundarySet` for sets that haven't been saved yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundarySet {
    /// URL-safe identifier; never changes after creation.
    pub slug: String,
    /// Category of boundaries, e.g. "Community Areas". Unique.
    pub name: String,
    /// Name of a single boundary, e.g. "Community Area".
    pub singular: String,
    /// Whether display names read "<kind> <name>" rather than "<name> <kind>".
    pub kind_first: bool,
    /// Entity responsible for the data's accuracy, e.g. "City of Chicago".
    pub authority: String,
    /// Area the set covers, e.g. "Chicago".
    pub domain: String,
    pub hierarchy: Option<Hierarchy>,
    /// Last time the data was refreshed from its authority.
    pub last_updated: NaiveDate,
    /// Where the source data was found.
    pub href: Option<String>,
    /// Loading notes, including any transformations applied.
    pub notes: Option<String>,
    /// Total number of features in the source data.
    pub count: i64,
    /// Attribute-table fields loaded from the source data, in source order.
    pub metadata_fields: MetadataFields,
}

impl BoundarySet {
    /// Compose the display name of a member boundary.
    ///
    /// ```rust
    /// # use boundaries_core::NewBoundarySet;
    /// # use chrono::NaiveDate;
    /// let date = NaiveDate::from_ymd_opt(2012, 1, 1).unwrap();
    /// let areas = NewBoundarySet::new("Community Areas", "Community Area", true, "City of Chicago", "Chicago", date, 77)
    ///     .into_set()
    ///     .unwrap();
    /// assert_eq!(areas.display_name_for("Austin"), "Community Area Austin");
    ///
    /// let precincts = NewBoundarySet::new("Police Precincts", "Precinct", false, "NYPD", "New York", date, 77)
    ///     .into_set()
    ///     .unwrap();
    /// assert_eq!(precincts.display_name_for("43rd"), "43rd Precinct");
    /// ```
    pub fn display_name_for(&self, boundary_name: &str) -> String {
        if self.kind_first {
            format!("{} {}", self.singular, boundary_name)
        } else {
            format!("{} {}", boundary_name, self.singular)
        }
    }

    /// Human-readable hierarchy label ("" when unset).
    pub fn hierarchy_display(&self) -> &'static str {
        Hierarchy::display(self.hierarchy)
    }

    /// Apply a partial update. The slug is not part of an update.
    pub fn apply(&mut self, update: BoundarySetUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(singular) = update.singular {
            self.singular = singular;
        }
        if let Some(kind_first) = update.kind_first {
            self.kind_first = kind_first;
        }
        if let Some(authority) = update.authority {
            self.authority = authority;
        }
        if let Some(domain) = update.domain {
            self.domain = domain;
        }
        if let Some(hierarchy) = update.hierarchy {
            self.hierarchy = hierarchy;
        }
        if let Some(last_updated) = update.last_updated {
            self.last_updated = last_updated;
        }
        if let Some(href) = update.href {
            self.href = href;
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
        if let Some(count) = update.count {
            self.count = count;
        }
        if let Some(fields) = update.metadata_fields {
            self.metadata_fields = fields;
        }
    }

    /// Whether boundaries of this set would need their denormalized names
    /// rewritten to match `other`.
    pub fn member_names_differ(&self, other: &Self) -> bool {
        self.name != other.name
            || self.singular != other.singular
            || self.kind_first != other.kind_first
    }

    /// Validate every field of a persisted set.
    pub fn validate(&self) -> Result<(), ValidationError> {
        required_text("slug", &self.slug, MAX_SLUG_LEN)?;
        valid_slug(&self.slug)?;
        validate_fields(
            &self.name,
            &self.singular,
            &self.authority,
            &self.domain,
            self.count,
            &self.metadata_fields,
        )
    }

    /// Single-set API projection.
    pub fn as_detail(&self, urls: &dyn UrlResolver) -> BoundarySetDetail {
        BoundarySetDetail {
            boundaries_url: urls.reverse(&Route::BoundaryList {
                set_slug: &self.slug,
            }),
            name: self.name.clone(),
            singular: self.singular.clone(),
            authority: self.authority.clone(),
            domain: self.domain.clone(),
            href: self.href.clone(),
            notes: self.notes.clone(),
            count: self.count,
            metadata_fields: self.metadata_fields.to_vec(),
        }
    }

    /// Listing API projection: light entries without the per-set heavy fields.
    pub fn list_entries<'a, I>(sets: I, urls: &dyn UrlResolver) -> Vec<BoundarySetListEntry>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        sets.into_iter()
            .map(|s| BoundarySetListEntry {
                url: urls.reverse(&Route::SetDetail { slug: &s.slug }),
                boundaries_url: urls.reverse(&Route::BoundaryList { set_slug: &s.slug }),
                boundaries_count: s.count,
                name: s.name.clone(),
                domain: s.domain.clone(),
                hierarchy: s.hierarchy_display().to_string(),
            })
            .collect()
    }
}

/// A boundary set that hasn't been persisted yet.
///
/// `slug` may be left empty; it is derived from `name` on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBoundarySet {
    #[serde(default)]
    pub slug: Option<String>,
    pub name: String,
    pub singular: String,
    pub kind_first: bool,
    pub authority: String,
    pub domain: String,
    #[serde(default)]
    pub hierarchy: Option<Hierarchy>,
    pub last_updated: NaiveDate,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub count: i64,
    #[serde(default)]
    pub metadata_fields: MetadataFields,
}

impl NewBoundarySet {
    /// Create a set from the fields every loader must supply.
    pub fn new(
        name: impl Into<String>,
        singular: impl Into<String>,
        kind_first: bool,
        authority: impl Into<String>,
        domain: impl Into<String>,
        last_updated: NaiveDate,
        count: i64,
    ) -> Self {
        Self {
            slug: None,
            name: name.into(),
            singular: singular.into(),
            kind_first,
            authority: authority.into(),
            domain: domain.into(),
            hierarchy: None,
            last_updated,
            href: None,
            notes: None,
            count,
            metadata_fields: MetadataFields::default(),
        }
    }

    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    #[must_use]
    pub fn with_hierarchy(mut self, hierarchy: Hierarchy) -> Self {
        self.hierarchy = Some(hierarchy);
        self
    }

    #[must_use]
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn with_metadata_fields(mut self, fields: MetadataFields) -> Self {
        self.metadata_fields = fields;
        self
    }

    /// The slug this set will be saved under.
    pub fn resolved_slug(&self) -> String {
        slug_or_derive(self.slug.as_deref(), &self.name)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            &self.name,
            &self.singular,
            &self.authority,
            &self.domain,
            self.count,
            &self.metadata_fields,
        )?;
        let slug = self.resolved_slug();
        if slug.is_empty() {
            return Err(ValidationError::EmptySlug(self.name.clone()));
        }
        valid_slug(&slug)
    }

    /// Validate and resolve the slug, producing the record to persist.
    pub fn into_set(self) -> Result<BoundarySet, ValidationError> {
        self.validate()?;
        Ok(BoundarySet {
            slug: self.resolved_slug(),
            name: self.name,
            singular: self.singular,
            kind_first: self.kind_first,
            authority: self.authority,
            domain: self.domain,
            hierarchy: self.hierarchy,
            last_updated: self.last_updated,
            href: self.href,
            notes: self.notes,
            count: self.count,
            metadata_fields: self.metadata_fields,
        })
    }
}

/// Partial boundary set update.
///
/// Each field is `Option<T>` (or `Option<Option<T>>` for nullable columns):
/// - `None` = don't change this field
/// - `Some(None)` = clear the field
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoundarySetUpdate {
    pub name: Option<String>,
    pub singular: Option<String>,
    pub kind_first: Option<bool>,
    pub authority: Option<String>,
    pub domain: Option<String>,
    pub hierarchy: Option<Option<Hierarchy>>,
    pub last_updated: Option<NaiveDate>,
    pub href: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub count: Option<i64>,
    pub metadata_fields: Option<MetadataFields>,
}

fn validate_fields(
    name: &str,
    singular: &str,
    authority: &str,
    domain: &str,
    count: i64,
    metadata_fields: &MetadataFields,
) -> Result<(), ValidationError> {
    required_text("name", name, MAX_SET_NAME_LEN)?;
    required_text("singular", singular, MAX_SINGULAR_LEN)?;
    required_text("authority", authority, MAX_AUTHORITY_LEN)?;
    required_text("domain", domain, MAX_DOMAIN_LEN)?;
    if count < 0 {
        return Err(ValidationError::NegativeCount(count));
    }
    metadata_fields.validate()
}
