//! Boundary set command handlers.

use anyhow::Result;
use boundaries_core::{BoundarySetUpdate, Hierarchy, MetadataFields};
use chrono::NaiveDate;

use super::print_json;
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the sets command: list every set.
pub async fn list(ctx: &CliContext) -> Result<()> {
    let entries = ctx.catalog().list_sets().await.map_err(CliError::from)?;
    if entries.is_empty() {
        eprintln!("No boundary sets loaded. Use 'boundaries load <file>' to add one.");
    }
    print_json(&entries)
}

/// Execute the set command: show one set.
pub async fn show(ctx: &CliContext, slug: &str) -> Result<()> {
    let detail = ctx.catalog().set_detail(slug).await.map_err(CliError::from)?;
    print_json(&detail)
}

/// Fields accepted by the update-set command.
#[derive(Debug, Default)]
pub struct SetChanges {
    pub name: Option<String>,
    pub singular: Option<String>,
    pub kind_first: Option<bool>,
    pub authority: Option<String>,
    pub domain: Option<String>,
    pub hierarchy: Option<String>,
    pub last_updated: Option<String>,
    pub href: Option<String>,
    pub notes: Option<String>,
    pub count: Option<i64>,
    pub metadata_fields: Option<String>,
}

impl SetChanges {
    /// Convert to a catalog update, parsing dates and codes.
    ///
    /// An empty value clears `hierarchy`, `href`, `notes` and
    /// `metadata_fields`.
    pub fn into_update(self) -> Result<BoundarySetUpdate, CliError> {
        let last_updated = self
            .last_updated
            .map(|date| {
                NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                    .map_err(|e| CliError::Arguments(format!("last-updated '{date}': {e}")))
            })
            .transpose()?;

        let hierarchy = self
            .hierarchy
            .map(|code| match code.trim() {
                "" => Ok(None),
                code => Hierarchy::from_code(&code.to_uppercase())
                    .map(Some)
                    .ok_or_else(|| {
                        CliError::Arguments(format!(
                            "hierarchy '{code}': expected one of F, P, M, O"
                        ))
                    }),
            })
            .transpose()?;

        Ok(BoundarySetUpdate {
            name: self.name,
            singular: self.singular,
            kind_first: self.kind_first,
            authority: self.authority,
            domain: self.domain,
            hierarchy,
            last_updated,
            href: self.href.map(non_empty),
            notes: self.notes.map(non_empty),
            count: self.count,
            metadata_fields: self
                .metadata_fields
                .map(|fields| MetadataFields::decode(fields.trim())),
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Execute the update-set command.
pub async fn update(ctx: &CliContext, slug: &str, changes: SetChanges) -> Result<()> {
    let update = changes.into_update()?;
    let set = ctx
        .catalog()
        .update_set(slug, update)
        .await
        .map_err(CliError::from)?;
    print_json(&set.as_detail(ctx.catalog().urls()))
}

/// Execute the delete-set command.
pub async fn delete(ctx: &CliContext, slug: &str) -> Result<()> {
    ctx.catalog().delete_set(slug).await.map_err(CliError::from)?;
    eprintln!("Deleted boundary set '{slug}' and its boundaries.");
    Ok(())
}

/// Execute the completeness command.
pub async fn completeness(ctx: &CliContext, slug: &str) -> Result<()> {
    let completeness = ctx
        .catalog()
        .set_completeness(slug)
        .await
        .map_err(CliError::from)?;

    print_json(&serde_json::json!({
        "slug": slug,
        "expected": completeness.expected,
        "loaded": completeness.loaded,
        "complete": completeness.is_complete(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changes_parse_date() {
        let update = SetChanges {
            last_updated: Some("2014-03-09".to_string()),
            ..SetChanges::default()
        }
        .into_update()
        .unwrap();
        assert_eq!(update.last_updated, NaiveDate::from_ymd_opt(2014, 3, 9));
    }

    #[test]
    fn test_changes_reject_bad_date() {
        let err = SetChanges {
            last_updated: Some("09/03/2014".to_string()),
            ..SetChanges::default()
        }
        .into_update()
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_empty_notes_clear() {
        let update = SetChanges {
            notes: Some(String::new()),
            ..SetChanges::default()
        }
        .into_update()
        .unwrap();
        assert_eq!(update.notes, Some(None));
        assert_eq!(update.name, None);
    }

    #[test]
    fn test_changes_parse_hierarchy_and_fields() {
        let update = SetChanges {
            hierarchy: Some("m".to_string()),
            metadata_fields: Some("WARD|ALDERMAN".to_string()),
            count: Some(50),
            ..SetChanges::default()
        }
        .into_update()
        .unwrap();
        assert_eq!(update.hierarchy, Some(Some(Hierarchy::Municipal)));
        assert_eq!(
            update.metadata_fields,
            Some(["WARD", "ALDERMAN"].into_iter().collect::<MetadataFields>())
        );
        assert_eq!(update.count, Some(50));
        assert_eq!(update.domain, None);
    }

    #[test]
    fn test_empty_values_clear_optional_fields() {
        let update = SetChanges {
            hierarchy: Some(String::new()),
            href: Some(String::new()),
            metadata_fields: Some(String::new()),
            ..SetChanges::default()
        }
        .into_update()
        .unwrap();
        assert_eq!(update.hierarchy, Some(None));
        assert_eq!(update.href, Some(None));
        assert_eq!(update.metadata_fields, Some(MetadataFields::default()));
    }

    #[test]
    fn test_changes_reject_unknown_hierarchy() {
        let err = SetChanges {
            hierarchy: Some("county".to_string()),
            ..SetChanges::default()
        }
        .into_update()
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
