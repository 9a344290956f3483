//! Derived chronology.
//!
//! The timeline is not stored in the catalog; it is flat-mapped out of the
//! embedded moments on each house and wizard, annotated with its source,
//! sorted ascending by year, and grouped by exact year for display.

use serde::{Deserialize, Serialize};

use crate::card::SPOILER_PLACEHOLDER;
use crate::catalog::{Catalog, EntityKind, SpoilerLevel};

/// One derived timeline entry, tagged with its owning entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Stable id, composed from the source kind, owner id, and year.
    pub id: String,
    pub year: i32,
    pub title: String,
    pub summary: String,
    pub details: Option<String>,
    /// Which entity family the entry came from.
    pub kind: EntityKind,
    /// Id of the owning house or wizard.
    pub target_id: String,
    /// Inherited from the owning wizard; house entries are always low.
    pub spoiler_level: SpoilerLevel,
}

impl TimelineEntry {
    /// The summary with the spoiler rule applied. Redaction covers only
    /// this field, never the title or metadata.
    pub fn display_summary(&self, show_spoilers: bool) -> &str {
        if self.spoiler_level.is_high() && !show_spoilers {
            SPOILER_PLACEHOLDER
        } else {
            &self.summary
        }
    }
}

/// Entries sharing one exact year.
#[derive(Debug, Clone)]
pub struct YearGroup {
    pub year: i32,
    pub entries: Vec<TimelineEntry>,
}

/// Flat-map every entity's embedded moments into one ascending sequence.
///
/// The sort is stable, so entries within a year keep catalog order
/// (houses first, then wizards).
pub fn derive_timeline(catalog: &Catalog) -> Vec<TimelineEntry> {
    let mut entries: Vec<TimelineEntry> = Vec::new();

    for house in catalog.houses() {
        for moment in &house.timeline {
            entries.push(TimelineEntry {
                id: format!("house-{}-{}", house.id, moment.year),
                year: moment.year,
                title: moment.title.clone(),
                summary: moment.summary.clone(),
                details: moment.details.clone(),
                kind: EntityKind::House,
                target_id: house.id.clone(),
                spoiler_level: SpoilerLevel::Low,
            });
        }
    }

    for wizard in catalog.wizards() {
        for moment in &wizard.timeline {
            entries.push(TimelineEntry {
                id: format!("wizard-{}-{}", wizard.id, moment.year),
                year: moment.year,
                title: moment.title.clone(),
                summary: moment.summary.clone(),
                details: moment.details.clone(),
                kind: EntityKind::Wizard,
                target_id: wizard.id.clone(),
                spoiler_level: wizard.spoiler_level,
            });
        }
    }

    entries.sort_by_key(|e| e.year);
    entries
}

/// Group an already-sorted sequence by exact year equality.
pub fn group_by_year(entries: Vec<TimelineEntry>) -> Vec<YearGroup> {
    let mut groups: Vec<YearGroup> = Vec::new();
    for entry in entries {
        match groups.last_mut() {
            Some(group) if group.year == entry.year => group.entries.push(entry),
            _ => groups.push(YearGroup {
                year: entry.year,
                entries: vec![entry],
            }),
        }
    }
    groups
}

/// Derive and group in one step.
pub fn year_groups(catalog: &Catalog) -> Vec<YearGroup> {
    group_by_year(derive_timeline(catalog))
}
