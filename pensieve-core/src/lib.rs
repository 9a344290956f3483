//! Core logic for the Pensieve wizarding archive.
//!
//! This crate holds everything that can be exercised without a terminal:
//! - The read-only [`Catalog`] of houses and wizards, with validation
//! - The pure [`filter`] predicates driving the browse pages
//! - The derived [`timeline`] chronology
//! - [`card`] projections (grid cards, detail views, spoiler redaction)
//! - The tolerant [`PrefStore`] for persisted toggles
//!
//! The `pensieve` binary layers a ratatui front-end on top; nothing here
//! depends on it.

pub mod card;
pub mod catalog;
pub mod filter;
pub mod prefs;
pub mod timeline;

pub use card::{
    house_card, house_detail, wizard_card, wizard_detail, Card, DetailView, NO_HOUSES_MESSAGE,
    NO_WIZARDS_MESSAGE, SPOILER_PLACEHOLDER,
};
pub use catalog::{Catalog, CatalogError, EntityKind, EntityRef, House, SpoilerLevel, Wizard};
pub use filter::{matches_house, matches_wizard, FilterState};
pub use prefs::{PrefStore, SPOILERS_ENABLED, SPOILER_BANNER_DISMISSED};
pub use timeline::{derive_timeline, group_by_year, year_groups, TimelineEntry, YearGroup};
