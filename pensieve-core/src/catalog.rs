//! The wizarding-archive catalog.
//!
//! Contains the read-only entity records (houses and wizards), the
//! `Catalog` container with typed by-id lookup, and construction-time
//! validation of the dataset invariants.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How sensitive an entity's summary is to late-story revelations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpoilerLevel {
    Low,
    High,
}

impl SpoilerLevel {
    pub fn is_high(&self) -> bool {
        matches!(self, SpoilerLevel::High)
    }
}

/// Discriminates the two entity families for lookup and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    House,
    Wizard,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::House => "house",
            EntityKind::Wizard => "wizard",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An embedded timeline moment on a house or wizard record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Moment {
    /// Year the moment belongs to.
    pub year: i32,
    /// Short heading shown on the timeline.
    pub title: String,
    /// One-paragraph description.
    pub summary: String,
    /// Optional longer text.
    #[serde(default)]
    pub details: Option<String>,
}

/// One of the four founding houses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct House {
    /// Unique id, e.g. `gryffindor`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Founder's full name.
    pub founder: String,
    /// House mascot animal.
    pub mascot: String,
    /// Ordered house colors, primary first.
    pub colors: Vec<String>,
    /// Hallmark traits, order-preserving and non-empty.
    pub traits: Vec<String>,
    /// Signature relic.
    pub relic: String,
    /// Resident ghost.
    pub ghost: String,
    /// Free-text description.
    pub summary: String,
    /// Crest image reference.
    pub img: String,
    /// Founding year.
    pub established: i32,
    /// Embedded timeline moments, may be absent.
    #[serde(default)]
    pub timeline: Vec<Moment>,
}

/// A notable wizard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wizard {
    /// Unique id, e.g. `harry-potter`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// House reference. Accepted loosely (house id or display name) and
    /// canonicalized to the display name during catalog construction.
    pub house: String,
    /// Enrollment years, ordered and non-empty.
    pub years: Vec<i32>,
    /// Known aliases, may be empty.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Free-text description. The only field subject to spoiler redaction.
    pub summary: String,
    /// Notable events, always visible.
    pub notable_events: Vec<String>,
    /// Portrait image reference.
    pub img: String,
    /// Sensitivity of the summary field.
    pub spoiler_level: SpoilerLevel,
    /// Embedded timeline moments, may be absent.
    #[serde(default)]
    pub timeline: Vec<Moment>,
}

/// Errors detected while constructing a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: EntityKind, id: String },

    #[error("house {id} has no traits")]
    EmptyTraits { id: String },

    #[error("wizard {id} has no enrollment years")]
    EmptyYears { id: String },

    #[error("wizard {wizard} references unknown house {house}")]
    UnknownHouse { wizard: String, house: String },
}

/// A resolved entity, tagged by kind.
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    House(&'a House),
    Wizard(&'a Wizard),
}

#[derive(Deserialize)]
struct RawCatalog {
    houses: Vec<House>,
    wizards: Vec<Wizard>,
}

/// The immutable catalog: all houses and wizards plus id indexes.
///
/// Loaded once at startup and shared read-only for the process lifetime.
#[derive(Debug, Clone)]
pub struct Catalog {
    houses: Vec<House>,
    wizards: Vec<Wizard>,
    house_ids: HashMap<String, usize>,
    wizard_ids: HashMap<String, usize>,
}

impl Catalog {
    /// Parse and validate a catalog from JSON text.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(text)?;
        Self::build(raw.houses, raw.wizards)
    }

    /// Validate records and build the id indexes.
    pub fn build(houses: Vec<House>, mut wizards: Vec<Wizard>) -> Result<Self, CatalogError> {
        let mut house_ids = HashMap::new();
        for (ix, house) in houses.iter().enumerate() {
            if house_ids.insert(house.id.clone(), ix).is_some() {
                return Err(CatalogError::DuplicateId {
                    kind: EntityKind::House,
                    id: house.id.clone(),
                });
            }
            if house.traits.is_empty() {
                return Err(CatalogError::EmptyTraits {
                    id: house.id.clone(),
                });
            }
        }

        let mut wizard_ids = HashMap::new();
        for (ix, wizard) in wizards.iter_mut().enumerate() {
            if wizard_ids.insert(wizard.id.clone(), ix).is_some() {
                return Err(CatalogError::DuplicateId {
                    kind: EntityKind::Wizard,
                    id: wizard.id.clone(),
                });
            }
            if wizard.years.is_empty() {
                return Err(CatalogError::EmptyYears {
                    id: wizard.id.clone(),
                });
            }
            // Canonicalize the loose house reference to the display name.
            let resolved = resolve_house_in(&houses, &wizard.house).ok_or_else(|| {
                CatalogError::UnknownHouse {
                    wizard: wizard.id.clone(),
                    house: wizard.house.clone(),
                }
            })?;
            wizard.house = resolved.name.clone();
        }

        Ok(Self {
            houses,
            wizards,
            house_ids,
            wizard_ids,
        })
    }

    /// The built-in dataset embedded in the crate.
    pub fn builtin() -> &'static Catalog {
        lazy_static::lazy_static! {
            static ref BUILTIN: Catalog =
                Catalog::from_json(include_str!("../data/catalog.json"))
                    .expect("built-in catalog is valid");
        }
        &BUILTIN
    }

    pub fn houses(&self) -> &[House] {
        &self.houses
    }

    pub fn wizards(&self) -> &[Wizard] {
        &self.wizards
    }

    /// Look up a house by id.
    pub fn house(&self, id: &str) -> Option<&House> {
        self.house_ids.get(id).map(|&ix| &self.houses[ix])
    }

    /// Look up a wizard by id.
    pub fn wizard(&self, id: &str) -> Option<&Wizard> {
        self.wizard_ids.get(id).map(|&ix| &self.wizards[ix])
    }

    /// Look up any entity by (kind, id). Returns `None` for unknown ids;
    /// callers treat that as a silent no-op.
    pub fn entity(&self, kind: EntityKind, id: &str) -> Option<EntityRef<'_>> {
        match kind {
            EntityKind::House => self.house(id).map(EntityRef::House),
            EntityKind::Wizard => self.wizard(id).map(EntityRef::Wizard),
        }
    }

    /// Resolve a loose house reference (id or display name, any case).
    pub fn resolve_house(&self, reference: &str) -> Option<&House> {
        resolve_house_in(&self.houses, reference)
    }

    /// Distinct traits across all houses, sorted.
    pub fn trait_options(&self) -> Vec<String> {
        let mut traits: Vec<String> = Vec::new();
        for house in &self.houses {
            for t in &house.traits {
                if !traits.iter().any(|have| have == t) {
                    traits.push(t.clone());
                }
            }
        }
        traits.sort();
        traits
    }

    /// House display names in catalog order.
    pub fn house_options(&self) -> Vec<String> {
        self.houses.iter().map(|h| h.name.clone()).collect()
    }

    /// Distinct enrollment years across all wizards, ascending.
    pub fn year_options(&self) -> Vec<i32> {
        let mut years: Vec<i32> = Vec::new();
        for wizard in &self.wizards {
            for &year in &wizard.years {
                if !years.contains(&year) {
                    years.push(year);
                }
            }
        }
        years.sort_unstable();
        years
    }
}

fn resolve_house_in<'a>(houses: &'a [House], reference: &str) -> Option<&'a House> {
    houses
        .iter()
        .find(|h| h.id == reference || h.name == reference)
        .or_else(|| {
            houses
                .iter()
                .find(|h| h.id.eq_ignore_ascii_case(reference) || h.name.eq_ignore_ascii_case(reference))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_house(id: &str) -> House {
        House {
            id: id.to_string(),
            name: "Gryffindor".to_string(),
            founder: "Godric Gryffindor".to_string(),
            mascot: "Lion".to_string(),
            colors: vec!["Scarlet".to_string()],
            traits: vec!["Bravery".to_string()],
            relic: "Sword".to_string(),
            ghost: "Nick".to_string(),
            summary: "Brave.".to_string(),
            img: "img.webp".to_string(),
            established: 990,
            timeline: Vec::new(),
        }
    }

    fn sample_wizard(id: &str, house: &str) -> Wizard {
        Wizard {
            id: id.to_string(),
            name: "Harry Potter".to_string(),
            house: house.to_string(),
            years: vec![1991],
            aliases: Vec::new(),
            summary: "A wizard.".to_string(),
            notable_events: Vec::new(),
            img: "img.webp".to_string(),
            spoiler_level: SpoilerLevel::Low,
            timeline: Vec::new(),
        }
    }

    #[test]
    fn builtin_catalog_loads_and_validates() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.houses().len(), 4);
        assert_eq!(catalog.wizards().len(), 9);
        assert!(catalog.house("slytherin").is_some());
        assert!(catalog.wizard("harry-potter").is_some());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Catalog::build(
            vec![sample_house("gryffindor"), sample_house("gryffindor")],
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { kind: EntityKind::House, .. }));
    }

    #[test]
    fn empty_traits_are_rejected() {
        let mut house = sample_house("gryffindor");
        house.traits.clear();
        let err = Catalog::build(vec![house], Vec::new()).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyTraits { .. }));
    }

    #[test]
    fn empty_years_are_rejected() {
        let mut wizard = sample_wizard("harry", "gryffindor");
        wizard.years.clear();
        let err = Catalog::build(vec![sample_house("gryffindor")], vec![wizard]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyYears { .. }));
    }

    #[test]
    fn unknown_house_reference_is_rejected() {
        let wizard = sample_wizard("harry", "durmstrang");
        let err = Catalog::build(vec![sample_house("gryffindor")], vec![wizard]).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownHouse { .. }));
    }

    #[test]
    fn house_reference_is_canonicalized_to_display_name() {
        // Referenced by id, stored as display name.
        let catalog = Catalog::build(
            vec![sample_house("gryffindor")],
            vec![sample_wizard("harry", "gryffindor")],
        )
        .unwrap();
        assert_eq!(catalog.wizard("harry").unwrap().house, "Gryffindor");
    }

    #[test]
    fn entity_lookup_dispatches_on_kind() {
        let catalog = Catalog::builtin();
        assert!(matches!(
            catalog.entity(EntityKind::House, "ravenclaw"),
            Some(EntityRef::House(_))
        ));
        assert!(matches!(
            catalog.entity(EntityKind::Wizard, "luna-lovegood"),
            Some(EntityRef::Wizard(_))
        ));
        assert!(catalog.entity(EntityKind::Wizard, "ravenclaw").is_none());
    }

    #[test]
    fn options_are_distinct_and_ordered() {
        let catalog = Catalog::builtin();
        let traits = catalog.trait_options();
        let mut sorted = traits.clone();
        sorted.sort();
        assert_eq!(traits, sorted);
        assert_eq!(traits.len(), 12);

        let years = catalog.year_options();
        assert_eq!(years.first(), Some(&1991));
        assert_eq!(years.last(), Some(&1997));
    }
}
