//! Display fragments.
//!
//! Projects catalog entities into plain-string fragments the UI can paint.
//! These functions are deterministic and side-effect free; the spoiler rule
//! lives here so it can be tested without any rendering target.

use crate::catalog::{EntityKind, House, SpoilerLevel, Wizard};

/// Fixed text shown in place of a redacted summary.
pub const SPOILER_PLACEHOLDER: &str =
    "Spoilers hidden. Toggle spoilers on to reveal this summary.";

/// Empty-state copy for the houses page.
pub const NO_HOUSES_MESSAGE: &str =
    "No houses matched your search. Try a different trait or name.";

/// Empty-state copy for the wizards page.
pub const NO_WIZARDS_MESSAGE: &str = "No wizards found. Adjust your search or filters.";

/// One grid card. Carries the owning entity's kind and id so a delegated
/// click handler can resolve it later; the renderer itself never opens
/// anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub kind: EntityKind,
    pub id: String,
    pub title: String,
    /// Secondary line under the title (founder line or house name).
    pub tagline: String,
    /// Trait badges for houses, alias badges for wizards.
    pub badges: Vec<String>,
    /// Summary text, already redacted where required.
    pub body: String,
    /// Footer items: house colors, or notable events.
    pub footer: Vec<String>,
}

/// The detail overlay's content, shared by both entity types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub kind: EntityKind,
    pub id: String,
    pub title: String,
    pub image: String,
    pub badges: Vec<String>,
    /// Summary text, already redacted where required.
    pub summary: String,
    /// Labeled metadata rows.
    pub meta: Vec<(String, String)>,
    /// Type-specific detail list: mascot/relic/ghost for a house, notable
    /// events for a wizard.
    pub details: Vec<String>,
}

fn redacted(summary: &str, level: SpoilerLevel, show_spoilers: bool) -> String {
    if level.is_high() && !show_spoilers {
        SPOILER_PLACEHOLDER.to_string()
    } else {
        summary.to_string()
    }
}

/// Project a house into a grid card.
pub fn house_card(house: &House) -> Card {
    Card {
        kind: EntityKind::House,
        id: house.id.clone(),
        title: house.name.clone(),
        tagline: format!("Founded {} by {}", house.established, house.founder),
        badges: house.traits.clone(),
        body: house.summary.clone(),
        footer: house.colors.clone(),
    }
}

/// Project a wizard into a grid card.
///
/// Redaction applies only to the summary; name, house, aliases, and notable
/// events stay visible regardless of the spoiler flag.
pub fn wizard_card(wizard: &Wizard, show_spoilers: bool) -> Card {
    Card {
        kind: EntityKind::Wizard,
        id: wizard.id.clone(),
        title: wizard.name.clone(),
        tagline: wizard.house.clone(),
        badges: wizard.aliases.clone(),
        body: redacted(&wizard.summary, wizard.spoiler_level, show_spoilers),
        footer: wizard.notable_events.clone(),
    }
}

/// Build the detail overlay content for a house.
pub fn house_detail(house: &House) -> DetailView {
    DetailView {
        kind: EntityKind::House,
        id: house.id.clone(),
        title: house.name.clone(),
        image: house.img.clone(),
        badges: house.traits.clone(),
        summary: house.summary.clone(),
        meta: vec![
            ("Founder".to_string(), house.founder.clone()),
            ("Founded".to_string(), house.established.to_string()),
            ("Colors".to_string(), house.colors.join(", ")),
        ],
        details: vec![
            format!("Mascot: {}", house.mascot),
            format!("Relic: {}", house.relic),
            format!("Ghost: {}", house.ghost),
        ],
    }
}

/// Build the detail overlay content for a wizard, under the same spoiler
/// rule as the grid card.
pub fn wizard_detail(wizard: &Wizard, show_spoilers: bool) -> DetailView {
    let years = wizard
        .years
        .iter()
        .map(|y| y.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    DetailView {
        kind: EntityKind::Wizard,
        id: wizard.id.clone(),
        title: wizard.name.clone(),
        image: wizard.img.clone(),
        badges: wizard.aliases.clone(),
        summary: redacted(&wizard.summary, wizard.spoiler_level, show_spoilers),
        meta: vec![
            ("House".to_string(), wizard.house.clone()),
            ("Years".to_string(), years),
        ],
        details: wizard.notable_events.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn high_spoiler_summary_is_redacted_when_hidden() {
        let catalog = Catalog::builtin();
        for wizard in catalog.wizards().iter().filter(|w| w.spoiler_level.is_high()) {
            let hidden = wizard_card(wizard, false);
            assert_eq!(hidden.body, SPOILER_PLACEHOLDER);
            assert!(!hidden.body.contains(&wizard.summary));

            let shown = wizard_card(wizard, true);
            assert_eq!(shown.body, wizard.summary);
        }
    }

    #[test]
    fn low_spoiler_summary_is_always_visible() {
        let catalog = Catalog::builtin();
        let hermione = catalog.wizard("hermione-granger").unwrap();
        assert_eq!(wizard_card(hermione, false).body, hermione.summary);
    }

    #[test]
    fn structured_metadata_survives_redaction() {
        let catalog = Catalog::builtin();
        for wizard in catalog.wizards() {
            for show in [false, true] {
                let card = wizard_card(wizard, show);
                assert_eq!(card.title, wizard.name);
                assert_eq!(card.tagline, wizard.house);
                assert_eq!(card.badges, wizard.aliases);
                assert_eq!(card.footer, wizard.notable_events);
            }
        }
    }

    #[test]
    fn cards_carry_kind_and_id_for_delegated_resolution() {
        let catalog = Catalog::builtin();
        let house = house_card(&catalog.houses()[0]);
        assert!(matches!(house.kind, EntityKind::House));
        assert_eq!(house.id, "gryffindor");

        let wizard = wizard_card(&catalog.wizards()[0], true);
        assert!(matches!(wizard.kind, EntityKind::Wizard));
        assert_eq!(wizard.id, "harry-potter");
    }

    #[test]
    fn house_detail_lists_mascot_relic_ghost() {
        let catalog = Catalog::builtin();
        let view = house_detail(catalog.house("hufflepuff").unwrap());
        assert_eq!(view.details.len(), 3);
        assert!(view.details[0].contains("Badger"));
        assert!(view.details[1].contains("Hufflepuff Cup"));
        assert!(view.details[2].contains("Fat Friar"));
    }

    #[test]
    fn wizard_detail_redacts_summary_only() {
        let catalog = Catalog::builtin();
        let snape = catalog.wizard("severus-snape").unwrap();
        let view = wizard_detail(snape, false);
        assert_eq!(view.summary, SPOILER_PLACEHOLDER);
        assert_eq!(view.details, snape.notable_events);
        assert_eq!(view.meta[0].1, "Slytherin");
    }
}
