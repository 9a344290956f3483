//! Pure matching rules for the browse pages.
//!
//! The view layer mutates a `FilterState` and recomputes its visible set by
//! running every entity through these predicates. Nothing here touches the
//! UI or the preference store.

use crate::catalog::{House, Wizard};

/// The current combination of search text and categorical selections for
/// one rendering surface. Created with defaults at page init, mutated one
/// field at a time by the view-state controller, discarded on exit.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Search text, stored trimmed and lowercased.
    pub search: String,
    /// Selected traits. Empty means "all"; otherwise every selected trait
    /// must be present (AND semantics).
    pub traits: Vec<String>,
    /// Selected house display name, `None` means "all".
    pub house: Option<String>,
    /// Selected enrollment year, `None` means "all".
    pub year: Option<i32>,
    /// Whether high-spoiler summaries are shown unredacted.
    pub show_spoilers: bool,
}

impl FilterState {
    /// Normalize and store the search text.
    pub fn set_search(&mut self, raw: &str) {
        self.search = raw.trim().to_lowercase();
    }

    /// Toggle a trait selection on or off.
    pub fn toggle_trait(&mut self, name: &str) {
        if let Some(pos) = self.traits.iter().position(|t| t.eq_ignore_ascii_case(name)) {
            self.traits.remove(pos);
        } else {
            self.traits.push(name.to_string());
        }
    }
}

/// Case-insensitive containment. An empty needle matches everything.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Whether a house passes the current filters.
///
/// Text match runs over name, founder, and summary; every selected trait
/// must be present on the house.
pub fn matches_house(house: &House, filters: &FilterState) -> bool {
    let text_ok = filters.search.is_empty()
        || contains_ci(&house.name, &filters.search)
        || contains_ci(&house.founder, &filters.search)
        || contains_ci(&house.summary, &filters.search);

    let traits_ok = filters
        .traits
        .iter()
        .all(|wanted| house.traits.iter().any(|have| have.eq_ignore_ascii_case(wanted)));

    text_ok && traits_ok
}

/// Whether a wizard passes the current filters.
///
/// Text match runs over name, aliases, and summary. The house filter
/// compares display names case-insensitively; the year filter requires
/// exact membership in the wizard's enrollment years.
pub fn matches_wizard(wizard: &Wizard, filters: &FilterState) -> bool {
    let text_ok = filters.search.is_empty()
        || contains_ci(&wizard.name, &filters.search)
        || wizard.aliases.iter().any(|alias| contains_ci(alias, &filters.search))
        || contains_ci(&wizard.summary, &filters.search);

    let house_ok = match &filters.house {
        None => true,
        Some(selected) => wizard.house.eq_ignore_ascii_case(selected),
    };

    let year_ok = match filters.year {
        None => true,
        Some(year) => wizard.years.contains(&year),
    };

    text_ok && house_ok && year_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn identity() -> FilterState {
        FilterState::default()
    }

    #[test]
    fn identity_filter_matches_every_house() {
        let catalog = Catalog::builtin();
        for house in catalog.houses() {
            assert!(matches_house(house, &identity()), "{} should match", house.id);
        }
    }

    #[test]
    fn identity_filter_matches_every_wizard() {
        let catalog = Catalog::builtin();
        for wizard in catalog.wizards() {
            assert!(matches_wizard(wizard, &identity()), "{} should match", wizard.id);
        }
    }

    #[test]
    fn trait_filter_selects_exact_subset() {
        let catalog = Catalog::builtin();
        let mut filters = identity();
        filters.toggle_trait("Bravery");

        let matched: Vec<&str> = catalog
            .houses()
            .iter()
            .filter(|h| matches_house(h, &filters))
            .map(|h| h.id.as_str())
            .collect();
        assert_eq!(matched, vec!["gryffindor"]);
    }

    #[test]
    fn trait_filter_is_case_insensitive() {
        let catalog = Catalog::builtin();
        let mut filters = identity();
        filters.toggle_trait("bravery");
        let gryffindor = catalog.house("gryffindor").unwrap();
        assert!(matches_house(gryffindor, &filters));
    }

    #[test]
    fn multiple_traits_use_and_semantics() {
        let catalog = Catalog::builtin();
        let mut filters = identity();
        filters.toggle_trait("Bravery");
        filters.toggle_trait("Loyalty");
        // No house carries both.
        assert!(!catalog.houses().iter().any(|h| matches_house(h, &filters)));
    }

    #[test]
    fn toggling_a_trait_twice_clears_it() {
        let mut filters = identity();
        filters.toggle_trait("Wit");
        filters.toggle_trait("wit");
        assert!(filters.traits.is_empty());
    }

    #[test]
    fn house_search_covers_founder_and_summary() {
        let catalog = Catalog::builtin();
        let ravenclaw = catalog.house("ravenclaw").unwrap();

        let mut filters = identity();
        filters.set_search("Rowena");
        assert!(matches_house(ravenclaw, &filters));

        filters.set_search("curiosity");
        assert!(matches_house(ravenclaw, &filters));

        filters.set_search("quidditch");
        assert!(!matches_house(ravenclaw, &filters));
    }

    #[test]
    fn wizard_search_covers_aliases() {
        let catalog = Catalog::builtin();
        let harry = catalog.wizard("harry-potter").unwrap();
        let mut filters = identity();
        filters.set_search("boy who lived");
        assert!(matches_wizard(harry, &filters));
    }

    #[test]
    fn house_and_year_filters_combine() {
        let catalog = Catalog::builtin();
        let mut filters = identity();
        filters.house = Some("Slytherin".to_string());
        filters.year = Some(1996);

        let matched: Vec<&str> = catalog
            .wizards()
            .iter()
            .filter(|w| matches_wizard(w, &filters))
            .map(|w| w.id.as_str())
            .collect();
        assert_eq!(matched, vec!["severus-snape", "draco-malfoy"]);
    }

    #[test]
    fn year_filter_requires_membership() {
        let catalog = Catalog::builtin();
        let luna = catalog.wizard("luna-lovegood").unwrap();
        let mut filters = identity();
        filters.year = Some(1991);
        assert!(!matches_wizard(luna, &filters));
        filters.year = Some(1995);
        assert!(matches_wizard(luna, &filters));
    }

    #[test]
    fn empty_aliases_never_panic() {
        let catalog = Catalog::builtin();
        let draco = catalog.wizard("draco-malfoy").unwrap();
        assert!(draco.aliases.is_empty());
        let mut filters = identity();
        filters.set_search("draco");
        assert!(matches_wizard(draco, &filters));
    }

    #[test]
    fn search_text_is_normalized() {
        let mut filters = identity();
        filters.set_search("  HaRrY  ");
        assert_eq!(filters.search, "harry");
    }
}
