//! Exercise the browse logic without a TUI

use pensieve_core::{matches_house, matches_wizard, Catalog, FilterState};

fn main() {
    println!("=== Exercising browse logic ===\n");

    test_trait_filter();
    test_wizard_filters();
    test_page_cycling();

    println!("\n=== Done ===");
}

fn test_trait_filter() {
    println!("1. Trait filter (AND semantics)...");
    let catalog = Catalog::builtin();

    let cases = [
        (vec!["Bravery"], 1),
        (vec!["Bravery", "Daring"], 1),
        (vec!["Bravery", "Loyalty"], 0),
        (vec![], 4),
    ];

    for (traits, expected) in cases {
        let mut filters = FilterState::default();
        for t in &traits {
            filters.toggle_trait(t);
        }
        let count = catalog
            .houses()
            .iter()
            .filter(|h| matches_house(h, &filters))
            .count();
        let status = if count == expected { "OK" } else { "FAIL" };
        println!("   {status} - {traits:?} -> {count} houses (expected {expected})");
    }
}

fn test_wizard_filters() {
    println!("\n2. Wizard house + year filters...");
    let catalog = Catalog::builtin();

    let mut filters = FilterState::default();
    filters.house = Some("Slytherin".to_string());
    filters.year = Some(1996);

    for wizard in catalog.wizards() {
        if matches_wizard(wizard, &filters) {
            println!("   matched: {} ({})", wizard.name, wizard.house);
        }
    }
}

fn test_page_cycling() {
    println!("\n3. Page cycling logic...");

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Page {
        Overview,
        Houses,
        Wizards,
        Timeline,
    }

    fn next(page: Page) -> Page {
        match page {
            Page::Overview => Page::Houses,
            Page::Houses => Page::Wizards,
            Page::Wizards => Page::Timeline,
            Page::Timeline => Page::Overview,
        }
    }

    let mut page = Page::Overview;
    for _ in 0..5 {
        let following = next(page);
        println!("   {page:?} -> {following:?}");
        page = following;
    }
    println!("   Page cycling OK");
}
