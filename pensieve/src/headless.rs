//! Headless mode for the archive browser.
//!
//! A line-oriented interface over the same `App` state the TUI drives,
//! for automated testing and scripting. Commands go in on stdin, rendered
//! fragments come out on stdout.

use std::io::{self, BufRead};

use pensieve_core::{
    house_card, wizard_card, Card, EntityKind, NO_HOUSES_MESSAGE, NO_WIZARDS_MESSAGE,
};

use crate::app::{App, Page};

/// Run the browser in headless mode until `quit` or end of input.
pub fn run_headless(mut app: App) -> io::Result<()> {
    println!("=== Pensieve Headless Mode ===");
    println!(
        "Catalog: {} houses, {} wizards",
        app.catalog.houses().len(),
        app.catalog.wizards().len()
    );
    println!();
    print_help();
    println!();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or("");
        let rest = parts.next().unwrap_or("").trim();

        match command {
            "quit" | "exit" => break,
            "help" => print_help(),

            "overview" => {
                app.page = Page::Overview;
                print_overview(&app);
            }
            "houses" => {
                app.page = Page::Houses;
                print_page(&app);
            }
            "wizards" => {
                app.page = Page::Wizards;
                print_page(&app);
            }
            "timeline" => {
                app.page = Page::Timeline;
                print_timeline(&app);
            }

            "search" => {
                match app.page {
                    Page::Houses | Page::Wizards => {
                        set_search(&mut app, rest);
                        print_page(&app);
                    }
                    _ => println!("[ERROR] switch to houses or wizards first"),
                }
            }
            "trait" => {
                if rest.is_empty() {
                    println!("[ERROR] usage: trait <name>");
                } else {
                    app.page = Page::Houses;
                    app.house_filters.toggle_trait(rest);
                    app.refresh_houses();
                    print_page(&app);
                }
            }
            "house" => {
                app.page = Page::Wizards;
                app.wizard_filters.house = if rest.eq_ignore_ascii_case("all") {
                    None
                } else {
                    Some(rest.to_string())
                };
                app.refresh_wizards();
                print_page(&app);
            }
            "year" => {
                app.page = Page::Wizards;
                if rest.eq_ignore_ascii_case("all") {
                    app.wizard_filters.year = None;
                } else {
                    match rest.parse::<i32>() {
                        Ok(year) => app.wizard_filters.year = Some(year),
                        Err(_) => {
                            println!("[ERROR] usage: year <number|all>");
                            continue;
                        }
                    }
                }
                app.refresh_wizards();
                print_page(&app);
            }
            "spoilers" => match rest {
                "on" if !app.show_spoilers => app.toggle_spoilers(),
                "off" if app.show_spoilers => app.toggle_spoilers(),
                "on" | "off" => {}
                _ => println!("[ERROR] usage: spoilers <on|off>"),
            },

            "open" => {
                let mut args = rest.split_whitespace();
                let kind = match args.next() {
                    Some("house") => EntityKind::House,
                    Some("wizard") => EntityKind::Wizard,
                    _ => {
                        println!("[ERROR] usage: open <house|wizard> <id>");
                        continue;
                    }
                };
                let Some(id) = args.next() else {
                    println!("[ERROR] usage: open <house|wizard> <id>");
                    continue;
                };
                app.open_modal(kind, id);
                print_modal(&app);
            }
            "close" => {
                app.close_modal();
                print_modal(&app);
            }
            "status" => print_status(&app),

            other => println!("[ERROR] unknown command: {other}"),
        }
    }

    Ok(())
}

fn set_search(app: &mut App, text: &str) {
    match app.page {
        Page::Houses => {
            app.house_filters.set_search(text);
            app.refresh_houses();
        }
        Page::Wizards => {
            app.wizard_filters.set_search(text);
            app.refresh_wizards();
        }
        _ => {}
    }
}

fn print_help() {
    println!("Commands:");
    println!("  overview | houses | wizards | timeline   switch page and print it");
    println!("  search <text>        set the search text on the current page");
    println!("  trait <name>         toggle a trait filter (houses)");
    println!("  house <name|all>     set the house filter (wizards)");
    println!("  year <number|all>    set the year filter (wizards)");
    println!("  spoilers <on|off>    set spoiler visibility");
    println!("  open <house|wizard> <id>   open the detail view");
    println!("  close                close the detail view");
    println!("  status               print the current state");
    println!("  quit                 exit");
}

fn print_card(card: &Card) {
    println!("* {} [{} {}]", card.title, card.kind.label(), card.id);
    println!("  {}", card.tagline);
    if !card.badges.is_empty() {
        println!("  badges: {}", card.badges.join(", "));
    }
    println!("  {}", card.body);
    if !card.footer.is_empty() {
        println!("  {}", card.footer.join(" | "));
    }
}

fn print_page(app: &App) {
    match app.page {
        Page::Houses => {
            if app.visible_houses.is_empty() {
                println!("{NO_HOUSES_MESSAGE}");
                return;
            }
            for &ix in &app.visible_houses {
                print_card(&house_card(&app.catalog.houses()[ix]));
            }
        }
        Page::Wizards => {
            if app.visible_wizards.is_empty() {
                println!("{NO_WIZARDS_MESSAGE}");
                return;
            }
            for &ix in &app.visible_wizards {
                print_card(&wizard_card(&app.catalog.wizards()[ix], app.show_spoilers));
            }
        }
        _ => {}
    }
}

fn print_overview(app: &App) {
    if let Some(house) = app.catalog.houses().first() {
        println!("Featured house:");
        print_card(&house_card(house));
    }
    if let Some(wizard) = app.catalog.wizards().first() {
        println!("Featured wizard:");
        print_card(&wizard_card(wizard, app.show_spoilers));
    }
}

fn print_timeline(app: &App) {
    for group in &app.timeline {
        println!("=== {} ===", group.year);
        for entry in &group.entries {
            println!("* {} [{} {}]", entry.title, entry.kind.label(), entry.target_id);
            println!("  {}", entry.display_summary(app.show_spoilers));
        }
    }
}

fn print_modal(app: &App) {
    match app.modal() {
        None => println!("modal: closed"),
        Some(modal) => {
            let view = &modal.view;
            println!("modal: open [{} {}]", view.kind.label(), view.id);
            println!("  {}", view.title);
            for (label, value) in &view.meta {
                println!("  {label}: {value}");
            }
            println!("  {}", view.summary);
            for detail in &view.details {
                println!("  - {detail}");
            }
        }
    }
}

fn print_status(app: &App) {
    println!("page: {}", app.page.title());
    println!(
        "houses: {} shown, traits: {:?}, search: {:?}",
        app.visible_houses.len(),
        app.house_filters.traits,
        app.house_filters.search
    );
    println!(
        "wizards: {} shown, house: {:?}, year: {:?}, search: {:?}",
        app.visible_wizards.len(),
        app.wizard_filters.house,
        app.wizard_filters.year,
        app.wizard_filters.search
    );
    println!("spoilers: {}", if app.show_spoilers { "on" } else { "off" });
    println!(
        "modal: {}",
        match app.modal() {
            Some(m) => format!("open [{} {}]", m.view.kind.label(), m.view.id),
            None => "closed".to_string(),
        }
    );
}
