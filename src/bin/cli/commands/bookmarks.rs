use std::sync::Arc;

use anyhow::{bail, Result};

use mythos_lib::bookmarks::{Bookmark, BookmarkKind, BookmarkStore};
use mythos_lib::content::ContentCatalog;

use crate::app::App;
use crate::OutputFormat;

fn display_name(catalog: &ContentCatalog, kind: BookmarkKind, id: &str) -> String {
    let name = match kind {
        BookmarkKind::Deity => catalog.deity(id).map(|d| d.name.clone()),
        BookmarkKind::Story => catalog.story(id).map(|s| s.title.clone()),
        BookmarkKind::Pantheon => catalog.pantheon(id).map(|p| p.name.clone()),
    };
    name.unwrap_or_else(|| id.to_string())
}

pub fn run_list(
    app: &App,
    kind: Option<BookmarkKind>,
    format: &OutputFormat,
    _use_color: bool,
) -> Result<()> {
    let store = BookmarkStore::new(Arc::clone(&app.backend));
    let bookmarks: Vec<&Bookmark> = match kind {
        Some(kind) => store.of_kind(kind),
        None => store.list().iter().collect(),
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&bookmarks)?);
        }
        OutputFormat::Plain => {
            if bookmarks.is_empty() {
                match kind {
                    Some(kind) => println!("No {} bookmarks.", kind.label()),
                    None => println!(
                        "No bookmarks yet. Save one with: mythos bookmarks toggle <kind> <id>"
                    ),
                }
                return Ok(());
            }

            let rows: Vec<(&'static str, String, String)> = bookmarks
                .iter()
                .map(|b| {
                    (
                        b.kind.label(),
                        display_name(&app.catalog, b.kind, &b.id),
                        b.timestamp.format("%Y-%m-%d").to_string(),
                    )
                })
                .collect();

            let name_w = rows.iter().map(|(_, n, _)| n.len()).max().unwrap_or(4).max(4);

            println!("{:<8} {:<name_w$} {}", "Kind", "Name", "Saved", name_w = name_w);
            println!(
                "{} {} {}",
                "\u{2500}".repeat(8),
                "\u{2500}".repeat(name_w),
                "\u{2500}".repeat(10)
            );

            for (kind, name, saved) in &rows {
                println!("{:<8} {:<name_w$} {}", kind, name, saved, name_w = name_w);
            }

            println!("\n{} bookmarks", rows.len());
        }
    }

    Ok(())
}

pub fn run_toggle(app: &App, kind: BookmarkKind, id: &str) -> Result<()> {
    // Accept slugs too, but store the canonical id.
    let (canonical, name) = match kind {
        BookmarkKind::Deity => match app.catalog.deity(id) {
            Some(d) => (d.id.clone(), d.name.clone()),
            None => bail!("No {} with id '{}'", kind.label(), id),
        },
        BookmarkKind::Story => match app.catalog.story(id) {
            Some(s) => (s.id.clone(), s.title.clone()),
            None => bail!("No {} with id '{}'", kind.label(), id),
        },
        BookmarkKind::Pantheon => match app.catalog.pantheon(id) {
            Some(p) => (p.id.clone(), p.name.clone()),
            None => bail!("No {} with id '{}'", kind.label(), id),
        },
    };

    let mut store = BookmarkStore::new(Arc::clone(&app.backend));

    if store.toggle(kind, &canonical) {
        println!("Bookmarked {} '{}'.", kind.label(), name);
    } else {
        println!("Removed bookmark for {} '{}'.", kind.label(), name);
    }

    Ok(())
}
