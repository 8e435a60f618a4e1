use std::sync::Arc;

use anyhow::Result;

use mythos_lib::search::{search, RecentSearches, POPULAR_SEARCHES};

use crate::app::App;
use crate::render::terminal::bold;
use crate::OutputFormat;

pub fn run(
    app: &App,
    query: Option<&str>,
    limit: usize,
    clear_recent: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let mut recent = RecentSearches::new(Arc::clone(&app.backend));

    if clear_recent {
        recent.clear();
        println!("Recent searches cleared.");
        return Ok(());
    }

    let query = match query {
        Some(q) if !q.trim().is_empty() => q,
        _ => return print_suggestions(&recent, format, use_color),
    };

    let hits = search(&app.catalog, query, limit);
    recent.record(query);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }
        OutputFormat::Plain => {
            if hits.is_empty() {
                println!("No results found for '{}'.", query);
                return Ok(());
            }

            let name_w = hits.iter().map(|h| h.name.len()).max().unwrap_or(4).max(4);
            let kind_w = 8;

            println!(
                "{:<kind_w$} {:<name_w$} {:<10} {:>6}  {}",
                "Kind",
                "Name",
                "Pantheon",
                "Score",
                "Description",
                kind_w = kind_w,
                name_w = name_w
            );
            println!(
                "{} {} {} {}  {}",
                "\u{2500}".repeat(kind_w),
                "\u{2500}".repeat(name_w),
                "\u{2500}".repeat(10),
                "\u{2500}".repeat(6),
                "\u{2500}".repeat(30)
            );

            for hit in &hits {
                let description = if hit.description.len() > 50 {
                    format!("{}...", &hit.description[..47])
                } else {
                    hit.description.clone()
                };
                println!(
                    "{:<kind_w$} {:<name_w$} {:<10} {:>6.1}  {}",
                    hit.kind.label(),
                    hit.name,
                    hit.pantheon_id,
                    hit.score,
                    description,
                    kind_w = kind_w,
                    name_w = name_w
                );
            }

            println!("\n{} results", hits.len());
        }
    }

    Ok(())
}

/// Empty-state view: what the user searched before, then the seed list.
fn print_suggestions(recent: &RecentSearches, format: &OutputFormat, use_color: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "recent": recent.list(),
                "popular": POPULAR_SEARCHES,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Plain => {
            if !recent.list().is_empty() {
                println!("{}", bold("Recent searches", use_color));
                for query in recent.list() {
                    println!("  {}", query);
                }
                println!();
            }
            println!("{}", bold("Popular searches", use_color));
            for query in POPULAR_SEARCHES {
                println!("  {}", query);
            }
            println!("\nSearch with: mythos search <query>");
        }
    }

    Ok(())
}
