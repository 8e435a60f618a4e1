use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde_json::json;

use mythos_lib::tales::{Tale, TaleCatalog, TaleEngine, TaleNode};

use crate::app::App;
use crate::render::terminal::{bold, dim};
use crate::OutputFormat;

fn load_catalog(app: &App) -> Result<TaleCatalog> {
    TaleCatalog::load(&app.content_dir)
        .with_context(|| format!("Failed to load tales from {}", app.content_dir.display()))
}

/// Find a tale by id, slug, or title prefix (case-insensitive)
fn find_tale<'a>(catalog: &'a TaleCatalog, name: &str) -> Result<&'a Tale> {
    if let Some(tale) = catalog.tale(name) {
        return Ok(tale);
    }

    let lower = name.to_lowercase();
    let matches: Vec<&Tale> = catalog
        .tales()
        .iter()
        .filter(|t| t.title.to_lowercase().starts_with(&lower))
        .collect();

    match matches.len() {
        0 => bail!(
            "No tale matching '{}'. Available tales:\n{}",
            name,
            catalog
                .tales()
                .iter()
                .map(|t| format!("  - {} ({})", t.title, t.id))
                .collect::<Vec<_>>()
                .join("\n")
        ),
        1 => Ok(matches[0]),
        _ => bail!(
            "Ambiguous tale name '{}'. Matches:\n{}",
            name,
            matches
                .iter()
                .map(|t| format!("  - {}", t.title))
                .collect::<Vec<_>>()
                .join("\n")
        ),
    }
}

fn print_node(tale: &Tale, node: &TaleNode, engine: &TaleEngine, use_color: bool) {
    println!();
    println!("{}", node.text);

    if let Some(ending) = &node.ending {
        println!();
        println!("{}", bold(ending.kind.label(), use_color));
        println!("{}", ending.summary);
        println!(
            "\nEndings found: {}/{} ({}% complete)",
            engine.endings_discovered(&tale.id).len(),
            tale.total_endings,
            engine.completion_percent(tale)
        );
        println!("Start over with: mythos tales restart {}", tale.id);
    } else {
        println!();
        for (i, choice) in node.choices.iter().enumerate() {
            println!("  {}. {}", i + 1, choice.text);
            if let Some(consequence) = &choice.consequence {
                println!("     {}", dim(consequence, use_color));
            }
        }
        println!("\nChoose with: mythos tales choose {} <n>", tale.id);
    }
}

pub fn run_list(app: &App, format: &OutputFormat, _use_color: bool) -> Result<()> {
    let catalog = load_catalog(app)?;
    let engine = TaleEngine::new(Arc::clone(&app.backend));

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = catalog
                .tales()
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "title": t.title,
                        "pantheonId": t.pantheon_id,
                        "protagonist": t.protagonist,
                        "estimatedMinutes": t.estimated_minutes,
                        "endingsFound": engine.endings_discovered(&t.id).len(),
                        "totalEndings": t.total_endings,
                        "completion": engine.completion_percent(t),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if catalog.tales().is_empty() {
                println!("No tales in the catalog.");
                return Ok(());
            }

            let title_w = catalog
                .tales()
                .iter()
                .map(|t| t.title.len())
                .max()
                .unwrap_or(5)
                .max(5);

            println!(
                "{:<title_w$} {:<10} {:>8} {:>5}  {}",
                "Title",
                "Pantheon",
                "Endings",
                "Done",
                "Length",
                title_w = title_w
            );
            println!(
                "{} {} {} {}  {}",
                "\u{2500}".repeat(title_w),
                "\u{2500}".repeat(10),
                "\u{2500}".repeat(8),
                "\u{2500}".repeat(5),
                "\u{2500}".repeat(8)
            );

            for t in catalog.tales() {
                println!(
                    "{:<title_w$} {:<10} {:>8} {:>4}%  ~{} min",
                    t.title,
                    t.pantheon_id,
                    format!("{}/{}", engine.endings_discovered(&t.id).len(), t.total_endings),
                    engine.completion_percent(t),
                    t.estimated_minutes,
                    title_w = title_w
                );
            }

            println!("\n{} tales", catalog.tales().len());
        }
    }

    Ok(())
}

pub fn run_play(app: &App, name: &str, use_color: bool) -> Result<()> {
    let catalog = load_catalog(app)?;
    let tale = find_tale(&catalog, name)?;
    let mut engine = TaleEngine::new(Arc::clone(&app.backend));

    let node = engine.resume(tale)?;

    println!("{}", bold(&tale.title, use_color));
    println!("{}", dim(&format!("You are: {}", tale.protagonist), use_color));
    print_node(tale, node, &engine, use_color);

    Ok(())
}

pub fn run_choose(app: &App, name: &str, choice: usize, use_color: bool) -> Result<()> {
    if choice == 0 {
        bail!("Choices are numbered from 1");
    }

    let catalog = load_catalog(app)?;
    let tale = find_tale(&catalog, name)?;
    let mut engine = TaleEngine::new(Arc::clone(&app.backend));

    let node = engine.choose(tale, choice - 1)?;
    print_node(tale, node, &engine, use_color);

    Ok(())
}

pub fn run_restart(app: &App, name: &str) -> Result<()> {
    let catalog = load_catalog(app)?;
    let tale = find_tale(&catalog, name)?;
    let mut engine = TaleEngine::new(Arc::clone(&app.backend));

    engine.restart(tale);
    println!(
        "'{}' restarted. Endings found so far: {}/{}",
        tale.title,
        engine.endings_discovered(&tale.id).len(),
        tale.total_endings
    );

    Ok(())
}
