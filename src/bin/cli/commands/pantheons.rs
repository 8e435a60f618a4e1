use anyhow::Result;
use serde_json::json;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, _use_color: bool) -> Result<()> {
    let pantheons = app.catalog.pantheons();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = pantheons
                .iter()
                .map(|p| {
                    json!({
                        "id": p.id,
                        "name": p.name,
                        "culture": p.culture,
                        "era": p.era,
                        "deities": app.catalog.deities_for_pantheon(&p.id).len(),
                        "stories": app.catalog.stories_for_pantheon(&p.id).len(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if pantheons.is_empty() {
                println!("No pantheons in the catalog.");
                return Ok(());
            }

            let name_w = pantheons.iter().map(|p| p.name.len()).max().unwrap_or(4).max(4);
            let culture_w = pantheons
                .iter()
                .map(|p| p.culture.len())
                .max()
                .unwrap_or(7)
                .max(7);

            println!(
                "{:<name_w$} {:<culture_w$} {:>7} {:>7}  {}",
                "Name",
                "Culture",
                "Deities",
                "Stories",
                "Era",
                name_w = name_w,
                culture_w = culture_w
            );
            println!(
                "{} {} {} {}  {}",
                "\u{2500}".repeat(name_w),
                "\u{2500}".repeat(culture_w),
                "\u{2500}".repeat(7),
                "\u{2500}".repeat(7),
                "\u{2500}".repeat(12)
            );

            for p in pantheons {
                println!(
                    "{:<name_w$} {:<culture_w$} {:>7} {:>7}  {}",
                    p.name,
                    p.culture,
                    app.catalog.deities_for_pantheon(&p.id).len(),
                    app.catalog.stories_for_pantheon(&p.id).len(),
                    p.era.as_deref().unwrap_or("-"),
                    name_w = name_w,
                    culture_w = culture_w
                );
            }

            println!("\n{} pantheons", pantheons.len());
        }
    }

    Ok(())
}
