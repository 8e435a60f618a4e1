use anyhow::Result;
use serde_json::json;

use mythos_lib::mastery::{all_masteries, overall_level};

use crate::app::App;
use crate::render::terminal::bold;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let store = app.progress_store();
    let masteries = all_masteries(&app.catalog, store.progress());
    let overall = overall_level(&masteries);

    match format {
        OutputFormat::Json => {
            let output = json!({
                "overall": overall,
                "pantheons": masteries,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if masteries.is_empty() {
                println!("No pantheons in the catalog.");
                return Ok(());
            }

            let name_w = masteries
                .iter()
                .map(|m| m.pantheon_name.len())
                .max()
                .unwrap_or(8)
                .max(8);

            println!(
                "{:<name_w$} {:<7} {:>8} {:>9} {:>9} {:>8}",
                "Pantheon",
                "Level",
                "Progress",
                "Deities",
                "Stories",
                "Quiz avg",
                name_w = name_w
            );
            println!(
                "{} {} {} {} {} {}",
                "\u{2500}".repeat(name_w),
                "\u{2500}".repeat(7),
                "\u{2500}".repeat(8),
                "\u{2500}".repeat(9),
                "\u{2500}".repeat(9),
                "\u{2500}".repeat(8)
            );

            for m in &masteries {
                println!(
                    "{:<name_w$} {:<7} {:>7}% {:>9} {:>9} {:>8}",
                    m.pantheon_name,
                    m.level.label(),
                    m.progress,
                    format!("{}/{}", m.deities_viewed, m.deity_total),
                    format!("{}/{}", m.stories_read, m.story_total),
                    m.quiz_average,
                    name_w = name_w
                );
            }

            println!();
            println!("{}", bold(&format!("Overall: {}", overall.label()), use_color));
            if let Some(next) = overall.next() {
                println!("Next level: {} at {}% progress", next.label(), next.threshold());
            }
        }
    }

    Ok(())
}
