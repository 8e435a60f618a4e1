use anyhow::Result;
use serde_json::json;

use mythos_lib::recommend::{
    discovery_picks, exploration_suggestion, recommend_deities, recommend_stories,
};

use crate::app::App;
use crate::render::terminal::bold;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let store = app.progress_store();
    let progress = store.progress();

    let deities = recommend_deities(&app.catalog, progress, 5);
    let stories = recommend_stories(&app.catalog, progress, 3);
    let explore = exploration_suggestion(&app.catalog, progress);
    let discover = discovery_picks(&app.catalog, progress);

    match format {
        OutputFormat::Json => {
            let output = json!({
                "deities": deities,
                "stories": stories,
                "explore": explore,
                "discover": discover,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if deities.is_empty() && stories.is_empty() && discover.deities.is_empty() {
                println!("Nothing left to recommend. You have seen it all.");
                return Ok(());
            }

            if !deities.is_empty() {
                println!("{}", bold("Deities to meet", use_color));
                let name_w = deities
                    .iter()
                    .map(|r| r.deity.name.len())
                    .max()
                    .unwrap_or(4)
                    .max(4);
                for r in &deities {
                    println!("  {:<name_w$}  {}", r.deity.name, r.reason, name_w = name_w);
                }
            }

            if !stories.is_empty() {
                println!();
                println!("{}", bold("Stories to read", use_color));
                let title_w = stories
                    .iter()
                    .map(|r| r.story.title.len())
                    .max()
                    .unwrap_or(5)
                    .max(5);
                for r in &stories {
                    println!("  {:<title_w$}  {}", r.story.title, r.reason, title_w = title_w);
                }
            }

            if !discover.deities.is_empty() || !discover.stories.is_empty() {
                println!();
                println!("{}", bold("Start somewhere new", use_color));
                for deity in &discover.deities {
                    println!("  {} ({})", deity.name, deity.pantheon_id);
                }
                for story in &discover.stories {
                    println!("  {} ({})", story.title, story.category.label());
                }
            }

            if let Some(suggestion) = &explore {
                println!();
                println!(
                    "Try the {} pantheon next ({}/{} deities seen).",
                    suggestion.pantheon_name, suggestion.deities_viewed, suggestion.deity_total
                );
            }
        }
    }

    Ok(())
}
