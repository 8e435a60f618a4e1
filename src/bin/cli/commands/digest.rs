use anyhow::Result;
use chrono::Local;

use mythos_lib::recommend::daily_digest;

use crate::app::App;
use crate::render::terminal::bold;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let digest = daily_digest(&app.catalog, Local::now().date_naive());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&digest)?);
        }
        OutputFormat::Plain => {
            println!("{}", bold(&format!("Daily digest for {}", digest.date), use_color));

            match &digest.deity {
                Some(deity) => {
                    let pantheon = app
                        .catalog
                        .pantheon(&deity.pantheon_id)
                        .map(|p| p.name.clone())
                        .unwrap_or_else(|| deity.pantheon_id.clone());
                    println!("\nDeity of the day: {} ({})", deity.name, pantheon);
                    println!("  {}", deity.description);
                }
                None => println!("\nNo deities in the catalog."),
            }

            match &digest.story {
                Some(story) => {
                    println!("\nStory of the day: {}", story.title);
                    println!("  {}", story.summary);
                }
                None => println!("\nNo stories in the catalog."),
            }
        }
    }

    Ok(())
}
