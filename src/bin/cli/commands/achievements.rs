use anyhow::Result;

use mythos_lib::achievements::statuses;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let store = app.progress_store();
    let statuses = statuses(store.progress(), &app.catalog);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&statuses)?);
        }
        OutputFormat::Plain => {
            if statuses.is_empty() {
                println!("No achievements defined.");
                return Ok(());
            }

            let title_w = statuses
                .iter()
                .map(|s| s.title.len())
                .max()
                .unwrap_or(5)
                .max(5);

            for status in &statuses {
                let progress = format!("{}/{}", status.current, status.target);
                let line = format!(
                    "{} {:<title_w$}  {:<8} {:<12} {:>7}  +{} XP",
                    status.glyph.symbol(),
                    status.title,
                    status.tier.label(),
                    status.category.label(),
                    progress,
                    status.xp,
                    title_w = title_w
                );
                if status.unlocked {
                    println!("{}", paint(&line, Color::GREEN, use_color));
                } else {
                    println!("{}", line);
                }
            }

            let unlocked = statuses.iter().filter(|s| s.unlocked).count();
            println!("\n{}/{} unlocked", unlocked, statuses.len());
        }
    }

    Ok(())
}
