use anyhow::Result;

use mythos_lib::content::Story;

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &App,
    pantheon_name: Option<&str>,
    format: &OutputFormat,
    _use_color: bool,
) -> Result<()> {
    let stories: Vec<&Story> = match pantheon_name {
        Some(name) => {
            let pantheon = app.find_pantheon(name)?;
            app.catalog.stories_for_pantheon(&pantheon.id)
        }
        None => app.catalog.stories().iter().collect(),
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stories)?);
        }
        OutputFormat::Plain => {
            if stories.is_empty() {
                println!("No stories found.");
                return Ok(());
            }

            let store = app.progress_store();
            let read = &store.progress().stories_read;

            let title_w = stories
                .iter()
                .map(|s| s.title.len())
                .max()
                .unwrap_or(5)
                .max(5);
            let pantheon_w = stories
                .iter()
                .map(|s| s.pantheon_id.len())
                .max()
                .unwrap_or(8)
                .max(8);

            println!(
                "{:<title_w$} {:<pantheon_w$} {:<14} {:<4} {}",
                "Title",
                "Pantheon",
                "Category",
                "Read",
                "Themes",
                title_w = title_w,
                pantheon_w = pantheon_w
            );
            println!(
                "{} {} {} {} {}",
                "\u{2500}".repeat(title_w),
                "\u{2500}".repeat(pantheon_w),
                "\u{2500}".repeat(14),
                "\u{2500}".repeat(4),
                "\u{2500}".repeat(20)
            );

            for s in &stories {
                let mark = if read.contains(&s.id) { "\u{2713}" } else { "" };
                println!(
                    "{:<title_w$} {:<pantheon_w$} {:<14} {:<4} {}",
                    s.title,
                    s.pantheon_id,
                    s.category.label(),
                    mark,
                    s.themes.join(", "),
                    title_w = title_w,
                    pantheon_w = pantheon_w
                );
            }

            println!("\n{} stories", stories.len());
        }
    }

    Ok(())
}
