use anyhow::Result;

use mythos_lib::content::Deity;

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &App,
    pantheon_name: Option<&str>,
    format: &OutputFormat,
    _use_color: bool,
) -> Result<()> {
    let mut deities: Vec<&Deity> = match pantheon_name {
        Some(name) => {
            let pantheon = app.find_pantheon(name)?;
            app.catalog.deities_for_pantheon(&pantheon.id)
        }
        None => app.catalog.deities().iter().collect(),
    };
    deities.sort_by_key(|d| d.importance_rank);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&deities)?);
        }
        OutputFormat::Plain => {
            if deities.is_empty() {
                println!("No deities found.");
                return Ok(());
            }

            let store = app.progress_store();
            let viewed = &store.progress().deities_viewed;

            let name_w = deities.iter().map(|d| d.name.len()).max().unwrap_or(4).max(4);
            let pantheon_w = deities
                .iter()
                .map(|d| d.pantheon_id.len())
                .max()
                .unwrap_or(8)
                .max(8);

            println!(
                "{:<name_w$} {:<pantheon_w$} {:>4}  {:<4} {}",
                "Name",
                "Pantheon",
                "Rank",
                "Seen",
                "Domains",
                name_w = name_w,
                pantheon_w = pantheon_w
            );
            println!(
                "{} {} {}  {} {}",
                "\u{2500}".repeat(name_w),
                "\u{2500}".repeat(pantheon_w),
                "\u{2500}".repeat(4),
                "\u{2500}".repeat(4),
                "\u{2500}".repeat(20)
            );

            for d in &deities {
                let seen = if viewed.contains(&d.id) { "\u{2713}" } else { "" };
                println!(
                    "{:<name_w$} {:<pantheon_w$} {:>4}  {:<4} {}",
                    d.name,
                    d.pantheon_id,
                    d.importance_rank,
                    seen,
                    d.domains.join(", "),
                    name_w = name_w,
                    pantheon_w = pantheon_w
                );
            }

            println!("\n{} deities", deities.len());
        }
    }

    Ok(())
}
