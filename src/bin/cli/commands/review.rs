use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::Local;

use mythos_lib::review::{algorithm, Rating, ReviewScheduler};

use crate::app::App;
use crate::render::terminal::{bold, dim};
use crate::OutputFormat;

pub fn run_due(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let today = Local::now().date_naive();
    let scheduler = ReviewScheduler::new(Arc::clone(&app.backend));
    let store = app.progress_store();
    let cards = scheduler.generate_cards(store.progress(), &app.catalog);
    let due = scheduler.due_cards(&cards, today);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&due)?);
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("No cards yet. Explore some deities and stories first.");
                return Ok(());
            }
            if due.is_empty() {
                println!("Nothing due today ({} cards scheduled).", cards.len());
                return Ok(());
            }

            for card in &due {
                println!("{}", bold(&card.prompt, use_color));
                for (i, choice) in card.choices.iter().enumerate() {
                    println!("   {}. {}", i + 1, choice);
                }
                let (interval, ease) = scheduler
                    .state()
                    .cards
                    .get(&card.id)
                    .map(|c| (c.interval, c.ease_factor))
                    .unwrap_or((1, algorithm::DEFAULT_EASE_FACTOR));
                let next = algorithm::preview_intervals(interval, ease);
                println!(
                    "{}",
                    dim(
                        &format!(
                            "   id: {}  (1 forgot {} / 2 hard {} / 3 good {} / 4 easy {})",
                            card.id,
                            algorithm::format_interval(next[0]),
                            algorithm::format_interval(next[1]),
                            algorithm::format_interval(next[2]),
                            algorithm::format_interval(next[3]),
                        ),
                        use_color
                    )
                );
                println!();
            }

            println!("{} cards due", due.len());
            println!("Grade with: mythos review grade <id> <1-4>");
        }
    }

    Ok(())
}

pub fn run_grade(app: &App, card_id: &str, rating: u8) -> Result<()> {
    let Some(rating) = Rating::from_value(rating) else {
        bail!("Rating must be 1 (forgot) to 4 (easy)");
    };

    let today = Local::now().date_naive();
    let mut scheduler = ReviewScheduler::new(Arc::clone(&app.backend));
    let store = app.progress_store();
    let cards = scheduler.generate_cards(store.progress(), &app.catalog);

    let Some(card) = cards.iter().find(|c| c.id == card_id) else {
        bail!(
            "No card with id '{}'. List due cards with: mythos review due",
            card_id
        );
    };

    let schedule = scheduler.review(card_id, rating, today);

    println!("Answer: {}", card.answer);
    println!(
        "Next review in {}",
        algorithm::format_interval(schedule.interval)
    );

    Ok(())
}

pub fn run_stats(app: &App, format: &OutputFormat) -> Result<()> {
    let scheduler = ReviewScheduler::new(Arc::clone(&app.backend));
    let stats = scheduler.state().stats.clone();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Plain => {
            println!("Cards reviewed      {}", stats.total_reviewed);
            println!("Current streak      {}", stats.current_streak);
            println!("Longest streak      {}", stats.longest_streak);
            println!("Average accuracy    {:.1}%", stats.average_accuracy);
            println!(
                "Today               {} correct, {} incorrect",
                stats.correct_today, stats.incorrect_today
            );
        }
    }

    Ok(())
}
