use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let store = app.progress_store();
    let stats = store.stats();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Plain => {
            println!("Deities viewed      {}", stats.deities_viewed);
            println!("Stories read        {}", stats.stories_read);
            println!("Pantheons explored  {}", stats.pantheons_explored);
            println!("Locations visited   {}", stats.locations_visited);
            println!("Quizzes taken       {}", stats.quizzes_taken);
            println!("Average quiz score  {:.1}", stats.average_quiz_score);
            println!("Achievements        {}", stats.achievements_unlocked);
            println!("Daily streak        {}", stats.daily_streak);
            println!("Total XP            {}", stats.total_xp);
        }
    }

    Ok(())
}
