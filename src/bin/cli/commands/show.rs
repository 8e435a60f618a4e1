use std::sync::Arc;

use anyhow::{bail, Result};

use mythos_lib::achievements::{evaluate, Achievement};
use mythos_lib::bookmarks::ReadingTracker;
use mythos_lib::content::{Confidence, Deity, Pantheon, Story};
use mythos_lib::recommend::{related_stories, similar_deities};

use crate::app::App;
use crate::render::terminal::{bold, dim, paint, Color};

pub fn run(app: &App, name: &str, use_color: bool) -> Result<()> {
    if let Some(deity) = app.catalog.deity(name) {
        return show_deity(app, deity, use_color);
    }
    if let Some(story) = app.catalog.story(name) {
        return show_story(app, story, use_color);
    }
    if let Some(pantheon) = app.catalog.pantheon(name) {
        return show_pantheon(app, pantheon, use_color);
    }

    // Fall back to name-prefix matching across the three record kinds.
    if let Ok(deity) = app.find_deity(name) {
        return show_deity(app, deity, use_color);
    }
    if let Ok(story) = app.find_story(name) {
        return show_story(app, story, use_color);
    }
    if let Ok(pantheon) = app.find_pantheon(name) {
        return show_pantheon(app, pantheon, use_color);
    }

    bail!("No deity, story, or pantheon matching '{}'", name)
}

fn confidence_tag(confidence: Confidence) -> &'static str {
    match confidence {
        Confidence::High => "",
        Confidence::Medium => " [medium]",
        Confidence::Low => " [disputed]",
    }
}

fn print_unlocked(unlocked: &[&'static Achievement], use_color: bool) {
    for achievement in unlocked {
        println!();
        println!(
            "{}",
            paint(
                &format!(
                    "Achievement unlocked: {} {} (+{} XP)",
                    achievement.glyph.symbol(),
                    achievement.title,
                    achievement.xp
                ),
                Color::GREEN,
                use_color,
            )
        );
    }
}

fn show_deity(app: &App, deity: &Deity, use_color: bool) -> Result<()> {
    let mut store = app.progress_store();
    store.update_streak();
    store.track_deity_viewed(&deity.id);
    let unlocked = evaluate(&mut store, &app.catalog);

    let pantheon_name = app
        .catalog
        .pantheon(&deity.pantheon_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| deity.pantheon_id.clone());

    println!("{}", bold(&deity.name, use_color));
    println!(
        "{}",
        dim(
            &format!("{} pantheon, rank {}", pantheon_name, deity.importance_rank),
            use_color
        )
    );
    if !deity.alternate_names.is_empty() {
        println!("Also known as: {}", deity.alternate_names.join(", "));
    }

    println!();
    println!("{}", deity.description);
    if let Some(origin) = &deity.origin_story {
        println!();
        println!("{}", origin);
    }

    if !deity.domains.is_empty() {
        println!();
        println!("Domains: {}", deity.domains.join(", "));
    }
    if !deity.symbols.is_empty() {
        println!("Symbols: {}", deity.symbols.join(", "));
    }

    let relationships = app.catalog.relationships_for_deity(&deity.id);
    if !relationships.is_empty() {
        println!();
        println!("{}", bold("Relationships", use_color));
        for rel in &relationships {
            println!(
                "  {} {} {}{}",
                app.catalog.deity_name(&rel.from_deity_id),
                rel.kind.label(),
                app.catalog.deity_name(&rel.to_deity_id),
                confidence_tag(rel.confidence)
            );
        }
    }

    let similar = similar_deities(&app.catalog, &deity.id, 4);
    if !similar.is_empty() {
        println!();
        println!("{}", bold("Similar figures", use_color));
        for s in &similar {
            if s.shared_domains.is_empty() {
                println!("  {}", s.deity.name);
            } else {
                println!("  {} ({})", s.deity.name, s.shared_domains.join(", "));
            }
        }
    }

    print_unlocked(&unlocked, use_color);
    Ok(())
}

fn show_story(app: &App, story: &Story, use_color: bool) -> Result<()> {
    let mut store = app.progress_store();
    store.update_streak();
    store.track_story_read(&story.id);
    let mut tracker = ReadingTracker::new(Arc::clone(&app.backend));
    tracker.set_progress(&story.id, 100);
    let unlocked = evaluate(&mut store, &app.catalog);

    let pantheon_name = app
        .catalog
        .pantheon(&story.pantheon_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| story.pantheon_id.clone());

    println!("{}", bold(&story.title, use_color));
    println!(
        "{}",
        dim(
            &format!("{} pantheon, {}", pantheon_name, story.category.label()),
            use_color
        )
    );

    println!();
    println!("{}", story.summary);
    if !story.full_text.is_empty() {
        println!();
        println!("{}", story.full_text);
    }

    if !story.themes.is_empty() {
        println!();
        println!("Themes: {}", story.themes.join(", "));
    }
    if !story.featured_deities.is_empty() {
        let names: Vec<String> = story
            .featured_deities
            .iter()
            .map(|id| app.catalog.deity_name(id))
            .collect();
        println!("Featuring: {}", names.join(", "));
    }

    let related = related_stories(&app.catalog, &story.id, 3);
    if !related.is_empty() {
        println!();
        println!("{}", bold("Related tales", use_color));
        for r in &related {
            println!("  {}", r.story.title);
        }
    }

    print_unlocked(&unlocked, use_color);
    Ok(())
}

fn show_pantheon(app: &App, pantheon: &Pantheon, use_color: bool) -> Result<()> {
    let mut store = app.progress_store();
    store.update_streak();
    store.track_pantheon_explored(&pantheon.id);
    let unlocked = evaluate(&mut store, &app.catalog);

    println!("{}", bold(&pantheon.name, use_color));
    let era = pantheon.era.as_deref().unwrap_or("era unknown");
    println!("{}", dim(&format!("{}, {}", pantheon.culture, era), use_color));

    println!();
    println!("{}", pantheon.description);

    let mut deities = app.catalog.deities_for_pantheon(&pantheon.id);
    deities.sort_by_key(|d| d.importance_rank);
    if !deities.is_empty() {
        println!();
        println!("{}", bold("Principal figures", use_color));
        for d in deities.iter().take(5) {
            println!("  {} ({})", d.name, d.domains.join(", "));
        }
        if deities.len() > 5 {
            println!("  and {} more", deities.len() - 5);
        }
    }

    let stories = app.catalog.stories_for_pantheon(&pantheon.id);
    if !stories.is_empty() {
        println!();
        println!("{} stories in the catalog", stories.len());
    }

    print_unlocked(&unlocked, use_color);
    Ok(())
}
