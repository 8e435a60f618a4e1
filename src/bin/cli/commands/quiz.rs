use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use anyhow::Result;

use mythos_lib::achievements::evaluate;
use mythos_lib::quiz::{generate_quiz, quiz_id, quiz_xp, Difficulty};

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    pantheon_name: Option<&str>,
    count: usize,
    difficulty: Difficulty,
    timed: bool,
    preview: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let pantheon_id = match pantheon_name {
        Some(name) => Some(app.find_pantheon(name)?.id.clone()),
        None => None,
    };
    let questions = generate_quiz(&app.catalog, pantheon_id.as_deref(), count, difficulty);

    if questions.is_empty() {
        println!("Not enough catalog content to build a quiz.");
        return Ok(());
    }

    if preview {
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&questions)?),
            OutputFormat::Plain => {
                for (i, question) in questions.iter().enumerate() {
                    println!("{}. {}", i + 1, question.question_text);
                    for (j, option) in question.options.iter().enumerate() {
                        let marker = if option == &question.correct_answer { " *" } else { "" };
                        println!("   {}) {}{}", letter(j), option, marker);
                    }
                    println!();
                }
            }
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut correct: u32 = 0;
    let mut answered: u32 = 0;
    let limit = Duration::from_secs(u64::from(difficulty.time_limit_secs()));

    if timed {
        println!(
            "{} questions, {} difficulty, {}s per question. Answer with a-d, or q to stop.\n",
            questions.len(),
            difficulty.label(),
            difficulty.time_limit_secs()
        );
    } else {
        println!(
            "{} questions, {} difficulty. Answer with a-d, or q to stop.\n",
            questions.len(),
            difficulty.label()
        );
    }

    for (i, question) in questions.iter().enumerate() {
        println!("{}. {}", i + 1, question.question_text);
        for (j, option) in question.options.iter().enumerate() {
            println!("   {}) {}", letter(j), option);
        }
        print!("> ");
        io::stdout().flush()?;

        let started = Instant::now();
        let Some(Ok(line)) = lines.next() else {
            break;
        };
        let answer = line.trim().to_lowercase();
        if answer == "q" {
            break;
        }

        let picked = answer
            .bytes()
            .next()
            .filter(|b| (b'a'..=b'd').contains(b))
            .map(|b| (b - b'a') as usize)
            .and_then(|index| question.options.get(index));

        answered += 1;
        match picked {
            Some(option) if question.is_correct(option) => {
                if timed && started.elapsed() > limit {
                    println!(
                        "{}\n",
                        paint(
                            &format!("Right, but over the {}s limit.", limit.as_secs()),
                            Color::YELLOW,
                            use_color,
                        )
                    );
                } else {
                    correct += 1;
                    println!("{}\n", paint("Correct!", Color::GREEN, use_color));
                }
            }
            _ => {
                println!(
                    "{}\n",
                    paint(
                        &format!("The answer was: {}", question.correct_answer),
                        Color::YELLOW,
                        use_color,
                    )
                );
            }
        }
    }

    if answered == 0 {
        println!("No answers given.");
        return Ok(());
    }

    let score = (correct as f64 / answered as f64 * 100.0).round() as u32;
    let xp = quiz_xp(correct, answered, difficulty, timed);

    let mut store = app.progress_store();
    store.update_streak();
    store.record_quiz_score(&quiz_id(pantheon_id.as_deref()), score);
    store.add_xp(xp);
    let unlocked = evaluate(&mut store, &app.catalog);

    println!("Score: {}/{} ({}%)  +{} XP", correct, answered, score, xp);
    for achievement in unlocked {
        println!(
            "Achievement unlocked: {} {} (+{} XP)",
            achievement.glyph.symbol(),
            achievement.title,
            achievement.xp
        );
    }

    Ok(())
}

fn letter(index: usize) -> char {
    (b'a' + index as u8) as char
}
