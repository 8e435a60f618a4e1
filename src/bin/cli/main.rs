mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mythos", about = "Mythology encyclopedia and study CLI", version)]
struct Cli {
    /// Content directory with the catalog JSON files (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory for per-user state files (default: platform data dir)
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for mythos_lib::quiz::Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Medium => Self::Medium,
            DifficultyArg::Hard => Self::Hard,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum BookmarkKindArg {
    Deity,
    Story,
    Pantheon,
}

impl From<BookmarkKindArg> for mythos_lib::bookmarks::BookmarkKind {
    fn from(arg: BookmarkKindArg) -> Self {
        match arg {
            BookmarkKindArg::Deity => Self::Deity,
            BookmarkKindArg::Story => Self::Story,
            BookmarkKindArg::Pantheon => Self::Pantheon,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API server
    Serve {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on
        #[arg(long, default_value = "4000")]
        port: u16,
        /// Skip the background sync worker
        #[arg(long)]
        no_sync: bool,
        /// Seconds between sync queue drains
        #[arg(long, default_value = "30")]
        sync_interval: u64,
    },

    /// List pantheons
    Pantheons,

    /// List deities
    Deities {
        /// Filter by pantheon id, slug, or name
        #[arg(long)]
        pantheon: Option<String>,
    },

    /// List stories
    Stories {
        /// Filter by pantheon id, slug, or name
        #[arg(long)]
        pantheon: Option<String>,
    },

    /// Show a deity, story, or pantheon and record the visit
    Show {
        /// Id, slug, or name prefix
        name: String,
    },

    /// Search across the catalog
    Search {
        /// Search query; omit to see recent and popular searches
        query: Option<String>,
        /// Maximum results
        #[arg(long, default_value = "10")]
        limit: usize,
        /// Forget recorded recent searches
        #[arg(long)]
        clear_recent: bool,
    },

    /// Progress totals
    Stats,

    /// Achievement progress
    Achievements,

    /// Spaced-repetition flashcards
    #[command(subcommand)]
    Review(ReviewCommand),

    /// Take a relationship quiz
    Quiz {
        /// Restrict to one pantheon
        #[arg(long)]
        pantheon: Option<String>,
        /// Number of questions
        #[arg(long, default_value = "10")]
        count: usize,
        /// Question difficulty
        #[arg(long, default_value = "medium", value_enum)]
        difficulty: DifficultyArg,
        /// Play against the clock: slow answers count as wrong, fast runs
        /// earn bonus XP
        #[arg(long)]
        timed: bool,
        /// Print questions with answers instead of running a session
        #[arg(long)]
        preview: bool,
    },

    /// Today's featured deity and story
    Digest,

    /// Personalized suggestions from viewing history
    Recommend,

    /// Per-pantheon mastery levels
    Mastery,

    /// Interactive branching tales
    #[command(subcommand)]
    Tales(TalesCommand),

    /// Saved bookmarks
    #[command(subcommand)]
    Bookmarks(BookmarksCommand),

    /// Offline progress sync
    #[command(subcommand)]
    Sync(SyncCommand),
}

#[derive(Subcommand)]
enum ReviewCommand {
    /// List cards due today
    Due,

    /// Grade a card after recalling it
    Grade {
        /// Card id as shown by `review due`
        card: String,
        /// 1 = forgot, 2 = hard, 3 = good, 4 = easy
        rating: u8,
    },

    /// Review session statistics
    Stats,
}

#[derive(Subcommand)]
enum TalesCommand {
    /// List tales and completion
    List,

    /// Show the current scene of a tale
    Play {
        /// Tale id, slug, or title prefix
        tale: String,
    },

    /// Pick a numbered choice at the current scene
    Choose {
        /// Tale id, slug, or title prefix
        tale: String,
        /// Choice number as shown by `tales play`
        choice: usize,
    },

    /// Restart a tale, keeping discovered endings
    Restart {
        /// Tale id, slug, or title prefix
        tale: String,
    },
}

#[derive(Subcommand)]
enum BookmarksCommand {
    /// List bookmarks, newest first
    List {
        /// Only show one kind of bookmark
        #[arg(long, value_enum)]
        kind: Option<BookmarkKindArg>,
    },

    /// Add or remove a bookmark
    Toggle {
        /// What kind of record to bookmark
        #[arg(value_enum)]
        kind: BookmarkKindArg,
        /// Record id or slug
        id: String,
    },
}

#[derive(Subcommand)]
enum SyncCommand {
    /// Queue health and snapshot info
    Status,

    /// Drain the pending queue into the progress store
    Run,

    /// Queue a snapshot of current progress
    Push,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();

    let app = app::App::new(cli.data_dir.as_deref(), cli.state_dir.as_deref())?;

    match cli.command {
        Command::Serve { host, port, no_sync, sync_interval } => {
            commands::serve::run(app, &host, port, no_sync, sync_interval)?;
        }
        Command::Pantheons => {
            commands::pantheons::run(&app, &cli.format, use_color)?;
        }
        Command::Deities { pantheon } => {
            commands::deities::run(&app, pantheon.as_deref(), &cli.format, use_color)?;
        }
        Command::Stories { pantheon } => {
            commands::stories::run(&app, pantheon.as_deref(), &cli.format, use_color)?;
        }
        Command::Show { name } => {
            commands::show::run(&app, &name, use_color)?;
        }
        Command::Search { query, limit, clear_recent } => {
            commands::search::run(
                &app,
                query.as_deref(),
                limit,
                clear_recent,
                &cli.format,
                use_color,
            )?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format)?;
        }
        Command::Achievements => {
            commands::achievements::run(&app, &cli.format, use_color)?;
        }
        Command::Review(subcmd) => match subcmd {
            ReviewCommand::Due => commands::review::run_due(&app, &cli.format, use_color)?,
            ReviewCommand::Grade { card, rating } => {
                commands::review::run_grade(&app, &card, rating)?;
            }
            ReviewCommand::Stats => commands::review::run_stats(&app, &cli.format)?,
        },
        Command::Quiz { pantheon, count, difficulty, timed, preview } => {
            commands::quiz::run(
                &app,
                pantheon.as_deref(),
                count,
                difficulty.into(),
                timed,
                preview,
                &cli.format,
                use_color,
            )?;
        }
        Command::Digest => {
            commands::digest::run(&app, &cli.format, use_color)?;
        }
        Command::Recommend => {
            commands::recommend::run(&app, &cli.format, use_color)?;
        }
        Command::Mastery => {
            commands::mastery::run(&app, &cli.format, use_color)?;
        }
        Command::Tales(subcmd) => match subcmd {
            TalesCommand::List => commands::tales::run_list(&app, &cli.format, use_color)?,
            TalesCommand::Play { tale } => commands::tales::run_play(&app, &tale, use_color)?,
            TalesCommand::Choose { tale, choice } => {
                commands::tales::run_choose(&app, &tale, choice, use_color)?;
            }
            TalesCommand::Restart { tale } => commands::tales::run_restart(&app, &tale)?,
        },
        Command::Bookmarks(subcmd) => match subcmd {
            BookmarksCommand::List { kind } => {
                commands::bookmarks::run_list(&app, kind.map(Into::into), &cli.format, use_color)?;
            }
            BookmarksCommand::Toggle { kind, id } => {
                commands::bookmarks::run_toggle(&app, kind.into(), &id)?;
            }
        },
        Command::Sync(subcmd) => match subcmd {
            SyncCommand::Status => commands::sync::run_status(&app, &cli.format)?,
            SyncCommand::Run => commands::sync::run_drain(&app)?,
            SyncCommand::Push => commands::sync::run_push(&app)?,
        },
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
