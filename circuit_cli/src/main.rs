use chrono::{Datelike, NaiveDate};
use circuit_core::*;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "circuit")]
#[command(about = "Weekly circuit workout planner and runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the weekly plan (default)
    Plan,

    /// Preview the resolved queue for a day
    Queue {
        /// Training day (a, b, c or d)
        #[arg(long)]
        day: DayKey,
    },

    /// Run a workout session
    Run {
        /// Training day (a, b, c or d)
        #[arg(long)]
        day: DayKey,

        /// Simulate the full session without waiting (for testing)
        #[arg(long)]
        auto: bool,

        /// Override the configured get-ready countdown, in seconds
        #[arg(long)]
        get_ready: Option<u32>,
    },

    /// Log a custom activity (run, swim, ...)
    Log {
        /// Activity type, e.g. Run, Swim, Yoga
        #[arg(long)]
        activity: String,

        /// Duration in minutes
        #[arg(long)]
        minutes: u32,

        /// Date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Show completion history
    History,

    /// Remove one history entry by date
    Remove {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },

    /// Show or update settings
    Config {
        /// New get-ready countdown, in seconds
        #[arg(long)]
        get_ready: Option<u32>,

        /// Config file path (defaults to the standard location)
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Export history to CSV
    Export {
        /// Output file path
        #[arg(long)]
        out: PathBuf,
    },

    /// Delete all history
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    circuit_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let history_path = data_dir.join("history.json");

    match cli.command {
        Some(Commands::Plan) | None => cmd_plan(&history_path),
        Some(Commands::Queue { day }) => cmd_queue(day),
        Some(Commands::Run {
            day,
            auto,
            get_ready,
        }) => cmd_run(&history_path, day, auto, get_ready, &config),
        Some(Commands::Log {
            activity,
            minutes,
            date,
        }) => cmd_log(&history_path, activity, minutes, date),
        Some(Commands::History) => cmd_history(&history_path),
        Some(Commands::Remove { date }) => cmd_remove(&history_path, &date),
        Some(Commands::Config { get_ready, path }) => cmd_config(get_ready, path),
        Some(Commands::Export { out }) => cmd_export(&history_path, &out),
        Some(Commands::Reset { yes }) => cmd_reset(&history_path, yes),
    }
}

fn cmd_plan(history_path: &std::path::Path) -> Result<()> {
    let week = default_weekly_schedule();
    let history = HistoryStore::load(history_path)?;
    let today = day_for_weekday(chrono::Local::now().weekday());

    println!("Weekly plan:");
    for (key, day) in week.iter() {
        let marker = if Some(key) == today { " <- today" } else { "" };
        println!(
            "  {} {:<9} {} ({}, rest {}){}",
            key,
            day.day,
            day.name,
            day.rounds.label(),
            day.rest_between,
            marker
        );
        println!("      focus: {}", day.focus);
    }
    println!("\n{} workouts completed so far.", history.total_completed());
    Ok(())
}

fn cmd_queue(day_key: DayKey) -> Result<()> {
    let week = default_weekly_schedule();
    let catalog = default_catalog();
    week.ensure_valid(catalog)?;
    let day = week
        .day(day_key)
        .ok_or_else(|| Error::Other(format!("no schedule for {}", day_key)))?;

    let queue = build_queue(day, catalog);
    if queue.is_empty() {
        eprintln!("Cannot preview {}: no steps resolved.", day_key);
        return Err(Error::EmptyQueue(day.name.clone()));
    }

    println!("{} - {} ({} steps)\n", day_key, day.name, queue.len());
    for (i, step) in queue.iter().enumerate() {
        let round = if step.round > 0 {
            format!(" R{}/{}", step.round, step.total_rounds)
        } else {
            String::new()
        };
        let equipment = step
            .equipment
            .as_deref()
            .filter(|e| *e != "None")
            .map(|e| format!(" [{}]", e))
            .unwrap_or_default();
        println!(
            "  {:>2}. {:<9}{:<6} {} - {}{}",
            i + 1,
            step.stage.label(),
            round,
            step.name,
            step.prescription(),
            equipment
        );
    }
    Ok(())
}

fn cmd_run(
    history_path: &std::path::Path,
    day_key: DayKey,
    auto: bool,
    get_ready: Option<u32>,
    config: &Config,
) -> Result<()> {
    let week = default_weekly_schedule();
    let catalog = default_catalog();
    week.ensure_valid(catalog)?;
    let day = week
        .day(day_key)
        .ok_or_else(|| Error::Other(format!("no schedule for {}", day_key)))?;

    let get_ready_seconds = get_ready.unwrap_or(config.runner.get_ready_seconds);
    let mut session = match WorkoutSession::start(day_key, day, catalog, get_ready_seconds) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Cannot start workout: {}", e);
            return Err(e);
        }
    };

    println!(
        "Starting {} - {} ({} steps)\n",
        day_key,
        day.name,
        session.queue().len()
    );

    let summary = if auto {
        run_auto(&mut session)
    } else {
        match run_interactive(&mut session)? {
            Some(summary) => summary,
            None => {
                session.abandon();
                println!("Workout abandoned.");
                return Ok(());
            }
        }
    };

    HistoryStore::update(history_path, |history| {
        history.record(&summary);
        Ok(())
    })?;

    println!(
        "\nWorkout complete! {} in {} - saved to history.",
        summary.day_key,
        format_elapsed(summary.elapsed_seconds)
    );
    Ok(())
}

/// Drive the whole session without sleeping: tick timed steps to
/// completion, advance through everything else.
fn run_auto(session: &mut WorkoutSession) -> SessionSummary {
    loop {
        while session.runner().is_ticking() {
            session.tick();
        }
        match session.advance() {
            Advance::Moved => {}
            Advance::Completed(summary) => return summary,
        }
    }
}

/// Interactive per-step loop. Returns None when the user quits early.
fn run_interactive(session: &mut WorkoutSession) -> Result<Option<SessionSummary>> {
    loop {
        let step = session.current_step();
        let round = if step.round > 0 {
            format!(" (round {}/{})", step.round, step.total_rounds)
        } else {
            String::new()
        };
        println!(
            "[{}/{}] {}{} - {}",
            session.position() + 1,
            session.queue().len(),
            step.name,
            round,
            step.prescription()
        );

        run_countdown(session);

        let prompt = if session.is_last() {
            "[Enter] finish  [p]rev  [r]estart  [q]uit > "
        } else {
            "[Enter] next  [p]rev  [r]estart  [q]uit > "
        };
        match prompt_choice(prompt)?.as_str() {
            "p" => session.retreat(),
            "r" => {
                session.resume_step();
                // Re-run the countdown for this step
                continue;
            }
            "q" => return Ok(None),
            _ => match session.advance() {
                Advance::Moved => {}
                Advance::Completed(summary) => return Ok(Some(summary)),
            },
        }
    }
}

/// Tick the current step's countdown in real time, if it has one.
fn run_countdown(session: &mut WorkoutSession) {
    while session.runner().is_ticking() {
        std::thread::sleep(std::time::Duration::from_secs(1));
        let out = session.tick();
        match out.phase {
            RunnerPhase::GetReady => print!("\r  get ready... {}  ", out.remaining),
            RunnerPhase::Work => {
                if out.cue {
                    // Terminal bell as the near-end cue
                    print!("\r  work: {} \x07 ", out.remaining);
                } else {
                    print!("\r  work: {}   ", out.remaining);
                }
            }
            RunnerPhase::Finished => println!("\r  done!          "),
            RunnerPhase::Idle => {}
        }
        let _ = io::stdout().flush();
    }
}

fn cmd_log(
    history_path: &std::path::Path,
    activity_type: String,
    minutes: u32,
    date: Option<String>,
) -> Result<()> {
    let date_key = match date {
        Some(text) => {
            // Validate the caller-supplied date before keying history on it
            let parsed = NaiveDate::parse_from_str(&text, "%Y-%m-%d")
                .map_err(|e| Error::Other(format!("invalid date '{}': {}", text, e)))?;
            local_date_key(parsed)
        }
        None => local_date_key(chrono::Local::now().date_naive()),
    };

    let activity = LoggedActivity {
        id: uuid::Uuid::new_v4(),
        activity_type: activity_type.clone(),
        duration_label: format!("{} min", minutes),
        completed: true,
        timestamp: Some(chrono::Utc::now()),
    };

    HistoryStore::update(history_path, |history| {
        history.log_activity(date_key.clone(), activity);
        Ok(())
    })?;

    println!("Logged {} ({} min) on {}.", activity_type, minutes, date_key);
    Ok(())
}

fn cmd_history(history_path: &std::path::Path) -> Result<()> {
    let history = HistoryStore::load(history_path)?;
    if history.is_empty() {
        println!("No history yet.");
        return Ok(());
    }

    println!("History (newest first):");
    let entries: Vec<_> = history.iter().collect();
    for (date_key, entry) in entries.into_iter().rev() {
        println!("  {}  {}", date_key, entry.describe());
    }
    println!("\nTotal completed: {}", history.total_completed());
    Ok(())
}

fn cmd_remove(history_path: &std::path::Path, date: &str) -> Result<()> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| Error::Other(format!("invalid date '{}': {}", date, e)))?;
    let date_key = local_date_key(parsed);

    let mut removed = None;
    HistoryStore::update(history_path, |history| {
        removed = history.remove(&date_key);
        Ok(())
    })?;

    match removed {
        Some(entry) => println!("Removed {}  {}", date_key, entry.describe()),
        None => println!("No entry for {}.", date_key),
    }
    Ok(())
}

fn cmd_config(get_ready: Option<u32>, path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(Config::default_config_path);
    let mut config = if path.exists() {
        Config::load_from(&path)?
    } else {
        Config::default()
    };

    if let Some(seconds) = get_ready {
        config.runner.get_ready_seconds = seconds;
        config.save_to(&path)?;
        println!("Saved settings to {}.", path.display());
    }

    println!("get-ready countdown: {}s", config.runner.get_ready_seconds);
    println!("data directory: {}", config.data.data_dir.display());
    Ok(())
}

fn cmd_export(history_path: &std::path::Path, out: &std::path::Path) -> Result<()> {
    let history = HistoryStore::load(history_path)?;
    let count = history.export_csv(out)?;
    println!("Exported {} entries to {}.", count, out.display());
    Ok(())
}

fn cmd_reset(history_path: &std::path::Path, yes: bool) -> Result<()> {
    if !yes {
        let answer = prompt_choice("Delete all history? [y/N] > ")?;
        if answer != "y" {
            println!("Aborted.");
            return Ok(());
        }
    }

    HistoryStore::update(history_path, |history| {
        history.reset();
        Ok(())
    })?;

    println!("History cleared.");
    Ok(())
}

fn prompt_choice(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_lowercase())
}
