//! `rooms` CLI — free rooms, room schedules and autocomplete from a `rooms.json`
//! schedule document.
//!
//! ## Usage
//!
//! ```sh
//! # Free rooms right now
//! rooms --schedule rooms.json show
//!
//! # Free rooms on a day from 10:30
//! rooms show --date 01.03.2024 --time 10:30
//!
//! # Events in a room (German labels, JSON output)
//! rooms --lang de --format json show --date 01.03.2024 --room A101
//!
//! # Room-name autocomplete and occupied days
//! rooms search a1
//! rooms dates A101
//!
//! # Document summary
//! ROOMS_JSON=rooms.json rooms info
//! ```

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveTime};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use room_resolver::{DateKey, Labels, Query, RoomFinder, Schedule};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rooms",
    version,
    about = "Find free rooms and room schedules in a rooms.json document"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Schedule document to read
    #[arg(short, long, env = "ROOMS_JSON", default_value = "rooms.json", global = true)]
    schedule: String,

    /// Language of titles and messages
    #[arg(long, value_enum, default_value_t = Lang::En, global = true)]
    lang: Lang,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// More log output on stderr (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Show free rooms, or the events of a room, for a date and time
    Show {
        /// Date as dd.mm.yyyy or yyyy-mm-dd (defaults to today)
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Time as HH:MM; without it, today uses the current time and other days 00:00
        #[arg(short, long, value_parser = parse_time)]
        time: Option<NaiveTime>,
        /// Room to list events for; empty or unknown shows free rooms
        #[arg(short, long, default_value = "")]
        room: String,
    },
    /// List room names containing PARTIAL (case-insensitive)
    Search {
        #[arg(default_value = "")]
        partial: String,
    },
    /// List the days on which a room has events
    Dates { room: String },
    /// Show when the document was generated and how much it holds
    Info,
}

#[derive(Clone, Copy, ValueEnum)]
enum Lang {
    En,
    De,
}

impl Lang {
    fn labels(self) -> Labels {
        match self {
            Lang::En => Labels::english(),
            Lang::De => Labels::german(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let schedule = load_schedule(&cli.schedule)?;
    let finder = RoomFinder::with_schedule(schedule, cli.lang.labels());

    match cli.command {
        Commands::Show { date, time, room } => {
            let now = Local::now().naive_local();
            let mut query = Query::now(now);
            if let Some(date) = date {
                query = query.with_date(date, now);
            }
            if let Some(time) = time {
                query = query.with_manual_time(time);
            }
            let query = query.with_room(room);
            debug!(date = %query.date_key(), time = %query.time, room = %query.room, "resolving");

            let title = finder.title(&query);
            let lines = finder.lines(&query);
            if cli.format == OutputFormat::Json {
                print_json(&json!({
                    "title": title,
                    "resolution": finder.resolve(&query),
                    "lines": lines,
                }))?;
            } else {
                println!("{}", title);
                for line in lines {
                    println!("  {}", line);
                }
            }
        }
        Commands::Search { partial } => {
            let rooms = finder.filtered_rooms(&partial);
            if cli.format == OutputFormat::Json {
                print_json(&json!(rooms))?;
            } else {
                for room in rooms {
                    println!("{}", room);
                }
            }
        }
        Commands::Dates { room } => {
            let dates: Vec<String> = finder
                .marked_dates(&room)
                .into_iter()
                .map(|d| DateKey::from(d).to_string())
                .collect();
            if cli.format == OutputFormat::Json {
                print_json(&json!(dates))?;
            } else {
                for date in dates {
                    println!("{}", date);
                }
            }
        }
        Commands::Info => {
            let schedule = finder.schedule().context("Schedule not loaded")?;
            let last_updated = finder.last_updated();
            let rooms = schedule.room_count();
            let events = schedule.bookings().len();
            if cli.format == OutputFormat::Json {
                print_json(&json!({
                    "last_updated": last_updated,
                    "rooms": rooms,
                    "events": events,
                }))?;
            } else {
                println!(
                    "Last updated: {}",
                    last_updated.as_deref().unwrap_or("unknown")
                );
                println!("Rooms:        {}", rooms);
                println!("Events:       {}", events);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_schedule(path: &str) -> Result<Schedule> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schedule: {}", path))?;
    Schedule::from_json(&json).with_context(|| format!("Failed to parse schedule: {}", path))
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Accepts `dd.mm.yyyy` (as used for date keys) or ISO `yyyy-mm-dd`.
fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    DateKey::parse(s)
        .ok()
        .and_then(|key| key.to_date())
        .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .ok_or_else(|| format!("Invalid date '{}': expected dd.mm.yyyy or yyyy-mm-dd", s))
}

fn parse_time(s: &str) -> std::result::Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|e| format!("Invalid time '{}': {}", s, e))
}
