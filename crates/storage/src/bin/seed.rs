use std::fmt;

use chrono::{DateTime, Utc};
use course_core::model::{Category, LessonDraft, LessonId, Role};
use storage::repository::Storage;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    category: String,
    lessons: u32,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidLessons { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLessons { raw } => write!(f, "invalid --lessons value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("ACADEMY_DB_URL").unwrap_or_else(|_| "sqlite:dev.sqlite3".into());
        let mut category =
            std::env::var("ACADEMY_CATEGORY").unwrap_or_else(|_| "writing-basics".into());
        let mut lessons = std::env::var("ACADEMY_LESSONS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(5);
        let mut now = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    db_url = require_value(&mut args, "--db")?;
                }
                "--category" => {
                    category = require_value(&mut args, "--category")?;
                }
                "--lessons" => {
                    let value = require_value(&mut args, "--lessons")?;
                    lessons = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidLessons { raw: value.clone() })?;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            category,
            lessons,
            now,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:dev.sqlite3)");
    eprintln!("  --category <key>          Series category to seed (default: writing-basics)");
    eprintln!("  --lessons <n>             Number of sample lessons to upsert (default: 5)");
    eprintln!("  --now <rfc3339>           Fixed current time for deterministic seeding");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  ACADEMY_DB_URL, ACADEMY_CATEGORY, ACADEMY_LESSONS");
}

const SAMPLE_TITLES: [(&str, Role); 5] = [
    ("Finding your niche", Role::Free),
    ("Writing your first script", Role::Free),
    ("Recording on a budget", Role::Premium),
    ("Editing for retention", Role::Premium),
    ("Growing past the plateau", Role::Master),
];

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let now = args.now.unwrap_or_else(Utc::now);
    let category = Category::new(args.category.clone())?;

    let next_id = storage
        .lessons
        .max_lesson_id()
        .await?
        .map_or(1, |id| id.value() + 1);

    for i in 0..args.lessons {
        let idx = (i as usize) % SAMPLE_TITLES.len();
        let (title, required_role) = SAMPLE_TITLES[idx];
        let id = LessonId::new(next_id + u64::from(i));
        let lesson = LessonDraft {
            title: title.to_string(),
            category: category.clone(),
            duration_minutes: 10 + i * 5,
            required_role,
            media_reference: format!("vid-{}", id.value()),
        }
        .validate(now)?
        .assign_id(id);

        storage.lessons.upsert_lesson(&lesson).await?;
        tracing::debug!(id = id.value(), title, "seeded lesson");
    }

    tracing::info!(
        lessons = args.lessons,
        category = %category,
        db = %args.db_url,
        "seed complete"
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
