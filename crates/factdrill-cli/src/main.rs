//! factdrill CLI
//!
//! Terminal front end for the fact-drill engine: quiz, stats, config,
//! reset, and export.

use std::collections::BTreeSet;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use factdrill_core::{
    FactFamily, MAX_TABLE, MIN_TABLE, MasteryLevel, MasteryReport, QuizFormat, QuizItem, Session,
    SqliteStorage, Storage, UserConfig, generate_fact_families,
};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// factdrill - spaced-repetition drills for times tables
#[derive(Parser)]
#[command(name = "factdrill")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Spaced-repetition drills for multiplication and division facts")]
struct Cli {
    /// Directory holding the attempt database
    #[arg(long, global = true, env = "FACTDRILL_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive drill
    Quiz {
        /// Stop after this many questions
        #[arg(long)]
        count: Option<usize>,
    },

    /// Show the mastery grid and totals
    Stats,

    /// Show or change drill settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Delete every recorded attempt
    Reset {
        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Write the attempt log as JSON
    Export {
        /// Output file path
        output: PathBuf,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current settings
    Show,

    /// Update one or more settings
    Set {
        /// Tables to drill (comma-separated, 1-10)
        #[arg(long, value_delimiter = ',')]
        tables: Option<Vec<u32>>,
        /// Enabled formats (comma-separated: MUL, MUL_MISS, DIV, DIV_MISS_DIVISOR, DIV_MISS_DIVIDEND)
        #[arg(long, value_delimiter = ',')]
        formats: Option<Vec<QuizFormat>>,
        /// New families per day (0 = unlimited)
        #[arg(long)]
        daily_new_limit: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let storage = open_storage(cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Quiz { count } => run_quiz(storage, count),
        Commands::Stats => run_stats(&storage),
        Commands::Config { action } => match action {
            ConfigAction::Show => run_config_show(&storage),
            ConfigAction::Set {
                tables,
                formats,
                daily_new_limit,
            } => run_config_set(&storage, tables, formats, daily_new_limit),
        },
        Commands::Reset { yes } => run_reset(&storage, yes),
        Commands::Export { output } => run_export(&storage, &output),
    }
}

/// Open the store in `data_dir`, or the platform default
fn open_storage(data_dir: Option<&Path>) -> anyhow::Result<SqliteStorage> {
    let storage = match data_dir {
        Some(dir) => SqliteStorage::in_dir(dir)?,
        None => SqliteStorage::new(None)?,
    };
    Ok(storage)
}

// ============================================================================
// QUIZ
// ============================================================================

/// Run quiz command
fn run_quiz(storage: SqliteStorage, count: Option<usize>) -> anyhow::Result<()> {
    let mut session = Session::new(storage);
    session.initialize()?;

    println!("{}", "=== factdrill ===".cyan().bold());
    println!("{}", "Type the missing number. Blank line or q to stop.".dimmed());
    println!();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut asked = 0;
    let mut correct = 0;

    while count.is_none_or(|limit| asked < limit) {
        let Some(item) = session.next_item()? else {
            println!("{}", "Nothing to practice right now. Come back later!".yellow());
            break;
        };

        let Some(was_correct) = ask(&item, &mut input)? else {
            break;
        };
        session.submit_answer(&item.family_id, item.format, was_correct)?;

        asked += 1;
        if was_correct {
            correct += 1;
            println!("  {}", "Correct!".green().bold());
        } else {
            println!("  {} {}", "Not quite. The answer is".red(), item.answer.to_string().bold());
        }
    }

    println!();
    if asked > 0 {
        println!(
            "{}: {} / {} ({:.0}%)",
            "Score".white().bold(),
            correct,
            asked,
            correct as f64 / asked as f64 * 100.0
        );
    }
    Ok(())
}

/// Prompt until the input is a number; `None` means the user quit
fn ask(item: &QuizItem, input: &mut impl BufRead) -> anyhow::Result<Option<bool>> {
    loop {
        print!("{} ", item.prompt.bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if line.is_empty() || line.eq_ignore_ascii_case("q") {
            return Ok(None);
        }

        match item.check(line) {
            Ok(correct) => return Ok(Some(correct)),
            Err(e) => println!("  {}", e.to_string().yellow()),
        }
    }
}

// ============================================================================
// STATS
// ============================================================================

fn level_cell(level: MasteryLevel, effective_successes: u32) -> ColoredString {
    match level {
        MasteryLevel::Untried => " ·".dimmed(),
        MasteryLevel::Struggling => " ✗".red().bold(),
        MasteryLevel::Learning => format!("{:>2}", effective_successes).yellow(),
        MasteryLevel::Mastered => " ★".green().bold(),
    }
}

/// Run stats command
fn run_stats(storage: &SqliteStorage) -> anyhow::Result<()> {
    let attempts = storage.all_attempts()?;
    let config = storage.user_config()?;
    let families = generate_fact_families(MIN_TABLE..=MAX_TABLE);
    let report = MasteryReport::from_attempts(&families, &attempts, Utc::now().timestamp_millis());

    println!("{}", "=== factdrill Mastery ===".cyan().bold());
    println!();

    print!("   ");
    for col in MIN_TABLE..=MAX_TABLE {
        print!("{:>3}", col);
    }
    println!();
    for row in MIN_TABLE..=MAX_TABLE {
        let label = format!("{:>2} ", row);
        if config.selected_tables.contains(&row) {
            print!("{}", label.bold());
        } else {
            print!("{}", label.dimmed());
        }
        for col in MIN_TABLE..=MAX_TABLE {
            let id = FactFamily::new(row, col).id();
            match report.family(&id) {
                Some(entry) => print!(" {}", level_cell(entry.level, entry.stats.effective_successes)),
                None => print!("   "),
            }
        }
        println!();
    }
    println!();
    println!(
        "{}  {} untried  {} struggling  {} learning  {} mastered",
        "Legend:".dimmed(),
        "·".dimmed(),
        "✗".red(),
        "n".yellow(),
        "★".green()
    );
    println!();

    // Totals only over the families currently drilled
    let selected = generate_fact_families(config.selected_tables.iter().copied());
    let drilled = MasteryReport::from_attempts(&selected, &attempts, Utc::now().timestamp_millis());

    println!("{}: {}", "Families Drilled".white().bold(), selected.len());
    println!("{}: {}", "Mastered".white().bold(), drilled.mastered);
    println!("{}: {}", "Learning".white().bold(), drilled.learning);
    println!("{}: {}", "Struggling".white().bold(), drilled.struggling);
    println!("{}: {}", "Untried".white().bold(), drilled.untried);
    println!("{}: {}", "Due Now".white().bold(), drilled.due);
    println!("{}: {}", "Total Attempts".white().bold(), report.total_attempts);
    println!("{}: {:.1}%", "Accuracy".white().bold(), report.accuracy() * 100.0);

    if let Some(last) = attempts
        .last()
        .and_then(|a| DateTime::<Utc>::from_timestamp_millis(a.timestamp))
    {
        println!("{}: {}", "Last Practice".white().bold(), last.format("%Y-%m-%d %H:%M:%S"));
    }

    Ok(())
}

// ============================================================================
// CONFIG
// ============================================================================

fn print_config(config: &UserConfig) {
    let tables: Vec<String> = config.selected_tables.iter().map(u32::to_string).collect();
    let formats: Vec<&str> = config.enabled_formats.iter().map(QuizFormat::as_str).collect();
    let limit = match config.daily_new_family_limit {
        0 => "unlimited".to_string(),
        n => n.to_string(),
    };

    println!("{}: {}", "Tables".white().bold(), tables.join(", "));
    println!("{}: {}", "Formats".white().bold(), formats.join(", "));
    println!("{}: {}", "New Families Per Day".white().bold(), limit);
}

/// Run config show command
fn run_config_show(storage: &SqliteStorage) -> anyhow::Result<()> {
    println!("{}", "=== factdrill Config ===".cyan().bold());
    println!();
    print_config(&storage.user_config()?);
    Ok(())
}

/// Merge requested changes into `config`
fn apply_config_changes(
    mut config: UserConfig,
    tables: Option<Vec<u32>>,
    formats: Option<Vec<QuizFormat>>,
    daily_new_limit: Option<usize>,
) -> anyhow::Result<UserConfig> {
    if let Some(tables) = tables {
        if let Some(bad) = tables.iter().find(|t| !(MIN_TABLE..=MAX_TABLE).contains(*t)) {
            anyhow::bail!("Table {} is out of range ({}-{})", bad, MIN_TABLE, MAX_TABLE);
        }
        config.selected_tables = tables.into_iter().collect();
    }
    if let Some(formats) = formats {
        let formats: BTreeSet<QuizFormat> = formats.into_iter().collect();
        if formats.is_empty() {
            anyhow::bail!("At least one format must be enabled");
        }
        config.enabled_formats = formats;
    }
    if let Some(limit) = daily_new_limit {
        config.daily_new_family_limit = limit;
    }
    Ok(config)
}

/// Run config set command
fn run_config_set(
    storage: &SqliteStorage,
    tables: Option<Vec<u32>>,
    formats: Option<Vec<QuizFormat>>,
    daily_new_limit: Option<usize>,
) -> anyhow::Result<()> {
    if tables.is_none() && formats.is_none() && daily_new_limit.is_none() {
        anyhow::bail!("Nothing to change. Pass --tables, --formats, or --daily-new-limit.");
    }

    let config = apply_config_changes(storage.user_config()?, tables, formats, daily_new_limit)?;
    storage.save_user_config(config.clone())?;

    println!("{}", "Config updated.".green().bold());
    println!();
    print_config(&config);
    Ok(())
}

// ============================================================================
// RESET / EXPORT
// ============================================================================

/// Run reset command
fn run_reset(storage: &SqliteStorage, yes: bool) -> anyhow::Result<()> {
    let total = storage.all_attempts()?.len();
    if total == 0 {
        println!("{}", "No attempts recorded.".dimmed());
        return Ok(());
    }

    if !yes {
        print!(
            "{} Delete {} attempts? This cannot be undone. [y/N] ",
            "WARNING:".red().bold(),
            total
        );
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim().to_lowercase();

        if input != "y" && input != "yes" {
            println!("{}", "Aborted.".yellow());
            return Ok(());
        }
    }

    storage.clear_all_attempts()?;
    println!("{}", format!("Deleted {} attempts.", total).green().bold());
    Ok(())
}

/// Write the attempt log to `output` as pretty JSON, returning the count
fn export_attempts(storage: &impl Storage, output: &Path) -> anyhow::Result<usize> {
    let attempts = storage.all_attempts()?;

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(output)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &attempts)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(attempts.len())
}

/// Run export command
fn run_export(storage: &SqliteStorage, output: &Path) -> anyhow::Result<()> {
    let exported = export_attempts(storage, output)?;
    println!(
        "{}",
        format!("Exported {} attempts to {}", exported, output.display())
            .green()
            .bold()
    );
    Ok(())
}
