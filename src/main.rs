use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};
use vitals_types::{sleep_duration, ClockTime, MedicationKind, SymptomKind, TriggerKind};

use vitals_log::logging::{self, LogTarget};
use vitals_log::repository::decode;
use vitals_log::ui::Theme;
use vitals_log::view::table;
use vitals_log::{
    events, form, insights, ui, App, DashboardOptions, EntryForm, ExportFormat, FileStorage,
    Repository, Settings,
};

#[derive(Parser, Debug)]
#[command(name = "vitals-log", version)]
#[command(about = "Personal health log: blood pressure, pulse and sleep with zone flags")]
struct Args {
    /// Settings file (TOML); defaults to <config dir>/vitals-log/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the log file, overriding the settings
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// What to do; opens the dashboard when omitted
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new reading
    Add(AddArgs),

    /// Show the latest entries, newest first
    List {
        /// Number of entries to show (defaults to table_limit)
        #[arg(short = 'n', long, conflicts_with = "all")]
        limit: Option<usize>,

        /// Show every entry
        #[arg(short, long)]
        all: bool,

        /// Include entry ids (needed by `remove`)
        #[arg(long)]
        ids: bool,
    },

    /// Show entries from the last days, oldest first
    Recent {
        /// Window size in days (defaults to chart_days)
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Delete an entry by id
    Remove {
        id: u64,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Write the log as Markdown or JSON
    Export {
        /// md or json
        #[arg(short, long, default_value = "md")]
        format: ExportFormat,

        /// Output file, `-` for stdout (defaults to daily-log.md / health-data.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the log with a JSON export
    Import {
        path: PathBuf,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the zone of a reading without saving it
    Classify {
        systolic: u16,
        diastolic: u16,
        pulse: u16,
    },

    /// Compute sleep duration between two HH:MM times
    Sleep { start: ClockTime, end: ClockTime },

    /// Scan free text for common triggers (reads stdin when TEXT is omitted)
    Analyze { text: Option<String> },

    /// Interactive dashboard
    Dashboard,
}

#[derive(ClapArgs, Debug, Default)]
struct AddArgs {
    /// Systolic pressure, mmHg
    #[arg(short, long)]
    systolic: Option<String>,

    /// Diastolic pressure, mmHg
    #[arg(short, long)]
    diastolic: Option<String>,

    /// Pulse, bpm
    #[arg(short, long)]
    pulse: Option<String>,

    /// When the reading was taken: 2024-05-01T08:30 or RFC 3339 (defaults to now)
    #[arg(long)]
    at: Option<String>,

    /// Overall wellness, 1-5
    #[arg(short, long)]
    wellness: Option<u8>,

    /// Fell asleep at, HH:MM
    #[arg(long)]
    sleep_start: Option<String>,

    /// Woke up at, HH:MM
    #[arg(long)]
    sleep_end: Option<String>,

    /// Sleep quality, 1-5
    #[arg(long)]
    sleep_quality: Option<u8>,

    /// Triggers, comma separated (sleep-deprivation, head-tilt, neck-spasm, stress, weather, temperature)
    #[arg(short, long, value_delimiter = ',')]
    trigger: Vec<TriggerKind>,

    /// Hours slept, for the sleep-deprivation trigger
    #[arg(long)]
    sleep_hours: Option<f64>,

    /// Minutes spent with head tilted, for the head-tilt trigger
    #[arg(long)]
    head_tilt_minutes: Option<u32>,

    /// Neck spasm intensity, 1-5
    #[arg(long)]
    neck_spasm: Option<u8>,

    /// Stress level, 1-5
    #[arg(long)]
    stress: Option<u8>,

    /// Symptoms, comma separated (rhythm-disruption, tinnitus, occipital-pain, instability)
    #[arg(long, value_delimiter = ',')]
    symptom: Vec<SymptomKind>,

    /// Occipital pain intensity, 1-5
    #[arg(long)]
    occipital_pain: Option<u8>,

    /// Any other symptom, free text
    #[arg(long)]
    other_symptom: Option<String>,

    /// Medications, comma separated (aminalon, magnesium-b6)
    #[arg(short, long, value_delimiter = ',')]
    medication: Vec<MedicationKind>,

    /// Aminalon dose, mg
    #[arg(long)]
    aminalon_dose: Option<f64>,

    /// Any other medication, free text
    #[arg(long)]
    other_medication: Option<String>,

    /// Free-text notes
    #[arg(long)]
    notes: Option<String>,
}

impl From<AddArgs> for EntryForm {
    fn from(args: AddArgs) -> Self {
        EntryForm {
            datetime: args.at,
            systolic: args.systolic,
            diastolic: args.diastolic,
            pulse: args.pulse,
            sleep_start: args.sleep_start,
            sleep_end: args.sleep_end,
            sleep_quality: args.sleep_quality,
            wellness: args.wellness,
            triggers: args.trigger,
            sleep_hours: args.sleep_hours,
            head_tilt_minutes: args.head_tilt_minutes,
            neck_spasm: args.neck_spasm,
            stress_level: args.stress,
            symptoms: args.symptom,
            occipital_pain: args.occipital_pain,
            other_symptoms: args.other_symptom,
            medications: args.medication,
            aminalon_dose: args.aminalon_dose,
            other_medications: args.other_medication,
            notes: args.notes,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings =
        Settings::load(args.config.as_deref()).context("Failed to load settings")?;
    if let Some(dir) = args.data_dir {
        settings.data_dir = dir;
    }

    let command = args.command.unwrap_or(Command::Dashboard);

    // The dashboard owns the terminal, so it only ever logs to a file
    let target = match (&command, &settings.log_file) {
        (Command::Dashboard, Some(path)) => LogTarget::File(path),
        (Command::Dashboard, None) => LogTarget::Off,
        _ => LogTarget::Stderr,
    };
    logging::init(&settings.log_level, target).context("Failed to set up logging")?;
    debug!(?settings, "loaded settings");

    match command {
        Command::Add(add) => {
            let mut repo = open_repository(&settings)?;
            let entry = form::submit(&mut repo, &add.into())?;
            println!(
                "Saved {} at {}: {} {}",
                entry.blood_pressure(),
                entry.timestamp.format("%Y-%m-%d %H:%M"),
                entry.zone.emoji(),
                entry.zone.label()
            );
        }
        Command::List { limit, all, ids } => {
            let repo = open_repository(&settings)?;
            let limit = if all { None } else { Some(limit.unwrap_or(settings.table_limit)) };
            print!("{}", table::render_plain(repo.list(limit), ids));
        }
        Command::Recent { days } => {
            let repo = open_repository(&settings)?;
            let entries = repo.recent(days.unwrap_or(settings.chart_days));
            print!("{}", table::render_plain(&entries, false));
        }
        Command::Remove { id, yes } => {
            let mut repo = open_repository(&settings)?;
            let Some(entry) = repo.get(id) else {
                bail!("No entry with id {}", id);
            };
            let question = format!(
                "Delete the {} reading from {}?",
                entry.blood_pressure(),
                entry.timestamp.format("%Y-%m-%d %H:%M")
            );
            if !yes && !confirm(&question)? {
                println!("Nothing deleted.");
                return Ok(());
            }
            repo.remove(id)?;
            println!("Entry {} deleted.", id);
        }
        Command::Export { format, output } => {
            let repo = open_repository(&settings)?;
            export(&repo, format, output)?;
        }
        Command::Import { path, yes } => {
            let mut repo = open_repository(&settings)?;
            import(&mut repo, &path, yes)?;
        }
        Command::Classify { systolic, diastolic, pulse } => {
            let zone = settings.thresholds().classify(systolic, diastolic, pulse);
            println!("{} {}", zone.emoji(), zone.label());
        }
        Command::Sleep { start, end } => {
            // both times are present, so there is always a duration
            if let Some(duration) = sleep_duration(Some(start), Some(end)) {
                println!("{} ({:.2} h)", duration, duration.total_hours);
            }
        }
        Command::Analyze { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
                    buf
                }
            };
            let findings = insights::analyze(&text)?;
            print!("{}", insights::report(&findings));
        }
        Command::Dashboard => {
            let repo = open_repository(&settings)?;
            let options = DashboardOptions {
                table_limit: settings.table_limit,
                chart_days: settings.chart_days,
                export_dir: PathBuf::from("."),
            };
            run_tui(App::new(repo, options).with_theme(Theme::auto_detect()))?;
        }
    }

    Ok(())
}

/// Open the file-backed repository described by `settings`.
fn open_repository(settings: &Settings) -> Result<Repository> {
    let storage = FileStorage::new(&settings.data_dir);
    let repo = Repository::open(Box::new(storage), settings.storage_key.as_str())
        .with_context(|| format!("Failed to open log {}", settings.storage_path().display()))?;
    Ok(repo
        .with_thresholds(settings.thresholds())
        .with_utc_offset(settings.utc_offset()?))
}

/// Ask a yes/no question on stderr; anything but y/yes is a no.
fn confirm(question: &str) -> Result<bool> {
    eprint!("{} [y/N] ", question);
    io::stderr().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn export(repo: &Repository, format: ExportFormat, output: Option<PathBuf>) -> Result<()> {
    let content = format.render(repo.log())?;
    let path = output.unwrap_or_else(|| PathBuf::from(format.default_file_name()));

    if path == Path::new("-") {
        io::stdout().write_all(content.as_bytes())?;
        return Ok(());
    }

    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), %format, "exported log");
    println!("Exported {} entries to {}", repo.len(), path.display());
    Ok(())
}

fn import(repo: &mut Repository, path: &Path, yes: bool) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    // Validate before asking, so a bad file never prompts
    let incoming =
        decode(&bytes).with_context(|| format!("{} is not a log export", path.display()))?;

    let question = format!(
        "Replace the current {} entries with {} entries from {}?",
        repo.len(),
        incoming.len(),
        path.display()
    );
    if !yes && !confirm(&question)? {
        println!("Import cancelled.");
        return Ok(());
    }

    repo.deserialize(&bytes)?;
    println!("Imported {} entries.", repo.len());
    Ok(())
}

/// Run the dashboard until the user quits
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Nothing changes on its own, so a long poll is fine
        if let Some(Event::Key(key)) = events::poll_event(Duration::from_millis(250))? {
            if key.kind == KeyEventKind::Press {
                events::handle_key_event(app, key);
            }
        }
    }
    Ok(())
}
