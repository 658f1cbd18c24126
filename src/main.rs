mod app;
mod calendar;
mod config;
mod formats;
mod help;
mod picker;
mod prompt;
mod settings;
mod theme;
use crate::app::{App, Outcome};
use crate::config::FileStore;
use crate::picker::Picker;
use anyhow::{Context, anyhow};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::{self, Stderr};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use time::{Date, OffsetDateTime, format_description::FormatItem, macros::format_description};
use tracing_subscriber::EnvFilter;

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

type StderrTerminal = Terminal<CrosstermBackend<Stderr>>;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        config: Option<PathBuf>,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut config = None;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('l') | Arg::Long("log-file") => {
                    log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            date,
            config,
            log_file,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                date,
                config,
                log_file,
            } => {
                if let Some(path) = log_file {
                    init_logging(&path)?;
                }
                let store = match config {
                    Some(path) => FileStore::new(path),
                    None => FileStore::in_home().context("failed to locate config file")?,
                };
                tracing::info!(config = %store.path().display(), "starting");
                let mut picker = Picker::new(local_today());
                if let Some(date) = date {
                    picker = picker.start_date(date);
                }
                let app = App::new(picker, store);
                let outcome = with_terminal(|terminal| {
                    app.run(terminal).context("terminal I/O failed")
                })?;
                match outcome {
                    Outcome::Selected(s) => println!("{s}"),
                    Outcome::Quit => tracing::info!("quit without selecting"),
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: datepick [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Pick a date from a terminal calendar and print it to standard output");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>    Read and save settings at <PATH> [default: ~/.datepick]");
                println!("  -l, --log-file <PATH>  Write diagnostic logs to <PATH>");
                println!("  -h, --help             Display this help message and exit");
                println!("  -V, --version          Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn local_today() -> Date {
    match OffsetDateTime::now_local() {
        Ok(now) => now.date(),
        Err(e) => {
            tracing::warn!(error = %e, "local offset unknown; using UTC date");
            OffsetDateTime::now_utc().date()
        }
    }
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

/// Runs `func` with a full-screen terminal drawn on standard error, leaving
/// standard output free for the result
fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(&mut StderrTerminal) -> anyhow::Result<T>,
{
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));
    enable_raw_mode().context("failed to enable raw mode")?;
    let r = setup_terminal().and_then(|mut terminal| func(&mut terminal));
    restore_terminal().context("failed to restore terminal")?;
    r
}

fn setup_terminal() -> anyhow::Result<StderrTerminal> {
    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(stderr)).context("failed to create terminal")?;
    terminal.hide_cursor().context("failed to hide cursor")?;
    Ok(terminal)
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stderr(), LeaveAlternateScreen, crossterm::cursor::Show)
}
