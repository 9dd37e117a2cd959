//! Interactive terminal shell and entry point.
//!
//! Thin integration layer between the dexview library and a terminal. It
//! reads one command per line from stdin, turns it into an [`Event`], runs
//! the resulting actions and redraws the frame.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  current-thread tokio runtime            │
//! │  ┌──────────────┐     ┌───────────────┐  │
//! │  │ stdin lines  │     │ fetch tasks   │  │  ← FetchWorker::handle
//! │  └──────┬───────┘     └──────┬────────┘  │
//! │         │    tokio::select!  │ mpsc      │
//! │         ▼                    ▼           │
//! │  ┌────────────────────────────────────┐  │
//! │  │ Shell: handle_event + render       │  │  ← owns AppState
//! │  └────────────────────────────────────┘  │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Command Mapping
//!
//! - `page N` → `Event::GoToPage(N)`
//! - `load N` → `Event::LoadPage(N)`
//! - `next`/`n`, `prev`/`p` → `Event::NextPage`, `Event::PreviousPage`
//! - `type NAME` → `Event::FilterByCategory(NAME)`
//! - `all` → `Event::ShowAll`
//! - `search TERM...` → `Event::Search` (no term clears the search)
//! - `suggest TERM...` → `Event::UpdateSuggestions`
//! - `pick N` → `Event::SelectSuggestion(N)`
//! - `open ID`, `close` → `Event::OpenDetail`, `Event::CloseDetail`
//! - `imgfail ID` → `Event::ImageFailed(ID)`
//! - `types` → `Event::ToggleSidebar`
//! - `select NAME` → `Event::SidebarSelect(NAME)`
//! - `reset` → `Event::Reset`
//! - `quit`/`q` → `Event::Quit`

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use dexview::api::{CatalogApi, PokeApiClient};
use dexview::worker::{FetchRequest, FetchResponse, FetchWorker};
use dexview::{handle_event, observability, ui, Action, AppState, Config, DexError, Event};

const DEFAULT_ROWS: u16 = 24;
const DEFAULT_COLS: u16 = 80;

const HELP: &str = "\
Commands:
  page N          go to page N            load N        load server page N
  next, n         next page               prev, p       previous page
  type NAME       filter by type          all           show every entry
  search TERM     search loaded entries   search        clear the search
  suggest TERM    autocomplete            pick N        choose suggestion N
  open ID         show details            close         close details
  types           toggle the type list    select NAME   pick from the type list
  imgfail ID      mark an image broken    reset         back to page 1
  help            this text               quit, q       exit";

/// Terminal catalog viewer for the PokéAPI.
#[derive(Debug, Parser)]
#[command(name = "dexview", version, about)]
struct Args {
    /// Configuration file (default: <config_dir>/dexview/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Catalog API root
    #[arg(long, env = "DEXVIEW_BASE_URL", value_name = "URL")]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Built-in theme (pokedex-red, pokedex-dark)
    #[arg(long)]
    theme: Option<String>,

    /// Custom TOML theme file
    #[arg(long, value_name = "PATH")]
    theme_file: Option<PathBuf>,

    /// Trace level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    trace_level: Option<String>,

    /// Also write plain-text logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Frame height, overriding the terminal size
    #[arg(long)]
    rows: Option<u16>,

    /// Frame width, overriding the terminal size
    #[arg(long)]
    cols: Option<u16>,
}

impl Args {
    fn overrides(&self) -> dexview::ConfigOverrides {
        dexview::ConfigOverrides {
            base_url: self.base_url.clone(),
            request_timeout_secs: self.timeout,
            theme_name: self.theme.clone(),
            theme_file: self.theme_file.clone(),
            trace_level: self.trace_level.clone(),
            log_file: self.log_file.clone(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Event(Event),
    Help,
}

/// Maps one input line to a command.
///
/// Returns `Ok(None)` for blank lines and `Err` with a message for anything
/// unrecognized.
fn map_input_line(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let number = |what: &str| -> Result<usize, String> {
        rest.parse()
            .map_err(|_| format!("{word}: expected {what}, got {rest:?}"))
    };
    let id = || -> Result<u32, String> {
        rest.trim_start_matches('#')
            .parse()
            .map_err(|_| format!("{word}: expected an id, got {rest:?}"))
    };
    let name = |what: &str| -> Result<String, String> {
        if rest.is_empty() {
            Err(format!("{word}: expected {what}"))
        } else {
            Ok(rest.to_string())
        }
    };

    let event = match word.to_lowercase().as_str() {
        "" => return Ok(None),
        "help" | "?" => return Ok(Some(Command::Help)),
        "page" => Event::GoToPage(number("a page number")?),
        "load" => Event::LoadPage(number("a page number")?),
        "next" | "n" => Event::NextPage,
        "prev" | "p" => Event::PreviousPage,
        "type" => Event::FilterByCategory(name("a type name")?),
        "all" => Event::ShowAll,
        "search" => Event::Search(rest.to_string()),
        "suggest" => Event::UpdateSuggestions(rest.to_string()),
        "pick" => Event::SelectSuggestion(number("a suggestion number")?),
        "open" => Event::OpenDetail(id()?),
        "close" => Event::CloseDetail,
        "imgfail" => Event::ImageFailed(id()?),
        "types" => Event::ToggleSidebar,
        "select" => Event::SidebarSelect(name("a type name")?),
        "reset" => Event::Reset,
        "quit" | "q" | "exit" => Event::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };

    Ok(Some(Command::Event(event)))
}

/// Shell state: the application plus everything needed to run its actions.
struct Shell {
    app: AppState,
    worker: FetchWorker<dyn CatalogApi>,
    responses: mpsc::UnboundedSender<FetchResponse>,
    rows: Option<u16>,
    cols: Option<u16>,
}

impl Shell {
    /// Frame size: configured override, else the terminal, else 24x80.
    fn frame_size(&self) -> (usize, usize) {
        let (term_cols, term_rows) =
            crossterm::terminal::size().unwrap_or((DEFAULT_COLS, DEFAULT_ROWS));
        (
            usize::from(self.rows.unwrap_or(term_rows)),
            usize::from(self.cols.unwrap_or(term_cols)),
        )
    }

    /// Handles one event. Returns `false` when the shell should exit.
    fn dispatch(&mut self, event: &Event) -> dexview::Result<bool> {
        let (should_render, actions) = handle_event(&mut self.app, event)?;

        for action in actions {
            match action {
                Action::Fetch(request) => self.spawn_fetch(request),
                Action::Exit => return Ok(false),
            }
        }

        if should_render {
            self.redraw(None)?;
        }
        Ok(true)
    }

    fn spawn_fetch(&self, request: FetchRequest) {
        let worker = self.worker.clone();
        let responses = self.responses.clone();

        tokio::spawn(async move {
            let response = worker.handle(request).await;
            if let Err(e) = responses.send(response) {
                let error = DexError::Worker(format!("response not delivered: {e}"));
                tracing::debug!(error = %error, "shell exited before response arrived");
            }
        });
    }

    /// Draws the frame, an optional message below it, and the prompt.
    fn redraw(&self, message: Option<&str>) -> dexview::Result<()> {
        let (rows, cols) = self.frame_size();
        ui::render(&self.app, rows, cols)?;

        let mut stdout = std::io::stdout().lock();
        if let Some(message) = message {
            writeln!(stdout, "{message}")?;
        }
        write!(stdout, "> ")?;
        stdout.flush()?;
        Ok(())
    }
}

async fn run(config: Config) -> dexview::Result<()> {
    let client = PokeApiClient::new(config.base_url.clone(), config.request_timeout())?;
    let api: Arc<dyn CatalogApi> = Arc::new(client);
    let (responses, mut incoming) = mpsc::unbounded_channel();

    let mut shell = Shell {
        app: dexview::initialize(&config),
        worker: FetchWorker::new(api),
        responses,
        rows: config.rows,
        cols: config.cols,
    };

    if !shell.dispatch(&Event::Mount)? {
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    break;
                };

                match map_input_line(&line) {
                    Ok(Some(Command::Event(event))) => {
                        if !shell.dispatch(&event)? {
                            break;
                        }
                    }
                    Ok(Some(Command::Help)) => shell.redraw(Some(HELP))?,
                    Ok(None) => shell.redraw(None)?,
                    Err(message) => shell.redraw(Some(&message))?,
                }
            }
            Some(response) = incoming.recv() => {
                shell.dispatch(&Event::Fetched(response))?;
            }
        }
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<Config, DexError> {
    let mut config = Config::load(args.config.as_deref())?;
    config.apply(args.overrides());
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("dexview: {e}");
            return ExitCode::FAILURE;
        }
    };

    observability::init_tracing(&config);
    tracing::info!(base_url = %config.base_url, "dexview starting");

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "dexview exited with error");
            eprintln!("dexview: {e}");
            ExitCode::FAILURE
        }
    }
}
