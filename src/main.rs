//! # headnav
//!
//! A terminal navigator that turns the headings of an HTML document into a
//! collapsible, searchable outline.
//!
//! ## Usage
//!
//! Launch the interactive TUI:
//! ```sh
//! headnav page.html
//! headnav https://example.com/docs
//! ```
//!
//! List all headings:
//! ```sh
//! headnav -l page.html
//! ```
//!
//! Show a filtered heading tree:
//! ```sh
//! headnav --tree --filter install page.html
//! ```

mod cli;

use clap::Parser as ClapParser;
use cli::{Cli, ColorModeArg, OutputFormat};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use headnav::input::{self, FetchOptions, InputError, InputSource};
use headnav::tree::{TreeNode, build_tree, filter_tree};
use headnav::tui::{BrowserView, ColorMode, TerminalCapabilities};
use headnav::{Config, Document};
use std::fs::File;
use std::path::Path;
use std::process;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives
const LOG_ENV: &str = "HEADNAV_LOG";

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    let interactive = args.is_interactive();

    init_logging(interactive, args.log_file.as_deref())?;

    // Priority: CLI args > config file > defaults
    let mut config = Config::load();
    if let Some(ref theme_name) = args.theme {
        config.ui.theme = theme_name.clone();
    }
    if let Some(timeout) = args.timeout {
        config.source.timeout_secs = timeout;
    }

    let source = match input::determine_input_source(args.source.as_deref()) {
        Ok(source) => source,
        Err(InputError::NoTty) => {
            eprintln!("Error: an HTML file, URL or '-' is required");
            eprintln!("\nUsage: headnav [OPTIONS] <SOURCE>");
            eprintln!("       headnav [OPTIONS] -");
            eprintln!("       curl -s <url> | headnav [OPTIONS]\n");
            process::exit(1);
        }
        Err(e) => return Err(e).wrap_err("invalid input source"),
    };

    // The fetch is the only async step; run it once and drop the runtime
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to start async runtime")?;
    let options = FetchOptions::from(&config.source);
    let loaded = runtime.block_on(input::load_document(&source, &options));
    drop(runtime);

    if !interactive {
        let doc = loaded.wrap_err_with(|| format!("failed to load {}", source.label()))?;
        return handle_cli_mode(&args, &doc);
    }

    let (doc, status) = match loaded {
        Ok(doc) => (doc, None),
        // The TUI still opens; the failure is reported in the status bar
        Err(e) => (Document::default(), Some(format!("✗ {}", e))),
    };

    run_tui(&args, config, &source, doc, status)
}

/// Install the tracing subscriber.
///
/// CLI modes log to stderr. The TUI owns the terminal, so it only logs when a
/// log file is given.
fn init_logging(interactive: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = || EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    match (interactive, log_file) {
        (false, _) => tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_target(false)
            .with_writer(std::io::stderr)
            .init(),
        (true, Some(path)) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        (true, None) => {}
    }
    Ok(())
}

fn handle_cli_mode(args: &Cli, doc: &Document) -> Result<()> {
    if args.count {
        print!("{}", cli::format_counts(doc));
        return Ok(());
    }

    let model = build_tree(&doc.records());
    let forest: Vec<TreeNode> = args
        .filter
        .as_deref()
        .and_then(|query| filter_tree(&model, query))
        .unwrap_or_else(|| model.forest());

    match args.output {
        OutputFormat::Json => println!("{}", cli::format_json(&forest)?),
        OutputFormat::Plain if args.tree => print!("{}", cli::format_tree(&forest)),
        OutputFormat::Plain => print!("{}", cli::format_list(&forest)),
    }
    Ok(())
}

fn run_tui(
    args: &Cli,
    config: Config,
    source: &InputSource,
    doc: Document,
    status: Option<String>,
) -> Result<()> {
    let color_mode = TerminalCapabilities::resolve(match args.color_mode {
        Some(ColorModeArg::Auto) => None,
        Some(ColorModeArg::Rgb) => Some(ColorMode::Rgb),
        Some(ColorModeArg::Color256) => Some(ColorMode::Indexed256),
        None => config.color_mode(),
    });

    let browser = match (args.browser, source.url()) {
        (true, Some(url)) => Some(BrowserView::new(url.clone())),
        (true, None) => {
            tracing::warn!("--browser needs a URL source; using the content pane");
            None
        }
        (false, _) => None,
    };

    // When stdin was piped, input comes from /dev/tty (see tui::tty)
    use crossterm::ExecutableCommand;
    use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
    use std::io::stdout;

    headnav::tui::tty::enable_raw_mode().inspect_err(|e| {
        eprintln!("Failed to enable raw mode: {}", e);
        eprintln!("Note: When piping input, ensure you have a controlling terminal.");
    })?;

    stdout().execute(EnterAlternateScreen).inspect_err(|_| {
        headnav::tui::tty::disable_raw_mode().ok();
    })?;

    let backend = ratatui::backend::CrosstermBackend::new(stdout());
    let mut terminal = ratatui::Terminal::new(backend).inspect_err(|_| {
        stdout().execute(LeaveAlternateScreen).ok();
        headnav::tui::tty::disable_raw_mode().ok();
    })?;

    let mut app = headnav::App::new(doc, source.label(), config, color_mode, browser);
    app.status_message = status;
    let result = headnav::tui::run(&mut terminal, app);

    stdout().execute(LeaveAlternateScreen).ok();
    headnav::tui::tty::disable_raw_mode().ok();

    result
}
