use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "headnav")]
#[command(version)]
#[command(about = "A terminal navigator that turns HTML headings into a collapsible outline")]
#[command(
    long_about = "headnav - Browse an HTML document by its headings.\n\n\
    Launch without flags for the interactive outline + content view, with\n\
    expand/collapse, live filtering and jump-to-anchor. Use flags for CLI\n\
    mode to list, filter and export the heading tree.\n\n\
    Examples:\n  \
    headnav page.html                       # Interactive TUI mode\n  \
    headnav https://example.com/docs        # Fetch and browse a URL\n  \
    headnav -l page.html                    # List all headings\n  \
    headnav --tree --filter install doc.html # Filtered heading tree\n  \
    curl -s https://example.com | headnav --count"
)]
pub struct Cli {
    /// HTML file, http(s) URL, or '-' for stdin
    ///
    /// If no source is given and stdin is piped, input is read from stdin.
    ///
    /// Examples:
    ///   headnav page.html
    ///   headnav https://example.com/guide
    ///   cat page.html | headnav -l
    #[arg(value_hint = clap::ValueHint::AnyPath)]
    pub source: Option<String>,

    /// List all headings in the document (non-interactive)
    ///
    /// Displays all headings with their level indicators (# for h1, ## for h2, etc.).
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Show heading tree structure with box-drawing characters (non-interactive)
    #[arg(long = "tree")]
    pub tree: bool,

    /// Filter headings by text (case-insensitive)
    ///
    /// Keeps matching headings and the ancestors leading to them.
    /// Works with --list, --tree and JSON output.
    ///
    /// Example: --filter "install" matches "Installation" and "Installing"
    #[arg(long = "filter", value_name = "PATTERN")]
    pub filter: Option<String>,

    /// Output format for --list and --tree modes
    ///
    ///   plain - Human-readable text (default)
    ///   json  - Nested heading tree with anchor ids
    #[arg(short = 'o', long = "output", default_value = "plain")]
    pub output: OutputFormat,

    /// Show heading counts per level
    #[arg(long = "count")]
    pub count: bool,

    /// Color theme for the TUI (OceanDark, Nord, Gruvbox)
    ///
    /// Overrides the theme in the config file.
    #[arg(long = "theme", value_name = "THEME")]
    pub theme: Option<String>,

    /// Color mode: auto, rgb or 256
    ///
    /// Overrides auto-detection and the config file.
    #[arg(long = "color-mode", value_name = "MODE")]
    pub color_mode: Option<ColorModeArg>,

    /// Timeout in seconds for fetching URLs
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Open activated headings in the default browser (URL sources only)
    ///
    /// The browser is pointed at <url>#<anchor>; the content pane follows too.
    #[arg(long = "browser")]
    pub browser: bool,

    /// Write TUI-mode logs to this file (filter with HEADNAV_LOG)
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// True when no non-interactive mode was requested.
    pub fn is_interactive(&self) -> bool {
        !self.list && !self.tree && !self.count && self.output != OutputFormat::Json
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorModeArg {
    Auto,
    Rgb,
    #[value(name = "256")]
    Color256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_flags_is_interactive() {
        let cli = Cli::parse_from(["headnav", "page.html"]);
        assert!(cli.is_interactive());
        assert_eq!(cli.source.as_deref(), Some("page.html"));
    }

    #[test]
    fn test_json_output_is_cli_mode() {
        let cli = Cli::parse_from(["headnav", "-o", "json", "--filter", "x", "-"]);
        assert!(!cli.is_interactive());
        assert_eq!(cli.filter.as_deref(), Some("x"));
    }

    #[test]
    fn test_color_mode_values() {
        let cli = Cli::parse_from(["headnav", "--color-mode", "256", "a.html"]);
        assert!(matches!(cli.color_mode, Some(ColorModeArg::Color256)));
        assert!(Cli::try_parse_from(["headnav", "--color-mode", "16", "a.html"]).is_err());
    }
}
