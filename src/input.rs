//! Document sources: local files, stdin and http(s) URLs.
//!
//! Reading stdin happens eagerly in [`determine_input_source`] so the TUI can
//! take over the terminal afterwards. Fetching is the only async step in the
//! program and runs once, before the event loop starts.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::{error, info};
use url::Url;

use crate::config::SourceConfig;
use crate::parser::{self, Document};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("request to {url} failed: {source}")]
    Http {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: Url,
        status: reqwest::StatusCode,
    },

    #[error("invalid URL '{input}': {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("no input: pass a file, a URL or '-' to read stdin")]
    NoTty,
}

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Url(Url),
    /// Stdin, already read to the end
    Stdin(String),
}

impl InputSource {
    /// Short name for the title bar.
    pub fn label(&self) -> String {
        match self {
            InputSource::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            InputSource::Url(url) => url.as_str().to_string(),
            InputSource::Stdin(_) => "<stdin>".to_string(),
        }
    }

    /// The base URL, when the document was fetched from the network.
    pub fn url(&self) -> Option<&Url> {
        match self {
            InputSource::Url(url) => Some(url),
            _ => None,
        }
    }
}

/// Resolve the positional argument into a source.
///
/// `-` reads stdin, anything starting with `http://` or `https://` is parsed
/// as a URL, and everything else is a path. With no argument, piped stdin is
/// used; an interactive stdin is an error.
pub fn determine_input_source(arg: Option<&str>) -> Result<InputSource, InputError> {
    match arg {
        Some("-") => read_stdin(),
        Some(arg) if is_url(arg) => Url::parse(arg)
            .map(InputSource::Url)
            .map_err(|source| InputError::InvalidUrl {
                input: arg.to_string(),
                source,
            }),
        Some(path) => Ok(InputSource::File(PathBuf::from(path))),
        None if !io::stdin().is_terminal() => read_stdin(),
        None => Err(InputError::NoTty),
    }
}

fn is_url(arg: &str) -> bool {
    let lower = arg.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn read_stdin() -> Result<InputSource, InputError> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(InputError::Stdin)?;
    Ok(InputSource::Stdin(buffer))
}

/// Network settings for URL sources.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl From<&SourceConfig> for FetchOptions {
    fn from(config: &SourceConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            user_agent: config.user_agent.clone(),
        }
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from(&SourceConfig::default())
    }
}

/// Read the raw HTML for `source`.
pub async fn fetch(source: &InputSource, options: &FetchOptions) -> Result<String, InputError> {
    match source {
        InputSource::Stdin(content) => Ok(content.clone()),
        InputSource::File(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| InputError::Io {
                    path: path.clone(),
                    source,
                })
        }
        InputSource::Url(url) => fetch_url(url, options).await,
    }
}

async fn fetch_url(url: &Url, options: &FetchOptions) -> Result<String, InputError> {
    let http_error = |source| InputError::Http {
        url: url.clone(),
        source,
    };

    let client = reqwest::Client::builder()
        .timeout(options.timeout)
        .user_agent(options.user_agent.as_str())
        .build()
        .map_err(http_error)?;

    let response = client.get(url.clone()).send().await.map_err(http_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(InputError::Status {
            url: url.clone(),
            status,
        });
    }

    response.text().await.map_err(http_error)
}

/// Fetch and parse a document.
///
/// Failures are logged here; callers decide whether to abort or continue with
/// an empty document.
pub async fn load_document(
    source: &InputSource,
    options: &FetchOptions,
) -> Result<Document, InputError> {
    let label = source.label();
    info!(source = %label, "fetching document");

    let html = fetch(source, options).await.inspect_err(|e| {
        error!(source = %label, error = %e, "failed to load document");
    })?;

    let document = parser::parse_html(&html);
    info!(
        source = %label,
        bytes = html.len(),
        headings = document.headings.len(),
        "loaded document"
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_url_and_path_detection() {
        let source = determine_input_source(Some("https://example.com/docs")).unwrap();
        assert_eq!(
            source,
            InputSource::Url(Url::parse("https://example.com/docs").unwrap())
        );

        let source = determine_input_source(Some("docs/index.html")).unwrap();
        assert_eq!(source, InputSource::File(PathBuf::from("docs/index.html")));
    }

    #[test]
    fn test_invalid_url() {
        let err = determine_input_source(Some("http://[::1")).unwrap_err();
        assert!(matches!(err, InputError::InvalidUrl { .. }));
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            InputSource::File(PathBuf::from("/tmp/guide.html")).label(),
            "guide.html"
        );
        assert_eq!(InputSource::Stdin(String::new()).label(), "<stdin>");

        let url = Url::parse("https://example.com/a").unwrap();
        assert_eq!(InputSource::Url(url.clone()).url(), Some(&url));
        assert_eq!(InputSource::Stdin(String::new()).url(), None);
    }

    #[test]
    fn test_fetch_options_from_config() {
        let config = SourceConfig {
            timeout_secs: 5,
            user_agent: "test-agent".to_string(),
        };
        let options = FetchOptions::from(&config);
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.user_agent, "test-agent");
    }

    #[tokio::test]
    async fn test_load_document_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<h1>Guide</h1><p>Intro</p><h2>Install</h2>").unwrap();

        let source = InputSource::File(file.path().to_path_buf());
        let doc = load_document(&source, &FetchOptions::default())
            .await
            .unwrap();

        assert_eq!(doc.headings.len(), 2);
        assert_eq!(doc.headings[1].text, "Install");
    }

    #[tokio::test]
    async fn test_load_document_from_stdin_buffer() {
        let source = InputSource::Stdin("<h3>Piped</h3>".to_string());
        let doc = load_document(&source, &FetchOptions::default())
            .await
            .unwrap();
        assert_eq!(doc.headings[0].level, 3);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = InputSource::File(dir.path().join("absent.html"));

        let err = load_document(&source, &FetchOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
    }
}
