//! fansly-web CLI - command-line access to the fansly-web utilities

use clap::{Parser, Subcommand, ValueEnum};
use fansly_web::{
    get_last_path_segment, guess_user_agent, guess_user_agent_for, open_get_started_url,
    query_value, split_url, HostOs, QueryValue, SplitUrl, SystemBrowser, WebClient,
    CHROME_WINDOWS_USER_AGENT,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Output format for the split subcommand
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// One `key: value` line per field
    #[default]
    Text,
    /// JSON object
    Json,
}

/// Operating system override for user-agent matching
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OsArg {
    Windows,
    Macos,
    Linux,
}

impl From<OsArg> for HostOs {
    fn from(os: OsArg) -> Self {
        match os {
            OsArg::Windows => HostOs::Windows,
            OsArg::Macos => HostOs::MacOs,
            OsArg::Linux => HostOs::Linux,
        }
    }
}

/// fansly-web - URL, user-agent and release helpers for Fansly Downloader NG
#[derive(Parser, Debug)]
#[command(name = "fansly-web")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the last path segment of a URL
    Segment {
        /// URL to parse
        url: String,
    },
    /// Split a URL into base and file URLs
    Split {
        /// URL to split
        url: String,

        /// Output format
        #[arg(long, short, default_value = "text")]
        output: OutputFormat,
    },
    /// Print the first value of a query-string key
    ///
    /// Prints an empty line when the key is present but blank and exits with
    /// status 1 when it is absent and no default is given.
    Query {
        /// URL to parse
        url: String,

        /// Query-string key
        key: String,

        /// Value printed when the key is absent
        #[arg(long)]
        default: Option<String>,
    },
    /// Pick a user agent for a browser from a JSON list of candidates
    GuessUa {
        /// JSON file holding an array of user-agent strings
        #[arg(long)]
        candidates: PathBuf,

        /// Browser name, e.g. "Chrome" or "Microsoft Edge"
        #[arg(long, default_value = "Chrome")]
        browser: String,

        /// Fallback user agent
        #[arg(long)]
        default: Option<String>,

        /// Match for this OS instead of the host
        #[arg(long)]
        os: Option<OsArg>,
    },
    /// Print the account username for an authorization token
    Account {
        /// Authorization token
        #[arg(long)]
        token: String,
    },
    /// Print the latest release descriptor as JSON
    Release {
        /// Version reported in the User-Agent
        #[arg(long, default_value = env!("CARGO_PKG_VERSION"))]
        current_version: String,

        /// `owner/repo` to check instead of the default
        #[arg(long)]
        repository: Option<String>,
    },
    /// Open the Getting Started documentation in a browser
    Docs,
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Segment { url } => writeln_safe(&get_last_path_segment(&url)),
        Commands::Split { url, output } => match split_url(&url) {
            Ok(split) => writeln_safe(&format_split(&split, output)),
            Err(e) => fail(&e.to_string()),
        },
        Commands::Query { url, key, default } => {
            match query_output(query_value(&url, &key), default) {
                Some(line) => writeln_safe(&line),
                None => fail(&format!("Key not found: {}", key)),
            }
        }
        Commands::GuessUa {
            candidates,
            browser,
            default,
            os,
        } => run_guess_ua(&candidates, &browser, default, os),
        Commands::Account { token } => {
            let client = build_client(None);
            match client.fetch_account_identity(&token).await {
                Some(username) => writeln_safe(&username),
                None => fail("No account found for token"),
            }
        }
        Commands::Release {
            current_version,
            repository,
        } => {
            let client = build_client(repository);
            match client.fetch_latest_release(&current_version).await {
                Some(info) => {
                    let json = serde_json::to_string_pretty(&info)
                        .unwrap_or_else(|e| fail(&format!("Error serializing release: {}", e)));
                    writeln_safe(&json);
                }
                None => fail("Release info unavailable"),
            }
        }
        Commands::Docs => open_get_started_url(&SystemBrowser),
    }
}

fn run_guess_ua(candidates: &Path, browser: &str, default: Option<String>, os: Option<OsArg>) {
    let raw = std::fs::read_to_string(candidates)
        .unwrap_or_else(|e| fail(&format!("Error reading {}: {}", candidates.display(), e)));
    let user_agents: Vec<String> = serde_json::from_str(&raw)
        .unwrap_or_else(|e| fail(&format!("Error parsing candidates: {}", e)));

    let default_ua = default.as_deref().unwrap_or(CHROME_WINDOWS_USER_AGENT);
    let selected = match os {
        Some(os) => guess_user_agent_for(user_agents.as_slice(), browser, default_ua, os.into()),
        None => guess_user_agent(user_agents.as_slice(), browser, default_ua),
    };
    writeln_safe(&selected);
}

/// Line to print for a query lookup; `None` when the key is absent without a default
fn query_output(value: QueryValue, default: Option<String>) -> Option<String> {
    match value {
        QueryValue::Absent => default,
        QueryValue::EmptyPresent => Some(String::new()),
        QueryValue::Value(v) => Some(v),
    }
}

fn build_client(repository: Option<String>) -> WebClient {
    let mut builder = WebClient::builder();
    if let Some(repository) = repository {
        builder = builder.repository(repository);
    }
    builder
        .build()
        .unwrap_or_else(|e| fail(&format!("Error: {}", e)))
}

/// Format a split URL for output
fn format_split(split: &SplitUrl, output: OutputFormat) -> String {
    match output {
        OutputFormat::Text => format!(
            "base_url: {}\nfile_url: {}",
            split.base_url, split.file_url
        ),
        OutputFormat::Json => serde_json::json!({
            "base_url": split.base_url,
            "file_url": split.file_url,
        })
        .to_string(),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SplitUrl {
        split_url("https://h/a/b/c.ext?x=1").unwrap()
    }

    #[test]
    fn test_format_split_text() {
        assert_eq!(
            format_split(&sample(), OutputFormat::Text),
            "base_url: https://h/a/b\nfile_url: https://h/a/b/c.ext"
        );
    }

    #[test]
    fn test_format_split_json() {
        let value: serde_json::Value =
            serde_json::from_str(&format_split(&sample(), OutputFormat::Json)).unwrap();
        assert_eq!(value["base_url"], "https://h/a/b");
        assert_eq!(value["file_url"], "https://h/a/b/c.ext");
    }

    #[test]
    fn test_query_output_keeps_absent_and_blank_apart() {
        assert_eq!(
            query_output(query_value("https://h/p?y=2", "x"), None),
            None
        );
        assert_eq!(
            query_output(query_value("https://h/p?x=&y=2", "x"), None),
            Some(String::new())
        );
        assert_eq!(
            query_output(query_value("https://h/p?y=2", "x"), Some("fb".to_string())),
            Some("fb".to_string())
        );
        assert_eq!(
            query_output(query_value("https://h/p?x=1&x=2", "x"), None),
            Some("1".to_string())
        );
    }

    #[test]
    fn test_cli_parses_guess_ua() {
        let cli = Cli::try_parse_from([
            "fansly-web",
            "guess-ua",
            "--candidates",
            "uas.json",
            "--browser",
            "Microsoft Edge",
            "--os",
            "macos",
        ])
        .unwrap();

        match cli.command {
            Commands::GuessUa { browser, os, .. } => {
                assert_eq!(browser, "Microsoft Edge");
                assert_eq!(HostOs::from(os.unwrap()), HostOs::MacOs);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_release_defaults_to_crate_version() {
        let cli = Cli::try_parse_from(["fansly-web", "release"]).unwrap();
        match cli.command {
            Commands::Release {
                current_version,
                repository,
            } => {
                assert_eq!(current_version, env!("CARGO_PKG_VERSION"));
                assert!(repository.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
