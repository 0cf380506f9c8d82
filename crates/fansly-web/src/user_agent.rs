//! Browser user-agent selection
//!
//! Picks a user-agent string from an externally supplied candidate list
//! (e.g. a published list of current browser user agents) that matches the
//! requested browser and the operating system we are running on.
//!
//! Selection is first-match in input order. A candidate qualifies when two
//! independent predicates hold:
//! - [`matches_identity`]: it names the browser token and the OS family
//! - [`has_consistent_version`]: the OS version extracted from it appears
//!   verbatim in the same string

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, error, warn};

/// Chrome on Windows; the customary fallback user agent
pub const CHROME_WINDOWS_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

const WINDOWS_VERSION_PATTERN: &str = r"Windows NT ([\d.]+)";
const MACOS_VERSION_PATTERN: &str = r"Mac OS X ([\d_.]+)";
const LINUX_VERSION_PATTERN: &str = r"Linux ([\d.]+)";

static WINDOWS_VERSION: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(WINDOWS_VERSION_PATTERN));
static MACOS_VERSION: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(MACOS_VERSION_PATTERN));
static LINUX_VERSION: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(LINUX_VERSION_PATTERN));

/// Operating system class of the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Windows,
    MacOs,
    Linux,
    /// Anything else, with the platform name for diagnostics
    Other(&'static str),
}

impl HostOs {
    /// Detect the OS this binary runs on
    pub fn current() -> Self {
        Self::from_platform(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` style name
    pub fn from_platform(os: &'static str) -> Self {
        match os {
            "windows" => HostOs::Windows,
            "macos" => HostOs::MacOs,
            "linux" => HostOs::Linux,
            other => HostOs::Other(other),
        }
    }

    /// User-agent signature for this OS, if we know how to match it
    pub fn signature(&self) -> Option<OsSignature> {
        match self {
            HostOs::Windows => Some(OsSignature {
                marker: "Windows",
                version_pattern: WINDOWS_VERSION_PATTERN,
                dotted_version: false,
            }),
            HostOs::MacOs => Some(OsSignature {
                marker: "Macintosh",
                version_pattern: MACOS_VERSION_PATTERN,
                dotted_version: true,
            }),
            HostOs::Linux => Some(OsSignature {
                marker: "Linux",
                version_pattern: LINUX_VERSION_PATTERN,
                dotted_version: false,
            }),
            HostOs::Other(_) => None,
        }
    }

    /// Compiled version pattern, built once per process
    pub fn version_regex(&self) -> Option<&'static Result<Regex, regex::Error>> {
        match self {
            HostOs::Windows => Some(&*WINDOWS_VERSION),
            HostOs::MacOs => Some(&*MACOS_VERSION),
            HostOs::Linux => Some(&*LINUX_VERSION),
            HostOs::Other(_) => None,
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostOs::Windows => write!(f, "Windows"),
            HostOs::MacOs => write!(f, "macOS"),
            HostOs::Linux => write!(f, "Linux"),
            HostOs::Other(name) => write!(f, "{}", name),
        }
    }
}

/// How an OS shows up inside a user-agent string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OsSignature {
    /// Family marker that must appear in the candidate
    pub marker: &'static str,
    /// Regex whose first group captures the OS version
    pub version_pattern: &'static str,
    /// Version uses `_` separators that are rewritten to `.` before checking
    pub dotted_version: bool,
}

/// Map a browser's display name to the token it uses in user agents
///
/// Edge only reports itself as "Edg". Opera and Brave are not covered by the
/// usual candidate lists, so they pass through unchanged.
pub fn normalize_browser(browser: &str) -> &str {
    match browser {
        "Microsoft Edge" => "Edg",
        other => other,
    }
}

/// Candidate names the browser token and the OS family
pub fn matches_identity(candidate: &str, browser_token: &str, signature: &OsSignature) -> bool {
    candidate.contains(browser_token) && candidate.contains(signature.marker)
}

/// OS version extracted from the candidate reappears verbatim in it
pub fn has_consistent_version(candidate: &str, signature: &OsSignature, pattern: &Regex) -> bool {
    let Some(version) = pattern.captures(candidate).and_then(|c| c.get(1)) else {
        return false;
    };

    if signature.dotted_version {
        candidate.contains(&version.as_str().replace('_', "."))
    } else {
        candidate.contains(version.as_str())
    }
}

/// Guess the user agent for `based_on_browser` on the host OS
///
/// Returns `default_ua` when nothing matches. Never fails.
pub fn guess_user_agent<S: AsRef<str>>(
    user_agents: &[S],
    based_on_browser: &str,
    default_ua: &str,
) -> String {
    guess_user_agent_for(user_agents, based_on_browser, default_ua, HostOs::current())
}

/// Same as [`guess_user_agent`] with an explicit OS
pub fn guess_user_agent_for<S: AsRef<str>>(
    user_agents: &[S],
    based_on_browser: &str,
    default_ua: &str,
    os: HostOs,
) -> String {
    let browser_token = normalize_browser(based_on_browser);

    if let Some(found) = select(user_agents, browser_token, os) {
        debug!(browser = browser_token, os = %os, "Selected user agent");
        return found.to_string();
    }

    warn!(default_ua, "{}", missing_user_agent_message(browser_token, os));
    default_ua.to_string()
}

fn missing_user_agent_message(browser_token: &str, os: HostOs) -> String {
    format!(
        "Missing user-agent for {} & OS: {}. The default user agent will be used instead.",
        browser_token, os
    )
}

fn select<'a, S: AsRef<str>>(
    user_agents: &'a [S],
    browser_token: &str,
    os: HostOs,
) -> Option<&'a str> {
    let signature = os.signature()?;

    let pattern = match os.version_regex()? {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "User-agent version pattern failed to compile");
            return None;
        }
    };

    user_agents
        .iter()
        .map(|ua| ua.as_ref())
        .find(|ua| {
            matches_identity(ua, browser_token, &signature)
                && has_consistent_version(ua, &signature, pattern)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIREFOX_WIN: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0";
    const CHROME_WIN: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
    const EDGE_WIN: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.2478.67";
    const CHROME_MAC: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
    const FIREFOX_MAC: &str =
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.4; rv:125.0) Gecko/20100101 Firefox/125.0";
    const CHROME_LINUX: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
    const CHROME_LINUX_VERSIONED: &str = "Mozilla/5.0 (X11; Linux 6.1; x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

    fn pattern(os: HostOs) -> (OsSignature, Regex) {
        let sig = os.signature().unwrap();
        let re = Regex::new(sig.version_pattern).unwrap();
        (sig, re)
    }

    #[test]
    fn test_single_windows_chrome_is_selected() {
        let candidates = [CHROME_WIN];
        assert_eq!(
            guess_user_agent_for(&candidates, "Chrome", "default", HostOs::Windows),
            CHROME_WIN
        );
    }

    #[test]
    fn test_first_match_in_input_order() {
        let newer = CHROME_WIN.replace("124.0.0.0", "125.0.0.0");
        let candidates = vec![FIREFOX_WIN.to_string(), newer.clone(), CHROME_WIN.to_string()];
        assert_eq!(
            guess_user_agent_for(candidates.as_slice(), "Chrome", "default", HostOs::Windows),
            newer
        );
    }

    #[test]
    fn test_edge_uses_edg_token() {
        assert_eq!(normalize_browser("Microsoft Edge"), "Edg");
        assert_eq!(normalize_browser("Firefox"), "Firefox");

        let candidates = [CHROME_WIN, EDGE_WIN];
        assert_eq!(
            guess_user_agent_for(&candidates, "Microsoft Edge", "default", HostOs::Windows),
            EDGE_WIN
        );
    }

    #[test]
    fn test_empty_candidates_return_default() {
        let candidates: [&str; 0] = [];
        for os in [HostOs::Windows, HostOs::MacOs, HostOs::Linux, HostOs::Other("freebsd")] {
            assert_eq!(
                guess_user_agent_for(&candidates, "Chrome", CHROME_WINDOWS_USER_AGENT, os),
                CHROME_WINDOWS_USER_AGENT
            );
        }
    }

    #[test]
    fn test_unknown_os_returns_default() {
        let candidates = [CHROME_WIN, CHROME_MAC, CHROME_LINUX_VERSIONED];
        assert_eq!(
            guess_user_agent_for(&candidates, "Chrome", "default", HostOs::Other("freebsd")),
            "default"
        );
    }

    #[test]
    fn test_wrong_os_returns_default() {
        let candidates = [CHROME_WIN];
        assert_eq!(
            guess_user_agent_for(&candidates, "Chrome", "default", HostOs::MacOs),
            "default"
        );
    }

    #[test]
    fn test_macos_dotted_version() {
        // Underscored versions never reappear once rewritten to dots
        let candidates = [CHROME_MAC, FIREFOX_MAC];
        assert_eq!(
            guess_user_agent_for(&candidates, "Chrome", "default", HostOs::MacOs),
            "default"
        );
        assert_eq!(
            guess_user_agent_for(&candidates, "Firefox", "default", HostOs::MacOs),
            FIREFOX_MAC
        );
    }

    #[test]
    fn test_linux_requires_version() {
        let candidates = [CHROME_LINUX, CHROME_LINUX_VERSIONED];
        assert_eq!(
            guess_user_agent_for(&candidates, "Chrome", "default", HostOs::Linux),
            CHROME_LINUX_VERSIONED
        );
    }

    #[test]
    fn test_matches_identity() {
        let (sig, _) = pattern(HostOs::Windows);
        assert!(matches_identity(CHROME_WIN, "Chrome", &sig));
        assert!(!matches_identity(CHROME_WIN, "Firefox", &sig));
        assert!(!matches_identity(CHROME_MAC, "Chrome", &sig));
    }

    #[test]
    fn test_has_consistent_version() {
        let (sig, re) = pattern(HostOs::Windows);
        assert!(has_consistent_version(CHROME_WIN, &sig, &re));
        assert!(!has_consistent_version("Chrome on Windows", &sig, &re));

        let (sig, re) = pattern(HostOs::MacOs);
        assert!(has_consistent_version(FIREFOX_MAC, &sig, &re));
        assert!(!has_consistent_version(CHROME_MAC, &sig, &re));
    }

    #[test]
    fn test_version_regex_is_cached() {
        for os in [HostOs::Windows, HostOs::MacOs, HostOs::Linux] {
            let first = os.version_regex().unwrap().as_ref().unwrap();
            let second = os.version_regex().unwrap().as_ref().unwrap();
            assert!(std::ptr::eq(first, second));
            assert_eq!(first.as_str(), os.signature().unwrap().version_pattern);
        }
        assert!(HostOs::Other("freebsd").version_regex().is_none());
    }

    #[test]
    fn test_missing_message_does_not_assume_chrome() {
        let message = missing_user_agent_message("Firefox", HostOs::Linux);
        assert!(message.contains("Firefox"));
        assert!(message.contains("Linux"));
        assert!(message.contains("default user agent"));
        assert!(!message.contains("Chrome"));
    }

    #[test]
    fn test_host_os_from_platform() {
        assert_eq!(HostOs::from_platform("windows"), HostOs::Windows);
        assert_eq!(HostOs::from_platform("macos"), HostOs::MacOs);
        assert_eq!(HostOs::from_platform("linux"), HostOs::Linux);
        assert_eq!(HostOs::from_platform("freebsd"), HostOs::Other("freebsd"));
        assert!(HostOs::Other("freebsd").signature().is_none());
        assert_eq!(HostOs::MacOs.to_string(), "macOS");
    }
}
