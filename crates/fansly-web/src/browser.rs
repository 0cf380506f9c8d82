//! Opening URLs in the user's browser
//!
//! The side effect sits behind [`BrowserOpener`] so callers can swap it out
//! in tests. Opening is fire-and-forget: failures are logged, never returned.
//! Any delay before opening is the caller's choice.

use std::io;
use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::debug;

use crate::GET_STARTED_URL;

/// Something that can show a URL to the user
pub trait BrowserOpener: Send + Sync {
    /// Open `url`
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Opens URLs with the platform's default handler
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl BrowserOpener for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        let mut command = if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            // Empty title argument, otherwise `start` treats a quoted URL as one
            c.args(["/C", "start", ""]);
            c
        } else if cfg!(target_os = "macos") {
            Command::new("open")
        } else {
            Command::new("xdg-open")
        };

        spawn_detached(command.arg(url))
    }
}

/// Spawn `command` without blocking; a background thread reaps the child
fn spawn_detached(command: &mut Command) -> io::Result<()> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    std::thread::spawn(move || {
        if let Err(e) = child.wait() {
            debug!(error = %e, "Browser opener did not exit cleanly");
        }
    });

    Ok(())
}

/// Open `url`, swallowing any error
pub fn open_url(opener: &dyn BrowserOpener, url: &str) {
    if let Err(e) = opener.open(url) {
        debug!(url, error = %e, "Could not open browser");
    }
}

/// Wait for `delay`, then open `url`, swallowing any error
pub async fn open_url_after(opener: &dyn BrowserOpener, url: &str, delay: Duration) {
    tokio::time::sleep(delay).await;
    open_url(opener, url);
}

/// Open the project's "Getting Started" documentation
pub fn open_get_started_url(opener: &dyn BrowserOpener) {
    open_url(opener, GET_STARTED_URL);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        opened: Mutex<Vec<String>>,
        fail: bool,
    }

    impl BrowserOpener for Recorder {
        fn open(&self, url: &str) -> io::Result<()> {
            self.opened.lock().unwrap().push(url.to_string());
            if self.fail {
                Err(io::Error::new(io::ErrorKind::NotFound, "no browser"))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_open_get_started_url() {
        let recorder = Recorder::default();
        open_get_started_url(&recorder);
        assert_eq!(*recorder.opened.lock().unwrap(), vec![GET_STARTED_URL]);
    }

    #[test]
    fn test_open_url_swallows_errors() {
        let recorder = Recorder {
            fail: true,
            ..Default::default()
        };
        open_url(&recorder, "https://example.com");
        assert_eq!(recorder.opened.lock().unwrap().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_spawn_detached() {
        assert!(spawn_detached(&mut Command::new("true")).is_ok());
        assert!(spawn_detached(&mut Command::new("/nonexistent/opener")).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_url_after_waits() {
        let recorder = Recorder::default();
        let start = tokio::time::Instant::now();

        open_url_after(&recorder, "https://example.com", Duration::from_secs(10)).await;

        assert!(start.elapsed() >= Duration::from_secs(10));
        assert_eq!(*recorder.opened.lock().unwrap(), vec!["https://example.com"]);
    }
}
