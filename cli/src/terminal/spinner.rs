//! The progress line drawn under the log output while collectors run.

use std::io::Write;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

const TICK: Duration = Duration::from_millis(120);
/// Rows between message redraws. Large accounts emit rows faster than the
/// terminal can usefully show them.
const REDRAW_EVERY: usize = 10;

pub struct Progress {
    bar: ProgressBar,
    rows: AtomicUsize,
}

impl Progress {
    fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} [{elapsed}] {msg}") {
            bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        Self {
            bar,
            rows: AtomicUsize::new(0),
        }
    }

    /// Prints above the progress line, or straight to stderr when the line is
    /// not drawn.
    pub fn println(&self, msg: &str) {
        if self.bar.is_hidden() {
            let _ = writeln!(std::io::stderr(), "{msg}");
        } else {
            self.bar.println(msg);
        }
    }

    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

static PROGRESS: OnceLock<Progress> = OnceLock::new();

pub fn progress() -> &'static Progress {
    PROGRESS.get_or_init(Progress::new)
}

/// Starts ticking. Until then the progress line only relays log lines.
pub fn start(services: usize, regions: usize) {
    let progress = progress();
    progress.bar.set_message(format!(
        "Collecting {} services across {} regions...",
        services.to_string().bold(),
        regions.to_string().bold()
    ));
    progress.bar.enable_steady_tick(TICK);
}

/// Called by the sink for every row it receives.
pub fn report_collection_progress(asset_type: &str) {
    let progress = progress();
    let rows = progress.rows.fetch_add(1, Ordering::Relaxed) + 1;
    if rows == 1 || rows % REDRAW_EVERY == 0 {
        progress.bar.set_message(format!(
            "Collected {} assets so far, latest {}",
            rows.to_string().green().bold(),
            asset_type.italic()
        ));
    }
}

/// Routes log output above the progress line so lines never tear through it.
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf);
        progress().println(msg.trim_end());
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
