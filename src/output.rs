//! # Terminal Output
//!
//! Presentation helpers for the CLI: colour/emoji selection, a progress bar
//! for the revert stage, and the end-of-run summary.
//!
//! ## Respecting User Preferences
//!
//! Colour is decided once from the `--color` flag and the environment:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! The progress bar is only drawn when colour is enabled, which in practice
//! means an interactive terminal.

use std::env;
use std::fmt::Write as _;

use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::phases::orchestrator::RunReport;
use crate::report::{Event, Reporter, Stage};

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors, emojis and progress bars should be used.
    pub use_color: bool,
}

impl OutputConfig {
    /// Build from the value of `--color` ("always", "never" or "auto").
    ///
    /// Anything other than "always" or "never" is treated as "auto".
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // Presence alone disables colour, even when empty.
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }
        console::Term::stderr().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the emoji when colors are enabled, otherwise the plain marker.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Reporter wrapper that drives a progress bar during the revert stage.
///
/// Every event is still forwarded to the wrapped reporter; log lines are
/// printed with the bar suspended so the two do not interleave.
pub struct ProgressReporter<'a> {
    inner: &'a dyn Reporter,
    bar: ProgressBar,
    visible: bool,
}

impl<'a> ProgressReporter<'a> {
    pub fn new(inner: &'a dyn Reporter, visible: bool) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::hidden());
        let bar_style = ProgressStyle::with_template(
            "{spinner} Reverting exempt files [{bar:40}] {pos}/{len}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(bar_style);
        Self {
            inner,
            bar,
            visible,
        }
    }

    /// Current bar position, for tests.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl Reporter for ProgressReporter<'_> {
    fn report(&self, event: Event<'_>) {
        match &event {
            Event::ExemptFilesCollected { files } => {
                self.bar.set_length(files.len() as u64);
            }
            Event::StageStarted(Stage::RevertFiles) if self.visible => {
                self.bar.set_draw_target(ProgressDrawTarget::stderr());
            }
            Event::FileReverted { .. } | Event::RevertFailed { .. } => self.bar.inc(1),
            Event::RevertsFinished { .. } => self.bar.finish_and_clear(),
            _ => {}
        }
        self.bar.suspend(|| self.inner.report(event));
    }
}

/// Render the end-of-run summary printed by `fix`.
pub fn render_summary(report: &RunReport, config: &OutputConfig) -> String {
    let warn = emoji(config, "⚠️ ", "[WARN]");
    let fail = emoji(config, "❌", "[FAIL]");
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} Coding standards rollout finished against {}",
        emoji(config, "✅", "[OK]"),
        report.mainline
    );
    let _ = writeln!(
        out,
        "   {} tracking branch(es) considered",
        report.branches.len()
    );
    let _ = writeln!(out, "   {} exempt file(s)", report.exempt_files.len());

    if !report.branch_failures.is_empty() {
        let heading = format!(
            "{} branch(es) could not be diffed and were skipped:",
            report.branch_failures.len()
        );
        let _ = writeln!(out, "   {} {}", warn, paint_warning(config, &heading));
        for failure in &report.branch_failures {
            let _ = writeln!(out, "      {}", failure.error);
        }
    }

    if !report.formatter.is_success() {
        let _ = writeln!(
            out,
            "   {} {}",
            warn,
            paint_warning(config, &report.formatter.to_string())
        );
    }

    let _ = writeln!(
        out,
        "   {} file(s) reverted to {}",
        report.revert.reverted, report.mainline
    );

    if !report.revert.failures.is_empty() {
        let heading = format!(
            "{} file(s) could not be reverted and keep the formatter's changes:",
            report.revert.failures.len()
        );
        let _ = writeln!(out, "   {} {}", fail, paint_error(config, &heading));
        for failure in &report.revert.failures {
            let _ = writeln!(out, "      {}", failure.error);
        }
    }

    out
}

fn paint_warning(config: &OutputConfig, text: &str) -> String {
    if config.use_color {
        style(text).yellow().to_string()
    } else {
        text.to_string()
    }
}

fn paint_error(config: &OutputConfig, text: &str) -> String {
    if config.use_color {
        style(text).red().to_string()
    } else {
        text.to_string()
    }
}
