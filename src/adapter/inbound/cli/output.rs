//! Terminal rendering for command results.
//!
//! Handlers call these helpers instead of printing directly so that the
//! global `--json` and `--quiet` flags apply uniformly. In JSON mode every
//! stdout line is a single JSON object: progress lines carry
//! `{"type", "payload"}`, final results carry `{"command", "data"}`.

use std::fmt::Display;
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Global output flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub json: bool,
    /// Drop informational lines; warnings and results still print.
    pub quiet: bool,
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }
}

fn state() -> &'static RwLock<OutputConfig> {
    static STATE: OnceLock<RwLock<OutputConfig>> = OnceLock::new();
    STATE.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn current() -> OutputConfig {
    *state().read()
}

pub fn configure(config: OutputConfig) {
    *state().write() = config;
}

#[must_use]
pub fn is_json() -> bool {
    current().json
}

#[must_use]
pub fn is_quiet() -> bool {
    current().quiet
}

#[must_use]
pub fn verbosity() -> u8 {
    current().verbose
}

/// How a line behaves under `--quiet`.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Level {
    Info,
    Always,
}

/// Route one line: a JSON record in JSON mode, otherwise `human` unless
/// quiet mode suppresses it.
fn emit(kind: &str, payload: Value, level: Level, human: impl FnOnce()) {
    let config = current();
    if config.json {
        println!("{}", json!({ "type": kind, "payload": payload }));
    } else if level == Level::Always || !config.quiet {
        human();
    }
}

/// Product name and version, shown once at the top of interactive output.
pub fn header(version: &str) {
    let config = current();
    if config.json || config.quiet {
        return;
    }
    println!("{} {}", "superpi".bold(), version.dimmed());
    println!();
}

pub fn section(title: &str) {
    emit("section", json!({ "title": title }), Level::Info, || {
        println!();
        println!("{}", title.bold());
    });
}

/// Labeled value, aligned under the current section.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        json!({ "label": label, "value": value }),
        Level::Info,
        || println!("  {:<16} {}", label.dimmed(), value),
    );
}

pub fn success(message: &str) {
    emit("success", json!({ "message": message }), Level::Info, || {
        println!("  {} {}", "✓".green(), message);
    });
}

pub fn warning(message: &str) {
    emit("warning", json!({ "message": message }), Level::Always, || {
        println!("  {} {}", "!".yellow().bold(), message);
    });
}

pub fn note(message: &str) {
    emit("note", json!({ "message": message }), Level::Info, || {
        println!("  {}", message.dimmed());
    });
}

/// Suggested next step, e.g. a command to run.
pub fn hint(message: &str) {
    emit("hint", json!({ "message": message }), Level::Info, || {
        println!("  {}: {}", "hint".cyan(), message);
    });
}

/// Render rows as a rounded table, indented to match fields.
pub fn table<R: Tabled>(rows: impl IntoIterator<Item = R>) {
    let rendered = Table::new(rows).with(Style::rounded()).to_string();
    emit("table", json!({ "content": rendered }), Level::Always, || {
        for line in rendered.lines() {
            println!("  {line}");
        }
    });
}

/// Final result of a command in JSON mode.
pub fn command_json<T: Serialize + ?Sized>(command: &str, data: &T) {
    println!("{}", json!({ "command": command, "data": data }));
}

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Progress spinner for a network call. Hidden in JSON and quiet modes.
pub fn spinner(message: &str) -> ProgressBar {
    let config = current();
    let pb = if config.json || config.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_strings(SPINNER_FRAMES)
            .template("  {spinner:.cyan} {msg}")
        {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    };
    pb.set_message(message.to_string());
    pb
}

pub fn spinner_clear(pb: &ProgressBar) {
    pb.finish_and_clear();
}

pub fn spinner_success(pb: &ProgressBar, message: &str) {
    pb.finish_and_clear();
    success(message);
}

/// Stop the spinner and report the failure. Printed even in quiet mode.
pub fn spinner_fail(pb: &ProgressBar, message: &str) {
    pb.finish_and_clear();
    emit("failure", json!({ "message": message }), Level::Always, || {
        println!("  {} {}", "×".red(), message);
    });
}

fn paint(value: impl Display, style: fn(&String) -> String) -> String {
    let value = value.to_string();
    if is_json() {
        value
    } else {
        style(&value)
    }
}

pub fn positive(value: impl Display) -> String {
    paint(value, |v| v.green().to_string())
}

pub fn negative(value: impl Display) -> String {
    paint(value, |v| v.red().to_string())
}

pub fn highlight(value: impl Display) -> String {
    paint(value, |v| v.cyan().to_string())
}

pub fn muted(value: impl Display) -> String {
    paint(value, |v| v.dimmed().to_string())
}

/// Profit or loss, colored by sign. Zero counts as a gain.
pub fn signed(value: Decimal) -> String {
    if value < Decimal::ZERO {
        negative(value)
    } else {
        positive(format!("+{value}"))
    }
}

#[must_use]
pub const fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
