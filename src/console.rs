//! Terminal output for update runs.
//!
//! Status lines go to stdout and errors to stderr. ANSI colors are only used
//! when stdout is a terminal and `NO_COLOR` is unset.

use std::io::{self, IsTerminal};

/// Kind of status line, shown as a bracketed tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Step,
    Info,
    Done,
    Warn,
    Fail,
}

impl Status {
    fn tag(self) -> &'static str {
        match self {
            Status::Step => "STEP",
            Status::Info => "INFO",
            Status::Done => "OK",
            Status::Warn => "WARN",
            Status::Fail => "ERROR",
        }
    }

    /// SGR parameters for the tag (bold plus a color).
    fn sgr(self) -> &'static str {
        match self {
            Status::Step => "1;36",
            Status::Info => "1;34",
            Status::Done => "1;32",
            Status::Warn => "1;33",
            Status::Fail => "1;31",
        }
    }
}

const HEADING_SGR: &str = "1;35";
const MUTED_SGR: &str = "2;90";
const COUNT_SGR: &str = "1;32";

/// Writes status lines and the end-of-run summary.
#[derive(Debug)]
pub struct Console {
    colors: bool,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    /// Detects color support from `NO_COLOR` and whether stdout is a TTY.
    pub fn new() -> Self {
        let colors = std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal();
        Self { colors }
    }

    pub fn with_colors(colors: bool) -> Self {
        Self { colors }
    }

    fn paint(&self, sgr: &str, text: &str) -> String {
        if self.colors {
            format!("\x1b[{sgr}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    /// Renders `[TAG] message` without printing it.
    pub fn format_status(&self, status: Status, message: &str) -> String {
        format!("[{}] {message}", self.paint(status.sgr(), status.tag()))
    }

    /// Prints one status line; failures go to stderr.
    pub fn status(&self, status: Status, message: &str) {
        let line = self.format_status(status, message);
        match status {
            Status::Fail => eprintln!("{line}"),
            _ => println!("{line}"),
        }
    }

    pub fn step(&self, message: &str) {
        self.status(Status::Step, message);
    }

    pub fn info(&self, message: &str) {
        self.status(Status::Info, message);
    }

    pub fn success(&self, message: &str) {
        self.status(Status::Done, message);
    }

    pub fn warning(&self, message: &str) {
        self.status(Status::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.status(Status::Fail, message);
    }

    /// Prints a blank line and a heading.
    pub fn section(&self, title: &str) {
        println!();
        println!("{}", self.paint(HEADING_SGR, title));
    }

    pub fn muted(&self, text: &str) -> String {
        self.paint(MUTED_SGR, text)
    }

    /// Highlighted count with thousands separators.
    pub fn count(&self, n: u64) -> String {
        self.paint(COUNT_SGR, &group_thousands(n))
    }

    /// Renders `label: value` rows with the values lined up.
    pub fn format_summary(&self, rows: &[(&str, String)]) -> Vec<String> {
        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        rows.iter()
            .map(|(label, value)| {
                let label = format!("{label}:");
                format!("   {} {value}", self.muted(&format!("{label:<w$}", w = width + 1)))
            })
            .collect()
    }

    pub fn summary(&self, rows: &[(&str, String)]) {
        for line in self.format_summary(rows) {
            println!("{line}");
        }
    }
}

/// `1234567` -> `1,234,567`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let lead = digits.len() % 3;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.char_indices() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
