use console::{style, StyledObject};
use serde::Serialize;
use std::fmt::Display;
use tabled::{settings::Style, Table, Tabled};

/// Severity of a one-line status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Success,
    Info,
    Warning,
    Error,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }

    fn marker(self) -> StyledObject<&'static str> {
        match self {
            Level::Success => style("✓").green().bold(),
            Level::Info => style("ℹ").blue().bold(),
            Level::Warning => style("⚠").yellow().bold(),
            Level::Error => style("✗").red().bold(),
        }
    }

    /// Warnings and errors go to stderr so stdout stays parseable
    fn to_stderr(self) -> bool {
        matches!(self, Level::Warning | Level::Error)
    }
}

/// Writes command results either for a terminal or as JSON documents
pub struct OutputWriter {
    json: bool,
}

impl OutputWriter {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn success(&self, message: impl Display) {
        self.status(Level::Success, message);
    }

    pub fn info(&self, message: impl Display) {
        self.status(Level::Info, message);
    }

    pub fn warning(&self, message: impl Display) {
        self.status(Level::Warning, message);
    }

    pub fn error(&self, message: impl Display) {
        self.status(Level::Error, message);
    }

    fn status(&self, level: Level, message: impl Display) {
        let line = if self.json {
            status_json(level, message)
        } else {
            format!("{} {}", level.marker(), message)
        };

        if level.to_stderr() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    /// Rows as a rounded table, or as a JSON array of row objects
    pub fn table<T: Tabled + Serialize>(&self, rows: Vec<T>) -> anyhow::Result<()> {
        if self.json {
            return self.result(rows);
        }

        if rows.is_empty() {
            println!("{}", style("(no data)").dim());
        } else {
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{}", table);
        }
        Ok(())
    }

    /// A command's full result, wrapped in a success envelope in JSON mode
    pub fn result<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        let rendered = if self.json {
            serde_json::to_string_pretty(&envelope(data))?
        } else {
            serde_json::to_string_pretty(&data)?
        };
        println!("{}", rendered);
        Ok(())
    }

    /// Labelled value for terminal reports; JSON callers emit a `result` instead
    pub fn kv(&self, key: impl Display, value: impl Display) {
        if !self.json {
            println!("{}: {}", style(key).bold(), value);
        }
    }

    pub fn section(&self, title: impl Display) {
        if !self.json {
            println!("\n{}", style(title).bold().underlined());
        }
    }
}

fn envelope<T: Serialize>(data: T) -> serde_json::Value {
    serde_json::json!({
        "status": Level::Success.label(),
        "data": data,
    })
}

fn status_json(level: Level, message: impl Display) -> String {
    let output = serde_json::json!({
        "status": level.label(),
        "message": message.to_string(),
    });
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| output.to_string())
}
