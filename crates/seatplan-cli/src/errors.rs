use console::style;
use seatplan_core::SeatplanError;
use std::fmt;
use std::path::Path;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for workspace not found
pub fn workspace_not_found() -> CliError {
    let current_dir = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    CliError::new("Not in a seatplan workspace")
        .with_context(format!(
            "You're not in a seatplan workspace directory.\n\nCurrent directory: {}\nLooking for: .seatplan directory",
            current_dir
        ))
        .with_suggestion("Initialize a workspace: seatplan init")
        .with_suggestion("Or navigate to an existing workspace")
        .with_help("Run: seatplan init --help")
}

/// Create error for init over an existing workspace
pub fn workspace_exists(path: &Path) -> CliError {
    CliError::new("Workspace already exists")
        .with_context(format!("A seating plan already lives here.\n\nPath: {}", path.display()))
        .with_suggestion("Use --force to start over")
        .with_suggestion("Or check the current plan: seatplan status")
        .with_help("Run: seatplan init --help")
}

/// Create error for a workspace whose plan file is gone
pub fn plan_missing(path: &Path) -> CliError {
    CliError::new("Seating plan not found")
        .with_context(format!(
            "The workspace exists but holds no plan.\n\nLooking for: {}",
            path.display()
        ))
        .with_suggestion("Start a fresh plan: seatplan init --force")
        .with_help("Run: seatplan init --help")
}

/// Create error for a class bigger than the usable desks
pub fn not_enough_desks(needed: usize, available: usize) -> CliError {
    CliError::new("Not enough desks")
        .with_context(format!(
            "Auto-assign needs a free desk for every student who is not on a locked desk.\n\nStudents to seat: {}\nUsable desks: {}",
            needed, available
        ))
        .with_suggestion("Add desks: seatplan desk add --x 100 --y 100")
        .with_suggestion("Or bring excluded desks back: seatplan desk exclude <id>")
        .with_help("Run: seatplan status")
}

/// Create error for a search that found no valid arrangement
pub fn assignment_failed(students: usize, desks: usize, limit_reached: bool) -> CliError {
    let mut error = CliError::new("No valid seating arrangement")
        .with_context(format!(
            "Could not seat {} students on {} desks without breaking a separation rule.",
            students, desks
        ))
        .with_suggestion("Review separation rules: seatplan rules list")
        .with_suggestion("Spread desks out or dissolve groups so fewer desks touch")
        .with_help("Run: seatplan assign --help");

    if limit_reached {
        error = error.with_suggestion("Raise the search limit: seatplan assign --search-limit 0");
    }
    error
}

/// Create error for an unknown student
pub fn student_not_found(name: &str) -> CliError {
    CliError::new(format!("Student not found: {}", name))
        .with_suggestion("Check the roster: seatplan students list")
        .with_suggestion("Names are case-sensitive")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check .seatplan/config.toml for syntax errors")
        .with_suggestion("Or reinitialize: seatplan init --force")
        .with_help("Run: seatplan status --config")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    if let Some(core) = error.downcast_ref::<SeatplanError>() {
        return match core {
            SeatplanError::NotEnoughDesks { needed, available } => {
                not_enough_desks(*needed, *available)
            }
            SeatplanError::AssignmentFailed {
                students,
                desks,
                limit_reached,
            } => assignment_failed(*students, *desks, *limit_reached),
            SeatplanError::StudentNotFound { name } => student_not_found(name),
            SeatplanError::DeskNotFound { .. } | SeatplanError::GroupNotFound { .. } => {
                CliError::new(core.to_string()).with_suggestion("List desks: seatplan desk list")
            }
            SeatplanError::ConfigInvalid { key, reason } => invalid_config(key, reason),
            other => CliError::new(other.to_string()),
        };
    }

    let message = format!("{:#}", error);
    if message.contains("No such file or directory") {
        CliError::new("File not found")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check the file path and try again")
    } else if message.contains("ermission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check file permissions")
    } else {
        CliError::new(message)
    }
}
