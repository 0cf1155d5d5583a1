use clap::{Args, Parser, Subcommand, ValueEnum};
use seatplan_core::layout::{LayoutPreset, DESK_HEIGHT, DESK_WIDTH};
use seatplan_core::models::Gender;
use std::path::PathBuf;

/// Seatplan - classroom seating plans with separation rules
#[derive(Parser, Debug)]
#[command(name = "seatplan")]
#[command(about = "Classroom seating plans with separation rules", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Show planned changes without writing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new seating plan workspace
    Init(InitArgs),

    /// Manage the class roster
    Students(StudentsArgs),

    /// Manage separation rules
    Rules(RulesArgs),

    /// Edit desks
    Desk(DeskArgs),

    /// Push desks together or split them apart
    Group(GroupArgs),

    /// Seat every student automatically
    Assign(AssignArgs),

    /// Empty every desk that is not locked
    Clear(ClearArgs),

    /// Show plan status and information
    Status(StatusArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Workspace directory path (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Name of the class or room
    #[arg(long, default_value = "Classroom")]
    pub name: String,

    /// Start from a ready-made desk layout
    #[arg(long, value_enum)]
    pub preset: Option<PresetKind>,

    /// Number of rows (rows and pairs presets)
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..=50))]
    pub rows: u32,

    /// Desks per row, pairs per row, or number of tables
    #[arg(long, default_value = "6", value_parser = clap::value_parser!(u32).range(1..=50))]
    pub columns: u32,

    /// Seats at each table (tables preset)
    #[arg(long, default_value = "4", value_parser = clap::value_parser!(u32).range(1..=50))]
    pub seats: u32,

    /// Overwrite an existing workspace
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PresetKind {
    /// Single desks in rows
    Rows,
    /// Rows of grouped desk pairs
    Pairs,
    /// Grouped tables
    Tables,
}

impl PresetKind {
    pub fn to_preset(self, rows: u32, columns: u32, seats: u32) -> LayoutPreset {
        match self {
            PresetKind::Rows => LayoutPreset::Rows { rows, columns },
            PresetKind::Pairs => LayoutPreset::Pairs { rows, pairs: columns },
            PresetKind::Tables => LayoutPreset::Tables { tables: columns, seats },
        }
    }
}

#[derive(Args, Debug)]
pub struct StudentsArgs {
    #[command(subcommand)]
    pub command: StudentsCommand,
}

#[derive(Subcommand, Debug)]
pub enum StudentsCommand {
    /// Add students, one roster line each: "Name[, male|female][, send]"
    Add {
        /// Roster lines
        entries: Vec<String>,

        /// Read roster lines from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Remove a student and clear their desk
    Remove {
        name: String,
    },

    /// Set or clear a student's gender
    Gender {
        name: String,

        #[arg(value_enum)]
        gender: GenderArg,
    },

    /// Toggle the SEND flag on a student
    Send {
        name: String,
    },

    /// List the roster
    List,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
    /// Clear the recorded gender
    None,
}

impl From<GenderArg> for Option<Gender> {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Some(Gender::Male),
            GenderArg::Female => Some(Gender::Female),
            GenderArg::None => None,
        }
    }
}

#[derive(Args, Debug)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub command: RulesCommand,
}

#[derive(Subcommand, Debug)]
pub enum RulesCommand {
    /// Keep two or more students off neighboring desks
    Add {
        /// Students to keep apart
        #[arg(num_args = 2.., required = true)]
        students: Vec<String>,

        /// Reason shown in listings
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Remove a rule by id
    Remove {
        id: u32,
    },

    /// List rules
    List,
}

#[derive(Args, Debug)]
pub struct DeskArgs {
    #[command(subcommand)]
    pub command: DeskCommand,
}

#[derive(Subcommand, Debug)]
pub enum DeskCommand {
    /// Add a desk with its top-left corner at (x, y)
    Add {
        #[arg(long, allow_negative_numbers = true)]
        x: f64,

        #[arg(long, allow_negative_numbers = true)]
        y: f64,

        #[arg(long, default_value_t = DESK_WIDTH)]
        width: f64,

        #[arg(long, default_value_t = DESK_HEIGHT)]
        height: f64,
    },

    /// Remove a desk
    Remove {
        id: u32,
    },

    /// Move a desk, or its whole group, by an offset
    Move {
        id: u32,

        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        dx: f64,

        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        dy: f64,
    },

    /// Toggle whether a desk can be used
    Exclude {
        id: u32,
    },

    /// Keep the seated student in place during auto-assign
    Lock {
        id: u32,
    },

    /// Release a locked desk
    Unlock {
        id: u32,
    },

    /// Seat a student at a desk by hand
    Assign {
        id: u32,
        student: String,
    },

    /// Empty a desk
    Unassign {
        id: u32,
    },

    /// List desks
    List,
}

#[derive(Args, Debug)]
pub struct GroupArgs {
    #[command(subcommand)]
    pub command: GroupCommand,
}

#[derive(Subcommand, Debug)]
pub enum GroupCommand {
    /// Group two or more desks
    Create {
        #[arg(num_args = 2.., required = true)]
        desks: Vec<u32>,

        #[arg(long, default_value = "Group")]
        name: String,
    },

    /// Split a group back into single desks
    Dissolve {
        id: u32,
    },
}

#[derive(Parser, Debug)]
pub struct AssignArgs {
    /// Fill desks in layout order, front row first
    #[arg(long)]
    pub fill_from_front: bool,

    /// Prefer seating boys and girls alternately
    #[arg(long)]
    pub alternate_gender: bool,

    /// Random seed for a reproducible plan
    #[arg(long)]
    pub seed: Option<u64>,

    /// Distance under which two desks count as neighbors
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Placement attempts before giving up (0 for unlimited)
    #[arg(long)]
    pub search_limit: Option<u64>,
}

#[derive(Parser, Debug)]
pub struct ClearArgs {}

#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Show resolved configuration and where each value came from
    #[arg(long)]
    pub config: bool,
}
