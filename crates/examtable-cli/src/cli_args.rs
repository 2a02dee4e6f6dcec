use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

/// Top-level CLI entrypoint.
#[derive(Parser, Debug, Clone)]
#[command(name = "examtable", version, about = "Exam timetable generator", long_about = None)]
pub struct Cli {
    /// Override the URL of the static subject document used as the remote
    /// fallback tier.
    #[arg(long = "data-url", value_name = "URL", global = true)]
    pub data_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Supported subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the subject checklist with selection state and next sitting.
    List,
    /// Add subjects to the selection by name.
    Select {
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,
    },
    /// Remove subjects from the selection by name.
    Deselect {
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,
    },
    /// Select every subject.
    SelectAll,
    /// Clear the selection.
    Clear,
    /// Print the timetable preview for the current selection.
    Preview {
        /// Student name shown in the timetable title.
        #[arg(long)]
        student: Option<String>,
    },
    /// Generate the PDF timetable for the current selection.
    Generate {
        /// Student name shown in the timetable title and file name.
        #[arg(long)]
        student: Option<String>,
        /// Output file path (defaults to the derived timetable file name).
        #[arg(long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
    },
    /// Replace the subject list from a JSON file.
    Import {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },
    /// Write the subject list as indented JSON.
    Export {
        #[arg(default_value = "subjects.json", value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },
    /// Turn the extra-time duration adjustment on or off.
    ExtraTime { state: ToggleState },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ToggleState {
    On,
    Off,
}

impl ToggleState {
    pub fn enabled(self) -> bool {
        matches!(self, ToggleState::On)
    }
}
