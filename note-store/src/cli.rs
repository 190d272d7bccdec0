use std::path::PathBuf;

use clap::{Parser, Subcommand};
use note_store::NoteId;

#[derive(Debug, Parser)]
#[command(version, about = "Local notes")]
pub struct Cli {
    /// SQLite file holding the notes; overrides DATABASE_URL.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[arg(long, global = true, default_value_t = false)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List notes, most recently edited first.
    List {
        /// Only notes whose title contains this text.
        #[arg(long, short)]
        query: Option<String>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write a new note.
    Add {
        #[arg(long, short, default_value = "")]
        title: String,
        #[arg(long, short, default_value = "")]
        body: String,
    },
    /// Change an existing note.
    Edit {
        id: NoteId,
        #[arg(long, short)]
        title: Option<String>,
        #[arg(long, short)]
        body: Option<String>,
    },
    /// Delete a note.
    Delete {
        id: NoteId,
        /// Skip the confirmation prompt.
        #[arg(long, short, default_value_t = false)]
        yes: bool,
    },
    /// Print a note as title and body.
    Show { id: NoteId },
}
