//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "timegrid")]
#[command(about = "Monthly timesheet editor", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new timesheet
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Owner of the timesheet (default: $USER)
        #[arg(short, long)]
        user: Option<String>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Add or update a theme in the display catalog
    Theme {
        /// Theme id as used by entries
        id: String,

        /// Display name
        name: String,

        /// Display color
        #[arg(short, long, default_value = "#9e9e9e")]
        color: String,
    },

    /// Record time on a task and save it
    Add {
        /// Date (YYYY-MM-DD)
        date: String,

        /// Theme id
        theme: String,

        /// Task id
        task: String,

        /// Hours worked (0-24)
        hours: f64,

        /// Free text description
        #[arg(short, long)]
        description: Option<String>,

        /// Group id
        #[arg(long, default_value = "")]
        group: String,

        /// Project id
        #[arg(long, default_value = "")]
        project: String,
    },

    /// List saved entries
    List {
        /// Only entries of this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show the month grid (YYYY-MM)
    Month { month: String },

    /// Edit interactively; reads session commands from stdin
    Session,
}
