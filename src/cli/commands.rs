use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Build or refresh the database from a repository's history
    Update {
        /// URI to the repository
        repository: String,

        /// SQLite database file; default from the configuration
        database: Option<PathBuf>,

        /// Only request revisions from the last ingested change onward
        #[arg(long)]
        resume: bool,

        /// Program used to run the svn command line client
        #[arg(long)]
        svn: Option<String>,
    },

    /// Show what a database contains
    Info {
        /// SQLite database file; default from the configuration
        database: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
