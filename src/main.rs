use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vcdb::cli::{Commands, run_info, run_update};
use vcdb::config::Config;

#[derive(Parser)]
#[command(name = "vcdb")]
#[command(version, about = "Build SQL database from version control repository", long_about = None)]
struct Cli {
    /// TOML file with defaults for database, svn and resume
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Explain what is being done
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose { "vcdb=debug" } else { "vcdb=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Update {
            repository,
            database,
            resume,
            svn,
        } => {
            if let Some(database) = database {
                config.database = database;
            }
            if let Some(svn) = svn {
                config.svn = svn;
            }
            config.resume |= resume;
            run_update(&config, &repository)?;
        }
        Commands::Info { database, json } => {
            let database = database.unwrap_or(config.database);
            run_info(&database, json)?;
        }
    }

    Ok(())
}
