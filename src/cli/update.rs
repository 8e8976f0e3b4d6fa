use anyhow::Context;
use tracing::info;

use crate::config::Config;
use crate::error::Error;
use crate::ingest::{IngestOptions, update_repository};
use crate::store::Store;
use crate::svn::SvnClient;

use super::open_store;

pub fn run_update(config: &Config, repository: &str) -> anyhow::Result<()> {
    info!("connect to database {}", config.database.display());
    let store = open_store(&config.database).context("cannot access database")?;
    let client = SvnClient::new(config.svn.clone());
    let options = IngestOptions {
        resume: config.resume,
    };

    let summary = update_repository(&store, &client, repository, &options).map_err(|e| match e {
        Error::Database(_) => anyhow::Error::new(e).context("cannot access database"),
        Error::Svn(_) | Error::Io(_) => anyhow::Error::new(e).context("cannot read repository log"),
        e if e.is_input_error() => anyhow::Error::new(e).context("cannot process repository log"),
        e => anyhow::Error::new(e),
    })?;

    let repository_id = summary.repository.repository_id;
    info!(
        "finished: repository {repository_id} now has {} changes and {} paths",
        store.count_changes(repository_id)?,
        store.count_paths(repository_id)?
    );
    store.close()?;
    Ok(())
}
