use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite database file to write to.
    pub database: PathBuf,
    /// Program used to run the svn command line client.
    pub svn: String,
    /// Request only revisions from the last ingested change onward instead
    /// of the whole history.
    pub resume: bool,
}

impl Config {
    #[must_use]
    pub fn default_database() -> PathBuf {
        std::env::temp_dir().join("vcdb.db")
    }

    /// Loads `path` on top of the defaults. A missing `path` yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = path {
            let content = fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
            let raw: RawConfig = toml::from_str(&content)
                .map_err(|e| Error::Config(format!("cannot parse {}: {e}", path.display())))?;
            raw.apply(&mut config)?;
        }
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::default_database(),
            svn: "svn".to_string(),
            resume: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    database: Option<PathBuf>,
    svn: Option<String>,
    resume: Option<bool>,
}

impl RawConfig {
    fn apply(self, config: &mut Config) -> Result<()> {
        if let Some(database) = self.database {
            config.database = database;
        }
        if let Some(svn) = self.svn {
            if svn.trim().is_empty() {
                return Err(Error::Config("svn must not be empty".to_string()));
            }
            config.svn = svn;
        }
        if let Some(resume) = self.resume {
            config.resume = resume;
        }
        Ok(())
    }
}
