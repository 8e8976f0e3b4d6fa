use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed log at revision {revision}: {reason}")]
    MalformedLog { revision: String, reason: String },

    #[error("unmapped {field} code: {code:?}")]
    UnmappedCode { field: &'static str, code: String },

    #[error("ambiguous move in change {change_id}: more than one deletion of {path}")]
    AmbiguousMove { change_id: String, path: String },

    #[error("repository {uri} is registered {count} times")]
    DuplicateRepository { uri: String, count: usize },

    #[error("invalid repository uri: {0}")]
    InvalidRepositoryUri(String),

    #[error("repository id {0} does not fit into a change id")]
    RepositoryIdOutOfRange(i64),

    #[error("commit id too long: {0}")]
    CommitIdTooLong(String),

    #[error("svn failed: {0}")]
    Svn(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn malformed(revision: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedLog {
            revision: revision.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error was caused by the log document rather than
    /// by the database or the svn client.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedLog { .. }
                | Self::UnmappedCode { .. }
                | Self::AmbiguousMove { .. }
                | Self::CommitIdTooLong(_)
                | Self::InvalidRepositoryUri(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
