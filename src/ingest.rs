//! Registers repositories and writes their history into a [`Store`].

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::store::Store;
use crate::svn::{LogSource, RawCommit, RevisionRange, normalize_commit, parse_log, reconcile_moves};
use crate::types::Repository;
use crate::types::ids::{PATH_LENGTH, commit_id_from_change_id};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Start at the last ingested change instead of at revision 0.
    pub resume: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSummary {
    pub repository: Repository,
    pub range: RevisionRange,
    pub changes: usize,
    pub paths: usize,
    pub moves: usize,
}

/// Returns the repository registered for `uri`, registering it first if needed.
///
/// A new repository is committed right away so its id is available for
/// deriving change ids.
pub fn repository_for<S: Store + ?Sized>(store: &S, uri: &str) -> Result<Repository> {
    let mut existing = store.list_repositories_by_uri(uri)?;
    match existing.len() {
        0 => {
            if uri.chars().count() > PATH_LENGTH {
                return Err(Error::InvalidRepositoryUri(format!(
                    "exceeds {PATH_LENGTH} characters: {uri}"
                )));
            }
            info!("add new repository: {uri}");
            store.create_repository(uri)
        }
        1 => Ok(existing.remove(0)),
        count => Err(Error::DuplicateRepository {
            uri: uri.to_string(),
            count,
        }),
    }
}

fn revision_range(repository: &Repository, options: &IngestOptions) -> RevisionRange {
    if !options.resume {
        return RevisionRange::full();
    }
    repository
        .last_change_id
        .as_deref()
        .and_then(commit_id_from_change_id)
        .map(RevisionRange::starting_at)
        .unwrap_or_else(RevisionRange::full)
}

/// Reads the log of `uri` from `source` and upserts all of its changes and
/// paths in one batch.
///
/// Running this again against an unchanged log leaves the store as it is;
/// against an appended log it adds only the new changes. On any error the
/// batch is rolled back and nothing of this run becomes visible.
pub fn update_repository<S, L>(
    store: &S,
    source: &L,
    uri: &str,
    options: &IngestOptions,
) -> Result<IngestSummary>
where
    S: Store + ?Sized,
    L: LogSource + ?Sized,
{
    let repository = repository_for(store, uri)?;
    let range = revision_range(&repository, options);

    let xml = source.log_xml(uri, &range)?;
    let commits = parse_log(&xml)?;
    info!("read {} log entries for {uri}", commits.len());

    store.begin_batch()?;
    match write_commits(store, &repository, &commits) {
        Ok((changes, paths, moves)) => {
            if let Err(error) = store.commit_batch() {
                warn!("commit of {uri} failed, rolling back: {error}");
                if let Err(rollback_error) = store.rollback_batch() {
                    warn!("rollback failed: {rollback_error}");
                }
                return Err(error);
            }
            info!("committed {changes} changes with {paths} paths ({moves} moves)");
            Ok(IngestSummary {
                repository,
                range,
                changes,
                paths,
                moves,
            })
        }
        Err(error) => {
            warn!("rolling back ingestion of {uri}: {error}");
            if let Err(rollback_error) = store.rollback_batch() {
                warn!("rollback failed: {rollback_error}");
            }
            Err(error)
        }
    }
}

fn write_commits<S: Store + ?Sized>(
    store: &S,
    repository: &Repository,
    commits: &[RawCommit],
) -> Result<(usize, usize, usize)> {
    let mut path_count = 0;
    let mut move_count = 0;
    let mut last_change_id = None;

    for raw in commits {
        let (change, paths) = normalize_commit(repository.repository_id, raw)?;
        let reconciled = reconcile_moves(paths)?;

        debug!("  add change: {} by {:?}", change.change_id, change.author);
        store.upsert_change(&change)?;
        for absorbed in &reconciled.absorbed {
            store.delete_deleted_path(absorbed.repository_id, &absorbed.change_id, &absorbed.path)?;
        }
        for path in &reconciled.paths {
            debug!("    add path: {} {} {}", path.action, path.kind, path.path);
            store.upsert_path(path)?;
        }

        path_count += reconciled.paths.len();
        move_count += reconciled.absorbed.len();
        last_change_id = Some(change.change_id);
    }

    if let Some(change_id) = last_change_id {
        store.update_repository_last_change(repository.repository_id, &change_id)?;
    }
    Ok((commits.len(), path_count, move_count))
}
