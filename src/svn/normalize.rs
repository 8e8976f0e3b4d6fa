use crate::error::{Error, Result};
use crate::types::ids::PATH_LENGTH;
use crate::types::{Change, Path, PathAction, PathKind, change_id_for};

use super::log::{RawCommit, RawPath, parse_commit_time};

/// Maps the `kind` attribute of a `<path>`.
fn map_kind(svn_kind: &str) -> Option<PathKind> {
    match svn_kind {
        "dir" => Some(PathKind::Directory),
        "file" => Some(PathKind::File),
        _ => None,
    }
}

/// Maps the `action` attribute of a `<path>`.
fn map_action(svn_action: &str) -> Option<PathAction> {
    match svn_action {
        "A" => Some(PathAction::Added),
        "D" => Some(PathAction::Deleted),
        // Modified content and/or properties.
        "M" => Some(PathAction::Edited),
        // Replaced: removed and added again without a commit in between.
        "R" => Some(PathAction::Edited),
        _ => None,
    }
}

/// Builds the change for one commit of the repository.
pub fn change_from_raw(repository_id: i64, raw: &RawCommit) -> Result<Change> {
    let commit_time = parse_commit_time(&raw.revision, &raw.date)?;
    Ok(Change {
        change_id: change_id_for(repository_id, &raw.revision)?,
        commit_id: raw.revision.clone(),
        author: raw.author.clone(),
        commit_message: raw.message.clone(),
        commit_time,
        repository_id,
    })
}

/// Builds the path for one `<path>` of `change`.
pub fn path_from_raw(change: &Change, raw: &RawPath) -> Result<Path> {
    let kind = map_kind(&raw.kind).ok_or_else(|| Error::UnmappedCode {
        field: "kind",
        code: raw.kind.clone(),
    })?;
    let mut action = map_action(&raw.action).ok_or_else(|| Error::UnmappedCode {
        field: "action",
        code: raw.action.clone(),
    })?;

    check_path_length(&change.commit_id, &raw.path)?;
    let (base_change_id, base_path) = match (&raw.copyfrom_rev, &raw.copyfrom_path) {
        (Some(base_commit_id), Some(_)) if base_commit_id.is_empty() => {
            return Err(Error::malformed(
                &change.commit_id,
                format!("{} has an empty copyfrom-rev", raw.path),
            ));
        }
        (Some(base_commit_id), Some(base_path)) => {
            check_path_length(&change.commit_id, base_path)?;
            action = PathAction::Copied;
            (
                Some(change_id_for(change.repository_id, base_commit_id)?),
                Some(base_path.clone()),
            )
        }
        (None, None) => (None, None),
        (Some(_), None) => {
            return Err(Error::malformed(
                &change.commit_id,
                format!("{} has copyfrom-rev without copyfrom-path", raw.path),
            ));
        }
        (None, Some(_)) => {
            return Err(Error::malformed(
                &change.commit_id,
                format!("{} has copyfrom-path without copyfrom-rev", raw.path),
            ));
        }
    };

    Ok(Path {
        repository_id: change.repository_id,
        change_id: change.change_id.clone(),
        path: raw.path.clone(),
        kind,
        action,
        base_change_id,
        base_path,
    })
}

fn check_path_length(revision: &str, path: &str) -> Result<()> {
    if path.chars().count() > PATH_LENGTH {
        return Err(Error::malformed(
            revision,
            format!("path exceeds {PATH_LENGTH} characters: {path}"),
        ));
    }
    Ok(())
}

/// Builds the change and all of its path candidates, in document order.
pub fn normalize_commit(repository_id: i64, raw: &RawCommit) -> Result<(Change, Vec<Path>)> {
    let change = change_from_raw(repository_id, raw)?;
    let paths = raw
        .paths
        .iter()
        .map(|raw_path| path_from_raw(&change, raw_path))
        .collect::<Result<Vec<_>>>()?;
    Ok((change, paths))
}
