use crate::error::{Error, Result};

/// Number of digits reserved for the repository id inside a change id.
pub const MAX_REPOSITORY_ID_DIGITS: usize = 2;

/// Maximum number of characters to represent a commit id.
pub const COMMIT_ID_LENGTH: usize = 16;

/// Maximum number of characters to represent a change id.
pub const CHANGE_ID_LENGTH: usize = MAX_REPOSITORY_ID_DIGITS + 1 + COMMIT_ID_LENGTH;

/// Maximum number of characters to represent a URI or a path in the repository.
pub const PATH_LENGTH: usize = 512;

const SEPARATOR: char = '-';

/// Derives the globally unique change id for a commit of a repository.
///
/// Commit ids are only unique within their repository, so the repository id
/// is prepended zero-padded to a fixed width. Since the prefix has a fixed
/// width and the separator never occurs in it, distinct inputs never map to
/// the same change id.
pub fn change_id_for(repository_id: i64, commit_id: &str) -> Result<String> {
    let capacity = 10_i64.pow(MAX_REPOSITORY_ID_DIGITS as u32);
    if repository_id <= 0 || repository_id >= capacity {
        return Err(Error::RepositoryIdOutOfRange(repository_id));
    }
    if commit_id.is_empty() {
        return Err(Error::malformed(
            format!("{repository_id}:?"),
            "commit id must not be empty",
        ));
    }
    if commit_id.chars().count() > COMMIT_ID_LENGTH {
        return Err(Error::CommitIdTooLong(commit_id.to_string()));
    }

    let result = format!(
        "{repository_id:0width$}{SEPARATOR}{commit_id}",
        width = MAX_REPOSITORY_ID_DIGITS
    );
    debug_assert!(result.chars().count() <= CHANGE_ID_LENGTH);
    Ok(result)
}

/// Extracts the commit id from a change id built by [`change_id_for`].
pub fn commit_id_from_change_id(change_id: &str) -> Option<&str> {
    let (prefix, commit_id) = change_id.split_at_checked(MAX_REPOSITORY_ID_DIGITS)?;
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    commit_id
        .strip_prefix(SEPARATOR)
        .filter(|commit_id| !commit_id.is_empty())
}
