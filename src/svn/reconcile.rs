use std::collections::HashMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{Path, PathAction};

/// Paths of one change after moves have been detected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciled {
    /// Surviving paths in document order.
    pub paths: Vec<Path>,
    /// Deletions that turned out to be the source half of a move.
    pub absorbed: Vec<Path>,
}

/// Turns each copy whose source is deleted in the same change into a move.
///
/// `paths` must be the complete path set of exactly one change. When two
/// copies share a deleted source, the first one in document order becomes
/// the move and the other stays a copy.
pub fn reconcile_moves(paths: Vec<Path>) -> Result<Reconciled> {
    let mut deleted_by_path: HashMap<&str, Vec<usize>> = HashMap::new();
    for (index, path) in paths.iter().enumerate() {
        if path.action == PathAction::Deleted {
            deleted_by_path.entry(&path.path).or_default().push(index);
        }
    }

    let mut moves = Vec::new();
    let mut absorbed_indexes = Vec::new();
    for (index, copied) in paths.iter().enumerate() {
        if copied.action != PathAction::Copied {
            continue;
        }
        let Some(base_path) = copied.base_path.as_deref() else {
            continue;
        };
        match deleted_by_path.get(base_path).map(Vec::as_slice) {
            None | Some([]) => {}
            Some([deleted_index]) => {
                if !absorbed_indexes.contains(deleted_index) {
                    absorbed_indexes.push(*deleted_index);
                    moves.push(index);
                }
            }
            Some(_) => {
                return Err(Error::AmbiguousMove {
                    change_id: copied.change_id.clone(),
                    path: base_path.to_string(),
                });
            }
        }
    }

    let mut reconciled = Reconciled::default();
    for (index, mut path) in paths.into_iter().enumerate() {
        if absorbed_indexes.contains(&index) {
            reconciled.absorbed.push(path);
        } else {
            if moves.contains(&index) {
                debug!(
                    "    move {} -> {} in {}",
                    path.base_path.as_deref().unwrap_or_default(),
                    path.path,
                    path.change_id
                );
                path.action = PathAction::Moved;
            }
            reconciled.paths.push(path);
        }
    }
    Ok(reconciled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PathKind;

    fn path(name: &str, action: PathAction, base: Option<(&str, &str)>) -> Path {
        Path {
            repository_id: 1,
            change_id: "01-6".to_string(),
            path: name.to_string(),
            kind: PathKind::File,
            action,
            base_change_id: base.map(|(change_id, _)| change_id.to_string()),
            base_path: base.map(|(_, base_path)| base_path.to_string()),
        }
    }

    #[test]
    fn test_copy_and_delete_of_source_is_move() {
        let reconciled = reconcile_moves(vec![
            path("B", PathAction::Copied, Some(("01-5", "A"))),
            path("A", PathAction::Deleted, None),
        ])
        .unwrap();

        assert_eq!(reconciled.paths.len(), 1);
        let moved = &reconciled.paths[0];
        assert_eq!(moved.path, "B");
        assert_eq!(moved.action, PathAction::Moved);
        assert_eq!(moved.base_path.as_deref(), Some("A"));
        assert_eq!(moved.base_change_id.as_deref(), Some("01-5"));
        assert_eq!(reconciled.absorbed.len(), 1);
        assert_eq!(reconciled.absorbed[0].path, "A");
    }

    #[test]
    fn test_delete_listed_before_copy_is_move() {
        let reconciled = reconcile_moves(vec![
            path("A", PathAction::Deleted, None),
            path("B", PathAction::Copied, Some(("01-5", "A"))),
        ])
        .unwrap();
        assert_eq!(reconciled.paths.len(), 1);
        assert_eq!(reconciled.paths[0].action, PathAction::Moved);
    }

    #[test]
    fn test_copy_without_delete_stays_copy() {
        let copy = path("B", PathAction::Copied, Some(("01-5", "A")));
        let reconciled = reconcile_moves(vec![copy.clone()]).unwrap();
        assert_eq!(reconciled.paths, vec![copy]);
        assert!(reconciled.absorbed.is_empty());
    }

    #[test]
    fn test_unrelated_add_and_delete_untouched() {
        let input = vec![
            path("X", PathAction::Added, None),
            path("Y", PathAction::Deleted, None),
        ];
        let reconciled = reconcile_moves(input.clone()).unwrap();
        assert_eq!(reconciled.paths, input);
        assert!(reconciled.absorbed.is_empty());
    }

    #[test]
    fn test_delete_of_other_path_is_not_move() {
        let reconciled = reconcile_moves(vec![
            path("B", PathAction::Copied, Some(("01-5", "A"))),
            path("C", PathAction::Deleted, None),
        ])
        .unwrap();
        assert_eq!(reconciled.paths.len(), 2);
        assert_eq!(reconciled.paths[0].action, PathAction::Copied);
        assert_eq!(reconciled.paths[1].action, PathAction::Deleted);
    }

    #[test]
    fn test_second_copy_of_moved_source_stays_copy() {
        let reconciled = reconcile_moves(vec![
            path("B", PathAction::Copied, Some(("01-5", "A"))),
            path("C", PathAction::Copied, Some(("01-5", "A"))),
            path("A", PathAction::Deleted, None),
        ])
        .unwrap();
        let actions: Vec<_> = reconciled.paths.iter().map(|p| p.action).collect();
        assert_eq!(actions, vec![PathAction::Moved, PathAction::Copied]);
        assert_eq!(reconciled.absorbed.len(), 1);
    }

    #[test]
    fn test_two_deletions_of_same_source_are_ambiguous() {
        let result = reconcile_moves(vec![
            path("B", PathAction::Copied, Some(("01-5", "A"))),
            path("A", PathAction::Deleted, None),
            path("A", PathAction::Deleted, None),
        ]);
        assert!(matches!(
            result,
            Err(Error::AmbiguousMove { ref path, .. }) if path == "A"
        ));
    }

    #[test]
    fn test_directory_move() {
        let mut copied = path("/branches/b", PathAction::Copied, Some(("01-3", "/trunk")));
        copied.kind = PathKind::Directory;
        let mut deleted = path("/trunk", PathAction::Deleted, None);
        deleted.kind = PathKind::Directory;

        let reconciled = reconcile_moves(vec![copied, deleted]).unwrap();
        assert_eq!(reconciled.paths.len(), 1);
        assert_eq!(reconciled.paths[0].kind, PathKind::Directory);
        assert_eq!(reconciled.paths[0].action, PathAction::Moved);
    }
}
