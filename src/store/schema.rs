pub const SCHEMA: &str = r#"
-- One tracked repository location
CREATE TABLE IF NOT EXISTS repositories (
    repository_id INTEGER PRIMARY KEY AUTOINCREMENT,
    uri TEXT NOT NULL UNIQUE,
    last_change_id TEXT   -- not a foreign key, changes already reference repositories
);

-- One commit; change_id is unique across repositories, commit_id only within one
CREATE TABLE IF NOT EXISTS changes (
    change_id TEXT PRIMARY KEY,
    commit_id TEXT NOT NULL,
    author TEXT,
    commit_message TEXT NOT NULL DEFAULT '',
    commit_time TEXT NOT NULL,
    repository_id INTEGER NOT NULL REFERENCES repositories(repository_id) ON DELETE CASCADE,

    UNIQUE(repository_id, commit_id)
);

-- One action on a file or directory within one change
CREATE TABLE IF NOT EXISTS paths (
    repository_id INTEGER NOT NULL REFERENCES repositories(repository_id) ON DELETE CASCADE,
    change_id TEXT NOT NULL REFERENCES changes(change_id) ON DELETE CASCADE,
    path TEXT NOT NULL,
    kind TEXT NOT NULL CHECK (kind IN ('d', 'f')),                         -- d=directory, f=file
    action TEXT NOT NULL CHECK (action IN ('a', 'c', 'd', 'e', 'm')),      -- a=added, c=copied, d=deleted, e=edited, m=moved

    -- Source of a copy or move. The source revision may lie outside the
    -- logged path's history, so this is not enforced as a foreign key.
    base_change_id TEXT,
    base_path TEXT,

    PRIMARY KEY (repository_id, change_id, path),
    CHECK ((base_change_id IS NULL) = (base_path IS NULL)),
    CHECK ((action IN ('c', 'm')) = (base_change_id IS NOT NULL))
);

CREATE INDEX IF NOT EXISTS idx_changes_repository ON changes(repository_id);
CREATE INDEX IF NOT EXISTS idx_paths_change ON paths(change_id);
CREATE INDEX IF NOT EXISTS idx_paths_base_change ON paths(base_change_id);
CREATE INDEX IF NOT EXISTS idx_paths_path ON paths(path);
"#;
