use std::path::Path;

use serde::Serialize;

use crate::store::Store;

use super::init_store;

#[derive(Serialize)]
struct RepositoryOutput {
    repository_id: i64,
    uri: String,
    last_change_id: Option<String>,
    changes: i64,
    paths: i64,
}

#[derive(Serialize)]
struct DatabaseInfo {
    repositories: Vec<RepositoryOutput>,
}

pub fn run_info(db_path: &Path, json: bool) -> anyhow::Result<()> {
    let store = init_store(db_path)?;

    let mut repositories = Vec::new();
    for repository in store.list_repositories()? {
        repositories.push(RepositoryOutput {
            changes: store.count_changes(repository.repository_id)?,
            paths: store.count_paths(repository.repository_id)?,
            repository_id: repository.repository_id,
            uri: repository.uri,
            last_change_id: repository.last_change_id,
        });
    }
    let info = DatabaseInfo { repositories };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!();
        println!("vcdb database {}", db_path.display());
        println!("{}", "─".repeat(20));
        if info.repositories.is_empty() {
            println!("No repositories.");
        }
        for repository in &info.repositories {
            println!("{:>3}  {}", repository.repository_id, repository.uri);
            println!("     Changes:  {}", repository.changes);
            println!("     Paths:    {}", repository.paths);
            if let Some(last_change_id) = &repository.last_change_id {
                println!("     Last:     {last_change_id}");
            }
        }
        println!();
    }

    Ok(())
}
