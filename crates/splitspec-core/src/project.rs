//! API project discovery via redocly.yaml files.
//!
//! A workspace may hold several split specs; each is declared by a
//! `redocly.yaml` (or `redocly.yml`) whose `apis` map names the projects
//! and points at their root spec files.

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

use crate::resolve;
use crate::types::ApiProject;
use crate::workspace::Workspace;

// External imports (alphabetized)
use serde_yaml::Value as YamlValue;
use tokio::fs;

/// Discover API projects under the workspace root.
///
/// Walks directories depth-first (entries sorted per directory, hidden
/// directories skipped) looking for `redocly.yaml`/`redocly.yml`; each
/// project's `root` is rebased to a workspace-relative path. Unreadable or
/// unparseable files are logged and skipped; discovery itself never fails.
pub async fn discover_projects(workspace: &Workspace) -> Vec<ApiProject> {
    let mut projects = Vec::new();
    let mut pending: Vec<PathBuf> = vec![PathBuf::new()];

    while let Some(dir) = pending.pop() {
        let mut names = match list_sorted(workspace.root().join(&dir)).await {
            Ok(names) => names,
            Err(err) => {
                log::warn!("cannot list {}: {err}", dir.display());
                continue;
            }
        };

        if let Some(redocly) = pick_redocly(&names) {
            parse_redocly(workspace, &dir, redocly, &mut projects).await;
        }

        // reverse so the stack pops subdirectories in sorted order
        names.reverse();
        for (name, is_dir) in names {
            if is_dir && !name.starts_with('.') {
                pending.push(dir.join(name));
            }
        }
    }

    log::info!("discovered {} API projects", projects.len());
    projects
}

async fn list_sorted(dir: PathBuf) -> std::io::Result<Vec<(String, bool)>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let is_dir = entry
            .file_type()
            .await
            .map(|t| t.is_dir())
            .unwrap_or(false);
        names.push((entry.file_name().to_string_lossy().into_owned(), is_dir));
    }
    names.sort();
    Ok(names)
}

fn pick_redocly(names: &[(String, bool)]) -> Option<&'static str> {
    for candidate in ["redocly.yaml", "redocly.yml"] {
        if names.iter().any(|(name, is_dir)| name == candidate && !is_dir) {
            return Some(candidate);
        }
    }
    None
}

async fn parse_redocly(
    workspace: &Workspace,
    dir: &Path,
    file_name: &str,
    projects: &mut Vec<ApiProject>,
) {
    let rel = dir.join(file_name);
    let content = match workspace.read_to_string(&rel).await {
        Ok(content) => content,
        Err(err) => {
            log::warn!("cannot read {}: {err}", rel.display());
            return;
        }
    };
    let data = match Workspace::parse_mapping(&content) {
        Ok(data) => data,
        Err(err) => {
            log::warn!("cannot parse {}: {err}", rel.display());
            return;
        }
    };
    let Some(apis) = data.get("apis").and_then(YamlValue::as_mapping) else {
        log::warn!("no 'apis' section in {}", rel.display());
        return;
    };

    for (name, definition) in apis {
        let (Some(name), Some(definition)) = (name.as_str(), definition.as_mapping()) else {
            continue;
        };
        if let Some(root) = definition.get("root").and_then(YamlValue::as_str) {
            let root_path = resolve::normalize(dir, root);
            projects.push(ApiProject::new(
                name,
                root_path.to_string_lossy().into_owned(),
            ));
        }
    }
}
