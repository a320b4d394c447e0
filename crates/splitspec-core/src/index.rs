//! Lightweight endpoint indexing.
//!
//! Enumerates a project's endpoints (URL template, path-item file, HTTP
//! methods) without resolving any schema. This is the cheap tier of the
//! two-tier design: the root document gets one structural parse, and each
//! path-item file gets a single start-of-line scan, so indexing stays linear
//! in total bytes even with thousands of endpoints.

// Internal imports (std, crate)
use std::path::Path;

use crate::error::Result;
use crate::types::{ApiProject, EndpointInfo};
use crate::workspace::Workspace;

// External imports (alphabetized)
use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::Value as YamlValue;

/// The canonical HTTP method set recognized in path-item files.
pub const HTTP_METHODS: [&str; 7] = ["get", "post", "put", "delete", "patch", "head", "options"];

static METHOD_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    HTTP_METHODS
        .iter()
        .map(|method| {
            let re = Regex::new(&format!(r"(?m)^{method}\s*:")).expect("static method pattern");
            (*method, re)
        })
        .collect()
});

/// Index a project's endpoints from its root spec document.
///
/// Returns one [`EndpointInfo`] per `$ref`-valued entry under `paths`, in
/// document order; inline path items are excluded. A declared file that is
/// absent or unreadable still yields an entry with an empty method list. An
/// unreadable or malformed root document yields an empty index with a
/// warning; callers treat "no endpoints" and "read failure" identically
/// at this layer.
pub async fn index_endpoints(workspace: &Workspace, project: &ApiProject) -> Vec<EndpointInfo> {
    let mut endpoints = Vec::new();

    let root_path = Path::new(&project.root_path);
    let content = match workspace.read_to_string(root_path).await {
        Ok(content) => content,
        Err(err) => {
            log::warn!("root spec {} not readable: {err}", project.root_path);
            return endpoints;
        }
    };
    let path_to_file = match parse_paths_section(&content) {
        Ok(mapping) => mapping,
        Err(err) => {
            log::warn!("root spec {} did not parse: {err}", project.root_path);
            return endpoints;
        }
    };
    if path_to_file.is_empty() {
        log::warn!(
            "no externally referenced paths in {} for project {}",
            project.root_path,
            project.name
        );
    }

    let base_dir = Workspace::parent_of(root_path);
    for (api_path, file_path) in path_to_file {
        let target = workspace.resolve_relative(&base_dir, &file_path);
        let methods = match workspace.read_to_string(&target).await {
            Ok(content) => detect_methods(&content),
            Err(err) => {
                log::warn!("endpoint file {} not readable: {err}", target.display());
                Vec::new()
            }
        };
        endpoints.push(EndpointInfo::new(api_path, file_path, methods));
    }

    log::info!(
        "indexed {} endpoints from project {}",
        endpoints.len(),
        project.name
    );
    endpoints
}

/// Index the endpoints of every project discovered under the workspace
/// root, in discovery order.
pub async fn discover_endpoint_index(workspace: &Workspace) -> Vec<EndpointInfo> {
    let mut endpoints = Vec::new();
    for project in crate::project::discover_projects(workspace).await {
        endpoints.extend(index_endpoints(workspace, &project).await);
    }
    endpoints
}

/// Extract the `paths` mapping's `$ref`-valued entries as (URL template,
/// file path) pairs, preserving document order.
pub fn parse_paths_section(content: &str) -> Result<Vec<(String, String)>> {
    let root = Workspace::parse_mapping(content)?;
    let Some(paths) = root.get("paths").and_then(YamlValue::as_mapping) else {
        return Ok(Vec::new());
    };

    let mut result = Vec::new();
    for (path, definition) in paths {
        let (Some(path), Some(definition)) = (path.as_str(), definition.as_mapping()) else {
            continue;
        };
        if let Some(ref_str) = definition.get("$ref").and_then(YamlValue::as_str) {
            result.push((path.to_string(), ref_str.to_string()));
        }
        // inline path items have no backing file and are not indexed
    }
    Ok(result)
}

/// Detect which canonical HTTP methods a path-item file defines, by
/// start-of-line key scan; no schema is parsed.
pub fn detect_methods(content: &str) -> Vec<String> {
    METHOD_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(content))
        .map(|(method, _)| method.to_string())
        .collect()
}
