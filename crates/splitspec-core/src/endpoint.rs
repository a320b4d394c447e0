//! Full endpoint parsing.
//!
//! Orchestrates the expensive tier of the two-tier design: locate the
//! requested method's operation in a path-item file, then resolve its
//! request and response schema `$ref` chains into bounded field trees.
//! Each call re-reads and re-resolves from storage; nothing is cached, so
//! edits to the underlying files are always reflected in the next parse.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};
use crate::operation;
use crate::resolve;
use crate::tree::{SchemaTreeBuilder, TreeLimits};
use crate::types::ParsedEndpoint;
use crate::workspace::Workspace;

/// Parses one method of one endpoint file into a [`ParsedEndpoint`]
pub struct EndpointParser<'a> {
    workspace: &'a Workspace,
    limits: TreeLimits,
}

impl<'a> EndpointParser<'a> {
    pub fn new(workspace: &'a Workspace) -> Self {
        Self {
            workspace,
            limits: TreeLimits::default(),
        }
    }

    pub fn with_limits(workspace: &'a Workspace, limits: TreeLimits) -> Self {
        Self { workspace, limits }
    }

    /// Fully parse one method of one endpoint file.
    ///
    /// `project_root` is the workspace-relative path to the project's
    /// `openapi.yaml`; `endpoint_path` is the path-item file's path relative
    /// to that file, as written in the root spec's `$ref`.
    ///
    /// Fails with [`Error::DocumentNotFound`] when the root spec or the
    /// endpoint file is absent, and [`Error::MethodNotFound`] when the file
    /// has no block for `method`. Nested schema refs that do not resolve
    /// degrade to childless fields instead of failing.
    pub async fn parse(
        &self,
        project_root: &str,
        endpoint_path: &str,
        method: &str,
    ) -> Result<ParsedEndpoint> {
        log::info!("parsing endpoint: root={project_root} file={endpoint_path} method={method}");

        let root_path = Path::new(project_root);
        if !self.workspace.contains(root_path).await {
            return Err(Error::document_not_found(project_root));
        }
        let api_root_dir = Workspace::parent_of(root_path);

        let clean = endpoint_path.strip_prefix("./").unwrap_or(endpoint_path);
        let endpoint_file = self.workspace.resolve_relative(&api_root_dir, clean);
        let content = self.workspace.read_to_string(&endpoint_file).await?;

        let view =
            operation::extract_operation(&content, method, &endpoint_file.to_string_lossy())?;

        let mut parsed = ParsedEndpoint::new(method.to_uppercase());
        parsed.summary = view.summary;
        parsed.operation_id = view.operation_id;
        parsed.tag = view.tag;
        parsed.request_body_required = view.request_body_required;
        parsed.parameters = view.parameters;

        let endpoint_dir = Workspace::parent_of(&endpoint_file);
        let builder = SchemaTreeBuilder::with_limits(self.workspace, self.limits);

        match &view.request_schema_ref {
            Some(ref_str) => {
                parsed.request_schema_name = Some(resolve::short_name(ref_str));
                parsed.request_fields = builder
                    .build_from_ref(ref_str, &endpoint_dir, 0, &HashSet::new())
                    .await;
            }
            None => parsed.request_schema_name = Some("Unknown".to_string()),
        }
        if let Some(ref_str) = &view.response_schema_ref {
            parsed.response_fields = builder
                .build_from_ref(ref_str, &endpoint_dir, 0, &HashSet::new())
                .await;
        }

        log::info!(
            "parsed {} {} with {} request and {} response fields",
            parsed.method,
            endpoint_path,
            parsed.request_fields.len(),
            parsed.response_fields.len()
        );
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn test_parse_missing_project_root() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path()).unwrap();
        let parser = EndpointParser::new(&workspace);

        let err = parser
            .parse("api/openapi.yaml", "./paths/users.yaml", "get")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DocumentNotFound(_)));
    }

    #[tokio::test]
    async fn test_parse_missing_endpoint_file() {
        let dir = tempdir().unwrap();
        write(&dir.path().join("api/openapi.yaml"), "paths: {}\n");
        let workspace = Workspace::new(dir.path()).unwrap();
        let parser = EndpointParser::new(&workspace);

        let err = parser
            .parse("api/openapi.yaml", "./paths/users.yaml", "get")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DocumentNotFound(_)));
    }

    #[tokio::test]
    async fn test_parse_request_schema_name_sentinel() {
        let dir = tempdir().unwrap();
        write(&dir.path().join("api/openapi.yaml"), "paths: {}\n");
        write(
            &dir.path().join("api/paths/users.yaml"),
            "get:\n  summary: List users\n  responses: {}\n",
        );
        let workspace = Workspace::new(dir.path()).unwrap();
        let parser = EndpointParser::new(&workspace);

        let parsed = parser
            .parse("api/openapi.yaml", "./paths/users.yaml", "get")
            .await
            .unwrap();
        assert_eq!(parsed.method, "GET");
        assert_eq!(parsed.request_schema_name.as_deref(), Some("Unknown"));
        assert_eq!(parsed.url, None);
    }
}
