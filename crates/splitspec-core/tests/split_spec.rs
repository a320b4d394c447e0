//! End-to-end tests over on-disk split-spec fixtures

use std::path::Path;

use splitspec_core::{
    discover_endpoint_index, index_endpoints, ApiProject, EndpointParser, Error, ParsedEndpoint,
    Workspace, DEFAULT_MAX_DEPTH,
};
use tempfile::{tempdir, TempDir};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// A minimal split spec: one project, one endpoint, one schema file.
fn users_fixture() -> (TempDir, Workspace, ApiProject) {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "api/openapi.yaml",
        "openapi: 3.0.3\npaths:\n  /users:\n    $ref: ./paths/users.yaml\n",
    );
    write(
        dir.path(),
        "api/paths/users.yaml",
        "\
get:
  summary: List users
  responses:
    '200':
      content:
        application/json:
          schema:
            $ref: \"../schemas/UserList.yaml\"
",
    );
    write(
        dir.path(),
        "api/schemas/UserList.yaml",
        "required: [id]\nproperties:\n  id: {type: integer}\n  name: {type: string}\n",
    );
    let workspace = Workspace::new(dir.path()).unwrap();
    let project = ApiProject::new("api", "api/openapi.yaml");
    (dir, workspace, project)
}

async fn parse_users(workspace: &Workspace, method: &str) -> Result<ParsedEndpoint, Error> {
    EndpointParser::new(workspace)
        .parse("api/openapi.yaml", "./paths/users.yaml", method)
        .await
}

#[tokio::test]
async fn index_lists_externally_split_endpoints() {
    let (_dir, workspace, project) = users_fixture();

    let endpoints = index_endpoints(&workspace, &project).await;

    assert_eq!(endpoints.len(), 1);
    assert_eq!(endpoints[0].api_path, "/users");
    assert_eq!(endpoints[0].file_path, "./paths/users.yaml");
    assert_eq!(endpoints[0].methods, vec!["get"]);
}

#[tokio::test]
async fn discovery_feeds_the_index() {
    let (dir, workspace, _project) = users_fixture();
    write(
        dir.path(),
        "redocly.yaml",
        "apis:\n  api:\n    root: ./api/openapi.yaml\n",
    );

    let endpoints = discover_endpoint_index(&workspace).await;

    assert_eq!(endpoints.len(), 1);
    assert_eq!(endpoints[0].api_path, "/users");
}

#[tokio::test]
async fn parse_resolves_response_schema_across_directories() {
    let (_dir, workspace, _project) = users_fixture();

    let parsed = parse_users(&workspace, "get").await.unwrap();

    assert_eq!(parsed.method, "GET");
    assert_eq!(parsed.summary.as_deref(), Some("List users"));
    assert!(parsed.request_fields.is_empty());

    let fields = &parsed.response_fields;
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].name, "id");
    assert_eq!(fields[0].type_name.as_deref(), Some("integer"));
    assert!(fields[0].required);
    assert_eq!(fields[0].depth, 0);
    assert!(fields[0].children.is_empty());
    assert_eq!(fields[1].name, "name");
    assert_eq!(fields[1].type_name.as_deref(), Some("string"));
    assert!(!fields[1].required);
}

#[tokio::test]
async fn absent_method_is_an_error_and_index_is_unaffected() {
    let (_dir, workspace, project) = users_fixture();

    let err = parse_users(&workspace, "post").await.unwrap_err();
    assert!(matches!(err, Error::MethodNotFound { .. }));

    // the index does not care that the method is missing
    assert_eq!(index_endpoints(&workspace, &project).await.len(), 1);
}

#[tokio::test]
async fn missing_ref_target_yields_childless_field() {
    let dir = tempdir().unwrap();
    write(dir.path(), "api/openapi.yaml", "paths: {}\n");
    write(
        dir.path(),
        "api/paths/orders.yaml",
        "\
post:
  requestBody:
    content:
      application/json:
        schema:
          $ref: ../schemas/Order.yaml
  responses: {}
",
    );
    write(
        dir.path(),
        "api/schemas/Order.yaml",
        "properties:\n  buyer:\n    $ref: ../../shared/Buyer.yaml\n",
    );
    // shared/Buyer.yaml is deliberately absent from the workspace
    let workspace = Workspace::new(dir.path()).unwrap();

    let parsed = EndpointParser::new(&workspace)
        .parse("api/openapi.yaml", "./paths/orders.yaml", "post")
        .await
        .unwrap();

    assert_eq!(parsed.request_schema_name.as_deref(), Some("Order"));
    assert_eq!(parsed.request_fields.len(), 1);
    let buyer = &parsed.request_fields[0];
    assert_eq!(buyer.ref_name.as_deref(), Some("Buyer"));
    assert!(buyer.children.is_empty());
}

#[tokio::test]
async fn circular_schemas_terminate() {
    let dir = tempdir().unwrap();
    write(dir.path(), "api/openapi.yaml", "paths: {}\n");
    write(
        dir.path(),
        "api/paths/nodes.yaml",
        "\
get:
  responses:
    '200':
      content:
        application/json:
          schema:
            $ref: ../schemas/Node.yaml
",
    );
    write(
        dir.path(),
        "api/schemas/Node.yaml",
        "properties:\n  value:\n    type: string\n  link:\n    $ref: ./Edge.yaml\n",
    );
    write(
        dir.path(),
        "api/schemas/Edge.yaml",
        "properties:\n  target:\n    $ref: ./Node.yaml\n",
    );
    let workspace = Workspace::new(dir.path()).unwrap();

    let parsed = EndpointParser::new(&workspace)
        .parse("api/openapi.yaml", "./paths/nodes.yaml", "get")
        .await
        .unwrap();

    let link = &parsed.response_fields[1];
    assert_eq!(link.name, "link");
    let target = &link.children[0];
    assert_eq!(target.name, "target");
    // Node is reached again through Edge and truncated there
    assert!(target.children.is_empty());
}

#[tokio::test]
async fn deep_chains_truncate_at_the_ceiling() {
    let dir = tempdir().unwrap();
    write(dir.path(), "api/openapi.yaml", "paths: {}\n");
    write(
        dir.path(),
        "api/paths/deep.yaml",
        "\
get:
  responses:
    '200':
      content:
        application/json:
          schema:
            $ref: ../schemas/L0.yaml
",
    );
    for i in 0..14 {
        write(
            dir.path(),
            &format!("api/schemas/L{i}.yaml"),
            &format!("properties:\n  next:\n    $ref: ./L{}.yaml\n", i + 1),
        );
    }
    let workspace = Workspace::new(dir.path()).unwrap();

    let parsed = EndpointParser::new(&workspace)
        .parse("api/openapi.yaml", "./paths/deep.yaml", "get")
        .await
        .unwrap();

    let mut node = &parsed.response_fields[0];
    while let Some(child) = node.children.first() {
        node = child;
    }
    assert_eq!(node.depth, DEFAULT_MAX_DEPTH);
    assert!(node.children.is_empty());
}

#[tokio::test]
async fn parse_is_idempotent_for_unchanged_files() {
    let (_dir, workspace, _project) = users_fixture();

    let first = parse_users(&workspace, "get").await.unwrap();
    let second = parse_users(&workspace, "get").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn methodless_file_still_appears_in_index() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "api/openapi.yaml",
        "paths:\n  /draft:\n    $ref: ./paths/draft.yaml\n",
    );
    write(dir.path(), "api/paths/draft.yaml", "# not written yet\n");
    let workspace = Workspace::new(dir.path()).unwrap();
    let project = ApiProject::new("api", "api/openapi.yaml");

    let endpoints = index_endpoints(&workspace, &project).await;

    assert_eq!(endpoints.len(), 1);
    assert!(endpoints[0].methods.is_empty());
}

#[tokio::test]
async fn parse_carries_operation_metadata_and_parameters() {
    let dir = tempdir().unwrap();
    write(dir.path(), "api/openapi.yaml", "paths: {}\n");
    write(
        dir.path(),
        "api/paths/user_by_id.yaml",
        "\
get:
  tags:
    - users
  summary: Fetch one user
  operationId: getUser
  parameters:
    - name: userId
      in: path
      required: true
      schema:
        type: integer
        format: int64
  responses:
    '200':
      content:
        application/json:
          schema:
            $ref: ../schemas/User.yaml
",
    );
    write(
        dir.path(),
        "api/schemas/User.yaml",
        "\
type: object
required:
  - id
properties:
  id:
    type: integer
    format: int64
    description: 'User identifier'
  created:
    type: string
    format: date-time
    example: \"2024-01-01T00:00:00Z\"
",
    );
    let workspace = Workspace::new(dir.path()).unwrap();

    let parsed = EndpointParser::new(&workspace)
        .parse("api/openapi.yaml", "./paths/user_by_id.yaml", "get")
        .await
        .unwrap();

    assert_eq!(parsed.tag.as_deref(), Some("users"));
    assert_eq!(parsed.operation_id.as_deref(), Some("getUser"));
    assert_eq!(parsed.parameters.len(), 1);
    assert_eq!(parsed.parameters[0].name, "userId");
    assert!(parsed.parameters[0].required);

    let fields = &parsed.response_fields;
    assert_eq!(fields[0].description.as_deref(), Some("User identifier"));
    assert_eq!(fields[1].format.as_deref(), Some("date-time"));
    assert_eq!(
        fields[1].example.as_deref(),
        Some("2024-01-01T00:00:00Z")
    );
}
