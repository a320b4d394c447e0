//! Core value types for split-spec processing

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// A node in a resolved request/response schema tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Property key as written in the schema document
    pub name: String,
    /// YAML scalar type name (string, integer, object, array)
    pub type_name: Option<String>,
    /// Optional format specifier (e.g., "date-time")
    pub format: Option<String>,
    /// Description with one layer of surrounding quotes stripped
    pub description: Option<String>,
    /// Example value, raw literal
    pub example: Option<String>,
    /// Whether this property appears in the enclosing schema's `required` list
    pub required: bool,
    /// Whether the property's declared type is `array`
    pub is_array: bool,
    /// Nesting level, 0 at the root of the resolved tree
    pub depth: usize,
    /// Short name of the `$ref` that produced this field's children
    pub ref_name: Option<String>,
    /// Child fields in document order
    pub children: Vec<Field>,
}

impl Field {
    /// Create a new field at the given tree depth
    pub fn new(name: impl Into<String>, depth: usize) -> Self {
        Self {
            name: name.into(),
            type_name: None,
            format: None,
            description: None,
            example: None,
            required: false,
            is_array: false,
            depth,
            ref_name: None,
            children: Vec::new(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Name indented two spaces per nesting level, for tabular display
    pub fn display_name(&self) -> String {
        format!("{}{}", "  ".repeat(self.depth), self.name)
    }

    /// Type with an `[]` suffix for array properties
    pub fn display_type(&self) -> String {
        match (&self.type_name, self.is_array) {
            (Some(t), true) => format!("{t}[]"),
            (Some(t), false) => t.clone(),
            (None, _) => String::new(),
        }
    }
}

// Wire shape for the UI boundary: missing optional strings become empty
// strings, `children` is emitted only when present.
impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("type", self.type_name.as_deref().unwrap_or(""))?;
        map.serialize_entry("description", self.description.as_deref().unwrap_or(""))?;
        map.serialize_entry("format", self.format.as_deref().unwrap_or(""))?;
        map.serialize_entry("example", self.example.as_deref().unwrap_or(""))?;
        map.serialize_entry("required", &self.required)?;
        map.serialize_entry("depth", &self.depth)?;
        map.serialize_entry("hasChildren", &self.has_children())?;
        if self.has_children() {
            map.serialize_entry("children", &self.children)?;
        }
        map.end()
    }
}

/// Fully parsed data for one method of one endpoint file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedEndpoint {
    /// Uppercased HTTP verb
    pub method: String,
    /// URL template; not resolvable from the endpoint file alone
    pub url: Option<String>,
    pub operation_id: Option<String>,
    /// First tag only
    pub tag: Option<String>,
    pub summary: Option<String>,
    pub request_body_required: bool,
    /// Root-level request body fields, depth 0
    pub request_fields: Vec<Field>,
    /// Root-level response fields, depth 0
    pub response_fields: Vec<Field>,
    /// Operation parameters, depth 0
    pub parameters: Vec<Field>,
    /// Short name of the request schema, or "Unknown" if no `$ref` was found
    pub request_schema_name: Option<String>,
    /// Free-form caller annotation, never set by the core
    pub algorithm: Option<String>,
    /// Free-form caller annotation, never set by the core
    pub notes: Option<String>,
}

impl ParsedEndpoint {
    /// Create a new parse result for the given HTTP method
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..Self::default()
        }
    }
}

impl Serialize for ParsedEndpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("method", &self.method)?;
        map.serialize_entry("url", self.url.as_deref().unwrap_or(""))?;
        map.serialize_entry("operationId", self.operation_id.as_deref().unwrap_or(""))?;
        map.serialize_entry("tag", self.tag.as_deref().unwrap_or(""))?;
        map.serialize_entry("summary", self.summary.as_deref().unwrap_or(""))?;
        map.serialize_entry("requestFields", &self.request_fields)?;
        map.serialize_entry("responseFields", &self.response_fields)?;
        map.end()
    }
}

/// Lightweight representation of an endpoint, produced without full parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointInfo {
    /// URL template, e.g. "/api/v1/cashback/score"
    pub api_path: String,
    /// Relative path to the path-item file, as written in the root spec
    pub file_path: String,
    /// HTTP methods defined in that file, canonical order, deduplicated
    pub methods: Vec<String>,
}

impl EndpointInfo {
    pub fn new(
        api_path: impl Into<String>,
        file_path: impl Into<String>,
        methods: Vec<String>,
    ) -> Self {
        Self {
            api_path: api_path.into(),
            file_path: file_path.into(),
            methods,
        }
    }

    /// File name without directory or extension, for display
    pub fn display_name(&self) -> &str {
        let file = self.file_path.rsplit('/').next().unwrap_or(&self.file_path);
        file.strip_suffix(".yaml")
            .or_else(|| file.strip_suffix(".yml"))
            .unwrap_or(file)
    }
}

/// An API project declared by a redocly.yaml file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiProject {
    /// Project name, the key under `apis`
    pub name: String,
    /// Workspace-relative path to the project's root spec file
    pub root_path: String,
}

impl ApiProject {
    pub fn new(name: impl Into<String>, root_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root_path: root_path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_display_helpers() {
        let mut field = Field::new("items", 2);
        field.type_name = Some("string".into());
        field.is_array = true;
        assert_eq!(field.display_name(), "    items");
        assert_eq!(field.display_type(), "string[]");

        let bare = Field::new("x", 0);
        assert_eq!(bare.display_type(), "");
    }

    #[test]
    fn test_field_wire_shape_without_children() {
        let mut field = Field::new("id", 0);
        field.type_name = Some("integer".into());
        field.required = true;

        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "id",
                "type": "integer",
                "description": "",
                "format": "",
                "example": "",
                "required": true,
                "depth": 0,
                "hasChildren": false,
            })
        );
    }

    #[test]
    fn test_field_wire_shape_with_children() {
        let mut child = Field::new("street", 1);
        child.type_name = Some("string".into());
        let mut field = Field::new("address", 0);
        field.ref_name = Some("Address".into());
        field.children.push(child);

        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["hasChildren"], json!(true));
        assert_eq!(value["children"][0]["name"], json!("street"));
        assert_eq!(value["children"][0]["depth"], json!(1));
    }

    #[test]
    fn test_endpoint_wire_shape_uses_empty_strings() {
        let mut parsed = ParsedEndpoint::new("GET");
        parsed.summary = Some("List users".into());

        let value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(value["method"], json!("GET"));
        assert_eq!(value["summary"], json!("List users"));
        assert_eq!(value["operationId"], json!(""));
        assert_eq!(value["url"], json!(""));
        assert_eq!(value["requestFields"], json!([]));
    }

    #[test]
    fn test_endpoint_info_display_name() {
        let info = EndpointInfo::new("/users", "./paths/users.yaml", vec!["get".into()]);
        assert_eq!(info.display_name(), "users");

        let info = EndpointInfo::new("/users", "paths/users.yml", Vec::new());
        assert_eq!(info.display_name(), "users");
    }

    #[test]
    fn test_endpoint_info_serializes_camel_case() {
        let info = EndpointInfo::new("/users", "./paths/users.yaml", vec!["get".into()]);
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(
            value,
            json!({
                "apiPath": "/users",
                "filePath": "./paths/users.yaml",
                "methods": ["get"],
            })
        );
    }
}
