//! Operation extraction from path-item documents.
//!
//! Locates one HTTP method's operation block via structural YAML parsing,
//! keyed on the top-level mapping so that same-named keys nested inside
//! sibling operations cannot be mistaken for a method, and extracts its
//! metadata and request/response schema `$ref`s. Request and response sides
//! use the same `content -> application/json -> schema -> $ref` chain.

use crate::error::{Error, Result};
use crate::parameter;
use crate::types::Field;
use crate::workspace::Workspace;

use serde_yaml::{Mapping, Value as YamlValue};

/// One method's operation block, reduced to what the endpoint parser needs
#[derive(Debug, Clone, Default)]
pub struct OperationView {
    pub summary: Option<String>,
    pub operation_id: Option<String>,
    /// First tag only
    pub tag: Option<String>,
    pub request_body_required: bool,
    /// `$ref` of the request body's application/json schema
    pub request_schema_ref: Option<String>,
    /// `$ref` of the first 2xx response's application/json schema
    pub response_schema_ref: Option<String>,
    /// Operation parameters as depth-0 fields, document order
    pub parameters: Vec<Field>,
}

/// Extract the operation block for `method` from a path-item document.
///
/// The method key must exist in the file's top-level mapping; its absence is
/// [`Error::MethodNotFound`], distinguishable from a document that resolved
/// but carries nothing.
pub fn extract_operation(content: &str, method: &str, file: &str) -> Result<OperationView> {
    let root = Workspace::parse_mapping(content)?;
    let op = root
        .get(method)
        .ok_or_else(|| Error::method_not_found(method, file))?;
    let op = op
        .as_mapping()
        .ok_or_else(|| Error::malformed(format!("operation block '{method}' is not a mapping")))?;

    let mut view = OperationView {
        summary: scalar_field(op, "summary"),
        operation_id: scalar_field(op, "operationId"),
        tag: first_tag(op),
        parameters: parameter::extract_parameters(op),
        ..OperationView::default()
    };

    if let Some(body) = op.get("requestBody").and_then(YamlValue::as_mapping) {
        view.request_body_required = body
            .get("required")
            .and_then(YamlValue::as_bool)
            .unwrap_or(false);
        view.request_schema_ref = body
            .get("content")
            .and_then(|content| json_schema_ref(content));
    }
    view.response_schema_ref = first_success_response(op).and_then(response_schema_ref);

    Ok(view)
}

fn scalar_field(map: &Mapping, key: &str) -> Option<String> {
    map.get(key).and_then(YamlValue::as_str).map(str::to_string)
}

fn first_tag(op: &Mapping) -> Option<String> {
    op.get("tags")
        .and_then(YamlValue::as_sequence)
        .and_then(|tags| tags.first())
        .and_then(YamlValue::as_str)
        .map(str::to_string)
}

/// The first response whose status code is in the 2xx range, document order.
fn first_success_response(op: &Mapping) -> Option<&YamlValue> {
    let responses = op.get("responses")?.as_mapping()?;
    responses
        .iter()
        .find(|(code, _)| {
            let code = match code {
                YamlValue::String(s) => s.parse::<u16>().ok(),
                YamlValue::Number(n) => n.as_u64().map(|c| c as u16),
                _ => None,
            };
            matches!(code, Some(c) if (200..300).contains(&c))
        })
        .map(|(_, response)| response)
}

fn response_schema_ref(response: &YamlValue) -> Option<String> {
    if let Some(ref_str) = response.get("content").and_then(json_schema_ref) {
        return Some(ref_str);
    }
    // a response object may itself live in a referenced file
    response
        .get("$ref")
        .and_then(YamlValue::as_str)
        .map(str::to_string)
}

/// Follow `application/json` to `schema` to `$ref`, accepting an array item ref.
fn json_schema_ref(content: &YamlValue) -> Option<String> {
    let schema = content.get("application/json")?.get("schema")?;
    if let Some(ref_str) = schema.get("$ref").and_then(YamlValue::as_str) {
        return Some(ref_str.to_string());
    }
    schema
        .get("items")
        .and_then(|items| items.get("$ref"))
        .and_then(YamlValue::as_str)
        .map(str::to_string)
}

/// Render a YAML scalar as its literal string form.
pub(crate) fn scalar_string(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
