//! Parameter extraction from operation blocks

use crate::operation::scalar_string;
use crate::types::Field;

use serde_yaml::{Mapping, Value as YamlValue};

/// Extract an operation's `parameters` sequence as depth-0 fields,
/// preserving document order. `$ref`-valued entries are skipped.
pub fn extract_parameters(op: &Mapping) -> Vec<Field> {
    let Some(params) = op.get("parameters").and_then(YamlValue::as_sequence) else {
        return Vec::new();
    };
    params.iter().filter_map(extract_parameter_field).collect()
}

fn extract_parameter_field(param: &YamlValue) -> Option<Field> {
    let map = param.as_mapping()?;
    if map.contains_key("$ref") {
        return None;
    }
    let name = map.get("name").and_then(YamlValue::as_str)?;

    let mut field = Field::new(name, 0);
    field.description = map
        .get("description")
        .and_then(YamlValue::as_str)
        .map(str::to_string);
    field.example = map.get("example").and_then(scalar_string);
    field.required = map
        .get("required")
        .and_then(YamlValue::as_bool)
        .unwrap_or(false);

    if let Some(schema) = map.get("schema").and_then(YamlValue::as_mapping) {
        if let Some(type_name) = schema.get("type").and_then(YamlValue::as_str) {
            field.is_array = type_name == "array";
            field.type_name = Some(type_name.to_string());
        }
        field.format = schema
            .get("format")
            .and_then(YamlValue::as_str)
            .map(str::to_string);
        if field.example.is_none() {
            field.example = schema.get("example").and_then(scalar_string);
        }
    }
    Some(field)
}
