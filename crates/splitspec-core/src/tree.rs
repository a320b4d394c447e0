//! Schema field-tree construction.
//!
//! Given a resolved schema document, walks its `properties` block into an
//! ordered tree of [`Field`] nodes, following nested `$ref`s across files.
//! The walk is bounded two ways: a visited-ref set threaded immutably along
//! the current root-to-node path stops cycles, and a configurable depth
//! ceiling stops runaway chains. Both bounds truncate silently; neither is
//! an error.
//!
//! The property scan is deliberately indentation-driven rather than a full
//! structural parse: sibling and nesting boundaries inside a `properties`
//! block are derived from physical layout, which survives stylistic and
//! partially malformed YAML that a strict parser rejects. Structural parsing
//! is still used for the uniquely-keyed `required` list.

// Internal imports (std, crate)
use std::collections::HashSet;
use std::path::Path;

use crate::resolve;
use crate::types::Field;
use crate::workspace::Workspace;

// External imports (alphabetized)
use futures::future::BoxFuture;
use futures::FutureExt;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::Value as YamlValue;

/// Default ceiling on `$ref` expansion depth.
pub const DEFAULT_MAX_DEPTH: usize = 10;

static REF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\$ref:\s*['"]?([^'"\s]+)['"]?"#).unwrap());

/// Limits applied while expanding a schema tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeLimits {
    /// Maximum `$ref` nesting depth before the tree is truncated.
    pub max_depth: usize,
}

impl Default for TreeLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Expands schema documents into ordered [`Field`] trees
pub struct SchemaTreeBuilder<'a> {
    workspace: &'a Workspace,
    limits: TreeLimits,
}

impl<'a> SchemaTreeBuilder<'a> {
    pub fn new(workspace: &'a Workspace) -> Self {
        Self {
            workspace,
            limits: TreeLimits::default(),
        }
    }

    pub fn with_limits(workspace: &'a Workspace, limits: TreeLimits) -> Self {
        Self { workspace, limits }
    }

    /// Resolve `ref_str` against `base_dir` and expand the target schema's
    /// properties into fields at `depth`.
    ///
    /// Missing targets, revisited refs and depth overruns all yield an empty
    /// list; none of them is an error. `visited` holds the refs already
    /// expanded along the current root-to-node path, keyed on the normalized
    /// target path so two spellings of the same file still trip the guard.
    pub async fn build_from_ref(
        &self,
        ref_str: &str,
        base_dir: &Path,
        depth: usize,
        visited: &HashSet<String>,
    ) -> Vec<Field> {
        let (file_part, _pointer) = resolve::split_ref(ref_str);
        if file_part.is_empty() {
            // Same-document anchor: leaf schema files in a split spec carry
            // no components map to resolve it against.
            log::debug!("leaving same-document ref unresolved: {ref_str}");
            return Vec::new();
        }

        let target = resolve::normalize(base_dir, file_part);
        let key = target.to_string_lossy().into_owned();
        if depth > self.limits.max_depth || visited.contains(&key) {
            log::debug!("truncating schema tree at {ref_str} (depth {depth})");
            return Vec::new();
        }
        // Extend a copy: sibling branches must not see each other's history.
        let mut visited = visited.clone();
        visited.insert(key);

        let content = match self.workspace.read_to_string(&target).await {
            Ok(content) => content,
            Err(err) => {
                log::warn!("schema file {} not readable: {err}", target.display());
                return Vec::new();
            }
        };

        self.parse_schema(&content, &Workspace::parent_of(&target), depth, &visited)
            .await
    }

    /// Walk the `properties:` block of a schema document into ordered fields.
    ///
    /// Property names sit exactly two columns right of `properties:`,
    /// attributes four or more; the block ends at the first line back at or
    /// left of the `properties:` column. A document with no `properties:`
    /// key yields an empty list.
    pub fn parse_schema<'b>(
        &'b self,
        content: &'b str,
        base_dir: &'b Path,
        depth: usize,
        visited: &'b HashSet<String>,
    ) -> BoxFuture<'b, Vec<Field>> {
        async move {
            let mut fields = Vec::new();
            let lines: Vec<&str> = content.lines().collect();

            let Some(props_idx) = lines
                .iter()
                .position(|l| l.trim_start().starts_with("properties:"))
            else {
                log::debug!("schema has no properties block");
                return fields;
            };

            let props_indent = indent_of(lines[props_idx]);
            let name_indent = props_indent + 2;
            let attr_indent = props_indent + 4;
            let required = required_names(content);

            let mut current: Option<Field> = None;
            for line in &lines[props_idx + 1..] {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    continue;
                }
                let indent = indent_of(line);
                if indent <= props_indent {
                    break;
                }

                if indent == name_indent && is_property_key(trimmed) {
                    if let Some(done) = current.take() {
                        fields.push(done);
                    }
                    let (name, rest) = trimmed.split_once(':').expect("checked property key");
                    let mut field = Field::new(name.trim(), depth);
                    field.required = required.contains(name.trim());
                    // flow-style properties carry their attributes inline
                    if rest.trim_start().starts_with('{') {
                        if let Some(ref_str) = apply_inline_attrs(&mut field, rest.trim()) {
                            field.ref_name = Some(resolve::short_name(&ref_str));
                            let children = self
                                .build_from_ref(&ref_str, base_dir, depth + 1, visited)
                                .await;
                            field.children.extend(children);
                        }
                    }
                    current = Some(field);
                } else if let Some(field) = current.as_mut() {
                    if indent < attr_indent {
                        continue;
                    }
                    if let Some(rest) = trimmed.strip_prefix("type:") {
                        let type_name = rest.trim();
                        field.is_array = type_name == "array";
                        field.type_name = Some(type_name.to_string());
                    } else if let Some(rest) = trimmed.strip_prefix("description:") {
                        field.description = Some(strip_quotes(rest.trim()).to_string());
                    } else if let Some(rest) = trimmed.strip_prefix("format:") {
                        field.format = Some(rest.trim().to_string());
                    } else if let Some(rest) = trimmed.strip_prefix("example:") {
                        field.example = Some(strip_quotes(rest.trim()).to_string());
                    } else if trimmed.starts_with("$ref:") {
                        if let Some(caps) = REF_RE.captures(trimmed) {
                            let ref_str = caps.get(1).expect("capture group").as_str();
                            field.ref_name = Some(resolve::short_name(ref_str));
                            let children = self
                                .build_from_ref(ref_str, base_dir, depth + 1, visited)
                                .await;
                            field.children.extend(children);
                        }
                    }
                }
            }
            if let Some(done) = current.take() {
                fields.push(done);
            }

            log::debug!("parsed {} fields from schema", fields.len());
            fields
        }
        .boxed()
    }
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn is_property_key(trimmed: &str) -> bool {
    match trimmed.split_once(':') {
        Some((key, _)) => {
            !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    }
}

/// Apply attributes from a flow-style property value (`id: {type: integer}`).
/// Returns the `$ref` value when one is present.
fn apply_inline_attrs(field: &mut Field, rest: &str) -> Option<String> {
    let value: YamlValue = serde_yaml::from_str(rest).ok()?;
    let map = value.as_mapping()?;
    if let Some(type_name) = map.get("type").and_then(YamlValue::as_str) {
        field.is_array = type_name == "array";
        field.type_name = Some(type_name.to_string());
    }
    if let Some(description) = map.get("description").and_then(YamlValue::as_str) {
        field.description = Some(description.to_string());
    }
    if let Some(format) = map.get("format").and_then(YamlValue::as_str) {
        field.format = Some(format.to_string());
    }
    if let Some(example) = map.get("example") {
        field.example = crate::operation::scalar_string(example);
    }
    map.get("$ref").and_then(YamlValue::as_str).map(String::from)
}

/// Strip exactly one layer of matching surrounding quotes.
fn strip_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2
        && ((bytes[0] == b'\'' && bytes[bytes.len() - 1] == b'\'')
            || (bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"'))
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// Collect required property names from every `required` string-sequence in
/// the document. Falls back to a line scan when the document does not parse
/// structurally.
fn required_names(content: &str) -> HashSet<String> {
    match serde_yaml::from_str::<YamlValue>(content) {
        Ok(doc) => {
            let mut out = HashSet::new();
            collect_required(&doc, &mut out);
            out
        }
        Err(err) => {
            log::debug!("structural parse failed ({err}), scanning lines for required block");
            required_names_from_lines(content)
        }
    }
}

fn collect_required(value: &YamlValue, out: &mut HashSet<String>) {
    match value {
        YamlValue::Mapping(map) => {
            for (key, val) in map {
                if key.as_str() == Some("required") {
                    if let Some(seq) = val.as_sequence() {
                        out.extend(
                            seq.iter()
                                .filter_map(YamlValue::as_str)
                                .map(String::from),
                        );
                    }
                }
                collect_required(val, out);
            }
        }
        YamlValue::Sequence(seq) => {
            for val in seq {
                collect_required(val, out);
            }
        }
        _ => {}
    }
}

fn required_names_from_lines(content: &str) -> HashSet<String> {
    let mut out = HashSet::new();
    let mut in_block = false;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed == "required:" {
            in_block = true;
            continue;
        }
        if in_block {
            if let Some(item) = trimmed.strip_prefix("- ") {
                out.insert(item.trim().to_string());
            } else if !trimmed.is_empty() {
                in_block = false;
            }
        }
    }
    out
}
