//! `$ref` string resolution.
//!
//! A `$ref` in a split spec is either a relative file path
//! (`../schemas/Foo.yaml`), a relative file path with a trailing in-document
//! pointer (`../schemas/Foo.yaml#/components/schemas/Foo`), or a
//! same-document anchor (`#/components/schemas/Foo`). Resolution here is
//! purely lexical; existence is only discovered by the eventual read.

use std::path::{Component, Path, PathBuf};

/// Split a `$ref` into its file part and optional in-document pointer.
pub fn split_ref(ref_str: &str) -> (&str, Option<&str>) {
    match ref_str.split_once('#') {
        Some((file, pointer)) => (file, Some(pointer)),
        None => (ref_str, None),
    }
}

/// Lexically resolve `rel` against `base_dir`, folding `.` and `..`.
///
/// A `..` that climbs past the base is dropped, which lands the path at the
/// workspace root; the subsequent read reports the file as absent, and the
/// caller treats that as "no children".
pub fn normalize(base_dir: &Path, rel: &str) -> PathBuf {
    let mut parts: Vec<std::ffi::OsString> = base_dir
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_os_string())
        .collect();
    for comp in Path::new(rel).components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop();
            }
            Component::Normal(seg) => parts.push(seg.to_os_string()),
            Component::RootDir | Component::Prefix(_) => parts.clear(),
        }
    }
    parts.iter().collect()
}

/// Derive a short display name from any ref string.
///
/// Strips a trailing `.yaml`/`.yml` extension, then takes the substring
/// after the last `/`; anchor-only refs use the pointer path instead.
pub fn short_name(ref_str: &str) -> String {
    let (file, pointer) = split_ref(ref_str);
    let tail = if file.is_empty() {
        pointer.unwrap_or("")
    } else {
        file
    };
    let tail = tail
        .strip_suffix(".yaml")
        .or_else(|| tail.strip_suffix(".yml"))
        .unwrap_or(tail);
    tail.rsplit('/').next().unwrap_or(tail).to_string()
}
