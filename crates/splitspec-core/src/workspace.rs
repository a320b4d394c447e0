//! Workspace file access.
//!
//! The `Workspace` is the single seam through which the core reads spec
//! documents: rooted relative reads, lexical path helpers, and the
//! structural-mapping parse used wherever a document must be a YAML mapping.
//! The core never writes through it.
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//! use splitspec_core::workspace::Workspace;
//! use splitspec_core::error::Result;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let workspace = Workspace::new(".")?;
//! let text = workspace.read_to_string(Path::new("openapi.yaml")).await?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::resolve;

// External imports (alphabetized)
use serde_yaml::{Mapping, Value as YamlValue};
use tokio::fs;

/// Read access to a workspace directory holding one or more split specs
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Open a workspace rooted at `root`.
    ///
    /// Fails with [`Error::StorageUnavailable`] when the root is not an
    /// existing directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::storage(format!(
                "workspace root is not a directory: {}",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read a workspace-relative document as UTF-8 text.
    ///
    /// A missing file maps to [`Error::DocumentNotFound`]; the caller decides
    /// whether that is fatal.
    pub async fn read_to_string(&self, rel: &Path) -> Result<String> {
        let full = self.root.join(rel);
        fs::read_to_string(&full).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::document_not_found(rel.display().to_string())
            } else {
                Error::Io(e)
            }
        })
    }

    /// Whether a workspace-relative path exists on disk.
    pub async fn contains(&self, rel: &Path) -> bool {
        fs::try_exists(self.root.join(rel)).await.unwrap_or(false)
    }

    /// Lexically resolve `rel` against a workspace-relative base directory.
    pub fn resolve_relative(&self, base_dir: &Path, rel: &str) -> PathBuf {
        resolve::normalize(base_dir, rel)
    }

    /// Parent directory of a workspace-relative path ("" at the top level).
    pub fn parent_of(path: &Path) -> PathBuf {
        path.parent().map(Path::to_path_buf).unwrap_or_default()
    }

    /// Parse document content as a structured YAML mapping.
    ///
    /// Anything that is not a mapping at the top level (including content
    /// that does not parse at all) is [`Error::MalformedDocument`].
    pub fn parse_mapping(content: &str) -> Result<Mapping> {
        let value: YamlValue =
            serde_yaml::from_str(content).map_err(|e| Error::malformed(e.to_string()))?;
        value
            .as_mapping()
            .cloned()
            .ok_or_else(|| Error::malformed("document is not a mapping"))
    }
}
