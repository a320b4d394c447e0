//! Splitspec Core Library
//!
//! This library extracts machine-usable structure from Redocly-style split
//! OpenAPI specifications: a `redocly.yaml` naming API projects, each rooted
//! at an `openapi.yaml` whose `paths` entries `$ref` external path-item
//! files, which in turn reference external schema files.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod index;
pub mod operation;
pub mod parameter;
pub mod project;
pub mod resolve;
pub mod tree;
pub mod types;
pub mod workspace;

pub use crate::{
    config::Config,
    endpoint::EndpointParser,
    error::{Error, Result},
    index::{discover_endpoint_index, index_endpoints},
    project::discover_projects,
    tree::{SchemaTreeBuilder, TreeLimits, DEFAULT_MAX_DEPTH},
    types::{ApiProject, EndpointInfo, Field, ParsedEndpoint},
    workspace::Workspace,
};
