//! splitspec CLI entrypoint
//! Parses command-line arguments and dispatches to the core library.

// Internal imports (std, crate)
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use splitspec_core::{
    discover_endpoint_index, discover_projects, index_endpoints, ApiProject, EndpointParser,
    TreeLimits, Workspace,
};

#[derive(Parser)]
#[command(name = "splitspec")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Workspace root containing the split spec(s)
    #[arg(long, default_value = ".")]
    workspace: PathBuf,

    /// Maximum `$ref` nesting depth when expanding schemas
    #[arg(long)]
    max_depth: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Discover API projects declared by redocly.yaml files
    Projects,
    /// List endpoints without resolving schemas
    Index {
        /// Project name, for log output
        #[arg(long, default_value = "api")]
        project: String,
        /// Workspace-relative path to the project's openapi.yaml;
        /// omit to index every discovered project
        #[arg(long)]
        root: Option<String>,
    },
    /// Fully parse one endpoint file for one HTTP method
    Parse {
        /// Workspace-relative path to the project's openapi.yaml
        #[arg(long)]
        root: String,
        /// Endpoint file path as written in the root spec's $ref
        #[arg(long)]
        endpoint: String,
        /// HTTP method to parse
        #[arg(long)]
        method: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let workspace = Workspace::new(&cli.workspace)
        .with_context(|| format!("failed to open workspace {}", cli.workspace.display()))?;
    tracing::debug!(workspace = %cli.workspace.display(), "workspace opened");

    match &cli.command {
        Commands::Projects => {
            let projects = discover_projects(&workspace).await;
            println!("{}", serde_json::to_string_pretty(&projects)?);
        }
        Commands::Index { project, root } => {
            let endpoints = match root {
                Some(root) => {
                    let project = ApiProject::new(project.clone(), root.clone());
                    index_endpoints(&workspace, &project).await
                }
                None => discover_endpoint_index(&workspace).await,
            };
            println!("{}", serde_json::to_string_pretty(&endpoints)?);
        }
        Commands::Parse {
            root,
            endpoint,
            method,
        } => {
            let parser = match cli.max_depth {
                Some(max_depth) => {
                    EndpointParser::with_limits(&workspace, TreeLimits { max_depth })
                }
                None => EndpointParser::new(&workspace),
            };
            let parsed = parser
                .parse(root, endpoint, method)
                .await
                .with_context(|| format!("failed to parse {method} {endpoint}"))?;
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
    }
    Ok(())
}
