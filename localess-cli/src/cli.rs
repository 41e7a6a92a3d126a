//! CLI definition for the `localess` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Localess - headless CMS for translations and content
#[derive(Parser, Debug)]
#[command(name = "localess")]
#[command(version)]
#[command(about = "Localess - serve, publish and inspect spaces")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration file (defaults to localess.{toml,yaml,yml,json} in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the public read API
    Serve,
    /// Publish translations and pages of a space
    Publish {
        space_id: String,
        /// Note recorded in the translation history
        #[arg(long)]
        description: Option<String>,
    },
    /// Inspect schemas
    Schema {
        #[command(subcommand)]
        command: SchemaCommands,
    },
    /// Inspect contents
    Content {
        #[command(subcommand)]
        command: ContentCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum SchemaCommands {
    /// List the schemas of a space
    List { space_id: String },
    /// Print a schema as YAML
    Show { space_id: String, schema_id: String },
    /// Validate a schema; exits with 1 when issues are found
    Check { space_id: String, schema_id: String },
}

#[derive(Subcommand, Debug)]
pub enum ContentCommands {
    /// Validate a page's data against its schema; exits with 1 when issues are found
    Check { space_id: String, content_id: String },
}
