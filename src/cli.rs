//! CLI argument parsing for promptml.
//!
//! Uses clap derive macros for declarative argument definitions. This module
//! defines the command structure; actual implementations are in the
//! `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Promptml: structured prompt templates with typed variables, reusable
/// parts, and conditional rendering.
///
/// Prompt documents are XML files carrying metadata, declared variables,
/// named content parts, and a template body with `{{variable}}` tokens and
/// `<if .../>` conditional directives.
#[derive(Parser, Debug)]
#[command(name = "promptml")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for promptml.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a prompt document.
    ///
    /// Parses the file and checks its internal consistency: title present,
    /// referenced variables declared, optional variables defaulted, and
    /// conditional directives pointing at real variables and parts.
    Validate(ValidateArgs),

    /// Render a prompt document to final text.
    ///
    /// Validates first, then resolves variable values (supplied values over
    /// declared defaults), applies conditional part selection, and
    /// substitutes `{{variable}}` tokens.
    Render(RenderArgs),

    /// Re-serialize a prompt document as canonical XML.
    ///
    /// Parses and validates the file, then emits the document with the
    /// standard prolog and normalized element layout.
    Convert(ConvertArgs),

    /// Show document structure without validating.
    ///
    /// Prints metadata, declared variables, parts, and the variables the
    /// template references.
    Show(ShowArgs),
}

/// Arguments for the `validate` command.
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the prompt XML file.
    pub file: PathBuf,
}

/// Arguments for the `render` command.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Path to the prompt XML file.
    pub file: PathBuf,

    /// Variable value as NAME=VALUE (repeatable, overrides --values).
    #[arg(long = "var", value_name = "NAME=VALUE")]
    pub vars: Vec<String>,

    /// JSON or YAML file mapping variable names to values.
    #[arg(long, value_name = "FILE")]
    pub values: Option<PathBuf>,

    /// Write output to a file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `convert` command.
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Path to the prompt XML file.
    pub file: PathBuf,

    /// Write output to a file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Path to the prompt XML file.
    pub file: PathBuf,

    /// Emit the document as JSON instead of a human summary.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
