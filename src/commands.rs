//! Command implementations for the promptml CLI.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Handlers return `anyhow::Result`; library failures pass
//! through as [`crate::error::PromptError`] so `main` can map them to exit
//! codes, while I/O and flag mistakes surface as plain user errors.

use crate::cli::{Command, ConvertArgs, RenderArgs, ShowArgs, ValidateArgs};
use crate::document::Document;
use crate::render::render_document;
use crate::template::extract_variables;
use crate::validate::validate_document;
use crate::xml::{document_to_xml, parse_document};
use anyhow::{Context, Result, anyhow};
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Validate(args) => cmd_validate(args),
        Command::Render(args) => cmd_render(args),
        Command::Convert(args) => cmd_convert(args),
        Command::Show(args) => cmd_show(args),
    }
}

fn load_document(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let doc = parse_document(&text)?;
    debug!(
        "parsed {}: {} metadata entries, {} variables, {} parts",
        path.display(),
        doc.metadata.len(),
        doc.variables.len(),
        doc.parts.len()
    );
    Ok(doc)
}

fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

fn cmd_validate(args: ValidateArgs) -> Result<()> {
    let doc = load_document(&args.file)?;
    validate_document(&doc)?;
    println!("OK: {} is valid", args.file.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let doc = load_document(&args.file)?;
    let input = collect_input(&args.vars, args.values.as_deref())?;
    debug!("rendering with {} supplied values", input.len());
    let output = render_document(&doc, &input)?;
    write_output(args.output.as_deref(), &output)
}

fn cmd_convert(args: ConvertArgs) -> Result<()> {
    let doc = load_document(&args.file)?;
    let xml = document_to_xml(&doc)?;
    write_output(args.output.as_deref(), &xml)
}

fn cmd_show(args: ShowArgs) -> Result<()> {
    let doc = load_document(&args.file)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("Title:      {}", doc.metadata.title().unwrap_or("(none)"));
    for (key, value) in doc.metadata.iter().filter(|(k, _)| *k != "title") {
        println!("{:<11} {}", format!("{key}:"), value);
    }

    println!();
    println!("Variables ({}):", doc.variables.len());
    for variable in &doc.variables {
        match (&variable.required, &variable.default) {
            (true, _) => println!("  {} (required)", variable.name),
            (false, Some(default)) => println!("  {} (default: {:?})", variable.name, default),
            (false, None) => println!("  {} (optional, no default!)", variable.name),
        }
    }

    println!();
    println!("Parts ({}):", doc.parts.len());
    for part in &doc.parts {
        println!("  {} ({} chars)", part.name, part.content.len());
    }

    let mut referenced = extract_variables(&doc.template);
    let mut seen = std::collections::HashSet::new();
    referenced.retain(|name| seen.insert(name.clone()));
    println!();
    if referenced.is_empty() {
        println!("Template references: (none)");
    } else {
        println!("Template references: {}", referenced.join(", "));
    }

    Ok(())
}

/// Merge variable values from an optional JSON/YAML file and repeated
/// `--var NAME=VALUE` flags; flags win on key collisions.
fn collect_input(vars: &[String], values_file: Option<&Path>) -> Result<HashMap<String, String>> {
    let mut input = HashMap::new();

    if let Some(path) = values_file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let parsed: HashMap<String, String> = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&text)
                .with_context(|| format!("invalid YAML values in {}", path.display()))?,
            _ => serde_json::from_str(&text)
                .with_context(|| format!("invalid JSON values in {}", path.display()))?,
        };
        input.extend(parsed);
    }

    for pair in vars {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("invalid --var '{pair}': expected NAME=VALUE"))?;
        input.insert(name.to_string(), value.to_string());
    }

    Ok(input)
}
