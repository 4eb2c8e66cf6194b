// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! flowtextctl - IPFIX element definitions and JSON record rendering
//!
//! # Usage
//!
//! ```bash
//! # List the built-in IANA elements
//! flowtextctl elements
//!
//! # List elements from /etc/flowtext/ipfix.elements
//! flowtextctl elements --elements /etc/flowtext
//!
//! # Show one element
//! flowtextctl elements --elements /etc/flowtext --lookup 9999_1
//!
//! # Render every data set of a YAML-described message
//! flowtextctl render --message record.yaml --all
//! ```

mod fixture;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flowtext::{FieldIdentity, InformationModel, JsonEncoder, Message};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::fixture::MessageFixture;

/// IPFIX element definitions and JSON record rendering
#[derive(Parser, Debug)]
#[command(name = "flowtextctl")]
#[command(version)]
#[command(about = "Inspect IPFIX element definitions and render flow records as JSON")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List information elements
    Elements {
        /// Directory holding ipfix.elements (built-in elements if omitted)
        #[arg(short, long)]
        elements: Option<PathBuf>,

        /// Show a single element by key (e.g. 0_8, 9999_1)
        #[arg(long)]
        lookup: Option<String>,
    },

    /// Render data sets of a YAML-described message as JSON
    Render {
        /// Message fixture (YAML)
        #[arg(short, long)]
        message: PathBuf,

        /// Directory holding ipfix.elements (built-in elements if omitted)
        #[arg(short, long)]
        elements: Option<PathBuf>,

        /// Data set to render
        #[arg(short, long, default_value = "0", conflicts_with = "all")]
        index: usize,

        /// Render every data set, one line each
        #[arg(long)]
        all: bool,

        /// Pretty-print (keys sorted)
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Elements { elements, lookup } => cmd_elements(elements.as_deref(), lookup),
        Commands::Render {
            message,
            elements,
            index,
            all,
            pretty,
        } => cmd_render(&message, elements.as_deref(), index, all, pretty),
    }
}

fn load_model(dir: Option<&Path>) -> Result<InformationModel> {
    match dir {
        Some(dir) => InformationModel::load_extensions(dir)
            .with_context(|| format!("failed to load elements from {}", dir.display())),
        None => Ok(InformationModel::builtin()),
    }
}

fn cmd_elements(dir: Option<&Path>, lookup: Option<String>) -> Result<()> {
    let model = load_model(dir)?;

    if let Some(key) = lookup {
        let id: FieldIdentity = key.parse()?;
        match model.lookup(&id.primary()) {
            Some(entry) => println!("{} {} {}", id, entry.name, entry.field_type),
            None => anyhow::bail!("element {} is not defined", id),
        }
        return Ok(());
    }

    for (id, entry) in model.iter() {
        println!("{:<12} {:<36} {}", id.to_string(), entry.name, entry.field_type);
    }
    tracing::info!(count = model.len(), "elements listed");
    Ok(())
}

fn cmd_render(
    path: &Path,
    dir: Option<&Path>,
    index: usize,
    all: bool,
    pretty: bool,
) -> Result<()> {
    let model = load_model(dir)?;
    let mut message = MessageFixture::from_file(path)?.build(&model)?;

    let index = if all { None } else { Some(index) };
    for record in render_records(&mut message, index, pretty)? {
        println!("{}", record);
    }
    Ok(())
}

/// Encode one data set, or every data set when `index` is `None`.
fn render_records(
    message: &mut Message,
    index: Option<usize>,
    pretty: bool,
) -> Result<Vec<String>> {
    let indices: Vec<usize> = match index {
        Some(i) => vec![i],
        None => (0..message.data_sets.len()).collect(),
    };

    let mut encoder = JsonEncoder::with_capacity(4096);
    let mut records = Vec::with_capacity(indices.len());
    for i in indices {
        let line = encoder
            .encode(message, i)
            .with_context(|| format!("failed to encode data set {}", i))?;
        if pretty {
            let value: serde_json::Value = serde_json::from_str(line)?;
            records.push(serde_json::to_string_pretty(&value)?);
        } else {
            records.push(line.to_string());
        }
    }
    tracing::debug!(count = records.len(), "records rendered");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGE: &str = r#"
agent_id: 192.0.2.10
header: {length: 96, export_time: 1700000000, sequence_no: 7}
data_sets:
  - - {field: "0_4", values: [6]}
    - {field: "0_176", values: [8]}
    - {field: "0_177", values: [0]}
    - {field: "0_8", values: ["10.0.0.1"]}
  - - {field: "0_4", values: [1]}
    - {field: "0_176", values: [8]}
"#;

    fn message() -> Message {
        MessageFixture::from_yaml(MESSAGE)
            .expect("parse")
            .build(&InformationModel::builtin())
            .expect("build")
    }

    #[test]
    fn test_render_all_data_sets() {
        let mut message = message();
        let records = render_records(&mut message, None, false).expect("render");
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| !r.contains('\n')));

        let first: serde_json::Value = serde_json::from_str(&records[0]).expect("json");
        assert_eq!(first["AgentID"], "192.0.2.10");
        assert_eq!(first["Data"]["0_4"], 6);
        assert_eq!(first["Data"]["0_8"], "10.0.0.1");
        assert!(first["Data"].get("0_176").is_none());
        assert!(first["Data"].get("0_177").is_none());

        let second: serde_json::Value = serde_json::from_str(&records[1]).expect("json");
        assert_eq!(second["Data"]["0_176"], 8);
    }

    #[test]
    fn test_render_single_index() {
        let mut message = message();
        let records = render_records(&mut message, Some(1), false).expect("render");
        assert_eq!(records.len(), 1);
        assert!(records[0].contains("\"0_176\""));

        let err = render_records(&mut message, Some(5), false).unwrap_err();
        assert!(err.to_string().contains("data set 5"));
    }

    #[test]
    fn test_render_pretty_matches_compact() {
        let mut compact = message();
        let mut pretty = message();
        let lines = render_records(&mut compact, None, false).expect("compact");
        let blocks = render_records(&mut pretty, None, true).expect("pretty");

        assert_eq!(blocks.len(), lines.len());
        for (line, block) in lines.iter().zip(&blocks) {
            assert!(block.contains('\n'));
            let a: serde_json::Value = serde_json::from_str(line).expect("compact json");
            let b: serde_json::Value = serde_json::from_str(block).expect("pretty json");
            assert_eq!(a, b);
        }
    }
}
