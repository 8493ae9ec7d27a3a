// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! proxygen-gen CLI
//!
//! # Usage
//!
//! ```bash
//! # Generate proxies for a crate
//! proxygen-gen generate --src my-crate/src --out-dir target/proxies
//!
//! # Print the extracted descriptors
//! proxygen-gen inspect --src my-crate/src
//!
//! # Write the default configuration
//! proxygen-gen gen-config --output proxygen.toml
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use proxygen_gen::builder::write_sources;
use proxygen_gen::{collect_sources, GeneratorConfig, Pipeline};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Generate forwarding activity proxies from annotated traits
#[derive(Parser, Debug)]
#[command(name = "proxygen-gen")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate proxy units into a directory
    Generate {
        /// Source root of the crate (usually its `src` directory)
        #[arg(short, long)]
        src: PathBuf,

        /// Output directory
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print extracted descriptors as JSON
    Inspect {
        /// Source root of the crate
        #[arg(short, long)]
        src: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate the default configuration file
    GenConfig {
        /// Output file path
        #[arg(short, long, default_value = "proxygen.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match args.command {
        Commands::Generate {
            src,
            out_dir,
            config,
        } => cmd_generate(&src, &out_dir, config.as_deref()),
        Commands::Inspect { src, config } => cmd_inspect(&src, config.as_deref()),
        Commands::GenConfig { output } => cmd_gen_config(&output),
    }
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display())),
        None => Ok(GeneratorConfig::default()),
    }
}

fn cmd_generate(src: &Path, out_dir: &Path, config: Option<&Path>) -> Result<()> {
    let pipeline = Pipeline::new(load_config(config)?)?;
    let files = collect_sources(src)?;
    let output = pipeline.run(&files)?;

    for unparsed in &output.extraction.unparsed {
        tracing::warn!("skipped {}: {}", unparsed.path.display(), unparsed.message);
    }

    let (written, unchanged) = write_sources(out_dir, &output.sources)?;
    for descriptor in &output.extraction.descriptors {
        println!("{} -> {}", descriptor.name, descriptor.hint_name());
    }
    println!(
        "{} unit(s) written, {} unchanged, {} candidate(s) skipped",
        written.len(),
        unchanged.len(),
        output.extraction.skipped
    );
    Ok(())
}

fn cmd_inspect(src: &Path, config: Option<&Path>) -> Result<()> {
    let pipeline = Pipeline::new(load_config(config)?)?;
    let files = collect_sources(src)?;
    let extraction = pipeline.extract(&files);

    for unparsed in &extraction.unparsed {
        tracing::warn!("skipped {}: {}", unparsed.path.display(), unparsed.message);
    }
    println!("{}", serde_json::to_string_pretty(&extraction.descriptors)?);
    Ok(())
}

fn cmd_gen_config(output: &Path) -> Result<()> {
    let text = GeneratorConfig::default().to_toml_string()?;
    std::fs::write(output, text).with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Configuration written to {}", output.display());
    Ok(())
}
