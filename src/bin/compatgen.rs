// src/bin/compatgen.rs
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use compatgen_core::cli::Cli;
use compatgen_core::config::Config;
use compatgen_core::{reporting, stats};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e:#}", "error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(&cli.root);
    config.verbose = cli.verbose;
    if let Some(output) = cli.output {
        config.output = output;
    }

    println!("Generating API statistics...");
    let report = stats::generate(&config).context("aggregation failed")?;

    let out_path = config.resolved_output();
    stats::write_stats(&report, &out_path)
        .with_context(|| format!("failed to write {}", out_path.display()))?;

    reporting::print_summary(&report, &config.platforms);
    println!();
    println!("Stats written to {}", out_path.display());
    Ok(())
}
