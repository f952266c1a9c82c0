// Declare modules
pub mod cli;
pub mod config;
pub mod formatter;
pub mod glob;
pub mod matcher;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;

use self::cli::Cli;
use self::config::{load_config_list, resolve_config};
use self::formatter::OutputGenerator;
use self::matcher::match_files;
use self::scanner::Scanner;

/// Loads the config list, matches the requested files and prints the result.
pub fn run() -> Result<()> {
    let args = Cli::parse();

    let current_dir = env::current_dir().context("Failed to get current directory")?;

    let config = resolve_config(args, &current_dir)?;
    let configs = load_config_list(&config)?;

    if configs.is_empty() {
        log::warn!("Config list at {:?} has no entries.", config.config_path);
    }

    let mut files = config.files.clone();
    if config.scan {
        files.extend(Scanner::new(current_dir).scan());
    }

    // Nothing to match: describe the config list instead.
    if files.is_empty() {
        let output = if config.json {
            let kinds: Vec<_> = configs
                .iter()
                .map(|c| {
                    serde_json::json!({
                        "index": c.index,
                        "name": c.name,
                        "kind": matcher::classify(c).as_str(),
                    })
                })
                .collect();
            OutputGenerator::to_json(&kinds)?
        } else {
            OutputGenerator::generate_listing(&configs)
        };
        println!("{}", output);
        return Ok(());
    }

    let reports = match_files(&files, &configs)?;

    if reports.iter().all(|r| r.configs.is_empty()) {
        log::warn!("No config entry matched any of the {} file(s).", reports.len());
    }

    let output = if config.by_config {
        let groups = OutputGenerator::group_by_config(&reports, &configs);
        if config.json {
            OutputGenerator::to_json(&groups)?
        } else {
            OutputGenerator::generate_by_config(&groups)
        }
    } else if config.json {
        OutputGenerator::to_json(&reports)?
    } else {
        OutputGenerator::generate_reports(&reports, &configs)
    };

    println!("{}", output);

    Ok(())
}
