use crate::app::cli::Cli;
use crate::app::models::{FlatConfigItem, GlobSpec, RuntimeConfig};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "flatmatch.toml";
pub const CLI_IGNORES_NAME: &str = "flatmatch/cli-ignores";

#[derive(Deserialize, Debug)]
struct ConfigListFile {
    #[serde(default)]
    configs: Vec<FlatConfigItem>,
}

/// Config path resolution: CLI flag > project file > user file.
fn locate_config_file(cli_path: Option<PathBuf>, project_root: &Path) -> Result<PathBuf> {
    if let Some(path) = cli_path {
        return Ok(path);
    }

    let project_file = project_root.join(CONFIG_FILE_NAME);
    if project_file.exists() {
        return Ok(project_file);
    }

    if let Some(home) = dirs::home_dir() {
        let user_file = home.join(".config").join("flatmatch").join(CONFIG_FILE_NAME);
        if user_file.exists() {
            return Ok(user_file);
        }
    }

    bail!(
        "No config list found: pass --config or create {} in {:?}",
        CONFIG_FILE_NAME,
        project_root
    )
}

/// Deduplicates while keeping first-seen order.
fn dedup_patterns(patterns: Option<Vec<String>>) -> Vec<String> {
    let mut combined = patterns.unwrap_or_default();
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

pub fn resolve_config(cli: Cli, project_root: &Path) -> Result<RuntimeConfig> {
    let config_path = locate_config_file(cli.config, project_root)?;
    log::debug!("Using config list at {:?}", config_path);

    Ok(RuntimeConfig {
        config_path,
        extra_ignores: dedup_patterns(cli.ignore),
        files: cli.files,
        scan: cli.scan,
        json: cli.json,
        by_config: cli.by_config,
    })
}

/// Parses an ordered config list and stamps each entry with its position.
pub fn parse_config_list(content: &str) -> Result<Vec<FlatConfigItem>> {
    let parsed: ConfigListFile = toml::from_str(content).context("Failed to parse config list")?;
    let mut configs = parsed.configs;
    for (index, config) in configs.iter_mut().enumerate() {
        config.index = index;
    }
    Ok(configs)
}

/// Loads the config list from disk and appends the CLI ignores, if any,
/// as a trailing ignore-only entry.
pub fn load_config_list(config: &RuntimeConfig) -> Result<Vec<FlatConfigItem>> {
    let content = fs::read_to_string(&config.config_path)
        .context(format!("Failed to read config list at {:?}", config.config_path))?;
    let mut configs = parse_config_list(&content)
        .context(format!("Invalid config list at {:?}", config.config_path))?;

    if !config.extra_ignores.is_empty() {
        configs.push(FlatConfigItem {
            index: configs.len(),
            name: Some(CLI_IGNORES_NAME.to_string()),
            ignores: Some(
                config
                    .extra_ignores
                    .iter()
                    .map(|p| GlobSpec::pattern(p.as_str()))
                    .collect(),
            ),
            ..FlatConfigItem::default()
        });
    }

    log::debug!("Loaded {} config entries", configs.len());
    Ok(configs)
}
