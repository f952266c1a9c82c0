use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Show which flat config entries apply to which files"
)]
pub struct Cli {
    /// Files to match, relative to the project root (e.g., 'src/index.ts')
    pub files: Vec<String>,

    /// Path to the config list (defaults to ./flatmatch.toml, then ~/.config/flatmatch/flatmatch.toml)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Extra global ignore patterns, appended as an ignore-only entry
    #[arg(long, num_args = 1..)]
    pub ignore: Option<Vec<String>>,

    /// Walk the current directory and match every file found
    #[arg(long)]
    pub scan: bool,

    /// Print reports as JSON
    #[arg(long)]
    pub json: bool,

    /// Group results per config entry instead of per file
    #[arg(long)]
    pub by_config: bool,
}
