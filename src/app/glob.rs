use crate::app::models::GlobSpec;
use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobMatcher};

/// Compiles a single pattern with minimatch-like separator handling:
/// `*` and `?` stop at `/`, `**` crosses directories.
pub fn compile_glob(pattern: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .context(format!("Invalid glob pattern: {}", pattern))?;
    Ok(glob.compile_matcher())
}

/// Flattens nested groups into a single level, keeping encounter order.
pub fn flatten_specs(specs: &[GlobSpec]) -> Vec<&GlobSpec> {
    let mut flat = Vec::with_capacity(specs.len());
    for spec in specs {
        match spec {
            GlobSpec::Group(items) => flat.extend(flatten_specs(items)),
            other => flat.push(other),
        }
    }
    flat
}

/// Returns the entries of `specs` that match `path`, in their original order.
pub fn get_matched_globs(path: &str, specs: &[GlobSpec]) -> Result<Vec<GlobSpec>> {
    let mut matched = Vec::new();
    for spec in flatten_specs(specs) {
        let hit = match spec {
            GlobSpec::Pattern(pattern) => compile_glob(pattern)?.is_match(path),
            GlobSpec::Predicate(predicate) => predicate.test(path),
            GlobSpec::Group(_) => false, // flatten_specs never yields groups
        };
        if hit {
            matched.push(spec.clone());
        }
    }
    Ok(matched)
}
