use crate::app::glob::get_matched_globs;
use crate::app::models::{FlatConfigItem, MatchedFile};
use anyhow::Result;

/// Shape of a config entry as seen by the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKind {
    /// Only `ignores` is set: a global ignore.
    IgnoreOnly,
    /// Neither `files` nor `ignores`: applies everywhere.
    General,
    /// Restricted by `files` and/or `ignores`.
    Scoped,
}

impl ConfigKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKind::IgnoreOnly => "ignore-only",
            ConfigKind::General => "general",
            ConfigKind::Scoped => "scoped",
        }
    }
}

/// Config with only the `ignores` property, `name` and `index` aside.
pub fn is_ignore_only_config(config: &FlatConfigItem) -> bool {
    let FlatConfigItem {
        index: _,
        name: _,
        files,
        ignores,
        language,
        language_options,
        linter_options,
        processor,
        plugins,
        rules,
        settings,
        extra,
    } = config;

    ignores.is_some()
        && files.is_none()
        && language.is_none()
        && language_options.is_none()
        && linter_options.is_none()
        && processor.is_none()
        && plugins.is_none()
        && rules.is_none()
        && settings.is_none()
        && extra.is_empty()
}

/// Config without `files` and `ignores`, or with only `ignores`.
pub fn is_general_config(config: &FlatConfigItem) -> bool {
    (config.files.is_none() && config.ignores.is_none()) || is_ignore_only_config(config)
}

pub fn classify(config: &FlatConfigItem) -> ConfigKind {
    if is_ignore_only_config(config) {
        ConfigKind::IgnoreOnly
    } else if is_general_config(config) {
        ConfigKind::General
    } else {
        ConfigKind::Scoped
    }
}

/// Works out which entries of `configs` apply to `filepath`.
///
/// Any hit in `ignore_only_configs` vetoes the file outright. Otherwise an entry
/// matches when at least one of its `files` globs hits and none of its `ignores`
/// do. Entries without `files` never match here, general or not.
pub fn match_file(
    filepath: &str,
    configs: &[FlatConfigItem],
    ignore_only_configs: &[&FlatConfigItem],
) -> Result<MatchedFile> {
    let mut global_ignored = Vec::new();
    for config in ignore_only_configs {
        let ignores = config.ignores.as_deref().unwrap_or_default();
        global_ignored.extend(get_matched_globs(filepath, ignores)?);
    }
    if !global_ignored.is_empty() {
        log::debug!(
            "{} vetoed by {} global ignore glob(s)",
            filepath,
            global_ignored.len()
        );
        return Ok(MatchedFile {
            filepath: filepath.to_string(),
            globs: global_ignored,
            configs: Vec::new(),
        });
    }

    let mut result = MatchedFile::new(filepath);
    for (index, config) in configs.iter().enumerate() {
        let positive = get_matched_globs(filepath, config.files.as_deref().unwrap_or_default())?;
        let negative = get_matched_globs(filepath, config.ignores.as_deref().unwrap_or_default())?;
        if negative.is_empty() && !positive.is_empty() {
            result.configs.push(index);
        }
        result.globs.extend(positive);
        result.globs.extend(negative);
    }
    Ok(result)
}

/// Matches every path against `configs`, deriving the global ignores first.
pub fn match_files<S: AsRef<str>>(
    paths: &[S],
    configs: &[FlatConfigItem],
) -> Result<Vec<MatchedFile>> {
    let ignore_only: Vec<&FlatConfigItem> =
        configs.iter().filter(|c| is_ignore_only_config(c)).collect();
    paths
        .iter()
        .map(|path| match_file(path.as_ref(), configs, &ignore_only))
        .collect()
}
