use crate::app::matcher::classify;
use crate::app::models::{FlatConfigItem, MatchedFile};
use anyhow::Result;
use serde::Serialize;

/// Files matched by one config entry.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ConfigMatches {
    pub index: usize,
    pub name: String,
    pub files: Vec<String>,
}

pub struct OutputGenerator;

impl OutputGenerator {
    /// One line per config: index, kind and name.
    pub fn generate_listing(configs: &[FlatConfigItem]) -> String {
        let mut output = String::new();

        for config in configs {
            output.push_str(&format!(
                "[{}] {:<11} {}\n",
                config.index,
                classify(config).as_str(),
                config.display_name()
            ));
        }

        output.trim_end().to_string()
    }

    pub fn generate_reports(reports: &[MatchedFile], configs: &[FlatConfigItem]) -> String {
        let blocks: Vec<String> = reports
            .iter()
            .map(|report| Self::format_report(report, configs))
            .collect();
        blocks.join("\n\n")
    }

    fn format_report(report: &MatchedFile, configs: &[FlatConfigItem]) -> String {
        let mut out = format!("{}\n", report.filepath);
        let globs: Vec<String> = report.globs.iter().map(|g| g.to_string()).collect();

        if report.configs.is_empty() {
            if globs.is_empty() {
                out.push_str("  no matching configs");
            } else {
                out.push_str(&format!("  not matched, globs: {}", globs.join(", ")));
            }
            return out;
        }

        for index in &report.configs {
            let name = configs
                .get(*index)
                .map(FlatConfigItem::display_name)
                .unwrap_or_else(|| format!("#{}", index));
            out.push_str(&format!("  [{}] {}\n", index, name));
        }
        out.push_str(&format!("  globs: {}", globs.join(", ")));
        out
    }

    /// Inverts per-file reports into per-config file lists.
    pub fn group_by_config(reports: &[MatchedFile], configs: &[FlatConfigItem]) -> Vec<ConfigMatches> {
        configs
            .iter()
            .enumerate()
            .map(|(index, config)| ConfigMatches {
                index,
                name: config.display_name(),
                files: reports
                    .iter()
                    .filter(|r| r.configs.contains(&index))
                    .map(|r| r.filepath.clone())
                    .collect(),
            })
            .collect()
    }

    pub fn generate_by_config(groups: &[ConfigMatches]) -> String {
        let mut output = String::new();

        for group in groups {
            output.push_str(&format!(
                "[{}] {} ({} files)\n",
                group.index,
                group.name,
                group.files.len()
            ));
            for file in &group.files {
                output.push_str(&format!("    {}\n", file));
            }
        }

        output.trim_end().to_string()
    }

    pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::GlobSpec;

    fn configs() -> Vec<FlatConfigItem> {
        vec![
            FlatConfigItem {
                index: 0,
                name: Some("base".into()),
                ..FlatConfigItem::default()
            },
            FlatConfigItem {
                index: 1,
                name: Some("typescript".into()),
                files: Some(vec![GlobSpec::pattern("**/*.ts")]),
                ..FlatConfigItem::default()
            },
            FlatConfigItem {
                index: 2,
                ignores: Some(vec![GlobSpec::pattern("dist/**")]),
                ..FlatConfigItem::default()
            },
        ]
    }

    fn reports() -> Vec<MatchedFile> {
        vec![
            MatchedFile {
                filepath: "src/a.ts".into(),
                globs: vec![GlobSpec::pattern("**/*.ts")],
                configs: vec![1],
            },
            MatchedFile {
                filepath: "dist/a.ts".into(),
                globs: vec![GlobSpec::pattern("dist/**")],
                configs: vec![],
            },
            MatchedFile::new("README.md"),
        ]
    }

    #[test]
    fn listing_shows_kind_and_name() {
        let listing = OutputGenerator::generate_listing(&configs());
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("[0] general"));
        assert!(lines[0].ends_with("base"));
        assert!(lines[1].contains("scoped"));
        assert!(lines[2].contains("ignore-only"));
        assert!(lines[2].ends_with("#2"));
    }

    #[test]
    fn report_text_covers_matched_vetoed_and_unmatched() {
        let text = OutputGenerator::generate_reports(&reports(), &configs());
        assert!(text.contains("src/a.ts\n  [1] typescript\n  globs: **/*.ts"));
        assert!(text.contains("dist/a.ts\n  not matched, globs: dist/**"));
        assert!(text.ends_with("README.md\n  no matching configs"));
    }

    #[test]
    fn groups_files_per_config() {
        let groups = OutputGenerator::group_by_config(&reports(), &configs());
        assert_eq!(groups.len(), 3);
        assert!(groups[0].files.is_empty());
        assert_eq!(groups[1].files, vec!["src/a.ts"]);
        let text = OutputGenerator::generate_by_config(&groups);
        assert!(text.contains("[1] typescript (1 files)\n    src/a.ts"));
    }

    #[test]
    fn json_uses_report_field_names() {
        let json = OutputGenerator::to_json(&reports()[..1]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["filepath"], "src/a.ts");
        assert_eq!(value[0]["globs"][0], "**/*.ts");
        assert_eq!(value[0]["configs"][0], 1);
    }
}
