use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Represents the final configuration after merging the config file and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub config_path: PathBuf,
    pub extra_ignores: Vec<String>,
    pub files: Vec<String>,
    pub scan: bool,
    pub json: bool,
    pub by_config: bool,
}

/// A labelled path predicate usable wherever a glob pattern is.
#[derive(Clone)]
pub struct GlobPredicate {
    label: String,
    func: Arc<dyn Fn(&str) -> bool + Send + Sync>,
}

impl GlobPredicate {
    pub fn new<F>(label: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            func: Arc::new(func),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn test(&self, path: &str) -> bool {
        (self.func)(path)
    }
}

impl fmt::Debug for GlobPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GlobPredicate").field(&self.label).finish()
    }
}

// Two predicates are the same only if they share the closure.
impl PartialEq for GlobPredicate {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && Arc::ptr_eq(&self.func, &other.func)
    }
}

/// One element of a `files` or `ignores` list.
#[derive(Debug, Clone, PartialEq)]
pub enum GlobSpec {
    Pattern(String),
    Predicate(GlobPredicate),
    Group(Vec<GlobSpec>),
}

impl GlobSpec {
    pub fn pattern(pattern: impl Into<String>) -> Self {
        GlobSpec::Pattern(pattern.into())
    }

    pub fn predicate<F>(label: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        GlobSpec::Predicate(GlobPredicate::new(label, func))
    }

    pub fn group<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<GlobSpec>,
    {
        GlobSpec::Group(items.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for GlobSpec {
    fn from(pattern: &str) -> Self {
        GlobSpec::Pattern(pattern.to_string())
    }
}

impl From<String> for GlobSpec {
    fn from(pattern: String) -> Self {
        GlobSpec::Pattern(pattern)
    }
}

impl fmt::Display for GlobSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlobSpec::Pattern(p) => f.write_str(p),
            GlobSpec::Predicate(p) => write!(f, "<{}>", p.label()),
            GlobSpec::Group(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl Serialize for GlobSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GlobSpec::Pattern(p) => serializer.serialize_str(p),
            GlobSpec::Predicate(p) => serializer.serialize_str(&format!("<{}>", p.label())),
            GlobSpec::Group(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

struct GlobSpecVisitor;

impl<'de> Visitor<'de> for GlobSpecVisitor {
    type Value = GlobSpec;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a glob pattern string or an array of glob patterns")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<GlobSpec, E> {
        Ok(GlobSpec::Pattern(v.to_string()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<GlobSpec, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element::<GlobSpec>()? {
            items.push(item);
        }
        Ok(GlobSpec::Group(items))
    }
}

impl<'de> Deserialize<'de> for GlobSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(GlobSpecVisitor)
    }
}

/// One entry of an ordered flat config list.
///
/// `index` and `name` are metadata and never take part in shape classification.
/// Keys this struct does not know about land in `extra` and do.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct FlatConfigItem {
    #[serde(default)]
    pub index: usize,
    pub name: Option<String>,
    pub files: Option<Vec<GlobSpec>>,
    pub ignores: Option<Vec<GlobSpec>>,
    pub language: Option<String>,
    pub language_options: Option<toml::Table>,
    pub linter_options: Option<toml::Table>,
    pub processor: Option<String>,
    pub plugins: Option<Vec<String>>,
    pub rules: Option<toml::Table>,
    pub settings: Option<toml::Table>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

impl FlatConfigItem {
    /// Display name, falling back to the position in the list.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("#{}", self.index),
        }
    }
}

/// Which configs apply to a file and which globs decided it.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct MatchedFile {
    pub filepath: String,
    pub globs: Vec<GlobSpec>,
    pub configs: Vec<usize>,
}

impl MatchedFile {
    pub fn new(filepath: impl Into<String>) -> Self {
        Self {
            filepath: filepath.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_spec_deserializes_strings_and_nested_arrays() {
        #[derive(Deserialize)]
        struct Doc {
            files: Vec<GlobSpec>,
        }
        let doc: Doc = toml::from_str(r#"files = ["*.ts", ["src/**", "lib/**"]]"#).unwrap();
        assert_eq!(
            doc.files,
            vec![
                GlobSpec::pattern("*.ts"),
                GlobSpec::group(["src/**", "lib/**"]),
            ]
        );
    }

    #[test]
    fn glob_spec_rejects_non_string_values() {
        #[derive(Deserialize, Debug)]
        #[allow(dead_code)]
        struct Doc {
            files: Vec<GlobSpec>,
        }
        assert!(toml::from_str::<Doc>("files = [1]").is_err());
    }

    #[test]
    fn predicates_compare_by_identity() {
        let a = GlobSpec::predicate("is-md", |p| p.ends_with(".md"));
        let b = GlobSpec::predicate("is-md", |p| p.ends_with(".md"));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn glob_spec_serializes_as_plain_values() {
        let globs = vec![
            GlobSpec::pattern("*.ts"),
            GlobSpec::predicate("is-md", |p| p.ends_with(".md")),
            GlobSpec::group(["a/**"]),
        ];
        let json = serde_json::to_string(&globs).unwrap();
        assert_eq!(json, r#"["*.ts","<is-md>",["a/**"]]"#);
    }

    #[test]
    fn unknown_keys_are_kept_in_extra() {
        let item: FlatConfigItem =
            toml::from_str("ignores = [\"dist/**\"]\nbasePath = \"pkg\"").unwrap();
        assert!(item.ignores.is_some());
        assert!(item.extra.contains_key("basePath"));
    }

    #[test]
    fn display_name_falls_back_to_index() {
        let item = FlatConfigItem {
            index: 3,
            ..FlatConfigItem::default()
        };
        assert_eq!(item.display_name(), "#3");
    }
}
