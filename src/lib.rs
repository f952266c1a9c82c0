pub mod app;

pub use app::glob::get_matched_globs;
pub use app::matcher::{
    classify, is_general_config, is_ignore_only_config, match_file, match_files, ConfigKind,
};
pub use app::models::{FlatConfigItem, GlobPredicate, GlobSpec, MatchedFile};
