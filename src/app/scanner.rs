use ignore::WalkBuilder;
use pathdiff::diff_paths;
use std::path::{Path, PathBuf};

/// Lists candidate files under a project root, honouring `.gitignore`.
pub struct Scanner {
    root: PathBuf,
}

impl Scanner {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Relative, `/`-separated paths of every file under the root, sorted.
    pub fn scan(&self) -> Vec<String> {
        let mut files = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .hidden(false) // dotfiles such as .eslintrc.js are lint targets too
            .git_ignore(true)
            .require_git(false)
            .build();

        for result in walker {
            match result {
                Ok(entry) => {
                    if let Some(relative) = self.process_entry(entry.path()) {
                        files.push(relative);
                    }
                }
                Err(err) => log::warn!("Error walking entry: {}", err),
            }
        }

        files.sort();
        files
    }

    fn process_entry(&self, path: &Path) -> Option<String> {
        if path == self.root || path.is_dir() {
            return None;
        }

        // Hidden files are walked, so the .git directory has to be skipped by hand.
        if path.components().any(|c| c.as_os_str() == ".git") {
            return None;
        }

        let relative = diff_paths(path, &self.root)?;
        let parts: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}
