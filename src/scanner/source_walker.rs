use crate::config::ScanConfig;
use crate::error::{Result, StripError};
use crate::scanner::file_filter::FileFilter;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Lazily walks a source tree and yields the files whose names qualify.
///
/// The sequence is single-pass and its order is whatever the filesystem
/// returns. Directory read failures are yielded as [`StripError::Walk`]
/// items; they are never files, so callers may log or drop them. A root
/// that is not a directory yields no files.
pub struct SourceWalker {
    filter: FileFilter,
    follow_links: bool,
    max_depth: Option<usize>,
}

impl SourceWalker {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            filter: FileFilter::new(config),
            follow_links: config.follow_links,
            max_depth: config.max_depth,
        }
    }

    pub fn walk<P: AsRef<Path>>(&self, root: P) -> impl Iterator<Item = Result<PathBuf>> + '_ {
        let root = root.as_ref().to_path_buf();

        let mut walker = WalkDir::new(&root).follow_links(self.follow_links);
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        walker
            .into_iter()
            .filter_entry(move |e| self.should_traverse(e))
            .filter_map(move |entry| match entry {
                Ok(entry) => {
                    if entry.depth() > 0
                        && is_file_like(&entry)
                        && self.filter.is_qualifying_file(entry.path())
                    {
                        Some(Ok(entry.into_path()))
                    } else {
                        None
                    }
                }
                Err(err) => Some(Err(walk_error(err, &root))),
            })
    }

    fn should_traverse(&self, entry: &DirEntry) -> bool {
        // The root is always entered, whatever its name.
        if entry.depth() == 0 {
            return true;
        }

        if entry.file_type().is_dir() {
            return self.filter.should_traverse_directory(entry.path());
        }

        true
    }
}

/// Any symlink that does not resolve to a directory counts as a file, a
/// dangling one included: opening it then fails like any unreadable file.
fn is_file_like(entry: &DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }

    entry.path_is_symlink() && !entry.path().is_dir()
}

fn walk_error(err: walkdir::Error, root: &Path) -> StripError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());

    let message = match err.io_error() {
        Some(io_err) => io_err.to_string(),
        None => err.to_string(),
    };

    StripError::Walk { path, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_tree() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("lib/components")).unwrap();
        fs::create_dir_all(root.join("stores")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();

        fs::write(root.join("main.js"), "const a = 1;").unwrap();
        fs::write(root.join("App.svelte"), "<script></script>").unwrap();
        fs::write(root.join("lib/index.js"), "export {};").unwrap();
        fs::write(root.join("lib/components/Card.svelte"), "<div/>").unwrap();
        fs::write(root.join("lib/styles.css"), "body {}").unwrap();
        fs::write(root.join("stores/auth.js"), "let user;").unwrap();
        fs::write(root.join("stores/notes.md"), "# notes").unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "module.exports = {};").unwrap();

        temp_dir
    }

    fn relative_paths(root: &Path, paths: Vec<PathBuf>) -> Vec<String> {
        let mut names: Vec<String> = paths
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_walk_yields_only_qualifying_files() {
        let temp_dir = create_tree();
        let walker = SourceWalker::new(&ScanConfig::default());

        let paths: Vec<PathBuf> = walker
            .walk(temp_dir.path())
            .collect::<Result<Vec<_>>>()
            .unwrap();

        assert_eq!(
            relative_paths(temp_dir.path(), paths),
            vec![
                "App.svelte",
                "lib/components/Card.svelte",
                "lib/index.js",
                "main.js",
                "node_modules/pkg/index.js",
                "stores/auth.js",
            ]
        );
    }

    #[test]
    fn test_excluded_directories_are_pruned() {
        let temp_dir = create_tree();
        let config = ScanConfig {
            exclude_dirs: vec!["node_modules".to_string(), "components".to_string()],
            ..ScanConfig::default()
        };
        let walker = SourceWalker::new(&config);

        let paths: Vec<PathBuf> = walker.walk(temp_dir.path()).filter_map(|r| r.ok()).collect();

        assert_eq!(
            relative_paths(temp_dir.path(), paths),
            vec!["App.svelte", "lib/index.js", "main.js", "stores/auth.js"]
        );
    }

    #[test]
    fn test_root_is_entered_even_when_excluded() {
        let temp_dir = create_tree();
        let config = ScanConfig {
            exclude_dirs: vec!["stores".to_string()],
            ..ScanConfig::default()
        };
        let walker = SourceWalker::new(&config);

        let paths: Vec<PathBuf> = walker
            .walk(temp_dir.path().join("stores"))
            .filter_map(|r| r.ok())
            .collect();

        assert_eq!(paths.len(), 1);
        assert!(paths[0].ends_with("auth.js"));
    }

    #[test]
    fn test_max_depth_limits_descent() {
        let temp_dir = create_tree();
        let config = ScanConfig {
            max_depth: Some(1),
            ..ScanConfig::default()
        };
        let walker = SourceWalker::new(&config);

        let paths: Vec<PathBuf> = walker.walk(temp_dir.path()).filter_map(|r| r.ok()).collect();

        assert_eq!(
            relative_paths(temp_dir.path(), paths),
            vec!["App.svelte", "main.js"]
        );
    }

    #[test]
    fn test_missing_root_yields_walk_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist");
        let walker = SourceWalker::new(&ScanConfig::default());

        let results: Vec<Result<PathBuf>> = walker.walk(&missing).collect();

        assert_eq!(results.len(), 1);
        match &results[0] {
            Err(StripError::Walk { path, .. }) => assert_eq!(path, &missing),
            other => panic!("expected walk error, got {:?}", other),
        }
    }

    #[test]
    fn test_file_root_yields_nothing() {
        let temp_dir = create_tree();
        let walker = SourceWalker::new(&ScanConfig::default());

        let results: Vec<Result<PathBuf>> = walker.walk(temp_dir.path().join("main.js")).collect();

        assert!(results.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_yielded() {
        let temp_dir = create_tree();
        let root = temp_dir.path();
        std::os::unix::fs::symlink(root.join("gone.js"), root.join("broken.js")).unwrap();
        std::os::unix::fs::symlink(root.join("lib"), root.join("linked.js")).unwrap();

        let paths: Vec<PathBuf> = walker_paths(root);

        assert!(paths.contains(&root.join("broken.js")));
        assert!(!paths.contains(&root.join("linked.js")));
    }

    #[cfg(unix)]
    fn walker_paths(root: &Path) -> Vec<PathBuf> {
        SourceWalker::new(&ScanConfig::default())
            .walk(root)
            .filter_map(|r| r.ok())
            .collect()
    }
}
