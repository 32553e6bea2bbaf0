use crate::config::ScanConfig;
use std::ffi::OsStr;
use std::path::Path;

pub struct FileFilter {
    suffixes: Vec<String>,
    exclude_dirs: Vec<String>,
}

impl FileFilter {
    pub fn new(config: &ScanConfig) -> Self {
        let suffixes = config
            .extensions
            .iter()
            .map(|ext| format!(".{}", ext.trim_start_matches('.')))
            .collect();

        Self {
            suffixes,
            exclude_dirs: config.exclude_dirs.clone(),
        }
    }

    /// Suffix match on the raw file name, case-sensitive.
    pub fn is_qualifying_file(&self, path: &Path) -> bool {
        match path.file_name() {
            Some(filename) => self
                .suffixes
                .iter()
                .any(|suffix| name_ends_with(filename, suffix)),
            None => false,
        }
    }

    pub fn should_traverse_directory(&self, path: &Path) -> bool {
        if let Some(dir_name) = path.file_name().and_then(|s| s.to_str()) {
            if self.exclude_dirs.iter().any(|exclude| exclude == dir_name) {
                return false;
            }
        }

        true
    }
}

// File names need not be UTF-8; compare bytes where the platform allows it.
#[cfg(unix)]
fn name_ends_with(name: &OsStr, suffix: &str) -> bool {
    use std::os::unix::ffi::OsStrExt;
    name.as_bytes().ends_with(suffix.as_bytes())
}

#[cfg(not(unix))]
fn name_ends_with(name: &OsStr, suffix: &str) -> bool {
    name.to_string_lossy().ends_with(suffix)
}
