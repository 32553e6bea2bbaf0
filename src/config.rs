use crate::error::{Result, StripError};
use crate::stripper::pattern::DOC_COMMENT_OPENER;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ROOT: &str = "./project/frontend/src";
pub const DEFAULT_PLACEHOLDER: &str = "// jsdoc";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub rewrite: RewriteConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    pub root: PathBuf,
    pub extensions: Vec<String>,
    pub exclude_dirs: Vec<String>,
    pub follow_links: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RewriteConfig {
    pub placeholder: String,
    pub dry_run: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            extensions: vec!["js".to_string(), "svelte".to_string()],
            exclude_dirs: Vec::new(),
            follow_links: false,
            max_depth: None,
        }
    }
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            dry_run: false,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(StripError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| StripError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| StripError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["jsdoc-strip.toml", ".jsdoc-strip.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref root) = cli_args.root {
            self.scan.root = root.clone();
        }

        if let Some(ref extensions) = cli_args.extensions {
            self.scan.extensions = parse_extension_list(extensions);
        }

        if let Some(ref exclude) = cli_args.exclude {
            for dir in exclude {
                if !self.scan.exclude_dirs.contains(dir) {
                    self.scan.exclude_dirs.push(dir.clone());
                }
            }
        }

        if cli_args.follow_links {
            self.scan.follow_links = true;
        }

        if let Some(max_depth) = cli_args.max_depth {
            self.scan.max_depth = Some(max_depth);
        }

        if let Some(ref placeholder) = cli_args.placeholder {
            self.rewrite.placeholder = placeholder.clone();
        }

        if cli_args.dry_run {
            self.rewrite.dry_run = true;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| StripError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| StripError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.scan.extensions.is_empty() {
            return Err(StripError::Config {
                message: "At least one file extension must be specified".to_string(),
            });
        }

        if self.scan.extensions.iter().any(|e| e.trim().is_empty()) {
            return Err(StripError::Config {
                message: "File extensions must not be empty".to_string(),
            });
        }

        if self.rewrite.placeholder.is_empty() {
            return Err(StripError::Config {
                message: "Placeholder text must not be empty".to_string(),
            });
        }

        // A placeholder that opens a doc comment would be matched again on the next run.
        if self.rewrite.placeholder.contains(DOC_COMMENT_OPENER) {
            return Err(StripError::Config {
                message: format!(
                    "Placeholder text must not contain '{}'",
                    DOC_COMMENT_OPENER
                ),
            });
        }

        // Nor may it complete an opener together with the text around a match.
        let placeholder = self.rewrite.placeholder.as_str();
        if placeholder.starts_with('*') || placeholder.ends_with('/') || placeholder.ends_with("/*")
        {
            return Err(StripError::Config {
                message: format!(
                    "Placeholder text must not start with '*' or end with '/' or '/*', \
                     since it could form '{}' with neighbouring text",
                    DOC_COMMENT_OPENER
                ),
            });
        }

        if self.scan.max_depth == Some(0) {
            return Err(StripError::Config {
                message: "Maximum directory depth must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

/// Splits `"js, .svelte,,mjs"` into `["js", "svelte", "mjs"]`.
pub fn parse_extension_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().trim_start_matches('.').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub root: Option<PathBuf>,
    pub extensions: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub follow_links: bool,
    pub max_depth: Option<usize>,
    pub placeholder: Option<String>,
    pub dry_run: bool,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: Option<PathBuf>) -> Self {
        self.root = root;
        self
    }

    pub fn with_extensions(mut self, extensions: Option<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_exclude(mut self, exclude: Option<Vec<String>>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_placeholder(mut self, placeholder: Option<String>) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
