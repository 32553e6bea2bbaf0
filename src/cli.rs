use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jsdoc-strip")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Replace JSDoc block comments with a placeholder line")]
#[command(
    long_about = "jsdoc-strip walks a source tree and replaces every /** ... */ block comment \
                  in .js and .svelte files with a single placeholder line, rewriting only the \
                  files that actually change."
)]
#[command(after_help = "EXAMPLES:\n  \
    jsdoc-strip\n  \
    jsdoc-strip web/src --dry-run\n  \
    jsdoc-strip --extensions js,mjs,svelte --exclude node_modules,dist\n  \
    jsdoc-strip --placeholder '// docs removed' --output-format json")]
pub struct Cli {
    /// Root directory to process (defaults to ./project/frontend/src)
    pub root: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// File extensions to process (comma-separated)
    #[arg(short, long, help = "File extensions to process (e.g., js,svelte)")]
    pub extensions: Option<String>,

    /// Directory names to skip while walking
    #[arg(short = 'x', long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Replacement text for each doc comment
    #[arg(short, long, help = "Text that replaces each doc comment (default: // jsdoc)")]
    pub placeholder: Option<String>,

    /// Follow symbolic links to directories
    #[arg(long)]
    pub follow_links: bool,

    /// Maximum directory depth below the root
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Report what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only errors and the completion line)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Write a sample configuration file and exit")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON lines
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_root(self.root.clone())
            .with_extensions(self.extensions.clone())
            .with_exclude(self.exclude.clone())
            .with_follow_links(self.follow_links)
            .with_max_depth(self.max_depth)
            .with_placeholder(self.placeholder.clone())
            .with_dry_run(self.dry_run)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_uses_defaults() {
        let cli = Cli::try_parse_from(["jsdoc-strip"]).unwrap();

        assert!(cli.root.is_none());
        assert!(!cli.dry_run);
        assert!(matches!(cli.output_format, OutputFormat::Human));

        let overrides = cli.create_cli_overrides();
        assert!(overrides.root.is_none());
        assert!(overrides.placeholder.is_none());
    }

    #[test]
    fn test_full_argument_parsing() {
        let cli = Cli::try_parse_from([
            "jsdoc-strip",
            "web/src",
            "--extensions",
            "js,mjs",
            "-x",
            "node_modules,dist",
            "--placeholder",
            "// gone",
            "--max-depth",
            "3",
            "--dry-run",
            "--output-format",
            "json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.root, Some(PathBuf::from("web/src")));
        assert_eq!(cli.extensions.as_deref(), Some("js,mjs"));
        assert_eq!(
            cli.exclude,
            Some(vec!["node_modules".to_string(), "dist".to_string()])
        );
        assert_eq!(cli.placeholder.as_deref(), Some("// gone"));
        assert_eq!(cli.max_depth, Some(3));
        assert!(cli.dry_run);
        assert!(matches!(cli.output_format, OutputFormat::Json));
        assert_eq!(cli.verbosity_level(), 2);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["jsdoc-strip", "-q", "-v"]).is_err());
        let cli = Cli::try_parse_from(["jsdoc-strip", "-q"]).unwrap();
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_load_config_applies_overrides() {
        let cli = Cli::try_parse_from([
            "jsdoc-strip",
            "src",
            "--extensions",
            ".ts",
            "--placeholder",
            "// stripped",
        ])
        .unwrap();

        let overrides = cli.create_cli_overrides();
        let mut config = Config::default();
        config.merge_with_cli_args(&overrides);

        assert_eq!(config.scan.root, PathBuf::from("src"));
        assert_eq!(config.scan.extensions, vec!["ts"]);
        assert_eq!(config.rewrite.placeholder, "// stripped");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_rejects_bad_placeholder() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("strip.toml");
        std::fs::write(&config_path, "").unwrap();

        let cli = Cli::try_parse_from([
            "jsdoc-strip",
            "--config",
            config_path.to_str().unwrap(),
            "--placeholder",
            "/** again */",
        ])
        .unwrap();

        assert!(cli.load_config().is_err());
    }
}
