pub mod cli;
pub mod config;
pub mod error;
pub mod scanner;
pub mod stripper;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, RewriteConfig, ScanConfig};
pub use error::{Result, StripError, UserFriendlyError};

// Core functionality re-exports
pub use scanner::{FileFilter, SourceWalker};
pub use stripper::{DocCommentPattern, FileEvent, FileFailure, FileOutcome, StripReport, Stripper};
pub use ui::{GracefulShutdown, OutputFormatter, OutputMode, ProgressAwareOutput, ProgressManager};

use std::path::Path;

/// Main library interface: one configured run over one source tree.
pub struct JsdocStrip {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    shutdown: GracefulShutdown,
}

impl JsdocStrip {
    /// Create a new instance with the provided configuration.
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        let shutdown = GracefulShutdown::new()?;
        Ok(Self::with_shutdown(config, output_mode, verbose, quiet, shutdown))
    }

    /// Create an instance that does not install a Ctrl+C handler.
    pub fn new_without_signals(
        config: Config,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
    ) -> Self {
        Self::with_shutdown(
            config,
            output_mode,
            verbose,
            quiet,
            GracefulShutdown::new_for_test(),
        )
    }

    fn with_shutdown(
        config: Config,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
        shutdown: GracefulShutdown,
    ) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let show_spinner = output_mode == OutputMode::Human
            && !quiet
            && console::Term::stdout().is_term();
        let progress_manager = ProgressManager::new(show_spinner);

        Self {
            config,
            output_formatter,
            progress_manager,
            shutdown,
        }
    }

    /// Create an instance from CLI arguments.
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Self::new(config, output_mode, cli_args.verbosity_level(), cli_args.quiet)
    }

    /// Strip doc comments under the configured root.
    ///
    /// Per-file failures are printed and collected in the report; they never
    /// turn into an `Err`. The completion line is printed whether or not the
    /// run was interrupted.
    pub fn run(&self) -> Result<StripReport> {
        let root = self.config.scan.root.as_path();
        self.output_formatter.debug(&format!(
            "root={} extensions={} exclude=[{}] placeholder={:?} dry_run={}",
            root.display(),
            self.config.scan.extensions.join(","),
            self.config.scan.exclude_dirs.join(","),
            self.config.rewrite.placeholder,
            self.config.rewrite.dry_run
        ));

        let pattern =
            DocCommentPattern::new()?.with_placeholder(self.config.rewrite.placeholder.clone());
        let stripper = Stripper::new(pattern).with_dry_run(self.config.rewrite.dry_run);
        let walker = SourceWalker::new(&self.config.scan);

        let spinner = self.progress_manager.create_spinner("Stripping doc comments");
        let output = ProgressAwareOutput::new(&self.output_formatter, Some(&self.progress_manager));

        // Unreadable directories are not files; they only show up at -vv.
        let files = walker.walk(root).filter_map(|item| match item {
            Ok(path) => {
                ui::progress::update_file_progress(&spinner, &path);
                Some(path)
            }
            Err(err) => {
                output.suspend_and_print(|f| f.debug(&err.user_message()));
                None
            }
        });

        let report = stripper.run(files, &self.shutdown, |event| match event {
            FileEvent::Processed { path, replacements } => output.processed(path, replacements),
            FileEvent::WouldProcess { path, replacements } => {
                output.would_process(path, replacements)
            }
            FileEvent::Failed(failure) => output.file_error(failure),
        });

        ui::progress::finish_progress_with_summary(
            &spinner,
            &format!("{} files scanned", report.files_scanned),
            report.duration(),
        );
        self.progress_manager.clear();

        if report.cancelled {
            self.output_formatter
                .warning("Interrupted: remaining files were left untouched");
        }

        self.output_formatter.print_summary(&report);
        self.output_formatter.complete();

        Ok(report)
    }

    /// Write a sample configuration file.
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn handle_error(&self, error: &StripError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Strip doc comments from every `.js` and `.svelte` file under `root`,
/// with default settings and plain console output.
pub fn process<P: AsRef<Path>>(root: P) -> Result<StripReport> {
    let mut config = Config::default();
    config.scan.root = root.as_ref().to_path_buf();

    JsdocStrip::new_without_signals(config, OutputMode::Plain, 0, false).run()
}
