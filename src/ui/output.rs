use crate::error::{StripError, UserFriendlyError};
use crate::stripper::{FileFailure, StripReport};
use crate::ui::progress::format_duration;
use crate::ui::ProgressManager;
use console::{style, Emoji, Term};
use std::path::Path;

pub const COMPLETION_MESSAGE: &str = "JSDoc comment replacement complete.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");

/// Console reporting for a run.
///
/// Human and plain modes print the per-file lines verbatim
/// (`Processed: <path>`, `Error processing <path>: <message>`); human mode
/// only adds color. JSON mode prints one object per line.
pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    // Per-file lines

    pub fn processed(&self, path: &Path, replacements: usize) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "file",
                "status": "processed",
                "path": path.display().to_string(),
                "replacements": replacements,
                "timestamp": chrono::Utc::now().to_rfc3339()
            })),
            _ => println!("{} {}", self.paint_label("Processed:", Label::Ok), path.display()),
        }
    }

    pub fn would_process(&self, path: &Path, replacements: usize) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "file",
                "status": "would_process",
                "path": path.display().to_string(),
                "replacements": replacements,
                "timestamp": chrono::Utc::now().to_rfc3339()
            })),
            _ => println!(
                "{} {}",
                self.paint_label("Would process:", Label::Warn),
                path.display()
            ),
        }
    }

    /// Never suppressed, not even in quiet mode.
    pub fn file_error(&self, failure: &FileFailure) {
        match self.mode {
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "file",
                "status": "error",
                "path": failure.path.display().to_string(),
                "message": failure.message,
                "timestamp": chrono::Utc::now().to_rfc3339()
            })),
            _ => println!(
                "{} {}: {}",
                self.paint_label("Error processing", Label::Err),
                failure.path.display(),
                failure.message
            ),
        }
    }

    /// Printed once after every run, whatever happened to individual files.
    pub fn complete(&self) {
        match self.mode {
            OutputMode::Json => self.print_json_message("complete", COMPLETION_MESSAGE),
            _ => println!("{}", self.paint_label(COMPLETION_MESSAGE, Label::Ok)),
        }
    }

    // General messaging

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    eprintln!("{}", style(message).red().bold());
                } else {
                    eprintln!("error: {}", message);
                }
            }
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}{}", WARNING, style(message).yellow().bold());
                } else {
                    println!("! {}", message);
                }
            }
            OutputMode::Json => self.print_json_message("warning", message),
            OutputMode::Plain => println!("WARNING: {}", message),
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &StripError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => eprintln!("SUGGESTION: {}", suggestion),
            }
        }
    }

    /// Run totals; shown with `-v` in text modes and always in JSON mode.
    pub fn print_summary(&self, report: &StripReport) {
        match self.mode {
            OutputMode::Json => {
                let mut summary = serde_json::to_value(report).unwrap_or_default();
                if let Some(obj) = summary.as_object_mut() {
                    obj.insert("type".to_string(), serde_json::json!("summary"));
                }
                self.print_json_object(&summary);
            }
            _ => {
                if !self.should_show_message(1) {
                    return;
                }
                let verb = if report.dry_run {
                    "Files that would change"
                } else {
                    "Files rewritten"
                };
                println!("  Files scanned:   {}", report.files_scanned);
                println!("  {:<16} {}", format!("{}:", verb), report.files_rewritten);
                println!("  Comments:        {}", report.replacements);
                if report.has_errors() {
                    println!("  Errors:          {}", report.errors.len());
                }
                println!("  Time taken:      {}", format_duration(report.duration()));
            }
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn paint_label(&self, text: &str, label: Label) -> String {
        if !self.use_colors {
            return text.to_string();
        }

        match label {
            Label::Ok => style(text).green().to_string(),
            Label::Warn => style(text).yellow().to_string(),
            Label::Err => style(text).red().bold().to_string(),
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum Label {
    Ok,
    Warn,
    Err,
}

/// Routes formatter output through the spinner so lines never interleave with it.
pub struct ProgressAwareOutput<'a> {
    formatter: &'a OutputFormatter,
    progress_manager: Option<&'a ProgressManager>,
}

impl<'a> ProgressAwareOutput<'a> {
    pub fn new(
        formatter: &'a OutputFormatter,
        progress_manager: Option<&'a ProgressManager>,
    ) -> Self {
        Self {
            formatter,
            progress_manager,
        }
    }

    pub fn suspend_and_print<F>(&self, f: F)
    where
        F: FnOnce(&OutputFormatter),
    {
        if let Some(pm) = self.progress_manager {
            pm.suspend(|| f(self.formatter));
        } else {
            f(self.formatter);
        }
    }

    pub fn processed(&self, path: &Path, replacements: usize) {
        self.suspend_and_print(|f| f.processed(path, replacements));
    }

    pub fn would_process(&self, path: &Path, replacements: usize) {
        self.suspend_and_print(|f| f.would_process(path, replacements));
    }

    pub fn file_error(&self, failure: &FileFailure) {
        self.suspend_and_print(|f| f.file_error(failure));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatter_creation() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 1, false);
        assert_eq!(formatter.mode, OutputMode::Plain);
        assert_eq!(formatter.verbose_level, 1);
        assert!(!formatter.use_colors);
    }

    #[test]
    fn test_quiet_mode() {
        let formatter = OutputFormatter::new(OutputMode::Human, 2, true);
        assert_eq!(formatter.verbose_level, 0);
        assert!(formatter.quiet);
        assert!(!formatter.use_colors);
    }

    #[test]
    fn test_labels_are_plain_without_colors() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 0, false);
        assert_eq!(formatter.paint_label("Processed:", Label::Ok), "Processed:");
        assert_eq!(
            formatter.paint_label(COMPLETION_MESSAGE, Label::Ok),
            "JSDoc comment replacement complete."
        );
    }

    #[test]
    fn test_should_show_message() {
        let formatter = OutputFormatter::new(OutputMode::Human, 2, false);
        assert!(formatter.should_show_message(0));
        assert!(formatter.should_show_message(2));
        assert!(!formatter.should_show_message(3));

        let quiet_formatter = OutputFormatter::new(OutputMode::Human, 2, true);
        assert!(!quiet_formatter.should_show_message(0));
    }
}
