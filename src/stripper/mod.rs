pub mod pattern;
pub mod rewriter;

pub use pattern::{DocCommentPattern, Stripped};
pub use rewriter::{FileEvent, FileFailure, FileOutcome, StripReport, Stripper};
