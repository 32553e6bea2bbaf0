pub mod file_filter;
pub mod source_walker;

pub use file_filter::FileFilter;
pub use source_walker::SourceWalker;
