pub mod output;
pub mod progress;
pub mod signals;

pub use output::{OutputFormatter, OutputMode, ProgressAwareOutput, COMPLETION_MESSAGE};
pub use progress::ProgressManager;
pub use signals::GracefulShutdown;
