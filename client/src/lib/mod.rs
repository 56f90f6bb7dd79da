pub mod args;
pub mod format;
pub mod run;

pub use args::ClientArgs;
pub use format::FormatError;
pub use run::{run, ExitStatus};
