pub mod cli_args;
pub mod formatter;
pub mod loader;

pub use cli_args::{CliArgs, CliCommand};
pub use formatter::{OutputFormat, OutputFormatter};
pub use loader::load_points;
