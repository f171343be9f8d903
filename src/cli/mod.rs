//! CLI module.
//!
//! - Argument parsing
//! - Version and usage display
//! - Interactive input classification
//! - Incremental rendering of reply snapshots
//!
//! # Usage
//!
//! ```ignore
//! use itinerari::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! if run_cli_command(&command) {
//!     return Ok(());
//! }
//! // Otherwise chat (one-shot or interactive)
//! ```

pub mod args;
pub mod render;
pub mod repl;
pub mod version;

pub use args::{parse_args, CliCommand};
pub use render::SuffixPrinter;
pub use repl::{parse_repl_line, ReplInput};
pub use version::{handle_help_command, handle_version_command, VERSION};

/// Run an informational command if `command` is one.
///
/// Returns true when the command was handled and the program should exit.
pub fn run_cli_command(command: &CliCommand) -> bool {
    match command {
        CliCommand::Version => {
            handle_version_command();
            true
        }
        CliCommand::Help => {
            handle_help_command();
            true
        }
        CliCommand::OneShot(_) | CliCommand::Interactive => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_commands_are_not_handled() {
        assert!(!run_cli_command(&CliCommand::Interactive));
        assert!(!run_cli_command(&CliCommand::OneShot("Roma".to_string())));
    }
}
