//! Command-line argument parsing.
//!
//! Decides between printing information, answering a single prompt and
//! starting an interactive chat.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Send one prompt, print the reply and exit
    OneShot(String),
    /// Interactive chat (default)
    Interactive,
}

/// Parse command-line arguments and return the appropriate command.
///
/// Flags win over prompt text. `--prompt <text>` takes the next argument;
/// otherwise all non-flag arguments are joined with spaces into the prompt.
///
/// # Examples
///
/// ```
/// use itinerari::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["itinerari".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut words: Vec<String> = Vec::new();
    let mut prompt: Option<String> = None;

    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--prompt" | "-p" => match args.next() {
                Some(text) => prompt = Some(text),
                None => return CliCommand::Help,
            },
            flag if flag.starts_with('-') && flag.len() > 1 => return CliCommand::Help,
            _ => words.push(arg),
        }
    }

    let text = prompt.unwrap_or_else(|| words.join(" "));
    if text.trim().is_empty() {
        CliCommand::Interactive
    } else {
        CliCommand::OneShot(text.trim().to_string())
    }
}
