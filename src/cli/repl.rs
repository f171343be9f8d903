//! Interactive chat input handling.

/// What a line typed at the interactive prompt asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplInput {
    /// Nothing to do
    Blank,
    /// Leave the chat
    Quit,
    /// Forget the conversation so far
    NewConversation,
    /// Unrecognized `/command`
    Unknown(String),
    /// Text to send to the assistant
    Prompt(String),
}

/// Classify one line of interactive input.
pub fn parse_repl_line(line: &str) -> ReplInput {
    let line = line.trim();
    if line.is_empty() {
        return ReplInput::Blank;
    }

    match line {
        "/esci" | "/exit" | "/quit" => ReplInput::Quit,
        "/nuova" | "/new" => ReplInput::NewConversation,
        command if command.starts_with('/') && !command.contains(char::is_whitespace) => {
            ReplInput::Unknown(command.to_string())
        }
        text => ReplInput::Prompt(text.to_string()),
    }
}
