use itinerari::chat::{ChatClient, ChatSession, ReplyOutcome};
use itinerari::cli::{
    parse_args, parse_repl_line, run_cli_command, CliCommand, ReplInput, SuffixPrinter,
};
use itinerari::config::ChatConfig;
use itinerari::error::ChatResult;

use color_eyre::Result;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Log filter variable, e.g. `ITINERARI_LOG=itinerari=debug`.
const LOG_ENV: &str = "ITINERARI_LOG";

/// How a single turn ended from the terminal's point of view.
enum TurnEnd {
    Replied,
    Interrupted,
    Failed,
}

/// Logs go to stderr so stdout only carries reply text.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Send one prompt and print the reply as it streams. Ctrl+C abandons it.
async fn run_turn(session: &mut ChatSession, prompt: &str) -> Result<TurnEnd> {
    let mut printer = SuffixPrinter::new(io::stdout());
    let mut write_error: Option<io::Error> = None;

    let result: Option<ChatResult<ReplyOutcome>> = {
        let turn = session.send(prompt, |text| {
            if let Err(e) = printer.update(text) {
                write_error.get_or_insert(e);
            }
        });
        tokio::select! {
            result = turn => Some(result),
            _ = tokio::signal::ctrl_c() => None,
        }
    };

    let printed = printer.printed() > 0;
    printer.finish()?;
    if let Some(e) = write_error {
        return Err(e.into());
    }

    match result {
        Some(Ok(outcome)) => {
            tracing::debug!(
                fragments = outcome.fragments,
                termination = ?outcome.termination,
                "Turn finished"
            );
            if outcome.is_empty() {
                eprintln!("L'assistente non ha inviato alcuna risposta.");
            }
            Ok(TurnEnd::Replied)
        }
        Some(Err(err)) => {
            tracing::debug!(code = err.error_code(), error = %err, "Turn failed");
            if printed {
                eprintln!();
            }
            eprintln!("{}", err.user_message());
            Ok(TurnEnd::Failed)
        }
        None => {
            tracing::info!("Reply interrupted by user");
            eprintln!("[interrotto]");
            Ok(TurnEnd::Interrupted)
        }
    }
}

async fn run_interactive(session: &mut ChatSession) -> Result<()> {
    eprintln!("Itinerari Intelligenti. Scrivi la tua domanda, /nuova per ricominciare, /esci per uscire.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        eprint!("> ");
        io::stderr().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            // EOF or Ctrl+C at the prompt
            eprintln!();
            return Ok(());
        };

        match parse_repl_line(&line) {
            ReplInput::Blank => {}
            ReplInput::Quit => return Ok(()),
            ReplInput::NewConversation => {
                session.new_conversation();
                eprintln!("Nuova conversazione.");
            }
            ReplInput::Unknown(command) => {
                eprintln!("Comando sconosciuto: {} (usa /nuova o /esci)", command);
            }
            ReplInput::Prompt(prompt) => {
                run_turn(session, &prompt).await?;
            }
        }
    }
}

async fn run(command: CliCommand, config: ChatConfig) -> Result<bool> {
    tracing::debug!(?config, "Resolved configuration");
    let mut session = ChatSession::new(ChatClient::new(config));

    match command {
        CliCommand::OneShot(prompt) => {
            let end = run_turn(&mut session, &prompt).await?;
            Ok(matches!(end, TurnEnd::Replied))
        }
        _ => {
            run_interactive(&mut session).await?;
            Ok(true)
        }
    }
}

fn main() -> Result<()> {
    let command = parse_args(std::env::args());
    if run_cli_command(&command) {
        return Ok(());
    }

    color_eyre::install()?;
    init_tracing();

    let config = match ChatConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(code = e.error_code(), error = %e, "Invalid configuration");
            eprintln!("{}", e.user_message());
            std::process::exit(2);
        }
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let succeeded = runtime.block_on(run(command, config))?;
    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}
