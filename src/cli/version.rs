//! Version and usage output.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Usage text for `--help`.
pub fn usage() -> String {
    format!(
        "itinerari {VERSION}
Assistente di viaggio da terminale.

USO:
    itinerari                      chat interattiva
    itinerari <domanda...>         una sola domanda
    itinerari --prompt <domanda>   una sola domanda

OPZIONI:
    -p, --prompt <testo>   domanda da inviare
    -h, --help             mostra questo aiuto
    -V, --version          mostra la versione

COMANDI (chat interattiva):
    /nuova   inizia una nuova conversazione
    /esci    esci (anche Ctrl+D)

AMBIENTE:
    ITINERARI_CHAT_URL            URL dell'endpoint di chat (obbligatorio)
    ITINERARI_AUTH_TOKEN          token di accesso (obbligatorio)
    ITINERARI_READ_TIMEOUT_SECS   secondi massimi di attesa tra due blocchi
    ITINERARI_LOG                 filtro dei log (predefinito: warn)
"
    )
}

/// Handle the --version command.
pub fn handle_version_command() {
    println!("itinerari {}", VERSION);
}

/// Handle the --help command.
pub fn handle_help_command() {
    print!("{}", usage());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_format() {
        // Version should be in semver format (e.g., "0.1.0")
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_usage_mentions_every_flag() {
        let usage = usage();
        for flag in ["--prompt", "--help", "--version", "/nuova", "/esci", "ITINERARI_CHAT_URL"] {
            assert!(usage.contains(flag), "usage is missing {}", flag);
        }
    }
}
