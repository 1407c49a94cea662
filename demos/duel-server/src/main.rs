//! WordDuel server binary.
//!
//! Configuration comes from the environment (see
//! `ServerConfig::from_env`). `WORDDUEL_ANSWERS` and `WORDDUEL_GUESSES`
//! point at newline-separated word files; without them the embedded list
//! is used. Log verbosity follows `RUST_LOG` (default `info`).

use std::path::PathBuf;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wordduel::prelude::*;

fn load_dictionary() -> Result<Dictionary, DictionaryError> {
    let guesses = std::env::var_os("WORDDUEL_GUESSES").map(PathBuf::from);
    match std::env::var_os("WORDDUEL_ANSWERS") {
        Some(answers) => Dictionary::from_files(answers, guesses.as_deref()),
        None => Ok(Dictionary::builtin()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let dictionary = load_dictionary()?;
    tracing::info!(addr = %config.bind_addr, "starting WordDuel server");

    let server = WordDuelServer::builder()
        .config(config)
        .dictionary(dictionary)
        .build()
        .await?;

    server.run().await?;
    Ok(())
}
