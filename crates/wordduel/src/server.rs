//! `WordDuelServer` builder and server loop.
//!
//! This ties the layers together: transport → protocol → matchmaking →
//! sessions.

use std::sync::Arc;

use tokio::task::JoinHandle;
use wordduel_matchmaking::{Matchmaker, MatchmakerHandle};
use wordduel_protocol::{Codec, JsonCodec};
use wordduel_session::{AnonymousAuthenticator, Authenticator, SessionStore};
use wordduel_transport::{Connection, Transport, WebSocketTransport};
use wordduel_words::Dictionary;

use crate::handler::handle_connection;
use crate::{ServerConfig, WordDuelError};

/// Shared server state passed to each connection handler task.
pub(crate) struct ServerState<A: Authenticator, C: Codec> {
    pub(crate) store: Arc<SessionStore>,
    pub(crate) matchmaker: MatchmakerHandle,
    pub(crate) auth: A,
    pub(crate) codec: C,
    pub(crate) config: ServerConfig,
}

/// Builder for configuring and starting a WordDuel server.
///
/// # Example
///
/// ```rust,ignore
/// let server = WordDuelServer::builder()
///     .config(ServerConfig::from_env()?)
///     .dictionary(Dictionary::from_files("answers.txt", None)?)
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct WordDuelServerBuilder<A = AnonymousAuthenticator> {
    config: ServerConfig,
    dictionary: Option<Dictionary>,
    auth: A,
}

impl WordDuelServerBuilder {
    /// Creates a new builder with default settings and anonymous players.
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            dictionary: None,
            auth: AnonymousAuthenticator,
        }
    }
}

impl Default for WordDuelServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Authenticator> WordDuelServerBuilder<A> {
    /// Replaces the whole configuration.
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.config.bind_addr = addr.to_string();
        self
    }

    /// Sets the word lists. Default: [`Dictionary::builtin`].
    pub fn dictionary(mut self, dictionary: Dictionary) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    /// Sets the identity check run on every new connection.
    pub fn authenticator<B: Authenticator>(
        self,
        auth: B,
    ) -> WordDuelServerBuilder<B> {
        WordDuelServerBuilder {
            config: self.config,
            dictionary: self.dictionary,
            auth,
        }
    }

    /// Binds the listener and starts the background tasks.
    ///
    /// Uses `JsonCodec` and `WebSocketTransport`.
    pub async fn build(
        self,
    ) -> Result<WordDuelServer<A, JsonCodec>, WordDuelError> {
        let transport =
            WebSocketTransport::bind(&self.config.bind_addr).await?;

        let dictionary = self.dictionary.unwrap_or_else(Dictionary::builtin);
        tracing::info!(
            candidates = dictionary.candidates().len(),
            guessable = dictionary.guessable_len(),
            "dictionary loaded"
        );

        let store = Arc::new(SessionStore::new(
            Arc::new(dictionary),
            self.config.session.clone(),
        ));
        let (matchmaker, matchmaker_task) =
            Matchmaker::spawn(Arc::clone(&store));
        let housekeeping = self
            .config
            .reaper_interval()
            .map(|every| spawn_housekeeping(Arc::clone(&store), every));

        let state = Arc::new(ServerState {
            store,
            matchmaker,
            auth: self.auth,
            codec: JsonCodec,
            config: self.config,
        });

        Ok(WordDuelServer {
            transport,
            state,
            matchmaker_task,
            housekeeping,
        })
    }
}

/// Periodically expires idle duels and forgets old finished ones.
fn spawn_housekeeping(
    store: Arc<SessionStore>,
    every: std::time::Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let expired = store.reap_idle().await;
            let pruned = store.prune_finished().await;
            if !expired.is_empty() || pruned > 0 {
                let live = store.live_count().await;
                tracing::debug!(
                    expired = expired.len(),
                    pruned,
                    live,
                    "session housekeeping"
                );
            }
        }
    })
}

/// A running WordDuel server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct WordDuelServer<A: Authenticator, C: Codec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<A, C>>,
    matchmaker_task: JoinHandle<()>,
    housekeeping: Option<JoinHandle<()>>,
}

impl WordDuelServer<AnonymousAuthenticator, JsonCodec> {
    /// Creates a new builder.
    pub fn builder() -> WordDuelServerBuilder {
        WordDuelServerBuilder::new()
    }
}

impl<A, C> WordDuelServer<A, C>
where
    A: Authenticator,
    C: Codec,
{
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// The session store shared by every connection.
    pub fn store(&self) -> Arc<SessionStore> {
        Arc::clone(&self.state.store)
    }

    pub fn matchmaker(&self) -> MatchmakerHandle {
        self.state.matchmaker.clone()
    }

    /// Runs the server accept loop.
    ///
    /// Spawns one handler task per accepted connection. Accept failures
    /// are logged and the loop carries on. Runs until the process is
    /// terminated.
    pub async fn run(mut self) -> Result<(), WordDuelError> {
        tracing::info!("WordDuel server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        let conn_id = conn.id();
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(
                                %conn_id,
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}

impl<A: Authenticator, C: Codec> Drop for WordDuelServer<A, C> {
    fn drop(&mut self) {
        self.matchmaker_task.abort();
        if let Some(task) = &self.housekeeping {
            task.abort();
        }
    }
}
