//! Per-connection handler: auth, matchmaking, and the guess loop.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Authenticate → get PlayerId (failure: `error`, then close)
//!   2. Enroll → wait for an opponent, answering any early message
//!   3. Loop: inbound guesses ↔ outbound messages from the outbox

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use wordduel_matchmaking::{Outbox, Pairing};
use wordduel_protocol::{
    ClientMessage, Codec, GameId, PlayerId, ServerMessage,
};
use wordduel_session::{Authenticator, GameOver, GuessOutcome, RejectReason};
use wordduel_transport::{Connection, WebSocketConnection};

use crate::WordDuelError;
use crate::server::ServerState;

/// The duel this connection is playing.
struct CurrentGame {
    id: GameId,
    opponent: PlayerId,
    opponent_outbox: Outbox,
    /// Set once `game_over` went out. Later guesses for `id` are answered
    /// here and never reach the store.
    ended: bool,
}

impl From<Pairing> for CurrentGame {
    fn from(pairing: Pairing) -> Self {
        Self {
            id: pairing.game_id,
            opponent: pairing.opponent,
            opponent_outbox: pairing.opponent_outbox,
            ended: false,
        }
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<A, C>(
    conn: WebSocketConnection,
    state: Arc<ServerState<A, C>>,
) -> Result<(), WordDuelError>
where
    A: Authenticator,
    C: Codec,
{
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    // --- Step 1: Identity ---
    let player_id =
        match state.auth.authenticate(conn_id, conn.credentials()).await {
            Ok(pid) => pid,
            Err(e) => {
                tracing::info!(%conn_id, error = %e, "authentication failed");
                send(&conn, &state.codec, &ServerMessage::error("unauthorized"))
                    .await?;
                let _ = conn.close().await;
                return Err(e.into());
            }
        };
    tracing::info!(%conn_id, %player_id, "player connected");

    // --- Step 2: Matchmaking ---
    let (outbox, mut inbox) = mpsc::unbounded_channel();
    let Some(pairing) =
        wait_for_opponent(&conn, &state, player_id, outbox).await?
    else {
        tracing::info!(%player_id, "disconnected while waiting");
        return Ok(());
    };
    let mut game = CurrentGame::from(pairing);
    tracing::info!(%player_id, game_id = %game.id, opponent = %game.opponent, "game started");

    // --- Step 3: Message loop ---
    let read_timeout = state.config.read_timeout();
    let mut deadline = read_timeout.map(|t| Instant::now() + t);
    let mut inbox_open = true;

    loop {
        tokio::select! {
            // Queued messages (game_start first) go out before new input
            // is looked at.
            biased;

            msg = inbox.recv(), if inbox_open => match msg {
                Some(msg) => {
                    if matches!(msg, ServerMessage::GameOver { .. }) {
                        game.ended = true;
                    }
                    send(&conn, &state.codec, &msg).await?;
                }
                // The opponent's handler is gone. This side can still
                // finish its own guesses.
                None => inbox_open = false,
            },

            frame = conn.recv() => match frame? {
                Some(data) => {
                    deadline = read_timeout.map(|t| Instant::now() + t);
                    handle_frame(&conn, &state, player_id, &mut game, &data)
                        .await?;
                }
                None => {
                    tracing::info!(%player_id, "connection closed cleanly");
                    break;
                }
            },

            () = idle_until(deadline) => {
                tracing::info!(%player_id, "connection timed out");
                let _ = conn.close().await;
                break;
            }
        }
    }

    Ok(())
}

/// Enrolls the player and waits for a pairing.
///
/// Returns `None` if the client disconnected first, which withdraws the
/// enrollment.
async fn wait_for_opponent<A, C>(
    conn: &WebSocketConnection,
    state: &ServerState<A, C>,
    player_id: PlayerId,
    outbox: Outbox,
) -> Result<Option<Pairing>, WordDuelError>
where
    A: Authenticator,
    C: Codec,
{
    let enroll = state.matchmaker.enroll(player_id, outbox);
    tokio::pin!(enroll);

    loop {
        tokio::select! {
            pairing = &mut enroll => match pairing {
                Ok(pairing) => return Ok(Some(pairing)),
                Err(e) => {
                    tracing::info!(%player_id, error = %e, "enrollment failed");
                    send(conn, &state.codec, &ServerMessage::error(e.to_string()))
                        .await?;
                    let _ = conn.close().await;
                    return Err(e.into());
                }
            },
            frame = conn.recv() => match frame? {
                Some(_) => {
                    send(
                        conn,
                        &state.codec,
                        &ServerMessage::error("waiting for an opponent"),
                    )
                    .await?;
                }
                None => return Ok(None),
            },
        }
    }
}

/// Handles one inbound frame during a game.
async fn handle_frame<A, C>(
    conn: &WebSocketConnection,
    state: &ServerState<A, C>,
    player_id: PlayerId,
    game: &mut CurrentGame,
    data: &[u8],
) -> Result<(), WordDuelError>
where
    A: Authenticator,
    C: Codec,
{
    if data.len() > state.config.max_message_bytes {
        tracing::debug!(%player_id, size = data.len(), "oversized frame");
        return send(conn, &state.codec, &ServerMessage::error("message too large"))
            .await;
    }

    let ClientMessage::SubmitGuess { game_id, guess } =
        match state.codec.decode::<ClientMessage>(data) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(%player_id, error = %e, "failed to decode message");
                return send(
                    conn,
                    &state.codec,
                    &ServerMessage::error("invalid message"),
                )
                .await;
            }
        };

    // Only the duel this connection was paired into. A player id may be
    // shared by several connections.
    if game_id != game.id {
        tracing::debug!(%player_id, %game_id, "guess for another game");
        return send(
            conn,
            &state.codec,
            &ServerMessage::error(RejectReason::SessionNotFound.to_string()),
        )
        .await;
    }

    if game.ended {
        return send(
            conn,
            &state.codec,
            &ServerMessage::error("game is already over"),
        )
        .await;
    }

    match state.store.submit_guess(&game_id, player_id, &guess).await {
        GuessOutcome::Rejected(reason) => {
            send(conn, &state.codec, &ServerMessage::error(reason.to_string()))
                .await
        }
        GuessOutcome::Scored(scored) => {
            let result = ServerMessage::GuessResult {
                guess: scored.guess,
                result: scored.result,
                correct: scored.won,
                attempts: scored.attempt,
            };
            send(conn, &state.codec, &result).await?;

            if let Some(over) = scored.game_over {
                announce_game_over(conn, state, player_id, game, &over)
                    .await?;
            }
            Ok(())
        }
    }
}

/// Sends `game_over` to this player directly and to the opponent through
/// their outbox, each with their own `winner`.
async fn announce_game_over<A, C>(
    conn: &WebSocketConnection,
    state: &ServerState<A, C>,
    player_id: PlayerId,
    game: &mut CurrentGame,
    over: &GameOver,
) -> Result<(), WordDuelError>
where
    A: Authenticator,
    C: Codec,
{
    let mine = ServerMessage::GameOver {
        winner: over.winner_for(player_id),
        word: over.word.clone(),
    };
    send(conn, &state.codec, &mine).await?;

    game.ended = true;
    let theirs = ServerMessage::GameOver {
        winner: over.winner_for(game.opponent),
        word: over.word.clone(),
    };
    if game.opponent_outbox.send(theirs).is_err() {
        tracing::debug!(opponent = %game.opponent, "opponent already gone");
    }
    Ok(())
}

/// Resolves at `deadline`, or never when there is none.
async fn idle_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

async fn send(
    conn: &WebSocketConnection,
    codec: &impl Codec,
    msg: &ServerMessage,
) -> Result<(), WordDuelError> {
    let bytes = codec.encode(msg)?;
    conn.send(&bytes).await?;
    Ok(())
}

