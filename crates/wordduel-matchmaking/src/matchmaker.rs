//! Matchmaker actor: a Tokio task that owns the wait queue.
//!
//! Handlers talk to it through a [`MatchmakerHandle`]. An enrollment is a
//! command carrying a oneshot reply channel; the reply is only sent once
//! the player has been paired, so the handler's `enroll` call simply
//! suspends until then. Dropping that call closes the reply channel, and
//! the actor discards the entry the next time it looks at the queue.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use wordduel_protocol::{GameId, PlayerId, ServerMessage};
use wordduel_session::SessionStore;

use crate::{MatchmakingError, WaitQueue};

/// Command channel size for the matchmaker.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Channel for pushing messages to one player's connection handler.
pub type Outbox = mpsc::UnboundedSender<ServerMessage>;

/// What an enrolled player receives once matched.
///
/// By the time this arrives, `game_start` is already queued in the
/// player's own outbox.
#[derive(Debug, Clone)]
pub struct Pairing {
    pub game_id: GameId,
    pub word_length: usize,
    pub opponent: PlayerId,
    /// Lets the handler deliver `game_over` to the opponent.
    pub opponent_outbox: Outbox,
}

type EnrollReply = oneshot::Sender<Result<Pairing, MatchmakingError>>;

pub(crate) enum MatchmakerCommand {
    Enroll {
        player: PlayerId,
        outbox: Outbox,
        reply: EnrollReply,
    },
    Inspect {
        reply: oneshot::Sender<Vec<PlayerId>>,
    },
    Shutdown,
}

/// A queued enrollment.
struct Waiting {
    outbox: Outbox,
    reply: EnrollReply,
}

/// Handle to the running matchmaker. Cheap to clone.
#[derive(Clone)]
pub struct MatchmakerHandle {
    sender: mpsc::Sender<MatchmakerCommand>,
}

impl MatchmakerHandle {
    /// Waits in line until paired with another player.
    ///
    /// `outbox` receives `game_start` and, later, the opponent's
    /// `game_over` notification. Cancelling this future withdraws the
    /// enrollment.
    ///
    /// # Errors
    /// - [`MatchmakingError::AlreadyWaiting`] if `player` is already in line
    /// - [`MatchmakingError::SessionFailed`] if the duel could not be created
    /// - [`MatchmakingError::Unavailable`] if the matchmaker stopped
    pub async fn enroll(
        &self,
        player: PlayerId,
        outbox: Outbox,
    ) -> Result<Pairing, MatchmakingError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(MatchmakerCommand::Enroll {
                player,
                outbox,
                reply: reply_tx,
            })
            .await
            .map_err(|_| MatchmakingError::Unavailable)?;
        reply_rx.await.map_err(|_| MatchmakingError::Unavailable)?
    }

    /// Players currently waiting, oldest first.
    pub async fn waiting(&self) -> Result<Vec<PlayerId>, MatchmakingError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(MatchmakerCommand::Inspect { reply: reply_tx })
            .await
            .map_err(|_| MatchmakingError::Unavailable)?;
        reply_rx.await.map_err(|_| MatchmakingError::Unavailable)
    }

    /// Stops the matchmaker. Pending enrollments fail with
    /// [`MatchmakingError::Unavailable`].
    pub async fn shutdown(&self) -> Result<(), MatchmakingError> {
        self.sender
            .send(MatchmakerCommand::Shutdown)
            .await
            .map_err(|_| MatchmakingError::Unavailable)
    }
}

/// The matchmaker actor state. Runs inside a Tokio task.
pub struct Matchmaker {
    store: Arc<SessionStore>,
    queue: WaitQueue<Waiting>,
    receiver: mpsc::Receiver<MatchmakerCommand>,
}

impl Matchmaker {
    /// Spawns the matchmaker task for `store`.
    pub fn spawn(store: Arc<SessionStore>) -> (MatchmakerHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(DEFAULT_CHANNEL_SIZE);
        let actor = Matchmaker {
            store,
            queue: WaitQueue::new(),
            receiver: rx,
        };
        let task = tokio::spawn(actor.run());
        (MatchmakerHandle { sender: tx }, task)
    }

    async fn run(mut self) {
        tracing::info!("matchmaker started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                MatchmakerCommand::Enroll {
                    player,
                    outbox,
                    reply,
                } => {
                    self.drop_withdrawn();
                    if self.queue.contains(player) {
                        tracing::debug!(%player, "duplicate enrollment refused");
                        let _ = reply.send(Err(MatchmakingError::AlreadyWaiting(player)));
                        continue;
                    }
                    let queued = self.queue.push(player, Waiting { outbox, reply });
                    debug_assert!(queued.is_ok());
                    tracing::debug!(%player, waiting = self.queue.len(), "player enrolled");
                    self.pair_waiting().await;
                }
                MatchmakerCommand::Inspect { reply } => {
                    self.drop_withdrawn();
                    let _ = reply.send(self.queue.players());
                }
                MatchmakerCommand::Shutdown => {
                    tracing::info!("matchmaker shutting down");
                    break;
                }
            }
        }

        tracing::info!("matchmaker stopped");
    }

    /// Forgets enrollments whose caller went away.
    fn drop_withdrawn(&mut self) {
        self.queue.retain(|player, waiting| {
            let live = !waiting.reply.is_closed();
            if !live {
                tracing::debug!(%player, "enrollment withdrawn");
            }
            live
        });
    }

    async fn pair_waiting(&mut self) {
        while let Some(((a, first), (b, second))) = self.take_live_pair() {
            match self.store.create_session(a, b).await {
                Ok(session) => {
                    tracing::info!(game_id = %session.id, %a, %b, "players paired");
                    let start = ServerMessage::GameStart {
                        game_id: session.id.clone(),
                        word_length: session.word_length,
                    };
                    let _ = first.outbox.send(start.clone());
                    let _ = second.outbox.send(start);

                    // A caller that withdrew while the session was being
                    // created leaves its partner with an absent opponent,
                    // same as a disconnect mid-game.
                    if first.reply.is_closed() || second.reply.is_closed() {
                        tracing::debug!(game_id = %session.id, "enrollment withdrawn during pairing");
                    }
                    let _ = first.reply.send(Ok(Pairing {
                        game_id: session.id.clone(),
                        word_length: session.word_length,
                        opponent: b,
                        opponent_outbox: second.outbox.clone(),
                    }));
                    let _ = second.reply.send(Ok(Pairing {
                        game_id: session.id,
                        word_length: session.word_length,
                        opponent: a,
                        opponent_outbox: first.outbox,
                    }));
                }
                Err(e) => {
                    tracing::error!(%a, %b, error = %e, "failed to create session");
                    let err = MatchmakingError::SessionFailed(e.to_string());
                    let _ = first.reply.send(Err(err.clone()));
                    let _ = second.reply.send(Err(err));
                }
            }
        }
    }

    /// Pops the two oldest enrollments that are still being awaited.
    ///
    /// A caller can withdraw at any time, so the pair is checked again
    /// after it leaves the queue. A live entry whose partner is gone goes
    /// back to the front of the line.
    fn take_live_pair(&mut self) -> Option<((PlayerId, Waiting), (PlayerId, Waiting))> {
        loop {
            let (first, second) = self.queue.pop_pair()?;
            let survivor = match (first.1.reply.is_closed(), second.1.reply.is_closed()) {
                (false, false) => return Some((first, second)),
                (false, true) => Some(first),
                (true, false) => Some(second),
                (true, true) => None,
            };
            tracing::debug!("enrollment withdrawn before pairing");
            if let Some((player, waiting)) = survivor {
                let requeued = self.queue.push_front(player, waiting);
                debug_assert!(requeued.is_ok());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordduel_session::SessionConfig;
    use wordduel_words::Dictionary;

    type Reply = oneshot::Receiver<Result<Pairing, MatchmakingError>>;

    fn matchmaker() -> (Matchmaker, Arc<SessionStore>) {
        let dictionary = Dictionary::new(["CRANE"], ["SLATE"]).unwrap();
        let store = Arc::new(SessionStore::new(
            Arc::new(dictionary),
            SessionConfig::default(),
        ));
        let (_tx, rx) = mpsc::channel(1);
        let actor = Matchmaker {
            store: Arc::clone(&store),
            queue: WaitQueue::new(),
            receiver: rx,
        };
        (actor, store)
    }

    /// Queues `player` and returns the receiving end of its reply.
    fn enqueue(actor: &mut Matchmaker, player: u64) -> Reply {
        let (outbox, _inbox) = mpsc::unbounded_channel();
        let (reply, reply_rx) = oneshot::channel();
        actor
            .queue
            .push(PlayerId(player), Waiting { outbox, reply })
            .unwrap();
        reply_rx
    }

    #[test]
    fn test_take_live_pair_withdrawn_partner_requeues_survivor() {
        let (mut actor, _store) = matchmaker();
        drop(enqueue(&mut actor, 1));
        let _second = enqueue(&mut actor, 2);

        assert!(actor.take_live_pair().is_none());
        assert_eq!(actor.queue.players(), vec![PlayerId(2)]);
    }

    #[test]
    fn test_take_live_pair_skips_withdrawn_in_middle() {
        let (mut actor, _store) = matchmaker();
        let _first = enqueue(&mut actor, 1);
        drop(enqueue(&mut actor, 2));
        let _third = enqueue(&mut actor, 3);

        let ((a, _), (b, _)) = actor.take_live_pair().unwrap();
        assert_eq!((a, b), (PlayerId(1), PlayerId(3)));
        assert!(actor.queue.is_empty());
    }

    #[tokio::test]
    async fn test_pair_waiting_withdrawn_entry_gets_no_session() {
        let (mut actor, store) = matchmaker();
        drop(enqueue(&mut actor, 1));
        let second = enqueue(&mut actor, 2);
        let third = enqueue(&mut actor, 3);

        actor.pair_waiting().await;

        let pairing = second.await.unwrap().unwrap();
        assert_eq!(pairing.opponent, PlayerId(3));
        assert_eq!(third.await.unwrap().unwrap().opponent, PlayerId(2));
        assert_eq!(store.live_count().await, 1);
        let session = store.get_session(&pairing.game_id).await.unwrap();
        assert_eq!(session.participants, [PlayerId(2), PlayerId(3)]);
    }
}
