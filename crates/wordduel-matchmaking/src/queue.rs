//! The waiting line.

use std::collections::VecDeque;

use wordduel_protocol::PlayerId;

use crate::MatchmakingError;

/// First-in, first-out queue of waiting players.
///
/// `E` is whatever the owner keeps per enrollment (the matchmaker stores
/// the player's outbox and reply channel). A player can only be queued
/// once.
#[derive(Debug)]
pub struct WaitQueue<E> {
    entries: VecDeque<(PlayerId, E)>,
}

impl<E> Default for WaitQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> WaitQueue<E> {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Appends `player` at the back.
    ///
    /// # Errors
    /// [`MatchmakingError::AlreadyWaiting`] if the player is queued.
    pub fn push(
        &mut self,
        player: PlayerId,
        entry: E,
    ) -> Result<(), MatchmakingError> {
        if self.contains(player) {
            return Err(MatchmakingError::AlreadyWaiting(player));
        }
        self.entries.push_back((player, entry));
        Ok(())
    }

    /// Puts `player` back at the front, ahead of everyone else. Used for
    /// an entry popped by [`pop_pair`](Self::pop_pair) whose partner
    /// turned out to be gone.
    ///
    /// # Errors
    /// [`MatchmakingError::AlreadyWaiting`] if the player is queued.
    pub fn push_front(
        &mut self,
        player: PlayerId,
        entry: E,
    ) -> Result<(), MatchmakingError> {
        if self.contains(player) {
            return Err(MatchmakingError::AlreadyWaiting(player));
        }
        self.entries.push_front((player, entry));
        Ok(())
    }

    /// Removes and returns the two oldest entries, oldest first, or
    /// nothing if fewer than two are waiting.
    pub fn pop_pair(&mut self) -> Option<((PlayerId, E), (PlayerId, E))> {
        if self.entries.len() < 2 {
            return None;
        }
        let first = self.entries.pop_front()?;
        let second = self.entries.pop_front()?;
        Some((first, second))
    }

    /// Keeps only the entries for which `keep` returns `true`, preserving
    /// order.
    pub fn retain(&mut self, mut keep: impl FnMut(PlayerId, &E) -> bool) {
        self.entries.retain(|(player, entry)| keep(*player, entry));
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.entries.iter().any(|(p, _)| *p == player)
    }

    /// Waiting players, oldest first.
    pub fn players(&self) -> Vec<PlayerId> {
        self.entries.iter().map(|(p, _)| *p).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
