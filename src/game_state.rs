//! Central game state: players, board, and discard piles.
//!
//! One logical game progresses through turns sequentially. The only
//! concurrency hazard is AI auto-reveal racing an externally triggered death
//! for the same player's `state` field; `state_lock` is the narrow critical
//! section serializing those two writers. Everything else is single-writer
//! by construction (mutation only happens inside the active player's turn).

use crate::board::Board;
use crate::card::{Card, CardColor};
use crate::dice::DieRoller;
use crate::ids::{PlayerId, ZoneId};
use crate::player::{Player, PlayerState};
use std::sync::Mutex;
use tracing::debug;

/// Draw source for one card color. Deck content and reshuffling are
/// external; an empty supply yields `None` and the draw is a no-op.
pub trait Deck {
    fn draw(&mut self) -> Option<Card>;
}

/// Three independent discard piles keyed by card color.
#[derive(Debug, Default)]
pub struct DiscardPiles {
    black: Vec<Card>,
    white: Vec<Card>,
    green: Vec<Card>,
}

impl DiscardPiles {
    /// Routes a card onto the pile matching its color.
    pub fn discard(&mut self, card: Card) {
        match card.color {
            CardColor::Black => self.black.push(card),
            CardColor::White => self.white.push(card),
            CardColor::Green => self.green.push(card),
        }
    }

    pub fn pile(&self, color: CardColor) -> &[Card] {
        match color {
            CardColor::Black => &self.black,
            CardColor::White => &self.white,
            CardColor::Green => &self.green,
        }
    }
}

#[derive(Debug)]
pub struct GameState {
    players: Vec<Player>,
    pub board: Board,
    pub discards: DiscardPiles,
    /// Serializes the two writers of `Player::state`: AI auto-reveal and
    /// death. Scoped strictly around the read-modify-write of that field.
    state_lock: Mutex<()>,
}

impl GameState {
    /// Builds the game state. Player ids must match their positions in the
    /// vector (they double as indices).
    pub fn new(players: Vec<Player>, board: Board) -> Self {
        debug_assert!(players.iter().enumerate().all(|(i, p)| p.id.index() == i));
        Self {
            players,
            board,
            discards: DiscardPiles::default(),
            state_lock: Mutex::new(()),
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index())
    }

    /// All players that are not dead, in turn order.
    pub fn living_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive())
    }

    /// Living, located players in the given zone.
    pub fn players_in_zone(&self, zone: ZoneId) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.is_alive())
            .filter(|p| {
                p.location
                    .and_then(|a| self.board.zone_of(a))
                    .is_some_and(|z| z == zone)
            })
            .map(|p| p.id)
            .collect()
    }

    /// Flips a player's state under the reveal/death lock.
    ///
    /// Returns false without writing when the player is unknown, already
    /// dead (Dead is terminal), or already in the requested state.
    pub fn transition_state(&mut self, id: PlayerId, to: PlayerState) -> bool {
        let _guard = self
            .state_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let Some(player) = self.players.get_mut(id.index()) else {
            return false;
        };
        if player.state == PlayerState::Dead || player.state == to {
            return false;
        }
        debug!(player = %player.name, from = ?player.state, ?to, "state transition");
        player.state = to;
        true
    }

    /// AI auto-reveal: under the reveal/death lock, draws against
    /// `probability` and on success flips a hidden AI player to Revealed
    /// with the special ability active. The draw and the flip are atomic
    /// with respect to deaths.
    pub fn try_auto_reveal(
        &mut self,
        id: PlayerId,
        roller: &mut dyn DieRoller,
        probability: f64,
    ) -> bool {
        let _guard = self
            .state_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let Some(player) = self.players.get_mut(id.index()) else {
            return false;
        };
        if !player.is_ai || player.state != PlayerState::Hidden {
            return false;
        }
        if !roller.chance(probability) {
            return false;
        }
        debug!(player = %player.name, "auto-reveal");
        player.state = PlayerState::Revealed;
        player.special_active = true;
        true
    }
}
