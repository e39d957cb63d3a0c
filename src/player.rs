//! Player state.
//!
//! A player is created at setup with `Hidden` state and no equipment, gets a
//! character exactly once, and is never destroyed: death is a state
//! transition, and a dead player keeps its identity for win-condition and
//! ownership bookkeeping.

use crate::board::Board;
use crate::card::{Card, EquipmentAbility};
use crate::character::Character;
use crate::ids::{AreaId, PlayerId};
use crate::modifier::Modifiers;
use crate::snapshot::PlayerSnapshot;
use serde::Serialize;
use std::sync::Arc;

/// Visibility/life state. `Hidden` and `Revealed` are both alive;
/// `Dead` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    Hidden,
    Revealed,
    Dead,
}

#[derive(Debug)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Pawn color shown on the board.
    pub color: String,
    /// Transport/session identifier. Included verbatim in `dump()` and
    /// suppressed from `dump_public()`.
    pub socket: Option<String>,
    pub is_ai: bool,
    pub state: PlayerState,
    /// Assigned once at setup, then fixed for the game.
    pub character: Option<Arc<Character>>,
    /// Acquisition order; relevant for discard routing and "all" effects.
    pub equipment: Vec<Card>,
    pub damage: u32,
    pub location: Option<AreaId>,
    pub modifiers: Modifiers,
    /// True only while revealed with the character's passive engaged.
    pub special_active: bool,
}

impl Player {
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        color: impl Into<String>,
        is_ai: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            socket: None,
            is_ai,
            state: PlayerState::Hidden,
            character: None,
            equipment: Vec::new(),
            damage: 0,
            location: None,
            modifiers: Modifiers::default(),
            special_active: false,
        }
    }

    pub fn with_socket(mut self, socket: impl Into<String>) -> Self {
        self.socket = Some(socket.into());
        self
    }

    /// Assigns the character. Fixed for the game once set.
    pub fn set_character(&mut self, character: Arc<Character>) {
        debug_assert!(self.character.is_none());
        self.character = Some(character);
    }

    pub fn is_alive(&self) -> bool {
        self.state != PlayerState::Dead
    }

    /// True if any held equipment carries the given marker ability.
    pub fn has_ability(&self, ability: EquipmentAbility) -> bool {
        self.equipment.iter().any(|c| c.has_ability(ability))
    }

    /// The first held equipment card carrying the given marker ability.
    pub fn ability_card(&self, ability: EquipmentAbility) -> Option<&Card> {
        self.equipment.iter().find(|c| c.has_ability(ability))
    }

    pub fn equipment_titles(&self) -> Vec<String> {
        self.equipment.iter().map(|c| c.title.clone()).collect()
    }

    /// Full serializable snapshot. The socket is transport-private: callers
    /// broadcasting to other players use [`Player::dump_public`] instead.
    pub fn dump(&self, board: &Board) -> PlayerSnapshot {
        PlayerSnapshot {
            name: self.name.clone(),
            socket: self.socket.clone(),
            color: self.color.clone(),
            state: self.state,
            is_ai: self.is_ai,
            equipment: self.equipment.iter().map(Card::dump).collect(),
            damage: self.damage,
            character: self.character.as_ref().map(|c| c.dump()),
            location: self
                .location
                .and_then(|id| board.area(id))
                .map(|a| a.dump(board)),
            special_active: self.special_active,
        }
    }

    /// Snapshot with the transport-private socket suppressed.
    pub fn dump_public(&self, board: &Board) -> PlayerSnapshot {
        PlayerSnapshot {
            socket: None,
            ..self.dump(board)
        }
    }
}
