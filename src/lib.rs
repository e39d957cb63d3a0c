//! Umbra - rules engine for a hidden-role deduction board game.
//!
//! The engine owns turn and combat resolution for a game where each player
//! secretly is a Hunter, a Shadow, or a Neutral: movement by dice, attacks
//! scoped by board zone, an ordered equipment pipeline over damage, reveals,
//! and death with equipment transfer.
//!
//! Content is supplied by the caller: characters ([`Character`]), the board
//! ([`Board`]), and cards ([`Card`]) arrive as data with behavior attached
//! through the [`AreaAction`], [`CardAction`], [`SpecialAbility`], and
//! [`WinCondition`] seams. Player input and display go through the
//! [`Interface`] seam, randomness through [`DieRoller`], and the surrounding
//! game drives win checking through [`GameDirector`].

pub mod board;
pub mod card;
pub mod character;
pub mod combat;
pub mod dice;
pub mod game_state;
pub mod ids;
pub mod interface;
pub mod modifier;
pub mod player;
pub mod snapshot;
pub mod turn;

#[cfg(test)]
mod tests;

pub use board::{Area, AreaAction, Board, Zone};
pub use card::{Card, CardAction, CardColor, CardKind, DamageTransform, EquipmentAbility};
pub use character::{Allegiance, Character, SpecialAbility, WinCondition};
pub use combat::{CombatError, Counter};
pub use dice::{DiceError, DieRoller, FixedRoller, RandomRoller, RollKind, RollOutcome};
pub use game_state::{Deck, DiscardPiles, GameState};
pub use ids::{AreaId, CardId, PlayerId, ZoneId};
pub use interface::{
    AutoInterface, DisplayEvent, Interface, Prompt, PromptKind, RandomInterface,
    ScriptedInterface,
};
pub use modifier::{DamageDealtHook, Modifiers};
pub use player::{Player, PlayerState};
pub use snapshot::{AreaSnapshot, CardSnapshot, CharacterSnapshot, PlayerSnapshot};
pub use turn::{GameDirector, TurnError};
