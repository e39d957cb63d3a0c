//! Character templates.
//!
//! A character is an immutable template assigned once at setup and shared by
//! reference afterwards. Character *content* (the roster, win predicates,
//! special abilities) is supplied by the surrounding game; the engine only
//! invokes the declared hooks.

use crate::dice::DieRoller;
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::interface::Interface;
use crate::snapshot::CharacterSnapshot;
use serde::Serialize;
use std::fmt;

/// A character's faction, determining win conditions and some equipment
/// interactions (the Hunter damage bonus).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Allegiance {
    Hunter,
    Shadow,
    Neutral,
}

impl fmt::Display for Allegiance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Allegiance::Hunter => "Hunter",
            Allegiance::Shadow => "Shadow",
            Allegiance::Neutral => "Neutral",
        })
    }
}

/// Win-condition predicate for one character.
pub trait WinCondition {
    fn satisfied(&self, game: &GameState, player: PlayerId) -> bool;
}

impl<F> WinCondition for F
where
    F: Fn(&GameState, PlayerId) -> bool,
{
    fn satisfied(&self, game: &GameState, player: PlayerId) -> bool {
        self(game, player)
    }
}

/// Special-ability hooks, invoked only while the owning player's special is
/// active (revealed with the passive engaged). All hooks default to no-ops.
pub trait SpecialAbility {
    /// Invoked once, at the moment of reveal.
    fn on_reveal(
        &self,
        _game: &mut GameState,
        _interface: &mut dyn Interface,
        _roller: &mut dyn DieRoller,
        _player: PlayerId,
    ) {
    }

    /// Invoked at the start of the owning player's turn.
    fn turn_start(
        &self,
        _game: &mut GameState,
        _interface: &mut dyn Interface,
        _roller: &mut dyn DieRoller,
        _player: PlayerId,
    ) {
    }

    /// Invoked at the end of the owning player's turn.
    fn turn_end(
        &self,
        _game: &mut GameState,
        _interface: &mut dyn Interface,
        _roller: &mut dyn DieRoller,
        _player: PlayerId,
    ) {
    }
}

/// Immutable character template. Never mutated after assignment.
pub struct Character {
    pub name: String,
    pub allegiance: Allegiance,
    pub max_damage: u32,
    /// Human-readable win condition, narrated on reveal.
    pub win_condition_text: String,
    pub win: Box<dyn WinCondition>,
    pub special: Option<Box<dyn SpecialAbility>>,
}

impl Character {
    pub fn new(
        name: impl Into<String>,
        allegiance: Allegiance,
        max_damage: u32,
        win_condition_text: impl Into<String>,
        win: Box<dyn WinCondition>,
    ) -> Self {
        Self {
            name: name.into(),
            allegiance,
            max_damage,
            win_condition_text: win_condition_text.into(),
            win,
            special: None,
        }
    }

    pub fn with_special(mut self, special: Box<dyn SpecialAbility>) -> Self {
        self.special = Some(special);
        self
    }

    pub fn dump(&self) -> CharacterSnapshot {
        CharacterSnapshot {
            name: self.name.clone(),
            allegiance: self.allegiance,
            max_damage: self.max_damage,
            win_condition: self.win_condition_text.clone(),
        }
    }
}

impl fmt::Debug for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Character")
            .field("name", &self.name)
            .field("allegiance", &self.allegiance)
            .field("max_damage", &self.max_damage)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allegiance_display_names() {
        assert_eq!(Allegiance::Hunter.to_string(), "Hunter");
        assert_eq!(Allegiance::Shadow.to_string(), "Shadow");
        assert_eq!(Allegiance::Neutral.to_string(), "Neutral");
    }

    #[test]
    fn snapshot_carries_template_fields() {
        let ch = Character::new(
            "Franklin",
            Allegiance::Hunter,
            12,
            "All Shadows are dead",
            Box::new(|_: &GameState, _: PlayerId| false),
        );
        let snap = ch.dump();
        assert_eq!(snap.name, "Franklin");
        assert_eq!(snap.allegiance, Allegiance::Hunter);
        assert_eq!(snap.max_damage, 12);
    }
}
