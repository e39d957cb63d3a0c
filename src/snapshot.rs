//! Serializable snapshots produced by the `dump()` methods.
//!
//! These are the wire-facing views the display collaborator broadcasts.
//! The player snapshot's `socket` field is the one field considered
//! transport-private; `Player::dump_public` suppresses it.

use crate::card::CardColor;
use crate::character::Allegiance;
use crate::player::PlayerState;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSnapshot {
    pub title: String,
    pub color: CardColor,
    pub is_equipment: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterSnapshot {
    pub name: String,
    pub allegiance: Allegiance,
    pub max_damage: u32,
    pub win_condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaSnapshot {
    pub name: String,
    pub zone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socket: Option<String>,
    pub color: String,
    pub state: PlayerState,
    pub is_ai: bool,
    pub equipment: Vec<CardSnapshot>,
    pub damage: u32,
    pub character: Option<CharacterSnapshot>,
    pub location: Option<AreaSnapshot>,
    pub special_active: bool,
}
