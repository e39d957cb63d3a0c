//! Card and equipment definitions.
//!
//! Card *content* (the actual deck) lives outside the engine; this module
//! defines the shape the engine consumes: a title, a color for discard
//! routing and draw secrecy, and either an equipment profile (an optional
//! damage transform plus marker abilities the combat rules inspect) or a
//! single-shot action.

use crate::dice::DieRoller;
use crate::game_state::GameState;
use crate::ids::{CardId, PlayerId};
use crate::interface::Interface;
use crate::snapshot::CardSnapshot;
use serde::Serialize;
use std::fmt;

/// Card color, used for discard-pile routing and draw visibility.
/// Green draws are secret: shown privately to the drawing player only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardColor {
    Black,
    White,
    Green,
}

/// Marker abilities on equipment that the combat and turn rules inspect.
///
/// These replace the original title-string checks: content attaches the
/// abilities, the engine never matches on card names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentAbility {
    /// Roll for movement twice and pick either result.
    RollTwice,
    /// The holder cannot decline the attack phase (unless no targets exist).
    NoDecline,
    /// Attacks roll the four-sided die alone instead of the configured kind.
    FourSidedAttack,
    /// A single attack roll hits every target in range independently.
    HitAllInRange,
    /// Attack range is reversed: targets are players *outside* the zone.
    ReverseRange,
    /// +2 damage on a landed hit while a revealed Hunter.
    HunterBonus,
    /// Take all of a victim's equipment on a kill instead of choosing one.
    LootAll,
}

/// Equipment effect over a damage amount.
///
/// Applied in acquisition order by the equipment pipeline, for both outgoing
/// (`is_attacking`) and incoming damage. `successful` is true only for an
/// attacking roll that came up non-zero.
pub trait DamageTransform {
    fn apply(&self, is_attacking: bool, successful: bool, amount: i32) -> i32;
}

impl<F> DamageTransform for F
where
    F: Fn(bool, bool, i32) -> i32,
{
    fn apply(&self, is_attacking: bool, successful: bool, amount: i32) -> i32 {
        self(is_attacking, successful, amount)
    }
}

/// Single-shot effect of a non-equipment card, run when the card is drawn.
pub trait CardAction {
    fn perform(
        &self,
        game: &mut GameState,
        interface: &mut dyn Interface,
        roller: &mut dyn DieRoller,
        actor: PlayerId,
        card: &Card,
    );
}

impl<F> CardAction for F
where
    F: Fn(&mut GameState, &mut dyn Interface, &mut dyn DieRoller, PlayerId, &Card),
{
    fn perform(
        &self,
        game: &mut GameState,
        interface: &mut dyn Interface,
        roller: &mut dyn DieRoller,
        actor: PlayerId,
        card: &Card,
    ) {
        self(game, interface, roller, actor, card)
    }
}

/// What a card does: equipment kept in the arsenal, or a single-use action.
pub enum CardKind {
    Equipment {
        /// Damage transform composed by the equipment pipeline, if any.
        transform: Option<Box<dyn DamageTransform>>,
        /// Marker abilities the engine inspects.
        abilities: Vec<EquipmentAbility>,
    },
    SingleUse {
        action: Box<dyn CardAction>,
    },
}

/// One card instance. Ownership is by containment: the holder is whichever
/// player's equipment vector contains the card.
pub struct Card {
    pub id: CardId,
    pub title: String,
    pub color: CardColor,
    pub kind: CardKind,
}

impl Card {
    /// Creates an equipment card.
    pub fn equipment(
        title: impl Into<String>,
        color: CardColor,
        transform: Option<Box<dyn DamageTransform>>,
        abilities: Vec<EquipmentAbility>,
    ) -> Self {
        Self {
            id: CardId::new(),
            title: title.into(),
            color,
            kind: CardKind::Equipment {
                transform,
                abilities,
            },
        }
    }

    /// Creates a single-use card.
    pub fn single_use(
        title: impl Into<String>,
        color: CardColor,
        action: Box<dyn CardAction>,
    ) -> Self {
        Self {
            id: CardId::new(),
            title: title.into(),
            color,
            kind: CardKind::SingleUse { action },
        }
    }

    pub fn is_equipment(&self) -> bool {
        matches!(self.kind, CardKind::Equipment { .. })
    }

    /// The damage transform, if this is equipment that has one.
    pub fn transform(&self) -> Option<&dyn DamageTransform> {
        match &self.kind {
            CardKind::Equipment {
                transform: Some(t), ..
            } => Some(t.as_ref()),
            _ => None,
        }
    }

    pub fn has_ability(&self, ability: EquipmentAbility) -> bool {
        match &self.kind {
            CardKind::Equipment { abilities, .. } => abilities.contains(&ability),
            CardKind::SingleUse { .. } => false,
        }
    }

    pub fn dump(&self) -> CardSnapshot {
        CardSnapshot {
            title: self.title.clone(),
            color: self.color,
            is_equipment: self.is_equipment(),
        }
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            CardKind::Equipment { .. } => "equipment",
            CardKind::SingleUse { .. } => "single-use",
        };
        f.debug_struct("Card")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("color", &self.color)
            .field("kind", &kind)
            .finish()
    }
}
