//! Per-player rule-override modifiers.
//!
//! The original open string-keyed dictionary is an enumerated set of typed
//! fields here, preserving the absent-equals-inactive defaulting: a fresh or
//! reset [`Modifiers`] has every override off and the attack roll at its
//! canonical kind. Modifiers reset at the start of the owning player's turn
//! except for ones explicitly time-boxed elsewhere (the guardian-angel
//! shield expires with narration before the reset).

use crate::dice::{DieRoller, RollKind};
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::interface::Interface;
use std::fmt;
use std::sync::Arc;

/// Callback invoked after an attack that actually dealt damage, with the
/// attacker as argument. Used for specials that trigger only on a landed hit.
pub trait DamageDealtHook {
    fn on_damage_dealt(
        &self,
        game: &mut GameState,
        interface: &mut dyn Interface,
        roller: &mut dyn DieRoller,
        attacker: PlayerId,
    );
}

impl<F> DamageDealtHook for F
where
    F: Fn(&mut GameState, &mut dyn Interface, &mut dyn DieRoller, PlayerId),
{
    fn on_damage_dealt(
        &self,
        game: &mut GameState,
        interface: &mut dyn Interface,
        roller: &mut dyn DieRoller,
        attacker: PlayerId,
    ) {
        self(game, interface, roller, attacker)
    }
}

/// The modifier set attached to one player. All fields are total: reading an
/// unset modifier yields its inactive default, never an error.
#[derive(Clone, Default)]
pub struct Modifiers {
    /// One-turn shield: fully negates the next incoming damage resolution.
    pub guardian_angel: bool,
    /// The player may counterattack after defending.
    pub counterattack: bool,
    /// Which roll kind this player's attacks use. Default `Attack`.
    pub attack_roll: RollKind,
    /// Attacker-side: may steal one equipment card instead of dealing 2+.
    pub steal_for_damage: bool,
    /// Attacker-side: takes all equipment on a kill, like `LootAll` gear.
    pub steal_all_on_kill: bool,
    /// Invoked after a successful attack by this player.
    pub damage_dealt: Option<Arc<dyn DamageDealtHook>>,
}

impl Modifiers {
    /// Restores the canonical defaults: attack roll back to `Attack`,
    /// everything else inactive.
    pub fn reset(&mut self) {
        *self = Modifiers::default();
    }
}

impl fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modifiers")
            .field("guardian_angel", &self.guardian_angel)
            .field("counterattack", &self.counterattack)
            .field("attack_roll", &self.attack_roll)
            .field("steal_for_damage", &self.steal_for_damage)
            .field("steal_all_on_kill", &self.steal_all_on_kill)
            .field("damage_dealt", &self.damage_dealt.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_inactive() {
        let m = Modifiers::default();
        assert!(!m.guardian_angel);
        assert!(!m.counterattack);
        assert_eq!(m.attack_roll, RollKind::Attack);
        assert!(!m.steal_for_damage);
        assert!(!m.steal_all_on_kill);
        assert!(m.damage_dealt.is_none());
    }

    #[test]
    fn reset_restores_canonical_defaults() {
        let mut m = Modifiers {
            guardian_angel: true,
            counterattack: true,
            attack_roll: RollKind::Four,
            steal_for_damage: true,
            steal_all_on_kill: true,
            damage_dealt: Some(Arc::new(
                |_: &mut GameState, _: &mut dyn Interface, _: &mut dyn DieRoller, _: PlayerId| {},
            )),
        };
        m.reset();
        assert!(!m.guardian_angel);
        assert_eq!(m.attack_roll, RollKind::Attack);
        assert!(m.damage_dealt.is_none());
    }
}
