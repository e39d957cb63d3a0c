//! Combat resolution: the equipment pipeline, attack and defense, damage
//! application, and death with equipment transfer.
//!
//! The damage math is split from its application so the preview entry points
//! ([`preview_attack`], [`preview_defend`]) can reuse it without touching
//! state or collaborators: [`outgoing_damage`] and [`incoming_damage`] are
//! pure, everything above them narrates and mutates.
//!
//! One attack action runs: target selection → dice roll → damage
//! computation → resolution on the target → optional counterattack. A
//! counterattack re-enters the same path with attacker and target swapped
//! and counterattacks forbidden (recursion depth is fixed at one).

use crate::card::{Card, EquipmentAbility};
use crate::character::Allegiance;
use crate::dice::{self, DieRoller, RollKind};
use crate::game_state::GameState;
use crate::ids::{AreaId, PlayerId};
use crate::interface::{DisplayEvent, Interface, Prompt};
use crate::player::{Player, PlayerState};
use std::fmt;
use tracing::debug;

/// Contract violations inside combat resolution. These indicate an upstream
/// sequencing bug and abort the turn; expected game-rule branches (declines,
/// empty target lists, zero damage) are ordinary control flow, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatError {
    /// A player id that must exist by invariant doesn't.
    UnknownPlayer(PlayerId),
    /// The player has no character assigned yet.
    MissingCharacter(PlayerId),
    /// A location points at an area the board doesn't know.
    UnknownArea(AreaId),
    /// An equipment choice was requested from a player holding nothing.
    NoEquipment(PlayerId),
    /// An equipment title that must exist by invariant doesn't.
    UnknownEquipment { player: PlayerId, title: String },
}

impl fmt::Display for CombatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatError::UnknownPlayer(id) => write!(f, "unknown player {id:?}"),
            CombatError::MissingCharacter(id) => {
                write!(f, "player {id:?} has no character assigned")
            }
            CombatError::UnknownArea(id) => write!(f, "unknown area {id:?}"),
            CombatError::NoEquipment(id) => {
                write!(f, "player {id:?} holds no equipment to choose from")
            }
            CombatError::UnknownEquipment { player, title } => {
                write!(f, "player {player:?} holds no equipment titled {title:?}")
            }
        }
    }
}

impl std::error::Error for CombatError {}

/// Whether a resolution may still offer a counterattack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Allowed,
    Forbidden,
}

/// Folds the equipment damage transforms over `amount`, in acquisition
/// order. Cards without a transform are no-ops; an empty list is the
/// identity.
pub fn apply_equipment(
    equipment: &[Card],
    is_attacking: bool,
    successful: bool,
    amount: i32,
) -> i32 {
    equipment
        .iter()
        .filter_map(Card::transform)
        .fold(amount, |acc, t| t.apply(is_attacking, successful, acc))
}

/// The bonus-damage equipment card, if the +2 Hunter bonus applies: a
/// non-zero roll by a revealed Hunter holding the gear.
fn hunter_bonus_card(player: &Player, successful: bool) -> Option<&Card> {
    if !successful || player.state != PlayerState::Revealed {
        return None;
    }
    let character = player.character.as_deref()?;
    if character.allegiance != Allegiance::Hunter {
        return None;
    }
    player.ability_card(EquipmentAbility::HunterBonus)
}

/// Pure outgoing-damage computation for one attack roll: the attacker's
/// equipment pipeline in attacking mode, then the +2 Hunter bonus.
pub fn outgoing_damage(attacker: &Player, roll: u8) -> Result<i32, CombatError> {
    if attacker.character.is_none() {
        return Err(CombatError::MissingCharacter(attacker.id));
    }
    let successful = roll != 0;
    let mut amount = apply_equipment(&attacker.equipment, true, successful, i32::from(roll));
    if hunter_bonus_card(attacker, successful).is_some() {
        amount += 2;
    }
    Ok(amount)
}

/// Pure incoming-damage computation on the target side: an active shield
/// negates everything; otherwise the target's pipeline in defending mode
/// (`successful` false, the target did not choose this roll).
pub fn incoming_damage(target: &Player, amount: i32) -> i32 {
    if target.modifiers.guardian_angel {
        return 0;
    }
    apply_equipment(&target.equipment, false, false, amount)
}

/// Non-mutating preview of a full attack: the damage the target would take
/// from this roll. Never touches state and never calls a collaborator, so
/// it is safe to evaluate repeatedly (AI decision evaluation).
pub fn preview_attack(
    game: &GameState,
    attacker: PlayerId,
    target: PlayerId,
    roll: u8,
) -> Result<i32, CombatError> {
    let attacker = game
        .player(attacker)
        .ok_or(CombatError::UnknownPlayer(attacker))?;
    let target = game
        .player(target)
        .ok_or(CombatError::UnknownPlayer(target))?;
    let amount = outgoing_damage(attacker, roll)?;
    Ok(preview_defend(target, amount))
}

/// Non-mutating preview of the defense side alone.
pub fn preview_defend(target: &Player, amount: i32) -> i32 {
    incoming_damage(target, amount).max(0)
}

/// The roll kind this player's attacks use: the four-sided-only equipment
/// override wins over the configured dice-kind modifier.
pub fn attack_roll_kind(player: &Player) -> RollKind {
    if player.has_ability(EquipmentAbility::FourSidedAttack) {
        RollKind::Four
    } else {
        player.modifiers.attack_roll
    }
}

/// Resolves one attack from `attacker` onto `target` with an already-rolled
/// result. Returns the damage dealt.
pub fn attack(
    game: &mut GameState,
    interface: &mut dyn Interface,
    roller: &mut dyn DieRoller,
    attacker: PlayerId,
    target: PlayerId,
    roll: u8,
    counter: Counter,
) -> Result<i32, CombatError> {
    {
        let p = game
            .player(attacker)
            .ok_or(CombatError::UnknownPlayer(attacker))?;
        if let Some(card) = hunter_bonus_card(p, roll != 0) {
            interface.tell(&format!("{} strikes with their {}!", p.name, card.title));
        }
    }
    let amount = outgoing_damage(
        game.player(attacker)
            .ok_or(CombatError::UnknownPlayer(attacker))?,
        roll,
    )?;

    let shielded = game
        .player(target)
        .ok_or(CombatError::UnknownPlayer(target))?
        .modifiers
        .guardian_angel;
    let dealt = defend(game, interface, target, attacker, amount)?;
    if shielded {
        // Shielded resolution ends here: no hook, no counterattack.
        return Ok(dealt);
    }

    if dealt > 0 {
        let hook = game
            .player(attacker)
            .and_then(|p| p.modifiers.damage_dealt.clone());
        if let Some(hook) = hook {
            hook.on_damage_dealt(game, interface, roller, attacker);
        }
    }

    if counter == Counter::Allowed {
        let offered = {
            let t = game
                .player(target)
                .ok_or(CombatError::UnknownPlayer(target))?;
            t.is_alive()
                && t.modifiers.counterattack
                && game.player(attacker).is_some_and(Player::is_alive)
        };
        if offered {
            let target_name = game
                .player(target)
                .ok_or(CombatError::UnknownPlayer(target))?
                .name
                .clone();
            let prompt = Prompt::yes_no(vec!["Counterattack!".to_string(), "Decline".to_string()]);
            if interface.ask(target, &prompt) == 0 {
                interface.tell(&format!("{target_name} counterattacks!"));
                let kind = attack_roll_kind(
                    game.player(target)
                        .ok_or(CombatError::UnknownPlayer(target))?,
                );
                let outcome = dice::roll(
                    interface,
                    roller,
                    game.player(target)
                        .ok_or(CombatError::UnknownPlayer(target))?,
                    kind,
                );
                let counter_dealt = attack(
                    game,
                    interface,
                    roller,
                    target,
                    attacker,
                    outcome.result,
                    Counter::Forbidden,
                )?;
                let attacker_name = game
                    .player(attacker)
                    .ok_or(CombatError::UnknownPlayer(attacker))?
                    .name
                    .clone();
                interface.tell(&format!(
                    "{target_name} hit {attacker_name} for {counter_dealt} damage!"
                ));
            } else {
                interface.tell(&format!("{target_name} declined to counterattack."));
            }
        }
    }

    Ok(dealt)
}

/// Resolves incoming damage on the target side and applies it. Returns the
/// damage dealt (0 under an active shield).
pub fn defend(
    game: &mut GameState,
    interface: &mut dyn Interface,
    target: PlayerId,
    attacker: PlayerId,
    amount: i32,
) -> Result<i32, CombatError> {
    let (dealt, shielded, name) = {
        let t = game
            .player(target)
            .ok_or(CombatError::UnknownPlayer(target))?;
        if t.modifiers.guardian_angel {
            (0, true, t.name.clone())
        } else {
            (incoming_damage(t, amount).max(0), false, t.name.clone())
        }
    };
    if shielded {
        interface.tell(&format!(
            "{name}'s guardian angel shielded them from damage!"
        ));
        return Ok(0);
    }
    move_damage(game, interface, target, dealt, attacker)?;
    interface.show(
        DisplayEvent::Hit {
            attacker,
            target,
            damage: dealt as u32,
        },
        None,
    );
    Ok(dealt)
}

/// Applies a damage delta (positive = damage taken, negative = healing),
/// clamped to `[0, max_damage]`, then runs the death check.
///
/// Steal-for-damage trade-off first: when the attacker carries the modifier,
/// the delta is at least 2, and the victim holds equipment, the attacker may
/// take one equipment card instead — the call ends with no damage applied.
pub fn move_damage(
    game: &mut GameState,
    interface: &mut dyn Interface,
    victim: PlayerId,
    delta: i32,
    attacker: PlayerId,
) -> Result<u32, CombatError> {
    if victim != attacker && delta >= 2 {
        let attacker_steals = game
            .player(attacker)
            .is_some_and(|p| p.modifiers.steal_for_damage);
        let victim_has_equipment = game.player(victim).is_some_and(|p| !p.equipment.is_empty());
        if attacker_steals && victim_has_equipment {
            let prompt = Prompt::select(vec![
                "Steal an equipment card".to_string(),
                format!("Deal {delta} damage"),
            ]);
            if interface.ask(attacker, &prompt) == 0 {
                let title = choose_equipment(game, interface, attacker, victim)?;
                give_equipment(game, interface, victim, attacker, &title)?;
                return Ok(game
                    .player(victim)
                    .ok_or(CombatError::UnknownPlayer(victim))?
                    .damage);
            }
        }
    }

    {
        let p = game
            .player_mut(victim)
            .ok_or(CombatError::UnknownPlayer(victim))?;
        let max = p
            .character
            .as_ref()
            .ok_or(CombatError::MissingCharacter(victim))?
            .max_damage;
        let new = (i64::from(p.damage) + i64::from(delta)).clamp(0, i64::from(max)) as u32;
        debug!(player = %p.name, from = p.damage, to = new, "damage moved");
        p.damage = new;
    }
    check_death(game, interface, victim, attacker)?;
    Ok(game
        .player(victim)
        .ok_or(CombatError::UnknownPlayer(victim))?
        .damage)
}

/// Runs `die` when damage has reached the maximum, then always signals a
/// state re-sync whether or not a death occurred.
pub fn check_death(
    game: &mut GameState,
    interface: &mut dyn Interface,
    victim: PlayerId,
    attacker: PlayerId,
) -> Result<(), CombatError> {
    let lethal = {
        let p = game
            .player(victim)
            .ok_or(CombatError::UnknownPlayer(victim))?;
        let max = p
            .character
            .as_ref()
            .ok_or(CombatError::MissingCharacter(victim))?
            .max_damage;
        p.is_alive() && p.damage >= max
    };
    if lethal {
        die(game, interface, victim, attacker)?;
    }
    interface.update(game);
    Ok(())
}

/// Kills the victim: flips state under the reveal/death lock, broadcasts the
/// death, routes equipment (killer loots, the rest goes to the color-keyed
/// discard piles), and clears the location. Dead is terminal; a second call
/// is a no-op.
pub fn die(
    game: &mut GameState,
    interface: &mut dyn Interface,
    victim: PlayerId,
    killer: PlayerId,
) -> Result<(), CombatError> {
    if !game.transition_state(victim, PlayerState::Dead) {
        return Ok(());
    }

    let (victim_name, allegiance, character_name) = {
        let p = game
            .player(victim)
            .ok_or(CombatError::UnknownPlayer(victim))?;
        let ch = p
            .character
            .as_ref()
            .ok_or(CombatError::MissingCharacter(victim))?;
        (p.name.clone(), ch.allegiance, ch.name.clone())
    };
    let killer_name = game
        .player(killer)
        .ok_or(CombatError::UnknownPlayer(killer))?
        .name
        .clone();
    let snapshot = game
        .player(victim)
        .ok_or(CombatError::UnknownPlayer(victim))?
        .dump_public(&game.board);
    interface.show(DisplayEvent::Die { player: snapshot }, None);
    interface.tell(&format!(
        "{victim_name} ({allegiance}: {character_name}) was killed by {killer_name}!"
    ));
    debug!(victim = %victim_name, killer = %killer_name, "death");

    let victim_has_equipment = game.player(victim).is_some_and(|p| !p.equipment.is_empty());
    if victim_has_equipment && victim != killer {
        let take_all = game
            .player(killer)
            .is_some_and(|p| p.has_ability(EquipmentAbility::LootAll) || p.modifiers.steal_all_on_kill);
        if take_all {
            let via = game
                .player(killer)
                .and_then(|p| p.ability_card(EquipmentAbility::LootAll))
                .map(|c| c.title.clone());
            match via {
                Some(title) => interface.tell(&format!(
                    "{killer_name}'s {title} let them steal all of {victim_name}'s equipment!"
                )),
                None => interface.tell(&format!(
                    "{killer_name} stole all of {victim_name}'s equipment!"
                )),
            }
            let taken = std::mem::take(
                &mut game
                    .player_mut(victim)
                    .ok_or(CombatError::UnknownPlayer(victim))?
                    .equipment,
            );
            game.player_mut(killer)
                .ok_or(CombatError::UnknownPlayer(killer))?
                .equipment
                .extend(taken);
            interface.update(game);
        } else {
            interface.ask(
                killer,
                &Prompt::confirm(format!("Take equipment from {victim_name}")),
            );
            let title = choose_equipment(game, interface, killer, victim)?;
            give_equipment(game, interface, victim, killer, &title)?;
        }
    }

    let rest = std::mem::take(
        &mut game
            .player_mut(victim)
            .ok_or(CombatError::UnknownPlayer(victim))?
            .equipment,
    );
    for card in rest {
        game.discards.discard(card);
    }
    game.player_mut(victim)
        .ok_or(CombatError::UnknownPlayer(victim))?
        .location = None;
    interface.update(game);
    Ok(())
}

/// Full attacker-side flow for the turn's attack phase: offer the attack,
/// select a target among players in range, roll, and resolve (fanning out
/// to every target in range under the `HitAllInRange` equipment).
pub fn attack_phase(
    game: &mut GameState,
    interface: &mut dyn Interface,
    roller: &mut dyn DieRoller,
    attacker: PlayerId,
) -> Result<(), CombatError> {
    let (name, zone, reverse, no_decline, hit_all) = {
        let p = game
            .player(attacker)
            .ok_or(CombatError::UnknownPlayer(attacker))?;
        let Some(location) = p.location else {
            return Ok(());
        };
        let zone = game
            .board
            .zone_of(location)
            .ok_or(CombatError::UnknownArea(location))?;
        (
            p.name.clone(),
            zone,
            p.has_ability(EquipmentAbility::ReverseRange),
            p.has_ability(EquipmentAbility::NoDecline),
            p.has_ability(EquipmentAbility::HitAllInRange),
        )
    };

    interface.tell(&format!("{name} is deciding to attack..."));
    let mut options = vec!["Attack other players!".to_string()];
    if !no_decline {
        options.push("Decline".to_string());
    }
    if interface.ask(attacker, &Prompt::yes_no(options)) == 1 {
        interface.tell(&format!("{name} declined to attack."));
        return Ok(());
    }

    if reverse {
        let title = game
            .player(attacker)
            .and_then(|p| p.ability_card(EquipmentAbility::ReverseRange))
            .map(|c| c.title.clone())
            .unwrap_or_default();
        interface.tell(&format!("{name}'s {title} reverses their attack range."));
    }
    let candidates: Vec<(PlayerId, String)> = game
        .players()
        .iter()
        .filter(|p| p.id != attacker && p.is_alive())
        .filter(|p| {
            p.location
                .and_then(|a| game.board.zone_of(a))
                .is_some_and(|z| if reverse { z != zone } else { z == zone })
        })
        .map(|p| (p.id, p.name.clone()))
        .collect();

    let mut options: Vec<String> = candidates.iter().map(|(_, n)| n.clone()).collect();
    if !no_decline || candidates.is_empty() {
        options.push("Decline".to_string());
    }
    let answer = interface.ask(attacker, &Prompt::select(options));
    if answer >= candidates.len() {
        interface.tell(&format!("{name} declined to attack."));
        return Ok(());
    }
    let (target, target_name) = candidates[answer].clone();
    interface.tell(&format!("{name} is attacking {target_name}!"));

    let kind = {
        let p = game
            .player(attacker)
            .ok_or(CombatError::UnknownPlayer(attacker))?;
        match p.ability_card(EquipmentAbility::FourSidedAttack) {
            Some(card) => {
                interface.tell(&format!(
                    "{name} rolls with the 4-sided die using the {}!",
                    card.title
                ));
                RollKind::Four
            }
            None => p.modifiers.attack_roll,
        }
    };
    let outcome = dice::roll(
        interface,
        roller,
        game.player(attacker)
            .ok_or(CombatError::UnknownPlayer(attacker))?,
        kind,
    );

    if hit_all {
        let title = game
            .player(attacker)
            .and_then(|p| p.ability_card(EquipmentAbility::HitAllInRange))
            .map(|c| c.title.clone())
            .unwrap_or_default();
        interface.tell(&format!(
            "{name}'s {title} hits everyone in their attack range!"
        ));
        for (t, t_name) in &candidates {
            let dealt = attack(
                game,
                interface,
                roller,
                attacker,
                *t,
                outcome.result,
                Counter::Allowed,
            )?;
            interface.tell(&format!("{name} hit {t_name} for {dealt} damage!"));
        }
    } else {
        let dealt = attack(
            game,
            interface,
            roller,
            attacker,
            target,
            outcome.result,
            Counter::Allowed,
        )?;
        interface.tell(&format!("{name} hit {target_name} for {dealt} damage!"));
    }
    Ok(())
}

/// Prompted selection of another living player. `None` when no candidate
/// exists (an expected branch, not an error).
pub fn choose_player(
    game: &GameState,
    interface: &mut dyn Interface,
    chooser: PlayerId,
) -> Option<PlayerId> {
    let name = game.player(chooser)?.name.clone();
    interface.tell(&format!("{name} is choosing a player..."));
    let candidates: Vec<(PlayerId, String)> = game
        .living_players()
        .filter(|p| p.id != chooser)
        .map(|p| (p.id, p.name.clone()))
        .collect();
    if candidates.is_empty() {
        return None;
    }
    let options: Vec<String> = candidates.iter().map(|(_, n)| n.clone()).collect();
    let idx = interface.ask(chooser, &Prompt::select(options));
    let (chosen, chosen_name) = candidates[idx].clone();
    interface.tell(&format!("{name} chose {chosen_name}!"));
    Some(chosen)
}

/// Prompted selection of one of `owner`'s equipment titles by `chooser`.
/// The owner must hold equipment (callers check; an empty arsenal here is
/// an upstream sequencing bug).
pub fn choose_equipment(
    game: &GameState,
    interface: &mut dyn Interface,
    chooser: PlayerId,
    owner: PlayerId,
) -> Result<String, CombatError> {
    let options = game
        .player(owner)
        .ok_or(CombatError::UnknownPlayer(owner))?
        .equipment_titles();
    if options.is_empty() {
        return Err(CombatError::NoEquipment(owner));
    }
    let idx = interface.ask(chooser, &Prompt::select(options.clone()));
    Ok(options[idx].clone())
}

/// Transfers the named equipment card from one player to another,
/// preserving acquisition order on the receiving side.
pub fn give_equipment(
    game: &mut GameState,
    interface: &mut dyn Interface,
    from: PlayerId,
    to: PlayerId,
    title: &str,
) -> Result<(), CombatError> {
    let idx = game
        .player(from)
        .ok_or(CombatError::UnknownPlayer(from))?
        .equipment
        .iter()
        .position(|c| c.title == title)
        .ok_or_else(|| CombatError::UnknownEquipment {
            player: from,
            title: title.to_string(),
        })?;
    let card = game
        .player_mut(from)
        .ok_or(CombatError::UnknownPlayer(from))?
        .equipment
        .remove(idx);
    let from_name = game
        .player(from)
        .ok_or(CombatError::UnknownPlayer(from))?
        .name
        .clone();
    let to_name = game
        .player(to)
        .ok_or(CombatError::UnknownPlayer(to))?
        .name
        .clone();
    game.player_mut(to)
        .ok_or(CombatError::UnknownPlayer(to))?
        .equipment
        .push(card);
    interface.tell(&format!("{from_name} forfeited their {title} to {to_name}!"));
    interface.update(game);
    Ok(())
}
