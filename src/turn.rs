//! Turn sequencing: modifier expiry, reveal, movement, the area action,
//! the attack phase, and the special-ability hooks around them.
//!
//! The turn controller owns ordering only; what an area or card does comes
//! from content through the [`AreaAction`](crate::board::AreaAction) and
//! [`CardAction`](crate::card::CardAction) seams, and the surrounding game
//! drives win checking through [`GameDirector`]. Win conditions are checked
//! at three checkpoints (after the start-of-turn phase, after the area
//! action, after combat); a met condition ends the turn immediately.

use crate::card::{CardColor, CardKind, EquipmentAbility};
use crate::combat::{self, CombatError};
use crate::dice::{self, DieRoller, RollKind};
use crate::game_state::{Deck, GameState};
use crate::ids::PlayerId;
use crate::interface::{DisplayEvent, Interface, Prompt};
use crate::player::PlayerState;
use std::fmt;
use tracing::debug;

/// Errors aborting a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    Combat(CombatError),
    /// A free-choice move named an area the board doesn't know.
    UnknownArea(String),
    /// A movement roll landed outside every area's domain.
    NoAreaForRoll(u8),
}

impl From<CombatError> for TurnError {
    fn from(err: CombatError) -> Self {
        TurnError::Combat(err)
    }
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnError::Combat(err) => err.fmt(f),
            TurnError::UnknownArea(name) => write!(f, "unknown area {name:?}"),
            TurnError::NoAreaForRoll(roll) => {
                write!(f, "no area accepts the movement roll {roll}")
            }
        }
    }
}

impl std::error::Error for TurnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TurnError::Combat(err) => Some(err),
            _ => None,
        }
    }
}

/// The surrounding game's authority over turn flow: win checking at the
/// checkpoints and the current round number (drives AI auto-reveal odds).
pub trait GameDirector {
    /// Checked at the turn checkpoints; true ends the turn immediately.
    fn win_conditions_met(&mut self, game: &GameState) -> bool;

    /// Current round number, starting at 1.
    fn round(&self, game: &GameState) -> u32;
}

enum Hook {
    Reveal,
    TurnStart,
    TurnEnd,
}

/// Dispatches a special-ability hook if the player's special is active.
fn run_special(
    game: &mut GameState,
    interface: &mut dyn Interface,
    roller: &mut dyn DieRoller,
    player: PlayerId,
    hook: Hook,
) {
    let active = game
        .player(player)
        .is_some_and(|p| p.is_alive() && p.special_active);
    if !active {
        return;
    }
    // Clone the Arc out so the hook can take the game mutably.
    let Some(character) = game.player(player).and_then(|p| p.character.clone()) else {
        return;
    };
    let Some(special) = character.special.as_ref() else {
        return;
    };
    match hook {
        Hook::Reveal => special.on_reveal(game, interface, roller, player),
        Hook::TurnStart => special.turn_start(game, interface, roller, player),
        Hook::TurnEnd => special.turn_end(game, interface, roller, player),
    }
}

/// True when the turn must end here: a win condition is met or the active
/// player died mid-turn (a hook or area action can kill them).
fn checkpoint(game: &GameState, director: &mut dyn GameDirector, player: PlayerId) -> bool {
    director.win_conditions_met(game) || !game.player(player).is_some_and(|p| p.is_alive())
}

fn announce_reveal(
    game: &GameState,
    interface: &mut dyn Interface,
    player: PlayerId,
) -> Result<(), TurnError> {
    let p = game
        .player(player)
        .ok_or(CombatError::UnknownPlayer(player))?;
    let ch = p
        .character
        .as_ref()
        .ok_or(CombatError::MissingCharacter(player))?;
    interface.show(
        DisplayEvent::Reveal {
            player: p.dump_public(&game.board),
        },
        None,
    );
    interface.tell(&format!(
        "{} revealed themselves as {}, a {} with {} hp!",
        p.name, ch.name, ch.allegiance, ch.max_damage
    ));
    interface.tell(&format!("{} wins if: {}", ch.name, ch.win_condition_text));
    interface.update(game);
    Ok(())
}

/// Voluntary reveal. A no-op for players already revealed or dead.
pub fn reveal(
    game: &mut GameState,
    interface: &mut dyn Interface,
    roller: &mut dyn DieRoller,
    player: PlayerId,
) -> Result<(), TurnError> {
    if !game.transition_state(player, PlayerState::Revealed) {
        return Ok(());
    }
    if let Some(p) = game.player_mut(player) {
        p.special_active = true;
    }
    announce_reveal(game, interface, player)?;
    run_special(game, interface, roller, player, Hook::Reveal);
    Ok(())
}

/// Runs one full turn for `player`. Dead players' turns are skipped.
pub fn take_turn(
    game: &mut GameState,
    interface: &mut dyn Interface,
    roller: &mut dyn DieRoller,
    director: &mut dyn GameDirector,
    player: PlayerId,
) -> Result<(), TurnError> {
    let name = {
        let p = game
            .player(player)
            .ok_or(CombatError::UnknownPlayer(player))?;
        if !p.is_alive() {
            return Ok(());
        }
        p.name.clone()
    };
    interface.tell(&format!("It's {name}'s turn!"));
    debug!(player = %name, "turn start");

    // Last turn's modifiers expire now; the shield gets its own narration.
    {
        let p = game
            .player_mut(player)
            .ok_or(CombatError::UnknownPlayer(player))?;
        let shield_expired = p.modifiers.guardian_angel;
        p.modifiers.reset();
        if shield_expired {
            interface.tell(&format!("{name}'s guardian angel expired."));
        }
    }

    // AI auto-reveal odds grow with the round.
    let probability = f64::from(director.round(game)) / 20.0;
    if game.try_auto_reveal(player, roller, probability) {
        announce_reveal(game, interface, player)?;
        run_special(game, interface, roller, player, Hook::Reveal);
    }
    run_special(game, interface, roller, player, Hook::TurnStart);
    if checkpoint(game, director, player) {
        return Ok(());
    }

    // Movement.
    let outcome = dice::roll(
        interface,
        roller,
        game.player(player)
            .ok_or(CombatError::UnknownPlayer(player))?,
        RollKind::Area,
    );
    let mut result = outcome.result;
    let roll_twice = game
        .player(player)
        .and_then(|p| p.ability_card(EquipmentAbility::RollTwice))
        .map(|c| c.title.clone());
    if let Some(title) = roll_twice {
        interface.tell(&format!("{name}'s {title} lets them roll again and pick!"));
        let second = dice::roll(
            interface,
            roller,
            game.player(player)
                .ok_or(CombatError::UnknownPlayer(player))?,
            RollKind::Area,
        );
        let prompt = Prompt::select(vec![
            format!("Keep the {result}"),
            format!("Keep the {}", second.result),
        ]);
        if interface.ask(player, &prompt) == 1 {
            result = second.result;
        }
    }
    let destination = if result == 7 {
        let names = game.board.area_names();
        let idx = interface.ask(player, &Prompt::select(names.clone()));
        let chosen = &names[idx];
        game.board
            .area_by_name(chosen)
            .map(|a| a.id)
            .ok_or_else(|| TurnError::UnknownArea(chosen.clone()))?
    } else {
        game.board
            .area_for_roll(result)
            .map(|a| a.id)
            .ok_or(TurnError::NoAreaForRoll(result))?
    };
    game.player_mut(player)
        .ok_or(CombatError::UnknownPlayer(player))?
        .location = Some(destination);
    let (area_name, desc, action) = {
        let area = game
            .board
            .area(destination)
            .ok_or(CombatError::UnknownArea(destination))?;
        (area.name.clone(), area.desc.clone(), area.action.clone())
    };
    interface.tell(&format!("{name} moved to {area_name}."));
    interface.update(game);

    // The area's action, at the player's option.
    let prompt = Prompt::yes_no(vec![desc, "Decline".to_string()]);
    if interface.ask(player, &prompt) == 0 {
        action.perform(game, interface, roller, player);
    } else {
        interface.tell(&format!("{name} declined to take the area's action."));
    }
    if checkpoint(game, director, player) {
        return Ok(());
    }

    combat::attack_phase(game, interface, roller, player)?;
    if checkpoint(game, director, player) {
        return Ok(());
    }

    run_special(game, interface, roller, player, Hook::TurnEnd);
    debug!(player = %name, "turn end");
    Ok(())
}

/// Draws one card for `player` from `deck` and resolves it: equipment joins
/// the arsenal after an acknowledgement, single-use cards run their action
/// and go to the discard pile. An empty deck is a narrated no-op.
///
/// Green draws are secret: observers hear only that a green card was drawn;
/// the card itself is shown privately to the drawing player.
pub fn draw_card(
    game: &mut GameState,
    interface: &mut dyn Interface,
    roller: &mut dyn DieRoller,
    player: PlayerId,
    deck: &mut dyn Deck,
) -> Result<(), TurnError> {
    let name = game
        .player(player)
        .ok_or(CombatError::UnknownPlayer(player))?
        .name
        .clone();
    let Some(card) = deck.draw() else {
        interface.tell("The deck is empty.");
        return Ok(());
    };
    debug!(player = %name, card = %card.title, "draw");

    if card.color == CardColor::Green {
        interface.tell(&format!("{name} drew a hermit card."));
        interface.show(DisplayEvent::Draw { card: card.dump() }, Some(player));
    } else {
        interface.tell(&format!("{name} drew {}!", card.title));
        interface.show(DisplayEvent::Draw { card: card.dump() }, None);
    }

    if card.is_equipment() {
        interface.ask(player, &Prompt::confirm(format!("Take the {}", card.title)));
        game.player_mut(player)
            .ok_or(CombatError::UnknownPlayer(player))?
            .equipment
            .push(card);
        interface.update(game);
    } else {
        if let CardKind::SingleUse { action } = &card.kind {
            action.perform(game, interface, roller, player, &card);
        }
        game.discards.discard(card);
        interface.update(game);
    }
    Ok(())
}
