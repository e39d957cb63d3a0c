//! Shared fixtures for the unit tests: a small board with two zones worth
//! of areas and a game whose players carry simple characters.

use crate::board::{Area, AreaAction, Board, Zone};
use crate::card::{Card, CardColor};
use crate::character::{Allegiance, Character};
use crate::game_state::GameState;
use crate::ids::{AreaId, PlayerId, ZoneId};
use crate::player::Player;
use std::sync::Arc;

/// An area in the first zone.
pub const FIRST_AREA: AreaId = AreaId(0);
/// An area in a different zone than [`FIRST_AREA`].
pub const SECOND_ZONE_AREA: AreaId = AreaId(2);

pub fn no_op_action() -> Arc<dyn AreaAction> {
    Arc::new(
        |_: &mut GameState,
         _: &mut dyn crate::interface::Interface,
         _: &mut dyn crate::dice::DieRoller,
         _: PlayerId| {},
    )
}

pub fn fixture_board() -> Board {
    let z0 = ZoneId::from_index(0);
    let z1 = ZoneId::from_index(1);
    let z2 = ZoneId::from_index(2);
    Board::new(
        vec![
            Zone::new(z0, "Woods"),
            Zone::new(z1, "Village"),
            Zone::new(z2, "Outskirts"),
        ],
        vec![
            Area::new(
                AreaId::from_index(0),
                "Hermit's Cabin",
                "Draw a green card",
                vec![2, 3],
                z0,
                no_op_action(),
            ),
            Area::new(
                AreaId::from_index(1),
                "Underworld Gate",
                "Draw a card of your choice",
                vec![4, 5],
                z0,
                no_op_action(),
            ),
            Area::new(
                AreaId::from_index(2),
                "Church",
                "Heal 1 damage",
                vec![6],
                z1,
                no_op_action(),
            ),
            Area::new(
                AreaId::from_index(3),
                "Cemetery",
                "Draw a black card",
                vec![8],
                z1,
                no_op_action(),
            ),
            Area::new(
                AreaId::from_index(4),
                "Weird Woods",
                "Heal or harm a player",
                vec![9],
                z2,
                no_op_action(),
            ),
            Area::new(
                AreaId::from_index(5),
                "Erstwhile Altar",
                "Steal equipment",
                vec![10],
                z2,
                no_op_action(),
            ),
        ],
    )
}

pub fn hunter(max_damage: u32) -> Arc<Character> {
    Arc::new(Character::new(
        "Franklin",
        Allegiance::Hunter,
        max_damage,
        "All the Shadows are dead",
        Box::new(|_: &GameState, _: PlayerId| false),
    ))
}

pub fn shadow(max_damage: u32) -> Arc<Character> {
    Arc::new(Character::new(
        "Vampire",
        Allegiance::Shadow,
        max_damage,
        "All the Hunters are dead",
        Box::new(|_: &GameState, _: PlayerId| false),
    ))
}

pub fn neutral(max_damage: u32) -> Arc<Character> {
    Arc::new(Character::new(
        "Allie",
        Allegiance::Neutral,
        max_damage,
        "Be alive when the game ends",
        Box::new(|_: &GameState, _: PlayerId| false),
    ))
}

/// A game with `n` human players on the fixture board, characters cycling
/// hunter(10), shadow(4), neutral(8). Nobody starts placed.
pub fn fixture_game(n: usize) -> GameState {
    let names = ["Alice", "Bob", "Carol", "Dave", "Eve", "Frank"];
    let colors = ["red", "blue", "green", "yellow", "purple", "orange"];
    let players = (0..n)
        .map(|i| {
            let mut p = Player::new(
                PlayerId::from_index(i as u8),
                names[i % names.len()],
                colors[i % colors.len()],
                false,
            );
            p.set_character(match i % 3 {
                0 => hunter(10),
                1 => shadow(4),
                _ => neutral(8),
            });
            p
        })
        .collect();
    GameState::new(players, fixture_board())
}

pub fn place(game: &mut GameState, player: PlayerId, area: AreaId) {
    if let Some(p) = game.player_mut(player) {
        p.location = Some(area);
    }
}

/// Black equipment card with the given damage transform.
pub fn equipment<F>(title: &str, transform: F) -> Card
where
    F: Fn(bool, bool, i32) -> i32 + 'static,
{
    Card::equipment(title, CardColor::Black, Some(Box::new(transform)), vec![])
}
