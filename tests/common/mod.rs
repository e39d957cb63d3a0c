//! Shared content for the integration tests: a standard board, a small
//! character roster, starting equipment, and a round-driving director.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::sync::Arc;
use umbra::ids::AreaId;
use umbra::{
    Allegiance, Area, AreaAction, Board, Card, CardColor, Character, Deck, DieRoller,
    EquipmentAbility, GameDirector, GameState, Interface, Player, PlayerId, Prompt, Zone, ZoneId,
};

pub struct VecDeck(pub Vec<Card>);

impl Deck for VecDeck {
    fn draw(&mut self) -> Option<Card> {
        self.0.pop()
    }
}

fn action(
    f: impl Fn(&mut GameState, &mut dyn Interface, &mut dyn DieRoller, PlayerId) + 'static,
) -> Arc<dyn AreaAction> {
    Arc::new(f)
}

pub fn standard_board() -> Board {
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
                "Gain a guardian angel shield",
                vec![2, 3],
                z0,
                action(|game, _, _, player| {
                    if let Some(p) = game.player_mut(player) {
                        p.modifiers.guardian_angel = true;
                    }
                }),
            ),
            Area::new(
                AreaId::from_index(1),
                "Underworld Gate",
                "Steel yourself to counterattack",
                vec![4, 5],
                z0,
                action(|game, _, _, player| {
                    if let Some(p) = game.player_mut(player) {
                        p.modifiers.counterattack = true;
                    }
                }),
            ),
            Area::new(
                AreaId::from_index(2),
                "Church",
                "Heal 1 damage",
                vec![6],
                z1,
                action(|game, interface, _, player| {
                    let _ = umbra::combat::move_damage(game, interface, player, -1, player);
                }),
            ),
            Area::new(
                AreaId::from_index(3),
                "Cemetery",
                "Disturb the graves: take 1 damage",
                vec![8],
                z1,
                action(|game, interface, _, player| {
                    let _ = umbra::combat::move_damage(game, interface, player, 1, player);
                }),
            ),
            Area::new(
                AreaId::from_index(4),
                "Weird Woods",
                "Heal a player 1 or hit them for 2",
                vec![9],
                z2,
                action(|game, interface, _, player| {
                    let Some(chosen) = umbra::combat::choose_player(game, interface, player)
                    else {
                        return;
                    };
                    let heal = interface.ask(
                        player,
                        &Prompt::yes_no(vec!["Heal 1".to_string(), "Hit for 2".to_string()]),
                    ) == 0;
                    let delta = if heal { -1 } else { 2 };
                    let _ = umbra::combat::move_damage(game, interface, chosen, delta, player);
                }),
            ),
            Area::new(
                AreaId::from_index(5),
                "Erstwhile Altar",
                "Steal an equipment card",
                vec![10],
                z2,
                action(|game, interface, _, player| {
                    let owner = game
                        .living_players()
                        .filter(|p| p.id != player && !p.equipment.is_empty())
                        .map(|p| p.id)
                        .next();
                    let Some(owner) = owner else { return };
                    if let Ok(title) =
                        umbra::combat::choose_equipment(game, interface, player, owner)
                    {
                        let _ = umbra::combat::give_equipment(game, interface, owner, player, &title);
                    }
                }),
            ),
        ],
    )
}

fn no_shadows_alive(game: &GameState, _player: PlayerId) -> bool {
    !game.living_players().any(|p| {
        p.character
            .as_ref()
            .is_some_and(|c| c.allegiance == Allegiance::Shadow)
    })
}

fn no_hunters_alive(game: &GameState, _player: PlayerId) -> bool {
    !game.living_players().any(|p| {
        p.character
            .as_ref()
            .is_some_and(|c| c.allegiance == Allegiance::Hunter)
    })
}

pub fn hunter(name: &str, max_damage: u32) -> Arc<Character> {
    Arc::new(Character::new(
        name,
        Allegiance::Hunter,
        max_damage,
        "All the Shadows are dead",
        Box::new(no_shadows_alive),
    ))
}

pub fn shadow(name: &str, max_damage: u32) -> Arc<Character> {
    Arc::new(Character::new(
        name,
        Allegiance::Shadow,
        max_damage,
        "All the Hunters are dead",
        Box::new(no_hunters_alive),
    ))
}

pub fn neutral(name: &str, max_damage: u32) -> Arc<Character> {
    Arc::new(Character::new(
        name,
        Allegiance::Neutral,
        max_damage,
        "At least three players are dead",
        Box::new(|game: &GameState, _: PlayerId| {
            game.players().iter().filter(|p| !p.is_alive()).count() >= 3
        }),
    ))
}

/// A game with `n` players (up to six) on the standard board. Characters
/// alternate hunter, shadow, neutral; nobody starts placed.
pub fn standard_game(n: usize, ai: bool) -> GameState {
    let names = ["Alice", "Bob", "Carol", "Dave", "Eve", "Frank"];
    let colors = ["red", "blue", "green", "yellow", "purple", "orange"];
    let roster = [
        hunter("Franklin", 12),
        shadow("Vampire", 4),
        neutral("Allie", 8),
        hunter("Ellen", 10),
        shadow("Werewolf", 14),
        neutral("Bob the Drifter", 9),
    ];
    let players = (0..n)
        .map(|i| {
            let mut p = Player::new(PlayerId::from_index(i as u8), names[i], colors[i], ai);
            p.set_character(roster[i].clone());
            p
        })
        .collect();
    GameState::new(players, standard_board())
}

pub fn starting_cards() -> Vec<Card> {
    vec![
        Card::equipment(
            "Talisman",
            CardColor::White,
            Some(Box::new(|atk: bool, _: bool, amount: i32| {
                if atk { amount } else { amount - 1 }
            })),
            vec![],
        ),
        Card::equipment(
            "Butcher Knife",
            CardColor::Black,
            Some(Box::new(|atk: bool, ok: bool, amount: i32| {
                if atk && ok { amount + 1 } else { amount }
            })),
            vec![],
        ),
        Card::equipment(
            "Machine Gun",
            CardColor::Black,
            None,
            vec![EquipmentAbility::HitAllInRange],
        ),
        Card::equipment(
            "Mystic Compass",
            CardColor::White,
            None,
            vec![EquipmentAbility::RollTwice],
        ),
        Card::equipment(
            "Handgun",
            CardColor::Black,
            None,
            vec![EquipmentAbility::ReverseRange],
        ),
        Card::equipment(
            "Spear of Longinus",
            CardColor::White,
            None,
            vec![EquipmentAbility::HunterBonus],
        ),
    ]
}

/// Director that holds the round number and records which living players'
/// win conditions are met at each checkpoint.
pub struct RoundDirector {
    pub round: u32,
    pub winners: Vec<PlayerId>,
}

impl RoundDirector {
    pub fn new() -> Self {
        Self {
            round: 1,
            winners: Vec::new(),
        }
    }
}

impl GameDirector for RoundDirector {
    fn win_conditions_met(&mut self, game: &GameState) -> bool {
        self.winners = game
            .living_players()
            .filter(|p| {
                p.character
                    .as_ref()
                    .is_some_and(|c| c.win.satisfied(game, p.id))
            })
            .map(|p| p.id)
            .collect();
        !self.winners.is_empty()
    }

    fn round(&self, _game: &GameState) -> u32 {
        self.round
    }
}
