//! Umbra - self-playing demo game.
//!
//! Builds a small six-player Hunter-versus-Shadow match on the standard
//! board and lets random decisions drive it to a win, printing the
//! narration. Pass a number to fix the seed:
//!
//! ```text
//! umbra [SEED]
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::env;
use std::error::Error;
use std::sync::Arc;
use umbra::{
    combat, turn, Allegiance, Area, AreaAction, Board, Card, CardColor, Character, Deck,
    DieRoller, DisplayEvent, GameDirector, GameState, Interface, Player, PlayerId, Prompt,
    RandomRoller, Zone, ZoneId,
};
use umbra::ids::AreaId;

/// Prints all narration and answers every query at random.
struct DemoInterface {
    rng: StdRng,
}

impl Interface for DemoInterface {
    fn ask(&mut self, _player: PlayerId, prompt: &Prompt) -> usize {
        if prompt.options.len() <= 1 {
            0
        } else {
            self.rng.random_range(0..prompt.options.len())
        }
    }

    fn tell(&mut self, message: &str) {
        println!("  {message}");
    }

    fn show(&mut self, event: DisplayEvent, _target: Option<PlayerId>) {
        if let DisplayEvent::Reveal { player } | DisplayEvent::Die { player } = event {
            println!("  >> {} ({:?})", player.name, player.state);
        }
    }

    fn update(&mut self, _game: &GameState) {}
}

struct DemoDirector {
    round: u32,
    winners: Vec<String>,
}

impl GameDirector for DemoDirector {
    fn win_conditions_met(&mut self, game: &GameState) -> bool {
        self.winners = game
            .living_players()
            .filter(|p| {
                p.character
                    .as_ref()
                    .is_some_and(|c| c.win.satisfied(game, p.id))
            })
            .map(|p| p.name.clone())
            .collect();
        !self.winners.is_empty()
    }

    fn round(&self, _game: &GameState) -> u32 {
        self.round
    }
}

fn no_shadows_alive(game: &GameState, _player: PlayerId) -> bool {
    !game
        .living_players()
        .any(|p| faction(p) == Some(Allegiance::Shadow))
}

fn no_hunters_alive(game: &GameState, _player: PlayerId) -> bool {
    !game
        .living_players()
        .any(|p| faction(p) == Some(Allegiance::Hunter))
}

fn faction(player: &Player) -> Option<Allegiance> {
    player.character.as_ref().map(|c| c.allegiance)
}

fn roster() -> Vec<Arc<Character>> {
    let hunter = |name: &str, max| {
        Arc::new(Character::new(
            name,
            Allegiance::Hunter,
            max,
            "All the Shadows are dead",
            Box::new(no_shadows_alive),
        ))
    };
    let shadow = |name: &str, max| {
        Arc::new(Character::new(
            name,
            Allegiance::Shadow,
            max,
            "All the Hunters are dead",
            Box::new(no_hunters_alive),
        ))
    };
    vec![
        hunter("Franklin", 12),
        hunter("George", 14),
        hunter("Ellen", 10),
        shadow("Vampire", 13),
        shadow("Werewolf", 14),
        shadow("Valkyrie", 13),
    ]
}

fn action(f: impl Fn(&mut GameState, &mut dyn Interface, &mut dyn DieRoller, PlayerId) + 'static)
-> Arc<dyn AreaAction> {
    Arc::new(f)
}

fn board() -> Board {
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
                action(|game, interface, _, player| {
                    if let Some(p) = game.player_mut(player) {
                        p.modifiers.guardian_angel = true;
                        let name = p.name.clone();
                        interface.tell(&format!("A guardian angel watches over {name}."));
                    }
                }),
            ),
            Area::new(
                AreaId::from_index(1),
                "Underworld Gate",
                "Steel yourself to counterattack",
                vec![4, 5],
                z0,
                action(|game, interface, _, player| {
                    if let Some(p) = game.player_mut(player) {
                        p.modifiers.counterattack = true;
                        let name = p.name.clone();
                        interface.tell(&format!("{name} is ready to strike back."));
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
                    let _ = combat::move_damage(game, interface, player, -1, player);
                }),
            ),
            Area::new(
                AreaId::from_index(3),
                "Cemetery",
                "Disturb the graves: take 1 damage",
                vec![8],
                z1,
                action(|game, interface, _, player| {
                    let _ = combat::move_damage(game, interface, player, 1, player);
                }),
            ),
            Area::new(
                AreaId::from_index(4),
                "Weird Woods",
                "Heal a player 1 or hit them for 2",
                vec![9],
                z2,
                action(|game, interface, _, player| {
                    let Some(chosen) = combat::choose_player(game, interface, player) else {
                        return;
                    };
                    let heal = interface.ask(
                        player,
                        &Prompt::yes_no(vec!["Heal 1".to_string(), "Hit for 2".to_string()]),
                    ) == 0;
                    let delta = if heal { -1 } else { 2 };
                    let _ = combat::move_damage(game, interface, chosen, delta, player);
                }),
            ),
            Area::new(
                AreaId::from_index(5),
                "Erstwhile Altar",
                "Steal an equipment card",
                vec![10],
                z2,
                action(|game, interface, _, player| {
                    let holders: Vec<PlayerId> = game
                        .living_players()
                        .filter(|p| p.id != player && !p.equipment.is_empty())
                        .map(|p| p.id)
                        .collect();
                    let Some(owner) = holders.first().copied() else {
                        interface.tell("The altar finds nothing to take.");
                        return;
                    };
                    if let Ok(title) = combat::choose_equipment(game, interface, player, owner) {
                        let _ = combat::give_equipment(game, interface, owner, player, &title);
                    }
                }),
            ),
        ],
    )
}

struct VecDeck(Vec<Card>);

impl Deck for VecDeck {
    fn draw(&mut self) -> Option<Card> {
        self.0.pop()
    }
}

fn starting_deck() -> VecDeck {
    VecDeck(vec![
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
            vec![umbra::EquipmentAbility::HitAllInRange],
        ),
        Card::equipment(
            "Mystic Compass",
            CardColor::White,
            None,
            vec![umbra::EquipmentAbility::RollTwice],
        ),
        Card::equipment(
            "Handgun",
            CardColor::Black,
            None,
            vec![umbra::EquipmentAbility::ReverseRange],
        ),
        Card::equipment(
            "Spear of Longinus",
            CardColor::White,
            None,
            vec![umbra::EquipmentAbility::HunterBonus],
        ),
    ])
}

fn main() -> Result<(), Box<dyn Error>> {
    let seed = env::args()
        .nth(1)
        .map(|s| s.parse::<u64>())
        .transpose()?
        .unwrap_or_else(rand::random::<u64>);
    println!("umbra demo, seed {seed}");

    let names = ["Alice", "Bob", "Carol", "Dave", "Eve", "Frank"];
    let colors = ["red", "blue", "green", "yellow", "purple", "orange"];
    let mut players: Vec<Player> = names
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(i, (name, color))| Player::new(PlayerId::from_index(i as u8), *name, color, true))
        .collect();
    for (player, character) in players.iter_mut().zip(roster()) {
        player.set_character(character);
    }

    let mut game = GameState::new(players, board());
    let mut interface = DemoInterface {
        rng: StdRng::seed_from_u64(seed),
    };
    let mut roller = RandomRoller::seeded(seed.wrapping_add(1));

    let mut deck = starting_deck();
    let ids: Vec<PlayerId> = game.players().iter().map(|p| p.id).collect();
    for id in &ids {
        turn::draw_card(&mut game, &mut interface, &mut roller, *id, &mut deck)?;
    }

    let mut director = DemoDirector {
        round: 0,
        winners: Vec::new(),
    };
    'game: for round in 1..=50 {
        director.round = round;
        println!("--- round {round} ---");
        for id in &ids {
            turn::take_turn(&mut game, &mut interface, &mut roller, &mut director, *id)?;
            if !director.winners.is_empty() {
                break 'game;
            }
        }
    }

    if director.winners.is_empty() {
        println!("No winner after 50 rounds.");
    } else {
        println!("Winners: {}", director.winners.join(", "));
    }
    Ok(())
}
