//! Dice rolling for movement and combat.
//!
//! Every roll draws one four-sided and one six-sided die; the [`RollKind`]
//! decides how the two draws combine into a result:
//! - `Area`: sum of both dice (a 7 means "free choice of area" downstream)
//! - `Attack`: absolute difference of the two dice
//! - `Four`/`Six`: the named die alone (the other is reported as 0)
//!
//! The random source sits behind the [`DieRoller`] trait so tests and AI
//! previews can script exact faces.

use crate::interface::{DisplayEvent, Interface, Prompt};
use crate::player::Player;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// Errors raised by the dice service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiceError {
    /// A roll kind string did not name one of the four known kinds.
    /// This is a programming-contract violation, not a player error.
    InvalidRollKind(String),
}

impl fmt::Display for DiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiceError::InvalidRollKind(kind) => write!(f, "invalid roll kind: {kind:?}"),
        }
    }
}

impl std::error::Error for DiceError {}

/// How the two die draws combine into a roll result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RollKind {
    /// Sum of both dice, used for movement.
    Area,
    /// Absolute difference of the two dice, used for damage.
    #[default]
    Attack,
    /// The six-sided die alone.
    Six,
    /// The four-sided die alone.
    Four,
}

impl FromStr for RollKind {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "area" => Ok(RollKind::Area),
            "attack" => Ok(RollKind::Attack),
            "six" | "6" => Ok(RollKind::Six),
            "four" | "4" => Ok(RollKind::Four),
            other => Err(DiceError::InvalidRollKind(other.to_string())),
        }
    }
}

/// The raw draws and derived result of one roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollOutcome {
    /// The four-sided die face (always drawn, even when unused).
    pub four: u8,
    /// The six-sided die face (always drawn, even when unused).
    pub six: u8,
    /// The derived result for the requested kind.
    pub result: u8,
}

/// Random source for die draws and probability checks.
pub trait DieRoller {
    /// Uniform draw in 1..=4.
    fn d4(&mut self) -> u8;
    /// Uniform draw in 1..=6.
    fn d6(&mut self) -> u8;
    /// Bernoulli draw with probability `p` (clamped to [0, 1]).
    fn chance(&mut self, p: f64) -> bool;
}

/// Production roller backed by a [`StdRng`].
#[derive(Debug, Clone)]
pub struct RandomRoller {
    rng: StdRng,
}

impl RandomRoller {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic roller for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomRoller {
    fn default() -> Self {
        Self::new()
    }
}

impl DieRoller for RandomRoller {
    fn d4(&mut self) -> u8 {
        self.rng.random_range(1..=4)
    }

    fn d6(&mut self) -> u8 {
        self.rng.random_range(1..=6)
    }

    fn chance(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            false
        } else if p >= 1.0 {
            true
        } else {
            self.rng.random_bool(p)
        }
    }
}

/// Scripted roller that replays queued faces, for tests and rigged demos.
///
/// Exhausted queues fall back to 1 (d4/d6) and `false` (chance).
#[derive(Debug, Clone, Default)]
pub struct FixedRoller {
    d4: VecDeque<u8>,
    d6: VecDeque<u8>,
    chances: VecDeque<bool>,
}

impl FixedRoller {
    pub fn new(
        d4: impl IntoIterator<Item = u8>,
        d6: impl IntoIterator<Item = u8>,
    ) -> Self {
        Self {
            d4: d4.into_iter().collect(),
            d6: d6.into_iter().collect(),
            chances: VecDeque::new(),
        }
    }

    pub fn with_chances(mut self, chances: impl IntoIterator<Item = bool>) -> Self {
        self.chances = chances.into_iter().collect();
        self
    }
}

impl DieRoller for FixedRoller {
    fn d4(&mut self) -> u8 {
        self.d4.pop_front().unwrap_or(1)
    }

    fn d6(&mut self) -> u8 {
        self.d6.pop_front().unwrap_or(1)
    }

    fn chance(&mut self, _p: f64) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }
}

/// Rolls both dice for `player` and derives the result for `kind`.
///
/// Side effects: a confirmation prompt to the rolling player, a display
/// broadcast of both raw faces (the unused die reported as 0 for single-die
/// kinds), and a narrated text event describing the roll.
pub fn roll(
    interface: &mut dyn Interface,
    roller: &mut dyn DieRoller,
    player: &Player,
    kind: RollKind,
) -> RollOutcome {
    let four = roller.d4();
    let six = roller.d6();

    let (ask_label, shown_four, shown_six, message, result) = match kind {
        RollKind::Area => (
            "Roll the dice!",
            four,
            six,
            format!("{} rolled {} + {} = {}!", player.name, four, six, four + six),
            four + six,
        ),
        RollKind::Attack => (
            "Roll for damage!",
            four,
            six,
            format!(
                "{} rolled a {} - {} = {}!",
                player.name,
                four.max(six),
                four.min(six),
                four.abs_diff(six)
            ),
            four.abs_diff(six),
        ),
        RollKind::Six => (
            "Roll the 6-sided die!",
            0,
            six,
            format!("{} rolled a {}!", player.name, six),
            six,
        ),
        RollKind::Four => (
            "Roll the 4-sided die!",
            four,
            0,
            format!("{} rolled a {}!", player.name, four),
            four,
        ),
    };

    interface.ask(player.id, &Prompt::confirm(ask_label));
    interface.show(
        DisplayEvent::Roll {
            four: shown_four,
            six: shown_six,
        },
        None,
    );
    interface.tell(&message);

    RollOutcome { four, six, result }
}
