//! Board topology: zones, areas, and the area-action seam.
//!
//! The engine never defines the board's content. It consumes a [`Board`]
//! built by the caller: movement resolves a roll to the unique area whose
//! numeric domain contains it, attacks are scoped by zone, and accepting an
//! area's action delegates to the supplied [`AreaAction`].

use crate::dice::DieRoller;
use crate::game_state::GameState;
use crate::ids::{AreaId, PlayerId, ZoneId};
use crate::interface::Interface;
use crate::snapshot::AreaSnapshot;
use std::fmt;
use std::sync::Arc;

/// Coarse location granularity; attacks are scoped by zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
}

impl Zone {
    pub fn new(id: ZoneId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Entry point for an area's action, supplied by board content.
pub trait AreaAction {
    fn perform(
        &self,
        game: &mut GameState,
        interface: &mut dyn Interface,
        roller: &mut dyn DieRoller,
        player: PlayerId,
    );
}

impl<F> AreaAction for F
where
    F: Fn(&mut GameState, &mut dyn Interface, &mut dyn DieRoller, PlayerId),
{
    fn perform(
        &self,
        game: &mut GameState,
        interface: &mut dyn Interface,
        roller: &mut dyn DieRoller,
        player: PlayerId,
    ) {
        self(game, interface, roller, player)
    }
}

/// Fine location granularity; movement targets an area.
pub struct Area {
    pub id: AreaId,
    pub name: String,
    /// Offered to the player when deciding whether to take the action.
    pub desc: String,
    /// The movement-roll values that land here. Domains are disjoint across
    /// the board and never contain 7 (7 is the free-choice roll).
    pub domain: Vec<u8>,
    pub zone: ZoneId,
    pub action: Arc<dyn AreaAction>,
}

impl Area {
    pub fn new(
        id: AreaId,
        name: impl Into<String>,
        desc: impl Into<String>,
        domain: Vec<u8>,
        zone: ZoneId,
        action: Arc<dyn AreaAction>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            desc: desc.into(),
            domain,
            zone,
            action,
        }
    }

    pub fn dump(&self, board: &Board) -> AreaSnapshot {
        AreaSnapshot {
            name: self.name.clone(),
            zone: board
                .zone(self.zone)
                .map(|z| z.name.clone())
                .unwrap_or_default(),
        }
    }
}

impl fmt::Debug for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Area")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("domain", &self.domain)
            .field("zone", &self.zone)
            .finish()
    }
}

/// The full board: zones and the areas inside them.
#[derive(Debug)]
pub struct Board {
    zones: Vec<Zone>,
    areas: Vec<Area>,
}

impl Board {
    /// Builds a board from caller-supplied topology. Area and zone ids must
    /// match their positions in the vectors.
    pub fn new(zones: Vec<Zone>, areas: Vec<Area>) -> Self {
        debug_assert!(zones.iter().enumerate().all(|(i, z)| z.id.index() == i));
        debug_assert!(areas.iter().enumerate().all(|(i, a)| a.id.index() == i));
        Self { zones, areas }
    }

    pub fn area(&self, id: AreaId) -> Option<&Area> {
        self.areas.get(id.index())
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(id.index())
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn area_by_name(&self, name: &str) -> Option<&Area> {
        self.areas.iter().find(|a| a.name == name)
    }

    /// The unique area whose domain contains the movement roll.
    pub fn area_for_roll(&self, roll: u8) -> Option<&Area> {
        self.areas.iter().find(|a| a.domain.contains(&roll))
    }

    pub fn area_names(&self) -> Vec<String> {
        self.areas.iter().map(|a| a.name.clone()).collect()
    }

    /// Zone of the given area, if the area exists.
    pub fn zone_of(&self, area: AreaId) -> Option<ZoneId> {
        self.area(area).map(|a| a.zone)
    }
}
