use serde::Serialize;
use std::sync::atomic::{AtomicU32, Ordering};

/// Global counter for auto-incrementing card IDs (starts at 1, 0 is reserved).
static CARD_ID_COUNTER: AtomicU32 = AtomicU32::new(1);

/// Player identifier, index-based for efficiency.
///
/// Players are stored in turn order inside `GameState`; the id doubles as the
/// index into that vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PlayerId(pub u8);

/// Unique card instance identifier, monotonically increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CardId(pub u32);

/// Area identifier, index-based into the board's area list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AreaId(pub u8);

/// Zone identifier, index-based into the board's zone list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ZoneId(pub u8);

impl PlayerId {
    /// Create a player ID from a specific index.
    pub fn from_index(index: u8) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl CardId {
    /// Create a new card ID with auto-incrementing counter.
    pub fn new() -> Self {
        Self(CARD_ID_COUNTER.fetch_add(1, Ordering::SeqCst))
    }

    /// Create a card ID from a specific value (for when you need explicit control).
    pub fn from_raw(id: u32) -> Self {
        Self(id)
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl AreaId {
    pub fn from_index(index: u8) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ZoneId {
    pub fn from_index(index: u8) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}
