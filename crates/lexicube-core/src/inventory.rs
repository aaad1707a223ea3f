//! Player tile racks and the check that a move only uses tiles the player
//! actually holds.
//!
//! This module contains:
//! - [`InventoryOracle`], the read/consume contract the engine relies on
//! - [`check_inventory`], the read-only availability check
//! - [`DrawSequence`], the source of letters for new tiles
//! - [`Inventory`], an in-memory oracle keeping one rack per player

use crate::board::PlayerId;
use crate::config::{is_allowed, ALLOWED_CHARACTERS};
use crate::error::{PlacementError, Result};
use crate::tile::{SubmittedTile, TileRef};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Letter distribution of a standard tile bag, blanks excluded
const TILE_BAG: &str = "AAAAAAAAABBCCDDDDEEEEEEEEEEEEFFGGGHHIIIIIIIIIJKLLLLMMNNNNNNOOOOOOOOPPQRRRRRRSSSSTTTTTTUUUUVVWWXYYZ";

/// A tile in a player's rack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RackTile {
    pub id: u64,
    pub letter: char,
}

impl RackTile {
    /// Reference a client uses to submit this tile
    pub fn reference(&self) -> String {
        TileRef {
            id: self.id,
            letter: self.letter,
        }
        .to_reference()
    }
}

/// Source of truth for which tiles a player may play
pub trait InventoryOracle {
    /// Tiles currently available to `player`
    fn available(&self, player: PlayerId) -> Result<Vec<RackTile>>;

    /// Remove tiles from `player`'s rack after a successful move.
    fn consume(&mut self, player: PlayerId, ids: &[u64]) -> Result<()>;
}

/// Check that every tile of a move is in `player`'s rack.
///
/// `letters` holds the validated letter of each tile, in the same order.
/// Returns the parsed reference of every tile.
pub fn check_inventory(
    oracle: &dyn InventoryOracle,
    player: PlayerId,
    tiles: &[SubmittedTile],
    letters: &[char],
) -> Result<Vec<TileRef>> {
    let available = oracle.available(player)?;
    let mut used = HashSet::new();
    let mut refs = Vec::with_capacity(tiles.len());

    for (tile, &letter) in tiles.iter().zip(letters) {
        let parsed = TileRef::parse(&tile.reference, letter)?;
        let in_rack = available
            .iter()
            .any(|t| t.id == parsed.id && t.letter == parsed.letter);

        // a rack tile can only be played once per move
        if !in_rack || !used.insert(parsed.id) {
            return Err(PlacementError::NotAvailable {
                reference: tile.reference.clone(),
            });
        }
        refs.push(parsed);
    }

    Ok(refs)
}

/// Ordered supply of letters for newly drawn tiles.
///
/// The cursor only moves forward; once the letters run out the sequence wraps.
/// A sequence always holds at least one letter, deserialized ones included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredDrawSequence")]
pub struct DrawSequence {
    letters: Vec<char>,
    cursor: usize,
}

#[derive(Deserialize)]
struct StoredDrawSequence {
    letters: Vec<char>,
    cursor: usize,
}

impl TryFrom<StoredDrawSequence> for DrawSequence {
    type Error = String;

    fn try_from(stored: StoredDrawSequence) -> std::result::Result<Self, Self::Error> {
        if stored.letters.is_empty() {
            return Err("draw sequence has no letters".to_string());
        }
        if let Some(bad) = stored.letters.iter().find(|&&c| !is_allowed(c)) {
            return Err(format!("draw sequence contains {:?}", bad));
        }
        Ok(Self {
            letters: stored.letters,
            cursor: stored.cursor,
        })
    }
}

impl DrawSequence {
    /// Repeat `pattern` forever. Characters that are not allowed on tiles are
    /// dropped; an empty pattern falls back to the alphabet.
    pub fn cycling(pattern: &str) -> Self {
        let mut letters: Vec<char> = pattern.chars().filter(|&c| is_allowed(c)).collect();
        if letters.is_empty() {
            letters = ALLOWED_CHARACTERS.chars().collect();
        }
        Self { letters, cursor: 0 }
    }

    /// A shuffled standard tile bag
    pub fn shuffled_bag<R: Rng>(rng: &mut R) -> Self {
        let mut letters: Vec<char> = TILE_BAG.chars().collect();
        letters.shuffle(rng);
        Self { letters, cursor: 0 }
    }

    /// Continue an existing sequence from `cursor`.
    pub fn with_cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn next_letter(&mut self) -> char {
        let letter = self.letters[self.cursor % self.letters.len()];
        self.cursor += 1;
        letter
    }
}

/// In-memory racks for every player of one game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    racks: HashMap<PlayerId, Vec<RackTile>>,
    next_id: u64,
    draw: DrawSequence,
}

impl Inventory {
    pub fn new(draw: DrawSequence) -> Self {
        Self {
            racks: HashMap::new(),
            next_id: 1,
            draw,
        }
    }

    /// Current rack of `player` (empty for unknown players)
    pub fn rack(&self, player: PlayerId) -> &[RackTile] {
        self.racks.get(&player).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Draw tiles until `player` holds `size` of them.
    ///
    /// Returns the newly drawn tiles.
    pub fn refill(&mut self, player: PlayerId, size: usize) -> Vec<RackTile> {
        let rack = self.racks.entry(player).or_default();
        let missing = size.saturating_sub(rack.len());

        let mut drawn = Vec::with_capacity(missing);
        for _ in 0..missing {
            let tile = RackTile {
                id: self.next_id,
                letter: self.draw.next_letter(),
            };
            self.next_id += 1;
            drawn.push(tile);
        }
        rack.extend_from_slice(&drawn);

        debug!(%player, drawn = drawn.len(), "Refilled rack");
        drawn
    }

    pub fn remove_player(&mut self, player: PlayerId) {
        self.racks.remove(&player);
    }
}

impl InventoryOracle for Inventory {
    fn available(&self, player: PlayerId) -> Result<Vec<RackTile>> {
        Ok(self.rack(player).to_vec())
    }

    fn consume(&mut self, player: PlayerId, ids: &[u64]) -> Result<()> {
        if let Some(rack) = self.racks.get_mut(&player) {
            rack.retain(|t| !ids.contains(&t.id));
        }
        Ok(())
    }
}
