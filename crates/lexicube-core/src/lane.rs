//! Lane scanning: what a player sees of the board along a move's lane.
//!
//! Several tiles may stack behind one another at the same lane position; only
//! the one nearest to the viewer is visible, and it is the one a new word
//! connects to.

use crate::axis::AxisResolution;
use crate::config::{in_bounds, BOARD_SIZE};
use crate::tile::{PlacedTile, Rotation};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// The visible tile at one lane position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneCell {
    pub letter: char,
    /// World coordinate of the tile along the depth axis
    pub depth: i32,
}

/// Visible tiles of one lane, indexed by changing-axis coordinate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lane {
    cells: Vec<Option<LaneCell>>,
}

impl Default for Lane {
    fn default() -> Self {
        Self {
            cells: vec![None; BOARD_SIZE as usize],
        }
    }
}

/// Whether a tile at `candidate` depth hides the one at `current`
fn is_nearer(rotation: Rotation, current: i32, candidate: i32) -> bool {
    if rotation.views_from_high_side() {
        candidate >= current
    } else {
        candidate <= current
    }
}

impl Lane {
    /// Build a lane from explicit `(changing, letter, depth)` cells.
    ///
    /// Cells outside the board are ignored.
    pub fn from_cells(cells: impl IntoIterator<Item = (i32, char, i32)>) -> Self {
        let mut lane = Self::default();
        for (changing, letter, depth) in cells {
            if in_bounds(changing) {
                lane.cells[changing as usize] = Some(LaneCell { letter, depth });
            }
        }
        lane
    }

    /// Collect the visible tiles of the lane `axes` describes.
    pub fn scan(axes: &AxisResolution, tiles: &[PlacedTile]) -> Self {
        let mut lane = Self::default();

        for tile in tiles {
            let coords = axes.locate(tile);
            if coords.lane != axes.lane {
                continue;
            }
            if !in_bounds(coords.changing) {
                warn!(?tile, "Board tile outside the cube, skipping");
                continue;
            }

            let slot = &mut lane.cells[coords.changing as usize];
            let replace = match slot {
                None => true,
                Some(cell) => is_nearer(axes.rotation, cell.depth, coords.depth),
            };
            if replace {
                *slot = Some(LaneCell {
                    letter: tile.value,
                    depth: coords.depth,
                });
            }
        }

        debug!(
            lane = axes.lane,
            straight = ?axes.straight,
            rotation = ?axes.rotation,
            letters = ?lane.letters(),
            "Scanned lane"
        );
        lane
    }

    pub fn cell(&self, changing: i32) -> Option<LaneCell> {
        if in_bounds(changing) {
            self.cells[changing as usize]
        } else {
            None
        }
    }

    pub fn letter_at(&self, changing: i32) -> Option<char> {
        self.cell(changing).map(|c| c.letter)
    }

    pub fn depth_at(&self, changing: i32) -> Option<i32> {
        self.cell(changing).map(|c| c.depth)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Depth of the occupied cell with the smallest coordinate
    pub fn leftmost_depth(&self) -> Option<i32> {
        self.cells.iter().flatten().map(|c| c.depth).next()
    }

    /// Visible letter per lane position
    pub fn letters(&self) -> BTreeMap<i32, char> {
        self.occupied().map(|(i, c)| (i, c.letter)).collect()
    }

    /// Visible depth per lane position
    pub fn depths(&self) -> BTreeMap<i32, i32> {
        self.occupied().map(|(i, c)| (i, c.depth)).collect()
    }

    fn occupied(&self) -> impl Iterator<Item = (i32, LaneCell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|cell| (i as i32, cell)))
    }
}
