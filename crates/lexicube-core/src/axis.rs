//! Axis resolution: which local axis a move runs along and how the local
//! view of each side maps onto world axes.
//!
//! The cube turns about world Y, so local rows always lie on world Y. What
//! changes between sides is the world axis under the local columns and the
//! world axis pointing away from the viewer (depth):
//!
//! | side | column        | depth | nearest tile  |
//! |------|---------------|-------|---------------|
//! | 0    | X             | Z     | smallest Z    |
//! | 90   | Z             | X     | largest X     |
//! | 180  | X (mirrored)  | Z     | largest Z     |
//! | 270  | Z (mirrored)  | X     | smallest X    |
//!
//! A mirrored axis runs from the far edge of the board: local `c` lies at
//! world `BOARD_SIZE - 1 - c`.

use crate::config::mirror;
use crate::error::{PlacementError, Result};
use crate::tile::{LocalPos, PlacedTile, Rotation, WorldPos};
use serde::{Deserialize, Serialize};

/// World axes of the cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorldAxis {
    X,
    Y,
    Z,
}

/// A local axis laid onto a world axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisMap {
    pub axis: WorldAxis,
    /// Local coordinates grow in the opposite direction to world ones
    pub mirrored: bool,
}

impl AxisMap {
    const fn direct(axis: WorldAxis) -> Self {
        Self {
            axis,
            mirrored: false,
        }
    }

    const fn mirrored(axis: WorldAxis) -> Self {
        Self {
            axis,
            mirrored: true,
        }
    }

    pub fn to_world(self, local: i32) -> i32 {
        if self.mirrored {
            mirror(local)
        } else {
            local
        }
    }

    pub fn to_local(self, world: i32) -> i32 {
        // mirroring is its own inverse
        self.to_world(world)
    }
}

/// How the 2D view from one side sits inside the cube
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewFrame {
    pub row: AxisMap,
    pub col: AxisMap,
    pub depth: WorldAxis,
}

/// One frame per rotation, indexed by [`Rotation::index`]
const VIEW_FRAMES: [ViewFrame; 4] = [
    // North
    ViewFrame {
        row: AxisMap::direct(WorldAxis::Y),
        col: AxisMap::direct(WorldAxis::X),
        depth: WorldAxis::Z,
    },
    // East
    ViewFrame {
        row: AxisMap::direct(WorldAxis::Y),
        col: AxisMap::direct(WorldAxis::Z),
        depth: WorldAxis::X,
    },
    // South
    ViewFrame {
        row: AxisMap::direct(WorldAxis::Y),
        col: AxisMap::mirrored(WorldAxis::X),
        depth: WorldAxis::Z,
    },
    // West
    ViewFrame {
        row: AxisMap::direct(WorldAxis::Y),
        col: AxisMap::mirrored(WorldAxis::Z),
        depth: WorldAxis::X,
    },
];

impl ViewFrame {
    pub fn for_rotation(rotation: Rotation) -> &'static ViewFrame {
        &VIEW_FRAMES[rotation.index()]
    }

    /// Place a local position at the given depth.
    pub fn to_world(&self, pos: LocalPos, depth: i32) -> WorldPos {
        let mut world = WorldPos::default();
        world.set(self.row.axis, self.row.to_world(pos.row));
        world.set(self.col.axis, self.col.to_world(pos.col));
        world.set(self.depth, depth);
        world
    }

    /// Inverse of [`ViewFrame::to_world`]: local position and depth.
    pub fn to_local(&self, world: WorldPos) -> (LocalPos, i32) {
        let row = self.row.to_local(world.get(self.row.axis));
        let col = self.col.to_local(world.get(self.col.axis));
        (LocalPos::new(row, col), world.get(self.depth))
    }
}

/// The local axis that stays constant across a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StraightAxis {
    /// All tiles share a row; the word runs along the columns
    Row,
    /// All tiles share a column; the word runs down the rows
    Column,
}

impl StraightAxis {
    /// 0 for rows, 1 for columns
    pub fn index(self) -> usize {
        match self {
            StraightAxis::Row => 0,
            StraightAxis::Column => 1,
        }
    }
}

/// A placed tile seen through a move's axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneCoords {
    /// Position along the word
    pub changing: i32,
    /// Which lane the tile sits in
    pub lane: i32,
    /// Distance from the viewer's side of the cube
    pub depth: i32,
}

/// Axes of a single move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisResolution {
    pub rotation: Rotation,
    pub straight: StraightAxis,
    /// Shared coordinate of all tiles along the straight axis
    pub lane: i32,
    frame: &'static ViewFrame,
}

impl AxisResolution {
    /// Work out the axes for tiles at `positions` viewed from `rotation`.
    pub fn resolve(rotation: Rotation, positions: &[LocalPos]) -> Result<Self> {
        let first = positions.first().ok_or(PlacementError::EmptyMove)?;

        let (straight, lane) = if positions.iter().all(|p| p.row == first.row) {
            (StraightAxis::Row, first.row)
        } else {
            (StraightAxis::Column, first.col)
        };

        Ok(Self {
            rotation,
            straight,
            lane,
            frame: ViewFrame::for_rotation(rotation),
        })
    }

    pub fn frame(&self) -> &'static ViewFrame {
        self.frame
    }

    /// Coordinate of a local position along the word
    pub fn changing_of(&self, pos: LocalPos) -> i32 {
        match self.straight {
            StraightAxis::Row => pos.col,
            StraightAxis::Column => pos.row,
        }
    }

    /// World axis that identifies the lane
    pub fn lane_axis(&self) -> AxisMap {
        match self.straight {
            StraightAxis::Row => self.frame.row,
            StraightAxis::Column => self.frame.col,
        }
    }

    /// World axis the word runs along
    pub fn changing_axis(&self) -> AxisMap {
        match self.straight {
            StraightAxis::Row => self.frame.col,
            StraightAxis::Column => self.frame.row,
        }
    }

    pub fn depth_axis(&self) -> WorldAxis {
        self.frame.depth
    }

    /// Project a board tile onto this move's `(changing, lane, depth)` axes.
    pub fn locate(&self, tile: &PlacedTile) -> LaneCoords {
        let world = tile.position();
        let changing = self.changing_axis();
        let lane = self.lane_axis();
        LaneCoords {
            changing: changing.to_local(world.get(changing.axis)),
            lane: lane.to_local(world.get(lane.axis)),
            depth: world.get(self.frame.depth),
        }
    }
}
