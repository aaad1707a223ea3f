//! Coordinate projection from a player's view into the cube.

use crate::axis::{StraightAxis, ViewFrame};
use crate::config::mirror;
use crate::tile::{LocalPos, PlacedTile, Rotation, WorldPos};

type Projection = fn(LocalPos, i32) -> WorldPos;

fn north(pos: LocalPos, depth: i32) -> WorldPos {
    WorldPos::new(pos.col, pos.row, depth)
}

fn east(pos: LocalPos, depth: i32) -> WorldPos {
    WorldPos::new(depth, pos.row, pos.col)
}

fn south(pos: LocalPos, depth: i32) -> WorldPos {
    WorldPos::new(mirror(pos.col), pos.row, depth)
}

fn west(pos: LocalPos, depth: i32) -> WorldPos {
    WorldPos::new(depth, pos.row, mirror(pos.col))
}

/// Indexed by `[rotation][straight axis]`.
///
/// Turning the cube about world Y never moves a row off world Y, so a word
/// running along a row and one running down a column land the same way.
const PROJECTIONS: [[Projection; 2]; 4] = [
    [north, north],
    [east, east],
    [south, south],
    [west, west],
];

/// Absolute position of a tile at `pos`, seen from `rotation`, at `depth`.
pub fn project(pos: LocalPos, rotation: Rotation, straight: StraightAxis, depth: i32) -> WorldPos {
    PROJECTIONS[rotation.index()][straight.index()](pos, depth)
}

/// Build the tile to persist for a letter placed at `pos`.
pub fn project_tile(
    value: char,
    pos: LocalPos,
    rotation: Rotation,
    straight: StraightAxis,
    depth: i32,
) -> PlacedTile {
    PlacedTile::at(value, project(pos, rotation, straight, depth))
}

/// Recover the local position and depth a world position was projected from.
pub fn unproject(world: WorldPos, rotation: Rotation) -> (LocalPos, i32) {
    ViewFrame::for_rotation(rotation).to_local(world)
}
