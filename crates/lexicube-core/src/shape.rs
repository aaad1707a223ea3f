//! Shape validation of a submitted move, before any geometry is computed.

use crate::config::{in_bounds, is_allowed};
use crate::error::{PlacementError, Result};
use crate::tile::SubmittedTile;
use std::collections::HashSet;

/// Check letters, bounds and alignment of `tiles`.
///
/// Returns the letter of every tile, in submission order.
pub fn validate_shape(tiles: &[SubmittedTile]) -> Result<Vec<char>> {
    if tiles.is_empty() {
        return Err(PlacementError::EmptyMove);
    }

    let mut letters = Vec::with_capacity(tiles.len());
    let mut rows = HashSet::new();
    let mut cols = HashSet::new();

    for tile in tiles {
        letters.push(single_letter(&tile.value)?);

        let pos = tile.position;
        if !in_bounds(pos.row) || !in_bounds(pos.col) {
            return Err(PlacementError::OutOfBounds {
                row: pos.row,
                col: pos.col,
            });
        }
        rows.insert(pos.row);
        cols.insert(pos.col);
    }

    // One axis fixed, the other distinct for every tile
    let (rows, cols) = (rows.len(), cols.len());
    let len = tiles.len();
    if !((rows == 1 && cols == len) || (cols == 1 && rows == len)) {
        return Err(PlacementError::MisalignedOrOverlapping { rows, cols });
    }

    Ok(letters)
}

fn single_letter(value: &str) -> Result<char> {
    let mut chars = value.chars();
    let letter = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            return Err(PlacementError::InvalidLength {
                value: value.to_string(),
            })
        }
    };
    if !is_allowed(letter) {
        return Err(PlacementError::InvalidCharacter { value: letter });
    }
    Ok(letter)
}
