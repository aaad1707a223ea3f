//! Word assembly: merge a move's tiles with the visible letters of its lane.

use crate::axis::AxisResolution;
use crate::error::{PlacementError, Result};
use crate::lane::Lane;
use crate::projection::project_tile;
use crate::tile::{PlacedTile, SubmittedTile};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of a legal move: the word it spells and where its tiles go
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPlacement {
    pub word: String,
    /// New tiles only, ordered along the word
    pub placements: Vec<PlacedTile>,
}

/// Assemble the word spelled by `tiles` against `lane`.
///
/// `letters` holds the validated letter of each tile. Gaps between new tiles
/// must be filled by existing letters, new tiles may not land on existing
/// ones, and the move has to touch at least one existing letter.
///
/// New tiles take the depth of the leftmost visible letter of the lane until
/// a gap is filled, after which they follow the depth of the letter filling
/// it.
pub fn assemble(
    axes: &AxisResolution,
    tiles: &[SubmittedTile],
    letters: &[char],
    lane: &Lane,
) -> Result<ResolvedPlacement> {
    let mut ordered: Vec<_> = tiles
        .iter()
        .zip(letters)
        .map(|(tile, &letter)| (axes.changing_of(tile.position), tile.position, letter))
        .collect();
    ordered.sort_by_key(|&(changing, _, _)| changing);

    let first = ordered.first().ok_or(PlacementError::EmptyMove)?.0;
    let mut cursor = first;
    let mut depth_level = lane
        .leftmost_depth()
        .ok_or(PlacementError::NoDepthFound { lane: axes.lane })?;

    let mut word = String::with_capacity(ordered.len() + 2);
    let mut placements = Vec::with_capacity(ordered.len());
    let mut touching = false;

    if let Some(letter) = lane.letter_at(cursor - 1) {
        word.push(letter);
        touching = true;
    }

    for (changing, pos, letter) in ordered {
        while changing > cursor {
            let cell = lane.cell(cursor).ok_or(PlacementError::GapWithoutTile {
                changing: cursor,
                lane: axes.lane,
            })?;
            word.push(cell.letter);
            depth_level = cell.depth;
            touching = true;
            cursor += 1;
        }

        if lane.letter_at(changing).is_some() {
            return Err(PlacementError::CollisionWithExistingTile {
                changing,
                lane: axes.lane,
            });
        }

        word.push(letter);
        placements.push(project_tile(letter, pos, axes.rotation, axes.straight, depth_level));
        cursor = changing + 1;
    }

    if let Some(letter) = lane.letter_at(cursor) {
        word.push(letter);
        touching = true;
    }

    if !touching {
        return Err(PlacementError::DisconnectedPlacement);
    }

    debug!(%word, tiles = placements.len(), "Assembled word");
    Ok(ResolvedPlacement { word, placements })
}
