//! Move evaluation pipeline.
//!
//! A move passes through, in order:
//! 1. shape validation ([`crate::shape`])
//! 2. the inventory check ([`crate::inventory`])
//! 3. axis resolution, lane scanning and word assembly, which also projects
//!    every new tile into the cube
//! 4. the dictionary ([`crate::dictionary`])
//!
//! The first failure aborts the move. Nothing is written anywhere until all
//! four stages have passed, and then only by [`play_move`] or the caller.

use crate::assembler::{assemble, ResolvedPlacement};
use crate::axis::AxisResolution;
use crate::board::{BoardSnapshot, GameId, PlacementSink, PlayerId};
use crate::dictionary::{check_word, Dictionary};
use crate::error::Result;
use crate::inventory::{check_inventory, InventoryOracle};
use crate::lane::Lane;
use crate::shape::validate_shape;
use crate::tile::{LocalPos, Move, PlacedTile, TileRef};
use tracing::{debug, error};

/// A move that passed every check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatedMove {
    pub resolved: ResolvedPlacement,
    /// Rack tiles the move uses up
    pub used: Vec<TileRef>,
}

impl EvaluatedMove {
    pub fn used_ids(&self) -> Vec<u64> {
        self.used.iter().map(|r| r.id).collect()
    }
}

/// Resolve the word and placements of `mv` against the tiles on the board.
///
/// `letters` are the validated letters of the move's tiles, in order.
pub fn resolve_geometry(
    board: &[PlacedTile],
    mv: &Move,
    letters: &[char],
) -> Result<ResolvedPlacement> {
    let rotation = mv.rotation()?;
    let positions: Vec<LocalPos> = mv.tiles.iter().map(|t| t.position).collect();
    let axes = AxisResolution::resolve(rotation, &positions)?;
    debug!(
        rotation = rotation.degrees(),
        straight = ?axes.straight,
        lane = axes.lane,
        "Resolved axes"
    );

    let lane = Lane::scan(&axes, board);
    assemble(&axes, &mv.tiles, letters, &lane)
}

/// Evaluates moves against borrowed collaborators
pub struct PlacementEngine<'a> {
    board: &'a dyn BoardSnapshot,
    inventory: &'a dyn InventoryOracle,
    dictionary: &'a dyn Dictionary,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(
        board: &'a dyn BoardSnapshot,
        inventory: &'a dyn InventoryOracle,
        dictionary: &'a dyn Dictionary,
    ) -> Self {
        Self {
            board,
            inventory,
            dictionary,
        }
    }

    /// Run every check on `mv` made by `player` in `game`.
    pub fn evaluate(&self, game: GameId, player: PlayerId, mv: &Move) -> Result<EvaluatedMove> {
        mv.rotation()?;
        let letters = validate_shape(&mv.tiles)?;
        let used = check_inventory(self.inventory, player, &mv.tiles, &letters)?;

        let tiles = self.board.placed_tiles(game)?;
        let resolved = resolve_geometry(&tiles, mv, &letters)?;
        check_word(self.dictionary, &resolved.word)?;

        debug!(%game, %player, word = %resolved.word, "Move accepted");
        Ok(EvaluatedMove { resolved, used })
    }
}

/// Evaluate `mv` and, only if it passes, commit its tiles to `board` and take
/// the used tiles out of `player`'s rack.
///
/// Either both writes happen or neither does: if the rack cannot be updated,
/// the committed tiles are retracted again.
pub fn play_move<B, I>(
    board: &mut B,
    inventory: &mut I,
    dictionary: &dyn Dictionary,
    game: GameId,
    player: PlayerId,
    mv: &Move,
) -> Result<ResolvedPlacement>
where
    B: BoardSnapshot + PlacementSink,
    I: InventoryOracle,
{
    let engine = PlacementEngine::new(&*board, &*inventory, dictionary);
    let evaluated = engine.evaluate(game, player, mv)?;
    let placements = &evaluated.resolved.placements;

    board.commit(game, player, placements)?;
    if let Err(e) = inventory.consume(player, &evaluated.used_ids()) {
        if let Err(retract_err) = board.retract(game, placements) {
            error!(%game, %player, %retract_err, "Failed to retract placements");
        }
        return Err(e);
    }
    Ok(evaluated.resolved)
}
