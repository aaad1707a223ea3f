//! Board state: the tiles already placed in one game.
//!
//! The engine reads the board through [`BoardSnapshot`] and never writes to
//! it; callers hand successful placements to a [`PlacementSink`]. [`Board`]
//! implements both in memory.

use crate::config::{ALLOWED_CHARACTERS, BOARD_SIZE};
use crate::error::{PlacementError, Result};
use crate::tile::{PlacedTile, WorldPos};
use rand::seq::IteratorRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};
use uuid::Uuid;

/// Game identifier
pub type GameId = Uuid;

/// Player identifier
pub type PlayerId = Uuid;

/// Read access to the tiles of a game
pub trait BoardSnapshot {
    fn placed_tiles(&self, game: GameId) -> Result<Vec<PlacedTile>>;
}

/// Durable storage for the tiles of a successful move
pub trait PlacementSink {
    /// Store `placements` as the next play of `player`.
    fn commit(&mut self, game: GameId, player: PlayerId, placements: &[PlacedTile]) -> Result<()>;

    /// Undo the latest commit, which must have stored exactly `placements`.
    fn retract(&mut self, game: GameId, placements: &[PlacedTile]) -> Result<()>;
}

/// Who placed a tile, and on which of their plays (counting from 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorship {
    pub player: PlayerId,
    pub append: u32,
}

/// In-memory board of a single game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    game: GameId,
    tiles: Vec<PlacedTile>,
    /// Parallel to `tiles`; `None` for the bootstrap tile
    authors: Vec<Option<Authorship>>,
    /// Committed plays per player
    plays: HashMap<PlayerId, u32>,
}

impl Board {
    /// Create an empty board
    pub fn new(game: GameId) -> Self {
        Self {
            game,
            tiles: Vec::new(),
            authors: Vec::new(),
            plays: HashMap::new(),
        }
    }

    /// Create a board seeded with one random letter at the centre of the cube.
    ///
    /// Every move has to touch an existing tile, so a game cannot start from
    /// an empty board.
    pub fn with_bootstrap_tile<R: Rng>(game: GameId, rng: &mut R) -> Self {
        let letter = ALLOWED_CHARACTERS.chars().choose(rng).unwrap_or('A');
        let centre = BOARD_SIZE / 2;
        let tile = PlacedTile::new(letter, centre, centre, centre);

        info!(%game, ?tile, "Placed bootstrap tile");
        Self {
            game,
            tiles: vec![tile],
            authors: vec![None],
            plays: HashMap::new(),
        }
    }

    pub fn game(&self) -> GameId {
        self.game
    }

    pub fn tiles(&self) -> &[PlacedTile] {
        &self.tiles
    }

    pub fn tile_at(&self, pos: WorldPos) -> Option<&PlacedTile> {
        self.tiles.iter().find(|t| t.position() == pos)
    }

    /// Author of the tile at `pos`, if a player placed it
    pub fn author_at(&self, pos: WorldPos) -> Option<Authorship> {
        let index = self.tiles.iter().position(|t| t.position() == pos)?;
        self.authors[index]
    }

    /// Number of plays `player` has committed to this board
    pub fn plays_by(&self, player: PlayerId) -> u32 {
        self.plays.get(&player).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    fn check_game(&self, game: GameId) -> Result<()> {
        if game == self.game {
            Ok(())
        } else {
            Err(PlacementError::GameNotFound(game))
        }
    }
}

impl BoardSnapshot for Board {
    fn placed_tiles(&self, game: GameId) -> Result<Vec<PlacedTile>> {
        self.check_game(game)?;
        Ok(self.tiles.clone())
    }
}

impl PlacementSink for Board {
    fn commit(&mut self, game: GameId, player: PlayerId, placements: &[PlacedTile]) -> Result<()> {
        self.check_game(game)?;

        let plays = self.plays.entry(player).or_insert(0);
        let author = Authorship {
            player,
            append: *plays,
        };
        *plays += 1;

        self.tiles.extend_from_slice(placements);
        self.authors.extend(placements.iter().map(|_| Some(author)));
        Ok(())
    }

    fn retract(&mut self, game: GameId, placements: &[PlacedTile]) -> Result<()> {
        self.check_game(game)?;

        let start = self.tiles.len().saturating_sub(placements.len());
        if placements.is_empty() || self.tiles[start..] != *placements {
            warn!(%game, ?placements, "Nothing to retract");
            return Ok(());
        }

        if let Some(Some(author)) = self.authors.get(start) {
            if let Some(plays) = self.plays.get_mut(&author.player) {
                *plays = plays.saturating_sub(1);
            }
        }
        self.tiles.truncate(start);
        self.authors.truncate(start);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bootstrap_tile_at_centre() {
        let mut rng = StdRng::seed_from_u64(42);
        let board = Board::with_bootstrap_tile(Uuid::new_v4(), &mut rng);

        assert_eq!(board.len(), 1);
        let tile = board.tiles()[0];
        assert_eq!(tile.position(), WorldPos::new(7, 7, 7));
        assert!(tile.value.is_ascii_uppercase());
    }

    #[test]
    fn test_commit_appends_tiles() {
        let game = Uuid::new_v4();
        let mut board = Board::new(game);
        assert!(board.is_empty());

        let tiles = [PlacedTile::new('A', 1, 2, 3), PlacedTile::new('B', 2, 2, 3)];
        board.commit(game, Uuid::new_v4(), &tiles).unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(
            board.tile_at(WorldPos::new(2, 2, 3)),
            Some(&PlacedTile::new('B', 2, 2, 3))
        );
        assert_eq!(board.placed_tiles(game).unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_game() {
        let mut board = Board::new(Uuid::new_v4());
        let other = Uuid::new_v4();
        assert_eq!(board.placed_tiles(other), Err(PlacementError::GameNotFound(other)));
        assert_eq!(
            board.commit(other, Uuid::new_v4(), &[]),
            Err(PlacementError::GameNotFound(other))
        );
        assert_eq!(board.retract(other, &[]), Err(PlacementError::GameNotFound(other)));
    }

    #[test]
    fn test_commit_records_author_and_play_number() {
        let mut rng = StdRng::seed_from_u64(1);
        let game = Uuid::new_v4();
        let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());
        let mut board = Board::with_bootstrap_tile(game, &mut rng);

        board.commit(game, alice, &[PlacedTile::new('C', 6, 7, 7)]).unwrap();
        board.commit(game, bob, &[PlacedTile::new('T', 8, 7, 7)]).unwrap();
        board.commit(game, alice, &[PlacedTile::new('S', 9, 7, 7)]).unwrap();

        assert_eq!(board.author_at(WorldPos::new(7, 7, 7)), None);
        assert_eq!(
            board.author_at(WorldPos::new(6, 7, 7)),
            Some(Authorship { player: alice, append: 0 })
        );
        assert_eq!(
            board.author_at(WorldPos::new(8, 7, 7)),
            Some(Authorship { player: bob, append: 0 })
        );
        assert_eq!(
            board.author_at(WorldPos::new(9, 7, 7)),
            Some(Authorship { player: alice, append: 1 })
        );
        assert_eq!(board.plays_by(alice), 2);
        assert_eq!(board.plays_by(bob), 1);
    }

    #[test]
    fn test_retract_undoes_latest_commit() {
        let game = Uuid::new_v4();
        let player = Uuid::new_v4();
        let mut board = Board::new(game);
        let first = [PlacedTile::new('A', 1, 1, 1)];
        let second = [PlacedTile::new('B', 2, 1, 1), PlacedTile::new('C', 3, 1, 1)];
        board.commit(game, player, &first).unwrap();
        board.commit(game, player, &second).unwrap();

        board.retract(game, &second).unwrap();
        assert_eq!(board.tiles(), &first);
        assert_eq!(board.plays_by(player), 1);
        assert_eq!(board.author_at(WorldPos::new(2, 1, 1)), None);

        // only the newest tiles can be taken back
        board.retract(game, &second).unwrap();
        assert_eq!(board.tiles(), &first);
    }
}
