//! Game room management.

use lexicube_core::config::RACK_SIZE;
use lexicube_core::{
    play_move, Board, Dictionary, DrawSequence, Inventory, Move, PlacedTile, PlacementError,
    RackTile, ResolvedPlacement,
};
use rand::Rng;
use std::collections::HashMap;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::protocol::{GameInfo, PlayerInfo};

#[derive(Debug, Error)]
pub enum RoomError {
    #[error("Game is full")]
    GameFull,

    #[error("Player not in game")]
    PlayerNotInGame,

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// A player in a game room.
#[derive(Debug, Clone)]
pub struct RoomPlayer {
    pub id: Uuid,
    pub name: String,
}

impl RoomPlayer {
    pub fn new(id: Uuid, name: String) -> Self {
        Self { id, name }
    }

    pub fn to_info(&self, appends: u32) -> PlayerInfo {
        PlayerInfo {
            id: self.id,
            name: self.name.clone(),
            appends,
        }
    }
}

/// An accepted play, ready to be announced.
#[derive(Debug, Clone)]
pub struct PlayOutcome {
    pub player_name: String,
    pub resolved: ResolvedPlacement,
}

/// A running game: its players, the cube and every rack.
pub struct GameRoom {
    pub id: Uuid,
    pub name: String,
    pub max_players: u8,
    pub host_id: Uuid,
    pub players: HashMap<Uuid, RoomPlayer>,
    /// Join order
    pub player_order: Vec<Uuid>,
    board: Board,
    inventory: Inventory,
}

impl GameRoom {
    /// Open a game seeded with a bootstrap tile, with the host's rack dealt.
    pub fn new<R: Rng>(
        id: Uuid,
        host_id: Uuid,
        host_name: String,
        max_players: u8,
        draw: DrawSequence,
        rng: &mut R,
    ) -> Self {
        let mut players = HashMap::new();
        players.insert(host_id, RoomPlayer::new(host_id, host_name.clone()));

        let mut inventory = Inventory::new(draw);
        inventory.refill(host_id, RACK_SIZE);

        Self {
            id,
            name: format!("{}'s Game", host_name),
            max_players: max_players.max(1),
            host_id,
            players,
            player_order: vec![host_id],
            board: Board::with_bootstrap_tile(id, rng),
            inventory,
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.max_players as usize
    }

    /// Seat a new player and deal their rack.
    pub fn add_player(&mut self, player_id: Uuid, name: String) -> Result<(), RoomError> {
        if self.is_full() {
            return Err(RoomError::GameFull);
        }

        self.players.insert(player_id, RoomPlayer::new(player_id, name));
        self.player_order.push(player_id);
        self.inventory.refill(player_id, RACK_SIZE);
        Ok(())
    }

    /// Remove a player and their rack. Returns true if the game is now empty.
    pub fn remove_player(&mut self, player_id: Uuid) -> Result<bool, RoomError> {
        if self.players.remove(&player_id).is_none() {
            return Err(RoomError::PlayerNotInGame);
        }
        self.player_order.retain(|&id| id != player_id);
        self.inventory.remove_player(player_id);

        // If host left, assign new host
        if player_id == self.host_id && !self.player_order.is_empty() {
            self.host_id = self.player_order[0];
        }

        Ok(self.players.is_empty())
    }

    pub fn rack(&self, player_id: Uuid) -> Result<&[RackTile], RoomError> {
        if !self.players.contains_key(&player_id) {
            return Err(RoomError::PlayerNotInGame);
        }
        Ok(self.inventory.rack(player_id))
    }

    pub fn tiles(&self) -> &[PlacedTile] {
        self.board.tiles()
    }

    /// Accepted plays of `player_id`, as recorded on the board
    pub fn appends(&self, player_id: Uuid) -> u32 {
        self.board.plays_by(player_id)
    }

    /// Play `mv` for `player_id`, then top their rack back up.
    ///
    /// A rejected play leaves the board, the rack and the counter untouched.
    pub fn make_play(
        &mut self,
        player_id: Uuid,
        mv: &Move,
        dictionary: &dyn Dictionary,
    ) -> Result<PlayOutcome, RoomError> {
        let player_name = self
            .players
            .get(&player_id)
            .map(|p| p.name.clone())
            .ok_or(RoomError::PlayerNotInGame)?;

        let resolved = play_move(
            &mut self.board,
            &mut self.inventory,
            dictionary,
            self.id,
            player_id,
            mv,
        )?;

        self.inventory.refill(player_id, RACK_SIZE);

        info!(
            game = %self.id,
            player = %player_name,
            word = %resolved.word,
            appends = self.appends(player_id),
            "Play accepted"
        );

        Ok(PlayOutcome {
            player_name,
            resolved,
        })
    }

    pub fn to_info(&self) -> GameInfo {
        GameInfo {
            id: self.id,
            name: self.name.clone(),
            players: self
                .player_order
                .iter()
                .filter_map(|id| self.players.get(id).map(|p| p.to_info(self.appends(*id))))
                .collect(),
            max_players: self.max_players,
            host_id: self.host_id,
            tiles_placed: self.board.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexicube_core::config::BOARD_SIZE;
    use lexicube_core::{SubmittedTile, WordList};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// A room whose host holds `A A A A A A A`
    fn room(max_players: u8) -> (GameRoom, Uuid) {
        let host_id = Uuid::new_v4();
        let mut rng = StdRng::seed_from_u64(7);
        let room = GameRoom::new(
            Uuid::new_v4(),
            host_id,
            "Host".to_string(),
            max_players,
            DrawSequence::cycling("A"),
            &mut rng,
        );
        (room, host_id)
    }

    /// Two host tiles to the left of the bootstrap tile, north side
    fn two_tile_play(room: &GameRoom, host_id: Uuid) -> Move {
        let rack = room.rack(host_id).unwrap();
        let centre = BOARD_SIZE / 2;
        Move::new(
            0,
            vec![
                SubmittedTile::new("A", rack[0].reference(), centre, centre - 2),
                SubmittedTile::new("A", rack[1].reference(), centre, centre - 1),
            ],
        )
    }

    fn words_for(room: &GameRoom) -> WordList {
        let bootstrap = room.tiles()[0].value;
        WordList::from_words([format!("aa{}", bootstrap)])
    }

    #[test]
    fn test_create_room() {
        let (room, host_id) = room(4);

        assert_eq!(room.player_count(), 1);
        assert!(!room.is_full());
        assert_eq!(room.host_id, host_id);
        assert_eq!(room.tiles().len(), 1);
        assert_eq!(room.rack(host_id).unwrap().len(), RACK_SIZE);
    }

    #[test]
    fn test_add_remove_players() {
        let (mut room, host_id) = room(2);

        let player2 = Uuid::new_v4();
        room.add_player(player2, "Player 2".to_string()).unwrap();

        assert_eq!(room.player_count(), 2);
        assert!(room.is_full());
        assert_eq!(room.rack(player2).unwrap().len(), RACK_SIZE);

        // Can't add more players
        let player3 = Uuid::new_v4();
        assert!(matches!(
            room.add_player(player3, "Player 3".to_string()),
            Err(RoomError::GameFull)
        ));

        // Host leaves, player 2 takes over
        let empty = room.remove_player(host_id).unwrap();
        assert!(!empty);
        assert_eq!(room.host_id, player2);
        assert!(matches!(room.rack(host_id), Err(RoomError::PlayerNotInGame)));

        assert!(room.remove_player(player2).unwrap());
    }

    #[test]
    fn test_remove_unseated_player() {
        let (mut room, host_id) = room(4);

        assert!(matches!(
            room.remove_player(Uuid::new_v4()),
            Err(RoomError::PlayerNotInGame)
        ));
        assert_eq!(room.player_count(), 1);
        assert_eq!(room.host_id, host_id);

        // a second removal of the same player is also refused
        assert!(room.remove_player(host_id).unwrap());
        assert!(matches!(
            room.remove_player(host_id),
            Err(RoomError::PlayerNotInGame)
        ));
    }

    #[test]
    fn test_make_play_counts_appends_and_refills() {
        let (mut room, host_id) = room(4);
        let mv = two_tile_play(&room, host_id);
        let words = words_for(&room);
        let old_ids: Vec<u64> = room.rack(host_id).unwrap().iter().map(|t| t.id).collect();

        let outcome = room.make_play(host_id, &mv, &words).unwrap();

        assert_eq!(outcome.player_name, "Host");
        assert_eq!(outcome.resolved.placements.len(), 2);
        assert_eq!(room.tiles().len(), 3);
        assert_eq!(room.appends(host_id), 1);
        let info = room.to_info();
        assert_eq!(info.tiles_placed, 3);
        assert_eq!(info.players[0].appends, 1);

        let rack = room.rack(host_id).unwrap();
        assert_eq!(rack.len(), RACK_SIZE);
        assert!(!rack.iter().any(|t| t.id == old_ids[0] || t.id == old_ids[1]));
    }

    #[test]
    fn test_rejected_play_changes_nothing() {
        let (mut room, host_id) = room(4);
        let mv = two_tile_play(&room, host_id);

        let result = room.make_play(host_id, &mv, &WordList::default());
        assert!(matches!(
            result,
            Err(RoomError::Placement(PlacementError::NotAWord { .. }))
        ));
        assert_eq!(room.tiles().len(), 1);
        assert_eq!(room.appends(host_id), 0);
        assert_eq!(room.rack(host_id).unwrap().len(), RACK_SIZE);
    }

    #[test]
    fn test_strangers_cannot_play() {
        let (mut room, host_id) = room(4);
        let mv = two_tile_play(&room, host_id);
        let words = words_for(&room);

        assert!(matches!(
            room.make_play(Uuid::new_v4(), &mv, &words),
            Err(RoomError::PlayerNotInGame)
        ));
    }

    #[test]
    fn test_players_cannot_spend_other_racks() {
        let (mut room, host_id) = room(4);
        let guest = Uuid::new_v4();
        room.add_player(guest, "Guest".to_string()).unwrap();
        let mv = two_tile_play(&room, host_id);
        let words = words_for(&room);

        assert!(matches!(
            room.make_play(guest, &mv, &words),
            Err(RoomError::Placement(PlacementError::NotAvailable { .. }))
        ));
    }
}
