//! WebSocket protocol messages for Lexicube multiplayer.

use lexicube_core::{Move, PlacedTile, PlacementError, RackTile, SubmittedTile};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Create a new game and join it
    CreateGame { player_name: String },

    /// Join an existing game
    JoinGame { game_id: Uuid, player_name: String },

    /// Leave current game
    LeaveGame,

    /// Request own rack
    GetRack,

    /// Request every tile on the board
    GetBoard,

    /// Place tiles from the rack, as seen from `side` degrees
    MakePlay { side: i32, chars: Vec<SubmittedTile> },

    /// Ping for keepalive
    Ping,
}

impl ClientMessage {
    /// The move carried by a `MakePlay`
    pub fn into_move(self) -> Option<Move> {
        match self {
            ClientMessage::MakePlay { side, chars } => Some(Move::new(side, chars)),
            _ => None,
        }
    }
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    /// Welcome message with assigned player ID
    Welcome { player_id: Uuid },

    /// Game created successfully
    GameCreated { game_id: Uuid },

    /// Joined game successfully
    JoinedGame { game: GameInfo },

    /// Left game successfully
    LeftGame,

    /// Players or board size changed
    GameUpdated { game: GameInfo },

    /// Full board snapshot
    Board { tiles: Vec<PlacedTile> },

    /// The receiving player's rack
    Rack { tiles: Vec<RackEntry> },

    /// A play was accepted
    TilesPlaced {
        player_id: Uuid,
        player_name: String,
        word: String,
        tiles: Vec<PlacedTile>,
    },

    /// The sender's play was refused
    PlayRejected { error: PlacementError, message: String },

    /// Error occurred
    Error { message: String },

    /// Pong response
    Pong,
}

impl ServerMessage {
    pub fn rack(tiles: &[RackTile]) -> Self {
        ServerMessage::Rack {
            tiles: tiles.iter().map(RackEntry::from).collect(),
        }
    }

    pub fn rejected(error: PlacementError) -> Self {
        ServerMessage::PlayRejected {
            message: error.to_string(),
            error,
        }
    }
}

/// A rack tile as the client refers to it when playing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RackEntry {
    pub id: String,
    pub val: char,
}

impl From<&RackTile> for RackEntry {
    fn from(tile: &RackTile) -> Self {
        Self {
            id: tile.reference(),
            val: tile.letter,
        }
    }
}

/// Game information for clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameInfo {
    pub id: Uuid,
    pub name: String,
    pub players: Vec<PlayerInfo>,
    pub max_players: u8,
    pub host_id: Uuid,
    pub tiles_placed: usize,
}

/// Player information in a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: Uuid,
    pub name: String,
    /// Accepted plays so far
    pub appends: u32,
}
