//! Errors produced while evaluating a move.
//!
//! Every variant is terminal for the move it was raised on. The payloads carry
//! enough context for a client to show the player what went wrong.

use crate::board::GameId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a move can be rejected
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PlacementError {
    // ==================== Shape ====================
    #[error("Move contains no tiles")]
    EmptyMove,

    #[error("Tile value should be exactly one character, got {value:?}")]
    InvalidLength { value: String },

    #[error("Tile value '{value}' is not an allowed character")]
    InvalidCharacter { value: char },

    #[error("Tiles overlap or are not aligned (distinct rows: {rows}, distinct columns: {cols})")]
    MisalignedOrOverlapping { rows: usize, cols: usize },

    #[error("Tile at row {row}, column {col} is outside the board")]
    OutOfBounds { row: i32, col: i32 },

    #[error("Side {degrees} is not a multiple of 90 degrees")]
    InvalidRotation { degrees: i32 },

    // ==================== Inventory ====================
    #[error("Malformed tile reference {reference:?}: {reason}")]
    MalformedReference { reference: String, reason: String },

    #[error("Tile {reference} is not in your available tiles")]
    NotAvailable { reference: String },

    // ==================== Geometry ====================
    #[error("No existing tiles found in lane {lane}")]
    NoDepthFound { lane: i32 },

    #[error("Gap at position {changing} in lane {lane}")]
    GapWithoutTile { changing: i32, lane: i32 },

    #[error("Tile at position {changing} in lane {lane} collides with an existing tile")]
    CollisionWithExistingTile { changing: i32, lane: i32 },

    #[error("Tiles do not touch any existing tile")]
    DisconnectedPlacement,

    // ==================== Dictionary ====================
    #[error("Word {word} is too short (minimum {min} letters)")]
    WordTooShort { word: String, min: usize },

    #[error("Word {word} is not on the word list")]
    NotAWord { word: String },

    // ==================== Board ====================
    #[error("Game {0} not found")]
    GameNotFound(GameId),
}

pub type Result<T> = std::result::Result<T, PlacementError>;
