//! Lexicube - a multiplayer word game played on a 3D cube
//!
//! This crate provides the placement resolution engine, including:
//! - Shape and inventory validation of submitted moves
//! - Axis resolution for the four sides the cube can be viewed from
//! - Lane scanning with depth resolution among stacked tiles
//! - Word assembly with gap filling and connectivity checks
//! - Projection of new tiles into absolute cube coordinates
//!
//! # Architecture
//!
//! The engine is synchronous and owns no state between moves. Board tiles,
//! player racks and the word list are reached through the traits
//! [`BoardSnapshot`], [`InventoryOracle`] and [`Dictionary`]; in-memory
//! implementations of each are included for hosting a game.
//!
//! # Modules
//!
//! - [`tile`]: Tiles, moves and coordinate types
//! - [`shape`]: Move shape validation
//! - [`inventory`]: Player racks and the availability check
//! - [`axis`]: Straight/changing axes and per-side view frames
//! - [`lane`]: Visible tiles along a move's lane
//! - [`assembler`]: Word assembly
//! - [`projection`]: Local to world coordinate projection
//! - [`dictionary`]: Word lookup
//! - [`engine`]: The full evaluation pipeline

pub mod assembler;
pub mod axis;
pub mod board;
pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod inventory;
pub mod lane;
pub mod projection;
pub mod shape;
pub mod tile;

// Re-export commonly used types
pub use assembler::ResolvedPlacement;
pub use axis::{AxisResolution, StraightAxis, ViewFrame, WorldAxis};
pub use board::{Authorship, Board, BoardSnapshot, GameId, PlacementSink, PlayerId};
pub use dictionary::{Dictionary, DictionaryError, WordList};
pub use engine::{play_move, EvaluatedMove, PlacementEngine};
pub use error::PlacementError;
pub use inventory::{DrawSequence, Inventory, InventoryOracle, RackTile};
pub use lane::Lane;
pub use tile::{LocalPos, Move, PlacedTile, Rotation, SubmittedTile, TileRef, WorldPos};
