//! Tiles, moves and the coordinate types they are expressed in.
//!
//! Two coordinate spaces are involved:
//! - [`LocalPos`]: the 2D grid a player sees from one side of the cube
//! - [`WorldPos`]: absolute cube coordinates, the only thing ever persisted

use crate::axis::WorldAxis;
use crate::config::TILE_REF_PREFIX;
use crate::error::{PlacementError, Result};
use serde::{Deserialize, Serialize};

/// One of the four sides the cube can be viewed from.
///
/// The cube turns about the vertical world Y axis, so the side is also the
/// rotation in degrees applied to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    /// 0 degrees
    North,
    /// 90 degrees
    East,
    /// 180 degrees
    South,
    /// 270 degrees
    West,
}

impl Rotation {
    /// All rotations in ascending order of degrees
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Normalise any multiple of 90 (negative included) into a rotation.
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        match degrees.rem_euclid(360) {
            0 => Ok(Rotation::North),
            90 => Ok(Rotation::East),
            180 => Ok(Rotation::South),
            270 => Ok(Rotation::West),
            _ => Err(PlacementError::InvalidRotation { degrees }),
        }
    }

    pub fn degrees(self) -> i32 {
        self.index() as i32 * 90
    }

    /// Position in [`Rotation::ALL`], used to index lookup tables
    pub fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Whether the tile nearest to the viewer has the larger depth coordinate
    pub fn views_from_high_side(self) -> bool {
        matches!(self, Rotation::East | Rotation::South)
    }
}

/// Position on the 2D grid a player sees.
///
/// Travels over the wire as `[row, col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct LocalPos {
    /// Local Y axis
    pub row: i32,
    /// Local X axis
    pub col: i32,
}

impl LocalPos {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl From<[i32; 2]> for LocalPos {
    fn from([row, col]: [i32; 2]) -> Self {
        Self { row, col }
    }
}

impl From<LocalPos> for [i32; 2] {
    fn from(pos: LocalPos) -> Self {
        [pos.row, pos.col]
    }
}

/// Absolute position inside the cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl WorldPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Coordinate along one world axis
    pub fn get(&self, axis: WorldAxis) -> i32 {
        match axis {
            WorldAxis::X => self.x,
            WorldAxis::Y => self.y,
            WorldAxis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: WorldAxis, value: i32) {
        match axis {
            WorldAxis::X => self.x = value,
            WorldAxis::Y => self.y = value,
            WorldAxis::Z => self.z = value,
        }
    }
}

/// A tile already on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedTile {
    pub value: char,
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl PlacedTile {
    pub fn new(value: char, x: i32, y: i32, z: i32) -> Self {
        Self { value, x, y, z }
    }

    pub fn at(value: char, pos: WorldPos) -> Self {
        Self::new(value, pos.x, pos.y, pos.z)
    }

    pub fn position(&self) -> WorldPos {
        WorldPos::new(self.x, self.y, self.z)
    }
}

/// A tile a player wants to put on the board, as submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedTile {
    /// Letter on the tile, validated to be a single character later
    #[serde(rename = "val")]
    pub value: String,
    /// Inventory reference, e.g. `char-Q12`
    #[serde(rename = "id")]
    pub reference: String,
    #[serde(rename = "pos")]
    pub position: LocalPos,
}

impl SubmittedTile {
    pub fn new(value: impl Into<String>, reference: impl Into<String>, row: i32, col: i32) -> Self {
        Self {
            value: value.into(),
            reference: reference.into(),
            position: LocalPos::new(row, col),
        }
    }
}

/// A candidate play: the side it was made from and the new tiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Rotation in degrees as reported by the client
    pub side: i32,
    #[serde(rename = "chars")]
    pub tiles: Vec<SubmittedTile>,
}

impl Move {
    pub fn new(side: i32, tiles: Vec<SubmittedTile>) -> Self {
        Self { side, tiles }
    }

    pub fn rotation(&self) -> Result<Rotation> {
        Rotation::from_degrees(self.side)
    }
}

/// Parsed form of a tile reference such as `char-Q12`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRef {
    pub id: u64,
    pub letter: char,
}

impl TileRef {
    /// Parse `reference` and check the embedded letter against `value`.
    pub fn parse(reference: &str, value: char) -> Result<Self> {
        let malformed = |reason: &str| PlacementError::MalformedReference {
            reference: reference.to_string(),
            reason: reason.to_string(),
        };

        let rest = reference
            .strip_prefix(TILE_REF_PREFIX)
            .ok_or_else(|| malformed("missing prefix"))?;

        let mut chars = rest.chars();
        let letter = chars
            .next()
            .filter(char::is_ascii_uppercase)
            .ok_or_else(|| malformed("expected an uppercase letter after the prefix"))?;

        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed("expected a decimal id after the letter"));
        }
        let id = digits
            .parse::<u64>()
            .map_err(|_| malformed("id out of range"))?;

        if letter != value {
            return Err(malformed(&format!(
                "letter {} does not match tile value {}",
                letter, value
            )));
        }

        Ok(Self { id, letter })
    }

    /// Render back into the wire form
    pub fn to_reference(&self) -> String {
        format!("{}{}{}", TILE_REF_PREFIX, self.letter, self.id)
    }
}
