//! Engine tunables shared by the validators, the geometry and the dictionary.

/// Edge length of the cube. Every coordinate lives in `0..BOARD_SIZE`.
pub const BOARD_SIZE: i32 = 15;

/// Letters a tile may carry
pub const ALLOWED_CHARACTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Shortest word the dictionary will accept
pub const MIN_WORD_LEN: usize = 3;

/// Number of tiles a player holds after a refill
pub const RACK_SIZE: usize = 7;

/// Prefix every tile reference sent by a client starts with
pub const TILE_REF_PREFIX: &str = "char-";

/// Whether `value` lies on the board along one axis
pub fn in_bounds(value: i32) -> bool {
    (0..BOARD_SIZE).contains(&value)
}

/// Reflect a coordinate through the centre of the board.
pub fn mirror(value: i32) -> i32 {
    BOARD_SIZE - 1 - value
}

/// Whether `c` is a letter tiles may carry
pub fn is_allowed(c: char) -> bool {
    ALLOWED_CHARACTERS.contains(c)
}
