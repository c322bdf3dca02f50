//! Basic types for working with letter tiles.
use crate::Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of tiles on a rack
pub const RACK_SIZE: usize = 7;

/// letter, count, points
type TileInfo = (char, u32, u32);

/// The standard english tile distribution, without blanks.
pub const TILESET: [TileInfo; 26] = [
    ('A', 9, 1),
    ('B', 2, 3),
    ('C', 2, 3),
    ('D', 4, 2),
    ('E', 12, 1),
    ('F', 2, 4),
    ('G', 3, 2),
    ('H', 2, 4),
    ('I', 9, 1),
    ('J', 1, 8),
    ('K', 1, 5),
    ('L', 4, 1),
    ('M', 2, 3),
    ('N', 6, 1),
    ('O', 8, 1),
    ('P', 2, 3),
    ('Q', 1, 10),
    ('R', 6, 1),
    ('S', 4, 1),
    ('T', 6, 1),
    ('U', 4, 1),
    ('V', 2, 4),
    ('W', 2, 4),
    ('X', 1, 8),
    ('Y', 2, 4),
    ('Z', 1, 10),
];

/// Total number of tiles in a game
pub const TILE_COUNT: usize = 98;

fn info(letter: char) -> Option<&'static TileInfo> {
    let upper = letter.to_ascii_uppercase();
    TILESET.iter().find(|(label, _, _)| *label == upper)
}

/// Return the points for `letter`, or 1 if it is not part of the tileset.
/// ## Examples
/// ```
/// use scrabble_engine::letter_value;
/// assert_eq!(letter_value('q'), 10);
/// assert_eq!(letter_value('E'), 1);
/// ```
pub fn letter_value(letter: char) -> u32 {
    info(letter).map_or(1, |&(_, _, points)| points)
}

/// Return the number of tiles with `letter` in the tileset, or 0 if not found
pub fn letter_count(letter: char) -> u32 {
    info(letter).map_or(0, |&(_, count, _)| count)
}

/// Normalize `letter` to an uppercase tile letter.
/// ## Errors
/// If `letter` is not `a`..`z` or `A`..`Z`.
pub fn tile_letter(letter: char) -> Result<char, Error> {
    if letter.is_ascii_alphabetic() {
        Ok(letter.to_ascii_uppercase())
    } else {
        Err(Error::InvalidLetter(letter))
    }
}

/// Unique identity of a tile, assigned when the tile is drawn from the bag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "tile-{}", self.0)
    }
}

/// Generator for unique [`TileId`]s.
#[derive(Debug, Clone, Default)]
pub struct TileIds {
    next: u32,
}

impl TileIds {
    pub fn new() -> TileIds {
        TileIds::default()
    }

    /// Return a new, never used id
    pub fn next_id(&mut self) -> TileId {
        self.next += 1;
        TileId(self.next)
    }

    /// Wrap `letter` in a new tile
    pub fn tile(&mut self, letter: char) -> Tile {
        Tile::new(self.next_id(), letter)
    }
}

/// A letter tile with its identity and point value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tile {
    pub id: TileId,
    pub letter: char,
    pub value: u32,
}

impl Tile {
    pub fn new(id: TileId, letter: char) -> Tile {
        let letter = letter.to_ascii_uppercase();
        Tile {
            id,
            letter,
            value: letter_value(letter),
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.value)
    }
}
