use crate::Error;
use lazy_static::lazy_static;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

/// The dimension of the board: N x N squares
pub const N: usize = 15;
const Q: usize = 1 + N / 2;

/// The center square, which must be covered by the first move.
pub const CENTER: Coord = Coord { row: 7, col: 7 };

const DEFAULT_QUARTER_BOARD: [&str; Q] = [
    "3w -- -- 2l -- -- -- 3w",
    "-- 2w -- -- -- 3l -- --",
    "-- -- 2w -- -- -- 2l --",
    "2l -- -- 2w -- -- -- 2l",
    "-- -- -- -- 2w -- -- --",
    "-- 3l -- -- -- 3l -- --",
    "-- -- 2l -- -- -- 2l --",
    "3w -- -- 2l -- -- -- 2w",
];

lazy_static! {
    static ref DEFAULT_GRID: Grid = Grid::expand_quarter_board(&DEFAULT_QUARTER_BOARD);
}

/// A square on the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Coord {
        Coord { row, col }
    }

    /// Check if the square is on the board.
    pub fn is_on_board(&self) -> bool {
        self.row < N && self.col < N
    }

    /// Return the square `steps` squares away in `direction`, if it is on the board.
    pub fn offset(&self, direction: Direction, steps: isize) -> Option<Coord> {
        let (dr, dc) = direction.delta();
        let row = self.row as isize + dr * steps;
        let col = self.col as isize + dc * steps;
        if (0..N as isize).contains(&row) && (0..N as isize).contains(&col) {
            Some(Coord::new(row as usize, col as usize))
        } else {
            None
        }
    }

    /// The (up to 4) squares that share an edge with this one.
    pub fn neighbors(&self) -> Vec<Coord> {
        [
            self.offset(Direction::Vertical, -1),
            self.offset(Direction::Vertical, 1),
            self.offset(Direction::Horizontal, -1),
            self.offset(Direction::Horizontal, 1),
        ]
        .iter()
        .flatten()
        .copied()
        .collect()
    }
}

/// Display the square as row letter and 1-based column, e.g. `H8` for the center.
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.row < 26 {
            write!(f, "{}{}", (b'A' + self.row as u8) as char, self.col + 1)
        } else {
            write!(f, "({},{})", self.row, self.col)
        }
    }
}

/// Direction in which a word is read.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    /// (row, col) step for one square forward
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
        }
    }

    pub fn cross(self) -> Direction {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Premium {
    NoBonus,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
}

use Premium::{DoubleLetter, DoubleWord, NoBonus, TripleLetter, TripleWord};

impl Premium {
    /// Multiplier applied to the letter on this square
    pub fn letter_multiplier(self) -> u32 {
        match self {
            DoubleLetter => 2,
            TripleLetter => 3,
            _ => 1,
        }
    }

    /// Multiplier applied to the whole word through this square
    pub fn word_multiplier(self) -> u32 {
        match self {
            DoubleWord => 2,
            TripleWord => 3,
            _ => 1,
        }
    }
}

impl fmt::Display for Premium {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NoBonus => write!(f, "--"),
            DoubleLetter => write!(f, "2l"),
            TripleLetter => write!(f, "3l"),
            DoubleWord => write!(f, "2w"),
            TripleWord => write!(f, "3w"),
        }
    }
}

impl FromStr for Premium {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "--" => Ok(NoBonus),
            "2l" => Ok(DoubleLetter),
            "3l" => Ok(TripleLetter),
            "2w" => Ok(DoubleWord),
            "3w" => Ok(TripleWord),
            _ => Err(Error::GridParseError(String::from(s))),
        }
    }
}

type Inner = [[Premium; N]; N];
/// Board grid, consisting of 15x15 (normal or premium) squares.
///
/// A premium square has a 2x or 3x letter bonus, or a 2x or 3x word bonus.
/// The center square at (7,7) is a double word square and must be used in the first turn.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid(Inner);

impl Deref for Grid {
    type Target = Inner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Grid {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_strings().join("\n"))
    }
}

impl Default for Grid {
    /// The standard layout
    /// ## Example
    /// ```
    /// # use scrabble_engine::{Coord, Grid, Premium};
    /// let grid = Grid::default();
    /// assert_eq!(grid.premium_at(Coord::new(7, 7)), Premium::DoubleWord);
    /// ```
    fn default() -> Grid {
        DEFAULT_GRID.clone()
    }
}

impl Grid {
    /// Create a new empty grid 15x15 cells with no bonus.
    fn empty() -> Grid {
        Grid([[NoBonus; N]; N])
    }

    /// Create a symmetrical board by mirroring a quarter board
    /// horizontally and vertically
    fn expand_quarter_board(qb: &[&str; Q]) -> Grid {
        let mut board = Grid::empty();
        for (i, row) in qb.iter().enumerate() {
            for (j, c) in row.split(' ').enumerate() {
                let val = c.parse().unwrap_or(NoBonus);
                board[i][j] = val;
                board[N - i - 1][j] = val;
                board[i][N - j - 1] = val;
                board[N - i - 1][N - j - 1] = val;
            }
        }
        board
    }

    /// Return the premium of the square at `coord`, or `NoBonus` when off the board.
    pub fn premium_at(&self, coord: Coord) -> Premium {
        if coord.is_on_board() {
            self[coord.row][coord.col]
        } else {
            NoBonus
        }
    }

    /// Get board cells as a vec of 15 strings
    pub fn to_strings(&self) -> Vec<String> {
        self.iter()
            .map(|row| {
                row.iter()
                    .map(Premium::to_string)
                    .collect::<Vec<String>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
    }

    /// Create a `Grid` from strings
    /// Parameter `grid` must have 15 rows, each row consisting of 15 elements joined by spaces.
    ///
    /// ## Errors
    /// If `grid` has wrong dimensions, or elements can not be parsed as a `Premium`.
    /// ## Examples
    /// ```
    /// # use scrabble_engine::{Grid, Error};
    /// let grid = Grid::default();
    /// let strings = grid.to_strings();
    /// assert_eq!(Grid::from_strings(&strings)?, grid);
    /// assert!(Grid::from_strings(&strings[1..]).is_err());
    /// # Ok::<(), Error>(())
    /// ```
    pub fn from_strings<S: AsRef<str>>(grid: &[S]) -> Result<Grid, Error> {
        if grid.len() != N {
            return Err(Error::InvalidRowCount(grid.len()));
        }
        let mut board = Grid::empty();
        for (i, row) in grid.iter().enumerate() {
            let cells: Vec<&str> = row.as_ref().split(' ').collect();
            if cells.len() != N {
                return Err(Error::InvalidRowLength(
                    String::from(row.as_ref()),
                    cells.len(),
                ));
            }
            for (j, &cell) in cells.iter().enumerate() {
                board[i][j] = cell.parse()?;
            }
        }
        Ok(board)
    }
}
