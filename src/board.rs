use crate::grid::{Coord, Grid, Premium, N};
use crate::state::PlayerId;
use crate::tiles::tile_letter;
use crate::Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tile permanently bound to a square after a committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    pub coord: Coord,
    pub letter: char,
    pub player_id: PlayerId,
    /// The turn in which the tile was placed
    pub move_id: u32,
}

type Cells = [[Option<char>; N]; N];

/// Display the board state as 15 lines of 15 squares.
/// Empty squares show as ".".
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = self
            .cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.unwrap_or('.')).collect())
            .collect::<Vec<String>>()
            .join("\n");
        write!(f, "{}", repr)
    }
}

/// The committed tiles on a 15x15 board, with the premium layout of its squares.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Board {
    grid: Grid,
    placements: Vec<Placement>,
    cells: Cells,
}

impl Default for Board {
    fn default() -> Self {
        Board::new(Grid::default())
    }
}

impl Board {
    /// Create a new empty board with the given premium layout.
    pub fn new(grid: Grid) -> Board {
        Board {
            grid,
            placements: Vec::new(),
            cells: [[None; N]; N],
        }
    }

    /// Set board cells from string representation
    /// ## Errors
    /// If the grid has wrong dimensions or cannot be parsed as valid premium squares.
    pub fn with_grid_from_strings<S: AsRef<str>>(mut self, grid: &[S]) -> Result<Board, Error> {
        self.grid = Grid::from_strings(grid)?;
        Ok(self)
    }

    /// Parse board state from a list of strings.
    /// The list must contain 15 rows of 15 characters; `.` or ` ` is an empty square.
    /// The tiles become placements of move 0.
    /// ## Errors
    /// If the list of strings has wrong dimensions or contains other characters than letters.
    ///
    /// ## Examples
    /// ```
    /// use scrabble_engine::{Board, Coord};
    /// let state = &[
    ///     "...............",
    ///     "...............",
    ///     "...............",
    ///     "...............",
    ///     "...............",
    ///     "...............",
    ///     "...............",
    ///     ".....crab......",
    ///     "...............",
    ///     "...............",
    ///     "...............",
    ///     "...............",
    ///     "...............",
    ///     "...............",
    ///     "...............",
    /// ];
    /// let board = Board::default().with_state_from_strings(state)?;
    /// assert_eq!(board.letter_at(Coord::new(7, 7)), Some('A'));
    /// assert_eq!(board.len(), 4);
    /// # Ok::<(), scrabble_engine::Error>(())
    /// ```
    pub fn with_state_from_strings<S: AsRef<str>>(mut self, rows: &[S]) -> Result<Board, Error> {
        if rows.len() != N {
            return Err(Error::InvalidRowCount(rows.len()));
        }
        let mut placements = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let len = row.chars().count();
            if len != N {
                return Err(Error::InvalidRowLength(String::from(row), len));
            }
            for (j, c) in row.chars().enumerate() {
                if c == '.' || c == ' ' {
                    continue;
                }
                placements.push(Placement {
                    coord: Coord::new(i, j),
                    letter: tile_letter(c)?,
                    player_id: PlayerId::default(),
                    move_id: 0,
                });
            }
        }
        self.placements.clear();
        self.cells = [[None; N]; N];
        self.extend(placements);
        Ok(self)
    }

    /// Return the premium layout
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn premium_at(&self, coord: Coord) -> Premium {
        self.grid.premium_at(coord)
    }

    /// All placements, in the order they were made
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Number of tiles on the board
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Check if no tile has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Return letter at `coord`, or None if empty square or outside grid.
    pub fn letter_at(&self, coord: Coord) -> Option<char> {
        if coord.is_on_board() {
            self.cells[coord.row][coord.col]
        } else {
            None
        }
    }

    /// Check if the square at `coord` is occupied.
    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.letter_at(coord).is_some()
    }

    /// Check if any square sharing an edge with `coord` is occupied.
    pub fn has_neighbor(&self, coord: Coord) -> bool {
        coord.neighbors().into_iter().any(|c| self.is_occupied(c))
    }

    /// Add placements to the board. Placements on occupied or off-board squares are ignored.
    pub(crate) fn extend<I: IntoIterator<Item = Placement>>(&mut self, placements: I) {
        for placement in placements {
            let Coord { row, col } = placement.coord;
            if placement.coord.is_on_board() && self.cells[row][col].is_none() {
                self.cells[row][col] = Some(placement.letter);
                self.placements.push(placement);
            }
        }
    }

    /// Remove all placements made in move `move_id`. Returns the removed placements.
    pub(crate) fn remove_move(&mut self, move_id: u32) -> Vec<Placement> {
        let (removed, kept): (Vec<Placement>, Vec<Placement>) = self
            .placements
            .iter()
            .copied()
            .partition(|placement| placement.move_id == move_id);
        for placement in &removed {
            self.cells[placement.coord.row][placement.coord.col] = None;
        }
        self.placements = kept;
        removed
    }
}
