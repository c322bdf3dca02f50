use crate::grid::Coord;
use crate::tiles::TileId;
use thiserror::Error;

#[derive(Error, Debug)]
/// Errors that can be returned while setting up a game
pub enum Error {
    /// Error reading wordfile
    #[error("Wordfile \"{path}\" could not be read")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    /// Character is not one of the tile letters `A`..`Z`
    #[error("Invalid letter '{0}'")]
    InvalidLetter(char),

    /// Error parsing board state or grid from strings
    #[error("Invalid number of rows {0} (expect 15)")]
    InvalidRowCount(usize),

    /// Parsing a row on the board needs 15 cells
    #[error("Invalid row \"{0}\": length {1}, expect 15")]
    InvalidRowLength(String, usize),

    /// Error parsing bonus cell
    #[error("Invalid grid bonus cell: \"{0}\"")]
    GridParseError(String),

    /// A game needs at least one player
    #[error("A game needs at least one player")]
    NoPlayers,
}

/// Reasons why a proposed move is rejected.
///
/// The `Display` text is meant to be shown to the player, who can then fix the move and retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("Place tiles on the board before committing the move.")]
    NoTiles,

    #[error("Square {0} is outside the board.")]
    OffBoard(Coord),

    #[error("Each tile in a move must be on its own square.")]
    DuplicateSquare(Coord),

    #[error("Square {0} is already occupied.")]
    SquareOccupied(Coord),

    #[error("All tiles of a move must be placed in a single row or column.")]
    NotInLine,

    #[error("The first word must cover the center square.")]
    CenterNotCovered,

    #[error("Every move must connect to a word already on the board.")]
    NotConnected,

    #[error("The new word must be contiguous, without empty squares between its letters.")]
    Gap,

    #[error("The word \"{0}\" is not in the dictionary.")]
    UnknownWord(String),

    #[error("A move must form at least one valid word.")]
    NoWordFormed,
}

/// Errors reported by the actions of a [`Game`](crate::Game).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error("Select the tiles you want to exchange.")]
    NoTilesSelected,

    #[error("The bag holds {available} tiles, too few to exchange {requested}.")]
    BagTooSmall { requested: usize, available: usize },

    #[error("There is no move to challenge.")]
    NothingToChallenge,

    #[error("Square {0} is already occupied.")]
    SquareOccupied(Coord),

    #[error("Tile {0} is not on the rack of the current player.")]
    UnknownTile(TileId),

    /// The game has ended. A [`Game`](crate::Game) ignores actions in this case.
    #[error("The game is over.")]
    GameOver,

    /// The current player id refers to no player
    #[error("There is no current player.")]
    NoCurrentPlayer,
}
