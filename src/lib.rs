//! A Scrabble engine for Rust.
//! <br>
//! This crate implements the rules of a Scrabble game for players sharing one screen:
//! the tile bag and racks, the premium board, validation and scoring of moves,
//! exchanges, passes, challenges and the end of the game.
//! It can use the `rayon` crate to check racks against the dictionary in parallel.
//!
//! # How to use `scrabble_engine`
//! Start by creating a [`Game`] with a dictionary. A [`WordList`] can be read from a file with
//! one word per line, or built from a list of words. Any type that implements [`Dictionary`]
//! will do.
//! By default two players play on the standard board, with a random bag.
//! Use a [`GameConfig`] to change the players, the board layout, or to fix the seed.
//!
//! During a turn the current player places tiles from the rack on the board, and then commits them.
//! A rejected move leaves the placed tiles in place, and the error tells the player what is wrong.
//!
//! # Basic usage
//!  ```
//! use scrabble_engine::{Coord, Event, Game, GameConfig, WordList};
//! # fn main() -> Result<(), scrabble_engine::ActionError> {
//! let dictionary = WordList::from_words(&["rust", "rest"]);
//! let mut game = Game::with_config(dictionary, GameConfig::default().with_seed(42));
//! let tiles: Vec<_> = game.current_player().unwrap().rack.iter().copied().collect();
//! // place the first two tiles right of the center square
//! game.place_tile(tiles[0].id, Coord::new(7, 7))?;
//! game.place_tile(tiles[1].id, Coord::new(7, 8))?;
//! match game.commit_move() {
//!     Ok(Event::MovePlayed(evaluation)) => println!("{:?} scores {}", evaluation.word_list(), evaluation.total_score),
//!     Ok(event) => println!("{:?}", event),
//!     Err(e) => println!("{}", e),
//! }
//! game.pass_turn()?;
//! println!("{}", game.state().board());
//! # Ok(())
//! # }
//! ```
mod board;
mod dictionary;
mod error;
mod evaluate;
mod game;
mod grid;
mod rack;
mod state;
mod tilebag;
mod tiles;

pub use crate::board::{Board, Placement};
pub use crate::dictionary::{CustomWords, Dictionary, WordList};
pub use crate::error::{ActionError, Error, MoveError};
pub use crate::evaluate::{evaluate_move, FormedWord, MoveEvaluation, PendingPlacement, BINGO_BONUS};
pub use crate::game::{Event, Game};
pub use crate::grid::{Coord, Direction, Grid, Premium, CENTER, N};
pub use crate::rack::Rack;
pub use crate::state::{
    ChallengeVerdict, GameConfig, GameState, LastMoveSummary, MoveStatus, Player, PlayerConfig,
    PlayerId,
};
pub use crate::tilebag::{Dealer, TileBag};
pub use crate::tiles::{letter_value, Tile, TileId, TileIds, RACK_SIZE, TILESET, TILE_COUNT};
