//! A game session: the state of a game plus the input of the current turn.
use crate::dictionary::{CustomWords, Dictionary};
use crate::evaluate::{MoveEvaluation, PendingPlacement};
use crate::grid::Coord;
use crate::state::{ChallengeVerdict, GameConfig, GameState, Player, PlayerId};
use crate::tilebag::Dealer;
use crate::tiles::TileId;
use crate::{ActionError, MoveError};
use tracing::{debug, info};

/// What an action did to the game.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    MovePlayed(MoveEvaluation),
    Passed,
    TilesExchanged(usize),
    Challenged(ChallengeVerdict),
    /// The action was ignored because the game is over
    Ignored,
}

/// A game between players sharing one screen.
///
/// The session holds the tiles placed on the board during the current turn and the tiles
/// selected for an exchange. Committing them, passing, exchanging or challenging replaces the
/// whole [`GameState`] at once.
///
/// When the current player cannot spell a single word of the dictionary with their rack, the
/// rack is exchanged automatically, at most once per player and turn.
///
/// ## Examples
/// ```
/// use scrabble_engine::{Event, Game, GameConfig, WordList};
/// let dictionary = WordList::from_words(&["ab", "ba"]);
/// let mut game = Game::with_config(dictionary, GameConfig::default().with_seed(42));
/// assert_eq!(game.pass_turn()?, Event::Passed);
/// assert_eq!(game.state().turn(), 2);
/// # Ok::<(), scrabble_engine::ActionError>(())
/// ```
#[derive(Debug)]
pub struct Game<D: Dictionary> {
    dictionary: D,
    config: GameConfig,
    dealer: Dealer,
    state: GameState,
    pending: Vec<PendingPlacement>,
    exchange_selection: Vec<TileId>,
    custom_words: CustomWords,
    auto_exchange_key: Option<(PlayerId, u32)>,
}

impl<D: Dictionary> Game<D> {
    /// Start a game with two players
    pub fn new(dictionary: D) -> Game<D> {
        Game::with_config(dictionary, GameConfig::default())
    }

    pub fn with_config(dictionary: D, config: GameConfig) -> Game<D> {
        let mut dealer = config.dealer();
        let state = GameState::new(&config, &mut dealer);
        let mut game = Game {
            dictionary,
            config,
            dealer,
            state,
            pending: Vec::new(),
            exchange_selection: Vec::new(),
            custom_words: CustomWords::new(),
            auto_exchange_key: None,
        };
        game.check_auto_exchange();
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn dictionary(&self) -> &D {
        &self.dictionary
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.state.current_player()
    }

    /// Tiles placed on the board in this turn, not yet committed
    pub fn pending(&self) -> &[PendingPlacement] {
        &self.pending
    }

    pub fn exchange_selection(&self) -> &[TileId] {
        &self.exchange_selection
    }

    pub fn custom_words(&self) -> &CustomWords {
        &self.custom_words
    }

    /// Put tile `tile_id` of the current player's rack on `coord`.
    ///
    /// A tile that was already placed moves to the new square. A pending tile on `coord` is
    /// taken back.
    /// ## Errors
    /// - [`ActionError::Move`] with [`MoveError::OffBoard`] if `coord` is outside the board.
    /// - [`ActionError::SquareOccupied`] if a committed tile is on `coord`.
    /// - [`ActionError::UnknownTile`] if the tile is not on the rack.
    pub fn place_tile(&mut self, tile_id: TileId, coord: Coord) -> Result<(), ActionError> {
        if self.state.is_game_over() {
            return Ok(());
        }
        if !coord.is_on_board() {
            return Err(MoveError::OffBoard(coord).into());
        }
        if self.state.board().is_occupied(coord) {
            return Err(ActionError::SquareOccupied(coord));
        }
        let tile = *self
            .current_player()
            .and_then(|player| player.rack.get(tile_id))
            .ok_or(ActionError::UnknownTile(tile_id))?;
        self.pending
            .retain(|p| p.tile_id != tile_id && p.coord != coord);
        self.pending.push(PendingPlacement::new(&tile, coord));
        Ok(())
    }

    /// Take back a pending tile. Returns false if it was not placed.
    pub fn remove_pending(&mut self, tile_id: TileId) -> bool {
        let len = self.pending.len();
        self.pending.retain(|p| p.tile_id != tile_id);
        self.pending.len() < len
    }

    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Select or deselect a rack tile for an exchange. Returns true if the tile is now selected.
    pub fn toggle_exchange_selection(&mut self, tile_id: TileId) -> bool {
        if let Some(pos) = self.exchange_selection.iter().position(|&id| id == tile_id) {
            self.exchange_selection.remove(pos);
            return false;
        }
        let on_rack = self
            .current_player()
            .map_or(false, |player| player.rack.contains(tile_id));
        if on_rack {
            self.exchange_selection.push(tile_id);
        }
        on_rack
    }

    /// Accept `word` in this game, on top of the dictionary.
    /// Returns false if the word is empty or was already added.
    pub fn add_custom_word(&mut self, word: &str) -> bool {
        let added = self.custom_words.add(word);
        if added {
            info!(word, "custom word added");
        }
        added
    }

    /// Commit the pending tiles as a move.
    ///
    /// On error the pending tiles stay in place, so the player can fix the move.
    /// ## Errors
    /// See [`GameState::commit_move`].
    pub fn commit_move(&mut self) -> Result<Event, ActionError> {
        let result = self.state.commit_move(
            &self.pending,
            &self.dictionary,
            &self.custom_words,
            &mut self.dealer,
        );
        let (next, evaluation) = match ignore_game_over(result)? {
            Some(transition) => transition,
            None => return Ok(Event::Ignored),
        };
        self.apply(next);
        Ok(Event::MovePlayed(evaluation))
    }

    pub fn pass_turn(&mut self) -> Result<Event, ActionError> {
        match ignore_game_over(self.state.pass_turn())? {
            Some(next) => {
                self.apply(next);
                Ok(Event::Passed)
            }
            None => Ok(Event::Ignored),
        }
    }

    /// Exchange the selected tiles.
    /// ## Errors
    /// See [`GameState::exchange_tiles`].
    pub fn exchange_tiles(&mut self) -> Result<Event, ActionError> {
        let count = self.exchange_selection.len();
        let result = self
            .state
            .exchange_tiles(&self.exchange_selection, &mut self.dealer);
        match ignore_game_over(result)? {
            Some(next) => {
                self.apply(next);
                Ok(Event::TilesExchanged(count))
            }
            None => Ok(Event::Ignored),
        }
    }

    /// Challenge the last move against the dictionary. Custom words are not accepted.
    /// ## Errors
    /// [`ActionError::NothingToChallenge`] if there is no move that can be challenged.
    pub fn challenge_last_move(&mut self) -> Result<Event, ActionError> {
        if self.state.is_game_over() {
            return Ok(Event::Ignored);
        }
        let (next, verdict) = self
            .state
            .challenge_last_move(&self.dictionary, &mut self.dealer)?;
        self.apply(next);
        Ok(Event::Challenged(verdict))
    }

    /// Start a new game with the same configuration.
    pub fn reset(&mut self) {
        self.state = GameState::new(&self.config, &mut self.dealer);
        self.pending.clear();
        self.exchange_selection.clear();
        self.custom_words.clear();
        self.auto_exchange_key = None;
        info!("new game");
        self.check_auto_exchange();
    }

    fn apply(&mut self, next: GameState) {
        self.state = next;
        self.pending.clear();
        self.exchange_selection.clear();
        self.check_auto_exchange();
    }

    /// Exchange the rack of a stuck player. Runs once for each combination of player and turn.
    fn check_auto_exchange(&mut self) {
        let key = (self.state.current_player_id(), self.state.turn());
        if self.auto_exchange_key == Some(key) {
            return;
        }
        if !self.state.current_rack_is_stuck(&self.dictionary) {
            return;
        }
        self.auto_exchange_key = Some(key);
        if let Some(next) = self.state.auto_exchange(&mut self.dealer) {
            self.state = next;
            self.pending.clear();
            self.exchange_selection.clear();
        }
    }
}

/// Turn the errors that mean "nothing to do" into `None`.
fn ignore_game_over<T>(result: Result<T, ActionError>) -> Result<Option<T>, ActionError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ActionError::GameOver) | Err(ActionError::NoCurrentPlayer) => {
            debug!("action ignored");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
