//! The game state and its transitions.
//!
//! Every transition takes the current state by reference and returns a new [`GameState`].
//! The old state is never modified, so a caller either sees the complete transition or nothing.
use crate::board::{Board, Placement};
use crate::dictionary::{CustomWords, Dictionary};
use crate::evaluate::{evaluate_move, MoveEvaluation, PendingPlacement};
use crate::grid::{Coord, Grid};
use crate::rack::Rack;
use crate::tilebag::{Dealer, TileBag};
use crate::tiles::{Tile, TileId};
use crate::{ActionError, Error};
use multiset::HashMultiSet;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, instrument};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "player-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
    /// Can become negative after the end game penalties
    pub score: i32,
    pub rack: Rack,
}

/// Name and color of a player.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlayerConfig {
    pub name: String,
    pub color: String,
}

/// Settings for a new game.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameConfig {
    players: Vec<PlayerConfig>,
    /// Seed for the bag shuffles. A random seed is used if `None`.
    pub seed: Option<u64>,
    /// Premium layout of the board
    pub grid: Grid,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            players: vec![
                PlayerConfig {
                    name: String::from("Player 1"),
                    color: String::from("#2563eb"),
                },
                PlayerConfig {
                    name: String::from("Player 2"),
                    color: String::from("#16a34a"),
                },
            ],
            seed: None,
            grid: Grid::default(),
        }
    }
}

impl GameConfig {
    /// Set the players as (name, color) pairs, in turn order.
    /// ## Errors
    /// If `players` is empty.
    /// ## Examples
    /// ```
    /// use scrabble_engine::GameConfig;
    /// let config = GameConfig::default().with_players(&[("Ann", "red"), ("Bob", "blue"), ("Cy", "green")])?;
    /// assert_eq!(config.players().len(), 3);
    /// assert!(GameConfig::default().with_players(&[]).is_err());
    /// # Ok::<(), scrabble_engine::Error>(())
    /// ```
    pub fn with_players(mut self, players: &[(&str, &str)]) -> Result<GameConfig, Error> {
        if players.is_empty() {
            return Err(Error::NoPlayers);
        }
        self.players = players
            .iter()
            .map(|&(name, color)| PlayerConfig {
                name: String::from(name),
                color: String::from(color),
            })
            .collect();
        Ok(self)
    }

    /// Use a fixed seed, to get reproducible games
    pub fn with_seed(mut self, seed: u64) -> GameConfig {
        self.seed = Some(seed);
        self
    }

    /// Set the premium layout from string representation. See [`Grid::from_strings`].
    /// ## Errors
    /// If the grid has wrong dimensions or cannot be parsed.
    pub fn with_grid_from_strings<S: AsRef<str>>(mut self, grid: &[S]) -> Result<GameConfig, Error> {
        self.grid = Grid::from_strings(grid)?;
        Ok(self)
    }

    pub fn players(&self) -> &[PlayerConfig] {
        &self.players
    }

    /// A dealer as configured by `seed`
    pub fn dealer(&self) -> Dealer {
        match self.seed {
            Some(seed) => Dealer::seeded(seed),
            None => Dealer::default(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveStatus {
    Pending,
    Upheld,
    Overturned,
}

/// The most recently committed move, kept so it can be challenged and reverted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LastMoveSummary {
    pub player_id: PlayerId,
    pub move_id: u32,
    pub words: Vec<String>,
    pub score: u32,
    pub placements: Vec<Placement>,
    /// Tiles taken from the rack for this move
    pub played_tiles: Vec<Tile>,
    /// Tiles drawn from the bag after the move
    pub drawn_tiles: Vec<Tile>,
    pub can_be_challenged: bool,
    pub status: MoveStatus,
}

/// Outcome of a challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeVerdict {
    /// All words are valid, the move stands
    Upheld,
    /// The move is reverted because of these words
    Overturned { invalid_words: Vec<String> },
}

impl ChallengeVerdict {
    pub fn status(&self) -> MoveStatus {
        match self {
            ChallengeVerdict::Upheld => MoveStatus::Upheld,
            ChallengeVerdict::Overturned { .. } => MoveStatus::Overturned,
        }
    }
}

/// The complete state of a game.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameState {
    players: Vec<Player>,
    board: Board,
    bag: TileBag,
    current_player_id: PlayerId,
    turn: u32,
    consecutive_passes: u32,
    is_game_over: bool,
    winner_id: Option<PlayerId>,
    last_move: Option<LastMoveSummary>,
}

/// Subtract the rack values at the end of the game.
///
/// With a finishing player, the sum of all other racks is added to the finisher's score.
/// Without one, every player just loses the value of their own rack.
fn apply_rack_adjustments(players: &mut [Player], finisher: Option<PlayerId>) {
    let bonus: u32 = players
        .iter()
        .filter(|player| Some(player.id) != finisher)
        .map(|player| player.rack.value())
        .sum();
    for player in players.iter_mut() {
        if Some(player.id) == finisher {
            player.score += bonus as i32;
        } else {
            player.score -= player.rack.value() as i32;
        }
    }
}

/// The player with the highest score. On a tie the first of them in turn order wins.
fn determine_winner(players: &[Player]) -> Option<PlayerId> {
    let mut best: Option<&Player> = None;
    for player in players {
        if best.map_or(true, |b| player.score > b.score) {
            best = Some(player);
        }
    }
    best.map(|player| player.id)
}

impl GameState {
    /// Create a fresh game: a newly shuffled bag, and a full rack for every player.
    ///
    /// ## Examples
    /// ```
    /// use scrabble_engine::{GameConfig, GameState, TILE_COUNT};
    /// let config = GameConfig::default().with_seed(1);
    /// let state = GameState::new(&config, &mut config.dealer());
    /// assert_eq!(state.turn(), 1);
    /// assert_eq!(state.bag().len(), TILE_COUNT - 14);
    /// assert!(state.players().iter().all(|p| p.rack.len() == 7));
    /// ```
    pub fn new(config: &GameConfig, dealer: &mut Dealer) -> GameState {
        let mut bag = TileBag::new(dealer.rng());
        let players: Vec<Player> = config
            .players
            .iter()
            .enumerate()
            .map(|(i, player)| {
                let mut rack = Rack::new();
                rack.refill(&mut bag, dealer);
                Player {
                    id: PlayerId(i as u32 + 1),
                    name: player.name.clone(),
                    color: player.color.clone(),
                    score: 0,
                    rack,
                }
            })
            .collect();
        let current_player_id = players.first().map_or(PlayerId(1), |player| player.id);
        GameState {
            players,
            board: Board::new(config.grid.clone()),
            bag,
            current_player_id,
            turn: 1,
            consecutive_passes: 0,
            is_game_over: false,
            winner_id: None,
            last_move: None,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn bag(&self) -> &TileBag {
        &self.bag
    }

    pub fn current_player_id(&self) -> PlayerId {
        self.current_player_id
    }

    /// The turn counter, starting at 1. Every move, pass and exchange increments it.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn consecutive_passes(&self) -> u32 {
        self.consecutive_passes
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn winner_id(&self) -> Option<PlayerId> {
        self.winner_id
    }

    pub fn last_move(&self) -> Option<&LastMoveSummary> {
        self.last_move.as_ref()
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    fn player_index(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|player| player.id == id)
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.player(self.current_player_id)
    }

    /// The player after `from` (default: the current player) in turn order.
    /// An unknown `from` gives the current player.
    pub fn next_player_id(&self, from: Option<PlayerId>) -> PlayerId {
        let from = from.unwrap_or(self.current_player_id);
        match self.player_index(from) {
            Some(index) => self.players[(index + 1) % self.players.len()].id,
            None => self.current_player_id,
        }
    }

    /// Squares of the tiles placed in the last move, to highlight them.
    pub fn last_move_coords(&self) -> Vec<Coord> {
        self.last_move
            .as_ref()
            .map(|last| last.placements.iter().map(|p| p.coord).collect())
            .unwrap_or_default()
    }

    /// All letters in the game: in the bag, on the racks and on the board.
    /// The total is the same in every state of a game.
    pub fn tile_inventory(&self) -> HashMultiSet<char> {
        let mut letters = self.bag.composition();
        for player in &self.players {
            for tile in player.rack.iter() {
                letters.insert(tile.letter);
            }
        }
        for placement in self.board.placements() {
            letters.insert(placement.letter);
        }
        letters
    }

    fn current_index(&self) -> Result<usize, ActionError> {
        if self.is_game_over {
            return Err(ActionError::GameOver);
        }
        self.player_index(self.current_player_id)
            .ok_or(ActionError::NoCurrentPlayer)
    }

    fn close_last_move(&mut self) {
        if let Some(last) = self.last_move.as_mut() {
            last.can_be_challenged = false;
        }
    }

    fn finish(&mut self, finisher: Option<PlayerId>) {
        apply_rack_adjustments(&mut self.players, finisher);
        self.is_game_over = true;
        self.winner_id = determine_winner(&self.players);
        info!(winner = ?self.winner_id, "game over");
    }

    /// Commit the pending tiles of the current player as a move.
    ///
    /// The letters and values are taken from the rack tiles the placements refer to.
    /// ## Errors
    /// - [`ActionError::Move`] if the move breaks a rule, see [`evaluate_move`].
    /// - [`ActionError::UnknownTile`] if a placement refers to a tile that is not on the rack.
    /// - [`ActionError::GameOver`] or [`ActionError::NoCurrentPlayer`] if no move can be made.
    #[instrument(skip_all, fields(turn = self.turn, player = %self.current_player_id))]
    pub fn commit_move<D: Dictionary + ?Sized>(
        &self,
        pending: &[PendingPlacement],
        dictionary: &D,
        extra_words: &CustomWords,
        dealer: &mut Dealer,
    ) -> Result<(GameState, MoveEvaluation), ActionError> {
        let index = self.current_index()?;
        let rack = &self.players[index].rack;
        let mut used = HashSet::new();
        let mut placed = Vec::with_capacity(pending.len());
        for p in pending {
            let tile = rack.get(p.tile_id).ok_or(ActionError::UnknownTile(p.tile_id))?;
            if !used.insert(p.tile_id) {
                return Err(ActionError::UnknownTile(p.tile_id));
            }
            placed.push(PendingPlacement::new(tile, p.coord));
        }
        let evaluation = evaluate_move(&placed, &self.board, dictionary, extra_words)?;

        let mut next = self.clone();
        let player_id = self.current_player_id;
        let next_player_id = self.next_player_id(None);
        let player = &mut next.players[index];
        let ids: Vec<TileId> = placed.iter().map(|p| p.tile_id).collect();
        let played_tiles = player.rack.remove(&ids);
        let drawn_tiles = player.rack.refill(&mut next.bag, dealer);
        player.score += evaluation.total_score as i32;
        let finished = player.rack.is_empty() && next.bag.is_empty();

        let placements: Vec<Placement> = placed
            .iter()
            .map(|p| Placement {
                coord: p.coord,
                letter: p.letter,
                player_id,
                move_id: self.turn,
            })
            .collect();
        next.board.extend(placements.iter().copied());
        next.consecutive_passes = 0;
        next.turn += 1;
        info!(
            words = ?evaluation.word_list(),
            score = evaluation.total_score,
            "move played"
        );

        if finished {
            next.finish(Some(player_id));
            next.last_move = None;
        } else {
            next.current_player_id = next_player_id;
            next.last_move = Some(LastMoveSummary {
                player_id,
                move_id: self.turn,
                words: evaluation.word_list(),
                score: evaluation.total_score,
                placements,
                played_tiles,
                drawn_tiles,
                can_be_challenged: true,
                status: MoveStatus::Pending,
            });
        }
        Ok((next, evaluation))
    }

    /// The current player passes.
    ///
    /// After two passes by every player in a row the game ends, and every player loses the
    /// value of their rack.
    /// ## Errors
    /// [`ActionError::GameOver`] if the game is over.
    #[instrument(skip_all, fields(turn = self.turn, player = %self.current_player_id))]
    pub fn pass_turn(&self) -> Result<GameState, ActionError> {
        if self.is_game_over {
            return Err(ActionError::GameOver);
        }
        let mut next = self.clone();
        next.consecutive_passes += 1;
        info!(passes = next.consecutive_passes, "pass");
        if next.consecutive_passes as usize >= 2 * self.players.len() {
            next.finish(None);
        }
        next.current_player_id = self.next_player_id(None);
        next.turn += 1;
        next.close_last_move();
        Ok(next)
    }

    /// The current player returns the tiles `tile_ids` to the bag, and draws new ones.
    /// ## Errors
    /// - [`ActionError::NoTilesSelected`] if `tile_ids` is empty.
    /// - [`ActionError::BagTooSmall`] if the bag holds fewer tiles than are exchanged.
    /// - [`ActionError::UnknownTile`] if a tile is not on the rack.
    /// - [`ActionError::GameOver`] or [`ActionError::NoCurrentPlayer`].
    #[instrument(skip_all, fields(turn = self.turn, player = %self.current_player_id))]
    pub fn exchange_tiles(
        &self,
        tile_ids: &[TileId],
        dealer: &mut Dealer,
    ) -> Result<GameState, ActionError> {
        let index = self.current_index()?;
        if tile_ids.is_empty() {
            return Err(ActionError::NoTilesSelected);
        }
        if self.bag.len() < tile_ids.len() {
            return Err(ActionError::BagTooSmall {
                requested: tile_ids.len(),
                available: self.bag.len(),
            });
        }
        if let Some(&id) = tile_ids
            .iter()
            .find(|&&id| !self.players[index].rack.contains(id))
        {
            return Err(ActionError::UnknownTile(id));
        }

        let mut next = self.clone();
        let returned = next.players[index]
            .rack
            .exchange(tile_ids, &mut next.bag, dealer);
        info!(count = returned.len(), "tiles exchanged");
        next.current_player_id = self.next_player_id(None);
        next.turn += 1;
        next.consecutive_passes = 0;
        next.close_last_move();
        Ok(next)
    }

    /// Challenge the last move. Its words are checked against `dictionary` only; custom words
    /// do not count.
    ///
    /// If all words are valid the move stands and the challenger loses the turn. Otherwise the
    /// move is taken back: its tiles return to the rack of the player who made it, the tiles
    /// drawn after it go back to the bag, and its score is subtracted.
    /// ## Errors
    /// [`ActionError::NothingToChallenge`] if there is no move that can be challenged.
    #[instrument(skip_all, fields(turn = self.turn))]
    pub fn challenge_last_move<D: Dictionary + ?Sized>(
        &self,
        dictionary: &D,
        dealer: &mut Dealer,
    ) -> Result<(GameState, ChallengeVerdict), ActionError> {
        let last = self
            .last_move
            .as_ref()
            .filter(|last| last.can_be_challenged)
            .ok_or(ActionError::NothingToChallenge)?;
        let invalid_words: Vec<String> = last
            .words
            .iter()
            .filter(|word| !dictionary.contains(word))
            .cloned()
            .collect();

        let mut next = self.clone();
        if invalid_words.is_empty() {
            info!(words = ?last.words, "challenge failed, move upheld");
            next.current_player_id = self.next_player_id(None);
            next.turn += 1;
            if let Some(last) = next.last_move.as_mut() {
                last.can_be_challenged = false;
                last.status = MoveStatus::Upheld;
            }
            return Ok((next, ChallengeVerdict::Upheld));
        }

        let index = self
            .player_index(last.player_id)
            .ok_or(ActionError::NoCurrentPlayer)?;
        next.board.remove_move(last.move_id);
        let player = &mut next.players[index];
        let drawn: Vec<TileId> = last.drawn_tiles.iter().map(|tile| tile.id).collect();
        let mut to_bag = player.rack.remove(&drawn);
        for &tile in &last.played_tiles {
            if let Err(tile) = player.rack.push(tile) {
                to_bag.push(tile);
            }
        }
        next.bag.return_tiles(&to_bag, dealer.rng());
        player.score = (player.score - last.score as i32).max(0);
        next.turn = self.turn.saturating_sub(1).max(1);
        next.last_move = None;
        info!(words = ?invalid_words, "challenge succeeded, move overturned");
        Ok((next, ChallengeVerdict::Overturned { invalid_words }))
    }

    /// Check if the current player holds tiles that cannot spell any word of `dictionary`.
    pub fn current_rack_is_stuck<D: Dictionary + ?Sized>(&self, dictionary: &D) -> bool {
        if self.is_game_over {
            return false;
        }
        match self.current_player() {
            Some(player) => !player.rack.is_empty() && !player.rack.can_spell_any_word(dictionary),
            None => false,
        }
    }

    /// Exchange the complete rack of the current player, without using a turn.
    ///
    /// Returns `None` if the bag is empty or there is no current player.
    pub fn auto_exchange(&self, dealer: &mut Dealer) -> Option<GameState> {
        let index = self.current_index().ok()?;
        if self.bag.is_empty() {
            debug!("no playable word and the bag is empty");
            return None;
        }
        let mut next = self.clone();
        let player = &mut next.players[index];
        let ids: Vec<TileId> = player.rack.iter().map(|tile| tile.id).collect();
        player.rack.exchange(&ids, &mut next.bag, dealer);
        info!(player = %player.id, rack = %player.rack, "rack exchanged automatically");
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordList;
    use crate::grid::CENTER;
    use crate::tiles::TILE_COUNT;

    type Result<T> = std::result::Result<T, ActionError>;

    const WORDS: &[&str] = &["cat", "cats", "at", "ta", "act"];

    fn new_state(seed: u64) -> (GameState, Dealer) {
        let config = GameConfig::default().with_seed(seed);
        let mut dealer = config.dealer();
        (GameState::new(&config, &mut dealer), dealer)
    }

    /// Give every player the letters in `racks`, taking them from the bag.
    fn set_racks(state: &mut GameState, racks: &[&str], dealer: &mut Dealer) {
        let mut bag: Vec<char> = state.bag.to_vec();
        for player in state.players.iter() {
            bag.extend(player.rack.iter().map(|tile| tile.letter));
        }
        for (player, letters) in state.players.iter_mut().zip(racks) {
            for letter in letters.chars() {
                let pos = bag.iter().position(|&c| c == letter).unwrap();
                bag.remove(pos);
            }
            player.rack = Rack::from_letters(letters, dealer);
        }
        state.bag = TileBag::from_letters(bag.iter().collect::<String>());
    }

    fn place(state: &GameState, letters: &str, row: usize, col: usize) -> Vec<PendingPlacement> {
        let rack = &state.current_player().unwrap().rack;
        let mut used = Vec::new();
        letters
            .chars()
            .enumerate()
            .map(|(i, letter)| {
                let tile = rack
                    .iter()
                    .find(|t| t.letter == letter && !used.contains(&t.id))
                    .unwrap();
                used.push(tile.id);
                PendingPlacement::new(tile, Coord::new(row, col + i))
            })
            .collect()
    }

    fn total_tiles(state: &GameState) -> usize {
        state.tile_inventory().len()
    }

    #[test]
    fn test_new_state() {
        let (state, _) = new_state(1);
        assert_eq!(state.players().len(), 2);
        assert_eq!(state.current_player_id(), PlayerId(1));
        assert_eq!(state.next_player_id(None), PlayerId(2));
        assert_eq!(state.next_player_id(Some(PlayerId(2))), PlayerId(1));
        assert_eq!(state.next_player_id(Some(PlayerId(9))), PlayerId(1));
        assert_eq!(total_tiles(&state), TILE_COUNT);
        assert!(state.last_move().is_none());
    }

    #[test]
    fn test_commit_move() -> Result<()> {
        let (mut state, mut dealer) = new_state(2);
        set_racks(&mut state, &["CATXYZQ", "EEIIOUN"], &mut dealer);
        let dictionary = WordList::from_words(WORDS);
        let pending = place(&state, "CAT", 7, 6);
        let (next, evaluation) =
            state.commit_move(&pending, &dictionary, &CustomWords::new(), &mut dealer)?;
        assert_eq!(evaluation.total_score, 10);
        assert_eq!(next.players()[0].score, 10);
        assert_eq!(next.players()[0].rack.len(), 7);
        assert_eq!(next.current_player_id(), PlayerId(2));
        assert_eq!(next.turn(), 2);
        assert_eq!(next.board().len(), 3);
        assert_eq!(total_tiles(&next), TILE_COUNT);
        let last = next.last_move().unwrap();
        assert_eq!(last.words, vec!["CAT"]);
        assert_eq!(last.move_id, 1);
        assert_eq!(last.played_tiles.len(), 3);
        assert_eq!(last.drawn_tiles.len(), 3);
        assert!(last.can_be_challenged);
        assert_eq!(last.status, MoveStatus::Pending);
        assert_eq!(next.last_move_coords().len(), 3);
        // the old state is untouched
        assert_eq!(state.turn(), 1);
        assert!(state.board().is_empty());
        Ok(())
    }

    #[test]
    fn test_commit_rejected() {
        let (mut state, mut dealer) = new_state(3);
        set_racks(&mut state, &["CATXYZQ", "EEIIOUN"], &mut dealer);
        let dictionary = WordList::from_words(WORDS);
        let pending = place(&state, "CAT", 3, 3);
        assert_eq!(
            state
                .commit_move(&pending, &dictionary, &CustomWords::new(), &mut dealer)
                .unwrap_err(),
            ActionError::Move(crate::MoveError::CenterNotCovered)
        );
        let mut foreign = place(&state, "C", 7, 7);
        foreign[0].tile_id = TileId(10_000);
        assert_eq!(
            state
                .commit_move(&foreign, &dictionary, &CustomWords::new(), &mut dealer)
                .unwrap_err(),
            ActionError::UnknownTile(TileId(10_000))
        );
    }

    #[test]
    fn test_pass_ends_game() -> Result<()> {
        let (mut state, mut dealer) = new_state(4);
        set_racks(&mut state, &["QZ", "AE"], &mut dealer);
        state.players[0].score = 30;
        state.players[1].score = 25;
        for i in 0..3 {
            state = state.pass_turn()?;
            assert_eq!(state.consecutive_passes(), i + 1);
            assert!(!state.is_game_over());
        }
        state = state.pass_turn()?;
        assert!(state.is_game_over());
        assert_eq!(state.turn(), 5);
        assert_eq!(state.players()[0].score, 10);
        assert_eq!(state.players()[1].score, 23);
        assert_eq!(state.winner_id(), Some(PlayerId(2)));
        assert_eq!(state.pass_turn().unwrap_err(), ActionError::GameOver);
        Ok(())
    }

    #[test]
    fn test_finishing_player_gets_bonus() -> Result<()> {
        let (mut state, mut dealer) = new_state(5);
        set_racks(&mut state, &["CAT", "QZ"], &mut dealer);
        state.bag = TileBag::default();
        let dictionary = WordList::from_words(WORDS);
        let pending = place(&state, "CAT", 7, 5);
        let (next, _) = state.commit_move(&pending, &dictionary, &CustomWords::new(), &mut dealer)?;
        assert!(next.is_game_over());
        assert_eq!(next.players()[0].score, 10 + 20);
        assert_eq!(next.players()[1].score, -20);
        assert_eq!(next.winner_id(), Some(PlayerId(1)));
        assert_eq!(next.current_player_id(), PlayerId(1));
        assert!(next.last_move().is_none());
        Ok(())
    }

    #[test]
    fn test_tie_goes_to_first_player() {
        let (mut state, _) = new_state(6);
        state.players[0].score = 12;
        state.players[1].score = 12;
        assert_eq!(determine_winner(&state.players), Some(PlayerId(1)));
    }

    #[test]
    fn test_exchange() -> Result<()> {
        let (state, mut dealer) = new_state(7);
        let ids: Vec<TileId> = state.players[0].rack.iter().take(3).map(|t| t.id).collect();
        assert_eq!(
            state.exchange_tiles(&[], &mut dealer).unwrap_err(),
            ActionError::NoTilesSelected
        );
        let next = state.exchange_tiles(&ids, &mut dealer)?;
        assert_eq!(next.turn(), 2);
        assert_eq!(next.current_player_id(), PlayerId(2));
        assert_eq!(next.bag().len(), state.bag().len());
        assert!(ids.iter().all(|&id| !next.players()[0].rack.contains(id)));
        assert_eq!(total_tiles(&next), TILE_COUNT);

        let mut small = state.clone();
        small.bag = TileBag::from_letters("EE");
        assert_eq!(
            small.exchange_tiles(&ids, &mut dealer).unwrap_err(),
            ActionError::BagTooSmall {
                requested: 3,
                available: 2
            }
        );
        Ok(())
    }

    #[test]
    fn test_challenge_upheld() -> Result<()> {
        let (mut state, mut dealer) = new_state(8);
        set_racks(&mut state, &["CATXYZQ", "EEIIOUN"], &mut dealer);
        let dictionary = WordList::from_words(WORDS);
        let pending = place(&state, "CAT", 7, 7);
        let (state, _) = state.commit_move(&pending, &dictionary, &CustomWords::new(), &mut dealer)?;
        let (next, verdict) = state.challenge_last_move(&dictionary, &mut dealer)?;
        assert_eq!(verdict, ChallengeVerdict::Upheld);
        assert_eq!(verdict.status(), MoveStatus::Upheld);
        assert_eq!(next.current_player_id(), PlayerId(1));
        assert_eq!(next.turn(), 3);
        assert_eq!(next.board().len(), 3);
        let last = next.last_move().unwrap();
        assert!(!last.can_be_challenged);
        assert_eq!(last.status, MoveStatus::Upheld);
        assert_eq!(
            next.challenge_last_move(&dictionary, &mut dealer).unwrap_err(),
            ActionError::NothingToChallenge
        );
        Ok(())
    }

    #[test]
    fn test_challenge_overturned() -> Result<()> {
        let (mut state, mut dealer) = new_state(9);
        set_racks(&mut state, &["DOGXYZQ", "EEIIOUN"], &mut dealer);
        state.players[0].score = 4;
        let dictionary = WordList::from_words(WORDS);
        let custom = CustomWords::from(&["dog"][..]);
        let before = state.clone();
        let pending = place(&state, "DOG", 7, 7);
        let (played, _) = state.commit_move(&pending, &dictionary, &custom, &mut dealer)?;
        assert_eq!(played.players()[0].score, 4 + 10);

        let (next, verdict) = played.challenge_last_move(&dictionary, &mut dealer)?;
        assert_eq!(
            verdict,
            ChallengeVerdict::Overturned {
                invalid_words: vec![String::from("DOG")]
            }
        );
        assert_eq!(verdict.status(), MoveStatus::Overturned);
        assert!(next.board().is_empty());
        assert_eq!(next.players()[0].score, 4);
        let mut ids: Vec<TileId> = next.players()[0].rack.iter().map(|t| t.id).collect();
        let mut before_ids: Vec<TileId> = before.players()[0].rack.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        before_ids.sort_unstable();
        assert_eq!(ids, before_ids);
        let mut bag = next.bag().to_vec();
        let mut before_bag = before.bag().to_vec();
        bag.sort_unstable();
        before_bag.sort_unstable();
        assert_eq!(bag, before_bag);
        assert_eq!(next.turn(), 1);
        assert_eq!(next.current_player_id(), PlayerId(2));
        assert!(next.last_move().is_none());
        assert_eq!(total_tiles(&next), TILE_COUNT);
        Ok(())
    }

    #[test]
    fn test_pass_closes_challenge() -> Result<()> {
        let (mut state, mut dealer) = new_state(10);
        set_racks(&mut state, &["CATXYZQ", "EEIIOUN"], &mut dealer);
        let dictionary = WordList::from_words(WORDS);
        let pending = place(&state, "CAT", 7, 7);
        let (state, _) = state.commit_move(&pending, &dictionary, &CustomWords::new(), &mut dealer)?;
        let state = state.pass_turn()?;
        assert!(!state.last_move().unwrap().can_be_challenged);
        assert_eq!(
            state.challenge_last_move(&dictionary, &mut dealer).unwrap_err(),
            ActionError::NothingToChallenge
        );
        Ok(())
    }

    #[test]
    fn test_auto_exchange() {
        let (mut state, mut dealer) = new_state(11);
        set_racks(&mut state, &["QZ", "EEIIOUN"], &mut dealer);
        let dictionary = WordList::from_words(WORDS);
        assert!(state.current_rack_is_stuck(&dictionary));
        let next = state.auto_exchange(&mut dealer).unwrap();
        assert_eq!(next.turn(), state.turn());
        assert_eq!(next.players()[0].score, 0);
        assert_eq!(next.players()[0].rack.len(), 7);
        assert_eq!(total_tiles(&next), TILE_COUNT);

        state.bag = TileBag::default();
        assert!(state.auto_exchange(&mut dealer).is_none());
    }

    #[test]
    fn test_first_tile_at_center() -> Result<()> {
        let (mut state, mut dealer) = new_state(12);
        set_racks(&mut state, &["ATXYZQV", "EEIIOUN"], &mut dealer);
        let dictionary = WordList::from_words(WORDS);
        let pending = place(&state, "AT", CENTER.row, CENTER.col);
        let (next, evaluation) =
            state.commit_move(&pending, &dictionary, &CustomWords::new(), &mut dealer)?;
        assert_eq!(evaluation.word_list(), vec!["AT"]);
        assert_eq!(next.players()[0].score, 4);
        Ok(())
    }
}
