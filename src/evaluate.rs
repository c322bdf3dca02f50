//! Validation and scoring of a proposed move.
use crate::board::Board;
use crate::dictionary::{CustomWords, Dictionary};
use crate::grid::{Coord, Direction, CENTER};
use crate::tiles::{letter_value, Tile, TileId, RACK_SIZE};
use crate::MoveError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// Extra points for using all rack tiles in one move
pub const BINGO_BONUS: u32 = 50;

/// A tile tentatively put on the board during the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PendingPlacement {
    pub tile_id: TileId,
    pub coord: Coord,
    pub letter: char,
    pub value: u32,
}

impl PendingPlacement {
    pub fn new(tile: &Tile, coord: Coord) -> PendingPlacement {
        PendingPlacement {
            tile_id: tile.id,
            coord,
            letter: tile.letter,
            value: tile.value,
        }
    }
}

/// A word formed by a move, with its position and score.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FormedWord {
    pub word: String,
    pub start: Coord,
    pub direction: Direction,
    pub score: u32,
}

/// The result of a valid move.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveEvaluation {
    /// Formed words: the main word first, then the cross words
    pub words: Vec<FormedWord>,
    /// Sum of the word scores, plus the bingo bonus
    pub total_score: u32,
    /// All 7 rack tiles were used
    pub bingo: bool,
}

impl MoveEvaluation {
    /// The formed words as uppercase strings
    pub fn word_list(&self) -> Vec<String> {
        self.words.iter().map(|w| w.word.clone()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    Single,
    Line(Direction),
}

/// Combined view of the committed board and the pending tiles.
struct Position<'a> {
    board: &'a Board,
    pending: HashMap<Coord, &'a PendingPlacement>,
}

impl<'a> Position<'a> {
    fn is_filled(&self, coord: Coord) -> bool {
        self.pending.contains_key(&coord) || self.board.is_occupied(coord)
    }

    /// Collect the maximal run of filled squares through `anchor` in `direction`, and score it.
    /// Premiums only count under pending tiles.
    fn collect_word(&self, anchor: Coord, direction: Direction) -> FormedWord {
        let mut start = anchor;
        while let Some(prev) = start.offset(direction, -1) {
            if !self.is_filled(prev) {
                break;
            }
            start = prev;
        }

        let mut word = String::new();
        let mut points = 0;
        let mut word_multiplier = 1;
        let mut square = Some(start);
        while let Some(coord) = square {
            if let Some(tile) = self.pending.get(&coord) {
                let premium = self.board.premium_at(coord);
                points += tile.value * premium.letter_multiplier();
                word_multiplier *= premium.word_multiplier();
                word.push(tile.letter);
            } else if let Some(letter) = self.board.letter_at(coord) {
                points += letter_value(letter);
                word.push(letter);
            } else {
                break;
            }
            square = coord.offset(direction, 1);
        }
        FormedWord {
            word: word.to_uppercase(),
            start,
            direction,
            score: points * word_multiplier,
        }
    }
}

fn is_word_permitted<D: Dictionary + ?Sized>(
    word: &str,
    dictionary: &D,
    extra_words: &CustomWords,
) -> bool {
    word.chars().count() >= 2 && (dictionary.contains(word) || extra_words.contains(word))
}

fn shape(pending: &[PendingPlacement]) -> Result<Shape, MoveError> {
    if pending.len() == 1 {
        return Ok(Shape::Single);
    }
    let rows: HashSet<usize> = pending.iter().map(|p| p.coord.row).collect();
    let cols: HashSet<usize> = pending.iter().map(|p| p.coord.col).collect();
    if rows.len() == 1 {
        Ok(Shape::Line(Direction::Horizontal))
    } else if cols.len() == 1 {
        Ok(Shape::Line(Direction::Vertical))
    } else {
        Err(MoveError::NotInLine)
    }
}

/// Validate a proposed move against the committed `board`, and calculate the formed words and score.
///
/// A formed word is accepted if it is in `dictionary` or in `extra_words`.
///
/// ## Errors
/// Returns the first rule the move breaks, see [`MoveError`].
/// ## Examples
/// ```
/// use scrabble_engine::{evaluate_move, Board, Coord, CustomWords, Dealer, PendingPlacement, WordList};
/// let mut dealer = Dealer::seeded(0);
/// let board = Board::default();
/// let dictionary = WordList::from_words(&["cat"]);
/// let pending: Vec<PendingPlacement> = "CAT"
///     .chars()
///     .zip(6..)
///     .map(|(letter, col)| PendingPlacement::new(&dealer.tile(letter), Coord::new(7, col)))
///     .collect();
/// let evaluation = evaluate_move(&pending, &board, &dictionary, &CustomWords::new())?;
/// assert_eq!(evaluation.word_list(), vec!["CAT"]);
/// assert_eq!(evaluation.total_score, 10);
/// # Ok::<(), scrabble_engine::MoveError>(())
/// ```
#[instrument(skip_all, fields(tiles = pending.len()))]
pub fn evaluate_move<D: Dictionary + ?Sized>(
    pending: &[PendingPlacement],
    board: &Board,
    dictionary: &D,
    extra_words: &CustomWords,
) -> Result<MoveEvaluation, MoveError> {
    let result = check_move(pending, board, dictionary, extra_words);
    match &result {
        Ok(evaluation) => debug!(
            words = ?evaluation.word_list(),
            score = evaluation.total_score,
            "move accepted"
        ),
        Err(err) => debug!(%err, "move rejected"),
    }
    result
}

fn check_move<D: Dictionary + ?Sized>(
    pending: &[PendingPlacement],
    board: &Board,
    dictionary: &D,
    extra_words: &CustomWords,
) -> Result<MoveEvaluation, MoveError> {
    if pending.is_empty() {
        return Err(MoveError::NoTiles);
    }
    if let Some(tile) = pending.iter().find(|p| !p.coord.is_on_board()) {
        return Err(MoveError::OffBoard(tile.coord));
    }

    let mut squares = HashMap::new();
    for tile in pending {
        if squares.insert(tile.coord, tile).is_some() {
            return Err(MoveError::DuplicateSquare(tile.coord));
        }
    }
    if let Some(tile) = pending.iter().find(|p| board.is_occupied(p.coord)) {
        return Err(MoveError::SquareOccupied(tile.coord));
    }

    let shape = shape(pending)?;

    if board.is_empty() {
        if !squares.contains_key(&CENTER) {
            return Err(MoveError::CenterNotCovered);
        }
    } else if !pending.iter().any(|p| board.has_neighbor(p.coord)) {
        return Err(MoveError::NotConnected);
    }

    let position = Position {
        board,
        pending: squares,
    };

    if let Shape::Line(direction) = shape {
        let first = pending.iter().map(|p| p.coord).min().unwrap_or(CENTER);
        let last = pending.iter().map(|p| p.coord).max().unwrap_or(CENTER);
        let mut square = Some(first);
        while let Some(coord) = square {
            if !position.is_filled(coord) {
                return Err(MoveError::Gap);
            }
            if coord == last {
                break;
            }
            square = coord.offset(direction, 1);
        }
    }

    // main word(s) through the first tile, then the cross words through every tile
    let anchor = pending[0].coord;
    let mut candidates = Vec::new();
    match shape {
        Shape::Single => {
            candidates.push(position.collect_word(anchor, Direction::Horizontal));
            candidates.push(position.collect_word(anchor, Direction::Vertical));
        }
        Shape::Line(direction) => {
            candidates.push(position.collect_word(anchor, direction));
            for tile in pending {
                candidates.push(position.collect_word(tile.coord, direction.cross()));
            }
        }
    }

    let mut words: Vec<FormedWord> = Vec::new();
    for candidate in candidates {
        if candidate.word.chars().count() < 2 {
            continue;
        }
        if !is_word_permitted(&candidate.word, dictionary, extra_words) {
            return Err(MoveError::UnknownWord(candidate.word));
        }
        let seen = words
            .iter()
            .any(|w| w.start == candidate.start && w.direction == candidate.direction);
        if !seen {
            words.push(candidate);
        }
    }
    if words.is_empty() {
        return Err(MoveError::NoWordFormed);
    }

    let bingo = pending.len() == RACK_SIZE;
    let mut total_score: u32 = words.iter().map(|w| w.score).sum();
    if bingo {
        total_score += BINGO_BONUS;
    }
    Ok(MoveEvaluation {
        words,
        total_score,
        bingo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordList;
    use crate::grid::N;
    use crate::tilebag::Dealer;

    type Result<T> = std::result::Result<T, MoveError>;

    const TEST_STATE: &[&str] = &[
        "...............",
        "...............",
        "...............",
        "...............",
        "...............",
        ".......z.......",
        ".......o.......",
        ".....crab......",
        ".......r.......",
        "...............",
        "...............",
        "...............",
        "...............",
        "...............",
        "...............",
    ];

    const WORDS: &[&str] = &[
        "cat", "retain", "retains", "or", "ro", "ore", "be", "scrabs", "crabs", "zoar", "crab",
    ];

    fn test_board() -> Board {
        Board::default()
            .with_state_from_strings(TEST_STATE)
            .unwrap()
    }

    /// Pending tiles from (row, col, letter) triples
    fn tiles(layout: &[(usize, usize, char)]) -> Vec<PendingPlacement> {
        let mut dealer = Dealer::seeded(0);
        layout.iter()
            .map(|&(row, col, letter)| PendingPlacement::new(&dealer.tile(letter), Coord::new(row, col)))
            .collect()
    }

    /// Pending tiles spelling `word` from (row, col) in direction
    fn word_at(word: &str, row: usize, col: usize, direction: Direction) -> Vec<PendingPlacement> {
        let (dr, dc) = direction.delta();
        let layout: Vec<_> = word
            .chars()
            .enumerate()
            .map(|(i, c)| {
                (
                    row + i * dr as usize,
                    col + i * dc as usize,
                    c,
                )
            })
            .collect();
        tiles(&layout)
    }

    fn evaluate(pending: &[PendingPlacement], board: &Board) -> Result<MoveEvaluation> {
        let dictionary = WordList::from_words(WORDS);
        evaluate_move(pending, board, &dictionary, &CustomWords::new())
    }

    #[test]
    fn test_no_tiles() {
        assert_eq!(evaluate(&[], &Board::default()), Err(MoveError::NoTiles));
    }

    #[test]
    fn test_off_board() {
        let pending = tiles(&[(7, 7, 'A'), (7, N, 'B')]);
        assert_eq!(
            evaluate(&pending, &Board::default()),
            Err(MoveError::OffBoard(Coord::new(7, N)))
        );
    }

    #[test]
    fn test_duplicate_square() {
        let pending = tiles(&[(7, 7, 'A'), (7, 7, 'B')]);
        assert_eq!(
            evaluate(&pending, &Board::default()),
            Err(MoveError::DuplicateSquare(Coord::new(7, 7)))
        );
    }

    #[test]
    fn test_square_occupied() {
        let pending = tiles(&[(7, 8, 'S')]);
        assert_eq!(
            evaluate(&pending, &test_board()),
            Err(MoveError::SquareOccupied(Coord::new(7, 8)))
        );
    }

    #[test]
    fn test_not_in_line() {
        let pending = tiles(&[(7, 7, 'C'), (8, 8, 'A')]);
        assert_eq!(
            evaluate(&pending, &Board::default()),
            Err(MoveError::NotInLine)
        );
    }

    #[test]
    fn test_first_move_must_cover_center() {
        let board = Board::default();
        for pending in &[
            word_at("cat", 3, 3, Direction::Horizontal),
            word_at("cat", 3, 3, Direction::Vertical),
            word_at("cat", 7, 8, Direction::Horizontal),
            tiles(&[(0, 0, 'A')]),
        ] {
            assert_eq!(evaluate(pending, &board), Err(MoveError::CenterNotCovered));
        }
    }

    #[test]
    fn test_not_connected() {
        let pending = word_at("cat", 0, 0, Direction::Horizontal);
        assert_eq!(evaluate(&pending, &test_board()), Err(MoveError::NotConnected));
    }

    #[test]
    fn test_gap() {
        let pending = tiles(&[(7, 3, 'S'), (7, 9, 'S')]);
        assert_eq!(evaluate(&pending, &test_board()), Err(MoveError::Gap));
    }

    #[test]
    fn test_gap_filled_by_board() -> Result<()> {
        let pending = tiles(&[(7, 4, 'S'), (7, 9, 'S')]);
        let evaluation = evaluate(&pending, &test_board())?;
        assert_eq!(evaluation.word_list(), vec!["SCRABS"]);
        assert_eq!(evaluation.words[0].start, Coord::new(7, 4));
        assert_eq!(evaluation.total_score, 10);
        Ok(())
    }

    #[test]
    fn test_no_word_formed() {
        let pending = tiles(&[(7, 7, 'A')]);
        assert_eq!(
            evaluate(&pending, &Board::default()),
            Err(MoveError::NoWordFormed)
        );
    }

    #[test]
    fn test_unknown_word_and_extra_words() -> Result<()> {
        let board = Board::default();
        let dictionary = WordList::from_words(WORDS);
        let pending = word_at("dog", 7, 7, Direction::Vertical);
        assert_eq!(
            evaluate_move(&pending, &board, &dictionary, &CustomWords::new()),
            Err(MoveError::UnknownWord(String::from("DOG")))
        );
        let extra = CustomWords::from(&["Dog"][..]);
        let evaluation = evaluate_move(&pending, &board, &dictionary, &extra)?;
        assert_eq!(evaluation.word_list(), vec!["DOG"]);
        Ok(())
    }

    #[test]
    fn test_cat_through_center() -> Result<()> {
        let pending = word_at("cat", 7, 6, Direction::Horizontal);
        let evaluation = evaluate(&pending, &Board::default())?;
        assert_eq!(evaluation.word_list(), vec!["CAT"]);
        assert_eq!(evaluation.total_score, (3 + 1 + 1) * 2);
        assert!(!evaluation.bingo);
        Ok(())
    }

    #[test]
    fn test_word_multipliers_combine() -> Result<()> {
        let mut grid = Board::default().grid().to_strings();
        let mut row: Vec<&str> = grid[7].split(' ').collect();
        row[6] = "2w";
        row[8] = "3w";
        grid[7] = row.join(" ");
        let board = Board::default()
            .with_grid_from_strings(&grid)
            .unwrap();
        let pending = word_at("cat", 7, 6, Direction::Horizontal);
        assert_eq!(evaluate(&pending, &board)?.total_score, 5 * 2 * 2 * 3);
        Ok(())
    }

    #[test]
    fn test_bingo() -> Result<()> {
        let board = Board::default();
        let six = evaluate(&word_at("retain", 7, 4, Direction::Horizontal), &board)?;
        assert_eq!(six.total_score, 12);
        let seven = evaluate(&word_at("retains", 7, 4, Direction::Horizontal), &board)?;
        assert!(seven.bingo);
        assert_eq!(seven.total_score, 7 * 2 + BINGO_BONUS);
        Ok(())
    }

    #[test]
    fn test_single_tile_both_directions() -> Result<()> {
        // O on a double letter square forms OR and RO, the existing R keeps its base value
        let pending = tiles(&[(8, 6, 'O')]);
        let evaluation = evaluate(&pending, &test_board())?;
        assert_eq!(evaluation.word_list(), vec!["OR", "RO"]);
        assert_eq!(evaluation.words[0].score, 3);
        assert_eq!(evaluation.words[1].score, 3);
        assert_eq!(evaluation.total_score, 6);
        Ok(())
    }

    #[test]
    fn test_cross_words() -> Result<()> {
        let pending = tiles(&[(8, 6, 'O'), (8, 8, 'E')]);
        let evaluation = evaluate(&pending, &test_board())?;
        assert_eq!(evaluation.word_list(), vec!["ORE", "RO", "BE"]);
        let scores: Vec<u32> = evaluation.words.iter().map(|w| w.score).collect();
        assert_eq!(scores, vec![5, 3, 5]);
        assert_eq!(evaluation.total_score, 13);
        Ok(())
    }

    #[test]
    fn test_invalid_cross_word() {
        let dictionary = WordList::from_words(&["ore", "ro"]);
        let pending = tiles(&[(8, 6, 'O'), (8, 8, 'E')]);
        assert_eq!(
            evaluate_move(&pending, &test_board(), &dictionary, &CustomWords::new()),
            Err(MoveError::UnknownWord(String::from("BE")))
        );
    }

    #[test]
    fn test_extend_word() -> Result<()> {
        let pending = tiles(&[(7, 9, 'S')]);
        let evaluation = evaluate(&pending, &test_board())?;
        assert_eq!(evaluation.word_list(), vec!["CRABS"]);
        assert_eq!(evaluation.total_score, 9);
        Ok(())
    }
}
