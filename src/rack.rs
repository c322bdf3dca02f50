use crate::dictionary::Dictionary;
use crate::tilebag::{Dealer, TileBag};
use crate::tiles::{Tile, TileId, RACK_SIZE};
use multiset::HashMultiSet;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::FromIterator;
use std::slice::Iter;
use tinyvec::ArrayVec;

type Tiles = ArrayVec<[Tile; RACK_SIZE]>;

/// The hand of a player: at most 7 tiles.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rack(Tiles);

impl fmt::Display for Rack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letters())
    }
}

impl FromIterator<Tile> for Rack {
    /// Collect tiles into a rack. Tiles past the 7th are dropped.
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        Rack(iter.into_iter().take(RACK_SIZE).collect())
    }
}

impl Rack {
    pub fn new() -> Rack {
        Rack::default()
    }

    /// Build a rack from `letters`, with fresh identities from `dealer`.
    pub fn from_letters(letters: &str, dealer: &mut Dealer) -> Rack {
        letters.chars().map(|letter| dealer.tile(letter)).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= RACK_SIZE
    }

    pub fn iter(&self) -> Iter<Tile> {
        self.0.iter()
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.0.iter().find(|tile| tile.id == id)
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.get(id).is_some()
    }

    /// The letters on the rack as a string
    pub fn letters(&self) -> String {
        self.0.iter().map(|tile| tile.letter).collect()
    }

    /// Sum of the values of the tiles on the rack
    pub fn value(&self) -> u32 {
        self.0.iter().map(|tile| tile.value).sum()
    }

    /// Add `tile`. Returns the tile back if the rack is full.
    pub fn push(&mut self, tile: Tile) -> Result<(), Tile> {
        match self.0.try_push(tile) {
            None => Ok(()),
            Some(tile) => Err(tile),
        }
    }

    /// Draw letters from `bag` one at a time until the rack holds `limit` tiles or the bag is
    /// empty. Each letter becomes a new tile. Returns the drawn tiles.
    pub fn refill_to(&mut self, limit: usize, bag: &mut TileBag, dealer: &mut Dealer) -> Vec<Tile> {
        let limit = limit.min(RACK_SIZE);
        let mut drawn = Vec::new();
        while self.len() < limit {
            let letter = match bag.draw_one() {
                Some(letter) => letter,
                None => break,
            };
            let tile = dealer.tile(letter);
            self.0.push(tile);
            drawn.push(tile);
        }
        drawn
    }

    /// Refill the rack to 7 tiles. See [`refill_to`](Rack::refill_to).
    /// ## Examples
    /// ```
    /// use scrabble_engine::{Dealer, Rack, TileBag};
    /// let mut dealer = Dealer::seeded(1);
    /// let mut bag = TileBag::from_letters("catdog");
    /// let mut rack = Rack::new();
    /// let drawn = rack.refill(&mut bag, &mut dealer);
    /// assert_eq!(drawn.len(), 6);
    /// assert_eq!(rack.letters(), "GODTAC");
    /// assert!(bag.is_empty());
    /// ```
    pub fn refill(&mut self, bag: &mut TileBag, dealer: &mut Dealer) -> Vec<Tile> {
        self.refill_to(RACK_SIZE, bag, dealer)
    }

    /// Remove the tiles with the given ids. Returns the removed tiles, which keep their identity.
    /// Ids that are not on the rack are ignored.
    pub fn remove(&mut self, ids: &[TileId]) -> Vec<Tile> {
        let (removed, remaining): (Vec<Tile>, Vec<Tile>) =
            self.0.iter().copied().partition(|tile| ids.contains(&tile.id));
        self.0 = remaining.into_iter().collect();
        removed
    }

    /// Return the tiles with the given ids to `bag` and refill the rack.
    ///
    /// The caller must check that the bag holds at least as many tiles as are exchanged.
    /// Returns the tiles that were put back in the bag.
    pub fn exchange(&mut self, ids: &[TileId], bag: &mut TileBag, dealer: &mut Dealer) -> Vec<Tile> {
        let returned = self.remove(ids);
        bag.return_tiles(&returned, dealer.rng());
        self.refill(bag, dealer);
        returned
    }

    /// The letters on the rack as a multiset.
    pub fn composition(&self) -> HashMultiSet<char> {
        let mut letters = HashMultiSet::new();
        for tile in self.0.iter() {
            letters.insert(tile.letter);
        }
        letters
    }

    /// Check if any word of two or more letters in `dictionary` can be spelled with the tiles
    /// on this rack, ignoring the board.
    pub fn can_spell_any_word<D: Dictionary + ?Sized>(&self, dictionary: &D) -> bool {
        let available = self.composition();
        let words = dictionary.words();
        #[cfg(feature = "rayon")]
        {
            words.par_iter().any(|word| spells(&available, word))
        }
        #[cfg(not(feature = "rayon"))]
        {
            words.iter().any(|word| spells(&available, word))
        }
    }
}

/// Check if `word` has at least two letters and uses no letter more often than `available` holds.
fn spells(available: &HashMultiSet<char>, word: &str) -> bool {
    if word.chars().count() < 2 {
        return false;
    }
    let mut needed = HashMultiSet::new();
    for letter in word.chars() {
        needed.insert(letter.to_ascii_uppercase());
    }
    word.chars()
        .map(|letter| letter.to_ascii_uppercase())
        .all(|letter| needed.count_of(&letter) <= available.count_of(&letter))
}
