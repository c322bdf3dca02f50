use crate::tiles::{Tile, TileIds, TILESET};
use multiset::HashMultiSet;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// The pool of undrawn letters.
///
/// Letters are drawn from the end of the sequence. The bag only stores raw letters,
/// a [`Tile`] identity is assigned when a letter is drawn.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TileBag(Vec<char>);

impl Deref for TileBag {
    type Target = [char];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TileBag {
    /// Create a full bag with the standard distribution, shuffled with `rng`.
    /// ## Examples
    /// ```
    /// use scrabble_engine::{Dealer, TileBag, TILE_COUNT};
    /// let mut dealer = Dealer::seeded(7);
    /// let bag = TileBag::new(dealer.rng());
    /// assert_eq!(bag.len(), TILE_COUNT);
    /// ```
    pub fn new<R: Rng>(rng: &mut R) -> TileBag {
        let mut letters = Vec::new();
        for &(letter, count, _points) in TILESET.iter() {
            letters.extend(std::iter::repeat(letter).take(count as usize));
        }
        letters.shuffle(rng);
        TileBag(letters)
    }

    /// Create a bag holding `letters` in draw order: the last letter is drawn first.
    pub fn from_letters<T: AsRef<str>>(letters: T) -> TileBag {
        TileBag(
            letters
                .as_ref()
                .chars()
                .map(|c| c.to_ascii_uppercase())
                .collect(),
        )
    }

    /// Remove up to `n` letters. Fewer letters are returned when the bag runs out.
    pub fn draw(&mut self, n: usize) -> Vec<char> {
        let keep = self.0.len().saturating_sub(n);
        let mut drawn = self.0.split_off(keep);
        drawn.reverse();
        drawn
    }

    /// Draw a single letter, if any are left.
    pub fn draw_one(&mut self) -> Option<char> {
        self.0.pop()
    }

    /// Put the letters of `tiles` back and shuffle the bag.
    pub fn return_tiles<R: Rng>(&mut self, tiles: &[Tile], rng: &mut R) {
        self.0.extend(tiles.iter().map(|tile| tile.letter));
        self.0.shuffle(rng);
    }

    /// The letters in the bag as a multiset.
    pub fn composition(&self) -> HashMultiSet<char> {
        let mut letters = HashMultiSet::new();
        for &letter in &self.0 {
            letters.insert(letter);
        }
        letters
    }
}

/// Owns the randomness and tile identities of a game.
///
/// Everything that shuffles the bag or wraps a drawn letter in a new [`Tile`] goes
/// through the dealer, so a seeded dealer gives a reproducible game.
#[derive(Debug, Clone)]
pub struct Dealer {
    rng: StdRng,
    ids: TileIds,
}

impl Default for Dealer {
    fn default() -> Self {
        Dealer::new(StdRng::from_entropy())
    }
}

impl Dealer {
    pub fn new(rng: StdRng) -> Dealer {
        Dealer {
            rng,
            ids: TileIds::new(),
        }
    }

    /// A dealer with reproducible shuffles.
    pub fn seeded(seed: u64) -> Dealer {
        Dealer::new(StdRng::seed_from_u64(seed))
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Wrap `letter` in a tile with a fresh identity
    pub fn tile(&mut self, letter: char) -> Tile {
        self.ids.tile(letter)
    }
}
