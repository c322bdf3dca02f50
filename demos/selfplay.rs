use anyhow::Result;
use scrabble_engine::{
    evaluate_move, Coord, CustomWords, Dictionary, Direction, Event, Game, GameConfig, GameState,
    PendingPlacement, Tile, WordList, N,
};
use std::time::Instant;
use tracing::{info, warn};

const WORDS: &[&str] = &[
    "at", "ta", "an", "na", "in", "it", "is", "si", "on", "no", "or", "to", "so", "re", "er", "ne",
    "en", "te", "et", "de", "ed", "la", "al", "el", "le", "ai", "oi", "io", "ea", "ae", "oe", "eo",
    "tea", "eat", "ate", "tan", "ant", "nat", "net", "ten", "ent", "tin", "nit", "sit", "its",
    "tis", "son", "nos", "ons", "ore", "roe", "toe", "rot", "tor", "ort", "lot", "old", "lode",
    "dole", "rate", "tear", "tare", "earn", "near", "rant", "tarn", "stone", "notes", "onset",
    "tones", "train", "stain", "satin", "saint", "relation", "oriental", "retain", "retains",
    "stare", "tears", "rates", "aster", "rose", "sore", "eros", "ores", "roes", "dose", "does",
    "odes", "idea", "aide", "side", "dies", "tide", "edit", "diet", "tied",
];

const MAX_ACTIONS: usize = 1000;

/// Find the highest scoring placement of a dictionary word, using the tiles of the current player.
fn best_move<D: Dictionary>(
    state: &GameState,
    dictionary: &D,
    words: &[&str],
) -> Option<(Vec<PendingPlacement>, u32)> {
    let player = state.current_player()?;
    let board = state.board();
    let mut best: Option<(Vec<PendingPlacement>, u32)> = None;
    for &word in words {
        let letters: Vec<char> = word.to_uppercase().chars().collect();
        for row in 0..N {
            for col in 0..N {
                for &direction in &[Direction::Horizontal, Direction::Vertical] {
                    let mut used: Vec<Tile> = Vec::new();
                    let mut pending = Vec::new();
                    let mut fits = true;
                    for (i, &letter) in letters.iter().enumerate() {
                        let coord = match Coord::new(row, col).offset(direction, i as isize) {
                            Some(coord) => coord,
                            None => {
                                fits = false;
                                break;
                            }
                        };
                        match board.letter_at(coord) {
                            Some(c) if c == letter => continue,
                            Some(_) => {
                                fits = false;
                                break;
                            }
                            None => {}
                        }
                        let tile = player
                            .rack
                            .iter()
                            .find(|t| t.letter == letter && !used.iter().any(|u| u.id == t.id));
                        match tile {
                            Some(&tile) => {
                                used.push(tile);
                                pending.push(PendingPlacement::new(&tile, coord));
                            }
                            None => {
                                fits = false;
                                break;
                            }
                        }
                    }
                    if !fits || pending.is_empty() {
                        continue;
                    }
                    let score = match evaluate_move(&pending, board, dictionary, &CustomWords::new()) {
                        Ok(evaluation) => evaluation.total_score,
                        Err(_) => continue,
                    };
                    if best.as_ref().map_or(true, |(_, s)| score > *s) {
                        best = Some((pending, score));
                    }
                }
            }
        }
    }
    best
}

fn play<D: Dictionary>(game: &mut Game<D>, words: &[&str]) -> Result<Event> {
    if let Some((pending, score)) = best_move(game.state(), game.dictionary(), words) {
        for p in &pending {
            game.place_tile(p.tile_id, p.coord)?;
        }
        match game.commit_move() {
            Ok(event) => return Ok(event),
            Err(e) => {
                warn!(score, "{}", e);
                game.clear_pending();
            }
        }
    }
    if game.state().bag().len() >= 7 {
        let ids: Vec<_> = game.current_player().map_or(Vec::new(), |p| p.rack.iter().map(|t| t.id).collect());
        for id in ids {
            game.toggle_exchange_selection(id);
        }
        return Ok(game.exchange_tiles()?);
    }
    Ok(game.pass_turn()?)
}

fn run() -> Result<()> {
    let dictionary = match std::env::args().nth(1) {
        Some(wordfile) => WordList::from_file(&wordfile)?,
        None => WordList::from_words(WORDS),
    };
    info!("{}", dictionary);
    let words: Vec<String> = dictionary.words().iter().map(|w| w.to_string()).collect();
    let words: Vec<&str> = words.iter().map(String::as_str).collect();

    let mut game = Game::with_config(dictionary, GameConfig::default().with_seed(42));
    let now = Instant::now();
    let mut actions = 0;
    while !game.state().is_game_over() && actions < MAX_ACTIONS {
        actions += 1;
        let player = game.state().current_player_id();
        let event = play(&mut game, &words)?;
        info!(%player, turn = game.state().turn(), "{:?}", event);
    }
    let dt = now.elapsed().as_secs_f32();
    let state = game.state();
    println!("{}", state.board());
    for player in state.players() {
        println!("{}: {}", player.name, player.score);
    }
    if let Some(winner) = state.winner_id().and_then(|id| state.player(id)) {
        println!("Winner: {}", winner.name);
    }
    eprintln!("game took {:.2} s", dt);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
