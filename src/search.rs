/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{Color, Evaluator, Game, Score};

/// Default depth at which to search if none is supplied.
pub const DEFAULT_DEPTH: u8 = 3;

/// The result of a search: the best successor position found, its score,
/// and the total nodes visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Number of nodes visited.
    pub nodes: u64,

    /// The successor position the side to move should play into.
    ///
    /// `None` means the side to move has no legal moves. That is an explicit
    /// empty result, not an error; callers must treat it as "no move
    /// available".
    pub best: Option<Game>,

    /// Evaluation backed up to the root for `best`.
    pub score: Score,
}

impl Default for SearchResult {
    /// A default search result should initialize to a *very bad* value,
    /// since there isn't a move to play.
    #[inline(always)]
    fn default() -> Self {
        Self {
            nodes: 0,
            best: None,
            score: -Score::INF,
        }
    }
}

/// Configuration variables for executing a [`Search`].
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Depth at which to execute the search.
    ///
    /// The search visits every position reachable within this many moves;
    /// there is no pruning and no time management, so the tree is walked
    /// exhaustively.
    pub depth: u8,
}

impl Default for SearchConfig {
    #[inline(always)]
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
        }
    }
}

/// Executes a fixed-depth minimax search on a position.
///
/// Light is always the maximizing side and Dark always minimizes; the
/// maximizing flag at the root follows the side to move. Each recursive
/// branch operates on its own copy of the game, so sibling branches never
/// observe each other's mutations and the root game remains untouched.
pub struct Search<'a> {
    /// The game to search on.
    ///
    /// This game is copied whenever moves are applied to it.
    game: &'a Game,

    /// The result of the search, updated as the search runs.
    result: SearchResult,

    /// Flag signalling to other threads that this search is running.
    ///
    /// Cleared when the search concludes.
    is_searching: Arc<AtomicBool>,

    /// Configuration variables for this instance of the search.
    config: SearchConfig,
}

impl<'a> Search<'a> {
    /// Construct a new [`Search`] instance to execute on the provided [`Game`].
    #[inline(always)]
    pub fn new(game: &'a Game, is_searching: Arc<AtomicBool>, config: SearchConfig) -> Self {
        Self {
            game,
            result: SearchResult::default(),
            is_searching,
            config,
        }
    }

    /// Start the search, returning its result once every line has been
    /// examined.
    ///
    /// Prints a summary line once finished, then clears the searching flag.
    pub fn start(mut self) -> SearchResult {
        let maximizing = self.game.side_to_move().is_light();
        let (score, best) = self.minimax(*self.game, self.config.depth, maximizing);

        self.result.score = score;
        self.result.best = best;

        println!(
            "info depth {} nodes {} score {score}",
            self.config.depth, self.result.nodes
        );

        // Search has concluded; alert other threads that we are no longer searching
        self.is_searching.store(false, Ordering::Relaxed);

        self.result
    }

    /// Primary location of search logic.
    ///
    /// Runs plain [minimax](https://www.chessprogramming.org/Minimax),
    /// not negamax: the tie-break below is asymmetric and part of the
    /// engine's observable behavior.
    ///
    /// Returns the extremal backed-up score and the successor that produced
    /// it. At a terminal node (depth exhausted or a side out of pieces) the
    /// returned position is the node itself; at an interior node with no
    /// successors the score stays at its sentinel and the position is
    /// `None`.
    pub fn minimax(&mut self, game: Game, depth: u8, maximizing: bool) -> (Score, Option<Game>) {
        self.result.nodes += 1;

        if depth == 0 || game.winner().is_some() {
            return (Evaluator::new(&game).eval(), Some(game));
        }

        let color = if maximizing { Color::Light } else { Color::Dark };
        let mut best = None;

        if maximizing {
            let mut max_eval = -Score::INF;
            for successor in game.successors(color) {
                let (eval, _) = self.minimax(successor, depth - 1, false);

                // On a tie, the most recently examined successor is retained
                if eval >= max_eval {
                    max_eval = eval;
                    best = Some(successor);
                }
            }
            (max_eval, best)
        } else {
            let mut min_eval = Score::INF;
            for successor in game.successors(color) {
                let (eval, _) = self.minimax(successor, depth - 1, true);

                if eval <= min_eval {
                    min_eval = eval;
                    best = Some(successor);
                }
            }
            (min_eval, best)
        }
    }
}

/// Runs a fixed-depth minimax search on `game` and returns the extremal
/// score along with the best successor position, if any.
///
/// `maximizing` selects the side whose moves are enumerated at the root:
/// Light when `true`, Dark otherwise. The caller replaces its live game
/// wholesale with the returned successor when one is present.
///
/// # Example
/// ```
/// # use leapfrog::{minimax, Evaluator, Game};
/// // At depth 0, the search returns the evaluation of the position itself
/// let game = Game::default();
/// let (score, best) = minimax(&game, 0, true);
/// assert_eq!(score, Evaluator::new(&game).eval());
/// assert_eq!(best, Some(game));
/// ```
#[inline(always)]
pub fn minimax(game: &Game, depth: u8, maximizing: bool) -> (Score, Option<Game>) {
    let config = SearchConfig { depth };
    let mut search = Search::new(game, Arc::default(), config);

    search.minimax(*game, depth, maximizing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Piece, Square};

    #[test]
    fn test_depth_zero_returns_evaluation() {
        let fens = [
            "d1d1d1d1/1d1d1d1d/d1d1d1d1/8/8/1l1l1l1l/l1l1l1l1/1l1l1l1l l",
            "8/8/8/5d2/4l3/8/8/8 l",
            "8/8/8/8/8/1l6/8/7L l",
        ];

        for fen in fens {
            let game = Game::from_fen(fen).unwrap();
            for maximizing in [true, false] {
                let (score, best) = minimax(&game, 0, maximizing);
                assert_eq!(score, Evaluator::new(&game).eval());
                assert_eq!(best, Some(game));
            }
        }
    }

    #[test]
    fn test_exhausted_side_is_terminal_but_still_evaluated() {
        // Dark has no pieces left; depth 0 must still evaluate as usual,
        // and deeper searches must not recurse past the finished game
        let game = Game::from_fen("8/8/8/8/8/1l6/8/7L l").unwrap();

        let (score, best) = minimax(&game, 0, true);
        assert_eq!(score, Evaluator::new(&game).eval());
        assert_eq!(best, Some(game));

        let (score, best) = minimax(&game, 3, true);
        assert_eq!(score, Evaluator::new(&game).eval());
        assert_eq!(best, Some(game));
    }

    #[test]
    fn test_maximizer_takes_the_capture() {
        // Light at (3, 4) can jump Dark at (4, 5)
        let game = Game::from_fen("8/8/8/5d2/4l3/8/8/8 l").unwrap();

        let (score, best) = minimax(&game, 1, true);
        let best = best.expect("a legal move exists");

        assert_eq!(score, Score(Piece::MAN_VALUE));
        assert_eq!(best.board().remaining(Color::Dark), 0);
        assert_eq!(best.winner(), Some(Color::Light));
    }

    #[test]
    fn test_minimizer_takes_the_capture() {
        // Dark at (4, 5) can jump Light at (3, 4), landing on (2, 3)
        let game = Game::from_fen("8/8/8/5d2/4l3/8/8/8 d").unwrap();

        let (score, best) = minimax(&game, 1, false);
        let best = best.expect("a legal move exists");

        assert_eq!(score, -Score(Piece::MAN_VALUE));
        assert_eq!(best.board().remaining(Color::Light), 0);
        assert_eq!(best.winner(), Some(Color::Dark));
    }

    #[test]
    fn test_tie_break_prefers_later_successor() {
        // Light's lone man on (3, 0) has exactly two moves, to (2, 1) and
        // (4, 1), and no line at depth 2 changes material, so every score
        // ties. The retained move must be the one enumerated last: (4, 1).
        let game = Game::from_fen("d7/8/8/8/l7/8/8/8 l").unwrap();

        let moves = game.moves_from(Square::new(3, 0)).unwrap();
        assert_eq!(moves.len(), 2);

        let (score, best) = minimax(&game, 2, true);
        let best = best.expect("a legal move exists");

        assert_eq!(score, Score::DRAW);
        assert!(best.board().piece_at(Square::new(4, 1)).is_some());
        assert!(best.board().is_empty(Square::new(3, 0)));
    }

    #[test]
    fn test_no_legal_moves_yields_empty_result() {
        // Light's lone man on (0, 7) is fully boxed in: the quiet step is
        // occupied and the jump's landing square is occupied as well
        let game = Game::from_fen("8/8/8/8/8/5d2/6d1/7l l").unwrap();

        let (score, best) = minimax(&game, 2, true);
        assert_eq!(score, -Score::INF);
        assert!(best.is_none());

        // The same stuck position from the minimizer's point of view
        let (score, best) = minimax(&game, 2, false);
        assert!(score < Score::INF);
        assert!(best.is_some());
    }

    #[test]
    fn test_search_counts_nodes_and_clears_flag() {
        let game = Game::default();
        let is_searching = Arc::new(AtomicBool::new(true));

        let config = SearchConfig { depth: 2 };
        let result = Search::new(&game, Arc::clone(&is_searching), config).start();

        // Root + 7 successors + 49 replies
        assert_eq!(result.nodes, 57);
        assert!(result.best.is_some());
        assert!(!is_searching.load(Ordering::Relaxed));
    }
}
