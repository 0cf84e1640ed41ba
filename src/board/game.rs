/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};

use super::{movegen, Board, Color, Move, MoveList, Piece, Square};

/// A game of checkers: a [`Board`] plus the side to move.
///
/// This is the primary type for working with a game, and the type the search
/// operates on. It is `Copy`, so exploring a successor means handing the
/// recursion its own independent board; a parent's game is never modified by
/// its children.
///
/// The basic methods you're probably looking for are [`Game::from_fen`],
/// [`Game::make_move`], and [`Game::successors`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Game {
    /// The current board, including piece layout and counters.
    board: Board,

    /// The [`Color`] of the current player.
    side_to_move: Color,
}

impl Game {
    /// Creates a new [`Game`] from the provided [`Board`] and side to move.
    #[inline(always)]
    pub const fn new(board: Board, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
        }
    }

    /// Creates a new [`Game`] from a position string.
    ///
    /// The format is the placement field of [`Board::from_fen`], a space,
    /// and the side-to-move char (`l` or `d`).
    ///
    /// # Example
    /// ```
    /// # use leapfrog::Game;
    /// let game = Game::from_fen("8/8/8/8/4l3/8/8/7d d").unwrap();
    /// assert!(game.side_to_move().is_dark());
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut split = fen.trim().split(' ');

        let placements = split
            .next()
            .ok_or(anyhow!("Position string must have piece placements"))?;
        let board = Board::from_fen(placements)?;

        let side_to_move = split.next().unwrap_or("l").parse()?;

        Ok(Self::new(board, side_to_move))
    }

    /// Generates a position string for this [`Game`].
    ///
    /// # Example
    /// ```
    /// # use leapfrog::Game;
    /// let game = Game::default();
    /// assert_eq!(
    ///     game.to_fen(),
    ///     "d1d1d1d1/1d1d1d1d/d1d1d1d1/8/8/1l1l1l1l/l1l1l1l1/1l1l1l1l l"
    /// );
    /// ```
    #[inline(always)]
    pub fn to_fen(&self) -> String {
        format!("{} {}", self.board.to_fen(), self.side_to_move)
    }

    /// Fetches the current [`Board`].
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Fetches the [`Color`] of the player whose turn it is.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Toggles the side to move without touching the board.
    ///
    /// This is equivalent to passing the turn.
    #[inline(always)]
    pub fn toggle_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Fetches the winner of the game, if one exists.
    ///
    /// See [`Board::winner`].
    #[inline(always)]
    pub const fn winner(&self) -> Option<Color> {
        self.board.winner()
    }

    /// Computes every legal [`Move`] for the piece on the provided square.
    ///
    /// Fails if the square is empty.
    pub fn moves_from(&self, square: Square) -> Result<MoveList> {
        let piece = self
            .board
            .piece_at(square)
            .ok_or(anyhow!("No piece on {square}"))?;

        Ok(movegen::moves_for(&self.board, piece))
    }

    /// Computes every legal `(piece, move)` pair for the side to move.
    ///
    /// Pieces are visited in row-major scan order and each piece's moves in
    /// generator order, so the enumeration is deterministic.
    pub fn get_legal_moves(&self) -> Vec<(Piece, Move)> {
        let mut moves = Vec::new();

        for piece in self.board.all_pieces(self.side_to_move) {
            for mv in movegen::moves_for(&self.board, piece) {
                moves.push((piece, mv));
            }
        }

        moves
    }

    /// Applies the provided [`Move`] to `piece` and passes the turn to the
    /// opponent.
    ///
    /// No legality check is performed; see [`Game::make_move_checked`].
    #[inline(always)]
    pub fn make_move(&mut self, piece: Piece, mv: &Move) {
        self.board.apply_move(piece, mv);
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Validates `from` -> `to` against the move generator's output and
    /// applies it, relocating the piece and then removing its victims.
    ///
    /// Fails if `from` holds no piece of the side to move, or the generator
    /// does not offer `to` as a destination for that piece.
    pub fn make_move_checked(&mut self, from: Square, to: Square) -> Result<Move> {
        let piece = self
            .board
            .piece_at(from)
            .ok_or(anyhow!("No piece on {from}"))?;

        if piece.color() != self.side_to_move {
            bail!(
                "It is not {}'s turn to move (piece on {from} is {})",
                piece.color().name(),
                piece.name(),
            );
        }

        let moves = movegen::moves_for(&self.board, piece);
        let Some(mv) = moves.get(to).cloned() else {
            bail!("{} cannot legally reach {to}", piece.name());
        };

        self.make_move(piece, &mv);
        Ok(mv)
    }

    /// Copies `self` and returns the [`Game`] after `piece` has made `mv`.
    #[inline(always)]
    pub fn with_move_made(&self, piece: Piece, mv: &Move) -> Self {
        let mut copied = *self;
        copied.make_move(piece, mv);
        copied
    }

    /// Enumerates every successor [`Game`] reachable by one legal move of
    /// any piece belonging to `color`.
    ///
    /// Each successor owns an independent board copy and has the turn passed
    /// to `color`'s opponent. An empty result means `color` has no legal
    /// moves; that is a normal outcome, not an error.
    pub fn successors(&self, color: Color) -> Vec<Self> {
        let mut successors = Vec::new();

        for piece in self.board.all_pieces(color) {
            for mv in movegen::moves_for(&self.board, piece) {
                let mut next = *self;
                next.board.apply_move(piece, &mv);
                next.side_to_move = color.opponent();
                successors.push(next);
            }
        }

        successors
    }

    /// Recursively counts every position reachable from this one within
    /// `depth` moves.
    ///
    /// A multi-jump chain counts as a single move. Useful for validating the
    /// move generator against hand-counted positions.
    pub fn perft(&self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        self.successors(self.side_to_move)
            .iter()
            .map(|successor| successor.perft(depth - 1))
            .sum()
    }
}

impl Default for Game {
    /// A default [`Game`] is the standard starting position, Light to move.
    #[inline(always)]
    fn default() -> Self {
        Self::new(Board::startpos(), Color::Light)
    }
}

impl FromStr for Game {
    type Err = anyhow::Error;
    /// Alias for [`Game::from_fen`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        write!(f, "\n{} to move", self.side_to_move.name())
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}
