/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Deref};

use super::{Piece, Square};

/// Represents a single legal move for one piece: a destination square and
/// the ordered list of pieces captured along the way.
///
/// A [`Move`] is a *description*, not a mutation. Applying it to a board
/// (see [`Board::apply_move`](crate::Board::apply_move)) relocates the piece
/// and removes every captured piece, producing a new consistent board.
///
/// A plain diagonal step has an empty capture list; a chain capture lists
/// each jumped piece in the order it was jumped.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Move {
    to: Square,
    captured: Vec<Piece>,
}

impl Move {
    /// Creates a new [`Move`] to `to`, capturing `captured`.
    #[inline(always)]
    pub const fn new(to: Square, captured: Vec<Piece>) -> Self {
        Self { to, captured }
    }

    /// Creates a new non-capturing [`Move`] to `to`.
    #[inline(always)]
    pub const fn quiet(to: Square) -> Self {
        Self {
            to,
            captured: Vec::new(),
        }
    }

    /// Fetches the destination [`Square`] of this [`Move`].
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// Fetches the pieces captured by this [`Move`], in jump order.
    #[inline(always)]
    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    /// Returns `true` if this [`Move`] captures at least one piece.
    #[inline(always)]
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

impl fmt::Display for Move {
    /// A quiet move displays as its destination; a capture appends each
    /// jumped piece's square, like `f6xe5xg7`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to)?;
        for piece in &self.captured {
            write!(f, "x{}", piece.square())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} (captures {})", self.captured.len())
    }
}

/// A list of legal moves for a single piece, keyed by destination.
///
/// Destinations are unique: inserting a second move to an already-known
/// destination is a no-op, so the move found along the first-explored path
/// is the one retained. Insertion order is preserved, which keeps move
/// enumeration deterministic.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct MoveList(Vec<Move>);

impl MoveList {
    /// Creates a new, empty [`MoveList`].
    #[inline(always)]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Inserts `mv` into the list, unless a move to the same destination
    /// already exists.
    #[inline(always)]
    pub fn insert(&mut self, mv: Move) {
        if self.get(mv.to()).is_none() {
            self.0.push(mv);
        }
    }

    /// Fetches the [`Move`] to the provided destination, if one exists.
    #[inline(always)]
    pub fn get(&self, to: Square) -> Option<&Move> {
        self.0.iter().find(|mv| mv.to() == to)
    }
}

impl Deref for MoveList {
    type Target = [Move];
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
