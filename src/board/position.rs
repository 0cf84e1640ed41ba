/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{bail, Result};

use super::{Color, Move, Piece, Square};

/// Piece placements of the standard starting position, in the same notation
/// as [`Board::from_fen`]: 12 men per side on alternating playable squares,
/// Light on rows 0-2, Dark on rows 5-7.
pub const FEN_STARTPOS: &str = "d1d1d1d1/1d1d1d1d/d1d1d1d1/8/8/1l1l1l1l/l1l1l1l1/1l1l1l1l";

/// Represents the checkers board: an 8x8 grid of cells, each empty or
/// holding one [`Piece`], plus live-piece and king counters per side.
///
/// Invariants:
/// - the counters always equal the number of occupied cells of that side;
/// - no two pieces occupy the same cell;
/// - a piece's stored square always matches the grid slot it occupies.
///
/// The type is `Copy`, so the search can hand every branch its own board:
/// no two sibling branches ever observe each other's mutations, and a parent
/// board remains valid after its children return.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    /// The grid itself. `None` is an empty cell.
    cells: [Option<Piece>; Square::COUNT],

    /// Number of live pieces per side, kings included.
    remaining: [u8; Color::COUNT],

    /// Number of kings per side.
    kings: [u8; Color::COUNT],
}

impl Board {
    /// Creates a new, empty [`Board`].
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            cells: [None; Square::COUNT],
            remaining: [0; Color::COUNT],
            kings: [0; Color::COUNT],
        }
    }

    /// Creates a [`Board`] with the standard starting position: 12 men per
    /// side, Light on rows 0-2 and Dark on rows 5-7, on playable squares.
    ///
    /// # Example
    /// ```
    /// # use leapfrog::{Board, Color};
    /// let board = Board::startpos();
    /// assert_eq!(board.remaining(Color::Light), 12);
    /// assert_eq!(board.remaining(Color::Dark), 12);
    /// ```
    pub fn startpos() -> Self {
        let mut board = Self::new();

        for square in Square::iter().filter(Square::is_playable) {
            let color = match square.row() {
                0..=2 => Color::Light,
                5..=7 => Color::Dark,
                _ => continue,
            };
            board.place(Piece::new(color, square));
        }

        board
    }

    /// Fetches the [`Piece`] on the provided [`Square`], if one exists.
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.index()]
    }

    /// Returns `true` if the provided [`Square`] is empty.
    #[inline(always)]
    pub const fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Places `piece` onto the board at its stored square, updating counters.
    ///
    /// # Panics
    /// If the target cell is occupied and debug assertions are enabled.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece) {
        debug_assert!(self.is_empty(piece.square()), "cell already occupied");

        self.cells[piece.square().index()] = Some(piece);
        self.remaining[piece.color().index()] += 1;
        if piece.is_king() {
            self.kings[piece.color().index()] += 1;
        }
    }

    /// Removes and returns the [`Piece`] on the provided [`Square`], if one
    /// exists, updating counters.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        let piece = self.cells[square.index()].take()?;

        self.remaining[piece.color().index()] -= 1;
        if piece.is_king() {
            self.kings[piece.color().index()] -= 1;
        }

        Some(piece)
    }

    /// Relocates `piece` to `to`, returning the piece as it now stands on
    /// the board.
    ///
    /// The old cell becomes empty and the destination becomes occupied, with
    /// the piece's stored square updated. If `to` is on the farthest row from
    /// `piece`'s side, the piece is crowned; crowning uses the row *after*
    /// relocation and happens at most once.
    pub fn move_piece(&mut self, piece: Piece, to: Square) -> Piece {
        // Lift the live piece off the grid rather than trusting the caller's copy
        let Some(mut moved) = self.take(piece.square()) else {
            debug_assert!(false, "no piece to move on {}", piece.square());
            return piece;
        };

        moved = moved.moved_to(to);
        if to.row() == moved.color().promotion_row() {
            moved = moved.promoted();
        }

        self.place(moved);
        moved
    }

    /// Removes every [`Piece`] in `captured` from the board, decrementing
    /// the owning side's counters for each.
    #[inline(always)]
    pub fn remove_pieces(&mut self, captured: &[Piece]) {
        for piece in captured {
            self.take(piece.square());
        }
    }

    /// Applies the provided [`Move`] to `piece`: relocation first, then
    /// removal of every captured piece.
    ///
    /// Returns the moved (possibly crowned) piece.
    #[inline(always)]
    pub fn apply_move(&mut self, piece: Piece, mv: &Move) -> Piece {
        let moved = self.move_piece(piece, mv.to());
        self.remove_pieces(mv.captured());
        moved
    }

    /// Yields every live [`Piece`] of the provided [`Color`], in row-major
    /// scan order.
    ///
    /// The order is deterministic, which the search relies on for
    /// reproducible tie-breaking.
    #[inline(always)]
    pub fn all_pieces(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.cells
            .iter()
            .flatten()
            .copied()
            .filter(move |piece| piece.color() == color)
    }

    /// Number of live pieces (kings included) of the provided [`Color`].
    #[inline(always)]
    pub const fn remaining(&self, color: Color) -> u8 {
        self.remaining[color.index()]
    }

    /// Number of kings of the provided [`Color`].
    #[inline(always)]
    pub const fn kings(&self, color: Color) -> u8 {
        self.kings[color.index()]
    }

    /// Fetches the winner of the game, if one exists.
    ///
    /// A side with zero live pieces loses. No further stalemate detection is
    /// performed; a side with pieces but no legal moves is reported through
    /// the search's empty result instead.
    ///
    /// # Example
    /// ```
    /// # use leapfrog::{Board, Color, Piece, Square};
    /// let mut board = Board::new();
    /// board.place(Piece::new(Color::Dark, Square::new(5, 0)));
    /// assert_eq!(board.winner(), Some(Color::Dark));
    /// ```
    #[inline(always)]
    pub const fn winner(&self) -> Option<Color> {
        if self.remaining[Color::Light.index()] == 0 {
            Some(Color::Dark)
        } else if self.remaining[Color::Dark.index()] == 0 {
            Some(Color::Light)
        } else {
            None
        }
    }

    /// Creates a [`Board`] from a placement string.
    ///
    /// The format follows FEN's placement field: eight `/`-separated row
    /// groups from row 7 down to row 0, digits for runs of empty cells,
    /// `l`/`d` for Light/Dark men and `L`/`D` for kings.
    pub fn from_fen(placements: &str) -> Result<Self> {
        let mut board = Self::new();

        let rows = placements.trim().split('/');
        let mut row = Square::SIZE;

        for group in rows {
            if row == 0 {
                bail!("Placements must have exactly 8 rows. Got {placements:?}");
            }
            row -= 1;

            let mut col = 0;
            for c in group.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col += skip as u8;
                } else {
                    if col >= Square::SIZE {
                        bail!("Row {row} in {placements:?} describes more than 8 columns");
                    }
                    board.place(Piece::from_char(c, Square::new(row, col))?);
                    col += 1;
                }
            }

            if col != Square::SIZE {
                bail!("Row {row} in {placements:?} describes {col} columns, expected 8");
            }
        }

        if row != 0 {
            bail!("Placements must have exactly 8 rows. Got {placements:?}");
        }

        Ok(board)
    }

    /// Generates the placement string for this [`Board`].
    ///
    /// # Example
    /// ```
    /// # use leapfrog::{Board, FEN_STARTPOS};
    /// assert_eq!(Board::startpos().to_fen(), FEN_STARTPOS);
    /// ```
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for row in (0..Square::SIZE).rev() {
            let mut empty = 0;
            for col in 0..Square::SIZE {
                match self.piece_at(Square::new(row, col)) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if row > 0 {
                fen.push('/');
            }
        }

        fen
    }
}

impl Default for Board {
    /// A default [`Board`] is the standard starting position.
    #[inline(always)]
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Board {
    /// Prints the board as a bordered grid, row 7 at the top, with rank
    /// numbers on the left and file letters below.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "  +---+---+---+---+---+---+---+---+";

        for row in (0..Square::SIZE).rev() {
            writeln!(f, "{border}")?;
            write!(f, "{} |", row + 1)?;
            for col in 0..Square::SIZE {
                let c = self
                    .piece_at(Square::new(row, col))
                    .map(|piece| piece.char())
                    .unwrap_or(' ');
                write!(f, " {c} |")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{border}")?;
        write!(f, "    a   b   c   d   e   f   g   h")?;

        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startpos_counters() {
        let board = Board::startpos();
        for color in Color::all() {
            assert_eq!(board.remaining(color), 12);
            assert_eq!(board.kings(color), 0);
            assert_eq!(board.all_pieces(color).count(), 12);
        }
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_fen_round_trip() {
        let board = Board::from_fen(FEN_STARTPOS).unwrap();
        assert_eq!(board, Board::startpos());
        assert_eq!(board.to_fen(), FEN_STARTPOS);

        // Kings survive the round trip
        let fen = "8/8/8/3L4/8/1d6/8/7D";
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.to_fen(), fen);
        assert_eq!(board.kings(Color::Light), 1);
        assert_eq!(board.kings(Color::Dark), 1);
    }

    #[test]
    fn test_fen_rejects_malformed() {
        assert!(Board::from_fen("8/8/8").is_err());
        assert!(Board::from_fen("9/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_fen("x7/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_fen("8/8/8/8/8/8/8/8/8").is_err());
    }

    #[test]
    fn test_move_piece_updates_grid_and_coords() {
        let mut board = Board::startpos();
        let piece = board.piece_at(Square::new(2, 1)).unwrap();

        let moved = board.move_piece(piece, Square::new(3, 2));

        assert!(board.is_empty(Square::new(2, 1)));
        assert_eq!(board.piece_at(Square::new(3, 2)), Some(moved));
        assert_eq!(moved.square(), Square::new(3, 2));
        assert!(!moved.is_king());
    }

    #[test]
    fn test_promotion_on_farthest_row() {
        let mut board = Board::new();
        board.place(Piece::new(Color::Light, Square::new(6, 5)));
        board.place(Piece::new(Color::Dark, Square::new(1, 2)));

        let light = board.piece_at(Square::new(6, 5)).unwrap();
        let crowned = board.move_piece(light, Square::new(7, 6));
        assert!(crowned.is_king());
        assert_eq!(board.kings(Color::Light), 1);

        let dark = board.piece_at(Square::new(1, 2)).unwrap();
        let crowned = board.move_piece(dark, Square::new(0, 1));
        assert!(crowned.is_king());
        assert_eq!(board.kings(Color::Dark), 1);
    }

    #[test]
    fn test_remove_pieces_decrements_counters() {
        let mut board = Board::startpos();
        let victims = board.all_pieces(Color::Dark).take(2).collect::<Vec<_>>();

        board.remove_pieces(&victims);

        assert_eq!(board.remaining(Color::Dark), 10);
        for victim in victims {
            assert!(board.is_empty(victim.square()));
        }
    }

    #[test]
    fn test_apply_capture_move() {
        let mut board = Board::new();
        board.place(Piece::new(Color::Light, Square::new(3, 3)));
        board.place(Piece::new(Color::Dark, Square::new(4, 4)));

        let piece = board.piece_at(Square::new(3, 3)).unwrap();
        let victim = board.piece_at(Square::new(4, 4)).unwrap();
        let mv = Move::new(Square::new(5, 5), vec![victim]);

        board.apply_move(piece, &mv);

        assert!(board.is_empty(Square::new(3, 3)));
        assert!(board.is_empty(Square::new(4, 4)));
        assert!(board.piece_at(Square::new(5, 5)).is_some());
        assert_eq!(board.remaining(Color::Dark), 0);
        assert_eq!(board.winner(), Some(Color::Light));
    }
}
