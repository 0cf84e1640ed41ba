/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Color, Game, Piece, Score, Square};

/// Encapsulates the logic of scoring a checkers position.
///
/// Scoring is pure material: each man is worth [`Piece::MAN_VALUE`], each
/// king [`Piece::KING_VALUE`]. Light's material counts positively and Dark's
/// negatively, so a high score is good for Light (the maximizing side in
/// the search) and a low score is good for Dark. The sign convention lives
/// in [`Color::negation_multiplier`] and nowhere else.
///
/// Evaluation never inspects the side to move and has no side effects.
#[derive(Debug, Clone)]
pub struct Evaluator<'a> {
    /// The game whose position to evaluate.
    game: &'a Game,
}

impl<'a> Evaluator<'a> {
    /// Construct a new [`Evaluator`] for the provided game.
    #[inline(always)]
    pub const fn new(game: &'a Game) -> Self {
        Self { game }
    }

    /// Evaluate this position.
    ///
    /// # Example
    /// ```
    /// # use leapfrog::{Evaluator, Game, Score};
    /// // Two Light men against one Dark king is dead even
    /// let game = Game::from_fen("8/8/2D5/8/8/1l6/8/1l6 l").unwrap();
    /// assert_eq!(Evaluator::new(&game).eval(), Score::DRAW);
    /// ```
    #[inline(always)]
    pub fn eval(self) -> Score {
        let mut score = Score::DRAW;

        for color in Color::all() {
            let sign = color.negation_multiplier();
            for piece in self.game.board().all_pieces(color) {
                score += piece.value() * sign;
            }
        }

        score
    }

    /// Fetches the signed contribution of the piece on `square`, if one exists.
    ///
    /// Only used when printing the evaluator.
    #[inline(always)]
    fn value_at(&self, square: Square) -> Option<i32> {
        self.game
            .board()
            .piece_at(square)
            .map(|piece| piece.value() * piece.color().negation_multiplier())
    }
}

impl fmt::Display for Evaluator<'_> {
    /// Prints the board with each piece's signed contribution beneath it,
    /// followed by the total.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "  +------+------+------+------+------+------+------+------+";

        for row in (0..Square::SIZE).rev() {
            writeln!(f, "{border}")?;

            write!(f, "{} |", row + 1)?;
            for col in 0..Square::SIZE {
                let square = Square::new(row, col);
                let c = self
                    .game
                    .board()
                    .piece_at(square)
                    .map(|piece| piece.char())
                    .unwrap_or(' ');
                write!(f, "  {c}   |")?;
            }
            writeln!(f)?;

            write!(f, "  |")?;
            for col in 0..Square::SIZE {
                let square = Square::new(row, col);
                if let Some(value) = self.value_at(square) {
                    write!(f, "{:^6}|", format!("{value:+}"))?;
                } else {
                    write!(f, "      |")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "{border}")?;
        writeln!(f, "     a      b      c      d      e      f      g      h")?;

        write!(f, "\nScore: {}", self.clone().eval())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Board;

    /// Swaps every piece's color and reflects it through the board's center.
    fn mirrored(game: &Game) -> Game {
        let mut board = Board::new();

        for color in Color::all() {
            for piece in game.board().all_pieces(color) {
                let square = Square::new(
                    Square::SIZE - 1 - piece.square().row(),
                    Square::SIZE - 1 - piece.square().col(),
                );
                let mut flipped = Piece::new(color.opponent(), square);
                if piece.is_king() {
                    flipped = flipped.promoted();
                }
                board.place(flipped);
            }
        }

        Game::new(board, game.side_to_move().opponent())
    }

    #[test]
    fn test_startpos_is_equal() {
        let game = Game::default();
        assert_eq!(Evaluator::new(&game).eval(), Score::DRAW);
    }

    #[test]
    fn test_material_counts() {
        // One Light king and one Light man against two Dark men
        let game = Game::from_fen("8/8/4L3/8/8/1l6/d7/1d6 l").unwrap();
        let score = Evaluator::new(&game).eval();
        assert_eq!(
            score,
            Score(Piece::KING_VALUE + Piece::MAN_VALUE - 2 * Piece::MAN_VALUE)
        );
    }

    #[test]
    fn test_eval_is_symmetric() {
        let fens = [
            "d1d1d1d1/1d1d1d1d/d1d1d1d1/8/8/1l1l1l1l/l1l1l1l1/1l1l1l1l l",
            "8/8/4L3/8/8/1l6/d7/1d6 l",
            "8/8/8/5d2/4l3/8/8/8 d",
            "D7/8/8/8/4l3/8/8/8 l",
        ];

        for fen in fens {
            let game = Game::from_fen(fen).unwrap();
            let mirror = mirrored(&game);
            assert_eq!(
                Evaluator::new(&game).eval(),
                -Evaluator::new(&mirror).eval(),
                "evaluation not symmetric for {fen}"
            );
        }
    }

    #[test]
    fn test_exhausted_side_still_evaluates() {
        // Dark has no pieces at all; the evaluator still reports plain material
        let game = Game::from_fen("8/8/8/8/8/1l6/8/7L l").unwrap();
        assert_eq!(game.winner(), Some(Color::Light));
        assert_eq!(
            Evaluator::new(&game).eval(),
            Score(Piece::MAN_VALUE + Piece::KING_VALUE)
        );
    }
}
