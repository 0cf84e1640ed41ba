/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Neg, str::FromStr};

use anyhow::{bail, Result};

use super::Square;

/// Represents the color of a player or piece on the board.
///
/// Light sits on rows 0-2 at the start of a game and is the maximizing side
/// in the search; Dark sits on rows 5-7 and minimizes. Light moves first, so
/// [`Color`] defaults to [`Color::Light`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[repr(u8)]
pub enum Color {
    #[default]
    Light,
    Dark,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with Light.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::Light, Self::Dark]
    }

    /// Returns `true` if this [`Color`] is Light.
    #[inline(always)]
    pub const fn is_light(&self) -> bool {
        matches!(self, Self::Light)
    }

    /// Returns `true` if this [`Color`] is Dark.
    #[inline(always)]
    pub const fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Returns this [`Color`]'s opposite / enemy.
    ///
    /// # Example
    /// ```
    /// # use leapfrog::Color;
    /// assert_eq!(Color::Light.opponent(), Color::Dark);
    /// assert_eq!(Color::Dark.opponent(), Color::Light);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Returns this [`Color`] as a `usize`, for indexing into lists.
    ///
    /// Will be `0` for Light, `1` for Dark.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns a multiplier for negating numbers relative to this color.
    ///
    /// Light, the maximizing side, yields `1`; Dark yields `-1`. This keeps
    /// the evaluation's sign convention in a single place.
    #[inline(always)]
    pub const fn negation_multiplier(&self) -> i32 {
        match self {
            Self::Light => 1,
            Self::Dark => -1,
        }
    }

    /// The row on which this [`Color`]'s pieces are crowned.
    ///
    /// Promotion lands on the farthest row from the side's starting rows.
    ///
    /// # Example
    /// ```
    /// # use leapfrog::Color;
    /// assert_eq!(Color::Light.promotion_row(), 7);
    /// assert_eq!(Color::Dark.promotion_row(), 0);
    /// ```
    #[inline(always)]
    pub const fn promotion_row(&self) -> u8 {
        match self {
            Self::Light => Square::SIZE - 1,
            Self::Dark => 0,
        }
    }

    /// Creates a [`Color`] from a notation char (`l` or `d`, case-insensitive).
    #[inline(always)]
    pub fn from_char(color: char) -> Result<Self> {
        match color {
            'l' | 'L' => Ok(Self::Light),
            'd' | 'D' => Ok(Self::Dark),
            _ => bail!("Color must be either 'l' or 'd' (case-insensitive). Got {color:?}"),
        }
    }

    /// Converts this [`Color`] to its notation char.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::Light => 'l',
            Self::Dark => 'd',
        }
    }

    /// Fetches a human-readable name for this [`Color`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl Neg for Color {
    type Output = Self;
    /// Negating [`Color::Light`] yields [`Color::Dark`] and vice versa.
    #[inline(always)]
    fn neg(self) -> Self::Output {
        self.opponent()
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 1 {
            bail!("Color must be a single char. Got {s:?}");
        }
        Self::from_char(s.as_bytes()[0] as char)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// Represents a checker on the game board.
///
/// A piece keeps its identity across moves: relocation updates the stored
/// square in place rather than recreating the piece, and the king flag flips
/// `false` to `true` exactly once, when a relocation lands the piece on the
/// farthest row from its side's start. Captured pieces are simply removed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    square: Square,
    king: bool,
}

impl Piece {
    /// Value of an uncrowned man, used by the evaluator.
    pub const MAN_VALUE: i32 = 100;

    /// Value of a king. Kings count double.
    pub const KING_VALUE: i32 = 200;

    /// Creates a new (uncrowned) [`Piece`] of the provided color.
    ///
    /// # Example
    /// ```
    /// # use leapfrog::{Color, Piece, Square};
    /// let piece = Piece::new(Color::Light, Square::new(2, 1));
    /// assert!(!piece.is_king());
    /// assert_eq!(piece.to_string(), "l");
    /// ```
    #[inline(always)]
    pub const fn new(color: Color, square: Square) -> Self {
        Self {
            color,
            square,
            king: false,
        }
    }

    /// Fetches the [`Color`] of this [`Piece`].
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Fetches the [`Square`] this [`Piece`] currently occupies.
    #[inline(always)]
    pub const fn square(&self) -> Square {
        self.square
    }

    /// Returns `true` if this [`Piece`] has been crowned.
    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        self.king
    }

    /// Returns the material value of this [`Piece`].
    #[inline(always)]
    pub const fn value(&self) -> i32 {
        if self.king {
            Self::KING_VALUE
        } else {
            Self::MAN_VALUE
        }
    }

    /// Relocates this [`Piece`] to the provided [`Square`], consuming `self`
    /// and returning the moved piece.
    #[inline(always)]
    pub const fn moved_to(self, square: Square) -> Self {
        Self { square, ..self }
    }

    /// Crowns this [`Piece`], consuming `self` and returning the king.
    ///
    /// Crowning is one-way and idempotent; there is no demotion.
    ///
    /// # Example
    /// ```
    /// # use leapfrog::{Color, Piece, Square};
    /// let king = Piece::new(Color::Dark, Square::new(0, 1)).promoted();
    /// assert!(king.is_king());
    /// assert!(king.promoted().is_king());
    /// ```
    #[inline(always)]
    pub const fn promoted(self) -> Self {
        Self { king: true, ..self }
    }

    /// Creates a [`Piece`] on `square` from its notation char.
    ///
    /// `l`/`d` are Light/Dark men; `L`/`D` are kings.
    #[inline(always)]
    pub fn from_char(piece: char, square: Square) -> Result<Self> {
        let color = Color::from_char(piece)?;
        let man = Self::new(color, square);

        if piece.is_ascii_uppercase() {
            Ok(man.promoted())
        } else {
            Ok(man)
        }
    }

    /// Converts this [`Piece`] to its notation char.
    ///
    /// Kings are uppercase, men are lowercase.
    #[inline(always)]
    pub const fn char(&self) -> char {
        if self.king {
            self.color.char().to_ascii_uppercase()
        } else {
            self.color.char()
        }
    }

    /// Fetches a human-readable name for this [`Piece`].
    #[inline(always)]
    pub fn name(&self) -> String {
        let kind = if self.king { "king" } else { "man" };
        format!("{} {kind}", self.color.name())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.name(), self.square)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promotion_is_monotonic() {
        let piece = Piece::new(Color::Light, Square::new(6, 5));
        assert!(!piece.is_king());
        assert_eq!(piece.value(), Piece::MAN_VALUE);

        let king = piece.promoted();
        assert!(king.is_king());
        assert_eq!(king.value(), Piece::KING_VALUE);

        // Relocation never un-crowns
        let king = king.moved_to(Square::new(5, 4));
        assert!(king.is_king());
    }

    #[test]
    fn test_piece_chars() {
        let man = Piece::new(Color::Dark, Square::new(5, 0));
        assert_eq!(man.char(), 'd');
        assert_eq!(man.promoted().char(), 'D');
    }
}
