/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};

/// Represents a single square on an 8x8 checkers board.
///
/// Internally, this is represented as a `u8` holding `row * 8 + col`,
/// with `(0, 0)` being the top-left square as the board is printed.
///
/// Squares are named algebraically: file `a` through `h` is the column,
/// rank `1` through `8` is the row plus one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

impl Square {
    /// Number of rows/columns on the board.
    pub const SIZE: u8 = 8;

    /// Number of squares on the board.
    pub const COUNT: usize = (Self::SIZE * Self::SIZE) as usize;

    /// Creates a new [`Square`] from the provided row and column.
    ///
    /// # Panics
    /// If `row` or `col` is greater than `7` and debug assertions are enabled.
    ///
    /// # Example
    /// ```
    /// # use leapfrog::Square;
    /// let sq = Square::new(2, 1);
    /// assert_eq!(sq.to_string(), "b3");
    /// ```
    #[inline(always)]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < Self::SIZE && col < Self::SIZE);
        Self(row * Self::SIZE + col)
    }

    /// Fetches the row of this [`Square`], in the range `[0, 7]`.
    #[inline(always)]
    pub const fn row(&self) -> u8 {
        self.0 / Self::SIZE
    }

    /// Fetches the column of this [`Square`], in the range `[0, 7]`.
    #[inline(always)]
    pub const fn col(&self) -> u8 {
        self.0 % Self::SIZE
    }

    /// Returns this [`Square`] as a `usize`, for indexing into the grid.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns `true` if this [`Square`] can ever hold a piece.
    ///
    /// Only the squares where `row + col` is odd are playable; the other
    /// diagonal is permanently empty.
    ///
    /// # Example
    /// ```
    /// # use leapfrog::Square;
    /// assert!(Square::new(2, 1).is_playable());
    /// assert!(!Square::new(0, 0).is_playable());
    /// ```
    #[inline(always)]
    pub const fn is_playable(&self) -> bool {
        (self.row() + self.col()) % 2 == 1
    }

    /// Attempts to offset this [`Square`] by the provided row and column deltas.
    ///
    /// Yields `None` if the resulting coordinates fall outside the board,
    /// which is how an exploration ray terminates at the edge of the grid.
    ///
    /// # Example
    /// ```
    /// # use leapfrog::Square;
    /// let sq = Square::new(3, 3);
    /// assert_eq!(sq.offset(1, 1), Some(Square::new(4, 4)));
    /// assert_eq!(Square::new(0, 7).offset(-1, 1), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row() as i8 + dr;
        let col = self.col() as i8 + dc;

        if row < 0 || row >= Self::SIZE as i8 || col < 0 || col >= Self::SIZE as i8 {
            None
        } else {
            Some(Self::new(row as u8, col as u8))
        }
    }

    /// Yields every [`Square`] on the board, in row-major order.
    ///
    /// This is the scan order used when enumerating pieces, so it must remain
    /// deterministic for search results to be reproducible.
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }

    /// Creates a [`Square`] from an algebraic string like `b3`.
    pub fn from_algebraic(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            bail!("Square must be a file and a rank, like \"b3\". Got {s:?}");
        }

        let col = match bytes[0].to_ascii_lowercase() {
            c @ b'a'..=b'h' => c - b'a',
            _ => bail!("Square file must be within [a, h]. Got {s:?}"),
        };

        let row = match bytes[1] {
            r @ b'1'..=b'8' => r - b'1',
            _ => bail!("Square rank must be within [1, 8]. Got {s:?}"),
        };

        Ok(Self::new(row, col))
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    /// Alias for [`Square::from_algebraic`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self> {
        Self::from_algebraic(s)
    }
}

impl TryFrom<u8> for Square {
    type Error = anyhow::Error;
    fn try_from(value: u8) -> Result<Self> {
        ((value as usize) < Self::COUNT)
            .then_some(Self(value))
            .ok_or(anyhow!("Square index must be within [0, 63]. Got {value}"))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col()) as char, self.row() + 1)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({}, {})", self.row(), self.col())
    }
}
