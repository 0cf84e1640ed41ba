/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// A playable game: board plus side-to-move, successor enumeration, perft.
mod game;

/// Legal-move and capture-chain discovery.
pub mod movegen;

/// The `Move` description type and per-piece move lists.
mod moves;

/// Colors and pieces.
mod piece;

/// The board itself: grid, counters, placement and relocation.
mod position;

/// Squares of the 8x8 grid.
mod square;

pub use game::*;
pub use moves::*;
pub use piece::*;
pub use position::*;
pub use square::*;
