/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// All code related to the board: squares, pieces, moves, and positions.
mod board;

/// Types for user input, mostly command parsing.
mod cli;

/// Code related to the engine's functionality, such as user input handling.
mod engine;

/// Evaluation of checkers positions.
mod eval;

/// Main engine logic; all search related code.
mod search;

/// Misc utility functions, constants, and types.
mod utils;

pub use board::*;
pub use cli::*;
pub use engine::*;
pub use eval::*;
pub use search::*;
pub use utils::*;
