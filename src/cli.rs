/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use clap::Parser;

use crate::Square;

/// A command to be sent to the engine.
#[derive(Debug, Clone, Parser)]
#[command(multicall = true, about, rename_all = "lower")]
pub enum EngineCommand {
    /// Print a visual representation of the current board state.
    #[command(alias = "d")]
    Display,

    /// Print an evaluation of the current position.
    Eval {
        /// If set, every piece's contribution will be printed as well.
        #[arg(short, long, default_value = "false")]
        pretty: bool,
    },

    /// Quit the engine.
    #[command(aliases = ["quit", "q"])]
    Exit,

    /// Generate and print a position string for the current game.
    Fen,

    /// Flips the side to move, as if the current player passed the turn.
    Flip,

    /// Search the current position and play the best move found.
    Go {
        /// Override the configured search depth.
        #[arg(short, long, required = false)]
        depth: Option<u8>,
    },

    /// Apply the provided move to the game, if it is legal.
    ///
    /// The move is validated against the move generator's output for the
    /// piece on the origin square; captured pieces are removed automatically.
    #[command(aliases = ["move", "m"])]
    MakeMove {
        /// Square of the piece to move, like "b3".
        from: Square,

        /// Destination square offered by the generator.
        to: Square,
    },

    /// Shows all legal moves in the current position, or for a specific piece.
    Moves { square: Option<Square> },

    /// Resets the engine's game to the standard starting position.
    NewGame,

    /// Counts all positions reachable within the provided depth.
    Perft { depth: usize },

    /// Set the position to the provided position string.
    Position { fen: Vec<String> },

    /// Set the default search depth used by `go`.
    SetDepth { depth: u8 },

    /// Await the current search, blocking until it completes.
    Wait,

    /// Print the winner of the current game, if one exists.
    Winner,
}

impl FromStr for EngineCommand {
    type Err = clap::Error;
    /// Attempt to parse an [`EngineCommand`] from a string.
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse_from(s.split_ascii_whitespace())
    }
}
