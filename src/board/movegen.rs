/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Board, Move, MoveList, Piece, Square};

/// The four diagonal rays explored from any square, relative to the grid:
/// up-left, up-right, down-left, down-right.
///
/// Every piece, king or man, probes all four. The exploration order is fixed
/// so that move enumeration (and therefore search tie-breaking) is
/// deterministic.
const RAYS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Computes every legal [`Move`] for `piece` on `board`.
///
/// Each of the four diagonal rays from the piece's square is explored
/// independently:
/// - if the first cell along a ray is empty, it is a destination with an
///   empty capture list, and the ray ends (a plain move advances exactly one
///   square);
/// - if the first cell holds an opposing piece and the cell beyond it on the
///   same ray is on the grid and empty, the landing cell is a destination
///   capturing the jumped piece, and exploration continues recursively from
///   the landing cell looking for *further* captures only;
/// - a ray is abandoned if the first cell holds a friendly piece, or the
///   landing cell is off-grid or occupied, or the jumped piece has already
///   been captured earlier in the chain.
///
/// The board is never mutated, and there are no error conditions: a piece
/// with no legal moves simply yields an empty list.
///
/// # Example
/// ```
/// # use leapfrog::{movegen, Board, Square};
/// let board = Board::startpos();
/// let piece = board.piece_at(Square::new(2, 1)).unwrap();
/// let moves = movegen::moves_for(&board, piece);
/// assert_eq!(moves.len(), 2);
/// ```
pub fn moves_for(board: &Board, piece: Piece) -> MoveList {
    let mut moves = MoveList::new();
    let from = piece.square();

    // Plain single-step moves are only offered from the piece's actual
    // square, never mid-chain.
    for (dr, dc) in RAYS {
        if let Some(step) = from.offset(dr, dc) {
            if board.is_empty(step) {
                moves.insert(Move::quiet(step));
            }
        }
    }

    probe_jumps(board, piece, from, Vec::new(), &mut moves);

    moves
}

/// Recursively explores capture chains for `piece`, currently standing
/// (hypothetically) on `from`, having already captured `captured`.
///
/// Each recursive call owns its own capture list; chains along different
/// rays never alias each other's accumulators. The moving piece itself is
/// never lifted off its original square during exploration, so its origin
/// reads as a friendly blocker, and a chain can never end on the square it
/// started from.
fn probe_jumps(
    board: &Board,
    piece: Piece,
    from: Square,
    captured: Vec<Piece>,
    moves: &mut MoveList,
) {
    for (dr, dc) in RAYS {
        // Both the jumped cell and the landing cell must be on the grid
        let Some(over) = from.offset(dr, dc) else {
            continue;
        };
        let Some(landing) = from.offset(2 * dr, 2 * dc) else {
            continue;
        };

        // The jumped cell must hold an opposing piece...
        let Some(target) = board.piece_at(over) else {
            continue;
        };
        if target.color() == piece.color() {
            continue;
        }

        // ...that has not already been jumped in this chain
        if captured.contains(&target) {
            continue;
        }

        // The landing cell must be empty. Pieces captured earlier in the
        // chain still occupy their cells during exploration, so a chain
        // cannot land on (or pass through) one of its own victims.
        if !board.is_empty(landing) {
            continue;
        }

        let mut chain = captured.clone();
        chain.push(target);

        moves.insert(Move::new(landing, chain.clone()));
        probe_jumps(board, piece, landing, chain, moves);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn board_with(pieces: &[Piece]) -> Board {
        let mut board = Board::new();
        for &piece in pieces {
            board.place(piece);
        }
        board
    }

    /// Checks a move's geometry against its origin: a quiet move must step
    /// onto an adjacent diagonal, and a capture's waypoints, reconstructed
    /// victim by victim, must end at the destination with every captured
    /// piece on the diagonal between consecutive landing squares.
    fn assert_chain_geometry(from: Square, mv: &Move) {
        if !mv.is_capture() {
            let dr = mv.to().row() as i8 - from.row() as i8;
            let dc = mv.to().col() as i8 - from.col() as i8;
            assert_eq!(dr.abs(), 1, "quiet step not diagonal in {mv}");
            assert_eq!(dc.abs(), 1, "quiet step not diagonal in {mv}");
            return;
        }

        let mut cur = from;
        for victim in mv.captured() {
            let dr = victim.square().row() as i8 - cur.row() as i8;
            let dc = victim.square().col() as i8 - cur.col() as i8;
            assert_eq!(dr.abs(), 1, "jumped piece not adjacent in {mv}");
            assert_eq!(dc.abs(), 1, "jumped piece not adjacent in {mv}");

            cur = cur.offset(2 * dr, 2 * dc).expect("landing off the grid");
        }
        assert_eq!(cur, mv.to(), "waypoints do not end at the destination");
    }

    #[test]
    fn test_opening_moves() {
        // The Light piece at (2, 1) on the starting board has exactly two
        // plain moves, (3, 0) and (3, 2)
        let board = Board::startpos();
        let piece = board.piece_at(Square::new(2, 1)).unwrap();

        let moves = moves_for(&board, piece);

        assert_eq!(moves.len(), 2);
        for to in [Square::new(3, 0), Square::new(3, 2)] {
            let mv = moves.get(to).expect("missing opening move");
            assert!(!mv.is_capture());
        }
    }

    #[test]
    fn test_single_capture() {
        // Light at (3, 3), Dark at (4, 4), landing at (5, 5): the only
        // capture jumps the Dark piece
        let light = Piece::new(Color::Light, Square::new(3, 3));
        let dark = Piece::new(Color::Dark, Square::new(4, 4));
        let board = board_with(&[light, dark]);

        let moves = moves_for(&board, light);

        let mv = moves.get(Square::new(5, 5)).expect("missing capture");
        assert_eq!(mv.captured(), &[dark]);

        // The quiet steps onto the three open diagonals are still offered
        // alongside it
        for to in [Square::new(2, 2), Square::new(2, 4), Square::new(4, 2)] {
            assert!(!moves.get(to).expect("missing quiet step").is_capture());
        }
        assert_eq!(moves.len(), 4);
    }

    #[test]
    fn test_double_capture_chain() {
        // Extends the single-capture setup with a second Dark piece at
        // (6, 6) and a potential blocker at (4, 2)
        let light = Piece::new(Color::Light, Square::new(3, 3));
        let first = Piece::new(Color::Dark, Square::new(4, 4));
        let second = Piece::new(Color::Dark, Square::new(6, 6));
        let blocker = Piece::new(Color::Dark, Square::new(4, 2));
        let board = board_with(&[light, first, second, blocker]);

        let moves = moves_for(&board, light);

        // The double chain (3,3) -> (5,5) -> (7,7) captures both pieces
        let chain = moves.get(Square::new(7, 7)).expect("missing double jump");
        assert_eq!(chain.captured(), &[first, second]);
        assert_chain_geometry(light.square(), chain);

        // The intermediate landing is itself a single-capture destination
        let single = moves.get(Square::new(5, 5)).unwrap();
        assert_eq!(single.captured(), &[first]);

        // The blocker at (4, 2) is jumpable toward (5, 1)
        let side = moves.get(Square::new(5, 1)).unwrap();
        assert_eq!(side.captured(), &[blocker]);

        // No chain captures the same piece twice
        for mv in &moves {
            let mut seen = mv.captured().to_vec();
            seen.dedup();
            assert_eq!(seen.len(), mv.captured().len(), "duplicate capture in {mv}");
            assert_chain_geometry(light.square(), mv);
        }
    }

    #[test]
    fn test_no_rejump_via_alternate_ray() {
        // A ring of Dark pieces around an empty center. Circling the ring
        // brings the chain back alongside pieces it has already consumed via
        // a different ray; without the jumped-at-most-once rule this
        // recursion would never terminate.
        let light = Piece::new(Color::Light, Square::new(0, 3));
        let ring = [
            Piece::new(Color::Dark, Square::new(1, 2)),
            Piece::new(Color::Dark, Square::new(1, 4)),
            Piece::new(Color::Dark, Square::new(3, 2)),
            Piece::new(Color::Dark, Square::new(3, 4)),
        ];
        let mut pieces = vec![light];
        pieces.extend(ring);
        let board = board_with(&pieces);

        let moves = moves_for(&board, light);

        for mv in &moves {
            let mut seen = Vec::new();
            for victim in mv.captured() {
                assert!(!seen.contains(victim), "piece jumped twice in {mv}");
                seen.push(*victim);
            }
            assert_chain_geometry(light.square(), mv);
            // A chain can never end on the square it started from
            assert_ne!(mv.to(), light.square());
        }

        // Three of the four ring pieces are consumable in one chain; the
        // fourth jump would land back on the chain's origin square, which
        // still holds the moving piece.
        let longest = moves
            .iter()
            .map(|mv| mv.captured().len())
            .max()
            .unwrap_or_default();
        assert_eq!(longest, 3);
    }

    #[test]
    fn test_destinations_are_empty_and_distinct() {
        let board = Board::startpos();

        for color in Color::all() {
            for piece in board.all_pieces(color) {
                let moves = moves_for(&board, piece);
                let mut seen = Vec::new();
                for mv in &moves {
                    assert!(board.is_empty(mv.to()));
                    assert_ne!(mv.to(), piece.square());
                    assert!(!seen.contains(&mv.to()), "duplicate destination");
                    seen.push(mv.to());
                }
            }
        }
    }

    #[test]
    fn test_blocked_and_edge_rays() {
        // A cornered piece with a friendly neighbor has no moves at all
        let light = Piece::new(Color::Light, Square::new(0, 7));
        let friend = Piece::new(Color::Light, Square::new(1, 6));
        let board = board_with(&[light, friend]);

        assert!(moves_for(&board, light).is_empty());

        // An opposing neighbor with an on-grid, empty landing square is jumped
        let dark = Piece::new(Color::Dark, Square::new(1, 6));
        let board = board_with(&[light, dark]);
        let moves = moves_for(&board, light);
        assert_eq!(
            moves.get(Square::new(2, 5)).expect("missing jump").captured(),
            &[dark]
        );

        // An opposing neighbor whose landing square is off-grid cannot be
        // jumped: from (1, 0) over (0, 1) the landing falls off the board
        let light = Piece::new(Color::Light, Square::new(1, 0));
        let dark = Piece::new(Color::Dark, Square::new(0, 1));
        let board = board_with(&[light, dark]);
        let moves = moves_for(&board, light);
        assert!(moves.iter().all(|mv| !mv.is_capture()));
        assert!(moves.get(Square::new(2, 1)).is_some());
    }
}
