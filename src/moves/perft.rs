use crate::board::Board;
use crate::moves::{
    execute::{generate_legal, make_move, undo_move},
    square_control::in_check,
    types::{Move, MoveList},
};
use serde::Serialize;
use tracing::{debug, instrument};

const MAX_LOG_DEPTH: u32 = 3; // only trace details for shallow nodes

/// Edge and leaf tallies for one perft run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PerftCounters {
    pub nodes: u64,
    pub captures: u64,
    pub ep_captures: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounters {
    pub fn add(&mut self, o: &PerftCounters) {
        self.nodes += o.nodes;
        self.captures += o.captures;
        self.ep_captures += o.ep_captures;
        self.castles += o.castles;
        self.promotions += o.promotions;
        self.checks += o.checks;
        self.checkmates += o.checkmates;
    }
}

fn perft_recursive(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = MoveList::new();
    generate_legal(board, &mut moves);

    // Bulk count at the frontier.
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut node_count = 0;
    for mv in moves {
        let undo = make_move(board, mv);
        node_count += perft_recursive(board, depth - 1);
        undo_move(board, undo);
    }
    node_count
}

/// Number of leaf nodes reachable in exactly `depth` plies.
#[instrument(skip(board), fields(depth))]
pub fn perft(board: &Board, depth: u32) -> u64 {
    let mut scratch = board.clone();
    perft_recursive(&mut scratch, depth)
}

/// Perft split by root move, in generation order.
#[instrument(skip(board), fields(depth))]
pub fn perft_divide(board: &Board, depth: u32) -> Vec<(Move, u64)> {
    let mut scratch = board.clone();
    let mut moves = MoveList::new();
    generate_legal(&scratch, &mut moves);

    if depth <= MAX_LOG_DEPTH {
        debug!(depth, moves = moves.len(), "divide: root legal moves");
    }

    let mut out = Vec::with_capacity(moves.len());
    for mv in moves {
        let undo = make_move(&mut scratch, mv);
        let count = if depth <= 1 {
            1
        } else {
            perft_recursive(&mut scratch, depth - 1)
        };
        undo_move(&mut scratch, undo);

        if depth <= MAX_LOG_DEPTH {
            debug!(%mv, nodes = count, "divide: root child total");
        }
        out.push((mv, count));
    }

    debug!(
        depth,
        total = out.iter().map(|(_, n)| n).sum::<u64>(),
        "divide: total"
    );
    out
}

/// Move-kind tallies for an edge that ends on the leaf ply.
fn tag_leaf_edge(out: &mut PerftCounters, mv: Move) {
    if mv.is_capture() {
        out.captures += 1;
        if mv.is_en_passant() {
            out.ep_captures += 1;
        }
    }
    if mv.is_castling() {
        out.castles += 1;
    }
    if mv.is_promotion() {
        out.promotions += 1;
    }
}

fn perft_count_recursive(board: &mut Board, depth: u32, out: &mut PerftCounters) {
    let mut moves = MoveList::new();
    generate_legal(board, &mut moves);

    if depth == 0 {
        out.nodes += 1;
        let side_in_check = in_check(board, board.side_to_move);
        if side_in_check {
            out.checks += 1;
            if moves.is_empty() {
                out.checkmates += 1;
            }
        }
        return;
    }

    for mv in moves {
        if depth == 1 {
            tag_leaf_edge(out, mv);
        }

        #[cfg(debug_assertions)]
        let z0 = board.zobrist;

        let undo = make_move(board, mv);
        perft_count_recursive(board, depth - 1, out);
        undo_move(board, undo);

        #[cfg(debug_assertions)]
        debug_assert_eq!(board.zobrist, z0, "zobrist changed across make/undo");
    }
}

/// Perft with capture/castle/promotion/check tallies, all taken on the leaf
/// ply as in the usual perft tables.
#[instrument(skip(board), fields(depth))]
pub fn perft_count_with_breakdown(board: &Board, depth: u32) -> PerftCounters {
    let mut scratch = board.clone();
    let mut out = PerftCounters::default();
    perft_count_recursive(&mut scratch, depth, &mut out);
    out
}

/// Breakdown per root move; the rows sum to [`perft_count_with_breakdown`].
pub fn perft_divide_with_breakdown(board: &Board, depth: u32) -> Vec<(Move, PerftCounters)> {
    let mut scratch = board.clone();
    let mut moves = MoveList::new();
    generate_legal(&scratch, &mut moves);

    let mut out = Vec::with_capacity(moves.len());
    for mv in moves {
        let undo = make_move(&mut scratch, mv);
        let mut pc = PerftCounters::default();
        if depth <= 1 {
            tag_leaf_edge(&mut pc, mv);
        }
        perft_count_recursive(&mut scratch, depth.saturating_sub(1), &mut pc);
        undo_move(&mut scratch, undo);
        out.push((mv, pc));
    }
    out
}
