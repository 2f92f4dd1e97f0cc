//! Iterative deepening negamax search with alpha-beta pruning.
//!
//! Each iteration runs a fail-hard negamax from the root with principal
//! variation re-searches, late-move reductions and null-move pruning, then
//! drops into a captures-only quiescence search at the horizon. Iterations
//! after the first use an aspiration window around the previous score.

use crate::errors::EngineResult;
use crate::game_state::chess_types::{Board, Color, StateBackup};
use crate::move_generation::move_generator::{
    has_legal_moves, legal_moves, mover_king_is_safe, pseudo_legal_captures, pseudo_legal_moves,
};
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::{BoardScorer, INFINITY, MATE_SCORE};
use crate::search::cancellation::CancelToken;
use crate::search::game_history::GameHistory;
use crate::search::history_table::HistoryTable;
use crate::search::killer_table::KillerTable;
use crate::search::move_ordering::MoveOrderer;
use crate::search::pv_table::{PvTable, MAX_PLY};
use crate::search::search_config::{validate_depth, SearchConfig};
use crate::search::transposition_table::{score_to_tt, Bound, TTEntry, TranspositionTable};
use crate::utils::long_algebraic::moves_to_long_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every iteration up to the configured depth completed.
    DepthLimit,
    /// The cancel token was raised; the result is the last completed depth.
    Cancelled,
    /// The root position is checkmate or stalemate.
    NoLegalMoves,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub score: i32,
    pub nodes: u64,
    pub pv: Vec<Move>,
    pub best_move: Option<Move>,
    pub depth: u32,
    pub stop: StopReason,
}

/// Owns a position plus every table the search learns into. The board is
/// restored to the root position after every search call.
#[derive(Debug)]
pub struct Searcher<S: BoardScorer> {
    board: Board,
    scorer: S,
    config: SearchConfig,
    tt: TranspositionTable,
    pv: PvTable,
    killers: KillerTable,
    history: HistoryTable,
    game_history: GameHistory,
    nodes: u64,
}

impl<S: BoardScorer> Searcher<S> {
    pub fn new(board: Board, scorer: S, config: SearchConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            board,
            scorer,
            tt: TranspositionTable::new_with_mb(config.tt_size_mb),
            config,
            pv: PvTable::new(),
            killers: KillerTable::new(),
            history: HistoryTable::new(),
            game_history: GameHistory::new(),
            nodes: 0,
        })
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replacing the position does not touch the game history.
    #[inline]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.config.max_depth
    }

    pub fn set_max_depth(&mut self, depth: u32) -> EngineResult<()> {
        validate_depth(depth)?;
        self.config.max_depth = depth;
        Ok(())
    }

    #[inline]
    pub fn transposition_table(&self) -> &TranspositionTable {
        &self.tt
    }

    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    pub fn clear_game_history(&mut self) {
        self.game_history.clear();
    }

    /// Killers, history weights and the principal variation.
    pub fn clear_move_tables(&mut self) {
        self.pv.clear();
        self.killers.clear();
        self.history.clear();
    }

    /// Record a position from earlier in the game for repetition detection.
    #[inline]
    pub fn push_history(&mut self, hash: u64) {
        self.game_history.push(hash);
    }

    #[inline]
    pub fn game_history(&self) -> &GameHistory {
        &self.game_history
    }

    /// Play `mv` on the owned board, remembering the position it leaves.
    pub fn play_move(&mut self, mv: Move) {
        self.game_history.push(self.board.hash());
        self.board.make_move(mv);
    }

    /// One root iteration at `depth` with the window `(alpha, beta)`.
    /// Heuristic tables keep whatever earlier searches taught them.
    pub fn search_depth(&mut self, depth: u32, alpha: i32, beta: i32) -> EngineResult<SearchOutcome> {
        validate_depth(depth)?;
        self.nodes = 0;
        let outcome = match self.search_root(depth as i32, alpha, beta) {
            Some(score) => self.outcome(score, self.nodes, depth, StopReason::DepthLimit),
            None => self.no_legal_moves_outcome(self.nodes),
        };
        Ok(outcome)
    }

    /// Iterative deepening from depth 1 to the configured maximum. The cancel
    /// token is polled after each completed depth, so depth 1 always finishes.
    pub fn search(&mut self, cancel: &CancelToken) -> EngineResult<SearchOutcome> {
        self.config.validate()?;
        self.clear_move_tables();

        let max_depth = self.config.max_depth;
        let margin = self.config.aspiration_margin;
        let (mut alpha, mut beta) = (-INFINITY, INFINITY);
        let mut total_nodes = 0u64;
        let mut depth = 1u32;
        let mut last = None;

        while depth <= max_depth {
            self.nodes = 0;
            let result = self.search_root(depth as i32, alpha, beta);
            total_nodes += self.nodes;

            let Some(score) = result else {
                log::info!("no legal moves at the root of {}", self.board.to_fen());
                return Ok(self.no_legal_moves_outcome(total_nodes));
            };

            let full_window = alpha == -INFINITY && beta == INFINITY;
            if !full_window && (score <= alpha || score >= beta) {
                log::debug!(
                    "depth {depth}: score {score} outside aspiration window ({alpha}, {beta}), re-searching"
                );
                alpha = -INFINITY;
                beta = INFINITY;
                continue;
            }
            alpha = score - margin;
            beta = score + margin;

            let outcome = self.outcome(score, total_nodes, depth, StopReason::DepthLimit);
            log::debug!(
                "depth {depth} score {score} nodes {total_nodes} pv {}",
                moves_to_long_algebraic(&outcome.pv)
            );

            if depth < max_depth && cancel.is_cancelled() {
                log::info!("search cancelled after depth {depth}");
                return Ok(SearchOutcome {
                    stop: StopReason::Cancelled,
                    ..outcome
                });
            }
            last = Some(outcome);
            depth += 1;
        }

        let outcome = match last {
            Some(outcome) => outcome,
            None => self.no_legal_moves_outcome(total_nodes),
        };
        log::info!(
            "search finished at depth {} score {} nodes {}",
            outcome.depth,
            outcome.score,
            outcome.nodes
        );
        Ok(outcome)
    }

    fn outcome(&self, score: i32, nodes: u64, depth: u32, stop: StopReason) -> SearchOutcome {
        let pv = self.pv.principal_line();
        SearchOutcome {
            score,
            nodes,
            best_move: pv.first().copied(),
            pv,
            depth,
            stop,
        }
    }

    fn no_legal_moves_outcome(&self, nodes: u64) -> SearchOutcome {
        SearchOutcome {
            score: self.terminal_score(0),
            nodes,
            pv: Vec::new(),
            best_move: None,
            depth: 0,
            stop: StopReason::NoLegalMoves,
        }
    }

    /// Score of a node without legal moves: mated in `ply`, or stalemate.
    #[inline]
    fn terminal_score(&self, ply: usize) -> i32 {
        if self.board.is_in_check() {
            -MATE_SCORE + ply as i32
        } else {
            0
        }
    }

    fn order_moves(&self, moves: &mut [Move], side: Color, ply: usize) {
        MoveOrderer {
            pv: &self.pv,
            killers: &self.killers,
            history: &self.history,
            side,
            ply,
        }
        .order(moves);
    }

    #[inline]
    fn make_legal(&mut self, mv: Move) -> Option<StateBackup> {
        let backup = self.board.make_move(mv);
        if mover_king_is_safe(&self.board) {
            Some(backup)
        } else {
            self.board.unmake_move(mv, backup);
            None
        }
    }

    /// Every legal root move gets the full `(alpha, beta)` window; the root
    /// never cuts off. `None` when the root has no legal moves.
    fn search_root(&mut self, depth: i32, mut alpha: i32, beta: i32) -> Option<i32> {
        self.nodes += 1;
        self.pv.begin_iteration();
        self.pv.reset_ply(0);

        let side = self.board.side_to_move();
        let mut moves = legal_moves(&mut self.board);
        if moves.is_empty() {
            return None;
        }
        self.order_moves(&mut moves, side, 0);

        let root_hash = self.board.hash();
        for mv in moves {
            let backup = self.board.make_move(mv);
            self.game_history.push(root_hash);
            let score = -self.negamax(-beta, -alpha, depth - 1, 1);
            self.game_history.pop();
            self.board.unmake_move(mv, backup);

            if score > alpha {
                if mv.is_quiet() {
                    self.history.add(side, mv, depth);
                }
                alpha = score;
                self.pv.update(0, mv);
            }
        }
        Some(alpha)
    }

    fn negamax(&mut self, mut alpha: i32, beta: i32, depth: i32, ply: usize) -> i32 {
        self.nodes += 1;
        self.pv.reset_ply(ply);

        if self.board.halfmove_clock() >= self.config.half_move_limit {
            return 0;
        }
        let hash = self.board.hash();
        if self.game_history.is_repetition(hash) {
            return 0;
        }
        if let Some(entry) = self.tt.probe(hash) {
            if let Some(score) = entry.cutoff_score(depth, alpha, beta, ply) {
                if !entry.best_move.is_null() {
                    self.pv.set_single(ply, entry.best_move);
                }
                return score;
            }
        }
        if depth <= 0 || ply >= MAX_PLY - 1 {
            return self.quiescence(alpha, beta, ply);
        }

        // Passing while in check would let the opponent capture the king.
        let in_check = self.board.is_in_check();
        if depth >= self.config.null_move_min_depth && !in_check {
            let backup = self.board.make_null_move();
            let score = -self.negamax(
                -beta,
                -beta + 1,
                depth - 1 - self.config.null_move_reduction,
                ply + 1,
            );
            self.board.unmake_null_move(backup);
            if score >= beta {
                self.store(hash, depth, beta, Bound::Lower, Move::NULL, ply);
                return beta;
            }
        }

        let side = self.board.side_to_move();
        let mut moves = pseudo_legal_moves(&self.board);
        self.order_moves(&mut moves, side, ply);

        let mut searched = 0usize;
        let mut bound = Bound::Upper;
        let mut best_move = Move::NULL;
        for mv in moves {
            let Some(backup) = self.make_legal(mv) else {
                continue;
            };
            self.game_history.push(hash);
            let score = if searched == 0 {
                -self.negamax(-beta, -alpha, depth - 1, ply + 1)
            } else {
                self.search_late_move(mv, alpha, beta, depth, searched, ply)
            };
            self.game_history.pop();
            self.board.unmake_move(mv, backup);
            searched += 1;

            if score >= beta {
                if mv.is_quiet() {
                    self.killers.push(ply, mv);
                }
                self.store(hash, depth, beta, Bound::Lower, mv, ply);
                return beta;
            }
            if score > alpha {
                if mv.is_quiet() {
                    self.history.add(side, mv, depth);
                }
                alpha = score;
                bound = Bound::Exact;
                best_move = mv;
                self.pv.update(ply, mv);
            }
        }

        if searched == 0 {
            let score = self.terminal_score(ply);
            self.store(hash, depth, score, Bound::Exact, Move::NULL, ply);
            return score;
        }

        self.store(hash, depth, alpha, bound, best_move, ply);
        alpha
    }

    /// Null-window probe (reduced for late quiet moves), widened to a full
    /// depth then a full window only while the move keeps beating alpha.
    fn search_late_move(
        &mut self,
        mv: Move,
        alpha: i32,
        beta: i32,
        depth: i32,
        searched: usize,
        ply: usize,
    ) -> i32 {
        let reduce = searched >= self.config.lmr_full_depth_moves
            && depth >= self.config.lmr_min_depth
            && mv.is_quiet();
        let mut score = if reduce {
            -self.negamax(-alpha - 1, -alpha, depth - 2, ply + 1)
        } else {
            alpha + 1
        };
        if score > alpha {
            score = -self.negamax(-alpha - 1, -alpha, depth - 1, ply + 1);
            if score > alpha && score < beta {
                score = -self.negamax(-beta, -alpha, depth - 1, ply + 1);
            }
        }
        score
    }

    fn quiescence(&mut self, mut alpha: i32, beta: i32, ply: usize) -> i32 {
        self.nodes += 1;
        self.pv.reset_ply(ply);

        if self.board.halfmove_clock() >= self.config.half_move_limit {
            return 0;
        }
        if !has_legal_moves(&mut self.board) {
            return self.terminal_score(ply);
        }

        let stand_pat = self.scorer.score(&self.board);
        if ply >= MAX_PLY - 1 {
            return stand_pat;
        }
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let side = self.board.side_to_move();
        let mut captures = pseudo_legal_captures(&self.board);
        self.order_moves(&mut captures, side, ply);

        for mv in captures {
            let Some(backup) = self.make_legal(mv) else {
                continue;
            };
            let score = -self.quiescence(-beta, -alpha, ply + 1);
            self.board.unmake_move(mv, backup);

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }
        alpha
    }

    #[inline]
    fn store(&mut self, key: u64, depth: i32, score: i32, bound: Bound, best_move: Move, ply: usize) {
        self.tt.store(TTEntry {
            key,
            depth,
            score: score_to_tt(score, ply),
            bound,
            best_move,
        });
    }
}
