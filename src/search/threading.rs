//! Background search execution.
//!
//! A `Searcher` is moved onto a dedicated thread for the duration of one
//! iterative-deepening search and handed back on join. The only state shared
//! with the caller is the cancel flag.

use std::io;
use std::thread::{self, JoinHandle};

use crate::errors::EngineResult;
use crate::search::board_scoring::BoardScorer;
use crate::search::cancellation::CancelToken;
use crate::search::iterative_deepening::{SearchOutcome, Searcher};

pub type WorkerResult<S> = (EngineResult<SearchOutcome>, Searcher<S>);

pub struct SearchWorker<S: BoardScorer + 'static> {
    handle: JoinHandle<WorkerResult<S>>,
    token: CancelToken,
}

impl<S: BoardScorer + 'static> SearchWorker<S> {
    pub fn spawn(mut searcher: Searcher<S>, token: CancelToken) -> io::Result<Self> {
        let worker_token = token.clone();
        let handle = thread::Builder::new()
            .name("plum-search".to_owned())
            .spawn(move || {
                let outcome = searcher.search(&worker_token);
                (outcome, searcher)
            })?;
        log::debug!("search worker started");
        Ok(Self { handle, token })
    }

    /// Ask the search to stop after its current depth.
    #[inline]
    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn join(self) -> thread::Result<WorkerResult<S>> {
        self.handle.join()
    }
}

#[cfg(test)]
mod tests {
    use super::SearchWorker;
    use crate::game_state::chess_rules::KIWIPETE_FEN;
    use crate::game_state::chess_types::Board;
    use crate::moves::attack_tables::AttackTables;
    use crate::search::board_scoring::MaterialScorer;
    use crate::search::cancellation::CancelToken;
    use crate::search::iterative_deepening::{Searcher, StopReason};
    use crate::search::search_config::SearchConfig;

    fn searcher(max_depth: u32) -> Searcher<MaterialScorer> {
        let board = Board::from_fen(AttackTables::shared(), KIWIPETE_FEN).expect("valid fen");
        let config = SearchConfig {
            max_depth,
            tt_size_mb: 1,
            ..SearchConfig::default()
        };
        Searcher::new(board, MaterialScorer, config).expect("valid config")
    }

    #[test]
    fn worker_returns_outcome_and_searcher() {
        let worker = SearchWorker::spawn(searcher(3), CancelToken::new()).expect("spawn");
        let (outcome, searcher) = worker.join().expect("worker panicked");
        let outcome = outcome.expect("search");
        assert_eq!(outcome.stop, StopReason::DepthLimit);
        assert_eq!(outcome.depth, 3);
        assert!(outcome.best_move.is_some());
        assert!(searcher.transposition_table().stats().stores > 0);
    }

    #[test]
    fn cancelled_worker_still_reports_a_move() {
        let token = CancelToken::new();
        let worker = SearchWorker::spawn(searcher(64), token.clone()).expect("spawn");
        worker.cancel();
        let (outcome, _) = worker.join().expect("worker panicked");
        let outcome = outcome.expect("search");
        assert_eq!(outcome.stop, StopReason::Cancelled);
        assert!(outcome.depth >= 1);
        assert!(outcome.best_move.is_some());
        assert!(token.is_cancelled());
    }

    #[test]
    fn independent_boards_search_concurrently() {
        let workers: Vec<_> = (0..2)
            .map(|_| SearchWorker::spawn(searcher(2), CancelToken::new()).expect("spawn"))
            .collect();
        let moves: Vec<_> = workers
            .into_iter()
            .map(|w| w.join().expect("worker panicked").0.expect("search").best_move)
            .collect();
        assert_eq!(moves[0], moves[1]);
    }
}
