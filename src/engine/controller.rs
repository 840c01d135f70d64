//! Engine controller implementation.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::board::{
    search, Board, Move, SearchConfig, SearchInfoCallback, SearchResult, SearchState,
};

/// Search thread stack size (32 MB)
const SEARCH_STACK_SIZE: usize = 32 * 1024 * 1024;

/// Finished perft: per-root-move counts and the time taken, `None` if stopped
pub type PerftOutcome = (Option<Vec<(Move, u64)>>, Duration);

/// Active search or perft job state
pub struct SearchJob {
    /// Stop flag for the search
    stop: Arc<AtomicBool>,
    /// Handle to the search thread
    handle: JoinHandle<()>,
}

impl SearchJob {
    /// Stop the search and wait for the thread to finish
    pub fn stop_and_wait(self) {
        self.stop.store(true, Ordering::Relaxed);
        self.wait();
    }

    /// Wait for the search to finish on its own
    pub fn wait(self) {
        if self.handle.join().is_err() {
            log::error!("search thread panicked");
        }
    }

    /// Signal stop without waiting
    pub fn signal_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Engine controller owning the game position and the search state.
///
/// Searches run on a dedicated thread with a large stack so the caller can
/// keep reading commands; the search state sits behind a mutex that the
/// search thread holds for the duration of the search.
pub struct EngineController {
    /// Current board position
    board: Board,
    /// Hashes of every position reached in the game, current one last
    game_history: Vec<u64>,
    /// Search state (transposition table, killers, etc.)
    search_state: Arc<Mutex<SearchState>>,
    /// Active search job (if any)
    current_job: Option<SearchJob>,
    /// Optional callback for per-iteration search info
    info_callback: Option<SearchInfoCallback>,
}

impl EngineController {
    /// Create a new engine controller with a `tt_mb` megabyte hash table
    #[must_use]
    pub fn new(tt_mb: usize) -> Self {
        let board = Board::new();
        EngineController {
            game_history: vec![board.hash()],
            board,
            search_state: Arc::new(Mutex::new(SearchState::new(tt_mb))),
            current_job: None,
            info_callback: None,
        }
    }

    /// Get a reference to the current board
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn game_history(&self) -> &[u64] {
        &self.game_history
    }

    /// Set the board position along with the hashes of the game leading to it
    pub fn set_position(&mut self, board: Board, game_history: Vec<u64>) {
        self.stop_search();
        self.board = board;
        self.game_history = game_history;
    }

    /// Get a reference to the search state
    #[must_use]
    pub fn search_state(&self) -> &Arc<Mutex<SearchState>> {
        &self.search_state
    }

    /// Reset the board to the starting position and forget the previous game
    pub fn new_game(&mut self) {
        self.stop_search();
        self.board = Board::new();
        self.game_history = vec![self.board.hash()];
        self.search_state.lock().new_game();
    }

    /// Stop any active search
    pub fn stop_search(&mut self) {
        if let Some(job) = self.current_job.take() {
            job.stop_and_wait();
        }
    }

    /// Signal stop to active search (non-blocking)
    pub fn signal_stop(&mut self) {
        if let Some(job) = &self.current_job {
            job.signal_stop();
        }
    }

    /// Block until the active search (if any) finishes by itself
    pub fn wait_for_search(&mut self) {
        if let Some(job) = self.current_job.take() {
            job.wait();
        }
    }

    /// Check if there's a search still running
    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.current_job.as_ref().is_some_and(|job| !job.is_finished())
    }

    /// Start a search on the current position.
    ///
    /// The `on_complete` callback runs on the search thread with the result.
    /// Fails only when the search thread cannot be spawned.
    pub fn start_search<F>(&mut self, mut config: SearchConfig, on_complete: F) -> io::Result<()>
    where
        F: FnOnce(SearchResult) + Send + 'static,
    {
        self.stop_search();

        if let Some(cb) = &self.info_callback {
            config = config.with_info_callback(cb.clone());
        }

        let search_state = Arc::clone(&self.search_state);
        let mut search_board = self.board;
        let history = self.game_history.clone();

        self.spawn_job("search", move |stop| {
            let mut guard = search_state.lock();
            guard.set_game_history(history);
            let result = search(&mut search_board, &mut guard, config, stop);
            drop(guard);
            on_complete(result);
        })
    }

    /// Run perft divide on the current position in the background, so that
    /// `stop` can abandon it. `on_complete` runs on the worker thread.
    pub fn start_perft<F>(&mut self, depth: u32, on_complete: F) -> io::Result<()>
    where
        F: FnOnce(PerftOutcome) + Send + 'static,
    {
        self.stop_search();
        let mut board = self.board;
        self.spawn_job("perft", move |stop| {
            let start = Instant::now();
            let divide = board.perft_divide_until(depth, stop);
            on_complete((divide, start.elapsed()));
        })
    }

    fn spawn_job<F>(&mut self, name: &str, work: F) -> io::Result<()>
    where
        F: FnOnce(&AtomicBool) + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_clone = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name(name.to_string())
            .stack_size(SEARCH_STACK_SIZE)
            .spawn(move || work(&stop_clone))?;

        self.current_job = Some(SearchJob { stop, handle });
        Ok(())
    }

    /// Execute a closure with mutable access to the search state.
    ///
    /// Blocks while a search is running.
    pub fn with_search_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SearchState) -> R,
    {
        f(&mut self.search_state.lock())
    }

    /// Resize the transposition table
    pub fn resize_hash(&mut self, mb: usize) {
        self.stop_search();
        self.with_search_state(|state| state.resize_tt(mb));
    }

    /// Empty the transposition table
    pub fn clear_hash(&mut self) {
        self.stop_search();
        self.with_search_state(SearchState::clear_tt);
    }

    /// Set callback for iteration info reporting.
    pub fn set_info_callback(&mut self, cb: Option<SearchInfoCallback>) {
        self.info_callback = cb;
    }
}

impl Drop for EngineController {
    fn drop(&mut self) {
        self.stop_search();
    }
}
