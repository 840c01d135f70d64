use std::io::{self, BufRead, Write};
use std::sync::Arc;

use super::command::{parse_uci_command, GoParams, UciCommand};
use super::options::UciOptions;
use super::report::{format_bestmove, format_info, format_perft};
use super::try_parse_position_command;
use crate::board::{Board, SearchIterationInfo};
use crate::engine::EngineController;

/// Write protocol lines to stdout and flush, ignoring a closed pipe
fn emit(text: &str) {
    let mut stdout = io::stdout().lock();
    for line in text.lines() {
        writeln!(stdout, "{line}").ok();
    }
    stdout.flush().ok();
}

/// State of a UCI session: the engine plus the option values set so far.
pub struct UciHandler {
    engine: EngineController,
    options: UciOptions,
}

impl Default for UciHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl UciHandler {
    #[must_use]
    pub fn new() -> Self {
        let options = UciOptions::default();
        let mut engine = EngineController::new(options.hash_mb);
        engine.set_info_callback(Some(Arc::new(|info: &SearchIterationInfo| {
            emit(&format_info(info));
        })));
        UciHandler { engine, options }
    }

    #[must_use]
    pub fn engine(&self) -> &EngineController {
        &self.engine
    }

    #[must_use]
    pub fn options(&self) -> &UciOptions {
        &self.options
    }

    /// Handle a single command. Returns the synchronous response, if any;
    /// search output is written from the search thread as it happens.
    pub fn handle_command(&mut self, cmd: &UciCommand) -> Option<String> {
        match cmd {
            UciCommand::Uci => Some(self.options.identify()),
            UciCommand::IsReady => Some("readyok".to_string()),
            UciCommand::UciNewGame => {
                self.engine.new_game();
                None
            }
            UciCommand::Position(args) => {
                self.set_position(args);
                None
            }
            UciCommand::Go(go) => {
                self.go(go);
                None
            }
            UciCommand::Stop => {
                self.engine.stop_search();
                None
            }
            UciCommand::SetOption { name, value } => {
                if let Some(action) = self.options.apply_setoption(name, value.as_deref()) {
                    action.apply(&mut self.engine);
                }
                None
            }
            UciCommand::Perft(depth) => {
                self.perft(*depth);
                None
            }
            UciCommand::Quit => {
                self.engine.stop_search();
                None
            }
            UciCommand::Unknown(line) => {
                log::warn!("unknown command: {line}");
                None
            }
        }
    }

    fn set_position(&mut self, args: &[String]) {
        let tokens: Vec<&str> = args.iter().map(String::as_str).collect();
        let mut board = Board::new();
        let mut history = Vec::new();
        if let Err(e) = try_parse_position_command(&mut board, &mut history, &tokens) {
            log::warn!("{e}");
            if history.is_empty() {
                log::warn!("falling back to the start position");
                board = Board::new();
                history.push(board.hash());
            }
        }
        self.engine.set_position(board, history);
    }

    fn go(&mut self, go: &GoParams) {
        let limits = go.limits(self.engine.board().side_to_move());
        log::debug!("go: {limits:?}");
        let started = self.engine.start_search(limits.to_config(), |result| {
            emit(&format_bestmove(result.best_move));
        });
        if let Err(e) = started {
            log::error!("failed to start search: {e}");
            emit(&format_bestmove(None));
        }
    }

    fn perft(&mut self, depth: u32) {
        let started = self.engine.start_perft(depth, move |(divide, elapsed)| match divide {
            Some(divide) => emit(&format_perft(&divide, depth, elapsed)),
            None => emit(&format!("info string perft depth {depth} stopped")),
        });
        if let Err(e) = started {
            log::error!("failed to start perft: {e}");
        }
    }

    /// Block until a running search or perft has printed its result
    pub fn wait_for_search(&mut self) {
        self.engine.wait_for_search();
    }

    /// Read commands from stdin until `quit` or end of input.
    pub fn run(&mut self) {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let Some(cmd) = parse_uci_command(&line) else {
                continue;
            };
            if let Some(response) = self.handle_command(&cmd) {
                emit(&response);
            }
            if cmd == UciCommand::Quit {
                return;
            }
        }
        // Input closed while searching: let the search finish and report
        self.wait_for_search();
    }
}

/// Entry point for UCI mode.
pub fn run_uci_loop() {
    let mut handler = UciHandler::new();
    handler.run();
}
