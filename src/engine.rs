/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    io,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{channel, Receiver, Sender},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Instant,
};

use anyhow::{Context, Result};

use crate::{EngineCommand, Evaluator, Game, Search, SearchConfig, SearchResult, Square};

/// The Leapfrog checkers engine.
#[derive(Debug)]
pub struct Engine {
    /// The current state of the checkers board, as known to the engine.
    ///
    /// This is modified whenever moves are played or new positions are given,
    /// and is reset whenever the engine is told to start a new game.
    game: Game,

    /// One half of a channel, responsible for sending commands to the engine to execute.
    sender: Sender<EngineCommand>,

    /// One half of a channel, responsible for receiving commands for the engine to execute.
    receiver: Receiver<EngineCommand>,

    /// Atomic flag to determine whether a search is currently running
    is_searching: Arc<AtomicBool>,

    /// Handle to the currently-running search thread, if one exists.
    search_thread: Option<JoinHandle<SearchResult>>,

    /// Search parameters to use when `go` is received without overrides.
    config: SearchConfig,
}

impl Engine {
    /// Constructs a new [`Engine`] instance to be executed with [`Engine::run`].
    pub fn new() -> Self {
        // Construct a channel for communication between the input thread and the engine
        let (sender, receiver) = channel();

        Self {
            game: Game::default(),
            sender,
            receiver,
            is_searching: Arc::default(),
            search_thread: None,
            config: SearchConfig::default(),
        }
    }

    /// Returns a string of the engine's name and current version.
    pub fn name(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// Sends an [`EngineCommand`] to the engine to be executed.
    pub fn send_command(&self, command: EngineCommand) {
        // Safe unwrap: `send` only fails once the receiving half is dropped,
        // and the engine owns its `Receiver` for as long as it exists.
        self.sender.send(command).unwrap();
    }

    /// Execute the main event loop for the engine.
    ///
    /// This function spawns a thread to handle input from `stdin` and waits on received commands.
    pub fn run(&mut self) -> Result<()> {
        // Spawn a separate thread for handling user input
        let sender = self.sender.clone();
        thread::spawn(|| {
            if let Err(err) = input_handler(sender) {
                eprintln!("Input handler thread stopping after fatal error: {err}");
            }
        });

        // Loop on user input
        while let Ok(cmd) = self.receiver.recv() {
            // Any command that touches the game first settles an in-flight search,
            // so its chosen move is applied before the command observes the board
            match cmd {
                EngineCommand::Display => {
                    self.finish_search();
                    println!("{}", self.game);
                }

                EngineCommand::Eval { pretty } => {
                    self.finish_search();
                    self.eval(pretty);
                }

                EngineCommand::Exit => {
                    // Await the completion of any ongoing search threads
                    self.finish_search();

                    // Exit the loop so the engine can quit
                    break;
                }

                EngineCommand::Fen => {
                    self.finish_search();
                    println!("{}", self.game.to_fen());
                }

                EngineCommand::Flip => {
                    self.finish_search();
                    self.game.toggle_side_to_move();
                }

                EngineCommand::Go { depth } => {
                    self.finish_search();

                    let config = SearchConfig {
                        depth: depth.unwrap_or(self.config.depth),
                    };
                    self.search_thread = self.start_search(config);
                }

                EngineCommand::MakeMove { from, to } => {
                    self.finish_search();
                    match self.game.make_move_checked(from, to) {
                        Ok(mv) => println!("played {from}{mv}"),
                        Err(err) => eprintln!("Error: {err}"),
                    }
                }

                EngineCommand::Moves { square } => {
                    self.finish_search();
                    if let Err(err) = self.moves(square) {
                        eprintln!("Error: {err}");
                    }
                }

                EngineCommand::NewGame => self.new_game(),

                EngineCommand::Perft { depth } => {
                    self.finish_search();
                    self.perft(depth);
                }

                EngineCommand::Position { fen } => {
                    self.finish_search();
                    match fen.join(" ").parse() {
                        Ok(game) => self.game = game,
                        Err(err) => eprintln!("Error: {err}"),
                    }
                }

                EngineCommand::SetDepth { depth } => self.config.depth = depth,

                EngineCommand::Wait => self.finish_search(),

                EngineCommand::Winner => {
                    self.finish_search();
                    match self.game.winner() {
                        Some(color) => println!("{} has won", color.name()),
                        None => println!("(none)"),
                    }
                }
            };
        }

        Ok(())
    }

    /// Executes the `eval` command, printing an evaluation of the current position.
    fn eval(&self, pretty: bool) {
        let evaluator = Evaluator::new(&self.game);
        if pretty {
            println!("{evaluator}");
        } else {
            println!("{}", evaluator.eval());
        }
    }

    /// Executes the `moves` command, listing the side to move's legal moves.
    fn moves(&self, square: Option<Square>) -> Result<()> {
        // Each entry is the origin square followed by the move itself
        let moves = if let Some(square) = square {
            let origin = square;
            self.game
                .moves_from(square)?
                .iter()
                .map(|mv| format!("{origin}{mv}"))
                .collect::<Vec<_>>()
        } else {
            self.game
                .get_legal_moves()
                .into_iter()
                .map(|(piece, mv)| format!("{}{mv}", piece.square()))
                .collect::<Vec<_>>()
        };

        // If there are none, print "(none)"
        if moves.is_empty() {
            println!("(none)");
        } else {
            println!("{}", moves.join(", "));
        }

        Ok(())
    }

    /// Executes the `perft` command, counting and timing reachable positions.
    fn perft(&self, depth: usize) {
        let now = Instant::now();
        let nodes = self.game.perft(depth);
        let elapsed = now.elapsed();
        let nps = nodes as f32 / elapsed.as_secs_f32();

        println!("{nodes} nodes in {elapsed:.1?} ({nps:.0} nps)");
    }

    /// Resets the engine's internal game state to the standard starting position.
    ///
    /// Any in-flight search is awaited and its result discarded.
    fn new_game(&mut self) {
        if let Some(handle) = self.search_thread.take() {
            _ = handle.join();
        }
        self.set_is_searching(false);
        self.game = Game::default();
    }

    /// Sets the search flag to signal that the engine is starting/stopping a search.
    fn set_is_searching(&mut self, status: bool) {
        self.is_searching.store(status, Ordering::Relaxed);
    }

    /// Returns `true` if the engine is currently executing a search.
    fn is_searching(&self) -> bool {
        self.is_searching.load(Ordering::Relaxed)
    }

    /// Starts a search on the current position, given the parameters in `config`.
    fn start_search(&mut self, config: SearchConfig) -> Option<JoinHandle<SearchResult>> {
        // Cannot start a search if one is already running
        if self.is_searching() {
            eprintln!("A search is already running");
            return None;
        }
        self.set_is_searching(true);

        // Clone the parameters that will be sent into the thread
        let game = self.game;
        let is_searching = Arc::clone(&self.is_searching);

        // Spawn a thread to conduct the search
        let handle = thread::spawn(move || Search::new(&game, is_searching, config).start());

        Some(handle)
    }

    /// Awaits the current search thread, blocking until it finishes and returning its result.
    fn stop_search(&mut self) -> Option<SearchResult> {
        // Can't stop a search if there aren't any threads searching!
        let handle = self.search_thread.take()?;

        // Attempt to join the thread handle to retrieve the result
        let id = handle.thread().id();
        let Ok(res) = handle.join() else {
            eprintln!("Failed to join on thread {id:?}");
            return None;
        };

        self.set_is_searching(false);

        Some(res)
    }

    /// Awaits any in-flight search and plays the move it found.
    ///
    /// The engine's game is replaced wholesale with the best successor the
    /// search produced. If the search found no legal moves, the game is left
    /// untouched and that outcome is reported.
    fn finish_search(&mut self) {
        let Some(res) = self.stop_search() else {
            return;
        };

        let Some(best) = res.best else {
            println!(
                "{} has no legal moves",
                self.game.side_to_move().name()
            );
            return;
        };

        // Recover the (piece, move) pair that produced the chosen successor,
        // purely so it can be reported in origin-destination form
        let played = self
            .game
            .get_legal_moves()
            .into_iter()
            .find(|(piece, mv)| self.game.with_move_made(*piece, mv) == best);

        if let Some((piece, mv)) = played {
            println!("bestmove {}{mv}", piece.square());
        }

        self.game = best;
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Loops endlessly to await input via `stdin`, sending all successfully-parsed commands through the supplied `sender`.
fn input_handler(sender: Sender<EngineCommand>) -> Result<()> {
    let mut buffer = String::with_capacity(2048); // Seems like a good amount of space to pre-allocate

    loop {
        // Clear the buffer, read input, and trim the trailing newline
        buffer.clear();
        let bytes = io::stdin()
            .read_line(&mut buffer)
            .context("Failed to read line when parsing commands")?;

        // For ctrl + d
        if 0 == bytes {
            // Send the Exit command and stop this thread
            sender
                .send(EngineCommand::Exit)
                .context("Failed to send 'exit' command after receiving empty input")?;

            return Ok(());
        }

        // Trim any leading/trailing whitespace
        let buf = buffer.trim();

        // Ignore empty lines
        if buf.is_empty() {
            continue;
        }

        match buf.parse() {
            // If successful, send the command to the engine
            Ok(cmd) => sender
                .send(cmd)
                .context("Failed to send command to engine")?,

            // If an invalid command was received, just print the error and continue running
            Err(err) => eprintln!("{err}"),
        }
    }
}
