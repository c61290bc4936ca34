//! Tic-tac-toe with a random bot and a single-ply heuristic bot.

pub mod cli;
pub mod error;
pub mod game;
pub mod lines;
pub mod player;
pub mod session;
pub mod ui;

pub use error::AppError;
pub use game::{Board, InvalidIndex, Mark, OpenCells, Outcome};
pub use player::{heuristic_move, random_move, Decision, Player, TieBreak};
pub use session::{arena, Game, Mode, SessionResult, Tally};
