//! Command-line interface.

use clap::{Parser, Subcommand};

use crate::{player::TieBreak, session::Mode};

/// Terminal tic-tac-toe against a random or a heuristic bot
#[derive(Parser, Debug)]
#[command(name = "tictactoe", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Seed for the games' random source; game n uses seed + n
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// How the heuristic bot picks between equally scored cells
    #[arg(long, value_enum, default_value_t = TieBreak::Sequential, global = true)]
    pub tie_break: TieBreak,

    /// Print without colours
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play from the title screen, or a single game of the given mode
    Play {
        #[arg(short, long, value_enum)]
        mode: Option<Mode>,
    },
    /// Pit the random bot (X) against the heuristic bot (O)
    Arena {
        #[arg(short, long, default_value_t = 100)]
        games: u32,
    },
}
