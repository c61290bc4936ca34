use std::io::{self, BufRead};

use clap::ValueEnum;
use rand::{rngs::StdRng, seq::SliceRandom, Rng};
use tracing::{debug, warn};

use crate::{
    game::{
        Board, Mark, BOARD_SIZE_SQUARED, BOTTOM_LEFT, BOTTOM_RIGHT, EDGE_CENTERS, TOP_LEFT,
        TOP_RIGHT,
    },
    lines::{line_sums, lines_through, LineSum, LineSums},
};

// ##############################
// # Player
// ##############################

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Play(usize),
    Withdraw,
}

/// What a player sees when it is asked to move.
#[derive(Clone, Copy, Debug)]
pub struct Ply<'a> {
    pub board: &'a Board,
    pub mark: Mark,
    /// How many moves this player has made so far, plus one.
    pub turn: u32,
}

pub trait Player {
    fn get_move(&mut self, ply: &Ply<'_>, rng: &mut StdRng) -> Decision;
}

// ##############################
// # Random
// ##############################

pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    board.open_cells().as_slice().choose(rng).copied()
}

#[derive(Clone, Debug, Default)]
pub struct RandomPlayer;

impl RandomPlayer {
    pub fn new() -> Self {
        RandomPlayer {}
    }
}

impl Player for RandomPlayer {
    fn get_move(&mut self, ply: &Ply<'_>, rng: &mut StdRng) -> Decision {
        match random_move(ply.board, rng) {
            Some(index) => Decision::Play(index),
            None => Decision::Withdraw,
        }
    }
}

// ##############################
// # Heuristic
// ##############################

/// How the heuristic settles between cells with the same score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum TieBreak {
    /// Scan left to right and take each later tie on a coin flip. The last
    /// of several ties is favoured.
    #[default]
    Sequential,
    /// Every tied cell is equally likely.
    Uniform,
}

const COMPLETE_LINE: u32 = 50;
const BLOCK_LINE: u32 = 20;
const EXTEND_LINE: u32 = 3;
const CONTEST_LINE: u32 = 2;
const OPEN_LINE: u32 = 1;

fn line_potential(sum: LineSum, own: Mark) -> u32 {
    let opponent = own.opponent();
    let empty = Mark::Empty;

    if sum == LineSum::of([own, own, empty]) {
        COMPLETE_LINE
    } else if sum == LineSum::of([opponent, opponent, empty]) {
        BLOCK_LINE
    } else if sum == LineSum::of([own, empty, empty]) {
        EXTEND_LINE
    } else if sum == LineSum::of([opponent, empty, empty]) {
        CONTEST_LINE
    } else if sum == LineSum::of([empty; 3]) {
        OPEN_LINE
    } else {
        0
    }
}

/// Score of playing `own` into `cell`, summed over every line through it.
pub fn winning_potential(sums: &LineSums, cell: usize, own: Mark) -> u32 {
    lines_through(cell)
        .into_iter()
        .map(|line| line_potential(sums[line], own))
        .sum()
}

fn pick_best<R: Rng + ?Sized>(
    scored: impl IntoIterator<Item = (usize, u32)>,
    tie_break: TieBreak,
    rng: &mut R,
) -> Option<usize> {
    match tie_break {
        TieBreak::Sequential => {
            let mut best: Option<(usize, u32)> = None;
            for (cell, score) in scored {
                best = match best {
                    Some((_, top)) if score < top => best,
                    Some((_, top)) if score == top && !rng.gen_bool(0.5) => best,
                    _ => Some((cell, score)),
                };
            }
            best.map(|(cell, _)| cell)
        }
        TieBreak::Uniform => {
            let mut tied = [0; BOARD_SIZE_SQUARED];
            let mut count = 0;
            let mut top = 0;
            for (cell, score) in scored {
                if count == 0 || score > top {
                    top = score;
                    count = 0;
                }
                if score == top && count < tied.len() {
                    tied[count] = cell;
                    count += 1;
                }
            }
            tied[..count].choose(rng).copied()
        }
    }
}

// [X][ ][ ]
// [ ][O][ ]
// [ ][ ][X]
// Scoring prefers a corner here, which loses to the second corner fork.
fn forced_edge<R: Rng + ?Sized>(board: &Board, own: Mark, turn: u32, rng: &mut R) -> Option<usize> {
    let opponent = own.opponent();
    let mirrored = board[TOP_LEFT] == board[BOTTOM_RIGHT] && board[TOP_RIGHT] == board[BOTTOM_LEFT];
    let opponent_corners = board[TOP_LEFT] == opponent || board[TOP_RIGHT] == opponent;

    if turn != 2 || !mirrored || !opponent_corners {
        return None;
    }

    let mut open_edges = [0; 4];
    let mut count = 0;
    for edge in EDGE_CENTERS {
        if board[edge] == Mark::Empty {
            open_edges[count] = edge;
            count += 1;
        }
    }
    open_edges[..count].choose(rng).copied()
}

/// Single-ply choice for `own`. `turn` is the bot's own move number in
/// this game, starting at 1. Returns `None` only on a full board.
pub fn heuristic_move<R: Rng + ?Sized>(
    board: &Board,
    own: Mark,
    turn: u32,
    tie_break: TieBreak,
    rng: &mut R,
) -> Option<usize> {
    let open = board.open_cells();
    if open.is_empty() {
        return None;
    }

    if let Some(edge) = forced_edge(board, own, turn, rng) {
        debug!(edge, turn, "mirrored corners, forcing an edge");
        return Some(edge);
    }

    let sums = line_sums(board);
    let scored = open
        .iter()
        .map(|&cell| (cell, winning_potential(&sums, cell, own)));
    let choice = pick_best(scored, tie_break, rng);
    debug!(?choice, ?own, turn, "heuristic move");
    choice
}

#[derive(Clone, Debug, Default)]
pub struct HeuristicPlayer {
    tie_break: TieBreak,
}

impl HeuristicPlayer {
    pub fn new(tie_break: TieBreak) -> Self {
        HeuristicPlayer { tie_break }
    }
}

impl Player for HeuristicPlayer {
    fn get_move(&mut self, ply: &Ply<'_>, rng: &mut StdRng) -> Decision {
        match heuristic_move(ply.board, ply.mark, ply.turn, self.tie_break, rng) {
            Some(index) => Decision::Play(index),
            None => Decision::Withdraw,
        }
    }
}

// ##############################
// # Human
// ##############################

/// Where a human's typed lines come from.
pub trait InputSource {
    /// Next line, or `None` once input is closed.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

impl InputSource for io::Stdin {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

impl<B: BufRead> InputSource for io::Lines<B> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.next().transpose()
    }
}

pub const QUIT_KEY: &str = "q";

/// Maps the keys `1`-`9` onto cells `0`-`8`.
pub fn cell_for_key(key: &str) -> Option<usize> {
    key.trim()
        .parse::<usize>()
        .ok()
        .filter(|number| (1..=BOARD_SIZE_SQUARED).contains(number))
        .map(|number| number - 1)
}

pub struct HumanPlayer<I> {
    input: I,
}

impl<I: InputSource> HumanPlayer<I> {
    pub fn new(input: I) -> Self {
        HumanPlayer { input }
    }
}

impl<I: InputSource> Player for HumanPlayer<I> {
    fn get_move(&mut self, ply: &Ply<'_>, _rng: &mut StdRng) -> Decision {
        let open = ply.board.open_cells();
        loop {
            let line = match self.input.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => return Decision::Withdraw,
                Err(e) => {
                    warn!(error = %e, "could not read input, leaving the game");
                    return Decision::Withdraw;
                }
            };

            if line.trim().eq_ignore_ascii_case(QUIT_KEY) {
                return Decision::Withdraw;
            }
            match cell_for_key(&line) {
                Some(index) if open.contains(index) => return Decision::Play(index),
                _ => debug!(key = line.trim(), "ignored key"),
            }
        }
    }
}
