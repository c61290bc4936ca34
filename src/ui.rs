//! Plain terminal screens. Everything writes to a caller-supplied sink.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};

use crate::{
    game::{Board, Mark, Outcome, BOARD_SIZE},
    session::{Mode, Tally},
};

const KEY_MAP: [&str; BOARD_SIZE] = ["[1][2][3]", "[4][5][6]", "[7][8][9]"];

fn colored_mark(mark: Mark) -> ColoredString {
    let symbol = mark.to_char().to_string();
    let symbol = symbol.as_str();
    match mark {
        Mark::Player => symbol.red().bold(),
        Mark::Bot => symbol.green().bold(),
        Mark::Empty => symbol.normal(),
    }
}

pub fn title_screen(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "     Welcome to Tic-Tac-Toe     ".bold())?;
    writeln!(out)?;
    writeln!(out, "    press 1-3 to select mode    ")?;
    writeln!(out)?;
    writeln!(out, "  1 - player vs easy cpu        ")?;
    writeln!(out, "  2 - player vs impossible cpu  ")?;
    writeln!(out, "  3 - two player                ")?;
    writeln!(out)?;
    writeln!(out, "    press q anytime to leave    ")?;
    out.flush()
}

pub fn board_screen(out: &mut impl Write, board: &Board) -> io::Result<()> {
    writeln!(out)?;
    for (row, keys) in board.cells().chunks(BOARD_SIZE).zip(KEY_MAP) {
        write!(out, "     ")?;
        for &mark in row {
            write!(out, "[{}]", colored_mark(mark))?;
        }
        writeln!(out, "        {}", keys)?;
    }
    writeln!(out)?;
    writeln!(out, "choose a space by pressing a key 1-9")?;
    out.flush()
}

pub fn result_message(outcome: Outcome, mode: Mode) -> &'static str {
    match (outcome, mode.against_bot()) {
        (Outcome::PlayerWin, true) => "Player Wins!",
        (Outcome::PlayerWin, false) => "Player 1 Wins!",
        (Outcome::BotWin, true) => "CPU Wins",
        (Outcome::BotWin, false) => "Player 2 Wins!",
        (Outcome::Tie | Outcome::InProgress, _) => "It's a Tie",
    }
}

pub fn result_screen(out: &mut impl Write, outcome: Outcome, mode: Mode) -> io::Result<()> {
    let message = result_message(outcome, mode);
    let message = match outcome {
        Outcome::PlayerWin => message.red(),
        Outcome::BotWin => message.green(),
        Outcome::Tie | Outcome::InProgress => message.yellow(),
    };
    writeln!(out)?;
    writeln!(out, "{}", message)?;
    writeln!(out, "press enter to return to the menu")?;
    out.flush()
}

pub fn tally_screen(out: &mut impl Write, tally: &Tally, one: &str, two: &str) -> io::Result<()> {
    writeln!(
        out,
        "{}: {} | {}: {} | Ties: {}",
        one,
        tally.player_one.to_string().as_str().red(),
        two,
        tally.player_two.to_string().as_str().green(),
        tally.ties.to_string().as_str().yellow()
    )?;
    out.flush()
}
