use std::io::{self, Write};

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tictactoe::{
    cli::{Cli, Command},
    player::{HumanPlayer, InputSource, Player, QUIT_KEY},
    arena, ui, AppError, Game, Mode, SessionResult, Tally, TieBreak,
};

fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command.unwrap_or(Command::Play { mode: None }) {
        Command::Play { mode } => play(mode, cli.seed, cli.tie_break),
        Command::Arena { games } => {
            let tally = arena(games, cli.seed, cli.tie_break)?;
            ui::tally_screen(&mut io::stdout(), &tally, "Random", "Heuristic")?;
            Ok(())
        }
    }
}

fn players(mode: Mode, tie_break: TieBreak) -> (Box<dyn Player>, Box<dyn Player>) {
    let human: Box<dyn Player> = Box::new(HumanPlayer::new(io::stdin()));
    let opponent: Box<dyn Player> = match mode.bot(tie_break) {
        Some(bot) => bot,
        None => Box::new(HumanPlayer::new(io::stdin())),
    };
    (human, opponent)
}

// `None` means the user asked to quit.
fn choose_mode(input: &mut impl InputSource, out: &mut impl Write) -> Result<Option<Mode>, AppError> {
    ui::title_screen(out)?;
    while let Some(line) = input.next_line()? {
        if line.trim().eq_ignore_ascii_case(QUIT_KEY) {
            return Ok(None);
        }
        if let Some(mode) = Mode::from_key(&line) {
            return Ok(Some(mode));
        }
    }
    Ok(None)
}

fn play(fixed_mode: Option<Mode>, seed: Option<u64>, tie_break: TieBreak) -> Result<(), AppError> {
    let mut input = io::stdin();
    let mut out = io::stdout();
    let mut tally = Tally::default();
    let mut played: u64 = 0;

    loop {
        let mode = match fixed_mode {
            Some(mode) => mode,
            None => match choose_mode(&mut input, &mut out)? {
                Some(mode) => mode,
                None => break,
            },
        };
        info!(?mode, "starting session");

        let (one, two) = players(mode, tie_break);
        let mut game = Game::new(one, two, seed.map(|seed| seed.wrapping_add(played)));
        played += 1;

        let result = game.play(|board| {
            if let Err(e) = ui::board_screen(&mut io::stdout(), board) {
                warn!(error = %e, "could not draw the board");
            }
        })?;

        if let SessionResult::Finished(outcome) = result {
            tally.record(result);
            ui::result_screen(&mut out, outcome, mode)?;
            if input.next_line()?.is_none() {
                break;
            }
        }

        if fixed_mode.is_some() {
            break;
        }
    }

    let (one, two) = match fixed_mode {
        Some(Mode::TwoPlayer) => ("Player 1", "Player 2"),
        Some(_) => ("Player", "CPU"),
        None => ("X", "O"),
    };
    ui::tally_screen(&mut out, &tally, one, two)?;
    Ok(())
}
