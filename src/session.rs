use clap::ValueEnum;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::{
    game::{Board, InvalidIndex, Mark, Outcome},
    player::{Decision, HeuristicPlayer, Player, Ply, RandomPlayer, TieBreak},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Against the random bot.
    #[value(name = "easy")]
    EasyBot,
    /// Against the heuristic bot.
    #[value(name = "impossible")]
    ImpossibleBot,
    /// Two humans sharing the keyboard.
    TwoPlayer,
}

impl Mode {
    /// Title screen keys: `1`, `2` and `3`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "1" => Some(Mode::EasyBot),
            "2" => Some(Mode::ImpossibleBot),
            "3" => Some(Mode::TwoPlayer),
            _ => None,
        }
    }

    pub fn against_bot(&self) -> bool {
        *self != Mode::TwoPlayer
    }

    /// The automated opponent of a bot mode.
    pub fn bot(&self, tie_break: TieBreak) -> Option<Box<dyn Player>> {
        match self {
            Mode::EasyBot => Some(Box::new(RandomPlayer::new())),
            Mode::ImpossibleBot => Some(Box::new(HeuristicPlayer::new(tie_break))),
            Mode::TwoPlayer => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionResult {
    Finished(Outcome),
    /// A human left before the game was decided.
    Withdrawn,
}

// ##############################
// # Game
// ##############################

struct Seat {
    player: Box<dyn Player>,
    mark: Mark,
    turn: u32,
}

impl Seat {
    fn new(player: Box<dyn Player>, mark: Mark) -> Self {
        Seat { player, mark, turn: 1 }
    }
}

/// One game from the empty board to a result. Seat one plays X and moves
/// first, seat two plays O.
pub struct Game {
    seats: [Seat; 2],
    board: Board,
    rng: StdRng,
    seed: u64,
    current: usize,
}

impl Game {
    pub fn new(player_one: Box<dyn Player>, player_two: Box<dyn Player>, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
        Game {
            seats: [
                Seat::new(player_one, Mark::Player),
                Seat::new(player_two, Mark::Bot),
            ],
            board: Board::new(),
            rng: StdRng::seed_from_u64(seed),
            seed,
            current: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Runs the game, calling `show` with the board at the start and after
    /// every placed mark.
    pub fn play<F: FnMut(&Board)>(&mut self, mut show: F) -> Result<SessionResult, InvalidIndex> {
        info!(seed = self.seed, "game started");
        show(&self.board);

        loop {
            let seat = &mut self.seats[self.current];
            let ply = Ply {
                board: &self.board,
                mark: seat.mark,
                turn: seat.turn,
            };

            let index = match seat.player.get_move(&ply, &mut self.rng) {
                Decision::Play(index) => index,
                Decision::Withdraw => {
                    info!(mark = ?seat.mark, "player left the game");
                    return Ok(SessionResult::Withdrawn);
                }
            };

            if self.board.get(index).is_some_and(|mark| mark != Mark::Empty) {
                warn!(index, mark = ?seat.mark, "cell already taken, asking again");
                continue;
            }

            self.board.place(seat.mark, index)?;
            debug!(index, mark = ?seat.mark, turn = seat.turn, "placed mark");
            seat.turn += 1;
            show(&self.board);

            let outcome = self.board.outcome();
            if outcome.is_over() {
                info!(?outcome, "game over");
                return Ok(SessionResult::Finished(outcome));
            }

            self.current = 1 - self.current;
        }
    }
}

// ##############################
// # Tally
// ##############################

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub player_one: u32,
    pub player_two: u32,
    pub ties: u32,
}

impl Tally {
    pub fn record(&mut self, result: SessionResult) {
        match result {
            SessionResult::Finished(Outcome::PlayerWin) => self.player_one += 1,
            SessionResult::Finished(Outcome::BotWin) => self.player_two += 1,
            SessionResult::Finished(Outcome::Tie) => self.ties += 1,
            SessionResult::Finished(Outcome::InProgress) | SessionResult::Withdrawn => {}
        }
    }

    pub fn games(&self) -> u32 {
        self.player_one + self.player_two + self.ties
    }
}

/// Random bot as X against the heuristic bot as O, `games` times. With a
/// seed, game `n` is seeded with `seed + n`.
pub fn arena(games: u32, seed: Option<u64>, tie_break: TieBreak) -> Result<Tally, InvalidIndex> {
    let mut tally = Tally::default();

    for n in 0..games {
        let mut game = Game::new(
            Box::new(RandomPlayer::new()),
            Box::new(HeuristicPlayer::new(tie_break)),
            seed.map(|seed| seed.wrapping_add(u64::from(n))),
        );
        tally.record(game.play(|_| {})?);
    }

    info!(?tally, "arena finished");
    Ok(tally)
}
