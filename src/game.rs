use std::{fmt, ops::Index};

use derive_more::{Display, Error};

use crate::lines::{line_sums, LineSum};

// #############################
// #                           #
// #      Fixed Constants      #
// #                           #
// #############################
pub const BOARD_SIZE: usize = 3;
pub const BOARD_SIZE_SQUARED: usize = BOARD_SIZE * BOARD_SIZE;

pub const TOP_LEFT: usize = 0;
pub const TOP_RIGHT: usize = 2;
pub const BOTTOM_LEFT: usize = 6;
pub const BOTTOM_RIGHT: usize = 8;
pub const EDGE_CENTERS: [usize; 4] = [1, 3, 5, 7];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    Empty,
    Player,
    Bot,
}

impl Mark {
    pub fn to_char(&self) -> char {
        match self {
            Mark::Player => 'X',
            Mark::Bot => 'O',
            Mark::Empty => ' ',
        }
    }

    pub fn opponent(&self) -> Self {
        match self {
            Mark::Player => Mark::Bot,
            Mark::Bot => Mark::Player,
            Mark::Empty => Mark::Empty,
        }
    }
}

/// Raised when a move names a cell outside `0..=8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
#[display("cell index {index} is off the board (expected 0-8)")]
pub struct InvalidIndex {
    pub index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    PlayerWin,
    BotWin,
    Tie,
}

impl Outcome {
    pub fn is_over(&self) -> bool {
        *self != Outcome::InProgress
    }
}

// #############################
// #                           #
// #         OpenCells         #
// #                           #
// #############################

/// Ascending indices of the empty cells of a board. Never allocates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenCells {
    cells: [usize; BOARD_SIZE_SQUARED],
    len: usize,
}

impl OpenCells {
    fn new() -> Self {
        OpenCells {
            cells: [0; BOARD_SIZE_SQUARED],
            len: 0,
        }
    }

    fn push(&mut self, index: usize) {
        self.cells[self.len] = index;
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.as_slice().contains(&index)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.cells[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.as_slice().iter()
    }
}

impl<'a> IntoIterator for &'a OpenCells {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Index<usize> for OpenCells {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

// #############################
// #                           #
// #           Board           #
// #                           #
// #############################

/// The 3x3 grid in row-major order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Mark; BOARD_SIZE_SQUARED],
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [Mark::Empty; BOARD_SIZE_SQUARED],
        }
    }

    /// Builds a board from explicit cells, mainly for setting up positions.
    pub fn from_cells(cells: [Mark; BOARD_SIZE_SQUARED]) -> Self {
        Board { cells }
    }

    pub fn cells(&self) -> &[Mark; BOARD_SIZE_SQUARED] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    /// Writes `mark` into the cell without checking whether it is taken.
    /// Callers are expected to offer only indices from [`Board::open_cells`].
    pub fn place(&mut self, mark: Mark, index: usize) -> Result<(), InvalidIndex> {
        let cell = self.cells.get_mut(index).ok_or(InvalidIndex { index })?;
        *cell = mark;
        Ok(())
    }

    pub fn open_cells(&self) -> OpenCells {
        let mut open = OpenCells::new();
        for (index, mark) in self.cells.iter().enumerate() {
            if *mark == Mark::Empty {
                open.push(index);
            }
        }
        open
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }

    pub fn outcome(&self) -> Outcome {
        let sums = line_sums(self);

        if sums.iter().any(|&sum| sum == LineSum::of([Mark::Player; 3])) {
            return Outcome::PlayerWin;
        }
        if sums.iter().any(|&sum| sum == LineSum::of([Mark::Bot; 3])) {
            return Outcome::BotWin;
        }
        if self.open_cells().is_empty() {
            return Outcome::Tie;
        }
        Outcome::InProgress
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for Board {
    type Output = Mark;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cells[index]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(BOARD_SIZE) {
            for mark in row {
                write!(f, "[{}]", mark.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Mark::{Bot as B, Empty as E, Player as P};

    #[test]
    fn new_board_is_empty() {
        let board = Board::new();
        assert!(board.cells().iter().all(|&mark| mark == Mark::Empty));
        assert_eq!(board.open_cells().as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(board.open_cells()[8], 8);
        assert_eq!(board.outcome(), Outcome::InProgress);
    }

    #[test]
    fn open_cells_shrink_with_each_mark() {
        let mut board = Board::new();
        let order = [4, 0, 8, 2, 6, 1, 7, 3, 5];

        for (played, &index) in order.iter().enumerate() {
            let open = board.open_cells();
            assert_eq!(open.len(), BOARD_SIZE_SQUARED - played);
            assert!(open.as_slice().windows(2).all(|pair| pair[0] < pair[1]));
            assert!(open.iter().all(|&cell| board[cell] == Mark::Empty));

            let mark = if played % 2 == 0 { P } else { B };
            board.place(mark, index).unwrap();
        }
        assert!(board.open_cells().is_empty());
    }

    #[test]
    fn place_rejects_off_board_indices() {
        let mut board = Board::new();
        assert_eq!(board.place(P, 9), Err(InvalidIndex { index: 9 }));
        assert_eq!(
            board.place(P, usize::MAX),
            Err(InvalidIndex { index: usize::MAX })
        );
        assert_eq!(board, Board::new());
    }

    #[test]
    fn place_sets_every_cell() {
        for index in 0..BOARD_SIZE_SQUARED {
            let mut board = Board::new();
            board.place(B, index).unwrap();
            assert_eq!(board.get(index), Some(B));
            assert_eq!(board.count(B), 1);
        }
    }

    #[test]
    fn place_overwrites_without_checking() {
        let mut board = Board::new();
        board.place(P, 3).unwrap();
        board.place(B, 3).unwrap();
        assert_eq!(board[3], B);
    }

    #[test]
    fn full_board_without_line_is_a_tie() {
        let board = Board::from_cells([P, B, P, P, B, B, B, P, P]);
        assert_eq!(board.outcome(), Outcome::Tie);
    }

    #[test]
    fn every_line_wins_for_its_owner() {
        let lines = [
            [0, 1, 2], [3, 4, 5], [6, 7, 8],
            [0, 3, 6], [1, 4, 7], [2, 5, 8],
            [6, 4, 2], [0, 4, 8],
        ];
        for line in lines {
            for (mark, expected) in [(P, Outcome::PlayerWin), (B, Outcome::BotWin)] {
                let mut board = Board::new();
                for index in line {
                    board.place(mark, index).unwrap();
                }
                assert_eq!(board.outcome(), expected, "line {:?}", line);
            }
        }
    }

    #[test]
    fn win_on_a_full_board_is_not_a_tie() {
        let board = Board::from_cells([P, P, P, B, B, P, B, P, B]);
        assert_eq!(board.outcome(), Outcome::PlayerWin);
    }

    #[test]
    fn two_in_a_row_is_still_in_progress() {
        let board = Board::from_cells([B, B, E, P, P, E, E, E, E]);
        assert_eq!(board.outcome(), Outcome::InProgress);
    }

    #[test]
    fn display_draws_bracketed_rows() {
        let board = Board::from_cells([P, E, E, E, B, E, E, E, P]);
        assert_eq!(board.to_string(), "[X][ ][ ]\n[ ][O][ ]\n[ ][ ][X]\n");
    }
}
