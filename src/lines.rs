//! The eight three-in-a-row lines and their occupancy signatures.

use std::ops::Index;

use flagset::{flags, FlagSet, Flags};

use crate::game::{Board, Mark};

flags! {
    /// Declaration order is the order of [`LineSums`].
    pub enum Line: u8 {
        TopRow,
        MidRow,
        BotRow,
        LeftCol,
        MidCol,
        RightCol,
        /// Bottom-left to top-right.
        ForwardDiag,
        /// Top-left to bottom-right.
        BackDiag,
    }
}

pub const LINE_COUNT: usize = 8;

impl Line {
    pub fn cells(self) -> [usize; 3] {
        match self {
            Line::TopRow => [0, 1, 2],
            Line::MidRow => [3, 4, 5],
            Line::BotRow => [6, 7, 8],
            Line::LeftCol => [0, 3, 6],
            Line::MidCol => [1, 4, 7],
            Line::RightCol => [2, 5, 8],
            Line::ForwardDiag => [6, 4, 2],
            Line::BackDiag => [0, 4, 8],
        }
    }

    pub fn all() -> impl Iterator<Item = Line> {
        Line::LIST.iter().copied()
    }

    fn ordinal(self) -> usize {
        Line::LIST
            .iter()
            .position(|&line| line == self)
            .unwrap_or_default()
    }
}

/// Lines a cell takes part in. Corners sit on three, edges on two and the
/// centre on four. Off-board indices belong to no line.
pub fn lines_through(cell: usize) -> FlagSet<Line> {
    match cell {
        0 => Line::TopRow | Line::LeftCol | Line::BackDiag,
        1 => Line::TopRow | Line::MidCol,
        2 => Line::TopRow | Line::RightCol | Line::ForwardDiag,
        3 => Line::MidRow | Line::LeftCol,
        4 => Line::MidRow | Line::MidCol | Line::ForwardDiag | Line::BackDiag,
        5 => Line::MidRow | Line::RightCol,
        6 => Line::BotRow | Line::LeftCol | Line::ForwardDiag,
        7 => Line::BotRow | Line::MidCol,
        8 => Line::BotRow | Line::RightCol | Line::BackDiag,
        _ => FlagSet::default(),
    }
}

// Bot + 4 * Player over at most three marks never collides, so a sum names
// exactly one mix of marks.
const fn weight(mark: Mark) -> u8 {
    match mark {
        Mark::Empty => 0,
        Mark::Bot => 1,
        Mark::Player => 4,
    }
}

/// Sum of the mark weights along one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineSum(u8);

impl LineSum {
    /// Signature of a line holding these three marks, in any order.
    pub const fn of(marks: [Mark; 3]) -> Self {
        LineSum(weight(marks[0]) + weight(marks[1]) + weight(marks[2]))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineSums([LineSum; LINE_COUNT]);

impl LineSums {
    pub fn iter(&self) -> std::slice::Iter<'_, LineSum> {
        self.0.iter()
    }

    pub fn values(&self) -> [u8; LINE_COUNT] {
        self.0.map(LineSum::value)
    }
}

impl Index<Line> for LineSums {
    type Output = LineSum;

    fn index(&self, line: Line) -> &Self::Output {
        &self.0[line.ordinal()]
    }
}

pub fn line_sums(board: &Board) -> LineSums {
    let mut sums = [LineSum(0); LINE_COUNT];
    for (sum, line) in sums.iter_mut().zip(Line::all()) {
        *sum = LineSum::of(line.cells().map(|index| board[index]));
    }
    LineSums(sums)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::BOARD_SIZE_SQUARED;
    use Mark::{Bot as B, Empty as E, Player as P};

    fn composition(marks: [Mark; 3]) -> (usize, usize, usize) {
        let count = |mark| marks.iter().filter(|&&m| m == mark).count();
        (count(E), count(B), count(P))
    }

    #[test]
    fn sums_identify_the_mix_of_marks() {
        let all = [E, B, P];
        let mut seen: Vec<(LineSum, (usize, usize, usize))> = vec![];

        for a in all {
            for b in all {
                for c in all {
                    let sum = LineSum::of([a, b, c]);
                    let mix = composition([a, b, c]);
                    if let Some((_, other)) = seen.iter().find(|(s, _)| *s == sum) {
                        assert_eq!(*other, mix, "sum {} is ambiguous", sum.value());
                    }
                    seen.push((sum, mix));
                }
            }
        }

        let mut distinct: Vec<u8> = seen.iter().map(|(sum, _)| sum.value()).collect();
        distinct.sort_unstable();
        distinct.dedup();
        assert_eq!(distinct.len(), 10);
    }

    #[test]
    fn sums_follow_line_order() {
        let board = Board::from_cells([P, P, P, E, B, E, B, E, E]);
        let sums = line_sums(&board);

        assert_eq!(sums[Line::TopRow], LineSum::of([P, P, P]));
        assert_eq!(sums[Line::MidRow], LineSum::of([E, B, E]));
        assert_eq!(sums[Line::BotRow], LineSum::of([B, E, E]));
        assert_eq!(sums[Line::LeftCol], LineSum::of([P, E, B]));
        assert_eq!(sums[Line::MidCol], LineSum::of([P, B, E]));
        assert_eq!(sums[Line::RightCol], LineSum::of([P, E, E]));
        assert_eq!(sums[Line::ForwardDiag], LineSum::of([B, B, P]));
        assert_eq!(sums[Line::BackDiag], LineSum::of([P, B, E]));
        assert_eq!(sums.values()[0], sums[Line::TopRow].value());
        assert_eq!(sums.values()[7], sums[Line::BackDiag].value());
    }

    #[test]
    fn empty_board_has_all_empty_sums() {
        let sums = line_sums(&Board::new());
        assert!(sums.iter().all(|&sum| sum == LineSum::of([E; 3])));
    }

    #[test]
    fn membership_table_matches_line_cells() {
        for cell in 0..BOARD_SIZE_SQUARED {
            let through = lines_through(cell);
            for line in Line::all() {
                assert_eq!(
                    through.contains(line),
                    line.cells().contains(&cell),
                    "cell {} / {:?}",
                    cell,
                    line
                );
            }
        }
    }

    #[test]
    fn membership_counts() {
        let count = |cell| lines_through(cell).into_iter().count();
        assert_eq!(count(4), 4);
        for corner in [0, 2, 6, 8] {
            assert_eq!(count(corner), 3);
        }
        for edge in [1, 3, 5, 7] {
            assert_eq!(count(edge), 2);
        }
        assert_eq!(count(9), 0);
    }
}
