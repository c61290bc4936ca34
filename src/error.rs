use derive_more::{Display, Error, From};

use crate::game::InvalidIndex;

#[derive(Debug, Display, Error, From)]
pub enum AppError {
    #[display("invalid move: {_0}")]
    Move(InvalidIndex),
    #[display("terminal I/O failed: {_0}")]
    Io(std::io::Error),
}
