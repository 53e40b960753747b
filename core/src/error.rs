use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Tile labels are not a permutation of the board cells")]
    InvalidPermutation,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("Could not parse configuration at line {line}, column {column}")]
    ConfigParse { line: usize, column: usize },
}

pub type Result<T> = core::result::Result<T, GameError>;
