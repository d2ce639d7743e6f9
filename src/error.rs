use std::fmt;

/// Errors raised while parsing command-line configuration.
#[derive(Debug)]
pub enum ConfigError {
    MissingValue(String),
    UnknownFlag(String),
    ParseInt(String),
    InvalidDepth(i64),
    InvalidWorkers(i64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingValue(flag) => write!(f, "{flag} requires a value"),
            ConfigError::UnknownFlag(flag) => write!(f, "unknown flag {flag}"),
            ConfigError::ParseInt(value) => write!(f, "expected an integer, got '{value}'"),
            ConfigError::InvalidDepth(d) => write!(f, "depth must be positive, got {d}"),
            ConfigError::InvalidWorkers(w) => write!(f, "worker count must be positive, got {w}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised while loading a board from a position file.
#[derive(Debug)]
pub enum BoardFileError {
    Io(std::io::Error),
    MissingHeader,
    UnknownSideToMove(char),
    WrongLineCount(usize),
    WrongLineLength(usize, String),
    UnknownPieceChar(char),
}

impl fmt::Display for BoardFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardFileError::Io(e) => write!(f, "could not read board file: {e}"),
            BoardFileError::MissingHeader => write!(f, "missing side-to-move header line"),
            BoardFileError::UnknownSideToMove(c) => write!(f, "unrecognized side-to-move character '{c}'"),
            BoardFileError::WrongLineCount(n) => write!(f, "expected 1 header line plus 8 board lines, got {n}"),
            BoardFileError::WrongLineLength(n, line) => {
                write!(f, "expected 8 characters on board line {n}, got '{line}'")
            }
            BoardFileError::UnknownPieceChar(c) => write!(f, "unrecognized board character '{c}'"),
        }
    }
}

impl std::error::Error for BoardFileError {}

impl From<std::io::Error> for BoardFileError {
    fn from(e: std::io::Error) -> Self {
        BoardFileError::Io(e)
    }
}

/// Errors raised while parsing a human's typed move.
#[derive(Debug)]
pub enum MoveParseError {
    Empty,
    BadSquare(String),
    NoSuchMove(String),
    AbortedDisambiguation,
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::Empty => write!(f, "empty move"),
            MoveParseError::BadSquare(s) => write!(f, "not a square: '{s}'"),
            MoveParseError::NoSuchMove(s) => write!(f, "no legal move matches '{s}'"),
            MoveParseError::AbortedDisambiguation => write!(f, "no move chosen from the menu"),
        }
    }
}

impl std::error::Error for MoveParseError {}
