//! This module contains the error and result definitions used in this crate.
//!
//! Errors are classified results, not panics: every operation on malformed
//! input returns exactly one of the enums defined here. Where an error is
//! part of the outward-facing interface (see the [api](crate::api) module),
//! its `Display` implementation produces the exact user-facing message.

use serde::{Serialize, Serializer};

use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Miscellaneous errors that can occur on some methods in the
/// [root module](../index.html). This does not include errors that occur
/// when parsing puzzle text, see [PuzzleParseError](enum.PuzzleParseError.html)
/// for that.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SudokuError {

    /// Indicates that some number is invalid for a Sudoku cell. This is the
    /// case if it is less than 1 or greater than 9.
    InvalidNumber,

    /// Indicates that the specified coordinates (column and row) lie outside
    /// the Sudoku grid. This is the case if either is greater than or equal
    /// to 9.
    OutOfBounds
}

impl Display for SudokuError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SudokuError::InvalidNumber =>
                write!(f, "number is outside the range [1, 9]"),
            SudokuError::OutOfBounds =>
                write!(f, "cell coordinates lie outside the grid")
        }
    }
}

impl Error for SudokuError { }

/// Syntactic sugar for `Result<V, SudokuError>`.
pub type SudokuResult<V> = Result<V, SudokuError>;

/// An enumeration of the errors that may occur when parsing a
/// [SudokuGrid](crate::SudokuGrid) from puzzle text. The text must consist
/// of exactly 81 characters, each a digit from 1 to 9 or the blank marker
/// `'.'`.
///
/// Length is checked before content, so text of the wrong length always
/// yields [PuzzleParseError::WrongLength], no matter which characters it
/// contains.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PuzzleParseError {

    /// Indicates that the puzzle text does not contain exactly 81
    /// characters.
    WrongLength,

    /// Indicates that the puzzle text contains a character which is neither
    /// a digit from 1 to 9 nor the blank marker `'.'`.
    InvalidCharacter
}

impl Display for PuzzleParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleParseError::WrongLength =>
                write!(f, "Expected puzzle to be 81 characters long"),
            PuzzleParseError::InvalidCharacter =>
                write!(f, "Invalid characters in puzzle")
        }
    }
}

impl Error for PuzzleParseError { }

/// Syntactic sugar for `Result<V, PuzzleParseError>`.
pub type PuzzleParseResult<V> = Result<V, PuzzleParseError>;

/// An enumeration of the errors that may occur when parsing a
/// [Coordinate](crate::Coordinate) from a label such as `"A2"`. All
/// variants share the user-facing message "Invalid coordinate", the
/// classification only records which part of the label was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CoordinateParseError {

    /// Indicates that the label does not consist of exactly two characters.
    /// This also covers empty input.
    WrongLength,

    /// Indicates that the first character is not an uppercase letter from
    /// 'A' to 'I'. Lowercase letters are rejected.
    InvalidRowLetter,

    /// Indicates that the second character is not a digit from 1 to 9.
    InvalidColumnDigit
}

impl Display for CoordinateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid coordinate")
    }
}

impl Error for CoordinateParseError { }

/// An enumeration of the ways a puzzle can turn out to be unsolvable. Both
/// variants share the user-facing message "Puzzle cannot be solved", but
/// they are kept distinct internally: a structural conflict is detected by
/// the validator before any search happens, while exhaustion is the verdict
/// of the [BacktrackingSolver](crate::solver::BacktrackingSolver) itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SolveError {

    /// Indicates that two clues of the input puzzle already violate row,
    /// column, or region uniqueness, so no completion can exist.
    ConflictingClues,

    /// Indicates that the search tried every candidate assignment without
    /// completing the grid. Note that this is not limited to puzzles the
    /// structural check would reject: a puzzle can have pairwise consistent
    /// clues and still admit no solution.
    Exhausted
}

impl Display for SolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Puzzle cannot be solved")
    }
}

impl Error for SolveError { }

/// An enumeration of the errors that may terminate a request handled by the
/// [api](crate::api) module. Every lower-level classification a request can
/// run into converts into this type, so the operations of that module
/// report exactly one error per failed call.
///
/// `Display` produces the exact user-facing message of each classification,
/// and serialization emits that message as a JSON string.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RequestError {

    /// Indicates that at least one of the fields of a check request was
    /// absent. Message: "Required field(s) missing".
    MissingFields,

    /// Indicates that a solve request did not carry a puzzle. Message:
    /// "Required field missing".
    MissingPuzzle,

    /// Indicates that the puzzle text was malformed. The message is that of
    /// the wrapped [PuzzleParseError].
    Puzzle(PuzzleParseError),

    /// Indicates that the coordinate label of a check request was
    /// malformed. Message: "Invalid coordinate".
    InvalidCoordinate,

    /// Indicates that the value of a check request was not a digit from 1
    /// to 9. Message: "Invalid value".
    InvalidValue,

    /// Indicates that the puzzle admits no solution, either because the
    /// clues conflict or because the search exhausted all candidates. The
    /// message is that of the wrapped [SolveError] in both cases.
    Unsolvable(SolveError)
}

impl Display for RequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::MissingFields =>
                write!(f, "Required field(s) missing"),
            RequestError::MissingPuzzle =>
                write!(f, "Required field missing"),
            RequestError::Puzzle(error) => Display::fmt(error, f),
            RequestError::InvalidCoordinate => write!(f, "Invalid coordinate"),
            RequestError::InvalidValue => write!(f, "Invalid value"),
            RequestError::Unsolvable(error) => Display::fmt(error, f)
        }
    }
}

impl Error for RequestError { }

impl From<PuzzleParseError> for RequestError {
    fn from(error: PuzzleParseError) -> Self {
        RequestError::Puzzle(error)
    }
}

impl From<CoordinateParseError> for RequestError {
    fn from(_: CoordinateParseError) -> Self {
        RequestError::InvalidCoordinate
    }
}

impl From<SolveError> for RequestError {
    fn from(error: SolveError) -> Self {
        RequestError::Unsolvable(error)
    }
}

impl Serialize for RequestError {
    fn serialize<S: Serializer>(&self, serializer: S)
            -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
