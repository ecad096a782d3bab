//! This module implements the outward-facing request operations of the
//! engine: [check], which judges a single candidate placement, and [solve],
//! which completes a puzzle. Both take a request struct with optional text
//! fields, as they would arrive from an HTTP or CLI layer, and return a
//! response that serializes to the JSON shape such a layer hands out.
//!
//! The routing layer itself is not part of this crate; it is expected to
//! deserialize the request body into a [CheckRequest] or [SolveRequest],
//! call the respective operation, and serialize the response without
//! further interpretation. Every failure is reported inside the response as
//! an `error` string, never as a transport-level error.
//!
//! # Example
//!
//! ```
//! use sudoku_engine::api::{self, CheckRequest};
//!
//! let request = CheckRequest {
//!     puzzle: Some(String::from(
//!         "1.5..2.84..63.12.7.2..5.....9..1....8.2.3674.3.7.2..9.47...8..1..16....926914.37.")),
//!     coordinate: Some(String::from("A2")),
//!     value: Some(String::from("4"))
//! };
//! let response = api::check(&request);
//!
//! assert_eq!("{\"valid\":false,\"conflict\":[\"row\"]}",
//!     serde_json::to_string(&response).unwrap());
//! ```

use crate::{Coordinate, Sudoku, SudokuGrid};
use crate::constraint::{conflict_set, ConflictKind, DefaultConstraint};
use crate::error::{RequestError, SolveError};
use crate::solver::{BacktrackingSolver, Solution, Solver};

use serde::{Deserialize, Serialize};

/// The fields of a check request. All fields are optional at this level;
/// [check] reports a [RequestError::MissingFields] if any of them is
/// absent.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CheckRequest {

    /// The 81-character puzzle text. See
    /// [SudokuGrid::parse](crate::SudokuGrid::parse) for the format.
    pub puzzle: Option<String>,

    /// The label of the checked cell, such as `"A2"`. See
    /// [Coordinate::parse](crate::Coordinate::parse) for the format.
    pub coordinate: Option<String>,

    /// The candidate digit as text, `"1"` to `"9"`.
    pub value: Option<String>
}

/// The fields of a solve request. The puzzle is optional at this level;
/// [solve] reports a [RequestError::MissingPuzzle] if it is absent.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SolveRequest {

    /// The 81-character puzzle text. See
    /// [SudokuGrid::parse](crate::SudokuGrid::parse) for the format.
    pub puzzle: Option<String>
}

/// The response of the [check] operation. Serializes to `{"valid":true}`,
/// `{"valid":false,"conflict":[..]}`, or `{"error":".."}`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CheckResponse {

    /// The verdict for a well-formed request. The conflict list is omitted
    /// from the serialized form when it is empty, which is exactly the
    /// `valid` case.
    Placement {

        /// Whether the candidate may occupy the cell.
        valid: bool,

        /// The constraints the placement would violate, in the order row,
        /// column, region.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        conflict: Vec<ConflictKind>
    },

    /// The classified error for a malformed or unsolvable request.
    Error {

        /// The error, serialized as its user-facing message.
        error: RequestError
    }
}

impl CheckResponse {

    /// Creates the response which reports a legal placement.
    pub fn valid() -> CheckResponse {
        CheckResponse::Placement {
            valid: true,
            conflict: Vec::new()
        }
    }

    /// Creates the response which reports an illegal placement with the
    /// given non-empty list of violated constraints.
    pub fn invalid(conflict: Vec<ConflictKind>) -> CheckResponse {
        CheckResponse::Placement {
            valid: false,
            conflict
        }
    }
}

/// The response of the [solve] operation. Serializes to
/// `{"solution":"<81 digits>"}` or `{"error":".."}`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SolveResponse {

    /// The solved puzzle.
    Solved {

        /// The completed grid, serialized as its 81-character line.
        solution: SudokuGrid
    },

    /// The classified error for a malformed or unsolvable request.
    Error {

        /// The error, serialized as its user-facing message.
        error: RequestError
    }
}

/// Validates the given puzzle text and returns the parsed [Sudoku] on
/// success. This is the Format Validator of the engine: it checks the
/// length and character set of the text and then the placement legality of
/// every clue against the rest of the puzzle.
///
/// Note that a puzzle which passes this check is not guaranteed to be
/// solvable; the structural check only rejects clues that already conflict
/// pairwise. The [solver](crate::solver) module is the final authority.
///
/// # Errors
///
/// * `RequestError::Puzzle` if the text is not 81 characters long or
/// contains a character other than the digits 1 to 9 and `'.'`.
/// * `RequestError::Unsolvable` wrapping
/// [SolveError::ConflictingClues](crate::error::SolveError::ConflictingClues)
/// if two clues violate row, column, or region uniqueness.
pub fn validate_puzzle(puzzle: &str)
        -> Result<Sudoku<DefaultConstraint>, RequestError> {
    let grid = SudokuGrid::parse(puzzle)?;
    let sudoku = Sudoku::new_with_grid(grid, DefaultConstraint);

    if !sudoku.is_valid() {
        return Err(SolveError::ConflictingClues.into());
    }

    Ok(sudoku)
}

fn parse_value(value: &str) -> Result<usize, RequestError> {
    let mut chars = value.chars();

    match (chars.next(), chars.next()) {
        (Some(digit), None) if digit >= '1' && digit <= '9' =>
            Ok(digit as usize - '0' as usize),
        _ => Err(RequestError::InvalidValue)
    }
}

fn check_placement(request: &CheckRequest)
        -> Result<CheckResponse, RequestError> {
    let (puzzle, coordinate, value) =
        match (&request.puzzle, &request.coordinate, &request.value) {
            (Some(puzzle), Some(coordinate), Some(value)) =>
                (puzzle, coordinate, value),
            _ => return Err(RequestError::MissingFields)
        };

    let sudoku = validate_puzzle(puzzle)?;
    let coordinate = Coordinate::parse(coordinate)?;
    let number = parse_value(value)?;

    let grid = sudoku.grid();
    let column = coordinate.column();
    let row = coordinate.row();

    // A filled cell short-circuits the verdict: querying the number it
    // holds confirms it, and querying a different number is answered with
    // `valid` as well, without running the constraint checks against the
    // replacement.
    if grid.get_cell(column, row).unwrap().is_some() {
        return Ok(CheckResponse::valid());
    }

    let conflict = conflict_set(grid, column, row, number);

    if conflict.is_empty() {
        Ok(CheckResponse::valid())
    }
    else {
        Ok(CheckResponse::invalid(conflict))
    }
}

/// Judges whether the requested candidate digit may legally occupy the
/// requested cell of the requested puzzle. On an illegal placement, the
/// response lists the violated constraints as [ConflictKind]s.
///
/// The request fields are checked in a fixed order: presence of all fields,
/// then puzzle format and clue consistency, then the coordinate label, then
/// the value. The first failed check determines the reported error.
pub fn check(request: &CheckRequest) -> CheckResponse {
    match check_placement(request) {
        Ok(response) => response,
        Err(error) => CheckResponse::Error {
            error
        }
    }
}

fn solve_puzzle(request: &SolveRequest) -> Result<SudokuGrid, RequestError> {
    let puzzle = match &request.puzzle {
        Some(puzzle) => puzzle,
        None => return Err(RequestError::MissingPuzzle)
    };

    let sudoku = validate_puzzle(puzzle)?;

    match BacktrackingSolver.solve(&sudoku) {
        Solution::Solved(grid) => Ok(grid),
        Solution::Impossible => Err(SolveError::Exhausted.into())
    }
}

/// Solves the requested puzzle and returns the completed grid. A puzzle
/// that is already complete is returned unchanged, provided it is valid.
///
/// The puzzle is validated before the search starts, so malformed text and
/// conflicting clues are reported without any search. A well-formed puzzle
/// for which the search exhausts all candidates is reported with the same
/// user-facing message, "Puzzle cannot be solved".
pub fn solve(request: &SolveRequest) -> SolveResponse {
    match solve_puzzle(request) {
        Ok(solution) => SolveResponse::Solved {
            solution
        },
        Err(error) => SolveResponse::Error {
            error
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::error::PuzzleParseError;

    const EXAMPLE_PUZZLE: &str =
        "1.5..2.84..63.12.7.2..5.....9..1....8.2.3674.3.7.2..9.47...8..1..16....926914.37.";
    const EXAMPLE_SOLUTION: &str =
        "135762984946381257728459613694517832812936745357824196473298561581673429269145378";

    // EXAMPLE_PUZZLE with a second 1 in the top row
    const CONFLICTING_PUZZLE: &str =
        "115..2.84..63.12.7.2..5.....9..1....8.2.3674.3.7.2..9.47...8..1..16....926914.37.";

    // pairwise consistent clues which leave no candidate for the top-left
    // cell
    const EXHAUSTING_PUZZLE: &str =
        ".123.....478......59.......6.....................................................";

    fn check_request(puzzle: &str, coordinate: &str, value: &str)
            -> CheckRequest {
        CheckRequest {
            puzzle: Some(String::from(puzzle)),
            coordinate: Some(String::from(coordinate)),
            value: Some(String::from(value))
        }
    }

    fn solve_request(puzzle: &str) -> SolveRequest {
        SolveRequest {
            puzzle: Some(String::from(puzzle))
        }
    }

    fn error_response(error: RequestError) -> CheckResponse {
        CheckResponse::Error {
            error
        }
    }

    #[test]
    fn check_legal_placement() {
        let response = check(&check_request(EXAMPLE_PUZZLE, "A2", "3"));
        assert_eq!(CheckResponse::valid(), response);
    }

    #[test]
    fn check_single_conflict() {
        let response = check(&check_request(EXAMPLE_PUZZLE, "A2", "4"));
        assert_eq!(CheckResponse::invalid(vec![ConflictKind::Row]),
            response);

        let response = check(&check_request(EXAMPLE_PUZZLE, "A2", "9"));
        assert_eq!(CheckResponse::invalid(vec![ConflictKind::Column]),
            response);
    }

    #[test]
    fn check_multiple_conflicts() {
        let response = check(&check_request(EXAMPLE_PUZZLE, "A2", "1"));
        assert_eq!(
            CheckResponse::invalid(
                vec![ConflictKind::Row, ConflictKind::Region]),
            response);
    }

    #[test]
    fn check_all_conflicts() {
        let response = check(&check_request(EXAMPLE_PUZZLE, "A2", "2"));
        assert_eq!(
            CheckResponse::invalid(vec![ConflictKind::Row,
                ConflictKind::Column, ConflictKind::Region]),
            response);
    }

    #[test]
    fn check_missing_fields() {
        let mut request = check_request(EXAMPLE_PUZZLE, "A2", "3");
        request.puzzle = None;
        assert_eq!(error_response(RequestError::MissingFields),
            check(&request));

        let mut request = check_request(EXAMPLE_PUZZLE, "A2", "3");
        request.coordinate = None;
        assert_eq!(error_response(RequestError::MissingFields),
            check(&request));

        let mut request = check_request(EXAMPLE_PUZZLE, "A2", "3");
        request.value = None;
        assert_eq!(error_response(RequestError::MissingFields),
            check(&request));

        assert_eq!(error_response(RequestError::MissingFields),
            check(&CheckRequest::default()));
    }

    #[test]
    fn check_malformed_puzzle() {
        let short = &EXAMPLE_PUZZLE[..80];
        assert_eq!(
            error_response(
                RequestError::Puzzle(PuzzleParseError::WrongLength)),
            check(&check_request(short, "A2", "3")));

        let with_letter = EXAMPLE_PUZZLE.replace('7', "x");
        assert_eq!(
            error_response(
                RequestError::Puzzle(PuzzleParseError::InvalidCharacter)),
            check(&check_request(with_letter.as_str(), "A2", "3")));
    }

    #[test]
    fn check_character_error_reported_before_clue_conflicts() {
        let conflicting_with_letter = CONFLICTING_PUZZLE.replace('7', "x");
        assert_eq!(
            error_response(
                RequestError::Puzzle(PuzzleParseError::InvalidCharacter)),
            check(&check_request(conflicting_with_letter.as_str(), "A2",
                "3")));
    }

    #[test]
    fn check_conflicting_clues() {
        assert_eq!(
            error_response(
                RequestError::Unsolvable(SolveError::ConflictingClues)),
            check(&check_request(CONFLICTING_PUZZLE, "A2", "3")));
    }

    #[test]
    fn check_invalid_coordinate() {
        for coordinate in &["", "A", "A10", "J1", "a2", "A0", "AA", "2A"] {
            assert_eq!(error_response(RequestError::InvalidCoordinate),
                check(&check_request(EXAMPLE_PUZZLE, coordinate, "3")),
                "coordinate {:?} not rejected", coordinate);
        }
    }

    #[test]
    fn check_invalid_value() {
        for value in &["", "0", "10", "x", "3.5", "-1"] {
            assert_eq!(error_response(RequestError::InvalidValue),
                check(&check_request(EXAMPLE_PUZZLE, "A2", value)),
                "value {:?} not rejected", value);
        }
    }

    #[test]
    fn check_field_order_coordinate_before_value() {
        // both the coordinate and the value are malformed; the coordinate
        // is checked first
        assert_eq!(error_response(RequestError::InvalidCoordinate),
            check(&check_request(EXAMPLE_PUZZLE, "J1", "0")));
    }

    #[test]
    fn check_cell_already_holding_queried_value() {
        // A1 holds a 1
        let response = check(&check_request(EXAMPLE_PUZZLE, "A1", "1"));
        assert_eq!(CheckResponse::valid(), response);
    }

    #[test]
    fn check_cell_holding_different_value() {
        // A1 holds a 1; querying a 9 does not re-validate the replacement
        let response = check(&check_request(EXAMPLE_PUZZLE, "A1", "9"));
        assert_eq!(CheckResponse::valid(), response);

        // even a number which would conflict with other clues is reported
        // as valid on a filled cell
        let response = check(&check_request(EXAMPLE_PUZZLE, "A1", "5"));
        assert_eq!(CheckResponse::valid(), response);
    }

    #[test]
    fn check_response_json_shapes() {
        let valid = check(&check_request(EXAMPLE_PUZZLE, "A2", "3"));
        assert_eq!("{\"valid\":true}",
            serde_json::to_string(&valid).unwrap());

        let invalid = check(&check_request(EXAMPLE_PUZZLE, "A2", "1"));
        assert_eq!("{\"valid\":false,\"conflict\":[\"row\",\"region\"]}",
            serde_json::to_string(&invalid).unwrap());

        let error = check(&check_request(EXAMPLE_PUZZLE, "A2", "0"));
        assert_eq!("{\"error\":\"Invalid value\"}",
            serde_json::to_string(&error).unwrap());
    }

    #[test]
    fn check_request_deserializes_with_missing_fields() {
        let request: CheckRequest =
            serde_json::from_str("{\"coordinate\":\"A2\"}").unwrap();

        assert_eq!(None, request.puzzle);
        assert_eq!(Some(String::from("A2")), request.coordinate);
        assert_eq!(None, request.value);
    }

    #[test]
    fn solve_example_puzzle() {
        let expected = SudokuGrid::parse(EXAMPLE_SOLUTION).unwrap();
        assert_eq!(
            SolveResponse::Solved {
                solution: expected
            },
            solve(&solve_request(EXAMPLE_PUZZLE)));
    }

    #[test]
    fn solve_complete_puzzle_passes_through() {
        let expected = SudokuGrid::parse(EXAMPLE_SOLUTION).unwrap();
        assert_eq!(
            SolveResponse::Solved {
                solution: expected
            },
            solve(&solve_request(EXAMPLE_SOLUTION)));
    }

    #[test]
    fn solve_missing_puzzle() {
        assert_eq!(
            SolveResponse::Error {
                error: RequestError::MissingPuzzle
            },
            solve(&SolveRequest::default()));
    }

    #[test]
    fn solve_malformed_puzzle() {
        assert_eq!(
            SolveResponse::Error {
                error: RequestError::Puzzle(PuzzleParseError::WrongLength)
            },
            solve(&solve_request("1.5..2.84")));

        let with_letter = EXAMPLE_PUZZLE.replace('7', "x");
        assert_eq!(
            SolveResponse::Error {
                error:
                    RequestError::Puzzle(PuzzleParseError::InvalidCharacter)
            },
            solve(&solve_request(with_letter.as_str())));
    }

    #[test]
    fn solve_conflicting_clues_rejected_before_search() {
        assert_eq!(
            SolveResponse::Error {
                error: RequestError::Unsolvable(SolveError::ConflictingClues)
            },
            solve(&solve_request(CONFLICTING_PUZZLE)));
    }

    #[test]
    fn solve_exhausted_search() {
        assert_eq!(
            SolveResponse::Error {
                error: RequestError::Unsolvable(SolveError::Exhausted)
            },
            solve(&solve_request(EXHAUSTING_PUZZLE)));
    }

    #[test]
    fn solve_response_json_shapes() {
        let solved = solve(&solve_request(EXAMPLE_PUZZLE));
        assert_eq!(format!("{{\"solution\":\"{}\"}}", EXAMPLE_SOLUTION),
            serde_json::to_string(&solved).unwrap());

        let error = solve(&solve_request(CONFLICTING_PUZZLE));
        assert_eq!("{\"error\":\"Puzzle cannot be solved\"}",
            serde_json::to_string(&error).unwrap());
    }

    #[test]
    fn validate_puzzle_accepts_example() {
        let sudoku = validate_puzzle(EXAMPLE_PUZZLE).unwrap();
        assert_eq!(EXAMPLE_PUZZLE, sudoku.grid().to_line().as_str());
    }

    #[test]
    fn validate_puzzle_accepts_exhausting_puzzle() {
        // pairwise consistent clues pass the structural check even though
        // the puzzle has no solution
        assert!(validate_puzzle(EXHAUSTING_PUZZLE).is_ok());
    }
}
