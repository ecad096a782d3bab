// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(rustdoc::broken_intra_doc_links)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_codeblock_attributes)]

//! This crate implements an easy-to-understand engine for classic 9x9
//! Sudoku. It supports the following key features:
//!
//! * Parsing and printing puzzles in the common 81-character line format
//! * Checking validity of entire puzzles, individual cells, and potential
//! placements according to standard rules
//! * Reporting which of the row, column, and region constraints a candidate
//! placement would violate
//! * Solving puzzles using a perfect backtracking algorithm
//! * A transport-agnostic request interface for the outward-facing check and
//! solve operations
//!
//! # Parsing and printing puzzles
//!
//! See [SudokuGrid::parse] for the exact format of puzzle text.
//!
//! Puzzle text can be used to exchange puzzles, while pretty prints can be
//! used to display a grid in a clearer manner. An example of how to parse
//! and display a grid is provided below.
//!
//! ```
//! use sudoku_engine::SudokuGrid;
//!
//! let grid = SudokuGrid::parse(
//!     "1.5..2.84..63.12.7.2..5.....9..1....8.2.3674.3.7.2..9.47...8..1..16....926914.37.")
//!     .unwrap();
//! println!("{}", grid);
//! ```
//!
//! # Checking validity
//!
//! To check validity, an instance of [Sudoku] not only contains the numbers
//! (stored in a [SudokuGrid]), but also the constraint which specifies the
//! rules. For classic Sudoku rules,
//! [DefaultConstraint](constraint::DefaultConstraint) can be used.
//!
//! It is possible to check an entire puzzle, individual cells, or potential
//! changes to individual cells that do not require changing the puzzle's
//! state. An example of the latter is provided below.
//!
//! ```
//! use sudoku_engine::Sudoku;
//! use sudoku_engine::constraint::DefaultConstraint;
//!
//! let sudoku = Sudoku::parse(
//!     "1.5..2.84..63.12.7.2..5.....9..1....8.2.3674.3.7.2..9.47...8..1..16....926914.37.",
//!     DefaultConstraint).unwrap();
//!
//! // The top-left cell already holds a 1, so another 1 in the second column
//! // of the top row would repeat it in both the row and the region.
//! assert!(sudoku.is_valid_number(1, 0, 3).unwrap());
//! assert!(!sudoku.is_valid_number(1, 0, 1).unwrap());
//! ```
//!
//! # Solving puzzles
//!
//! This crate offers a [Solver](solver::Solver) trait for structs that can
//! solve Sudoku. As a default implementation,
//! [BacktrackingSolver](solver::BacktrackingSolver) is provided, which finds
//! the first solution of every solvable puzzle.
//!
//! ```
//! use sudoku_engine::Sudoku;
//! use sudoku_engine::constraint::DefaultConstraint;
//! use sudoku_engine::solver::{BacktrackingSolver, Solution, Solver};
//!
//! let sudoku = Sudoku::parse(
//!     "1.5..2.84..63.12.7.2..5.....9..1....8.2.3674.3.7.2..9.47...8..1..16....926914.37.",
//!     DefaultConstraint).unwrap();
//!
//! match BacktrackingSolver.solve(&sudoku) {
//!     Solution::Solved(grid) => assert_eq!(
//!         "135762984946381257728459613694517832812936745357824196473298561581673429269145378",
//!         grid.to_line()),
//!     Solution::Impossible => panic!("solvable puzzle marked as impossible")
//! }
//! ```
//!
//! # The request interface
//!
//! The [api] module wraps validation, placement checking, and solving into
//! the two request-style operations `check` and `solve`, whose responses
//! serialize to the JSON shapes expected by an outward HTTP or CLI layer.
//! See the module documentation for details.

pub mod api;
pub mod constraint;
pub mod error;
pub mod solver;
pub mod util;

use constraint::Constraint;
use error::{
    CoordinateParseError,
    PuzzleParseError,
    PuzzleParseResult,
    SudokuError,
    SudokuResult
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::Error as DeserializeError;

use std::fmt::{self, Display, Formatter};

/// The number of cells in one row, column, or region of the grid.
pub const SIZE: usize = 9;

/// The width and height of one of the nine 3x3 regions of the grid.
pub const REGION_SIZE: usize = 3;

/// The total number of cells in the grid.
pub const CELL_COUNT: usize = SIZE * SIZE;

/// The character that marks an unfilled cell in puzzle text.
pub const BLANK: char = '.';

/// A Sudoku grid is composed of 81 cells organized into 9 rows, 9 columns,
/// and 9 non-overlapping 3x3 regions. Each cell may or may not be occupied
/// by a number from 1 to 9.
///
/// Cells are stored in row-major order, that is, the cell in column `x` and
/// row `y` has the linear index `y * 9 + x`.
///
/// `SudokuGrid` implements `Display`, which renders the grid with
/// box-drawing characters for diagnostics. For the canonical 81-character
/// text form, use [SudokuGrid::to_line].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SudokuGrid {
    cells: [Option<usize>; CELL_COUNT]
}

fn to_char(cell: Option<usize>) -> char {
    if let Some(n) = cell {
        (b'0' + n as u8) as char
    }
    else {
        ' '
    }
}

fn line(start: char, thick_sep: char, thin_sep: char,
        segment: impl Fn(usize) -> char, pad: char, end: char, newline: bool)
        -> String {
    let mut result = String::new();

    for x in 0..SIZE {
        if x == 0 {
            result.push(start);
        }
        else if x % REGION_SIZE == 0 {
            result.push(thick_sep);
        }
        else {
            result.push(thin_sep);
        }

        result.push(pad);
        result.push(segment(x));
        result.push(pad);
    }

    result.push(end);

    if newline {
        result.push('\n');
    }

    result
}

fn top_row() -> String {
    line('╔', '╦', '╤', |_| '═', '═', '╗', true)
}

fn thin_separator_line() -> String {
    line('╟', '╫', '┼', |_| '─', '─', '╢', true)
}

fn thick_separator_line() -> String {
    line('╠', '╬', '╪', |_| '═', '═', '╣', true)
}

fn bottom_row() -> String {
    line('╚', '╩', '╧', |_| '═', '═', '╝', false)
}

fn content_row(grid: &SudokuGrid, y: usize) -> String {
    line('║', '║', '│', |x| to_char(grid.get_cell(x, y).unwrap()), ' ',
        '║', true)
}

impl Display for SudokuGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let thin_separator_line = thin_separator_line();
        let thick_separator_line = thick_separator_line();

        for y in 0..SIZE {
            if y == 0 {
                f.write_str(top_row().as_str())?;
            }
            else if y % REGION_SIZE == 0 {
                f.write_str(thick_separator_line.as_str())?;
            }
            else {
                f.write_str(thin_separator_line.as_str())?;
            }

            f.write_str(content_row(self, y).as_str())?;
        }

        f.write_str(bottom_row().as_str())?;
        Ok(())
    }
}

pub(crate) fn index(column: usize, row: usize) -> usize {
    row * SIZE + column
}

impl SudokuGrid {

    /// Creates a new, empty Sudoku grid in which every cell is blank.
    pub fn new() -> SudokuGrid {
        SudokuGrid {
            cells: [None; CELL_COUNT]
        }
    }

    /// Parses puzzle text into a grid. The text must consist of exactly 81
    /// characters, where each character is either a digit from 1 to 9 for a
    /// filled cell or `'.'` for a blank one. Cells are assigned
    /// left-to-right, top-to-bottom, where each row is completed before the
    /// next one is started.
    ///
    /// As an example, the text
    ///
    /// ```text
    /// 1.5..2.84..63.12.7.2..5.....9..1....8.2.3674.3.7.2..9.47...8..1..16....926914.37.
    /// ```
    ///
    /// parses to a grid whose top row reads `1 . 5 . . 2 . 8 4`.
    ///
    /// # Errors
    ///
    /// * `PuzzleParseError::WrongLength` if the text does not contain
    /// exactly 81 characters. This is checked first, regardless of content.
    /// * `PuzzleParseError::InvalidCharacter` if any character is neither a
    /// digit from 1 to 9 nor `'.'`.
    pub fn parse(code: &str) -> PuzzleParseResult<SudokuGrid> {
        if code.chars().count() != CELL_COUNT {
            return Err(PuzzleParseError::WrongLength);
        }

        let mut grid = SudokuGrid::new();

        for (i, c) in code.chars().enumerate() {
            if c == BLANK {
                continue;
            }

            match c.to_digit(10) {
                Some(digit) if digit >= 1 =>
                    grid.cells[i] = Some(digit as usize),
                _ => return Err(PuzzleParseError::InvalidCharacter)
            }
        }

        Ok(grid)
    }

    /// Converts the grid into its canonical 81-character text form in a way
    /// that is consistent with [SudokuGrid::parse]. That is, a grid that is
    /// converted to a line and parsed again will not change.
    ///
    /// ```
    /// use sudoku_engine::SudokuGrid;
    ///
    /// let mut grid = SudokuGrid::new();
    /// grid.set_cell(1, 1, 4).unwrap();
    ///
    /// let line = grid.to_line();
    /// let parsed = SudokuGrid::parse(line.as_str()).unwrap();
    /// assert_eq!(grid, parsed);
    /// ```
    pub fn to_line(&self) -> String {
        self.cells.iter()
            .map(|cell| {
                if let Some(number) = cell {
                    (b'0' + *number as u8) as char
                }
                else {
                    BLANK
                }
            })
            .collect()
    }

    /// Gets the content of the cell at the specified position.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the desired cell. Must be in
    /// the range `[0, 8]`.
    /// * `row`: The row (y-coordinate) of the desired cell. Must be in the
    /// range `[0, 8]`.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the specified range. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn get_cell(&self, column: usize, row: usize)
            -> SudokuResult<Option<usize>> {
        if column >= SIZE || row >= SIZE {
            Err(SudokuError::OutOfBounds)
        }
        else {
            Ok(self.cells[index(column, row)])
        }
    }

    /// Indicates whether the cell at the specified position has the given
    /// number. This will return `false` if there is a different number in
    /// that cell or it is empty.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the checked cell. Must be in
    /// the range `[0, 8]`.
    /// * `row`: The row (y-coordinate) of the checked cell. Must be in the
    /// range `[0, 8]`.
    /// * `number`: The number to check whether it is in the specified cell.
    /// If it is *not* in the range `[1, 9]`, `false` will always be
    /// returned.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the specified range. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn has_number(&self, column: usize, row: usize, number: usize)
            -> SudokuResult<bool> {
        if let Some(content) = self.get_cell(column, row)? {
            Ok(number == content)
        }
        else {
            Ok(false)
        }
    }

    /// Sets the content of the cell at the specified position to the given
    /// number. If the cell was not empty, the old number will be
    /// overwritten.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the assigned cell. Must be
    /// in the range `[0, 8]`.
    /// * `row`: The row (y-coordinate) of the assigned cell. Must be in the
    /// range `[0, 8]`.
    /// * `number`: The number to assign to the specified cell. Must be in
    /// the range `[1, 9]`.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds` if either `column` or `row` are not in
    /// the specified range.
    /// * `SudokuError::InvalidNumber` if `number` is not in the specified
    /// range.
    pub fn set_cell(&mut self, column: usize, row: usize, number: usize)
            -> SudokuResult<()> {
        if column >= SIZE || row >= SIZE {
            return Err(SudokuError::OutOfBounds);
        }

        if number == 0 || number > SIZE {
            return Err(SudokuError::InvalidNumber);
        }

        self.cells[index(column, row)] = Some(number);
        Ok(())
    }

    /// Clears the content of the cell at the specified position, that is, if
    /// it contains a number, that number is removed. If the cell is already
    /// empty, it will be left that way.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the cleared cell. Must be in
    /// the range `[0, 8]`.
    /// * `row`: The row (y-coordinate) of the cleared cell. Must be in the
    /// range `[0, 8]`.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the specified range. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn clear_cell(&mut self, column: usize, row: usize)
            -> SudokuResult<()> {
        if column >= SIZE || row >= SIZE {
            return Err(SudokuError::OutOfBounds);
        }

        self.cells[index(column, row)] = None;
        Ok(())
    }

    /// Counts the number of clues given by this grid. This is the number of
    /// non-empty cells.
    pub fn count_clues(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Indicates whether this grid is full, i.e. every cell is filled with a
    /// number. In this case, [SudokuGrid::count_clues] returns 81.
    pub fn is_full(&self) -> bool {
        !self.cells.iter().any(|c| c == &None)
    }

    /// Indicates whether this grid is empty, i.e. no cell is filled with a
    /// number. In this case, [SudokuGrid::count_clues] returns 0.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c == &None)
    }

    /// Indicates whether this grid configuration is a subset of another one.
    /// That is, all cells filled in this grid with some number must be
    /// filled in `other` with the same number. If this condition is met,
    /// `true` is returned, and `false` otherwise.
    pub fn is_subset(&self, other: &SudokuGrid) -> bool {
        self.cells.iter()
            .zip(other.cells.iter())
            .all(|(self_cell, other_cell)| {
                match self_cell {
                    Some(self_number) =>
                        match other_cell {
                            Some(other_number) => self_number == other_number,
                            None => false
                        },
                    None => true
                }
            })
    }

    /// Gets a reference to the array which holds the cells. They are in
    /// left-to-right, top-to-bottom order, where rows are together.
    pub fn cells(&self) -> &[Option<usize>; CELL_COUNT] {
        &self.cells
    }
}

impl Default for SudokuGrid {
    fn default() -> SudokuGrid {
        SudokuGrid::new()
    }
}

impl Serialize for SudokuGrid {
    fn serialize<S: Serializer>(&self, serializer: S)
            -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_line().as_str())
    }
}

impl<'de> Deserialize<'de> for SudokuGrid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D)
            -> Result<SudokuGrid, D::Error> {
        let code = String::deserialize(deserializer)?;
        SudokuGrid::parse(code.as_str()).map_err(DeserializeError::custom)
    }
}

/// The address of one cell on the grid, stored as a zero-based `(column,
/// row)` pair. Coordinates can be constructed from components or parsed from
/// a human-facing label such as `"A2"`, where the letter selects the row
/// ('A' to 'I', top to bottom) and the digit selects the column ('1' to '9',
/// left to right).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Coordinate {
    column: usize,
    row: usize
}

impl Coordinate {

    /// Creates a new coordinate from its zero-based components.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the cell. Must be in the
    /// range `[0, 8]`.
    /// * `row`: The row (y-coordinate) of the cell. Must be in the range
    /// `[0, 8]`.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the specified range. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn new(column: usize, row: usize) -> SudokuResult<Coordinate> {
        if column >= SIZE || row >= SIZE {
            Err(SudokuError::OutOfBounds)
        }
        else {
            Ok(Coordinate {
                column,
                row
            })
        }
    }

    /// Parses a coordinate label. The label must consist of exactly two
    /// characters: an uppercase letter from 'A' to 'I' selecting the row,
    /// followed by a digit from '1' to '9' selecting the column. Lowercase
    /// letters are rejected.
    ///
    /// ```
    /// use sudoku_engine::Coordinate;
    ///
    /// let coordinate = Coordinate::parse("A2").unwrap();
    /// assert_eq!(0, coordinate.row());
    /// assert_eq!(1, coordinate.column());
    /// ```
    ///
    /// # Errors
    ///
    /// Any variant of `CoordinateParseError` (see that documentation).
    pub fn parse(label: &str) -> Result<Coordinate, CoordinateParseError> {
        let mut chars = label.chars();
        let (letter, digit) = match (chars.next(), chars.next(), chars.next()) {
            (Some(letter), Some(digit), None) => (letter, digit),
            _ => return Err(CoordinateParseError::WrongLength)
        };

        if letter < 'A' || letter > 'I' {
            return Err(CoordinateParseError::InvalidRowLetter);
        }

        if digit < '1' || digit > '9' {
            return Err(CoordinateParseError::InvalidColumnDigit);
        }

        Ok(Coordinate {
            column: digit as usize - '1' as usize,
            row: letter as usize - 'A' as usize
        })
    }

    /// Gets the zero-based column (x-coordinate) of this coordinate.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Gets the zero-based row (y-coordinate) of this coordinate.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Gets the row-major linear index of the addressed cell, i.e.
    /// `row * 9 + column`.
    pub fn index(&self) -> usize {
        index(self.column, self.row)
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.row as u8) as char, self.column + 1)
    }
}

/// A Sudoku represents a grid of numbers with an associated constraint. The
/// numbers may or may not fulfill the constraint, but there is a method to
/// check it.
///
/// There is no guarantee that the Sudoku is solvable at all, however there
/// are ways to check that (see the [solver] module).
#[derive(Clone)]
pub struct Sudoku<C: Constraint + Clone> {
    grid: SudokuGrid,
    constraint: C
}

impl<C: Constraint + Clone> Sudoku<C> {

    /// Creates a new Sudoku with the provided constraint and an empty grid.
    ///
    /// # Arguments
    ///
    /// * `constraint`: The constraint which is checked by this Sudoku. Grid
    /// configurations which violate this constraint will be seen as invalid
    /// by [Sudoku::is_valid].
    pub fn new_empty(constraint: C) -> Sudoku<C> {
        Sudoku {
            grid: SudokuGrid::new(),
            constraint
        }
    }

    /// Creates a new Sudoku with the provided constraint and a given grid,
    /// which may already contain some numbers. Note that it is *not* checked
    /// whether the given grid fulfills the constraint - it is perfectly
    /// legal to create an invalid Sudoku here.
    ///
    /// # Arguments
    ///
    /// * `grid`: The initial [SudokuGrid] which contains the numbers with
    /// which the Sudoku is filled.
    /// * `constraint`: The constraint which is checked by this Sudoku. Grid
    /// configurations which violate this constraint will be seen as invalid
    /// by [Sudoku::is_valid].
    pub fn new_with_grid(grid: SudokuGrid, constraint: C) -> Sudoku<C> {
        Sudoku {
            grid,
            constraint
        }
    }

    /// Parses the code into a [SudokuGrid] using [SudokuGrid::parse] and
    /// wraps the result in a Sudoku with the given constraint. Note that it
    /// is not required that the code matches the constraint. It is perfectly
    /// legal to parse an invalid Sudoku.
    ///
    /// # Arguments
    ///
    /// * `code`: The 81-character puzzle text that specifies the grid. See
    /// [SudokuGrid::parse] for a format specification.
    /// * `constraint`: The constraint which is checked by this Sudoku.
    ///
    /// # Errors
    ///
    /// If the parsing fails. See [SudokuGrid::parse] for further
    /// information.
    pub fn parse(code: &str, constraint: C) -> PuzzleParseResult<Sudoku<C>> {
        Ok(Sudoku::new_with_grid(SudokuGrid::parse(code)?, constraint))
    }

    /// Gets a reference to the `SudokuGrid` of this Sudoku.
    pub fn grid(&self) -> &SudokuGrid {
        &self.grid
    }

    /// Gets a mutable reference to the `SudokuGrid` of this Sudoku.
    pub fn grid_mut(&mut self) -> &mut SudokuGrid {
        &mut self.grid
    }

    /// Gets a reference to the `Constraint` of this Sudoku.
    pub fn constraint(&self) -> &C {
        &self.constraint
    }

    /// Indicates whether the entire grid matches the constraint. Each filled
    /// cell is checked against the rest of the grid while ignoring itself,
    /// so a cell's own number never conflicts with it. Blank cells are
    /// always considered valid.
    pub fn is_valid(&self) -> bool {
        self.constraint.check(&self.grid)
    }

    /// Indicates whether the cell at the given location matches the
    /// constraint. That is, if the specified cell violates the constraint,
    /// `false` is returned, and `true` otherwise.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the checked cell. Must be in
    /// the range `[0, 8]`.
    /// * `row`: The row (y-coordinate) of the checked cell. Must be in the
    /// range `[0, 8]`.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the specified range. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn is_valid_cell(&self, column: usize, row: usize)
            -> SudokuResult<bool> {
        if column >= SIZE || row >= SIZE {
            Err(SudokuError::OutOfBounds)
        }
        else {
            Ok(self.constraint.check_cell(&self.grid, column, row))
        }
    }

    /// Indicates whether the given number would be valid in the cell at the
    /// given location. That is, if the number violated the constraint,
    /// `false` is returned, and `true` otherwise.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the checked cell. Must be in
    /// the range `[0, 8]`.
    /// * `row`: The row (y-coordinate) of the checked cell. Must be in the
    /// range `[0, 8]`.
    /// * `number`: The number to check whether it is valid in the given
    /// cell.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds` if either `column` or `row` are not in
    /// the specified range.
    /// * `SudokuError::InvalidNumber` if `number` is not in the range
    /// `[1, 9]`.
    pub fn is_valid_number(&self, column: usize, row: usize, number: usize)
            -> SudokuResult<bool> {
        if column >= SIZE || row >= SIZE {
            Err(SudokuError::OutOfBounds)
        }
        else if number == 0 || number > SIZE {
            Err(SudokuError::InvalidNumber)
        }
        else {
            Ok(self.constraint.check_number(&self.grid, column, row, number))
        }
    }

    /// Indicates whether the given [SudokuGrid] is a valid solution to this
    /// puzzle. That is the case if all digits from this Sudoku can be found
    /// in the `solution`, it matches the constraint of this Sudoku, and it
    /// is full.
    pub fn is_valid_solution(&self, solution: &SudokuGrid) -> bool {
        self.grid.is_subset(solution) &&
            self.constraint.check(solution) &&
            solution.is_full()
    }
}
