//! This module defines the constraints which apply to a Sudoku grid, thus
//! specifying the rules of the puzzle.
//!
//! Besides the definition of the [Constraint] trait, this module contains
//! the three primitive uniqueness constraints of classic Sudoku -
//! [RowConstraint], [ColumnConstraint], and [RegionConstraint] - as well as
//! their conjunction, the [DefaultConstraint]. For callers that need to know
//! *which* rule a candidate placement would break rather than just whether
//! one would, [conflict_set] reports the violated constraints as a set of
//! [ConflictKind]s.
//!
//! All checks treat the checked cell itself as if it were blank, so
//! re-checking a cell's own number never conflicts with that cell.

use crate::{REGION_SIZE, SIZE, SudokuGrid};
use crate::util::DigitSet;

use serde::{Deserialize, Serialize};

use std::fmt::{self, Display, Formatter};

#[inline]
pub(crate) fn default_check<C>(this: &C, grid: &SudokuGrid) -> bool
where
    C: Constraint + ?Sized
{
    for row in 0..SIZE {
        for column in 0..SIZE {
            if !this.check_cell(grid, column, row) {
                return false;
            }
        }
    }

    true
}

#[inline]
pub(crate) fn default_check_cell<C>(this: &C, grid: &SudokuGrid,
    column: usize, row: usize) -> bool
where
    C: Constraint + ?Sized
{
    if let Some(number) = grid.get_cell(column, row).unwrap() {
        this.check_number(grid, column, row, number)
    }
    else {
        true
    }
}

/// A constraint defines some property on a Sudoku grid. These are
/// essentially the rules of the Sudoku, in standard play "No duplicates in a
/// row" ([RowConstraint]), "No duplicates in a column" ([ColumnConstraint]),
/// and "No duplicates in a region" ([RegionConstraint]).
///
/// By default, implementors of this trait only need to implement the
/// `check_number` associated function, which verifies a proposed number for
/// a specified cell. `check_cell` and `check` are implemented by default
/// based on it, however `check` in particular may be inefficient compared to
/// a specialized implementation (it checks every cell using
/// `check_number`).
pub trait Constraint {

    /// Checks whether the given [SudokuGrid] matches this constraint, that
    /// is, every cell matches this constraint. By default, this runs
    /// `check_cell` on every cell of the grid, which may be inefficient, so
    /// custom implementations may be advantageous.
    fn check(&self, grid: &SudokuGrid) -> bool {
        default_check(self, grid)
    }

    /// Checks whether the cell at the given position in the [SudokuGrid]
    /// fulfills the constraint. This is the same as calling `check_number`
    /// with the same coordinates and the number which is actually filled in
    /// that cell. If the cell is empty, this function always returns
    /// `true`.
    fn check_cell(&self, grid: &SudokuGrid, column: usize, row: usize)
            -> bool {
        default_check_cell(self, grid, column, row)
    }

    /// Checks whether the given `number` would fit into the cell specified
    /// by `column` and `row` into the `grid` without violating this
    /// constraint. The content of the checked cell itself is ignored. This
    /// function does *not* have to check whether `number` is actually a
    /// valid Sudoku digit (i.e. in the interval [1, 9]). If you require
    /// this guarantee, use
    /// [Sudoku::is_valid_number](crate::Sudoku::is_valid_number) instead.
    fn check_number(&self, grid: &SudokuGrid, column: usize, row: usize,
        number: usize) -> bool;
}

/// A [Constraint] that there are no duplicates in each row.
#[derive(Clone, Deserialize, Serialize)]
pub struct RowConstraint;

impl Constraint for RowConstraint {
    fn check(&self, grid: &SudokuGrid) -> bool {
        let mut set = DigitSet::new();

        for row in 0..SIZE {
            set.clear();

            for column in 0..SIZE {
                if let Some(number) = grid.get_cell(column, row).unwrap() {
                    if !set.insert(number).unwrap() {
                        return false;
                    }
                }
            }
        }

        true
    }

    fn check_number(&self, grid: &SudokuGrid, column: usize, row: usize,
            number: usize) -> bool {
        for other_column in 0..SIZE {
            if other_column != column &&
                    grid.has_number(other_column, row, number).unwrap() {
                return false;
            }
        }

        true
    }
}

/// A [Constraint] that there are no duplicates in each column.
#[derive(Clone, Deserialize, Serialize)]
pub struct ColumnConstraint;

impl Constraint for ColumnConstraint {
    fn check(&self, grid: &SudokuGrid) -> bool {
        let mut set = DigitSet::new();

        for column in 0..SIZE {
            set.clear();

            for row in 0..SIZE {
                if let Some(number) = grid.get_cell(column, row).unwrap() {
                    if !set.insert(number).unwrap() {
                        return false;
                    }
                }
            }
        }

        true
    }

    fn check_number(&self, grid: &SudokuGrid, column: usize, row: usize,
            number: usize) -> bool {
        for other_row in 0..SIZE {
            if other_row != row &&
                    grid.has_number(column, other_row, number).unwrap() {
                return false;
            }
        }

        true
    }
}

fn check_number_region(grid: &SudokuGrid, column: usize, row: usize,
        number: usize, bop: impl Fn(bool, bool) -> bool) -> bool {
    let region_column = (column / REGION_SIZE) * REGION_SIZE;
    let region_row = (row / REGION_SIZE) * REGION_SIZE;

    for other_row in region_row..(region_row + REGION_SIZE) {
        for other_column in region_column..(region_column + REGION_SIZE) {
            if bop(other_row != row, other_column != column) &&
                    grid.has_number(other_column, other_row, number).unwrap() {
                return false;
            }
        }
    }

    true
}

/// A [Constraint] that there are no duplicates in each of the nine 3x3
/// regions.
#[derive(Clone, Deserialize, Serialize)]
pub struct RegionConstraint;

impl Constraint for RegionConstraint {
    fn check(&self, grid: &SudokuGrid) -> bool {
        let mut set = DigitSet::new();

        for region_row in 0..REGION_SIZE {
            for region_column in 0..REGION_SIZE {
                set.clear();

                let start_column = region_column * REGION_SIZE;
                let start_row = region_row * REGION_SIZE;

                for row in start_row..(start_row + REGION_SIZE) {
                    for column in
                            start_column..(start_column + REGION_SIZE) {
                        if let Some(number) =
                                grid.get_cell(column, row).unwrap() {
                            if !set.insert(number).unwrap() {
                                return false;
                            }
                        }
                    }
                }
            }
        }

        true
    }

    fn check_number(&self, grid: &SudokuGrid, column: usize, row: usize,
            number: usize) -> bool {
        check_number_region(grid, column, row, number, |a, b| a || b)
    }
}

/// Similar to [RegionConstraint], but does not check cells in the same row
/// or column to save some time. For use in the [DefaultConstraint], where
/// those cells are already covered by the row and column constraints.
#[derive(Clone, Deserialize, Serialize)]
struct RegionConstraintNoLines;

impl Constraint for RegionConstraintNoLines {
    fn check(&self, grid: &SudokuGrid) -> bool {
        RegionConstraint.check(grid)
    }

    fn check_number(&self, grid: &SudokuGrid, column: usize, row: usize,
            number: usize) -> bool {
        check_number_region(grid, column, row, number, |a, b| a && b)
    }
}

/// The default Sudoku [Constraint] which is a logical conjunction of
/// [RowConstraint], [ColumnConstraint], and [RegionConstraint].
#[derive(Clone, Deserialize, Serialize)]
pub struct DefaultConstraint;

impl Constraint for DefaultConstraint {
    fn check(&self, grid: &SudokuGrid) -> bool {
        RowConstraint.check(grid) &&
            ColumnConstraint.check(grid) &&
            RegionConstraintNoLines.check(grid)
    }

    fn check_cell(&self, grid: &SudokuGrid, column: usize, row: usize)
            -> bool {
        RowConstraint.check_cell(grid, column, row) &&
            ColumnConstraint.check_cell(grid, column, row) &&
            RegionConstraintNoLines.check_cell(grid, column, row)
    }

    fn check_number(&self, grid: &SudokuGrid, column: usize, row: usize,
            number: usize) -> bool {
        RowConstraint.check_number(grid, column, row, number) &&
            ColumnConstraint.check_number(grid, column, row, number) &&
            RegionConstraintNoLines.check_number(grid, column, row, number)
    }
}

/// An enumeration of the primitive constraints a candidate placement can
/// violate. Serializes to the lowercase constraint name, as used in the
/// conflict lists of the [api](crate::api) module.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictKind {

    /// The candidate number already occurs in another cell of the same row.
    Row,

    /// The candidate number already occurs in another cell of the same
    /// column.
    Column,

    /// The candidate number already occurs in another cell of the same 3x3
    /// region.
    Region
}

impl Display for ConflictKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConflictKind::Row => write!(f, "row"),
            ConflictKind::Column => write!(f, "column"),
            ConflictKind::Region => write!(f, "region")
        }
    }
}

/// Determines the set of primitive constraints the placement of `number` in
/// the cell at the given position would violate. The result contains zero to
/// three entries, always in the order row, column, region. The content of
/// the checked cell itself is ignored, like in
/// [Constraint::check_number].
///
/// Note that the full [RegionConstraint] is applied here: a duplicate which
/// shares both the row and the region of the checked cell is reported under
/// both kinds.
pub fn conflict_set(grid: &SudokuGrid, column: usize, row: usize,
        number: usize) -> Vec<ConflictKind> {
    let mut conflicts = Vec::new();

    if !RowConstraint.check_number(grid, column, row, number) {
        conflicts.push(ConflictKind::Row);
    }

    if !ColumnConstraint.check_number(grid, column, row, number) {
        conflicts.push(ConflictKind::Column);
    }

    if !RegionConstraint.check_number(grid, column, row, number) {
        conflicts.push(ConflictKind::Region);
    }

    conflicts
}
