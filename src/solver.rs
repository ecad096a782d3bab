//! This module contains the logic for solving Sudoku.
//!
//! Most importantly, this module contains the definition of the
//! [Solver](trait.Solver.html) trait and the
//! [BacktrackingSolver](struct.BacktrackingSolver.html) as a generally
//! usable implementation.

use crate::{SIZE, Sudoku, SudokuGrid};
use crate::constraint::Constraint;

/// An enumeration of the outcomes of a solve attempt. The solver searches
/// for the *first* solution in a deterministic order, so a solvable puzzle
/// always yields the same grid; whether further solutions exist is not
/// determined.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Solution {

    /// Indicates that the puzzle is not solvable at all.
    Impossible,

    /// Indicates that the puzzle was completed. The first solution found by
    /// the search is wrapped in this instance.
    Solved(SudokuGrid)
}

/// A trait for structs which have the ability to solve Sudoku. Implementers
/// are expected to be deterministic: solving the same puzzle twice yields
/// the same result.
pub trait Solver {

    /// Solves, or attempts to solve, the provided Sudoku. If no assignment
    /// of digits to the blank cells completes the grid without violating
    /// the constraint, `Solution::Impossible` shall be returned. The input
    /// is not mutated; each invocation operates on its own copy.
    fn solve(&self, sudoku: &Sudoku<impl Constraint + Clone>) -> Solution;
}

/// A perfect [Solver](trait.Solver.html) which solves Sudoku by recursively
/// testing all valid numbers for each cell. This means two things:
///
/// * Its worst-case runtime is exponential, i.e. it may be very slow if the
/// puzzle has many missing digits.
/// * It finds a solution for every solvable puzzle.
///
/// Blank cells are processed in row-major order, so the blank cell with the
/// smallest linear index is always filled next, and candidates are tried in
/// ascending order. There is no candidate propagation and no heuristic cell
/// ordering; each trial assignment is checked against the constraint and
/// undone if the rest of the grid cannot be completed. A puzzle without
/// blank cells is returned unchanged, without any search.
///
/// The recursion depth is bounded by the 81 cells of the grid.
pub struct BacktrackingSolver;

impl BacktrackingSolver {
    fn solve_rec(sudoku: &mut Sudoku<impl Constraint + Clone>, column: usize,
            row: usize) -> Solution {
        if row == SIZE {
            return Solution::Solved(sudoku.grid().clone());
        }

        let next_column = (column + 1) % SIZE;
        let next_row = if next_column == 0 { row + 1 } else { row };

        if sudoku.grid().get_cell(column, row).unwrap().is_some() {
            BacktrackingSolver::solve_rec(sudoku, next_column, next_row)
        }
        else {
            for number in 1..=SIZE {
                if sudoku.is_valid_number(column, row, number).unwrap() {
                    sudoku.grid_mut().set_cell(column, row, number).unwrap();
                    let solution = BacktrackingSolver::solve_rec(sudoku,
                        next_column, next_row);

                    if let Solution::Solved(_) = solution {
                        return solution;
                    }

                    sudoku.grid_mut().clear_cell(column, row).unwrap();
                }
            }

            Solution::Impossible
        }
    }
}

impl Solver for BacktrackingSolver {
    fn solve(&self, sudoku: &Sudoku<impl Constraint + Clone>) -> Solution {
        let mut clone = sudoku.clone();
        BacktrackingSolver::solve_rec(&mut clone, 0, 0)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::constraint::DefaultConstraint;

    const EXAMPLE_PUZZLE: &str =
        "1.5..2.84..63.12.7.2..5.....9..1....8.2.3674.3.7.2..9.47...8..1..16....926914.37.";
    const EXAMPLE_SOLUTION: &str =
        "135762984946381257728459613694517832812936745357824196473298561581673429269145378";

    // Pairwise consistent clues which leave no candidate for the top-left
    // cell: its row sees 1, 2, and 3, its column 4, 5, and 6, and its
    // region 7, 8, and 9.
    const CONTRADICTION_PUZZLE: &str =
        ".123.....478......59.......6.....................................................";

    fn solve(puzzle: &str) -> Solution {
        let sudoku = Sudoku::parse(puzzle, DefaultConstraint).unwrap();
        BacktrackingSolver.solve(&sudoku)
    }

    #[test]
    fn backtracking_solves_classic_puzzle() {
        let expected = SudokuGrid::parse(EXAMPLE_SOLUTION).unwrap();

        if let Solution::Solved(grid) = solve(EXAMPLE_PUZZLE) {
            assert_eq!(expected, grid, "Solver gave wrong grid.");
        }
        else {
            panic!("Solvable sudoku marked as impossible.");
        }
    }

    #[test]
    fn solved_puzzle_passes_through_unchanged() {
        let expected = SudokuGrid::parse(EXAMPLE_SOLUTION).unwrap();

        if let Solution::Solved(grid) = solve(EXAMPLE_SOLUTION) {
            assert_eq!(expected, grid);
        }
        else {
            panic!("Complete sudoku marked as impossible.");
        }
    }

    #[test]
    fn contradiction_is_impossible() {
        assert_eq!(Solution::Impossible, solve(CONTRADICTION_PUZZLE));
    }

    #[test]
    fn empty_puzzle_has_valid_solution() {
        let sudoku = Sudoku::new_empty(DefaultConstraint);

        if let Solution::Solved(grid) = BacktrackingSolver.solve(&sudoku) {
            assert!(sudoku.is_valid_solution(&grid));
        }
        else {
            panic!("Empty sudoku marked as impossible.");
        }
    }

    #[test]
    fn solution_extends_the_clues() {
        let sudoku =
            Sudoku::parse(EXAMPLE_PUZZLE, DefaultConstraint).unwrap();

        if let Solution::Solved(grid) = BacktrackingSolver.solve(&sudoku) {
            assert!(sudoku.grid().is_subset(&grid));
            assert!(sudoku.is_valid_solution(&grid));
        }
        else {
            panic!("Solvable sudoku marked as impossible.");
        }
    }

    #[test]
    fn solver_does_not_mutate_input() {
        let sudoku =
            Sudoku::parse(EXAMPLE_PUZZLE, DefaultConstraint).unwrap();
        BacktrackingSolver.solve(&sudoku);

        assert_eq!(EXAMPLE_PUZZLE, sudoku.grid().to_line().as_str());
    }

    #[test]
    fn solution_rows_columns_and_regions_are_permutations() {
        use crate::util::DigitSet;

        let grid = match solve(EXAMPLE_PUZZLE) {
            Solution::Solved(grid) => grid,
            Solution::Impossible =>
                panic!("Solvable sudoku marked as impossible.")
        };

        for i in 0..SIZE {
            let mut row_digits = DigitSet::new();
            let mut column_digits = DigitSet::new();
            let mut region_digits = DigitSet::new();

            for j in 0..SIZE {
                let row_cell = grid.get_cell(j, i).unwrap().unwrap();
                let column_cell = grid.get_cell(i, j).unwrap().unwrap();

                let region_column = (i % 3) * 3 + j % 3;
                let region_row = (i / 3) * 3 + j / 3;
                let region_cell = grid.get_cell(region_column, region_row)
                    .unwrap().unwrap();

                row_digits.insert(row_cell).unwrap();
                column_digits.insert(column_cell).unwrap();
                region_digits.insert(region_cell).unwrap();
            }

            assert_eq!(DigitSet::full(), row_digits);
            assert_eq!(DigitSet::full(), column_digits);
            assert_eq!(DigitSet::full(), region_digits);
        }
    }
}
