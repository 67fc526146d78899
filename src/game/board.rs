use ratatui::style::Color;
use tracing::debug;

use crate::game::piece::{Position, Shape};

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Cell {
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_filled(self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// Grid of locked cells. Dimensions are fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<Cell>>,
}

impl Board {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![vec![Cell::Empty; columns]; rows],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `None` when `(row, col)` lies outside the grid.
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        self.cells
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.iter().map(Vec::as_slice)
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        self.cells
            .get(row)
            .is_some_and(|r| r.iter().all(|cell| cell.is_filled()))
    }

    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_filled())
            .count()
    }

    /// True when every occupied cell of `shape` placed at `position` is
    /// inside the grid and on an empty cell.
    pub fn is_valid(&self, shape: &Shape, position: Position) -> bool {
        shape.cells().all(|(i, j)| {
            let row = position.row + i as i32;
            let col = position.col + j as i32;
            matches!(self.get(row, col), Some(Cell::Empty))
        })
    }

    /// Writes `color` into the cells covered by `shape` at `position`,
    /// overwriting whatever is there. Cells outside the grid are skipped.
    pub fn lock(&mut self, shape: &Shape, position: Position, color: Color) {
        for (i, j) in shape.cells() {
            let row = position.row + i as i32;
            let col = position.col + j as i32;
            if row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.columns {
                self.cells[row as usize][col as usize] = Cell::Filled(color);
            }
        }
    }

    /// Removes every full row and inserts blank rows at the top so the row
    /// count is unchanged. Untouched rows keep their relative order.
    pub fn clear_full_rows(&mut self) -> usize {
        self.cells.retain(|row| !row.iter().all(|cell| cell.is_filled()));

        let cleared = self.rows - self.cells.len();
        if cleared > 0 {
            let columns = self.columns;
            let blanks = std::iter::repeat_with(|| vec![Cell::Empty; columns]).take(cleared);
            self.cells.splice(0..0, blanks);
            debug!(cleared, "cleared full rows");
        }

        cleared
    }

    pub fn reset(&mut self) {
        for row in &mut self.cells {
            row.fill(Cell::Empty);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::piece::ShapeKind;

    fn single() -> Shape {
        Shape::from_rows(&[&[true]])
    }

    #[test]
    fn new_board_is_empty() {
        let board = Board::new(20, 10);
        assert_eq!(board.rows(), 20);
        assert_eq!(board.columns(), 10);
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn get_rejects_out_of_range() {
        let board = Board::new(20, 10);
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(20, 0), None);
        assert_eq!(board.get(0, 10), None);
        assert_eq!(board.get(19, 9), Some(Cell::Empty));
    }

    #[test]
    fn is_valid_checks_bounds() {
        let board = Board::new(20, 10);
        let o = ShapeKind::O.shape();
        assert!(board.is_valid(&o, Position::new(0, 0)));
        assert!(board.is_valid(&o, Position::new(18, 8)));
        assert!(!board.is_valid(&o, Position::new(19, 0)));
        assert!(!board.is_valid(&o, Position::new(0, 9)));
        assert!(!board.is_valid(&o, Position::new(0, -1)));
        assert!(!board.is_valid(&o, Position::new(-1, 0)));
    }

    #[test]
    fn is_valid_ignores_empty_shape_cells() {
        let mut board = Board::new(20, 10);
        // The T's top corners are empty, so filled cells there do not collide
        board.lock(&single(), Position::new(0, 0), Color::Red);
        board.lock(&single(), Position::new(0, 2), Color::Red);
        assert!(board.is_valid(&ShapeKind::T.shape(), Position::new(0, 0)));
    }

    #[test]
    fn is_valid_detects_collision() {
        let mut board = Board::new(20, 10);
        board.lock(&single(), Position::new(5, 5), Color::Red);
        let o = ShapeKind::O.shape();
        assert!(!board.is_valid(&o, Position::new(4, 4)));
        assert!(board.is_valid(&o, Position::new(3, 4)));
    }

    #[test]
    fn lock_skips_cells_outside_grid() {
        let mut board = Board::new(20, 10);
        board.lock(&ShapeKind::I.shape(), Position::new(0, 8), Color::Cyan);
        assert_eq!(board.filled_count(), 2);
        assert_eq!(board.get(0, 8), Some(Cell::Filled(Color::Cyan)));
        assert_eq!(board.get(0, 9), Some(Cell::Filled(Color::Cyan)));
    }

    #[test]
    fn clear_shifts_rows_above_down() {
        let mut board = Board::new(6, 4);
        board.lock(&single(), Position::new(3, 1), Color::Green);
        board.lock(&ShapeKind::I.shape(), Position::new(5, 0), Color::Cyan);
        board.lock(&single(), Position::new(4, 2), Color::Blue);
        board.lock(&ShapeKind::I.shape(), Position::new(2, 0), Color::Cyan);

        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.rows(), 6);
        assert_eq!(board.filled_count(), 2);
        // Row 3 moves down past cleared row 2; row 4 stays put below it
        assert_eq!(board.get(4, 1), Some(Cell::Filled(Color::Green)));
        assert_eq!(board.get(5, 2), Some(Cell::Filled(Color::Blue)));
        assert!(board.row(0).iter().all(|c| *c == Cell::Empty));
        assert!(board.row(1).iter().all(|c| *c == Cell::Empty));
    }

    #[test]
    fn clear_without_full_rows_is_noop() {
        let mut board = Board::new(20, 10);
        board.lock(&ShapeKind::O.shape(), Position::new(18, 4), Color::Yellow);
        let before = board.clone();
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn reset_empties_every_cell() {
        let mut board = Board::new(20, 10);
        board.lock(&ShapeKind::O.shape(), Position::new(18, 4), Color::Yellow);
        board.reset();
        assert_eq!(board.filled_count(), 0);
        assert_eq!((board.rows(), board.columns()), (20, 10));
    }
}
