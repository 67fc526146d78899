use ratatui::style::Color;

/// Colors a piece can be drawn with. Shape and color are chosen independently.
pub const PALETTE: [Color; 7] = [
    Color::Red,
    Color::Green,
    Color::Blue,
    Color::Magenta,
    Color::Yellow,
    Color::Cyan,
    Color::White,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    I, O, T, S, Z, L, J
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I, ShapeKind::O, ShapeKind::T,
        ShapeKind::S, ShapeKind::Z, ShapeKind::L, ShapeKind::J,
    ];

    pub fn shape(self) -> Shape {
        let rows: &[&[bool]] = match self {
            ShapeKind::I => &[
                &[true, true, true, true],
            ],
            ShapeKind::O => &[
                &[true, true],
                &[true, true],
            ],
            ShapeKind::T => &[
                &[false, true, false],
                &[true, true, true],
            ],
            ShapeKind::S => &[
                &[false, true, true],
                &[true, true, false],
            ],
            ShapeKind::Z => &[
                &[true, true, false],
                &[false, true, true],
            ],
            ShapeKind::L => &[
                &[false, false, true],
                &[true, true, true],
            ],
            ShapeKind::J => &[
                &[true, false, false],
                &[true, true, true],
            ],
        };
        Shape::from_rows(rows)
    }
}

/// Occupancy matrix of a piece, relative to its top-left origin.
///
/// Shapes are values: rotation builds a new matrix instead of mutating.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    rows: Vec<Vec<bool>>,
}

impl Shape {
    /// Builds a shape from row slices. Rows shorter than the widest one are
    /// padded with empty cells so the matrix stays rectangular.
    pub fn from_rows(rows: &[&[bool]]) -> Self {
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);
        let rows = rows
            .iter()
            .map(|row| {
                let mut row = row.to_vec();
                row.resize(width, false);
                row
            })
            .collect();
        Self { rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Offsets `(row, col)` of every occupied cell, top to bottom.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(j, _)| (i, j))
        })
    }

    /// Quarter turn clockwise: reverse the row order, then transpose.
    pub fn rotated_clockwise(&self) -> Self {
        let height = self.height();
        let width = self.width();
        let mut rotated = vec![vec![false; height]; width];

        for (i, row) in self.rows.iter().enumerate() {
            for (j, &cell) in row.iter().enumerate() {
                rotated[j][height - 1 - i] = cell;
            }
        }

        Self { rows: rotated }
    }
}

/// Signed so that candidate moves past the left or top edge stay representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }
}

/// The queued lookahead piece shown in the preview.
#[derive(Clone, Debug, PartialEq)]
pub struct NextPiece {
    pub shape: Shape,
    pub color: Color,
}

impl NextPiece {
    pub fn new(kind: ShapeKind, color: Color) -> Self {
        Self { shape: kind.shape(), color }
    }
}

/// The falling piece.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivePiece {
    pub shape: Shape,
    pub color: Color,
    pub position: Position,
}

impl ActivePiece {
    /// Absolute `(row, col)` board coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.cells().map(move |(i, j)| {
            (self.position.row + i as i32, self.position.col + j as i32)
        })
    }
}
