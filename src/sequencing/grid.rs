//! Grid positions and the already-placed neighbors of a cell

/// Column and row of a sequence index in a fixed-column grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridPosition {
    /// Zero-based column
    pub column: usize,
    /// Zero-based row
    pub row: usize,
}

impl GridPosition {
    /// Position of sequence index `index` in a grid with `columns` columns
    ///
    /// `columns` must be non-zero.
    pub const fn from_index(index: usize, columns: usize) -> Self {
        Self {
            column: index % columns,
            row: index / columns,
        }
    }
}

/// Sequence indices of the placed cells adjacent to a position
///
/// Only cells before the position in sequence order are ever referenced, so
/// every present index is already placed when the position is filled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Neighbors {
    /// Cell to the left, same row
    pub left: Option<usize>,
    /// Cell directly above
    pub top: Option<usize>,
    /// Last cell of the previous row, only for the first column
    pub wrap: Option<usize>,
}

impl Neighbors {
    /// Neighbors of sequence index `index` in a grid with `columns` columns
    ///
    /// `columns` must be non-zero.
    pub const fn of(index: usize, columns: usize) -> Self {
        let position = GridPosition::from_index(index, columns);

        let left = if position.column > 0 {
            Some(index - 1)
        } else {
            None
        };

        let top = if position.row > 0 {
            Some(index - columns)
        } else {
            None
        };

        let wrap = if position.column == 0 && position.row > 0 {
            Some(index - columns + (columns - 1))
        } else {
            None
        };

        Self { left, top, wrap }
    }

    /// Test if no neighbor is present
    pub const fn is_empty(&self) -> bool {
        self.left.is_none() && self.top.is_none() && self.wrap.is_none()
    }
}
