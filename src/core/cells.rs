//! Per-cell colour storage.

use super::color::Color;
use super::grid::CellIndex;

/// A `rows × columns` table of colours, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellColorMap {
    rows: usize,
    columns: usize,
    colors: Vec<Color>,
}

impl CellColorMap {
    /// A fresh map with every cell set to `fill`.
    pub fn new(rows: usize, columns: usize, fill: Color) -> Self {
        Self {
            rows,
            columns,
            colors: vec![fill; rows * columns],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.columns).then(|| row * self.columns + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Color> {
        self.offset(row, col).map(|i| self.colors[i])
    }

    /// Out-of-range indices are ignored.
    pub fn set(&mut self, row: usize, col: usize, color: Color) {
        if let Some(i) = self.offset(row, col) {
            self.colors[i] = color;
        }
    }

    pub fn fill(&mut self, color: Color) {
        self.colors.fill(color);
    }

    /// `(index, colour)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, Color)> + '_ {
        let columns = self.columns.max(1);
        self.colors
            .iter()
            .enumerate()
            .map(move |(i, &c)| (CellIndex::new(i / columns, i % columns), c))
    }
}
