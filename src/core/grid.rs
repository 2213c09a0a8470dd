//! Grid geometry — tiling a surface with fixed-size cells and mapping
//! points back to cells.
//!
//! Cells are separated by a one-pixel gutter: cell `i` on an axis starts at
//! `margin + i * (cell_size + 1)` and covers `cell_size` pixels.  The row index
//! runs along the horizontal axis (x) and the column index along the vertical
//! axis (y).  Whatever does not fit a whole cell plus its gutter is split
//! evenly into the two margins so the tiled area sits centred.

/// Fixed size of one cell, in surface pixels (gutter not included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

impl CellSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for CellSize {
    fn default() -> Self {
        Self::new(10, 10)
    }
}

/// Address of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellIndex {
    pub row: usize,
    pub col: usize,
}

impl CellIndex {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Half-open pixel rectangle `[left, right) × [top, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CellRect {
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Empty rectangles contain nothing.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= i64::from(self.left)
            && x < i64::from(self.right)
            && y >= i64::from(self.top)
            && y < i64::from(self.bottom)
    }
}

// ───────────────────────────────────────── geometry ──────────

/// Derived layout of the grid for one surface size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridGeometry {
    pub cell: CellSize,
    pub surface_width: u32,
    pub surface_height: u32,
    /// Number of cells along x.
    pub rows: usize,
    /// Number of cells along y.
    pub columns: usize,
    pub margin_x: u32,
    pub margin_y: u32,
}

impl GridGeometry {
    /// Tile a `surface_width × surface_height` surface with `cell`-sized cells.
    pub fn new(surface_width: u32, surface_height: u32, cell: CellSize) -> Self {
        let (rows, margin_x) = tile_axis(surface_width, cell.width);
        let (columns, margin_y) = tile_axis(surface_height, cell.height);
        Self {
            cell,
            surface_width,
            surface_height,
            rows,
            columns,
            margin_x,
            margin_y,
        }
    }

    /// A grid with no cells, for a widget that has not been sized yet.
    pub fn empty(cell: CellSize) -> Self {
        Self {
            cell,
            ..Self::default()
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    pub fn contains_index(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.columns
    }

    /// Pixels covered by the cells and their gutters along x.
    pub fn tiled_width(&self) -> u64 {
        self.rows as u64 * stride(self.cell.width)
    }

    /// Pixels covered by the cells and their gutters along y.
    pub fn tiled_height(&self) -> u64 {
        self.columns as u64 * stride(self.cell.height)
    }

    /// Bounding box of a cell, or `None` outside the grid.
    pub fn cell_rect(&self, row: usize, col: usize) -> Option<CellRect> {
        if !self.contains_index(row, col) {
            return None;
        }
        // Both products are bounded by the surface size, so they fit in u32.
        let left = u64::from(self.margin_x) + row as u64 * stride(self.cell.width);
        let top = u64::from(self.margin_y) + col as u64 * stride(self.cell.height);
        Some(CellRect {
            left: left as u32,
            top: top as u32,
            right: (left + u64::from(self.cell.width)) as u32,
            bottom: (top + u64::from(self.cell.height)) as u32,
        })
    }

    /// Every cell index in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellIndex> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |col| CellIndex::new(row, col)))
    }

    /// First cell (row-major) whose box contains the point.  Points in a
    /// margin, in a gutter or off the surface match nothing.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<CellIndex> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let (px, py) = (x.floor() as i64, y.floor() as i64);
        self.cells().find(|idx| {
            self.cell_rect(idx.row, idx.col)
                .is_some_and(|rect| rect.contains(px, py))
        })
    }
}

/// Distance between the starts of two neighbouring cells.
fn stride(cell: u32) -> u64 {
    u64::from(cell) + 1
}

/// Returns `(cell count, margin)` for one axis.
fn tile_axis(surface: u32, cell: u32) -> (usize, u32) {
    let step = stride(cell);
    let count = u64::from(surface) / step;
    let leftover = u64::from(surface) - count * step;
    (count as usize, (leftover / 2) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(left: u32, top: u32, right: u32, bottom: u32) -> CellRect {
        CellRect {
            left,
            top,
            right,
            bottom,
        }
    }

    #[test]
    fn hundred_pixels_of_nine_pixel_cells() {
        let g = GridGeometry::new(100, 100, CellSize::new(9, 9));
        assert_eq!((g.rows, g.columns), (10, 10));
        assert_eq!((g.margin_x, g.margin_y), (0, 0));
        assert_eq!(g.hit_test(5.0, 5.0), Some(CellIndex::new(0, 0)));
        assert_eq!(g.hit_test(95.0, 95.0), Some(CellIndex::new(9, 9)));
        assert_eq!(g.hit_test(100.0, 100.0), None);
    }

    #[test]
    fn leftover_is_split_into_margins() {
        // 105 / 11 = 9 cells, 6 px left over → 3 px each side.
        let g = GridGeometry::new(105, 50, CellSize::new(10, 4));
        assert_eq!(g.rows, 9);
        assert_eq!(g.margin_x, 3);
        // 50 / 5 = 10 cells, nothing left.
        assert_eq!(g.columns, 10);
        assert_eq!(g.margin_y, 0);
        assert_eq!(g.cell_rect(0, 0), Some(rect(3, 0, 13, 4)));
        assert_eq!(g.cell_rect(1, 2), Some(rect(14, 10, 24, 14)));
    }

    #[test]
    fn row_index_follows_x() {
        let g = GridGeometry::new(100, 100, CellSize::new(9, 9));
        assert_eq!(g.hit_test(25.0, 5.0), Some(CellIndex::new(2, 0)));
        assert_eq!(g.hit_test(5.0, 25.0), Some(CellIndex::new(0, 2)));
    }

    #[test]
    fn tiling_never_exceeds_surface() {
        for surface_w in [0u32, 1, 2, 7, 10, 11, 64, 99, 100, 101, 333] {
            for surface_h in [0u32, 1, 5, 48, 100] {
                for cw in [0u32, 1, 2, 3, 9, 10, 50, 200] {
                    for ch in [0u32, 1, 4, 9, 100] {
                        let g = GridGeometry::new(surface_w, surface_h, CellSize::new(cw, ch));
                        let (w, h) = (u64::from(surface_w), u64::from(surface_h));
                        let used_w = g.tiled_width() + 2 * u64::from(g.margin_x);
                        let used_h = g.tiled_height() + 2 * u64::from(g.margin_y);
                        assert!(used_w <= w);
                        assert!(used_h <= h);
                        // At most one pixel is lost to the odd split.
                        assert!(w - used_w <= 1);
                        assert!(g.tiled_width() + u64::from(cw) + 1 > w);
                    }
                }
            }
        }
    }

    #[test]
    fn top_left_pixel_hits_its_cell() {
        let g = GridGeometry::new(123, 77, CellSize::new(6, 4));
        for idx in g.cells() {
            let rect = g.cell_rect(idx.row, idx.col).unwrap();
            assert_eq!(g.hit_test(rect.left as f32, rect.top as f32), Some(idx));
            let (r, b) = (rect.right - 1, rect.bottom - 1);
            assert_eq!(g.hit_test(r as f32 + 0.9, b as f32 + 0.9), Some(idx));
        }
    }

    #[test]
    fn gutters_and_margins_miss() {
        let g = GridGeometry::new(105, 105, CellSize::new(10, 10));
        assert_eq!(g.margin_x, 3);
        // Left margin.
        assert_eq!(g.hit_test(1.0, 50.0), None);
        // Gutter between cell 0 (3..13) and cell 1 (14..24).
        assert_eq!(g.hit_test(13.5, 50.0), None);
        assert_eq!(g.hit_test(50.0, 13.0), None);
        // Right margin starts after the last cell (ends at 101, gutter at 101).
        assert_eq!(g.hit_test(103.0, 50.0), None);
        assert_eq!(g.hit_test(-0.5, 5.0), None);
        assert_eq!(g.hit_test(f32::NAN, 5.0), None);
    }

    #[test]
    fn zero_sized_cells_hit_nothing() {
        let g = GridGeometry::new(10, 10, CellSize::new(0, 0));
        assert_eq!(g.rows, 10);
        assert!(g.cell_rect(0, 0).unwrap().is_empty());
        assert_eq!(g.hit_test(0.0, 0.0), None);
    }

    #[test]
    fn huge_cells_do_not_overflow() {
        let g = GridGeometry::new(u32::MAX, 10, CellSize::new(u32::MAX, u32::MAX));
        assert_eq!((g.rows, g.columns), (0, 0));
        assert_eq!(g.hit_test(1.0, 1.0), None);
    }

    #[test]
    fn cells_are_row_major() {
        let g = GridGeometry::new(22, 33, CellSize::new(10, 10));
        let order: Vec<_> = g.cells().map(|c| (c.row, c.col)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
        assert_eq!(g.cell_count(), 6);
    }

    #[test]
    fn odd_leftover_and_too_small_surface() {
        // 13 / 5 = 2 cells, 3 px left → 1 px margin, the spare pixel on the far side.
        let g = GridGeometry::new(13, 13, CellSize::new(4, 4));
        assert_eq!((g.rows, g.columns), (2, 2));
        assert_eq!((g.margin_x, g.margin_y), (1, 1));
        assert_eq!(g.cell_rect(0, 0), Some(rect(1, 1, 5, 5)));
        assert_eq!(g.cell_rect(1, 1), Some(rect(6, 6, 10, 10)));
        assert_eq!(g.hit_test(5.0, 2.0), None);
        assert_eq!(g.hit_test(10.0, 7.0), None);
        assert_eq!(g.hit_test(9.9, 9.9), Some(CellIndex::new(1, 1)));

        // A cell plus its gutter does not fit: no grid at all.
        let g = GridGeometry::new(4, 4, CellSize::new(4, 4));
        assert_eq!((g.rows, g.columns), (0, 0));
        assert_eq!(g.hit_test(1.0, 1.0), None);
        assert_eq!(g.cells().count(), 0);
    }
}
