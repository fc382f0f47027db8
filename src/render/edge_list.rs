//! Per-polygon scanline boundary table.

/// Left and right boundary of one scanline, with the depth at each end.
///
/// A row nothing has touched keeps the sentinels `left_x = +inf`,
/// `right_x = -inf`, so `left_x > right_x` and the row yields no span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeRow {
    pub left_x: f32,
    pub right_x: f32,
    pub left_z: f32,
    pub right_z: f32,
}

impl EdgeRow {
    pub const EMPTY: Self = Self {
        left_x: f32::INFINITY,
        right_x: f32::NEG_INFINITY,
        left_z: f32::INFINITY,
        right_z: f32::INFINITY,
    };

    #[inline]
    pub fn is_covered(&self) -> bool {
        self.left_x <= self.right_x
    }
}

/// Edge list of a single polygon, one [`EdgeRow`] per scanline in
/// `start_y..=end_y`. Rows are indexed by `y - start_y`.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeList {
    start_y: i32,
    end_y: i32,
    rows: Vec<EdgeRow>,
}

impl EdgeList {
    /// Allocates `end_y - start_y + 1` empty rows (none if `end_y < start_y`).
    pub fn new(start_y: i32, end_y: i32) -> Self {
        let len = (end_y as i64 - start_y as i64 + 1).max(0) as usize;
        Self {
            start_y,
            end_y,
            rows: vec![EdgeRow::EMPTY; len],
        }
    }

    pub fn start_y(&self) -> i32 {
        self.start_y
    }

    pub fn end_y(&self) -> i32 {
        self.end_y
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[EdgeRow] {
        &self.rows
    }

    #[inline]
    pub fn row(&self, row: usize) -> &EdgeRow {
        &self.rows[row]
    }

    pub fn left_x(&self, row: usize) -> f32 {
        self.rows[row].left_x
    }

    pub fn right_x(&self, row: usize) -> f32 {
        self.rows[row].right_x
    }

    pub fn left_z(&self, row: usize) -> f32 {
        self.rows[row].left_z
    }

    pub fn right_z(&self, row: usize) -> f32 {
        self.rows[row].right_z
    }

    pub fn is_covered(&self, row: usize) -> bool {
        self.rows[row].is_covered()
    }

    /// Offers an edge crossing at `(x, z)` for `row`.
    ///
    /// Replaces the left end if `x <= left_x` and the right end if
    /// `x >= right_x`. On the first point, or on an exact tie, both ends move.
    #[inline]
    pub fn add_point(&mut self, row: usize, x: f32, z: f32) {
        let entry = &mut self.rows[row];
        if x <= entry.left_x {
            entry.left_x = x;
            entry.left_z = z;
        }
        if x >= entry.right_x {
            entry.right_x = x;
            entry.right_z = z;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rows_are_sentinels() {
        let list = EdgeList::new(3, 6);
        assert_eq!(list.len(), 4);
        assert_eq!(list.start_y(), 3);
        assert_eq!(list.end_y(), 6);
        for row in 0..list.len() {
            assert!(!list.is_covered(row));
            assert_eq!(list.left_x(row), f32::INFINITY);
            assert_eq!(list.right_x(row), f32::NEG_INFINITY);
            assert_eq!(list.left_z(row), f32::INFINITY);
            assert_eq!(list.right_z(row), f32::INFINITY);
        }
    }

    #[test]
    fn test_single_point_sets_both_ends() {
        let mut list = EdgeList::new(0, 0);
        list.add_point(0, 2.5, 7.0);
        let row = list.row(0);
        assert_eq!((row.left_x, row.right_x), (2.5, 2.5));
        assert_eq!((row.left_z, row.right_z), (7.0, 7.0));
        assert!(row.is_covered());
    }

    #[test]
    fn test_points_widen_span() {
        let mut list = EdgeList::new(0, 1);
        list.add_point(1, 5.0, 1.0);
        list.add_point(1, 2.0, 3.0);
        list.add_point(1, 3.0, 9.0);
        assert_eq!(list.left_x(1), 2.0);
        assert_eq!(list.left_z(1), 3.0);
        assert_eq!(list.right_x(1), 5.0);
        assert_eq!(list.right_z(1), 1.0);
        assert!(!list.is_covered(0));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let list = EdgeList::new(5, 2);
        assert!(list.is_empty());
    }
}
