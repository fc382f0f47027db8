//! Scan conversion into edge lists, and depth-buffered span filling.
//!
//! # Algorithm Overview
//!
//! 1. **Scan-convert** the triangle: walk each of its three edges one scanline
//!    at a time, recording every crossing in the polygon's [`EdgeList`]. Each
//!    row keeps the leftmost and rightmost crossing and the depth there.
//! 2. **Composite**: for every covered row, walk from the left to the right
//!    boundary, interpolating depth linearly, and let the framebuffer's depth
//!    test decide which pixels the polygon wins.
//!
//! # Inverse Slope Method
//!
//! Along an edge from `up` (smaller y) to `down` (larger y), x and z change by
//! a constant amount per scanline:
//!
//! ```text
//! step_x = (down.x - up.x) / (down.y - up.y)
//! step_z = (down.z - up.z) / (down.y - up.y)
//! ```
//!
//! Horizontal edges (`down.y == up.y`) cross no scanline and are skipped
//! before the division.
//!
//! ```text
//!   y=0   a-----------b      a->b horizontal: skipped
//!   y=1   |        /         b->c: x steps by -1 per row
//!   y=2   |     /            c->a: x stays at 0
//!   y=3   |  /
//!   y=4   c
//! ```

use super::edge_list::EdgeList;
use super::framebuffer::FrameBuffer;
use crate::colors::Color;
use crate::scene::Polygon;

/// Builds the edge list of `polygon`.
///
/// Rows span `floor(min y)..=ceil(max y)`. An edge from `up` to `down`
/// contributes one crossing on every integer `y` from `floor(up.y)` up to,
/// but not including, `floor(down.y)`.
pub fn scan_convert(polygon: &Polygon) -> EdgeList {
    let v = &polygon.vertices;
    let min_y = v[0].y.min(v[1].y).min(v[2].y).floor() as i32;
    let max_y = v[0].y.max(v[1].y).max(v[2].y).ceil() as i32;
    let mut edge_list = EdgeList::new(min_y, max_y);

    for i in 0..3 {
        let a = v[i];
        let b = v[(i + 1) % 3];
        if a.y == b.y {
            continue;
        }
        let (up, down) = if a.y < b.y { (a, b) } else { (b, a) };

        let dy = down.y - up.y;
        let step_x = (down.x - up.x) / dy;
        let step_z = (down.z - up.z) / dy;

        let mut x = up.x;
        let mut z = up.z;
        for y in up.y.floor() as i32..down.y.floor() as i32 {
            edge_list.add_point((y - min_y) as usize, x, z);
            x += step_x;
            z += step_z;
        }
    }

    edge_list
}

/// Fills the spans of `edge_list` into `buffer` with `color`, subject to the
/// depth test.
///
/// Rows outside the framebuffer and rows without coverage are skipped. On a
/// row, pixels `floor(left_x)..floor(right_x)` are visited with z moving
/// linearly from `left_z`. A zero-width row (`left_x == right_x`) draws no
/// pixel, since its pixel range is empty. Returns the number of pixels
/// written.
pub fn composite(buffer: &mut FrameBuffer, edge_list: &EdgeList, color: Color) -> usize {
    let height = buffer.height() as i32;
    let width = buffer.width() as i32;
    let mut written = 0;

    for (offset, row) in edge_list.rows().iter().enumerate() {
        let y = edge_list.start_y() + offset as i32;
        if y < 0 || y >= height {
            continue;
        }
        if !row.is_covered() {
            continue;
        }

        let span = row.right_x - row.left_x;
        let step_z = if span == 0.0 {
            0.0
        } else {
            (row.right_z - row.left_z) / span
        };

        let x_start = row.left_x.floor() as i32;
        let x_end = row.right_x.floor() as i32;
        for x in x_start.max(0)..x_end.min(width) {
            let z = row.left_z + step_z * (x - x_start) as f32;
            if buffer.set_pixel_with_depth(x, y, z, color) {
                written += 1;
            }
        }
    }

    written
}
