//! Neighborhood offset tables for disk-shaped neighborhoods.
//!
//! Lattice points within the inner radius and within the ring between the
//! inner and outer radius are enumerated once, using the eightfold symmetry
//! of a disk on a square lattice. Only one representative `(a, b)` with
//! `a >= b >= 0` is distance-tested; its reflections are filed alongside it.
//! The origin is never part of either list.

use crate::schema::{ConfigError, check_radii};

/// A lattice displacement from a cell. `dx` moves along columns, `dy` along rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    #[inline]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Flat signed offset into a row-major board.
    #[inline]
    pub fn linear(self, board_size: usize) -> isize {
        self.dx as isize + self.dy as isize * board_size as isize
    }

    #[inline]
    pub fn distance_squared(self) -> u32 {
        (self.dx * self.dx + self.dy * self.dy) as u32
    }
}

/// Apply a flat signed offset to a flat index modulo `board_size²`.
///
/// This is the linear dereference contract for [`Offset::linear`]. A column
/// step past the board edge lands in the adjacent row; use
/// [`GridView::get_offset`](super::GridView::get_offset) for per-axis wrapping.
#[inline]
pub fn wrap_linear(index: usize, offset: isize, board_size: usize) -> usize {
    let cells = (board_size * board_size) as isize;
    ((index as isize + offset) % cells + cells) as usize % cells as usize
}

/// Inner-disk and outer-ring offsets for a fixed pair of radii.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborOffsetTable {
    inner: Vec<Offset>,
    outer: Vec<Offset>,
    inner_radius: u32,
    outer_radius: u32,
    board_size: usize,
}

impl NeighborOffsetTable {
    /// Build the offset lists for the given radii.
    ///
    /// Fails with [`ConfigError::InvalidRadius`] when `outer_radius < inner_radius`
    /// or when the outer disk would alias on a board of `board_size`.
    pub fn build(inner_radius: u32, outer_radius: u32, board_size: usize) -> Result<Self, ConfigError> {
        check_radii(inner_radius, outer_radius, board_size)?;

        let inner_sq = inner_radius * inner_radius;
        let outer_sq = outer_radius * outer_radius;
        let mut inner = Vec::new();
        let mut outer = Vec::new();

        'outer: for a in 1..=outer_radius as i32 {
            // b == 0
            let len_sq = (a * a) as u32;
            if len_sq <= inner_sq {
                push_axis(&mut inner, a);
            } else {
                debug_assert!(len_sq <= outer_sq);
                push_axis(&mut outer, a);
            }

            // 0 < b < a; distance grows with b, so the first miss ends this `a`
            for b in 1..a {
                let len_sq = (a * a + b * b) as u32;
                if len_sq <= inner_sq {
                    push_octants(&mut inner, a, b);
                } else if len_sq <= outer_sq {
                    push_octants(&mut outer, a, b);
                } else {
                    continue 'outer;
                }
            }

            // b == a
            let len_sq = (2 * a * a) as u32;
            if len_sq <= inner_sq {
                push_diagonals(&mut inner, a);
            } else if len_sq <= outer_sq {
                push_diagonals(&mut outer, a);
            }
        }

        log::debug!(
            "Built offset table: radii {}/{}, {} inner + {} outer cells",
            inner_radius,
            outer_radius,
            inner.len(),
            outer.len()
        );

        Ok(Self {
            inner,
            outer,
            inner_radius,
            outer_radius,
            board_size,
        })
    }

    /// Offsets with `0 < d² <= inner_radius²`.
    #[inline]
    pub fn inner(&self) -> &[Offset] {
        &self.inner
    }

    /// Offsets with `inner_radius² < d² <= outer_radius²`.
    #[inline]
    pub fn outer(&self) -> &[Offset] {
        &self.outer
    }

    pub fn inner_linear(&self) -> Vec<isize> {
        self.inner.iter().map(|o| o.linear(self.board_size)).collect()
    }

    pub fn outer_linear(&self) -> Vec<isize> {
        self.outer.iter().map(|o| o.linear(self.board_size)).collect()
    }

    pub fn inner_radius(&self) -> u32 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> u32 {
        self.outer_radius
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }
}

fn push_axis(list: &mut Vec<Offset>, a: i32) {
    list.extend([
        Offset::new(-a, 0),
        Offset::new(a, 0),
        Offset::new(0, -a),
        Offset::new(0, a),
    ]);
}

fn push_octants(list: &mut Vec<Offset>, a: i32, b: i32) {
    list.extend([
        Offset::new(-a, -b),
        Offset::new(-a, b),
        Offset::new(a, -b),
        Offset::new(a, b),
        Offset::new(-b, -a),
        Offset::new(-b, a),
        Offset::new(b, -a),
        Offset::new(b, a),
    ]);
}

fn push_diagonals(list: &mut Vec<Offset>, a: i32) {
    list.extend([
        Offset::new(-a, -a),
        Offset::new(-a, a),
        Offset::new(a, -a),
        Offset::new(a, a),
    ]);
}
