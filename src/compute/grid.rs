//! Double-buffered toroidal grid storage.
//!
//! Two same-sized row-major buffers hold the field. One is "current" (the
//! readable generation), the other receives the next generation. Only
//! [`GridBuffer::swap`] changes which buffer is current.

use super::Offset;

/// Buffer length did not match `board_size²`.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("Buffer holds {actual} cells, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

/// Read-only view of one generation.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    data: &'a [f32],
    board_size: usize,
}

impl<'a> GridView<'a> {
    /// Wrap a row-major slice of `board_size²` cells.
    pub fn new(data: &'a [f32], board_size: usize) -> Result<Self, GridError> {
        let expected = board_size * board_size;
        if data.len() != expected {
            return Err(GridError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, board_size })
    }

    #[inline]
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.board_size + col]
    }

    #[inline]
    pub fn get_index(&self, index: usize) -> f32 {
        self.data[index]
    }

    /// Value at `index` displaced by `offset`, wrapping each axis independently.
    #[inline]
    pub fn get_offset(&self, index: usize, offset: Offset) -> f32 {
        let n = self.board_size;
        let row = wrap_coord(index / n, offset.dy, n);
        let col = wrap_coord(index % n, offset.dx, n);
        self.data[row * n + col]
    }

    #[inline]
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    /// Raw bytes for uploading to a display buffer.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.data)
    }
}

#[inline]
fn wrap_coord(coord: usize, delta: i32, size: usize) -> usize {
    let s = size as i64;
    ((coord as i64 + delta as i64) % s + s) as usize % size
}

/// Two-buffer toroidal field with a fixed board size.
#[derive(Debug, Clone)]
pub struct GridBuffer {
    buffers: [Vec<f32>; 2],
    current: usize,
    board_size: usize,
}

impl GridBuffer {
    /// Create a zeroed grid.
    pub fn new(board_size: usize) -> Self {
        let cells = board_size * board_size;
        Self {
            buffers: [vec![0.0; cells], vec![0.0; cells]],
            current: 0,
            board_size,
        }
    }

    /// Create a grid seeded from a `(row, col) -> value` generator.
    pub fn seeded<F>(board_size: usize, generator: F) -> Self
    where
        F: FnMut(usize, usize) -> f32,
    {
        let mut grid = Self::new(board_size);
        grid.seed(generator);
        grid
    }

    /// Create a grid from row-major values.
    pub fn from_values(board_size: usize, values: Vec<f32>) -> Result<Self, GridError> {
        let expected = board_size * board_size;
        if values.len() != expected {
            return Err(GridError::BufferSizeMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            buffers: [values.clone(), values],
            current: 0,
            board_size,
        })
    }

    /// Overwrite the field from a generator.
    ///
    /// Both buffers receive the seed, so the previous generation reads as the
    /// seed until the first advance.
    pub fn seed<F>(&mut self, mut generator: F)
    where
        F: FnMut(usize, usize) -> f32,
    {
        let n = self.board_size;
        let (front, back) = self.split_mut();
        for row in 0..n {
            for col in 0..n {
                let idx = row * n + col;
                let v = generator(row, col);
                front[idx] = v;
                back[idx] = v;
            }
        }
    }

    #[inline]
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.board_size * self.board_size
    }

    /// Which buffer (0 or 1) is current.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The readable generation.
    #[inline]
    pub fn current(&self) -> GridView<'_> {
        GridView {
            data: &self.buffers[self.current],
            board_size: self.board_size,
        }
    }

    /// The non-current buffer: the previous generation once one has been computed.
    #[inline]
    pub fn previous(&self) -> GridView<'_> {
        GridView {
            data: &self.buffers[1 - self.current],
            board_size: self.board_size,
        }
    }

    /// Borrow the current generation for reading and the other buffer for writing.
    ///
    /// The borrow checker keeps the two disjoint; the caller fills `next`
    /// completely and then calls [`swap`](Self::swap).
    pub fn advance_into<F>(&mut self, write: F)
    where
        F: FnOnce(GridView<'_>, &mut [f32]),
    {
        let board_size = self.board_size;
        let (front, back) = self.split_mut();
        write(
            GridView {
                data: front,
                board_size,
            },
            back,
        );
    }

    /// Flip which buffer is current. No data is copied.
    #[inline]
    pub fn swap(&mut self) {
        self.current = 1 - self.current;
    }

    fn split_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        let [a, b] = &mut self.buffers;
        if self.current == 0 {
            (a.as_mut_slice(), b.as_mut_slice())
        } else {
            (b.as_mut_slice(), a.as_mut_slice())
        }
    }
}
